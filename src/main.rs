/*
 * Goal-Seeking Flock Simulation - Demo Driver
 *
 * Headless host for the flocking engine. Spawns a flock with the default
 * tuning, ticks it at a fixed 60 Hz delta, and logs one summary line per
 * simulated second. Partway through the run it exercises the host surface:
 * pinning the goal, resizing the flock, and handing the goal back to its
 * orbit.
 */

use glam::Vec3;

use flocking::{Flock, SimulationParams};

const TICK_RATE: u32 = 60;
const RUN_SECONDS: u32 = 15;

fn main() {
    env_logger::Builder::from_env(log_env()).init();

    let params = SimulationParams::default();
    let mut flock = match Flock::new(params) {
        Ok(flock) => flock,
        Err(e) => {
            log::error!("Invalid simulation parameters: {}", e);
            std::process::exit(1);
        }
    };

    let goal = flock.goal_position();
    log::info!(
        "Spawned {} boids, goal orbiting from ({:.1}, {:.1}, {:.1})",
        flock.len(),
        goal.x,
        goal.y,
        goal.z
    );

    let dt = 1.0 / TICK_RATE as f32;
    for second in 1..=RUN_SECONDS {
        for _ in 0..TICK_RATE {
            flock.tick(dt);
        }
        report(&flock, second);

        match second {
            5 => {
                let held = Vec3::new(60.0, 10.0, 0.0);
                flock.set_goal(held);
                log::info!("Pinned the goal at ({:.1}, {:.1}, {:.1})", held.x, held.y, held.z);
            }
            8 => {
                flock.set_flock_size(200);
                log::info!("Resized the flock to {} boids", flock.len());
            }
            10 => {
                flock.resume_goal_orbit();
                log::info!("Goal returned to its orbit");
            }
            _ => {}
        }
    }
}

// Info level by default; RUST_LOG can raise or narrow it
fn log_env() -> env_logger::Env<'static> {
    env_logger::Env::default().default_filter_or("info")
}

// One status line per simulated second
fn report(flock: &Flock, second: u32) {
    let summary = flock.summary();
    let goal = flock.goal_position();
    log::info!(
        "t={:>2}s boids={} centroid=({:.1}, {:.1}, {:.1}) heading=({:.2}, {:.2}, {:.2}) goal=({:.1}, {:.1}, {:.1})",
        second,
        summary.count,
        summary.centroid.x,
        summary.centroid.y,
        summary.centroid.z,
        summary.average_heading.x,
        summary.average_heading.y,
        summary.average_heading.z,
        goal.x,
        goal.y,
        goal.z
    );
}
