/*
 * Flock Coordinator Module
 *
 * This module owns the boid population and the shared goal, and drives the
 * three-phase tick:
 * 1. Snapshot: freeze the population for the duration of the force pass
 * 2. Perceive and decide: every boid queries its neighborhood out of the
 *    frozen population and computes its steering force, by value
 * 3. Act: every boid integrates its own force, touching only itself
 *
 * Phase 2 never writes and phase 3 writes only boid-local state, so boid
 * iteration order cannot affect the outcome, and both phases can run on the
 * rayon pool when the parallel flag is set without changing a single result.
 *
 * The coordinator also owns spawning. All randomness flows through one seeded
 * stream, so a run is reproducible from its seed alone, including every
 * respawn a resize triggers along the way.
 */

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;

use crate::boid::Boid;
use crate::goal::GoalDriver;
use crate::math;
use crate::neighbor;
use crate::params::{ParamsError, SimulationParams};
use crate::summary::FlockSummary;

pub struct Flock {
    boids: Vec<Boid>,
    goal: GoalDriver,
    params: SimulationParams,
    rng: ChaCha12Rng,
}

impl Flock {
    // Build a flock and spawn the initial population
    pub fn new(params: SimulationParams) -> Result<Self, ParamsError> {
        params.validate()?;
        let count = params.num_boids;
        let mut flock = Self {
            boids: Vec::new(),
            goal: GoalDriver::new(params.orbit),
            rng: ChaCha12Rng::seed_from_u64(params.seed),
            params,
        };
        flock.respawn(count);
        Ok(flock)
    }

    // Build a flock around explicitly placed boids, for hosts that position
    // agents themselves instead of using the spawn volume
    pub fn with_boids(params: SimulationParams, boids: Vec<Boid>) -> Result<Self, ParamsError> {
        params.validate()?;
        let mut flock = Self {
            boids,
            goal: GoalDriver::new(params.orbit),
            rng: ChaCha12Rng::seed_from_u64(params.seed),
            params,
        };
        flock.params.num_boids = flock.boids.len();
        Ok(flock)
    }

    // Advance the simulation one step. The goal moves first so that every
    // boid in this tick steers towards the same goal position.
    pub fn tick(&mut self, dt: f32) {
        let goal = self.goal.advance(dt);
        if self.boids.is_empty() {
            return;
        }

        // Phases 1 and 2: decide every force from the frozen population.
        // The shared borrow ends before any boid moves.
        let forces = self.compute_forces(goal);

        // Phase 3: apply
        if self.params.parallel {
            self.boids
                .par_iter_mut()
                .zip(forces.par_iter())
                .for_each(|(boid, force)| boid.integrate(*force, dt));
        } else {
            for (boid, force) in self.boids.iter_mut().zip(&forces) {
                boid.integrate(*force, dt);
            }
        }
    }

    // Force pass over the population snapshot. The parallel and serial
    // paths run the exact same per-boid computation, so their results are
    // identical down to the last bit.
    fn compute_forces(&self, goal: Vec3) -> Vec<Vec3> {
        let population = &self.boids;
        let radius = self.params.neighbor_radius;
        let force_of = |boid: &Boid| {
            let neighbors = neighbor::within_radius(boid.position, radius, population);
            boid.steering(&neighbors, goal)
        };

        if self.params.parallel {
            population.par_iter().map(force_of).collect()
        } else {
            population.iter().map(force_of).collect()
        }
    }

    // Pin the goal to an explicit position; the orbit stays suspended
    // until resume_goal_orbit is called
    pub fn set_goal(&mut self, position: Vec3) {
        self.goal.hold_at(position);
    }

    pub fn resume_goal_orbit(&mut self) {
        self.goal.resume_orbit();
    }

    // Resize the flock. Not incremental: the whole population is torn down
    // and a fresh batch spawns at the new count.
    pub fn set_flock_size(&mut self, count: usize) {
        self.respawn(count);
    }

    // Read-only view of the population
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn goal_position(&self) -> Vec3 {
        self.goal.position()
    }

    pub fn neighbor_radius(&self) -> f32 {
        self.params.neighbor_radius
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    // Centroid and average heading, for framing and overlay consumers
    pub fn summary(&self) -> FlockSummary {
        FlockSummary::of(&self.boids)
    }

    // Tear down the current population and spawn a fresh batch. Draws
    // continue from the seeded stream rather than restarting it, so every
    // respawn in a run gets fresh kinematics while the run as a whole stays
    // reproducible from the seed.
    fn respawn(&mut self, count: usize) {
        self.params.num_boids = count;
        self.boids.clear();
        self.boids.reserve(count);
        for _ in 0..count {
            let boid = Self::spawn_one(&mut self.rng, &self.params);
            self.boids.push(boid);
        }
    }

    // One spawn draw: a position inside the spawn volume and a heading
    // inside the spawn cone, at a random cruise speed
    fn spawn_one(rng: &mut ChaCha12Rng, params: &SimulationParams) -> Boid {
        let extent = params.spawn_extent;
        let offset = Vec3::new(
            rng.gen_range(-extent..=extent),
            rng.gen_range(-extent..=extent),
            rng.gen_range(-extent..=extent),
        );
        let heading = math::jittered_direction(rng, params.boid.forward, params.spawn_cone);
        let speed = rng.gen_range(params.boid.min_speed..=params.boid.max_speed);
        Boid::new(params.spawn_center + offset, heading * speed, params.boid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_params() -> SimulationParams {
        SimulationParams {
            num_boids: 24,
            ..SimulationParams::default()
        }
    }

    fn assert_flocks_identical(a: &Flock, b: &Flock) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.boids().iter().zip(b.boids()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.velocity, y.velocity);
        }
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = Flock::new(small_params()).unwrap();
        let mut b = Flock::new(small_params()).unwrap();
        for _ in 0..20 {
            a.tick(0.033);
            b.tick(0.033);
        }
        assert_flocks_identical(&a, &b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = Flock::new(small_params()).unwrap();
        let b = Flock::new(SimulationParams {
            seed: 1234,
            ..small_params()
        })
        .unwrap();
        let differs = a
            .boids()
            .iter()
            .zip(b.boids())
            .any(|(x, y)| x.position != y.position);
        assert!(differs);
    }

    #[test]
    fn spawn_fills_the_volume_and_cone() {
        let params = small_params();
        let flock = Flock::new(params.clone()).unwrap();
        assert_eq!(flock.len(), params.num_boids);

        for boid in flock.boids() {
            let offset = boid.position - params.spawn_center;
            assert!(offset.x.abs() <= params.spawn_extent);
            assert!(offset.y.abs() <= params.spawn_extent);
            assert!(offset.z.abs() <= params.spawn_extent);

            // Headings start roughly coherent around the forward axis and
            // speeds start inside the clamp band
            let heading = boid.velocity.normalize();
            assert!(heading.dot(params.boid.forward) > 0.5);
            let speed = boid.velocity.length();
            assert!(speed >= params.boid.min_speed - 1e-3);
            assert!(speed <= params.boid.max_speed + 1e-3);
        }
    }

    #[test]
    fn population_order_does_not_change_the_outcome() {
        let seed_flock = Flock::new(small_params()).unwrap();
        let spawned = seed_flock.boids().to_vec();
        let mut reversed = spawned.clone();
        reversed.reverse();

        let mut forward = Flock::with_boids(small_params(), spawned).unwrap();
        let mut backward = Flock::with_boids(small_params(), reversed).unwrap();
        for _ in 0..3 {
            forward.tick(0.033);
            backward.tick(0.033);
        }

        // Compare each boid with its counterpart at the mirrored index.
        // Accumulation order inside the scans differs between the two
        // runs, so allow float noise but nothing more.
        let n = forward.len();
        for (i, boid) in forward.boids().iter().enumerate() {
            let twin = &backward.boids()[n - 1 - i];
            assert_relative_eq!(boid.position.x, twin.position.x, epsilon = 1e-3);
            assert_relative_eq!(boid.position.y, twin.position.y, epsilon = 1e-3);
            assert_relative_eq!(boid.position.z, twin.position.z, epsilon = 1e-3);
            assert_relative_eq!(boid.velocity.x, twin.velocity.x, epsilon = 1e-3);
            assert_relative_eq!(boid.velocity.y, twin.velocity.y, epsilon = 1e-3);
            assert_relative_eq!(boid.velocity.z, twin.velocity.z, epsilon = 1e-3);
        }
    }

    #[test]
    fn parallel_and_serial_paths_agree_exactly() {
        let mut serial = Flock::new(small_params()).unwrap();
        let mut parallel = Flock::new(SimulationParams {
            parallel: true,
            ..small_params()
        })
        .unwrap();

        for _ in 0..10 {
            serial.tick(0.033);
            parallel.tick(0.033);
        }
        assert_flocks_identical(&serial, &parallel);
    }

    #[test]
    fn speeds_stay_in_band_under_sustained_ticking() {
        let params = small_params();
        let mut flock = Flock::new(params.clone()).unwrap();
        for _ in 0..100 {
            flock.tick(0.033);
        }
        for boid in flock.boids() {
            let speed = boid.velocity.length();
            assert!(speed >= params.boid.min_speed - 1e-3);
            assert!(speed <= params.boid.max_speed + 1e-3);
        }
    }

    #[test]
    fn empty_flock_ticks_without_effect() {
        let mut flock = Flock::new(SimulationParams {
            num_boids: 0,
            ..SimulationParams::default()
        })
        .unwrap();
        flock.tick(0.033);
        assert!(flock.is_empty());
        assert_eq!(flock.summary().count, 0);
    }

    #[test]
    fn resize_respawns_the_whole_population() {
        let mut flock = Flock::new(small_params()).unwrap();
        for _ in 0..10 {
            flock.tick(0.033);
        }

        flock.set_flock_size(40);
        assert_eq!(flock.len(), 40);
        assert_eq!(flock.params().num_boids, 40);

        // Fresh kinematics: everything is back inside the spawn volume
        let params = flock.params().clone();
        for boid in flock.boids() {
            let offset = boid.position - params.spawn_center;
            assert!(offset.x.abs() <= params.spawn_extent);
            assert!(offset.y.abs() <= params.spawn_extent);
            assert!(offset.z.abs() <= params.spawn_extent);
        }

        flock.set_flock_size(5);
        assert_eq!(flock.len(), 5);
    }

    #[test]
    fn resize_sequence_is_reproducible() {
        // Only spawn draws consume randomness; ticking does not. Two runs
        // that resize after a different number of ticks therefore respawn
        // the exact same batch.
        let run = |ticks_before_resize: usize| {
            let mut flock = Flock::new(small_params()).unwrap();
            for _ in 0..ticks_before_resize {
                flock.tick(0.033);
            }
            flock.set_flock_size(12);
            flock
        };
        assert_flocks_identical(&run(3), &run(9));
    }

    #[test]
    fn held_goal_pulls_the_flock_towards_it() {
        let mut flock = Flock::new(small_params()).unwrap();
        let target = Vec3::new(300.0, 0.0, 0.0);
        flock.set_goal(target);

        let start = flock.summary().centroid;
        for _ in 0..200 {
            flock.tick(0.05);
        }
        assert_eq!(flock.goal_position(), target);

        let end = flock.summary().centroid;
        assert!(target.distance(end) < target.distance(start) - 50.0);
    }

    #[test]
    fn resumed_goal_orbits_again() {
        let mut flock = Flock::new(small_params()).unwrap();
        flock.set_goal(Vec3::ZERO);
        flock.tick(0.033);
        assert_eq!(flock.goal_position(), Vec3::ZERO);

        flock.resume_goal_orbit();
        flock.tick(0.033);
        assert!(flock.goal_position() != Vec3::ZERO);
    }

    #[test]
    fn rejects_invalid_params() {
        let params = SimulationParams {
            neighbor_radius: 1.0,
            ..SimulationParams::default()
        };
        assert!(Flock::new(params).is_err());
    }
}
