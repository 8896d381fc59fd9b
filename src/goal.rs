/*
 * Goal Driver Module
 *
 * Computes the goal position the whole flock steers toward. By default the
 * goal orbits a configured center: an internal angle advances by
 * move_speed * dt each tick and the position follows a circular path with a
 * vertical sine oscillation layered on top. A host can pin the goal to an
 * explicit position instead, which suspends the orbit until resumed.
 *
 * The driver is advanced exactly once per tick, before any boid looks at it,
 * so every boid in a tick sees the same goal.
 */

use glam::Vec3;
use serde::{Deserialize, Serialize};

// Shape of the orbiting goal path
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitPath {
    pub center: Vec3,
    pub radius: f32,
    // Angular advance in radians per second
    pub move_speed: f32,
    // Vertical sine oscillation around the center height
    pub vertical_amplitude: f32,
    pub vertical_frequency: f32,
}

impl Default for OrbitPath {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 20.0, 0.0),
            radius: 30.0,
            move_speed: 0.5,
            vertical_amplitude: 5.0,
            vertical_frequency: 2.0,
        }
    }
}

impl OrbitPath {
    // Point on the path at the given angle
    fn point_at(&self, angle: f32) -> Vec3 {
        self.center
            + Vec3::new(
                angle.cos() * self.radius,
                (angle * self.vertical_frequency).sin() * self.vertical_amplitude,
                angle.sin() * self.radius,
            )
    }
}

// Per-flock goal state: the current position plus the orbit bookkeeping
#[derive(Clone, Debug)]
pub struct GoalDriver {
    path: OrbitPath,
    angle: f32,
    position: Vec3,
    orbiting: bool,
}

impl GoalDriver {
    pub fn new(path: OrbitPath) -> Self {
        Self {
            path,
            angle: 0.0,
            position: path.point_at(0.0),
            orbiting: true,
        }
    }

    // Advance the orbit by one tick and return the goal position for that
    // tick. While the goal is held externally the position does not move
    // and the orbit angle stays frozen.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        if self.orbiting {
            self.angle += self.path.move_speed * dt;
            self.position = self.path.point_at(self.angle);
        }
        self.position
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    // Pin the goal to an explicit position; the orbit stays suspended
    // until resume_orbit is called
    pub fn hold_at(&mut self, position: Vec3) {
        self.orbiting = false;
        self.position = position;
    }

    // Return control to the orbit, continuing from the frozen angle
    pub fn resume_orbit(&mut self) {
        self.orbiting = true;
    }
}
