/*
 * Flock Summary Module
 *
 * This module defines the FlockSummary struct: a one-shot aggregate view of
 * the population for consumers that frame or annotate the flock, such as a
 * follow camera or an overlay. It is computed on demand from the read-only
 * population and feeds nothing back into the simulation.
 */

use glam::Vec3;

use crate::boid::Boid;

// Aggregate view of the population at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlockSummary {
    pub centroid: Vec3,
    pub average_velocity: Vec3,
    // Unit direction of the average velocity, zero for an empty or
    // perfectly balanced flock
    pub average_heading: Vec3,
    pub count: usize,
}

impl FlockSummary {
    pub fn of(boids: &[Boid]) -> Self {
        if boids.is_empty() {
            return Self {
                centroid: Vec3::ZERO,
                average_velocity: Vec3::ZERO,
                average_heading: Vec3::ZERO,
                count: 0,
            };
        }

        let mut positions = Vec3::ZERO;
        let mut velocities = Vec3::ZERO;
        for boid in boids {
            positions += boid.position;
            velocities += boid.velocity;
        }

        let n = boids.len() as f32;
        let average_velocity = velocities / n;
        Self {
            centroid: positions / n,
            average_velocity,
            average_heading: average_velocity.try_normalize().unwrap_or(Vec3::ZERO),
            count: boids.len(),
        }
    }
}
