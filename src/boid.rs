/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows four rules:
 * 1. Separation: steer away from overly close neighbors
 * 2. Alignment: steer towards the average heading of neighbors
 * 3. Cohesion: steer towards the average position of neighbors
 * 4. Goal seeking: steer towards the shared flock goal
 *
 * The per-tick work is split in two: steering() is a pure function of the
 * boid, a neighbor snapshot, and the goal, returning the blended force as a
 * value; integrate() is the only place a boid mutates its own state. Nothing
 * else may write to a boid mid-tick. That split is what lets the flock run
 * the force pass in any order, or in parallel, without changing the outcome.
 */

use glam::{Quat, Vec3};

use crate::math;
use crate::neighbor::Neighbor;
use crate::params::BoidParams;
use crate::{GOAL_DEADZONE, GOAL_SEEK_FORCE, HEADING_SMOOTHING, STALL_SPEED, VELOCITY_SMOOTHING};

#[derive(Clone, Copy, Debug)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    // Facing, eased towards the direction of travel; cosmetic only
    pub orientation: Quat,
    // Steering tunables fixed at spawn
    pub params: BoidParams,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3, params: BoidParams) -> Self {
        let heading = velocity.try_normalize().unwrap_or(params.forward);
        Self {
            position,
            velocity,
            orientation: math::look_rotation(heading, Vec3::Y),
            params,
        }
    }

    // Blend the four steering rules into a single force for this tick.
    // Reads self and the snapshot, mutates nothing.
    pub fn steering(&self, neighbors: &[Neighbor], goal: Vec3) -> Vec3 {
        let p = &self.params;

        let separation = self.scan(neighbors, p.separation_radius, p.separation_force, |n| {
            // Vector pointing away from the neighbor, weighted by closeness
            (self.position - n.position) / (n.distance * n.distance)
        });
        let alignment = self.scan(neighbors, p.alignment_radius, p.alignment_force, |n| {
            n.velocity
        });
        let cohesion = self.scan(neighbors, p.cohesion_radius, p.cohesion_force, |n| {
            n.position - self.position
        });

        separation * p.separation_weight
            + alignment * p.alignment_weight
            + cohesion * p.cohesion_weight
            + self.goal_seek(goal) * p.goal_weight
    }

    // One behavior scan: average a per-neighbor contribution over every
    // neighbor closer than `radius`, then normalize the average and scale it
    // to `cap`. The three behaviors differ only in their contribution term.
    fn scan<F>(&self, neighbors: &[Neighbor], radius: f32, cap: f32, contribution: F) -> Vec3
    where
        F: Fn(&Neighbor) -> Vec3,
    {
        let mut steering = Vec3::ZERO;
        let mut count = 0;

        for neighbor in neighbors {
            if neighbor.distance < radius {
                steering += contribution(neighbor);
                count += 1;
            }
        }

        if count > 0 {
            steering /= count as f32;
            if let Some(direction) = steering.try_normalize() {
                return direction * cap;
            }
        }

        Vec3::ZERO
    }

    // Fixed-magnitude pull towards the goal. Inside the dead zone the pull
    // cuts out entirely so settled boids do not oscillate around the goal.
    fn goal_seek(&self, goal: Vec3) -> Vec3 {
        let offset = goal - self.position;
        if offset.length() > GOAL_DEADZONE {
            offset.normalize() * GOAL_SEEK_FORCE
        } else {
            Vec3::ZERO
        }
    }

    // Advance the boid one tick under the given force. Velocity eases
    // towards the Euler target rather than taking it directly, which keeps
    // motion smooth and stable across uneven tick lengths.
    pub fn integrate(&mut self, force: Vec3, dt: f32) {
        let target = self.velocity + force * dt;
        self.velocity = self
            .velocity
            .lerp(target, (dt * VELOCITY_SMOOTHING).min(1.0));

        self.clamp_speed();
        self.position += self.velocity * dt;

        // Ease the facing after the velocity settles so renderers see a
        // stable heading even when forces flip sign between ticks
        if let Some(heading) = self.velocity.try_normalize() {
            let facing = math::look_rotation(heading, Vec3::Y);
            self.orientation = self
                .orientation
                .slerp(facing, (dt * HEADING_SMOOTHING).min(1.0));
        }
    }

    // Keep speed inside [min_speed, max_speed]. A near-stalled boid gets its
    // velocity replaced outright with the default heading at min_speed, so
    // no boid ever stops dead or carries an undefined direction.
    fn clamp_speed(&mut self) {
        let speed = self.velocity.length();
        if speed > self.params.max_speed {
            self.velocity = self.velocity / speed * self.params.max_speed;
        } else if speed < self.params.min_speed {
            if speed > STALL_SPEED {
                self.velocity = self.velocity / speed * self.params.min_speed;
            } else {
                let forward = self.params.forward.try_normalize().unwrap_or(Vec3::Z);
                self.velocity = forward * self.params.min_speed;
            }
        }
    }
}
