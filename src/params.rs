/*
 * Simulation Parameters Module
 *
 * This module defines the tunable parameters for the flock: per-boid steering
 * settings (BoidParams) and flock-level settings (SimulationParams) covering
 * population size, spawn volume, the outer neighbor query radius, and the
 * goal orbit. Both structs round-trip through serde so hosts can load tuning
 * from config files, with defaults filling in any omitted field.
 *
 * Validation runs once at flock construction. Radius or speed settings that
 * would starve a behavior or make the clamp unsatisfiable are rejected up
 * front as ParamsError instead of surfacing later as odd motion.
 */

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::goal::OrbitPath;

// Per-boid steering tunables, fixed at spawn time
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidParams {
    // Behavior radii; must satisfy separation <= alignment <= cohesion
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    // Per-behavior force magnitude caps
    pub separation_force: f32,
    pub alignment_force: f32,
    pub cohesion_force: f32,
    // Blend weights applied after capping
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub goal_weight: f32,
    // Speed clamp bounds; must satisfy 0 < min_speed < max_speed
    pub min_speed: f32,
    pub max_speed: f32,
    // Default heading, used as the spawn cone axis and as the replacement
    // direction when a boid's velocity degenerates. Must be normalizable;
    // its magnitude is otherwise ignored
    pub forward: Vec3,
}

impl Default for BoidParams {
    fn default() -> Self {
        Self {
            separation_radius: 3.0,
            alignment_radius: 8.0,
            cohesion_radius: 15.0,
            separation_force: 50.0, // Strongest response, collision avoidance
            alignment_force: 20.0,
            cohesion_force: 15.0,
            separation_weight: 1.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            goal_weight: 1.0,
            min_speed: 2.0,
            max_speed: 10.0,
            forward: Vec3::Z,
        }
    }
}

impl BoidParams {
    // Check internal consistency of the per-boid settings
    pub fn validate(&self) -> Result<(), ParamsError> {
        let tunables = [
            ("separation_radius", self.separation_radius),
            ("alignment_radius", self.alignment_radius),
            ("cohesion_radius", self.cohesion_radius),
            ("separation_force", self.separation_force),
            ("alignment_force", self.alignment_force),
            ("cohesion_force", self.cohesion_force),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("goal_weight", self.goal_weight),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
        ];
        for (name, value) in tunables {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::NonFinite(name));
            }
        }
        if self.forward.try_normalize().is_none() {
            return Err(ParamsError::DegenerateForward(self.forward));
        }

        if !(self.separation_radius <= self.alignment_radius
            && self.alignment_radius <= self.cohesion_radius)
        {
            return Err(ParamsError::RadiusOrdering {
                separation: self.separation_radius,
                alignment: self.alignment_radius,
                cohesion: self.cohesion_radius,
            });
        }

        if !(self.min_speed > 0.0 && self.min_speed < self.max_speed) {
            return Err(ParamsError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        Ok(())
    }
}

// Flock-level parameters: population, spawn volume, query radius, goal orbit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    // Outer radius for the per-boid neighbor query; must cover the
    // largest behavior radius or distant cohesion neighbors are lost
    pub neighbor_radius: f32,
    // Cubic spawn volume: center plus half-extent on each axis
    pub spawn_center: Vec3,
    pub spawn_extent: f32,
    // Jitter applied to spawn headings around the boid forward axis;
    // 0.0 spawns perfectly aligned, ~0.35 keeps the flock roughly coherent
    pub spawn_cone: f32,
    // Seed for the spawn randomization stream
    pub seed: u64,
    // Compute per-boid forces and integration on the rayon thread pool
    pub parallel: bool,
    pub orbit: OrbitPath,
    pub boid: BoidParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 120,
            neighbor_radius: 15.0,
            spawn_center: Vec3::ZERO,
            spawn_extent: 10.0,
            spawn_cone: 0.35,
            seed: 42,
            parallel: false,
            orbit: OrbitPath::default(),
            boid: BoidParams::default(),
        }
    }
}

impl SimulationParams {
    // Check flock-level settings along with the nested boid settings
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.boid.validate()?;

        let tunables = [
            ("neighbor_radius", self.neighbor_radius),
            ("spawn_extent", self.spawn_extent),
            ("spawn_cone", self.spawn_cone),
        ];
        for (name, value) in tunables {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::NonFinite(name));
            }
        }
        if !self.spawn_center.is_finite() {
            return Err(ParamsError::NonFinite("spawn_center"));
        }

        if self.neighbor_radius < self.boid.cohesion_radius {
            return Err(ParamsError::NeighborRadiusTooSmall {
                neighbor_radius: self.neighbor_radius,
                cohesion_radius: self.boid.cohesion_radius,
            });
        }

        Ok(())
    }
}

// Rejected parameter combinations, reported at flock construction
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    // Behavior radii are not in ascending order
    RadiusOrdering {
        separation: f32,
        alignment: f32,
        cohesion: f32,
    },
    // Outer query radius is smaller than the cohesion radius, so the
    // widest behavior would never see its full neighborhood
    NeighborRadiusTooSmall {
        neighbor_radius: f32,
        cohesion_radius: f32,
    },
    // Speed bounds do not satisfy 0 < min < max
    SpeedRange { min: f32, max: f32 },
    // A tunable is NaN, infinite, or negative
    NonFinite(&'static str),
    // Forward heading cannot be normalized into a direction
    DegenerateForward(Vec3),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::RadiusOrdering {
                separation,
                alignment,
                cohesion,
            } => write!(
                f,
                "Behavior radii must be ordered separation <= alignment <= cohesion, got {} / {} / {}",
                separation, alignment, cohesion
            ),
            ParamsError::NeighborRadiusTooSmall {
                neighbor_radius,
                cohesion_radius,
            } => write!(
                f,
                "Neighbor query radius {} does not cover the cohesion radius {}",
                neighbor_radius, cohesion_radius
            ),
            ParamsError::SpeedRange { min, max } => write!(
                f,
                "Speed bounds must satisfy 0 < min < max, got min {} max {}",
                min, max
            ),
            ParamsError::NonFinite(name) => {
                write!(f, "Parameter '{}' must be finite and non-negative", name)
            }
            ParamsError::DegenerateForward(forward) => {
                write!(f, "Forward heading {} cannot be normalized", forward)
            }
        }
    }
}

impl std::error::Error for ParamsError {}
