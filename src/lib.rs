/*
 * Goal-Seeking Flock Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking engine.
 * It organizes the code into logical components for better maintainability.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use flock::Flock;
pub use goal::{GoalDriver, OrbitPath};
pub use neighbor::Neighbor;
pub use params::{BoidParams, ParamsError, SimulationParams};
pub use summary::FlockSummary;

// Define modules
pub mod boid;
pub mod flock;
pub mod goal;
pub mod math;
pub mod neighbor;
pub mod params;
pub mod summary;

// Constants
// Distance below which two boids count as coincident and skip each other
pub const NEIGHBOR_EPSILON: f32 = 1e-4;
// Goal seeking: no pull inside the dead zone, a fixed-magnitude pull outside
pub const GOAL_DEADZONE: f32 = 5.0;
pub const GOAL_SEEK_FORCE: f32 = 100.0;
// Speed at or below which a boid counts as stalled and is restarted
pub const STALL_SPEED: f32 = 0.1;
// Easing rates, in fraction-per-second of the remaining gap
pub const VELOCITY_SMOOTHING: f32 = 3.0;
pub const HEADING_SMOOTHING: f32 = 5.0;
