/*
 * Math Helpers Module
 *
 * Thin additions on top of glam for the operations the simulation needs
 * beyond plain vector arithmetic: building an orientation from a look
 * direction, and sampling spawn headings inside a cone around a base axis.
 */

use glam::{Mat3, Quat, Vec3};
use rand::Rng;

// Build an orientation whose +Z axis points along `forward`, keeping `up`
// as close to the world up as the forward direction allows.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let forward = match forward.try_normalize() {
        Some(f) => f,
        None => return Quat::IDENTITY,
    };

    let right = match up.cross(forward).try_normalize() {
        Some(r) => r,
        None => {
            // Forward is parallel to up; pick another reference axis
            let alt = if forward.dot(Vec3::Z).abs() < 0.9 {
                Vec3::Z
            } else {
                Vec3::X
            };
            alt.cross(forward).normalize()
        }
    };

    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

// Sample a unit direction near `axis`. `spread` scales a uniform jitter added
// to the axis before renormalizing: 0.0 returns the axis itself, values
// around 0.3-0.5 give a narrow cone, values above ~1.5 approach uniform.
pub fn jittered_direction<R: Rng>(rng: &mut R, axis: Vec3, spread: f32) -> Vec3 {
    let jitter = Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    ) * spread;

    (axis + jitter)
        .try_normalize()
        .or_else(|| axis.try_normalize())
        .unwrap_or(Vec3::Z)
}
