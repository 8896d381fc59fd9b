/*
 * Neighbor Query Module
 *
 * All-pairs radius query over the boid population. Each boid runs one query
 * per tick with the flock's outer neighbor radius and then filters the result
 * down per behavior, so the query captures position, velocity, and distance
 * for every qualifying neighbor up front.
 *
 * Deliberately a linear scan. Flocks in the intended population range spend
 * their time in the steering math, not here, and a plain slice walk keeps the
 * tick allocation-free apart from the result vector.
 */

use glam::Vec3;

use crate::boid::Boid;
use crate::NEIGHBOR_EPSILON;

// One qualifying neighbor, captured together with its distance from the
// query origin so the steering scans never recompute it
#[derive(Clone, Copy, Debug)]
pub struct Neighbor {
    pub position: Vec3,
    pub velocity: Vec3,
    pub distance: f32,
}

// Every boid within `radius` of `origin`, excluding the querying boid itself
// and anything coincident with it. No ordering guarantee; an empty
// population yields an empty result.
pub fn within_radius(origin: Vec3, radius: f32, population: &[Boid]) -> Vec<Neighbor> {
    population
        .iter()
        .filter_map(|boid| {
            let distance = origin.distance(boid.position);
            if distance > NEIGHBOR_EPSILON && distance <= radius {
                Some(Neighbor {
                    position: boid.position,
                    velocity: boid.velocity,
                    distance,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BoidParams;

    fn boid_at(position: Vec3) -> Boid {
        Boid::new(position, Vec3::ZERO, BoidParams::default())
    }

    #[test]
    fn includes_near_and_excludes_far() {
        // Three boids on a line; query from the first with the outer radius
        let population = vec![
            boid_at(Vec3::new(0.0, 0.0, 0.0)),
            boid_at(Vec3::new(1.0, 0.0, 0.0)),
            boid_at(Vec3::new(20.0, 0.0, 0.0)),
        ];

        let found = within_radius(Vec3::ZERO, 15.0, &population);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(found[0].distance, 1.0);
    }

    #[test]
    fn excludes_coincident_points() {
        let population = vec![
            boid_at(Vec3::ZERO),
            boid_at(Vec3::new(NEIGHBOR_EPSILON * 0.5, 0.0, 0.0)),
            boid_at(Vec3::new(2.0, 0.0, 0.0)),
        ];

        // The boid at the origin and the near-coincident one are both skipped
        let found = within_radius(Vec3::ZERO, 10.0, &population);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn boundary_distance_is_included() {
        let population = vec![boid_at(Vec3::new(15.0, 0.0, 0.0))];
        let found = within_radius(Vec3::ZERO, 15.0, &population);
        assert_eq!(found.len(), 1);

        let none = within_radius(Vec3::ZERO, 14.999, &population);
        assert!(none.is_empty());
    }

    #[test]
    fn empty_population_yields_empty_result() {
        let found = within_radius(Vec3::ZERO, 100.0, &[]);
        assert!(found.is_empty());
    }

    #[test]
    fn carries_neighbor_velocity() {
        let mut boid = boid_at(Vec3::new(3.0, 0.0, 0.0));
        boid.velocity = Vec3::new(0.0, 5.0, 0.0);
        let found = within_radius(Vec3::ZERO, 10.0, &[boid]);
        assert_eq!(found[0].velocity, Vec3::new(0.0, 5.0, 0.0));
    }
}
