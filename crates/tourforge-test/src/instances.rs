//! Instance fixtures.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tourforge_core::{Instance, Point};

/// Corners of the unit square in walking order. Optimal length is 4.
pub fn unit_square() -> Instance {
    Instance::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
    ])
    .expect("unit square is a valid instance")
}

/// Two clusters {0,1,2} and {3,4,5}: distance 1 within a cluster, 10 across.
///
/// The degree-constrained relaxation picks one triangle per cluster, so the
/// first oracle solution has exactly two subtours of size 3. The optimal tour
/// crosses between clusters twice, for a length of 24.
pub fn two_triangles() -> Instance {
    let rows: Vec<Vec<f64>> = (0..6)
        .map(|i| {
            (0..6)
                .map(|j| {
                    if i == j {
                        0.0
                    } else if i / 3 == j / 3 {
                        1.0
                    } else {
                        10.0
                    }
                })
                .collect()
        })
        .collect();
    Instance::from_rows(&rows).expect("two triangles is a valid instance")
}

/// Euclidean instance of `n` points drawn uniformly from `[0, 100)²`.
///
/// Same seed, same instance.
pub fn seeded_random_instance(n: usize, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    Instance::from_points(points).expect("random points form a valid instance")
}

/// Length of the shortest tour, by enumerating every permutation.
///
/// Only usable for small instances.
pub fn brute_force_optimum(instance: &Instance) -> f64 {
    let n = instance.node_count();
    let mut rest: Vec<usize> = (1..n).collect();
    let mut best = f64::INFINITY;
    permute(instance, &mut rest, 0, &mut best);
    best
}

fn permute(instance: &Instance, rest: &mut Vec<usize>, k: usize, best: &mut f64) {
    if k == rest.len() {
        let mut length = 0.0;
        let mut prev = Instance::ROOT;
        for &node in rest.iter() {
            length += instance.distance(prev, node);
            prev = node;
        }
        length += instance.distance(prev, Instance::ROOT);
        if length < *best {
            *best = length;
        }
        return;
    }
    for i in k..rest.len() {
        rest.swap(k, i);
        permute(instance, rest, k + 1, best);
        rest.swap(k, i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_optima() {
        assert!((brute_force_optimum(&unit_square()) - 4.0).abs() < 1e-9);
        assert!((brute_force_optimum(&two_triangles()) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_instances_are_reproducible() {
        let a = seeded_random_instance(5, 7);
        let b = seeded_random_instance(5, 7);
        assert_eq!(a.distances(), b.distances());
        assert_eq!(a.node_count(), 5);
    }
}
