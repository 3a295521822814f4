//! Root strategies: produce the first partial sequence a search starts from.

use cetsp_core::{DiskIndex, Instance, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::hull::convex_hull_order;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootStrategy {
    /// Start with the instance's convex hull, in cyclic order: any tour must visit hull
    /// disks in that order (or its reverse), giving a strong initial bound.
    ConvexHull,
    /// Start with the two farthest-apart disk centers, plus the disk farthest from that
    /// segment.
    LongestEdgePlusFarthestCircle,
    /// A random triple, seeded from the engine's configured seed.
    Random,
}

impl RootStrategy {
    pub fn select(&self, instance: &Instance, seed: u64) -> Vec<DiskIndex> {
        match self {
            RootStrategy::ConvexHull => {
                let hull = convex_hull_order(instance);
                if hull.len() >= 3 {
                    hull
                } else {
                    longest_edge_plus_farthest(instance)
                }
            }
            RootStrategy::LongestEdgePlusFarthestCircle => longest_edge_plus_farthest(instance),
            RootStrategy::Random => {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut indices: Vec<DiskIndex> = instance.indices().collect();
                indices.shuffle(&mut rng);
                indices.truncate(3.min(indices.len()));
                indices
            }
        }
    }
}

fn longest_edge_plus_farthest(instance: &Instance) -> Vec<DiskIndex> {
    let n = instance.len();
    if n <= 2 {
        return instance.indices().collect();
    }

    let centers: Vec<Point> = instance.disks().iter().map(|d| d.center).collect();
    let (mut a, mut b, mut best_sq) = (DiskIndex(0), DiskIndex(1), 0.0);
    for i in 0..n {
        for j in (i + 1)..n {
            let sq = centers[i].squared_distance_to(&centers[j]);
            if sq > best_sq {
                best_sq = sq;
                a = DiskIndex(i);
                b = DiskIndex(j);
            }
        }
    }

    let (pa, pb) = (centers[a.0], centers[b.0]);
    let c = instance
        .indices()
        .filter(|idx| *idx != a && *idx != b)
        .max_by(|&x, &y| {
            distance_to_segment(&centers[x.0], &pa, &pb)
                .total_cmp(&distance_to_segment(&centers[y.0], &pa, &pb))
        });

    match c {
        Some(c) => vec![a, b, c],
        None => vec![a, b],
    }
}

fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab_sq = a.squared_distance_to(b);
    if ab_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * (b.x - a.x)) + ((p.y - a.y) * (b.y - a.y))) / ab_sq;
    let t = t.clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    p.distance_to(&proj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::Disk;

    fn square() -> Instance {
        Instance::tour(vec![
            Disk::point(Point::new(0.0, 0.0)),
            Disk::point(Point::new(10.0, 0.0)),
            Disk::point(Point::new(10.0, 10.0)),
            Disk::point(Point::new(0.0, 10.0)),
        ])
        .unwrap()
    }

    #[test]
    fn convex_hull_root_covers_whole_hull_for_a_square() {
        let instance = square();
        let root = RootStrategy::ConvexHull.select(&instance, 0);
        assert_eq!(root.len(), 4);
    }

    #[test]
    fn longest_edge_plus_farthest_returns_a_triple() {
        let instance = square();
        let root = RootStrategy::LongestEdgePlusFarthestCircle.select(&instance, 0);
        assert_eq!(root.len(), 3);
    }

    #[test]
    fn random_root_is_deterministic_for_a_fixed_seed() {
        let instance = square();
        let a = RootStrategy::Random.select(&instance, 42);
        let b = RootStrategy::Random.select(&instance, 42);
        assert_eq!(a, b);
    }
}
