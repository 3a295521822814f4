//! Convex hull reasoning over disk centers, backing the `ConvexHull` root strategy and
//! the `GlobalConvexHullRule`/`LayeredConvexHullRule` pruning rules.

use cetsp_core::{DiskIndex, Instance, Point};

/// Indices of the disks on the convex hull of `points`, in counter-clockwise cyclic order,
/// via Andrew's monotone chain. Collinear points on an edge are dropped (strict turns only),
/// matching the standard formulation the hull-order rule needs: a cyclic visitation order,
/// not a minimal vertex set including redundant interior-of-edge points.
pub fn convex_hull(points: &[(DiskIndex, Point)]) -> Vec<DiskIndex> {
    if points.len() < 3 {
        return points.iter().map(|(idx, _)| *idx).collect();
    }

    let mut sorted: Vec<(DiskIndex, Point)> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.1.x
            .partial_cmp(&b.1.x)
            .unwrap()
            .then(a.1.y.partial_cmp(&b.1.y).unwrap())
    });
    sorted.dedup_by(|a, b| a.1 == b.1);
    if sorted.len() < 3 {
        return sorted.into_iter().map(|(idx, _)| idx).collect();
    }

    let cross = |o: &Point, a: &Point, b: &Point| o.cross(a, b);

    let mut lower: Vec<(DiskIndex, Point)> = Vec::new();
    for &(idx, p) in &sorted {
        while lower.len() >= 2
            && cross(&lower[lower.len() - 2].1, &lower[lower.len() - 1].1, &p) <= 0.0
        {
            lower.pop();
        }
        lower.push((idx, p));
    }

    let mut upper: Vec<(DiskIndex, Point)> = Vec::new();
    for &(idx, p) in sorted.iter().rev() {
        while upper.len() >= 2
            && cross(&upper[upper.len() - 2].1, &upper[upper.len() - 1].1, &p) <= 0.0
        {
            upper.pop();
        }
        upper.push((idx, p));
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(idx, _)| idx).collect()
}

/// The cyclic hull order of an instance's disk centers, identified by `DiskIndex`.
pub fn convex_hull_order(instance: &Instance) -> Vec<DiskIndex> {
    let points: Vec<(DiskIndex, Point)> = instance
        .indices()
        .map(|idx| (idx, instance.disk(idx).center))
        .collect();
    convex_hull(&points)
}

/// Peels nested convex hulls ("onion") off the instance's disk centers until none remain.
/// Each layer is an independent cyclic-order constraint for `LayeredConvexHullRule`; by
/// construction layers partition the disk indices, so they never interact through a shared
/// disk.
pub fn onion_peel(instance: &Instance) -> Vec<Vec<DiskIndex>> {
    let mut remaining: Vec<(DiskIndex, Point)> = instance
        .indices()
        .map(|idx| (idx, instance.disk(idx).center))
        .collect();
    let mut layers = Vec::new();

    while !remaining.is_empty() {
        let layer = convex_hull(&remaining);
        if layer.is_empty() {
            break;
        }
        let layer_set: std::collections::HashSet<DiskIndex> = layer.iter().copied().collect();
        remaining.retain(|(idx, _)| !layer_set.contains(idx));
        layers.push(layer);
    }

    layers
}
