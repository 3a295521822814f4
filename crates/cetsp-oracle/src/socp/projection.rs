use cetsp_core::{CetspError, Disk, Point, Tolerance, TourMode};

use crate::socp::{SocpOracle, SocpSolution, extend_sequence_for_mode};

const MAX_ITERATIONS: usize = 200;
const BOUNDARY_SCAN_SAMPLES: usize = 180;
const GOLDEN_SECTION_ITERATIONS: usize = 60;

/// In-process SOCP oracle usable without any external solver license.
///
/// Solves the convex "shortest tour through a fixed disk sequence" problem via
/// block-coordinate descent: each hit point is, in turn, replaced by the
/// length-minimizing point within its own disk given its two (fixed) neighbors — itself
/// a convex sub-problem solved by [`closest_point_for_two_foci`] — iterated to a fixed
/// point. Each per-point sub-problem is convex and the whole objective is block-wise
/// coordinate-convex, so the iteration's length is non-increasing; it is run to a
/// relative-length fixed point rather than a fixed iteration count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionSocpSolver;

impl ProjectionSocpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SocpOracle for ProjectionSocpSolver {
    fn solve(
        &self,
        sequence: &[Disk],
        mode: TourMode,
        tol: Tolerance,
    ) -> Result<SocpSolution, CetspError> {
        let (disks, wraps) = extend_sequence_for_mode(sequence, mode);
        let n = disks.len();
        if n == 0 {
            return Ok(SocpSolution {
                length: 0.0,
                hit_points: vec![],
            });
        }
        if n == 1 {
            return Ok(SocpSolution {
                length: 0.0,
                hit_points: vec![disks[0].center],
            });
        }

        let mut points: Vec<Point> = disks.iter().map(|d| d.center).collect();
        let mut length = polyline_length(&points, wraps);

        for _ in 0..MAX_ITERATIONS {
            for i in 0..n {
                points[i] = next_point(&disks, &points, i, wraps);
            }
            let new_length = polyline_length(&points, wraps);
            let improved = (length - new_length).abs();
            length = new_length;
            if improved < tol.length {
                break;
            }
        }

        if !is_feasible(&disks, &points, tol.feasibility) {
            log::debug!(
                "projection SOCP solver did not reach feasibility for a {n}-disk sequence within {MAX_ITERATIONS} iterations"
            );
            return Err(CetspError::Numeric(
                "block-coordinate SOCP solver failed to converge within tolerance".to_string(),
            ));
        }

        Ok(SocpSolution {
            length,
            hit_points: points,
        })
    }
}

fn is_feasible(disks: &[Disk], points: &[Point], tol: f64) -> bool {
    disks
        .iter()
        .zip(points.iter())
        .all(|(d, p)| d.distance_to(p) <= tol)
}

fn next_point(disks: &[Disk], points: &[Point], i: usize, wraps: bool) -> Point {
    let n = points.len();
    let disk = disks[i];
    if disk.radius == 0.0 {
        // A point constraint never moves, regardless of its neighbors.
        return disk.center;
    }
    let prev = if i == 0 {
        if wraps { Some(points[n - 1]) } else { None }
    } else {
        Some(points[i - 1])
    };
    let next = if i == n - 1 {
        if wraps { Some(points[0]) } else { None }
    } else {
        Some(points[i + 1])
    };
    match (prev, next) {
        (Some(a), Some(b)) => closest_point_for_two_foci(&disk, &a, &b),
        (Some(a), None) => disk.project(&a),
        (None, Some(b)) => disk.project(&b),
        (None, None) => disk.center,
    }
}

fn polyline_length(points: &[Point], wraps: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for w in points.windows(2) {
        total += w[0].distance_to(&w[1]);
    }
    if wraps {
        total += points[points.len() - 1].distance_to(&points[0]);
    }
    total
}

/// Finds the point `q` within `disk` minimizing `|q-a| + |q-b|`.
///
/// If the segment `a`-`b` passes through the disk, the unconstrained plane-wide minimum
/// `|a-b|` is attainable within the disk, at the point on the segment closest to the
/// disk's center. Otherwise the minimizer lies on the disk's boundary; it is located by
/// a coarse angular scan followed by a golden-section refinement, relying on
/// sum-of-distance-to-two-points restricted to a circle being unimodal on the arc facing
/// both foci whenever the disk does not intersect the segment between them.
fn closest_point_for_two_foci(disk: &Disk, a: &Point, b: &Point) -> Point {
    if a == b {
        return disk.project(a);
    }
    let candidate = closest_point_on_segment(a, b, &disk.center);
    if disk.contains(&candidate, 0.0) {
        return candidate;
    }

    let objective = |theta: f64| -> f64 {
        let p = boundary_point(disk, theta);
        p.distance_to(a) + p.distance_to(b)
    };

    let mut best_theta = 0.0;
    let mut best_value = f64::INFINITY;
    for i in 0..BOUNDARY_SCAN_SAMPLES {
        let theta = 2.0 * std::f64::consts::PI * (i as f64) / (BOUNDARY_SCAN_SAMPLES as f64);
        let value = objective(theta);
        if value < best_value {
            best_value = value;
            best_theta = theta;
        }
    }

    let step = 2.0 * std::f64::consts::PI / (BOUNDARY_SCAN_SAMPLES as f64);
    let mut lo = best_theta - step;
    let mut hi = best_theta + step;
    let inv_phi = (5f64.sqrt() - 1.0) / 2.0;
    for _ in 0..GOLDEN_SECTION_ITERATIONS {
        let m1 = hi - inv_phi * (hi - lo);
        let m2 = lo + inv_phi * (hi - lo);
        if objective(m1) < objective(m2) {
            hi = m2;
        } else {
            lo = m1;
        }
    }
    boundary_point(disk, (lo + hi) / 2.0)
}

fn boundary_point(disk: &Disk, theta: f64) -> Point {
    Point::new(
        disk.center.x + disk.radius * theta.cos(),
        disk.center.y + disk.radius * theta.sin(),
    )
}

fn closest_point_on_segment(a: &Point, b: &Point, p: &Point) -> Point {
    let ab = *b - *a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return *a;
    }
    let ap = *p - *a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    *a + ab * t
}
