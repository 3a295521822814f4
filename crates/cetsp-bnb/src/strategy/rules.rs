//! Pruning rules: pure boolean filters over a candidate child `(sequence, position, disk)`.

use cetsp_core::DiskIndex;

/// Which geometric pruning rules are enabled for a search, per `SolverOptions::rules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruningRules {
    /// Reject any child whose disk order violates the cyclic order (or its reversal) of
    /// the instance-wide convex hull.
    pub global_convex_hull: bool,
    /// Generalization over onion-peeled hull layers: each layer enforces its own cyclic
    /// order independently. Layers never share a disk by construction, so they can be
    /// checked one at a time.
    pub layered_convex_hull: bool,
}

impl PruningRules {
    pub fn none() -> Self {
        Self::default()
    }

    /// `true` if the candidate child (the sequence with `disk` inserted at `position`)
    /// survives every enabled rule.
    pub fn check(
        &self,
        hull_order: &[DiskIndex],
        layers: &[Vec<DiskIndex>],
        sequence: &[DiskIndex],
        position: usize,
        disk: DiskIndex,
    ) -> bool {
        let candidate = with_inserted(sequence, position, disk);
        if self.global_convex_hull
            && !hull_order.is_empty()
            && !cyclic_order_consistent(hull_order, &candidate)
        {
            return false;
        }
        if self.layered_convex_hull {
            for layer in layers {
                if !cyclic_order_consistent(layer, &candidate) {
                    return false;
                }
            }
        }
        true
    }
}

fn with_inserted(sequence: &[DiskIndex], position: usize, disk: DiskIndex) -> Vec<DiskIndex> {
    let mut candidate = sequence.to_vec();
    candidate.insert(position.min(candidate.len()), disk);
    candidate
}

/// Whether the subsequence of `candidate` that lies on `hull_order` appears in the same
/// cyclic order as `hull_order` itself, or in the same cyclic order as its reversal.
/// Disks of `candidate` absent from `hull_order` are ignored: only the relative order of
/// disks that *are* hull members is constrained.
fn cyclic_order_consistent(hull_order: &[DiskIndex], candidate: &[DiskIndex]) -> bool {
    if hull_order.len() < 3 {
        return true;
    }
    let position_of = |idx: DiskIndex| hull_order.iter().position(|&h| h == idx);
    let filtered_positions: Vec<usize> = candidate.iter().filter_map(|&idx| position_of(idx)).collect();
    if filtered_positions.len() <= 1 {
        return true;
    }

    let forward = is_cyclic_subsequence(&filtered_positions, hull_order.len());
    let reversed: Vec<usize> = filtered_positions
        .iter()
        .map(|&p| (hull_order.len() - p) % hull_order.len())
        .collect();
    let backward = is_cyclic_subsequence(&reversed, hull_order.len());
    forward || backward
}

/// Whether `positions` (each a distinct index into a cycle of length `modulus`) occur in
/// non-decreasing cyclic order when walked starting from the first entry.
fn is_cyclic_subsequence(positions: &[usize], modulus: usize) -> bool {
    if positions.len() <= 1 || modulus == 0 {
        return true;
    }
    let mut cursor = positions[0];
    for &target in &positions[1..] {
        let mut found = false;
        for step in 0..modulus {
            let candidate = (cursor + step) % modulus;
            if candidate == target {
                cursor = (candidate + 1) % modulus;
                found = true;
                break;
            }
        }
        if !found {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hull() -> Vec<DiskIndex> {
        vec![DiskIndex(0), DiskIndex(1), DiskIndex(2), DiskIndex(3)]
    }

    #[test]
    fn forward_cyclic_order_is_accepted() {
        let candidate = vec![DiskIndex(0), DiskIndex(1), DiskIndex(2), DiskIndex(3)];
        assert!(cyclic_order_consistent(&hull(), &candidate));
    }

    #[test]
    fn reversed_cyclic_order_is_accepted() {
        let candidate = vec![DiskIndex(0), DiskIndex(3), DiskIndex(2), DiskIndex(1)];
        assert!(cyclic_order_consistent(&hull(), &candidate));
    }

    #[test]
    fn out_of_order_sequence_is_rejected() {
        let candidate = vec![DiskIndex(0), DiskIndex(2), DiskIndex(1), DiskIndex(3)];
        assert!(!cyclic_order_consistent(&hull(), &candidate));
    }

    #[test]
    fn rotated_starting_point_is_still_accepted() {
        let candidate = vec![DiskIndex(2), DiskIndex(3), DiskIndex(0), DiskIndex(1)];
        assert!(cyclic_order_consistent(&hull(), &candidate));
    }

    #[test]
    fn disabled_rules_accept_everything() {
        let rules = PruningRules::none();
        assert!(rules.check(&hull(), &[], &[DiskIndex(0), DiskIndex(2)], 1, DiskIndex(1)));
    }

    #[test]
    fn global_convex_hull_rule_rejects_an_out_of_order_insertion() {
        let rules = PruningRules {
            global_convex_hull: true,
            layered_convex_hull: false,
        };
        // Sequence so far: 0, 2 (already out of hull order); inserting 1 at the end keeps
        // it out of order regardless of position.
        assert!(!rules.check(&hull(), &[], &[DiskIndex(0), DiskIndex(2)], 2, DiskIndex(1)));
    }
}
