//! Ordered sub-sequence of an instance's disks plus its cached SOCP solution: immutable
//! after construction, copy-on-insert, with a memoized feasibility check.

use std::sync::{Arc, OnceLock};

use cetsp_core::{CetspError, Disk, DiskIndex, Instance, Tolerance, Trajectory};
use cetsp_oracle::{SocpOracle, SocpSolution};

/// `simplify()`'s strong-containment slack, relative to a disk's own radius.
const SIMPLIFY_EPS: f64 = 0.025;

#[derive(Clone)]
pub struct PartialSolution {
    instance: Arc<Instance>,
    socp: Arc<dyn SocpOracle>,
    tol: Tolerance,
    order: Vec<DiskIndex>,
    solution: SocpSolution,
    feasible: Arc<OnceLock<bool>>,
}

impl std::fmt::Debug for PartialSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialSolution")
            .field("order", &self.order)
            .field("length", &self.solution.length)
            .finish()
    }
}

impl PartialSolution {
    /// Solves the SOCP for `order` and wraps the result. `order` must not contain a
    /// duplicate index; callers that cannot guarantee this should go through [`Self::insert`].
    pub fn from_order(
        instance: Arc<Instance>,
        socp: Arc<dyn SocpOracle>,
        tol: Tolerance,
        order: Vec<DiskIndex>,
    ) -> Result<Self, CetspError> {
        let sequence: Vec<Disk> = order.iter().map(|&idx| instance.disk(idx)).collect();
        let solution = socp.solve(&sequence, instance.mode(), tol)?;
        Ok(Self {
            instance,
            socp,
            tol,
            order,
            solution,
            feasible: Arc::new(OnceLock::new()),
        })
    }

    pub fn order(&self) -> &[DiskIndex] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cached SOCP-optimal length for this sequence.
    pub fn value(&self) -> f64 {
        self.solution.length
    }

    pub fn trajectory(&self) -> Trajectory {
        Trajectory::new(self.solution.hit_points.clone(), self.instance.mode())
    }

    /// Inserts `disk` at `index`, re-solving the SOCP over the resulting sequence.
    /// Fails with `CetspError::InternalInvariant` if `disk` is already present.
    pub fn insert(&self, index: usize, disk: DiskIndex) -> Result<PartialSolution, CetspError> {
        if self.order.contains(&disk) {
            return Err(CetspError::InternalInvariant(format!(
                "disk {disk:?} already present in partial solution"
            )));
        }
        let mut order = self.order.clone();
        order.insert(index, disk);
        Self::from_order(self.instance.clone(), self.socp.clone(), self.tol, order)
    }

    /// Every disk in the owning instance lies within `feasibility_tol` of the trajectory.
    /// Computed once and memoized; subsequent calls reuse the cached result.
    pub fn is_feasible(&self) -> bool {
        *self.feasible.get_or_init(|| {
            self.instance
                .disks()
                .iter()
                .all(|d| self.trajectory().distance(d) <= self.tol.feasibility)
        })
    }

    pub fn contains(&self, disk: &Disk) -> bool {
        self.distance(disk) <= self.tol.feasibility
    }

    pub fn distance(&self, disk: &Disk) -> f64 {
        self.trajectory().distance(disk)
    }

    /// Looks up a disk by index in the owning instance, for strategies that only see
    /// `DiskIndex`es (e.g. branching candidates from [`Self::uncovered`]).
    pub fn instance_disk(&self, idx: DiskIndex) -> Option<Disk> {
        (idx.0 < self.instance.len()).then(|| self.instance.disk(idx))
    }

    /// Disks of the owning instance not yet within tolerance of the trajectory.
    pub fn uncovered(&self) -> Vec<DiskIndex> {
        self.instance
            .indices()
            .filter(|&idx| {
                let disk = self.instance.disk(idx);
                self.trajectory().distance(&disk) > self.tol.feasibility
            })
            .collect()
    }

    /// Drops disks from the sequence that are strongly contained by the current polyline
    /// (`distance < -radius * eps`): the trajectory already covers them regardless of
    /// whether they remain an explicit stop, so dropping them tightens branching without
    /// weakening the bound. At least one disk is always kept.
    pub fn simplify(&self) -> Result<PartialSolution, CetspError> {
        let trajectory = self.trajectory();
        let mut kept: Vec<DiskIndex> = self
            .order
            .iter()
            .copied()
            .filter(|&idx| {
                let disk = self.instance.disk(idx);
                !trajectory.strongly_contains(&disk, SIMPLIFY_EPS)
            })
            .collect();
        if kept.is_empty() {
            kept.push(self.order[0]);
        }
        if kept.len() == self.order.len() {
            return Ok(self.clone());
        }
        Self::from_order(self.instance.clone(), self.socp.clone(), self.tol, kept)
    }
}
