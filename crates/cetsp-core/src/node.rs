use std::ops::{Add, Sub};

/// An index into an [`crate::Instance`]'s disk list. Stable for the lifetime of the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiskIndex(pub usize);

impl Add<usize> for DiskIndex {
    type Output = DiskIndex;

    fn add(self, rhs: usize) -> Self::Output {
        DiskIndex(self.0 + rhs)
    }
}

impl Sub<usize> for DiskIndex {
    type Output = DiskIndex;

    fn sub(self, rhs: usize) -> Self::Output {
        DiskIndex(self.0 - rhs)
    }
}
