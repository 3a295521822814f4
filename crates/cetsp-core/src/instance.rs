use crate::{disk::Disk, error::CetspError, node::DiskIndex, point::Point};

/// Whether the solver is looking for a closed tour or a path between fixed endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TourMode {
    Tour,
    Path { start: Point, end: Point },
}

/// A finite ordered sequence of disks, plus optional fixed start/end points.
///
/// Indices into `disks()` are stable for the lifetime of the instance.
#[derive(Debug, Clone)]
pub struct Instance {
    disks: Vec<Disk>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Instance {
    /// Builds a closed-tour instance. Fails with `InvalidInstance` if `disks` is empty.
    pub fn tour(disks: Vec<Disk>) -> Result<Self, CetspError> {
        if disks.is_empty() {
            return Err(CetspError::InvalidInstance(
                "closed tour requires at least one disk".to_string(),
            ));
        }
        Ok(Self {
            disks,
            start: None,
            end: None,
        })
    }

    /// Builds a path instance between fixed `start` and `end` points.
    pub fn path(disks: Vec<Disk>, start: Point, end: Point) -> Result<Self, CetspError> {
        Ok(Self {
            disks,
            start: Some(start),
            end: Some(end),
        })
    }

    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn disk(&self, index: DiskIndex) -> Disk {
        self.disks[index.0]
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = DiskIndex> {
        (0..self.disks.len()).map(DiskIndex)
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn mode(&self) -> TourMode {
        match (self.start, self.end) {
            (Some(start), Some(end)) => TourMode::Path { start, end },
            (None, None) => TourMode::Tour,
            _ => unreachable!("Instance constructors never set only one of start/end"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tour_is_rejected() {
        assert!(matches!(
            Instance::tour(vec![]),
            Err(CetspError::InvalidInstance(_))
        ));
    }

    #[test]
    fn path_mode_reports_fixed_endpoints() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(1.0, 1.0);
        let instance = Instance::path(vec![Disk::point(Point::new(0.5, 0.5))], start, end).unwrap();
        assert_eq!(instance.mode(), TourMode::Path { start, end });
    }

    #[test]
    fn tour_mode_has_no_fixed_endpoints() {
        let instance = Instance::tour(vec![Disk::point(Point::ORIGIN)]).unwrap();
        assert_eq!(instance.mode(), TourMode::Tour);
    }
}
