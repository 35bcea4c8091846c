use route_core::{Location, SourcePoint};

use crate::SearchError;
use crate::lattice::Lattice;

/// One sample of a reconstructed route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    /// Continuous raster coordinates.
    pub location: Location,
    /// Cost accumulated from the source up to this sample.
    pub cumulative_cost: f64,
}

/// A route from source to target, sampled roughly once per raster cell.
///
/// The first point is the source and always carries a cost of exactly `0`.
/// Costs never decrease along the path.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    points: Vec<PathPoint>,
}

impl Path {
    /// Wrap an already ordered list of samples.
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PathPoint> {
        self.points.iter()
    }

    #[inline]
    pub fn first(&self) -> Option<&PathPoint> {
        self.points.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&PathPoint> {
        self.points.last()
    }

    /// Cost of the whole route (0 for an empty path).
    pub fn total_cost(&self) -> f64 {
        self.last().map_or(0.0, |p| p.cumulative_cost)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathPoint;
    type IntoIter = std::slice::Iter<'a, PathPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Follow predecessor links from `terminal` back to the source.
///
/// A sample is kept for the terminal node, for the source, and whenever the
/// walk has moved at least one raster cell (largest axis) away from the last
/// kept sample.
pub(crate) fn reconstruct(lattice: &Lattice, terminal: SourcePoint<i32>) -> Result<Path, SearchError> {
    let scale = lattice.scale();
    let mut points: Vec<PathPoint> = Vec::new();
    let mut loc = terminal;
    let mut last_kept: Option<Location> = None;

    // A chain can never be longer than the lattice itself.
    for steps in 0..=lattice.len() {
        let Some(node) = lattice.node(loc) else {
            return Err(SearchError::CorruptLattice { steps });
        };
        let here: Location = loc.to_continuous(scale).retag();
        let moved_a_cell = last_kept.is_none_or(|prev| (here - prev).max_abs() >= 1.0);

        if moved_a_cell || node.is_origin() {
            points.push(PathPoint {
                location: here,
                cumulative_cost: node.best_cost,
            });
            last_kept = Some(here);
        }

        if node.is_origin() {
            if let Some(source) = points.last_mut() {
                source.cumulative_cost = 0.0;
            }
            points.reverse();
            return Ok(Path { points });
        }

        loc = node.predecessor;
    }

    Err(SearchError::CorruptLattice {
        steps: lattice.len(),
    })
}
