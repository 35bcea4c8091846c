use route_core::{SourcePoint, TargetPoint};

/// Cost of traversing a single lattice edge.
///
/// Both points are continuous raster coordinates (lattice location divided
/// by the sub-cell scale), so implementations can sample an interpolated
/// field without caring about the lattice.
///
/// The returned value must be `>= 0`. `f64::INFINITY` means the edge does
/// not exist. Anything negative (or NaN) aborts the search.
pub trait CostFunction {
    fn cost(&self, from: SourcePoint, to: TargetPoint) -> f64;
}

impl<F> CostFunction for F
where
    F: Fn(SourcePoint, TargetPoint) -> f64,
{
    #[inline]
    fn cost(&self, from: SourcePoint, to: TargetPoint) -> f64 {
        self(from, to)
    }
}

/// Plain Euclidean edge length.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Euclidean;

impl CostFunction for Euclidean {
    #[inline]
    fn cost(&self, from: SourcePoint, to: TargetPoint) -> f64 {
        (to - from).length()
    }
}

/// Euclidean edge length times a constant per-unit cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Homogeneous {
    pub cost: f64,
}

impl Default for Homogeneous {
    fn default() -> Self {
        Self { cost: 1.0 }
    }
}

impl CostFunction for Homogeneous {
    #[inline]
    fn cost(&self, from: SourcePoint, to: TargetPoint) -> f64 {
        self.cost * (to - from).length()
    }
}
