use route_core::{SourcePoint, TargetPoint};
use route_search::CostFunction;

use crate::{CostField, ScalingFactors};

/// Edge cost over a [`CostField`]: world-space length weighted by friction,
/// discounted by wind blowing along the edge.
///
/// For an edge with world displacement `d = (Δx·sx, Δy·sy, Δz·sz)` the cost
/// is `max(0, |d|·(1 + friction_strength·f) − wind_strength·(w · d_xy))`,
/// where `z` is the interpolated elevation at each end and `f`, `w` are
/// sampled at the edge midpoint. Non-finite friction or elevation makes the
/// edge impassable. Non-finite strengths can yield NaN, which is returned
/// unchanged and rejected by the search.
#[derive(Debug, Clone, Copy)]
pub struct TerrainCost<'a> {
    pub field: &'a CostField,
    pub scaling: ScalingFactors,
    pub friction_strength: f64,
    pub wind_strength: f64,
}

impl<'a> TerrainCost<'a> {
    /// Unit friction strength, no wind.
    pub fn new(field: &'a CostField, scaling: ScalingFactors) -> Self {
        Self {
            field,
            scaling,
            friction_strength: 1.0,
            wind_strength: 0.0,
        }
    }
}

impl CostFunction for TerrainCost<'_> {
    fn cost(&self, from: SourcePoint, to: TargetPoint) -> f64 {
        let s = self.scaling;
        let step = to - from;
        let dx = step.x * s.x;
        let dy = step.y * s.y;
        let dz = (self.field.elevation(to) - self.field.elevation(from)) * s.z;
        let length = (dx * dx + dy * dy + dz * dz).sqrt();

        let mid = self.field.sample(from.midpoint(to));
        let friction = f64::from(mid.friction);
        if !(length.is_finite() && friction.is_finite()) {
            return f64::INFINITY;
        }
        let tailwind = f64::from(mid.wind[0]) * dx + f64::from(mid.wind[1]) * dy;

        let cost = length * (1.0 + self.friction_strength * friction) - self.wind_strength * tailwind;
        // NaN passes through so the search reports it.
        if cost.is_nan() { cost } else { cost.max(0.0) }
    }
}
