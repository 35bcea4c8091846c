use route_core::{Displacement, Vec2};

/// Number of directions in the default neighbor table.
pub const DIRECTIONS: usize = 32;

/// Fixed set of lattice offsets approximating a circle.
///
/// A lattice node `p` is connected to `p + o` for every offset `o`. With a
/// radius equal to the sub-cell scale, one step moves about one raster cell
/// in one of [`DIRECTIONS`] headings, which gives much finer angular
/// resolution than 4- or 8-connectivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    radius: i32,
    offsets: Vec<Displacement<i32>>,
}

impl Topology {
    /// Sample a circle of `radius` at `directions` equally spaced angles and
    /// round every sample to the nearest integer pair.
    ///
    /// Offsets that collapse onto an earlier one after rounding are dropped,
    /// as is the zero offset, so small radii yield fewer than `directions`
    /// entries.
    pub fn circle(radius: i32, directions: usize) -> Self {
        let r = f64::from(radius);
        let mut offsets: Vec<Displacement<i32>> = Vec::with_capacity(directions);
        for k in 0..directions {
            let theta = k as f64 * std::f64::consts::TAU / directions as f64;
            let o = Displacement::new(r * theta.cos(), r * theta.sin()).round();
            if (o.x == 0 && o.y == 0) || offsets.contains(&o) {
                continue;
            }
            offsets.push(o);
        }
        Self { radius, offsets }
    }

    /// The default 32-direction table for sub-cell scale `scale`.
    pub fn for_scale(scale: i32) -> Self {
        Self::circle(scale, DIRECTIONS)
    }

    /// Radius the table was sampled at.
    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// All offsets, in order of increasing angle.
    #[inline]
    pub fn offsets(&self) -> &[Displacement<i32>] {
        &self.offsets
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Neighbors of `p`, keeping only those for which `keep` returns `true`.
    pub fn neighbors<R>(
        &self,
        p: Vec2<i32, R>,
        keep: impl Fn(Vec2<i32, R>) -> bool,
    ) -> impl Iterator<Item = Vec2<i32, R>>
    where
        R: Copy,
    {
        self.offsets.iter().map(move |&o| p + o).filter(move |&n| keep(n))
    }
}
