//! A raster of per-cell traversal attributes with continuous sampling.
//!
//! [`CostValues`] holds what is known about one raster cell. [`CostField`]
//! stores a row-major grid of them and interpolates bilinearly between cell
//! centers, so a cost function can be evaluated at any continuous location.

use route_core::{Domain, Vec2};

/// Traversal attributes of a single raster cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostValues {
    /// Terrain height, in raster units before z scaling.
    pub elevation: f32,
    /// Extra cost per unit length; 0 is neutral, non-finite is impassable.
    pub friction: f32,
    /// Wind vector; travelling along it is cheaper, against it dearer.
    pub wind: [f32; 2],
}

impl CostValues {
    /// Flat ground, neutral friction, no wind.
    pub const NEUTRAL: Self = Self {
        elevation: 0.0,
        friction: 0.0,
        wind: [0.0, 0.0],
    };

    /// Neutral cell at the given height.
    #[inline]
    pub const fn with_elevation(elevation: f32) -> Self {
        Self {
            elevation,
            ..Self::NEUTRAL
        }
    }

    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        // Keeps an impassable neighbor from poisoning an exact sample.
        if t == 0.0 {
            return self;
        }
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            elevation: mix(self.elevation, other.elevation),
            friction: mix(self.friction, other.friction),
            wind: [mix(self.wind[0], other.wind[0]), mix(self.wind[1], other.wind[1])],
        }
    }
}

/// Row-major grid of [`CostValues`].
#[derive(Debug, Clone, PartialEq)]
pub struct CostField {
    width: u32,
    height: u32,
    values: Vec<CostValues>,
}

impl CostField {
    /// Create a field filled with `fill`.
    pub fn new(width: u32, height: u32, fill: CostValues) -> Self {
        Self {
            width,
            height,
            values: vec![fill; width as usize * height as usize],
        }
    }

    /// Create a field from a per-cell function, called in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> CostValues) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The search domain covered by this field.
    #[inline]
    pub fn domain(&self) -> Domain {
        Domain::new(
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    /// All cells in row-major order.
    #[inline]
    pub fn values(&self) -> &[CostValues] {
        &self.values
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// The cell at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> Option<CostValues> {
        self.index(x, y).map(|i| self.values[i])
    }

    /// Overwrite the cell at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: CostValues) {
        if let Some(i) = self.index(x, y) {
            self.values[i] = v;
        }
    }

    /// Bilinear interpolation at a continuous location.
    ///
    /// Coordinates are clamped to `[0, width - 1] × [0, height - 1]`, so
    /// sampling at or beyond the last column or row returns the edge value.
    /// An empty field samples as [`CostValues::NEUTRAL`].
    pub fn sample<R>(&self, p: Vec2<f64, R>) -> CostValues {
        if self.values.is_empty() {
            return CostValues::NEUTRAL;
        }
        let max_x = f64::from(self.width - 1);
        let max_y = f64::from(self.height - 1);
        let x = p.x.clamp(0.0, max_x);
        let y = p.y.clamp(0.0, max_y);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = (x - f64::from(x0)) as f32;
        let ty = (y - f64::from(y0)) as f32;

        let v = |x, y| self.values[y as usize * self.width as usize + x as usize];
        let top = v(x0, y0).lerp(v(x1, y0), tx);
        let bottom = v(x0, y1).lerp(v(x1, y1), tx);
        top.lerp(bottom, ty)
    }

    /// Interpolated elevation at a continuous location.
    #[inline]
    pub fn elevation<R>(&self, p: Vec2<f64, R>) -> f64 {
        f64::from(self.sample(p).elevation)
    }
}
