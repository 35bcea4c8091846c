//! The rectangular coordinate range of a raster field: [`Domain`].

use std::fmt;

use crate::vec::Vec2;

/// A half-open rectangle `[0, width) × [0, height)`.
///
/// The left and top edges are inclusive, the right and bottom edges are
/// exclusive. A domain is only usable when both sides are positive, see
/// [`Domain::is_valid`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    pub width: i32,
    pub height: i32,
}

impl Domain {
    /// Create a new domain. No validation is done here.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether both sides are strictly positive.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of integer locations in the domain (0 for an invalid domain).
    #[inline]
    pub fn len(self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        (self.width as usize) * (self.height as usize)
    }

    /// Whether the domain holds no locations.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether the integer location `p` lies inside the domain.
    #[inline]
    pub fn contains<R>(self, p: Vec2<i32, R>) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// The lattice obtained by subdividing every cell into `scale × scale`
    /// sub-cells.
    ///
    /// The far edge is clipped so that the last lattice column and row line
    /// up with the last raster column and row: each side becomes
    /// `scale·n − (scale − 1)`. Returns `None` if a side does not fit in an
    /// `i32`.
    #[inline]
    pub fn scaled(self, scale: i32) -> Option<Self> {
        let clip = scale.checked_sub(1)?;
        Some(Self {
            width: self.width.checked_mul(scale)?.checked_sub(clip)?,
            height: self.height.checked_mul(scale)?.checked_sub(clip)?,
        })
    }

    /// Row-major flat index of `p`, or `None` if `p` is outside.
    #[inline]
    pub fn index<R>(self, p: Vec2<i32, R>) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
