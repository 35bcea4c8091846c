//! Role-tagged 2D quantities: [`Vec2`] and its aliases.
//!
//! A [`Vec2`] carries a zero-sized role marker next to its two components.
//! The marker never changes the numbers; it only restricts which operators
//! compile, so that a source point cannot be passed where a target point is
//! expected and two points cannot be added together.
//!
//! | Expression | Result |
//! |---|---|
//! | `TargetPoint - SourcePoint` | [`Displacement`] |
//! | `SourcePoint - TargetPoint` | [`Displacement`] |
//! | same-role point `-` point | [`Displacement`] |
//! | any `±` [`Displacement`] | same role as the left operand |
//! | any `*` / `/` scalar | same role |

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Marker trait implemented by the zero-sized role tags.
pub trait Role: Copy + Default + PartialEq + Eq + Hash + fmt::Debug {
    /// Short name used by `Debug` output.
    const NAME: &'static str;
}

/// The "from" end of an edge or a route.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Source;

/// The "to" end of an edge or a route.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Target;

/// A difference of two points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delta;

/// A point that plays no endpoint role, e.g. a sample along a finished path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neutral;

impl Role for Source {
    const NAME: &'static str = "Source";
}

impl Role for Target {
    const NAME: &'static str = "Target";
}

impl Role for Delta {
    const NAME: &'static str = "Delta";
}

impl Role for Neutral {
    const NAME: &'static str = "Location";
}

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A 2D quantity with components of type `T` and role `R`.
///
/// X grows right, Y grows down (raster coordinates).
#[derive(Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<T, R> {
    pub x: T,
    pub y: T,
    #[cfg_attr(feature = "serde", serde(skip))]
    role: PhantomData<R>,
}

// Written by hand: a derive would also require `R: Clone`/`R: Copy`.
impl<T: Clone, R> Clone for Vec2<T, R> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.x.clone(), self.y.clone())
    }
}

impl<T: Copy, R> Copy for Vec2<T, R> {}

/// Source-side point.
pub type SourcePoint<T = f64> = Vec2<T, Source>;
/// Target-side point.
pub type TargetPoint<T = f64> = Vec2<T, Target>;
/// Role-neutral difference between two points.
pub type Displacement<T = f64> = Vec2<T, Delta>;
/// Role-neutral point.
pub type Location<T = f64> = Vec2<T, Neutral>;

impl<T, R> Vec2<T, R> {
    /// Create a new quantity.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self {
            x,
            y,
            role: PhantomData,
        }
    }

    /// Reinterpret the components under another role.
    ///
    /// This is the only way to change a role, so every place that does it
    /// is easy to find.
    #[inline]
    pub fn retag<R2>(self) -> Vec2<T, R2> {
        Vec2::new(self.x, self.y)
    }
}

impl<R> Vec2<i32, R> {
    /// Multiply both components by `scale` (raster → lattice).
    ///
    /// Only valid for points inside a domain whose [`Domain::scaled`]
    /// lattice exists.
    ///
    /// [`Domain::scaled`]: crate::Domain::scaled
    #[inline]
    pub const fn scaled(self, scale: i32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }

    /// Lossless conversion to real components.
    #[inline]
    pub fn cast(self) -> Vec2<f64, R> {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Convert a lattice location back to continuous raster coordinates.
    #[inline]
    pub fn to_continuous(self, scale: i32) -> Vec2<f64, R> {
        self.cast() / f64::from(scale)
    }
}

impl<R> Vec2<f64, R> {
    /// Round each component to the nearest integer.
    #[inline]
    pub fn round(self) -> Vec2<i32, R> {
        Vec2::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Dot product with another quantity of the same role.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Largest absolute component (Chebyshev norm).
    #[inline]
    pub fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs())
    }

    /// Point halfway between `self` and `other`, role-neutral.
    #[inline]
    pub fn midpoint<R2>(self, other: Vec2<f64, R2>) -> Location {
        Location::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

impl<R> From<Vec2<i32, R>> for Vec2<f64, R> {
    #[inline]
    fn from(v: Vec2<i32, R>) -> Self {
        v.cast()
    }
}

impl<T, R> From<(T, T)> for Vec2<T, R> {
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl<T: fmt::Debug, R: Role> fmt::Debug for Vec2<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(R::NAME).field(&self.x).field(&self.y).finish()
    }
}

impl<T: fmt::Display, R> fmt::Display for Vec2<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// --- arithmetic ---

impl<T: Add<Output = T>, R> Add<Displacement<T>> for Vec2<T, R> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Displacement<T>) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>, R> Sub<Displacement<T>> for Vec2<T, R> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Displacement<T>) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// `lhs - rhs` between two point roles, yielding a [`Displacement`].
macro_rules! point_difference {
    ($($lhs:ty => $rhs:ty),* $(,)?) => {
        $(
            impl<T: Sub<Output = T>> Sub<Vec2<T, $rhs>> for Vec2<T, $lhs> {
                type Output = Displacement<T>;
                #[inline]
                fn sub(self, rhs: Vec2<T, $rhs>) -> Displacement<T> {
                    Displacement::new(self.x - rhs.x, self.y - rhs.y)
                }
            }
        )*
    };
}

point_difference! {
    Target => Source,
    Source => Target,
    Source => Source,
    Target => Target,
    Neutral => Neutral,
}

impl<T: Mul<Output = T> + Copy, R> Mul<T> for Vec2<T, R> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy, R> Div<T> for Vec2<T, R> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Neg<Output = T>> Neg for Displacement<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
