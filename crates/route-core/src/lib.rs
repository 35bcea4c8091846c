//! **route-core**: quantities and domains shared by the cheapest-route crates.
//!
//! [`Vec2`] is a 2D quantity tagged with a role ([`Source`], [`Target`],
//! [`Delta`], [`Neutral`]) so that endpoints cannot be swapped by accident.
//! [`Domain`] describes the half-open coordinate range of a raster field.

pub mod domain;
pub mod vec;

pub use domain::Domain;
pub use vec::{
    Delta, Displacement, Location, Neutral, Role, Source, SourcePoint, Target, TargetPoint, Vec2,
};
