//! Raster cost fields for the cheapest-route search.
//!
//! A [`CostField`] is decoded from an image (elevation, and optionally
//! friction and wind), sampled bilinearly, and turned into a
//! [`route_search::CostFunction`] by [`TerrainCost`].

mod error;
mod field;
mod raster;
mod scaling;
mod terrain;

pub use error::FieldError;
pub use field::{CostField, CostValues};
pub use scaling::ScalingFactors;
pub use terrain::TerrainCost;
