//! cheapest_route: find the cheapest route across a raster heightmap.
//!
//! The binary takes `key=value` arguments (see [`cmdline::USAGE`]), loads
//! the heightmap as a [`route_field::CostField`], runs the lattice search
//! from `route-search` and writes the route as SVG, plain columns or JSON.

pub mod app;
pub mod cmdline;
pub mod encoder;
mod error;
mod length_unit;

pub use app::run_cli;
pub use encoder::{EncodeContext, OutputFormat};
pub use error::AppError;
pub use length_unit::LengthUnit;
