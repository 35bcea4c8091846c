//! Cheapest routes across a continuous plane with spatially varying cost.
//!
//! The plane is discretized into a lattice with `scale` sub-cells per raster
//! cell on each axis. Every lattice node is connected to its neighbors by a
//! fixed 32-direction [`Topology`], and a uniform-cost search (Dijkstra)
//! explores the lattice in order of increasing cost until it reaches the
//! target. The route is then read back from the predecessor links and
//! resampled to roughly one point per raster cell.
//!
//! ```
//! use route_core::{Domain, SourcePoint, TargetPoint};
//! use route_search::{Euclidean, search};
//!
//! let path = search(
//!     SourcePoint::new(0, 0),
//!     TargetPoint::new(3, 3),
//!     Domain::new(4, 4),
//!     &Euclidean,
//! )
//! .unwrap();
//! assert!((path.total_cost() - 3.0 * 2f64.sqrt()).abs() < 1e-9);
//! ```
//!
//! Edge costs come from a [`CostFunction`]; any
//! `Fn(SourcePoint, TargetPoint) -> f64` closure qualifies. Returning
//! `f64::INFINITY` removes an edge, returning a negative value aborts the
//! search with [`SearchError::NegativeCost`].
//!
//! Memory use is one [`Node`] per lattice location, i.e. about
//! `scale² · width · height` nodes, allocated afresh for every search.

mod cost;
mod error;
mod lattice;
mod path;
mod search;
mod topology;

pub use cost::{CostFunction, Euclidean, Homogeneous};
pub use error::{Endpoint, SearchError};
pub use lattice::{Lattice, Node};
pub use path::{Path, PathPoint};
pub use search::{
    DEFAULT_SCALE, Exploration, Run, SearchConfig, SearchState, Searcher, search,
};
pub use topology::{DIRECTIONS, Topology};
