use std::fmt;

use route_core::{Domain, SourcePoint, TargetPoint};

/// Which end of a route an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The sub-cell scale is below 1.
    InvalidScale(i32),
    /// Width or height of the domain is not positive.
    InvalidDomain(Domain),
    /// The sub-sampled lattice of `domain` at `scale` is too large to index
    /// or allocate.
    LatticeTooLarge { domain: Domain, scale: i32 },
    /// The source or the target lies outside the domain.
    OutOfDomain {
        endpoint: Endpoint,
        x: i32,
        y: i32,
        domain: Domain,
    },
    /// The cost function returned a negative (or NaN) value.
    NegativeCost {
        from: SourcePoint,
        to: TargetPoint,
        cost: f64,
    },
    /// Every reachable lattice node was expanded without reaching the target.
    Unreachable { target: TargetPoint<i32> },
    /// The predecessor chain does not lead back to the source.
    CorruptLattice { steps: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale(s) => write!(f, "sub-cell scale must be at least 1, got {s}"),
            Self::InvalidDomain(d) => write!(f, "empty search domain {d}"),
            Self::LatticeTooLarge { domain, scale } => write!(
                f,
                "search domain {domain} is too large for {scale} sub-cells per cell"
            ),
            Self::OutOfDomain {
                endpoint,
                x,
                y,
                domain,
            } => write!(
                f,
                "{endpoint} location ({x}, {y}) is outside search domain {domain}"
            ),
            Self::NegativeCost { from, to, cost } => write!(
                f,
                "cost function must be non-negative, got {cost} for {from} -> {to}"
            ),
            Self::Unreachable { target } => write!(f, "target {target} not reached"),
            Self::CorruptLattice { steps } => write!(
                f,
                "predecessor chain did not reach the source after {steps} steps"
            ),
        }
    }
}

impl std::error::Error for SearchError {}
