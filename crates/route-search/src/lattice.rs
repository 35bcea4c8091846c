use std::cmp::Ordering;

use route_core::{Domain, SourcePoint, TargetPoint, Vec2};

use crate::SearchError;

// ---------------------------------------------------------------------------
// Lattice node
// ---------------------------------------------------------------------------

/// One cell of the scaled search grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// Cheapest known cost from the source, `+∞` until first reached.
    pub best_cost: f64,
    /// Lattice location this node was reached from.
    pub predecessor: SourcePoint<i32>,
    /// Whether the node has been expanded.
    pub visited: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            best_cost: f64::INFINITY,
            predecessor: SourcePoint::new(0, 0),
            visited: false,
        }
    }
}

impl Node {
    /// The source node is never relaxed, so it keeps the `+∞` cost and acts
    /// as the end marker of every predecessor chain.
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.best_cost == f64::INFINITY
    }
}

// ---------------------------------------------------------------------------
// Pending queue entry
// ---------------------------------------------------------------------------

/// Priority-queue entry, ordered so that `BinaryHeap` pops the cheapest
/// first. Equal costs pop in insertion order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pending {
    pub(crate) loc: TargetPoint<i32>,
    pub(crate) cost: f64,
    pub(crate) seq: u64,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

// ---------------------------------------------------------------------------
// Lattice
// ---------------------------------------------------------------------------

/// Dense node table covering a raster domain at `scale` sub-cells per cell.
///
/// Allocated once per search and owned by it; see [`crate::Exploration`]
/// for read access after a successful run.
#[derive(Clone, Debug)]
pub struct Lattice {
    scale: i32,
    domain: Domain,
    nodes: Vec<Node>,
}

impl Lattice {
    /// Allocate the node table for `raster` at `scale` sub-cells per cell.
    ///
    /// Fails with [`SearchError::LatticeTooLarge`] when the lattice sides do
    /// not fit in an `i32` or the table cannot be allocated.
    pub(crate) fn new(raster: Domain, scale: i32) -> Result<Self, SearchError> {
        let too_large = || SearchError::LatticeTooLarge {
            domain: raster,
            scale,
        };
        let domain = raster.scaled(scale).ok_or_else(too_large)?;
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(domain.len())
            .map_err(|_| too_large())?;
        nodes.resize(domain.len(), Node::default());
        Ok(Self {
            scale,
            domain,
            nodes,
        })
    }

    /// Sub-cells per raster cell on each axis.
    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// The lattice's own (scaled) domain.
    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at lattice location `p`, if inside.
    #[inline]
    pub fn node<R>(&self, p: Vec2<i32, R>) -> Option<&Node> {
        self.domain.index(p).map(|i| &self.nodes[i])
    }

    #[inline]
    pub(crate) fn index<R>(&self, p: Vec2<i32, R>) -> Option<usize> {
        self.domain.index(p)
    }

    #[inline]
    pub(crate) fn at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    /// Number of expanded nodes.
    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visited).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn node_defaults_to_origin_sentinel() {
        let n = Node::default();
        assert!(n.is_origin());
        assert!(!n.visited);
    }

    #[test]
    fn lattice_size() {
        let l = Lattice::new(Domain::new(4, 3), 4).unwrap();
        assert_eq!(l.domain(), Domain::new(13, 9));
        assert_eq!(l.len(), 13 * 9);
        assert_eq!(l.scale(), 4);
        assert!(l.node(TargetPoint::new(12, 8)).is_some());
        assert!(l.node(TargetPoint::new(13, 8)).is_none());
        assert_eq!(l.visited_count(), 0);
    }

    #[test]
    fn oversized_lattice_is_an_error() {
        let err = Lattice::new(Domain::new(4096, 1), 1_000_000).unwrap_err();
        assert_eq!(
            err,
            SearchError::LatticeTooLarge {
                domain: Domain::new(4096, 1),
                scale: 1_000_000,
            }
        );
    }

    #[test]
    fn heap_pops_cheapest_then_oldest() {
        let mut open = BinaryHeap::new();
        let entry = |x, cost, seq| Pending {
            loc: TargetPoint::new(x, 0),
            cost,
            seq,
        };
        open.push(entry(0, 2.0, 0));
        open.push(entry(1, 0.5, 1));
        open.push(entry(2, 2.0, 2));
        open.push(entry(3, 0.5, 3));
        let order: Vec<i32> = std::iter::from_fn(|| open.pop().map(|p| p.loc.x)).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }
}
