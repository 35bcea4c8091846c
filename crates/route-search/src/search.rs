use std::collections::BinaryHeap;

use log::{debug, trace};
use route_core::{Domain, SourcePoint, TargetPoint};

use crate::cost::CostFunction;
use crate::error::{Endpoint, SearchError};
use crate::lattice::{Lattice, Pending};
use crate::path::{self, Path};
use crate::topology::Topology;

/// Default number of sub-cells per raster cell on each axis.
pub const DEFAULT_SCALE: i32 = 4;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables of a [`Searcher`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Sub-cells per raster cell on each axis. Must be at least 1.
    ///
    /// The node table grows with the square of this value.
    pub scale: i32,
    /// Squared distance, in raster units, below which an expanded node
    /// counts as the target. `None` means `1 / scale²`, i.e. only the
    /// target's own lattice node.
    pub tolerance: Option<f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            tolerance: None,
        }
    }
}

impl SearchConfig {
    /// Default configuration with another sub-cell scale.
    pub fn with_scale(scale: i32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Override the termination tolerance (squared raster units).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// The termination tolerance in effect.
    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or_else(|| {
            let s = f64::from(self.scale.max(1));
            1.0 / (s * s)
        })
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Runs cheapest-route searches with a fixed configuration.
///
/// The neighbor table is built once here and shared by every run. Each run
/// allocates its own node table.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    topology: Topology,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            topology: Topology::for_scale(config.scale.max(1)),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Validate the inputs, allocate the node table and seed the queue.
    ///
    /// The returned [`Run`] is in [`SearchState::Ready`]; drive it with
    /// [`Run::step`] or [`Run::finish`].
    pub fn start<'a, C>(
        &'a self,
        source: SourcePoint<i32>,
        target: TargetPoint<i32>,
        domain: Domain,
        cost: &'a C,
    ) -> Result<Run<'a, C>, SearchError>
    where
        C: CostFunction + ?Sized,
    {
        let scale = self.config.scale;
        if scale < 1 {
            return Err(SearchError::InvalidScale(scale));
        }
        if !domain.is_valid() {
            return Err(SearchError::InvalidDomain(domain));
        }
        if !domain.contains(source) {
            return Err(SearchError::OutOfDomain {
                endpoint: Endpoint::Source,
                x: source.x,
                y: source.y,
                domain,
            });
        }
        if !domain.contains(target) {
            return Err(SearchError::OutOfDomain {
                endpoint: Endpoint::Target,
                x: target.x,
                y: target.y,
                domain,
            });
        }

        let lattice = Lattice::new(domain, scale)?;
        debug!(
            "allocated {} lattice ({} nodes) for {} domain at scale {}",
            lattice.domain(),
            lattice.len(),
            domain,
            scale
        );

        let mut open = BinaryHeap::new();
        open.push(Pending {
            loc: source.scaled(scale).retag(),
            cost: 0.0,
            seq: 0,
        });

        Ok(Run {
            lattice,
            open,
            seq: 1,
            topology: &self.topology,
            cost,
            target,
            tolerance: self.config.tolerance(),
            state: SearchState::Ready,
            terminal: None,
            expanded: 0,
        })
    }

    /// Run a search to completion and keep the node table.
    pub fn explore<C>(
        &self,
        source: SourcePoint<i32>,
        target: TargetPoint<i32>,
        domain: Domain,
        cost: &C,
    ) -> Result<Exploration, SearchError>
    where
        C: CostFunction + ?Sized,
    {
        self.start(source, target, domain, cost)?.finish()
    }

    /// Find the cheapest path from `source` to `target`.
    pub fn search<C>(
        &self,
        source: SourcePoint<i32>,
        target: TargetPoint<i32>,
        domain: Domain,
        cost: &C,
    ) -> Result<Path, SearchError>
    where
        C: CostFunction + ?Sized,
    {
        self.explore(source, target, domain, cost)?.into_path()
    }
}

/// Find the cheapest path from `source` to `target` with the default
/// configuration (scale 4, 32 directions).
pub fn search<C>(
    source: SourcePoint<i32>,
    target: TargetPoint<i32>,
    domain: Domain,
    cost: &C,
) -> Result<Path, SearchError>
where
    C: CostFunction + ?Sized,
{
    Searcher::default().search(source, target, domain, cost)
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Lifecycle of a [`Run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Ready,
    Running,
    Succeeded,
    Failed,
}

/// A single search in progress.
pub struct Run<'a, C: ?Sized> {
    lattice: Lattice,
    open: BinaryHeap<Pending>,
    seq: u64,
    topology: &'a Topology,
    cost: &'a C,
    target: TargetPoint<i32>,
    tolerance: f64,
    state: SearchState,
    terminal: Option<SourcePoint<i32>>,
    expanded: usize,
}

impl<'a, C: CostFunction + ?Sized> Run<'a, C> {
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of nodes expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Expand the next unvisited node.
    ///
    /// Returns the state after the expansion. Once the run has succeeded or
    /// failed, further calls return that state again without doing work.
    pub fn step(&mut self) -> Result<SearchState, SearchError> {
        match self.state {
            SearchState::Succeeded | SearchState::Failed => return Ok(self.state),
            SearchState::Ready => self.transition(SearchState::Running),
            SearchState::Running => {}
        }

        let scale = self.lattice.scale();
        let target = self.target.cast();
        let topology = self.topology;
        let cost = self.cost;

        loop {
            let Some(current) = self.open.pop() else {
                self.transition(SearchState::Failed);
                return Err(SearchError::Unreachable {
                    target: self.target,
                });
            };

            let Some(ci) = self.lattice.index(current.loc) else {
                continue;
            };
            // Stale duplicate of an already expanded node.
            if self.lattice.at(ci).visited {
                continue;
            }
            self.lattice.at_mut(ci).visited = true;
            self.expanded += 1;

            let from_loc: SourcePoint<i32> = current.loc.retag();
            let here = from_loc.to_continuous(scale);

            if (target - here).length_squared() < self.tolerance {
                self.terminal = Some(from_loc);
                self.transition(SearchState::Succeeded);
                return Ok(self.state);
            }

            let bounds = self.lattice.domain();
            for next_loc in topology.neighbors(current.loc, move |p| bounds.contains(p)) {
                let Some(ni) = self.lattice.index(next_loc) else {
                    continue;
                };
                if self.lattice.at(ni).visited {
                    continue;
                }

                let there = next_loc.to_continuous(scale);
                let edge = cost.cost(here, there);
                if edge == f64::INFINITY {
                    continue;
                }
                if !(edge >= 0.0) {
                    self.transition(SearchState::Failed);
                    return Err(SearchError::NegativeCost {
                        from: here,
                        to: there,
                        cost: edge,
                    });
                }

                let new_cost = current.cost + edge;
                let n = self.lattice.at_mut(ni);
                if new_cost < n.best_cost {
                    n.best_cost = new_cost;
                    n.predecessor = from_loc;
                    trace!("relax {next_loc} via {from_loc}: {new_cost}");
                    self.open.push(Pending {
                        loc: next_loc,
                        cost: new_cost,
                        seq: self.seq,
                    });
                    self.seq += 1;
                }
            }

            return Ok(self.state);
        }
    }

    /// Step until the run succeeds or fails.
    pub fn finish(mut self) -> Result<Exploration, SearchError> {
        while self.step()? == SearchState::Running {}
        let Some(terminal) = self.terminal else {
            return Err(SearchError::Unreachable {
                target: self.target,
            });
        };
        debug!(
            "reached {} after expanding {} of {} nodes",
            self.target,
            self.expanded,
            self.lattice.len()
        );
        Ok(Exploration {
            lattice: self.lattice,
            terminal,
            expanded: self.expanded,
        })
    }

    fn transition(&mut self, next: SearchState) {
        debug!("search {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

// ---------------------------------------------------------------------------
// Exploration
// ---------------------------------------------------------------------------

/// Result of a successful run: the filled node table and the node that met
/// the termination test.
#[derive(Debug, Clone)]
pub struct Exploration {
    lattice: Lattice,
    terminal: SourcePoint<i32>,
    expanded: usize,
}

impl Exploration {
    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Lattice location of the node that met the termination test.
    #[inline]
    pub fn terminal(&self) -> SourcePoint<i32> {
        self.terminal
    }

    /// Number of nodes expanded by the run.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Cheapest cost from the source to the terminal node.
    pub fn total_cost(&self) -> f64 {
        match self.lattice.node(self.terminal) {
            Some(n) if !n.is_origin() => n.best_cost,
            _ => 0.0,
        }
    }

    /// Walk the predecessor chain and consume the node table.
    pub fn into_path(self) -> Result<Path, SearchError> {
        path::reconstruct(&self.lattice, self.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Euclidean;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn init() {
        drop(env_logger::try_init());
    }

    fn assert_well_formed(path: &Path) {
        let first = path.first().expect("path is empty");
        assert_eq!(first.cumulative_cost, 0.0);
        for w in path.points().windows(2) {
            assert!(
                w[1].cumulative_cost >= w[0].cumulative_cost,
                "cost decreased: {:?} -> {:?}",
                w[0],
                w[1]
            );
        }
    }

    /// Euclidean distance inside a `w × h` raster, infinite outside it.
    fn bounded_euclidean(w: f64, h: f64) -> impl Fn(SourcePoint, TargetPoint) -> f64 {
        move |a: SourcePoint, b: TargetPoint| {
            let outside = |x: f64, y: f64| x < 0.0 || y < 0.0 || x >= w || y >= h;
            if outside(a.x, a.y) || outside(b.x, b.y) {
                f64::INFINITY
            } else {
                (b - a).length()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn diagonal_across_small_domain() {
        init();
        let cost = bounded_euclidean(4.0, 4.0);
        let path = search(
            SourcePoint::new(0, 0),
            TargetPoint::new(3, 3),
            Domain::new(4, 4),
            &cost,
        )
        .unwrap();

        assert_well_formed(&path);
        assert!((path.total_cost() - 3.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        let end = path.last().unwrap().location;
        assert!((end.x - 3.0).powi(2) + (end.y - 3.0).powi(2) < 1.0 / 16.0);
        assert_eq!(path.len(), 3);
        assert_eq!(path.points()[1].location, route_core::Location::new(1.5, 1.5));
        for w in path.points().windows(2) {
            assert!(w[1].cumulative_cost > w[0].cumulative_cost);
        }
    }

    #[test]
    fn wall_band_is_unreachable() {
        init();
        // Every edge that touches column x = 5 is forbidden.
        let cost = |a: SourcePoint, b: TargetPoint| {
            let lo = a.x.min(b.x);
            let hi = a.x.max(b.x);
            if hi >= 5.0 && lo < 6.0 {
                f64::INFINITY
            } else {
                (b - a).length()
            }
        };
        let err = search(
            SourcePoint::new(2, 5),
            TargetPoint::new(8, 5),
            Domain::new(10, 10),
            &cost,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SearchError::Unreachable {
                target: TargetPoint::new(8, 5)
            }
        );
        assert_eq!(err.to_string(), "target (8, 5) not reached");
    }

    #[test]
    fn negative_cost_fails_on_first_relaxation() {
        init();
        let cost = |_: SourcePoint, _: TargetPoint| -1.0;
        let searcher = Searcher::default();
        let mut run = searcher
            .start(
                SourcePoint::new(1, 1),
                TargetPoint::new(3, 3),
                Domain::new(5, 5),
                &cost,
            )
            .unwrap();
        let err = run.step().unwrap_err();
        assert!(matches!(err, SearchError::NegativeCost { cost, .. } if cost == -1.0));
        assert_eq!(run.state(), SearchState::Failed);
        assert_eq!(run.expanded(), 1);
    }

    #[test]
    fn nan_cost_is_rejected() {
        let cost = |_: SourcePoint, _: TargetPoint| f64::NAN;
        let err = search(
            SourcePoint::new(0, 0),
            TargetPoint::new(1, 0),
            Domain::new(2, 1),
            &cost,
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::NegativeCost { .. }));
    }

    // -----------------------------------------------------------------------
    // Domain validation
    // -----------------------------------------------------------------------

    #[test]
    fn inclusive_edges_are_accepted() {
        let d = Domain::new(6, 4);
        let path = search(SourcePoint::new(0, 0), TargetPoint::new(5, 3), d, &Euclidean).unwrap();
        assert_well_formed(&path);
        let path = search(SourcePoint::new(5, 3), TargetPoint::new(0, 0), d, &Euclidean).unwrap();
        assert_eq!(path.last().unwrap().location, route_core::Location::new(0.0, 0.0));
    }

    #[test]
    fn exclusive_edges_are_rejected() {
        let d = Domain::new(6, 4);
        let err = search(SourcePoint::new(0, 0), TargetPoint::new(6, 0), d, &Euclidean).unwrap_err();
        assert_eq!(
            err,
            SearchError::OutOfDomain {
                endpoint: Endpoint::Target,
                x: 6,
                y: 0,
                domain: d,
            }
        );
        let err = search(SourcePoint::new(0, 4), TargetPoint::new(0, 0), d, &Euclidean).unwrap_err();
        assert!(matches!(
            err,
            SearchError::OutOfDomain {
                endpoint: Endpoint::Source,
                ..
            }
        ));
        let err = search(SourcePoint::new(-1, 0), TargetPoint::new(0, 0), d, &Euclidean).unwrap_err();
        assert!(matches!(err, SearchError::OutOfDomain { .. }));
    }

    #[test]
    fn empty_domain_is_rejected() {
        let err = search(
            SourcePoint::new(0, 0),
            TargetPoint::new(0, 0),
            Domain::new(0, 3),
            &Euclidean,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::InvalidDomain(Domain::new(0, 3)));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let searcher = Searcher::new(SearchConfig::with_scale(0));
        let err = searcher
            .search(
                SourcePoint::new(0, 0),
                TargetPoint::new(1, 1),
                Domain::new(2, 2),
                &Euclidean,
            )
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidScale(0));
    }

    #[test]
    fn overflowing_lattice_is_rejected() {
        let searcher = Searcher::new(SearchConfig::with_scale(1_000_000));
        let err = searcher
            .search(
                SourcePoint::new(0, 0),
                TargetPoint::new(1, 0),
                Domain::new(4096, 1),
                &Euclidean,
            )
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::LatticeTooLarge {
                domain: Domain::new(4096, 1),
                scale: 1_000_000,
            }
        );
        assert!(err.to_string().contains("too large"));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[test]
    fn euclidean_cost_is_close_to_straight_line() {
        init();
        let searcher = Searcher::default();
        let d = Domain::new(32, 32);
        let cases = [
            ((0, 0), (30, 7)),
            ((31, 31), (0, 12)),
            ((5, 30), (27, 2)),
            ((0, 0), (31, 2)),
            ((3, 3), (20, 13)),
        ];
        for ((sx, sy), (tx, ty)) in cases {
            let s = SourcePoint::new(sx, sy);
            let t = TargetPoint::new(tx, ty);
            let path = searcher.search(s, t, d, &Euclidean).unwrap();
            let straight = (t.cast() - s.cast()).length();
            let ratio = path.total_cost() / straight;
            assert!(ratio >= 1.0 - 1e-9, "{s} -> {t}: shorter than a straight line");
            // Rounded 32-direction offsets stay within 0.75% of the straight
            // line on routes of 20 cells or more; these cases measure <= 0.6%.
            assert!(ratio < 1.0075, "{s} -> {t}: ratio {ratio}");
        }
    }

    #[test]
    fn positive_finite_costs_always_succeed() {
        init();
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let w = rng.random_range(1..12);
            let h = rng.random_range(1..12);
            let weights: Vec<f64> = (0..w * h).map(|_| rng.random_range(0.1..5.0)).collect();
            let cost = |a: SourcePoint, b: TargetPoint| {
                let m = a.midpoint(b);
                let x = (m.x.floor() as i32).clamp(0, w - 1);
                let y = (m.y.floor() as i32).clamp(0, h - 1);
                (b - a).length() * weights[(y * w + x) as usize]
            };
            let s = SourcePoint::new(rng.random_range(0..w), rng.random_range(0..h));
            let t = TargetPoint::new(rng.random_range(0..w), rng.random_range(0..h));

            let path = search(s, t, Domain::new(w, h), &cost).unwrap();
            assert_well_formed(&path);
            assert_eq!(path.first().unwrap().location, s.cast().retag());
            assert_eq!(path.last().unwrap().location, t.cast().retag());
        }
    }

    #[test]
    fn detour_around_wall_with_gap() {
        // Column x = 5 is blocked except for the cell at y = 8.
        let blocked = |x: f64, y: f64| (4.5..5.5).contains(&x) && !(7.5..8.5).contains(&y);
        let cost = |a: SourcePoint, b: TargetPoint| {
            let m = a.midpoint(b);
            if blocked(a.x, a.y) || blocked(b.x, b.y) || blocked(m.x, m.y) {
                f64::INFINITY
            } else {
                (b - a).length()
            }
        };
        let path = search(
            SourcePoint::new(1, 1),
            TargetPoint::new(9, 1),
            Domain::new(10, 10),
            &cost,
        )
        .unwrap();
        assert_well_formed(&path);
        assert!(path.total_cost() > 14.0);
        assert!(path.iter().all(|p| !blocked(p.location.x, p.location.y)));
    }

    #[test]
    fn source_equal_to_target() {
        let path = search(
            SourcePoint::new(2, 2),
            TargetPoint::new(2, 2),
            Domain::new(5, 5),
            &Euclidean,
        )
        .unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.total_cost(), 0.0);
    }

    #[test]
    fn scale_one_uses_eight_directions() {
        let searcher = Searcher::new(SearchConfig::with_scale(1));
        assert_eq!(searcher.topology().len(), 8);
        let path = searcher
            .search(
                SourcePoint::new(0, 0),
                TargetPoint::new(3, 3),
                Domain::new(4, 4),
                &Euclidean,
            )
            .unwrap();
        assert_eq!(path.len(), 4);
        assert!((path.total_cost() - 3.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn loose_tolerance_stops_near_target() {
        let searcher = Searcher::new(SearchConfig::default().with_tolerance(1.0));
        let t = TargetPoint::new(9, 0);
        let path = searcher
            .search(SourcePoint::new(0, 0), t, Domain::new(10, 3), &Euclidean)
            .unwrap();
        let end = path.last().unwrap().location;
        assert!((end.x - 9.0).powi(2) + end.y.powi(2) < 1.0);
        assert!(path.total_cost() < 9.0);
    }

    #[test]
    fn default_tolerance_is_one_sub_cell() {
        assert_eq!(SearchConfig::default().tolerance(), 1.0 / 16.0);
        assert_eq!(SearchConfig::with_scale(2).tolerance(), 0.25);
        assert_eq!(SearchConfig::default().with_tolerance(0.5).tolerance(), 0.5);
    }

    // -----------------------------------------------------------------------
    // Run / Exploration
    // -----------------------------------------------------------------------

    #[test]
    fn run_state_machine() {
        let searcher = Searcher::default();
        let mut run = searcher
            .start(
                SourcePoint::new(0, 0),
                TargetPoint::new(1, 0),
                Domain::new(2, 1),
                &Euclidean,
            )
            .unwrap();
        assert_eq!(run.state(), SearchState::Ready);
        assert_eq!(run.step().unwrap(), SearchState::Running);
        let mut state = SearchState::Running;
        while state == SearchState::Running {
            state = run.step().unwrap();
        }
        assert_eq!(state, SearchState::Succeeded);
        // Stepping a finished run is a no-op.
        let expanded = run.expanded();
        assert_eq!(run.step().unwrap(), SearchState::Succeeded);
        assert_eq!(run.expanded(), expanded);
    }

    #[test]
    fn exploration_exposes_lattice() {
        let searcher = Searcher::default();
        let s = SourcePoint::new(1, 2);
        let t = TargetPoint::new(6, 4);
        let exploration = searcher.explore(s, t, Domain::new(8, 6), &Euclidean).unwrap();

        assert_eq!(exploration.terminal(), t.scaled(4).retag());
        let lattice = exploration.lattice();
        assert_eq!(lattice.domain(), Domain::new(29, 21));
        let origin = lattice.node(s.scaled(4)).unwrap();
        assert!(origin.visited);
        assert!(origin.is_origin());
        assert!(exploration.expanded() <= lattice.visited_count());

        let total = exploration.total_cost();
        let path = exploration.into_path().unwrap();
        assert_eq!(path.total_cost(), total);
    }
}
