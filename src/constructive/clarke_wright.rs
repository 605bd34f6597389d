//! Sequential Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! Savings of every customer pair are computed and ranked by decreasing
//! score (see [`SavingsList`]). Routes are then built one vehicle at a time:
//!
//! 1. **Seed**: the highest-ranked unconsumed saving whose two customers are
//!    both unrouted and fit together in one vehicle opens a route `[i, j]`.
//!    If no pair qualifies, the first unrouted customer that fits on its own
//!    opens a singleton route.
//! 2. **Extend**: the ranked list is scanned for the first unconsumed saving
//!    that links the route's left or right terminal to an unrouted customer
//!    that still fits. The customer is spliced onto that end and the scan
//!    restarts. A full scan without a feasible link closes the route.
//!
//! Each saving is consumed at most once and never revisited, even if it could
//! have served a later route. Customers whose demand alone exceeds capacity
//! are never routed; they are reported in [`Solution::unroutable`] or fail the
//! solve, depending on [`InfeasiblePolicy`].
//!
//! # Complexity
//!
//! O(n³) in the worst case where n = number of customers: each extension
//! rescans up to O(n²) savings.
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use std::collections::VecDeque;

use tracing::{debug, instrument, trace, warn};

use super::savings::{Saving, SavingsList};
use crate::config::{DistanceCheck, InfeasiblePolicy, SolverConfig};
use crate::evaluation::RouteEvaluator;
use crate::models::{Instance, Solution, Unroutable};
use crate::Error;

/// Sequential Clarke-Wright savings solver.
///
/// Holds only configuration; every [`solve`](Self::solve) call works on its
/// own private state, so one solver can be shared between threads.
///
/// # Examples
///
/// ```
/// use u_savings::config::SolverConfig;
/// use u_savings::constructive::ClarkeWright;
/// use u_savings::distance::DistanceTable;
/// use u_savings::models::{Instance, Node};
///
/// let mut dt = DistanceTable::new();
/// dt.insert("D", "A", 10.0);
/// dt.insert("D", "B", 10.0);
/// dt.insert("A", "B", 4.0);
/// let instance = Instance::new(
///     vec![Node::depot("D"), Node::new("A", 5), Node::new("B", 5)],
///     dt,
///     10,
/// );
///
/// let solution = ClarkeWright::new(SolverConfig::default()).solve(&instance)?;
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.routes()[0].sequence(), ["D", "A", "B", "D"]);
/// assert_eq!(solution.routes()[0].total_load(), 10);
/// # Ok::<(), u_savings::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarkeWright {
    config: SolverConfig,
}

impl ClarkeWright {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds capacity-feasible routes for every routable customer.
    ///
    /// # Errors
    ///
    /// - [`Error::TooFewNodes`], [`Error::DuplicateNode`],
    ///   [`Error::InvalidDistance`] if the instance is malformed.
    /// - [`Error::MissingDistance`] with [`DistanceCheck::Strict`].
    /// - [`Error::Unroutable`] with [`InfeasiblePolicy::Fail`].
    #[instrument(skip_all, level = "debug", fields(customers = instance.num_customers()))]
    pub fn solve(&self, instance: &Instance) -> Result<Solution, Error> {
        instance.validate()?;
        self.check_distances(instance)?;

        let capacity = instance.vehicle_capacity();
        let oversized: Vec<Unroutable> = instance
            .customers()
            .iter()
            .filter(|c| c.demand() > capacity)
            .map(|c| Unroutable {
                id: c.id().to_string(),
                demand: c.demand(),
                capacity,
            })
            .collect();

        if self.config.infeasible() == InfeasiblePolicy::Fail && !oversized.is_empty() {
            return Err(Error::Unroutable {
                ids: oversized.into_iter().map(|u| u.id).collect(),
            });
        }

        let mut ctx = SolveContext::new(instance);
        debug!(savings = ctx.savings.len(), "ranked savings");

        let evaluator = RouteEvaluator::new(instance);
        let customers = instance.customers();
        let mut solution = Solution::new();
        let mut remaining = customers.len() - oversized.len();

        while remaining > 0 {
            let Some(partial) = ctx.build_route() else {
                break;
            };
            remaining = remaining.saturating_sub(partial.members.len());

            let ids: Vec<&str> = partial.members.iter().map(|&c| customers[c].id()).collect();
            let route = evaluator.finalize(&ids, partial.load);
            debug!(
                route = solution.num_routes(),
                customers = route.len(),
                load = route.total_load(),
                distance = route.total_distance(),
                "route closed"
            );
            solution.add_route(route);
        }

        for customer in oversized {
            warn!(
                id = %customer.id,
                demand = customer.demand,
                capacity = customer.capacity,
                "customer demand exceeds vehicle capacity; left unrouted"
            );
            solution.add_unroutable(customer);
        }

        Ok(solution)
    }

    /// Checks that every pair the solver will look up is present in at least
    /// one direction. Only enforced with [`DistanceCheck::Strict`].
    fn check_distances(&self, instance: &Instance) -> Result<(), Error> {
        let distances = instance.distances();
        let depot = instance.depot().id();
        let customers = instance.customers();

        let mut missing = customers
            .iter()
            .map(|c| (depot, c.id()))
            .chain(customers.iter().enumerate().flat_map(|(k, a)| {
                customers[k + 1..].iter().map(move |b| (a.id(), b.id()))
            }))
            .filter(|&(from, to)| distances.lookup(from, to).is_none());

        match self.config.distance_check() {
            DistanceCheck::Strict => match missing.next() {
                Some((from, to)) => Err(Error::MissingDistance {
                    from: from.to_string(),
                    to: to.to_string(),
                }),
                None => Ok(()),
            },
            DistanceCheck::Lenient => {
                let count = missing.count();
                if count > 0 {
                    debug!(pairs = count, "missing distances resolved to zero");
                }
                Ok(())
            }
        }
    }
}

/// Solves an instance with the default configuration.
///
/// Shorthand for `ClarkeWright::default().solve(instance)`.
pub fn clarke_wright_savings(instance: &Instance) -> Result<Solution, Error> {
    ClarkeWright::default().solve(instance)
}

/// Which end of a route a customer is spliced onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Left,
    Right,
}

/// A route under construction, as customer positions without the depot.
#[derive(Debug)]
struct PartialRoute {
    members: VecDeque<usize>,
    load: u32,
}

/// State private to one solve: the ranked savings, which of them have been
/// consumed, and which customers are already routed.
struct SolveContext {
    demands: Vec<u32>,
    capacity: u32,
    savings: SavingsList,
    consumed: Vec<bool>,
    routed: Vec<bool>,
}

impl SolveContext {
    fn new(instance: &Instance) -> Self {
        let savings = SavingsList::ranked(instance);
        let n = instance.num_customers();
        Self {
            demands: instance.customers().iter().map(|c| c.demand()).collect(),
            capacity: instance.vehicle_capacity(),
            consumed: vec![false; savings.len()],
            routed: vec![false; n],
            savings,
        }
    }

    fn fits(&self, load: u32, extra: u32) -> bool {
        u64::from(load) + u64::from(extra) <= u64::from(self.capacity)
    }

    /// Builds the next route, or `None` once no routable customer is left.
    fn build_route(&mut self) -> Option<PartialRoute> {
        if let Some(mut route) = self.seed_pair() {
            self.extend(&mut route);
            return Some(route);
        }
        self.seed_single()
    }

    fn seed_pair(&mut self) -> Option<PartialRoute> {
        let (k, s) = self.savings.iter().copied().enumerate().find(|&(k, s)| {
            !self.consumed[k]
                && !self.routed[s.i()]
                && !self.routed[s.j()]
                && self.fits(self.demands[s.i()], self.demands[s.j()])
        })?;

        self.consumed[k] = true;
        self.routed[s.i()] = true;
        self.routed[s.j()] = true;
        Some(PartialRoute {
            members: VecDeque::from([s.i(), s.j()]),
            load: self.demands[s.i()] + self.demands[s.j()],
        })
    }

    fn seed_single(&mut self) -> Option<PartialRoute> {
        let c = (0..self.routed.len())
            .find(|&c| !self.routed[c] && self.demands[c] <= self.capacity)?;
        self.routed[c] = true;
        Some(PartialRoute {
            members: VecDeque::from([c]),
            load: self.demands[c],
        })
    }

    fn extend(&mut self, route: &mut PartialRoute) {
        loop {
            let (Some(&left), Some(&right)) = (route.members.front(), route.members.back()) else {
                return;
            };

            let next = self.savings.iter().enumerate().find_map(|(k, &s)| {
                if self.consumed[k] {
                    return None;
                }
                let (end, candidate) = self.link(s, left, right)?;
                self.fits(route.load, self.demands[candidate])
                    .then_some((k, end, candidate))
            });

            let Some((k, end, candidate)) = next else {
                return;
            };

            match end {
                End::Left => route.members.push_front(candidate),
                End::Right => route.members.push_back(candidate),
            }
            route.load += self.demands[candidate];
            self.routed[candidate] = true;
            self.consumed[k] = true;
            trace!(customer = candidate, ?end, load = route.load, "route extended");
        }
    }

    /// Returns the end a saving attaches to and the unrouted customer it
    /// brings in, if it touches either terminal.
    ///
    /// The left terminal is checked first.
    fn link(&self, s: Saving, left: usize, right: usize) -> Option<(End, usize)> {
        let (i, j) = (s.i(), s.j());
        [(left, End::Left), (right, End::Right)]
            .into_iter()
            .find_map(|(terminal, end)| {
                if i == terminal && !self.routed[j] {
                    Some((end, j))
                } else if j == terminal && !self.routed[i] {
                    Some((end, i))
                } else {
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceTable;
    use crate::models::Node;

    /// Builds an instance from `(id, demand)` pairs (depot first) and
    /// symmetric `(a, b, distance)` entries.
    fn instance(nodes: &[(&str, u32)], edges: &[(&str, &str, f64)], capacity: u32) -> Instance {
        let mut dt = DistanceTable::new();
        for &(a, b, d) in edges {
            dt.insert(a, b, d);
        }
        Instance::new(
            nodes.iter().map(|&(id, d)| Node::new(id, d)).collect(),
            dt,
            capacity,
        )
    }

    /// Depot at 0 and customers on a line at the given coordinates.
    fn line(points: &[(&str, f64, u32)], capacity: u32) -> Instance {
        let mut nodes = vec![Node::depot("D")];
        let mut dt = DistanceTable::new();
        for (k, &(a, xa, demand)) in points.iter().enumerate() {
            nodes.push(Node::new(a, demand));
            dt.insert("D", a, xa.abs());
            for &(b, xb, _) in &points[k + 1..] {
                dt.insert(a, b, (xa - xb).abs());
            }
        }
        Instance::new(nodes, dt, capacity)
    }

    fn sequences(sol: &Solution) -> Vec<Vec<&str>> {
        sol.routes()
            .iter()
            .map(|r| r.sequence().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_cw_pair_merges() {
        let inst = instance(
            &[("D", 0), ("A", 5), ("B", 5)],
            &[("D", "A", 10.0), ("D", "B", 10.0), ("A", "B", 4.0)],
            10,
        );
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sequences(&sol), vec![vec!["D", "A", "B", "D"]]);
        assert_eq!(sol.routes()[0].total_load(), 10);
        assert_eq!(sol.total_distance(), 24.0);
    }

    #[test]
    fn test_cw_line_single_route() {
        let inst = line(&[("A", 1.0, 10), ("B", 2.0, 10), ("C", 3.0, 10)], 30);
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_served(), 3);
        // Seed (B, C) has the top saving 4.0, then A is prepended via (A, B).
        assert_eq!(sequences(&sol), vec![vec!["D", "A", "B", "C", "D"]]);
        assert!((sol.total_distance() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_cw_capacity_split() {
        let inst = line(&[("A", 1.0, 15), ("B", 2.0, 15), ("C", 3.0, 15)], 25);
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sol.num_served(), 3);
        // No pair fits (30 > 25): three singleton routes in input order.
        assert_eq!(
            sequences(&sol),
            vec![
                vec!["D", "A", "D"],
                vec!["D", "B", "D"],
                vec!["D", "C", "D"],
            ]
        );
    }

    #[test]
    fn test_cw_capacity_stops_extension() {
        let inst = line(
            &[("A", 1.0, 10), ("B", 2.0, 10), ("C", 3.0, 10), ("E", 4.0, 10)],
            20,
        );
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sol.num_served(), 4);
        for route in sol.routes() {
            assert!(route.total_load() <= 20);
        }
        // Top saving is (C, E) = 3 + 4 - 1; then (A, B) seeds the second route.
        assert_eq!(
            sequences(&sol),
            vec![vec!["D", "C", "E", "D"], vec!["D", "A", "B", "D"]]
        );
    }

    #[test]
    fn test_cw_single_customer() {
        let inst = instance(&[("D", 0), ("C", 3)], &[("D", "C", 7.5)], 10);
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sequences(&sol), vec![vec!["D", "C", "D"]]);
        assert_eq!(sol.total_distance(), 15.0);
        assert_eq!(sol.routes()[0].total_load(), 3);
    }

    #[test]
    fn test_cw_too_few_nodes() {
        let inst = instance(&[("D", 0)], &[], 10);
        assert!(matches!(
            clarke_wright_savings(&inst),
            Err(Error::TooFewNodes { found: 1 })
        ));
    }

    #[test]
    fn test_cw_oversized_reported() {
        let inst = instance(
            &[("D", 0), ("A", 5), ("B", 5)],
            &[("D", "A", 1.0), ("D", "B", 1.0), ("A", "B", 1.0)],
            4,
        );
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sol.num_routes(), 0);
        let ids: Vec<&str> = sol.unroutable().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(sol.unroutable()[0].capacity, 4);
    }

    #[test]
    fn test_cw_oversized_fails_when_configured() {
        let inst = instance(
            &[("D", 0), ("A", 5), ("B", 5)],
            &[("D", "A", 1.0), ("D", "B", 1.0), ("A", "B", 1.0)],
            4,
        );
        let solver =
            ClarkeWright::new(SolverConfig::default().with_infeasible(InfeasiblePolicy::Fail));
        match solver.solve(&inst) {
            Err(Error::Unroutable { ids }) => assert_eq!(ids, vec!["A", "B"]),
            other => panic!("expected Unroutable, got {other:?}"),
        }
    }

    #[test]
    fn test_cw_oversized_does_not_block_others() {
        let inst = line(&[("A", 1.0, 3), ("B", 2.0, 50), ("C", 3.0, 3)], 10);
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sequences(&sol), vec![vec!["D", "A", "C", "D"]]);
        assert_eq!(sol.unroutable().len(), 1);
        assert_eq!(sol.unroutable()[0].id, "B");
    }

    #[test]
    fn test_cw_skips_overflowing_candidate() {
        // Seed (C, E); B joins on the left via (B, C); A would overflow either end.
        let inst = line(
            &[("A", 1.0, 8), ("B", 2.0, 2), ("C", 3.0, 2), ("E", 4.0, 2)],
            8,
        );
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(
            sequences(&sol),
            vec![vec!["D", "B", "C", "E", "D"], vec!["D", "A", "D"]]
        );
        assert_eq!(sol.routes()[0].total_load(), 6);
    }

    #[test]
    fn test_cw_extension_continues_past_overflow() {
        // Ranked: (P,Q) 19, (Q,X) 17, (P,Y) 15, the rest 0.
        // Seed [P, Q]; X overflows at the right end, Y still fits at the left.
        let inst = instance(
            &[("D", 0), ("P", 2), ("Q", 2), ("X", 8), ("Y", 3)],
            &[
                ("D", "P", 10.0),
                ("D", "Q", 10.0),
                ("D", "X", 10.0),
                ("D", "Y", 10.0),
                ("P", "Q", 1.0),
                ("Q", "X", 3.0),
                ("P", "Y", 5.0),
                ("P", "X", 20.0),
                ("Q", "Y", 20.0),
                ("X", "Y", 20.0),
            ],
            10,
        );
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(
            sequences(&sol),
            vec![vec!["D", "Y", "P", "Q", "D"], vec!["D", "X", "D"]]
        );
        assert_eq!(sol.routes()[0].total_load(), 7);
        assert_eq!(sol.routes()[0].total_distance(), 26.0);
        assert_eq!(sol.routes()[1].total_distance(), 20.0);
    }

    #[test]
    fn test_cw_strict_missing_distance() {
        let inst = instance(
            &[("D", 0), ("A", 1), ("B", 1)],
            &[("D", "A", 1.0), ("D", "B", 1.0)],
            10,
        );
        let strict =
            ClarkeWright::new(SolverConfig::default().with_distance_check(DistanceCheck::Strict));
        assert!(matches!(
            strict.solve(&inst),
            Err(Error::MissingDistance { from, to }) if from == "A" && to == "B"
        ));
        // Lenient treats the missing pair as free.
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.total_distance(), 2.0);
    }

    #[test]
    fn test_cw_asymmetric_lookup() {
        // Only one direction stored for each pair.
        let inst = instance(
            &[("D", 0), ("A", 5), ("B", 5)],
            &[("A", "D", 10.0), ("B", "D", 10.0), ("B", "A", 4.0)],
            10,
        );
        let sol = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(sequences(&sol), vec![vec!["D", "A", "B", "D"]]);
        assert_eq!(sol.total_distance(), 24.0);
    }

    #[test]
    fn test_cw_deterministic() {
        let inst = line(
            &[
                ("A", 1.0, 4),
                ("B", -2.0, 3),
                ("C", 3.0, 5),
                ("E", -1.0, 2),
                ("F", 2.0, 6),
            ],
            9,
        );
        let first = clarke_wright_savings(&inst).expect("solvable");
        let second = clarke_wright_savings(&inst).expect("solvable");
        assert_eq!(first, second);
    }

    #[test]
    fn test_cw_solution_checks_clean() {
        let inst = line(
            &[
                ("A", 1.0, 4),
                ("B", -2.0, 3),
                ("C", 3.0, 5),
                ("E", -1.0, 2),
                ("F", 2.0, 6),
                ("G", 9.0, 20),
            ],
            9,
        );
        let sol = clarke_wright_savings(&inst).expect("solvable");
        let violations = RouteEvaluator::new(&inst).check(&sol);
        assert!(violations.is_empty(), "{violations:?}");
        assert_eq!(sol.num_served() + sol.unroutable().len(), 6);
    }
}
