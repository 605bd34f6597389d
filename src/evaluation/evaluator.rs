//! Route evaluator that finalizes routes and checks solutions.

use fxhash::FxHashMap;

use crate::models::{Instance, Route, Solution, Violation};

const DISTANCE_TOLERANCE: f64 = 1e-9;

/// Computes route distances and loads against an instance, and checks
/// complete solutions for constraint violations.
///
/// # Examples
///
/// ```
/// use u_savings::models::{Instance, Node};
/// use u_savings::distance::DistanceTable;
/// use u_savings::evaluation::RouteEvaluator;
///
/// let mut dt = DistanceTable::new();
/// dt.insert("D", "A", 4.0);
/// dt.insert("D", "B", 6.0);
/// dt.insert("A", "B", 3.0);
/// let instance = Instance::new(
///     vec![Node::depot("D"), Node::new("A", 5), Node::new("B", 5)],
///     dt,
///     10,
/// );
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let route = evaluator.finalize(&["A", "B"], 10);
/// assert_eq!(route.sequence(), ["D", "A", "B", "D"]);
/// assert_eq!(route.total_distance(), 13.0);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Wraps a customer sequence with the depot at both ends and computes its
    /// total distance.
    pub fn finalize(&self, customers: &[&str], load: u32) -> Route {
        let depot = self.instance.depot().id();
        let mut sequence = Vec::with_capacity(customers.len() + 2);
        sequence.push(depot.to_string());
        sequence.extend(customers.iter().map(|c| c.to_string()));
        sequence.push(depot.to_string());

        let total_distance = self.sequence_distance(&sequence);
        Route::new(sequence, total_distance, load)
    }

    /// Sums the distances between consecutive nodes of a sequence.
    pub fn sequence_distance<S: AsRef<str>>(&self, sequence: &[S]) -> f64 {
        let distances = self.instance.distances();
        sequence
            .windows(2)
            .map(|pair| distances.get(pair[0].as_ref(), pair[1].as_ref()))
            .sum()
    }

    /// Checks a solution against the instance.
    ///
    /// Returns every violation found; an empty list means the solution is
    /// feasible and consistent with the instance.
    pub fn check(&self, solution: &Solution) -> Vec<Violation> {
        let depot = self.instance.depot().id();
        let capacity = self.instance.vehicle_capacity();
        let demands: FxHashMap<&str, u32> = self
            .instance
            .customers()
            .iter()
            .map(|c| (c.id(), c.demand()))
            .collect();

        let mut violations = Vec::new();
        let mut visits: FxHashMap<&str, usize> = FxHashMap::default();

        for (route_index, route) in solution.routes().iter().enumerate() {
            let seq = route.sequence();
            let anchored = seq.len() >= 2
                && seq.first().map(String::as_str) == Some(depot)
                && seq.last().map(String::as_str) == Some(depot);
            if !anchored {
                violations.push(Violation::NotDepotAnchored { route_index });
            }

            let mut load: u32 = 0;
            for id in route.customers() {
                match demands.get(id.as_str()) {
                    Some(&demand) => {
                        load = load.saturating_add(demand);
                        *visits.entry(id.as_str()).or_default() += 1;
                    }
                    None => violations.push(Violation::UnknownNode { id: id.clone() }),
                }
            }

            if load > capacity {
                violations.push(Violation::CapacityExceeded {
                    route_index,
                    load,
                    capacity,
                });
            }
            if load != route.total_load() {
                violations.push(Violation::LoadMismatch {
                    route_index,
                    reported: route.total_load(),
                    actual: load,
                });
            }

            let actual = self.sequence_distance(seq);
            let reported = route.total_distance();
            if (actual - reported).abs() > DISTANCE_TOLERANCE * actual.abs().max(1.0) {
                violations.push(Violation::DistanceMismatch {
                    route_index,
                    reported,
                    actual,
                });
            }
        }

        for customer in self.instance.customers() {
            let id = customer.id();
            let routed = visits.get(id).copied().unwrap_or(0);
            if routed > 1 {
                violations.push(Violation::DuplicateVisit { id: id.to_string() });
            }
            let reported = solution.unroutable().iter().any(|u| u.id == id);
            if routed == 0 && !reported {
                violations.push(Violation::MissingCustomer { id: id.to_string() });
            }
        }

        violations
    }
}
