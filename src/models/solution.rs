//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A customer that cannot be served because its demand alone exceeds the
/// vehicle capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unroutable {
    /// Customer id.
    pub id: String,
    /// Demand of the customer.
    pub demand: u32,
    /// Vehicle capacity it was checked against.
    pub capacity: u32,
}

/// A constraint violation found when checking a solution against its instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The route does not start and end at the depot.
    NotDepotAnchored {
        /// Route index in the solution.
        route_index: usize,
    },
    /// Demand served by the route exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Actual demand served.
        load: u32,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// The stored load differs from the sum of demands on the route.
    LoadMismatch {
        /// Route index in the solution.
        route_index: usize,
        /// Load stored on the route.
        reported: u32,
        /// Load recomputed from the sequence.
        actual: u32,
    },
    /// The stored distance differs from the one recomputed from the sequence.
    DistanceMismatch {
        /// Route index in the solution.
        route_index: usize,
        /// Distance stored on the route.
        reported: f64,
        /// Distance recomputed from the sequence.
        actual: f64,
    },
    /// A customer appears more than once across all routes.
    DuplicateVisit {
        /// Customer id.
        id: String,
    },
    /// A route visits an id that is not a customer of the instance.
    UnknownNode {
        /// The unrecognised id.
        id: String,
    },
    /// A customer is neither routed nor reported as unroutable.
    MissingCustomer {
        /// Customer id.
        id: String,
    },
}

/// Result of a solve: the routes in construction order and the customers that
/// could not be served.
///
/// # Examples
///
/// ```
/// use u_savings::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(vec!["D".into(), "A".into(), "D".into()], 8.0, 5));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_served(), 1);
/// assert!(sol.is_complete());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    #[serde(default)]
    unroutable: Vec<Unroutable>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Records a customer that could not be served.
    pub fn add_unroutable(&mut self, customer: Unroutable) {
        self.unroutable.push(customer);
    }

    /// Routes in construction order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the solution, returning only the routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Customers that could not be served.
    pub fn unroutable(&self) -> &[Unroutable] {
        &self.unroutable
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Returns `true` if every customer was served.
    pub fn is_complete(&self) -> bool {
        self.unroutable.is_empty()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(Route::total_distance).sum()
    }

    /// Total demand served across all routes.
    pub fn total_load(&self) -> u64 {
        self.routes.iter().map(|r| u64::from(r.total_load())).sum()
    }
}
