//! Route type.

use serde::{Deserialize, Serialize};

/// A depot-anchored sequence of nodes served by a single vehicle.
///
/// Produced by [`RouteEvaluator::finalize`](crate::evaluation::RouteEvaluator::finalize)
/// and not modified afterwards. The sequence includes the depot at both ends.
///
/// # Examples
///
/// ```
/// use u_savings::models::Route;
///
/// let route = Route::new(vec!["D".into(), "A".into(), "B".into(), "D".into()], 13.0, 10);
/// assert_eq!(route.customers(), ["A", "B"]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_load(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    sequence: Vec<String>,
    total_distance: f64,
    total_load: u32,
}

impl Route {
    /// Creates a route from a full sequence (depot included at both ends).
    pub fn new(sequence: Vec<String>, total_distance: f64, total_load: u32) -> Self {
        Self {
            sequence,
            total_distance,
            total_load,
        }
    }

    /// Full visiting order, depot first and last.
    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    /// Customer ids in visiting order (depot excluded).
    pub fn customers(&self) -> &[String] {
        match self.sequence.len() {
            0..=2 => &[],
            n => &self.sequence[1..n - 1],
        }
    }

    /// Number of customers served.
    pub fn len(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` if the route serves no customer.
    pub fn is_empty(&self) -> bool {
        self.customers().is_empty()
    }

    /// Sum of the distances between consecutive nodes of the sequence.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of the demands served.
    pub fn total_load(&self) -> u32 {
        self.total_load
    }
}
