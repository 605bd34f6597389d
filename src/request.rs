//! Solve requests as received by the JSON and WASM adapters.

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::constructive::ClarkeWright;
use crate::models::{Instance, Solution};
use crate::Error;

/// An instance plus an optional solver configuration.
///
/// The instance fields sit at the top level; `config` may be omitted.
///
/// # Examples
///
/// ```
/// use u_savings::request::SolveRequest;
///
/// let body = r#"{
///     "nodes": [{"id":"D","demand":0},{"id":"A","demand":5}],
///     "distance_matrix": {"D":{"A":4.0}},
///     "vehicle_capacity": 10
/// }"#;
/// let request: SolveRequest = serde_json::from_str(body)?;
/// let solution = request.solve()?;
/// assert_eq!(solution.routes()[0].total_distance(), 8.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    /// The routing instance.
    #[serde(flatten)]
    pub instance: Instance,
    /// Solver configuration; defaults when absent.
    #[serde(default)]
    pub config: SolverConfig,
}

impl SolveRequest {
    /// Runs the solver on this request.
    pub fn solve(&self) -> Result<Solution, Error> {
        ClarkeWright::new(self.config).solve(&self.instance)
    }
}
