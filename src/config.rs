//! Solver configuration.
//!
//! The defaults reproduce the classic sequential savings behaviour with two
//! safety nets: unroutable customers are reported instead of dropped, and
//! missing distances are logged.

use serde::{Deserialize, Serialize};

/// What to do with a customer whose demand alone exceeds the vehicle capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfeasiblePolicy {
    /// Solve anyway and list the customer in [`Solution::unroutable`](crate::models::Solution::unroutable).
    #[default]
    Report,
    /// Fail the whole solve with [`Error::Unroutable`](crate::Error::Unroutable).
    Fail,
}

/// How to treat node pairs that have no entry in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceCheck {
    /// Missing pairs resolve to `0.0`.
    #[default]
    Lenient,
    /// Missing pairs fail with [`Error::MissingDistance`](crate::Error::MissingDistance).
    Strict,
}

/// Configuration for [`ClarkeWright`](crate::constructive::ClarkeWright).
///
/// # Examples
///
/// ```
/// use u_savings::config::{DistanceCheck, InfeasiblePolicy, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_infeasible(InfeasiblePolicy::Fail)
///     .with_distance_check(DistanceCheck::Strict);
/// assert_eq!(config.infeasible(), InfeasiblePolicy::Fail);
/// assert_eq!(config.distance_check(), DistanceCheck::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    infeasible: InfeasiblePolicy,
    distance_check: DistanceCheck,
}

impl SolverConfig {
    /// Sets the policy for customers that exceed capacity on their own.
    pub fn with_infeasible(mut self, policy: InfeasiblePolicy) -> Self {
        self.infeasible = policy;
        self
    }

    /// Sets the handling of missing distance pairs.
    pub fn with_distance_check(mut self, check: DistanceCheck) -> Self {
        self.distance_check = check;
        self
    }

    /// Policy for customers that exceed capacity on their own.
    pub fn infeasible(&self) -> InfeasiblePolicy {
        self.infeasible
    }

    /// Handling of missing distance pairs.
    pub fn distance_check(&self) -> DistanceCheck {
        self.distance_check
    }
}
