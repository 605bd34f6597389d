//! Error type shared by the solver and its adapters.

use thiserror::Error;

/// Errors returned while validating or solving an instance.
#[derive(Error, Debug)]
pub enum Error {
    /// The instance needs a depot and at least one customer.
    #[error("instance must contain a depot and at least one customer, found {found} node(s)")]
    TooFewNodes {
        /// Number of nodes supplied.
        found: usize,
    },

    /// Two nodes share the same identifier.
    #[error("duplicate node id `{id}`")]
    DuplicateNode {
        /// The repeated identifier.
        id: String,
    },

    /// A distance entry is negative or not finite.
    #[error("invalid distance {value} from `{from}` to `{to}`")]
    InvalidDistance {
        /// Origin identifier.
        from: String,
        /// Destination identifier.
        to: String,
        /// Offending value.
        value: f64,
    },

    /// A pair required by the solver is absent in both directions.
    ///
    /// Only raised with [`DistanceCheck::Strict`](crate::config::DistanceCheck::Strict).
    #[error("no distance between `{from}` and `{to}`")]
    MissingDistance {
        /// Origin identifier.
        from: String,
        /// Destination identifier.
        to: String,
    },

    /// Customers whose demand alone exceeds the vehicle capacity.
    ///
    /// Only raised with [`InfeasiblePolicy::Fail`](crate::config::InfeasiblePolicy::Fail).
    #[error("customers exceed vehicle capacity on their own: {}", ids.join(", "))]
    Unroutable {
        /// Identifiers of the customers that cannot be served.
        ids: Vec<String>,
    },

    /// The JSON body could not be decoded or encoded.
    #[cfg(feature = "ffi")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
