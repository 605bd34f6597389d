//! # u-savings
//!
//! Capacitated vehicle routing (CVRP) with the sequential Clarke-Wright
//! savings heuristic: one depot, customers with integer demands, a sparse
//! distance table, and a capacity shared by every vehicle.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Instance, Route, Solution)
//! - [`distance`] — Sparse, identifier-keyed distance table
//! - [`constructive`] — Savings ranking and sequential route construction
//! - [`evaluation`] — Route finalization and solution checking
//! - [`config`] — Solver configuration
//! - [`request`] — Instance plus configuration, as received over JSON
//! - `ffi` — JSON and C ABI entry points (feature `ffi`)
//! - `wasm` — WebAssembly bindings (feature `wasm`)
//!
//! ## Example
//!
//! ```
//! use u_savings::constructive::clarke_wright_savings;
//! use u_savings::distance::DistanceTable;
//! use u_savings::models::{Instance, Node};
//!
//! let mut dt = DistanceTable::new();
//! dt.insert("D", "A", 4.0);
//! dt.insert("D", "B", 6.0);
//! dt.insert("A", "B", 3.0);
//! let instance = Instance::new(
//!     vec![Node::depot("D"), Node::new("A", 5), Node::new("B", 5)],
//!     dt,
//!     10,
//! );
//!
//! let solution = clarke_wright_savings(&instance)?;
//! assert_eq!(solution.routes()[0].sequence(), ["D", "A", "B", "D"]);
//! assert_eq!(solution.total_distance(), 13.0);
//! # Ok::<(), u_savings::Error>(())
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
mod error;
pub mod evaluation;
pub mod models;
pub mod request;

#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
