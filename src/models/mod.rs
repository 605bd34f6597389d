//! Domain model types for the capacitated vehicle routing problem.
//!
//! Nodes with demands, the instance that ties them to a distance table and a
//! vehicle capacity, depot-anchored routes, and the solution returned by the
//! solver.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::Instance;
pub use node::Node;
pub use route::Route;
pub use solution::{Solution, Unroutable, Violation};
