//! Distance lookup between nodes.
//!
//! Provides a sparse, identifier-keyed distance table with symmetric fallback.

mod table;

pub use table::DistanceTable;
