//! Constructive heuristics for building CVRP solutions.
//!
//! - [`SavingsList`] — Clarke-Wright savings of every customer pair, ranked
//! - [`ClarkeWright`] — sequential savings route construction (1964), O(n³)

mod clarke_wright;
mod savings;

pub use clarke_wright::{clarke_wright_savings, ClarkeWright};
pub use savings::{Saving, SavingsList};
