//! Savings computation and ranking.
//!
//! For customers `i` and `j` the saving of serving both on one route instead
//! of two separate depot round trips is
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```

use std::slice;

use crate::models::Instance;

/// A candidate link between two customers and its savings score.
///
/// `i` and `j` are positions in [`Instance::customers`], with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saving {
    i: usize,
    j: usize,
    score: f64,
}

impl Saving {
    /// First customer position.
    pub fn i(&self) -> usize {
        self.i
    }

    /// Second customer position.
    pub fn j(&self) -> usize {
        self.j
    }

    /// Distance saved by linking the two customers directly.
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// The savings of every unordered customer pair.
///
/// # Examples
///
/// ```
/// use u_savings::models::{Instance, Node};
/// use u_savings::distance::DistanceTable;
/// use u_savings::constructive::SavingsList;
///
/// let mut dt = DistanceTable::new();
/// dt.insert("D", "A", 3.0);
/// dt.insert("D", "B", 4.0);
/// dt.insert("A", "B", 1.0);
/// let instance = Instance::new(
///     vec![Node::depot("D"), Node::new("A", 1), Node::new("B", 1)],
///     dt,
///     10,
/// );
///
/// let savings = SavingsList::ranked(&instance);
/// assert_eq!(savings.len(), 1);
/// assert_eq!(savings.as_slice()[0].score(), 6.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SavingsList {
    savings: Vec<Saving>,
}

impl SavingsList {
    /// Computes one saving per unordered customer pair, in input order.
    ///
    /// Pairs with zero or negative scores are kept; they are still valid
    /// merge candidates for the sequential builder.
    pub fn compute(instance: &Instance) -> Self {
        let distances = instance.distances();
        let depot = instance.depot().id();
        let customers = instance.customers();
        let n = customers.len();

        let from_depot: Vec<f64> = customers
            .iter()
            .map(|c| distances.get(depot, c.id()))
            .collect();

        let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let dij = distances.get(customers[i].id(), customers[j].id());
                savings.push(Saving {
                    i,
                    j,
                    score: from_depot[i] + from_depot[j] - dij,
                });
            }
        }
        Self { savings }
    }

    /// Sorts by descending score. The sort is stable, so equal scores keep
    /// their computation order.
    pub fn rank(&mut self) {
        self.savings.sort_by(|a, b| b.score.total_cmp(&a.score));
    }

    /// Computes and ranks the savings of an instance.
    pub fn ranked(instance: &Instance) -> Self {
        let mut list = Self::compute(instance);
        list.rank();
        list
    }

    /// The savings in their current order.
    pub fn as_slice(&self) -> &[Saving] {
        &self.savings
    }

    /// Iterates over the savings in their current order.
    pub fn iter(&self) -> slice::Iter<'_, Saving> {
        self.savings.iter()
    }

    /// Number of savings.
    pub fn len(&self) -> usize {
        self.savings.len()
    }

    /// Returns `true` if there are no savings (fewer than two customers).
    pub fn is_empty(&self) -> bool {
        self.savings.is_empty()
    }
}
