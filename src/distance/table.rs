//! Sparse distance table keyed by node identifier.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A sparse, possibly asymmetric table of travel distances.
///
/// Entries are stored as `from -> to -> distance`. Lookups fall back to the
/// mirrored entry when the direct one is absent, and to `0.0` when neither
/// direction is known.
///
/// Serializes as a nested JSON object:
/// `{"D": {"A": 4.0, "B": 6.0}, "A": {"B": 3.0}}`.
///
/// Rows are [`FxHashMap`]s, which hash fast but are not randomized. Ids
/// decoded from untrusted JSON can be chosen to collide; callers exposing
/// the JSON or C entry points to untrusted input should bound the request
/// size before decoding.
///
/// # Examples
///
/// ```
/// use u_savings::distance::DistanceTable;
///
/// let mut dt = DistanceTable::new();
/// dt.insert("D", "A", 4.0);
/// assert_eq!(dt.get("D", "A"), 4.0);
/// assert_eq!(dt.get("A", "D"), 4.0); // mirrored
/// assert_eq!(dt.get("A", "B"), 0.0); // unknown
/// assert!(dt.lookup("A", "B").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceTable {
    rows: FxHashMap<String, FxHashMap<String, f64>>,
}

impl DistanceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance from `from` to `to`, leaving `to -> from` untouched.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, distance: f64) {
        self.rows
            .entry(from.into())
            .or_default()
            .insert(to.into(), distance);
    }

    /// Sets the distance in both directions.
    pub fn insert_symmetric(&mut self, a: &str, b: &str, distance: f64) {
        self.insert(a, b, distance);
        self.insert(b, a, distance);
    }

    /// Returns the direct entry, then the mirrored one, or `None` if neither
    /// direction is present.
    pub fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        self.entry(from, to).or_else(|| self.entry(to, from))
    }

    /// Returns the best-known distance between two nodes.
    ///
    /// Unknown pairs resolve to `0.0`, which makes them look free to the
    /// solver. Use [`lookup`](Self::lookup) to tell the two cases apart.
    pub fn get(&self, from: &str, to: &str) -> f64 {
        self.lookup(from, to).unwrap_or(0.0)
    }

    /// Number of stored directed entries.
    pub fn len(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    /// Returns `true` if no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all stored `(from, to, distance)` entries.
    ///
    /// Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.rows.iter().flat_map(|(from, row)| {
            row.iter()
                .map(move |(to, &d)| (from.as_str(), to.as_str(), d))
        })
    }

    fn entry(&self, from: &str, to: &str) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }
}
