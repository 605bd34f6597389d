//! Routing instance.

use fxhash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};

use super::Node;
use crate::distance::DistanceTable;
use crate::Error;

/// A CVRP instance: one depot, its customers, a distance table, and a
/// capacity shared by every vehicle.
///
/// The JSON shape matches the solver's request body:
///
/// ```json
/// {
///   "nodes": [{"id": "D", "demand": 0}, {"id": "A", "demand": 5}],
///   "distance_matrix": {"D": {"A": 4.0}},
///   "vehicle_capacity": 10
/// }
/// ```
///
/// # Examples
///
/// ```
/// use u_savings::models::{Instance, Node};
/// use u_savings::distance::DistanceTable;
///
/// let mut dt = DistanceTable::new();
/// dt.insert("D", "A", 4.0);
/// let instance = Instance::new(vec![Node::depot("D"), Node::new("A", 5)], dt, 10);
///
/// assert_eq!(instance.depot().id(), "D");
/// assert_eq!(instance.num_customers(), 1);
/// assert!(instance.validate().is_ok());
/// ```
///
/// Omitted or `null` fields decode to their empty value: no nodes, an empty
/// table, capacity zero. A missing node list is then rejected by
/// [`validate`](Instance::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default, deserialize_with = "null_as_default")]
    nodes: Vec<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    distance_matrix: DistanceTable,
    #[serde(default, deserialize_with = "null_as_default")]
    vehicle_capacity: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Instance {
    /// Creates an instance. The first node is the depot.
    pub fn new(nodes: Vec<Node>, distance_matrix: DistanceTable, vehicle_capacity: u32) -> Self {
        Self {
            nodes,
            distance_matrix,
            vehicle_capacity,
        }
    }

    /// Checks the construction preconditions.
    ///
    /// Requires at least one depot and one customer, unique node ids, and
    /// finite non-negative distances.
    pub fn validate(&self) -> Result<(), Error> {
        if self.nodes.len() < 2 {
            return Err(Error::TooFewNodes {
                found: self.nodes.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for node in &self.nodes {
            if !seen.insert(node.id()) {
                return Err(Error::DuplicateNode {
                    id: node.id().to_string(),
                });
            }
        }

        if let Some((from, to, value)) = self
            .distance_matrix
            .iter()
            .find(|&(_, _, d)| !d.is_finite() || d < 0.0)
        {
            return Err(Error::InvalidDistance {
                from: from.to_string(),
                to: to.to_string(),
                value,
            });
        }

        Ok(())
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The depot (first node).
    ///
    /// # Panics
    ///
    /// Panics if the instance has no nodes, which a decoded `"nodes": []`
    /// allows. [`ClarkeWright::solve`](crate::constructive::ClarkeWright::solve)
    /// calls [`validate`](Self::validate) before touching the depot; other
    /// callers should do the same.
    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// Customers in input order (every node after the depot).
    pub fn customers(&self) -> &[Node] {
        self.nodes.get(1..).unwrap_or(&[])
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.customers().len()
    }

    /// The distance table.
    pub fn distances(&self) -> &DistanceTable {
        &self.distance_matrix
    }

    /// Capacity shared by every vehicle.
    pub fn vehicle_capacity(&self) -> u32 {
        self.vehicle_capacity
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_customers() -> Instance {
        let mut dt = DistanceTable::new();
        dt.insert("D", "A", 4.0);
        dt.insert("D", "B", 6.0);
        dt.insert("A", "B", 3.0);
        Instance::new(
            vec![Node::depot("D"), Node::new("A", 5), Node::new("B", 7)],
            dt,
            10,
        )
    }

    #[test]
    fn test_accessors() {
        let inst = two_customers();
        assert_eq!(inst.depot().id(), "D");
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.customers()[1].id(), "B");
        assert_eq!(inst.vehicle_capacity(), 10);
        assert_eq!(inst.node("B").map(Node::demand), Some(7));
        assert!(inst.node("Z").is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(two_customers().validate().is_ok());
    }

    #[test]
    fn test_validate_too_few_nodes() {
        let inst = Instance::new(vec![Node::depot("D")], DistanceTable::new(), 10);
        assert!(matches!(
            inst.validate(),
            Err(Error::TooFewNodes { found: 1 })
        ));
        assert_eq!(inst.num_customers(), 0);

        let empty = Instance::new(vec![], DistanceTable::new(), 10);
        assert!(matches!(
            empty.validate(),
            Err(Error::TooFewNodes { found: 0 })
        ));
        assert!(empty.customers().is_empty());
    }

    #[test]
    fn test_validate_duplicate_id() {
        let inst = Instance::new(
            vec![Node::depot("D"), Node::new("A", 1), Node::new("A", 2)],
            DistanceTable::new(),
            10,
        );
        assert!(matches!(inst.validate(), Err(Error::DuplicateNode { id }) if id == "A"));
    }

    #[test]
    fn test_validate_negative_distance() {
        let mut dt = DistanceTable::new();
        dt.insert("D", "A", -1.0);
        let inst = Instance::new(vec![Node::depot("D"), Node::new("A", 1)], dt, 10);
        assert!(matches!(
            inst.validate(),
            Err(Error::InvalidDistance { value, .. }) if value == -1.0
        ));
    }

    #[test]
    fn test_validate_nan_distance() {
        let mut dt = DistanceTable::new();
        dt.insert("D", "A", f64::NAN);
        let inst = Instance::new(vec![Node::depot("D"), Node::new("A", 1)], dt, 10);
        assert!(matches!(inst.validate(), Err(Error::InvalidDistance { .. })));
    }

    #[test]
    fn test_deserialize_request_body() {
        let body = r#"{
            "nodes": [{"id":"D","demand":0},{"id":"A","demand":5}],
            "distance_matrix": {"D":{"A":4.0}},
            "vehicle_capacity": 10
        }"#;
        let inst: Instance = serde_json::from_str(body).expect("valid");
        assert_eq!(inst.num_customers(), 1);
        assert_eq!(inst.distances().get("A", "D"), 4.0);
    }

    #[test]
    #[should_panic]
    fn test_depot_panics_without_nodes() {
        let inst: Instance = serde_json::from_str(r#"{"nodes":[]}"#).expect("valid");
        assert!(inst.validate().is_err());
        inst.depot();
    }

    #[test]
    fn test_deserialize_null_and_missing_fields() {
        let body = r#"{
            "nodes": [{"id":"D"},{"id":"A","demand":1}],
            "distance_matrix": null
        }"#;
        let inst: Instance = serde_json::from_str(body).expect("valid");
        assert_eq!(inst.depot().demand(), 0);
        assert!(inst.distances().is_empty());
        assert_eq!(inst.vehicle_capacity(), 0);
        assert!(inst.validate().is_ok());

        let inst: Instance =
            serde_json::from_str(r#"{"nodes":null,"vehicle_capacity":null}"#).expect("valid");
        assert!(matches!(inst.validate(), Err(Error::TooFewNodes { found: 0 })));
    }

    #[test]
    fn test_deserialize_without_matrix() {
        let body = r#"{"nodes":[{"id":"D","demand":0}],"vehicle_capacity":3}"#;
        let inst: Instance = serde_json::from_str(body).expect("valid");
        assert!(inst.distances().is_empty());
    }
}
