//! Node type.

use serde::{Deserialize, Serialize};

/// A location in a routing instance: the depot or a customer.
///
/// The first node of an [`Instance`](super::Instance) is the depot; its demand
/// is conventionally zero but is not checked.
///
/// # Examples
///
/// ```
/// use u_savings::models::Node;
///
/// let depot = Node::depot("D");
/// assert_eq!(depot.id(), "D");
/// assert_eq!(depot.demand(), 0);
///
/// let c = Node::new("A", 10);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    #[serde(default)]
    demand: u32,
}

impl Node {
    /// Creates a node with the given identifier and demand.
    pub fn new(id: impl Into<String>, demand: u32) -> Self {
        Self {
            id: id.into(),
            demand,
        }
    }

    /// Creates a depot node (demand 0).
    pub fn depot(id: impl Into<String>) -> Self {
        Self::new(id, 0)
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Units to deliver at this node.
    pub fn demand(&self) -> u32 {
        self.demand
    }
}
