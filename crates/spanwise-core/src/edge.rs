//! Weighted edge type

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Lower bound of the random default weight (inclusive)
pub const MIN_DEFAULT_WEIGHT: u32 = 1;

/// Upper bound of the random default weight (inclusive)
pub const MAX_DEFAULT_WEIGHT: u32 = 20;

/// A weighted edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Compare two edges by weight only
    pub fn cmp_weight(&self, other: &Self) -> Ordering {
        self.weight.total_cmp(&other.weight)
    }

    /// True if `id` is one of the endpoints
    pub fn touches(&self, id: &NodeId) -> bool {
        self.from == *id || self.to == *id
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.from, self.to, self.weight)
    }
}

/// Sum of edge weights
pub fn total_weight<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> f64 {
    edges.into_iter().map(|e| e.weight).sum()
}
