//! Path reconstruction from predecessor maps

use crate::node::NodeId;
use std::collections::HashMap;

/// Predecessor of each node in a traversal; `None` for the root and for
/// unreached nodes.
pub type ParentMap = HashMap<NodeId, Option<NodeId>>;

/// Walk predecessors back from `dest` until a node without one, then
/// return the walked nodes in source-to-destination order.
///
/// The first element is whichever node ended the walk: the traversal root
/// when `dest` was reached, or `dest` itself when it was not.
pub fn reconstruct_path(parents: &ParentMap, dest: &NodeId) -> Vec<NodeId> {
    let mut path = vec![dest.clone()];
    let mut current = dest;

    while let Some(Some(prev)) = parents.get(current) {
        // A parent map built by a traversal is a forest; guard anyway
        if path.len() > parents.len() {
            tracing::warn!("Predecessor cycle detected while walking back from {}", dest);
            break;
        }
        path.push(prev.clone());
        current = prev;
    }

    path.reverse();
    path
}
