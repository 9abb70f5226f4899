//! Spanwise Core - In-memory graph engine
//!
//! This crate provides weighted directed/undirected graphs, breadth-first
//! and depth-first spanning trees, and Kruskal/Prim spanning trees.

pub mod disjoint_set;
pub mod edge;
pub mod error;
pub mod graph;
pub mod mst;
pub mod node;
pub mod path;
pub mod traversal;

pub use disjoint_set::DisjointSet;
pub use edge::{total_weight, Edge};
pub use error::{Error, Result};
pub use graph::{EdgeInsert, Graph, GraphSnapshot};
pub use mst::{MstAlgorithm, MstEngine, MstResult};
pub use node::{Node, NodeId};
pub use path::{reconstruct_path, ParentMap};
pub use traversal::{Strategy, Traversal, TraversalEngine, TraversalStats};
