//! Graph model: nodes, edges and mutation

use crate::disjoint_set::DisjointSet;
use crate::edge::{Edge, MAX_DEFAULT_WEIGHT, MIN_DEFAULT_WEIGHT};
use crate::error::{Error, Result};
use crate::node::{Node, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of [`Graph::add_edge`]
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeInsert {
    /// The edge was appended with this weight
    Inserted(f64),
    /// An edge between the endpoints already exists; nothing changed
    AlreadyExists,
    /// This endpoint is not in the graph; nothing changed
    MissingEndpoint(NodeId),
}

impl EdgeInsert {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Weighted graph with a fixed directed/undirected mode.
///
/// Nodes live in an insertion-ordered arena and refer to each other by
/// index. Edges are kept in insertion order, with a side index keyed by
/// endpoint pair so existence and weight lookups do not scan the edge list.
/// Omitted edge weights are drawn from the graph's own random source, which
/// can be seeded for reproducible runs.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<(usize, usize), usize>,
    rng: StdRng,
}

impl Graph {
    /// Create an empty graph with an OS-seeded weight source
    pub fn new(directed: bool) -> Self {
        Self::with_rng(directed, StdRng::from_os_rng())
    }

    /// Create an empty graph whose default weights are reproducible
    pub fn with_seed(directed: bool, seed: u64) -> Self {
        Self::with_rng(directed, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(directed: bool, rng: StdRng) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            rng,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|n| &n.id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Neighbors of `id` in edge-insertion order
    pub fn neighbors(&self, id: &NodeId) -> Option<Vec<&NodeId>> {
        self.node(id)
            .map(|node| node.neighbors.iter().map(|&i| &self.nodes[i].id).collect())
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Arena index of `id`, or `Error::UnknownNode`
    pub(crate) fn require(&self, id: &NodeId) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    /// Insert a node if absent. Returns its arena index either way.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> usize {
        let id = id.into();
        if let Some(&i) = self.index.get(&id) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(id.clone(), i);
        self.nodes.push(Node::new(id));
        i
    }

    /// Pair-index key; undirected pairs are stored smaller index first
    fn edge_key(&self, u: usize, v: usize) -> (usize, usize) {
        if self.directed || u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }

    /// The edge between `u` and `v`, if any
    pub fn find_edge(&self, u: &NodeId, v: &NodeId) -> Option<&Edge> {
        let (ui, vi) = (self.index_of(u)?, self.index_of(v)?);
        self.edge_index
            .get(&self.edge_key(ui, vi))
            .map(|&pos| &self.edges[pos])
    }

    /// Whether an edge `u -> v` exists. Undirected graphs match either
    /// orientation.
    pub fn edge_exists(&self, u: &NodeId, v: &NodeId) -> bool {
        self.find_edge(u, v).is_some()
    }

    /// Weight of the edge between `u` and `v`, or `f64::INFINITY` if there
    /// is none. Same orientation rule as [`Graph::edge_exists`].
    pub fn edge_weight(&self, u: &NodeId, v: &NodeId) -> f64 {
        self.find_edge(u, v)
            .map(|e| e.weight)
            .unwrap_or(f64::INFINITY)
    }

    /// Add an edge between two existing nodes.
    ///
    /// A missing endpoint is reported and leaves the graph untouched, as
    /// does an edge that already exists. `None` draws a random integer
    /// weight in `[1, 20]` from the graph's weight source.
    pub fn add_edge(
        &mut self,
        u: impl Into<NodeId>,
        v: impl Into<NodeId>,
        weight: Option<f64>,
    ) -> EdgeInsert {
        let u = u.into();
        let v = v.into();

        let Some(ui) = self.index_of(&u) else {
            tracing::warn!("Cannot add edge {} -> {}: node {} is not in the graph", u, v, u);
            return EdgeInsert::MissingEndpoint(u);
        };
        let Some(vi) = self.index_of(&v) else {
            tracing::warn!("Cannot add edge {} -> {}: node {} is not in the graph", u, v, v);
            return EdgeInsert::MissingEndpoint(v);
        };

        let key = self.edge_key(ui, vi);
        if self.edge_index.contains_key(&key) {
            return EdgeInsert::AlreadyExists;
        }

        let weight = weight.unwrap_or_else(|| self.random_weight());
        tracing::trace!("Adding edge {} -> {} (weight {})", u, v, weight);

        self.edge_index.insert(key, self.edges.len());
        self.edges.push(Edge::new(u, v, weight));
        self.nodes[ui].neighbors.push(vi);
        if !self.directed {
            self.nodes[vi].neighbors.push(ui);
        }

        EdgeInsert::Inserted(weight)
    }

    fn random_weight(&mut self) -> f64 {
        f64::from(self.rng.random_range(MIN_DEFAULT_WEIGHT..=MAX_DEFAULT_WEIGHT))
    }

    /// Number of weakly connected components
    pub fn component_count(&self) -> usize {
        let mut sets = DisjointSet::new(0..self.nodes.len());
        let mut components = self.nodes.len();
        for edge in &self.edges {
            if let (Some(u), Some(v)) = (self.index_of(&edge.from), self.index_of(&edge.to)) {
                if sets.union(&u, &v) {
                    components -= 1;
                }
            }
        }
        components
    }

    /// Plain-data view of the graph
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            directed: self.directed,
            nodes: self.node_ids().cloned().collect(),
            edges: self.edges.clone(),
        }
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Unlike [`Graph::add_edge`], an edge naming an unknown node is an
    /// error here since the snapshot is expected to be self-consistent.
    pub fn from_snapshot(snapshot: GraphSnapshot, seed: u64) -> Result<Self> {
        let mut graph = Self::with_seed(snapshot.directed, seed);
        for id in snapshot.nodes {
            graph.add_node(id);
        }
        for edge in snapshot.edges {
            if let EdgeInsert::MissingEndpoint(id) =
                graph.add_edge(edge.from.clone(), edge.to.clone(), Some(edge.weight))
            {
                return Err(Error::Validation(format!(
                    "edge {} references unknown node {}",
                    edge, id
                )));
            }
        }
        Ok(graph)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json(json: &str, seed: u64) -> Result<Self> {
        let snapshot: GraphSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot, seed)
    }
}

/// Serializable form of a [`Graph`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub directed: bool,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<Edge>,
}
