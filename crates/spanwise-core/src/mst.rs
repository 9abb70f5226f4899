//! Spanning trees: Kruskal (ascending and descending) and Prim

use crate::disjoint_set::DisjointSet;
use crate::edge::{total_weight, Edge};
use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Spanning tree algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MstAlgorithm {
    /// Kruskal over ascending weights: minimum spanning forest
    #[default]
    KruskalMin,
    /// Kruskal over descending weights: maximum spanning forest
    KruskalMax,
    /// Prim from the first node: minimum spanning tree of one component
    Prim,
}

impl MstAlgorithm {
    pub const ALL: [MstAlgorithm; 3] = [Self::KruskalMin, Self::KruskalMax, Self::Prim];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KruskalMin => "kruskal-min",
            Self::KruskalMax => "kruskal-max",
            Self::Prim => "prim",
        }
    }
}

impl std::str::FromStr for MstAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation(format!("unknown spanning tree algorithm: {}", s)))
    }
}

impl std::fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted edges of a spanning tree or forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MstResult {
    pub algorithm: MstAlgorithm,
    /// Edges in acceptance order
    pub edges: Vec<Edge>,
    pub total_weight: f64,
}

/// Candidate edge in Prim's heap.
///
/// Ordered so that `BinaryHeap` pops the lightest edge first, and among
/// equal weights the one pushed earliest.
struct Candidate {
    edge: Edge,
    seq: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .edge
            .cmp_weight(&self.edge)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Spanning tree engine
pub struct MstEngine;

impl MstEngine {
    /// Run `algorithm` over `graph`
    pub fn run(graph: &Graph, algorithm: MstAlgorithm) -> MstResult {
        let edges = match algorithm {
            MstAlgorithm::KruskalMin => Self::kruskal(graph, false),
            MstAlgorithm::KruskalMax => Self::kruskal(graph, true),
            MstAlgorithm::Prim => Self::prim(graph),
        };
        let total_weight = total_weight(&edges);

        tracing::debug!(
            "{} accepted {} of {} edges, total weight {}",
            algorithm,
            edges.len(),
            graph.edge_count(),
            total_weight
        );

        MstResult {
            algorithm,
            edges,
            total_weight,
        }
    }

    /// Kruskal's algorithm over a stable sort, so equal weights keep their
    /// insertion order in both directions.
    fn kruskal(graph: &Graph, descending: bool) -> Vec<Edge> {
        let mut sorted: Vec<&Edge> = graph.edges().iter().collect();
        if descending {
            sorted.sort_by(|a, b| b.cmp_weight(a));
        } else {
            sorted.sort_by(|a, b| a.cmp_weight(b));
        }

        let mut sets = DisjointSet::new(0..graph.node_count());
        let mut accepted = Vec::new();

        for edge in sorted {
            let (Some(u), Some(v)) = (graph.index_of(&edge.from), graph.index_of(&edge.to)) else {
                continue;
            };
            if sets.union(&u, &v) {
                tracing::trace!("Kruskal accepted {}", edge);
                accepted.push(edge.clone());
            }
        }

        accepted
    }

    /// Prim's algorithm from the first inserted node.
    ///
    /// Only the start node's component is spanned. Candidates for newly
    /// reached nodes are built fresh with weights from `Graph::edge_weight`.
    fn prim(graph: &Graph) -> Vec<Edge> {
        let Some(start) = graph.nodes().first().map(|n| n.id().clone()) else {
            return Vec::new();
        };

        let mut visited = vec![false; graph.node_count()];
        let mut heap = BinaryHeap::new();
        let mut seq = 0;
        let mut push = |heap: &mut BinaryHeap<Candidate>, edge: Edge| {
            heap.push(Candidate { edge, seq });
            seq += 1;
        };

        if let Some(i) = graph.index_of(&start) {
            visited[i] = true;
        }
        for edge in graph.edges().iter().filter(|e| e.touches(&start)) {
            push(&mut heap, edge.clone());
        }

        let mut accepted = Vec::new();

        while let Some(Candidate { edge, .. }) = heap.pop() {
            let (Some(u), Some(v)) = (graph.index_of(&edge.from), graph.index_of(&edge.to)) else {
                continue;
            };
            let added = match (visited[u], visited[v]) {
                (true, false) => v,
                (false, true) => u,
                _ => continue,
            };

            visited[added] = true;
            tracing::trace!("Prim accepted {}", edge);
            accepted.push(edge);

            let node = graph.node_at(added);
            for &next in node.neighbor_indices() {
                if visited[next] {
                    continue;
                }
                let next_id = graph.node_at(next).id();
                let weight = graph.edge_weight(node.id(), next_id);
                if weight.is_infinite() {
                    tracing::warn!("No weight for known edge {} -> {}", node.id(), next_id);
                }
                push(&mut heap, Edge::new(node.id(), next_id, weight));
            }
        }

        accepted
    }
}

impl Graph {
    /// Minimum spanning forest by Kruskal's algorithm
    pub fn kruskal_min(&self) -> Vec<Edge> {
        MstEngine::kruskal(self, false)
    }

    /// Maximum spanning forest: Kruskal's algorithm over descending weights
    pub fn kruskal_max(&self) -> Vec<Edge> {
        MstEngine::kruskal(self, true)
    }

    /// Minimum spanning tree of the first node's component by Prim's
    /// algorithm
    pub fn prim(&self) -> Vec<Edge> {
        MstEngine::prim(self)
    }
}
