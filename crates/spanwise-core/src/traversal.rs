//! Graph traversal: breadth-first and depth-first spanning trees

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::NodeId;
use crate::path::{reconstruct_path, ParentMap};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Seed for the weight source of trees built from traversals. Tree edges
/// copy their weights from the source graph, so it is never drawn from in
/// practice.
const TREE_SEED: u64 = 0;

/// Traversal strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Breadth-first, FIFO queue
    #[default]
    Bfs,
    /// Depth-first, recursive descent order
    DfsRecursive,
    /// Depth-first, explicit stack with re-pushes
    DfsIterative,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::Bfs, Self::DfsRecursive, Self::DfsIterative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::DfsRecursive => "dfs-recursive",
            Self::DfsIterative => "dfs-iterative",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation(format!("unknown traversal strategy: {}", s)))
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub edges_examined: usize,
    /// Largest queue or stack length seen
    pub max_frontier: usize,
}

/// Result of a traversal from one source
#[derive(Debug, Clone)]
pub struct Traversal {
    pub strategy: Strategy,
    pub source: NodeId,
    /// Nodes in the order they were marked visited
    pub order: Vec<NodeId>,
    /// Predecessor of every node of the graph, `None` for the source and
    /// unreached nodes
    pub parents: ParentMap,
    pub stats: TraversalStats,
}

impl Traversal {
    pub fn reached(&self, id: &NodeId) -> bool {
        *id == self.source || matches!(self.parents.get(id), Some(Some(_)))
    }

    /// Tree path from the source to `dest`, or `None` if `dest` was not
    /// reached
    pub fn path_to(&self, dest: &NodeId) -> Option<Vec<NodeId>> {
        self.reached(dest).then(|| reconstruct_path(&self.parents, dest))
    }

    /// Build the spanning subgraph described by the parent map.
    ///
    /// Nodes are added in visit order. Each `parent -> child` edge takes
    /// its weight from `graph`. A node without a parent adds nothing by
    /// itself, so an isolated source yields an empty graph.
    pub fn tree(&self, graph: &Graph) -> Graph {
        let mut tree = Graph::with_seed(graph.is_directed(), TREE_SEED);

        for child in &self.order {
            let Some(Some(parent)) = self.parents.get(child) else {
                continue;
            };

            let weight = graph.edge_weight(parent, child);
            let weight = if weight.is_finite() {
                Some(weight)
            } else {
                tracing::warn!(
                    "Tree edge {} -> {} has no weight in the source graph",
                    parent,
                    child
                );
                None
            };

            tree.add_node(parent);
            tree.add_node(child);
            tree.add_edge(parent, child, weight);
        }

        tree
    }
}

/// Per-call scratch state, indexed by node arena position
struct Scratch {
    visited: Vec<bool>,
    parent: Vec<Option<usize>>,
    order: Vec<usize>,
    stats: TraversalStats,
}

impl Scratch {
    fn new(len: usize) -> Self {
        Self {
            visited: vec![false; len],
            parent: vec![None; len],
            order: Vec::new(),
            stats: TraversalStats::default(),
        }
    }

    fn visit(&mut self, node: usize) {
        self.visited[node] = true;
        self.order.push(node);
        self.stats.nodes_visited += 1;
    }

    fn frontier(&mut self, len: usize) {
        self.stats.max_frontier = self.stats.max_frontier.max(len);
    }

    fn finish(self, graph: &Graph, strategy: Strategy, source: &NodeId) -> Traversal {
        let id_at = |i: usize| graph.node_at(i).id().clone();

        let parents: ParentMap = self
            .parent
            .iter()
            .enumerate()
            .map(|(i, p)| (id_at(i), p.map(id_at)))
            .collect();

        Traversal {
            strategy,
            source: source.clone(),
            order: self.order.into_iter().map(id_at).collect(),
            parents,
            stats: self.stats,
        }
    }
}

/// Graph traversal engine
pub struct TraversalEngine;

impl TraversalEngine {
    /// Traverse `graph` from `source`.
    ///
    /// Fails with `Error::UnknownNode` if `source` is not in the graph.
    pub fn run(graph: &Graph, strategy: Strategy, source: &NodeId) -> Result<Traversal> {
        let start = graph.require(source)?;

        tracing::debug!("Executing traversal: strategy={}, source={}", strategy, source);

        let scratch = match strategy {
            Strategy::Bfs => Self::bfs(graph, start),
            Strategy::DfsRecursive => Self::dfs_recursive(graph, start),
            Strategy::DfsIterative => Self::dfs_iterative(graph, start),
        };

        tracing::debug!(
            "{} visited {} nodes, examined {} edges",
            strategy,
            scratch.stats.nodes_visited,
            scratch.stats.edges_examined
        );

        Ok(scratch.finish(graph, strategy, source))
    }

    fn bfs(graph: &Graph, start: usize) -> Scratch {
        let mut s = Scratch::new(graph.node_count());
        let mut queue = VecDeque::new();

        s.visit(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in graph.node_at(current).neighbor_indices() {
                s.stats.edges_examined += 1;
                if !s.visited[next] {
                    s.parent[next] = Some(current);
                    s.visit(next);
                    queue.push_back(next);
                }
            }
            s.frontier(queue.len());
        }

        s
    }

    /// Pre-order recursive descent, run on an explicit frame stack.
    ///
    /// Each frame is a node plus the position of the next neighbor to try,
    /// which reproduces the call-stack version's parent assignments exactly.
    fn dfs_recursive(graph: &Graph, start: usize) -> Scratch {
        let mut s = Scratch::new(graph.node_count());
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
        s.visit(start);

        while let Some(frame) = frames.last_mut() {
            let (current, position) = *frame;
            let neighbors = graph.node_at(current).neighbor_indices();

            let Some(&next) = neighbors.get(position) else {
                frames.pop();
                continue;
            };
            frame.1 += 1;
            s.stats.edges_examined += 1;

            if !s.visited[next] {
                s.parent[next] = Some(current);
                s.visit(next);
                frames.push((next, 0));
                s.frontier(frames.len());
            }
        }

        s
    }

    /// Stack-based DFS allowing re-pushes.
    ///
    /// Neighbors are pushed in reverse so the first neighbor pops first.
    /// A node pushed several times keeps the parent of its latest push;
    /// pops of already-visited nodes are skipped.
    fn dfs_iterative(graph: &Graph, start: usize) -> Scratch {
        let mut s = Scratch::new(graph.node_count());
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if s.visited[current] {
                continue;
            }
            s.visit(current);

            for &next in graph.node_at(current).neighbor_indices().iter().rev() {
                s.stats.edges_examined += 1;
                if !s.visited[next] {
                    s.parent[next] = Some(current);
                    stack.push(next);
                }
            }
            s.frontier(stack.len());
        }

        s
    }
}

impl Graph {
    /// Breadth-first spanning tree from `source`
    pub fn bfs(&self, source: &NodeId) -> Result<Graph> {
        Ok(TraversalEngine::run(self, Strategy::Bfs, source)?.tree(self))
    }

    /// Depth-first spanning tree from `source`, recursive descent order
    pub fn dfs_recursive(&self, source: &NodeId) -> Result<Graph> {
        Ok(TraversalEngine::run(self, Strategy::DfsRecursive, source)?.tree(self))
    }

    /// Depth-first spanning tree from `source`, explicit stack
    pub fn dfs_iterative(&self, source: &NodeId) -> Result<Graph> {
        Ok(TraversalEngine::run(self, Strategy::DfsIterative, source)?.tree(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    // A --1-- B --2-- C --1-- D
    //         |       |
    //         1       1
    //         |       |
    //         E --3-- F        G (isolated)
    fn create_test_graph(directed: bool) -> Graph {
        let mut graph = Graph::with_seed(directed, 3);
        for name in ["A", "B", "C", "D", "E", "F", "G"] {
            graph.add_node(name);
        }
        graph.add_edge("A", "B", Some(1.0));
        graph.add_edge("B", "C", Some(2.0));
        graph.add_edge("C", "D", Some(1.0));
        graph.add_edge("B", "E", Some(1.0));
        graph.add_edge("C", "F", Some(1.0));
        graph.add_edge("E", "F", Some(3.0));
        graph
    }

    fn parent_of<'a>(t: &'a Traversal, node: &str) -> Option<&'a str> {
        t.parents[&id(node)].as_ref().map(NodeId::as_str)
    }

    fn order(t: &Traversal) -> Vec<&str> {
        t.order.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn test_bfs_order_and_parents() {
        let graph = create_test_graph(false);
        let t = TraversalEngine::run(&graph, Strategy::Bfs, &id("A")).unwrap();

        assert_eq!(order(&t), vec!["A", "B", "C", "E", "D", "F"]);
        assert_eq!(parent_of(&t, "A"), None);
        assert_eq!(parent_of(&t, "C"), Some("B"));
        assert_eq!(parent_of(&t, "E"), Some("B"));
        assert_eq!(parent_of(&t, "F"), Some("C"));
        assert_eq!(parent_of(&t, "G"), None);
        assert!(!t.reached(&id("G")));
    }

    #[test]
    fn test_dfs_recursive_descends_first() {
        let graph = create_test_graph(false);
        let t = TraversalEngine::run(&graph, Strategy::DfsRecursive, &id("A")).unwrap();

        assert_eq!(order(&t), vec!["A", "B", "C", "D", "F", "E"]);
        assert_eq!(parent_of(&t, "E"), Some("F"));
        assert_eq!(parent_of(&t, "F"), Some("C"));
    }

    #[test]
    fn test_dfs_variants_agree() {
        let graph = create_test_graph(false);
        for source in ["A", "C", "F"] {
            let recursive =
                TraversalEngine::run(&graph, Strategy::DfsRecursive, &id(source)).unwrap();
            let iterative =
                TraversalEngine::run(&graph, Strategy::DfsIterative, &id(source)).unwrap();

            assert_eq!(recursive.order, iterative.order);
            assert_eq!(recursive.parents, iterative.parents);
        }
    }

    #[test]
    fn test_spanning_tree_shape() {
        let graph = create_test_graph(false);
        for strategy in Strategy::ALL {
            let t = TraversalEngine::run(&graph, strategy, &id("A")).unwrap();
            let tree = t.tree(&graph);

            assert_eq!(tree.node_count(), 6, "{}", strategy);
            assert_eq!(tree.edge_count(), 5, "{}", strategy);
            assert_eq!(tree.component_count(), 1, "{}", strategy);
            assert!(!tree.contains_node(&id("G")));
            for edge in tree.edges() {
                assert_eq!(edge.weight, graph.edge_weight(&edge.from, &edge.to));
            }
        }
    }

    #[test]
    fn test_tree_edges_point_parent_to_child() {
        let graph = create_test_graph(false);
        let tree = graph.bfs(&id("A")).unwrap();

        assert_eq!(tree.is_directed(), graph.is_directed());
        assert_eq!(tree.edges()[0].from, id("A"));
        assert_eq!(tree.edges()[0].to, id("B"));
        assert_eq!(tree.edge_weight(&id("C"), &id("F")), 1.0);
    }

    #[test]
    fn test_directed_traversal_follows_edges() {
        let graph = create_test_graph(true);
        let t = TraversalEngine::run(&graph, Strategy::Bfs, &id("C")).unwrap();

        assert_eq!(order(&t), vec!["C", "D", "F"]);
        assert!(!t.reached(&id("A")));
        assert!(graph.dfs_iterative(&id("C")).unwrap().is_directed());
    }

    #[test]
    fn test_isolated_source_yields_empty_tree() {
        let graph = create_test_graph(false);
        for strategy in Strategy::ALL {
            let t = TraversalEngine::run(&graph, strategy, &id("G")).unwrap();
            assert_eq!(order(&t), vec!["G"]);
            assert!(t.tree(&graph).is_empty());
        }
    }

    #[test]
    fn test_unknown_source_fails_fast() {
        let graph = create_test_graph(false);
        for strategy in Strategy::ALL {
            let result = TraversalEngine::run(&graph, strategy, &id("Z"));
            assert!(matches!(result, Err(Error::UnknownNode(name)) if name == "Z"));
        }
        assert!(graph.dfs_recursive(&id("Z")).is_err());
    }

    #[test]
    fn test_restartable_without_mutation() {
        let graph = create_test_graph(false);
        let before = graph.snapshot();

        let first = graph.bfs(&id("A")).unwrap();
        let _ = graph.bfs(&id("D")).unwrap();
        let again = graph.bfs(&id("A")).unwrap();

        assert_eq!(graph.snapshot(), before);
        assert_eq!(first.snapshot(), again.snapshot());
    }

    #[test]
    fn test_path_to() {
        let graph = create_test_graph(false);
        let t = TraversalEngine::run(&graph, Strategy::Bfs, &id("A")).unwrap();

        let path = t.path_to(&id("F")).unwrap();
        let names: Vec<&str> = path.iter().map(NodeId::as_str).collect();
        assert_eq!(names, vec!["A", "B", "C", "F"]);
        assert_eq!(t.path_to(&id("G")), None);
        assert_eq!(t.path_to(&id("A")), Some(vec![id("A")]));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 100_000u32;
        let mut graph = Graph::with_seed(false, 0);
        for i in 0..n {
            graph.add_node(i);
        }
        for i in 0..n - 1 {
            graph.add_edge(i, i + 1, Some(1.0));
        }

        let t = TraversalEngine::run(&graph, Strategy::DfsRecursive, &NodeId::from(0u32)).unwrap();
        assert_eq!(t.stats.nodes_visited, n as usize);
    }

    #[test]
    fn test_strategy_names() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("BFS".parse::<Strategy>().unwrap(), Strategy::Bfs);
        assert!("dijkstra".parse::<Strategy>().is_err());
    }
}
