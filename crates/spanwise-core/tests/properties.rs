//! Structural properties of traversals and spanning trees over seeded
//! random graphs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spanwise_core::{
    total_weight, DisjointSet, Edge, Graph, MstAlgorithm, MstEngine, NodeId, Strategy,
    TraversalEngine,
};
use std::collections::HashSet;

/// Random graph with `n` nodes and roughly `extra` edges beyond an optional
/// spanning path
fn random_graph(seed: u64, n: u32, extra: usize, directed: bool, connected: bool) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_seed(directed, seed);
    for i in 0..n {
        graph.add_node(i);
    }
    if connected {
        for i in 1..n {
            let j = rng.random_range(0..i);
            graph.add_edge(j, i, None);
        }
    }
    for _ in 0..extra {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        graph.add_edge(u, v, None);
    }
    graph
}

fn reachable(graph: &Graph, strategy: Strategy, source: &NodeId) -> HashSet<NodeId> {
    let t = TraversalEngine::run(graph, strategy, source).unwrap();
    t.order.into_iter().collect()
}

fn is_forest(node_count: usize, graph: &Graph, edges: &[&Edge]) -> bool {
    let ids: Vec<&NodeId> = graph.node_ids().collect();
    let mut sets = DisjointSet::new(0..node_count);
    edges.iter().all(|e| {
        let u = ids.iter().position(|id| **id == e.from).unwrap();
        let v = ids.iter().position(|id| **id == e.to).unwrap();
        sets.union(&u, &v)
    })
}

#[test]
fn traversal_trees_span_connected_graphs() {
    for seed in 0..20 {
        let graph = random_graph(seed, 30, 40, false, true);
        let source = NodeId::from(seed as u32 % 30);

        for strategy in Strategy::ALL {
            let t = TraversalEngine::run(&graph, strategy, &source).unwrap();
            let tree = t.tree(&graph);

            assert_eq!(t.order.len(), 30);
            assert_eq!(tree.edge_count(), 29, "seed {} {}", seed, strategy);
            assert_eq!(tree.node_count(), 30);
            assert_eq!(tree.component_count(), 1);
        }
    }
}

#[test]
fn traversal_strategies_reach_the_same_nodes() {
    for seed in 0..20 {
        for directed in [false, true] {
            let graph = random_graph(seed, 25, 20, directed, false);
            let source = NodeId::from(0u32);

            let bfs = reachable(&graph, Strategy::Bfs, &source);
            assert_eq!(bfs, reachable(&graph, Strategy::DfsRecursive, &source));
            assert_eq!(bfs, reachable(&graph, Strategy::DfsIterative, &source));

            let tree = graph.bfs(&source).unwrap();
            if bfs.len() > 1 {
                assert_eq!(tree.edge_count(), bfs.len() - 1);
            } else {
                assert!(tree.is_empty());
            }
        }
    }
}

#[test]
fn dfs_variants_build_identical_trees() {
    for seed in 0..10 {
        let graph = random_graph(seed, 40, 60, false, true);
        let source = NodeId::from(0u32);

        let recursive = graph.dfs_recursive(&source).unwrap();
        let iterative = graph.dfs_iterative(&source).unwrap();
        assert_eq!(recursive.snapshot(), iterative.snapshot(), "seed {}", seed);
    }
}

#[test]
fn kruskal_forests_have_matching_size() {
    for seed in 0..20 {
        let graph = random_graph(seed, 30, 25, false, false);
        let expected = graph.node_count() - graph.component_count();

        let min = graph.kruskal_min();
        let max = graph.kruskal_max();

        assert_eq!(min.len(), expected);
        assert_eq!(max.len(), expected);
        assert!(total_weight(&min) <= total_weight(&max));
    }
}

#[test]
fn prim_matches_kruskal_on_connected_graphs() {
    for seed in 0..20 {
        let graph = random_graph(seed, 40, 80, false, true);

        let prim = MstEngine::run(&graph, MstAlgorithm::Prim);
        let kruskal = MstEngine::run(&graph, MstAlgorithm::KruskalMin);

        assert_eq!(prim.edges.len(), 39);
        assert_eq!(prim.total_weight, kruskal.total_weight, "seed {}", seed);
    }
}

#[test]
fn kruskal_is_optimal_against_brute_force() {
    for seed in 0..15 {
        let graph = random_graph(seed, 6, 6, false, false);
        let size = graph.node_count() - graph.component_count();
        let edges = graph.edges();
        assert!(edges.len() <= 16);

        let mut best_min = f64::INFINITY;
        let mut best_max = f64::NEG_INFINITY;
        for mask in 0u32..(1 << edges.len()) {
            if mask.count_ones() as usize != size {
                continue;
            }
            let chosen: Vec<&Edge> = (0..edges.len())
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| &edges[i])
                .collect();
            if !is_forest(graph.node_count(), &graph, &chosen) {
                continue;
            }
            let weight = total_weight(chosen.iter().copied());
            best_min = best_min.min(weight);
            best_max = best_max.max(weight);
        }

        assert_eq!(total_weight(&graph.kruskal_min()), best_min, "seed {}", seed);
        assert_eq!(total_weight(&graph.kruskal_max()), best_max, "seed {}", seed);
    }
}

#[test]
fn prim_on_disconnected_graph_spans_first_component() {
    let mut graph = random_graph(5, 10, 0, false, true);
    for i in 10..15u32 {
        graph.add_node(i);
    }
    for i in 11..15u32 {
        graph.add_edge(10u32, i, Some(1.0));
    }

    let edges = graph.prim();
    assert_eq!(edges.len(), 9);
    let first_component: HashSet<NodeId> = (0..10u32).map(NodeId::from).collect();
    for edge in &edges {
        assert!(first_component.contains(&edge.from));
        assert!(first_component.contains(&edge.to));
    }
}
