//! GraphViz writer

use spanwise_core::{Edge, Graph, NodeId};
use std::collections::HashSet;
use std::fmt::Write;

/// Render a whole graph. Every node gets its own statement so isolated
/// nodes survive a round trip.
pub fn to_dot(graph: &Graph, name: &str) -> String {
    render(graph.is_directed(), name, graph.node_ids(), graph.edges())
}

/// Render an edge list, e.g. a spanning tree, with the nodes it touches
pub fn edges_to_dot(directed: bool, edges: &[Edge], name: &str) -> String {
    let mut seen = HashSet::new();
    let nodes = edges
        .iter()
        .flat_map(|e| [&e.from, &e.to])
        .filter(|id| seen.insert(*id));
    render(directed, name, nodes, edges)
}

fn render<'a>(
    directed: bool,
    name: &str,
    nodes: impl Iterator<Item = &'a NodeId>,
    edges: &[Edge],
) -> String {
    let (kind, op) = if directed { ("digraph", "->") } else { ("graph", "--") };

    let mut out = String::new();
    let _ = writeln!(out, "{} {} {{", kind, quote(name));
    for id in nodes {
        let _ = writeln!(out, "    {};", quote(id.as_str()));
    }
    for edge in edges {
        let _ = writeln!(
            out,
            "    {} {} {} [label=\"{}\"];",
            quote(edge.from.as_str()),
            op,
            quote(edge.to.as_str()),
            edge.weight
        );
    }
    out.push_str("}\n");
    out
}

/// Quoted id on a single line; the reader undoes these escapes
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
