//! Line-oriented GraphViz reader
//!
//! Understands the subset Spanwise writes: one statement per line, a
//! `graph`/`digraph` header, node statements and edge statements whose
//! weight is carried in a `label` attribute.

use crate::error::{DotError, DotResult};
use lazy_static::lazy_static;
use regex::Regex;
use spanwise_core::{EdgeInsert, Graph, NodeId};
use std::path::Path;

const ID: &str = r#""(?:[^"\\]|\\.)*"|[A-Za-z0-9_.]+"#;

lazy_static! {
    static ref HEADER: Regex = Regex::new(&format!(
        r"^(?:strict\s+)?(?P<kind>digraph|graph)(?:\s+(?:{ID}))?\s*(?P<open>\{{)?$"
    ))
    .expect("valid header regex");

    static ref EDGE: Regex = Regex::new(&format!(
        r"^(?P<from>{ID})\s*(?P<op>->|--)\s*(?P<to>{ID})\s*(?:\[(?P<attrs>[^\]]*)\])?\s*;?$"
    ))
    .expect("valid edge regex");

    static ref NODE: Regex =
        Regex::new(&format!(r"^(?P<id>{ID})\s*(?:\[[^\]]*\])?\s*;?$")).expect("valid node regex");

    static ref LABEL: Regex =
        Regex::new(r#"(?:^|[\s,])label\s*=\s*(?:"(?P<quoted>[^"]*)"|(?P<bare>[^\s,\]]+))"#)
            .expect("valid label regex");

    /// Graph-level statements that carry no nodes or edges
    static ref IGNORED: Regex =
        Regex::new(r"^(?:(?:node|edge|graph)\s*\[.*\]\s*;?|[A-Za-z_][A-Za-z0-9_]*\s*=.*)$")
            .expect("valid attribute regex");
}

/// Reader position relative to the graph's `{ ... }` body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Header,
    AwaitingOpen,
    Open,
    Closed,
}

/// Parse GraphViz text into a graph.
///
/// Edges without a `label`, or with an empty one, get a random default
/// weight from a source seeded with `seed`, or from the OS when `seed` is
/// `None`. Only comments may follow the closing brace.
pub fn parse(text: &str, seed: Option<u64>) -> DotResult<Graph> {
    let mut graph: Option<Graph> = None;
    let mut block = Block::Header;
    let mut edges = 0usize;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }

        match block {
            Block::Header => {
                let caps = HEADER.captures(line).ok_or(DotError::MissingHeader)?;
                let directed = &caps["kind"] == "digraph";
                graph = Some(match seed {
                    Some(seed) => Graph::with_seed(directed, seed),
                    None => Graph::new(directed),
                });
                block = if caps.name("open").is_some() {
                    Block::Open
                } else {
                    Block::AwaitingOpen
                };
                continue;
            }
            Block::AwaitingOpen => {
                if line != "{" {
                    return Err(DotError::parse(line_no, "expected '{' after the graph header"));
                }
                block = Block::Open;
                continue;
            }
            Block::Closed => {
                return Err(DotError::parse(
                    line_no,
                    format!("statement after the closing brace: {}", line),
                ));
            }
            Block::Open if line == "}" => {
                block = Block::Closed;
                continue;
            }
            Block::Open => {}
        }

        let Some(graph) = graph.as_mut() else {
            continue;
        };

        if let Some(caps) = EDGE.captures(line) {
            let directed_op = &caps["op"] == "->";
            if directed_op != graph.is_directed() {
                return Err(DotError::parse(
                    line_no,
                    format!("edge operator '{}' does not match the graph kind", &caps["op"]),
                ));
            }

            let from = unquote(&caps["from"]);
            let to = unquote(&caps["to"]);
            let weight = match caps.name("attrs") {
                Some(attrs) => parse_label(attrs.as_str(), line_no)?,
                None => None,
            };

            graph.add_node(from.clone());
            graph.add_node(to.clone());
            if let EdgeInsert::Inserted(_) = graph.add_edge(from, to, weight) {
                edges += 1;
            }
        } else if IGNORED.is_match(line) {
            tracing::trace!("Ignoring attribute statement on line {}", line_no);
        } else if let Some(caps) = NODE.captures(line) {
            graph.add_node(unquote(&caps["id"]));
        } else {
            return Err(DotError::parse(line_no, format!("unrecognised statement: {}", line)));
        }
    }

    let graph = graph.ok_or(DotError::MissingHeader)?;
    tracing::debug!(
        "Parsed {} graph: {} nodes, {} edges",
        if graph.is_directed() { "directed" } else { "undirected" },
        graph.node_count(),
        edges
    );
    Ok(graph)
}

/// Read and parse a GraphViz file
pub fn read_file(path: impl AsRef<Path>, seed: Option<u64>) -> DotResult<Graph> {
    let path = path.as_ref();
    tracing::debug!("Reading graph from {:?}", path);
    let text = std::fs::read_to_string(path)?;
    parse(&text, seed)
}

fn parse_label(attrs: &str, line_no: usize) -> DotResult<Option<f64>> {
    let Some(caps) = LABEL.captures(attrs) else {
        return Ok(None);
    };
    let raw = caps
        .name("quoted")
        .or_else(|| caps.name("bare"))
        .map(|m| m.as_str().trim())
        .unwrap_or_default();

    if raw.is_empty() {
        tracing::trace!("Empty label on line {}, using a default weight", line_no);
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| DotError::parse(line_no, format!("edge label '{}' is not a number", raw)))
}

/// Strip quotes and undo the escapes the writer applies
fn unquote(token: &str) -> NodeId {
    let Some(inner) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) else {
        return NodeId::new(token);
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(next) => {
                out.push(c);
                out.push(next);
            }
            None => out.push(c),
        }
    }
    NodeId::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_parse_directed() {
        let text = r#"digraph G {
    "A" -> "B" [label="4"];
    "B" -> "C" [label="2.5"];
}
"#;
        let graph = parse(text, Some(1)).unwrap();

        assert!(graph.is_directed());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_weight(&id("A"), &id("B")), 4.0);
        assert_eq!(graph.edge_weight(&id("B"), &id("C")), 2.5);
        assert!(!graph.edge_exists(&id("B"), &id("A")));
    }

    #[test]
    fn test_parse_undirected_with_isolated_node() {
        let text = "graph {\n  \"A\";\n  \"B\" -- \"C\" [label=\"7\"];\n  \"D\";\n}\n";
        let graph = parse(text, Some(1)).unwrap();

        assert!(!graph.is_directed());
        let ids: Vec<&str> = graph.node_ids().map(NodeId::as_str).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
        assert_eq!(graph.edge_weight(&id("C"), &id("B")), 7.0);
    }

    #[test]
    fn test_missing_label_uses_seeded_weight() {
        let text = "graph {\n  a -- b;\n  b -- c [color=red];\n}\n";
        let first = parse(text, Some(5)).unwrap();
        let second = parse(text, Some(5)).unwrap();

        assert_eq!(first.edges(), second.edges());
        for edge in first.edges() {
            assert!((1.0..=20.0).contains(&edge.weight));
        }
    }

    #[test]
    fn test_unquoted_ids_and_bare_label() {
        let graph = parse("digraph {\n 1 -> 2 [label=3];\n}", Some(0)).unwrap();
        assert_eq!(graph.edge_weight(&NodeId::from(1), &NodeId::from(2)), 3.0);
    }

    #[test]
    fn test_ignores_comments_and_attributes() {
        let text = r#"// generated
digraph G {
    rankdir=LR;
    node [shape=circle];
    # comment
    "A" -> "B" [label="1"];
}
"#;
        let graph = parse(text, Some(0)).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edge_is_ignored() {
        let text = "graph {\n A -- B [label=1];\n B -- A [label=9];\n}";
        let graph = parse(text, Some(0)).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(&id("B"), &id("A")), 1.0);
    }

    #[test]
    fn test_escaped_quotes_in_ids() {
        let graph = parse("graph {\n \"say \\\"hi\\\"\" -- \"x\" [label=2];\n}", Some(0)).unwrap();
        assert!(graph.contains_node(&id("say \"hi\"")));
    }

    #[test]
    fn test_operator_mismatch_is_an_error() {
        let err = parse("graph {\n A -> B;\n}", Some(0)).unwrap_err();
        assert!(matches!(err, DotError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_label_is_an_error() {
        let err = parse("digraph {\n A -> B [label=\"heavy\"];\n}", Some(0)).unwrap_err();
        assert!(matches!(err, DotError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse("A -> B;", Some(0)), Err(DotError::MissingHeader)));
        assert!(matches!(parse("", Some(0)), Err(DotError::MissingHeader)));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.dot");
        std::fs::write(&path, "digraph {\n \"x\" -> \"y\" [label=\"6\"];\n}\n").unwrap();

        let graph = read_file(&path, Some(0)).unwrap();
        assert_eq!(graph.edge_weight(&id("x"), &id("y")), 6.0);

        let missing = read_file(dir.path().join("nope.dot"), Some(0));
        assert!(matches!(missing, Err(DotError::Io(_))));
    }

    #[test]
    fn test_escaped_line_breaks_in_ids() {
        let graph = parse("graph {\n \"a\\nb\" -- \"c\\r\" [label=3];\n}", Some(0)).unwrap();

        assert!(graph.contains_node(&id("a\nb")));
        assert_eq!(graph.edge_weight(&id("a\nb"), &id("c\r")), 3.0);
    }

    #[test]
    fn test_statement_after_closing_brace_is_an_error() {
        let text = "graph {\n A -- B [label=1];\n}\n C -- D [label=2];\n";
        let err = parse(text, Some(0)).unwrap_err();
        assert!(matches!(err, DotError::Parse { line: 4, .. }));

        let graph = parse("graph {\n A -- B [label=1];\n}\n// trailing\n\n", Some(0)).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_empty_label_uses_default_weight() {
        let graph = parse("digraph {\n A -> B [label=\"\"];\n}", Some(3)).unwrap();
        let weight = graph.edge_weight(&id("A"), &id("B"));
        assert!((1.0..=20.0).contains(&weight));
    }

    #[test]
    fn test_opening_brace_on_its_own_line() {
        let graph = parse("digraph \"G\"\n{\n A -> B [label=2];\n}\n", Some(0)).unwrap();
        assert_eq!(graph.edge_weight(&id("A"), &id("B")), 2.0);

        let err = parse("digraph G\n A -> B;\n}", Some(0)).unwrap_err();
        assert!(matches!(err, DotError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_header_name_may_contain_braces() {
        let graph = parse("graph \"a{b}\" {\n x -- y [label=1];\n}", Some(0)).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }
}
