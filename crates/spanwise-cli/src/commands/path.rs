//! Path command: tree path from a traversal's parent map

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use spanwise_core::{Edge, NodeId, Strategy, TraversalEngine};

use crate::output::{to_json, OutputFormat};
use crate::{graph_name, resolve_source, AppContext};

#[derive(Args)]
pub struct PathArgs {
    /// Graph file (GraphViz)
    pub file: PathBuf,

    /// Start node (default: first node in the file)
    #[arg(long)]
    pub from: Option<String>,

    /// Destination node
    #[arg(long)]
    pub to: String,

    /// Traversal whose tree the path follows
    #[arg(short, long, default_value = "bfs")]
    pub strategy: Strategy,
}

#[derive(Debug, Serialize)]
struct PathOutput {
    from: NodeId,
    to: NodeId,
    strategy: Strategy,
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
    total_weight: f64,
}

pub async fn run(args: &PathArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.load_graph(&args.file).await?;
    let from = resolve_source(&graph, args.from.as_deref())?;
    let to = NodeId::from(&args.to);

    if !graph.contains_node(&to) {
        anyhow::bail!("Unknown node: {}", to);
    }

    let traversal = TraversalEngine::run(&graph, args.strategy, &from)?;
    let Some(nodes) = traversal.path_to(&to) else {
        anyhow::bail!("No path from {} to {}", from, to);
    };

    let edges: Vec<Edge> = nodes
        .windows(2)
        .map(|pair| Edge::new(&pair[0], &pair[1], graph.edge_weight(&pair[0], &pair[1])))
        .collect();
    let total_weight = spanwise_core::total_weight(&edges);

    match ctx.format {
        OutputFormat::Json => {
            let out = PathOutput {
                from,
                to,
                strategy: args.strategy,
                nodes,
                edges,
                total_weight,
            };
            println!("{}", to_json(&out)?);
        }
        OutputFormat::Dot => {
            let name = format!("{}_path", graph_name(&args.file));
            print!(
                "{}",
                spanwise_dot::edges_to_dot(graph.is_directed(), &edges, &name)
            );
        }
        OutputFormat::Table => {
            let names: Vec<&str> = nodes.iter().map(NodeId::as_str).collect();
            println!("{}", names.join(" -> "));
            println!("{} hops, total weight {}", edges.len(), total_weight);
        }
    }

    Ok(())
}
