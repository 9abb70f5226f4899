//! Traversal command

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use spanwise_core::{GraphSnapshot, NodeId, Strategy, TraversalEngine, TraversalStats};

use crate::output::{edge_table, to_json, OutputFormat};
use crate::{graph_name, resolve_source, AppContext};

#[derive(Args)]
pub struct TraverseArgs {
    /// Graph file (GraphViz)
    pub file: PathBuf,

    /// Strategy: bfs, dfs-recursive, dfs-iterative
    #[arg(short, long, default_value = "bfs")]
    pub strategy: Strategy,

    /// Source node (default: first node in the file)
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
struct TraverseOutput {
    strategy: Strategy,
    source: NodeId,
    order: Vec<NodeId>,
    tree: GraphSnapshot,
    stats: TraversalStats,
}

pub async fn run(args: &TraverseArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.load_graph(&args.file).await?;
    let source = resolve_source(&graph, args.source.as_deref())?;

    let traversal = TraversalEngine::run(&graph, args.strategy, &source)?;
    let tree = traversal.tree(&graph);

    match ctx.format {
        OutputFormat::Json => {
            let out = TraverseOutput {
                strategy: traversal.strategy,
                source: traversal.source,
                order: traversal.order,
                tree: tree.snapshot(),
                stats: traversal.stats,
            };
            println!("{}", to_json(&out)?);
        }
        OutputFormat::Dot => {
            let name = format!("{}_{}", graph_name(&args.file), args.strategy);
            print!("{}", spanwise_dot::to_dot(&tree, &name));
        }
        OutputFormat::Table => {
            let order: Vec<&str> = traversal.order.iter().map(NodeId::as_str).collect();
            println!("Strategy: {}  Source: {}", args.strategy, source);
            println!("Visit order: {}", order.join(" "));
            println!();
            print!("{}", edge_table(tree.edges()));
            println!();
            println!(
                "{} of {} nodes reached, {} tree edges",
                order.len(),
                graph.node_count(),
                tree.edge_count()
            );
        }
    }

    Ok(())
}
