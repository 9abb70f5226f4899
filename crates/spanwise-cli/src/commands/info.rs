//! Graph summary command

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use spanwise_core::total_weight;

use crate::output::{table, to_json, OutputFormat};
use crate::{graph_name, AppContext};

#[derive(Args)]
pub struct InfoArgs {
    /// Graph file (GraphViz)
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct GraphInfo {
    pub name: String,
    pub directed: bool,
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub total_weight: f64,
}

pub async fn run(args: &InfoArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.load_graph(&args.file).await?;

    let info = GraphInfo {
        name: graph_name(&args.file),
        directed: graph.is_directed(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        components: graph.component_count(),
        total_weight: total_weight(graph.edges()),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&info)?),
        OutputFormat::Dot => print!("{}", spanwise_dot::to_dot(&graph, &info.name)),
        OutputFormat::Table => {
            let rows = vec![
                vec!["name".to_string(), info.name.clone()],
                vec!["directed".to_string(), info.directed.to_string()],
                vec!["nodes".to_string(), info.nodes.to_string()],
                vec!["edges".to_string(), info.edges.to_string()],
                vec!["components".to_string(), info.components.to_string()],
                vec!["total weight".to_string(), info.total_weight.to_string()],
            ];
            print!("{}", table(&["PROPERTY", "VALUE"], &rows));
        }
    }

    Ok(())
}
