//! Spanning tree command

use std::path::PathBuf;

use clap::Args;
use spanwise_core::{MstAlgorithm, MstEngine};

use crate::output::{edge_table, to_json, OutputFormat};
use crate::{graph_name, AppContext};

#[derive(Args)]
pub struct MstArgs {
    /// Graph file (GraphViz)
    pub file: PathBuf,

    /// Algorithm: kruskal-min, kruskal-max, prim
    #[arg(short, long, default_value = "kruskal-min")]
    pub algorithm: MstAlgorithm,
}

pub async fn run(args: &MstArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.load_graph(&args.file).await?;
    let result = MstEngine::run(&graph, args.algorithm);

    if graph.is_directed() {
        tracing::warn!("Spanning trees ignore edge direction when joining components");
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&result)?),
        OutputFormat::Dot => {
            let name = format!("{}_{}", graph_name(&args.file), args.algorithm);
            print!(
                "{}",
                spanwise_dot::edges_to_dot(graph.is_directed(), &result.edges, &name)
            );
        }
        OutputFormat::Table => {
            println!("Algorithm: {}", result.algorithm);
            println!();
            print!("{}", edge_table(&result.edges));
            println!();
            println!(
                "{} edges, total weight {}",
                result.edges.len(),
                result.total_weight
            );
        }
    }

    Ok(())
}
