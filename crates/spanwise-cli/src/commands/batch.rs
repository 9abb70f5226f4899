//! Batch driver: run the configured algorithms over many graph files

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use spanwise_core::{
    total_weight, Graph, MstAlgorithm, MstEngine, NodeId, Strategy, TraversalEngine,
};

use crate::{graph_name, AppContext, Cli};

#[derive(Args)]
pub struct BatchArgs {
    /// Graph files (default: `graphs` from the config)
    pub files: Vec<PathBuf>,

    /// Output directory (default: `output_dir` from the config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// One algorithm the batch driver can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Traverse(Strategy),
    Mst(MstAlgorithm),
}

impl Algorithm {
    fn parse(name: &str) -> anyhow::Result<Self> {
        if let Ok(strategy) = name.parse::<Strategy>() {
            return Ok(Self::Traverse(strategy));
        }
        if let Ok(algorithm) = name.parse::<MstAlgorithm>() {
            return Ok(Self::Mst(algorithm));
        }
        anyhow::bail!("Unknown algorithm in config: {}", name)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Traverse(s) => s.as_str(),
            Self::Mst(a) => a.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub graphs: Vec<GraphReport>,
}

#[derive(Debug, Default, Serialize)]
pub struct GraphReport {
    pub file: PathBuf,
    /// Prefix of this graph's output files
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub directed: bool,
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub results: Vec<AlgorithmReport>,
}

#[derive(Debug, Serialize)]
pub struct AlgorithmReport {
    pub algorithm: String,
    pub edges: usize,
    pub total_weight: f64,
    pub output: PathBuf,
}

pub async fn run(args: &BatchArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let files = if args.files.is_empty() {
        ctx.config.graphs.clone()
    } else {
        args.files.clone()
    };
    if files.is_empty() {
        anyhow::bail!(
            "No graph files given and none configured (see `spanwise config set graphs`)"
        );
    }

    let algorithms = ctx
        .config
        .algorithms
        .iter()
        .map(|name| Algorithm::parse(name))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| ctx.config.output_dir.clone());
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut report = BatchReport {
        generated_at: Utc::now(),
        seed: ctx.seed,
        graphs: Vec::with_capacity(files.len()),
    };

    for (file, name) in files.iter().zip(output_names(&files)) {
        let graph = match ctx.load_graph(file).await {
            Ok(graph) => graph,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {:#}", file, e);
                report.graphs.push(GraphReport {
                    file: file.clone(),
                    name,
                    error: Some(format!("{:#}", e)),
                    ..Default::default()
                });
                continue;
            }
        };

        let graph_report = run_graph(file, name, &graph, &algorithms, &output_dir, ctx).await?;
        report.graphs.push(graph_report);
    }

    let report_path = output_dir.join("report.json");
    tokio::fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .await
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    if !cli.quiet {
        let failed = report.graphs.iter().filter(|g| g.error.is_some()).count();
        let written: usize = report.graphs.iter().map(|g| g.results.len()).sum();
        println!(
            "Processed {} graph(s), {} failed, {} file(s) written to {}",
            report.graphs.len(),
            failed,
            written,
            output_dir.display()
        );
    }

    Ok(())
}

/// Output prefix per file: the file stem, with `_2`, `_3`, ... appended
/// when an earlier file already claimed it
fn output_names(files: &[PathBuf]) -> Vec<String> {
    let mut used = HashSet::new();
    files
        .iter()
        .map(|file| {
            let stem = graph_name(file);
            let mut name = stem.clone();
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{}_{}", stem, n);
                n += 1;
            }
            name
        })
        .collect()
}

async fn run_graph(
    file: &Path,
    stem: String,
    graph: &Graph,
    algorithms: &[Algorithm],
    output_dir: &Path,
    ctx: &AppContext,
) -> anyhow::Result<GraphReport> {
    let source = match &ctx.config.source {
        Some(id) => Some(NodeId::from(id)).filter(|id| graph.contains_node(id)),
        None => graph.node_ids().next().cloned(),
    };

    let mut results = Vec::new();

    for &algorithm in algorithms {
        let name = format!("{}_{}", stem, algorithm.name());

        let (edges, dot) = match algorithm {
            Algorithm::Traverse(strategy) => {
                let Some(source) = &source else {
                    tracing::warn!("{:?}: no traversal source, skipping {}", file, strategy);
                    continue;
                };
                let tree = TraversalEngine::run(graph, strategy, source)?.tree(graph);
                (tree.edges().to_vec(), spanwise_dot::to_dot(&tree, &name))
            }
            Algorithm::Mst(mst) => {
                let result = MstEngine::run(graph, mst);
                let dot = spanwise_dot::edges_to_dot(graph.is_directed(), &result.edges, &name);
                (result.edges, dot)
            }
        };

        let output = output_dir.join(format!("{}.dot", name));
        tokio::fs::write(&output, dot)
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!("Wrote {:?}", output);

        results.push(AlgorithmReport {
            algorithm: algorithm.name().to_string(),
            edges: edges.len(),
            total_weight: total_weight(&edges),
            output,
        });
    }

    Ok(GraphReport {
        file: file.to_path_buf(),
        name: stem,
        error: None,
        directed: graph.is_directed(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        components: graph.component_count(),
        results,
    })
}
