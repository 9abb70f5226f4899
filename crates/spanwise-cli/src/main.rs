//! Spanwise CLI - Command line interface for the graph engine

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use spanwise_core::{Graph, NodeId};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{batch, completions, info, mst, path, traverse};
use config::{config_file_path, Config};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "spanwise")]
#[command(author, version, about = "Traversals and spanning trees for GraphViz graphs")]
pub struct Cli {
    /// Output format: table, json, dot (default from config)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "SPANWISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for random default edge weights
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise a graph file
    Info(info::InfoArgs),
    /// Build a BFS or DFS spanning tree
    Traverse(traverse::TraverseArgs),
    /// Build a minimum or maximum spanning tree
    Mst(mst::MstArgs),
    /// Find the tree path between two nodes
    Path(path::PathArgs),
    /// Run the configured algorithms over many graph files
    Batch(batch::BatchArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with resolved configuration
pub struct AppContext {
    pub config: Config,
    pub seed: Option<u64>,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli.config_path();
        tracing::debug!("Using config at: {:?}", config_path);

        let config = Config::load(&config_path)?;
        let seed = cli.seed.or(config.seed);
        let format = OutputFormat::from(cli.format.as_deref().unwrap_or(&config.format));

        Ok(Self {
            config,
            seed,
            format,
        })
    }

    /// Read and parse a GraphViz file
    pub async fn load_graph(&self, path: &Path) -> anyhow::Result<Graph> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let graph = spanwise_dot::parse(&text, self.seed)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!(
            "Loaded {:?}: {} nodes, {} edges",
            path,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// The requested node, or the graph's first node when none is given
pub fn resolve_source(graph: &Graph, source: Option<&str>) -> anyhow::Result<NodeId> {
    match source {
        Some(id) => Ok(NodeId::from(id)),
        None => graph
            .node_ids()
            .next()
            .cloned()
            .context("Graph has no nodes"),
    }
}

/// File stem used to name outputs derived from `path`
pub fn graph_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting spanwise CLI");

    match &cli.command {
        Commands::Completions(args) => return completions::run(args),
        Commands::Config(args) => return commands::config::run(args, &cli.config_path()),
        _ => {}
    }

    let ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Info(args) => info::run(args, &ctx).await?,
        Commands::Traverse(args) => traverse::run(args, &ctx).await?,
        Commands::Mst(args) => mst::run(args, &ctx).await?,
        Commands::Path(args) => path::run(args, &ctx).await?,
        Commands::Batch(args) => batch::run(args, &cli, &ctx).await?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
