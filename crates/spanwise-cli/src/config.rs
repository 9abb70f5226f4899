//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default location of the config file
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spanwise")
        .join("config.toml")
}

fn default_algorithms() -> Vec<String> {
    [
        "bfs",
        "dfs-recursive",
        "dfs-iterative",
        "kruskal-min",
        "kruskal-max",
        "prim",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for random default edge weights; OS entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Directory the batch driver writes results into
    pub output_dir: PathBuf,

    /// Default output format: table, json, dot
    pub format: String,

    /// Traversal source for batch runs; first node of each graph when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Graph files processed by `spanwise batch` when none are given
    pub graphs: Vec<PathBuf>,

    /// Algorithms run per graph by `spanwise batch`
    pub algorithms: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            output_dir: PathBuf::from("out"),
            format: "table".to_string(),
            source: None,
            graphs: Vec::new(),
            algorithms: default_algorithms(),
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["seed", "output_dir", "format", "source", "graphs", "algorithms"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "seed" => self.seed.map(|s| s.to_string()),
            "output_dir" => Some(self.output_dir.display().to_string()),
            "format" => Some(self.format.clone()),
            "source" => self.source.clone(),
            "graphs" => Some(
                self.graphs
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "algorithms" => Some(self.algorithms.join(",")),
            _ => None,
        }
    }

    /// Set a key from its string form. Lists are comma separated; an empty
    /// value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        match key {
            "seed" => {
                self.seed = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().with_context(|| format!("Invalid seed: {}", value))?)
                }
            }
            "output_dir" => self.output_dir = PathBuf::from(value),
            "format" => {
                if !["table", "json", "dot"].contains(&value) {
                    anyhow::bail!("Invalid format '{}': expected table, json or dot", value);
                }
                self.format = value.to_string();
            }
            "source" => self.source = (!value.is_empty()).then(|| value.to_string()),
            "graphs" => self.graphs = split_list(value).map(PathBuf::from).collect(),
            "algorithms" => self.algorithms = split_list(value).map(String::from).collect(),
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}
