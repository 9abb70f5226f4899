//! CLI command implementations

pub mod batch;
pub mod completions;
pub mod config;
pub mod info;
pub mod mst;
pub mod path;
pub mod traverse;
