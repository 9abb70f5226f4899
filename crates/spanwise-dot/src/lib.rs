//! Spanwise Dot - GraphViz import/export
//!
//! Reads and writes the line-oriented GraphViz subset used for graph
//! files: `"<id>" -> "<id>" [label="<weight>"];` for directed graphs and
//! `--` for undirected ones.

pub mod error;
pub mod parser;
pub mod writer;

pub use error::{DotError, DotResult};
pub use parser::{parse, read_file};
pub use writer::{edges_to_dot, to_dot};
