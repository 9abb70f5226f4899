//! Output formatting utilities

use serde::Serialize;
use spanwise_core::Edge;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Dot,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "dot" => Self::Dot,
            _ => Self::Table,
        }
    }
}

/// Pretty JSON for any serializable result
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Plain-text table with left-aligned columns
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    for row in [&header, &rule].into_iter().chain(rows) {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// Edge list as a FROM/TO/WEIGHT table
pub fn edge_table(edges: &[Edge]) -> String {
    let rows: Vec<Vec<String>> = edges
        .iter()
        .map(|e| vec![e.from.to_string(), e.to.to_string(), e.weight.to_string()])
        .collect();
    table(&["FROM", "TO", "WEIGHT"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("dot"), OutputFormat::Dot);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Table);
    }

    #[test]
    fn test_edge_table() {
        let edges = vec![Edge::new("B", "C", 2.0), Edge::new("A", "B", 4.0)];
        let out = edge_table(&edges);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "FROM  TO  WEIGHT");
        assert_eq!(lines[1], "----  --  ------");
        assert_eq!(lines[2], "B     C   2");
        assert_eq!(lines[3], "A     B   4");
    }
}
