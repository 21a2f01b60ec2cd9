//! Table fragments rendered from datasets.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::markup::{self, TabularWriter};

/// Tables with at least this many rows are shrunk to the text width.
pub const DEFAULT_LARGE_TABLE_ROWS: usize = 10;

/// Input to `save_table`: one dataset or several to be joined on their index.
#[derive(Debug, Clone)]
pub enum TableData {
    Single(Dataset),
    Joined(Vec<Dataset>),
}

impl TableData {
    /// Collapse into the dataset that actually gets rendered.
    ///
    /// Fails when several datasets share a repeated row label.
    pub fn into_dataset(self) -> Result<Dataset> {
        match self {
            TableData::Single(ds) => Ok(ds),
            TableData::Joined(list) => Dataset::join(&list),
        }
    }
}

impl From<Dataset> for TableData {
    fn from(ds: Dataset) -> Self {
        TableData::Single(ds)
    }
}

impl From<Vec<Dataset>> for TableData {
    fn from(list: Vec<Dataset>) -> Self {
        TableData::Joined(list)
    }
}

/// Render a self-contained table float.
pub fn render_table_fragment(data: &Dataset, caption: &str, large_table_rows: usize) -> String {
    let large = data.len() >= large_table_rows;

    let mut spec = String::from("{l");
    for col in 0..data.columns().len() {
        spec.push_str(if data.is_numeric_column(col) { " r" } else { " l" });
    }
    spec.push('}');

    let mut header = vec![data.index_name().map(markup::escape).unwrap_or_default()];
    header.extend(data.columns().iter().map(|c| markup::escape(c)));

    let mut tabular = TabularWriter::begin("tabular", &spec);
    tabular.raw(r"\toprule").row(&header).raw(r"\midrule");
    for row in data.rows() {
        let mut cells = vec![markup::escape(&row.index)];
        cells.extend(row.cells.iter().map(|c| markup::escape(&c.to_string())));
        tabular.row(&cells);
    }
    tabular.raw(r"\bottomrule");
    let tabular = tabular.end("tabular");

    let mut out = String::from("\\begin{table}[!ht]\n\\centering\n");
    if large {
        out.push_str("\\setlength{\\tabcolsep}{2pt}\n");
        out.push_str("\\resizebox{0.95\\textwidth}{!}{%\n");
        out.push_str(&tabular);
        out.push_str("}\n");
    } else {
        out.push_str(&tabular);
    }
    if !caption.is_empty() {
        out.push_str(&markup::command("caption", caption));
        out.push('\n');
    }
    out.push_str("\\end{table}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;

    fn sample(rows: usize) -> Dataset {
        let mut ds = Dataset::new(vec!["score", "label"]).with_index_name("id");
        for i in 0..rows {
            ds.push_row(format!("r{}", i), vec![Cell::Number(i as f64 + 0.5), Cell::Text("a_b".to_string())]);
        }
        ds
    }

    #[test]
    fn test_small_table_has_no_resizebox() {
        let out = render_table_fragment(&sample(3), "", DEFAULT_LARGE_TABLE_ROWS);
        assert!(!out.contains("resizebox"));
        assert!(out.contains(r"\begin{tabular}{l r l}"));
        assert!(out.contains(r"id & score & label \\"));
        assert!(out.contains(r"r1 & 1.50 & a\_b \\"));
        assert!(!out.contains("caption"));
    }

    #[test]
    fn test_large_table_threshold_is_inclusive() {
        let out = render_table_fragment(&sample(10), "", DEFAULT_LARGE_TABLE_ROWS);
        assert!(out.contains(r"\resizebox{0.95\textwidth}{!}{%"));
        assert!(out.contains(r"\setlength{\tabcolsep}{2pt}"));

        let out = render_table_fragment(&sample(9), "", DEFAULT_LARGE_TABLE_ROWS);
        assert!(!out.contains("resizebox"));
    }

    #[test]
    fn test_caption_is_appended() {
        let out = render_table_fragment(&sample(1), "Results", DEFAULT_LARGE_TABLE_ROWS);
        assert!(out.contains(r"\caption{Results}"));
        assert!(out.trim_end().ends_with(r"\end{table}"));
    }

    #[test]
    fn test_joined_input_is_collapsed() {
        let mut a = Dataset::new(vec!["x"]);
        a.push_row("r1", vec![1.0.into()]);
        let mut b = Dataset::new(vec!["y"]);
        b.push_row("r2", vec![2.0.into()]);

        let ds = TableData::from(vec![a, b]).into_dataset().unwrap();
        let out = render_table_fragment(&ds, "", DEFAULT_LARGE_TABLE_ROWS);
        assert!(out.contains(r"r1 & 1.00 & 0.00 \\"));
        assert!(out.contains(r"r2 & 0.00 & 2.00 \\"));
    }

    #[test]
    fn test_short_rows_render_one_cell_per_column() {
        let mut ds = Dataset::new(vec!["a", "b"]);
        ds.push_row("r1", vec![1.0.into()]);

        let out = render_table_fragment(&ds, "", DEFAULT_LARGE_TABLE_ROWS);
        assert!(out.contains(r"\begin{tabular}{l r l}"));
        assert!(out.contains("r1 & 1.00 &  \\\\\n"));
    }
}
