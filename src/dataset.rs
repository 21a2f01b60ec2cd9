/// Row-indexed tabular data
///
/// This module defines the in-memory table handed over by analysis scripts:
/// - A row index (labels) plus named columns
/// - Loading from a CSV file with a header row
/// - Column-wise outer join of several datasets on their row index
use crate::error::{ReportError, Result};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Parse a raw string: numbers become `Number`, blanks become `Empty`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Number(_))
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// Numbers always print with two decimals.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{:.2}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: String,
    pub cells: Vec<Cell>,
}

/// Rows always hold exactly one cell per column; `push_row` enforces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    index_name: Option<String>,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self { index_name: None, columns: columns.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    pub fn with_index_name(mut self, name: &str) -> Self {
        self.index_name = Some(name.to_string());
        self
    }

    /// Append a row. Short rows are padded with `Empty`, long rows truncated.
    pub fn push_row(&mut self, index: impl Into<String>, cells: Vec<Cell>) {
        let mut cells = cells;
        cells.resize(self.columns.len(), Cell::Empty);
        self.rows.push(Row { index: index.into(), cells });
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when every non-empty cell of the column is numeric.
    pub fn is_numeric_column(&self, col: usize) -> bool {
        let mut seen = false;
        for row in &self.rows {
            match row.cells.get(col) {
                Some(Cell::Number(_)) => seen = true,
                Some(Cell::Text(_)) => return false,
                Some(Cell::Empty) | None => {}
            }
        }
        seen
    }

    /// Load a CSV file whose first column is the row index.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| ReportError::csv(path, e))?;

        let headers = reader.headers().map_err(|e| ReportError::csv(path, e))?.clone();
        let mut header_iter = headers.iter();
        let index_name = header_iter.next().map(|h| h.trim().to_string()).filter(|h| !h.is_empty());
        let columns: Vec<String> = header_iter.map(|h| h.trim().to_string()).collect();

        let mut dataset = Dataset { index_name, columns, rows: Vec::new() };
        for record in reader.records() {
            let record = record.map_err(|e| ReportError::csv(path, e))?;
            if record.len() > headers.len() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                warn!(
                    "{}: line {} has {} fields but the header has {}; extra fields dropped",
                    path.display(),
                    line,
                    record.len(),
                    headers.len()
                );
            }
            let mut fields = record.iter();
            let index = fields.next().unwrap_or_default().trim().to_string();
            let cells = fields.map(Cell::parse).collect();
            dataset.push_row(index, cells);
        }

        debug!("Loaded {} rows x {} columns from {:?}", dataset.len(), dataset.columns.len(), path);
        Ok(dataset)
    }

    /// Join datasets column-wise on their row index.
    ///
    /// Index labels keep first-seen order across the inputs. Every missing
    /// cell, whether a dataset has no row for a label or the cell was blank,
    /// becomes `Number(0.0)`. Columns are concatenated as given, duplicates
    /// included.
    ///
    /// A single dataset keeps repeated labels as separate rows. With several
    /// datasets a repeated label is ambiguous and is rejected.
    pub fn join(datasets: &[Dataset]) -> Result<Dataset> {
        let mut joined = Dataset {
            index_name: datasets.iter().find_map(|d| d.index_name.clone()),
            columns: datasets.iter().flat_map(|d| d.columns.iter().cloned()).collect(),
            rows: Vec::new(),
        };

        if let [only] = datasets {
            joined.rows =
                only.rows.iter().map(|row| Row { index: row.index.clone(), cells: zero_filled(&row.cells) }).collect();
            return Ok(joined);
        }

        for dataset in datasets {
            let mut seen = HashSet::new();
            if let Some(row) = dataset.rows.iter().find(|row| !seen.insert(row.index.as_str())) {
                return Err(ReportError::DuplicateIndex { index: row.index.clone() });
            }
        }

        let mut positions: HashMap<String, usize> = HashMap::new();
        for dataset in datasets {
            for row in &dataset.rows {
                if !positions.contains_key(&row.index) {
                    positions.insert(row.index.clone(), joined.rows.len());
                    joined.rows.push(Row { index: row.index.clone(), cells: Vec::new() });
                }
            }
        }

        let mut offset = 0;
        for dataset in datasets {
            let width = dataset.columns.len();
            for row in &mut joined.rows {
                row.cells.resize(offset + width, Cell::Number(0.0));
            }
            for row in &dataset.rows {
                let target = &mut joined.rows[positions[&row.index]];
                for (i, cell) in zero_filled(&row.cells).into_iter().enumerate().take(width) {
                    target.cells[offset + i] = cell;
                }
            }
            offset += width;
        }

        Ok(joined)
    }
}

fn zero_filled(cells: &[Cell]) -> Vec<Cell> {
    cells
        .iter()
        .map(|c| match c {
            Cell::Empty => Cell::Number(0.0),
            other => other.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse("1.5"), Cell::Number(1.5));
        assert_eq!(Cell::parse(" 3 "), Cell::Number(3.0));
        assert_eq!(Cell::parse("abc"), Cell::Text("abc".to_string()));
        assert_eq!(Cell::parse(""), Cell::Empty);
        assert_eq!(Cell::parse("NaN"), Cell::Text("NaN".to_string()));
    }

    #[test]
    fn test_numbers_display_with_two_decimals() {
        assert_eq!(Cell::Number(1.0).to_string(), "1.00");
        assert_eq!(Cell::Number(2.345).to_string(), "2.35");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_join_shared_index_unions_columns() {
        let mut a = Dataset::new(vec!["x"]);
        a.push_row("r1", vec![1.0.into()]);
        a.push_row("r2", vec![2.0.into()]);
        let mut b = Dataset::new(vec!["y"]);
        b.push_row("r1", vec![3.0.into()]);
        b.push_row("r2", vec![4.0.into()]);

        let joined = Dataset::join(&[a, b]).unwrap();
        assert_eq!(joined.columns(), ["x", "y"]);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined.rows[0].cells, vec![Cell::Number(1.0), Cell::Number(3.0)]);
        assert_eq!(joined.rows[1].cells, vec![Cell::Number(2.0), Cell::Number(4.0)]);
    }

    #[test]
    fn test_join_fills_missing_cells_with_zero() {
        let mut a = Dataset::new(vec!["x"]);
        a.push_row("r1", vec![1.0.into()]);
        let mut b = Dataset::new(vec!["y"]);
        b.push_row("r2", vec![5.0.into()]);

        let joined = Dataset::join(&[a, b]).unwrap();
        let indexes: Vec<&str> = joined.rows.iter().map(|r| r.index.as_str()).collect();
        assert_eq!(indexes, vec!["r1", "r2"]);
        assert_eq!(joined.rows[0].cells, vec![Cell::Number(1.0), Cell::Number(0.0)]);
        assert_eq!(joined.rows[1].cells, vec![Cell::Number(0.0), Cell::Number(5.0)]);
    }

    #[test]
    fn test_from_csv_uses_first_column_as_index() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.csv");
        fs::write(&path, "patient,score,group\np1,1.5,a\np2,2,b\n").unwrap();

        let ds = Dataset::from_csv(&path).unwrap();
        assert_eq!(ds.index_name(), Some("patient"));
        assert_eq!(ds.columns(), ["score", "group"]);
        assert_eq!(ds.rows[1].index, "p2");
        assert_eq!(ds.rows[1].cells, vec![Cell::Number(2.0), Cell::Text("b".to_string())]);
        assert!(ds.is_numeric_column(0));
        assert!(!ds.is_numeric_column(1));
    }

    #[test]
    fn test_from_csv_missing_file_is_error() {
        let err = Dataset::from_csv(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, ReportError::Csv { .. }));
    }

    #[test]
    fn test_join_single_dataset_keeps_repeated_labels() {
        let mut a = Dataset::new(vec!["x"]);
        a.push_row("r1", vec![1.0.into()]);
        a.push_row("r1", vec![2.0.into()]);

        let joined = Dataset::join(&[a]).unwrap();
        assert_eq!(joined.len(), 2);
        assert_eq!(joined.rows[0].cells, vec![Cell::Number(1.0)]);
        assert_eq!(joined.rows[1].cells, vec![Cell::Number(2.0)]);
    }

    #[test]
    fn test_join_rejects_repeated_labels_across_datasets() {
        let mut a = Dataset::new(vec!["x"]);
        a.push_row("r1", vec![1.0.into()]);
        a.push_row("r1", vec![2.0.into()]);
        let mut b = Dataset::new(vec!["y"]);
        b.push_row("r1", vec![3.0.into()]);

        let err = Dataset::join(&[a, b]).unwrap_err();
        assert!(matches!(err, ReportError::DuplicateIndex { ref index } if index == "r1"));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_join_zero_fills_blank_csv_cells() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blank.csv");
        fs::write(&path, "id,x\nr1,\n").unwrap();
        let a = Dataset::from_csv(&path).unwrap();
        assert_eq!(a.rows[0].cells, vec![Cell::Empty]);
        let mut b = Dataset::new(vec!["y"]);
        b.push_row("r1", vec![1.0.into()]);

        let joined = Dataset::join(&[a, b]).unwrap();
        assert_eq!(joined.rows[0].cells, vec![Cell::Number(0.0), Cell::Number(1.0)]);
    }

    #[test]
    fn test_from_csv_drops_fields_beyond_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wide.csv");
        fs::write(&path, "id,x\nr1,1,99\nr2,2\n").unwrap();

        let ds = Dataset::from_csv(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].cells, vec![Cell::Number(1.0)]);
    }

    #[test]
    fn test_numeric_column_out_of_range_is_not_numeric() {
        let mut ds = Dataset::new(vec!["x"]);
        ds.push_row("r1", vec![1.0.into()]);
        assert!(ds.is_numeric_column(0));
        assert!(!ds.is_numeric_column(5));
    }
}
