/// Appendix mapping tables
///
/// This module handles:
/// - Reading header-less lookup CSVs with 2 or 3 columns
/// - Grouping 2-column tables by category
/// - Rendering each shape with its own table layout
use crate::error::{ReportError, Result};
use crate::markup::{self, TabularWriter};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed mapping table
#[derive(Debug, Clone, PartialEq)]
pub enum MappingTable {
    /// `Original, Category` rows grouped by category (sorted), originals in file order
    Grouped(Vec<(String, Vec<String>)>),
    /// `Lower, Upper, Category` rows, one per input row
    Ranges(Vec<[String; 3]>),
}

impl MappingTable {
    /// Load a header-less CSV. Any shape other than 2 or 3 columns is a usage error.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| ReportError::csv(path, e))?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ReportError::csv(path, e))?;
            records.push(record.iter().map(|f| f.trim().to_string()).collect::<Vec<_>>());
        }

        let columns = records.first().map(|r| r.len()).unwrap_or(0);
        debug!("Mapping table {:?}: {} rows x {} columns", path, records.len(), columns);

        match columns {
            2 => Ok(Self::group(records)),
            3 => Ok(MappingTable::Ranges(
                records.into_iter().map(|r| [r[0].clone(), r[1].clone(), r[2].clone()]).collect(),
            )),
            _ => Err(ReportError::UnsupportedColumnCount { path: path.to_path_buf(), columns }),
        }
    }

    fn group(records: Vec<Vec<String>>) -> Self {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for mut record in records {
            let category = record.pop().unwrap_or_default();
            let original = record.pop().unwrap_or_default();
            groups.entry(category).or_default().push(original);
        }
        MappingTable::Grouped(groups.into_iter().collect())
    }

    pub fn row_count(&self) -> usize {
        match self {
            MappingTable::Grouped(groups) => groups.len(),
            MappingTable::Ranges(rows) => rows.len(),
        }
    }

    /// Render the bold heading line followed by the table.
    pub fn render(&self, heading: &str) -> String {
        let mut out = format!("\\textbf{{{} Mapping Table}}\\\\\n", markup::escape(heading));
        match self {
            MappingTable::Grouped(groups) => {
                let mut t = TabularWriter::begin("xltabular", r"{0.9\textwidth}{l X}");
                t.raw(r"\hline").row(&["Category", "Original"]).raw(r"\hline").raw(r"\endhead");
                t.raw(r"\hline")
                    .raw(r"\multicolumn{2}{r}{Continued on Next Page} \\")
                    .raw(r"\endfoot");
                t.raw(r"\hline")
                    .raw(r"\multicolumn{2}{r}{Not Continued on Next Page} \\")
                    .raw(r"\endlastfoot");
                for (category, originals) in groups {
                    let joined: Vec<String> = originals.iter().map(|o| markup::escape(o)).collect();
                    t.row(&[markup::escape(category), joined.join(", ")]);
                }
                out.push_str(&t.end("xltabular"));
            }
            MappingTable::Ranges(rows) => {
                let mut t = TabularWriter::begin("tabular", "{l l l}");
                t.raw(r"\hline").row(&["Lower", "Upper", "Category"]).raw(r"\hline");
                for row in rows {
                    let cells: Vec<String> = row.iter().map(|c| markup::escape(c)).collect();
                    t.row(&cells);
                }
                t.raw(r"\hline");
                out.push_str(&t.end("tabular"));
            }
        }
        out
    }
}

/// Heading for an appendix table: file stem with underscores as spaces.
pub fn heading_for(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().replace('_', " ")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_two_columns_group_by_category() {
        let temp = TempDir::new().unwrap();
        let path = write_csv(&temp, "drugs.csv", "a,cat1\nb,cat1\nc,cat2\n");

        let table = MappingTable::load(&path).unwrap();
        assert_eq!(
            table,
            MappingTable::Grouped(vec![
                ("cat1".to_string(), vec!["a".to_string(), "b".to_string()]),
                ("cat2".to_string(), vec!["c".to_string()]),
            ])
        );
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_categories_are_sorted() {
        let temp = TempDir::new().unwrap();
        let path = write_csv(&temp, "m.csv", "x,zeta\ny,alpha\n");

        let MappingTable::Grouped(groups) = MappingTable::load(&path).unwrap() else {
            panic!("expected grouped table");
        };
        assert_eq!(groups[0].0, "alpha");
        assert_eq!(groups[1].0, "zeta");
    }

    #[test]
    fn test_three_columns_are_not_grouped() {
        let temp = TempDir::new().unwrap();
        let path = write_csv(&temp, "ranges.csv", "0,10,low\n10,20,low\n20,30,high\n");

        let table = MappingTable::load(&path).unwrap();
        assert_eq!(table.row_count(), 3);
        let out = table.render("ranges");
        assert!(out.contains(r"\begin{tabular}{l l l}"));
        assert!(out.contains(r"Lower & Upper & Category \\"));
        assert!(out.contains(r"10 & 20 & low \\"));
    }

    #[test]
    fn test_four_columns_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_csv(&temp, "wide.csv", "a,b,c,d\n");

        let err = MappingTable::load(&path).unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedColumnCount { columns: 4, .. }));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_csv(&temp, "empty.csv", "");

        let err = MappingTable::load(&path).unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedColumnCount { columns: 0, .. }));
    }

    #[test]
    fn test_grouped_render_has_continuation_footers() {
        let table = MappingTable::Grouped(vec![("cat1".to_string(), vec!["a".to_string(), "b".to_string()])]);
        let out = table.render("drug classes");

        assert!(out.starts_with(r"\textbf{drug classes Mapping Table}\\"));
        assert!(out.contains(r"\begin{xltabular}{0.9\textwidth}{l X}"));
        assert!(out.contains(r"\endhead"));
        assert!(out.contains("{Continued on Next Page}"));
        assert!(out.contains("{Not Continued on Next Page}"));
        assert!(out.contains(r"cat1 & a, b \\"));
    }

    #[test]
    fn test_heading_for() {
        assert_eq!(heading_for(Path::new("/x/drug_class_map.csv")), "drug class map");
    }
}
