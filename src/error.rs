//! Error types for report assembly.
//!
//! Usage errors (bad section level, unsupported appendix shape) are kept
//! apart from I/O and render failures so callers can log-and-skip them
//! without aborting a whole report.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid section level {level} for '{name}' (expected 1, 2 or 3)")]
    InvalidSectionLevel { name: String, level: u8 },

    #[error("unsupported column count {columns} in mapping table {} (expected 2 or 3)", .path.display())]
    UnsupportedColumnCount { path: PathBuf, columns: usize },

    #[error("row index '{index}' appears more than once; datasets with repeated labels cannot be joined")]
    DuplicateIndex { index: String },

    #[error("{kind} not found: {}", .path.display())]
    MissingInput { kind: &'static str, path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{program} failed ({status}): {diagnostic}")]
    RenderFailed { program: String, status: String, diagnostic: String },
}

impl ReportError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        ReportError::Io { path: path.to_path_buf(), source }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        ReportError::Csv { path: path.to_path_buf(), source }
    }

    /// True for caller mistakes that must never degrade into a best-effort fragment.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidSectionLevel { .. }
                | ReportError::UnsupportedColumnCount { .. }
                | ReportError::DuplicateIndex { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_classification() {
        let level = ReportError::InvalidSectionLevel { name: "Intro".to_string(), level: 4 };
        let shape = ReportError::UnsupportedColumnCount { path: PathBuf::from("m.csv"), columns: 4 };
        let missing = ReportError::MissingInput { kind: "table", path: PathBuf::from("t.tex") };

        assert!(level.is_usage_error());
        assert!(shape.is_usage_error());
        assert!(!missing.is_usage_error());
    }

    #[test]
    fn test_messages_name_the_problem() {
        let shape = ReportError::UnsupportedColumnCount { path: PathBuf::from("m.csv"), columns: 4 };
        let msg = shape.to_string();
        assert!(msg.contains("unsupported column count 4"));
        assert!(msg.contains("m.csv"));
    }
}
