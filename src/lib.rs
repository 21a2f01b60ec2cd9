//! Programmatic LaTeX report assembly.
//!
//! A report project is a directory of persisted fragments (sections, tables,
//! figures, appendix mapping tables). [`Report`] saves fragments idempotently,
//! composes them in a fixed order into one document, and drives an external
//! compiler to render it.
//!
//! ```no_run
//! use texreport::{Report, ReportConfig};
//! use std::path::Path;
//!
//! # fn main() -> texreport::Result<()> {
//! let mut report = Report::new(ReportConfig::new("Demo"));
//! report.initialize()?;
//! report.save_figure("F1", Some(Path::new("in.png")), "Predicted values", "scale=0.5", false)?;
//! report.add_section("Intro", 1, false)?;
//! let result = report.make_report(false, true)?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```

pub mod appendix;
pub mod config;
pub mod dataset;
pub mod document;
pub mod error;
pub mod fragment;
pub mod layout;
pub mod manifest;
pub mod markup;
pub mod render;
pub mod report;

pub use config::ReportConfig;
pub use dataset::{Cell, Dataset};
pub use error::{ReportError, Result};
pub use fragment::{SaveOutcome, TableData};
pub use render::{RenderMode, RenderResult};
pub use report::Report;
