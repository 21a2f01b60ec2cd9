//! Fragment rendering and bookkeeping.
//!
//! A fragment is a persisted, independently renderable piece of the report:
//! a section, a table, a figure or an appendix mapping table. This module
//! holds the pure parts of the fragment store:
//!
//! - [`section`] - heading levels, placeholder text, the ordered section registry
//! - [`table`] - rendering datasets into table floats
//! - [`figure`] - per-run figure metadata and figure blocks
//!
//! Every save operation shares one contract: write only if the target is
//! absent, unless an override is requested. [`SaveOutcome`] reports which
//! branch was taken.

pub mod figure;
pub mod section;
pub mod table;

pub use figure::{FigureCatalog, FigureMeta};
pub use section::{SectionEntry, SectionLevel, SectionRegistry};
pub use table::TableData;

use serde::Serialize;
use std::path::Path;

/// What a save operation did to the persisted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SaveOutcome {
    /// Target was absent and has been written
    Written,
    /// Target existed and was rewritten because override was requested
    Overwritten,
    /// Target exists and no override was requested
    SkippedExisting,
    /// Caller passed an empty dataset; nothing was written
    SkippedEmpty,
    /// No source was given and no target exists yet
    NotFound,
}

impl SaveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveOutcome::Written => "written",
            SaveOutcome::Overwritten => "overwritten",
            SaveOutcome::SkippedExisting => "skipped (exists)",
            SaveOutcome::SkippedEmpty => "skipped (empty)",
            SaveOutcome::NotFound => "not found",
        }
    }

    /// True when the artifact on disk was (re)written
    pub fn wrote(&self) -> bool {
        matches!(self, SaveOutcome::Written | SaveOutcome::Overwritten)
    }
}

/// Decide how a write to `target` should go under the idempotency contract.
///
/// Returns `None` when the write must be skipped.
pub fn write_decision(target: &Path, override_existing: bool) -> Option<SaveOutcome> {
    if !target.exists() {
        Some(SaveOutcome::Written)
    } else if override_existing {
        Some(SaveOutcome::Overwritten)
    } else {
        None
    }
}
