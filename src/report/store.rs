//! Fragment store: idempotent save operations.
//!
//! Every operation writes only if the target is absent, unless override is
//! requested, and reports what happened as a [`SaveOutcome`].

use super::Report;
use crate::appendix::MappingTable;
use crate::error::{ReportError, Result};
use crate::fragment::section::{self, SectionLevel};
use crate::fragment::table::{self, TableData};
use crate::fragment::{FigureMeta, SaveOutcome, write_decision};
use crate::layout::Subdir;
use log::{error, info, warn};
use std::fs;
use std::path::Path;

impl Report {
    /// Persist a dataset (or several joined on their index) as `tables/<name>.tex`.
    pub fn save_table(
        &mut self,
        name: &str,
        data: impl Into<TableData>,
        caption: &str,
        override_existing: bool,
    ) -> Result<SaveOutcome> {
        let target = self.layout.table_path(name);
        let data = data.into().into_dataset().inspect_err(|e| error!("Table {}: {}", name, e))?;

        if data.is_empty() {
            warn!("Table {} has no rows; nothing written.", name);
            return Ok(SaveOutcome::SkippedEmpty);
        }

        let Some(outcome) = write_decision(&target, override_existing) else {
            warn!("{} already exists in {}. No override instruction was given.", name, target.display());
            return Ok(SaveOutcome::SkippedExisting);
        };

        let fragment = table::render_table_fragment(&data, caption, self.config.large_table_rows);
        fs::write(&target, fragment).map_err(|e| ReportError::io(&target, e))?;
        info!("Written {}.tex to {}", name, target.display());
        Ok(outcome)
    }

    /// Copy an image into `figures/<name>.png` and record its caption/option.
    ///
    /// The metadata record is updated whatever happens to the copy.
    pub fn save_figure(
        &mut self,
        name: &str,
        source: Option<&Path>,
        caption: &str,
        option: &str,
        override_existing: bool,
    ) -> Result<SaveOutcome> {
        let source = source.filter(|s| !s.as_os_str().is_empty());
        self.figures.upsert(FigureMeta {
            name: name.to_string(),
            source: source.map(Path::to_path_buf),
            caption: caption.to_string(),
            option: option.to_string(),
        });

        let target = self.layout.figure_path(name);
        let Some(source) = source else {
            if target.exists() {
                info!("{} already exists in {}; keeping it.", name, target.display());
                return Ok(SaveOutcome::SkippedExisting);
            }
            warn!("No input path provided for {}. Image not found.", name);
            return Ok(SaveOutcome::NotFound);
        };

        let Some(outcome) = write_decision(&target, override_existing) else {
            warn!("{} already exists in {}. No override instruction was given.", name, target.display());
            return Ok(SaveOutcome::SkippedExisting);
        };

        if !source.is_file() {
            return Err(ReportError::MissingInput { kind: "figure source", path: source.to_path_buf() });
        }
        fs::copy(source, &target).map_err(|e| ReportError::io(&target, e))?;
        match outcome {
            SaveOutcome::Overwritten => info!("Overriding {}.png at {}", name, target.display()),
            _ => info!("Copying {}.png to {}", name, target.display()),
        }
        Ok(outcome)
    }

    /// Create a placeholder section file and register the section for composition.
    ///
    /// An invalid level is a usage error: nothing is written or registered.
    pub fn add_section(&mut self, name: &str, level: u8, override_existing: bool) -> Result<SaveOutcome> {
        let level = SectionLevel::from_level(name, level).inspect_err(|e| error!("{}", e))?;
        let target = self.layout.section_path(name);

        let outcome = match write_decision(&target, override_existing) {
            Some(outcome) => {
                fs::write(&target, section::render_placeholder(name, level))
                    .map_err(|e| ReportError::io(&target, e))?;
                info!("Created section {} at {}", name, target.display());
                outcome
            }
            None => {
                info!("{} already exists. Did not override.", target.display());
                SaveOutcome::SkippedExisting
            }
        };

        self.sections.register(name, target, level, outcome == SaveOutcome::Overwritten);
        Ok(outcome)
    }

    /// Copy a mapping-table CSV into `mappingTables/`, keeping its file name.
    ///
    /// The CSV is validated first, so an unsupported shape never lands in the appendix.
    pub fn save_mapping_table(&mut self, source: &Path, override_existing: bool) -> Result<SaveOutcome> {
        let Some(file_name) = source.file_name() else {
            return Err(ReportError::MissingInput { kind: "mapping table", path: source.to_path_buf() });
        };
        if !source.is_file() {
            return Err(ReportError::MissingInput { kind: "mapping table", path: source.to_path_buf() });
        }
        let target = self.layout.dir(Subdir::MappingTables).join(file_name);

        let Some(outcome) = write_decision(&target, override_existing) else {
            warn!("{} already exists. No override instruction was given.", target.display());
            return Ok(SaveOutcome::SkippedExisting);
        };

        MappingTable::load(source)?;
        fs::copy(source, &target).map_err(|e| ReportError::io(&target, e))?;
        info!("Copied mapping table to {}", target.display());
        Ok(outcome)
    }
}
