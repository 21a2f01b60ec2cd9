//! Document assembly: appending text, fragments and the appendix.

use super::Report;
use crate::appendix::{self, MappingTable};
use crate::error::{ReportError, Result};
use crate::fragment::figure;
use crate::layout::{ProjectLayout, Subdir};
use crate::markup;
use log::{debug, info, warn};

impl Report {
    /// Append raw markup verbatim. No validation is done.
    pub fn add_text(&mut self, text: &str) {
        self.doc.append(text);
    }

    /// Append an `\input` for a persisted table fragment, e.g. `summary.tex`.
    pub fn add_table_fragment(&mut self, file_name: &str) -> Result<()> {
        let path = self.layout.dir(Subdir::Tables).join(file_name);
        if !path.is_file() {
            return Err(ReportError::MissingInput { kind: "table", path });
        }
        self.doc.append(markup::input(&ProjectLayout::relative_ref(Subdir::Tables, file_name)));
        info!("Added {} to the document", file_name);
        Ok(())
    }

    /// Append a figure block for a persisted image, e.g. `F1.png`.
    ///
    /// Uses the caption and option recorded by `save_figure` during this run
    /// when there is one; otherwise the default width and no caption.
    pub fn add_figure_fragment(&mut self, file_name: &str) -> Result<()> {
        let path = self.layout.dir(Subdir::Figures).join(file_name);
        if !path.is_file() {
            return Err(ReportError::MissingInput { kind: "figure", path });
        }
        let image_ref = ProjectLayout::relative_ref(Subdir::Figures, file_name);
        let block = figure::render_figure_block(&image_ref, self.figures.get(file_name));
        self.doc.append(block);
        info!("Added {} to the document", file_name);
        Ok(())
    }

    /// Append every mapping table in `mappingTables/` under an Appendix heading.
    ///
    /// Tables that fail to load are logged and skipped. Returns how many were added.
    pub fn add_appendix(&mut self) -> Result<usize> {
        let files = self.layout.list_files(Subdir::MappingTables, "csv")?;
        if files.is_empty() {
            return Ok(0);
        }

        self.doc.append(r"\clearpage");
        self.doc.append(r"\section*{Appendix}");

        let dir = self.layout.dir(Subdir::MappingTables);
        let mut added = 0;
        for file in &files {
            let path = dir.join(file);
            match MappingTable::load(&path) {
                Ok(table) => {
                    debug!("Appendix table {} has {} rows", file, table.row_count());
                    self.doc.append(table.render(&appendix::heading_for(&path)));
                    added += 1;
                }
                Err(e) => warn!("Skipping appendix table {}: {}", file, e),
            }
        }
        info!("Added {} of {} appendix tables", added, files.len());
        Ok(added)
    }
}
