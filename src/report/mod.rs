//! Report project: fragment store plus document assembler.
//!
//! A [`Report`] owns one project directory, the in-memory section registry,
//! the per-run figure metadata, and the document being composed.
//!
//! # Module Organization
//!
//! - `store` - idempotent save operations (tables, figures, sections, mapping tables)
//! - `compose` - appending fragments to the document, appendix generation
//!
//! # Composition order
//!
//! ```text
//! \maketitle
//! sections      registry order (call order during this run)
//! Figures       *.png in figures/, sorted by file name    (skipped with sections_only)
//! Tables        *.tex in tables/, sorted by file name     (skipped with sections_only)
//! Appendix      *.csv in mappingTables/, sorted by file name
//! ```
//!
//! Sections registered in an earlier process are not composed: the registry
//! is never reloaded from disk.

mod compose;
mod store;

use crate::config::ReportConfig;
use crate::document::{Document, Preamble};
use crate::error::Result;
use crate::fragment::{FigureCatalog, SectionRegistry};
use crate::layout::{ProjectLayout, Subdir};
use crate::markup;
use crate::render::{self, RenderResult};
use log::{debug, info, warn};

pub struct Report {
    config: ReportConfig,
    layout: ProjectLayout,
    doc: Document,
    sections: SectionRegistry,
    figures: FigureCatalog,
}

impl Report {
    pub fn new(config: ReportConfig) -> Self {
        let layout = ProjectLayout::new(&config.base_dir, &config.name);
        let doc = new_document(&config);
        Self { config, layout, doc, sections: SectionRegistry::new(), figures: FigureCatalog::new() }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn sections(&self) -> &SectionRegistry {
        &self.sections
    }

    pub fn figures(&self) -> &FigureCatalog {
        &self.figures
    }

    /// Create the project skeleton (idempotent) and start a clean document.
    pub fn initialize(&mut self) -> Result<()> {
        self.layout.initialize()?;
        self.reset_doc();
        info!(">> {} report structure has been initialized.", self.config.name);
        Ok(())
    }

    /// Discard all composed content and reinstall preamble and title block.
    pub fn reset_doc(&mut self) {
        self.doc = new_document(&self.config);
    }

    /// Compose the full document source without rendering it.
    pub fn compose(&mut self, sections_only: bool) -> Result<String> {
        self.reset_doc();

        let entries = self.sections.entries().to_vec();
        for entry in &entries {
            let file_name = entry.path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
            self.doc.append(markup::input(&ProjectLayout::relative_ref(Subdir::Sections, &file_name)));
        }
        if self.sections.is_empty() {
            warn!("No sections registered in this run; the document has no section inputs");
        } else {
            debug!("Composed {} sections", self.sections.len());
        }

        if !sections_only {
            let figures = self.layout.list_files(Subdir::Figures, "png")?;
            if !figures.is_empty() {
                self.doc.append(markup::command("section", "Figures"));
                for fig in &figures {
                    if let Err(e) = self.add_figure_fragment(fig) {
                        warn!("Skipping figure {}: {}", fig, e);
                    }
                }
            }

            let tables = self.layout.list_files(Subdir::Tables, "tex")?;
            if !tables.is_empty() {
                self.doc.append(markup::command("section", "Tables"));
                for tbl in &tables {
                    if let Err(e) = self.add_table_fragment(tbl) {
                        warn!("Skipping table {}: {}", tbl, e);
                    }
                }
            }
        }

        self.add_appendix()?;
        Ok(self.doc.render())
    }

    /// Compose the document and hand it to the render driver.
    pub fn make_report(&mut self, sections_only: bool, tex_only: bool) -> Result<RenderResult> {
        let source = self.compose(sections_only)?;
        render::compile(&self.layout.output_path("tex"), &source, tex_only, &self.config.render)
    }
}

fn new_document(config: &ReportConfig) -> Document {
    let preamble =
        Preamble { title: config.title.clone(), author: config.author.clone(), date: config.date.clone() };
    Document::new(&config.document_class, &config.packages, preamble)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report(temp: &TempDir) -> Report {
        let mut report = Report::new(ReportConfig::new("Demo").with_base_dir(temp.path()));
        report.initialize().unwrap();
        report
    }

    #[test]
    fn test_initialize_twice_is_fine() {
        let temp = TempDir::new().unwrap();
        let mut report = report(&temp);
        report.initialize().unwrap();
        assert!(report.layout().is_initialized());
    }

    #[test]
    fn test_reset_doc_clears_content() {
        let temp = TempDir::new().unwrap();
        let mut report = report(&temp);
        report.add_text("hello");
        assert_eq!(report.document().blocks().len(), 2);

        report.reset_doc();
        assert_eq!(report.document().blocks(), &[r"\maketitle".to_string()]);
    }

    #[test]
    fn test_compose_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let mut report = report(&temp);
        report.add_section("Intro", 1, false).unwrap();

        let first = report.compose(false).unwrap();
        let second = report.compose(false).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.matches(r"\input{../sections/Intro.tex}").count(), 1);
    }

    #[test]
    fn test_sections_follow_registration_order() {
        let temp = TempDir::new().unwrap();
        let mut report = report(&temp);
        for name in ["Intro", "Data", "Conclusion"] {
            report.add_section(name, 1, false).unwrap();
        }

        let src = report.compose(true).unwrap();
        let intro = src.find("sections/Intro.tex").unwrap();
        let data = src.find("sections/Data.tex").unwrap();
        let conclusion = src.find("sections/Conclusion.tex").unwrap();
        assert!(intro < data && data < conclusion);
    }

    #[test]
    fn test_sections_from_disk_are_not_composed() {
        let temp = TempDir::new().unwrap();
        {
            let mut earlier = report(&temp);
            earlier.add_section("Intro", 1, false).unwrap();
        }
        let mut later = report(&temp);
        let src = later.compose(true).unwrap();
        assert!(!src.contains("sections/Intro.tex"));
    }

    #[test]
    fn test_sections_only_skips_figures_and_tables() {
        let temp = TempDir::new().unwrap();
        let mut report = report(&temp);
        std::fs::write(report.layout().figure_path("F1"), b"png").unwrap();
        std::fs::write(report.layout().table_path("T1"), "table").unwrap();

        let src = report.compose(true).unwrap();
        assert!(!src.contains(r"\section{Figures}"));
        assert!(!src.contains(r"\section{Tables}"));

        let src = report.compose(false).unwrap();
        assert!(src.contains(r"\section{Figures}"));
        assert!(src.contains(r"\input{../tables/T1.tex}"));
    }
}
