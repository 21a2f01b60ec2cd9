/// Config-driven report builds
///
/// This module handles:
/// - Applying the section/figure/table/appendix lists of a `ReportConfig`
/// - Loading table CSVs into datasets
/// - Logging and skipping items that fail, so one bad entry never aborts the build
use crate::dataset::Dataset;
use crate::error::Result;
use crate::fragment::SaveOutcome;
use crate::report::Report;
use log::{debug, error, warn};
use serde::Serialize;

/// What happened to one manifest entry
#[derive(Debug, Clone, Serialize)]
pub struct ManifestItem {
    pub kind: &'static str,
    pub name: String,
    pub outcome: Option<SaveOutcome>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ManifestSummary {
    pub items: Vec<ManifestItem>,
}

impl ManifestSummary {
    fn record(&mut self, kind: &'static str, name: &str, result: Result<SaveOutcome>) {
        let item = match result {
            Ok(outcome) => {
                debug!("{} {}: {}", kind, name, outcome.as_str());
                ManifestItem { kind, name: name.to_string(), outcome: Some(outcome), error: None }
            }
            Err(e) => {
                if e.is_usage_error() {
                    error!("Skipping {} {}: {}", kind, name, e);
                } else {
                    warn!("Skipping {} {}: {}", kind, name, e);
                }
                ManifestItem { kind, name: name.to_string(), outcome: None, error: Some(e.to_string()) }
            }
        };
        self.items.push(item);
    }

    pub fn failures(&self) -> impl Iterator<Item = &ManifestItem> {
        self.items.iter().filter(|i| i.error.is_some())
    }

    pub fn written(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_some_and(|o| o.wrote())).count()
    }
}

/// Apply every list in the report's config, in order: sections, figures, tables, appendix.
pub fn apply(report: &mut Report) -> ManifestSummary {
    let config = report.config().clone();
    let mut summary = ManifestSummary::default();

    for spec in &config.sections {
        let result = report.add_section(&spec.name, spec.level, spec.override_existing);
        summary.record("section", &spec.name, result);
    }

    for spec in &config.figures {
        let result =
            report.save_figure(&spec.name, spec.source.as_deref(), &spec.caption, &spec.option, spec.override_existing);
        summary.record("figure", &spec.name, result);
    }

    for spec in &config.tables {
        let result = load_datasets(&spec.files)
            .and_then(|data| report.save_table(&spec.name, data, &spec.caption, spec.override_existing));
        summary.record("table", &spec.name, result);
    }

    for path in &config.appendix {
        let name = path.display().to_string();
        let result = report.save_mapping_table(path, false);
        summary.record("mapping table", &name, result);
    }

    summary
}

fn load_datasets(files: &[std::path::PathBuf]) -> Result<Vec<Dataset>> {
    files.iter().map(|f| Dataset::from_csv(f)).collect()
}
