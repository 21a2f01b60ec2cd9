/// Report configuration
///
/// This module handles:
/// - The explicit configuration object handed to `Report::new`
/// - Loading it from a TOML file, with defaults for every optional field
/// - The manifest lists (sections, figures, tables, appendix) that drive a build
/// - Resolving manifest paths relative to the config file
use crate::document::DEFAULT_PACKAGES;
use crate::error::{ReportError, Result};
use crate::fragment::table::DEFAULT_LARGE_TABLE_ROWS;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "report.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Project name; also the name of the project directory and output files
    pub name: String,

    /// Directory holding report projects
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_date")]
    pub date: String,

    #[serde(default = "default_document_class")]
    pub document_class: String,

    #[serde(default = "default_packages")]
    pub packages: Vec<String>,

    /// Tables with at least this many rows are shrunk to fit the page
    #[serde(default = "default_large_table_rows")]
    pub large_table_rows: usize,

    #[serde(default)]
    pub render: RenderConfig,

    /// Sections to register, in document order
    #[serde(default)]
    pub sections: Vec<SectionSpec>,

    #[serde(default)]
    pub figures: Vec<FigureSpec>,

    #[serde(default)]
    pub tables: Vec<TableSpec>,

    /// Mapping-table CSVs copied into the project's appendix directory
    #[serde(default)]
    pub appendix: Vec<PathBuf>,
}

/// External compiler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the tex file name
    #[serde(default = "default_render_args")]
    pub args: Vec<String>,

    /// Write `<output>/<name>.render.log` when the compiler fails
    #[serde(default = "default_true")]
    pub failure_log: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { program: default_program(), args: default_render_args(), failure_log: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default, rename = "override")]
    pub override_existing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureSpec {
    pub name: String,
    /// Image to copy in; may be omitted when the figure already exists
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub option: String,
    #[serde(default, rename = "override")]
    pub override_existing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    /// CSV files (first column = index); several files are joined column-wise
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub caption: String,
    #[serde(default, rename = "override")]
    pub override_existing: bool,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("report")
}

fn default_title() -> String {
    "Insert Report Title Here".to_string()
}

fn default_author() -> String {
    "Insert Author Name".to_string()
}

fn default_date() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

fn default_document_class() -> String {
    "article".to_string()
}

fn default_packages() -> Vec<String> {
    DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect()
}

fn default_large_table_rows() -> usize {
    DEFAULT_LARGE_TABLE_ROWS
}

fn default_program() -> String {
    "latexmk".to_string()
}

fn default_render_args() -> Vec<String> {
    vec!["-pdf".to_string(), "-interaction=nonstopmode".to_string(), "-halt-on-error".to_string()]
}

fn default_level() -> u8 {
    1
}

fn default_true() -> bool {
    true
}

impl ReportConfig {
    /// Configuration with every optional field at its default.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_dir: default_base_dir(),
            title: default_title(),
            author: default_author(),
            date: default_date(),
            document_class: default_document_class(),
            packages: default_packages(),
            large_table_rows: default_large_table_rows(),
            render: RenderConfig::default(),
            sections: Vec::new(),
            figures: Vec::new(),
            tables: Vec::new(),
            appendix: Vec::new(),
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Load a config file; relative paths inside it resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading report config from {:?}", path);
        let content = fs::read_to_string(path)
            .map_err(|e| ReportError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))?;

        let config_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        config.resolve_paths(config_dir);
        Ok(config)
    }

    /// Parse and validate TOML without touching the filesystem.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        let config: ReportConfig = toml::from_str(content).map_err(|e| format!("invalid TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("'name' must not be empty".to_string());
        }
        if self.name.contains(['/', '\\']) {
            return Err(format!("'name' must not contain path separators: {}", self.name));
        }
        if self.large_table_rows == 0 {
            return Err("'large_table_rows' must be at least 1".to_string());
        }
        if self.render.program.trim().is_empty() {
            return Err("'render.program' must not be empty".to_string());
        }
        for table in &self.tables {
            if table.files.is_empty() {
                return Err(format!("table '{}' lists no files", table.name));
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |p: &Path| if p.is_absolute() { p.to_path_buf() } else { config_dir.join(p) };

        self.base_dir = resolve(&self.base_dir);
        for figure in &mut self.figures {
            figure.source = figure.source.as_deref().map(resolve);
        }
        for table in &mut self.tables {
            table.files = table.files.iter().map(|f| resolve(f)).collect();
        }
        self.appendix = self.appendix.iter().map(|f| resolve(f)).collect();
    }
}
