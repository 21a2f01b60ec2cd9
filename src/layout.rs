/// On-disk project layout
///
/// This module handles:
/// - The fixed subdirectory skeleton of a report project
/// - Idempotent creation of that skeleton
/// - Fragment path conventions and directory enumeration
use crate::error::{ReportError, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed subdirectories of every report project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subdir {
    Sections,
    Tables,
    Figures,
    MappingTables,
    Output,
}

impl Subdir {
    pub const ALL: [Subdir; 5] =
        [Subdir::Sections, Subdir::Tables, Subdir::Figures, Subdir::MappingTables, Subdir::Output];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Subdir::Sections => "sections",
            Subdir::Tables => "tables",
            Subdir::Figures => "figures",
            Subdir::MappingTables => "mappingTables",
            Subdir::Output => "output",
        }
    }
}

/// Directory layout of a single named report project: `<base>/<name>/...`
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    name: String,
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(base_dir: &Path, name: &str) -> Self {
        Self { name: name.to_string(), root: base_dir.join(name) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, subdir: Subdir) -> PathBuf {
        self.root.join(subdir.dir_name())
    }

    /// Create the project root and all subdirectories.
    ///
    /// Existing directories are left alone, so this can run any number of
    /// times. The first creation failure aborts the remaining ones.
    pub fn initialize(&self) -> Result<()> {
        make_dir(&self.root)?;
        for subdir in Subdir::ALL {
            make_dir(&self.dir(subdir))?;
        }
        Ok(())
    }

    /// Check that every subdirectory exists.
    pub fn is_initialized(&self) -> bool {
        Subdir::ALL.iter().all(|s| self.dir(*s).is_dir())
    }

    pub fn section_path(&self, name: &str) -> PathBuf {
        self.dir(Subdir::Sections).join(format!("{}.tex", section_file_stem(name)))
    }

    pub fn table_path(&self, name: &str) -> PathBuf {
        self.dir(Subdir::Tables).join(format!("{}.tex", name))
    }

    pub fn figure_path(&self, name: &str) -> PathBuf {
        self.dir(Subdir::Figures).join(format!("{}.png", name))
    }

    pub fn output_path(&self, extension: &str) -> PathBuf {
        self.dir(Subdir::Output).join(format!("{}.{}", self.name, extension))
    }

    /// Reference to a fragment file as seen from the output directory,
    /// where the composed document is compiled.
    pub fn relative_ref(subdir: Subdir, file_name: &str) -> String {
        format!("../{}/{}", subdir.dir_name(), file_name)
    }

    /// List file names in a subdirectory with the given extension.
    ///
    /// Hidden files are skipped. Names are sorted so composition does not
    /// depend on the platform's directory order.
    pub fn list_files(&self, subdir: Subdir, extension: &str) -> Result<Vec<String>> {
        let dir = self.dir(subdir);
        let entries = fs::read_dir(&dir).map_err(|e| ReportError::io(&dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReportError::io(&dir, e))?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if file_name.starts_with('.') {
                continue;
            }
            let matches = Path::new(&file_name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            if matches && entry.path().is_file() {
                names.push(file_name);
            }
        }
        names.sort();
        debug!("Found {} .{} files in {:?}", names.len(), extension, dir);
        Ok(names)
    }
}

/// Section file names replace spaces with underscores.
pub fn section_file_stem(name: &str) -> String {
    name.replace(' ', "_")
}

fn make_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        info!("{} already exists.", path.display());
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| ReportError::io(path, e))?;
    info!("Created {}", path.display());
    Ok(())
}
