//! Sections: heading levels, placeholder fragments, and the ordered registry.

use crate::error::ReportError;
use crate::layout::section_file_stem;
use crate::markup;
use std::path::PathBuf;

/// Stock filler written into freshly created sections.
pub const PLACEHOLDER_TEXT: &str = "Insert your text here.";

/// Heading depth of a section fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SectionLevel {
    Section,
    Subsection,
    Subsubsection,
}

impl SectionLevel {
    /// Map the user-facing level 1/2/3; anything else is a usage error.
    pub fn from_level(name: &str, level: u8) -> Result<Self, ReportError> {
        match level {
            1 => Ok(SectionLevel::Section),
            2 => Ok(SectionLevel::Subsection),
            3 => Ok(SectionLevel::Subsubsection),
            _ => Err(ReportError::InvalidSectionLevel { name: name.to_string(), level }),
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            SectionLevel::Section => "section",
            SectionLevel::Subsection => "subsection",
            SectionLevel::Subsubsection => "subsubsection",
        }
    }
}

/// Body of a new section file: heading plus filler text.
pub fn render_placeholder(title: &str, level: SectionLevel) -> String {
    format!("{}\n{}\n", markup::command(level.command(), title), PLACEHOLDER_TEXT)
}

/// A registered section, in the order it was added during this run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SectionEntry {
    /// Registry key: the name with spaces replaced by underscores
    pub key: String,
    /// Name as given by the caller
    pub name: String,
    pub path: PathBuf,
    pub level: SectionLevel,
}

/// In-memory, insertion-ordered record of the sections that belong in the
/// composed document. It is never reloaded from disk.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    entries: Vec<SectionEntry>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section unless its key is already present.
    ///
    /// An existing entry keeps its position. Its level is only replaced when
    /// `update_level` is set (the section file was just rewritten).
    /// Returns true when a new entry was added.
    pub fn register(&mut self, name: &str, path: PathBuf, level: SectionLevel, update_level: bool) -> bool {
        let key = section_file_stem(name);
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            if update_level {
                existing.level = level;
            }
            return false;
        }
        self.entries.push(SectionEntry { key, name: name.to_string(), path, level });
        true
    }

    pub fn get(&self, name: &str) -> Option<&SectionEntry> {
        let key = section_file_stem(name);
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(SectionLevel::from_level("a", 1).unwrap(), SectionLevel::Section);
        assert_eq!(SectionLevel::from_level("a", 3).unwrap().command(), "subsubsection");
        assert!(SectionLevel::from_level("a", 0).unwrap_err().is_usage_error());
        assert!(SectionLevel::from_level("a", 4).is_err());
    }

    #[test]
    fn test_placeholder_contains_heading_and_filler() {
        let body = render_placeholder("Data Sources", SectionLevel::Subsection);
        assert!(body.starts_with(r"\subsection{Data Sources}"));
        assert!(body.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn test_registry_keeps_insertion_order() {
        let mut reg = SectionRegistry::new();
        for name in ["Intro", "Data", "Conclusion"] {
            assert!(reg.register(name, PathBuf::from(name), SectionLevel::Section, false));
        }
        let names: Vec<&str> = reg.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Intro", "Data", "Conclusion"]);
    }

    #[test]
    fn test_registry_never_duplicates() {
        let mut reg = SectionRegistry::new();
        assert!(reg.register("Data Sources", PathBuf::from("a"), SectionLevel::Section, false));
        assert!(!reg.register("Data_Sources", PathBuf::from("a"), SectionLevel::Subsection, false));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("Data Sources").unwrap().level, SectionLevel::Section);
    }

    #[test]
    fn test_registry_updates_level_only_on_rewrite() {
        let mut reg = SectionRegistry::new();
        reg.register("Intro", PathBuf::from("i"), SectionLevel::Section, false);
        reg.register("Other", PathBuf::from("o"), SectionLevel::Section, false);
        reg.register("Intro", PathBuf::from("i"), SectionLevel::Subsubsection, true);

        assert_eq!(reg.entries()[0].name, "Intro");
        assert_eq!(reg.entries()[0].level, SectionLevel::Subsubsection);
    }
}
