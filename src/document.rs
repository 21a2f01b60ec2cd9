//! In-memory LaTeX document.
//!
//! A [`Document`] is a preamble (class, packages, title/author/date) plus an
//! ordered list of content blocks. It is rebuilt from scratch before every
//! render; [`Document::render`] produces the full source.

use crate::markup;

/// Packages installed by default, in order.
pub const DEFAULT_PACKAGES: &[&str] = &[
    "booktabs", "hyperref", "lipsum", "microtype", "nicefrac", "url", "bookmark", "tabularx", "xltabular",
    "graphicx", "svg",
];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preamble {
    pub title: String,
    pub author: String,
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    document_class: String,
    packages: Vec<String>,
    preamble: Preamble,
    blocks: Vec<String>,
}

impl Document {
    /// Fresh document whose first content block is the title block.
    pub fn new(document_class: &str, packages: &[String], preamble: Preamble) -> Self {
        let mut doc = Self {
            document_class: document_class.to_string(),
            packages: Vec::new(),
            preamble,
            blocks: Vec::new(),
        };
        for pkg in packages {
            doc.add_package(pkg);
        }
        doc.append(r"\maketitle");
        doc
    }

    /// Add a package once; repeats are ignored.
    pub fn add_package(&mut self, name: &str) {
        if !self.packages.iter().any(|p| p == name) {
            self.packages.push(name.to_string());
        }
    }

    /// Append a raw markup block verbatim.
    pub fn append(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("\\documentclass{{{}}}\n", self.document_class));
        out.push_str("\\usepackage[T1]{fontenc}\n");
        out.push_str("\\usepackage[utf8]{inputenc}\n");
        for pkg in &self.packages {
            out.push_str(&format!("\\usepackage{{{}}}\n", pkg));
        }
        out.push('\n');
        out.push_str(&markup::command("title", &self.preamble.title));
        out.push('\n');
        out.push_str(&markup::command("author", &self.preamble.author));
        out.push('\n');
        out.push_str(&markup::command("date", &self.preamble.date));
        out.push_str("\n\n\\begin{document}\n\n");
        for block in &self.blocks {
            out.push_str(block.trim_end_matches('\n'));
            out.push_str("\n\n");
        }
        out.push_str("\\end{document}\n");
        out
    }
}
