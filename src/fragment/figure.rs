//! Figure metadata and figure blocks.
//!
//! Metadata recorded by `save_figure` lives only for the current process.
//! The assembler consults it when emitting the image-inclusion directive.

use crate::markup;
use std::collections::HashMap;
use std::path::PathBuf;

/// Width used for figures without a recorded option.
pub const DEFAULT_FIGURE_OPTION: &str = r"width=0.8\textwidth";

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FigureMeta {
    pub name: String,
    pub source: Option<PathBuf>,
    pub caption: String,
    /// Raw `\includegraphics` options, e.g. `scale=0.5`
    pub option: String,
}

/// Figure metadata keyed by file name (`<name>.png`).
#[derive(Debug, Clone, Default)]
pub struct FigureCatalog {
    figures: HashMap<String, FigureMeta>,
}

impl FigureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(name: &str) -> String {
        format!("{}.png", name)
    }

    /// Insert or replace the record for `meta.name`.
    pub fn upsert(&mut self, meta: FigureMeta) {
        self.figures.insert(Self::file_name(&meta.name), meta);
    }

    pub fn get(&self, file_name: &str) -> Option<&FigureMeta> {
        self.figures.get(file_name)
    }
}

/// Floated figure block for an image referenced by `image_ref`.
pub fn render_figure_block(image_ref: &str, meta: Option<&FigureMeta>) -> String {
    let option = meta
        .map(|m| m.option.trim())
        .filter(|o| !o.is_empty())
        .unwrap_or(DEFAULT_FIGURE_OPTION);

    let mut out = String::from("\\begin{figure}[!ht]\n\\centering\n");
    out.push_str(&format!("\\includegraphics[{}]{{{}}}\n", option, image_ref));
    if let Some(meta) = meta
        && !meta.caption.is_empty()
    {
        out.push_str(&markup::command("caption", &meta.caption));
        out.push('\n');
    }
    out.push_str("\\end{figure}\n");
    out
}
