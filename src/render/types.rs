//! Core types for the render driver.

use crate::error::ReportError;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Number of trailing output lines kept in a failure diagnostic.
const DIAGNOSTIC_TAIL_LINES: usize = 20;

/// How far the render goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderMode {
    /// Write the composed source only
    TexOnly,
    /// Write the source and run the external compiler
    Pdf,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::TexOnly => "tex",
            RenderMode::Pdf => "pdf",
        }
    }
}

/// Result of one render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    pub mode: RenderMode,

    /// Whether the render succeeded (for PDF mode: exit code 0 and the PDF exists)
    pub success: bool,

    /// Composed source that was written
    pub tex_path: PathBuf,

    /// Rendered document (PDF mode only)
    pub pdf_path: Option<PathBuf>,

    /// Compiler command line as run
    pub command: Option<String>,

    pub exit_code: Option<i32>,

    #[serde(with = "duration_serde")]
    pub duration: Duration,

    pub stdout: String,

    pub stderr: String,
}

impl RenderResult {
    /// Result for a tex-only render
    pub fn tex_only(tex_path: PathBuf) -> Self {
        Self {
            mode: RenderMode::TexOnly,
            success: true,
            tex_path,
            pdf_path: None,
            command: None,
            exit_code: None,
            duration: Duration::ZERO,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn failed(&self) -> bool {
        !self.success
    }

    /// Short human-readable description of why the render failed.
    ///
    /// Prefers the tail of stderr, then stdout (LaTeX reports most errors there).
    pub fn diagnostic(&self) -> String {
        let source = if !self.stderr.trim().is_empty() { &self.stderr } else { &self.stdout };
        let lines: Vec<&str> = source.lines().collect();
        let start = lines.len().saturating_sub(DIAGNOSTIC_TAIL_LINES);
        let tail = lines[start..].join("\n");
        if tail.trim().is_empty() { "no output from compiler".to_string() } else { tail }
    }

    /// Convert a failure into a typed error carrying the diagnostic.
    pub fn into_result(self) -> Result<Self, ReportError> {
        if self.success {
            return Ok(self);
        }
        let status = match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "no exit code".to_string(),
        };
        Err(ReportError::RenderFailed {
            program: self.command.clone().unwrap_or_else(|| "compiler".to_string()),
            status,
            diagnostic: self.diagnostic(),
        })
    }
}

/// Serde support for Duration (serializes as seconds)
mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }
}
