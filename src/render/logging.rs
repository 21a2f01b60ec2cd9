//! Failure logging for renders.
//!
//! Writes the full compiler output next to the composed source so a failed
//! render stays debuggable after the console scrolls away.

use super::types::RenderResult;
use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path of the failure log for a composed source: `<dir>/<stem>.render.log`.
pub fn failure_log_path(tex_path: &Path) -> PathBuf {
    tex_path.with_extension("render.log")
}

/// Write a detailed failure log for a render.
pub fn log_failure(result: &RenderResult) -> std::io::Result<PathBuf> {
    let log_path = failure_log_path(&result.tex_path);
    debug!("Writing render failure log to {:?}", log_path);

    let mut file = File::create(&log_path)?;

    writeln!(file, "=== Render Failure Log ===")?;
    writeln!(file, "Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file, "Source: {}", result.tex_path.display())?;
    if let Some(ref command) = result.command {
        writeln!(file, "Command: {}", command)?;
    }
    let exit_str = result.exit_code.map(|c| c.to_string()).unwrap_or_else(|| "N/A".to_string());
    writeln!(file, "Exit code: {}", exit_str)?;
    writeln!(file, "Duration: {:.1}s", result.duration.as_secs_f64())?;
    writeln!(file)?;

    if !result.stderr.is_empty() {
        writeln!(file, "--- stderr ---")?;
        writeln!(file, "{}", result.stderr)?;
    }

    if !result.stdout.is_empty() {
        writeln!(file, "--- stdout ---")?;
        writeln!(file, "{}", result.stdout)?;
    }

    file.flush()?;
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::types::RenderMode;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_log_failure_creates_file() {
        let temp = TempDir::new().unwrap();
        let result = RenderResult {
            mode: RenderMode::Pdf,
            success: false,
            tex_path: temp.path().join("Demo.tex"),
            pdf_path: Some(temp.path().join("Demo.pdf")),
            command: Some("latexmk -pdf Demo.tex".to_string()),
            exit_code: Some(12),
            duration: Duration::from_secs(2),
            stdout: "Latexmk: Errors".to_string(),
            stderr: "! Missing $ inserted.".to_string(),
        };

        let path = log_failure(&result).unwrap();
        assert_eq!(path, temp.path().join("Demo.render.log"));

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("latexmk -pdf Demo.tex"));
        assert!(content.contains("Exit code: 12"));
        assert!(content.contains("! Missing $ inserted."));
        assert!(content.contains("Latexmk: Errors"));
    }
}
