//! Render driver.
//!
//! Writes the composed source to its `.tex` path and, unless only the
//! source was requested, runs the external compiler on it.
//!
//! - [`types`] - `RenderMode`, `RenderResult`
//! - [`executor`] - compiler process execution
//! - [`logging`] - failure log writing

pub mod executor;
pub mod logging;
pub mod types;

pub use types::{RenderMode, RenderResult};

use crate::config::RenderConfig;
use crate::error::{ReportError, Result};
use log::{error, info, warn};
use std::fs;
use std::path::Path;

/// Emit `source` to `tex_path` and optionally compile it.
///
/// Only a failure to write the source is an `Err`; compiler failures come
/// back as a failed [`RenderResult`] with the captured output.
pub fn compile(tex_path: &Path, source: &str, tex_only: bool, config: &RenderConfig) -> Result<RenderResult> {
    fs::write(tex_path, source).map_err(|e| ReportError::io(tex_path, e))?;
    info!("Wrote {}", tex_path.display());

    if tex_only {
        return Ok(RenderResult::tex_only(tex_path.to_path_buf()));
    }

    let result = executor::run_compiler(&config.program, &config.args, tex_path);
    if result.success {
        if let Some(ref pdf) = result.pdf_path {
            info!("Rendered {} in {:.1}s", pdf.display(), result.duration.as_secs_f64());
        }
    } else {
        error!("Render failed: {}", result.diagnostic());
        if config.failure_log {
            match logging::log_failure(&result) {
                Ok(path) => info!("Render output saved to {}", path.display()),
                Err(e) => warn!("Failed to write render failure log: {}", e),
            }
        }
    }
    Ok(result)
}
