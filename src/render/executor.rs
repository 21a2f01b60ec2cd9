//! External compiler execution.
//!
//! Runs the configured LaTeX toolchain against a composed source file and
//! captures its output. No retries and no timeout: the compiler runs to
//! completion or failure.

use super::types::{RenderMode, RenderResult};
use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Run `program args... <tex file name>` inside the directory holding the tex file.
///
/// Success requires exit code 0 and the PDF next to the tex file.
pub fn run_compiler(program: &str, args: &[String], tex_path: &Path) -> RenderResult {
    let work_dir = tex_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let file_name = tex_path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
    let pdf_path = tex_path.with_extension("pdf");

    let mut command_line = vec![program.to_string()];
    command_line.extend(args.iter().cloned());
    command_line.push(file_name.clone());
    let command_line = command_line.join(" ");

    debug!("Running {} in {:?}", command_line, work_dir);
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.arg(&file_name);
    cmd.current_dir(work_dir);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut result = RenderResult {
        mode: RenderMode::Pdf,
        success: false,
        tex_path: tex_path.to_path_buf(),
        pdf_path: Some(pdf_path.clone()),
        command: Some(command_line),
        exit_code: None,
        duration: start.elapsed(),
        stdout: String::new(),
        stderr: String::new(),
    };

    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => {
            result.duration = start.elapsed();
            result.stderr = format!("Failed to execute {}: {}", program, e);
            return result;
        }
    };

    result.duration = start.elapsed();
    result.exit_code = output.status.code();
    result.stdout = String::from_utf8_lossy(&output.stdout).to_string();
    result.stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        debug!("{} failed in {:?}", program, result.duration);
        return result;
    }

    if !pdf_path.exists() {
        debug!("{} exited cleanly but {:?} is missing", program, pdf_path);
        result.stderr.push_str(&format!("\nCompiler reported success but {} was not produced", pdf_path.display()));
        return result;
    }

    debug!("{} succeeded in {:?}", program, result.duration);
    result.success = true;
    result
}
