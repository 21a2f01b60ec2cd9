// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod ui;

use cli::Command;
use texreport::dataset::Dataset;
use texreport::manifest::{self, ManifestSummary};
use texreport::{Report, ReportConfig, RenderResult};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let config = match ReportConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Every command needs the directory skeleton; creating it is idempotent
    let mut report = Report::new(config);
    let existed = report.layout().is_initialized();
    if let Err(e) = report.initialize() {
        ui::print_error(&format!("Failed to initialize project: {}", e));
        std::process::exit(1);
    }

    let exit_code = match args.command {
        Command::Init => {
            let state = if existed { "already initialized" } else { "initialized" };
            ui::status(&format!("{} {} at {}", report.name(), state, report.layout().root().display()));
            0
        }
        Command::Build { tex_only, sections_only, json } => build(&mut report, tex_only, sections_only, json),
        Command::Section { name, level, override_existing } => {
            finish("section", &name, report.add_section(&name, level, override_existing))
        }
        Command::Figure { name, source, caption, option, override_existing } => finish(
            "figure",
            &name,
            report.save_figure(&name, source.as_deref(), &caption, &option, override_existing),
        ),
        Command::Table { name, files, caption, override_existing } => {
            let result = files
                .iter()
                .map(|f| Dataset::from_csv(f))
                .collect::<texreport::Result<Vec<_>>>()
                .and_then(|data| report.save_table(&name, data, &caption, override_existing));
            finish("table", &name, result)
        }
        Command::Mapping { file, override_existing } => {
            let name = file.display().to_string();
            finish("mapping table", &name, report.save_mapping_table(&file, override_existing))
        }
    };

    std::process::exit(exit_code);
}

/// Apply the config's fragment lists, compose and render
fn build(report: &mut Report, tex_only: bool, sections_only: bool, json: bool) -> i32 {
    let summary = manifest::apply(report);

    let result = match report.make_report(sections_only, tex_only) {
        Ok(r) => r,
        Err(e) => {
            ui::print_error(&format!("Report composition failed: {}", e));
            return 1;
        }
    };

    if json {
        print_json(&summary, &result);
    } else {
        print_build_summary(&summary, &result);
    }

    match result.into_result() {
        Ok(_) => 0,
        Err(e) => {
            if !json {
                ui::print_error(&e.to_string());
            }
            2
        }
    }
}

fn print_build_summary(summary: &ManifestSummary, result: &RenderResult) {
    for item in &summary.items {
        if let Some(outcome) = item.outcome {
            ui::print_outcome(item.kind, &item.name, outcome);
        }
    }
    for item in summary.failures() {
        ui::print_warning(&format!("{} {}: {}", item.kind, item.name, item.error.as_deref().unwrap_or("")));
    }
    ui::status(&format!(
        "{} of {} fragments written, {} failed",
        summary.written(),
        summary.items.len(),
        summary.failures().count()
    ));

    ui::status(&format!("Source written to {}", result.tex_path.display()));
    if result.success
        && let Some(ref pdf) = result.pdf_path
    {
        ui::status(&format!("Rendered {} in {:.1}s", pdf.display(), result.duration.as_secs_f64()));
    }
}

fn print_json(summary: &ManifestSummary, result: &RenderResult) {
    let report = serde_json::json!({
        "fragments": summary.items,
        "render": result,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(s) => println!("{}", s),
        Err(e) => ui::print_error(&format!("Failed to serialize result: {}", e)),
    }
}

/// Report a single-shot save and map it to an exit code
fn finish(kind: &str, name: &str, result: texreport::Result<texreport::SaveOutcome>) -> i32 {
    match result {
        Ok(outcome) => {
            ui::print_outcome(kind, name, outcome);
            0
        }
        Err(e) => {
            ui::print_error(&e.to_string());
            1
        }
    }
}
