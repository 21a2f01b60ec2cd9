/// User interface and status output utilities
///
/// This module handles:
/// - Colored terminal text
/// - Status message formatting
use texreport::SaveOutcome;
use std::io::Write;

/// Print the "texreport: " prefix for status messages
fn print_status_header() {
    print!("texreport: ");
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
        }

        true
    }
}

/// Print a status message with "texreport: " prefix
pub fn status(s: &str) {
    print_status_header();
    println!("{}", s);
}

/// Print the outcome of a save operation, colored by whether anything was written
pub fn print_outcome(kind: &str, name: &str, outcome: SaveOutcome) {
    print_status_header();
    let color = match outcome {
        SaveOutcome::Written | SaveOutcome::Overwritten => term::color::BRIGHT_GREEN,
        SaveOutcome::SkippedExisting => term::color::BRIGHT_BLUE,
        SaveOutcome::SkippedEmpty | SaveOutcome::NotFound => term::color::BRIGHT_YELLOW,
    };
    print_color(outcome.as_str(), color);
    println!(" {} {}", kind, name);
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    println!();
    print_color("error", term::color::BRIGHT_RED);
    println!(": {}", msg);
    println!();
}

/// Print a warning message with colored "warning" prefix
pub fn print_warning(msg: &str) {
    print_color("warning", term::color::BRIGHT_YELLOW);
    println!(": {}", msg);
}
