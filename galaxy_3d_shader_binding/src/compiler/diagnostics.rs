//! Compile diagnostics reporting
//!
//! Extracts the first reported line number from compiler output and dumps the
//! surrounding source lines to the log, followed by the raw compiler text.

use crate::{engine_error, engine_warn};

const SOURCE: &str = "galaxy3d::ShaderCompiler";

/// Line number (1-based) of the first error, or of the first warning if there is no error
///
/// Compiler messages look like `path(line,column): error X3004: ...`.
pub fn parse_error_line(diagnostics: &str) -> Option<usize> {
    let marker = diagnostics
        .find("): error X")
        .or_else(|| diagnostics.find("): warning X"))?;

    let head = &diagnostics[..marker];
    let open = head.rfind('(')?;
    let location = &head[open + 1..];
    let line = location.split(',').next()?;
    line.trim().parse().ok()
}

/// Source lines within `context` lines of `line`, with their 1-based numbers
pub fn source_excerpt(source: &str, line: usize, context: usize) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .filter(|(n, _)| n.abs_diff(line) <= context)
        .collect()
}

/// Render the excerpt block shown before the compiler text
pub fn format_report(source: &str, diagnostics: &str, context: usize) -> String {
    let mut report = String::new();
    if let Some(line) = parse_error_line(diagnostics) {
        report.push_str("...\n");
        for (n, text) in source_excerpt(source, line, context) {
            report.push_str(&format!("{} {}\n", n, text));
        }
        report.push_str("...\n");
    }
    report.push_str(diagnostics);
    report
}

/// Log compiler output for one stage
///
/// Failures are logged as errors, output that came with bytecode as warnings.
pub fn report_compile_diagnostics(
    source: &str,
    entry_point: &str,
    profile: &str,
    diagnostics: &str,
    failed: bool,
    context: usize,
) {
    let report = format_report(source, diagnostics, context);
    if failed {
        engine_error!(SOURCE, "Error when compiling {} ({}):\n{}", entry_point, profile, report);
    } else {
        engine_warn!(SOURCE, "Warnings when compiling {} ({}):\n{}", entry_point, profile, report);
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
