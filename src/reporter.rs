use crate::cli::OutputFormat;
use crate::models::ScanReport;
use anyhow::{Context, Result};
use colored::{Color, Colorize};
use comfy_table::{Table, presets::ASCII_MARKDOWN};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Render a report in the specified format and write it out
pub fn generate_report(
    report: &ScanReport,
    format: OutputFormat,
    output_path: Option<&Path>,
    fail_on: &[String],
) -> Result<()> {
    if output_path.is_some() {
        colored::control::set_override(false);
    }

    let output = match format {
        OutputFormat::Terminal => format_terminal(report, fail_on),
        OutputFormat::Markdown => format_markdown(report, fail_on),
        OutputFormat::Json => format_json(report)?,
    };

    if let Some(path) = output_path {
        fs::write(path, output)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        println!("Report written to {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Color for a marker, shared by match lines and the summary
pub fn marker_color(marker: &str) -> Color {
    match marker.to_uppercase().as_str() {
        "FIXME" => Color::Red,
        "TODO" => Color::Yellow,
        _ => Color::Cyan,
    }
}

/// Format report as the line-oriented console output
fn format_terminal(report: &ScanReport, fail_on: &[String]) -> String {
    let mut output = String::new();

    for file in &report.files {
        let _ = writeln!(output, "{}", format!("Checking: {}", file.path.display()).dimmed());
        for found in &file.matches {
            let line = format!(
                "{}:{} -> {}",
                found.file_path.display(),
                found.line_number,
                found.comment
            );
            let _ = writeln!(output, "{}", line.color(marker_color(&found.marker)));
        }
    }

    if let Some(ref failure) = report.failure {
        let _ = writeln!(output, "{}", format!("Checking: {}", failure.path.display()).dimmed());
    }

    output.push_str("\n\nResults:\n");
    for entry in &report.counts {
        let line = format!("{}: {}", entry.marker, entry.count);
        let _ = writeln!(output, "{}", line.color(marker_color(&entry.marker)));
    }

    for violation in report.violations(fail_on) {
        let line = format!(
            "Error: Found {} comments. Please address them before continuing.",
            violation.marker
        );
        let _ = writeln!(output, "{}", line.red());
    }

    if let Some(ref failure) = report.failure {
        let line = format!(
            "Error: Scan aborted at {}: {}",
            failure.path.display(),
            failure.reason
        );
        let _ = writeln!(output, "{}", line.red().bold());
    }

    output
}

/// Format report as Markdown
fn format_markdown(report: &ScanReport, fail_on: &[String]) -> String {
    let mut output = String::new();

    output.push_str("# Comment Marker Report\n\n");
    let _ = writeln!(output, "**Scanned**: `{}`", report.scan_path.display());
    let _ = writeln!(output, "**Files**: {}", report.files.len());
    let _ = writeln!(output, "**Total Markers**: {}", report.total_count);
    let _ = writeln!(
        output,
        "**Generated**: {}\n",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    );

    output.push_str("## Summary\n\n");
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN).set_header(vec!["Marker", "Count"]);
    for entry in &report.counts {
        table.add_row(vec![entry.marker.clone(), entry.count.to_string()]);
    }
    let _ = writeln!(output, "{}\n", table);

    let with_matches: Vec<_> = report
        .files
        .iter()
        .filter(|file| !file.matches.is_empty())
        .collect();
    if !with_matches.is_empty() {
        output.push_str("## Matches\n\n");
        for file in with_matches {
            let _ = writeln!(output, "### `{}`\n", file.path.display());
            for found in &file.matches {
                let _ = writeln!(
                    output,
                    "- **{}** line {}: `{}`",
                    found.marker, found.line_number, found.comment
                );
            }
            output.push('\n');
        }
    }

    let violations = report.violations(fail_on);
    if !violations.is_empty() {
        output.push_str("## Gate Failed\n\n");
        for violation in violations {
            let _ = writeln!(
                output,
                "- Found {} {} comment(s). Please address them before continuing.",
                violation.count, violation.marker
            );
        }
        output.push('\n');
    }

    if let Some(ref failure) = report.failure {
        output.push_str("## Scan Aborted\n\n");
        let _ = writeln!(
            output,
            "Stopped at `{}`: {}\n",
            failure.path.display(),
            failure.reason
        );
    }

    output
}

/// Format report as JSON
fn format_json(report: &ScanReport) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;
    json.push('\n');
    Ok(json)
}
