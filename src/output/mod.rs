use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::pattern::ParseResult;

/// A single file's outcome in a directory scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub filename: String,
    #[serde(flatten)]
    pub result: ParseResult,
}

/// Render a parse result as human-readable text.
pub fn format_as_text(result: &ParseResult) -> String {
    let mut lines = Vec::new();

    match &result.show_name {
        Some(name) => lines.push(format!("Show:   {}", name)),
        None => lines.push("Show:   (not recognized)".to_string()),
    }

    match result.date {
        Some(date) => lines.push(format!("Date:   {}", date.format("%B %d, %Y"))),
        None => lines.push("Date:   (unknown)".to_string()),
    }

    if let Some(year) = result.year {
        lines.push(format!("Year:   {}", year));
    }

    if result.success {
        lines.push(format!("Status: {}", style("ok").green()));
    } else {
        let error = result.error.as_deref().unwrap_or("unknown error");
        lines.push(format!("Status: {} - {}", style("failed").red(), error));
    }

    lines.join("\n")
}

/// Render a parse result as pretty JSON, field-for-field what the API
/// endpoint returns.
pub fn format_as_json(result: &ParseResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Print a parse result to the console.
pub fn print_to_console(result: &ParseResult, format: &OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Text => format_as_text(result),
        OutputFormat::Json => format_as_json(result)?,
    };

    println!("{}", content);
    Ok(())
}

/// Print per-file scan results and a summary line.
pub fn print_scan_results(entries: &[ScanEntry], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
        OutputFormat::Text => {
            for entry in entries {
                if entry.result.success {
                    println!(
                        "{} {} -> {} @ {}",
                        style("✓").green(),
                        entry.filename,
                        entry.result.show_name.as_deref().unwrap_or("?"),
                        entry
                            .result
                            .date
                            .map(|d| d.to_string())
                            .unwrap_or_default()
                    );
                } else {
                    println!(
                        "{} {}: {}",
                        style("✗").red(),
                        entry.filename,
                        entry.result.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }

            let parsed = entries.iter().filter(|e| e.result.success).count();
            println!(
                "\n{} of {} file(s) matched the expected naming pattern",
                parsed,
                entries.len()
            );
        }
    }

    Ok(())
}
