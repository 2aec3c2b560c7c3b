use crate::sink::FindingSink;
use crate::{Finding, ScanSummary};
use colored::*;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    files_scanned: usize,
    total_findings: usize,
    findings: &'a [Finding],
}

/// Streams findings to stdout as they are discovered.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    colored: bool,
}

impl ConsoleSink {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }
}

impl FindingSink for ConsoleSink {
    fn emit(&self, finding: Finding) {
        let mut line = format_finding(&finding, self.colored);
        line.push('\n');

        // One write under the lock keeps concurrent findings on separate lines.
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(line.as_bytes()) {
            log::debug!("Failed to write finding: {}", e);
        }
    }
}

/// `path[:line]: word ==> fix`, plus the rule's reason for non-autofix hits.
pub fn format_finding(finding: &Finding, colored_output: bool) -> String {
    let location = match finding.line {
        Some(line) => format!("{}:{}", finding.path.display(), line),
        None => finding.path.display().to_string(),
    };

    let mut out = if colored_output {
        format!(
            "{}: {} ==> {}",
            location,
            finding.word.red(),
            finding.fix.green()
        )
    } else {
        format!("{}: {} ==> {}", location, finding.word, finding.fix)
    };

    if !finding.autofix && !finding.reason.is_empty() {
        if colored_output {
            out.push_str(&format!(" ({})", finding.reason.dimmed()));
        } else {
            out.push_str(&format!(" ({})", finding.reason));
        }
    }

    out
}

pub fn print_json(findings: &[Finding], summary: &ScanSummary) -> serde_json::Result<()> {
    let output = JsonOutput {
        files_scanned: summary.files_scanned,
        total_findings: findings.len(),
        findings,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
