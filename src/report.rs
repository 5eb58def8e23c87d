//! Output formatting for analysis results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output in the shape the visualizer UI consumes

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::{Finding, Language, Severity};

/// Analysis results for one file (or one inline snippet).
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub language: Language,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }
}

/// Severity tallies across a set of findings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
}

impl SeverityCounts {
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }

    fn merge(&mut self, other: SeverityCounts) {
        self.info += other.info;
        self.warning += other.warning;
        self.error += other.error;
    }
}

// =============================================================================
// JSON format
// =============================================================================

#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<JsonFile>,
    pub counts: SeverityCounts,
}

#[derive(Serialize, Deserialize)]
pub struct JsonFile {
    pub path: String,
    pub language: String,
    pub findings: Vec<Finding>,
    pub counts: SeverityCounts,
}

/// Build the JSON report structure.
pub fn build_json(reports: &[FileReport]) -> JsonReport {
    let mut totals = SeverityCounts::default();
    let files = reports
        .iter()
        .map(|r| {
            let counts = SeverityCounts::tally(&r.findings);
            totals.merge(counts);
            JsonFile {
                path: r.path.clone(),
                language: r.language.as_str().to_string(),
                findings: r.findings.clone(),
                counts,
            }
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files,
        counts: totals,
    }
}

/// Write results in JSON format.
pub fn write_json(reports: &[FileReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_json(reports))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(reports: &[FileReport]) {
    println!();
    print!("  ");
    print!("{}", "vizcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let mut totals = SeverityCounts::default();

    for report in reports {
        totals.merge(SeverityCounts::tally(&report.findings));

        print!("  {}", report.path.blue());
        println!("{}", format!("  [{}]", report.language).dimmed());

        if report.findings.is_empty() {
            println!("    {}", "no findings".dimmed());
        }
        for finding in &report.findings {
            write_severity_tag(finding.severity);
            if let Some(line) = finding.line {
                let col = finding.column.unwrap_or(1);
                print!("{}", format!("{}:{} ", line, col).dimmed());
            }
            println!("{}", finding.message);
        }
        println!();
    }

    write_summary(reports.len(), totals);
    println!();
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

fn write_summary(file_count: usize, totals: SeverityCounts) {
    let plural = if file_count != 1 { "s" } else { "" };
    print!(
        "  {}",
        format!("{} file{} analyzed:", file_count, plural).bold()
    );
    print!(" {}", format!("{} info", totals.info).blue());
    print!("  {}", format!("{} warnings", totals.warning).yellow());
    print!("  {}", format!("{} errors", totals.error).red());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> FileReport {
        FileReport {
            path: "app.js".to_string(),
            language: Language::JavaScript,
            findings: vec![
                Finding::info("Found 1 regular functions and 0 arrow functions"),
                Finding::warning("Found 1 debugger statements that should be removed"),
            ],
        }
    }

    #[test]
    fn test_json_report_shape() {
        let report = build_json(&[sample_report()]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["files"][0]["language"], "javascript");
        assert_eq!(json["files"][0]["findings"][1]["type"], "warning");
        assert_eq!(json["counts"]["info"], 1);
        assert_eq!(json["counts"]["warning"], 1);
        assert_eq!(json["counts"]["error"], 0);
    }

    #[test]
    fn test_tally() {
        let counts = SeverityCounts::tally(&[
            Finding::info("a"),
            Finding::warning("b"),
            Finding::warning("c"),
            Finding::error("d"),
        ]);
        assert_eq!(counts.info, 1);
        assert_eq!(counts.warning, 2);
        assert_eq!(counts.error, 1);
    }

    #[test]
    fn test_has_errors() {
        let mut report = sample_report();
        assert!(!report.has_errors());
        report.findings.push(Finding::error("Syntax error"));
        assert!(report.has_errors());
    }
}
