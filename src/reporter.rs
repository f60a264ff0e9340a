// reporter.rs - Findings Output
// Purpose: Render findings to the console and optionally persist the full
// result set as a JSON array.

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use crate::scanner::Finding;

/// Print every finding in human-readable form, one block per finding.
pub fn display_findings(findings: &[Finding]) {
    if findings.is_empty() {
        println!("\n{}", "[*] No vulnerabilities found.".yellow().bold());
        return;
    }

    println!(
        "\n{}",
        format!("[+] {} potential vulnerabilities found!", findings.len())
            .green()
            .bold()
    );

    for finding in findings {
        println!();
        println!("{}", format!("  Parameter: {}", finding.parameter).cyan());
        println!("{}", format!("  Payload:   {}", finding.payload).cyan());
        println!("{}", format!("  URL:       {}", finding.url).cyan());
        println!(
            "{}",
            format!("  Type:      {}", finding.kind.as_str()).cyan()
        );
        println!("{}", format!("  Evidence:  {}", finding.evidence).cyan());
    }
}

/// Write the full scan result as a pretty-printed JSON array.
pub fn save_findings(findings: &[Finding], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(findings).context("Failed to serialize findings")?;
    fs::write(output_path, json)
        .context(format!("Failed to write findings to {:?}", output_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FindingKind;

    #[test]
    fn saved_findings_are_a_json_array_with_wire_fields() {
        let findings = vec![Finding {
            url: "http://example.test/item?id=%27".to_string(),
            parameter: "id".to_string(),
            payload: "'".to_string(),
            kind: FindingKind::Error,
            evidence: "Server Error: 500".to_string(),
        }];

        let dir = std::env::temp_dir();
        let path = dir.join("sqlsweep_reporter_test.json");
        save_findings(&findings, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["type"], "error");
        assert_eq!(parsed[0]["evidence"], "Server Error: 500");

        fs::remove_file(&path).ok();
    }
}
