// main.rs - SqlSweep - Concurrent Reflected SQL Injection Scanner
// Purpose: Probe target URL query parameters with a fixed SQL injection
// payload set and report responses carrying error or signature indicators.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

mod dedup;
mod params;
mod payloads;
mod reporter;
mod scanner;

use scanner::{ScanConfig, SqlSweepScanner};

/// SqlSweep - Fast SQL Injection Tester
#[derive(Parser, Debug)]
#[command(
    name = "SqlSweep",
    version = "0.1.0",
    about = "Concurrent reflected SQL injection scanner",
    long_about = r#"
SqlSweep injects a fixed set of SQL payloads into every query parameter of
the target URLs and classifies each response:

  - HTTP 5xx            -> finding (type: error)
  - HTTP 200 whose body -> finding (type: sql-signature)
    contains an SQL error signature

Each (URL, parameter) pair is probed at most once per run; the remaining
payload variants for an already-claimed parameter are skipped. Transport
errors and timeouts are silently treated as inconclusive.

EXAMPLES:

  Single target:
    sqlsweep -u "http://example.test/item?id=1"

  Target list with JSON output:
    sqlsweep -f urls.txt -o findings.json

  Tighter limits against fragile hosts:
    sqlsweep -f urls.txt -t 10 --rate-limit 20 --timeout 10
"#
)]
struct Args {
    /// Single URL to test
    #[arg(short, long, value_name = "URL", help_heading = "Target Options")]
    url: Option<String>,

    /// File containing URLs to test (one per line, # for comments)
    #[arg(short, long, value_name = "FILE", help_heading = "Target Options")]
    file: Option<String>,

    /// Number of concurrent connections
    #[arg(
        short = 't',
        long,
        value_name = "N",
        default_value_t = 30,
        help_heading = "Scan Options"
    )]
    threads: usize,

    /// Maximum in-flight probe requests across all targets
    #[arg(
        long,
        value_name = "N",
        default_value_t = 50,
        help_heading = "Scan Options"
    )]
    rate_limit: usize,

    /// Per-request timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 5,
        help_heading = "Scan Options"
    )]
    timeout: u64,

    /// Output JSON file for findings
    #[arg(short, long, value_name = "FILE", help_heading = "Output Options")]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    print_banner();

    // Configuration errors are fatal before any network activity
    if args.url.is_none() && args.file.is_none() {
        eprintln!("{}", "[!] Either --url or --file is required".red().bold());
        std::process::exit(1);
    }

    let mut urls = Vec::new();
    if let Some(ref url) = args.url {
        urls.push(url.clone());
    }
    if let Some(ref file_path) = args.file {
        urls.extend(load_urls_from_file(file_path)?);
    }

    if urls.is_empty() {
        eprintln!("{}", "[!] No target URLs to scan".red().bold());
        std::process::exit(1);
    }

    let config = ScanConfig {
        concurrency: args.threads,
        max_in_flight: args.rate_limit,
        timeout_secs: args.timeout,
    };
    let scanner = SqlSweepScanner::new(config)?;
    let findings = scanner.run(&urls).await;

    reporter::display_findings(&findings);

    if let Some(ref output) = args.output {
        reporter::save_findings(&findings, Path::new(output))?;
        println!("\n{}", format!("[+] Findings saved to: {}", output).green());
    }

    Ok(())
}

fn print_banner() {
    println!(
        "{}",
        "╔══════════════════════════════════════════════════╗"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "║        SqlSweep - SQL Injection Scanner          ║"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════╝"
            .cyan()
            .bold()
    );
}

/// Read targets from a file, one URL per line. Blank lines and `#` comments
/// are ignored. An unreadable file is a fatal configuration error.
fn load_urls_from_file(path: &str) -> Result<Vec<String>> {
    let file = File::open(path).context(format!("Failed to read target file: {}", path))?;
    let reader = BufReader::new(file);

    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line.context(format!("Failed to read line from: {}", path))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            urls.push(trimmed.to_string());
        }
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn target_file_skips_blanks_and_comments() {
        let path = std::env::temp_dir().join("sqlsweep_targets_test.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "http://a.test/?id=1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "  http://b.test/?id=2  ").unwrap();

        let urls = load_urls_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(urls, vec!["http://a.test/?id=1", "http://b.test/?id=2"]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_target_file_is_an_error() {
        assert!(load_urls_from_file("/nonexistent/sqlsweep_targets.txt").is_err());
    }
}
