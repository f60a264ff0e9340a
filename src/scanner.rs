// scanner.rs - Concurrent SQL Injection Probe Engine
// Purpose: Fan out (URL x parameter x payload) probes with bounded
// concurrency, classify each HTTP response, and aggregate findings.
// Features:
//  - Semaphore-gated admission: caps in-flight requests across all targets
//  - Per-(URL, parameter) dedup so one payload probes each parameter
//  - Redirects disabled, TLS verification disabled (test/self-signed hosts)
//  - Transport failures recovered locally, never abort the scan

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode, redirect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::dedup::DedupRegistry;
use crate::params;
use crate::payloads::PAYLOADS;

/// Literal substrings scanned for (case-insensitive) in 200 response bodies.
const SQL_SIGNATURES: &[&str] = &["sql", "mysql", "oracle", "syntax", "error"];

/// Evidence excerpt length for signature findings.
const EVIDENCE_CHARS: usize = 100;

#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Transport-level connection ceiling (enables keep-alive reuse)
    pub concurrency: usize,
    /// Global cap on in-flight probe requests
    pub max_in_flight: usize,
    /// Total per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: 30,
            max_in_flight: 50,
            timeout_secs: 5,
        }
    }
}

/// How a response was classified as suspicious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// HTTP 5xx status, body never inspected
    Error,
    /// SQL error signature present in a 200 response body
    SqlSignature,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::Error => "error",
            FindingKind::SqlSignature => "sql-signature",
        }
    }
}

/// A parameter/payload combination that exhibited a vulnerability signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// The rewritten URL that triggered the signature
    pub url: String,
    pub parameter: String,
    pub payload: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    /// Truncated body excerpt, or the server error status line
    pub evidence: String,
}

/// Typed outcome of a single probe. Transport failures map to `Skipped`
/// rather than propagating, so one dead host never aborts the scan.
#[derive(Debug)]
pub enum ProbeOutcome {
    Finding(Finding),
    /// Response looked benign
    Clean,
    /// Parameter already claimed, or the request itself failed
    Skipped,
}

pub struct SqlSweepScanner {
    client: Client,
    admission: Arc<Semaphore>,
    dedup: Arc<DedupRegistry>,
    config: ScanConfig,
}

impl SqlSweepScanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(true)
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(config.concurrency)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            admission: Arc::new(Semaphore::new(config.max_in_flight)),
            dedup: Arc::new(DedupRegistry::new()),
            config,
        })
    }

    /// Run the single scan phase: expand every (URL x parameter x payload)
    /// task, dispatch them all, wait for completion, and return the
    /// aggregated findings. Task completion order is undefined.
    pub async fn run(&self, urls: &[String]) -> Vec<Finding> {
        let tasks = self.expand_tasks(urls);
        if tasks.is_empty() {
            println!(
                "{}",
                "[!] No query parameters found in any target URL".yellow()
            );
            return Vec::new();
        }

        println!(
            "{}",
            format!(
                "[*] {} URLs expanded into {} probe tasks",
                urls.len(),
                tasks.len()
            )
            .cyan()
        );
        println!(
            "{}",
            format!(
                "[*] Limits: {} connections, {} in-flight probes, {}s timeout",
                self.config.concurrency, self.config.max_in_flight, self.config.timeout_secs
            )
            .cyan()
        );

        let bar = ProgressBar::new(tasks.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} probes dispatched",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );

        let mut handles = Vec::with_capacity(tasks.len());
        for (url, param, payload) in tasks {
            let client = self.client.clone();
            let admission = Arc::clone(&self.admission);
            let dedup = Arc::clone(&self.dedup);

            handles.push(tokio::spawn(async move {
                probe(&client, &admission, &dedup, &url, &param, payload).await
            }));
            // Progress tracks dispatched work, not completed work
            bar.inc(1);
        }

        let mut findings = Vec::new();
        for handle in handles {
            if let Ok(ProbeOutcome::Finding(finding)) = handle.await {
                findings.push(finding);
            }
        }
        bar.finish_and_clear();

        println!(
            "{}",
            format!(
                "[*] Scan phase complete: {} parameters probed",
                self.dedup.claimed_count()
            )
            .cyan()
        );

        findings
    }

    /// Build the full task list. URLs with no query string contribute zero
    /// tasks; unparseable URLs are warned about and skipped, never fatal.
    fn expand_tasks(&self, urls: &[String]) -> Vec<(String, String, &'static str)> {
        let mut tasks = Vec::new();
        for url in urls {
            let extracted = match params::extract_params(url) {
                Ok(extracted) => extracted,
                Err(e) => {
                    println!(
                        "{}",
                        format!("[!] Skipping unparseable URL {}: {}", url, e).yellow()
                    );
                    continue;
                }
            };

            for (name, _) in &extracted {
                for payload in PAYLOADS {
                    tasks.push((url.clone(), name.clone(), *payload));
                }
            }
        }
        tasks
    }
}

/// Execute one probe. Never returns an error to the caller: dedup misses and
/// transport failures both collapse into `ProbeOutcome::Skipped`.
async fn probe(
    client: &Client,
    admission: &Semaphore,
    dedup: &DedupRegistry,
    url: &str,
    param: &str,
    payload: &str,
) -> ProbeOutcome {
    let probe_url = match params::build_payload_url(url, param, payload) {
        Ok(probe_url) => probe_url,
        Err(_) => return ProbeOutcome::Skipped,
    };

    // First claimant wins; losing payload variants make no network call.
    if !dedup.try_claim(url, param) {
        return ProbeOutcome::Skipped;
    }

    // Permit is held for the whole request/classify window and released on
    // every exit path when the guard drops.
    let _permit = match admission.acquire().await {
        Ok(permit) => permit,
        Err(_) => return ProbeOutcome::Skipped,
    };

    let response = match client.get(&probe_url).send().await {
        Ok(response) => response,
        // Timeouts and connection errors are inconclusive, not findings
        Err(_) => return ProbeOutcome::Skipped,
    };

    classify(response, probe_url, param, payload).await
}

/// Classify a response into a finding or a clean result.
async fn classify(
    response: reqwest::Response,
    probe_url: String,
    param: &str,
    payload: &str,
) -> ProbeOutcome {
    let status = response.status();

    // Status-only check: fires even for 5xx responses with bodies
    if status.as_u16() >= 500 {
        return ProbeOutcome::Finding(Finding {
            url: probe_url,
            parameter: param.to_string(),
            payload: payload.to_string(),
            kind: FindingKind::Error,
            evidence: format!("Server Error: {}", status.as_u16()),
        });
    }

    // Non-200 below 500 is inconclusive; body is never read
    if status != StatusCode::OK {
        return ProbeOutcome::Clean;
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(_) => return ProbeOutcome::Skipped,
    };

    let lowered = body.to_lowercase();
    if SQL_SIGNATURES.iter().any(|sig| lowered.contains(sig)) {
        ProbeOutcome::Finding(Finding {
            url: probe_url,
            parameter: param.to_string(),
            payload: payload.to_string(),
            kind: FindingKind::SqlSignature,
            // Original-case excerpt; char-based so multibyte bodies are safe
            evidence: body.chars().take(EVIDENCE_CHARS).collect(),
        })
    } else {
        ProbeOutcome::Clean
    }
}
