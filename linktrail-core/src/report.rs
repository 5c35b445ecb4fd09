// Report generation from a finished crawl

use crate::crawl::CrawlReport;
use crate::error::Result;
use colored::Colorize;
use std::collections::BTreeMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

pub fn render_report(report: &CrawlReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_crawl_report(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| linktrail_scanner::normalize::netloc(url).to_string())
}

/// Human-readable summary: totals, then discovered URLs grouped by host,
/// then fetch failures.
pub fn generate_crawl_report(report: &CrawlReport) -> String {
    let summary = &report.summary;
    let divider = "━".repeat(52);

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", divider));
    out.push_str(&format!("{}\n", "# Summary:".bold()));
    out.push_str(&format!("  Seed: {}\n", summary.seed));
    out.push_str(&format!("  Pages visited: {}\n", summary.visited.len()));
    out.push_str(&format!("  URLs discovered: {}\n", summary.discovered));
    out.push_str(&format!("  Fetch failures: {}\n", summary.failures.len()));
    out.push_str(&format!("  Duration: {:.2?}\n", summary.duration));
    out.push_str(&format!("  Store: {}\n", report.store_path.display()));
    out.push_str(&format!("\n{}\n\n", divider));

    let mut by_host: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for url in &report.stored_urls {
        by_host.entry(host_of(url)).or_default().push(url);
    }

    for (host, urls) in &by_host {
        out.push_str(&format!("## {}\n", host.bright_white().bold()));
        out.push_str(&format!("  {} URLs found\n\n", urls.len()));
        for url in urls {
            out.push_str(&format!("  {}\n", extract_url_path(url)));
        }
        out.push('\n');
    }

    if !summary.failures.is_empty() {
        out.push_str(&format!("{}\n", "## Fetch failures".red().bold()));
        for failure in &summary.failures {
            out.push_str(&format!("  {} {}\n", failure.url, failure.error.dimmed()));
        }
        out.push('\n');
    }

    out
}
