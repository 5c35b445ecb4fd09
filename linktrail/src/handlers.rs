use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use linktrail_core::crawl::{CrawlOptions, execute_crawl};
use linktrail_core::logging::{init_logging, init_logging_stderr};
use linktrail_core::report::{ReportFormat, render_report};
use linktrail_scanner::fetch::DEFAULT_USER_AGENT;
use linktrail_scanner::normalize_seed;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const SEED_PROMPT: &str = "Enter the base URL to start crawling (e.g., 'https://example.com'):";

pub fn print_banner() {
    println!("{}", "linktrail".bright_cyan().bold());
    println!(
        "{}",
        format!("v{} - breadth-first link discovery", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!();
}

/// Parse a single line of user input as a seed URL. Blank input yields `None`.
pub fn parse_seed_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(normalize_seed(line))
}

/// Ask for a seed URL on `writer`, reading the answer from `reader`.
pub fn prompt_for_seed<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<String> {
    write!(writer, "{} ", SEED_PROMPT)?;
    writer.flush()?;

    let mut response = String::new();
    reader.read_line(&mut response)?;

    match parse_seed_line(&response) {
        Some(seed) => Ok(seed),
        None => bail!("No seed URL given"),
    }
}

/// Use the URL argument if present, otherwise prompt on the terminal.
pub fn resolve_seed(url: Option<&String>) -> Result<String> {
    if let Some(url) = url
        && let Some(seed) = parse_seed_line(url)
    {
        return Ok(seed);
    }

    let stdin = io::stdin();
    prompt_for_seed(&mut stdin.lock(), &mut io::stdout())
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn build_crawl_options(sub_matches: &ArgMatches, seed: String, quiet: bool) -> CrawlOptions {
    let mut options = CrawlOptions::new(seed);

    if let Some(dir) = sub_matches.get_one::<String>("output-dir") {
        options.output_dir = expand_path(dir);
    }
    if let Some(timeout) = sub_matches.get_one::<u64>("timeout") {
        options.timeout_secs = *timeout;
    }
    options.user_agent = sub_matches
        .get_one::<String>("user-agent")
        .cloned()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    options.show_progress_bars = !quiet;

    options
}

pub fn setup_logging(log_file: &Path) {
    if let Err(e) = init_logging(log_file) {
        eprintln!(
            "{} Could not open log file {} ({}), logging to stderr",
            "!".yellow().bold(),
            log_file.display(),
            e
        );
        init_logging_stderr();
    }
}

pub fn write_report(report: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("{} Report saved to {}", "✓".green().bold(), path.display());
        }
        None => print!("{}", report),
    }
    Ok(())
}

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) -> Result<()> {
    let log_file = sub_matches
        .get_one::<String>("log-file")
        .map(|p| expand_path(p))
        .unwrap_or_else(|| PathBuf::from(linktrail_core::logging::DEFAULT_LOG_FILE));
    setup_logging(&log_file);

    let seed = resolve_seed(sub_matches.get_one::<String>("URL"))?;
    let options = build_crawl_options(sub_matches, seed, quiet);

    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);

    if !quiet {
        println!("\n🕷️  Crawling {}", options.seed);
        println!("Output dir: {}", options.output_dir.display());
        println!("Log file: {}\n", log_file.display());
    }

    let report = execute_crawl(options).await.context("Crawl failed")?;

    if !quiet {
        println!("\n{} Crawl complete!\n", "✓".green().bold());
    }

    let rendered = render_report(&report, format)?;
    write_report(&rendered, sub_matches.get_one::<PathBuf>("output"))
}
