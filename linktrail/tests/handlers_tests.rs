use linktrail::handlers::*;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_parse_seed_line_with_scheme() {
    let result = parse_seed_line("https://example.com");
    assert_eq!(result, Some("https://example.com/".to_string()));
}

#[test]
fn test_parse_seed_line_without_scheme() {
    let result = parse_seed_line("example.com");
    assert_eq!(result, Some("http://example.com/".to_string()));
}

#[test]
fn test_parse_seed_line_strips_query_and_whitespace() {
    let result = parse_seed_line("  https://example.com/docs?page=2#top \n");
    assert_eq!(result, Some("https://example.com/docs".to_string()));
}

#[test]
fn test_parse_seed_line_blank() {
    assert_eq!(parse_seed_line(""), None);
    assert_eq!(parse_seed_line("   \n"), None);
}

#[test]
fn test_prompt_for_seed() {
    let mut input = Cursor::new("www.example.com\n");
    let mut output = Vec::new();

    let seed = prompt_for_seed(&mut input, &mut output).unwrap();

    assert_eq!(seed, "http://www.example.com/");
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.starts_with("Enter the base URL to start crawling"));
}

#[test]
fn test_prompt_for_seed_empty_answer() {
    let mut input = Cursor::new("\n");
    let mut output = Vec::new();

    let result = prompt_for_seed(&mut input, &mut output);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No seed URL"));
}

#[test]
fn test_prompt_for_seed_closed_stdin() {
    let mut input = Cursor::new("");
    let mut output = Vec::new();

    assert!(prompt_for_seed(&mut input, &mut output).is_err());
}

#[test]
fn test_resolve_seed_prefers_argument() {
    let url = "example.org/start".to_string();
    let seed = resolve_seed(Some(&url)).unwrap();
    assert_eq!(seed, "http://example.org/start");
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/stores");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("stores"));

    assert_eq!(expand_path("./local"), PathBuf::from("./local"));
}

#[test]
fn test_write_report_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("report.txt");

    write_report("hello report\n", Some(&path))?;

    assert_eq!(std::fs::read_to_string(&path)?, "hello report\n");
    Ok(())
}

#[test]
fn test_write_report_to_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("report.txt");

    let result = write_report("x", Some(&path));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to write report"));
}
