// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{parse_seed_line, prompt_for_seed, resolve_seed};

// Re-export crawl functionality from linktrail-core
pub use linktrail_core::crawl::{CrawlOptions, CrawlReport, execute_crawl};
pub use linktrail_core::report::{ReportFormat, generate_crawl_report, render_report};
