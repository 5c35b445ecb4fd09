pub mod crawl;
pub mod data;
pub mod error;
pub mod logging;
pub mod report;

pub use crawl::{CrawlOptions, CrawlReport, crawl_with, execute_crawl};
pub use data::{VisitedStore, fresh_store_path, store_filename};
pub use error::{CoreError, Result};
pub use report::{ReportFormat, generate_crawl_report, render_report};
