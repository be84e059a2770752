// Concurrent web crawler, relational inverted index, and minimal HTTP
// search front-end.
pub mod config;
pub mod core;
pub mod crawler;
pub mod logging;
pub mod net;
pub mod processing;
pub mod server;
pub mod storage;

pub use config::AppConfig;
pub use core::{CrawlError, ErrorSeverity, FrontierEntry, Posting};
pub use crawler::Crawler;
pub use processing::Indexer;
pub use server::SearchServer;
pub use storage::Storage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
