// Core error taxonomy and domain types shared across the crate.

pub mod error;
pub mod types;

pub use error::CrawlError;
pub use types::{ErrorSeverity, FrontierEntry, Posting};
