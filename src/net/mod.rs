// URL parsing/resolution and the blocking HTTP client used by the crawler.

pub mod client;
pub mod url;

pub use client::get;
