// Crawl frontier and worker-pool engine.

pub mod engine;
pub mod frontier;

pub use engine::Crawler;
pub use frontier::Frontier;
