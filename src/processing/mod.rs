// HTML processing: link discovery and word-frequency tokenization.

pub mod links;
pub mod tokenizer;

pub use links::extract_links;
pub use tokenizer::{Indexer, normalize_term};
