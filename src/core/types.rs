/// Domain types shared by the crawler and storage layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A (URL, depth) pair waiting to be fetched. The seed has depth 1; links
/// discovered on a page at depth `d` are enqueued at depth `d + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

/// One row of the inverted index: a document, a term, and how many times
/// that term occurs in that document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub url: String,
    pub frequency: i64,
}
