/// HTML-to-word-frequency pipeline: strip markup and punctuation, lowercase
/// and Unicode-normalize each token, drop anything outside `[3, 32]`
/// characters, and optionally drop stopwords.
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::core::CrawlError;

const MIN_WORD_LEN: usize = 3;
const MAX_WORD_LEN: usize = 32;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex is valid"));
static PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\n\r\t.,!?:;"'(){}\[\]\\/@#$%^&*+=<>`~|]"#).expect("static regex is valid")
});

pub struct Indexer {
    stopwords: HashSet<String>,
    filter_stopwords: bool,
}

impl Indexer {
    /// `filter_stopwords` mirrors `crawler.filter_stopwords` from the config;
    /// when set, `stopwords_path` is loaded eagerly (one line per word).
    pub fn new(filter_stopwords: bool, stopwords_path: impl AsRef<Path>) -> Result<Self, CrawlError> {
        let stopwords = if filter_stopwords {
            let text = std::fs::read_to_string(stopwords_path.as_ref()).map_err(|e| {
                CrawlError::Config(format!(
                    "cannot read stopwords file {:?}: {e}",
                    stopwords_path.as_ref()
                ))
            })?;
            text.lines()
                .map(|w| normalize_term(w.trim()))
                .filter(|w| !w.is_empty())
                .collect()
        } else {
            HashSet::new()
        };

        Ok(Self {
            stopwords,
            filter_stopwords,
        })
    }

    /// Strips markup/punctuation from `html`, tokenizes on whitespace, and
    /// returns a per-term frequency map. Empty HTML yields an empty map.
    pub fn extract_words(&self, html: &str) -> HashMap<String, i64> {
        let clean = clean_html(html);
        let mut freq = HashMap::new();

        for raw_word in clean.split_whitespace() {
            let word = normalize_term(raw_word);
            if word.len() < MIN_WORD_LEN || word.len() > MAX_WORD_LEN {
                continue;
            }
            if self.filter_stopwords && self.stopwords.contains(&word) {
                continue;
            }
            *freq.entry(word).or_insert(0) += 1;
        }

        freq
    }
}

/// Lowercases and applies Unicode NFC normalization, the shared rule every
/// term — document words and stopwords alike — passes through before
/// comparison or storage.
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase().nfc().collect()
}

fn clean_html(html: &str) -> String {
    let no_tags = TAG_RE.replace_all(html, " ");
    PUNCT_RE.replace_all(&no_tags, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn indexer_without_stopwords() -> Indexer {
        Indexer {
            stopwords: HashSet::new(),
            filter_stopwords: false,
        }
    }

    #[test]
    fn strips_tags_and_punctuation() {
        let indexer = indexer_without_stopwords();
        let freq = indexer.extract_words("<p>Hello, world! Hello again.</p>");
        assert_eq!(freq.get("hello"), Some(&2));
        assert_eq!(freq.get("world"), Some(&1));
        assert_eq!(freq.get("again"), Some(&1));
    }

    #[test]
    fn drops_words_outside_length_bounds() {
        let indexer = indexer_without_stopwords();
        let freq = indexer.extract_words("a an the ox elephant extraordinarily");
        assert!(!freq.contains_key("a"));
        assert!(!freq.contains_key("an"));
        assert!(!freq.contains_key("ox"));
        assert!(freq.contains_key("the"));
        assert!(freq.contains_key("elephant"));
    }

    #[test]
    fn filters_stopwords_when_enabled() {
        let mut indexer = indexer_without_stopwords();
        indexer.filter_stopwords = true;
        indexer.stopwords.insert("the".to_string());
        let freq = indexer.extract_words("the cat sat on the mat");
        assert!(!freq.contains_key("the"));
        assert!(freq.contains_key("cat"));
        assert!(freq.contains_key("mat"));
    }

    #[test]
    fn loads_stopwords_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the\nand\na").unwrap();
        let indexer = Indexer::new(true, file.path()).unwrap();
        assert!(indexer.stopwords.contains("the"));
        assert!(indexer.stopwords.contains("and"));
    }

    #[test]
    fn normalize_term_lowercases() {
        assert_eq!(normalize_term("HeLLo"), "hello");
    }

    #[test]
    fn empty_html_yields_empty_frequency_map() {
        let indexer = indexer_without_stopwords();
        assert!(indexer.extract_words("").is_empty());
    }
}
