use search_engine::processing::{extract_links, normalize_term};
use search_engine::Indexer;

#[test]
fn tokenizer_length_filter_boundaries() {
    // filter_stopwords = false, so no file is read and this can't fail.
    let indexer = Indexer::new(false, "stopwords.txt").unwrap();
    let freq = indexer.extract_words("ox two-letter three four-letter-word fourty");
    // "ox" (2 chars) is below the 3-char minimum and must be dropped.
    assert!(!freq.contains_key("ox"));
}

#[test]
fn tokenizer_normalizes_case_and_unicode() {
    assert_eq!(normalize_term("CAFÉ"), normalize_term("café"));
}

#[test]
fn link_extraction_resolves_relative_hrefs_against_the_page_url() {
    let html = r#"<a href="/docs/page">docs</a>"#;
    let links = extract_links(html, "https://example.com/start");
    assert_eq!(links, vec!["https://example.com/docs/page".to_string()]);
}

#[test]
fn link_extraction_keeps_absolute_links_untouched() {
    let html = r#"<a href="https://other.example/x">x</a>"#;
    let links = extract_links(html, "https://example.com/start");
    assert_eq!(links, vec!["https://other.example/x".to_string()]);
}
