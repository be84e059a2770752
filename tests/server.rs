use search_engine::core::Posting;
use search_engine::server::render;

#[test]
fn decode_first_field_handles_percent_and_plus_encoding() {
    assert_eq!(render::decode_first_field("q=rust+web+crawler"), "rust web crawler");
    assert_eq!(render::decode_first_field("q=a%2Bb"), "a+b");
}

#[test]
fn query_terms_are_normalized_for_the_conjunctive_search() {
    let terms = render::query_terms("Rust WEB Crawler");
    assert_eq!(terms, vec!["rust", "web", "crawler"]);
}

#[test]
fn decodes_percent_encoded_cyrillic_query_into_normalized_terms() {
    let decoded = render::decode_first_field("q=%D0%BC%D0%B8%D1%80+%D0%BF%D1%80%D0%B8%D0%B2%D0%B5%D1%82");
    assert_eq!(decoded, "мир привет");
    assert_eq!(render::query_terms(&decoded), vec!["мир", "привет"]);
}

#[test]
fn render_results_substitutes_the_marker_exactly_once() {
    let template = "<html><body><!--RESULTS--><!--RESULTS--></body></html>";
    let results = vec![Posting {
        url: "http://example.com".to_string(),
        frequency: 3,
    }];
    let rendered = render::render_results(template, &results).unwrap();
    assert_eq!(rendered.matches("<!--RESULTS-->").count(), 1);
    assert!(rendered.contains("http://example.com"));
}
