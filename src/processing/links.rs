/// Extracts `href` targets from anchor tags, resolving relative paths
/// against the page's own URL. Absolute non-http(s) links (mailto:,
/// javascript:, etc.) are dropped. Protocol-relative links (`//host/path`)
/// are not recognized as a distinct case — see [`crate::net::url`] — so
/// they get resolved against the base origin rather than discarded.
use regex::Regex;
use std::sync::LazyLock;

use crate::net::url;

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s+(?:[^>]*?\s+)?href=["']([^"']*)["']"#).expect("static regex is valid")
});

pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();
    for cap in HREF_RE.captures_iter(html) {
        let href = cap[1].trim();
        if url::is_http_url(href) {
            links.push(href.to_string());
        } else if url::is_relative_url(href) {
            links.push(url::resolve(base_url, href));
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_absolute_and_relative_links() {
        let html = r#"
            <a href="http://other.example/a">A</a>
            <a class="x" href="/relative/page">B</a>
            <a href="mailto:me@example.com">C</a>
        "#;
        let links = extract_links(html, "http://example.com/start");
        assert_eq!(
            links,
            vec![
                "http://other.example/a".to_string(),
                "http://example.com/relative/page".to_string(),
            ]
        );
    }

    #[test]
    fn is_case_insensitive_on_the_tag_and_attribute() {
        let html = r#"<A HREF='/page'>link</A>"#;
        let links = extract_links(html, "http://example.com");
        assert_eq!(links, vec!["http://example.com/page".to_string()]);
    }

    #[test]
    fn protocol_relative_links_resolve_against_the_base_origin() {
        // Not a supported case — this documents the inherited quirk rather
        // than correct behavior: the leading "/" makes it look relative.
        let html = r#"<a href="//cdn.example.com/asset">x</a>"#;
        let links = extract_links(html, "http://example.com");
        assert_eq!(links, vec!["http://example.com//cdn.example.com/asset".to_string()]);
    }
}
