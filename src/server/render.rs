/// Request-body decoding and result-page rendering for the search server.
use crate::core::{CrawlError, Posting};
use crate::processing::normalize_term;

const RESULTS_MARKER: &str = "<!--RESULTS-->";

/// Decodes `application/x-www-form-urlencoded` percent-escapes and `+` as
/// space. Malformed `%` escapes (missing or non-hex digits) are copied
/// through verbatim rather than rejected.
pub fn url_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi * 16 + lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    // Percent-escapes decode to raw bytes, so multi-byte UTF-8 sequences
    // (e.g. Cyrillic terms) must be reassembled before conversion — decoding
    // byte-by-byte into chars would mangle anything outside ASCII.
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Extracts the value of the first `key=value` pair in a urlencoded form
/// body and decodes it. The original client only ever sends a single
/// `q=...` field, so this doesn't attempt general multi-field parsing.
pub fn decode_first_field(body: &str) -> String {
    match body.split_once('=') {
        Some((_key, value)) => url_decode(value.split('&').next().unwrap_or("")),
        None => String::new(),
    }
}

/// Splits a decoded query into normalized search terms.
pub fn query_terms(decoded: &str) -> Vec<String> {
    decoded.split_whitespace().map(normalize_term).collect()
}

/// Renders the results `<ul>` (or a "nothing found" message) into the
/// `search_results.html` template's `<!--RESULTS-->` marker.
pub fn render_results(template: &str, results: &[Posting]) -> Result<String, CrawlError> {
    let fragment = if results.is_empty() {
        "<p><em>Ничего не найдено.</em></p>".to_string()
    } else {
        let mut html = String::from("<ul>");
        for posting in results {
            html.push_str(&format!(
                "<li><a href='{url}'>{url}</a> — рейтинг: {score}</li>",
                url = escape_html(&posting.url),
                score = posting.frequency
            ));
        }
        html.push_str("</ul>");
        html
    };

    if !template.contains(RESULTS_MARKER) {
        return Err(CrawlError::Template(
            "search_results.html is missing the <!--RESULTS--> marker".to_string(),
        ));
    }
    Ok(template.replacen(RESULTS_MARKER, &fragment, 1))
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
