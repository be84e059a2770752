/// URL helpers matching the original system's narrow contract: no
/// fragment/query merging, just scheme+host+path splitting and base-URL +
/// absolute-path resolution. Protocol-relative URLs (`//host/path`) are not
/// specially recognized — they satisfy `is_relative_url` (they begin with
/// `/`) and get resolved against the base origin like any other
/// absolute-path link, which is a known quirk carried over for parity
/// rather than a feature.
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// True if `url` is non-empty and starts with `/`. Note this also matches
/// protocol-relative URLs (`//host/path`) — see the module docs.
pub fn is_relative_url(url: &str) -> bool {
    url.starts_with('/')
}

/// Resolves an absolute-path `relative` URL against `base`'s scheme and
/// host, discarding `base`'s own path. If `base` has no recognizable
/// `scheme://host` prefix, falls back to naive concatenation.
pub fn resolve(base: &str, relative: &str) -> String {
    if let Some(origin) = scheme_and_host(base) {
        format!("{origin}{relative}")
    } else {
        format!("{base}{relative}")
    }
}

/// Splits a URL of the form `scheme://host[:port][/path]` into
/// `(scheme, host_and_port, path)`. `path` defaults to `/` when absent.
pub fn split(url: &str) -> Option<(&str, &str, &str)> {
    let (scheme, rest) = url.split_once("://")?;
    let slash = rest.find('/');
    let (host, path) = match slash {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    Some((scheme, host, path))
}

fn scheme_and_host(url: &str) -> Option<String> {
    let (scheme, host, _path) = split(url)?;
    Some(format!("{scheme}://{host}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_http_and_https() {
        assert!(is_http_url("http://example.com"));
        assert!(is_http_url("https://example.com"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("/relative/path"));
    }

    #[test]
    fn recognizes_relative_urls() {
        assert!(is_relative_url("/foo/bar"));
        assert!(!is_relative_url("http://example.com/foo"));
        assert!(!is_relative_url("foo/bar"));
    }

    #[test]
    fn resolves_relative_against_base_origin() {
        let resolved = resolve("http://example.com/some/page", "/other");
        assert_eq!(resolved, "http://example.com/other");
    }

    #[test]
    fn resolve_falls_back_to_concatenation_without_scheme() {
        let resolved = resolve("example.com", "/other");
        assert_eq!(resolved, "example.com/other");
    }

    #[test]
    fn splits_scheme_host_and_path() {
        let (scheme, host, path) = split("https://example.com:8080/a/b").unwrap();
        assert_eq!(scheme, "https");
        assert_eq!(host, "example.com:8080");
        assert_eq!(path, "/a/b");
    }

    #[test]
    fn split_defaults_path_to_root() {
        let (scheme, host, path) = split("http://example.com").unwrap();
        assert_eq!(scheme, "http");
        assert_eq!(host, "example.com");
        assert_eq!(path, "/");
    }
}
