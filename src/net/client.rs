/// A minimal blocking HTTP/1.1 client: manual request construction, one
/// deadline covering connect + TLS handshake + write + read, and recursive
/// redirect following capped at 10 hops. TLS goes through the platform trust
/// store via `native-tls`; there's no connection pooling — each request
/// opens and tears down its own socket, which keeps the deadline semantics
/// simple and matches the crawler's one-shot fetch pattern.
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use native_tls::TlsConnector;

use crate::core::CrawlError;
use crate::net::url;

const MAX_REDIRECTS: u32 = 10;

/// Fetches `url`, following `301`/`302` redirects via their `Location`
/// header up to [`MAX_REDIRECTS`] hops. `timeout` bounds each hop's
/// connect+handshake+write+read independently — a redirect chain gets a
/// fresh deadline per hop, not one deadline for the whole chain.
pub fn get(target: &str, timeout: Duration) -> Result<String, CrawlError> {
    get_with_redirects(target, timeout, 0)
}

fn get_with_redirects(target: &str, timeout: Duration, redirects: u32) -> Result<String, CrawlError> {
    if !url::is_http_url(target) {
        return Err(CrawlError::InvalidUrl(target.to_string()));
    }
    let (scheme, host, path) = url::split(target).ok_or_else(|| CrawlError::InvalidUrl(target.to_string()))?;

    let deadline = Instant::now() + timeout;
    let (host_only, port) = split_host_port(host, scheme);

    let addr = (host_only.as_str(), port)
        .to_socket_addrs()
        .map_err(|e| CrawlError::Network(format!("resolve {host_only}:{port}: {e}")))?
        .next()
        .ok_or_else(|| CrawlError::Network(format!("no addresses for {host_only}:{port}")))?;
    let stream = TcpStream::connect_timeout(&addr, remaining(deadline)?)
        .map_err(|e| CrawlError::Network(format!("connect to {host_only}:{port}: {e}")))?;
    stream.set_read_timeout(Some(remaining(deadline)?))?;
    stream.set_write_timeout(Some(remaining(deadline)?))?;

    let (status, headers, body) = if scheme == "https" {
        let connector = TlsConnector::new()?;
        let mut tls = connector
            .connect(&host_only, stream)
            .map_err(|e| CrawlError::Tls(e.to_string()))?;
        perform_request(&mut tls, &host_only, path, deadline)?
    } else {
        let mut stream = stream;
        perform_request(&mut stream, &host_only, path, deadline)?
    };

    match status {
        200 => Ok(body),
        301 | 302 => {
            if redirects + 1 > MAX_REDIRECTS {
                return Err(CrawlError::TooManyRedirects(MAX_REDIRECTS));
            }
            let location = headers
                .get("location")
                .ok_or(CrawlError::MissingLocationHeader)?;
            get_with_redirects(location, timeout, redirects + 1)
        }
        other => Err(CrawlError::Http(other)),
    }
}

fn perform_request<S: Read + Write>(
    socket: &mut S,
    host: &str,
    path: &str,
    deadline: Instant,
) -> Result<(u16, std::collections::HashMap<String, String>, String), CrawlError> {
    let request = format!(
        "GET {path} HTTP/1.1\r\nHost: {host}\r\nUser-Agent: search-engine-crawler/1.0\r\nAccept: */*\r\nConnection: close\r\n\r\n"
    );
    socket
        .write_all(request.as_bytes())
        .map_err(|e| CrawlError::Network(format!("write to {host}: {e}")))?;

    let mut raw = Vec::new();
    socket
        .read_to_end(&mut raw)
        .map_err(|e| CrawlError::Network(format!("read from {host}: {e}")))?;
    if Instant::now() > deadline {
        return Err(CrawlError::Timeout);
    }

    parse_response(&raw)
}

fn parse_response(
    raw: &[u8],
) -> Result<(u16, std::collections::HashMap<String, String>, String), CrawlError> {
    let text = String::from_utf8_lossy(raw);
    let (head, body) = text
        .split_once("\r\n\r\n")
        .ok_or_else(|| CrawlError::Parse("malformed HTTP response: no header/body split".into()))?;

    let mut lines = head.lines();
    let status_line = lines
        .next()
        .ok_or_else(|| CrawlError::Parse("empty HTTP response".into()))?;
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| CrawlError::Parse(format!("malformed status line: {status_line}")))?;

    let mut headers = std::collections::HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    Ok((status, headers, body.to_string()))
}

fn split_host_port(host: &str, scheme: &str) -> (String, u16) {
    match host.split_once(':') {
        Some((h, p)) => (h.to_string(), p.parse().unwrap_or(default_port(scheme))),
        None => (host.to_string(), default_port(scheme)),
    }
}

fn default_port(scheme: &str) -> u16 {
    if scheme == "https" { 443 } else { 80 }
}

fn remaining(deadline: Instant) -> Result<Duration, CrawlError> {
    let now = Instant::now();
    if now >= deadline {
        Err(CrawlError::Timeout)
    } else {
        Ok(deadline - now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_ok_response() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<html></html>";
        let (status, headers, body) = parse_response(raw).unwrap();
        assert_eq!(status, 200);
        assert_eq!(headers.get("content-type").unwrap(), "text/html");
        assert_eq!(body, "<html></html>");
    }

    #[test]
    fn parses_a_redirect_with_location() {
        let raw = b"HTTP/1.1 302 Found\r\nLocation: http://example.com/next\r\n\r\n";
        let (status, headers, _) = parse_response(raw).unwrap();
        assert_eq!(status, 302);
        assert_eq!(headers.get("location").unwrap(), "http://example.com/next");
    }

    #[test]
    fn rejects_malformed_response() {
        let raw = b"not an http response";
        assert!(parse_response(raw).is_err());
    }

    #[test]
    fn splits_host_and_port_with_defaults() {
        assert_eq!(split_host_port("example.com", "http"), ("example.com".to_string(), 80));
        assert_eq!(split_host_port("example.com", "https"), ("example.com".to_string(), 443));
        assert_eq!(split_host_port("example.com:8080", "http"), ("example.com".to_string(), 8080));
    }
}
