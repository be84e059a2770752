/// Crate-wide error taxonomy.
///
/// Each variant corresponds to one row of the error taxonomy: configuration
/// errors are fatal at startup, network/fetch and parse errors are local to
/// a single URL and the crawl continues past them, storage errors on ingest
/// roll back their transaction and skip the document, and storage/template
/// errors on the server side end one session without crashing the process.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects (> {0})")]
    TooManyRedirects(u32),

    #[error("redirect response missing Location header")]
    MissingLocationHeader,

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("HTTP error: status {0}")]
    Http(u16),

    #[error("tokenization error: {0}")]
    Parse(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("template error: {0}")]
    Template(String),
}

impl CrawlError {
    /// Advisory severity; callers decide independently whether to abort.
    pub fn severity(&self) -> crate::core::types::ErrorSeverity {
        use crate::core::types::ErrorSeverity;
        match self {
            CrawlError::Config(_) => ErrorSeverity::Critical,
            CrawlError::Network(_)
            | CrawlError::Timeout
            | CrawlError::Tls(_)
            | CrawlError::TooManyRedirects(_)
            | CrawlError::MissingLocationHeader => ErrorSeverity::High,
            CrawlError::Http(_) | CrawlError::InvalidUrl(_) => ErrorSeverity::Medium,
            CrawlError::Parse(_) => ErrorSeverity::Low,
            CrawlError::Storage(_) | CrawlError::Template(_) => ErrorSeverity::High,
        }
    }
}

impl From<std::io::Error> for CrawlError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => CrawlError::Timeout,
            _ => CrawlError::Network(e.to_string()),
        }
    }
}

impl From<native_tls::Error> for CrawlError {
    fn from(e: native_tls::Error) -> Self {
        CrawlError::Tls(e.to_string())
    }
}

impl From<native_tls::HandshakeError<std::net::TcpStream>> for CrawlError {
    fn from(e: native_tls::HandshakeError<std::net::TcpStream>) -> Self {
        CrawlError::Tls(e.to_string())
    }
}

impl From<postgres::Error> for CrawlError {
    fn from(e: postgres::Error) -> Self {
        CrawlError::Storage(e.to_string())
    }
}
