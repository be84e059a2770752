/// The search HTTP server: a `TcpListener` accept loop over a fixed thread
/// pool, two routes (`GET /` and `POST /search`), `Connection: close` on
/// every response (no keep-alive), and shutdown driven by a shared
/// `AtomicBool` that a signal handler installed by the caller clears.
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::core::CrawlError;
use crate::server::render;
use crate::storage::Storage;

const ACCEPT_POLL_TIMEOUT: Duration = Duration::from_millis(200);

pub struct SearchServer {
    port: u16,
    storage: Arc<Storage>,
    html_dir: PathBuf,
}

impl SearchServer {
    pub fn new(port: u16, storage: Arc<Storage>, html_dir: impl Into<PathBuf>) -> Self {
        Self {
            port,
            storage,
            html_dir: html_dir.into(),
        }
    }

    /// Accepts connections until `running` is cleared. Each connection is
    /// handled on a thread from a fixed pool sized to
    /// `available_parallelism()`; the listener itself is nonblocking, and the
    /// accept loop sleeps [`ACCEPT_POLL_TIMEOUT`] between empty polls so it
    /// can notice shutdown promptly instead of blocking forever in `accept`.
    pub fn run(&self, running: &Arc<AtomicBool>) -> Result<(), CrawlError> {
        let listener = TcpListener::bind(("0.0.0.0", self.port))
            .map_err(|e| CrawlError::Network(format!("bind to port {}: {e}", self.port)))?;
        listener.set_nonblocking(true)?;
        tracing::info!(port = self.port, "search server listening");

        let num_threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        let pool = ThreadPool::new(num_threads);

        while running.load(Ordering::Relaxed) {
            match listener.accept() {
                Ok((stream, addr)) => {
                    tracing::info!(%addr, "accepted connection");
                    let storage = Arc::clone(&self.storage);
                    let html_dir = self.html_dir.clone();
                    pool.execute(move || {
                        if let Err(err) = handle_connection(stream, &storage, &html_dir) {
                            tracing::error!(error = %err, "error handling request");
                        }
                    });
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_TIMEOUT);
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }

        pool.join();
        tracing::info!("search server stopped");
        Ok(())
    }
}

fn handle_connection(
    mut stream: TcpStream,
    storage: &Storage,
    html_dir: &std::path::Path,
) -> Result<(), CrawlError> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();

    let mut content_length = 0usize;
    loop {
        let mut header_line = String::new();
        if reader.read_line(&mut header_line)? == 0 {
            break;
        }
        let header_line = header_line.trim_end();
        if header_line.is_empty() {
            break;
        }
        if let Some((name, value)) = header_line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body)?;
    }
    let body = String::from_utf8_lossy(&body).into_owned();

    let (status, content_type, response_body) = match (method.as_str(), target.as_str()) {
        ("GET", "/") => {
            let html = std::fs::read_to_string(html_dir.join("search_form.html"))
                .map_err(|e| CrawlError::Template(format!("search_form.html: {e}")))?;
            (200, "text/html", html)
        }
        ("POST", "/search") => {
            let decoded = render::decode_first_field(&body);
            tracing::info!(query = %decoded, "request body decoded");
            let terms = render::query_terms(&decoded);
            for term in &terms {
                tracing::info!(term = %term, "normalized search term");
            }

            match storage.search(&terms) {
                Ok(results) => {
                    let template = std::fs::read_to_string(html_dir.join("search_results.html"))
                        .map_err(|e| CrawlError::Template(format!("search_results.html: {e}")))?;
                    let rendered = render::render_results(&template, &results)?;
                    (200, "text/html", rendered)
                }
                Err(err) => {
                    tracing::error!(error = %err, "search query failed");
                    (500, "text/html", "<p>Internal error while searching.</p>".to_string())
                }
            }
        }
        _ => (404, "text/html", "404 Not Found".to_string()),
    };

    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{body}",
        reason = reason_phrase(status),
        len = response_body.len(),
        body = response_body,
    );
    stream.write_all(response.as_bytes())?;
    Ok(())
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// A fixed pool of worker threads pulling jobs off an MPSC channel, closed
/// and joined on drop or explicit [`ThreadPool::join`].
struct ThreadPool {
    workers: Vec<thread::JoinHandle<()>>,
    sender: Option<std::sync::mpsc::Sender<Job>>,
}

type Job = Box<dyn FnOnce() + Send + 'static>;

impl ThreadPool {
    fn new(size: usize) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel::<Job>();
        let receiver = Arc::new(std::sync::Mutex::new(receiver));

        let workers = (0..size)
            .map(|_| {
                let receiver = Arc::clone(&receiver);
                thread::spawn(move || {
                    loop {
                        let job = {
                            let receiver = receiver.lock().expect("thread pool mutex poisoned");
                            receiver.recv()
                        };
                        match job {
                            Ok(job) => job(),
                            Err(_) => return,
                        }
                    }
                })
            })
            .collect();

        Self {
            workers,
            sender: Some(sender),
        }
    }

    fn execute(&self, job: impl FnOnce() + Send + 'static) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Box::new(job));
        }
    }

    fn join(mut self) {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_phrase_covers_known_statuses() {
        assert_eq!(reason_phrase(200), "OK");
        assert_eq!(reason_phrase(404), "Not Found");
    }
}
