/// The crawler worker pool: one OS thread per `std::thread::available_parallelism`
/// unit, each pulling from a shared [`Frontier`] until it reports quiescence
/// or the shared `running` flag is cleared.
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::config::CrawlerConfig;
use crate::core::FrontierEntry;
use crate::crawler::frontier::{Frontier, Next};
use crate::net;
use crate::processing::{self, Indexer};
use crate::storage::Storage;

pub struct Crawler {
    config: CrawlerConfig,
    storage: Arc<Storage>,
    indexer: Arc<Indexer>,
}

impl Crawler {
    pub fn new(config: CrawlerConfig, storage: Arc<Storage>, indexer: Arc<Indexer>) -> Self {
        Self {
            config,
            storage,
            indexer,
        }
    }

    /// Crawls from `config.start_url` to `config.depth`, blocking until
    /// either the frontier is exhausted or `running` is cleared. Spawns
    /// `std::thread::available_parallelism()` workers.
    pub fn start(&self, running: &Arc<AtomicBool>) {
        let frontier = Arc::new(Frontier::new());
        frontier.seed(&self.config.start_url);

        tracing::info!(start_url = %self.config.start_url, "starting crawl");
        tracing::info!(timeout_ms = self.config.timeout_ms, "timeout set");

        let num_threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                let running = Arc::clone(running);
                let storage = Arc::clone(&self.storage);
                let indexer = Arc::clone(&self.indexer);
                let max_depth = self.config.depth;
                let timeout = Duration::from_millis(self.config.timeout_ms);

                thread::spawn(move || worker_loop(&frontier, &running, &storage, &indexer, max_depth, timeout))
            })
            .collect();

        for handle in handles {
            let _ = handle.join();
        }

        tracing::info!("crawling finished");
    }
}

fn worker_loop(
    frontier: &Frontier,
    running: &AtomicBool,
    storage: &Storage,
    indexer: &Indexer,
    max_depth: u32,
    timeout: Duration,
) {
    loop {
        let entry = match frontier.next(running) {
            Next::Task(entry) => entry,
            Next::Done => return,
        };

        if entry.depth > max_depth {
            frontier.finish();
            continue;
        }

        if let Err(err) = crawl_one(&entry, frontier, storage, indexer, max_depth, timeout) {
            tracing::error!(url = %entry.url, error = %err, "error crawling");
        }
        frontier.finish();
    }
}

/// Runs `net::get` on its own thread and waits for it with a wall-clock
/// deadline, as defense-in-depth on top of `net::client`'s own socket
/// deadline in case the client cannot honor it (e.g. TLS handshake stalls
/// that don't respect the read timeout). The fetch thread is left to run
/// its course on timeout — there's no way to cancel a blocking socket read
/// from the outside — but the worker recovers and moves on.
fn fetch_with_deadline(url: &str, timeout: Duration) -> Result<String, crate::core::CrawlError> {
    let (tx, rx) = mpsc::channel();
    let owned_url = url.to_string();
    thread::spawn(move || {
        let result = net::get(&owned_url, timeout);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => Err(crate::core::CrawlError::Timeout),
    }
}

fn crawl_one(
    entry: &FrontierEntry,
    frontier: &Frontier,
    storage: &Storage,
    indexer: &Indexer,
    max_depth: u32,
    timeout: Duration,
) -> Result<(), crate::core::CrawlError> {
    tracing::info!(url = %entry.url, "fetching page");
    let html = match fetch_with_deadline(&entry.url, timeout) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(url = %entry.url, error = %err, "failed to fetch page");
            return Ok(());
        }
    };

    index_page(&entry.url, &html, storage, indexer)?;

    if entry.depth + 1 <= max_depth {
        for link in processing::extract_links(&html, &entry.url) {
            if frontier.enqueue(&link, entry.depth + 1) {
                tracing::info!(url = %link, "extracted link");
            }
        }
    }

    Ok(())
}

fn index_page(
    url: &str,
    html: &str,
    storage: &Storage,
    indexer: &Indexer,
) -> Result<(), crate::core::CrawlError> {
    tracing::info!(url = %url, "indexing");
    let words = indexer.extract_words(html);

    if words.is_empty() {
        tracing::error!(url = %url, "no words extracted");
        return Ok(());
    }

    tracing::info!(url = %url, term_count = words.len(), "extracted words");
    storage.save_document(url, &words)
}
