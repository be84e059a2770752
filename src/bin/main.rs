/// Entry point: `main <config.ini> <crawler|server>`. Loads the config,
/// sets up logging and storage, then dispatches into either the crawl
/// worker pool or the search HTTP server, both of which watch the same
/// SIGINT/SIGTERM-driven shutdown flag.
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, bail};
use search_engine::config::AppConfig;
use search_engine::{Crawler, Indexer, SearchServer, Storage};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!("usage: {} <config.ini> <crawler|server>", args[0]);
    }
    let config_path = &args[1];
    let mode = &args[2];

    let config = AppConfig::load(config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;
    let _logging = search_engine::logging::init(&config.logging)
        .context("failed to initialize logging")?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            tracing::info!("shutdown signal received");
            running.store(false, Ordering::Relaxed);
        })
        .context("failed to install signal handler")?;
    }

    let storage = Arc::new(Storage::connect(&config.database).context("failed to connect to database")?);

    match mode.as_str() {
        "crawler" => {
            tracing::info!("mode: crawler");
            storage.init().context("failed to initialize schema")?;
            let indexer = Arc::new(
                Indexer::new(config.crawler.filter_stopwords, "stopwords.txt")
                    .context("failed to load stopwords")?,
            );
            let crawler = Crawler::new(config.crawler.clone(), Arc::clone(&storage), indexer);
            crawler.start(&running);
        }
        "server" => {
            tracing::info!("mode: server");
            let server = SearchServer::new(config.server.port, Arc::clone(&storage), "html");
            server.run(&running)?;
        }
        other => bail!("unknown mode: {other}"),
    }

    Ok(())
}
