/// Relational inverted index backed by Postgres: `documents` (one row per
/// crawled URL), `terms` (one row per distinct token), and `postings`
/// (document/term/frequency triples). A single `postgres::Client` behind a
/// `Mutex` serves every worker thread — the blocking driver doesn't support
/// concurrent use of one connection, and a connection pool is more
/// machinery than this crawler's write volume warrants.
use std::collections::HashMap;
use std::sync::Mutex;

use postgres::{Client, NoTls};

use crate::config::DatabaseConfig;
use crate::core::{CrawlError, Posting};

pub struct Storage {
    client: Mutex<Client>,
}

impl Storage {
    pub fn connect(config: &DatabaseConfig) -> Result<Self, CrawlError> {
        let client = Client::connect(&config.connection_string(), NoTls)?;
        Ok(Self {
            client: Mutex::new(client),
        })
    }

    /// Creates `documents`, `terms`, and `postings` if they don't already
    /// exist. Safe to call on every startup.
    pub fn init(&self) -> Result<(), CrawlError> {
        let mut client = self.client.lock().expect("storage mutex poisoned");
        client.batch_execute(
            "
            CREATE TABLE IF NOT EXISTS documents (
                id SERIAL PRIMARY KEY,
                url TEXT UNIQUE NOT NULL
            );
            CREATE TABLE IF NOT EXISTS terms (
                id SERIAL PRIMARY KEY,
                term TEXT UNIQUE NOT NULL
            );
            CREATE TABLE IF NOT EXISTS postings (
                document_id INTEGER NOT NULL REFERENCES documents(id),
                term_id INTEGER NOT NULL REFERENCES terms(id),
                frequency BIGINT NOT NULL,
                PRIMARY KEY (document_id, term_id)
            );
            ",
        )?;
        Ok(())
    }

    /// Upserts `url` and its term frequencies in one transaction: the
    /// document row, each term row, and each posting row. Frequencies are
    /// overwritten on conflict, so re-crawling a URL replaces its old index
    /// entries rather than accumulating them.
    pub fn save_document(&self, url: &str, words: &HashMap<String, i64>) -> Result<(), CrawlError> {
        let mut client = self.client.lock().expect("storage mutex poisoned");
        let mut txn = client.transaction()?;

        txn.execute(
            "INSERT INTO documents (url) VALUES ($1) ON CONFLICT (url) DO NOTHING",
            &[&url],
        )?;
        let document_id: i32 = txn
            .query_one("SELECT id FROM documents WHERE url = $1", &[&url])?
            .get(0);

        for (term, frequency) in words {
            txn.execute(
                "INSERT INTO terms (term) VALUES ($1) ON CONFLICT (term) DO NOTHING",
                &[term],
            )?;
            let term_id: i32 = txn
                .query_one("SELECT id FROM terms WHERE term = $1", &[term])?
                .get(0);

            txn.execute(
                "INSERT INTO postings (document_id, term_id, frequency) VALUES ($1, $2, $3)
                 ON CONFLICT (document_id, term_id) DO UPDATE SET frequency = $3",
                &[&document_id, &term_id, frequency],
            )?;
        }

        txn.commit()?;
        Ok(())
    }

    /// Conjunctive (AND) search: documents matching every term in `terms`,
    /// ranked by summed frequency, top 10. Returns an empty result for an
    /// empty query rather than matching everything.
    pub fn search(&self, terms: &[String]) -> Result<Vec<Posting>, CrawlError> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut client = self.client.lock().expect("storage mutex poisoned");
        let rows = client.query(
            "SELECT d.url, SUM(p.frequency)::BIGINT AS total
             FROM documents d
             JOIN postings p ON p.document_id = d.id
             JOIN terms t ON t.id = p.term_id
             WHERE t.term = ANY($1)
             GROUP BY d.url
             HAVING COUNT(DISTINCT t.term) = $2
             ORDER BY total DESC
             LIMIT 10",
            &[&terms, &(terms.len() as i64)],
        )?;

        Ok(rows
            .into_iter()
            .map(|row| Posting {
                url: row.get(0),
                frequency: row.get(1),
            })
            .collect())
    }
}
