#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use addrscout::errors::FetchError;
use addrscout::fetcher::SearchClient;
use addrscout::orchestrator::Pacer;
use anyhow::Result;
use reqwest::Url;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use tempfile::TempDir;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Creates `<dir>/<file>` with a single `addresses(address TEXT)` table.
pub async fn create_address_db(dir: &TempDir, rows: &[Option<&str>]) -> Result<PathBuf> {
    create_db(dir, "addresses.db", "addresses", "address", rows).await
}

pub async fn create_db(
    dir: &TempDir,
    file: &str,
    table: &str,
    column: &str,
    rows: &[Option<&str>],
) -> Result<PathBuf> {
    let path = dir.path().join(file);
    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await?;

    sqlx::query(&format!("CREATE TABLE {table} ({column} TEXT)"))
        .execute(&mut conn)
        .await?;
    let insert = format!("INSERT INTO {table} ({column}) VALUES (?)");
    for row in rows {
        sqlx::query(&insert).bind(*row).execute(&mut conn).await?;
    }
    conn.close().await?;
    Ok(path)
}

pub fn html_page(results: &[(&str, &str)]) -> String {
    let mut body = String::from("<html><head><title>Search</title></head><body>");
    for (title, link) in results {
        body.push_str(&format!(
            r#"<div class="result-class"><h2>{title}</h2><a href="{link}">open</a></div>"#
        ));
    }
    body.push_str("</body></html>");
    body
}

/// Scripted responses keyed by address; records every call.
#[derive(Default)]
pub struct FakeClient {
    responses: Mutex<HashMap<String, Result<String, FetchError>>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn respond(self, address: &str, response: Result<String, FetchError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(address.to_string(), response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SearchClient for FakeClient {
    async fn search(&self, _url: &Url, address: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(address.to_string());
        self.responses
            .lock()
            .unwrap()
            .remove(address)
            .unwrap_or(Err(FetchError::HttpStatus(404)))
    }
}

#[derive(Default)]
pub struct CountingPacer {
    pub pauses: AtomicUsize,
    pub last_delay: Mutex<Option<Duration>>,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

impl Pacer for &CountingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        *self.last_delay.lock().unwrap() = Some(delay);
    }
}

impl SearchClient for &FakeClient {
    async fn search(&self, url: &Url, address: &str) -> Result<String, FetchError> {
        (**self).search(url, address).await
    }
}

/// Collects formatted log lines from the current thread's subscriber.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs a plain-text subscriber as the thread default until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(self.install_subscriber())
    }

    pub fn install_subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }

    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
