use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{Instrument, error, info, info_span};

use crate::config::Config;
use crate::data_models::{ResultEntry, ResultGroup};
use crate::db::{AddressRepo, validate_datastore_path};
use crate::extractor::Extractor;
use crate::fetcher::SearchClient;
use crate::report::Reporter;
use crate::target::validate_target_url;

/// The pause taken after every address.
pub trait Pacer {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()>;
}

pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub addresses: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: usize,
}

/// Drives one pass over the datastore: validate, load, then for each address
/// search, extract, report and pause.
pub struct Orchestrator<C, P, W: Write> {
    config: Config,
    client: C,
    pacer: P,
    extractor: Extractor,
    reporter: Reporter<W>,
}

impl<C, P, W> Orchestrator<C, P, W>
where
    C: SearchClient,
    P: Pacer,
    W: Write,
{
    pub fn new(config: Config, client: C, pacer: P, out: W) -> Self {
        let extractor = Extractor::new(config.selectors.clone());
        let reporter = Reporter::new(out, config.format);
        Self {
            config,
            client,
            pacer,
            extractor,
            reporter,
        }
    }

    /// Errors only for the fatal cases: an unusable datastore or target URL.
    /// Per-address failures are logged and counted in the summary.
    pub async fn run(&mut self) -> Result<RunSummary> {
        validate_datastore_path(&self.config.db_path)
            .context("cannot use the address datastore")?;
        let url = validate_target_url(&self.config.url)?;

        let repo = AddressRepo::new(&self.config.db_path, &self.config.table, &self.config.column)
            .context("cannot use the address datastore")?;
        let addresses = repo
            .load_addresses()
            .await
            .with_context(|| format!("error reading {}", self.config.db_path.display()))?;

        let mut summary = RunSummary {
            addresses: addresses.len(),
            ..RunSummary::default()
        };
        info!(count = addresses.len(), target = %url, "loaded addresses");

        for (idx, address) in addresses.into_iter().enumerate() {
            info!(address = %address, position = idx + 1, total = summary.addresses, "searching");

            let span = info_span!("search", address = %address);
            let outcome = self
                .client
                .search(&url, &address)
                .instrument(span.clone())
                .await;
            match outcome {
                Ok(body) => {
                    let results = span.in_scope(|| self.collect_results(&body));
                    summary.succeeded += 1;
                    summary.results += results.len();
                    self.publish(ResultGroup::new(address, results));
                }
                Err(_) => summary.failed += 1,
            }

            self.pacer.pause(self.config.delay).await;
        }

        info!(
            addresses = summary.addresses,
            succeeded = summary.succeeded,
            failed = summary.failed,
            results = summary.results,
            "run complete"
        );
        Ok(summary)
    }

    // The parsed document is not Send, so it stays inside this synchronous call.
    fn collect_results(&self, body: &str) -> Vec<ResultEntry> {
        let document = Extractor::parse(body);
        self.extractor.extract(&document).collect()
    }

    fn publish(&mut self, group: ResultGroup) {
        if let Err(e) = self.reporter.report(&group) {
            error!(address = %group.address, "error writing results: {e}");
        }
    }

    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }
}
