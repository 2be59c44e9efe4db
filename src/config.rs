use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::errors::ConfigError;
use crate::extractor::ResultSelectors;
use crate::report::OutputFormat;

pub const DEFAULT_URL: &str = "https://example.com/search";
pub const DEFAULT_TABLE: &str = "addresses";
pub const DEFAULT_COLUMN: &str = "address";
pub const DEFAULT_QUERY_PARAM: &str = "q";
pub const DEFAULT_USER_AGENT: &str = concat!(
    "addrscout/",
    env!("CARGO_PKG_VERSION"),
    " (address search collector)"
);
pub const DEFAULT_CONTAINER_SELECTOR: &str = "div.result-class";
pub const DEFAULT_TITLE_SELECTOR: &str = "h2";
pub const DEFAULT_LINK_SELECTOR: &str = "a[href]";
pub const DEFAULT_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Command line. Every option falls back to an `ADDRSCOUT_*` environment
/// variable (a `.env` file is loaded first) and then to a built-in default.
#[derive(Debug, Parser)]
#[command(
    name = "addrscout",
    version,
    about = "Search a site for every address stored in a SQLite database"
)]
pub struct Cli {
    /// Path to the SQLite database holding the addresses.
    pub db_path: PathBuf,

    /// Search endpoint queried once per address.
    #[arg(long, env = "ADDRSCOUT_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Seconds to wait after each address.
    #[arg(long, env = "ADDRSCOUT_DELAY", default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: f64,

    /// Per-request timeout in seconds.
    #[arg(long, env = "ADDRSCOUT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Table holding the addresses.
    #[arg(long, env = "ADDRSCOUT_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Column of `--table` holding the address text.
    #[arg(long, env = "ADDRSCOUT_COLUMN", default_value = DEFAULT_COLUMN)]
    pub column: String,

    /// Query-string key the address is sent under.
    #[arg(long, env = "ADDRSCOUT_QUERY_PARAM", default_value = DEFAULT_QUERY_PARAM)]
    pub query_param: String,

    #[arg(long, env = "ADDRSCOUT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// CSS selector for one search result block.
    #[arg(long, env = "ADDRSCOUT_CONTAINER_SELECTOR", default_value = DEFAULT_CONTAINER_SELECTOR)]
    pub container_selector: String,

    /// CSS selector, relative to a result block, for its title element.
    #[arg(long, env = "ADDRSCOUT_TITLE_SELECTOR", default_value = DEFAULT_TITLE_SELECTOR)]
    pub title_selector: String,

    /// CSS selector, relative to a result block, for its anchor.
    #[arg(long, env = "ADDRSCOUT_LINK_SELECTOR", default_value = DEFAULT_LINK_SELECTOR)]
    pub link_selector: String,

    #[arg(long, env = "ADDRSCOUT_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Checked by the orchestrator, after the datastore path.
    pub url: String,
    pub delay: Duration,
    pub timeout: Duration,
    pub table: String,
    pub column: String,
    pub query_param: String,
    pub user_agent: String,
    pub selectors: ResultSelectors,
    pub format: OutputFormat,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Config, ConfigError> {
        Ok(Config {
            db_path: cli.db_path,
            url: cli.url,
            delay: delay_from_secs(cli.delay)?,
            timeout: timeout_from_secs(cli.timeout)?,
            table: cli.table,
            column: cli.column,
            query_param: cli.query_param,
            user_agent: cli.user_agent,
            selectors: ResultSelectors::new(
                &cli.container_selector,
                &cli.title_selector,
                &cli.link_selector,
            )?,
            format: cli.format,
        })
    }

    /// Built-in defaults for everything but the datastore path.
    /// Does not consult the environment.
    pub fn for_datastore(db_path: impl Into<PathBuf>) -> Result<Config, ConfigError> {
        Ok(Config {
            db_path: db_path.into(),
            url: DEFAULT_URL.to_string(),
            delay: delay_from_secs(DEFAULT_DELAY_SECS)?,
            timeout: timeout_from_secs(DEFAULT_TIMEOUT_SECS)?,
            table: DEFAULT_TABLE.to_string(),
            column: DEFAULT_COLUMN.to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            selectors: ResultSelectors::new(
                DEFAULT_CONTAINER_SELECTOR,
                DEFAULT_TITLE_SELECTOR,
                DEFAULT_LINK_SELECTOR,
            )?,
            format: OutputFormat::Text,
        })
    }
}

fn delay_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::Delay(secs))
}

fn timeout_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(ConfigError::Timeout(secs)),
    }
}
