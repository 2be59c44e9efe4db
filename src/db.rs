use std::io;
use std::path::{Path, PathBuf};

use sqlx::ConnectOptions;
use sqlx::Connection;
use sqlx::sqlite::SqliteConnectOptions;
use tracing::{debug, warn};

use crate::errors::DataSourceError;

/// Fails unless `path` names an existing regular file.
pub fn validate_datastore_path(path: &Path) -> Result<(), DataSourceError> {
    let display = path.display().to_string();
    let metadata = std::fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DataSourceError::Missing(display.clone()),
        _ => DataSourceError::Inaccessible {
            path: display.clone(),
            source,
        },
    })?;
    if !metadata.is_file() {
        return Err(DataSourceError::NotAFile(display));
    }
    Ok(())
}

/// Reads the address column out of a SQLite file.
///
/// The connection is read-only, never creates the file, and is closed before
/// `load_addresses` returns.
#[derive(Debug, Clone)]
pub struct AddressRepo {
    path: PathBuf,
    table: String,
    column: String,
}

impl AddressRepo {
    pub fn new(
        path: impl Into<PathBuf>,
        table: &str,
        column: &str,
    ) -> Result<Self, DataSourceError> {
        check_identifier("table", table)?;
        check_identifier("column", column)?;
        Ok(Self {
            path: path.into(),
            table: table.to_string(),
            column: column.to_string(),
        })
    }

    /// Every non-NULL value of the column, in the order SQLite returns them.
    pub async fn load_addresses(&self) -> Result<Vec<String>, DataSourceError> {
        validate_datastore_path(&self.path)?;

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .create_if_missing(false);
        let mut conn = options.connect().await?;

        // Identifiers are checked in `new`; values are cast so INTEGER or REAL
        // cells still come back as text.
        let sql = format!(
            r#"SELECT CAST("{}" AS TEXT) FROM "{}""#,
            self.column, self.table
        );
        let rows = sqlx::query_scalar::<_, Option<String>>(&sql)
            .fetch_all(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            debug!("error closing datastore connection: {e}");
        }
        let rows = rows?;

        let total = rows.len();
        let addresses: Vec<String> = rows.into_iter().flatten().collect();
        if addresses.len() < total {
            warn!(
                skipped = total - addresses.len(),
                table = %self.table,
                column = %self.column,
                "skipping NULL addresses"
            );
        }
        debug!(count = addresses.len(), path = %self.path.display(), "read addresses");
        Ok(addresses)
    }
}

fn check_identifier(kind: &'static str, name: &str) -> Result<(), DataSourceError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(DataSourceError::BadIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}
