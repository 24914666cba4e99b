//! Table loader
//!
//! Loads a dataset to an rdb schema store via
//! POST /api/v1/schema/{table}/load.

use crate::client::RdbClient;
use crate::dataset::Dataset;
use eyre::{Context, Result};
use serde_json::Value;

/// Loader for one table in an rdb schema store.
///
/// Serializes its dataset to CSV and uploads it in a single request to
/// the store's schema-load endpoint. Construction performs no I/O — it
/// only composes the destination URL. Each [`load`](TableLoader::load)
/// call makes exactly one upload attempt; there are no retries and no
/// chunking.
///
/// # Example
/// ```no_run
/// use rdb_loader::{Dataset, RdbClient, TableLoader};
///
/// # async fn example() -> eyre::Result<()> {
/// let dataset = Dataset::try_new(
///     vec!["name".into(), "region".into()],
///     vec![vec!["AMP".into(), "APAC".into()]],
/// )?;
///
/// let client = RdbClient::try_new("localhost", "8080")?;
/// let loader = TableLoader::new(client, "t1", dataset);
///
/// let result = loader.load().await?;
/// if !result.succeeded() {
///     eyre::bail!("load rejected with status {}", result.status_code);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TableLoader {
    client: RdbClient,
    table: String,
    dataset: Dataset,
    endpoint: String,
}

impl TableLoader {
    /// Create a new table loader.
    ///
    /// # Arguments
    /// * `client` - rdb HTTP client identifying the target host and port
    /// * `table` - Table to load into; its schema must already exist
    /// * `dataset` - The rows to upload
    pub fn new(client: RdbClient, table: impl Into<String>, dataset: Dataset) -> Self {
        let table = table.into();
        let endpoint = client.schema_load_url(&table);
        Self {
            client,
            table,
            dataset,
            endpoint,
        }
    }

    /// The destination URL this loader will POST to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Serialize the dataset and upload it.
    ///
    /// An empty dataset still issues the request — the body is just the
    /// header line. A response with status >= 300 is not an error; it
    /// comes back as a [`LoadResult`] whose
    /// [`succeeded()`](LoadResult::succeeded) is false, carrying the
    /// server's error message when one was returned.
    ///
    /// # Errors
    /// Returns an error if serialization fails or if the request could
    /// not be completed at the transport level (DNS/connection/reset).
    pub async fn load(&self) -> Result<LoadResult> {
        let csv = self
            .dataset
            .to_csv()
            .with_context(|| format!("Failed to serialize dataset for table '{}'", self.table))?;

        log::debug!(
            "Loading {} row(s) into '{}' via {}",
            self.dataset.row_count(),
            self.table,
            self.endpoint
        );

        let response = self
            .client
            .post_csv(&self.endpoint, csv)
            .await
            .with_context(|| format!("Failed to load table '{}' to {}", self.table, self.client))?;

        let status_code = response.status().as_u16();
        if status_code < 300 {
            log::debug!("Table '{}' loaded ({})", self.table, status_code);
            return Ok(LoadResult {
                status_code,
                error: None,
            });
        }

        // The store replies {"error": "..."} on rejection; keep the
        // message for the caller's log line if the body parses.
        let error = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(String::from));

        log::debug!("Table '{}' rejected ({})", self.table, status_code);
        Ok(LoadResult { status_code, error })
    }
}

/// Outcome of one [`TableLoader::load`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadResult {
    /// Raw HTTP status code returned by the schema-load endpoint.
    pub status_code: u16,
    /// Server-reported error message, when the store returned one.
    pub error: Option<String>,
}

impl LoadResult {
    /// True iff the status code is strictly less than 300.
    pub fn succeeded(&self) -> bool {
        self.status_code < 300
    }
}
