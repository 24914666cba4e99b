//! rdb client module
//!
//! Provides `RdbClient` for making API requests to an rdb schema store.

use eyre::{Result, eyre};
use reqwest::Client;

/// Client for an rdb schema store's HTTP API.
///
/// Holds the target host and port plus a reusable reqwest client.
/// Endpoint URLs are composed by literal concatenation — no parsing and
/// no normalization, so host and port syntax is the caller's
/// responsibility. A malformed target surfaces as a transport error when
/// a request is sent.
///
/// # Example
/// ```no_run
/// use rdb_loader::client::RdbClient;
///
/// # fn example() -> eyre::Result<()> {
/// let client = RdbClient::try_new("localhost", "8080")?;
/// assert_eq!(
///     client.schema_load_url("t1"),
///     "http://localhost:8080/api/v1/schema/t1/load"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RdbClient {
    client: Client,
    host: String,
    port: String,
}

impl RdbClient {
    /// Create a new RdbClient for the given host and port.
    ///
    /// The port is kept as a string; it is only ever interpolated into
    /// the endpoint URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn try_new(host: impl Into<String>, port: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            host: host.into(),
            port: port.into(),
        })
    }

    /// The schema-load endpoint URL for a table:
    /// `http://{host}:{port}/api/v1/schema/{table}/load`.
    pub fn schema_load_url(&self, table: &str) -> String {
        format!(
            "http://{}:{}/api/v1/schema/{}/load",
            self.host, self.port, table
        )
    }

    /// POST a CSV body to the given URL with `Content-Type: text/csv`.
    ///
    /// No timeout is configured; the request blocks the task until the
    /// transport resolves or fails.
    ///
    /// # Errors
    /// Returns an error if the request could not be completed
    /// (DNS/connection/reset). A completed request is returned whatever
    /// its status code — status handling belongs to the caller.
    pub async fn post_csv(&self, url: &str, body: String) -> Result<reqwest::Response> {
        log::trace!("POST {} ({} bytes)", url, body.len());
        self.client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(body)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))
    }
}

impl std::fmt::Display for RdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
