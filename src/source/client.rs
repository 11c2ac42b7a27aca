use reqwest::Client;
use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::error::{ChartError, ChartResult};
use crate::source::models::{parse_rows, Row};
use crate::source::query::DataQuery;

/// Anything that can answer a [`DataQuery`] with parsed rows.
pub trait RowSource: Send + Sync {
    fn fetch(&self, query: &DataQuery) -> impl Future<Output = ChartResult<Vec<Row>>> + Send;
}

/// HTTP client for the CSV data endpoint.
pub struct DataClient {
    http_client: Client,
    base_url: String,
}

impl DataClient {
    /// # Errors
    ///
    /// Returns `ChartError::Internal` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> ChartResult<Self> {
        Self::with_base_url(
            &config.data_base_url,
            Duration::from_secs(config.fetch_timeout_seconds),
        )
    }

    /// # Errors
    ///
    /// Returns `ChartError::Internal` if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> ChartResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChartError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn url_for(&self, query: &DataQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }

    /// Fetch and parse the rows for `query`. One request, no retry.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::Fetch` if the request fails or returns an error status,
    /// and `ChartError::Parse` if the body is not valid CSV rows.
    pub async fn fetch_rows(&self, query: &DataQuery) -> ChartResult<Vec<Row>> {
        let url = self.url_for(query);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ChartError::Fetch(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ChartError::Fetch(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ChartError::Fetch(format!("Failed to get response text: {e}")))?;

        let rows = parse_rows(&text).inspect_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse data response"
            );
        })?;

        tracing::debug!(url = %url, rows = rows.len(), "Fetched rows");
        Ok(rows)
    }
}

impl RowSource for DataClient {
    fn fetch(&self, query: &DataQuery) -> impl Future<Output = ChartResult<Vec<Row>>> + Send {
        self.fetch_rows(query)
    }
}
