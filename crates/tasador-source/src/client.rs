//! HTTP client for the reference stock endpoint.

use reqwest::Client;
use tracing::debug;

use crate::Result;
use crate::error::SourceError;

/// Endpoint serving the full stock panel as a JSON array.
pub const STOCKS_URL: &str =
    "https://stockstockbackend-egbucgcphhhnawh5.eastasia-01.azurewebsites.net/stocks";

/// Client for the reference stock endpoint.
///
/// The endpoint is unauthenticated and takes no parameters: one GET returns
/// every stock-period record.
#[derive(Debug, Clone)]
pub struct StockClient {
    client: Client,
}

impl StockClient {
    /// Create a new client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// URL the client reads from.
    pub const fn url(&self) -> &'static str {
        STOCKS_URL
    }

    /// Fetch the raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint answers with a
    /// non-success status.
    pub async fn fetch(&self) -> Result<String> {
        debug!(url = STOCKS_URL, "requesting stock panel");
        let response = self.client.get(STOCKS_URL).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

impl Default for StockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_url() {
        let client = StockClient::default();
        assert_eq!(client.url(), STOCKS_URL);
        assert!(client.url().starts_with("https://"));
        assert!(client.url().ends_with("/stocks"));
    }
}
