use crate::core::error::{FxError, Result};
use crate::core::rates::{RateProvider, RateTable};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Rates from the exchangerate-api.com v4 endpoint. Every call hits the network.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("fxdash/1.0")
            .build()
            .unwrap_or_default();
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: Option<String>,
    date: Option<String>,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FxError::Fetch {
                base: base.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FxError::Status {
                base: base.to_string(),
                status: response.status().to_string(),
            });
        }

        let text = response.text().await.map_err(|e| FxError::Fetch {
            base: base.to_string(),
            message: e.to_string(),
        })?;

        let data: LatestRatesResponse =
            serde_json::from_str(&text).map_err(|e| FxError::Response {
                base: base.to_string(),
                message: e.to_string(),
            })?;

        let table_base = data.base.unwrap_or_else(|| base.to_string());
        let table = RateTable::new(&table_base, data.date, data.rates);
        debug!(rates = table.len(), "Received exchange rates");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/v4/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "provider": "https://www.exchangerate-api.com",
            "base": "USD",
            "date": "2025-01-01",
            "time_last_updated": 1735689601,
            "rates": {
                "USD": 1,
                "INR": 83.25,
                "EUR": 0.92
            }
        }"#;
        let mock_server = create_mock_server("USD", 200, mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let table = provider.fetch_rates("USD").await.unwrap();

        assert_eq!(table.base(), "USD");
        assert_eq!(table.date(), Some("2025-01-01"));
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("INR"), Some(83.25));
        assert_eq!(table.get("USD"), Some(1.0));
        assert!(table.get("XYZ").is_none());
    }

    #[tokio::test]
    async fn test_every_call_refetches() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/EUR"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"rates": {"USD": 1.08}}"#),
            )
            .expect(2)
            .mount(&mock_server)
            .await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let first = provider.fetch_rates("EUR").await.unwrap();
        let second = provider.fetch_rates("EUR").await.unwrap();

        // Base falls back to the requested code when the body omits it
        assert_eq!(first.base(), "EUR");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("USD", 500, "").await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let result = provider.fetch_rates("USD").await;
        let err = result.unwrap_err();
        assert!(matches!(err, FxError::Status { .. }));
        assert_eq!(
            err.to_string(),
            "HTTP error: 500 Internal Server Error for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server("USD", 200, r#"{"base": "USD"}"#).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(matches!(err, FxError::Response { .. }));
        assert!(
            err.to_string()
                .contains("Failed to parse rate response for USD")
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Nothing listens on the discard port
        let provider = ExchangeRateApiProvider::new("http://127.0.0.1:9");

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(matches!(err, FxError::Fetch { .. }));
    }
}
