//! HTTP client for the billing query service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CostReport, TimeWindow};

/// Source of daily cost data
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Fetch daily-granularity unblended-cost data for a window
    async fn fetch_daily_costs(&self, window: &TimeWindow) -> Result<CostReport>;
}

/// Reqwest-backed billing query client
pub struct BillingClient {
    client: Client,
    endpoint: String,
}

impl BillingClient {
    /// Create a client for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Returns the configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// GetCostAndUsage-shaped request body
#[derive(Debug, Serialize)]
struct CostAndUsageRequest<'a> {
    #[serde(rename = "TimePeriod")]
    time_period: &'a TimeWindow,
    #[serde(rename = "Granularity")]
    granularity: &'static str,
    #[serde(rename = "Metrics")]
    metrics: [&'static str; 1],
}

#[async_trait]
impl CostSource for BillingClient {
    async fn fetch_daily_costs(&self, window: &TimeWindow) -> Result<CostReport> {
        let payload = CostAndUsageRequest {
            time_period: window,
            granularity: "DAILY",
            metrics: ["UnblendedCost"],
        };

        debug!(window = %window, endpoint = %self.endpoint, "querying billing service");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::billing(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::billing(format!(
                "billing service returned {status}: {body}"
            )));
        }

        response
            .json::<CostReport>()
            .await
            .map_err(|e| Error::billing(format!("invalid cost report: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn window() -> TimeWindow {
        TimeWindow::trailing_days("2024-06-30".parse().unwrap(), 30)
    }

    #[tokio::test]
    async fn sends_the_expected_request_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_json(serde_json::json!({
                "TimePeriod": {"Start": "2024-05-31", "End": "2024-06-30"},
                "Granularity": "DAILY",
                "Metrics": ["UnblendedCost"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ResultsByTime": [
                    {
                        "TimePeriod": {"Start": "2024-06-01", "End": "2024-06-02"},
                        "Total": {"UnblendedCost": {"Amount": "10.00", "Unit": "USD"}}
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BillingClient::new(server.uri(), 5).unwrap();
        let report = client.fetch_daily_costs(&window()).await.unwrap();

        assert_eq!(report.results_by_time.len(), 1);
        assert_eq!(report.total_unblended().unwrap(), 10.0);
    }

    #[tokio::test]
    async fn non_success_status_is_a_billing_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("throttled"))
            .mount(&server)
            .await;

        let client = BillingClient::new(server.uri(), 5).unwrap();
        let err = client.fetch_daily_costs(&window()).await.unwrap_err();

        assert!(matches!(err, Error::Billing(_)), "{err}");
        assert!(err.to_string().contains("503"), "{err}");
    }

    #[tokio::test]
    async fn malformed_response_is_a_billing_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = BillingClient::new(server.uri(), 5).unwrap();
        let err = client.fetch_daily_costs(&window()).await.unwrap_err();

        assert!(matches!(err, Error::Billing(_)), "{err}");
    }
}
