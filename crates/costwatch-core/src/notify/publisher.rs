//! HTTP publisher for the notification service

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::CostAlert;

/// Record of a sent notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Topic the notification was published to
    pub topic_arn: String,

    /// When it was sent
    pub sent_at: DateTime<Utc>,
}

/// Destination for cost alert notifications
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    /// Publish one alert to the given topic
    async fn publish(&self, topic_arn: &str, alert: &CostAlert) -> Result<PublishReceipt>;
}

/// Reqwest-backed topic publisher
pub struct TopicPublisher {
    client: Client,
    endpoint: String,
}

impl TopicPublisher {
    /// Create a publisher for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Publish-shaped request body
#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    #[serde(rename = "TopicArn")]
    topic_arn: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "Message")]
    message: String,
}

#[async_trait]
impl AlertPublisher for TopicPublisher {
    async fn publish(&self, topic_arn: &str, alert: &CostAlert) -> Result<PublishReceipt> {
        let payload = PublishRequest {
            topic_arn,
            subject: alert.subject(),
            message: alert.body(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::notify(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::notify(format!(
                "publish service returned {status}: {body}"
            )));
        }

        info!(topic = %topic_arn, alert_id = %alert.id, "cost alert published");

        Ok(PublishReceipt {
            topic_arn: topic_arn.to_string(),
            sent_at: Utc::now(),
        })
    }
}
