//! Configuration management for costwatch
//!
//! Configuration is resolved once at startup from environment-style
//! key-value lookup and passed into the check procedure as a plain value.
//! Nothing else in the crate reads the process environment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Required key: alert threshold in USD (numeric string)
pub const COST_THRESHOLD: &str = "COST_THRESHOLD";
/// Required key: destination topic identifier for notifications
pub const SNS_TOPIC_ARN: &str = "SNS_TOPIC_ARN";
/// Optional key: billing query endpoint override
pub const BILLING_ENDPOINT: &str = "BILLING_ENDPOINT";
/// Optional key: notification publish endpoint override
pub const SNS_ENDPOINT: &str = "SNS_ENDPOINT";
/// Optional key: trailing window length in days
pub const COST_WINDOW_DAYS: &str = "COST_WINDOW_DAYS";
/// Optional key: HTTP client timeout in seconds
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

const DEFAULT_BILLING_ENDPOINT: &str = "https://ce.us-east-1.amazonaws.com";
const DEFAULT_SNS_ENDPOINT: &str = "https://sns.us-east-1.amazonaws.com";
const DEFAULT_WINDOW_DAYS: i64 = 30;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Resolved configuration for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Alert threshold in USD
    pub threshold_usd: f64,

    /// Destination topic identifier for notifications
    pub topic_arn: String,

    /// Billing query endpoint
    pub billing_endpoint: String,

    /// Notification publish endpoint
    pub notify_endpoint: String,

    /// Trailing window length in days
    pub window_days: i64,

    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from any environment-style key-value view
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let threshold_usd = parse_number(required(&lookup, COST_THRESHOLD)?, COST_THRESHOLD)?;

        let topic_arn = required(&lookup, SNS_TOPIC_ARN)?;
        if topic_arn.trim().is_empty() {
            return Err(Error::config(format!("{SNS_TOPIC_ARN} must not be empty")));
        }

        let billing_endpoint =
            lookup(BILLING_ENDPOINT).unwrap_or_else(|| DEFAULT_BILLING_ENDPOINT.to_string());
        let notify_endpoint =
            lookup(SNS_ENDPOINT).unwrap_or_else(|| DEFAULT_SNS_ENDPOINT.to_string());

        let window_days = match lookup(COST_WINDOW_DAYS) {
            Some(raw) => parse_number(raw, COST_WINDOW_DAYS)?,
            None => DEFAULT_WINDOW_DAYS,
        };
        if window_days <= 0 {
            return Err(Error::config(format!(
                "{COST_WINDOW_DAYS} must be positive, got {window_days}"
            )));
        }

        let http_timeout_secs = match lookup(HTTP_TIMEOUT_SECS) {
            Some(raw) => parse_number(raw, HTTP_TIMEOUT_SECS)?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            threshold_usd,
            topic_arn,
            billing_endpoint,
            notify_endpoint,
            window_days,
            http_timeout_secs,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| Error::config(format!("missing required key {key}")))
}

fn parse_number<T>(raw: String, key: &str) -> Result<T>
where
    T: std::str::FromStr,
{
    raw.trim()
        .parse()
        .map_err(|_| Error::config(format!("{key} is not a valid number: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars = env(pairs);
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn resolves_with_defaults() {
        let config = resolve(&[
            (COST_THRESHOLD, "100.5"),
            (SNS_TOPIC_ARN, "arn:aws:sns:us-east-1:123456789012:cost-alerts"),
        ])
        .unwrap();

        assert_eq!(config.threshold_usd, 100.5);
        assert_eq!(
            config.topic_arn,
            "arn:aws:sns:us-east-1:123456789012:cost-alerts"
        );
        assert_eq!(config.billing_endpoint, DEFAULT_BILLING_ENDPOINT);
        assert_eq!(config.notify_endpoint, DEFAULT_SNS_ENDPOINT);
        assert_eq!(config.window_days, 30);
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn overrides_apply() {
        let config = resolve(&[
            (COST_THRESHOLD, "12"),
            (SNS_TOPIC_ARN, "arn:topic"),
            (BILLING_ENDPOINT, "http://localhost:9001"),
            (SNS_ENDPOINT, "http://localhost:9002"),
            (COST_WINDOW_DAYS, "7"),
            (HTTP_TIMEOUT_SECS, "5"),
        ])
        .unwrap();

        assert_eq!(config.billing_endpoint, "http://localhost:9001");
        assert_eq!(config.notify_endpoint, "http://localhost:9002");
        assert_eq!(config.window_days, 7);
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    fn missing_threshold_names_the_key() {
        let err = resolve(&[(SNS_TOPIC_ARN, "arn:topic")]).unwrap_err();
        assert!(err.to_string().contains(COST_THRESHOLD), "{err}");
    }

    #[test]
    fn missing_topic_names_the_key() {
        let err = resolve(&[(COST_THRESHOLD, "10")]).unwrap_err();
        assert!(err.to_string().contains(SNS_TOPIC_ARN), "{err}");
    }

    #[test]
    fn non_numeric_threshold_fails() {
        let err = resolve(&[(COST_THRESHOLD, "a lot"), (SNS_TOPIC_ARN, "arn:topic")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(COST_THRESHOLD), "{msg}");
        assert!(msg.contains("a lot"), "{msg}");
    }

    #[test]
    fn empty_topic_fails() {
        let err = resolve(&[(COST_THRESHOLD, "10"), (SNS_TOPIC_ARN, "  ")]).unwrap_err();
        assert!(err.to_string().contains(SNS_TOPIC_ARN), "{err}");
    }

    #[test]
    fn non_positive_window_fails() {
        let err = resolve(&[
            (COST_THRESHOLD, "10"),
            (SNS_TOPIC_ARN, "arn:topic"),
            (COST_WINDOW_DAYS, "0"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains(COST_WINDOW_DAYS), "{err}");
    }
}
