//! Alert data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::report::TimeWindow;

/// Fixed subject line for cost alert notifications
pub const ALERT_SUBJECT: &str = "AWS Cost Alert";

/// A triggered cost alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostAlert {
    /// Unique identifier
    pub id: Uuid,

    /// The total that breached the threshold
    pub total_usd: f64,

    /// The threshold that was exceeded
    pub threshold_usd: f64,

    /// The window the total covers
    pub window: TimeWindow,

    /// When the alert was triggered
    pub triggered_at: DateTime<Utc>,
}

impl CostAlert {
    /// Create an alert for a breached threshold
    pub fn new(total_usd: f64, threshold_usd: f64, window: TimeWindow) -> Self {
        Self {
            id: Uuid::new_v4(),
            total_usd,
            threshold_usd,
            window,
            triggered_at: Utc::now(),
        }
    }

    /// Notification subject line
    pub fn subject(&self) -> &'static str {
        ALERT_SUBJECT
    }

    /// Notification body, interpolating the total
    pub fn body(&self) -> String {
        format!(
            "Cost has exceeded the threshold. Total cost: ${}",
            render_amount(self.total_usd)
        )
    }
}

/// Render a dollar total as its natural decimal string.
///
/// Integral totals keep one decimal place so they read as amounts
/// ("15.0", not "15"); fractional totals render shortest.
fn render_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
