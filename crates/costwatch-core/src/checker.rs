//! The cost check procedure
//!
//! One linear pass per invocation: compute the trailing window, fetch the
//! daily cost report, sum it, compare against the configured threshold,
//! and publish at most one alert.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::billing::CostSource;
use crate::config::Config;
use crate::error::Result;
use crate::models::{CostAlert, TimeWindow};
use crate::notify::{AlertPublisher, PublishReceipt};

/// Outcome of one cost check
#[derive(Debug, Clone)]
pub enum CheckOutcome {
    /// Total was at or below the threshold; nothing was sent
    BelowThreshold {
        /// The summed trailing-window total
        total_usd: f64,
    },

    /// Total exceeded the threshold; exactly one alert was published
    AlertSent {
        /// The summed trailing-window total
        total_usd: f64,
        /// Record of the outbound notification
        receipt: PublishReceipt,
    },
}

/// Runs the cost check against the two external collaborators
pub struct CostChecker<S, P> {
    source: S,
    publisher: P,
    config: Config,
}

impl<S: CostSource, P: AlertPublisher> CostChecker<S, P> {
    /// Create a checker from its collaborators and resolved configuration
    pub fn new(source: S, publisher: P, config: Config) -> Self {
        Self {
            source,
            publisher,
            config,
        }
    }

    /// Run one check for the trailing window ending at `today`.
    ///
    /// Errors propagate to the caller; containment is the hosting layer's
    /// job (see [`crate::handler::invoke`]).
    pub async fn run(&self, today: NaiveDate) -> Result<CheckOutcome> {
        let window = TimeWindow::trailing_days(today, self.config.window_days);

        let report = self.source.fetch_daily_costs(&window).await?;

        // Raw report goes to the diagnostic log for audit
        debug!(report = %serde_json::to_string(&report)?, "daily cost data");

        let total_usd = report.total_unblended()?;

        debug!(
            window = %window,
            total = total_usd,
            threshold = self.config.threshold_usd,
            "evaluated cost threshold"
        );

        if total_usd > self.config.threshold_usd {
            let alert = CostAlert::new(total_usd, self.config.threshold_usd, window);

            info!(
                alert_id = %alert.id,
                total = total_usd,
                threshold = self.config.threshold_usd,
                "cost threshold exceeded"
            );

            let receipt = self.publisher.publish(&self.config.topic_arn, &alert).await?;

            Ok(CheckOutcome::AlertSent { total_usd, receipt })
        } else {
            Ok(CheckOutcome::BelowThreshold { total_usd })
        }
    }
}
