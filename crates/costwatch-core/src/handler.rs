//! Invocation interface
//!
//! The hosting layer around the check procedure. The scheduler hands us an
//! opaque event payload; whatever happens inside, it must only ever see
//! silence or a log line.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::billing::CostSource;
use crate::checker::{CheckOutcome, CostChecker};
use crate::notify::AlertPublisher;

/// Terminal status of one invocation
#[derive(Debug)]
pub enum InvocationStatus {
    /// The procedure ran to completion
    Completed(CheckOutcome),

    /// The procedure failed; the error was logged and swallowed
    Failed,
}

/// Run one scheduled invocation.
///
/// The event payload is opaque and unused by the logic. Every failure is
/// contained here: it becomes an error log entry and a [`InvocationStatus::Failed`],
/// never a propagated error.
pub async fn invoke<S, P>(event: &Value, checker: &CostChecker<S, P>) -> InvocationStatus
where
    S: CostSource,
    P: AlertPublisher,
{
    debug!(event = %event, "invocation received");

    match checker.run(Utc::now().date_naive()).await {
        Ok(outcome) => {
            match &outcome {
                CheckOutcome::AlertSent { total_usd, receipt } => {
                    info!(total = total_usd, topic = %receipt.topic_arn, "cost alert sent");
                }
                CheckOutcome::BelowThreshold { total_usd } => {
                    info!(total = total_usd, "cost within threshold");
                }
            }
            InvocationStatus::Completed(outcome)
        }
        Err(e) => {
            error!(error = %e, "error retrieving cost data");
            InvocationStatus::Failed
        }
    }
}
