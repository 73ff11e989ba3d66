//! # costwatch
//!
//! Scheduled cost-alerting notifier.
//!
//! costwatch is invoked periodically by an external scheduler. Each
//! invocation queries a cloud billing service for trailing-window spend,
//! sums the unblended-cost metric, compares the total against a configured
//! threshold, and publishes one notification if the threshold is exceeded.
//! Every run is stateless and independent.
//!
//! ## Architecture
//!
//! - **Billing**: thin HTTP client for the billing query service
//! - **Notify**: thin HTTP client for the notification publish service
//! - **Checker**: the single linear check procedure
//! - **Handler**: the invocation boundary that contains all failures
//!
//! ## Quick Start
//!
//! ```bash
//! # One scheduled invocation
//! COST_THRESHOLD=100 SNS_TOPIC_ARN=arn:aws:sns:...:cost-alerts costwatch run
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod billing;
pub mod checker;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod notify;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::billing::{BillingClient, CostSource};
    pub use crate::checker::{CheckOutcome, CostChecker};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handler::{invoke, InvocationStatus};
    pub use crate::models::*;
    pub use crate::notify::{AlertPublisher, TopicPublisher};
}
