//! Notification delivery for cost alerts
//!
//! Thin HTTP client for the external publish service, behind the
//! [`AlertPublisher`] seam.

mod publisher;

pub use publisher::{AlertPublisher, PublishReceipt, TopicPublisher};
