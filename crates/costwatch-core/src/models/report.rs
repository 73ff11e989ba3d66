//! Cost report data models
//!
//! Wire types for the billing query response. Field names follow the
//! billing API's PascalCase convention; amounts arrive as decimal strings.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A calendar-date window, end exclusive per the billing API's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First day of the window
    #[serde(rename = "Start")]
    pub start: NaiveDate,

    /// Last day of the window
    #[serde(rename = "End")]
    pub end: NaiveDate,
}

impl TimeWindow {
    /// Build a trailing window of `days` calendar days ending at `end`
    pub fn trailing_days(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Daily-granularity cost report returned by the billing service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostReport {
    /// One record per day in the requested window
    #[serde(rename = "ResultsByTime", default)]
    pub results_by_time: Vec<DailyCost>,
}

/// Cost totals for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCost {
    /// The day this record covers
    #[serde(rename = "TimePeriod")]
    pub time_period: TimeWindow,

    /// Metric totals for the day
    #[serde(rename = "Total")]
    pub total: MetricTotals,
}

/// Per-metric totals within a daily record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTotals {
    /// Raw charges without amortization or discount allocation
    #[serde(rename = "UnblendedCost")]
    pub unblended_cost: MetricAmount,
}

/// A decimal amount with its currency unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricAmount {
    /// Decimal value as a string, as transmitted by the billing API
    #[serde(rename = "Amount")]
    pub amount: String,

    /// Currency unit, e.g. "USD"
    #[serde(rename = "Unit")]
    pub unit: String,
}

impl CostReport {
    /// Sum the unblended-cost amount across all daily records.
    ///
    /// An empty report sums to zero. An amount that does not parse as a
    /// decimal is a billing error; the report is read-only to us and we
    /// have no basis for repairing it.
    pub fn total_unblended(&self) -> Result<f64> {
        let mut total = 0.0;
        for day in &self.results_by_time {
            let raw = &day.total.unblended_cost.amount;
            let amount: f64 = raw.trim().parse().map_err(|_| {
                Error::billing(format!(
                    "unparseable amount {raw:?} for period {}",
                    day.time_period
                ))
            })?;
            total += amount;
        }
        Ok(total)
    }
}
