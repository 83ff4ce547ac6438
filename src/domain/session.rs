use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cash-drawer session state for one calendar date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Open,
    Closed,
}

/// The open/closed accounting period for one calendar date. At most one
/// session exists per date; reopening replaces the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySession {
    pub date: NaiveDate,
    /// The float placed in the drawer at day-open.
    pub opening_balance: f64,
    #[serde(default)]
    pub expected_closing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_closing: Option<f64>,
    pub status: SessionStatus,
}

impl DaySession {
    pub fn open(date: NaiveDate, opening_balance: f64) -> Self {
        Self {
            date,
            opening_balance,
            expected_closing: opening_balance,
            actual_closing: None,
            status: SessionStatus::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }
}
