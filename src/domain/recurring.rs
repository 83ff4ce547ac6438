use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::Identifiable;
use crate::domain::transaction::PaymentMethod;

/// How often a recurring expense falls due.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Elapsed-day threshold after which a schedule is due. Monthly uses a
    /// fixed 30-day approximation and is deliberately not calendar-aware.
    pub fn threshold_days(&self) -> i64 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
        }
    }
}

/// A standing expense the scheduler materializes into ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    /// Stamped by the scheduler on each materialization; never user-edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_processed_date: Option<NaiveDate>,
}

impl RecurringExpense {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        payment_method: PaymentMethod,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            payment_method,
            account_id: None,
            frequency,
            start_date,
            last_processed_date: None,
        }
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }
}

impl Identifiable for RecurringExpense {
    fn id(&self) -> &str {
        &self.id
    }
}
