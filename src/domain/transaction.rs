use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// Enumerates the five kinds of ledger transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Sale,
    Purchase,
    Expense,
    CreditPayment,
    Transfer,
}

/// Enumerates the supported payment instruments.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Bank,
    Card,
    Credit,
    Cheque,
}

impl PaymentMethod {
    /// Whether posting this instrument moves money on a ledger account.
    /// CREDIT defers to the customer/vendor balance; CHEQUE moves money only
    /// at maturity, outside this ledger.
    pub fn settles_immediately(&self) -> bool {
        !matches!(self, PaymentMethod::Credit | PaymentMethod::Cheque)
    }
}

/// One product row on a SALE or PURCHASE transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
}

/// A posted ledger transaction. Immutable by replacement: edits go through
/// the store, which reverts the stored impact before applying the new one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default)]
    pub discount: f64,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_date: Option<NaiveDate>,
}

impl Transaction {
    /// Calendar day the transaction belongs to.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Loosely-shaped input for a new transaction. The store finalizes it:
/// missing id/date are assigned, amounts are sanitized.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub id: Option<String>,
    pub kind: TransactionKind,
    pub amount: f64,
    pub discount: f64,
    pub payment_method: PaymentMethod,
    pub account_id: Option<String>,
    pub destination_account_id: Option<String>,
    pub customer_id: Option<String>,
    pub vendor_id: Option<String>,
    pub items: Vec<LineItem>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub cheque_number: Option<String>,
    pub cheque_date: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind, amount: f64, payment_method: PaymentMethod) -> Self {
        Self {
            id: None,
            kind,
            amount,
            discount: 0.0,
            payment_method,
            account_id: None,
            destination_account_id: None,
            customer_id: None,
            vendor_id: None,
            items: Vec::new(),
            description: None,
            date: None,
            cheque_number: None,
            cheque_date: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_destination(mut self, account_id: impl Into<String>) -> Self {
        self.destination_account_id = Some(account_id.into());
        self
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_vendor(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = Some(vendor_id.into());
        self
    }

    pub fn with_items(mut self, items: Vec<LineItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_cheque(mut self, number: impl Into<String>, maturity: NaiveDate) -> Self {
        self.cheque_number = Some(number.into());
        self.cheque_date = Some(maturity);
        self
    }

    /// Turns the draft into a posted record, filling identity and timestamp.
    pub fn finalize(self, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id: self.id.unwrap_or_else(|| new_transaction_id(now)),
            kind: self.kind,
            amount: sanitize_amount(self.amount),
            discount: sanitize_amount(self.discount),
            payment_method: self.payment_method,
            account_id: self.account_id,
            destination_account_id: self.destination_account_id,
            customer_id: self.customer_id,
            vendor_id: self.vendor_id,
            items: self.items,
            description: self.description,
            date: self.date.unwrap_or(now),
            cheque_number: self.cheque_number,
            cheque_date: self.cheque_date,
        }
    }
}

/// Collision-resistant id: millisecond timestamp plus a random suffix.
pub fn new_transaction_id(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(5)
        .collect::<String>()
        .to_uppercase();
    format!("TX-{}-{}", now.timestamp_millis(), suffix)
}

/// Parses a user-supplied amount, coercing anything non-numeric to zero.
pub fn coerce_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_assigns_identity_and_date() {
        let now = Utc::now();
        let tx = TransactionDraft::new(TransactionKind::Sale, 100.0, PaymentMethod::Cash)
            .with_account("cash")
            .finalize(now);
        assert!(tx.id.starts_with("TX-"));
        assert_eq!(tx.date, now);
        assert_eq!(tx.amount, 100.0);
    }

    #[test]
    fn explicit_id_and_date_survive_finalize() {
        let now = Utc::now();
        let posted = now - chrono::Duration::days(2);
        let tx = TransactionDraft::new(TransactionKind::Expense, 50.0, PaymentMethod::Bank)
            .with_id("RECUR-abc-2026-08-29")
            .with_date(posted)
            .finalize(now);
        assert_eq!(tx.id, "RECUR-abc-2026-08-29");
        assert_eq!(tx.date, posted);
    }

    #[test]
    fn malformed_amounts_coerce_to_zero() {
        assert_eq!(coerce_amount("not a number"), 0.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount(" 12.5 "), 12.5);
        let tx = TransactionDraft::new(TransactionKind::Sale, f64::NAN, PaymentMethod::Cash)
            .finalize(Utc::now());
        assert_eq!(tx.amount, 0.0);
    }

    #[test]
    fn serde_uses_wire_compatible_tags() {
        let now = Utc::now();
        let tx = TransactionDraft::new(TransactionKind::CreditPayment, 25.0, PaymentMethod::Cheque)
            .with_cheque("001122", NaiveDate::from_ymd_opt(2026, 9, 15).unwrap())
            .finalize(now);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "CREDIT_PAYMENT");
        assert_eq!(json["paymentMethod"], "CHEQUE");
        assert_eq!(json["chequeNumber"], "001122");
    }
}
