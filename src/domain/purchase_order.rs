use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::Identifiable;
use crate::domain::transaction::PaymentMethod;

/// Lifecycle of a vendor purchase order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    Pending,
    Received,
}

/// One product row on a purchase order; `cost` is the unit buy price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    pub product_id: String,
    pub quantity: f64,
    pub cost: f64,
}

/// An order placed with a vendor. Receiving it is the one path where a
/// non-ledger component triggers a ledger transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub vendor_id: String,
    pub items: Vec<PurchaseOrderLine>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_date: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    pub fn new(
        id: impl Into<String>,
        vendor_id: impl Into<String>,
        items: Vec<PurchaseOrderLine>,
        payment_method: PaymentMethod,
    ) -> Self {
        let total_amount = items.iter().map(|line| line.quantity * line.cost).sum();
        Self {
            id: id.into(),
            vendor_id: vendor_id.into(),
            items,
            total_amount,
            payment_method,
            account_id: None,
            cheque_number: None,
            cheque_date: None,
            status: PurchaseOrderStatus::Pending,
            received_date: None,
        }
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_cheque(mut self, number: impl Into<String>, maturity: NaiveDate) -> Self {
        self.cheque_number = Some(number.into());
        self.cheque_date = Some(maturity);
        self
    }
}

impl Identifiable for PurchaseOrder {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_derived_from_lines() {
        let po = PurchaseOrder::new(
            "PO-1",
            "vendor-1",
            vec![
                PurchaseOrderLine {
                    product_id: "p1".into(),
                    quantity: 4.0,
                    cost: 25.0,
                },
                PurchaseOrderLine {
                    product_id: "p2".into(),
                    quantity: 2.0,
                    cost: 10.0,
                },
            ],
            PaymentMethod::Credit,
        );
        assert_eq!(po.total_amount, 120.0);
        assert_eq!(po.status, PurchaseOrderStatus::Pending);
    }
}
