//! Pure computation of the aggregate deltas a transaction implies.
//!
//! Every rule here must be exactly invertible: reverting a transaction and
//! reapplying it has to leave accounts, customers, vendors, and stock
//! mathematically where they started.

use crate::domain::{
    PaymentMethod, Transaction, TransactionKind, CASH_ACCOUNT_ID, DEFAULT_BANK_ACCOUNT_ID,
};

/// One balance or stock delta caused by a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ImpactEntry {
    Account { account_id: String, delta: f64 },
    CustomerCredit { customer_id: String, delta: f64 },
    VendorPayable { vendor_id: String, delta: f64 },
    ProductStock { product_id: String, delta: f64 },
}

impl ImpactEntry {
    /// The additive inverse of this delta.
    pub fn inverted(self) -> Self {
        match self {
            ImpactEntry::Account { account_id, delta } => ImpactEntry::Account {
                account_id,
                delta: -delta,
            },
            ImpactEntry::CustomerCredit { customer_id, delta } => ImpactEntry::CustomerCredit {
                customer_id,
                delta: -delta,
            },
            ImpactEntry::VendorPayable { vendor_id, delta } => ImpactEntry::VendorPayable {
                vendor_id,
                delta: -delta,
            },
            ImpactEntry::ProductStock { product_id, delta } => ImpactEntry::ProductStock {
                product_id,
                delta: -delta,
            },
        }
    }
}

/// Account a non-transfer transaction settles against when it names none.
fn settlement_account_id(tx: &Transaction) -> String {
    tx.account_id.clone().unwrap_or_else(|| {
        match tx.payment_method {
            PaymentMethod::Cash => CASH_ACCOUNT_ID,
            _ => DEFAULT_BANK_ACCOUNT_ID,
        }
        .to_string()
    })
}

/// Computes the full set of deltas posting `tx` causes.
pub fn impact_of(tx: &Transaction) -> Vec<ImpactEntry> {
    let mut entries = Vec::new();

    if tx.kind == TransactionKind::Transfer {
        // A transfer needs both endpoints; anything less moves no money.
        if let (Some(source), Some(destination)) =
            (tx.account_id.as_ref(), tx.destination_account_id.as_ref())
        {
            entries.push(ImpactEntry::Account {
                account_id: source.clone(),
                delta: -tx.amount,
            });
            entries.push(ImpactEntry::Account {
                account_id: destination.clone(),
                delta: tx.amount,
            });
        }
        return entries;
    }

    if tx.payment_method.settles_immediately() {
        let inflow = matches!(
            tx.kind,
            TransactionKind::Sale | TransactionKind::CreditPayment
        );
        entries.push(ImpactEntry::Account {
            account_id: settlement_account_id(tx),
            delta: if inflow { tx.amount } else { -tx.amount },
        });
    }

    if let Some(customer_id) = tx.customer_id.as_ref() {
        match tx.kind {
            TransactionKind::Sale if tx.payment_method == PaymentMethod::Credit => {
                entries.push(ImpactEntry::CustomerCredit {
                    customer_id: customer_id.clone(),
                    delta: tx.amount,
                });
            }
            TransactionKind::CreditPayment => {
                entries.push(ImpactEntry::CustomerCredit {
                    customer_id: customer_id.clone(),
                    delta: -tx.amount,
                });
            }
            _ => {}
        }
    }

    if let Some(vendor_id) = tx.vendor_id.as_ref() {
        match tx.kind {
            TransactionKind::Purchase if tx.payment_method == PaymentMethod::Credit => {
                entries.push(ImpactEntry::VendorPayable {
                    vendor_id: vendor_id.clone(),
                    delta: tx.amount,
                });
            }
            TransactionKind::Expense
                if matches!(tx.payment_method, PaymentMethod::Cash | PaymentMethod::Bank) =>
            {
                entries.push(ImpactEntry::VendorPayable {
                    vendor_id: vendor_id.clone(),
                    delta: -tx.amount,
                });
            }
            _ => {}
        }
    }

    for item in &tx.items {
        let delta = match tx.kind {
            TransactionKind::Sale => -item.quantity,
            _ => item.quantity,
        };
        entries.push(ImpactEntry::ProductStock {
            product_id: item.product_id.clone(),
            delta,
        });
    }

    entries
}

/// The exact inverse of [`impact_of`], used when a transaction is edited or
/// deleted.
pub fn reversal_of(tx: &Transaction) -> Vec<ImpactEntry> {
    impact_of(tx)
        .into_iter()
        .map(ImpactEntry::inverted)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineItem, TransactionDraft};
    use chrono::Utc;

    fn sale(amount: f64, method: PaymentMethod) -> Transaction {
        TransactionDraft::new(TransactionKind::Sale, amount, method)
            .with_account("cash")
            .with_customer("cust-1")
            .with_items(vec![LineItem {
                product_id: "prod-1".into(),
                quantity: 3.0,
                price: amount / 3.0,
                discount: 0.0,
            }])
            .finalize(Utc::now())
    }

    #[test]
    fn cash_sale_credits_account_and_reduces_stock() {
        let entries = impact_of(&sale(300.0, PaymentMethod::Cash));
        assert!(entries.contains(&ImpactEntry::Account {
            account_id: "cash".into(),
            delta: 300.0
        }));
        assert!(entries.contains(&ImpactEntry::ProductStock {
            product_id: "prod-1".into(),
            delta: -3.0
        }));
        // Customer untouched on a cash sale.
        assert!(!entries
            .iter()
            .any(|e| matches!(e, ImpactEntry::CustomerCredit { .. })));
    }

    #[test]
    fn credit_sale_skips_accounts_and_raises_customer_credit() {
        let entries = impact_of(&sale(300.0, PaymentMethod::Credit));
        assert!(!entries.iter().any(|e| matches!(e, ImpactEntry::Account { .. })));
        assert!(entries.contains(&ImpactEntry::CustomerCredit {
            customer_id: "cust-1".into(),
            delta: 300.0
        }));
    }

    #[test]
    fn cheque_never_touches_accounts_at_posting() {
        let tx = TransactionDraft::new(TransactionKind::Expense, 80.0, PaymentMethod::Cheque)
            .with_account("bank_default")
            .finalize(Utc::now());
        assert!(impact_of(&tx).is_empty());
    }

    #[test]
    fn account_fallback_follows_payment_method() {
        let cash = TransactionDraft::new(TransactionKind::Expense, 10.0, PaymentMethod::Cash)
            .finalize(Utc::now());
        let bank = TransactionDraft::new(TransactionKind::Expense, 10.0, PaymentMethod::Bank)
            .finalize(Utc::now());
        assert_eq!(
            impact_of(&cash),
            vec![ImpactEntry::Account {
                account_id: "cash".into(),
                delta: -10.0
            }]
        );
        assert_eq!(
            impact_of(&bank),
            vec![ImpactEntry::Account {
                account_id: "bank_default".into(),
                delta: -10.0
            }]
        );
    }

    #[test]
    fn transfer_without_destination_moves_nothing() {
        let tx = TransactionDraft::new(TransactionKind::Transfer, 50.0, PaymentMethod::Bank)
            .with_account("cash")
            .finalize(Utc::now());
        assert!(impact_of(&tx).is_empty());
    }

    #[test]
    fn reversal_is_the_additive_inverse() {
        let tx = sale(300.0, PaymentMethod::Cash);
        let forward = impact_of(&tx);
        let backward = reversal_of(&tx);
        assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.into_iter().zip(backward) {
            assert_eq!(f.inverted(), b);
        }
    }
}
