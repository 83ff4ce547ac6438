//! Checkout calculation engine: cart totals, discount math, change due,
//! and the cash-drawer gate applied before a sale is posted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LineItem, PaymentMethod, TransactionDraft, TransactionKind};
use crate::errors::LedgerError;
use crate::ledger::Shop;

/// How a line-level discount value is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscountType {
    #[serde(rename = "AMT")]
    Amount,
    #[serde(rename = "PCT")]
    Percent,
}

/// One cart row as entered at the register.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub discount_value: f64,
    pub discount_type: DiscountType,
}

impl CartLine {
    pub fn gross(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// The absolute discount this line carries.
    pub fn discount_amount(&self) -> f64 {
        match self.discount_type {
            DiscountType::Amount => self.discount_value,
            DiscountType::Percent => self.gross() * self.discount_value / 100.0,
        }
    }
}

/// Register state carried in the persisted snapshot so an in-progress
/// cart survives a reload. Backup exports leave it out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PosSession {
    #[serde(default)]
    pub cart: Vec<CartLine>,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub search: String,
}

impl PosSession {
    /// Clears the register back to an empty cash cart.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Totals for a cart plus a cart-level discount.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartTotals {
    pub gross: f64,
    pub line_savings: f64,
    pub net_before_cart_discount: f64,
    pub final_total: f64,
}

/// Computes cart totals. The cart discount can never push the payable
/// below zero.
pub fn cart_totals(lines: &[CartLine], cart_discount: f64) -> CartTotals {
    let gross: f64 = lines.iter().map(CartLine::gross).sum();
    let line_savings: f64 = lines.iter().map(CartLine::discount_amount).sum();
    let net_before_cart_discount = gross - line_savings;
    CartTotals {
        gross,
        line_savings,
        net_before_cart_discount,
        final_total: (net_before_cart_discount - cart_discount).max(0.0),
    }
}

/// Change owed on a cash tender.
pub fn change_due(tendered: f64, final_total: f64) -> f64 {
    (tendered - final_total).max(0.0)
}

/// Stateless checkout helpers bridging the cart to the ledger.
pub struct CheckoutService;

impl CheckoutService {
    /// Gate applied before posting: CASH requires an OPEN day session and a
    /// tender covering the payable. Other methods pass through.
    pub fn authorize(
        shop: &Shop,
        payment_method: PaymentMethod,
        tendered: Option<f64>,
        final_total: f64,
        today: NaiveDate,
    ) -> Result<(), LedgerError> {
        if payment_method != PaymentMethod::Cash {
            return Ok(());
        }
        if !shop.is_day_open(today) {
            return Err(LedgerError::DrawerClosed(today));
        }
        let tendered = tendered.unwrap_or(0.0);
        if tendered < final_total {
            return Err(LedgerError::InsufficientTender {
                required: final_total,
                tendered,
            });
        }
        Ok(())
    }

    /// Builds the SALE draft for a cart: amount is the final payable,
    /// discount records the total savings, lines carry resolved discounts.
    pub fn sale_draft(
        lines: &[CartLine],
        cart_discount: f64,
        payment_method: PaymentMethod,
        account_id: Option<String>,
        customer_id: Option<String>,
    ) -> TransactionDraft {
        let totals = cart_totals(lines, cart_discount);
        let items = lines
            .iter()
            .map(|line| LineItem {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                price: line.unit_price,
                discount: line.discount_amount(),
            })
            .collect();
        let mut draft =
            TransactionDraft::new(TransactionKind::Sale, totals.final_total, payment_method)
                .with_discount(totals.line_savings + cart_discount)
                .with_items(items);
        if let Some(account_id) = account_id {
            draft = draft.with_account(account_id);
        }
        if let Some(customer_id) = customer_id {
            draft = draft.with_customer(customer_id);
        }
        draft
    }

    /// Authorizes and posts a sale in one step.
    #[allow(clippy::too_many_arguments)]
    pub fn complete_sale(
        shop: &mut Shop,
        lines: &[CartLine],
        cart_discount: f64,
        payment_method: PaymentMethod,
        account_id: Option<String>,
        customer_id: Option<String>,
        tendered: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<String, LedgerError> {
        let totals = cart_totals(lines, cart_discount);
        Self::authorize(
            shop,
            payment_method,
            tendered,
            totals.final_total,
            now.date_naive(),
        )?;
        let draft = Self::sale_draft(lines, cart_discount, payment_method, account_id, customer_id);
        let id = shop.add_transaction(draft, now);
        // A posted sale empties the register.
        shop.pos_session.reset();
        Ok(id)
    }
}
