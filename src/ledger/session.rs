//! Day-session state machine: one OPEN/CLOSED cash-drawer session per
//! calendar date, and the expected-cash arithmetic used at close.

use chrono::NaiveDate;

use crate::domain::{DaySession, PaymentMethod, Transaction, TransactionKind, CASH_ACCOUNT_ID};
use crate::ledger::Shop;

/// Cash movement summary for one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayCashReport {
    pub opening_balance: f64,
    pub cash_in: f64,
    pub cash_out: f64,
    pub expected_closing: f64,
}

fn moves_drawer_cash(tx: &Transaction) -> bool {
    if tx.payment_method == PaymentMethod::Cash {
        return true;
    }
    tx.kind == TransactionKind::Transfer
        && (tx.account_id.as_deref() == Some(CASH_ACCOUNT_ID)
            || tx.destination_account_id.as_deref() == Some(CASH_ACCOUNT_ID))
}

fn is_cash_inflow(tx: &Transaction) -> bool {
    match tx.kind {
        TransactionKind::Sale | TransactionKind::CreditPayment => true,
        TransactionKind::Transfer => tx.destination_account_id.as_deref() == Some(CASH_ACCOUNT_ID),
        _ => false,
    }
}

fn is_cash_outflow(tx: &Transaction) -> bool {
    match tx.kind {
        TransactionKind::Expense | TransactionKind::Purchase => true,
        TransactionKind::Transfer => tx.account_id.as_deref() == Some(CASH_ACCOUNT_ID),
        _ => false,
    }
}

impl Shop {
    /// Opens (or reopens) the drawer session for `date`, establishing the
    /// float. Force-setting the cash balance here is a direct write, not a
    /// transaction impact.
    pub fn open_day(&mut self, date: NaiveDate, opening_balance: f64) {
        tracing::info!(%date, opening_balance, "opening day session");
        self.day_sessions.retain(|session| session.date != date);
        self.day_sessions.insert(0, DaySession::open(date, opening_balance));
        if let Some(cash) = self
            .accounts
            .iter_mut()
            .find(|account| account.id == CASH_ACCOUNT_ID)
        {
            cash.balance = opening_balance;
        }
    }

    /// Closes the session for `date`, recording the counted drawer amount.
    /// Returns `false` when no session exists for the date.
    pub fn close_day(&mut self, date: NaiveDate, actual_closing: f64) -> bool {
        let expected = self.day_cash_report(date).expected_closing;
        let Some(session) = self
            .day_sessions
            .iter_mut()
            .find(|session| session.date == date)
        else {
            return false;
        };
        session.expected_closing = expected;
        session.actual_closing = Some(actual_closing);
        session.status = crate::domain::SessionStatus::Closed;
        tracing::info!(%date, expected, actual_closing, "day session closed");
        true
    }

    pub fn day_session(&self, date: NaiveDate) -> Option<&DaySession> {
        self.day_sessions.iter().find(|session| session.date == date)
    }

    /// The cash-sale gate: true only while an OPEN session exists for `date`.
    pub fn is_day_open(&self, date: NaiveDate) -> bool {
        self.day_session(date).map(DaySession::is_open).unwrap_or(false)
    }

    /// Expected drawer cash for `date`:
    /// `opening + cash inflows − cash outflows`, where transfers in or out
    /// of the cash account count as drawer movements.
    pub fn day_cash_report(&self, date: NaiveDate) -> DayCashReport {
        let opening_balance = self
            .day_session(date)
            .map(|session| session.opening_balance)
            .unwrap_or(0.0);

        let mut cash_in = 0.0;
        let mut cash_out = 0.0;
        for tx in self.transactions_on(date) {
            if !moves_drawer_cash(tx) {
                continue;
            }
            if is_cash_inflow(tx) {
                cash_in += tx.amount;
            } else if is_cash_outflow(tx) {
                cash_out += tx.amount;
            }
        }

        DayCashReport {
            opening_balance,
            cash_in,
            cash_out,
            expected_closing: opening_balance + cash_in - cash_out,
        }
    }

    pub fn expected_closing(&self, date: NaiveDate) -> f64 {
        self.day_cash_report(date).expected_closing
    }
}
