#![doc(test(attr(deny(warnings))))]

//! POS Core offers the transaction ledger, cash-drawer session, recurring
//! expense, and checkout primitives that power a retail point-of-sale
//! application. UI concerns, receipt printing, and the remote blob store
//! live outside this crate.

pub mod checkout;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("POS Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
