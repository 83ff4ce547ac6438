use chrono::{NaiveDate, TimeZone, Utc};
use pos_core::checkout::{CartLine, CheckoutService, DiscountType};
use pos_core::domain::{PaymentMethod, TransactionDraft, TransactionKind};
use pos_core::errors::LedgerError;
use pos_core::ledger::Shop;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
}

fn at_noon() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap()
}

fn cart() -> Vec<CartLine> {
    vec![CartLine {
        product_id: "prod-1".into(),
        quantity: 1.0,
        unit_price: 500.0,
        discount_value: 0.0,
        discount_type: DiscountType::Amount,
    }]
}

#[test]
fn cash_sale_is_blocked_without_an_open_session() {
    let mut shop = Shop::new();
    let err = CheckoutService::complete_sale(
        &mut shop,
        &cart(),
        0.0,
        PaymentMethod::Cash,
        Some("cash".into()),
        None,
        Some(500.0),
        at_noon(),
    )
    .expect_err("sale must be rejected");
    assert!(matches!(err, LedgerError::DrawerClosed(d) if d == day()));
    assert!(shop.transactions.is_empty());
}

#[test]
fn closed_session_also_blocks_cash_sales() {
    let mut shop = Shop::new();
    shop.open_day(day(), 1000.0);
    shop.close_day(day(), 1000.0);
    let err = CheckoutService::complete_sale(
        &mut shop,
        &cart(),
        0.0,
        PaymentMethod::Cash,
        Some("cash".into()),
        None,
        Some(500.0),
        at_noon(),
    )
    .expect_err("closed drawer must reject cash");
    assert!(matches!(err, LedgerError::DrawerClosed(_)));
}

#[test]
fn card_sales_pass_the_gate_without_a_session() {
    let mut shop = Shop::new();
    let id = CheckoutService::complete_sale(
        &mut shop,
        &cart(),
        0.0,
        PaymentMethod::Card,
        Some("bank_default".into()),
        None,
        None,
        at_noon(),
    )
    .expect("card sale posts without a drawer session");
    assert!(shop.transaction(&id).is_some());
}

#[test]
fn under_tender_is_rejected_for_cash() {
    let mut shop = Shop::new();
    shop.open_day(day(), 1000.0);
    let err = CheckoutService::complete_sale(
        &mut shop,
        &cart(),
        0.0,
        PaymentMethod::Cash,
        Some("cash".into()),
        None,
        Some(400.0),
        at_noon(),
    )
    .expect_err("under-tender must be rejected");
    match err {
        LedgerError::InsufficientTender { required, tendered } => {
            assert_eq!(required, 500.0);
            assert_eq!(tendered, 400.0);
        }
        other => panic!("expected insufficient tender, got {other:?}"),
    }
}

#[test]
fn expected_cash_follows_the_day_arithmetic() {
    // Open with 1000, one cash sale of 500, one cash expense of 200:
    // expected closing cash is 1300.
    let mut shop = Shop::new();
    shop.open_day(day(), 1000.0);

    shop.add_transaction(
        TransactionDraft::new(TransactionKind::Sale, 500.0, PaymentMethod::Cash)
            .with_account("cash"),
        at_noon(),
    );
    shop.add_transaction(
        TransactionDraft::new(TransactionKind::Expense, 200.0, PaymentMethod::Cash)
            .with_account("cash"),
        at_noon(),
    );

    let report = shop.day_cash_report(day());
    assert_eq!(report.opening_balance, 1000.0);
    assert_eq!(report.cash_in, 500.0);
    assert_eq!(report.cash_out, 200.0);
    assert_eq!(report.expected_closing, 1300.0);

    // The drawer account agrees with the session arithmetic.
    assert_eq!(shop.account("cash").unwrap().balance, 1300.0);

    assert!(shop.close_day(day(), 1295.0));
    let session = shop.day_session(day()).unwrap();
    assert_eq!(session.expected_closing, 1300.0);
    assert_eq!(session.actual_closing, Some(1295.0));
}

#[test]
fn other_days_do_not_leak_into_the_report() {
    let mut shop = Shop::new();
    shop.open_day(day(), 100.0);
    let yesterday = Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap();
    shop.add_transaction(
        TransactionDraft::new(TransactionKind::Sale, 999.0, PaymentMethod::Cash)
            .with_account("cash")
            .with_date(yesterday),
        yesterday,
    );
    assert_eq!(shop.expected_closing(day()), 100.0);
}
