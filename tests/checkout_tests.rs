use chrono::{TimeZone, Utc};
use pos_core::checkout::{cart_totals, change_due, CartLine, CheckoutService, DiscountType, PosSession};
use pos_core::domain::{PaymentMethod, Product};
use pos_core::ledger::Shop;

fn line(
    product_id: &str,
    quantity: f64,
    unit_price: f64,
    discount_value: f64,
    discount_type: DiscountType,
) -> CartLine {
    CartLine {
        product_id: product_id.into(),
        quantity,
        unit_price,
        discount_value,
        discount_type,
    }
}

#[test]
fn mixed_discount_cart_adds_up() {
    let lines = vec![
        line("p1", 2.0, 100.0, 10.0, DiscountType::Percent), // gross 200, save 20
        line("p2", 1.0, 80.0, 5.0, DiscountType::Amount),    // gross 80, save 5
    ];
    let totals = cart_totals(&lines, 15.0);
    assert_eq!(totals.gross, 280.0);
    assert_eq!(totals.line_savings, 25.0);
    assert_eq!(totals.net_before_cart_discount, 255.0);
    assert_eq!(totals.final_total, 240.0);
}

#[test]
fn final_total_never_goes_negative() {
    let cases = [
        (vec![line("p1", 1.0, 50.0, 0.0, DiscountType::Amount)], 60.0),
        (vec![line("p1", 1.0, 50.0, 100.0, DiscountType::Percent)], 1.0),
        (Vec::new(), 10.0),
    ];
    for (lines, cart_discount) in cases {
        let totals = cart_totals(&lines, cart_discount);
        assert!(totals.final_total >= 0.0, "negative payable for {lines:?}");
        assert_eq!(
            totals.final_total,
            (totals.gross - totals.line_savings - cart_discount).max(0.0)
        );
    }
}

#[test]
fn change_due_matches_cash_over_tender() {
    assert_eq!(change_due(250.0, 240.0), 10.0);
    assert_eq!(change_due(240.0, 240.0), 0.0);
    assert_eq!(change_due(0.0, 240.0), 0.0);
}

#[test]
fn completed_sale_moves_stock_and_cash() {
    let mut shop = Shop::new();
    shop.upsert_product(Product::new("p1", "Soap", 100.0, 8.0));
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 16, 0, 0).unwrap();
    shop.open_day(now.date_naive(), 1000.0);

    let id = CheckoutService::complete_sale(
        &mut shop,
        &[line("p1", 2.0, 100.0, 0.0, DiscountType::Amount)],
        0.0,
        PaymentMethod::Cash,
        Some("cash".into()),
        None,
        Some(200.0),
        now,
    )
    .expect("sale should post");

    let tx = shop.transaction(&id).unwrap();
    assert_eq!(tx.amount, 200.0);
    assert_eq!(shop.product("p1").unwrap().stock, 6.0);
    assert_eq!(shop.account("cash").unwrap().balance, 1200.0);
}

#[test]
fn completed_sale_clears_the_register() {
    let mut shop = Shop::new();
    shop.upsert_product(Product::new("p1", "Soap", 100.0, 8.0));
    let lines = vec![line("p1", 1.0, 100.0, 0.0, DiscountType::Amount)];
    shop.pos_session.cart = lines.clone();
    shop.pos_session.search = "soap".into();
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 16, 0, 0).unwrap();

    CheckoutService::complete_sale(
        &mut shop,
        &lines,
        0.0,
        PaymentMethod::Card,
        Some("bank_default".into()),
        None,
        None,
        now,
    )
    .expect("card sale should post");

    assert_eq!(shop.pos_session, PosSession::default());
}

#[test]
fn discounted_sale_records_the_savings_on_the_record() {
    let mut shop = Shop::new();
    shop.upsert_product(Product::new("p1", "Soap", 100.0, 8.0));
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 16, 0, 0).unwrap();

    let id = CheckoutService::complete_sale(
        &mut shop,
        &[line("p1", 2.0, 100.0, 10.0, DiscountType::Percent)],
        30.0,
        PaymentMethod::Card,
        Some("bank_default".into()),
        None,
        None,
        now,
    )
    .expect("card sale should post");

    let tx = shop.transaction(&id).unwrap();
    assert_eq!(tx.amount, 150.0);
    assert_eq!(tx.discount, 50.0);
    assert_eq!(tx.items[0].discount, 20.0);
}
