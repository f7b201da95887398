// tests/model_tests.rs
// Backend documents as the marketplace API sends them, and the small bits of
// business logic that hang off the models.

use campus_market::fixtures::*;
use campus_market::web_app::model::*;
use campus_market::web_app::paging::{decode_page, Page};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn coupon(percentage: i64, max: i64, min_order: i64) -> Coupon {
    Coupon {
        id: "c1".into(),
        coupon_code: "WELCOME10".into(),
        discount_percentage: Decimal::new(percentage, 0),
        max_discount_amount: Decimal::new(max, 0),
        expiry_date: Some("2026-12-31".into()),
        min_order_value: Decimal::new(min_order, 0),
        seller_username: None,
    }
}

#[test]
fn test_seller_status_progression() {
    let mut status = OrderStatus::Pending;
    let mut seen = vec![status.clone()];
    while let Some(next) = status.next_for_seller() {
        seen.push(next.clone());
        status = next;
    }
    assert_eq!(
        seen,
        vec![
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ]
    );
    assert_eq!(OrderStatus::Cancelled.next_for_seller(), None);
    assert_eq!(OrderStatus::Other("On hold".into()).next_for_seller(), None);
}

#[test]
fn test_student_actions_by_status() {
    assert!(OrderStatus::Pending.can_cancel());
    assert!(OrderStatus::Processing.can_cancel());
    assert!(!OrderStatus::Shipped.can_cancel());

    assert!(OrderStatus::Shipped.can_mark_received());
    assert!(OrderStatus::Delivered.can_mark_received());
    assert!(!OrderStatus::Pending.can_mark_received());
    assert!(!OrderStatus::Received.can_mark_received());
}

#[test]
fn test_coupon_discount_is_capped() {
    let c = coupon(10, 50, 100);
    assert_eq!(c.discount_for(Decimal::new(99, 0)), None, "below minimum order value");
    assert_eq!(c.discount_for(Decimal::new(200, 0)), Some(Decimal::new(20, 0)));
    assert_eq!(c.discount_for(Decimal::new(1_000, 0)), Some(Decimal::new(50, 0)));
}

#[test]
fn test_coupon_without_cap() {
    let c = coupon(15, 0, 0);
    assert_eq!(c.discount_for(Decimal::new(1_000, 0)), Some(Decimal::new(150, 0)));
}

#[test]
fn test_coupon_expiry_formats() {
    let mut c = coupon(10, 50, 0);
    assert_eq!(c.expires_on(), Some(day("2026-12-31")));
    assert!(!c.is_expired(day("2026-12-31")));
    assert!(c.is_expired(day("2027-01-01")));

    c.expiry_date = Some("2025-03-01T00:00:00.000Z".into());
    assert_eq!(c.expires_on(), Some(day("2025-03-01")));

    c.expiry_date = Some("someday".into());
    assert_eq!(c.expires_on(), None);
    assert!(!c.is_expired(day("2030-01-01")), "unparsable expiry never expires");
}

#[test]
fn test_cart_from_backend_json() {
    let cart: Vec<CartEntry> = serde_json::from_value(json!([
        {
            "productId": { "_id": "p1", "productName": "Chips", "cost": "20.50" },
            "quantity": 2
        },
        {
            "productId": { "_id": "p2", "productName": "Juice", "cost": 35 },
            "quantity": 1
        }
    ]))
    .unwrap();

    assert_eq!(cart[0].subtotal(), Decimal::new(4_100, 2));
    assert_eq!(cart_total(&cart), Decimal::new(7_600, 2));
    assert_eq!(cart_total(&[]), Decimal::ZERO);
}

#[test]
fn test_seller_list_body() {
    let page: Page<Seller> = decode_page(
        br#"{"sellers":[{"_id":"s1","username":"snack-shack","categories":["Snacks"]},{"_id":"s2","username":"campus-books"}]}"#,
        "sellers",
    );
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].categories, vec!["Snacks"]);
    assert!(page.items[1].categories.is_empty());
}

#[test]
fn test_order_list_with_populated_products() {
    let body = json!({
        "orders": [{
            "_id": "o1",
            "products": [{ "productId": { "_id": "p1" }, "productName": "Pen", "quantity": 3, "price": 10 }],
            "status": "Shipped",
            "totalCost": 30,
            "studentUsername": "asha",
            "modeofpayment": "Online Payment",
            "createdAt": "2026-10-01T09:30:00Z"
        }]
    });
    let page: Page<Order> = decode_page(body.to_string().as_bytes(), "orders");

    let order = &page.items[0];
    assert_eq!(order.products[0].product_id, "p1");
    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(order.mode_of_payment.as_deref(), Some("Online Payment"));
    assert!(order.created_at.is_some());
}

#[test]
fn test_fixture_documents_survive_the_wire() {
    let product = product("p7", "snack-shack", 70);
    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["_id"], "p7");
    assert_eq!(json["productName"], "Item p7");
    assert_eq!(serde_json::from_value::<Product>(json).unwrap(), product);

    let order = order("o7", OrderStatus::Other("Out for delivery".into()));
    let json = serde_json::to_value(&order).unwrap();
    assert_eq!(json["status"], "Out for delivery");
    assert_eq!(serde_json::from_value::<Order>(json).unwrap(), order);
}

#[test]
fn test_receipt_defaults() {
    let receipt: OrderReceipt = serde_json::from_value(json!({ "sessionId": "cs_1" })).unwrap();
    assert_eq!(receipt.session_id.as_deref(), Some("cs_1"));
    assert!(receipt.order.is_none());
}
