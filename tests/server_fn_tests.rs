// tests/server_fn_tests.rs
// Test suite for Leptos server functions
//
// Server functions are plain async functions on the server side, so they are
// called directly here with the global backend client pointed at the mock.
// The override is process-wide, so everything that needs it runs in one test.

mod common;

use campus_market::fixtures::*;
use campus_market::web_app::api::client;
use campus_market::web_app::error::FetchError;
use campus_market::web_app::model::*;
use campus_market::web_app::paging::*;
use campus_market::web_app::server_fns::*;
use common::{page_request, start_mock_backend, SHOP};

#[actix_web::test]
async fn test_server_functions_comprehensive() -> anyhow::Result<()> {
    let backend = start_mock_backend().await?;
    client::set_test_client(Some(backend.client()));

    // 1. Paged listings
    println!("Testing list_seller_products...");
    let page = list_seller_products(page_request(SHOP, 1, CATALOGUE_PAGE_SIZE))
        .await
        .map_err(|e| anyhow::anyhow!("list_seller_products failed: {}", e))?;
    assert_eq!(page.items.len(), CATALOGUE_PAGE_SIZE as usize);
    assert_eq!(page.has_more, Some(true));

    println!("Testing list_current_orders through the accumulator...");
    let source = |request: PageRequest| async move { list_current_orders(request).await.map_err(FetchError::from) };
    let mut acc = PagedAccumulator::<Order>::with_policy(ORDERS_PAGE_SIZE, DedupPolicy::KeepLatest);
    acc.reset(SHOP);
    while load_next_page(&mut acc, &source).await.is_some() {}
    assert_eq!(acc.len(), QUEUE_SIZE);

    println!("Testing list_completed_orders...");
    let completed = list_completed_orders(page_request(SHOP, 2, 5))
        .await
        .map_err(|e| anyhow::anyhow!("list_completed_orders failed: {}", e))?;
    assert_eq!(completed.items.len(), 6, "one repeated order plus five new");

    // 2. Backend failures reach the caller as errors
    println!("Testing a failing listing...");
    let err = list_seller_products(page_request("flaky", 1, 10))
        .await
        .expect_err("503 from the backend");
    let relayed = FetchError::from(err);
    assert!(relayed.to_string().contains("503"), "got: {relayed}");

    // 3. Storefront
    println!("Testing get_sellers and get_product...");
    let sellers = get_sellers()
        .await
        .map_err(|e| anyhow::anyhow!("get_sellers failed: {}", e))?;
    assert_eq!(sellers.len(), 2);
    let product = get_product("snack-shack-p4".to_string())
        .await
        .map_err(|e| anyhow::anyhow!("get_product failed: {}", e))?;
    assert_eq!(product.id, "snack-shack-p4");

    println!("Testing get_available_products...");
    let filtered = get_available_products(ProductFilters::new("Snacks", ""))
        .await
        .map_err(|e| anyhow::anyhow!("get_available_products failed: {}", e))?;
    assert!(filtered.iter().all(|p| p.category == "Snacks"));

    // 4. Student orders, cart and coupons
    println!("Testing student order functions...");
    let tracked = get_tracked_orders("asha".to_string())
        .await
        .map_err(|e| anyhow::anyhow!("get_tracked_orders failed: {}", e))?;
    assert!(tracked.iter().all(|o| o.status.is_open()));
    update_order_status("track-1".to_string(), OrderStatus::Cancelled)
        .await
        .map_err(|e| anyhow::anyhow!("update_order_status failed: {}", e))?;
    let previous = get_previous_orders("asha".to_string())
        .await
        .map_err(|e| anyhow::anyhow!("get_previous_orders failed: {}", e))?;
    assert_eq!(previous.len(), 2);

    let cart = get_cart("asha".to_string())
        .await
        .map_err(|e| anyhow::anyhow!("get_cart failed: {}", e))?;
    assert_eq!(cart.len(), 2);
    add_to_cart(AddToCart {
        student_username: "asha".into(),
        product_id: product.id.clone(),
        quantity: 1,
    })
    .await
    .map_err(|e| anyhow::anyhow!("add_to_cart failed: {}", e))?;

    let coupons = get_coupons("asha".to_string())
        .await
        .map_err(|e| anyhow::anyhow!("get_coupons failed: {}", e))?;
    assert_eq!(coupons.len(), 2);

    println!("Testing place_order...");
    let order = CheckoutForm {
        coupon_code: "welcome10".into(),
        location: "Hostel 4".into(),
        phone: "9876543210".into(),
        mode_of_payment: PaymentMode::CashOnDelivery,
    }
    .build(Some("asha"), &product, 2)?;
    let receipt = place_order(order)
        .await
        .map_err(|e| anyhow::anyhow!("place_order failed: {}", e))?;
    assert!(receipt.order.is_some());
    assert_eq!(receipt.session_id, None);

    // 5. Seller forms
    println!("Testing add_product...");
    add_product(NewProduct {
        username: SHOP.into(),
        product_name: "Lemon Soda".into(),
        cost: rust_decimal::Decimal::new(25, 0),
        category: "Beverages".into(),
        quantity: 30,
        description: String::new(),
    })
    .await
    .map_err(|e| anyhow::anyhow!("add_product failed: {}", e))?;

    println!("Testing update_product...");
    let edited = ProductForm {
        quantity: "12".into(),
        ..ProductForm::from_product(&product)
    }
    .build(Some(SHOP))?;
    update_product(product.id.clone(), edited.clone())
        .await
        .map_err(|e| anyhow::anyhow!("update_product failed: {}", e))?;
    let err = update_product("missing".to_string(), edited)
        .await
        .expect_err("404 from the backend");
    assert!(FetchError::from(err).to_string().contains("404"));

    client::set_test_client(None);
    backend.stop().await;
    Ok(())
}

#[actix_web::test]
async fn test_zero_quantity_rejected_before_backend() {
    let err = add_to_cart(AddToCart {
        student_username: "asha".into(),
        product_id: "p1".into(),
        quantity: 0,
    })
    .await
    .expect_err("zero quantity must be rejected");
    assert!(err.to_string().contains("quantity must be at least 1"), "got: {err}");

    let mut order = CheckoutForm {
        coupon_code: String::new(),
        location: "Hostel 4".into(),
        phone: "9876543210".into(),
        mode_of_payment: PaymentMode::Online,
    }
    .build(Some("asha"), &product("p1", SHOP, 10), 1)
    .unwrap();
    order.products[0].quantity = 0;

    let err = place_order(order).await.expect_err("zero quantity line");
    assert!(err.to_string().contains("quantity"), "got: {err}");
}
