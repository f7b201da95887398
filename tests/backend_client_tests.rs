// tests/backend_client_tests.rs
// The HTTP client against a local mock backend: paged listings through the
// accumulator, failure mapping, and the non-paged marketplace calls.

mod common;

use campus_market::fixtures::*;
use campus_market::web_app::error::FetchError;
use campus_market::web_app::model::*;
use campus_market::web_app::paging::*;
use chrono::NaiveDate;
use common::{page_request, start_mock_backend, with_mock_backend, SHOP};
use rust_decimal::Decimal;

#[actix_web::test]
async fn test_catalogue_walk_through_accumulator() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let source = market.listing(ListingEndpoint::SELLER_PRODUCTS);
        let mut acc = PagedAccumulator::<Product>::new(10);
        acc.reset(SHOP);

        let mut pages = 0;
        while let Some(outcome) = load_next_page(&mut acc, &source).await {
            println!("Catalogue outcome: {:?}", outcome);
            assert!(matches!(outcome, PageOutcome::Merged { .. }));
            pages += 1;
        }

        // hasMore=false on the third page, no trailing empty request
        assert_eq!(pages, 3);
        assert_eq!(acc.len(), CATALOGUE_SIZE);
        assert!(!acc.has_more());
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_unflagged_orders_end_on_empty_page() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let first = market.current_orders(&page_request(SHOP, 1, 10)).await?;
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.has_more, None);

        let source = market.listing(ListingEndpoint::CURRENT_ORDERS);
        let mut acc = PagedAccumulator::<Order>::with_policy(10, DedupPolicy::KeepLatest);
        acc.reset(SHOP);
        while load_next_page(&mut acc, &source).await.is_some() {}

        assert_eq!(acc.len(), QUEUE_SIZE);
        assert_eq!(acc.current_page(), 4);
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_overlapping_pages_are_deduplicated() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let source = market.listing(ListingEndpoint::COMPLETED_ORDERS);
        let mut acc = PagedAccumulator::<Order>::new(5);
        acc.reset(SHOP);

        let mut repeated = 0;
        while let Some(outcome) = load_next_page(&mut acc, &source).await {
            if let PageOutcome::Merged { duplicates, .. } = outcome {
                repeated += duplicates;
            }
        }

        assert_eq!(repeated, 2, "pages 2 and 3 each repeat one order");
        assert_eq!(acc.len(), QUEUE_SIZE);
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_server_error_is_retried() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let source = market.listing(ListingEndpoint::SELLER_PRODUCTS);
        let mut acc = PagedAccumulator::<Product>::new(10);
        acc.reset("recovering");

        load_next_page(&mut acc, &source).await;
        let failed = load_next_page(&mut acc, &source).await;
        match failed {
            Some(PageOutcome::Failed(FetchError::Status { status, .. })) => assert_eq!(status, 500),
            other => anyhow::bail!("expected a failed page 2, got {other:?}"),
        }
        assert_eq!(acc.current_page(), 2);
        assert_eq!(acc.len(), 10);

        let retried = load_next_page(&mut acc, &source).await;
        assert!(matches!(retried, Some(PageOutcome::Merged { page: 2, added: 10, .. })));
        assert_eq!(acc.len(), 20);
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_unavailable_catalogue_keeps_state() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let err = market
            .seller_products(&page_request("flaky", 1, 10))
            .await
            .expect_err("503 should be an error");
        assert_eq!(
            err,
            FetchError::Status {
                status: 503,
                message: "catalogue unavailable".into(),
            }
        );
        assert!(err.is_retryable());
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_html_body_reads_as_end_of_list() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let page = market.seller_products(&page_request("garbage", 1, 10)).await?;
        assert!(page.items.is_empty());
        assert!(!page.resolved_has_more());
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_slow_backend_times_out() -> anyhow::Result<()> {
    let backend = start_mock_backend().await?;
    let market = backend.short_timeout_client();

    let err = market
        .current_orders(&page_request("slow", 1, 10))
        .await
        .expect_err("request should time out");
    assert_eq!(err, FetchError::Timeout(300));

    backend.stop().await;
    Ok(())
}

#[actix_web::test]
async fn test_unreachable_backend_is_transport_error() -> anyhow::Result<()> {
    let backend = start_mock_backend().await?;
    let market = backend.client();
    backend.stop().await;

    let err = market
        .seller_products(&page_request(SHOP, 1, 10))
        .await
        .expect_err("stopped backend should refuse connections");
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    Ok(())
}

#[actix_web::test]
async fn test_storefront_calls() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let sellers = market.sellers().await?;
        assert_eq!(sellers.len(), 2);
        assert_eq!(sellers[0].username, SHOP);

        let snacks = market
            .available_products(&ProductFilters::new("Snacks", ""))
            .await?;
        assert!(!snacks.is_empty());
        assert!(snacks.iter().all(|p| p.category == "Snacks"));

        let searched = market
            .available_products(&ProductFilters::new("", "item snack-shack-p1"))
            .await?;
        // p1 and p10..p19 share the prefix
        assert_eq!(searched.len(), 11);

        let product = market.product("snack-shack-p3").await?;
        assert_eq!(product.cost, Decimal::new(30, 0));

        let missing = market.product("nope").await.expect_err("unknown product");
        assert!(matches!(missing, FetchError::Status { status: 404, .. }));
        assert!(!missing.is_retryable());
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_student_order_calls() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let previous = market.previous_orders("asha").await?;
        assert_eq!(previous.len(), 2);

        let tracked = market.track_orders("asha").await?;
        let ids: Vec<_> = tracked.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["track-1", "track-2"], "finished orders are not tracked");
        assert!(tracked
            .iter()
            .all(|o| o.student_username.as_deref() == Some("asha")));

        market.update_order_status("track-2", OrderStatus::Received).await?;
        let err = market
            .update_order_status("missing", OrderStatus::Cancelled)
            .await
            .expect_err("unknown order");
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_cart_and_checkout_calls() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let cart = market.cart("asha").await?;
        assert_eq!(cart.len(), 2);
        // 10 x 1 + 20 x 2
        assert_eq!(cart_total(&cart), Decimal::new(50, 0));

        let item = AddToCart {
            student_username: "asha".into(),
            product_id: "snack-shack-p1".into(),
            quantity: 2,
        };
        market.add_to_cart(&item).await?;
        let rejected = market
            .add_to_cart(&AddToCart { quantity: 0, ..item })
            .await
            .expect_err("zero quantity");
        assert!(matches!(rejected, FetchError::Status { status: 400, .. }));

        let form = CheckoutForm {
            coupon_code: String::new(),
            location: "Library".into(),
            phone: "9876543210".into(),
            mode_of_payment: PaymentMode::Online,
        };
        let product = market.product("snack-shack-p2").await?;
        let receipt = market
            .place_order(&form.build(Some("asha"), &product, 3)?)
            .await?;
        assert_eq!(receipt.session_id.as_deref(), Some("cs_test_1"));
        let placed = receipt.order.expect("order in receipt");
        assert_eq!(placed.total_cost, Decimal::new(60, 0));

        let quiet = market
            .place_order(&form.build(Some("quiet"), &product, 1)?)
            .await?;
        assert_eq!(quiet, OrderReceipt::default());
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_seller_catalogue_management() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let product = ProductForm {
            product_name: "Masala Chips".into(),
            cost: "20".into(),
            category: "Snacks".into(),
            quantity: "40".into(),
            description: String::new(),
        }
        .build(Some(SHOP))?;
        market.add_product(&product).await?;

        let coupon = CouponForm {
            coupon_code: "snack20".into(),
            discount_percentage: "20".into(),
            max_discount_amount: "40".into(),
            expiry_date: "2026-12-31".into(),
            min_order_value: "100".into(),
            applicable_products: String::new(),
        };
        market.add_coupon(&coupon.build(Some(SHOP), today)?).await?;

        let taken = CouponForm {
            coupon_code: "taken".into(),
            ..coupon
        }
        .build(Some(SHOP), today)?;
        let err = market.add_coupon(&taken).await.expect_err("duplicate code");
        assert!(matches!(err, FetchError::Status { status: 409, .. }));

        let coupons = market.coupons("asha").await?;
        assert_eq!(coupons.len(), 2);
        Ok(())
    })
    .await
}

#[actix_web::test]
async fn test_update_product_from_listed_copy() -> anyhow::Result<()> {
    with_mock_backend(|market| async move {
        let listed = market.product("snack-shack-p2").await?;
        let form = ProductForm {
            cost: "35".into(),
            ..ProductForm::from_product(&listed)
        };
        let update = form.build(Some(SHOP))?;
        assert_eq!(update.product_name, listed.product_name);
        market.update_product(&listed.id, &update).await?;

        let err = market
            .update_product("missing", &update)
            .await
            .expect_err("unknown product");
        assert!(matches!(err, FetchError::Status { status: 404, .. }), "got: {err:?}");
        Ok(())
    })
    .await
}
