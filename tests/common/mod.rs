// common/mod.rs - Shared test utilities: a local mock of the marketplace backend
//
// The mock serves the sample listings from `campus_market::fixtures` on an
// ephemeral port so tests can run the real HTTP client against it:
// 1. No external backend or network needed
// 2. Each test gets its own server, so tests can run in parallel
// 3. A few magic scope names exercise the failure paths
//
// Magic seller names:
// - "flaky":      catalogue answers 503
// - "garbage":    catalogue answers HTML with status 200
// - "recovering": catalogue page 2 fails once, then works
// - "slow":       current orders answer after `SLOW_RESPONSE`
// - "missing":    order and product updates answer 404

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::json;

use campus_market::fixtures::*;
use campus_market::web_app::api::{MarketClient, MarketConfig};
use campus_market::web_app::model::*;
use campus_market::web_app::paging::PageRequest;

/// Catalogue every non-paged product route serves from
pub const SHOP: &str = "snack-shack";

/// Delay of the "slow" seller, longer than `short_timeout_client` waits
pub const SLOW_RESPONSE: Duration = Duration::from_millis(1_500);

/// Mock backend running on 127.0.0.1
pub struct MockBackend {
    pub base_url: String,
    handle: ServerHandle,
}

impl MockBackend {
    /// Client pointed at this backend with the default timeout
    pub fn client(&self) -> MarketClient {
        self.client_with(MarketConfig::default())
    }

    /// Client that gives up well before the "slow" seller answers
    pub fn short_timeout_client(&self) -> MarketClient {
        self.client_with(MarketConfig::default().with_timeout(Duration::from_millis(300)))
    }

    fn client_with(&self, config: MarketConfig) -> MarketClient {
        MarketClient::new(&config.with_base_url(self.base_url.clone()))
            .expect("mock backend client should build")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Start a mock backend on an ephemeral port
///
/// Must be called from inside an actix runtime (`#[actix_web::test]`).
pub async fn start_mock_backend() -> anyhow::Result<MockBackend> {
    let failures_left = web::Data::new(AtomicUsize::new(1));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(failures_left.clone())
            .route("/api/seller/products", web::get().to(seller_products))
            .route("/api/order/current-orders", web::get().to(current_orders))
            .route("/api/order/completed-orders", web::get().to(completed_orders))
            .route("/api/seller/sellers-categories", web::get().to(sellers))
            .route("/api/seller/available-products", web::get().to(available_products))
            .route("/api/seller/product/{id}", web::get().to(product_by_id))
            .route("/api/seller/add-product", web::post().to(add_product))
            .route("/api/seller/update-product/{id}", web::put().to(update_product))
            .route("/api/order/previous-orders/{student}", web::get().to(previous_orders))
            .route("/api/order/track-orders/{student}", web::get().to(track_orders))
            .route("/api/order/update-status/{id}", web::put().to(update_status))
            .route("/api/order/placeorder", web::post().to(place_order))
            .route("/api/coupon/available/{student}", web::get().to(coupons))
            .route("/api/coupon/add", web::post().to(add_coupon))
            .route("/api/cart/add", web::post().to(add_to_cart))
            .route("/api/cart/{student}", web::get().to(cart))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;

    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("mock backend did not bind"))?;
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok(MockBackend {
        base_url: format!("http://{addr}"),
        handle,
    })
}

/// Full setup and teardown wrapper for tests that need a backend
pub async fn with_mock_backend<F, Fut>(test_fn: F) -> anyhow::Result<()>
where
    F: FnOnce(MarketClient) -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<()>>,
{
    let backend = start_mock_backend().await?;
    let result = test_fn(backend.client()).await;
    backend.stop().await;
    result
}

/// Page request for a scope, as the accumulator would issue it
pub fn page_request(scope: &str, page: u32, page_size: u32) -> PageRequest {
    PageRequest {
        scope: scope.to_string(),
        page,
        page_size,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    seller_name: String,
    page: u32,
    page_size: u32,
}

impl PageQuery {
    fn request(&self) -> PageRequest {
        page_request(&self.seller_name, self.page, self.page_size)
    }
}

#[derive(Deserialize)]
struct FilterQuery {
    category: Option<String>,
    search: Option<String>,
}

async fn seller_products(
    query: web::Query<PageQuery>,
    failures_left: web::Data<AtomicUsize>,
) -> HttpResponse {
    match query.seller_name.as_str() {
        "flaky" => return HttpResponse::ServiceUnavailable().body("catalogue unavailable"),
        "garbage" => {
            return HttpResponse::Ok()
                .content_type("text/html")
                .body("<html><body>Bad gateway</body></html>")
        }
        "recovering" if query.page == 2 => {
            let failed_before = failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failed_before {
                return HttpResponse::InternalServerError().body("try again");
            }
        }
        _ => {}
    }

    let page = SellerCatalogue::page(&query.request(), true);
    HttpResponse::Ok().json(json!({ "products": page.items, "hasMore": page.has_more }))
}

async fn current_orders(query: web::Query<PageQuery>) -> HttpResponse {
    if query.seller_name == "slow" {
        actix_web::rt::time::sleep(SLOW_RESPONSE).await;
    }
    // No hasMore flag: the client stops on an empty page
    let page = CurrentQueue::page(&query.request(), false);
    HttpResponse::Ok().json(json!({ "orders": page.items }))
}

/// Every page after the first repeats the last order of the page before
async fn completed_orders(query: web::Query<PageQuery>) -> HttpResponse {
    let all = CompletedQueue::all(&query.seller_name);
    let size = query.page_size.max(1) as usize;
    let start = (query.page.max(1) as usize - 1) * size;
    let end = (start + size).min(all.len());
    let from = start.saturating_sub(1).min(end);

    let items = all.get(from..end).map(<[_]>::to_vec).unwrap_or_default();
    HttpResponse::Ok().json(json!({ "orders": items, "hasMore": end < all.len() }))
}

async fn sellers() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "sellers": [
            { "_id": "s1", "username": SHOP, "categories": ["Snacks", "Beverages"] },
            { "_id": "s2", "username": "campus-books", "email": "books@campus.in", "categories": ["Stationery"] }
        ]
    }))
}

async fn available_products(query: web::Query<FilterQuery>) -> HttpResponse {
    let products: Vec<Product> = SellerCatalogue::all(SHOP)
        .into_iter()
        .filter(|p| query.category.as_ref().map_or(true, |c| &p.category == c))
        .filter(|p| {
            query
                .search
                .as_ref()
                .map_or(true, |s| p.product_name.to_lowercase().contains(&s.to_lowercase()))
        })
        .collect();
    HttpResponse::Ok().json(json!({ "products": products }))
}

async fn product_by_id(id: web::Path<String>) -> HttpResponse {
    match SellerCatalogue::all(SHOP).into_iter().find(|p| p.id == *id) {
        Some(product) => HttpResponse::Ok().json(product),
        None => HttpResponse::NotFound().json(json!({ "message": "Product not found" })),
    }
}

async fn add_product(body: web::Json<NewProduct>) -> HttpResponse {
    if body.product_name.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "productName is required" }));
    }
    HttpResponse::Created().json(json!({ "message": "Product added" }))
}

async fn update_product(id: web::Path<String>, body: web::Json<NewProduct>) -> HttpResponse {
    if id.as_str() == "missing" {
        return HttpResponse::NotFound().json(json!({ "message": "Product not found" }));
    }
    if body.cost <= rust_decimal::Decimal::ZERO {
        return HttpResponse::BadRequest().json(json!({ "message": "cost must be positive" }));
    }
    HttpResponse::Ok().json(json!({
        "message": "Product updated",
        "product": { "_id": id.as_str(), "productName": body.product_name, "cost": body.cost }
    }))
}

async fn previous_orders(student: web::Path<String>) -> HttpResponse {
    let orders = vec![
        student_order(&student, "prev-1", OrderStatus::Delivered),
        student_order(&student, "prev-2", OrderStatus::Received),
    ];
    HttpResponse::Ok().json(json!({ "orders": orders }))
}

async fn track_orders(student: web::Path<String>) -> HttpResponse {
    let orders = vec![
        student_order(&student, "track-1", OrderStatus::Pending),
        student_order(&student, "track-2", OrderStatus::Shipped),
        student_order(&student, "track-3", OrderStatus::Delivered),
        student_order(&student, "track-4", OrderStatus::Cancelled),
    ];
    HttpResponse::Ok().json(json!({ "orders": orders }))
}

fn student_order(student: &str, id: &str, status: OrderStatus) -> Order {
    Order {
        student_username: Some(student.to_string()),
        ..order(id, status)
    }
}

async fn update_status(id: web::Path<String>, body: web::Json<StatusUpdate>) -> HttpResponse {
    if id.as_str() == "missing" {
        return HttpResponse::NotFound().json(json!({ "message": "Order not found" }));
    }
    HttpResponse::Ok().json(json!({ "message": format!("Order {} is now {}", id, body.status) }))
}

async fn place_order(body: web::Json<NewOrder>) -> HttpResponse {
    if body.student_username == "quiet" {
        return HttpResponse::Created().finish();
    }

    let total: rust_decimal::Decimal = body.products.iter().map(OrderLine::subtotal).sum();
    let placed = Order {
        products: body.products.clone(),
        total_cost: total,
        location: Some(body.location.clone()),
        student_username: Some(body.student_username.clone()),
        mode_of_payment: Some(body.mode_of_payment.label().to_string()),
        ..order("placed-1", OrderStatus::Pending)
    };
    let session_id = (body.mode_of_payment == PaymentMode::Online).then_some("cs_test_1");
    HttpResponse::Created().json(json!({ "order": placed, "sessionId": session_id }))
}

async fn coupons(_student: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "coupons": [
            {
                "_id": "c1",
                "couponCode": "WELCOME10",
                "discountPercentage": 10,
                "maxDiscountAmount": 50,
                "expiryDate": "2099-12-31T00:00:00.000Z",
                "minOrderValue": 100,
                "sellerUsername": SHOP
            },
            {
                "_id": "c2",
                "couponCode": "OLD5",
                "discountPercentage": 5,
                "maxDiscountAmount": 20,
                "expiryDate": "2020-01-01"
            }
        ]
    }))
}

async fn add_coupon(body: web::Json<NewCoupon>) -> HttpResponse {
    if body.coupon_code == "TAKEN" {
        return HttpResponse::Conflict().json(json!({ "message": "Coupon code already exists" }));
    }
    HttpResponse::Created().json(json!({ "message": "Coupon added" }))
}

async fn add_to_cart(body: web::Json<AddToCart>) -> HttpResponse {
    if body.quantity == 0 {
        return HttpResponse::BadRequest().json(json!({ "message": "Quantity must be positive" }));
    }
    HttpResponse::Ok().json(json!({ "message": "Added to cart" }))
}

async fn cart(_student: web::Path<String>) -> HttpResponse {
    let entries: Vec<CartEntry> = products(SHOP, 2)
        .into_iter()
        .enumerate()
        .map(|(i, product)| CartEntry {
            product,
            quantity: i as u32 + 1,
        })
        .collect();
    HttpResponse::Ok().json(json!({ "cart": entries }))
}
