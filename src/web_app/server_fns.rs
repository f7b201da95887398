// web_app/server_fns.rs - Leptos server function declarations
//
// These are the server function declarations that are accessible from both
// client (WASM) and server (native Rust). The #[server] macro automatically
// generates:
// - On server: The actual function implementation
// - On client: A stub that makes HTTP POST requests to the server
//
// Each function forwards one call to the marketplace backend through the
// shared `MarketClient`. Backend failures come back as `ServerFnError`s and
// turn into `FetchError::Backend` on the client.
//
// IMPORTANT: This file must be compiled for BOTH ssr and hydrate features!

use leptos::prelude::*;

use crate::web_app::model::*;
use crate::web_app::paging::{Page, PageRequest};

#[cfg(feature = "ssr")]
async fn client() -> Result<crate::web_app::api::MarketClient, ServerFnError> {
    use actix_web::{web::Data, HttpRequest};
    use leptos_actix::extract;
    use crate::web_app::api::{client, MarketClient};

    // First try to get from context (for testing or if manually set)
    if let Some(client) = use_context::<MarketClient>() {
        return Ok(client);
    }

    // Try global client (most reliable fallback)
    if let Some(client) = client::get_client() {
        return Ok(client);
    }

    match extract().await {
        Ok(req) => {
            let req: HttpRequest = req;
            if let Some(client) = req.app_data::<Data<MarketClient>>() {
                return Ok(client.as_ref().clone());
            }
        }
        Err(e) => {
            tracing::error!("Failed to extract HttpRequest: {}", e);
        }
    }

    Err(ServerFnError::new("Backend client not available"))
}

#[cfg(feature = "ssr")]
fn relay(context: &str, error: crate::web_app::error::FetchError) -> ServerFnError {
    tracing::error!("{} failed: {}", context, error);
    ServerFnError::new(format!("{context} failed: {error}"))
}

#[cfg(feature = "ssr")]
fn reject(error: crate::web_app::error::ValidationError) -> ServerFnError {
    tracing::warn!("Rejected request: {}", error);
    ServerFnError::new(error.to_string())
}

/// One page of a seller's product catalogue
#[server(ListSellerProducts, "/api")]
pub async fn list_seller_products(request: PageRequest) -> Result<Page<Product>, ServerFnError> {
    let page = client()
        .await?
        .seller_products(&request)
        .await
        .map_err(|e| relay("Loading seller products", e))?;
    tracing::info!(
        "Seller '{}' page {}: {} products",
        request.scope,
        request.page,
        page.items.len()
    );
    Ok(page)
}

/// One page of a seller's orders still being fulfilled
#[server(ListCurrentOrders, "/api")]
pub async fn list_current_orders(request: PageRequest) -> Result<Page<Order>, ServerFnError> {
    client()
        .await?
        .current_orders(&request)
        .await
        .map_err(|e| relay("Loading current orders", e))
}

/// One page of a seller's fulfilled orders
#[server(ListCompletedOrders, "/api")]
pub async fn list_completed_orders(request: PageRequest) -> Result<Page<Order>, ServerFnError> {
    client()
        .await?
        .completed_orders(&request)
        .await
        .map_err(|e| relay("Loading completed orders", e))
}

#[server(GetSellers, "/api")]
pub async fn get_sellers() -> Result<Vec<Seller>, ServerFnError> {
    client()
        .await?
        .sellers()
        .await
        .map_err(|e| relay("Loading sellers", e))
}

#[server(GetAvailableProducts, "/api")]
pub async fn get_available_products(filters: ProductFilters) -> Result<Vec<Product>, ServerFnError> {
    tracing::info!("Available products request: {:?}", filters);
    client()
        .await?
        .available_products(&filters)
        .await
        .map_err(|e| relay("Loading products", e))
}

/// Get a single product by ID
#[server(GetProduct, "/api")]
pub async fn get_product(id: String) -> Result<Product, ServerFnError> {
    client()
        .await?
        .product(&id)
        .await
        .map_err(|e| relay("Loading product", e))
}

#[server(GetPreviousOrders, "/api")]
pub async fn get_previous_orders(student: String) -> Result<Vec<Order>, ServerFnError> {
    client()
        .await?
        .previous_orders(&student)
        .await
        .map_err(|e| relay("Loading previous orders", e))
}

/// Orders of a student that have not been delivered or cancelled yet
#[server(GetTrackedOrders, "/api")]
pub async fn get_tracked_orders(student: String) -> Result<Vec<Order>, ServerFnError> {
    client()
        .await?
        .track_orders(&student)
        .await
        .map_err(|e| relay("Loading tracked orders", e))
}

#[server(UpdateOrderStatus, "/api")]
pub async fn update_order_status(order_id: String, status: OrderStatus) -> Result<(), ServerFnError> {
    tracing::info!("Order {} -> {}", order_id, status);
    client()
        .await?
        .update_order_status(&order_id, status)
        .await
        .map_err(|e| relay("Updating order status", e))
}

#[server(GetCoupons, "/api")]
pub async fn get_coupons(student: String) -> Result<Vec<Coupon>, ServerFnError> {
    client()
        .await?
        .coupons(&student)
        .await
        .map_err(|e| relay("Loading coupons", e))
}

#[server(GetCart, "/api")]
pub async fn get_cart(student: String) -> Result<Vec<CartEntry>, ServerFnError> {
    client()
        .await?
        .cart(&student)
        .await
        .map_err(|e| relay("Loading cart", e))
}

#[server(AddProductToCart, "/api")]
pub async fn add_to_cart(item: AddToCart) -> Result<(), ServerFnError> {
    validate_quantity(item.quantity).map_err(reject)?;
    client()
        .await?
        .add_to_cart(&item)
        .await
        .map_err(|e| relay("Adding to cart", e))
}

/// Place an order; online payments come back with a checkout session id
#[server(PlaceOrder, "/api")]
pub async fn place_order(order: NewOrder) -> Result<OrderReceipt, ServerFnError> {
    for line in &order.products {
        validate_quantity(line.quantity).map_err(reject)?;
    }
    tracing::info!(
        "Placing order for '{}' ({} lines, {})",
        order.student_username,
        order.products.len(),
        order.mode_of_payment
    );
    client()
        .await?
        .place_order(&order)
        .await
        .map_err(|e| relay("Placing order", e))
}

#[server(AddProduct, "/api")]
pub async fn add_product(product: NewProduct) -> Result<(), ServerFnError> {
    client()
        .await?
        .add_product(&product)
        .await
        .map_err(|e| relay("Adding product", e))
}

#[server(UpdateProduct, "/api")]
pub async fn update_product(product_id: String, product: NewProduct) -> Result<(), ServerFnError> {
    tracing::info!("Updating product {} of '{}'", product_id, product.username);
    client()
        .await?
        .update_product(&product_id, &product)
        .await
        .map_err(|e| relay("Updating product", e))
}

#[server(AddCoupon, "/api")]
pub async fn add_coupon(coupon: NewCoupon) -> Result<(), ServerFnError> {
    client()
        .await?
        .add_coupon(&coupon)
        .await
        .map_err(|e| relay("Adding coupon", e))
}
