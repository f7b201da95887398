// web_app/api/backend.rs - Typed HTTP client for the marketplace backend
//
// One method per backend call. Every call shares the same failure mapping:
// reqwest timeouts become `FetchError::Timeout`, other transport problems
// `FetchError::Transport`, and any non-2xx answer `FetchError::Status`.
// List endpoints go through `decode_page`, so a malformed list body reads as
// an empty list rather than an error.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::web_app::error::FetchError;
use crate::web_app::model::*;
use crate::web_app::paging::{decode_page, ListingEndpoint, Page, PageRequest, PageSource};

use super::config::MarketConfig;

/// Backend routes that are not paged listings
mod routes {
    pub const SELLERS: &str = "/api/seller/sellers-categories";
    pub const AVAILABLE_PRODUCTS: &str = "/api/seller/available-products";
    pub const PRODUCT: &str = "/api/seller/product";
    pub const ADD_PRODUCT: &str = "/api/seller/add-product";
    pub const UPDATE_PRODUCT: &str = "/api/seller/update-product";
    pub const PREVIOUS_ORDERS: &str = "/api/order/previous-orders";
    pub const TRACK_ORDERS: &str = "/api/order/track-orders";
    pub const UPDATE_STATUS: &str = "/api/order/update-status";
    pub const PLACE_ORDER: &str = "/api/order/placeorder";
    pub const COUPONS: &str = "/api/coupon/available";
    pub const ADD_COUPON: &str = "/api/coupon/add";
    pub const CART: &str = "/api/cart";
    pub const ADD_TO_CART: &str = "/api/cart/add";
}

/// Client for the marketplace backend; cheap to clone
#[derive(Clone, Debug)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl MarketClient {
    pub fn new(config: &MarketConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a resource addressed by one path segment, e.g. `/api/cart/<student>`
    fn resource_url(&self, path: &str, segment: &str) -> Result<reqwest::Url, FetchError> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|e| FetchError::Transport(format!("invalid backend URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport("backend URL cannot have a path".to_string()))?
            .push(segment);
        Ok(url)
    }

    fn map_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout.as_millis() as u64)
        } else {
            FetchError::Transport(error.to_string())
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::error!("Backend answered {}: {}", status, message);
        Err(FetchError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, FetchError> {
        let response = self.send(request).await?;
        response.json::<R>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Backend(format!("unexpected response: {e}"))
            } else {
                self.map_error(e)
            }
        })
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        items_field: &str,
    ) -> Result<Vec<T>, FetchError> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        Ok(decode_page(&body, items_field).items)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, request: RequestBuilder, body: &B) -> Result<Response, FetchError> {
        self.send(request.json(body)).await
    }

    /// Fetch one page of a paginated listing
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: ListingEndpoint,
        request: &PageRequest,
    ) -> Result<Page<T>, FetchError> {
        tracing::info!(
            "Fetching {} page {} for {}={}",
            endpoint.path,
            request.page,
            endpoint.scope_param,
            request.scope
        );
        let http = self.http.get(self.url(endpoint.path)).query(&endpoint.query(request));
        let response = self.send(http).await?;
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        Ok(decode_page(&body, endpoint.items_field))
    }

    /// Page source bound to one listing endpoint
    pub fn listing(&self, endpoint: ListingEndpoint) -> HttpListing<'_> {
        HttpListing {
            client: self,
            endpoint,
        }
    }

    pub async fn seller_products(&self, request: &PageRequest) -> Result<Page<Product>, FetchError> {
        self.fetch_page(ListingEndpoint::SELLER_PRODUCTS, request).await
    }

    pub async fn current_orders(&self, request: &PageRequest) -> Result<Page<Order>, FetchError> {
        self.fetch_page(ListingEndpoint::CURRENT_ORDERS, request).await
    }

    pub async fn completed_orders(&self, request: &PageRequest) -> Result<Page<Order>, FetchError> {
        self.fetch_page(ListingEndpoint::COMPLETED_ORDERS, request).await
    }

    /// Sellers with the categories they sell in
    pub async fn sellers(&self) -> Result<Vec<Seller>, FetchError> {
        self.get_list(self.http.get(self.url(routes::SELLERS)), "sellers").await
    }

    pub async fn available_products(&self, filters: &ProductFilters) -> Result<Vec<Product>, FetchError> {
        let request = self
            .http
            .get(self.url(routes::AVAILABLE_PRODUCTS))
            .query(&filters.query());
        self.get_list(request, "products").await
    }

    pub async fn product(&self, id: &str) -> Result<Product, FetchError> {
        let url = self.resource_url(routes::PRODUCT, id)?;
        self.get_json(self.http.get(url)).await
    }

    pub async fn previous_orders(&self, student: &str) -> Result<Vec<Order>, FetchError> {
        let url = self.resource_url(routes::PREVIOUS_ORDERS, student)?;
        self.get_list(self.http.get(url), "orders").await
    }

    /// Orders of a student that are still on their way
    pub async fn track_orders(&self, student: &str) -> Result<Vec<Order>, FetchError> {
        let url = self.resource_url(routes::TRACK_ORDERS, student)?;
        let orders: Vec<Order> = self.get_list(self.http.get(url), "orders").await?;
        Ok(orders.into_iter().filter(|o| o.status.is_open()).collect())
    }

    pub async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<(), FetchError> {
        let url = self.resource_url(routes::UPDATE_STATUS, order_id)?;
        self.send(self.http.put(url).json(&StatusUpdate { status })).await?;
        Ok(())
    }

    pub async fn coupons(&self, student: &str) -> Result<Vec<Coupon>, FetchError> {
        let url = self.resource_url(routes::COUPONS, student)?;
        self.get_list(self.http.get(url), "coupons").await
    }

    pub async fn cart(&self, student: &str) -> Result<Vec<CartEntry>, FetchError> {
        let url = self.resource_url(routes::CART, student)?;
        self.get_list(self.http.get(url), "cart").await
    }

    pub async fn add_to_cart(&self, item: &AddToCart) -> Result<(), FetchError> {
        self.post_json(self.http.post(self.url(routes::ADD_TO_CART)), item).await?;
        Ok(())
    }

    pub async fn place_order(&self, order: &NewOrder) -> Result<OrderReceipt, FetchError> {
        let response = self
            .post_json(self.http.post(self.url(routes::PLACE_ORDER)), order)
            .await?;
        // Some deployments answer 201 with an empty body
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        if body.is_empty() {
            return Ok(OrderReceipt::default());
        }
        serde_json::from_slice(&body).map_err(|e| FetchError::Backend(format!("unexpected order receipt: {e}")))
    }

    pub async fn add_product(&self, product: &NewProduct) -> Result<(), FetchError> {
        self.post_json(self.http.post(self.url(routes::ADD_PRODUCT)), product).await?;
        Ok(())
    }

    /// Replace the listed fields of one product
    pub async fn update_product(&self, product_id: &str, product: &NewProduct) -> Result<(), FetchError> {
        let url = self.resource_url(routes::UPDATE_PRODUCT, product_id)?;
        self.send(self.http.put(url).json(product)).await?;
        Ok(())
    }

    pub async fn add_coupon(&self, coupon: &NewCoupon) -> Result<(), FetchError> {
        self.post_json(self.http.post(self.url(routes::ADD_COUPON)), coupon).await?;
        Ok(())
    }
}

/// One listing endpoint of a `MarketClient`, usable as a page source
#[derive(Clone, Copy, Debug)]
pub struct HttpListing<'a> {
    client: &'a MarketClient,
    endpoint: ListingEndpoint,
}

impl<T: DeserializeOwned> PageSource<T> for HttpListing<'_> {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        self.client.fetch_page(self.endpoint, &request).await
    }
}
