// web_app/paging/source.rs - Where pages come from
//
// A `PageSource` is anything that can fetch one page for a request: the
// HTTP client on the server, a server function on the client, or a scripted
// source in tests. Closures returning a future qualify on their own.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::accumulator::{Page, PageOutcome, PageRequest, PagedAccumulator};
use crate::web_app::error::FetchError;
use crate::web_app::model::Identified;

/// Something that can fetch one page of `T`
pub trait PageSource<T> {
    fn fetch_page(&self, request: PageRequest) -> impl Future<Output = Result<Page<T>, FetchError>>;
}

impl<T, F, Fut> PageSource<T> for F
where
    F: Fn(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, FetchError>>,
{
    fn fetch_page(&self, request: PageRequest) -> impl Future<Output = Result<Page<T>, FetchError>> {
        self(request)
    }
}

/// Request the next page from `source` and fold the result into `acc`.
///
/// Returns None when the accumulator declined to issue a request.
pub async fn load_next_page<T, S>(acc: &mut PagedAccumulator<T>, source: &S) -> Option<PageOutcome>
where
    T: Identified,
    S: PageSource<T>,
{
    let ticket = acc.request_next_page()?;
    let result = source.fetch_page(ticket.request().clone()).await;
    Some(acc.settle(&ticket, result))
}

/// A paginated backend listing: path, scope parameter and the field of the
/// response body that holds the items
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingEndpoint {
    pub path: &'static str,
    pub scope_param: &'static str,
    pub items_field: &'static str,
}

impl ListingEndpoint {
    pub const SELLER_PRODUCTS: Self = Self {
        path: "/api/seller/products",
        scope_param: "sellerName",
        items_field: "products",
    };

    pub const CURRENT_ORDERS: Self = Self {
        path: "/api/order/current-orders",
        scope_param: "sellerName",
        items_field: "orders",
    };

    pub const COMPLETED_ORDERS: Self = Self {
        path: "/api/order/completed-orders",
        scope_param: "sellerName",
        items_field: "orders",
    };

    /// Query string parameters for one page request
    pub fn query(&self, request: &PageRequest) -> Vec<(&'static str, String)> {
        vec![
            (self.scope_param, request.scope.clone()),
            ("page", request.page.to_string()),
            ("pageSize", request.page_size.to_string()),
        ]
    }
}

/// Turn a response body into a page.
///
/// Accepts `{ <items_field>: [...], hasMore?: bool }` or a bare array.
/// Anything else (not JSON, field missing, items of the wrong shape) is
/// treated as an empty page, which ends the listing.
pub fn decode_page<T: DeserializeOwned>(body: &[u8], items_field: &str) -> Page<T> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Listing response is not JSON, treating as end of list: {}", e);
            return Page::empty();
        }
    };

    let (items, has_more) = match value {
        Value::Array(items) => (Value::Array(items), None),
        Value::Object(mut body) => {
            let has_more = body.get("hasMore").and_then(Value::as_bool);
            match body.remove(items_field) {
                Some(items) => (items, has_more),
                None => {
                    tracing::warn!("Listing response has no '{}' field", items_field);
                    return Page::empty();
                }
            }
        }
        _ => {
            tracing::warn!("Unexpected listing response shape");
            return Page::empty();
        }
    };

    match serde_json::from_value::<Vec<T>>(items) {
        Ok(items) => Page::new(items, has_more),
        Err(e) => {
            tracing::warn!("Malformed items in '{}': {}", items_field, e);
            Page::empty()
        }
    }
}
