// web_app/model/mod.rs - Shared data models for client and server
//
// These structs mirror the JSON documents of the marketplace backend. Field
// names follow the backend's camelCase (and its `_id` keys) through serde
// renames so the Rust side can keep snake_case.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

pub mod forms;

pub use forms::*;

/// Anything with a stable backend identifier
///
/// Paged listings use the identifier to collapse the same record fetched
/// twice, regardless of what else changed between fetches.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Product categories offered by sellers
pub const CATEGORIES: [&str; 10] = [
    "Electronics",
    "Clothing",
    "Stationery",
    "Home",
    "Beauty",
    "Snacks",
    "Sports",
    "Food",
    "Beverages",
    "Other",
];

/// Seller reference embedded in a product document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRef {
    pub username: String,
}

/// Product listed by a seller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub seller: Option<SellerRef>,
}

impl Identified for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Product {
    pub fn seller_name(&self) -> Option<&str> {
        self.seller.as_ref().map(|s| s.username.as_str())
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Seller card shown on the student home page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Identified for Seller {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Delivery status of an order
///
/// Unknown strings from the backend are kept verbatim in `Other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Received,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Orders a student can still act on (not delivered, received or cancelled)
    pub fn is_open(&self) -> bool {
        !matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Received | OrderStatus::Cancelled
        )
    }

    /// Status a seller moves the order to next, if any
    pub fn next_for_seller(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    /// Students may cancel until the order ships
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }

    pub fn can_mark_received(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Received => "Received",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => OrderStatus::Pending,
            "Processing" => OrderStatus::Processing,
            "Shipped" => OrderStatus::Shipped,
            "Delivered" => OrderStatus::Delivered,
            "Received" => OrderStatus::Received,
            "Cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference that the backend sends either as a bare id or as the
/// populated document
#[derive(Deserialize)]
#[serde(untagged)]
enum RefId {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
    },
}

fn ref_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RefId::deserialize(deserializer)? {
        RefId::Id(id) | RefId::Doc { id } => id,
    })
}

/// One product line inside an order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(deserialize_with = "ref_id")]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order as seen by both students and sellers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub products: Vec<OrderLine>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub total_cost: Decimal,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub student_username: Option<String>,
    #[serde(default, rename = "modeofpayment")]
    pub mode_of_payment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Order {
    /// Headline shown on order cards: first product plus a count of the rest
    pub fn summary(&self) -> String {
        match self.products.as_slice() {
            [] => "No products".to_string(),
            [only] => format!("{} × {}", only.product_name, only.quantity),
            [first, rest @ ..] => format!("{} and {} more", first.product_name, rest.len()),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.products.iter().map(|l| l.quantity).sum()
    }
}

/// Discount coupon published by a seller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: String,
    pub coupon_code: String,
    #[serde(default)]
    pub discount_percentage: Decimal,
    #[serde(default)]
    pub max_discount_amount: Decimal,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub min_order_value: Decimal,
    #[serde(default)]
    pub seller_username: Option<String>,
}

impl Identified for Coupon {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Coupon {
    /// Expiry day, accepting both `YYYY-MM-DD` and full ISO timestamps
    pub fn expires_on(&self) -> Option<NaiveDate> {
        let raw = self.expiry_date.as_deref()?;
        let day = raw.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on().is_some_and(|day| day < today)
    }

    /// Discount applied to an order subtotal, or None when the order is
    /// below the coupon's minimum value
    pub fn discount_for(&self, subtotal: Decimal) -> Option<Decimal> {
        if subtotal < self.min_order_value {
            return None;
        }
        let raw = (subtotal * self.discount_percentage / Decimal::ONE_HUNDRED).round_dp(2);
        if self.max_discount_amount > Decimal::ZERO {
            Some(raw.min(self.max_discount_amount))
        } else {
            Some(raw)
        }
    }
}

/// Cart line with the product document populated
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(rename = "productId")]
    pub product: Product,
    pub quantity: u32,
}

impl Identified for CartEntry {
    fn id(&self) -> &str {
        &self.product.id
    }
}

impl CartEntry {
    pub fn subtotal(&self) -> Decimal {
        self.product.cost * Decimal::from(self.quantity)
    }
}

/// Total of all cart lines
pub fn cart_total(entries: &[CartEntry]) -> Decimal {
    entries.iter().map(CartEntry::subtotal).sum()
}

/// Payment method chosen at checkout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    #[serde(rename = "Online Payment")]
    Online,
}

impl PaymentMode {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMode::CashOnDelivery => "Cash on Delivery",
            PaymentMode::Online => "Online Payment",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Cash on Delivery" => Some(PaymentMode::CashOnDelivery),
            "Online Payment" => Some(PaymentMode::Online),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Filters of the "available products" browser
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ProductFilters {
    /// Blank strings from the inputs mean "no filter"
    pub fn new(category: &str, search: &str) -> Self {
        let non_blank = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            category: non_blank(category),
            search: non_blank(search),
        }
    }

    /// Query parameters for the backend, omitting unset filters
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

/// Request body for putting a product into a cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub student_username: String,
    pub product_id: String,
    pub quantity: u32,
}

/// Request body for changing an order's status
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Response of order placement
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    #[serde(default)]
    pub order: Option<Order>,
    /// Checkout session created for online payments
    #[serde(default)]
    pub session_id: Option<String>,
}
