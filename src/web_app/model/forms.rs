// web_app/model/forms.rs - Form payloads and their validation rules
//
// Form inputs arrive as raw strings from the views. Each `*Form` turns its
// strings into a typed request body, rejecting bad values before anything
// reaches the backend.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderLine, PaymentMode, Product, CATEGORIES};
use crate::web_app::error::ValidationError;

pub const MIN_COUPON_CODE_LEN: usize = 3;
pub const PHONE_DIGITS: usize = 10;

/// Product created by a seller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Seller username the product is attached to
    pub username: String,
    pub product_name: String,
    pub cost: Decimal,
    pub category: String,
    pub quantity: u32,
    pub description: String,
}

/// Coupon created by a seller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub username: String,
    pub coupon_code: String,
    pub discount_percentage: Decimal,
    pub max_discount_amount: Decimal,
    pub expiry_date: NaiveDate,
    pub min_order_value: Decimal,
    pub applicable_products: Vec<String>,
}

/// Order placed by a student
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub student_username: String,
    pub products: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub location: String,
    #[serde(rename = "modeofpayment")]
    pub mode_of_payment: PaymentMode,
    #[serde(rename = "studentphno")]
    pub student_phone: String,
}

/// Raw inputs of the add-product form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub product_name: String,
    pub cost: String,
    pub category: String,
    pub quantity: String,
    pub description: String,
}

impl ProductForm {
    /// Form pre-filled with a listed product, for editing
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            cost: product.cost.normalize().to_string(),
            category: product.category.clone(),
            quantity: product.quantity.to_string(),
            description: product.description.clone(),
        }
    }

    pub fn build(&self, seller: Option<&str>) -> Result<NewProduct, ValidationError> {
        let username = required(seller.unwrap_or_default(), "seller username")?;
        let product_name = required(&self.product_name, "product name")?;

        let category = required(&self.category, "category")?;
        if !CATEGORIES.contains(&category.as_str()) {
            return Err(ValidationError::invalid(
                "category",
                format!("'{category}' is not a known category"),
            ));
        }

        let cost: Decimal = parse(&self.cost, "cost")?;
        if cost <= Decimal::ZERO {
            return Err(ValidationError::invalid("cost", "must be greater than zero"));
        }

        let quantity: u32 = parse(&self.quantity, "quantity")?;
        if quantity == 0 {
            return Err(ValidationError::invalid("quantity", "must be at least 1"));
        }

        Ok(NewProduct {
            username,
            product_name,
            cost,
            category,
            quantity,
            description: self.description.trim().to_string(),
        })
    }
}

/// Raw inputs of the add-coupon form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CouponForm {
    pub coupon_code: String,
    pub discount_percentage: String,
    pub max_discount_amount: String,
    pub expiry_date: String,
    pub min_order_value: String,
    /// Comma separated product ids; empty means every product
    pub applicable_products: String,
}

impl CouponForm {
    pub fn build(&self, seller: Option<&str>, today: NaiveDate) -> Result<NewCoupon, ValidationError> {
        let username = required(seller.unwrap_or_default(), "seller username")?;

        let coupon_code = required(&self.coupon_code, "coupon code")?.to_uppercase();
        if coupon_code.chars().count() < MIN_COUPON_CODE_LEN {
            return Err(ValidationError::invalid(
                "coupon code",
                format!("must have at least {MIN_COUPON_CODE_LEN} characters"),
            ));
        }

        let discount_percentage: Decimal = parse(&self.discount_percentage, "discount percentage")?;
        if discount_percentage <= Decimal::ZERO || discount_percentage > Decimal::ONE_HUNDRED {
            return Err(ValidationError::invalid(
                "discount percentage",
                "must be between 0 and 100",
            ));
        }

        let max_discount_amount: Decimal = parse(&self.max_discount_amount, "max discount amount")?;
        if max_discount_amount <= Decimal::ZERO {
            return Err(ValidationError::invalid(
                "max discount amount",
                "must be greater than zero",
            ));
        }

        let min_order_value = if self.min_order_value.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse(&self.min_order_value, "min order value")?
        };
        if min_order_value < Decimal::ZERO {
            return Err(ValidationError::invalid("min order value", "cannot be negative"));
        }

        let expiry = required(&self.expiry_date, "expiry date")?;
        let expiry_date = NaiveDate::parse_from_str(&expiry, "%Y-%m-%d")
            .map_err(|_| ValidationError::invalid("expiry date", "must look like YYYY-MM-DD"))?;
        if expiry_date < today {
            return Err(ValidationError::invalid("expiry date", "is already in the past"));
        }

        let applicable_products = self
            .applicable_products
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(NewCoupon {
            username,
            coupon_code,
            discount_percentage,
            max_discount_amount,
            expiry_date,
            min_order_value,
            applicable_products,
        })
    }
}

/// Raw inputs of the checkout form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub coupon_code: String,
    pub location: String,
    pub phone: String,
    pub mode_of_payment: PaymentMode,
}

impl CheckoutForm {
    pub fn build(
        &self,
        student: Option<&str>,
        product: &Product,
        quantity: u32,
    ) -> Result<NewOrder, ValidationError> {
        let student_username = required(student.unwrap_or_default(), "student username")?;
        validate_quantity(quantity)?;

        let location = required(&self.location, "delivery location")?;

        let student_phone: String = self.phone.chars().filter(|c| !c.is_whitespace()).collect();
        if student_phone.len() != PHONE_DIGITS || !student_phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid(
                "phone number",
                format!("must have exactly {PHONE_DIGITS} digits"),
            ));
        }

        let coupon = self.coupon_code.trim();

        Ok(NewOrder {
            student_username,
            products: vec![OrderLine {
                product_id: product.id.clone(),
                product_name: product.product_name.clone(),
                quantity,
                price: product.cost,
            }],
            coupon_code: (!coupon.is_empty()).then(|| coupon.to_uppercase()),
            location,
            mode_of_payment: self.mode_of_payment,
            student_phone,
        })
    }
}

/// Quantity guard shared by add-to-cart and checkout
pub fn validate_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::invalid("quantity", "must be at least 1"));
    }
    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(value.to_string())
    }
}

fn parse<T: FromStr>(value: &str, field: &'static str) -> Result<T, ValidationError> {
    let value = required(value, field)?;
    value
        .parse()
        .map_err(|_| ValidationError::invalid(field, format!("'{value}' is not a valid number")))
}
