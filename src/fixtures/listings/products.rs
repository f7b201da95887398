// fixtures/listings/products.rs - Sample seller catalogue

use rust_decimal::Decimal;

use super::SampleListing;
use crate::web_app::model::{Product, SellerRef, CATEGORIES};

/// Products in every sample catalogue
pub const CATALOGUE_SIZE: usize = 24;

/// Product with predictable fields; the category cycles with `cost / 10`
pub fn product(id: &str, seller: &str, cost: i64) -> Product {
    Product {
        id: id.to_string(),
        product_name: format!("Item {id}"),
        cost: Decimal::new(cost, 0),
        category: CATEGORIES[(cost.unsigned_abs() / 10) as usize % CATEGORIES.len()].to_string(),
        quantity: 5,
        description: format!("Sold by {seller}"),
        rating: Some(4.0),
        image: None,
        seller: Some(SellerRef {
            username: seller.to_string(),
        }),
    }
}

/// `count` products of one seller, ids `<seller>-p1` onwards
pub fn products(seller: &str, count: usize) -> Vec<Product> {
    (1..=count)
        .map(|n| product(&format!("{seller}-p{n}"), seller, 10 * n as i64))
        .collect()
}

/// A seller's full catalogue
pub struct SellerCatalogue;

impl SampleListing for SellerCatalogue {
    type Item = Product;

    fn all(scope: &str) -> Vec<Product> {
        products(scope, CATALOGUE_SIZE)
    }
}
