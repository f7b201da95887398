// web_app/components/mod.rs - UI components module
//
// This module contains all Leptos UI components for the application.
//
// Structure:
// - common.rs: Reusable atomic components (Button, Notice, Loading, etc.)
// - listing.rs: Paged listing hook and its footer
// - nav.rs: Student and seller navigation bars
// - order.rs: Order display components (OrderCard, StatusBadge)
// - product.rs: Product display components (ProductCard, ProductDetail)

pub mod common;
pub mod listing;
pub mod nav;
pub mod order;
pub mod product;

// Re-export commonly used components for convenience
pub use common::*;
pub use listing::*;
pub use nav::*;
pub use order::*;
pub use product::*;
