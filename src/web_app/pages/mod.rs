// web_app/pages/mod.rs - Page components module
//
// One module per area of the site:
// - home: student landing page listing sellers
// - products: product browser and single product page
// - seller_products: a seller's catalogue (infinite scroll)
// - orders: seller order queues (infinite scroll) and student order history
// - cart, coupons, checkout: the student purchase flow
// - seller: seller dashboard and the product and coupon forms

pub mod cart;
pub mod checkout;
pub mod coupons;
pub mod home;
pub mod orders;
pub mod products;
pub mod seller;
pub mod seller_products;

// Re-export page components
pub use cart::CartPage;
pub use checkout::PurchasePage;
pub use coupons::CouponsPage;
pub use home::HomePage;
pub use orders::{CompletedOrdersPage, CurrentOrdersPage, PreviousOrdersPage, TrackOrderPage};
pub use products::{AvailableProductsPage, ViewProductPage};
pub use seller::{AddCouponPage, AddProductPage, SellerHomePage, UpdateProductPage};
pub use seller_products::SellerProductsPage;

use leptos::prelude::*;

use crate::web_app::components::{ErrorDisplay, Loading};

/// Render a resource value: spinner while pending, error card on failure
pub(crate) fn render_loaded<T, V>(
    value: Option<Result<T, ServerFnError>>,
    render: impl FnOnce(T) -> V,
) -> AnyView
where
    V: IntoView + 'static,
{
    match value {
        None => view! { <Loading /> }.into_any(),
        Some(Err(e)) => view! { <ErrorDisplay error=e.to_string() /> }.into_any(),
        Some(Ok(data)) => render(data).into_any(),
    }
}

/// Shown by student or seller pages when nobody is signed in
#[component]
pub(crate) fn SignInPrompt(role: &'static str) -> impl IntoView {
    view! {
        <div class="text-center py-16 bg-white rounded-2xl border border-gray-200">
            <div class="text-5xl mb-4">"🔒"</div>
            <h3 class="text-xl font-bold text-gray-900 mb-2">{format!("Sign in as a {role} to continue")}</h3>
            <p class="text-gray-500">"Your session was not found in this browser."</p>
        </div>
    }
}

/// Read an integer query value, ignoring garbage
pub(crate) fn parse_quantity(raw: Option<String>) -> Option<u32> {
    raw?.trim().parse().ok()
}
