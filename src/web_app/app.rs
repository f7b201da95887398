// web_app/app.rs - Root application component
//
// This is the entry point for the Leptos application.
// It provides the current-user capability, sets up routing, and mounts the
// page components.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::web_app::pages::*;
use crate::web_app::session::CurrentUser;

/// Paths of every page the router serves
pub const ROUTES: [&str; 16] = [
    "/",
    "/home",
    "/available-products",
    "/sellerproducts",
    "/viewproduct",
    "/purchase",
    "/cart",
    "/scoupons",
    "/track-order",
    "/previous-orders",
    "/shome",
    "/current-orders",
    "/completed-orders",
    "/add-product",
    "/update-product",
    "/add-coupon",
];

/// Root application component
///
/// Sets up:
/// - The current-user capability (browser storage unless one is given)
/// - Meta tags
/// - Router with routes
#[component]
pub fn App(
    /// Identity provider for the session; defaults to the browser's storage
    #[prop(optional)]
    identity: Option<CurrentUser>,
) -> impl IntoView {
    provide_meta_context();
    provide_context(identity.unwrap_or_else(CurrentUser::browser));

    view! {
        <Title text="Campus Market" />
        <Meta name="description" content="Buy and sell on campus" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />

        <Stylesheet id="leptos" href="/pkg/campus_market.css" />

        <Router>
            <main class="min-h-screen">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/home") view=HomePage />
                    <Route path=path!("/available-products") view=AvailableProductsPage />
                    <Route path=path!("/sellerproducts") view=SellerProductsPage />
                    <Route path=path!("/viewproduct") view=ViewProductPage />
                    <Route path=path!("/purchase") view=PurchasePage />
                    <Route path=path!("/cart") view=CartPage />
                    <Route path=path!("/scoupons") view=CouponsPage />
                    <Route path=path!("/track-order") view=TrackOrderPage />
                    <Route path=path!("/previous-orders") view=PreviousOrdersPage />
                    <Route path=path!("/shome") view=SellerHomePage />
                    <Route path=path!("/current-orders") view=CurrentOrdersPage />
                    <Route path=path!("/completed-orders") view=CompletedOrdersPage />
                    <Route path=path!("/add-product") view=AddProductPage />
                    <Route path=path!("/update-product") view=UpdateProductPage />
                    <Route path=path!("/add-coupon") view=AddCouponPage />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-100 flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-300 mb-4">"404"</h1>
                <p class="text-xl text-gray-600 mb-8">"Page not found"</p>
                <a
                    href="/home"
                    class="px-6 py-3 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 transition-colors"
                >
                    "Back to the market"
                </a>
            </div>
        </div>
    }
}
