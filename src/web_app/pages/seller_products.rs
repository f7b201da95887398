// web_app/pages/seller_products.rs - A seller's catalogue with infinite scroll

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::web_app::components::*;
use crate::web_app::error::FetchError;
use crate::web_app::paging::{DedupPolicy, PageRequest, WindowScroll, CATALOGUE_PAGE_SIZE, CATALOGUE_THRESHOLD_PX};
use crate::web_app::server_fns::list_seller_products;
use crate::web_app::session::use_seller_name;

/// `/sellerproducts?seller=...`
///
/// Pages start loading 500px before the bottom, so the grid usually grows
/// before the viewer reaches its end.
#[component]
pub fn SellerProductsPage() -> impl IntoView {
    let query = use_query_map();
    let seller = use_listing_scope(move || query.with(|q| q.get("seller")));

    let listing = use_paged_listing(
        seller.into(),
        CATALOGUE_PAGE_SIZE,
        DedupPolicy::KeepFirst,
        CATALOGUE_THRESHOLD_PX,
        WindowScroll,
        |request: PageRequest| async move { list_seller_products(request).await.map_err(FetchError::from) },
    );
    let products = Signal::derive(move || listing.items());
    // Sellers browsing their own catalogue open products for editing
    let session_seller = use_seller_name();
    let own = Memo::new(move |_| matches!((session_seller.get(), seller.get()), (Some(me), Some(shown)) if me == shown));

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                {move || match seller.get() {
                    Some(name) => view! { <PageHeader title=name subtitle="Everything this seller has listed" /> }.into_any(),
                    None => view! {
                        <EmptyState title="No seller selected" hint="Pick a seller from the home page." icon="🏪" />
                    }.into_any(),
                }}

                <Show when=move || !listing.is_empty()>
                    {move || {
                        let link_to = if own.get() { "/update-product" } else { "/viewproduct" };
                        view! { <ProductGrid products=products show_seller=false link_to=link_to /> }
                    }}
                </Show>
                <Show when=move || listing.has_scope() && listing.is_empty() && !listing.has_more()>
                    <EmptyState title="Nothing listed yet" icon="📦" />
                </Show>
                <ListingFooter listing=listing end_label="That's the whole catalogue" />
            </main>
        </div>
    }
}
