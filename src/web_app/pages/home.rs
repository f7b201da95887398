// web_app/pages/home.rs - Student landing page

use leptos::prelude::*;

use super::render_loaded;
use crate::web_app::components::*;
use crate::web_app::server_fns::get_sellers;

/// Sellers on campus, each linking to their catalogue
#[component]
pub fn HomePage() -> impl IntoView {
    let sellers = Resource::new(|| (), |_| get_sellers());

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Shop by seller" subtitle="Everything sold on campus, from people you know" />
                <Suspense fallback=|| view! { <Loading message="Loading sellers..." /> }>
                    {move || render_loaded(sellers.get(), |sellers| {
                        if sellers.is_empty() {
                            view! { <EmptyState title="No sellers yet" icon="🏪" /> }.into_any()
                        } else {
                            view! {
                                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                                    {sellers.into_iter().map(|seller| view! { <SellerCard seller=seller /> }).collect_view()}
                                </div>
                            }.into_any()
                        }
                    })}
                </Suspense>
            </main>
        </div>
    }
}
