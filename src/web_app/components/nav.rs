// web_app/components/nav.rs - Navigation bars for the two sides of the market

use leptos::prelude::*;

use crate::web_app::session::{use_seller_name, use_student_name};

const STUDENT_LINKS: [(&str, &str); 6] = [
    ("/home", "Sellers"),
    ("/available-products", "Products"),
    ("/cart", "Cart"),
    ("/track-order", "Track"),
    ("/previous-orders", "Orders"),
    ("/scoupons", "Coupons"),
];

const SELLER_LINKS: [(&str, &str); 5] = [
    ("/shome", "Dashboard"),
    ("/current-orders", "Current orders"),
    ("/completed-orders", "Completed orders"),
    ("/add-product", "Add product"),
    ("/add-coupon", "Add coupon"),
];

#[component]
fn NavBar(
    title: &'static str,
    links: &'static [(&'static str, &'static str)],
    user: ReadSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <header class="bg-white shadow-sm sticky top-0 z-40 border-b border-gray-200">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 h-16 flex items-center justify-between gap-6">
                <a href=links[0].0 class="flex items-center gap-2">
                    <span class="text-2xl">"🛍"</span>
                    <span class="text-xl font-bold text-indigo-600">{title}</span>
                </a>
                <nav class="flex items-center gap-4 text-sm font-medium text-gray-600 overflow-x-auto">
                    {links.iter().map(|(href, label)| view! {
                        <a href=*href class="hover:text-indigo-600 whitespace-nowrap">{*label}</a>
                    }).collect_view()}
                </nav>
                <span class="text-sm text-gray-500 whitespace-nowrap">
                    {move || user.get().unwrap_or_else(|| "Not signed in".to_string())}
                </span>
            </div>
        </header>
    }
}

#[component]
pub fn StudentNav() -> impl IntoView {
    view! { <NavBar title="Campus Market" links=&STUDENT_LINKS user=use_student_name() /> }
}

#[component]
pub fn SellerNav() -> impl IntoView {
    view! { <NavBar title="Campus Market · Seller" links=&SELLER_LINKS user=use_seller_name() /> }
}
