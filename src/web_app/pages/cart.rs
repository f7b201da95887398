// web_app/pages/cart.rs - Student cart

use leptos::prelude::*;

use super::{render_loaded, SignInPrompt};
use crate::web_app::components::*;
use crate::web_app::model::{cart_total, CartEntry};
use crate::web_app::server_fns::get_cart;
use crate::web_app::session::use_student_name;

#[component]
pub fn CartPage() -> impl IntoView {
    let student = use_student_name();
    let cart = Resource::new(move || student.get(), |student| async move {
        match student {
            Some(student) => get_cart(student).await.map(Some),
            None => Ok(None),
        }
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Your cart" />
                <Suspense fallback=|| view! { <Loading message="Loading cart..." /> }>
                    {move || render_loaded(cart.get(), |entries| match entries {
                        None => view! { <SignInPrompt role="student" /> }.into_any(),
                        Some(entries) if entries.is_empty() => view! {
                            <EmptyState title="Your cart is empty" hint="Browse products and add something you like." icon="🛒" />
                        }.into_any(),
                        Some(entries) => view! { <CartTable entries=entries /> }.into_any(),
                    })}
                </Suspense>
            </main>
        </div>
    }
}

#[component]
fn CartTable(entries: Vec<CartEntry>) -> impl IntoView {
    let total = cart_total(&entries);

    view! {
        <div class="bg-white rounded-2xl shadow-sm border border-gray-100 divide-y divide-gray-100">
            {entries.into_iter().map(|entry| {
                let href = format!(
                    "{}&qty={}",
                    query_href("/purchase", "id", &entry.product.id),
                    entry.quantity
                );
                view! {
                    <div class="flex items-center justify-between gap-4 p-5">
                        <div class="min-w-0">
                            <a
                                href=query_href("/viewproduct", "id", &entry.product.id)
                                class="font-bold text-gray-900 hover:text-indigo-600"
                            >
                                {entry.product.product_name.clone()}
                            </a>
                            <p class="text-sm text-gray-500">
                                {format!("{} × {}", entry.quantity, format_price(entry.product.cost))}
                            </p>
                        </div>
                        <div class="flex items-center gap-4">
                            <PriceDisplay price=entry.subtotal() />
                            <a href=href class="text-sm font-medium text-indigo-600 hover:underline">"Buy"</a>
                        </div>
                    </div>
                }
            }).collect_view()}
            <div class="flex justify-between items-center p-5 bg-gray-50 rounded-b-2xl">
                <span class="font-medium text-gray-700">"Total"</span>
                <PriceDisplay price=total highlight=true />
            </div>
        </div>
    }
}
