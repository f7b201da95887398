// web_app/pages/products.rs - Product browser and single product page

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use super::{render_loaded, SignInPrompt};
use crate::web_app::components::*;
use crate::web_app::model::*;
use crate::web_app::server_fns::{add_to_cart, get_available_products, get_product};
use crate::web_app::session::use_student_name;

/// All products in stock, filtered by category and a search term
#[component]
pub fn AvailableProductsPage() -> impl IntoView {
    let category = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());

    let filters = Memo::new(move |_| ProductFilters::new(&category.get(), &search.get()));
    let products = Resource::new(move || filters.get(), get_available_products);

    let category_options: Vec<(String, String)> = std::iter::once((String::new(), "All categories".to_string()))
        .chain(CATEGORIES.iter().map(|c| (c.to_string(), c.to_string())))
        .collect();

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Available products" />
                <section class="bg-white rounded-2xl shadow-sm p-6 mb-8 border border-gray-100 flex flex-col md:flex-row gap-4">
                    <div class="flex-1">
                        <TextInput value=search placeholder="Search products..." input_type="search" />
                    </div>
                    <SelectString value=category options=category_options />
                </section>
                <Suspense fallback=|| view! { <Loading message="Loading products..." /> }>
                    {move || render_loaded(products.get(), |items| {
                        if items.is_empty() {
                            view! {
                                <EmptyState
                                    title="No products found"
                                    hint="Try another category or search term."
                                    icon="🔍"
                                />
                            }.into_any()
                        } else {
                            view! { <ProductGrid products=Signal::stored(items) /> }.into_any()
                        }
                    })}
                </Suspense>
            </main>
        </div>
    }
}

/// `/viewproduct?id=...`: product details with add-to-cart and buy-now
#[component]
pub fn ViewProductPage() -> impl IntoView {
    let query = use_query_map();
    let product_id = move || query.with(|q| q.get("id")).unwrap_or_default();
    let product = Resource::new(product_id, |id| async move {
        if id.is_empty() {
            Err(ServerFnError::new("No product selected"))
        } else {
            get_product(id).await
        }
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <Suspense fallback=|| view! { <Loading message="Loading product..." /> }>
                    {move || render_loaded(product.get(), |product| view! {
                        <section class="bg-white rounded-2xl shadow-sm p-8 border border-gray-100">
                            <ProductDetail product=product.clone()>
                                <PurchaseControls product=product />
                            </ProductDetail>
                        </section>
                    })}
                </Suspense>
            </main>
        </div>
    }
}

#[component]
fn PurchaseControls(product: Product) -> impl IntoView {
    let student = use_student_name();
    let quantity = RwSignal::new("1".to_string());
    let notice = RwSignal::new(None::<String>);
    let added = RwSignal::new(None::<String>);

    let product_id = product.id.clone();
    let add = Action::new(move |item: &AddToCart| {
        let item = item.clone();
        async move { add_to_cart(item).await }
    });

    Effect::new(move |_| match add.value().get() {
        Some(Ok(())) => added.set(Some("Added to your cart".to_string())),
        Some(Err(e)) => notice.set(Some(e.to_string())),
        None => {}
    });

    let stock = product.quantity;
    let parsed_quantity = move || -> Result<u32, String> {
        let qty: u32 = quantity.get().trim().parse().map_err(|_| "Enter a whole number".to_string())?;
        validate_quantity(qty).map_err(|e| e.to_string())?;
        if qty > stock {
            return Err(format!("Only {stock} left in stock"));
        }
        Ok(qty)
    };

    let on_add = {
        let product_id = product_id.clone();
        Callback::new(move |()| {
            let Some(student_username) = student.get_untracked() else {
                notice.set(Some("Sign in as a student to use the cart".to_string()));
                return;
            };
            match parsed_quantity() {
                Ok(quantity) => {
                    add.dispatch(AddToCart {
                        student_username,
                        product_id: product_id.clone(),
                        quantity,
                    });
                }
                Err(e) => notice.set(Some(e)),
            }
        })
    };

    let buy_href = Memo::new(move |_| {
        let qty = quantity.get();
        format!(
            "{}&qty={}",
            query_href("/purchase", "id", &product_id),
            encode_query_value(qty.trim())
        )
    });
    let in_stock = product.in_stock();

    view! {
        <Show
            when=move || student.get().is_some()
            fallback=|| view! { <SignInPrompt role="student" /> }
        >
            <div class="flex flex-wrap items-end gap-4 pt-4 border-t border-gray-100">
                <div class="w-32">
                    <TextInput value=quantity label="Quantity" input_type="number" />
                </div>
                <Button
                    on_click=on_add
                    disabled=Signal::derive(move || !in_stock || add.pending().get())
                >
                    "Add to cart"
                </Button>
                <a
                    href=move || buy_href.get()
                    class="px-4 py-2 bg-green-600 text-white rounded-lg hover:bg-green-700 font-medium shadow-sm"
                >
                    "Buy now"
                </a>
            </div>
        </Show>
        <Notice message=notice on_dismiss=Callback::new(move |()| notice.set(None)) />
        <Notice message=added on_dismiss=Callback::new(move |()| added.set(None)) tone="success" />
    }
}
