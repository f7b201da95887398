// web_app/pages/seller.rs - Seller dashboard and catalogue forms
//
// The add and update product pages share one form; updating pre-fills it
// from the product as currently listed.

use chrono::Utc;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use super::{render_loaded, SignInPrompt};
use crate::web_app::components::*;
use crate::web_app::model::*;
use crate::web_app::server_fns::{add_coupon, add_product, get_product, update_product};
use crate::web_app::session::use_seller_name;

/// `/shome`: shortcuts into the seller's queues and forms
#[component]
pub fn SellerHomePage() -> impl IntoView {
    let seller = use_seller_name();

    let tiles: [(&str, &str, &str); 4] = [
        ("/current-orders", "📦", "Current orders"),
        ("/completed-orders", "✅", "Completed orders"),
        ("/add-product", "➕", "Add a product"),
        ("/add-coupon", "🎟", "Create a coupon"),
    ];

    view! {
        <div class="min-h-screen bg-gray-50">
            <SellerNav />
            <main class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <Show
                    when=move || seller.get().is_some()
                    fallback=|| view! { <SignInPrompt role="seller" /> }
                >
                    <PageHeader title=seller.get().map(|s| format!("Welcome, {s}")).unwrap_or_default() />
                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-6">
                        {tiles.iter().map(|(href, icon, label)| view! {
                            <a
                                href=*href
                                class="bg-white rounded-xl shadow-sm hover:shadow-lg transition-shadow border border-gray-100 p-6 flex items-center gap-4"
                            >
                                <span class="text-3xl">{*icon}</span>
                                <span class="text-lg font-bold text-gray-900">{*label}</span>
                            </a>
                        }).collect_view()}
                        {move || seller.get().map(|name| view! {
                            <a
                                href=query_href("/sellerproducts", "seller", &name)
                                class="sm:col-span-2 text-center text-indigo-600 font-medium hover:underline"
                            >
                                "Browse and edit your catalogue"
                            </a>
                        })}
                    </div>
                </Show>
            </main>
        </div>
    }
}

/// Input signals of a product form
#[derive(Clone, Copy)]
struct ProductFields {
    product_name: RwSignal<String>,
    cost: RwSignal<String>,
    category: RwSignal<String>,
    quantity: RwSignal<String>,
    description: RwSignal<String>,
}

impl ProductFields {
    fn new(form: ProductForm) -> Self {
        Self {
            product_name: RwSignal::new(form.product_name),
            cost: RwSignal::new(form.cost),
            category: RwSignal::new(form.category),
            quantity: RwSignal::new(form.quantity),
            description: RwSignal::new(form.description),
        }
    }

    fn blank() -> Self {
        Self::new(ProductForm {
            category: CATEGORIES[0].to_string(),
            quantity: "1".to_string(),
            ..ProductForm::default()
        })
    }

    fn snapshot(&self) -> ProductForm {
        ProductForm {
            product_name: self.product_name.get_untracked(),
            cost: self.cost.get_untracked(),
            category: self.category.get_untracked(),
            quantity: self.quantity.get_untracked(),
            description: self.description.get_untracked(),
        }
    }

    fn fill(&self, form: ProductForm) {
        self.product_name.set(form.product_name);
        self.cost.set(form.cost);
        self.category.set(form.category);
        self.quantity.set(form.quantity);
        self.description.set(form.description);
    }
}

/// Product form body shared by the add and update pages
#[component]
fn ProductEditor(
    fields: ProductFields,
    submit_label: &'static str,
    #[prop(into)]
    pending: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let category_options = CATEGORIES.iter().map(|c| (c.to_string(), c.to_string())).collect::<Vec<_>>();

    view! {
        <form
            class="bg-white rounded-2xl shadow-sm border border-gray-100 p-6 space-y-4"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <TextInput value=fields.product_name label="Product name" />
            <div class="grid grid-cols-2 gap-4">
                <TextInput value=fields.cost label="Price (₹)" input_type="number" />
                <TextInput value=fields.quantity label="Quantity" input_type="number" />
            </div>
            <label class="block space-y-1">
                <span class="text-sm font-medium text-gray-700">"Category"</span>
                <SelectString value=fields.category options=category_options />
            </label>
            <label class="block space-y-1">
                <span class="text-sm font-medium text-gray-700">"Description"</span>
                <textarea
                    class="w-full px-4 py-2 border border-gray-300 rounded-lg h-28"
                    prop:value=move || fields.description.get()
                    on:input=move |ev| fields.description.set(event_target_value(&ev))
                ></textarea>
            </label>
            <Button button_type="submit" disabled=pending class="w-full">{submit_label}</Button>
        </form>
    }
}

#[component]
pub fn AddProductPage() -> impl IntoView {
    let seller = use_seller_name();
    let fields = ProductFields::blank();
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    let submit = Action::new(move |product: &NewProduct| {
        let product = product.clone();
        async move { add_product(product).await }
    });
    Effect::new(move |_| match submit.value().get() {
        Some(Ok(())) => {
            success.set(Some("Product added to your catalogue".to_string()));
            fields.fill(ProductFields::blank().snapshot());
        }
        Some(Err(e)) => error.set(Some(e.to_string())),
        None => {}
    });

    let on_submit = Callback::new(move |()| match fields.snapshot().build(seller.get_untracked().as_deref()) {
        Ok(product) => {
            error.set(None);
            submit.dispatch(product);
        }
        Err(e) => error.set(Some(e.to_string())),
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <SellerNav />
            <main class="max-w-2xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Add a product" />
                <ProductEditor fields=fields submit_label="Add product" pending=submit.pending() on_submit=on_submit />
                <Notice message=error on_dismiss=Callback::new(move |()| error.set(None)) />
                <Notice message=success on_dismiss=Callback::new(move |()| success.set(None)) tone="success" />
            </main>
        </div>
    }
}

/// `/update-product?id=...`: edit one product of the signed-in seller
#[component]
pub fn UpdateProductPage() -> impl IntoView {
    let seller = use_seller_name();
    let query = use_query_map();
    let product_id = Memo::new(move |_| query.with(|q| q.get("id")).unwrap_or_default());
    let product = Resource::new(move || product_id.get(), |id| async move {
        if id.is_empty() {
            Err(ServerFnError::new("No product selected"))
        } else {
            get_product(id).await
        }
    });

    let fields = ProductFields::blank();
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        if let Some(Ok(loaded)) = product.get() {
            fields.fill(ProductForm::from_product(&loaded));
        }
    });

    let submit = Action::new(move |(id, update): &(String, NewProduct)| {
        let (id, update) = (id.clone(), update.clone());
        async move { update_product(id, update).await }
    });
    Effect::new(move |_| match submit.value().get() {
        Some(Ok(())) => success.set(Some("Product updated".to_string())),
        Some(Err(e)) => error.set(Some(e.to_string())),
        None => {}
    });

    let on_submit = Callback::new(move |()| match fields.snapshot().build(seller.get_untracked().as_deref()) {
        Ok(update) => {
            error.set(None);
            submit.dispatch((product_id.get_untracked(), update));
        }
        Err(e) => error.set(Some(e.to_string())),
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <SellerNav />
            <main class="max-w-2xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Update product" />
                <Show
                    when=move || seller.get().is_some()
                    fallback=|| view! { <SignInPrompt role="seller" /> }
                >
                    <Suspense fallback=|| view! { <Loading message="Loading product..." /> }>
                        {move || render_loaded(product.get(), move |_| view! {
                            <ProductEditor
                                fields=fields
                                submit_label="Save changes"
                                pending=submit.pending()
                                on_submit=on_submit
                            />
                        })}
                    </Suspense>
                </Show>
                <Notice message=error on_dismiss=Callback::new(move |()| error.set(None)) />
                <Notice message=success on_dismiss=Callback::new(move |()| success.set(None)) tone="success" />
            </main>
        </div>
    }
}

#[component]
pub fn AddCouponPage() -> impl IntoView {
    let seller = use_seller_name();
    let coupon_code = RwSignal::new(String::new());
    let discount = RwSignal::new(String::new());
    let max_discount = RwSignal::new(String::new());
    let expiry = RwSignal::new(String::new());
    let min_order = RwSignal::new(String::new());
    let products = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    let submit = Action::new(move |coupon: &NewCoupon| {
        let coupon = coupon.clone();
        async move { add_coupon(coupon).await }
    });
    Effect::new(move |_| match submit.value().get() {
        Some(Ok(())) => {
            success.set(Some(format!("Coupon {} created", coupon_code.get_untracked().to_uppercase())));
            coupon_code.set(String::new());
        }
        Some(Err(e)) => error.set(Some(e.to_string())),
        None => {}
    });

    let on_submit = move || {
        let form = CouponForm {
            coupon_code: coupon_code.get_untracked(),
            discount_percentage: discount.get_untracked(),
            max_discount_amount: max_discount.get_untracked(),
            expiry_date: expiry.get_untracked(),
            min_order_value: min_order.get_untracked(),
            applicable_products: products.get_untracked(),
        };
        let today = Utc::now().date_naive();
        match form.build(seller.get_untracked().as_deref(), today) {
            Ok(coupon) => {
                error.set(None);
                submit.dispatch(coupon);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="min-h-screen bg-gray-50">
            <SellerNav />
            <main class="max-w-2xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Create a coupon" />
                <form
                    class="bg-white rounded-2xl shadow-sm border border-gray-100 p-6 space-y-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        on_submit();
                    }
                >
                    <TextInput value=coupon_code label="Code" placeholder="At least 3 characters" />
                    <div class="grid grid-cols-2 gap-4">
                        <TextInput value=discount label="Discount (%)" input_type="number" />
                        <TextInput value=max_discount label="Max discount (₹)" input_type="number" />
                        <TextInput value=min_order label="Minimum order (₹)" input_type="number" placeholder="0" />
                        <TextInput value=expiry label="Expires on" input_type="date" />
                    </div>
                    <TextInput value=products label="Product ids" placeholder="Comma separated, empty for all" />
                    <Button button_type="submit" disabled=submit.pending() class="w-full">"Create coupon"</Button>
                </form>
                <Notice message=error on_dismiss=Callback::new(move |()| error.set(None)) />
                <Notice message=success on_dismiss=Callback::new(move |()| success.set(None)) tone="success" />
            </main>
        </div>
    }
}
