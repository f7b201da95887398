// web_app/pages/checkout.rs - Buying a single product
//
// `/purchase?id=<product>&qty=<n>`. The form is validated locally by
// `CheckoutForm::build` before anything is sent. A coupon code typed in is
// matched against the student's available coupons to preview the discount;
// the backend has the final word on the total.

use chrono::{NaiveDate, Utc};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use rust_decimal::Decimal;

use super::{parse_quantity, render_loaded, SignInPrompt};
use crate::web_app::components::*;
use crate::web_app::model::*;
use crate::web_app::server_fns::{get_coupons, get_product, place_order};
use crate::web_app::session::use_student_name;

/// Price breakdown shown next to the checkout form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    /// Why a typed coupon does not apply
    pub coupon_note: Option<String>,
}

/// Work out the price of `quantity` units with an optional coupon code
pub fn quote(product: &Product, quantity: u32, code: &str, coupons: &[Coupon], today: NaiveDate) -> Quote {
    let subtotal = product.cost * Decimal::from(quantity);
    let code = code.trim();

    let (discount, coupon_note) = if code.is_empty() {
        (Decimal::ZERO, None)
    } else {
        match coupons.iter().find(|c| c.coupon_code.eq_ignore_ascii_case(code)) {
            None => (Decimal::ZERO, Some("Unknown coupon code".to_string())),
            Some(c) if c.is_expired(today) => (Decimal::ZERO, Some("This coupon has expired".to_string())),
            Some(c) => match c.discount_for(subtotal) {
                Some(discount) => (discount, None),
                None => (
                    Decimal::ZERO,
                    Some(format!("Needs an order of at least {}", format_price(c.min_order_value))),
                ),
            },
        }
    };

    Quote {
        subtotal,
        discount,
        total: (subtotal - discount).max(Decimal::ZERO),
        coupon_note,
    }
}

#[component]
pub fn PurchasePage() -> impl IntoView {
    let query = use_query_map();
    let product_id = move || query.with(|q| q.get("id")).unwrap_or_default();
    let quantity = Signal::derive(move || parse_quantity(query.with(|q| q.get("qty"))).unwrap_or(1));

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
            <main class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Checkout" />
                <Suspense fallback=|| view! { <Loading message="Loading product..." /> }>
                    {move || render_loaded(product.get(), move |product| view! {
                        <CheckoutPanel product=product quantity=quantity.get_untracked() />
                    })}
                </Suspense>
            </main>
        </div>
    }
}

#[component]
fn CheckoutPanel(product: Product, quantity: u32) -> impl IntoView {
    let student = use_student_name();
    let coupon_code = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let payment = RwSignal::new(PaymentMode::default().label().to_string());
    let notice = RwSignal::new(None::<String>);

    let coupons = Resource::new(move || student.get(), |student| async move {
        match student {
            Some(student) => get_coupons(student).await,
            None => Ok(Vec::new()),
        }
    });

    let product = StoredValue::new(product);
    let price_quote = Memo::new(move |_| {
        let available = coupons.get().and_then(Result::ok).unwrap_or_default();
        product.with_value(|p| quote(p, quantity, &coupon_code.get(), &available, Utc::now().date_naive()))
    });

    let place = Action::new(move |order: &NewOrder| {
        let order = order.clone();
        async move { place_order(order).await }
    });
    Effect::new(move |_| {
        if let Some(Err(e)) = place.value().get() {
            notice.set(Some(e.to_string()));
        }
    });

    let on_submit = Callback::new(move |()| {
        let form = CheckoutForm {
            coupon_code: coupon_code.get_untracked(),
            location: location.get_untracked(),
            phone: phone.get_untracked(),
            mode_of_payment: PaymentMode::from_label(&payment.get_untracked()).unwrap_or_default(),
        };
        let student = student.get_untracked();
        let built = product.with_value(|p| form.build(student.as_deref(), p, quantity));
        match built {
            Ok(order) => {
                notice.set(None);
                place.dispatch(order);
            }
            Err(e) => notice.set(Some(e.to_string())),
        }
    });

    let payment_options = [PaymentMode::CashOnDelivery, PaymentMode::Online]
        .iter()
        .map(|m| (m.label().to_string(), m.label().to_string()))
        .collect::<Vec<_>>();

    let placed = move || place.value().get().and_then(Result::ok);

    view! {
        <Show
            when=move || student.get().is_some()
            fallback=|| view! { <SignInPrompt role="student" /> }
        >
            {
                let payment_options = payment_options.clone();
                move || match placed() {
                    Some(receipt) => view! { <OrderPlaced receipt=receipt /> }.into_any(),
                    None => view! {
                        <div class="grid grid-cols-1 md:grid-cols-5 gap-8">
                            <form
                                class="md:col-span-3 bg-white rounded-2xl shadow-sm border border-gray-100 p-6 space-y-4"
                                on:submit=move |ev| {
                                    ev.prevent_default();
                                    on_submit.run(());
                                }
                            >
                                <TextInput value=location label="Delivery location" placeholder="Hostel, room number" />
                                <TextInput value=phone label="Phone number" input_type="tel" placeholder="10 digits" />
                                <TextInput value=coupon_code label="Coupon code" placeholder="Optional" />
                                <label class="block space-y-1">
                                    <span class="text-sm font-medium text-gray-700">"Payment"</span>
                                    <SelectString value=payment options=payment_options.clone() />
                                </label>
                                <Button button_type="submit" disabled=place.pending() class="w-full">
                                    {move || if place.pending().get() { "Placing order..." } else { "Place order" }}
                                </Button>
                            </form>
                            <QuoteSummary
                                name=product.with_value(|p| p.product_name.clone())
                                quantity=quantity
                                quote=price_quote
                            />
                        </div>
                    }.into_any(),
                }
            }
        </Show>
        <Notice message=notice on_dismiss=Callback::new(move |()| notice.set(None)) />
    }
}

#[component]
fn QuoteSummary(name: String, quantity: u32, quote: Memo<Quote>) -> impl IntoView {
    view! {
        <aside class="md:col-span-2 bg-white rounded-2xl shadow-sm border border-gray-100 p-6 space-y-3 h-fit">
            <h3 class="font-bold text-gray-900">{format!("{name} × {quantity}")}</h3>
            <div class="flex justify-between text-sm text-gray-600">
                <span>"Subtotal"</span>
                <span>{move || format_price(quote.get().subtotal)}</span>
            </div>
            <div class="flex justify-between text-sm text-green-700">
                <span>"Coupon"</span>
                <span>{move || format!("-{}", format_price(quote.get().discount))}</span>
            </div>
            {move || quote.get().coupon_note.map(|note| view! { <p class="text-xs text-red-600">{note}</p> })}
            <div class="flex justify-between pt-3 border-t border-gray-100 font-bold text-gray-900">
                <span>"Total"</span>
                <span>{move || format_price(quote.get().total)}</span>
            </div>
        </aside>
    }
}

#[component]
fn OrderPlaced(receipt: OrderReceipt) -> impl IntoView {
    let summary = receipt.order.as_ref().map(Order::summary);

    view! {
        <div class="bg-white rounded-2xl shadow-sm border border-green-200 p-8 text-center space-y-3">
            <div class="text-5xl">"✅"</div>
            <h2 class="text-2xl font-bold text-gray-900">"Order placed"</h2>
            {summary.map(|s| view! { <p class="text-gray-600">{s}</p> })}
            {receipt.session_id.map(|_| view! {
                <p class="text-sm text-gray-500">"Complete the online payment from your orders page."</p>
            })}
            <a href="/track-order" class="inline-block mt-4 text-indigo-600 font-medium hover:underline">"Track your order"</a>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(cost: i64) -> Product {
        Product {
            id: "p1".into(),
            product_name: "Hoodie".into(),
            cost: Decimal::new(cost, 0),
            category: "Clothing".into(),
            quantity: 5,
            description: String::new(),
            rating: None,
            image: None,
            seller: None,
        }
    }

    fn coupon() -> Coupon {
        Coupon {
            id: "c1".into(),
            coupon_code: "FEST20".into(),
            discount_percentage: Decimal::new(20, 0),
            max_discount_amount: Decimal::new(150, 0),
            expiry_date: Some("2026-12-31".into()),
            min_order_value: Decimal::new(500, 0),
            seller_username: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    #[test]
    fn test_quote_without_coupon() {
        let q = quote(&product(400), 2, "", &[], today());
        assert_eq!(q.subtotal, Decimal::new(800, 0));
        assert_eq!(q.total, Decimal::new(800, 0));
        assert_eq!(q.coupon_note, None);
    }

    #[test]
    fn test_quote_caps_discount() {
        let q = quote(&product(400), 2, "fest20", &[coupon()], today());
        assert_eq!(q.discount, Decimal::new(150, 0));
        assert_eq!(q.total, Decimal::new(650, 0));
    }

    #[test]
    fn test_quote_explains_unusable_coupon() {
        let below_min = quote(&product(100), 2, "FEST20", &[coupon()], today());
        assert_eq!(below_min.discount, Decimal::ZERO);
        assert!(below_min.coupon_note.unwrap().contains("at least"));

        let unknown = quote(&product(400), 2, "NOPE", &[coupon()], today());
        assert_eq!(unknown.coupon_note.as_deref(), Some("Unknown coupon code"));

        let later = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        let expired = quote(&product(400), 2, "FEST20", &[coupon()], later);
        assert_eq!(expired.coupon_note.as_deref(), Some("This coupon has expired"));
    }
}
