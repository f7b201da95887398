// web_app/pages/coupons.rs - Coupons a student can use

use chrono::{NaiveDate, Utc};
use leptos::prelude::*;

use super::{render_loaded, SignInPrompt};
use crate::web_app::components::*;
use crate::web_app::model::Coupon;
use crate::web_app::server_fns::get_coupons;
use crate::web_app::session::use_student_name;

/// Usable coupons first, expired ones last, each group by code
pub fn sort_coupons(coupons: &mut [Coupon], today: NaiveDate) {
    coupons.sort_by(|a, b| {
        a.is_expired(today)
            .cmp(&b.is_expired(today))
            .then_with(|| a.coupon_code.cmp(&b.coupon_code))
    });
}

#[component]
pub fn CouponsPage() -> impl IntoView {
    let student = use_student_name();
    let coupons = Resource::new(move || student.get(), |student| async move {
        match student {
            Some(student) => get_coupons(student).await.map(Some),
            None => Ok(None),
        }
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Coupons" subtitle="Apply a code at checkout" />
                <Suspense fallback=|| view! { <Loading message="Loading coupons..." /> }>
                    {move || render_loaded(coupons.get(), |coupons| match coupons {
                        None => view! { <SignInPrompt role="student" /> }.into_any(),
                        Some(coupons) if coupons.is_empty() => {
                            view! { <EmptyState title="No coupons right now" icon="🎟" /> }.into_any()
                        }
                        Some(mut coupons) => {
                            let today = Utc::now().date_naive();
                            sort_coupons(&mut coupons, today);
                            view! {
                                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                                    {coupons.into_iter().map(|coupon| view! { <CouponCard coupon=coupon today=today /> }).collect_view()}
                                </div>
                            }.into_any()
                        }
                    })}
                </Suspense>
            </main>
        </div>
    }
}

#[component]
fn CouponCard(coupon: Coupon, today: NaiveDate) -> impl IntoView {
    let expired = coupon.is_expired(today);
    let expiry = coupon
        .expires_on()
        .map(|day| day.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "No expiry".to_string());
    let class = if expired {
        "rounded-xl border-2 border-dashed border-gray-200 bg-gray-50 p-5 opacity-60"
    } else {
        "rounded-xl border-2 border-dashed border-indigo-300 bg-white p-5"
    };

    view! {
        <div class=class>
            <div class="flex justify-between items-start">
                <span class="font-mono text-xl font-bold tracking-wider text-indigo-700">{coupon.coupon_code.clone()}</span>
                {if expired {
                    view! { <Badge variant="red">"Expired"</Badge> }.into_any()
                } else {
                    view! { <Badge variant="green">{format!("{}% off", coupon.discount_percentage.normalize())}</Badge> }.into_any()
                }}
            </div>
            <ul class="mt-3 text-sm text-gray-600 space-y-1">
                <li>{format!("Up to {}", format_price(coupon.max_discount_amount))}</li>
                <li>{format!("Minimum order {}", format_price(coupon.min_order_value))}</li>
                <li>{format!("Valid until {expiry}")}</li>
                {coupon.seller_username.clone().map(|s| view! { <li>{format!("From {s}")}</li> })}
            </ul>
        </div>
    }
}
