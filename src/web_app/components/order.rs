// web_app/components/order.rs - Order display components

use leptos::prelude::*;

use super::common::{format_price, Badge};
use crate::web_app::model::{Order, OrderStatus};

/// Badge colour for an order status
pub fn status_variant(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending | OrderStatus::Processing => "yellow",
        OrderStatus::Shipped => "blue",
        OrderStatus::Delivered | OrderStatus::Received => "green",
        OrderStatus::Cancelled => "red",
        OrderStatus::Other(_) => "gray",
    }
}

#[component]
pub fn StatusBadge(status: OrderStatus) -> impl IntoView {
    let variant = status_variant(&status);
    view! { <Badge variant=variant>{status.to_string()}</Badge> }
}

/// One order with its lines; extra controls (status actions) go in children
#[component]
pub fn OrderCard(
    order: Order,
    /// Show who placed the order (seller views)
    #[prop(default = false)]
    show_student: bool,
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let placed = order
        .created_at
        .map(|at| at.format("%d %b %Y, %H:%M").to_string());
    let student = order.student_username.clone().filter(|_| show_student);

    view! {
        <article class="bg-white rounded-xl shadow-sm border border-gray-100 p-5 space-y-3">
            <header class="flex justify-between items-start gap-4">
                <div>
                    <h3 class="font-bold text-gray-900">{order.summary()}</h3>
                    <p class="text-xs text-gray-400 font-mono">{format!("#{}", order.id)}</p>
                </div>
                <StatusBadge status=order.status.clone() />
            </header>

            <ul class="text-sm text-gray-600 divide-y divide-gray-50">
                {order.products.iter().map(|line| view! {
                    <li class="flex justify-between py-1">
                        <span>{format!("{} × {}", line.product_name, line.quantity)}</span>
                        <span>{format_price(line.subtotal())}</span>
                    </li>
                }).collect_view()}
            </ul>

            <footer class="flex flex-wrap justify-between items-center gap-2 pt-3 border-t border-gray-100 text-sm">
                <div class="text-gray-500 space-x-3">
                    {student.map(|s| view! { <span>"👤 " {s}</span> })}
                    {order.location.clone().map(|l| view! { <span>"📍 " {l}</span> })}
                    {order.mode_of_payment.clone().map(|m| view! { <span>{m}</span> })}
                    {placed.map(|p| view! { <span>{p}</span> })}
                </div>
                <span class="font-bold text-gray-900">{format_price(order.total_cost)}</span>
            </footer>

            {children.map(|c| c())}
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_variants() {
        assert_eq!(status_variant(&OrderStatus::Pending), "yellow");
        assert_eq!(status_variant(&OrderStatus::Delivered), "green");
        assert_eq!(status_variant(&OrderStatus::Cancelled), "red");
        assert_eq!(status_variant(&OrderStatus::Other("Lost".into())), "gray");
    }
}
