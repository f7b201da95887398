// web_app/pages/orders.rs - Order views
//
// Sellers work through two paged queues (current and completed orders)
// that grow as they scroll. Students see their order history and the
// orders still on their way.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use super::{render_loaded, SignInPrompt};
use crate::web_app::components::*;
use crate::web_app::error::FetchError;
use crate::web_app::model::{Order, OrderStatus};
use crate::web_app::paging::{DedupPolicy, PageRequest, WindowScroll, ORDERS_PAGE_SIZE, ORDER_LIST_THRESHOLD_PX};
use crate::web_app::server_fns::{
    get_previous_orders, get_tracked_orders, list_completed_orders, list_current_orders, update_order_status,
};
use crate::web_app::session::{use_seller_name, use_student_name};

/// Which seller queue a page shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderQueue {
    Current,
    Completed,
}

impl OrderQueue {
    pub fn title(self) -> &'static str {
        match self {
            OrderQueue::Current => "Current orders",
            OrderQueue::Completed => "Completed orders",
        }
    }

    /// Current orders change status while the seller scrolls, so a
    /// refetched copy replaces the stale one
    pub fn dedup_policy(self) -> DedupPolicy {
        match self {
            OrderQueue::Current => DedupPolicy::KeepLatest,
            OrderQueue::Completed => DedupPolicy::KeepFirst,
        }
    }
}

#[component]
pub fn CurrentOrdersPage() -> impl IntoView {
    view! { <SellerOrderQueue queue=OrderQueue::Current /> }
}

#[component]
pub fn CompletedOrdersPage() -> impl IntoView {
    view! { <SellerOrderQueue queue=OrderQueue::Completed /> }
}

/// Paged order queue of one seller: `?seller=` wins over the signed-in seller
#[component]
fn SellerOrderQueue(queue: OrderQueue) -> impl IntoView {
    let query = use_query_map();
    let session_seller = use_seller_name();
    let seller = use_listing_scope(move || {
        query
            .with(|q| q.get("seller"))
            .filter(|s| !s.trim().is_empty())
            .or_else(|| session_seller.get())
    });

    let listing = use_paged_listing(
        seller.into(),
        ORDERS_PAGE_SIZE,
        queue.dedup_policy(),
        ORDER_LIST_THRESHOLD_PX,
        WindowScroll,
        move |request: PageRequest| async move {
            match queue {
                OrderQueue::Current => list_current_orders(request).await,
                OrderQueue::Completed => list_completed_orders(request).await,
            }
            .map_err(FetchError::from)
        },
    );

    let status_error = RwSignal::new(None::<String>);
    let advance = Action::new(move |(order, status): &(Order, OrderStatus)| {
        let mut order = order.clone();
        let status = status.clone();
        async move {
            update_order_status(order.id.clone(), status.clone()).await?;
            order.status = status;
            Ok::<_, ServerFnError>(order)
        }
    });
    // Only the changed order is redrawn; pages already loaded stay put
    Effect::new(move |_| match advance.value().get() {
        Some(Ok(order)) => listing.refresh(order),
        Some(Err(e)) => status_error.set(Some(e.to_string())),
        None => {}
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <SellerNav />
            <main class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title=queue.title() />
                <Show
                    when=move || seller.get().is_some()
                    fallback=|| view! { <SignInPrompt role="seller" /> }
                >
                    <div class="space-y-4">
                        <For
                            each=move || listing.items()
                            key=|order: &Order| (order.id.clone(), order.status.clone())
                            children=move |order: Order| {
                                let next = order.status.next_for_seller().filter(|_| queue == OrderQueue::Current);
                                let target = order.clone();
                                view! {
                                    <OrderCard order=order show_student=true>
                                        {next.map(|status| {
                                            let label = format!("Mark {}", status);
                                            let on_click = Callback::new(move |()| {
                                                advance.dispatch((target.clone(), status.clone()));
                                            });
                                            view! {
                                                <div class="flex justify-end">
                                                    <Button on_click=on_click disabled=advance.pending()>{label}</Button>
                                                </div>
                                            }
                                        })}
                                    </OrderCard>
                                }
                            }
                        />
                    </div>
                    <Show when=move || listing.has_scope() && listing.is_empty() && !listing.has_more()>
                        <EmptyState title="No orders here" icon="📭" />
                    </Show>
                    <ListingFooter listing=listing end_label="No more orders" />
                </Show>
                <Notice message=status_error on_dismiss=Callback::new(move |()| status_error.set(None)) />
            </main>
        </div>
    }
}

/// Everything a student has ordered
#[component]
pub fn PreviousOrdersPage() -> impl IntoView {
    let student = use_student_name();
    let orders = Resource::new(move || student.get(), |student| async move {
        match student {
            Some(student) => get_previous_orders(student).await.map(Some),
            None => Ok(None),
        }
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Your orders" />
                <Suspense fallback=|| view! { <Loading message="Loading orders..." /> }>
                    {move || render_loaded(orders.get(), |orders| match orders {
                        None => view! { <SignInPrompt role="student" /> }.into_any(),
                        Some(orders) if orders.is_empty() => {
                            view! { <EmptyState title="No orders yet" hint="Your purchases will show up here." /> }.into_any()
                        }
                        Some(orders) => view! {
                            <div class="space-y-4">
                                {orders.into_iter().map(|order| view! { <OrderCard order=order /> }).collect_view()}
                            </div>
                        }.into_any(),
                    })}
                </Suspense>
            </main>
        </div>
    }
}

/// Orders still on their way, with receive and cancel actions
#[component]
pub fn TrackOrderPage() -> impl IntoView {
    let student = use_student_name();
    let notice = RwSignal::new(None::<String>);

    let update = Action::new(move |(order_id, status): &(String, OrderStatus)| {
        let (order_id, status) = (order_id.clone(), status.clone());
        async move { update_order_status(order_id, status).await }
    });

    let orders = Resource::new(
        move || (student.get(), update.version().get()),
        |(student, _)| async move {
            match student {
                Some(student) => get_tracked_orders(student).await.map(Some),
                None => Ok(None),
            }
        },
    );

    Effect::new(move |_| {
        if let Some(Err(e)) = update.value().get() {
            notice.set(Some(e.to_string()));
        }
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <StudentNav />
            <main class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <PageHeader title="Track orders" subtitle="Orders that have not reached you yet" />
                <Suspense fallback=|| view! { <Loading message="Loading orders..." /> }>
                    {move || render_loaded(orders.get(), |orders| match orders {
                        None => view! { <SignInPrompt role="student" /> }.into_any(),
                        Some(orders) if orders.is_empty() => {
                            view! { <EmptyState title="Nothing on its way" icon="🚚" /> }.into_any()
                        }
                        Some(orders) => view! {
                            <div class="space-y-4">
                                {orders.into_iter().map(|order| {
                                    let id = order.id.clone();
                                    let can_cancel = order.status.can_cancel();
                                    let can_receive = order.status.can_mark_received();
                                    let (cancel_id, receive_id) = (id.clone(), id);
                                    view! {
                                        <OrderCard order=order>
                                            <div class="flex justify-end gap-3">
                                                {can_cancel.then(|| view! {
                                                    <SecondaryButton
                                                        on_click=Callback::new(move |()| {
                                                            update.dispatch((cancel_id.clone(), OrderStatus::Cancelled));
                                                        })
                                                        disabled=update.pending()
                                                    >
                                                        "Cancel order"
                                                    </SecondaryButton>
                                                })}
                                                {can_receive.then(|| view! {
                                                    <Button
                                                        on_click=Callback::new(move |()| {
                                                            update.dispatch((receive_id.clone(), OrderStatus::Received));
                                                        })
                                                        disabled=update.pending()
                                                    >
                                                        "Mark received"
                                                    </Button>
                                                })}
                                            </div>
                                        </OrderCard>
                                    }
                                }).collect_view()}
                            </div>
                        }.into_any(),
                    })}
                </Suspense>
                <Notice message=notice on_dismiss=Callback::new(move |()| notice.set(None)) />
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_policies() {
        assert_eq!(OrderQueue::Current.dedup_policy(), DedupPolicy::KeepLatest);
        assert_eq!(OrderQueue::Completed.dedup_policy(), DedupPolicy::KeepFirst);
        assert_eq!(OrderQueue::Completed.title(), "Completed orders");
    }
}
