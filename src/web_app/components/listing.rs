// web_app/components/listing.rs - Infinite-scroll listing glue
//
// Connects a `PagedAccumulator` to the reactive graph: the scope signal
// resets it, scroll events and the "Load more" button request pages, and
// completions are settled back into the accumulator. Failures surface as a
// dismissable notice above the items already shown.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::web_app::error::FetchError;
use crate::web_app::model::Identified;
use crate::web_app::paging::{DedupPolicy, PageOutcome, PageSource, PagedAccumulator, ScrollSource};

use super::common::{Loading, Notice, SecondaryButton};

/// Reactive handle to one paged listing
pub struct PagedListing<T: Send + Sync + 'static> {
    pub state: RwSignal<PagedAccumulator<T>>,
    /// Last fetch failure, cleared on dismiss, retry or reset
    pub notice: RwSignal<Option<FetchError>>,
    pub load_more: Callback<()>,
}

impl<T: Send + Sync + 'static> Clone for PagedListing<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for PagedListing<T> {}

impl<T: Clone + Send + Sync + 'static> PagedListing<T> {
    /// Snapshot of the accumulated items, tracked
    pub fn items(&self) -> Vec<T> {
        self.state.with(|acc| acc.items().to_vec())
    }

    pub fn is_fetching(&self) -> bool {
        self.state.with(PagedAccumulator::is_fetching)
    }

    pub fn has_more(&self) -> bool {
        self.state.with(PagedAccumulator::has_more)
    }

    pub fn is_empty(&self) -> bool {
        self.state.with(PagedAccumulator::is_empty)
    }

    pub fn has_scope(&self) -> bool {
        self.state.with(|acc| acc.scope().is_some())
    }
}

impl<T: Identified + Send + Sync + 'static> PagedListing<T> {
    /// Swap in a newer copy of an item already shown, keeping its place
    pub fn refresh(&self, item: T) {
        let replaced = self.state.try_update(|acc| acc.refresh(item)).unwrap_or(false);
        if !replaced {
            tracing::debug!("Refreshed item is not in the listing");
        }
    }
}

/// Scope key of a listing, derived from `raw`.
///
/// Blank keys read as no scope. The memo only notifies when the key itself
/// changes, so unrelated query parameters never restart the listing.
pub fn use_listing_scope(raw: impl Fn() -> Option<String> + Send + Sync + 'static) -> Memo<Option<String>> {
    Memo::new(move |_| raw().filter(|s| !s.trim().is_empty()))
}

/// Wire a paged listing into the current component.
///
/// Every change of `scope` starts the listing over and fetches the first
/// page. Scroll positions from `scroll` within `threshold_px` of the bottom
/// fetch the next one. The scroll subscription ends with the component.
pub fn use_paged_listing<T, S, Sc>(
    scope: Signal<Option<String>>,
    page_size: u32,
    policy: DedupPolicy,
    threshold_px: f64,
    scroll: Sc,
    source: S,
) -> PagedListing<T>
where
    T: Identified + Send + Sync + 'static,
    S: PageSource<T> + Clone + Send + Sync + 'static,
    Sc: ScrollSource + 'static,
    Sc::Subscription: 'static,
{
    let state = RwSignal::new(PagedAccumulator::with_policy(page_size, policy));
    let notice = RwSignal::new(None::<FetchError>);

    let load_more = Callback::new(move |()| {
        let Some(ticket) = state.try_update(|acc| acc.request_next_page()).flatten() else {
            return;
        };
        notice.set(None);

        let source = source.clone();
        spawn_local(async move {
            let result = source.fetch_page(ticket.request().clone()).await;
            match state.try_update(|acc| acc.settle(&ticket, result)) {
                Some(PageOutcome::Failed(error)) => {
                    tracing::error!("Loading page {} for '{}' failed: {}", ticket.page(), ticket.scope(), error);
                    notice.set(Some(error));
                }
                Some(PageOutcome::Merged { page, added, has_more, .. }) => {
                    tracing::debug!("Page {} added {} items (more: {})", page, added, has_more);
                }
                // Scope changed meanwhile, or the view is gone
                Some(PageOutcome::Discarded) | None => {}
            }
        });
    });

    Effect::new(move |_| {
        let scope = scope.get();
        state.update(|acc| acc.reset(scope.unwrap_or_default()));
        notice.set(None);
        load_more.run(());
    });

    let subscription = scroll.subscribe(Box::new(move |metrics| {
        let due = state
            .try_with_untracked(|acc| acc.should_trigger_next_page(metrics, threshold_px))
            .unwrap_or(false);
        if due {
            load_more.run(());
        }
    }));
    let handle = StoredValue::new_local(Some((scroll, subscription)));
    on_cleanup(move || {
        if let Some((scroll, subscription)) = handle.try_update_value(Option::take).flatten() {
            scroll.unsubscribe(subscription);
        }
    });

    PagedListing {
        state,
        notice,
        load_more,
    }
}

/// Footer under a paged listing: spinner, end marker or a manual
/// "Load more" button, plus the failure notice
#[component]
pub fn ListingFooter<T>(
    listing: PagedListing<T>,
    #[prop(default = "You've reached the end")]
    end_label: &'static str,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let message = Signal::derive(move || listing.notice.get().map(|e| e.to_string()));
    let on_dismiss = Callback::new(move |()| listing.notice.set(None));

    view! {
        <div class="py-8 flex justify-center">
            {move || {
                if listing.is_fetching() {
                    view! { <Loading message="Loading more..." /> }.into_any()
                } else if listing.has_more() {
                    view! {
                        <SecondaryButton on_click=listing.load_more>"Load more"</SecondaryButton>
                    }.into_any()
                } else if !listing.is_empty() {
                    view! { <p class="text-sm text-gray-400">{end_label}</p> }.into_any()
                } else {
                    ().into_any()
                }
            }}
        </div>
        <Notice message=message on_dismiss=on_dismiss />
    }
}
