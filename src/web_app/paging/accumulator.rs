// web_app/paging/accumulator.rs - Paged result accumulator
//
// Holds every page fetched so far for one scope key (a seller name, a
// student name) and decides when the next page may be requested.
//
// State transitions happen only through `reset`, `request_next_page` and the
// two completion handlers. A request is represented by a `PageTicket`; a
// completion is applied only if its ticket is the one currently in flight,
// so responses that were issued before a reset are dropped on arrival.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::scroll::ScrollMetrics;
use crate::web_app::error::FetchError;
use crate::web_app::model::Identified;

/// Page numbers start at one
pub const FIRST_PAGE: u32 = 1;

/// One page to fetch for a scope
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub scope: String,
    pub page: u32,
    pub page_size: u32,
}

/// One page returned by the backend
///
/// `has_more` is the backend's explicit end-of-list flag when it sends one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: Option<bool>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_more: Option<bool>) -> Self {
        Self { items, has_more }
    }

    /// Page with no items and no flag, read as the end of the list
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_more: None,
        }
    }

    /// Whether more pages follow: the explicit flag wins, otherwise an
    /// empty page ends the list
    pub fn resolved_has_more(&self) -> bool {
        self.has_more.unwrap_or(!self.items.is_empty())
    }
}

/// Handle for one issued page request
///
/// Carries the request and the reset generation it was issued under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTicket {
    request: PageRequest,
    generation: u64,
}

impl PageTicket {
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn scope(&self) -> &str {
        &self.request.scope
    }

    pub fn page(&self) -> u32 {
        self.request.page
    }
}

/// Which copy wins when the same identifier arrives twice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupPolicy {
    /// Keep the version seen first; later copies are dropped
    #[default]
    KeepFirst,
    /// Replace the stored version in place, keeping its position
    KeepLatest,
}

/// What happened when a completion was applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    Merged {
        page: u32,
        added: usize,
        duplicates: usize,
        has_more: bool,
    },
    /// The fetch failed; the same page will be requested next time
    Failed(FetchError),
    /// The ticket was not the request in flight (scope changed meanwhile)
    Discarded,
}

/// Accumulated pages of one listing
#[derive(Clone, Debug)]
pub struct PagedAccumulator<T> {
    scope: Option<String>,
    items: Vec<T>,
    positions: HashMap<String, usize>,
    current_page: u32,
    page_size: u32,
    has_more: bool,
    in_flight: Option<PageTicket>,
    generation: u64,
    policy: DedupPolicy,
}

impl<T> PagedAccumulator<T> {
    /// Accumulator without a scope; nothing is requested until `reset`.
    ///
    /// A page size of zero is raised to one.
    pub fn new(page_size: u32) -> Self {
        Self::with_policy(page_size, DedupPolicy::default())
    }

    pub fn with_policy(page_size: u32, policy: DedupPolicy) -> Self {
        Self {
            scope: None,
            items: Vec::new(),
            positions: HashMap::new(),
            current_page: FIRST_PAGE,
            page_size: page_size.max(1),
            has_more: true,
            in_flight: None,
            generation: 0,
            policy,
        }
    }

    /// Start over for a new scope key.
    ///
    /// Drops every item and abandons any request in flight. A blank key
    /// leaves the accumulator without a scope.
    pub fn reset(&mut self, scope: impl Into<String>) {
        let scope = scope.into();
        self.generation = self.generation.wrapping_add(1);
        self.items.clear();
        self.positions.clear();
        self.current_page = FIRST_PAGE;
        self.has_more = true;
        self.in_flight = None;
        self.scope = (!scope.trim().is_empty()).then_some(scope);
        tracing::debug!("Paged listing reset to scope {:?}", self.scope);
    }

    /// Issue the request for the current page.
    ///
    /// Returns None without changing anything when there is no scope, the
    /// list is exhausted, or a request is already in flight.
    pub fn request_next_page(&mut self) -> Option<PageTicket> {
        let Some(scope) = self.scope.as_deref() else {
            tracing::debug!("No scope set, not requesting a page");
            return None;
        };
        if !self.has_more || self.in_flight.is_some() {
            return None;
        }

        let ticket = PageTicket {
            request: PageRequest {
                scope: scope.to_string(),
                page: self.current_page,
                page_size: self.page_size,
            },
            generation: self.generation,
        };
        tracing::debug!("Requesting page {} for '{}'", ticket.page(), ticket.scope());
        self.in_flight = Some(ticket.clone());
        Some(ticket)
    }

    /// Record a failed fetch. The page number and `has_more` stay as they
    /// were so the next trigger retries the same page.
    pub fn on_page_failed(&mut self, ticket: &PageTicket, error: FetchError) -> PageOutcome {
        if !self.is_in_flight(ticket) {
            tracing::debug!("Dropping failure of stale page {} for '{}'", ticket.page(), ticket.scope());
            return PageOutcome::Discarded;
        }
        self.in_flight = None;
        tracing::warn!("Page {} for '{}' failed: {}", ticket.page(), ticket.scope(), error);
        PageOutcome::Failed(error)
    }

    /// Whether the viewer is close enough to the bottom to load another page
    pub fn should_trigger_next_page(&self, metrics: ScrollMetrics, threshold_px: f64) -> bool {
        self.has_more && !self.is_fetching() && metrics.is_near_bottom(threshold_px)
    }

    fn is_in_flight(&self, ticket: &PageTicket) -> bool {
        self.in_flight.as_ref() == Some(ticket)
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page number the next request will ask for
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn policy(&self) -> DedupPolicy {
        self.policy
    }
}

impl<T: Identified> PagedAccumulator<T> {
    /// Merge a page that arrived for `ticket`.
    pub fn on_page_arrived(&mut self, ticket: &PageTicket, page: Page<T>) -> PageOutcome {
        if !self.is_in_flight(ticket) {
            tracing::debug!("Dropping stale page {} for '{}'", ticket.page(), ticket.scope());
            return PageOutcome::Discarded;
        }
        self.in_flight = None;

        let has_more = page.resolved_has_more();
        let (added, duplicates) = self.merge(page.items);
        self.has_more = has_more;
        self.current_page += 1;

        if duplicates > 0 {
            tracing::debug!(
                "Page {} for '{}' repeated {} known items",
                ticket.page(),
                ticket.scope(),
                duplicates
            );
        }

        PageOutcome::Merged {
            page: ticket.page(),
            added,
            duplicates,
            has_more,
        }
    }

    /// Apply the result of a fetch, whichever way it went
    pub fn settle(&mut self, ticket: &PageTicket, result: Result<Page<T>, FetchError>) -> PageOutcome {
        match result {
            Ok(page) => self.on_page_arrived(ticket, page),
            Err(error) => self.on_page_failed(ticket, error),
        }
    }

    /// Look up an accumulated item by identifier
    pub fn get(&self, id: &str) -> Option<&T> {
        self.positions.get(id).map(|&pos| &self.items[pos])
    }

    /// Replace a known item in place, whatever the dedup policy.
    ///
    /// Unknown items are ignored, so paging order and the page counter are
    /// untouched. Returns whether an item was replaced.
    pub fn refresh(&mut self, item: T) -> bool {
        match self.positions.get(item.id()).copied() {
            Some(pos) => {
                self.items[pos] = item;
                true
            }
            None => false,
        }
    }

    fn merge(&mut self, incoming: Vec<T>) -> (usize, usize) {
        let mut added = 0;
        let mut duplicates = 0;

        for item in incoming {
            match self.positions.get(item.id()).copied() {
                Some(pos) => {
                    duplicates += 1;
                    if self.policy == DedupPolicy::KeepLatest {
                        self.items[pos] = item;
                    }
                }
                None => {
                    self.positions.insert(item.id().to_string(), self.items.len());
                    self.items.push(item);
                    added += 1;
                }
            }
        }

        (added, duplicates)
    }
}
