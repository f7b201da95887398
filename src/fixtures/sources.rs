// fixtures/sources.rs - Scripted page source and hand-driven scroll source

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::web_app::error::FetchError;
use crate::web_app::paging::{Page, PageRequest, PageSource, ScrollMetrics, ScrollSource};

/// Page source that answers with pre-recorded results, in order.
///
/// Once the script runs out every request gets an empty page. Every request
/// is recorded so tests can check what was asked for.
pub struct ScriptedSource<T> {
    script: RefCell<VecDeque<Result<Page<T>, FetchError>>>,
    requests: RefCell<Vec<PageRequest>>,
}

impl<T> Default for ScriptedSource<T> {
    fn default() -> Self {
        Self {
            script: RefCell::new(VecDeque::new()),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl<T> ScriptedSource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page without an end-of-list flag
    pub fn then_items(self, items: Vec<T>) -> Self {
        self.then(Ok(Page::new(items, None)))
    }

    /// Queue a page carrying the backend's `hasMore` flag
    pub fn then_flagged(self, items: Vec<T>, has_more: bool) -> Self {
        self.then(Ok(Page::new(items, Some(has_more))))
    }

    pub fn then_error(self, error: FetchError) -> Self {
        self.then(Err(error))
    }

    pub fn then(self, result: Result<Page<T>, FetchError>) -> Self {
        self.script.borrow_mut().push_back(result);
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.borrow().clone()
    }

    /// Page numbers requested so far
    pub fn pages_requested(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|r| r.page).collect()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

impl<T> PageSource<T> for ScriptedSource<T> {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        self.requests.borrow_mut().push(request);
        self.script.borrow_mut().pop_front().unwrap_or_else(|| Ok(Page::empty()))
    }
}

type Listener = Rc<dyn Fn(ScrollMetrics)>;

/// Scroll source driven by the test: `emit` plays a scroll event to every
/// subscribed listener.
#[derive(Clone, Default)]
pub struct ManualScroll {
    listeners: Rc<RefCell<Vec<(usize, Listener)>>>,
    next_id: Rc<Cell<usize>>,
}

impl ManualScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, metrics: ScrollMetrics) {
        // Snapshot first so a listener may unsubscribe while being called
        let listeners: Vec<Listener> = self.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(metrics);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ScrollSource for ManualScroll {
    type Subscription = usize;

    fn subscribe(&self, callback: Box<dyn Fn(ScrollMetrics)>) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::from(callback)));
        id
    }

    fn unsubscribe(&self, subscription: usize) {
        self.listeners.borrow_mut().retain(|(id, _)| *id != subscription);
    }
}

impl std::fmt::Debug for ManualScroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScroll")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
