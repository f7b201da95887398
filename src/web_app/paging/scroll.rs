// web_app/paging/scroll.rs - Scroll position trigger for infinite listings
//
// The listing never talks to the window directly. It receives scroll
// positions through a `ScrollSource` supplied by the host, and only asks
// "is this close enough to the bottom?".

/// Seller order listings load the next page at the very bottom
pub const ORDER_LIST_THRESHOLD_PX: f64 = 10.0;

/// The product catalogue starts loading well before the bottom
pub const CATALOGUE_THRESHOLD_PX: f64 = 500.0;

/// Snapshot of the page geometry at a scroll event, in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_position: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_position: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_position,
            document_height,
            viewport_height,
        }
    }

    pub fn is_near_bottom(&self, threshold_px: f64) -> bool {
        is_near_bottom(
            self.scroll_position,
            self.document_height,
            self.viewport_height,
            threshold_px,
        )
    }
}

/// Whether the bottom of the viewport is within `threshold_px` of the end
/// of the document
pub fn is_near_bottom(
    scroll_position: f64,
    document_height: f64,
    viewport_height: f64,
    threshold_px: f64,
) -> bool {
    viewport_height + scroll_position >= document_height - threshold_px
}

/// Capability that delivers scroll positions to a listener
pub trait ScrollSource {
    /// Token returned by `subscribe` and consumed by `unsubscribe`
    type Subscription;

    fn subscribe(&self, callback: Box<dyn Fn(ScrollMetrics)>) -> Self::Subscription;

    fn unsubscribe(&self, subscription: Self::Subscription);
}

/// Scroll events of the browser window
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowScroll;

#[cfg(feature = "hydrate")]
impl WindowScroll {
    /// Current geometry of the window and document body
    pub fn metrics() -> Option<ScrollMetrics> {
        use leptos::prelude::{document, window};

        let window = window();
        let viewport_height = window.inner_height().ok()?.as_f64()?;
        let scroll_position = window.scroll_y().ok()?;
        let document_height = f64::from(document().body()?.offset_height());
        Some(ScrollMetrics::new(scroll_position, document_height, viewport_height))
    }
}

#[cfg(feature = "hydrate")]
impl ScrollSource for WindowScroll {
    type Subscription = leptos::prelude::WindowListenerHandle;

    fn subscribe(&self, callback: Box<dyn Fn(ScrollMetrics)>) -> Self::Subscription {
        leptos::prelude::window_event_listener(leptos::ev::scroll, move |_| {
            if let Some(metrics) = WindowScroll::metrics() {
                callback(metrics);
            }
        })
    }

    fn unsubscribe(&self, subscription: Self::Subscription) {
        subscription.remove();
    }
}

// Outside the browser there is nothing to scroll
#[cfg(not(feature = "hydrate"))]
impl ScrollSource for WindowScroll {
    type Subscription = ();

    fn subscribe(&self, _callback: Box<dyn Fn(ScrollMetrics)>) -> Self::Subscription {}

    fn unsubscribe(&self, _subscription: Self::Subscription) {}
}
