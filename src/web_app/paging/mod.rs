// web_app/paging/mod.rs - Paged listings with deduplication and infinite scroll
//
// Every infinite-scroll view in the app (a seller's catalogue, current and
// completed orders) goes through the same three pieces:
// - accumulator.rs: the per-scope state machine that merges pages
// - scroll.rs: the "near the bottom" trigger and the scroll capability
// - source.rs: where pages come from and how a response body becomes a page

pub mod accumulator;
pub mod scroll;
pub mod source;

pub use accumulator::*;
pub use scroll::*;
pub use source::*;

/// Page size of the seller order listings
pub const ORDERS_PAGE_SIZE: u32 = 10;

/// Page size of a seller's product catalogue
pub const CATALOGUE_PAGE_SIZE: u32 = 12;
