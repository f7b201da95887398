// fixtures/listings/mod.rs - Sample listings, served a page at a time

pub mod orders;
pub mod products;

pub use orders::*;
pub use products::*;

use crate::web_app::paging::{Page, PageRequest, FIRST_PAGE};

/// A fixed listing that can be cut into backend-style pages
pub trait SampleListing {
    type Item: Clone;

    /// Every item of the listing for `scope`, in backend order
    fn all(scope: &str) -> Vec<Self::Item>;

    /// Slice for one request. Pages past the end are empty; no `hasMore`
    /// flag is sent unless `with_flag` is set.
    fn page(request: &PageRequest, with_flag: bool) -> Page<Self::Item> {
        let all = Self::all(&request.scope);
        let size = request.page_size.max(1) as usize;
        let start = (request.page.max(FIRST_PAGE) - FIRST_PAGE) as usize * size;
        let end = (start + size).min(all.len());

        let items = all.get(start..end).map(<[_]>::to_vec).unwrap_or_default();
        let has_more = with_flag.then_some(end < all.len());
        Page::new(items, has_more)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u32, page_size: u32) -> PageRequest {
        PageRequest {
            scope: "snack-shack".into(),
            page,
            page_size,
        }
    }

    #[test]
    fn test_pages_cover_listing_once() {
        let sizes: Vec<usize> = (1..=4)
            .map(|p| SellerCatalogue::page(&request(p, 10), false).items.len())
            .collect();
        assert_eq!(sizes, vec![10, 10, 4, 0]);
    }

    #[test]
    fn test_flag_marks_last_page() {
        assert_eq!(SellerCatalogue::page(&request(2, 10), true).has_more, Some(true));
        assert_eq!(SellerCatalogue::page(&request(3, 10), true).has_more, Some(false));
    }
}
