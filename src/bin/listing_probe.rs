// Walk a paged backend listing from the command line
//
// Usage: listing_probe <products|current-orders|completed-orders> <seller> [max-pages]
//
// Loads pages through the same accumulator the web views use and logs what
// each page added, which makes overlapping or repeated pages easy to spot.

use anyhow::{bail, Context, Result};
use campus_market::web_app::api::{client, MarketClient};
use campus_market::web_app::model::{Identified, Order, Product};
use campus_market::web_app::paging::{
    load_next_page, ListingEndpoint, PageOutcome, PagedAccumulator, CATALOGUE_PAGE_SIZE, ORDERS_PAGE_SIZE,
};
use serde::de::DeserializeOwned;

const DEFAULT_MAX_PAGES: u32 = 20;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(listing), Some(seller)) = (args.next(), args.next()) else {
        bail!("usage: listing_probe <products|current-orders|completed-orders> <seller> [max-pages]");
    };
    let max_pages = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid max-pages '{raw}'"))?,
        None => DEFAULT_MAX_PAGES,
    };

    let market = client::create_client().context("could not build backend client")?;
    tracing::info!("Probing {} for '{}' at {}", listing, seller, market.base_url());

    let total = match listing.as_str() {
        "products" => {
            walk::<Product>(&market, ListingEndpoint::SELLER_PRODUCTS, CATALOGUE_PAGE_SIZE, &seller, max_pages).await
        }
        "current-orders" => {
            walk::<Order>(&market, ListingEndpoint::CURRENT_ORDERS, ORDERS_PAGE_SIZE, &seller, max_pages).await
        }
        "completed-orders" => {
            walk::<Order>(&market, ListingEndpoint::COMPLETED_ORDERS, ORDERS_PAGE_SIZE, &seller, max_pages).await
        }
        other => bail!("unknown listing '{other}'"),
    }?;

    println!("{listing} for {seller}: {total} distinct items");
    Ok(())
}

async fn walk<T>(
    market: &MarketClient,
    endpoint: ListingEndpoint,
    page_size: u32,
    seller: &str,
    max_pages: u32,
) -> Result<usize>
where
    T: Identified + DeserializeOwned,
{
    let source = market.listing(endpoint);
    let mut acc = PagedAccumulator::<T>::new(page_size);
    acc.reset(seller);

    for _ in 0..max_pages {
        match load_next_page(&mut acc, &source).await {
            None => break,
            Some(PageOutcome::Merged {
                page,
                added,
                duplicates,
                has_more,
            }) => {
                tracing::info!(
                    "page {}: +{} new, {} repeated, more: {}",
                    page,
                    added,
                    duplicates,
                    has_more
                );
            }
            Some(PageOutcome::Failed(error)) => {
                bail!("page {} failed: {}", acc.current_page(), error);
            }
            Some(PageOutcome::Discarded) => {
                tracing::warn!("Page response was discarded, stopping");
                break;
            }
        }
    }

    if acc.has_more() {
        tracing::warn!("Stopped after {} pages with more available", max_pages);
    }
    Ok(acc.len())
}
