// web_app/api/mod.rs - Backend access for server-side logic and tools
//
// This module contains the typed HTTP client for the marketplace backend,
// its configuration, and the process-wide client used by server functions.

pub mod config;

pub mod backend;

pub mod client;

pub use backend::{HttpListing, MarketClient};
pub use config::MarketConfig;
