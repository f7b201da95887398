// web_app/api/client.rs - Process-wide backend client
//
// The server binary creates one `MarketClient` at startup and registers it
// here so server functions can reach it without threading it through every
// call. Tests can swap in a client pointed at a local mock backend.

use std::sync::{Mutex, OnceLock, PoisonError};

use super::backend::MarketClient;
use super::config::MarketConfig;
use crate::web_app::error::FetchError;

static CLIENT: OnceLock<MarketClient> = OnceLock::new();
static TEST_CLIENT_OVERRIDE: Mutex<Option<MarketClient>> = Mutex::new(None);

/// Initialize the global backend client
pub fn init_client(client: MarketClient) {
    tracing::info!("Initializing global backend client for {}", client.base_url());
    if CLIENT.set(client).is_err() {
        tracing::warn!("Backend client already initialized");
    }
}

/// Set a client override for testing
pub fn set_test_client(client: Option<MarketClient>) {
    let mut guard = TEST_CLIENT_OVERRIDE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = client;
}

/// Get the global backend client
pub fn get_client() -> Option<MarketClient> {
    // Check for test override first
    {
        let guard = TEST_CLIENT_OVERRIDE
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = guard.as_ref() {
            return Some(client.clone());
        }
    }

    let client = CLIENT.get().cloned();
    if client.is_none() {
        tracing::warn!("Global backend client is not initialized");
    }
    client
}

/// Create a backend client from the environment
///
/// Reads `.env` if present, then `MARKET_API_URL` and
/// `MARKET_API_TIMEOUT_SECS` (see `MarketConfig::from_env`).
pub fn create_client() -> Result<MarketClient, FetchError> {
    dotenv::dotenv().ok();
    MarketClient::new(&MarketConfig::from_env())
}
