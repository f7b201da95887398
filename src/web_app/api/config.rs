// web_app/api/config.rs - Backend client configuration
//
// Read from the environment (a `.env` file is honoured by the binaries).
// Missing or unparsable values fall back to defaults, with a log line
// saying which.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:7000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Where the marketplace backend lives and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub page_size: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MarketConfig {
    /// Load `MARKET_API_URL`, `MARKET_API_TIMEOUT_SECS` and `MARKET_PAGE_SIZE`
    pub fn from_env() -> Self {
        Self {
            base_url: try_load("MARKET_API_URL", DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(try_load("MARKET_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            page_size: try_load("MARKET_PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
