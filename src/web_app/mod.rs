// web_app/mod.rs - Root module for the Leptos web application
//
// This module contains all the components and logic for the campus market
// client built with the Leptos framework.
//
// Architecture:
// - model/: Marketplace data types and form validation (client and server)
// - error.rs: Fetch and validation errors shared by every layer
// - paging/: Paged result accumulator, scroll trigger and page sources
// - session.rs: Current-user capability (who is browsing)
// - server_fns.rs: Server function declarations (both client and server)
// - api/: Backend HTTP client and configuration (native only)
// - components/: Reusable UI components (both SSR and hydrate)
// - pages/: Route-level views (both SSR and hydrate)
// - app.rs: Root application component with routing (both SSR and hydrate)

pub mod error;
pub mod model;
pub mod paging;
pub mod session;

// Server function declarations - must be available to both client and server
// The #[server] macro generates client stubs that call the server via HTTP
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod server_fns;

// Backend client for the marketplace API (native only, never in WASM)
#[cfg(feature = "backend-tools")]
pub mod api;

// Components, pages, and app are used by both server and client
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod components;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod pages;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;

// Re-export main app component for convenience
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub use app::App;
