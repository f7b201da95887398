// lib.rs - Root module for the campus_market library
//
// The library holds the marketplace web client: shared models, the paged
// listing machinery, the backend client used by server functions, and the
// Leptos views. Test fixtures live here too so integration tests and the
// probe binary can share them.

/// The fixtures module contains reusable listing data and scripted page sources
pub mod fixtures;

/// The Leptos web application and everything it is built from
pub mod web_app;

/// WASM entry point used by cargo-leptos when hydrating the server render
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use leptos::prelude::*;
    use crate::web_app::App;

    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(|| view! { <App /> });
}
