// fixtures/mod.rs - Test fixtures module
//
// Reusable listing data and stand-ins for the two capabilities a paged
// listing depends on:
// - listings/: sample catalogues and order queues, sliced into pages the way
//   the backend slices them
// - sources.rs: a scripted page source and a hand-driven scroll source
//
// Used by the integration tests, the mock backend in tests/common, and the
// probe binary's own checks.

pub mod listings;
pub mod sources;

pub use listings::*;
pub use sources::*;
