//! Integration tests for CineTUI
//!
//! Tests are organized by component:
//! - tmdb_test: TMDB API client tests
//! - cli_test: CLI parsing, genre resolution, and JSON output tests
//! - ui_test: Theme, layout, and screen render tests
//! - e2e_test: End-to-end flow tests (Browse -> Search -> Detail -> Favorites)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
