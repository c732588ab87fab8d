//! API clients for external services
//!
//! - TMDB: movie catalog metadata, search, and per-title details

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
