//! CineTUI - Terminal movie browser for TMDB
//!
//! A marquee-lit terminal interface for discovering movies, searching the
//! catalog, and keeping a favorites shortlist. Simple. Fast. Warm popcorn.
//!
//! # Modules
//!
//! - `models` - Data structures for movies, genres, credits, videos
//! - `api` - TMDB API client
//! - `feed` - Discovery feed controller (debounce, paging, staleness)
//! - `favorites` - Session favorites store and its filtered/sorted views
//! - `ui` - TUI components
//! - `app` - Application state and navigation
//! - `cli` - Command-line interface definitions
//! - `commands` - One-shot CLI command implementations
//! - `config` - Configuration file handling

pub mod models;
pub mod api;
pub mod feed;
pub mod favorites;
pub mod ui;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;

// Re-export commonly used types
pub use models::{
    CastMember, Genre, MovieDetails, MoviePage, MovieSummary, Video,
};

pub use api::{TmdbClient, TmdbError};
pub use app::{App, AppState};
pub use favorites::{Favorites, SortKey};
pub use feed::{Feed, FetchKind, FetchOutcome, FetchPlan};
