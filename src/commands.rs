//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the TMDB client directly.
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;

use crate::api::{TmdbClient, TmdbError};
use crate::cli::{DiscoverCmd, ExitCode, GenreSelector, GenresCmd, InfoCmd, Output, SearchCmd};
use crate::config::Config;
use crate::models::{Genre, MovieSummary};

/// Build a client from the configured key chain
fn client_from_config() -> TmdbClient {
    let mut config = Config::load();
    TmdbClient::new(config.get_tmdb_api_key())
}

/// Map a failed catalog call onto an exit code
fn api_error(output: &Output, what: &str, err: TmdbError) -> ExitCode {
    let code = match err {
        TmdbError::NotFound => ExitCode::NotFound,
        _ => ExitCode::NetworkError,
    };
    output.error(format!("{} failed: {}", what, err), code)
}

/// One page of list results, annotated for scripted pagination
#[derive(Serialize)]
struct PageOutput {
    page: u32,
    total_pages: u32,
    results: Vec<MovieSummary>,
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, output: &Output) -> ExitCode {
    if cmd.page == 0 {
        return output.error("Page numbers start at 1", ExitCode::InvalidArgs);
    }

    let client = client_from_config();
    output.info(format!("Searching for: {}", cmd.query));

    match client.search(&cmd.query, cmd.page).await {
        Ok(page) => {
            let mut results = page.movies;
            results.truncate(cmd.limit);

            let out = PageOutput {
                page: cmd.page,
                total_pages: page.total_pages,
                results,
            };
            if let Err(e) = output.print(&out) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => api_error(output, "Search", e),
    }
}

// =============================================================================
// Discover Command
// =============================================================================

pub async fn discover_cmd(cmd: DiscoverCmd, output: &Output) -> ExitCode {
    if cmd.page == 0 {
        return output.error("Page numbers start at 1", ExitCode::InvalidArgs);
    }

    let client = client_from_config();

    // Resolve a genre name to its id before discovering
    let genre_id = match cmd.genre_selector() {
        None => None,
        Some(GenreSelector::Id(id)) => Some(id),
        Some(GenreSelector::Name(name)) => {
            let genres = match client.genres().await {
                Ok(g) => g,
                Err(e) => return api_error(output, "Genre list", e),
            };
            match resolve_genre(&genres, &name) {
                Some(id) => Some(id),
                None => {
                    return output.error(
                        format!("Unknown genre: {}", name),
                        ExitCode::NotFound,
                    )
                }
            }
        }
    };

    match genre_id {
        Some(id) => output.info(format!("Browsing genre {} (page {})", id, cmd.page)),
        None => output.info(format!("Browsing popular movies (page {})", cmd.page)),
    }

    match client.discover(cmd.page, genre_id).await {
        Ok(page) => {
            let mut results = page.movies;
            results.truncate(cmd.limit);

            let out = PageOutput {
                page: cmd.page,
                total_pages: page.total_pages,
                results,
            };
            if let Err(e) = output.print(&out) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => api_error(output, "Discover", e),
    }
}

/// Case-insensitive genre name lookup
pub fn resolve_genre(genres: &[Genre], name: &str) -> Option<u32> {
    let wanted = name.trim().to_lowercase();
    genres
        .iter()
        .find(|g| g.name.to_lowercase() == wanted)
        .map(|g| g.id)
}

// =============================================================================
// Genres Command
// =============================================================================

pub async fn genres_cmd(_cmd: GenresCmd, output: &Output) -> ExitCode {
    let client = client_from_config();
    output.info("Fetching genre list...");

    match client.genres().await {
        Ok(genres) => {
            if let Err(e) = output.print(&genres) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => api_error(output, "Genre list", e),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, output: &Output) -> ExitCode {
    let client = client_from_config();
    output.info(format!("Getting info for: {}", cmd.id));

    match client.movie_details(cmd.id).await {
        Ok(details) => {
            if let Err(e) = output.print(&details) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => api_error(output, "Info", e),
    }
}
