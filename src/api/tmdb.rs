//! TMDB (The Movie Database) API client
//!
//! Provides genre listings, discovery, search, and per-movie details.
//! API docs: https://developer.themoviedb.org/docs

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{CastMember, Genre, MovieDetails, MoviePage, MovieSummary, Video, CAST_LIMIT};

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.themoviedb.org/3")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// v4 read tokens are long JWTs and go in the Authorization header;
    /// short v3 keys ride along as an `api_key` query parameter.
    fn uses_bearer(&self) -> bool {
        self.api_key.len() >= 64
    }

    /// Make an authenticated GET request with retry logic for rate limits
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, TmdbError> {
        let mut url = format!("{}{}", self.base_url, endpoint);
        if !self.uses_bearer() {
            let sep = if url.contains('?') { '&' } else { '?' };
            url.push(sep);
            url.push_str("api_key=");
            url.push_str(&self.api_key);
        }

        let mut retries = 0;

        loop {
            let mut request = self.client.get(&url).header("Accept", "application/json");
            if self.uses_bearer() {
                request = request.header("Authorization", format!("Bearer {}", self.api_key));
            }
            let response = request.send().await?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::NOT_FOUND => {
                    return Err(TmdbError::NotFound);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(TmdbError::RateLimited);
                    }

                    // Get Retry-After header or default to exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(TmdbError::ServerError(status.as_u16()));
                }
            }
        }
    }

    /// List all movie genres
    pub async fn genres(&self) -> Result<Vec<Genre>, TmdbError> {
        let response: GenresResponse = self.get("/genre/movie/list").await?;
        Ok(response.into_genres())
    }

    /// Browse popular movies, optionally narrowed to one genre
    pub async fn discover(&self, page: u32, genre_id: Option<u32>) -> Result<MoviePage, TmdbError> {
        let mut endpoint = format!("/discover/movie?page={}", page);
        if let Some(id) = genre_id {
            endpoint.push_str(&format!("&with_genres={}", id));
        }

        let response: PageResponse = self.get(&endpoint).await?;
        Ok(response.into_page())
    }

    /// Search movies by title
    pub async fn search(&self, query: &str, page: u32) -> Result<MoviePage, TmdbError> {
        let endpoint = format!(
            "/search/movie?query={}&page={}",
            urlencoding::encode(query),
            page
        );

        let response: PageResponse = self.get(&endpoint).await?;
        Ok(response.into_page())
    }

    /// Get extended details for a movie, with videos and cast in one call
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails, TmdbError> {
        let endpoint = format!("/movie/{}?append_to_response=videos,credits", id);
        let response: DetailsResponse = self.get(&endpoint).await?;
        Ok(response.into_details())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct GenresResponse {
    #[serde(default)]
    genres: Vec<GenreRaw>,
}

impl GenresResponse {
    fn into_genres(self) -> Vec<Genre> {
        self.genres.into_iter().map(|g| g.into_genre()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    id: u32,
    name: String,
}

impl GenreRaw {
    fn into_genre(self) -> Genre {
        Genre {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(default)]
    results: Vec<MovieRaw>,
    total_pages: Option<u32>,
}

impl PageResponse {
    fn into_page(self) -> MoviePage {
        MoviePage {
            movies: self.results.into_iter().map(|r| r.into_summary()).collect(),
            // The wire omits total_pages on some error-shaped bodies; treat
            // missing or zero as a single page.
            total_pages: self.total_pages.unwrap_or(1).max(1),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieRaw {
    id: u64,
    title: Option<String>,
    poster_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f32>,
    original_language: Option<String>,
    overview: Option<String>,
}

impl MovieRaw {
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.unwrap_or_default(),
            poster_path: self.poster_path,
            release_date: self.release_date,
            vote_average: self.vote_average,
            original_language: self.original_language,
            overview: self.overview,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    id: u64,
    title: String,
    tagline: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    overview: Option<String>,
    vote_average: Option<f32>,
    original_language: Option<String>,
    status: Option<String>,
    budget: Option<u64>,
    revenue: Option<u64>,
    popularity: Option<f64>,
    homepage: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    videos: Option<VideosWrapper>,
    credits: Option<CreditsWrapper>,
}

impl DetailsResponse {
    fn into_details(self) -> MovieDetails {
        let videos = self
            .videos
            .map(|w| w.results.into_iter().map(|v| v.into_video()).collect())
            .unwrap_or_default();

        // Billing order is already how the wire sends cast; keep the top entries
        let cast = self
            .credits
            .map(|w| {
                w.cast
                    .into_iter()
                    .take(CAST_LIMIT)
                    .map(|c| c.into_member())
                    .collect()
            })
            .unwrap_or_default();

        MovieDetails {
            id: self.id,
            title: self.title,
            tagline: self.tagline,
            release_date: self.release_date,
            runtime: self.runtime,
            genres: self.genres.into_iter().map(|g| g.into_genre()).collect(),
            overview: self.overview,
            vote_average: self.vote_average,
            original_language: self.original_language,
            status: self.status,
            budget: self.budget,
            revenue: self.revenue,
            popularity: self.popularity,
            homepage: self.homepage,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            cast,
            videos,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideosWrapper {
    #[serde(default)]
    results: Vec<VideoRaw>,
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    key: String,
    name: Option<String>,
    site: String,
    #[serde(rename = "type")]
    kind: String,
}

impl VideoRaw {
    fn into_video(self) -> Video {
        Video {
            key: self.key,
            name: self.name.unwrap_or_default(),
            site: self.site,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreditsWrapper {
    #[serde(default)]
    cast: Vec<CastRaw>,
}

#[derive(Debug, Deserialize)]
struct CastRaw {
    name: String,
    character: Option<String>,
    profile_path: Option<String>,
}

impl CastRaw {
    fn into_member(self) -> CastMember {
        CastMember {
            name: self.name,
            character: self.character,
            profile_path: self.profile_path,
        }
    }
}
