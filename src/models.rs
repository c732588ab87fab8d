//! Data structures and types for CineTUI
//!
//! Contains all shared models used across the application organized by domain:
//! - **Catalog**: movie summaries and genres from the TMDB catalog
//! - **Detail**: extended per-movie records (cast, videos, facts)
//! - **Formatting**: display helpers for runtime, money, dates, and names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image CDN bases (TMDB). Sizes follow what the catalog serves for each slot.
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w780";
pub const PROFILE_BASE: &str = "https://image.tmdb.org/t/p/w185";

/// Cast lists are truncated to this many entries.
pub const CAST_LIMIT: usize = 12;

// =============================================================================
// Catalog Models
// =============================================================================

/// One movie as it appears in paged catalog lists (discover/search results).
///
/// Identity is `id`; everything else is display data and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
}

impl MovieSummary {
    /// Release year, when the date string carries one
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// Rating for display: "7.8", or "—" when missing or zero
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(v) if v > 0.0 => format!("{:.1}", v),
            _ => "—".to_string(),
        }
    }

    /// Full poster URL, if the catalog provided a poster
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| format!("{}{}", POSTER_BASE, p))
    }
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} ★ {}", self.title, year_str, self.rating_label())
    }
}

/// A catalog genre. `None` as a selection means "All" (no genre filter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One page of catalog results plus the total page count for that listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<MovieSummary>,
    pub total_pages: u32,
}

// =============================================================================
// Detail Models
// =============================================================================

/// Extended record for a single movie (detail screen / `info` command)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub tagline: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub overview: Option<String>,
    pub vote_average: Option<f32>,
    pub original_language: Option<String>,
    pub status: Option<String>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub popularity: Option<f64>,
    pub homepage: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub cast: Vec<CastMember>,
    pub videos: Vec<Video>,
}

impl MovieDetails {
    /// Release year, when known
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// Formatted runtime ("2h 56m"), empty when unknown
    pub fn runtime_text(&self) -> String {
        format_runtime(self.runtime.unwrap_or(0))
    }

    /// Rating for display: "7.8", or "—" when missing or zero
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(v) if v > 0.0 => format!("{:.1}", v),
            _ => "—".to_string(),
        }
    }

    /// The trailer to offer: first YouTube "Trailer", else "Teaser",
    /// else the first YouTube video of any type.
    pub fn trailer(&self) -> Option<&Video> {
        let yt: Vec<&Video> = self.videos.iter().filter(|v| v.is_youtube()).collect();
        yt.iter()
            .find(|v| v.kind == "Trailer")
            .or_else(|| yt.iter().find(|v| v.kind == "Teaser"))
            .copied()
            .or_else(|| yt.first().copied())
    }

    /// Backdrop URL, falling back to the poster when no backdrop exists
    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .or(self.poster_path.as_deref())
            .map(|p| format!("{}{}", BACKDROP_BASE, p))
    }

    /// Genre names joined for one-line display
    pub fn genres_line(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Reduce to the list-level record (used when favoriting from detail)
    pub fn to_summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            original_language: self.original_language.clone(),
            overview: self.overview.clone(),
        }
    }
}

impl fmt::Display for MovieDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} ★ {}", self.title, year_str, self.rating_label())?;
        let runtime = self.runtime_text();
        if !runtime.is_empty() {
            write!(f, " - {}", runtime)?;
        }
        Ok(())
    }
}

/// One cast credit, in billing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

impl CastMember {
    /// Initials for the avatar placeholder ("Robert Pattinson" -> "RP")
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    /// Full profile image URL, if the catalog provided one
    pub fn profile_url(&self) -> Option<String> {
        self.profile_path
            .as_deref()
            .map(|p| format!("{}{}", PROFILE_BASE, p))
    }
}

impl fmt::Display for CastMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.character.as_deref() {
            Some(role) if !role.is_empty() => write!(f, "{} as {}", self.name, role),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// A promotional video attached to a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    /// "Trailer", "Teaser", "Clip", ... (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: String,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site == "YouTube"
    }

    /// Watch URL for YouTube-hosted videos
    pub fn youtube_url(&self) -> Option<String> {
        if self.is_youtube() {
            Some(format!("https://www.youtube.com/watch?v={}", self.key))
        } else {
            None
        }
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind)
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Extract the year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    if date.len() >= 4 {
        date[..4].parse().ok()
    } else {
        None
    }
}

/// Format a runtime in minutes: "2h 56m", "2h", "45m", "" for zero
pub fn format_runtime(mins: u32) -> String {
    let h = mins / 60;
    let m = mins % 60;
    match (h, m) {
        (0, 0) => String::new(),
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Format an amount of dollars with thousands separators: "$185,000,000"
pub fn format_money(value: u64) -> String {
    if value == 0 {
        return "$0".to_string();
    }
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}

/// Uppercase initials of the first two name parts ("Zoë Kravitz" -> "ZK")
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> MovieSummary {
        MovieSummary {
            id: 414906,
            title: "The Batman".to_string(),
            poster_path: Some("/74xTEgt7R36Fpooo50r9T25onhq.jpg".to_string()),
            release_date: Some("2022-03-01".to_string()),
            vote_average: Some(7.8),
            original_language: Some("en".to_string()),
            overview: Some("Batman ventures into Gotham".to_string()),
        }
    }

    fn video(kind: &str, site: &str, key: &str) -> Video {
        Video {
            key: key.to_string(),
            name: format!("{} video", kind),
            site: site.to_string(),
            kind: kind.to_string(),
        }
    }

    fn sample_details(videos: Vec<Video>) -> MovieDetails {
        MovieDetails {
            id: 414906,
            title: "The Batman".to_string(),
            tagline: Some("Unmask the truth.".to_string()),
            release_date: Some("2022-03-01".to_string()),
            runtime: Some(176),
            genres: vec![
                Genre { id: 80, name: "Crime".to_string() },
                Genre { id: 9648, name: "Mystery".to_string() },
            ],
            overview: Some("Batman ventures into Gotham".to_string()),
            vote_average: Some(7.8),
            original_language: Some("en".to_string()),
            status: Some("Released".to_string()),
            budget: Some(185_000_000),
            revenue: Some(770_945_583),
            popularity: Some(123.4),
            homepage: None,
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            cast: vec![CastMember {
                name: "Robert Pattinson".to_string(),
                character: Some("Bruce Wayne".to_string()),
                profile_path: None,
            }],
            videos,
        }
    }

    // -------------------------------------------------------------------------
    // Summary helpers
    // -------------------------------------------------------------------------

    #[test]
    fn test_year_from_release_date() {
        assert_eq!(sample_movie().year(), Some(2022));

        let mut movie = sample_movie();
        movie.release_date = None;
        assert_eq!(movie.year(), None);

        movie.release_date = Some("".to_string());
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(sample_movie().rating_label(), "7.8");

        let mut movie = sample_movie();
        movie.vote_average = None;
        assert_eq!(movie.rating_label(), "—");

        // Zero means "not rated" on this catalog
        movie.vote_average = Some(0.0);
        assert_eq!(movie.rating_label(), "—");
    }

    #[test]
    fn test_poster_url() {
        assert_eq!(
            sample_movie().poster_url().unwrap(),
            "https://image.tmdb.org/t/p/w500/74xTEgt7R36Fpooo50r9T25onhq.jpg"
        );

        let mut movie = sample_movie();
        movie.poster_path = None;
        assert!(movie.poster_url().is_none());
    }

    #[test]
    fn test_movie_display() {
        assert_eq!(sample_movie().to_string(), "The Batman (2022) ★ 7.8");

        let mut movie = sample_movie();
        movie.release_date = None;
        movie.vote_average = None;
        assert_eq!(movie.to_string(), "The Batman ★ —");
    }

    // -------------------------------------------------------------------------
    // Detail helpers
    // -------------------------------------------------------------------------

    #[test]
    fn test_trailer_prefers_trailer_type() {
        let details = sample_details(vec![
            video("Clip", "YouTube", "c1"),
            video("Teaser", "YouTube", "t1"),
            video("Trailer", "YouTube", "tr1"),
        ]);
        assert_eq!(details.trailer().unwrap().key, "tr1");
    }

    #[test]
    fn test_trailer_falls_back_to_teaser() {
        let details = sample_details(vec![
            video("Clip", "YouTube", "c1"),
            video("Teaser", "YouTube", "t1"),
        ]);
        assert_eq!(details.trailer().unwrap().key, "t1");
    }

    #[test]
    fn test_trailer_falls_back_to_first_youtube() {
        let details = sample_details(vec![
            video("Featurette", "YouTube", "f1"),
            video("Clip", "YouTube", "c1"),
        ]);
        assert_eq!(details.trailer().unwrap().key, "f1");
    }

    #[test]
    fn test_trailer_ignores_other_sites() {
        let details = sample_details(vec![
            video("Trailer", "Vimeo", "v1"),
            video("Clip", "YouTube", "c1"),
        ]);
        // The Vimeo trailer is invisible; the YouTube clip wins
        assert_eq!(details.trailer().unwrap().key, "c1");

        let none = sample_details(vec![video("Trailer", "Vimeo", "v1")]);
        assert!(none.trailer().is_none());
    }

    #[test]
    fn test_backdrop_falls_back_to_poster() {
        let mut details = sample_details(vec![]);
        assert_eq!(
            details.backdrop_url().unwrap(),
            "https://image.tmdb.org/t/p/w780/backdrop.jpg"
        );

        details.backdrop_path = None;
        assert_eq!(
            details.backdrop_url().unwrap(),
            "https://image.tmdb.org/t/p/w780/poster.jpg"
        );

        details.poster_path = None;
        assert!(details.backdrop_url().is_none());
    }

    #[test]
    fn test_genres_line() {
        assert_eq!(sample_details(vec![]).genres_line(), "Crime, Mystery");
    }

    #[test]
    fn test_to_summary_keeps_identity() {
        let details = sample_details(vec![]);
        let summary = details.to_summary();
        assert_eq!(summary.id, details.id);
        assert_eq!(summary.title, details.title);
        assert_eq!(summary.release_date, details.release_date);
    }

    #[test]
    fn test_video_youtube_url() {
        let v = video("Trailer", "YouTube", "abc123");
        assert_eq!(
            v.youtube_url().unwrap(),
            "https://www.youtube.com/watch?v=abc123"
        );
        assert!(video("Trailer", "Vimeo", "x").youtube_url().is_none());
    }

    #[test]
    fn test_cast_member_display() {
        let member = CastMember {
            name: "Robert Pattinson".to_string(),
            character: Some("Bruce Wayne".to_string()),
            profile_path: None,
        };
        assert_eq!(member.to_string(), "Robert Pattinson as Bruce Wayne");
        assert_eq!(member.initials(), "RP");

        let no_role = CastMember {
            name: "Zoë Kravitz".to_string(),
            character: None,
            profile_path: None,
        };
        assert_eq!(no_role.to_string(), "Zoë Kravitz");
    }

    // -------------------------------------------------------------------------
    // Formatters
    // -------------------------------------------------------------------------

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2022-03-04"), Some(2022));
        assert_eq!(extract_year("2019-11-12"), Some(2019));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("abc"), None);
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(176), "2h 56m");
        assert_eq!(format_runtime(120), "2h");
        assert_eq!(format_runtime(45), "45m");
        assert_eq!(format_runtime(0), "");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(185_000_000), "$185,000,000");
        assert_eq!(format_money(1_000), "$1,000");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(0), "$0");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Robert Pattinson"), "RP");
        assert_eq!(initials("Zoë Kravitz"), "ZK");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("  "), "");
        // Only the first two parts count
        assert_eq!(initials("Mary Elizabeth Winstead"), "ME");
    }
}
