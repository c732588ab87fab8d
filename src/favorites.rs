//! Session favorites
//!
//! An insertion-ordered collection of movies the user starred this session,
//! plus the pure filter/sort pipeline the favorites screen renders through.
//! Nothing here persists; closing the app forgets the list.

use std::cmp::Ordering;

use crate::models::MovieSummary;

/// Sort orders for the favorites screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent release first
    #[default]
    Newest,
    /// Earliest release first
    Oldest,
    /// Title A to Z
    TitleAsc,
    /// Title Z to A
    TitleDesc,
}

impl SortKey {
    /// The next order in the cycle (bound to one key in the UI)
    pub fn next(self) -> Self {
        match self {
            SortKey::Newest => SortKey::Oldest,
            SortKey::Oldest => SortKey::TitleAsc,
            SortKey::TitleAsc => SortKey::TitleDesc,
            SortKey::TitleDesc => SortKey::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::Oldest => "Oldest",
            SortKey::TitleAsc => "Title A-Z",
            SortKey::TitleDesc => "Title Z-A",
        }
    }
}

/// Movies starred during this session, in the order they were starred
#[derive(Debug, Default)]
pub struct Favorites {
    items: Vec<MovieSummary>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Star an unstarred movie, unstar a starred one
    pub fn toggle(&mut self, movie: MovieSummary) {
        if let Some(pos) = self.items.iter().position(|m| m.id == movie.id) {
            self.items.remove(pos);
        } else {
            self.items.push(movie);
        }
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.items.iter().any(|m| m.id == id)
    }

    /// All favorites in arrival order
    pub fn all(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unstar everything
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Unstar every listed id. Ids that are not starred are skipped, not
    /// errors, so a selection can safely mix both.
    pub fn remove_many(&mut self, ids: &[u64]) {
        self.items.retain(|m| !ids.contains(&m.id));
    }

    /// The favorites screen's view: title-filtered, then ordered.
    ///
    /// Sorting is stable, so movies the sort cannot tell apart stay in
    /// arrival order.
    pub fn filtered(&self, filter: &str, sort: SortKey) -> Vec<MovieSummary> {
        let needle = filter.trim().to_lowercase();
        let mut view: Vec<MovieSummary> = self
            .items
            .iter()
            .filter(|m| needle.is_empty() || m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        match sort {
            SortKey::Newest => view.sort_by(|a, b| cmp_dates_desc(a, b)),
            SortKey::Oldest => view.sort_by(|a, b| cmp_dates(a, b)),
            SortKey::TitleAsc => view.sort_by(|a, b| cmp_titles(a, b)),
            SortKey::TitleDesc => view.sort_by(|a, b| cmp_titles(b, a)),
        }

        view
    }
}

/// Compare by release date, earliest first (ISO strings order
/// lexicographically). Undated movies always sink to the end, whichever
/// direction is asked.
fn cmp_dates(a: &MovieSummary, b: &MovieSummary) -> Ordering {
    match (dated(a), dated(b)) {
        (Some(da), Some(db)) => da.cmp(db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Latest first. Only the dated-vs-dated arm flips; swapping the arguments
/// of [`cmp_dates`] instead would float undated movies to the top.
fn cmp_dates_desc(a: &MovieSummary, b: &MovieSummary) -> Ordering {
    match (dated(a), dated(b)) {
        (Some(da), Some(db)) => db.cmp(da),
        _ => cmp_dates(a, b),
    }
}

fn dated(m: &MovieSummary) -> Option<&str> {
    m.release_date.as_deref().filter(|d| !d.is_empty())
}

fn cmp_titles(a: &MovieSummary, b: &MovieSummary) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}
