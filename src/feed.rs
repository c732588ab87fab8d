//! Discovery feed state machine
//!
//! Owns everything the browse list shows: the accumulated movies, paging
//! position, loading/error flags, and the search-vs-genre mode decision.
//! Input handlers call `set_query`, `set_genre`, `load_more`, or `refresh`;
//! the event loop polls `take_fetch` once per tick to collect at most one
//! request to run, and hands the response back through `apply`.
//!
//! The feed does no I/O itself. Requests are described by [`FetchPlan`]
//! values and results come back as [`FetchOutcome`] values, each tagged with
//! the generation current when the plan was issued. A reset bumps the
//! generation, so responses from before the reset no longer match and are
//! dropped on arrival.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::api::TmdbError;
use crate::models::{MoviePage, MovieSummary};

/// Quiet period after the last keystroke before a search fires
pub const DEBOUNCE: Duration = Duration::from_millis(350);

/// User-facing message for any failed feed request
pub const FEED_ERROR: &str = "Something went wrong. Please try again.";

// =============================================================================
// Fetch Plans and Outcomes
// =============================================================================

/// Which catalog listing a fetch targets
#[derive(Debug, Clone, PartialEq)]
pub enum FetchKind {
    /// Title search; the genre filter is deliberately ignored in this mode
    Search { query: String },
    /// Popular movies, optionally narrowed to one genre
    Discover { genre_id: Option<u32> },
}

/// One request the event loop should run against the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub generation: u64,
    pub page: u32,
    /// Replace the list (reset) rather than append to it (load-more)
    pub replace: bool,
    pub kind: FetchKind,
}

/// A finished request, paired with the plan fields needed to place it
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub page: u32,
    pub replace: bool,
    pub result: Result<MoviePage, TmdbError>,
}

impl FetchOutcome {
    /// Bundle a result with the plan it answers
    pub fn for_plan(plan: &FetchPlan, result: Result<MoviePage, TmdbError>) -> Self {
        Self {
            generation: plan.generation,
            page: plan.page,
            replace: plan.replace,
            result,
        }
    }
}

// =============================================================================
// Feed
// =============================================================================

/// Browse-list state: accumulated movies plus the rules for when to refetch
#[derive(Debug)]
pub struct Feed {
    items: Vec<MovieSummary>,
    page: u32,
    total_pages: u32,
    loading: bool,
    error: Option<String>,
    /// Text as typed, shown in the search box
    query: String,
    /// Text the last fired debounce settled on; drives fetch mode
    debounced_query: String,
    genre: Option<u32>,
    generation: u64,
    /// Single debounce slot; every keystroke overwrites it
    pending_query: Option<(String, Instant)>,
    needs_reset: bool,
    wants_more: bool,
}

impl Feed {
    /// A feed that will issue its initial discover on the first `take_fetch`
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            loading: false,
            error: None,
            query: String::new(),
            debounced_query: String::new(),
            genre: None,
            generation: 0,
            pending_query: None,
            needs_reset: true,
            wants_more: false,
        }
    }

    // -------------------------------------------------------------------------
    // Input events
    // -------------------------------------------------------------------------

    /// Record a keystroke in the search box and restart the debounce window
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.query = text.clone();
        self.pending_query = Some((text, now + DEBOUNCE));
    }

    /// Select a genre (None = All). A change schedules an immediate reset.
    pub fn set_genre(&mut self, genre: Option<u32>) {
        if self.genre != genre {
            self.genre = genre;
            self.needs_reset = true;
        }
    }

    /// Ask for the next page. Ignored while a fetch is in flight or when
    /// the current page is already the last one.
    pub fn load_more(&mut self) {
        if self.loading || self.page >= self.total_pages {
            return;
        }
        self.wants_more = true;
    }

    /// Re-run the current listing from page 1
    pub fn refresh(&mut self) {
        self.needs_reset = true;
    }

    /// Abandon all scheduled and in-flight work. Responses already on the
    /// wire will arrive with an older generation and be dropped.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending_query = None;
        self.needs_reset = false;
        self.wants_more = false;
        self.loading = false;
    }

    // -------------------------------------------------------------------------
    // Fetch lifecycle
    // -------------------------------------------------------------------------

    /// Collect the one request this tick should run, if any.
    ///
    /// Fires the debounce when its deadline has passed, then resolves the
    /// queued triggers. Reset beats load-more: any number of reset causes
    /// landing between two ticks still produces a single page-1 request.
    pub fn take_fetch(&mut self, now: Instant) -> Option<FetchPlan> {
        if let Some((_, deadline)) = &self.pending_query {
            if now >= *deadline {
                let (text, _) = self.pending_query.take().unwrap();
                // The box echoes raw text but the query commits trimmed, so
                // settling on padding (or on the same text) is not a change
                let text = text.trim();
                if text != self.debounced_query {
                    self.debounced_query = text.to_string();
                    self.needs_reset = true;
                }
            }
        }

        if self.needs_reset {
            self.needs_reset = false;
            self.wants_more = false;
            self.generation += 1;
            self.loading = true;
            self.error = None;
            self.items.clear();
            self.page = 1;
            return Some(FetchPlan {
                generation: self.generation,
                page: 1,
                replace: true,
                kind: self.kind(),
            });
        }

        if self.wants_more {
            self.wants_more = false;
            if self.loading || self.page >= self.total_pages {
                return None;
            }
            self.loading = true;
            self.error = None;
            return Some(FetchPlan {
                generation: self.generation,
                page: self.page + 1,
                replace: false,
                kind: self.kind(),
            });
        }

        None
    }

    /// Place a finished request. Outcomes from an older generation are
    /// dropped without touching any state; the return value says whether
    /// this one counted.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            return false;
        }

        self.loading = false;

        match outcome.result {
            Ok(page) => {
                self.error = None;
                self.total_pages = page.total_pages.max(1);
                if outcome.replace {
                    // Route through merge so one page repeating an id
                    // cannot put it in the listing twice
                    self.items.clear();
                    self.merge(page.movies);
                    self.page = 1;
                } else {
                    self.merge(page.movies);
                    // The requested page becomes current only now, so a
                    // failed load-more never moves the counter. Clamp in
                    // case the listing shrank while we were fetching.
                    self.page = outcome.page.min(self.total_pages);
                }
            }
            Err(_) => {
                self.error = Some(FEED_ERROR.to_string());
            }
        }

        true
    }

    /// Append movies, keeping the first occurrence of every id
    fn merge(&mut self, incoming: Vec<MovieSummary>) {
        let mut seen: HashSet<u64> = self.items.iter().map(|m| m.id).collect();
        for movie in incoming {
            if seen.insert(movie.id) {
                self.items.push(movie);
            }
        }
    }

    /// Mode for the next fetch: a non-empty settled query wins over genre
    fn kind(&self) -> FetchKind {
        if self.debounced_query.is_empty() {
            FetchKind::Discover { genre_id: self.genre }
        } else {
            FetchKind::Search {
                query: self.debounced_query.clone(),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Live search box contents
    pub fn query(&self) -> &str {
        &self.query
    }

    /// True while results reflect a title search rather than discovery
    pub fn is_searching(&self) -> bool {
        !self.debounced_query.is_empty()
    }

    pub fn genre(&self) -> Option<u32> {
        self.genre
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            original_language: None,
            overview: None,
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> MoviePage {
        MoviePage {
            movies: ids.iter().map(|&id| movie(id, &format!("Movie {}", id))).collect(),
            total_pages,
        }
    }

    fn ids(feed: &Feed) -> Vec<u64> {
        feed.items().iter().map(|m| m.id).collect()
    }

    /// Run the initial discover so tests start from a settled list
    fn settle(feed: &mut Feed, now: Instant, ids: &[u64], total_pages: u32) {
        let plan = feed.take_fetch(now).unwrap();
        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(ids, total_pages))));
    }

    // -------------------------------------------------------------------------
    // Mode selection and reset
    // -------------------------------------------------------------------------

    #[test]
    fn test_initial_fetch_is_discover_page_one() {
        let mut feed = Feed::new();
        let plan = feed.take_fetch(Instant::now()).unwrap();

        assert_eq!(plan.page, 1);
        assert!(plan.replace);
        assert_eq!(plan.kind, FetchKind::Discover { genre_id: None });
        assert!(feed.is_loading());

        // Only one plan per trigger
        assert!(feed.take_fetch(Instant::now()).is_none());
    }

    #[test]
    fn test_genre_change_resets_to_page_one() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1, 2], 5);

        feed.set_genre(Some(28));
        let plan = feed.take_fetch(now).unwrap();
        assert!(plan.replace);
        assert_eq!(plan.page, 1);
        assert_eq!(plan.kind, FetchKind::Discover { genre_id: Some(28) });
        assert!(feed.items().is_empty());
    }

    #[test]
    fn test_same_genre_is_not_a_change() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_genre(None);
        assert!(feed.take_fetch(now).is_none());

        feed.set_genre(Some(28));
        settle(&mut feed, now, &[2], 1);
        feed.set_genre(Some(28));
        assert!(feed.take_fetch(now).is_none());
    }

    #[test]
    fn test_query_beats_genre() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_genre(Some(28));
        settle(&mut feed, now, &[2], 1);

        feed.set_query("batman", now);
        let plan = feed.take_fetch(now + DEBOUNCE).unwrap();
        assert_eq!(
            plan.kind,
            FetchKind::Search { query: "batman".to_string() }
        );
    }

    #[test]
    fn test_genre_switch_during_search_stays_in_search_mode() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_query("batman", now);
        settle(&mut feed, now + DEBOUNCE, &[2], 1);

        // Changing genre while a query is live still refetches, but the
        // query keeps deciding the mode
        feed.set_genre(Some(878));
        let plan = feed.take_fetch(now + DEBOUNCE).unwrap();
        assert!(plan.replace);
        assert_eq!(
            plan.kind,
            FetchKind::Search { query: "batman".to_string() }
        );
    }

    #[test]
    fn test_cleared_query_returns_to_discover_with_genre() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_genre(Some(35));
        settle(&mut feed, now, &[2], 1);
        feed.set_query("comedy gold", now);
        settle(&mut feed, now + DEBOUNCE, &[3], 1);

        feed.set_query("", now);
        let plan = feed.take_fetch(now + DEBOUNCE).unwrap();
        assert_eq!(plan.kind, FetchKind::Discover { genre_id: Some(35) });
    }

    // -------------------------------------------------------------------------
    // Debounce
    // -------------------------------------------------------------------------

    #[test]
    fn test_rapid_typing_coalesces_to_one_fetch() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_query("d", now);
        feed.set_query("du", now + Duration::from_millis(100));
        feed.set_query("dun", now + Duration::from_millis(200));
        feed.set_query("dune", now + Duration::from_millis(300));

        // 300ms after the last keystroke: still waiting
        let mid = now + Duration::from_millis(600);
        assert!(feed.take_fetch(mid).is_none());

        // 350ms after the last keystroke: exactly one search, final text
        let done = now + Duration::from_millis(650);
        let plan = feed.take_fetch(done).unwrap();
        assert_eq!(plan.kind, FetchKind::Search { query: "dune".to_string() });
        assert!(feed.take_fetch(done).is_none());
    }

    #[test]
    fn test_keystroke_restarts_the_window() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_query("a", now);
        // The earlier deadline is gone once a new keystroke lands
        feed.set_query("ab", now + Duration::from_millis(300));
        assert!(feed.take_fetch(now + Duration::from_millis(400)).is_none());

        let plan = feed.take_fetch(now + Duration::from_millis(650)).unwrap();
        assert_eq!(plan.kind, FetchKind::Search { query: "ab".to_string() });
    }

    #[test]
    fn test_settling_on_same_text_does_not_refetch() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_query("dune", now);
        settle(&mut feed, now + DEBOUNCE, &[2], 1);

        // Retyping the identical text runs the debounce but changes nothing
        feed.set_query("dune", now + Duration::from_millis(500));
        assert!(feed.take_fetch(now + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_query_commits_trimmed() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.set_query("  dune  ", now);
        // The box still echoes exactly what was typed
        assert_eq!(feed.query(), "  dune  ");

        let plan = feed.take_fetch(now + DEBOUNCE).unwrap();
        assert_eq!(plan.kind, FetchKind::Search { query: "dune".to_string() });

        // Padding the settled text is not a change
        feed.set_query("dune ", now + DEBOUNCE);
        assert!(feed.take_fetch(now + DEBOUNCE * 3).is_none());
    }

    #[test]
    fn test_whitespace_only_query_is_not_a_search() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);
        feed.set_genre(Some(35));
        settle(&mut feed, now, &[2], 1);

        // Spaces in an empty box settle to nothing; no refetch at all
        feed.set_query("   ", now);
        assert!(feed.take_fetch(now + DEBOUNCE).is_none());
        assert!(!feed.is_searching());

        // Spaces replacing a live query fall back to genre discovery
        feed.set_query("comedy", now);
        settle(&mut feed, now + DEBOUNCE, &[3], 1);
        feed.set_query("   ", now + DEBOUNCE);
        let plan = feed.take_fetch(now + DEBOUNCE * 2).unwrap();
        assert_eq!(plan.kind, FetchKind::Discover { genre_id: Some(35) });
        assert!(!feed.is_searching());
    }

    #[test]
    fn test_live_query_updates_before_debounce_fires() {
        let now = Instant::now();
        let mut feed = Feed::new();
        feed.set_query("du", now);
        assert_eq!(feed.query(), "du");
        assert!(!feed.is_searching());
    }

    // -------------------------------------------------------------------------
    // Paging
    // -------------------------------------------------------------------------

    #[test]
    fn test_load_more_appends_next_page() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1, 2], 3);

        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();
        assert_eq!(plan.page, 2);
        assert!(!plan.replace);
        assert_eq!(plan.generation, 1);

        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[3, 4], 3))));
        assert_eq!(ids(&feed), vec![1, 2, 3, 4]);
        assert_eq!(feed.page(), 2);
        assert!(feed.has_more());
    }

    #[test]
    fn test_load_more_drops_duplicate_ids() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1, 2, 3], 2);

        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();
        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[3, 4, 4, 5], 2))));

        // First occurrence wins, across pages and within the response
        assert_eq!(ids(&feed), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_replace_drops_duplicate_ids() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1, 2], 1);

        feed.refresh();
        let plan = feed.take_fetch(now).unwrap();
        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[7, 8, 8, 9], 1))));

        // First occurrence wins within a fresh page too
        assert_eq!(ids(&feed), vec![7, 8, 9]);
    }

    #[test]
    fn test_load_more_noop_on_last_page() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 1);

        feed.load_more();
        assert!(feed.take_fetch(now).is_none());
    }

    #[test]
    fn test_load_more_noop_while_loading() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 5);

        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();

        // Second request while page 2 is in flight
        feed.load_more();
        assert!(feed.take_fetch(now).is_none());

        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[2], 5))));
        feed.load_more();
        assert_eq!(feed.take_fetch(now).unwrap().page, 3);
    }

    #[test]
    fn test_load_more_noop_before_first_load() {
        let mut feed = Feed::new();
        feed.load_more();
        // Only the initial discover comes out, no page-2 request after it
        let plan = feed.take_fetch(Instant::now()).unwrap();
        assert!(plan.replace);
        assert!(feed.take_fetch(Instant::now()).is_none());
    }

    #[test]
    fn test_shrinking_listing_clamps_page() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 5);

        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();
        // The listing shrank to 2 pages while page 2 was in flight
        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[2], 2))));

        assert_eq!(feed.page(), 2);
        assert!(!feed.has_more());
        feed.load_more();
        assert!(feed.take_fetch(now).is_none());
    }

    // -------------------------------------------------------------------------
    // Errors
    // -------------------------------------------------------------------------

    #[test]
    fn test_failed_fetch_sets_banner_and_keeps_items() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1, 2], 3);

        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();
        feed.apply(FetchOutcome::for_plan(&plan, Err(TmdbError::ServerError(500))));

        assert_eq!(feed.error(), Some(FEED_ERROR));
        assert_eq!(ids(&feed), vec![1, 2]);
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_failed_load_more_rolls_back_page() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 3);
        assert_eq!(feed.page(), 1);

        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();
        assert_eq!(plan.page, 2);
        feed.apply(FetchOutcome::for_plan(&plan, Err(TmdbError::RateLimited)));

        // Page never moved, so the retry asks for page 2 again
        assert_eq!(feed.page(), 1);
        feed.load_more();
        assert_eq!(feed.take_fetch(now).unwrap().page, 2);
    }

    #[test]
    fn test_new_fetch_clears_the_banner() {
        let now = Instant::now();
        let mut feed = Feed::new();
        let plan = feed.take_fetch(now).unwrap();
        feed.apply(FetchOutcome::for_plan(&plan, Err(TmdbError::NotFound)));
        assert!(feed.error().is_some());

        feed.refresh();
        feed.take_fetch(now).unwrap();
        assert!(feed.error().is_none());
    }

    #[test]
    fn test_empty_results_are_not_an_error() {
        let now = Instant::now();
        let mut feed = Feed::new();
        feed.set_query("zzzzzz no such movie", now);
        let plan = feed.take_fetch(now + DEBOUNCE).unwrap();
        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[], 1))));

        assert!(feed.items().is_empty());
        assert!(feed.error().is_none());
        assert!(!feed.is_loading());
    }

    // -------------------------------------------------------------------------
    // Staleness and generations
    // -------------------------------------------------------------------------

    #[test]
    fn test_stale_outcome_is_dropped() {
        let now = Instant::now();
        let mut feed = Feed::new();
        let first = feed.take_fetch(now).unwrap();

        // A genre change lands before the first response does
        feed.set_genre(Some(28));
        let second = feed.take_fetch(now).unwrap();
        assert!(second.generation > first.generation);

        assert!(!feed.apply(FetchOutcome::for_plan(&first, Ok(page(&[99], 9)))));
        assert!(feed.items().is_empty());
        // The newer fetch is still in flight
        assert!(feed.is_loading());

        assert!(feed.apply(FetchOutcome::for_plan(&second, Ok(page(&[1], 2)))));
        assert_eq!(ids(&feed), vec![1]);
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_stale_error_is_silent() {
        let now = Instant::now();
        let mut feed = Feed::new();
        let first = feed.take_fetch(now).unwrap();

        feed.refresh();
        let second = feed.take_fetch(now).unwrap();

        feed.apply(FetchOutcome::for_plan(&first, Err(TmdbError::ServerError(502))));
        assert!(feed.error().is_none());

        feed.apply(FetchOutcome::for_plan(&second, Ok(page(&[1], 1))));
        assert_eq!(ids(&feed), vec![1]);
    }

    #[test]
    fn test_refresh_replaces_from_page_one() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1, 2], 3);
        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();
        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[3], 3))));
        assert_eq!(feed.page(), 2);

        feed.refresh();
        let plan = feed.take_fetch(now).unwrap();
        assert!(plan.replace);
        assert_eq!(plan.page, 1);

        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[7, 8], 3))));
        assert_eq!(ids(&feed), vec![7, 8]);
        assert_eq!(feed.page(), 1);
    }

    #[test]
    fn test_coalesced_triggers_issue_one_fetch() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 5);

        // Three reset causes and a page request land within one tick
        feed.set_query("alien", now);
        feed.set_genre(Some(878));
        feed.refresh();
        feed.load_more();

        let plan = feed.take_fetch(now + DEBOUNCE).unwrap();
        assert!(plan.replace);
        assert_eq!(plan.page, 1);
        assert_eq!(plan.kind, FetchKind::Search { query: "alien".to_string() });
        assert!(feed.take_fetch(now + DEBOUNCE).is_none());
    }

    #[test]
    fn test_invalidate_discards_everything_in_flight() {
        let now = Instant::now();
        let mut feed = Feed::new();
        settle(&mut feed, now, &[1], 3);

        feed.set_query("dune", now);
        feed.load_more();
        let plan = feed.take_fetch(now).unwrap();

        feed.invalidate();
        assert!(!feed.is_loading());
        // The debounce slot is gone
        assert!(feed.take_fetch(now + Duration::from_secs(1)).is_none());

        feed.apply(FetchOutcome::for_plan(&plan, Ok(page(&[50], 9))));
        assert_eq!(ids(&feed), vec![1]);
    }
}
