//! App state and core application logic
//!
//! Manages the application state machine, navigation stack, and keyboard
//! routing. All async work is described by plan values the event loop
//! collects each tick and answered through [`AppEvent`] messages, so this
//! module stays synchronous and directly testable.

use std::collections::HashSet;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::TmdbError;
use crate::favorites::{Favorites, SortKey};
use crate::feed::{Feed, FetchOutcome};
use crate::models::{Genre, MovieDetails, MovieSummary};

/// User-facing message when a detail fetch fails
pub const DETAIL_ERROR: &str = "Failed to load details.";

/// Ask for the next page once the cursor gets this close to the end
const LOAD_AHEAD: usize = 5;

/// Rows jumped by PageUp/PageDown
const PAGE_JUMP: usize = 10;

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Browse screen: search box, genre strip, movie list
    #[default]
    Browse,
    /// Favorites screen: filterable, sortable shortlist
    Favorites,
    /// Detail view for one movie
    Detail,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search or filter box focused)
    Editing,
}

// =============================================================================
// List Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// True when the cursor sits within `margin` rows of the end
    pub fn near_end(&self, margin: usize) -> bool {
        self.len > 0 && self.selected + margin >= self.len
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if visible_height > 0 && self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    /// Reset selection
    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        // Clamp selected to valid range
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Text Input State
// =============================================================================

/// A one-line text box with a cursor (search box, favorites filter)
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub text: String,
    /// Cursor position in bytes (ASCII-safe; input is typed, not pasted)
    pub cursor: usize,
}

impl TextInput {
    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = floor_char_boundary(&self.text, self.cursor - 1);
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = floor_char_boundary(&self.text, self.cursor - 1);
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.text.len() {
            let mut next = self.cursor + 1;
            while next < self.text.len() && !self.text.is_char_boundary(next) {
                next += 1;
            }
            self.cursor = next;
        }
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Clear the box
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Largest char boundary at or below `index`
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

// =============================================================================
// Per-Screen State
// =============================================================================

/// Browse screen state
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    /// Movie list cursor
    pub list: ListState,
    /// Genre strip cursor: 0 = All, then genres in catalog order
    pub genre_idx: usize,
}

/// Favorites screen state
#[derive(Debug, Default)]
pub struct FavoritesState {
    /// Title filter box
    pub filter: TextInput,
    /// Active sort order
    pub sort: SortKey,
    /// Ids marked for bulk removal
    pub marked: HashSet<u64>,
    /// List cursor over the filtered view
    pub list: ListState,
}

/// Panels on the detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFocus {
    #[default]
    Info,
    Cast,
    Videos,
}

impl DetailFocus {
    /// Cycle to the next panel
    pub fn next(self) -> Self {
        match self {
            DetailFocus::Info => DetailFocus::Cast,
            DetailFocus::Cast => DetailFocus::Videos,
            DetailFocus::Videos => DetailFocus::Info,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetailFocus::Info => "Info",
            DetailFocus::Cast => "Cast",
            DetailFocus::Videos => "Videos",
        }
    }
}

/// Detail screen state for the movie being viewed
#[derive(Debug)]
pub struct DetailPane {
    /// The list row the pane was opened from. Known before the fetch
    /// completes, so the header and favoriting work while details load.
    pub summary: MovieSummary,
    pub details: Option<MovieDetails>,
    pub loading: bool,
    pub error: Option<String>,
    pub focus: DetailFocus,
    pub scroll: u16,
}

impl DetailPane {
    fn open(movie: &MovieSummary) -> Self {
        Self {
            summary: movie.clone(),
            details: None,
            loading: true,
            error: None,
            focus: DetailFocus::Info,
            scroll: 0,
        }
    }
}

/// A detail fetch the event loop should run
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPlan {
    pub movie_id: u64,
    pub generation: u64,
}

/// A finished detail fetch
#[derive(Debug)]
pub struct DetailOutcome {
    pub generation: u64,
    pub result: Result<MovieDetails, TmdbError>,
}

// =============================================================================
// Async Events
// =============================================================================

/// Messages spawned tasks send back to the event loop
#[derive(Debug)]
pub enum AppEvent {
    /// A feed request finished
    Feed(FetchOutcome),
    /// The genre list arrived (or failed)
    Genres(Result<Vec<Genre>, TmdbError>),
    /// A detail request finished
    Detail(DetailOutcome),
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current state/screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Global error message (popup)
    pub error: Option<String>,

    /// Browse feed: movies, paging, search/genre mode
    pub feed: Feed,
    /// Session favorites
    pub favorites: Favorites,
    /// Genre strip contents (empty until loaded; strip then shows only All)
    pub genres: Vec<Genre>,
    /// Search box on the browse screen
    pub search: TextInput,

    // Per-screen state
    pub browse: BrowseState,
    pub favs: FavoritesState,
    pub detail: Option<DetailPane>,

    detail_gen: u64,
    detail_request: Option<DetailPlan>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            state: AppState::Browse,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,

            feed: Feed::new(),
            favorites: Favorites::new(),
            genres: Vec::new(),
            search: TextInput::default(),

            browse: BrowseState::default(),
            favs: FavoritesState::default(),
            detail: None,

            detail_gen: 0,
            detail_request: None,
        }
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state != state {
            self.nav_stack.push(self.state);
            self.state = state;
        }
        // Reset input mode when navigating
        self.input_mode = InputMode::Normal;
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        // If in editing mode, exit editing first
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            if self.state == AppState::Detail {
                // A response for the closed pane no longer matters
                self.detail_gen += 1;
                self.detail = None;
            }
            self.state = prev;
            true
        } else {
            false
        }
    }

    /// Quit the application, abandoning anything still in flight
    pub fn quit(&mut self) {
        self.running = false;
        self.feed.invalidate();
        self.detail_gen += 1;
    }

    /// Set error popup message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    // -------------------------------------------------------------------------
    // Async plumbing
    // -------------------------------------------------------------------------

    /// Collect the detail fetch the event loop should run, if any
    pub fn take_detail_fetch(&mut self) -> Option<DetailPlan> {
        self.detail_request.take()
    }

    /// Place a finished async task
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Feed(outcome) => {
                let replaced = outcome.replace;
                if self.feed.apply(outcome) {
                    if replaced {
                        self.browse.list.reset();
                    }
                    self.browse.list.set_len(self.feed.items().len());
                }
            }
            AppEvent::Genres(Ok(genres)) => {
                self.genres = genres;
            }
            AppEvent::Genres(Err(_)) => {
                // The strip simply stays on All when the list cannot load
            }
            AppEvent::Detail(outcome) => self.apply_detail(outcome),
        }
    }

    fn apply_detail(&mut self, outcome: DetailOutcome) {
        if outcome.generation != self.detail_gen {
            return;
        }
        if let Some(pane) = &mut self.detail {
            pane.loading = false;
            match outcome.result {
                Ok(details) => {
                    pane.error = None;
                    pane.details = Some(details);
                }
                Err(_) => {
                    pane.error = Some(DETAIL_ERROR.to_string());
                }
            }
        }
    }

    fn open_detail(&mut self, movie: &MovieSummary) {
        self.detail_gen += 1;
        self.detail = Some(DetailPane::open(movie));
        self.detail_request = Some(DetailPlan {
            movie_id: movie.id,
            generation: self.detail_gen,
        });
        self.navigate(AppState::Detail);
    }

    // -------------------------------------------------------------------------
    // View helpers
    // -------------------------------------------------------------------------

    /// Movie under the browse cursor
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.feed.items().get(self.browse.list.selected)
    }

    /// The favorites screen's current rows
    pub fn favorites_view(&self) -> Vec<MovieSummary> {
        self.favorites.filtered(&self.favs.filter.text, self.favs.sort)
    }

    /// Name shown on the genre strip for the current selection
    pub fn current_genre_name(&self) -> &str {
        if self.browse.genre_idx == 0 {
            "All"
        } else {
            &self.genres[self.browse.genre_idx - 1].name
        }
    }

    fn open_favorites(&mut self) {
        // Marks may refer to movies unstarred from elsewhere
        let favorites = &self.favorites;
        self.favs.marked.retain(|id| favorites.is_favorite(*id));
        self.favs.list.set_len(self.favorites_view().len());
        self.favs.list.reset();
        self.navigate(AppState::Favorites);
    }

    fn sync_favorites_list(&mut self) {
        self.favs.list.set_len(self.favorites_view().len());
    }

    fn apply_genre(&mut self) {
        let id = if self.browse.genre_idx == 0 {
            None
        } else {
            Some(self.genres[self.browse.genre_idx - 1].id)
        };
        self.feed.set_genre(id);
    }

    /// Ask for more results when the cursor closes in on the end
    fn nudge_feed(&mut self) {
        if self.browse.list.near_end(LOAD_AHEAD) {
            self.feed.load_more();
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear error popup on any keypress
        self.error = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return true;
            }
            KeyCode::Up | KeyCode::Down => {
                // Let the list keep working while the box is focused
                self.input_mode = InputMode::Normal;
                return self.handle_normal_key(key);
            }
            _ => {}
        }

        match self.state {
            AppState::Browse => {
                let before = self.search.text.clone();
                if edit_input(&mut self.search, key) {
                    // Cursor motion must not restart the debounce window
                    if self.search.text != before {
                        self.feed.set_query(self.search.text.clone(), Instant::now());
                    }
                    true
                } else {
                    false
                }
            }
            AppState::Favorites => {
                if edit_input(&mut self.favs.filter, key) {
                    self.sync_favorites_list();
                    true
                } else {
                    false
                }
            }
            AppState::Detail => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        // Global shortcuts
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') => {
                if self.state != AppState::Detail {
                    self.input_mode = InputMode::Editing;
                    return true;
                }
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match self.state {
            AppState::Browse => self.handle_browse_key(key),
            AppState::Favorites => self.handle_favorites_key(key),
            AppState::Detail => self.handle_detail_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.browse.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.browse.list.down();
                self.nudge_feed();
                true
            }
            KeyCode::PageUp => {
                self.browse.list.page_up(PAGE_JUMP);
                true
            }
            KeyCode::PageDown => {
                self.browse.list.page_down(PAGE_JUMP);
                self.nudge_feed();
                true
            }
            KeyCode::Home => {
                self.browse.list.first();
                true
            }
            KeyCode::End => {
                self.browse.list.last();
                self.nudge_feed();
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.browse.genre_idx > 0 {
                    self.browse.genre_idx -= 1;
                    self.apply_genre();
                }
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.browse.genre_idx < self.genres.len() {
                    self.browse.genre_idx += 1;
                    self.apply_genre();
                }
                true
            }
            KeyCode::Enter => {
                if let Some(movie) = self.selected_movie().cloned() {
                    self.open_detail(&movie);
                }
                true
            }
            KeyCode::Char(' ') => {
                if let Some(movie) = self.selected_movie().cloned() {
                    self.favorites.toggle(movie);
                }
                true
            }
            KeyCode::Char('r') => {
                self.feed.refresh();
                true
            }
            KeyCode::Char('f') => {
                self.open_favorites();
                true
            }
            _ => false,
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.favs.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.favs.list.down();
                true
            }
            KeyCode::Home => {
                self.favs.list.first();
                true
            }
            KeyCode::End => {
                self.favs.list.last();
                true
            }
            KeyCode::Char('s') => {
                self.favs.sort = self.favs.sort.next();
                self.favs.list.reset();
                true
            }
            KeyCode::Char('x') | KeyCode::Char(' ') => {
                let view = self.favorites_view();
                if let Some(movie) = view.get(self.favs.list.selected) {
                    if !self.favs.marked.insert(movie.id) {
                        self.favs.marked.remove(&movie.id);
                    }
                }
                true
            }
            KeyCode::Char('d') => {
                if self.favs.marked.is_empty() {
                    let view = self.favorites_view();
                    if let Some(movie) = view.get(self.favs.list.selected) {
                        self.favorites.remove_many(&[movie.id]);
                    }
                } else {
                    let ids: Vec<u64> = self.favs.marked.drain().collect();
                    self.favorites.remove_many(&ids);
                }
                self.sync_favorites_list();
                true
            }
            KeyCode::Char('C') => {
                self.favorites.clear();
                self.favs.marked.clear();
                self.favs.list.set_len(0);
                true
            }
            KeyCode::Enter => {
                let view = self.favorites_view();
                if let Some(movie) = view.get(self.favs.list.selected).cloned() {
                    self.open_detail(&movie);
                }
                true
            }
            KeyCode::Char('f') => {
                self.back();
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        let Some(pane) = &mut self.detail else {
            return false;
        };

        match key.code {
            KeyCode::Tab => {
                pane.focus = pane.focus.next();
                pane.scroll = 0;
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                pane.scroll = pane.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                pane.scroll = pane.scroll.saturating_add(1);
                true
            }
            KeyCode::PageUp => {
                pane.scroll = pane.scroll.saturating_sub(PAGE_JUMP as u16);
                true
            }
            KeyCode::PageDown => {
                pane.scroll = pane.scroll.saturating_add(PAGE_JUMP as u16);
                true
            }
            KeyCode::Char(' ') => {
                // Loaded details are fresher, but the opening row is enough
                // to star a movie whose fetch is still out or has failed
                let summary = pane
                    .details
                    .as_ref()
                    .map(|d| d.to_summary())
                    .unwrap_or_else(|| pane.summary.clone());
                self.favorites.toggle(summary);
                true
            }
            KeyCode::Char('r') => {
                // Refetch in place; also the retry path after a failure
                pane.loading = true;
                pane.error = None;
                pane.scroll = 0;
                self.detail_gen += 1;
                self.detail_request = Some(DetailPlan {
                    movie_id: pane.summary.id,
                    generation: self.detail_gen,
                });
                true
            }
            _ => false,
        }
    }
}

/// Apply an editing key to a text box; true when the key changed or moved
/// anything
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.cursor_left();
            true
        }
        KeyCode::Right => {
            input.cursor_right();
            true
        }
        KeyCode::Home => {
            input.cursor_home();
            true
        }
        KeyCode::End => {
            input.cursor_end();
            true
        }
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
