//! Browse screen
//!
//! Search box, genre strip, and the movie list fed by the discovery feed.
//! Marquee aesthetic with keyboard navigation.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, InputMode};
use crate::models::MovieSummary;
use crate::ui::Theme;

/// Render the browse screen into `area`
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let banner_height = if app.feed.error().is_some() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // search box
            Constraint::Length(1),             // genre strip
            Constraint::Length(banner_height), // error banner
            Constraint::Min(0),                // movie list
        ])
        .split(area);

    render_search_box(frame, chunks[0], app);
    render_genre_strip(frame, chunks[1], app);
    if let Some(message) = app.feed.error() {
        render_error_banner(frame, chunks[2], message);
    }
    render_movie_list(frame, chunks[3], app);
}

/// Search input with a block cursor while editing
fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let border_style = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(" SEARCH ", Theme::title()));

    let text = &app.search.text;
    let line = if editing {
        let cursor = app.search.cursor;
        let (before, rest) = text.split_at(cursor);
        let mut chars = rest.chars();
        let under = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = chars.collect();
        Line::from(vec![
            Span::styled(before.to_string(), Theme::input()),
            Span::styled(under, Theme::input_cursor()),
            Span::styled(after, Theme::input()),
        ])
    } else if text.is_empty() {
        Line::from(Span::styled("Press / to search", Theme::dimmed()))
    } else {
        Line::from(Span::styled(text.clone(), Theme::text()))
    };

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

/// One-line genre strip: All │ Action │ Comedy │ ...
fn render_genre_strip(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    for (i, name) in genre_names(app).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Theme::dimmed()));
        }
        let style = if i == app.browse.genre_idx {
            Theme::genre_tab_selected()
        } else {
            Theme::genre_tab()
        };
        spans.push(Span::styled(format!(" {} ", name), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn genre_names(app: &App) -> Vec<String> {
    let mut names = vec!["All".to_string()];
    names.extend(app.genres.iter().map(|g| g.name.clone()));
    names
}

fn render_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(" ⚠ ", Theme::error()),
        Span::styled(message.to_string(), Theme::error()),
    ]));
    frame.render_widget(banner, area);
}

fn render_movie_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let visible_height = area.height.saturating_sub(2) as usize;
    app.browse.list.scroll_into_view(visible_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(list_title(app), Theme::title()))
        .title_alignment(Alignment::Left);

    if app.feed.items().is_empty() {
        let (message, style) = if app.feed.is_loading() {
            ("Loading...".to_string(), Theme::loading())
        } else {
            (empty_message(app.feed.is_searching(), app.feed.query()), Theme::dimmed())
        };
        let empty = Paragraph::new(message)
            .style(style)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let selected = app.browse.list.selected;
    let offset = app.browse.list.offset;
    let items: Vec<ListItem> = app
        .feed
        .items()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(i, movie)| movie_row(movie, i == selected, app.favorites.is_favorite(movie.id)))
        .collect();

    let list = List::new(items).block(block).style(Theme::text());
    frame.render_widget(list, area);
}

/// List border title with cursor position and paging
fn list_title(app: &App) -> String {
    let len = app.feed.items().len();
    let position = if len == 0 { 0 } else { app.browse.list.selected + 1 };
    let loading = if app.feed.is_loading() { " …" } else { "" };
    format!(
        " MOVIES ({}/{})  page {}/{}{} ",
        position,
        len,
        app.feed.page(),
        app.feed.total_pages(),
        loading
    )
}

/// Message for a settled, empty feed
fn empty_message(searching: bool, query: &str) -> String {
    if searching {
        format!("No results for \"{}\"", query.trim())
    } else {
        "No movies found".to_string()
    }
}

/// Format: ▸ ★ Title (Year)  ★ 7.8
fn movie_row(movie: &MovieSummary, is_selected: bool, is_favorite: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let star = if is_favorite { "★ " } else { "  " };
    let year_str = movie.year().map(|y| format!(" ({})", y)).unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            marker.to_string(),
            if is_selected { Theme::accent() } else { Theme::dimmed() },
        ),
        Span::styled(star.to_string(), Theme::favorite()),
        Span::styled(
            movie.title.clone(),
            if is_selected { Theme::list_item_selected() } else { Theme::text() },
        ),
        Span::styled(
            year_str,
            if is_selected { Theme::accent() } else { Theme::year() },
        ),
        Span::raw(" "),
        Span::styled(
            format!("★ {}", movie.rating_label()),
            if is_selected { Theme::accent() } else { Theme::rating(movie.vote_average) },
        ),
    ]);

    ListItem::new(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::feed::FetchOutcome;
    use crate::models::{Genre, MoviePage};
    use std::time::Instant;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
            release_date: Some("2022-03-01".to_string()),
            vote_average: Some(7.8),
            original_language: None,
            overview: None,
        }
    }

    fn seeded_app() -> App {
        let mut app = App::new();
        let plan = app.feed.take_fetch(Instant::now()).unwrap();
        app.handle_event(AppEvent::Feed(FetchOutcome::for_plan(
            &plan,
            Ok(MoviePage {
                movies: vec![movie(1, "The Batman"), movie(2, "Dune")],
                total_pages: 4,
            }),
        )));
        app
    }

    #[test]
    fn test_list_title_shows_position_and_paging() {
        let app = seeded_app();
        assert_eq!(list_title(&app), " MOVIES (1/2)  page 1/4 ");
    }

    #[test]
    fn test_list_title_marks_loading() {
        let mut app = seeded_app();
        app.feed.refresh();
        let _ = app.feed.take_fetch(Instant::now());
        assert!(list_title(&app).contains('…'));
    }

    #[test]
    fn test_list_title_empty_feed() {
        let app = App::new();
        assert!(list_title(&app).starts_with(" MOVIES (0/0)"));
    }

    #[test]
    fn test_empty_message_search_vs_browse() {
        assert_eq!(empty_message(true, "zzzz"), "No results for \"zzzz\"");
        assert_eq!(empty_message(false, ""), "No movies found");
    }

    #[test]
    fn test_genre_names_start_with_all() {
        let mut app = App::new();
        app.genres = vec![
            Genre { id: 28, name: "Action".to_string() },
            Genre { id: 35, name: "Comedy".to_string() },
        ];
        assert_eq!(genre_names(&app), vec!["All", "Action", "Comedy"]);
    }

    #[test]
    fn test_genre_names_without_catalog() {
        let app = App::new();
        assert_eq!(genre_names(&app), vec!["All"]);
    }

    #[test]
    fn test_movie_row_builds() {
        // Smoke test: row assembly shouldn't panic on sparse data
        let sparse = MovieSummary {
            id: 9,
            title: "Untitled".to_string(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            original_language: None,
            overview: None,
        };
        let _ = movie_row(&sparse, true, true);
        let _ = movie_row(&movie(1, "Dune"), false, false);
    }
}
