//! Favorites screen
//!
//! Filterable, sortable shortlist of starred movies with mark-and-remove
//! bulk editing.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, InputMode};
use crate::models::MovieSummary;
use crate::ui::Theme;

/// Render the favorites screen into `area`
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // filter box
            Constraint::Length(1), // sort + counts line
            Constraint::Min(0),    // list
        ])
        .split(area);

    render_filter_box(frame, chunks[0], app);
    render_sort_line(frame, chunks[1], app);
    render_list(frame, chunks[2], app);
}

fn render_filter_box(frame: &mut Frame, area: Rect, app: &App) {
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
        .title(Span::styled(" FILTER ", Theme::title()));

    let text = &app.favs.filter.text;
    let line = if editing {
        let cursor = app.favs.filter.cursor;
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
        Line::from(Span::styled("Press / to filter by title", Theme::dimmed()))
    } else {
        Line::from(Span::styled(text.clone(), Theme::text()))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_sort_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("Sort: ", Theme::dimmed()),
        Span::styled(app.favs.sort.label(), Theme::accent()),
        Span::styled("  │  ", Theme::dimmed()),
        Span::styled(counts_line(app), Theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// "3 favorites (2 marked)"
fn counts_line(app: &App) -> String {
    let total = app.favorites.len();
    let noun = if total == 1 { "favorite" } else { "favorites" };
    if app.favs.marked.is_empty() {
        format!("{} {}", total, noun)
    } else {
        format!("{} {} ({} marked)", total, noun, app.favs.marked.len())
    }
}

fn render_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let visible_height = area.height.saturating_sub(2) as usize;
    app.favs.list.scroll_into_view(visible_height);

    let view = app.favorites_view();
    let title = format!(
        " FAVORITES ({}/{}) ",
        if view.is_empty() { 0 } else { app.favs.list.selected + 1 },
        view.len()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()));

    if view.is_empty() {
        let empty = Paragraph::new(empty_message(app))
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let selected = app.favs.list.selected;
    let offset = app.favs.list.offset;
    let items: Vec<ListItem> = view
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(i, movie)| favorite_row(movie, i == selected, app.favs.marked.contains(&movie.id)))
        .collect();

    let list = List::new(items).block(block).style(Theme::text());
    frame.render_widget(list, area);
}

fn empty_message(app: &App) -> String {
    if app.favorites.is_empty() {
        "No favorites yet. Press Space on a movie to add it.".to_string()
    } else {
        format!("No favorites match \"{}\"", app.favs.filter.text.trim())
    }
}

/// Format: ▸ ✖ Title (Year)  ★ 7.8
fn favorite_row(movie: &MovieSummary, is_selected: bool, is_marked: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let mark = if is_marked { "✖ " } else { "  " };
    let year_str = movie.year().map(|y| format!(" ({})", y)).unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            marker.to_string(),
            if is_selected { Theme::accent() } else { Theme::dimmed() },
        ),
        Span::styled(mark.to_string(), Theme::marked()),
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

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
            release_date: Some("2021-10-22".to_string()),
            vote_average: Some(8.0),
            original_language: None,
            overview: None,
        }
    }

    #[test]
    fn test_counts_line_singular_plural() {
        let mut app = App::new();
        assert_eq!(counts_line(&app), "0 favorites");

        app.favorites.toggle(movie(1, "Dune"));
        assert_eq!(counts_line(&app), "1 favorite");

        app.favorites.toggle(movie(2, "The Batman"));
        assert_eq!(counts_line(&app), "2 favorites");

        app.favs.marked.insert(1);
        assert_eq!(counts_line(&app), "2 favorites (1 marked)");
    }

    #[test]
    fn test_empty_message_depends_on_cause() {
        let mut app = App::new();
        assert_eq!(
            empty_message(&app),
            "No favorites yet. Press Space on a movie to add it."
        );

        app.favorites.toggle(movie(1, "Dune"));
        app.favs.filter.text = "zzz".to_string();
        assert_eq!(empty_message(&app), "No favorites match \"zzz\"");
    }

    #[test]
    fn test_favorite_row_builds() {
        let _ = favorite_row(&movie(1, "Dune"), true, true);
        let _ = favorite_row(&movie(2, "The Batman"), false, false);
    }
}
