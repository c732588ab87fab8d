//! Detail screen for one movie
//!
//! Info panel with overview and facts, plus cast and video panels.
//! Tab moves focus between panels; the focused panel scrolls.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, DetailFocus, DetailPane};
use crate::models::{format_money, CastMember, MovieDetails, Video};
use crate::ui::Theme;

/// Render the detail screen into `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(pane) = &app.detail else {
        render_message(frame, area, "No movie selected", Theme::dimmed());
        return;
    };

    if pane.loading {
        render_message(frame, area, "Loading details...", Theme::loading());
        return;
    }
    if let Some(message) = &pane.error {
        render_message(frame, area, message, Theme::error());
        return;
    }
    let Some(details) = &pane.details else {
        render_message(frame, area, "No details available", Theme::dimmed());
        return;
    };

    // Info on the left, cast and videos stacked on the right
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_info_panel(frame, h_chunks[0], pane, details, app);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(h_chunks[1]);

    render_cast_panel(frame, v_chunks[0], pane, details);
    render_videos_panel(frame, v_chunks[1], pane, details);
}

/// Centered single-message state (loading, failure, nothing selected)
fn render_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" DETAIL ", Theme::title()));

    let paragraph = Paragraph::new(message.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(paragraph, area);
}

fn panel_border(pane: &DetailPane, panel: DetailFocus) -> Style {
    if pane.focus == panel {
        Theme::border_focused()
    } else {
        Theme::border()
    }
}

/// Title, meta line, facts, and the overview
fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    pane: &DetailPane,
    details: &MovieDetails,
    app: &App,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(panel_border(pane, DetailFocus::Info))
        .title(Span::styled(" INFO ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    // Title line
    let year_str = details.year().map(|y| format!(" ({})", y)).unwrap_or_default();
    let star = if app.favorites.is_favorite(details.id) { " ★" } else { "" };
    lines.push(Line::from(vec![
        Span::styled("▶ ", Theme::accent()),
        Span::styled(details.title.clone(), Theme::title()),
        Span::styled(year_str, Theme::secondary()),
        Span::styled(star.to_string(), Theme::favorite()),
    ]));

    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(Span::styled(
            tagline.to_string(),
            Theme::secondary().add_modifier(Modifier::ITALIC),
        )));
    }

    // Rating, runtime, status
    let mut meta_spans = vec![Span::styled(
        format!("★ {}", details.rating_label()),
        Theme::rating(details.vote_average),
    )];
    let runtime = details.runtime_text();
    if !runtime.is_empty() {
        meta_spans.push(Span::styled(" │ ", Theme::dimmed()));
        meta_spans.push(Span::styled(runtime, Theme::secondary()));
    }
    if let Some(status) = details.status.as_deref().filter(|s| !s.is_empty()) {
        meta_spans.push(Span::styled(" │ ", Theme::dimmed()));
        meta_spans.push(Span::styled(status.to_string(), Theme::secondary()));
    }
    lines.push(Line::from(meta_spans));

    let genres = details.genres_line();
    if !genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genre: ", Theme::dimmed()),
            Span::styled(genres, Theme::text()),
        ]));
    }

    lines.push(separator(inner.width));

    // Facts grid
    lines.push(fact_line("Budget", money_text(details.budget)));
    lines.push(fact_line("Revenue", money_text(details.revenue)));
    lines.push(fact_line("Popularity", popularity_text(details.popularity)));
    lines.push(fact_line("Language", language_text(details.original_language.as_deref())));
    if let Some(homepage) = details.homepage.as_deref().filter(|h| !h.is_empty()) {
        lines.push(fact_line("Homepage", homepage.to_string()));
    }

    lines.push(separator(inner.width));

    // Overview
    lines.push(Line::from(Span::styled("OVERVIEW", Theme::accent())));
    lines.push(Line::from(""));
    for line in overview_text(details).lines() {
        lines.push(Line::from(Span::styled(line.to_string(), Theme::text())));
    }

    let scroll = if pane.focus == DetailFocus::Info { pane.scroll } else { 0 };
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, inner);
}

fn render_cast_panel(frame: &mut Frame, area: Rect, pane: &DetailPane, details: &MovieDetails) {
    let title = format!(" CAST ({}) ", details.cast.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(panel_border(pane, DetailFocus::Cast))
        .title(Span::styled(title, Theme::title()));

    if details.cast.is_empty() {
        let empty = Paragraph::new("No cast information")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let offset = if pane.focus == DetailFocus::Cast { pane.scroll as usize } else { 0 };

    let items: Vec<ListItem> = details
        .cast
        .iter()
        .skip(offset)
        .take(visible_height)
        .map(cast_row)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_videos_panel(frame: &mut Frame, area: Rect, pane: &DetailPane, details: &MovieDetails) {
    let title = format!(" VIDEOS ({}) ", details.videos.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(panel_border(pane, DetailFocus::Videos))
        .title(Span::styled(title, Theme::title()));

    if details.videos.is_empty() {
        let empty = Paragraph::new("No videos")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let trailer_key = details.trailer().map(|v| v.key.clone());
    let visible_height = area.height.saturating_sub(2) as usize;
    let offset = if pane.focus == DetailFocus::Videos { pane.scroll as usize } else { 0 };

    let items: Vec<ListItem> = details
        .videos
        .iter()
        .skip(offset)
        .take(visible_height)
        .map(|video| video_row(video, trailer_key.as_deref() == Some(video.key.as_str())))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn separator(width: u16) -> Line<'static> {
    Line::from(Span::styled("─".repeat(width as usize), Theme::dimmed()))
}

fn fact_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Theme::dimmed()),
        Span::styled(value, Theme::text()),
    ])
}

/// "$185,000,000", or a dash when unknown or zero
fn money_text(value: Option<u64>) -> String {
    match value {
        Some(v) if v > 0 => format_money(v),
        _ => "—".to_string(),
    }
}

fn popularity_text(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "—".to_string(),
    }
}

fn language_text(code: Option<&str>) -> String {
    match code {
        Some(c) if !c.is_empty() => c.to_uppercase(),
        _ => "—".to_string(),
    }
}

fn overview_text(details: &MovieDetails) -> &str {
    details
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .unwrap_or("No overview available.")
}

/// Format: [RP] Robert Pattinson as Bruce Wayne
fn cast_row(member: &CastMember) -> ListItem<'static> {
    let line = Line::from(vec![
        Span::styled(format!("[{:<2}] ", member.initials()), Theme::secondary()),
        Span::styled(member.to_string(), Theme::text()),
    ]);
    ListItem::new(line)
}

/// Format: ▶ Official Trailer (YouTube)  — the picked trailer gets a badge
fn video_row(video: &Video, is_trailer: bool) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled("▶ ", if is_trailer { Theme::accent() } else { Theme::dimmed() }),
        Span::styled(
            video.name.clone(),
            if is_trailer { Theme::accent() } else { Theme::text() },
        ),
        Span::styled(format!(" ({})", video.site), Theme::dimmed()),
    ];
    if is_trailer {
        spans.push(Span::styled(" TRAILER", Theme::favorite()));
    }
    ListItem::new(Line::from(spans))
}
