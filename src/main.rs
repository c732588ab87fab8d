//! CineTUI - Terminal movie browser for TMDB
//!
//! A marquee-lit terminal interface for discovering movies, searching the
//! catalog, and keeping a favorites shortlist. Simple. Fast. Warm popcorn.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinetui
//!
//! # CLI mode (for automation)
//! cinetui search "blade runner"
//! cinetui discover --genre "Science Fiction"
//! cinetui info 414906 --json
//! ```

use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedSender};

use cinetui::api::{TmdbClient, TmdbError};
use cinetui::app::{App, AppEvent, AppState, DetailOutcome, DetailPlan, InputMode};
use cinetui::cli::{Cli, Command, ExitCode, Output};
use cinetui::commands;
use cinetui::config::Config;
use cinetui::feed::{FetchKind, FetchOutcome, FetchPlan};
use cinetui::ui::{self, Theme};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui().await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &output).await,

        Some(Command::Discover(cmd)) => commands::discover_cmd(cmd, &output).await,

        Some(Command::Genres(cmd)) => commands::genres_cmd(cmd, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui() -> Result<()> {
    // Initialize terminal
    let mut terminal = init_terminal()?;

    // Create app state
    let mut app = App::new();

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, drains finished tasks, starts new ones,
/// renders the UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let mut config = Config::load();
    let mut api_key = config.get_tmdb_api_key();
    let mut client = TmdbClient::new(api_key.clone());
    let mut rotated_key = false;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    // The genre strip loads once at startup
    spawn_genres_fetch(client.clone(), tx.clone());

    while app.running {
        // Render current state
        terminal.draw(|frame| render_ui(frame, app))?;

        // Poll for events with timeout so the loop keeps ticking
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Drain finished async work
        while let Ok(app_event) = rx.try_recv() {
            // A rejected pool key gets one shot at the next one
            if !rotated_key {
                if let AppEvent::Genres(Err(TmdbError::ServerError(401))) = &app_event {
                    if let Some(next) = config.try_next_pool_key(&api_key) {
                        rotated_key = true;
                        api_key = next;
                        client = TmdbClient::new(api_key.clone());
                        spawn_genres_fetch(client.clone(), tx.clone());
                        app.feed.refresh();
                        continue;
                    }
                }
            }
            app.handle_event(app_event);
        }

        // Start the work this tick asked for
        if let Some(plan) = app.feed.take_fetch(Instant::now()) {
            spawn_feed_fetch(client.clone(), tx.clone(), plan);
        }
        if let Some(plan) = app.take_detail_fetch() {
            spawn_detail_fetch(client.clone(), tx.clone(), plan);
        }
    }

    Ok(())
}

// =============================================================================
// Async Tasks
// =============================================================================

fn spawn_genres_fetch(client: TmdbClient, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = client.genres().await;
        let _ = tx.send(AppEvent::Genres(result));
    });
}

fn spawn_feed_fetch(client: TmdbClient, tx: UnboundedSender<AppEvent>, plan: FetchPlan) {
    tokio::spawn(async move {
        let result = match &plan.kind {
            FetchKind::Search { query } => client.search(query, plan.page).await,
            FetchKind::Discover { genre_id } => client.discover(plan.page, *genre_id).await,
        };
        let _ = tx.send(AppEvent::Feed(FetchOutcome::for_plan(&plan, result)));
    });
}

fn spawn_detail_fetch(client: TmdbClient, tx: UnboundedSender<AppEvent>, plan: DetailPlan) {
    tokio::spawn(async move {
        let result = client.movie_details(plan.movie_id).await;
        let _ = tx.send(AppEvent::Detail(DetailOutcome {
            generation: plan.generation,
            result,
        }));
    });
}

// =============================================================================
// UI Rendering
// =============================================================================

/// Main render function - dispatches to screen-specific renderers
fn render_ui(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(ratatui::style::Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    match app.state {
        AppState::Browse => ui::browse::render(frame, chunks[1], app),
        AppState::Favorites => ui::favorites::render(frame, chunks[1], app),
        AppState::Detail => ui::detail::render(frame, chunks[1], app),
    }

    render_status_bar(frame, chunks[2], app);

    // Render error overlay if present
    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Render the header with logo and screen context
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(1),     // Context
        ])
        .split(area);

    // Logo
    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "CINE",
            ratatui::style::Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "TUI",
            ratatui::style::Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(ratatui::style::Style::default().fg(Theme::BORDER)),
    );
    frame.render_widget(logo, header_chunks[0]);

    let context = Paragraph::new(header_context(app))
        .style(Theme::text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(context, header_chunks[1]);
}

/// One-line summary of where the user is
fn header_context(app: &App) -> String {
    match app.state {
        AppState::Browse => {
            let count = app.feed.items().len();
            if app.feed.is_searching() {
                format!("Searching \"{}\"  —  {} movies", app.feed.query().trim(), count)
            } else {
                format!("Browsing {}  —  {} movies", app.current_genre_name(), count)
            }
        }
        AppState::Favorites => format!("Favorites  —  {} starred", app.favorites.len()),
        AppState::Detail => app
            .detail
            .as_ref()
            .map(|pane| pane.summary.title.clone())
            .unwrap_or_else(|| "Detail".to_string()),
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            ratatui::style::Style::default()
                .fg(Theme::BACKGROUND)
                .bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            ratatui::style::Style::default()
                .fg(Theme::BACKGROUND)
                .bg(Theme::ACCENT),
        ),
    };

    let state_indicator = Span::styled(
        format!(" {} ", format!("{:?}", app.state).to_uppercase()),
        ratatui::style::Style::default().fg(Theme::DIM),
    );

    let help = Span::styled(help_text(app.state), Theme::dimmed());

    let status_line = Line::from(vec![
        mode_indicator,
        state_indicator,
        Span::raw(" │ "),
        help,
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Keybinding hints for the current screen
fn help_text(state: AppState) -> &'static str {
    match state {
        AppState::Browse => {
            " q:quit  /:search  ←→:genre  ↵:details  Space:★  f:favorites  r:refresh "
        }
        AppState::Favorites => {
            " q:quit  /:filter  s:sort  x:mark  d:remove  C:clear  ↵:details  ESC:back "
        }
        AppState::Detail => " q:quit  Tab:panel  ↑↓:scroll  Space:★  r:reload  ESC:back ",
    }
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    // Calculate centered popup
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(ratatui::style::Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
