//! CLI - Command Line Interface for CineTUI
//!
//! Designed for automation and scripting.
//! Every browse action is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Search for movies
//! cinetui search "the batman" --json
//!
//! # Browse a genre
//! cinetui discover --genre "Science Fiction"
//! cinetui discover -g 878 --page 2
//!
//! # Look up one title
//! cinetui info 414906
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Title or genre not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// CineTUI - Terminal movie browser for TMDB
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "cinetui",
    version,
    about = "Terminal movie browser for TMDB",
    long_about = "A marquee-styled terminal interface for browsing popular movies, \
                  searching by title, and keeping a shortlist of favorites.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  cinetui                            Launch interactive TUI\n\
                  cinetui search \"blade runner\"      Search for movies\n\
                  cinetui discover -g 878            Popular science fiction\n\
                  cinetui genres --json              List genres as JSON\n\
                  cinetui info 414906                Details for one movie"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for movies by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Browse popular movies, optionally by genre
    #[command(visible_alias = "d")]
    Discover(DiscoverCmd),

    /// List all movie genres
    #[command(visible_alias = "g")]
    Genres(GenresCmd),

    /// Get details for one movie
    #[command(visible_alias = "i")]
    Info(InfoCmd),
}

// =============================================================================
// Search Command
// =============================================================================

/// Search for movies by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Result page to fetch
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Maximum number of results to show
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

// =============================================================================
// Discover Command
// =============================================================================

/// Browse popular movies, optionally narrowed to one genre
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    /// Genre to browse: numeric id (878) or name ("Science Fiction")
    #[arg(long, short = 'g')]
    pub genre: Option<String>,

    /// Result page to fetch
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Maximum number of results to show
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// How the user pointed at a genre on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreSelector {
    /// Numeric TMDB genre id
    Id(u32),
    /// Genre name, matched case-insensitively against the catalog list
    Name(String),
}

impl DiscoverCmd {
    /// Parse the genre argument, if one was given
    pub fn genre_selector(&self) -> Option<GenreSelector> {
        let raw = self.genre.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<u32>() {
            Ok(id) => Some(GenreSelector::Id(id)),
            Err(_) => Some(GenreSelector::Name(raw.to_string())),
        }
    }
}

// =============================================================================
// Genres Command
// =============================================================================

/// List all movie genres with their ids
#[derive(Args, Debug)]
pub struct GenresCmd {}

// =============================================================================
// Info Command
// =============================================================================

/// Get detailed information about one movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie id (e.g., 414906)
    #[arg(required = true)]
    pub id: u64,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            // For non-JSON, caller should handle formatting
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["cinetui", "search", "batman"]);
        assert!(cli.is_cli_mode());
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.query, "batman");
            assert_eq!(cmd.page, 1);
            assert_eq!(cmd.limit, 20);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_search_alias_and_page() {
        let cli = Cli::parse_from(["cinetui", "s", "dune", "-p", "3", "-l", "5"]);
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.query, "dune");
            assert_eq!(cmd.page, 3);
            assert_eq!(cmd.limit, 5);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["cinetui", "--json", "--quiet", "search", "test"]);
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_discover_genre_by_id() {
        let cli = Cli::parse_from(["cinetui", "discover", "-g", "878", "-p", "2"]);
        if let Some(Command::Discover(cmd)) = cli.command {
            assert_eq!(cmd.genre_selector(), Some(GenreSelector::Id(878)));
            assert_eq!(cmd.page, 2);
        } else {
            panic!("Expected Discover command");
        }
    }

    #[test]
    fn test_discover_genre_by_name() {
        let cli = Cli::parse_from(["cinetui", "d", "--genre", "Science Fiction"]);
        if let Some(Command::Discover(cmd)) = cli.command {
            assert_eq!(
                cmd.genre_selector(),
                Some(GenreSelector::Name("Science Fiction".to_string()))
            );
        } else {
            panic!("Expected Discover command");
        }
    }

    #[test]
    fn test_discover_without_genre() {
        let cli = Cli::parse_from(["cinetui", "discover"]);
        if let Some(Command::Discover(cmd)) = cli.command {
            assert_eq!(cmd.genre_selector(), None);
            assert_eq!(cmd.page, 1);
        } else {
            panic!("Expected Discover command");
        }
    }

    #[test]
    fn test_blank_genre_means_all() {
        let cmd = DiscoverCmd {
            genre: Some("   ".to_string()),
            page: 1,
            limit: 20,
        };
        assert_eq!(cmd.genre_selector(), None);
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["cinetui", "info", "414906"]);
        if let Some(Command::Info(cmd)) = cli.command {
            assert_eq!(cmd.id, 414906);
        } else {
            panic!("Expected Info command");
        }
    }

    #[test]
    fn test_genres_alias() {
        let cli = Cli::parse_from(["cinetui", "g"]);
        assert!(matches!(cli.command, Some(Command::Genres(_))));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
    }
}
