//! Terminal UI components
//!
//! Built with ratatui for a late-night marquee aesthetic.
//! Keyboard-first navigation throughout.

pub mod theme;
pub mod browse;
pub mod favorites;
pub mod detail;

pub use theme::Theme;
