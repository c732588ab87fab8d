//! Late-night marquee theme for CineTUI
//!
//! Color palette and style helpers for the TUI: deep navy background,
//! marquee gold, neon poster accents.

use ratatui::style::{Color, Modifier, Style};

/// Marquee color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0d1017 (deep navy black)
    pub const BACKGROUND: Color = Color::Rgb(0x0d, 0x10, 0x17);

    /// Primary: #f5c518 (marquee gold)
    pub const PRIMARY: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Secondary: #6fc3df (projector blue)
    pub const SECONDARY: Color = Color::Rgb(0x6f, 0xc3, 0xdf);

    /// Accent: #ff9f43 (popcorn orange)
    pub const ACCENT: Color = Color::Rgb(0xff, 0x9f, 0x43);

    /// Highlight: #ff4d6d (neon rose)
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x4d, 0x6d);

    /// Text: #e6e1d3 (screen ivory)
    pub const TEXT: Color = Color::Rgb(0xe6, 0xe1, 0xd3);

    /// Dim: #4a5263 (house lights down)
    pub const DIM: Color = Color::Rgb(0x4a, 0x52, 0x63);

    /// Success: #3ddc84 (green)
    pub const SUCCESS: Color = Color::Rgb(0x3d, 0xdc, 0x84);

    /// Warning: #ffb347 (amber)
    pub const WARNING: Color = Color::Rgb(0xff, 0xb3, 0x47);

    /// Error: #ff5a5f (red)
    pub const ERROR: Color = Color::Rgb(0xff, 0x5a, 0x5f);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS (for UI elements)
    // ═══════════════════════════════════════════════════════════════════════

    /// Slightly lighter background for panels/cards
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x16, 0x1b, 0x26);

    /// Even lighter for hover states
    pub const BACKGROUND_HOVER: Color = Color::Rgb(0x1f, 0x26, 0x33);

    /// Border color (dim gold)
    pub const BORDER: Color = Color::Rgb(0x8a, 0x71, 0x1c);

    /// Border color when focused (full gold)
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted text (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style (neon rose, bold)
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Success style
    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Warning style
    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text style (projector blue)
    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Accent text style (popcorn orange)
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border (glowing effect)
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RATING STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Vote average 7.5 and up
    pub fn rating_high() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Vote average between 5 and 7.5
    pub fn rating_medium() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Vote average below 5
    pub fn rating_low() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Pick a style for a vote average
    pub fn rating(vote_average: Option<f32>) -> Style {
        match vote_average {
            Some(v) if v >= 7.5 => Self::rating_high(),
            Some(v) if v >= 5.0 => Self::rating_medium(),
            Some(_) => Self::rating_low(),
            None => Self::dimmed(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Style for list items (normal state)
    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Style for list items (selected/highlighted)
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Style for input cursor
    pub fn input_cursor() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::PRIMARY)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Genre strip tab (inactive)
    pub fn genre_tab() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Genre strip tab (active)
    pub fn genre_tab_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Favorite marker (the star)
    pub fn favorite() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Marked-for-removal indicator on the favorites screen
    pub fn marked() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Genre tags
    pub fn genre() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Runtime text
    pub fn duration() -> Style {
        Style::default().fg(Self::DIM)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
/// WCAG AA requires >= 4.5:1 for normal text, >= 3:1 for large text
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
