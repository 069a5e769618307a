//! Color themes for the plot window.

use clap::ValueEnum;
use ratatui::style::Color;

/// Available UI themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    /// Gruvbox dark theme.
    #[default]
    Dark,
    /// Gruvbox light theme.
    Light,
}

impl Theme {
    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "Gruvbox Dark",
            Theme::Light => "Gruvbox Light",
        }
    }
}

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Background color.
    pub bg: Color,
    /// Primary text color, also used for axes and the `black` token.
    pub text: Color,
    /// Title color.
    pub heading: Color,
    /// Axis label color.
    pub label: Color,
    /// Border color.
    pub border: Color,
    /// Grid line color.
    pub grid: Color,
    /// Footer foreground color.
    pub status_fg: Color,
    /// Footer background color.
    pub status_bg: Color,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(40, 40, 40),
                text: Color::Rgb(235, 219, 178),
                heading: Color::Rgb(251, 184, 108),
                label: Color::Rgb(184, 187, 38),
                border: Color::Rgb(102, 92, 84),
                grid: Color::Rgb(80, 73, 69),
                status_fg: Color::Rgb(235, 219, 178),
                status_bg: Color::Rgb(60, 56, 54),
            },
            Theme::Light => Self {
                bg: Color::Rgb(251, 245, 234),
                text: Color::Rgb(60, 56, 54),
                heading: Color::Rgb(175, 58, 3),
                label: Color::Rgb(121, 116, 14),
                border: Color::Rgb(213, 196, 161),
                grid: Color::Rgb(235, 219, 178),
                status_fg: Color::Rgb(60, 56, 54),
                status_bg: Color::Rgb(235, 219, 178),
            },
        }
    }
}
