//! Color, dash and marker mapping for terminal output.

use ratatui::style::Color;

/// Colors cycled through for unlabelled multi-part calls (pie wedges,
/// boxes, violins).
pub const CYCLE: [&str; 10] = [
    "blue", "orange", "green", "red", "purple", "pink", "cyan", "magenta", "yellow", "black",
];

/// Terminal color for a catalog color token. Unknown tokens map to white.
pub fn color(token: &str) -> Color {
    match token {
        "red" => Color::Rgb(214, 39, 40),
        "blue" => Color::Rgb(31, 119, 180),
        "green" => Color::Rgb(44, 160, 44),
        "orange" => Color::Rgb(255, 165, 0),
        "purple" => Color::Rgb(128, 0, 128),
        "pink" => Color::Rgb(255, 192, 203),
        "yellow" => Color::Rgb(255, 215, 0),
        "cyan" => Color::Rgb(0, 191, 191),
        "magenta" => Color::Rgb(191, 0, 191),
        "black" => Color::Rgb(0, 0, 0),
        _ => Color::White,
    }
}

/// Color of the `index`th entry of [`CYCLE`], wrapping around.
pub fn cycle_color(index: usize) -> &'static str {
    CYCLE[index % CYCLE.len()]
}

/// Mix `color` over `background` with opacity `alpha`. Non-RGB colors are
/// returned unchanged.
pub fn blend(color: Color, background: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |c: u8, base: u8| {
                (c as f64 * alpha + base as f64 * (1.0 - alpha)).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ => color,
    }
}

/// Sequential white-to-blue colormap, `t` in `[0, 1]`.
pub fn blues(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    // Piecewise linear through light blue at the midpoint
    let (r, g, b) = if t < 0.5 {
        let s = t * 2.0;
        (
            247.0 + s * (107.0 - 247.0),
            251.0 + s * (174.0 - 251.0),
            255.0 + s * (214.0 - 255.0),
        )
    } else {
        let s = (t - 0.5) * 2.0;
        (
            107.0 + s * (8.0 - 107.0),
            174.0 + s * (48.0 - 174.0),
            214.0 + s * (107.0 - 214.0),
        )
    };
    Color::Rgb(r as u8, g as u8, b as u8)
}

/// Look up a colormap by name.
pub fn colormap(name: &str) -> Option<fn(f64) -> Color> {
    match name {
        "Blues" => Some(blues as fn(f64) -> Color),
        _ => None,
    }
}

/// Dash pattern of a line style token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    /// Continuous.
    Solid,
    /// Long dashes.
    Dashed,
    /// Alternating dash and dot.
    DashDot,
    /// Dots.
    Dotted,
}

impl Dash {
    /// Classify a line style token. `--.` draws as dash-dot.
    pub fn from_token(token: &str) -> Self {
        match token {
            "--" | "dashed" => Self::Dashed,
            "-." | "--." | "dashdot" => Self::DashDot,
            ":" | "dotted" => Self::Dotted,
            _ => Self::Solid,
        }
    }

    /// Whether the segment numbered `index` along a polyline is drawn.
    pub fn keeps(self, index: usize) -> bool {
        match self {
            Self::Solid => true,
            Self::Dashed => index % 4 < 3,
            Self::DashDot => matches!(index % 6, 0 | 1 | 2 | 4),
            Self::Dotted => index % 2 == 0,
        }
    }
}

/// Glyph printed for a marker token.
pub fn marker_glyph(token: &str) -> &'static str {
    match token {
        "o" => "o",
        "s" => "■",
        "^" => "▲",
        "d" => "◆",
        "p" => "⬟",
        "x" => "x",
        "v" => "▼",
        "*" => "*",
        "<" => "◀",
        ">" => "▶",
        _ => "•",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn every_catalog_color_is_mapped() {
        for (_, token) in Catalog::Color.entries() {
            assert_ne!(color(token), Color::White, "{token} unmapped");
        }
    }

    #[test]
    fn every_catalog_marker_has_a_glyph() {
        for (_, token) in Catalog::Marker.entries() {
            assert_ne!(marker_glyph(token), "•", "{token} unmapped");
        }
    }

    #[test]
    fn line_style_aliases_share_a_dash() {
        assert_eq!(Dash::from_token("-"), Dash::Solid);
        assert_eq!(Dash::from_token("solid"), Dash::Solid);
        assert_eq!(Dash::from_token("--"), Dash::from_token("dashed"));
        assert_eq!(Dash::from_token("--."), Dash::DashDot);
        assert_eq!(Dash::from_token(":"), Dash::Dotted);
    }

    #[test]
    fn blues_darkens_with_count() {
        let Color::Rgb(_, _, light) = blues(0.0) else {
            panic!("expected rgb");
        };
        let Color::Rgb(_, _, dark) = blues(1.0) else {
            panic!("expected rgb");
        };
        assert!(light > dark);
        assert_eq!(blues(-1.0), blues(0.0));
    }

    #[test]
    fn blend_halfway_to_background() {
        let mixed = blend(Color::Rgb(200, 0, 100), Color::Rgb(0, 0, 0), 0.5);
        assert_eq!(mixed, Color::Rgb(100, 0, 50));
        assert_eq!(blend(Color::Red, Color::Rgb(0, 0, 0), 0.5), Color::Red);
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(cycle_color(0), cycle_color(CYCLE.len()));
    }
}
