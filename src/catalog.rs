//! Style catalogs.
//!
//! Fixed tables mapping menu indices `1..=10` to plot types, colors, line
//! styles and markers. The tables are process-wide constants.

use crate::error::{PlotError, Result};
use std::fmt;

const PLOT_TYPES: [(i64, &str); 10] = [
    (1, "line"),
    (2, "scatter"),
    (3, "bar"),
    (4, "histogram"),
    (5, "pie"),
    (6, "area"),
    (7, "box"),
    (8, "violin"),
    (9, "step"),
    (10, "hexbin"),
];

const COLORS: [(i64, &str); 10] = [
    (1, "red"),
    (2, "blue"),
    (3, "green"),
    (4, "orange"),
    (5, "purple"),
    (6, "pink"),
    (7, "yellow"),
    (8, "cyan"),
    (9, "magenta"),
    (10, "black"),
];

// 1 and 6 are both "-", and 7..=10 spell out 1..=4 by name.
const LINE_STYLES: [(i64, &str); 10] = [
    (1, "-"),
    (2, "--"),
    (3, "-."),
    (4, ":"),
    (5, "--."),
    (6, "-"),
    (7, "solid"),
    (8, "dashed"),
    (9, "dashdot"),
    (10, "dotted"),
];

const MARKERS: [(i64, &str); 10] = [
    (1, "o"),
    (2, "s"),
    (3, "^"),
    (4, "d"),
    (5, "p"),
    (6, "x"),
    (7, "v"),
    (8, "*"),
    (9, "<"),
    (10, ">"),
];

/// One of the fixed lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    /// Chart kinds.
    PlotType,
    /// Named series colors.
    Color,
    /// Line dash styles.
    LineStyle,
    /// Point markers.
    Marker,
}

impl Catalog {
    /// Entries in index order.
    pub fn entries(self) -> &'static [(i64, &'static str)] {
        match self {
            Self::PlotType => &PLOT_TYPES,
            Self::Color => &COLORS,
            Self::LineStyle => &LINE_STYLES,
            Self::Marker => &MARKERS,
        }
    }

    /// Human readable catalog name.
    pub fn name(self) -> &'static str {
        match self {
            Self::PlotType => "plot type",
            Self::Color => "color",
            Self::LineStyle => "line style",
            Self::Marker => "marker",
        }
    }

    /// Menu lines shown before a choice, `<index>: <token>`.
    pub fn menu(self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|(index, token)| format!("{}: {}", index, token))
            .collect()
    }

    /// Whether `index` is a key of this catalog.
    pub fn contains(self, index: i64) -> bool {
        self.entries().iter().any(|(key, _)| *key == index)
    }

    /// Parse an operator response as an index and resolve it.
    pub fn select(self, input: &str) -> Result<&'static str> {
        let index = input
            .trim()
            .parse::<i64>()
            .map_err(|_| PlotError::invalid_selection(self.name(), input.trim()))?;
        resolve(self, index)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the token stored under `index`.
pub fn resolve(catalog: Catalog, index: i64) -> Result<&'static str> {
    catalog
        .entries()
        .iter()
        .find(|(key, _)| *key == index)
        .map(|(_, token)| *token)
        .ok_or_else(|| PlotError::invalid_selection(catalog.name(), index.to_string()))
}

/// The closed set of chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotType {
    /// Connected line per series.
    Line,
    /// Unconnected points per series.
    Scatter,
    /// Grouped bars.
    Bar,
    /// Value distribution per series.
    Histogram,
    /// Proportional wedges.
    Pie,
    /// Filled region under each series.
    Area,
    /// Box-and-whisker per series.
    Box,
    /// Density outline per series.
    Violin,
    /// Stair-step line per series.
    Step,
    /// Hexagonal density of X against the first series.
    Hexbin,
}

impl PlotType {
    /// Every plot type, in catalog order.
    pub const ALL: [PlotType; 10] = [
        Self::Line,
        Self::Scatter,
        Self::Bar,
        Self::Histogram,
        Self::Pie,
        Self::Area,
        Self::Box,
        Self::Violin,
        Self::Step,
        Self::Hexbin,
    ];

    /// Map a catalog token to its plot type.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }

    /// Catalog token for this plot type.
    pub fn token(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Bar => "bar",
            Self::Histogram => "histogram",
            Self::Pie => "pie",
            Self::Area => "area",
            Self::Box => "box",
            Self::Violin => "violin",
            Self::Step => "step",
            Self::Hexbin => "hexbin",
        }
    }

    /// Resolve a menu response straight to a plot type.
    pub fn select(input: &str) -> Result<Self> {
        let token = Catalog::PlotType.select(input)?;
        Self::from_token(token)
            .ok_or_else(|| PlotError::invalid_selection(Catalog::PlotType.name(), token))
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOGS: [Catalog; 4] = [
        Catalog::PlotType,
        Catalog::Color,
        Catalog::LineStyle,
        Catalog::Marker,
    ];

    #[test]
    fn every_catalog_covers_one_to_ten() {
        for catalog in CATALOGS {
            for index in 1..=10 {
                assert!(resolve(catalog, index).is_ok(), "{catalog} {index}");
            }
            for index in [-1, 0, 11, 100] {
                let err = resolve(catalog, index).unwrap_err();
                assert!(matches!(err, PlotError::InvalidSelection { .. }));
            }
        }
    }

    #[test]
    fn resolve_is_pure() {
        for catalog in CATALOGS {
            for index in 1..=10 {
                assert_eq!(resolve(catalog, index).unwrap(), resolve(catalog, index).unwrap());
            }
        }
    }

    #[test]
    fn line_style_duplicates_are_kept() {
        assert_eq!(resolve(Catalog::LineStyle, 1).unwrap(), "-");
        assert_eq!(resolve(Catalog::LineStyle, 6).unwrap(), "-");
        assert_eq!(resolve(Catalog::LineStyle, 8).unwrap(), "dashed");
    }

    #[test]
    fn select_rejects_non_numeric_input() {
        assert!(Catalog::Color.select("red").is_err());
        assert!(Catalog::Color.select("").is_err());
        assert_eq!(Catalog::Color.select(" 2 ").unwrap(), "blue");
    }

    #[test]
    fn plot_type_tokens_round_trip_catalog() {
        for (index, token) in Catalog::PlotType.entries() {
            let kind = PlotType::from_token(token).unwrap();
            assert_eq!(kind.token(), *token);
            assert_eq!(PlotType::select(&index.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn menu_lists_entries_in_order() {
        let menu = Catalog::Marker.menu();
        assert_eq!(menu.len(), 10);
        assert_eq!(menu[0], "1: o");
        assert_eq!(menu[9], "10: >");
    }
}
