//! Draw calls and figure directives.
//!
//! The `Display` impls produce the one-line-per-call format written by the
//! transcript renderer.

use std::fmt;

/// X/Y data with the per-series color and label.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// X positions.
    pub x: Vec<f64>,
    /// Y values.
    pub y: Vec<f64>,
    /// Color token.
    pub color: &'static str,
    /// Legend label.
    pub label: String,
}

impl Trace {
    /// (x, y) pairs.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// One typed drawing request.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// Connected line with a dash style and point markers.
    Line {
        /// Data, color and label.
        trace: Trace,
        /// Line style token.
        line_style: &'static str,
        /// Marker token.
        marker: &'static str,
    },
    /// Unconnected points.
    Scatter(Trace),
    /// Bars of `width` centred on `trace.x`.
    Bar {
        /// Bar positions, heights, color and label.
        trace: Trace,
        /// Bar width in X units.
        width: f64,
    },
    /// Distribution of `values` over equal-width bins.
    Histogram {
        /// Samples.
        values: Vec<f64>,
        /// Number of bins.
        bins: usize,
        /// Opacity, 0 to 1.
        alpha: f64,
        /// Color token.
        color: &'static str,
        /// Legend label.
        label: String,
    },
    /// Wedges proportional to `values`.
    Pie {
        /// Wedge sizes.
        values: Vec<f64>,
        /// Slice labels, applied in order.
        labels: Vec<String>,
        /// printf-style percentage format.
        autopct: &'static str,
    },
    /// Region between zero and the trace.
    Area {
        /// Data, color and label.
        trace: Trace,
        /// Opacity, 0 to 1.
        alpha: f64,
    },
    /// One box per group.
    Box {
        /// Sample groups.
        groups: Vec<Vec<f64>>,
        /// Category labels, one per group.
        labels: Vec<String>,
    },
    /// One violin per group, unlabelled.
    Violin {
        /// Sample groups.
        groups: Vec<Vec<f64>>,
        /// Whether to mark group means.
        show_means: bool,
    },
    /// Stair line with each step centred on its X value.
    Step {
        /// Data, color and label.
        trace: Trace,
        /// Line style token.
        line_style: &'static str,
        /// Marker token.
        marker: &'static str,
    },
    /// Hexagonal binning of (x, y) counts.
    Hexbin {
        /// X samples.
        x: Vec<f64>,
        /// Y samples.
        y: Vec<f64>,
        /// Hexagons across the X range.
        grid_size: usize,
        /// Color map name for counts.
        colormap: &'static str,
    },
}

impl DrawCall {
    /// Short kind name, as used in the transcript.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Scatter(_) => "scatter",
            Self::Bar { .. } => "bar",
            Self::Histogram { .. } => "histogram",
            Self::Pie { .. } => "pie",
            Self::Area { .. } => "area",
            Self::Box { .. } => "box",
            Self::Violin { .. } => "violin",
            Self::Step { .. } => "step",
            Self::Hexbin { .. } => "hexbin",
        }
    }

    /// Legend entry for calls that carry a label.
    pub fn legend_entry(&self) -> Option<(&str, &'static str)> {
        match self {
            Self::Line { trace, .. }
            | Self::Scatter(trace)
            | Self::Bar { trace, .. }
            | Self::Area { trace, .. }
            | Self::Step { trace, .. } => Some((trace.label.as_str(), trace.color)),
            Self::Histogram { label, color, .. } => Some((label.as_str(), *color)),
            _ => None,
        }
    }
}

/// Figure-wide setting applied after (or between) draw calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Figure title.
    Title(String),
    /// X axis label.
    XLabel(String),
    /// Y axis label.
    YLabel(String),
    /// Show a legend of labelled calls.
    Legend,
    /// Draw a background grid.
    Grid,
    /// Use equal scaling on both axes.
    EqualAspect,
    /// Show a color scale for count-mapped calls.
    Colorbar(String),
}

fn list(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn groups(groups: &[Vec<f64>]) -> String {
    let parts: Vec<String> = groups.iter().map(|g| list(g)).collect();
    format!("[{}]", parts.join(", "))
}

impl fmt::Display for DrawCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        match self {
            Self::Line {
                trace,
                line_style,
                marker,
            }
            | Self::Step {
                trace,
                line_style,
                marker,
            } => {
                write!(
                    f,
                    " x={} y={} color={} label={:?} linestyle={} marker={}",
                    list(&trace.x),
                    list(&trace.y),
                    trace.color,
                    trace.label,
                    line_style,
                    marker
                )?;
                if matches!(self, Self::Step { .. }) {
                    write!(f, " where=mid")?;
                }
                Ok(())
            }
            Self::Scatter(trace) => write!(
                f,
                " x={} y={} color={} label={:?}",
                list(&trace.x),
                list(&trace.y),
                trace.color,
                trace.label
            ),
            Self::Bar { trace, width } => write!(
                f,
                " x={} height={} width={} color={} label={:?}",
                list(&trace.x),
                list(&trace.y),
                width,
                trace.color,
                trace.label
            ),
            Self::Histogram {
                values,
                bins,
                alpha,
                color,
                label,
            } => write!(
                f,
                " values={} bins={} alpha={} color={} label={:?}",
                list(values),
                bins,
                alpha,
                color,
                label
            ),
            Self::Pie {
                values,
                labels,
                autopct,
            } => write!(
                f,
                " values={} labels={:?} autopct={}",
                list(values),
                labels,
                autopct
            ),
            Self::Area { trace, alpha } => write!(
                f,
                " x={} y={} alpha={} color={} label={:?}",
                list(&trace.x),
                list(&trace.y),
                alpha,
                trace.color,
                trace.label
            ),
            Self::Box { groups: data, labels } => {
                write!(f, " groups={} labels={:?}", groups(data), labels)
            }
            Self::Violin {
                groups: data,
                show_means,
            } => write!(f, " groups={} showmeans={}", groups(data), show_means),
            Self::Hexbin {
                x,
                y,
                grid_size,
                colormap,
            } => write!(
                f,
                " x={} y={} gridsize={} cmap={}",
                list(x),
                list(y),
                grid_size,
                colormap
            ),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(text) => write!(f, "title {:?}", text),
            Self::XLabel(text) => write!(f, "xlabel {:?}", text),
            Self::YLabel(text) => write!(f, "ylabel {:?}", text),
            Self::Legend => write!(f, "legend"),
            Self::Grid => write!(f, "grid"),
            Self::EqualAspect => write!(f, "axis equal"),
            Self::Colorbar(label) => write!(f, "colorbar label={:?}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace() -> Trace {
        Trace {
            x: vec![1.0, 2.0, 3.0],
            y: vec![10.0, 20.0, 30.5],
            color: "red",
            label: "A".to_string(),
        }
    }

    #[test]
    fn line_transcript_format() {
        let call = DrawCall::Line {
            trace: trace(),
            line_style: "--",
            marker: "o",
        };
        assert_eq!(
            call.to_string(),
            "line x=[1, 2, 3] y=[10, 20, 30.5] color=red label=\"A\" linestyle=-- marker=o"
        );
    }

    #[test]
    fn step_marks_mid_placement() {
        let call = DrawCall::Step {
            trace: trace(),
            line_style: "-",
            marker: "x",
        };
        assert!(call.to_string().starts_with("step x=[1, 2, 3]"));
        assert!(call.to_string().ends_with("where=mid"));
    }

    #[test]
    fn legend_entries_only_for_labelled_calls() {
        assert_eq!(
            DrawCall::Scatter(trace()).legend_entry(),
            Some(("A", "red"))
        );
        let boxes = DrawCall::Box {
            groups: vec![vec![1.0]],
            labels: vec!["A".into()],
        };
        assert_eq!(boxes.legend_entry(), None);
    }

    #[test]
    fn directive_transcript_format() {
        assert_eq!(Directive::Title("T".into()).to_string(), "title \"T\"");
        assert_eq!(Directive::EqualAspect.to_string(), "axis equal");
        assert_eq!(
            Directive::Colorbar("Counts".into()).to_string(),
            "colorbar label=\"Counts\""
        );
    }
}
