//! In-memory figure.
//!
//! A [`Figure`] records draw calls and directives as they arrive. It is the
//! renderer used in tests and the model the terminal renderer paints.

use super::call::{Directive, DrawCall};
use super::geometry::{histogram, Bounds};
use super::Renderer;
use crate::error::Result;

/// Margin added around the data extent, as a fraction of the span.
const MARGIN: f64 = 0.05;

/// Recorded draw calls plus figure-wide settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    calls: Vec<DrawCall>,
    title: String,
    x_label: String,
    y_label: String,
    legend: bool,
    grid: bool,
    equal_aspect: bool,
    colorbar: Option<String>,
    shown: bool,
}

impl Figure {
    /// Create an empty figure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls in arrival order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// X axis label.
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// Y axis label.
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Whether a legend was requested.
    pub fn legend(&self) -> bool {
        self.legend
    }

    /// Whether a grid was requested.
    pub fn grid(&self) -> bool {
        self.grid
    }

    /// Whether both axes use the same scale.
    pub fn equal_aspect(&self) -> bool {
        self.equal_aspect
    }

    /// Color bar label, if one was requested.
    pub fn colorbar(&self) -> Option<&str> {
        self.colorbar.as_deref()
    }

    /// Whether `show` has been called.
    pub fn was_shown(&self) -> bool {
        self.shown
    }

    /// The pie drawn last; it covers any earlier pies.
    pub fn last_pie(&self) -> Option<&DrawCall> {
        self.calls
            .iter()
            .rev()
            .find(|call| matches!(call, DrawCall::Pie { .. }))
    }

    /// Legend entries, `(label, color token)`, in call order.
    pub fn legend_entries(&self) -> Vec<(&str, &'static str)> {
        self.calls.iter().filter_map(DrawCall::legend_entry).collect()
    }

    /// Data extent of all cartesian calls, padded, or `None` if nothing
    /// cartesian was drawn.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for call in &self.calls {
            include_call(&mut bounds, call);
        }
        if bounds.is_empty() {
            return None;
        }
        let padded = bounds.padded(MARGIN);
        Some(if self.equal_aspect {
            padded.equalized()
        } else {
            padded
        })
    }
}

fn include_call(bounds: &mut Bounds, call: &DrawCall) {
    match call {
        DrawCall::Line { trace, .. } | DrawCall::Scatter(trace) | DrawCall::Step { trace, .. } => {
            for (x, y) in trace.points() {
                bounds.include(x, y);
            }
        }
        DrawCall::Area { trace, .. } => {
            for (x, y) in trace.points() {
                bounds.include(x, y);
                bounds.include(x, 0.0);
            }
        }
        DrawCall::Bar { trace, width } => {
            for (x, y) in trace.points() {
                bounds.include(x - width / 2.0, 0.0);
                bounds.include(x + width / 2.0, y);
            }
        }
        DrawCall::Histogram { values, bins, .. } => {
            for bin in histogram(values, *bins) {
                bounds.include(bin.lo, 0.0);
                bounds.include(bin.hi, bin.count as f64);
            }
        }
        DrawCall::Box { groups, .. } | DrawCall::Violin { groups, .. } => {
            for (i, group) in groups.iter().enumerate() {
                let position = (i + 1) as f64;
                for &v in group {
                    bounds.include(position - 0.5, v);
                    bounds.include(position + 0.5, v);
                }
            }
        }
        DrawCall::Hexbin { x, y, .. } => {
            for (&a, &b) in x.iter().zip(y) {
                bounds.include(a, b);
            }
        }
        DrawCall::Pie { .. } => {}
    }
}

impl Renderer for Figure {
    fn draw(&mut self, call: DrawCall) -> Result<()> {
        self.calls.push(call);
        Ok(())
    }

    fn apply(&mut self, directive: Directive) -> Result<()> {
        match directive {
            Directive::Title(text) => self.title = text,
            Directive::XLabel(text) => self.x_label = text,
            Directive::YLabel(text) => self.y_label = text,
            Directive::Legend => self.legend = true,
            Directive::Grid => self.grid = true,
            Directive::EqualAspect => self.equal_aspect = true,
            Directive::Colorbar(label) => self.colorbar = Some(label),
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.shown = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Trace;

    fn trace(x: Vec<f64>, y: Vec<f64>) -> Trace {
        Trace {
            x,
            y,
            color: "red",
            label: "A".into(),
        }
    }

    #[test]
    fn records_calls_and_directives() {
        let mut figure = Figure::new();
        figure
            .draw(DrawCall::Scatter(trace(vec![0.0, 1.0], vec![0.0, 1.0])))
            .unwrap();
        figure.apply(Directive::Title("first".into())).unwrap();
        figure.apply(Directive::Title("second".into())).unwrap();
        figure.apply(Directive::Grid).unwrap();

        assert_eq!(figure.calls().len(), 1);
        assert_eq!(figure.title(), "second");
        assert!(figure.grid());
        assert!(!figure.legend());
        assert_eq!(figure.legend_entries(), vec![("A", "red")]);
    }

    #[test]
    fn bounds_include_bar_edges_and_zero() {
        let mut figure = Figure::new();
        figure
            .draw(DrawCall::Bar {
                trace: trace(vec![1.0, 2.0], vec![5.0, 10.0]),
                width: 0.4,
            })
            .unwrap();
        let bounds = figure.bounds().unwrap();
        assert!(bounds.x[0] < 0.8 && bounds.x[1] > 2.2);
        assert!(bounds.y[0] < 0.0 && bounds.y[1] > 10.0);
    }

    #[test]
    fn pie_has_no_cartesian_bounds() {
        let mut figure = Figure::new();
        for values in [vec![1.0, 2.0], vec![3.0, 4.0]] {
            figure
                .draw(DrawCall::Pie {
                    values,
                    labels: vec!["a".into(), "b".into()],
                    autopct: "%1.1f%%",
                })
                .unwrap();
        }
        assert!(figure.bounds().is_none());
        assert!(matches!(
            figure.last_pie(),
            Some(DrawCall::Pie { values, .. }) if values == &vec![3.0, 4.0]
        ));
    }
}
