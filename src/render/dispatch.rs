//! Plot-type dispatch.
//!
//! Turns a finished [`PlotSession`] into the exact sequence of renderer
//! instructions for its plot type, then plays them into a [`Renderer`].
//! Each plot type maps to a [`Handler`]; handlers differ in how many draw
//! calls they issue and which per-series arguments they need.

use super::call::{Directive, DrawCall, Trace};
use super::Renderer;
use crate::catalog::PlotType;
use crate::error::{PlotError, Result};
use crate::session::{PlotSession, ReadyPlot};
use tracing::{debug, info};

/// Fraction of the category spacing covered by one group of bars.
pub const BAR_GROUP_WIDTH: f64 = 0.8;
/// Histogram bin count.
pub const HISTOGRAM_BINS: usize = 10;
/// Hexagons across the X range.
pub const HEXBIN_GRID_SIZE: usize = 30;
/// Opacity for overlapping histograms and areas.
pub const TRANSLUCENT_ALPHA: f64 = 0.5;
/// Color map for hexbin counts.
pub const HEXBIN_COLORMAP: &str = "Blues";
/// Label of the hexbin color scale.
pub const HEXBIN_COLORBAR_LABEL: &str = "Counts";
/// Pie percentage format.
pub const PIE_AUTOPCT: &str = "%1.1f%%";

/// One step of a render plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Issue a draw call.
    Draw(DrawCall),
    /// Apply a figure directive.
    Apply(Directive),
}

/// Per-series chart kinds sharing the one-call-per-series shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Line with style and marker.
    Line,
    /// Points.
    Scatter,
    /// Filled area.
    Area,
    /// Mid-placed stair line with style and marker.
    Step,
}

/// Aggregate chart kinds drawn in one call over all series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    /// Box-and-whisker, labelled by series.
    Box,
    /// Violin with means, unlabelled.
    Violin,
}

/// How a plot type shapes its draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// One call per series with the i-th color and label.
    PerSeries(TraceKind),
    /// Side-by-side bars, offset per series.
    Bar,
    /// One histogram per series over its own values.
    Histogram,
    /// A pie per series; the last one drawn wins.
    Pie,
    /// One call over all series.
    Distribution(DistributionKind),
    /// X against the first series only.
    Hexbin,
}

impl Handler {
    /// Dispatch table.
    pub fn for_plot_type(plot_type: PlotType) -> Self {
        match plot_type {
            PlotType::Line => Self::PerSeries(TraceKind::Line),
            PlotType::Scatter => Self::PerSeries(TraceKind::Scatter),
            PlotType::Area => Self::PerSeries(TraceKind::Area),
            PlotType::Step => Self::PerSeries(TraceKind::Step),
            PlotType::Bar => Self::Bar,
            PlotType::Histogram => Self::Histogram,
            PlotType::Pie => Self::Pie,
            PlotType::Box => Self::Distribution(DistributionKind::Box),
            PlotType::Violin => Self::Distribution(DistributionKind::Violin),
            PlotType::Hexbin => Self::Hexbin,
        }
    }

    /// The type-specific instructions for `plot`.
    pub fn shape(self, plot: &ReadyPlot) -> Result<Vec<Instruction>> {
        match self {
            Self::PerSeries(kind) => Ok(traces(plot)?
                .into_iter()
                .map(|trace| Instruction::Draw(trace_call(kind, trace, plot)))
                .collect()),
            Self::Bar => {
                let width = BAR_GROUP_WIDTH / plot.dataset.series_count() as f64;
                Ok(traces(plot)?
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut trace)| {
                        let offset = i as f64 * width;
                        trace.x.iter_mut().for_each(|x| *x += offset);
                        Instruction::Draw(DrawCall::Bar { trace, width })
                    })
                    .collect())
            }
            Self::Histogram => Ok(traces(plot)?
                .into_iter()
                .map(|trace| {
                    Instruction::Draw(DrawCall::Histogram {
                        values: trace.y,
                        bins: HISTOGRAM_BINS,
                        alpha: TRANSLUCENT_ALPHA,
                        color: trace.color,
                        label: trace.label,
                    })
                })
                .collect()),
            Self::Pie => {
                let labels = plot.dataset.labels();
                let mut plan = Vec::new();
                for series in plot.dataset.series() {
                    plan.push(Instruction::Draw(DrawCall::Pie {
                        values: series.values.clone(),
                        labels: labels.clone(),
                        autopct: PIE_AUTOPCT,
                    }));
                    plan.push(Instruction::Apply(Directive::Title(
                        plot.presentation.title.clone(),
                    )));
                    plan.push(Instruction::Apply(Directive::EqualAspect));
                }
                Ok(plan)
            }
            Self::Distribution(kind) => {
                let groups = plot
                    .dataset
                    .series()
                    .iter()
                    .map(|s| s.values.clone())
                    .collect();
                let call = match kind {
                    DistributionKind::Box => DrawCall::Box {
                        groups,
                        labels: plot.dataset.labels(),
                    },
                    DistributionKind::Violin => DrawCall::Violin {
                        groups,
                        show_means: true,
                    },
                };
                Ok(vec![Instruction::Draw(call)])
            }
            Self::Hexbin => {
                // Dataset guarantees at least one series.
                let first = plot.dataset.series().first().ok_or(PlotError::IndexMismatch {
                    what: "series",
                    required: 1,
                    available: 0,
                })?;
                Ok(vec![
                    Instruction::Draw(DrawCall::Hexbin {
                        x: plot.dataset.x_values().to_vec(),
                        y: first.values.clone(),
                        grid_size: HEXBIN_GRID_SIZE,
                        colormap: HEXBIN_COLORMAP,
                    }),
                    Instruction::Apply(Directive::Colorbar(HEXBIN_COLORBAR_LABEL.to_string())),
                ])
            }
        }
    }
}

/// Pair every series with its color and label, failing if colors run short.
fn traces(plot: &ReadyPlot) -> Result<Vec<Trace>> {
    let series = plot.dataset.series();
    let colors = &plot.style.colors;
    if colors.len() < series.len() {
        return Err(PlotError::IndexMismatch {
            what: "colors",
            required: series.len(),
            available: colors.len(),
        });
    }

    Ok(series
        .iter()
        .zip(colors.iter().copied())
        .map(|(series, color)| Trace {
            x: plot.dataset.x_values().to_vec(),
            y: series.values.clone(),
            color,
            label: series.label.clone(),
        })
        .collect())
}

fn trace_call(kind: TraceKind, trace: Trace, plot: &ReadyPlot) -> DrawCall {
    let line_style = plot.style.line_style;
    let marker = plot.style.marker_style;
    match kind {
        TraceKind::Line => DrawCall::Line {
            trace,
            line_style,
            marker,
        },
        TraceKind::Scatter => DrawCall::Scatter(trace),
        TraceKind::Area => DrawCall::Area {
            trace,
            alpha: TRANSLUCENT_ALPHA,
        },
        TraceKind::Step => DrawCall::Step {
            trace,
            line_style,
            marker,
        },
    }
}

/// Full instruction sequence: the type-specific calls followed by title,
/// axis labels, legend and grid.
pub fn plan(plot: &ReadyPlot) -> Result<Vec<Instruction>> {
    let mut instructions = Handler::for_plot_type(plot.style.plot_type).shape(plot)?;
    let presentation = &plot.presentation;
    instructions.extend([
        Instruction::Apply(Directive::Title(presentation.title.clone())),
        Instruction::Apply(Directive::XLabel(presentation.x_label.clone())),
        Instruction::Apply(Directive::YLabel(presentation.y_label.clone())),
        Instruction::Apply(Directive::Legend),
        Instruction::Apply(Directive::Grid),
    ]);
    Ok(instructions)
}

/// What a render did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    /// Plot type drawn.
    pub plot_type: PlotType,
    /// Number of draw calls issued.
    pub draw_calls: usize,
}

/// Drives a renderer from a completed session.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderDispatcher;

impl RenderDispatcher {
    /// Render `session` once. The session is consumed; an
    /// [`PlotError::IndexMismatch`] aborts before anything is drawn.
    pub fn render<R: Renderer + ?Sized>(
        session: PlotSession,
        renderer: &mut R,
    ) -> Result<RenderSummary> {
        let plot = session.into_ready()?;
        let instructions = plan(&plot)?;

        let mut draw_calls = 0;
        for instruction in instructions {
            match instruction {
                Instruction::Draw(call) => {
                    debug!(kind = call.kind(), "draw");
                    renderer.draw(call)?;
                    draw_calls += 1;
                }
                Instruction::Apply(directive) => renderer.apply(directive)?,
            }
        }

        info!(
            plot_type = %plot.style.plot_type,
            draw_calls,
            "rendered, waiting for display"
        );
        renderer.show()?;

        Ok(RenderSummary {
            plot_type: plot.style.plot_type,
            draw_calls,
        })
    }
}
