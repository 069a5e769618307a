//! Plot session state machine.
//!
//! A session walks through a fixed sequence of stages:
//!
//! ```text
//! AcquireData -> ChoosePlotType -> ChooseStyles -> ChooseColors -> ChooseLabels -> Ready
//! ```
//!
//! Each stage has one transition method. A method validates its input and
//! advances the stage only on success; a recoverable error leaves the session
//! where it was so the caller can ask again. Calling a method in the wrong
//! stage is an [`PlotError::OutOfOrder`] error.

use crate::catalog::{resolve, Catalog, PlotType};
use crate::data::Dataset;
use crate::error::{PlotError, Result};
use tracing::{debug, warn};

/// Session stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Waiting for a dataset.
    #[default]
    AcquireData,
    /// Waiting for a plot type.
    ChoosePlotType,
    /// Waiting for line style, then marker.
    ChooseStyles,
    /// Waiting for series colors.
    ChooseColors,
    /// Waiting for series labels, title and axis labels.
    ChooseLabels,
    /// Complete; can be rendered once.
    Ready,
}

impl Stage {
    /// The stage after this one. `Ready` is terminal.
    pub fn next(self) -> Self {
        match self {
            Stage::AcquireData => Stage::ChoosePlotType,
            Stage::ChoosePlotType => Stage::ChooseStyles,
            Stage::ChooseStyles => Stage::ChooseColors,
            Stage::ChooseColors => Stage::ChooseLabels,
            Stage::ChooseLabels => Stage::Ready,
            Stage::Ready => Stage::Ready,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::AcquireData => "AcquireData",
            Stage::ChoosePlotType => "ChoosePlotType",
            Stage::ChooseStyles => "ChooseStyles",
            Stage::ChooseColors => "ChooseColors",
            Stage::ChooseLabels => "ChooseLabels",
            Stage::Ready => "Ready",
        }
    }
}

/// Free-text chart annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Chart title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
}

/// The visual choices of a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleChoice {
    /// Chart kind.
    pub plot_type: PlotType,
    /// Line style token.
    pub line_style: &'static str,
    /// Marker token.
    pub marker_style: &'static str,
    /// Color tokens, normally one per series.
    pub colors: Vec<&'static str>,
}

/// Everything the dispatcher needs, taken out of a `Ready` session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyPlot {
    /// The data to draw.
    pub dataset: Dataset,
    /// Visual choices.
    pub style: StyleChoice,
    /// Title and axis labels.
    pub presentation: Presentation,
}

/// One plot session, from data acquisition to a single render.
#[derive(Debug, Default)]
pub struct PlotSession {
    stage: Stage,
    dataset: Option<Dataset>,
    plot_type: Option<PlotType>,
    line_style: Option<&'static str>,
    marker_style: Option<&'static str>,
    colors: Vec<&'static str>,
    presentation: Presentation,
}

impl PlotSession {
    /// Create a new session in `AcquireData`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The dataset, once acquired.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Chosen plot type, once chosen.
    pub fn plot_type(&self) -> Option<PlotType> {
        self.plot_type
    }

    /// Chosen colors so far.
    pub fn colors(&self) -> &[&'static str] {
        &self.colors
    }

    /// Whether `ChooseStyles` is still waiting for the line style.
    pub fn needs_line_style(&self) -> bool {
        self.stage == Stage::ChooseStyles && self.line_style.is_none()
    }

    fn expect(&self, expected: Stage) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(PlotError::OutOfOrder {
                expected: expected.name(),
                actual: self.stage.name(),
            })
        }
    }

    fn advance(&mut self) {
        let next = self.stage.next();
        debug!(from = self.stage.name(), to = next.name(), "session stage");
        self.stage = next;
    }

    fn series_count(&self) -> Result<usize> {
        self.dataset
            .as_ref()
            .map(Dataset::series_count)
            .ok_or(PlotError::OutOfOrder {
                expected: Stage::AcquireData.name(),
                actual: self.stage.name(),
            })
    }

    /// `AcquireData`: take ownership of the dataset.
    pub fn acquire(&mut self, dataset: Dataset) -> Result<()> {
        self.expect(Stage::AcquireData)?;
        self.dataset = Some(dataset);
        self.advance();
        Ok(())
    }

    /// `ChoosePlotType`: resolve a plot-type menu index.
    pub fn choose_plot_type(&mut self, input: &str) -> Result<PlotType> {
        self.expect(Stage::ChoosePlotType)?;
        let plot_type = PlotType::select(input)?;
        self.plot_type = Some(plot_type);
        self.advance();
        Ok(plot_type)
    }

    /// `ChooseStyles`, first half: resolve a line-style menu index.
    pub fn choose_line_style(&mut self, input: &str) -> Result<&'static str> {
        self.expect(Stage::ChooseStyles)?;
        if self.line_style.is_some() {
            return Err(PlotError::OutOfOrder {
                expected: "ChooseStyles (line style)",
                actual: "ChooseStyles (marker)",
            });
        }
        let token = Catalog::LineStyle.select(input)?;
        self.line_style = Some(token);
        Ok(token)
    }

    /// `ChooseStyles`, second half: resolve a marker menu index.
    pub fn choose_marker(&mut self, input: &str) -> Result<&'static str> {
        self.expect(Stage::ChooseStyles)?;
        if self.line_style.is_none() {
            return Err(PlotError::OutOfOrder {
                expected: "ChooseStyles (marker)",
                actual: "ChooseStyles (line style)",
            });
        }
        let token = Catalog::Marker.select(input)?;
        self.marker_style = Some(token);
        self.advance();
        Ok(token)
    }

    /// `ChooseColors`: with several series, a space-separated index list
    /// where unknown indices are dropped; with one series, a single index
    /// that must resolve.
    pub fn choose_colors(&mut self, input: &str) -> Result<&[&'static str]> {
        self.expect(Stage::ChooseColors)?;
        let series = self.series_count()?;

        let colors = if series > 1 {
            let indices = input
                .split_whitespace()
                .map(|part| {
                    part.parse::<i64>()
                        .map_err(|_| PlotError::invalid_selection(Catalog::Color.name(), part))
                })
                .collect::<Result<Vec<_>>>()?;

            let mut colors = Vec::with_capacity(indices.len());
            for index in indices {
                match resolve(Catalog::Color, index) {
                    Ok(token) => colors.push(token),
                    Err(_) => warn!(index, "dropping unknown color index"),
                }
            }
            if colors.len() != series {
                warn!(
                    colors = colors.len(),
                    series, "color count does not match series count"
                );
            }
            colors
        } else {
            vec![Catalog::Color.select(input)?]
        };

        self.colors = colors;
        self.advance();
        Ok(self.colors.as_slice())
    }

    /// `ChooseLabels`: overwrite every series label and set the annotations.
    pub fn choose_labels(
        &mut self,
        series_labels: Vec<String>,
        presentation: Presentation,
    ) -> Result<()> {
        self.expect(Stage::ChooseLabels)?;
        let dataset = self.dataset.as_mut().ok_or(PlotError::OutOfOrder {
            expected: Stage::AcquireData.name(),
            actual: Stage::ChooseLabels.name(),
        })?;
        dataset.relabel(series_labels)?;
        self.presentation = presentation;
        self.advance();
        Ok(())
    }

    /// Consume a `Ready` session.
    pub fn into_ready(self) -> Result<ReadyPlot> {
        self.expect(Stage::Ready)?;
        let out_of_order = || PlotError::OutOfOrder {
            expected: Stage::Ready.name(),
            actual: Stage::Ready.name(),
        };

        Ok(ReadyPlot {
            dataset: self.dataset.ok_or_else(out_of_order)?,
            style: StyleChoice {
                plot_type: self.plot_type.ok_or_else(out_of_order)?,
                line_style: self.line_style.ok_or_else(out_of_order)?,
                marker_style: self.marker_style.ok_or_else(out_of_order)?,
                colors: self.colors,
            },
            presentation: self.presentation,
        })
    }
}
