//! Rendering: the draw-call model, plot-type dispatch and the renderers.

mod call;
mod dispatch;
mod figure;
pub mod geometry;
pub mod palette;
mod terminal;
mod theme;
mod transcript;

pub use call::{Directive, DrawCall, Trace};
pub use dispatch::{
    plan, DistributionKind, Handler, Instruction, RenderDispatcher, RenderSummary, TraceKind,
    BAR_GROUP_WIDTH, HEXBIN_COLORBAR_LABEL, HEXBIN_COLORMAP, HEXBIN_GRID_SIZE, HISTOGRAM_BINS,
    PIE_AUTOPCT, TRANSLUCENT_ALPHA,
};
pub use figure::Figure;
pub use terminal::TerminalRenderer;
pub use theme::{Theme, ThemeColors};
pub use transcript::TranscriptRenderer;

use crate::error::Result;

/// Drawing surface driven by [`RenderDispatcher`].
///
/// Calls arrive in plan order: every draw call, then the directives, then
/// exactly one `show`.
pub trait Renderer {
    /// Issue one drawing request.
    fn draw(&mut self, call: DrawCall) -> Result<()>;

    /// Apply a figure-wide setting.
    fn apply(&mut self, directive: Directive) -> Result<()>;

    /// Present the figure. Interactive renderers block here until closed.
    fn show(&mut self) -> Result<()>;
}
