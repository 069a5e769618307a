//! Uniplot - an interactive, prompt-driven plotting tool.
//!
//! Uniplot walks an operator through a short question-and-answer session
//! (where the data comes from, which chart kind, which styles, colors and
//! labels) and then renders the chart once, either full-screen in the
//! terminal or as a plain-text transcript of draw calls.
//!
//! # Features
//!
//! - Four data sources: typed values, random data, arithmetic ranges, CSV files
//! - Ten chart kinds from line to hexbin
//! - Re-prompting on every bad answer; nothing is accepted half-valid
//! - Gruvbox color themes for the terminal chart
//!
//! # Example
//!
//! ```ignore
//! use uniplot::app::App;
//! use uniplot::data::{CsvTableLoader, DataSource};
//! use uniplot::prompt::Console;
//! use uniplot::render::{RenderDispatcher, TranscriptRenderer};
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::io;
//!
//! let console = Console::new(io::stdin().lock(), io::stdout());
//! let source = DataSource::new(CsvTableLoader::new(), StdRng::seed_from_u64(1));
//! let session = App::new(console, source).run()?;
//! RenderDispatcher::render(session, &mut TranscriptRenderer::new(io::stdout()))?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod catalog;
pub mod data;
pub mod error;
pub mod prompt;
pub mod render;
pub mod session;

pub use error::{PlotError, Result};
