//! Uniplot - an interactive, prompt-driven plotting tool.

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uniplot::app::App;
use uniplot::data::{CsvTableLoader, DataSource};
use uniplot::prompt::Console;
use uniplot::render::{RenderDispatcher, Renderer, TerminalRenderer, Theme, TranscriptRenderer};

#[derive(Parser, Debug)]
#[command(name = "uniplot")]
#[command(about = "Build a chart by answering a few questions", long_about = None)]
struct Args {
    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Seed for randomly generated data
    #[arg(long)]
    seed: Option<u64>,

    /// Print the draw calls instead of opening the terminal chart
    #[arg(long)]
    headless: bool,

    /// Color theme of the terminal chart
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    theme: Theme,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::DEBUG.as_str()));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Uniplot");
    }

    if let Err(err) = run(&args) {
        tracing::error!(error = %err, "Uniplot failed");
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    if args.log.is_some() {
        tracing::info!("Uniplot exited");
    }

    Ok(())
}

fn run(args: &Args) -> uniplot::Result<()> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let source = DataSource::new(CsvTableLoader::new(), rng);
    let console = Console::new(io::stdin().lock(), io::stdout());

    let session = App::new(console, source).run()?;

    let mut renderer: Box<dyn Renderer> = if args.headless {
        Box::new(TranscriptRenderer::new(io::stdout()))
    } else {
        Box::new(TerminalRenderer::new(args.theme))
    };
    let summary = RenderDispatcher::render(session, renderer.as_mut())?;
    tracing::info!(
        plot_type = %summary.plot_type,
        draw_calls = summary.draw_calls,
        "Render complete"
    );
    Ok(())
}
