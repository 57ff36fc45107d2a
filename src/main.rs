//! Forest Plot - Non-inferiority Forest Plot Renderer & Viewer
//!
//! Renders absolute risks of two interventions and their risk difference
//! against a non-inferiority margin, interactively or to an image file.

mod gui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use forest_plot::charts::{FigureSpec, StaticChartRenderer};
use forest_plot::data::{StudyInput, StudyLoader};
use forest_plot::logging;
use forest_plot::stats::NonInferiorityCalculator;
use gui::ForestPlotApp;
use std::path::PathBuf;

/// Forest Plot - absolute risks, risk difference and non-inferiority margin.
///
/// Without arguments the built-in study is shown in a window.
#[derive(Parser, Debug)]
#[command(name = "forest-plot", version, about)]
struct Cli {
    /// JSON study file; fields it omits keep their built-in values.
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Export the figure to this file (.png or .svg).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Do not open the interactive window.
    #[arg(long = "no-window")]
    no_window: bool,

    /// Print the non-inferiority summary as JSON to stdout.
    #[arg(long = "summary")]
    summary: bool,

    /// Figure width in pixels.
    #[arg(long = "width")]
    width: Option<u32>,

    /// Figure height in pixels.
    #[arg(long = "height")]
    height: Option<u32>,

    /// Open the exported file with the system viewer.
    #[arg(long = "open")]
    open: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let mut study = match &cli.input {
        Some(path) => StudyLoader::load_json(path)
            .with_context(|| format!("Failed to load study from {}", path.display()))?,
        None => StudyInput::default(),
    };
    if let Some(width) = cli.width {
        study.figure.width = width;
    }
    if let Some(height) = cli.height {
        study.figure.height = height;
    }

    let warnings = StudyLoader::check_and_log(&study);
    let figure = FigureSpec::build(&study).context("Failed to derive axis ranges")?;
    tracing::info!(
        control = %study.control.name,
        treatment = %study.treatment.name,
        margin = study.margin,
        warnings,
        "Figure ready"
    );

    if cli.summary {
        let report = NonInferiorityCalculator::report(&study);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(output) = &cli.output {
        if !StaticChartRenderer::fonts_available() {
            tracing::warn!("No sans-serif font found; text rendering may fail");
        }
        StaticChartRenderer::render_to_file(&figure, output)
            .with_context(|| format!("Failed to export {}", output.display()))?;
        if cli.open {
            open::that(output).with_context(|| format!("Failed to open {}", output.display()))?;
        }
    }

    if cli.no_window {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 560.0])
            .with_min_inner_size([800.0, 420.0])
            .with_title("Forest Plot"),
        ..Default::default()
    };

    eframe::run_native(
        "Forest Plot",
        options,
        Box::new(move |cc| Ok(Box::new(ForestPlotApp::new(cc, &study, figure)))),
    )
    .map_err(|e| anyhow!("GUI failed: {}", e))
}
