use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use spike_raster::cache::redirect_backend_cache;
use spike_raster::data::{load_spikes, SpikeFilter};
use spike_raster::plot::config::{DEFAULT_DPI, DEFAULT_MARKER_SIZE, DEFAULT_OPACITY, DEFAULT_TITLE};
use spike_raster::plot::{render_raster, RenderConfig};

#[derive(Debug, Parser)]
#[command(
    name = "spike-raster",
    about = "Generate a spike raster plot from a spikes CSV"
)]
struct Args {
    /// Path to spikes CSV file (columns: time_ms, neuron_id[, step])
    #[arg(long)]
    input: PathBuf,

    /// Path to output image (e.g. data/raster.png)
    #[arg(long)]
    output: PathBuf,

    /// Plot title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Scatter marker size (area in square points)
    #[arg(long, default_value_t = DEFAULT_MARKER_SIZE)]
    marker_size: f64,

    /// Point opacity
    #[arg(long, default_value_t = DEFAULT_OPACITY)]
    alpha: f64,

    /// Output image DPI
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,

    /// Optional cap on plotted events (0 = all)
    #[arg(long, default_value_t = 0)]
    max_events: usize,

    /// Optional lower time bound (ms, inclusive)
    #[arg(long, allow_negative_numbers = true)]
    start_ms: Option<f64>,

    /// Optional upper time bound (ms, inclusive)
    #[arg(long, allow_negative_numbers = true)]
    end_ms: Option<f64>,

    /// Also write a JSON summary of the loaded spikes
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    redirect_backend_cache();

    let filter = SpikeFilter {
        start_ms: args.start_ms,
        end_ms: args.end_ms,
        max_events: args.max_events,
    };
    let config = RenderConfig::new(
        &args.output,
        args.title.as_str(),
        args.marker_size,
        args.alpha,
        args.dpi,
    )?;

    let series = load_spikes(&args.input, &filter)
        .with_context(|| format!("loading spikes from {}", args.input.display()))?;

    let summary = series.summary();
    info!("Spike summary: {summary:?}");
    if let Some(path) = &args.summary_json {
        let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        fs::write(path, json).with_context(|| format!("writing summary {}", path.display()))?;
    }

    render_raster(&series, &config)
        .with_context(|| format!("rendering raster to {}", args.output.display()))?;

    println!("Loaded events: {}", series.len());
    println!("Wrote raster: {}", args.output.display());
    Ok(())
}
