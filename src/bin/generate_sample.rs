use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

#[derive(Debug, Parser)]
#[command(
    name = "generate-sample",
    about = "Write a synthetic spikes CSV (time_ms,neuron_id,step)"
)]
struct Args {
    /// Output CSV path
    #[arg(long, default_value = "data/spikes.csv")]
    output: PathBuf,

    /// Number of neurons
    #[arg(long, default_value_t = 100)]
    neurons: u32,

    /// Simulated duration in milliseconds
    #[arg(long, default_value_t = 1000.0)]
    duration_ms: f64,

    /// Integration step in milliseconds
    #[arg(long, default_value_t = 0.5)]
    dt_ms: f64,

    /// Mean firing rate per neuron in Hz
    #[arg(long, default_value_t = 8.0)]
    rate_hz: f64,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Slow sinusoidal drive so the raster shows population bursts.
fn rate_at(base_hz: f64, time_ms: f64) -> f64 {
    base_hz * (1.0 + 0.8 * (2.0 * std::f64::consts::PI * time_ms / 250.0).sin())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.dt_ms <= 0.0 {
        bail!("dt_ms must be > 0");
    }
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = SimpleRng::new(args.seed);
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("opening {}", args.output.display()))?;
    writer.write_record(["time_ms", "neuron_id", "step"])?;

    let steps = (args.duration_ms / args.dt_ms).floor() as u64;
    let mut written: u64 = 0;
    let mut last_step: u64 = 0;

    for step in 0..steps {
        let time_ms = step as f64 * args.dt_ms;
        let p_spike = rate_at(args.rate_hz, time_ms) * args.dt_ms / 1000.0;
        for neuron_id in 0..args.neurons {
            if rng.next_f64() < p_spike {
                writer.write_record([
                    format!("{time_ms:.3}"),
                    neuron_id.to_string(),
                    step.to_string(),
                ])?;
                written += 1;
                last_step = step;
            }
        }
    }
    writer.flush().context("flushing spikes CSV")?;

    info!("Last spike at step {last_step}");
    println!(
        "Wrote {written} spikes from {} neurons ({:.3} ms) to {}",
        args.neurons,
        last_step as f64 * args.dt_ms,
        args.output.display()
    );
    Ok(())
}
