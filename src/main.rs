/*
 * Boid Flocking Simulation
 *
 * Boids steer with three rules (avoidance, alignment, cohesion) and find
 * their neighbors through a quadtree rebuilt every frame. Parameters come
 * from defaults, an optional JSON file, and a few command line overrides.
 * With `--headless` the simulation runs for a fixed number of ticks without
 * opening a window.
 */

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use quadflock::{FlockParams, Simulation, TickStats};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "quadflock",
    version,
    about = "Boid flocking simulation with a per-frame quadtree"
)]
struct Cli {
    /// JSON file with flock parameters. Missing fields keep their defaults.
    #[arg(long, env = "QUADFLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for the initial flock.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of boids, overriding the config file.
    #[arg(long)]
    boids: Option<usize>,

    /// Run the update phase on all cores.
    #[arg(long)]
    parallel: bool,

    /// Run this many ticks without a window and log a summary.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let params = load_params(&cli)?;

    if let Some(ticks) = cli.headless {
        run_headless(params, ticks);
        return Ok(());
    }

    run_windowed(params)
}

#[cfg(feature = "gui")]
fn run_windowed(params: FlockParams) -> Result<()> {
    quadflock::app::run(params);
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_windowed(_params: FlockParams) -> Result<()> {
    anyhow::bail!("built without the `gui` feature, use --headless <TICKS>")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_params(cli: &Cli) -> Result<FlockParams> {
    let mut params = match &cli.config {
        Some(path) => FlockParams::from_json_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => FlockParams::default(),
    };

    if let Some(seed) = cli.seed {
        params.rng_seed = Some(seed);
    }
    if let Some(boids) = cli.boids {
        params.num_boids = boids;
    }
    if cli.parallel {
        params.parallel = true;
    }

    Ok(params)
}

fn run_headless(params: FlockParams, ticks: u64) {
    let mut simulation = Simulation::new(params);
    let started = Instant::now();
    let mut last = TickStats::default();

    for _ in 0..ticks {
        last = simulation.step();
        if last.tick % 60 == 0 {
            info!(
                tick = last.tick,
                nodes = last.nodes,
                mean_candidates = last.mean_candidates(),
                "Headless progress"
            );
        }
    }

    let elapsed = started.elapsed();
    info!(
        ticks,
        boids = last.boids,
        nodes = last.nodes,
        leaves = last.leaves,
        elapsed_ms = elapsed.as_millis() as u64,
        "Headless run finished"
    );
}
