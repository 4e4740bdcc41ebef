/*
 * Boids 3D
 *
 * Launches the point-cloud viewer for the 3D flocking simulation. Parameters
 * come from an optional JSON file, with a few command line overrides on top.
 *
 * Logging is controlled through RUST_LOG, e.g. `RUST_LOG=boids3d=debug`.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use boids3d::{app, SimulationParams, UpdateMode};
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "boids3d", about = "3D boid flocking rendered as a point cloud")]
struct Cli {
    /// JSON file with simulation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of boids
    #[arg(short, long)]
    population: Option<usize>,

    /// Seed for the initial positions and velocities
    #[arg(short, long)]
    seed: Option<u64>,

    /// Let each boid move before the next one looks around
    #[arg(long)]
    interleaved: bool,

    /// Print the resolved parameters as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn resolve_params(&self) -> Result<SimulationParams> {
        let mut params = match &self.config {
            Some(path) => SimulationParams::load(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?,
            None => SimulationParams::default(),
        };

        if let Some(population) = self.population {
            params.population_size = population;
        }
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        if self.interleaved {
            params.update_mode = UpdateMode::Interleaved;
        }

        params.validate().context("invalid simulation parameters")?;
        Ok(params)
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let params = cli.resolve_params()?;

    if cli.print_config {
        println!("{}", params.to_json_string()?);
        return Ok(());
    }

    info!(
        population = params.population_size,
        mode = ?params.update_mode,
        "starting boids viewer"
    );
    app::launch(params);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
