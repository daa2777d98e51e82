mod config; // brings `config.rs` in as `crate::config`
mod render; // brings `render.rs` in as `crate::render`

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gridstar_navigation::{AStarConfig, CostModel, Grid, GridCoord, astar_search_detailed};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_PATH, GridSettings, Settings};

/// Generate a random walled grid and find an A* path across it.
#[derive(Debug, Parser)]
#[command(name = "gridstar", version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// RNG seed for wall placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Number of grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Cost accumulation rule: "accumulated" or "standard"
    #[arg(long)]
    cost_model: Option<CostModel>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(seed) = self.seed {
            settings.grid.seed = Some(seed);
        }
        if let Some(rows) = self.rows {
            settings.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.grid.cols = cols;
        }
        if let Some(cost_model) = self.cost_model {
            settings.search.cost_model = cost_model;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    cli.apply(&mut settings);

    let start = settings.search.start;
    let goal = settings.search.goal;
    let mut grid = build_grid(&settings.grid, &[start, goal]).context("failed to build grid")?;

    println!("Grid:");
    print!("{}", render::render(&grid, start, goal, None));

    let config = AStarConfig {
        cost_model: settings.search.cost_model,
    };
    let result = astar_search_detailed(&mut grid, start, goal, config)
        .with_context(|| format!("invalid search request from {start} to {goal}"))?;

    match &result.path {
        Some(path) => {
            info!(%result, cost_model = %config.cost_model, "Search finished");
            println!("\nGrid with path:");
            print!("{}", render::render(&grid, start, goal, Some(path.as_slice())));
            println!("\n{result}");
        }
        None => {
            info!(nodes_explored = result.nodes_explored, "Search finished without a path");
            println!("\nNo path found.");
        }
    }

    Ok(())
}

fn build_grid(settings: &GridSettings, keep_open: &[GridCoord]) -> anyhow::Result<Grid> {
    let GridSettings {
        rows,
        cols,
        wall_probability,
        seed,
    } = *settings;

    let grid = match seed {
        Some(seed) => {
            info!(seed, "Placing walls with fixed seed");
            let mut rng = StdRng::seed_from_u64(seed);
            Grid::with_random_walls(rows, cols, wall_probability, &mut rng, keep_open)?
        }
        None => Grid::with_random_walls(rows, cols, wall_probability, &mut rand::rng(), keep_open)?,
    };

    info!(rows, cols, walls = grid.wall_count(), "Grid ready");
    Ok(grid)
}
