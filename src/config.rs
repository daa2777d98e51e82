use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use gridstar_navigation::{CostModel, GridCoord};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "GRIDSTAR";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub grid: GridSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridSettings {
    pub rows: usize,
    pub cols: usize,
    #[serde(default = "default_wall_probability")]
    pub wall_probability: f64,
    /// Fixed RNG seed; a fresh OS seed is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSettings {
    pub start: GridCoord,
    pub goal: GridCoord,
    #[serde(default)]
    pub cost_model: CostModel,
}

fn default_wall_probability() -> f64 {
    0.2
}

impl Settings {
    /// Loads settings from a TOML file, then applies `GRIDSTAR__SECTION__KEY`
    /// environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Attempting to load configuration from {}", path.display());

        let settings = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize::<Settings>());

        match settings {
            Ok(settings) => {
                info!("Successfully loaded configuration: {:?}", settings);
                Ok(settings)
            }
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                Err(e)
            }
        }
    }

    /// Parses settings from TOML text, without environment overrides.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
