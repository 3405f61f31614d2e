//! TOML run configuration.
//!
//! A config file names the species network, the parser limits, every model of the run
//! and, for `map`, the grid and the equation of state:
//!
//! ```toml
//! # run.toml
//! [network]
//! species = ["helium-4", "carbon-12", "oxygen-16"]
//!
//! [parser]
//! capacity = 10000
//!
//! [[model]]
//! id = 0
//! file = "primary.dat"
//! center = [0.0, 0.0, 0.0]
//!
//! [grid]
//! prob_lo = [-1.0e9, -1.0e9, -1.0e9]
//! prob_hi = [1.0e9, 1.0e9, 1.0e9]
//! cells = [32, 32, 32]
//! nsub = 2
//!
//! [eos]
//! gamma = 1.6666667
//! mu = 0.6
//! ```
//!
//! Every section is optional. Relative model paths are resolved against the directory
//! holding the config file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use initial_model::mapper::{GammaLaw, UniformGrid};
use initial_model::parser::ParserConfig;
use initial_model::registry::ModelId;
use initial_model::schema::{Network, VariableSchema};

/// Root configuration structure for run files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Species network.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Profile parser settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Initial models of the run.
    #[serde(default, rename = "model")]
    pub models: Vec<ModelConfig>,

    /// Target grid for `map`.
    pub grid: Option<GridConfig>,

    /// Gamma-law equation of state.
    #[serde(default)]
    pub eos: GammaLaw,
}

/// Species network section.
#[derive(Debug, Default, Deserialize)]
pub struct NetworkConfig {
    /// Species names in network order.
    #[serde(default)]
    pub species: Vec<String>,
}

/// One `[[model]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model slot.
    pub id: ModelId,

    /// Profile file.
    pub file: PathBuf,

    /// Position of the star's center in grid coordinates.
    #[serde(default)]
    pub center: [f64; 3],

    /// Stellar radius for the single-cell check (defaults to the outer profile radius).
    pub stellar_radius: Option<f64>,
}

/// Uniform grid section.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Lower domain corner.
    pub prob_lo: [f64; 3],

    /// Upper domain corner.
    pub prob_hi: [f64; 3],

    /// Cells per axis.
    pub cells: [usize; 3],

    /// Sub-cells per axis for averaging.
    #[serde(default = "default_nsub")]
    pub nsub: NonZeroUsize,
}

fn default_nsub() -> NonZeroUsize {
    NonZeroUsize::MIN
}

impl GridConfig {
    /// Build the grid with its origin at `center`.
    pub fn build(&self, center: [f64; 3]) -> Result<UniformGrid> {
        UniformGrid::new(self.prob_lo, self.prob_hi, self.cells, center)
            .context("Invalid [grid] section")
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_str(&content)?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        let eos = &config.eos;
        if !(eos.gamma > 1.0 && eos.gamma.is_finite()) {
            anyhow::bail!("Invalid [eos] section: gamma must be greater than 1, got {}", eos.gamma);
        }
        if !(eos.mu > 0.0 && eos.mu.is_finite()) {
            anyhow::bail!("Invalid [eos] section: mu must be positive, got {}", eos.mu);
        }
        Ok(config)
    }

    /// Make relative model paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for model in &mut self.models {
            if model.file.is_relative() {
                model.file = base.join(&model.file);
            }
        }
    }

    /// Variable schema for the configured network.
    pub fn schema(&self) -> Result<VariableSchema> {
        let network = Network::new(&self.network.species).context("Invalid [network] section")?;
        VariableSchema::new(network).context("Invalid [network] section")
    }

    /// Entry for model `id`.
    pub fn model(&self, id: ModelId) -> Option<&ModelConfig> {
        self.models.iter().find(|m| m.id == id)
    }
}
