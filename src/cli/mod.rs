use anyhow::Result;
use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use initial_model::schema::VariableSchema;

mod config;
mod inspect;
mod map;
mod sample;

pub use config::Config;

/// initial-model - Map one-dimensional stellar profiles onto 3-D grids
#[derive(Parser)]
#[command(name = "initial-model")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Network selection shared by the single-profile commands
#[derive(clap::Args)]
pub struct NetworkArgs {
    /// Comma-separated species names, in network order
    #[arg(short, long, value_delimiter = ',', value_name = "NAMES")]
    species: Option<Vec<String>>,

    /// Load the network and parser settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl NetworkArgs {
    /// Config file contents, or defaults when no file is given
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }

    /// `--species` wins over the config file's network
    fn schema(&self, config: &Config) -> Result<Arc<VariableSchema>> {
        let schema = match &self.species {
            Some(species) => VariableSchema::with_species(species)?,
            None => config.schema()?,
        };
        Ok(Arc::new(schema))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a profile and report its columns and contents
    Inspect {
        /// Profile file path
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        #[command(flatten)]
        network: NetworkArgs,

        /// Maximum number of points the profile may declare
        #[arg(long)]
        capacity: Option<usize>,

        /// Print the profile summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the interpolated state at a distance from the profile center
    Sample {
        /// Profile file path
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        /// Distance from the center
        #[arg(short, long)]
        radius: f64,

        /// Cell spacing used for averaging
        #[arg(long, default_value_t = 0.0)]
        spacing: f64,

        /// Sub-cells per axis
        #[arg(short, long, default_value = "1")]
        nsub: NonZeroUsize,

        #[command(flatten)]
        network: NetworkArgs,
    },

    /// Initialize a uniform grid from a configured model and write it as CSV
    Map {
        /// Run configuration file
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Model to map (defaults to the first configured model)
        #[arg(short, long)]
        model: Option<usize>,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Override the grid's sub-cells per axis
        #[arg(short, long)]
        nsub: Option<NonZeroUsize>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect {
            profile,
            network,
            capacity,
            json,
        } => inspect::run(profile, network, capacity, json),
        Commands::Sample {
            profile,
            radius,
            spacing,
            nsub,
            network,
        } => sample::run(profile, radius, spacing, nsub, network),
        Commands::Map {
            config,
            model,
            output,
            nsub,
        } => map::run(config, model, output, nsub),
    }
}
