//! # initial-model
//!
//! Command-line front end for loading stellar initial models and mapping them onto
//! uniform 3-D grids.
//!
//! ## Usage
//!
//! ```bash
//! # Check how a profile's columns resolve against a network
//! initial-model inspect star.dat --species helium-4,carbon-12
//!
//! # Interpolated state 3e8 cm from the center, averaged over a 2x2x2 cell
//! initial-model sample star.dat --radius 3e8 --spacing 1e7 --nsub 2 --config run.toml
//!
//! # Initialize the configured grid and write it as CSV
//! initial-model -v map --config run.toml --output cells.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
