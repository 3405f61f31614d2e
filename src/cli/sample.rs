use anyhow::{Context, Result};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use initial_model::mapper::{GridCellQuery, SpatialMapper};
use initial_model::parser::ProfileParser;

use super::NetworkArgs;

/// Print the normalized primitive state at `radius` from the profile center
pub fn run(
    profile: PathBuf,
    radius: f64,
    spacing: f64,
    nsub: NonZeroUsize,
    network: NetworkArgs,
) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        anyhow::bail!("Radius must be a finite, non-negative distance: {}", radius);
    }
    if !spacing.is_finite() || spacing < 0.0 {
        anyhow::bail!("Spacing must be finite and non-negative: {}", spacing);
    }

    let config = network.load_config()?;
    let schema = network.schema(&config)?;
    let parsed = ProfileParser::with_config(schema, config.parser)
        .parse_file(&profile)
        .with_context(|| format!("Failed to load {}", profile.display()))?;

    let table = &parsed.table;
    let query = GridCellQuery::new([radius, 0.0, 0.0], [spacing; 3]).with_nsub(nsub);
    let state = SpatialMapper::new(table).map(&query).normalized();

    println!("radius: {}", radius);
    println!("density: {:e}", state.density);
    println!("temperature: {:e}", state.temperature);
    let names = table.schema().network().names();
    for (name, x) in names.iter().zip(&state.mass_fractions) {
        println!("{}: {}", name, x);
    }

    Ok(())
}
