use anyhow::{Context, Result};
use log::info;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use initial_model::mapper::{CellRecord, SpatialMapper};
use initial_model::registry::{ModelId, ModelRegistry};

use super::Config;

/// Load every configured model, sweep the grid for one of them and write the cells
pub fn run(
    config_path: PathBuf,
    model: Option<usize>,
    output: Option<PathBuf>,
    nsub: Option<NonZeroUsize>,
) -> Result<()> {
    let config = Config::from_file(&config_path)?;
    let grid_config = config
        .grid
        .as_ref()
        .with_context(|| format!("No [grid] section in {}", config_path.display()))?;

    let schema = Arc::new(config.schema()?);
    let mut registry =
        ModelRegistry::with_parser_config(Arc::clone(&schema), config.parser.clone());
    for entry in &config.models {
        registry
            .load(entry.id, &entry.file)
            .with_context(|| format!("Failed to initialize {}", entry.id))?;
    }

    let id = match model {
        Some(id) => ModelId(id),
        None => match config.models.first() {
            Some(entry) => entry.id,
            None => anyhow::bail!("No [[model]] entries in {}", config_path.display()),
        },
    };
    let entry = config
        .model(id)
        .with_context(|| format!("{} is not configured", id))?;
    let table = registry.get(id)?;

    let grid = grid_config.build(entry.center)?;
    let nsub = nsub.unwrap_or(grid_config.nsub);

    let mut mapper = SpatialMapper::new(table);
    if let Some(radius) = entry.stellar_radius {
        mapper = mapper.with_stellar_radius(radius);
    }

    info!("Mapping {} onto the grid", id);
    let start = Instant::now();
    let records = grid.sweep(&mapper, &config.eos, nsub);
    info!(
        "Initialized {} cells in {:.2}s",
        records.len(),
        start.elapsed().as_secs_f64()
    );

    let sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    write_cells(sink, schema.network().names(), &records)?;

    if let Some(path) = &output {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

/// Write one CSV row per cell
fn write_cells<W: Write>(sink: W, species: &[String], records: &[CellRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);

    let mut header: Vec<String> = [
        "i", "j", "k", "x", "y", "z", "density", "temperature", "pressure", "rho_e", "rho_E",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend(species.iter().map(|name| format!("rho_X({})", name)));
    writer.write_record(&header)?;

    let mut row = Vec::with_capacity(header.len());
    for record in records {
        let state = &record.state;
        row.clear();
        row.extend(record.index.iter().map(|i| i.to_string()));
        row.extend(record.offset.iter().map(|x| x.to_string()));
        row.extend(
            [
                state.density,
                state.temperature,
                state.pressure,
                state.internal_energy,
                state.total_energy,
            ]
            .iter()
            .map(|v| v.to_string()),
        );
        row.extend(state.partial_densities.iter().map(|v| v.to_string()));
        writer.write_record(&row)?;
    }

    writer.flush().context("Failed to write cell output")?;
    Ok(())
}
