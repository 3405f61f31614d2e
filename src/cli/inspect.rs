use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use initial_model::parser::ProfileParser;

use super::NetworkArgs;

/// Parse a profile and print its report and summary
pub fn run(
    profile: PathBuf,
    network: NetworkArgs,
    capacity: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = network.load_config()?;
    let schema = network.schema(&config)?;

    let mut parser = ProfileParser::with_config(schema, config.parser);
    if let Some(capacity) = capacity {
        parser = parser.with_capacity(capacity);
    }

    info!("Inspecting {}", profile.display());
    let parsed = parser.parse_file(&profile)?;
    let summary = parsed.table.summary();

    if json {
        let output =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", output);
        return Ok(());
    }

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", parsed.report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", parsed.report);
    }

    println!("{}", summary);
    Ok(())
}
