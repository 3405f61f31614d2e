//! # Profile File Parser
//!
//! Reads the self-describing text format used for one-dimensional initial models:
//!
//! ```text
//! # npts = 3
//! # num of variables = 4
//! # density
//! # temperature
//! # pressure
//! # helium-4
//! 0.0   10.0  1.0e7  1.0e17  1.0
//! 1.0    5.0  5.0e6  1.0e16  1.0
//! 2.0    1.0  1.0e6  1.0e15  1.0
//! ```
//!
//! The first two lines give the number of points and the number `M` of variables. The
//! next `M` lines name the variables in column order. Each following row holds the
//! radius and then the `M` values.
//!
//! ## Column Resolution
//!
//! Declared names are resolved against the [`VariableSchema`] (density, temperature,
//! pressure, then network species). Columns that match nothing are read and discarded.
//! Unmatched columns, schema variables the file never declares, and duplicate
//! declarations are recoverable: each is logged once and recorded in the
//! [`ParseReport`]. Missing slots stay zero-filled.
//!
//! Structural problems (unreadable source, malformed headers, a point count above the
//! capacity, short or malformed rows) are fatal and return a [`ParseError`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use initial_model::parser::ProfileParser;
//! use initial_model::schema::VariableSchema;
//!
//! let schema = Arc::new(VariableSchema::with_species(["helium-4", "carbon-12"])?);
//! let parsed = ProfileParser::new(schema).parse_file("star.dat")?;
//! println!("{}", parsed.report);
//! let table = parsed.table;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod report;


use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;

use crate::profile::{ProfileBuilder, ProfileTable, CAPACITY};
use crate::schema::{Slot, VariableSchema, DENSITY, PRESSURE, TEMPERATURE};

pub use error::ParseError;
pub use report::{ColumnResolution, ParseReport, ParseWarning};

/// Header key carrying the number of points
pub const NPTS_KEY: &str = "npts";
/// Header key carrying the number of declared variables
pub const NVARS_KEY: &str = "num of variables";

/// Configuration for the profile parser
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum number of points a profile may declare
    pub capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { capacity: CAPACITY }
    }
}

/// A successfully parsed profile together with its diagnostics
#[derive(Debug, Clone)]
pub struct ParsedProfile {
    /// The finished, immutable table
    pub table: ProfileTable,
    /// Column resolution and warnings
    pub report: ParseReport,
}

/// Builds [`ProfileTable`]s from profile text files
#[derive(Debug, Clone)]
pub struct ProfileParser {
    schema: Arc<VariableSchema>,
    config: ParserConfig,
}

impl ProfileParser {
    /// Create a parser with default configuration
    pub fn new(schema: Arc<VariableSchema>) -> Self {
        Self::with_config(schema, ParserConfig::default())
    }

    /// Create a parser with custom configuration
    pub fn with_config(schema: Arc<VariableSchema>, config: ParserConfig) -> Self {
        Self { schema, config }
    }

    /// Set the maximum number of points
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// The schema columns are resolved against
    pub fn schema(&self) -> &Arc<VariableSchema> {
        &self.schema
    }

    /// Parse a profile file
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedProfile, ParseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Parse a profile from any buffered reader. `source` names it in diagnostics.
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
        source: &str,
    ) -> Result<ParsedProfile, ParseError> {
        let mut lines = reader.lines();
        let mut line_no = 0;
        let mut next_line = || -> Result<Option<(usize, String)>, ParseError> {
            match lines.next() {
                Some(line) => {
                    line_no += 1;
                    Ok(Some((line_no, line?)))
                }
                None => Ok(None),
            }
        };

        let (line, content) = next_line()?.ok_or(ParseError::MissingHeader {
            line: 1,
            expected: "'# npts = <integer>'",
        })?;
        let npts = parse_count_header(&content, line, NPTS_KEY, "'# npts = <integer>'")?;

        if npts > self.config.capacity {
            return Err(ParseError::CapacityExceeded {
                declared: npts,
                capacity: self.config.capacity,
            });
        }

        let (line, content) = next_line()?.ok_or(ParseError::MissingHeader {
            line: 2,
            expected: "'# num of variables = <integer>'",
        })?;
        let nvars = parse_count_header(
            &content,
            line,
            NVARS_KEY,
            "'# num of variables = <integer>'",
        )?;

        let mut names = Vec::with_capacity(nvars);
        for k in 0..nvars {
            let (line, content) = next_line()?.ok_or(ParseError::MissingHeader {
                line: 3 + k,
                expected: "'# <variable name>'",
            })?;
            names.push(parse_name_header(&content, line)?);
        }

        info!("reading initial model from {}", source);
        info!("{} points found in the initial model", npts);
        info!("{} variables found in the initial model file", nvars);

        let mut report = ParseReport::new(source);
        let slots = self.resolve_columns(&names, &mut report);

        let mut builder =
            ProfileBuilder::with_capacity(Arc::clone(&self.schema), self.config.capacity);
        builder.reserve(npts)?;

        let expected_fields = 1 + nvars;
        let mut row = vec![0.0; self.schema.len()];
        let mut values = Vec::with_capacity(expected_fields);
        let mut rows = 0;

        while rows < npts {
            let (line, content) = next_line()?.ok_or(ParseError::Truncated {
                expected: npts,
                found: rows,
            })?;
            if content.trim().is_empty() {
                continue;
            }

            values.clear();
            for (field, token) in content.split_whitespace().enumerate() {
                let value = parse_number(token).ok_or_else(|| ParseError::InvalidNumber {
                    line,
                    field: field + 1,
                    value: token.to_string(),
                })?;
                values.push(value);
            }
            if values.len() != expected_fields {
                return Err(ParseError::FieldCount {
                    line,
                    expected: expected_fields,
                    found: values.len(),
                });
            }

            row.fill(0.0);
            for (value, slot) in values[1..].iter().zip(&slots) {
                if let Some(index) = slot {
                    row[*index] = *value;
                }
            }
            builder.push(values[0], &row)?;
            rows += 1;
        }

        let table = builder.build()?;
        report.points = table.len();

        Ok(ParsedProfile { table, report })
    }

    /// Map declared names to slot storage indices and record the resolution warnings
    fn resolve_columns(&self, names: &[String], report: &mut ParseReport) -> Vec<Option<usize>> {
        let schema = &self.schema;
        let mut seen = HashSet::new();
        let mut duplicates = HashSet::new();
        let mut slots = Vec::with_capacity(names.len());

        for (position, name) in names.iter().enumerate() {
            let slot = schema.resolve(name);
            let slot_index = slot.map(|s| schema.slot_index(s));

            match slot {
                Some(slot) => {
                    debug!("column {} '{}' -> {}", position + 1, name, slot);
                    if !seen.insert(slot) && duplicates.insert(slot) {
                        report.warn(ParseWarning::DuplicateColumn(name.clone()));
                    }
                }
                None => report.warn(ParseWarning::UnmatchedColumn(name.clone())),
            }

            report.columns.push(ColumnResolution {
                name: name.clone(),
                position,
                slot_index,
            });
            slots.push(slot_index);
        }

        for (slot, label) in [
            (Slot::Density, DENSITY),
            (Slot::Temperature, TEMPERATURE),
            (Slot::Pressure, PRESSURE),
        ] {
            if !seen.contains(&slot) {
                report.warn(ParseWarning::MissingVariable(label.to_string()));
            }
        }

        for slot in schema.species_slots() {
            if !seen.contains(&slot) {
                report.warn(ParseWarning::MissingSpecies(schema.slot_name(slot).to_string()));
            }
        }

        slots
    }
}

/// Parse `# <key> = <integer>`
fn parse_count_header(
    content: &str,
    line: usize,
    key: &str,
    expected: &'static str,
) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidHeader {
        line,
        expected,
        content: content.to_string(),
    };

    let body = content.trim().strip_prefix('#').ok_or_else(invalid)?;
    let (found_key, value) = body.split_once('=').ok_or_else(invalid)?;
    if found_key.trim() != key {
        return Err(invalid());
    }
    value.trim().parse().map_err(|_| invalid())
}

/// Parse `# <name>`, trimming surrounding whitespace
fn parse_name_header(content: &str, line: usize) -> Result<String, ParseError> {
    content
        .trim_start()
        .strip_prefix('#')
        .map(|name| name.trim().to_string())
        .ok_or_else(|| ParseError::InvalidHeader {
            line,
            expected: "'# <variable name>'",
            content: content.to_string(),
        })
}

/// Parse a floating-point field, accepting Fortran `D` exponents
fn parse_number(token: &str) -> Option<f64> {
    token.parse().ok().or_else(|| {
        if token.contains(['D', 'd']) {
            token.replace(['D', 'd'], "E").parse().ok()
        } else {
            None
        }
    })
}
