//! # initial-model - Stellar Profiles on Simulation Grids
//!
//! `initial_model` loads one-dimensional initial models of stars (tabulated radial
//! profiles of density, temperature, pressure and composition) and maps them onto the
//! cells of a three-dimensional Cartesian simulation grid.
//!
//! ## Key Features
//!
//! - **Self-Describing Profiles**: Text files that name their own columns. Columns are
//!   matched against a fixed variable schema and a species network; unknown columns
//!   are dropped with a warning, missing ones are zero-filled.
//!
//! - **Clamped Linear Interpolation**: Bisection lookup with linear interpolation,
//!   clamped to the end samples outside the profile.
//!
//! - **Supersampled Cell Averaging**: Each cell is averaged over `nsub³` symmetric
//!   sub-points, with a short circuit for stars smaller than a single cell.
//!
//! - **Read-Only Sharing**: Profiles are immutable once built and are sampled from any
//!   number of threads during grid sweeps.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! use initial_model::prelude::*;
//!
//! let schema = Arc::new(VariableSchema::with_species(["helium-4", "carbon-12"])?);
//!
//! // Construction phase: load every model once
//! let mut registry = ModelRegistry::new(schema);
//! let report = registry.load(ModelId(0), "primary.dat")?;
//! println!("{report}");
//!
//! // Consumption phase: sample cells
//! let table = registry.get(ModelId(0))?;
//! let grid = UniformGrid::new([-1e9; 3], [1e9; 3], [32; 3], [0.0; 3])?;
//! let nsub = NonZeroUsize::new(2).ok_or("nsub must be positive")?;
//! let cells = grid.sweep(&SpatialMapper::new(table), &GammaLaw::default(), nsub);
//! println!("initialized {} cells", cells.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Profile File Format
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
//! ## Architecture
//!
//! - [`schema`]: variable slots, species network and label resolution
//! - [`profile`]: immutable radial profile tables and their builder
//! - [`interpolate`]: bisection lookup and clamped linear interpolation
//! - [`parser`]: profile file reader with diagnostic reports
//! - [`mapper`]: cell sampling, cell initialization and grid sweeps
//! - [`registry`]: model slots shared across a run

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod interpolate;
pub mod mapper;
pub mod parser;
pub mod profile;
pub mod registry;
pub mod schema;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::mapper::{
        initialize_cell, CellRecord, ConservedState, EquationOfState, GammaLaw, GridCellQuery,
        PrimitiveState, SpatialMapper, UniformGrid,
    };
    pub use crate::parser::{ParseError, ParseReport, ParseWarning, ParsedProfile, ProfileParser};
    pub use crate::profile::{ProfileBuilder, ProfileError, ProfileTable, CAPACITY};
    pub use crate::registry::{ModelId, ModelRegistry, RegistryError};
    pub use crate::schema::{Network, SchemaError, Slot, VariableSchema};
}
