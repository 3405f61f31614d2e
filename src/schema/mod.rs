//! # Profile Variable Schema
//!
//! Every profile table stores the same fixed set of variables, established before any
//! file is parsed:
//!
//! | Slot | Index | Column label |
//! |------|-------|--------------|
//! | density | 0 | `density` |
//! | temperature | 1 | `temperature` |
//! | pressure | 2 | `pressure` |
//! | species n | 3 + n | exact species name from the [`Network`] |
//!
//! The radius is not a slot: it is the coordinate every slot is sampled against.
//!
//! ## Label Resolution
//!
//! [`VariableSchema::resolve`] maps a free-form column label onto a slot, checking in
//! order: `density`, `temperature`, `pressure`, then the network's species names.
//! Labels are compared exactly (case-sensitive). Anything else resolves to `None`
//! and is treated as an unused column by the parser.

/// Profile column name constants.
pub mod columns;
mod error;
mod network;


use std::fmt;

pub use columns::*;
pub use error::SchemaError;
pub use network::Network;

/// One semantic field of a profile table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Mass density
    Density,
    /// Temperature
    Temperature,
    /// Pressure
    Pressure,
    /// Mass fraction of the n-th network species
    Species(usize),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Density => f.write_str(DENSITY),
            Slot::Temperature => f.write_str(TEMPERATURE),
            Slot::Pressure => f.write_str(PRESSURE),
            Slot::Species(n) => write!(f, "species[{}]", n),
        }
    }
}

/// The fixed set of slots every profile table of a simulation carries.
///
/// Built once from the active network and shared (usually behind an `Arc`) by the
/// parser, every table it produces, and the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSchema {
    network: Network,
}

impl VariableSchema {
    /// Create a schema for the given network.
    ///
    /// Fails if a species is named like one of the thermodynamic columns, since such a
    /// species could never be resolved.
    pub fn new(network: Network) -> Result<Self, SchemaError> {
        if let Some(name) = network
            .names()
            .iter()
            .find(|name| THERMO_COLUMNS.contains(&name.as_str()))
        {
            return Err(SchemaError::ReservedName(name.clone()));
        }

        Ok(Self { network })
    }

    /// Convenience constructor from a list of species names
    pub fn with_species<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Network::new(names)?)
    }

    /// The species network this schema was built from
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Number of species slots
    pub fn species_count(&self) -> usize {
        self.network.len()
    }

    /// Total number of slots (thermodynamic + species)
    pub fn len(&self) -> usize {
        NUM_THERMO_SLOTS + self.network.len()
    }

    /// Always false: the thermodynamic slots are always present
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Storage index of a slot. Species indices are not range-checked here.
    pub fn slot_index(&self, slot: Slot) -> usize {
        match slot {
            Slot::Density => 0,
            Slot::Temperature => 1,
            Slot::Pressure => 2,
            Slot::Species(n) => NUM_THERMO_SLOTS + n,
        }
    }

    /// Inverse of [`slot_index`](Self::slot_index)
    pub fn slot_at(&self, index: usize) -> Option<Slot> {
        match index {
            0 => Some(Slot::Density),
            1 => Some(Slot::Temperature),
            2 => Some(Slot::Pressure),
            i if i < self.len() => Some(Slot::Species(i - NUM_THERMO_SLOTS)),
            _ => None,
        }
    }

    /// Column label of a slot, as it appears in profile files
    pub fn slot_name(&self, slot: Slot) -> &str {
        match slot {
            Slot::Density => DENSITY,
            Slot::Temperature => TEMPERATURE,
            Slot::Pressure => PRESSURE,
            Slot::Species(n) => self
                .network
                .names()
                .get(n)
                .map(String::as_str)
                .unwrap_or("<unknown species>"),
        }
    }

    /// All slots in storage order
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.len()).filter_map(move |i| self.slot_at(i))
    }

    /// Species slots in network order
    pub fn species_slots(&self) -> impl Iterator<Item = Slot> {
        (0..self.species_count()).map(Slot::Species)
    }

    /// Resolve a column label onto a slot
    pub fn resolve(&self, label: &str) -> Option<Slot> {
        match label {
            DENSITY => Some(Slot::Density),
            TEMPERATURE => Some(Slot::Temperature),
            PRESSURE => Some(Slot::Pressure),
            other => self.network.position(other).map(Slot::Species),
        }
    }
}
