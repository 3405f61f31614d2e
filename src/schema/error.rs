/// Errors that can occur while building a variable schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A species name was empty after trimming
    #[error("Species name at position {0} is empty")]
    EmptySpeciesName(usize),

    /// The same species name was listed more than once
    #[error("Duplicate species name: {0}")]
    DuplicateSpecies(String),

    /// A species name collides with a thermodynamic column name
    #[error("Species name '{0}' is reserved for a thermodynamic variable")]
    ReservedName(String),
}
