//! # Model Registry
//!
//! Holds every initial model of a run, keyed by [`ModelId`]. Models are loaded during
//! the construction phase, once per id, and published as `Arc<ProfileTable>`. After
//! loading, the registry is only read: any number of grid sweeps may sample it
//! concurrently.
//!
//! A run can carry several stars at once (e.g. the primary and secondary of a binary),
//! each with its own profile and center, all parsed against the same schema.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::mapper::{GridCellQuery, PrimitiveState, SpatialMapper};
use crate::parser::{ParseError, ParseReport, ParserConfig, ProfileParser};
use crate::profile::ProfileTable;
use crate::schema::VariableSchema;

/// Identifier of one initial model slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub usize);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {}", self.0)
    }
}

/// Errors raised by the model registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The id already holds a model
    #[error("{0} is already initialized")]
    AlreadyInitialized(ModelId),

    /// The id holds no model
    #[error("{0} has not been initialized")]
    NotInitialized(ModelId),

    /// An inserted table was built against a different schema
    #[error("{0} was built against a different variable schema")]
    SchemaMismatch(ModelId),

    /// The profile file could not be parsed
    #[error("Failed to load profile: {0}")]
    Parse(#[from] ParseError),
}

/// Initial models of a run
#[derive(Debug)]
pub struct ModelRegistry {
    parser: ProfileParser,
    models: BTreeMap<ModelId, Arc<ProfileTable>>,
}

impl ModelRegistry {
    /// Empty registry parsing with the default configuration
    pub fn new(schema: Arc<VariableSchema>) -> Self {
        Self::with_parser_config(schema, ParserConfig::default())
    }

    /// Empty registry parsing with `config`
    pub fn with_parser_config(schema: Arc<VariableSchema>, config: ParserConfig) -> Self {
        Self {
            parser: ProfileParser::with_config(schema, config),
            models: BTreeMap::new(),
        }
    }

    /// Schema shared by every model
    pub fn schema(&self) -> &Arc<VariableSchema> {
        self.parser.schema()
    }

    /// Parse the profile at `path` into slot `id`.
    ///
    /// Fails without touching the registry if `id` is already initialized or the file
    /// cannot be parsed.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        id: ModelId,
        path: P,
    ) -> Result<ParseReport, RegistryError> {
        if self.is_initialized(id) {
            return Err(RegistryError::AlreadyInitialized(id));
        }

        let parsed = self.parser.parse_file(path)?;
        info!(
            "{} initialized with {} points from {}",
            id,
            parsed.table.len(),
            parsed.report.source
        );
        self.models.insert(id, Arc::new(parsed.table));
        Ok(parsed.report)
    }

    /// Store an externally built table in slot `id`
    pub fn insert(&mut self, id: ModelId, table: ProfileTable) -> Result<(), RegistryError> {
        if self.is_initialized(id) {
            return Err(RegistryError::AlreadyInitialized(id));
        }
        if table.schema().as_ref() != self.schema().as_ref() {
            return Err(RegistryError::SchemaMismatch(id));
        }

        self.models.insert(id, Arc::new(table));
        Ok(())
    }

    /// Whether slot `id` holds a model
    pub fn is_initialized(&self, id: ModelId) -> bool {
        self.models.contains_key(&id)
    }

    /// Model in slot `id`
    pub fn get(&self, id: ModelId) -> Result<&Arc<ProfileTable>, RegistryError> {
        self.models.get(&id).ok_or(RegistryError::NotInitialized(id))
    }

    /// Map model `id` onto one cell with the default mapper settings
    pub fn sample(
        &self,
        id: ModelId,
        query: &GridCellQuery,
    ) -> Result<PrimitiveState, RegistryError> {
        let table = self.get(id)?;
        Ok(SpatialMapper::new(table).map(query))
    }

    /// Initialized ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ModelId> + '_ {
        self.models.keys().copied()
    }

    /// Number of initialized models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model has been loaded
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
