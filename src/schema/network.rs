use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// Ordered list of chemical species tracked by the active reaction network.
///
/// The order is significant: species slot `n` of a [`VariableSchema`](super::VariableSchema)
/// corresponds to `names()[n]`. Names are matched against profile columns exactly, without
/// case folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Network {
    names: Vec<String>,
}

impl Network {
    /// Create a network from an ordered list of species names.
    ///
    /// Names are trimmed. Empty names and duplicates are rejected.
    pub fn new<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut stored = Vec::new();

        for (index, name) in names.into_iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(SchemaError::EmptySpeciesName(index));
            }
            if !seen.insert(name.to_string()) {
                return Err(SchemaError::DuplicateSpecies(name.to_string()));
            }
            stored.push(name.to_string());
        }

        Ok(Self { names: stored })
    }

    /// A network with no species (pure hydrodynamics)
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Species names in slot order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of species
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the network tracks no species
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name` in the network, if present
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl TryFrom<Vec<String>> for Network {
    type Error = SchemaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Network::new(names)
    }
}

impl From<Network> for Vec<String> {
    fn from(network: Network) -> Self {
        network.names
    }
}
