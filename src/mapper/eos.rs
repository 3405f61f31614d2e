use serde::{Deserialize, Serialize};

use super::{GridCellQuery, PrimitiveState, SpatialMapper};

/// Boltzmann constant \[erg/K\]
pub const BOLTZMANN: f64 = 1.380649e-16;
/// Atomic mass unit \[g\]
pub const ATOMIC_MASS_UNIT: f64 = 1.66053906660e-24;

/// Complete thermodynamic state returned by an equation of state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermoState {
    /// Mass density
    pub density: f64,
    /// Temperature
    pub temperature: f64,
    /// Pressure
    pub pressure: f64,
    /// Internal energy per unit mass
    pub specific_internal_energy: f64,
}

/// Closes a (density, temperature, composition) triple into a full thermodynamic state.
///
/// Implementations are called concurrently from grid sweeps and must be `Sync`.
pub trait EquationOfState: Sync {
    /// Evaluate the state for density/temperature input.
    ///
    /// `state.mass_fractions` is expected to be normalized.
    fn evaluate(&self, state: &PrimitiveState) -> ThermoState;
}

/// Ideal gas with a constant adiabatic index and mean molecular weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GammaLaw {
    /// Adiabatic index
    pub gamma: f64,
    /// Mean molecular weight in atomic mass units
    pub mu: f64,
}

impl Default for GammaLaw {
    fn default() -> Self {
        Self {
            gamma: 5.0 / 3.0,
            mu: 0.6,
        }
    }
}

impl GammaLaw {
    /// Create a gamma-law EOS
    pub fn new(gamma: f64, mu: f64) -> Self {
        Self { gamma, mu }
    }
}

impl EquationOfState for GammaLaw {
    fn evaluate(&self, state: &PrimitiveState) -> ThermoState {
        let specific_gas_constant = BOLTZMANN / (self.mu * ATOMIC_MASS_UNIT);
        let pressure = state.density * specific_gas_constant * state.temperature;
        let specific_internal_energy =
            specific_gas_constant * state.temperature / (self.gamma - 1.0);

        ThermoState {
            density: state.density,
            temperature: state.temperature,
            pressure,
            specific_internal_energy,
        }
    }
}

/// Conserved variables of one cell at rest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConservedState {
    /// Mass density
    pub density: f64,
    /// Momentum density (zero for an initial model at rest)
    pub momentum: [f64; 3],
    /// Internal energy density ρe
    pub internal_energy: f64,
    /// Total energy density ρE
    pub total_energy: f64,
    /// Partial densities ρXᵢ in network order
    pub partial_densities: Vec<f64>,
    /// Temperature
    pub temperature: f64,
    /// Pressure from the EOS
    pub pressure: f64,
}

impl ConservedState {
    /// Build the conserved state of a cell at rest.
    ///
    /// `primitive` should already carry normalized mass fractions.
    pub fn from_primitive(primitive: &PrimitiveState, thermo: &ThermoState) -> Self {
        let rho = primitive.density;
        let internal_energy = rho * thermo.specific_internal_energy;

        Self {
            density: rho,
            momentum: [0.0; 3],
            internal_energy,
            total_energy: internal_energy,
            partial_densities: primitive.mass_fractions.iter().map(|x| rho * x).collect(),
            temperature: thermo.temperature,
            pressure: thermo.pressure,
        }
    }
}

/// Map one cell, renormalize its composition and close it with `eos`
pub fn initialize_cell<E: EquationOfState + ?Sized>(
    mapper: &SpatialMapper<'_>,
    eos: &E,
    query: &GridCellQuery,
) -> ConservedState {
    let primitive = mapper.map(query).normalized();
    let thermo = eos.evaluate(&primitive);
    ConservedState::from_primitive(&primitive, &thermo)
}
