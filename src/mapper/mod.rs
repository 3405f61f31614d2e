//! # Spatial Mapper
//!
//! Projects a one-dimensional [`ProfileTable`] onto cells of a three-dimensional grid.
//!
//! Each cell is described by a [`GridCellQuery`]: the offset from the profile origin
//! (the star's center) to the cell center, the cell spacing, and a supersampling factor
//! `nsub`. The mapper splits the cell into `nsub³` sub-cells placed symmetrically about
//! the center. For each sub-cell it interpolates density, temperature and every species
//! at that sub-cell's distance from the origin, then averages the samples field by field.
//! `nsub = 1` is plain point sampling at the cell center.
//!
//! When both the stellar radius and the cell's distance from the origin are below the
//! largest cell spacing, the whole star fits inside one cell. In that case the central
//! sample of the profile is returned directly.
//!
//! The mapper output is a [`PrimitiveState`]. Its mass fractions are *not*
//! normalized. [`initialize_cell`] renormalizes them and closes the state with an
//! [`EquationOfState`] to produce the conserved variables stored on the grid.

mod eos;
mod error;
mod grid;

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::profile::ProfileTable;
use crate::schema::Slot;

pub use eos::{
    initialize_cell, ConservedState, EquationOfState, GammaLaw, ThermoState, ATOMIC_MASS_UNIT,
    BOLTZMANN,
};
pub use error::GridError;
pub use grid::{CellRecord, UniformGrid};

/// Location and extent of one grid cell relative to a profile origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCellQuery {
    /// Vector from the profile origin to the cell center
    pub offset: [f64; 3],
    /// Cell size along each axis
    pub spacing: [f64; 3],
    /// Sub-cells per axis used for averaging
    pub nsub: NonZeroUsize,
}

impl GridCellQuery {
    /// Point-sampling query (`nsub = 1`)
    pub fn new(offset: [f64; 3], spacing: [f64; 3]) -> Self {
        Self {
            offset,
            spacing,
            nsub: NonZeroUsize::MIN,
        }
    }

    /// Set the supersampling factor
    pub fn with_nsub(mut self, nsub: NonZeroUsize) -> Self {
        self.nsub = nsub;
        self
    }

    /// Distance from the profile origin to the cell center
    pub fn distance(&self) -> f64 {
        norm(self.offset)
    }

    /// Largest spacing component
    pub fn max_spacing(&self) -> f64 {
        self.spacing.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Sub-cell sample positions, x fastest
    pub fn sample_points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        let nsub = self.nsub.get();
        let n = nsub as f64;
        let shift = 0.5 * (1.0 - n);
        let coord = move |axis: usize, i: usize| {
            self.offset[axis] + (i as f64 + shift) * self.spacing[axis] / n
        };

        (0..nsub).flat_map(move |k| {
            (0..nsub).flat_map(move |j| {
                (0..nsub).map(move |i| [coord(0, i), coord(1, j), coord(2, k)])
            })
        })
    }
}

/// Interpolated density, temperature and composition of one cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveState {
    /// Mass density
    pub density: f64,
    /// Temperature
    pub temperature: f64,
    /// Mass fractions in network order (not guaranteed to sum to one)
    pub mass_fractions: Vec<f64>,
}

impl PrimitiveState {
    /// All-zero state for `species` mass fractions
    pub fn zeroed(species: usize) -> Self {
        Self {
            density: 0.0,
            temperature: 0.0,
            mass_fractions: vec![0.0; species],
        }
    }

    /// Sum of the mass fractions
    pub fn composition_sum(&self) -> f64 {
        self.mass_fractions.iter().sum()
    }

    /// Divide each mass fraction by their sum.
    ///
    /// Left unchanged when the sum is zero, negative or not finite, since there is no
    /// meaningful normalization in that case.
    pub fn normalize(&mut self) {
        let sum = self.composition_sum();
        if sum > 0.0 && sum.is_finite() {
            for x in &mut self.mass_fractions {
                *x /= sum;
            }
        }
    }

    /// Normalized copy
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

/// Samples a profile table onto grid cells
#[derive(Debug, Clone, Copy)]
pub struct SpatialMapper<'a> {
    table: &'a ProfileTable,
    stellar_radius: f64,
    species: usize,
}

impl<'a> SpatialMapper<'a> {
    /// Mapper over all species of `table`, using its outermost radius as stellar radius
    pub fn new(table: &'a ProfileTable) -> Self {
        Self {
            table,
            stellar_radius: table.outer_radius(),
            species: table.species_count(),
        }
    }

    /// Override the stellar radius used by the single-cell check
    pub fn with_stellar_radius(mut self, radius: f64) -> Self {
        self.stellar_radius = radius;
        self
    }

    /// Only produce the first `count` species (capped at the table's species count)
    pub fn with_species_count(mut self, count: usize) -> Self {
        self.species = count.min(self.table.species_count());
        self
    }

    /// The mapped table
    pub fn table(&self) -> &'a ProfileTable {
        self.table
    }

    /// Stellar radius used by the single-cell check
    pub fn stellar_radius(&self) -> f64 {
        self.stellar_radius
    }

    /// Number of species produced per cell
    pub fn species_count(&self) -> usize {
        self.species
    }

    /// Interpolate the profile onto one cell
    pub fn map(&self, query: &GridCellQuery) -> PrimitiveState {
        let max_dx = query.max_spacing();

        if self.stellar_radius <= max_dx && query.distance() < max_dx {
            return self.central_state();
        }

        let table = self.table;
        let mut state = PrimitiveState::zeroed(self.species);

        for point in query.sample_points() {
            let r = norm(point);
            let index = table.locate(r);

            state.density += table.interpolate_from(Slot::Density, r, index);
            state.temperature += table.interpolate_from(Slot::Temperature, r, index);
            for (n, x) in state.mass_fractions.iter_mut().enumerate() {
                *x += table.interpolate_from(Slot::Species(n), r, index);
            }
        }

        let samples = query.nsub.get().pow(3) as f64;
        state.density /= samples;
        state.temperature /= samples;
        for x in &mut state.mass_fractions {
            *x /= samples;
        }

        state
    }

    /// State at the innermost profile point
    fn central_state(&self) -> PrimitiveState {
        let table = self.table;
        PrimitiveState {
            density: table.density()[0],
            temperature: table.temperature()[0],
            mass_fractions: (0..self.species).map(|n| table.species(n)[0]).collect(),
        }
    }
}

#[inline]
fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
