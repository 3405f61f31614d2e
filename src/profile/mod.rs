//! # Radial Profile Tables
//!
//! A [`ProfileTable`] holds one star's structure as a function of radius: a strictly
//! increasing radius column plus one value column per [`Slot`] of the shared
//! [`VariableSchema`]. Slots that no input provided stay zero-filled.
//!
//! Tables are assembled with a [`ProfileBuilder`] and are immutable once built. Because
//! nothing can mutate a finished table, any number of threads can sample it at once;
//! the registry hands them out as `Arc<ProfileTable>`.
//!
//! ```rust
//! use std::sync::Arc;
//! use initial_model::profile::ProfileBuilder;
//! use initial_model::schema::{Slot, VariableSchema};
//!
//! let schema = Arc::new(VariableSchema::with_species(["he4"])?);
//! let mut builder = ProfileBuilder::new(schema);
//! // row layout: density, temperature, pressure, he4
//! builder.push(0.0, &[10.0, 1e7, 1e17, 1.0])?;
//! builder.push(1.0, &[5.0, 5e6, 1e16, 1.0])?;
//! builder.push(2.0, &[1.0, 1e6, 1e15, 1.0])?;
//! let table = builder.build()?;
//!
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.interpolate(Slot::Density, 0.5), 7.5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod summary;


use std::sync::Arc;

use crate::interpolate;
use crate::schema::{Slot, VariableSchema};

pub use error::ProfileError;
pub use summary::{ProfileSummary, VariableSummary};

/// Default maximum number of sample points per profile
pub const CAPACITY: usize = 10_000;

/// One star's radial structure, immutable once built
#[derive(Debug, Clone)]
pub struct ProfileTable {
    schema: Arc<VariableSchema>,
    radius: Box<[f64]>,
    values: Box<[Box<[f64]>]>,
}

impl ProfileTable {
    /// Number of sample points
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    /// Always false for a built table
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// The schema this table was built against
    pub fn schema(&self) -> &Arc<VariableSchema> {
        &self.schema
    }

    /// Number of species slots
    pub fn species_count(&self) -> usize {
        self.schema.species_count()
    }

    /// Radius column
    pub fn radius(&self) -> &[f64] {
        &self.radius
    }

    /// Value column of a slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is a species index outside the schema.
    pub fn column(&self, slot: Slot) -> &[f64] {
        &self.values[self.schema.slot_index(slot)]
    }

    /// Value column of a slot, or `None` for a species index outside the schema
    pub fn get_column(&self, slot: Slot) -> Option<&[f64]> {
        self.values
            .get(self.schema.slot_index(slot))
            .map(|column| &column[..])
    }

    /// Density column
    pub fn density(&self) -> &[f64] {
        self.column(Slot::Density)
    }

    /// Temperature column
    pub fn temperature(&self) -> &[f64] {
        self.column(Slot::Temperature)
    }

    /// Pressure column
    pub fn pressure(&self) -> &[f64] {
        self.column(Slot::Pressure)
    }

    /// Mass fraction column of the n-th species
    pub fn species(&self, n: usize) -> &[f64] {
        self.column(Slot::Species(n))
    }

    /// Value of `slot` at sample point `index`
    pub fn value(&self, slot: Slot, index: usize) -> f64 {
        self.column(slot)[index]
    }

    /// Innermost radius
    pub fn inner_radius(&self) -> f64 {
        self.radius[0]
    }

    /// Outermost radius
    pub fn outer_radius(&self) -> f64 {
        self.radius[self.radius.len() - 1]
    }

    /// Bracket index for radius `r`, see [`interpolate::locate`]
    pub fn locate(&self, r: f64) -> usize {
        interpolate::locate(r, &self.radius)
    }

    /// Interpolate `slot` at radius `r`
    pub fn interpolate(&self, slot: Slot, r: f64) -> f64 {
        interpolate::interpolate(r, &self.radius, self.column(slot))
    }

    /// Interpolate `slot` at radius `r` using a bracket index from [`locate`](Self::locate)
    pub fn interpolate_from(&self, slot: Slot, r: f64, index: usize) -> f64 {
        interpolate::interpolate_from(r, &self.radius, self.column(slot), index)
    }

    /// Summarize the table for reports
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary::from_table(self)
    }
}

/// Incrementally assembles a [`ProfileTable`].
///
/// Rows are pushed in radius order, one value per schema slot. All structural checks
/// (capacity, row width, radius ordering) happen here, so a successfully built table
/// is always safe to interpolate.
#[derive(Debug)]
pub struct ProfileBuilder {
    schema: Arc<VariableSchema>,
    capacity: usize,
    radius: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl ProfileBuilder {
    /// Create a builder with the default [`CAPACITY`]
    pub fn new(schema: Arc<VariableSchema>) -> Self {
        Self::with_capacity(schema, CAPACITY)
    }

    /// Create a builder accepting at most `capacity` points
    pub fn with_capacity(schema: Arc<VariableSchema>, capacity: usize) -> Self {
        let values = vec![Vec::new(); schema.len()];
        Self {
            schema,
            capacity,
            radius: Vec::new(),
            values,
        }
    }

    /// Pre-allocate room for `points` rows, failing if that exceeds the capacity.
    ///
    /// At most [`CAPACITY`] rows are allocated up front; columns grow on push beyond that,
    /// so a declared count larger than the actual data never allocates for it.
    pub fn reserve(&mut self, points: usize) -> Result<(), ProfileError> {
        if points > self.capacity {
            return Err(ProfileError::CapacityExceeded {
                count: points,
                capacity: self.capacity,
            });
        }
        let points = points.min(CAPACITY);
        self.radius.reserve(points);
        for column in &mut self.values {
            column.reserve(points);
        }
        Ok(())
    }

    /// Number of rows pushed so far
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    /// Whether no rows have been pushed
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// Append a sample point. `row` holds one value per schema slot in storage order.
    pub fn push(&mut self, radius: f64, row: &[f64]) -> Result<(), ProfileError> {
        if row.len() != self.values.len() {
            return Err(ProfileError::RowWidth {
                row: self.radius.len(),
                expected: self.values.len(),
                found: row.len(),
            });
        }
        if self.radius.len() >= self.capacity {
            return Err(ProfileError::CapacityExceeded {
                count: self.radius.len() + 1,
                capacity: self.capacity,
            });
        }

        self.radius.push(radius);
        for (column, value) in self.values.iter_mut().zip(row) {
            column.push(*value);
        }
        Ok(())
    }

    /// Validate and freeze the table.
    ///
    /// A table needs at least one point, so building with no rows fails with
    /// [`ProfileError::Empty`]. Radii must be finite, non-negative and strictly increasing.
    pub fn build(self) -> Result<ProfileTable, ProfileError> {
        if self.radius.is_empty() {
            return Err(ProfileError::Empty);
        }

        for (index, &value) in self.radius.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidRadius { index, value });
            }
        }

        if let Some(index) = self.radius.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ProfileError::NonMonotoneRadius {
                index: index + 1,
                value: self.radius[index + 1],
                previous: self.radius[index],
            });
        }

        Ok(ProfileTable {
            schema: self.schema,
            radius: self.radius.into_boxed_slice(),
            values: self
                .values
                .into_iter()
                .map(Vec::into_boxed_slice)
                .collect(),
        })
    }
}
