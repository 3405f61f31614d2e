use std::fmt;

use serde::{Deserialize, Serialize};

use super::ProfileTable;

/// Range information for one profile variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSummary {
    /// Column label
    pub name: String,
    /// Value at the innermost point
    pub central: f64,
    /// Value at the outermost point
    pub surface: f64,
    /// Smallest value in the column
    pub min: f64,
    /// Largest value in the column
    pub max: f64,
}

/// Overview of a profile table, suitable for printing or JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Number of sample points
    pub points: usize,
    /// Innermost radius
    pub inner_radius: f64,
    /// Outermost radius
    pub outer_radius: f64,
    /// Per-slot ranges in schema order
    pub variables: Vec<VariableSummary>,
}

impl ProfileSummary {
    pub(super) fn from_table(table: &ProfileTable) -> Self {
        let schema = table.schema();
        let variables = schema
            .slots()
            .map(|slot| {
                let column = table.column(slot);
                let (min, max) = column
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                VariableSummary {
                    name: schema.slot_name(slot).to_string(),
                    central: column[0],
                    surface: column[column.len() - 1],
                    min,
                    max,
                }
            })
            .collect();

        Self {
            points: table.len(),
            inner_radius: table.inner_radius(),
            outer_radius: table.outer_radius(),
            variables,
        }
    }
}

impl fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Profile: {} points, r = [{:.6e}, {:.6e}]",
            self.points, self.inner_radius, self.outer_radius
        )?;
        writeln!(
            f,
            "  {:<16} {:>14} {:>14} {:>14} {:>14}",
            "variable", "central", "surface", "min", "max"
        )?;
        for var in &self.variables {
            writeln!(
                f,
                "  {:<16} {:>14.6e} {:>14.6e} {:>14.6e} {:>14.6e}",
                var.name, var.central, var.surface, var.min, var.max
            )?;
        }
        Ok(())
    }
}
