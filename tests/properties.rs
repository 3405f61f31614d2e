//! Property tests for interpolation, cell mapping and column resolution

use std::io::Cursor;
use std::num::NonZeroUsize;
use std::sync::Arc;

use initial_model::interpolate::{interpolate, locate};
use initial_model::mapper::{GridCellQuery, SpatialMapper};
use initial_model::parser::ProfileParser;
use initial_model::profile::ProfileBuilder;
use initial_model::schema::{Slot, VariableSchema};
use proptest::prelude::*;

/// Strictly increasing radii starting at zero, paired with arbitrary values
fn profile_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((0.1f64..10.0, -1e6f64..1e6), 2..40).prop_map(|rows| {
        let mut r = 0.0;
        let mut radius = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        for (step, value) in rows {
            radius.push(r);
            values.push(value);
            r += step;
        }
        (radius, values)
    })
}

fn within(value: f64, a: f64, b: f64) -> bool {
    value >= a.min(b) && value <= a.max(b)
}

proptest! {
    /// Interpolating at a sample radius returns that sample exactly
    #[test]
    fn test_exact_at_samples((radius, values) in profile_strategy()) {
        for (r, v) in radius.iter().zip(&values) {
            prop_assert_eq!(interpolate(*r, &radius, &values), *v);
        }
    }

    /// Outside the tabulated range the end samples are returned
    #[test]
    fn test_clamped_outside((radius, values) in profile_strategy(), below in 0.0f64..1e3, above in 1e-3f64..1e3) {
        let n = radius.len();
        prop_assert_eq!(interpolate(radius[0] - below, &radius, &values), values[0]);
        prop_assert_eq!(interpolate(radius[n - 1] + above, &radius, &values), values[n - 1]);
    }

    /// Values in the first and last intervals stay between their end samples
    #[test]
    fn test_edge_intervals_contained((radius, values) in profile_strategy(), t in 0.0f64..=1.0) {
        let n = radius.len();

        let x = radius[0] + t * (radius[1] - radius[0]);
        prop_assert!(within(interpolate(x, &radius, &values), values[0], values[1]));

        let x = radius[n - 2] + t * (radius[n - 1] - radius[n - 2]);
        prop_assert!(within(interpolate(x, &radius, &values), values[n - 2], values[n - 1]));
    }

    /// The located bracket always satisfies c[i-1] < x <= c[i] inside the table
    #[test]
    fn test_locate_brackets((radius, _values) in profile_strategy(), t in 0.0f64..1.0) {
        let n = radius.len();
        let x = radius[0] + t * (radius[n - 2] - radius[0]);
        let i = locate(x, &radius);
        if x <= radius[0] {
            prop_assert_eq!(i, 0);
        } else {
            prop_assert!(i >= 1 && i <= n - 2);
            prop_assert!(radius[i - 1] < x && x <= radius[i]);
        }
    }

    /// Linear data is reproduced everywhere inside the table
    #[test]
    fn test_linear_profile_reproduced((radius, _values) in profile_strategy(), slope in -10.0f64..10.0, t in 0.0f64..=1.0) {
        let values: Vec<f64> = radius.iter().map(|r| slope * r + 3.0).collect();
        let x = t * radius[radius.len() - 1];
        let expected = slope * x + 3.0;
        let actual = interpolate(x, &radius, &values);
        prop_assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }

    /// Supersampling a uniform profile returns the uniform value for every nsub
    #[test]
    fn test_constant_profile_supersampling(
        offset in prop::array::uniform3(-20.0f64..20.0),
        spacing in prop::array::uniform3(0.01f64..2.0),
        nsub in 1usize..6,
        density in 1e-3f64..1e3,
    ) {
        let schema = Arc::new(VariableSchema::with_species(["he4"]).unwrap());
        let mut builder = ProfileBuilder::new(schema);
        for r in [0.0, 1.0, 5.0, 10.0] {
            builder.push(r, &[density, 1e6, 1e15, 1.0]).unwrap();
        }
        let table = builder.build().unwrap();

        let query = GridCellQuery::new(offset, spacing).with_nsub(NonZeroUsize::new(nsub).unwrap());
        let state = SpatialMapper::new(&table).map(&query);
        prop_assert!((state.density - density).abs() <= 1e-12 * density);
        prop_assert!((state.temperature - 1e6).abs() <= 1e-12 * 1e6);
        prop_assert!((state.mass_fractions[0] - 1.0).abs() <= 1e-12);
    }

    /// Declaring the columns in any order yields the same table
    #[test]
    fn test_column_order_invariant(order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle()) {
        let names = ["density", "temperature", "pressure", "he4", "c12"];
        let rows = [
            [0.0, 10.0, 1e7, 3e17, 0.6, 0.4],
            [1.0, 5.0, 5e6, 2e17, 0.5, 0.5],
            [2.0, 1.0, 1e6, 1e17, 0.4, 0.6],
        ];

        let mut text = format!("# npts = {}\n# num of variables = {}\n", rows.len(), names.len());
        for &k in &order {
            text.push_str(&format!("# {}\n", names[k]));
        }
        for row in &rows {
            text.push_str(&row[0].to_string());
            for &k in &order {
                text.push_str(&format!(" {}", row[k + 1]));
            }
            text.push('\n');
        }

        let schema = Arc::new(VariableSchema::with_species(["he4", "c12"]).unwrap());
        let parsed = ProfileParser::new(schema)
            .parse_reader(Cursor::new(text), "shuffled")
            .unwrap();
        prop_assert!(!parsed.report.has_warnings());

        let table = parsed.table;
        let slots = [Slot::Density, Slot::Temperature, Slot::Pressure, Slot::Species(0), Slot::Species(1)];
        for (k, slot) in slots.iter().enumerate() {
            let expected: Vec<f64> = rows.iter().map(|row| row[k + 1]).collect();
            prop_assert_eq!(table.column(*slot), &expected[..]);
        }
    }
}
