use std::num::NonZeroUsize;
use std::sync::Arc;

use super::*;
use crate::profile::ProfileBuilder;
use crate::schema::VariableSchema;

fn nsub(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= 1e-12 * scale,
        "{actual} != {expected}"
    );
}

/// r = 0, 1, 2 with falling density and temperature, pure he4
fn he4_table() -> ProfileTable {
    let schema = Arc::new(VariableSchema::with_species(["he4"]).unwrap());
    let mut builder = ProfileBuilder::new(schema);
    builder.push(0.0, &[10.0, 1e7, 3e17, 1.0]).unwrap();
    builder.push(1.0, &[5.0, 5e6, 2e17, 1.0]).unwrap();
    builder.push(2.0, &[1.0, 1e6, 1e17, 1.0]).unwrap();
    builder.build().unwrap()
}

fn constant_table(species: &[f64]) -> ProfileTable {
    let names: Vec<String> = (0..species.len()).map(|n| format!("x{n}")).collect();
    let schema = Arc::new(VariableSchema::with_species(&names).unwrap());
    let mut builder = ProfileBuilder::new(schema);
    for r in [0.0, 0.5, 1.5, 3.0, 8.0] {
        let mut row = vec![2.0, 3e6, 4e15];
        row.extend_from_slice(species);
        builder.push(r, &row).unwrap();
    }
    builder.build().unwrap()
}

#[test]
fn test_point_sampling_inside_profile() {
    let table = he4_table();
    let mapper = SpatialMapper::new(&table);
    let query = GridCellQuery::new([0.5, 0.0, 0.0], [0.1; 3]);

    let state = mapper.map(&query);
    assert_eq!(state.density, 7.5);
    assert_eq!(state.temperature, 7.5e6);
    assert_eq!(state.mass_fractions, vec![1.0]);
}

#[test]
fn test_point_sampling_beyond_surface_is_clamped() {
    let table = he4_table();
    let mapper = SpatialMapper::new(&table);
    let query = GridCellQuery::new([0.0, 10.0, 0.0], [0.1; 3]);

    let state = mapper.map(&query);
    assert_eq!(state.density, 1.0);
    assert_eq!(state.temperature, 1e6);
}

#[test]
fn test_unresolved_star_returns_central_state() {
    let table = he4_table();
    let mapper = SpatialMapper::new(&table);
    assert_eq!(mapper.stellar_radius(), 2.0);

    let query = GridCellQuery::new([1.0, 0.0, 0.0], [4.0, 1.0, 1.0]).with_nsub(nsub(3));
    let state = mapper.map(&query);
    assert_eq!(state.density, 10.0);
    assert_eq!(state.temperature, 1e7);
    assert_eq!(state.mass_fractions, vec![1.0]);
}

#[test]
fn test_no_short_circuit_far_from_center() {
    let table = he4_table();
    let mapper = SpatialMapper::new(&table);

    // star fits in one cell, but this cell is not the one holding it
    let query = GridCellQuery::new([5.0, 0.0, 0.0], [4.0; 3]);
    assert_eq!(mapper.map(&query).density, 1.0);

    // resolved star never short-circuits, even at the origin
    let query = GridCellQuery::new([0.0; 3], [1.0; 3]);
    let resolved = SpatialMapper::new(&table).with_stellar_radius(1.5);
    assert_eq!(resolved.map(&query).density, 10.0);
    let state = resolved.map(&GridCellQuery::new([0.25, 0.0, 0.0], [1.0; 3]));
    assert_eq!(state.density, 8.75);
}

#[test]
fn test_stellar_radius_boundary_is_inclusive() {
    let table = he4_table();
    let query = GridCellQuery::new([0.5, 0.0, 0.0], [2.0; 3]);

    let at_boundary = SpatialMapper::new(&table).with_stellar_radius(2.0);
    assert_eq!(at_boundary.map(&query).density, 10.0);

    let above = SpatialMapper::new(&table).with_stellar_radius(2.5);
    assert_eq!(above.map(&query).density, 7.5);
}

#[test]
fn test_supersampling_constant_profile() {
    let table = constant_table(&[0.25, 0.75]);
    let mapper = SpatialMapper::new(&table);

    for n in [1, 2, 3, 4, 7] {
        let query = GridCellQuery::new([1.0, -2.0, 0.5], [0.4, 0.3, 0.2]).with_nsub(nsub(n));
        let state = mapper.map(&query);
        assert_close(state.density, 2.0);
        assert_close(state.temperature, 3e6);
        assert_close(state.mass_fractions[0], 0.25);
        assert_close(state.mass_fractions[1], 0.75);
    }
}

#[test]
fn test_sample_points_are_symmetric() {
    let query = GridCellQuery::new([1.0, 2.0, 3.0], [0.5, 1.0, 2.0]).with_nsub(nsub(3));
    let points: Vec<_> = query.sample_points().collect();
    assert_eq!(points.len(), 27);

    // x varies fastest
    assert_close(points[0][0], 1.0 - 0.5 / 3.0);
    assert_close(points[1][0], 1.0);
    assert_close(points[2][0], 1.0 + 0.5 / 3.0);
    assert_eq!(points[0][1], points[2][1]);

    for axis in 0..3 {
        let mean = points.iter().map(|p| p[axis]).sum::<f64>() / 27.0;
        assert_close(mean, query.offset[axis]);
    }

    let even = GridCellQuery::new([0.0; 3], [1.0; 3]).with_nsub(nsub(2));
    let first = even.sample_points().next().unwrap();
    assert_eq!(first, [-0.25, -0.25, -0.25]);
}

#[test]
fn test_query_geometry() {
    let query = GridCellQuery::new([3.0, 4.0, 0.0], [0.1, 0.3, 0.2]);
    assert_eq!(query.distance(), 5.0);
    assert_eq!(query.max_spacing(), 0.3);
    assert_eq!(query.nsub.get(), 1);
}

#[test]
fn test_species_count_is_capped() {
    let table = constant_table(&[0.5, 0.5]);
    let query = GridCellQuery::new([1.0, 0.0, 0.0], [0.1; 3]);

    let all = SpatialMapper::new(&table).with_species_count(10);
    assert_eq!(all.species_count(), 2);
    assert_eq!(all.map(&query).mass_fractions.len(), 2);

    let first = SpatialMapper::new(&table).with_species_count(1);
    assert_eq!(first.map(&query).mass_fractions, vec![0.5]);

    let none = SpatialMapper::new(&table).with_species_count(0);
    assert!(none.map(&query).mass_fractions.is_empty());
}

#[test]
fn test_normalize() {
    let mut state = PrimitiveState {
        density: 1.0,
        temperature: 1.0,
        mass_fractions: vec![0.2, 0.6],
    };
    assert_close(state.composition_sum(), 0.8);
    state.normalize();
    assert_close(state.mass_fractions[0], 0.25);
    assert_close(state.mass_fractions[1], 0.75);

    let zeroed = PrimitiveState::zeroed(3).normalized();
    assert_eq!(zeroed.mass_fractions, vec![0.0; 3]);
}

#[test]
fn test_gamma_law() {
    let eos = GammaLaw::default();
    assert_close(eos.gamma, 5.0 / 3.0);
    assert_eq!(eos.mu, 0.6);

    let state = PrimitiveState {
        density: 2.0,
        temperature: 1e7,
        mass_fractions: vec![1.0],
    };
    let thermo = eos.evaluate(&state);
    let expected = 2.0 * BOLTZMANN * 1e7 / (0.6 * ATOMIC_MASS_UNIT);
    assert_close(thermo.pressure / expected, 1.0);
    assert_close(
        thermo.pressure / (thermo.density * thermo.specific_internal_energy),
        eos.gamma - 1.0,
    );
    assert_eq!(thermo.temperature, 1e7);
}

#[test]
fn test_initialize_cell_renormalizes_composition() {
    let table = constant_table(&[0.2, 0.2]);
    let mapper = SpatialMapper::new(&table);
    let eos = GammaLaw::new(1.4, 1.0);
    let query = GridCellQuery::new([1.0, 0.0, 0.0], [0.1; 3]);

    let cell = initialize_cell(&mapper, &eos, &query);
    assert_close(cell.density, 2.0);
    assert_eq!(cell.momentum, [0.0; 3]);
    assert_eq!(cell.total_energy, cell.internal_energy);
    assert_close(cell.partial_densities[0], 1.0);
    assert_close(cell.partial_densities[1], 1.0);

    let thermo = eos.evaluate(&mapper.map(&query).normalized());
    assert_close(cell.internal_energy / (2.0 * thermo.specific_internal_energy), 1.0);
    assert_eq!(cell.pressure, thermo.pressure);
}

#[test]
fn test_grid_rejects_degenerate_axes() {
    let err = UniformGrid::new([0.0; 3], [1.0; 3], [4, 0, 4], [0.0; 3]).unwrap_err();
    assert_eq!(err, GridError::NoCells { axis: 1 });

    let err = UniformGrid::new([0.0; 3], [1.0, 1.0, -1.0], [4; 3], [0.0; 3]).unwrap_err();
    assert!(matches!(err, GridError::EmptyExtent { axis: 2, .. }));

    let err = UniformGrid::new([0.0; 3], [1.0, f64::NAN, 1.0], [4; 3], [0.0; 3]).unwrap_err();
    assert!(matches!(err, GridError::EmptyExtent { axis: 1, .. }));
}

#[test]
fn test_grid_cell_geometry() {
    let grid = UniformGrid::new([0.0; 3], [4.0, 4.0, 8.0], [4, 4, 4], [2.0; 3]).unwrap();
    assert_eq!(grid.dx(), [1.0, 1.0, 2.0]);
    assert_eq!(grid.cell_count(), 64);
    assert_eq!(grid.cell_offset([0, 0, 0]), [-1.5, -1.5, -1.0]);
    assert_eq!(grid.cell_offset([3, 1, 2]), [1.5, -0.5, 3.0]);

    assert_eq!(grid.unflatten(1), [1, 0, 0]);
    assert_eq!(grid.unflatten(4), [0, 1, 0]);
    assert_eq!(grid.unflatten(16), [0, 0, 1]);
    assert_eq!(grid.unflatten(63), [3, 3, 3]);

    let query = grid.cell_query(3, 1, 2, nsub(2));
    assert_eq!(query.offset, [1.5, -0.5, 3.0]);
    assert_eq!(query.spacing, [1.0, 1.0, 2.0]);
    assert_eq!(query.nsub.get(), 2);

    let moved = grid.with_center([0.0; 3]);
    assert_eq!(moved.cell_offset([0, 0, 0]), [0.5, 0.5, 1.0]);
}

#[test]
fn test_sweep_covers_grid_in_order() {
    let table = he4_table();
    let mapper = SpatialMapper::new(&table);
    let grid = UniformGrid::new([-1.0; 3], [1.0; 3], [2, 2, 2], [0.0; 3]).unwrap();

    let records = grid.sweep(&mapper, &GammaLaw::default(), nsub(1));
    assert_eq!(records.len(), 8);

    for (n, record) in records.iter().enumerate() {
        assert_eq!(record.index, grid.unflatten(n));
        assert_close(record.distance, 0.75f64.sqrt());
        // every corner cell sits at the same distance
        assert_eq!(record.state, records[0].state);
    }

    let expected = table.interpolate(crate::schema::Slot::Density, 0.75f64.sqrt());
    assert_close(records[0].state.density, expected);
    assert_eq!(records[0].offset, [-0.5, -0.5, -0.5]);
    assert_eq!(records[7].offset, [0.5, 0.5, 0.5]);
}
