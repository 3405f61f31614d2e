use std::num::NonZeroUsize;

use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use super::eos::{initialize_cell, ConservedState, EquationOfState};
use super::{GridCellQuery, GridError, SpatialMapper};

/// A uniform Cartesian grid covering `[prob_lo, prob_hi]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGrid {
    prob_lo: [f64; 3],
    dx: [f64; 3],
    cells: [usize; 3],
    center: [f64; 3],
}

/// Conserved state of one cell from a grid sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellRecord {
    /// Integer cell index (i, j, k)
    pub index: [usize; 3],
    /// Cell center relative to the profile origin
    pub offset: [f64; 3],
    /// Distance from the profile origin
    pub distance: f64,
    /// Cell state
    pub state: ConservedState,
}

impl UniformGrid {
    /// Create a grid with `cells` cells per axis over the box `[prob_lo, prob_hi]`,
    /// with the profile origin placed at `center`
    pub fn new(
        prob_lo: [f64; 3],
        prob_hi: [f64; 3],
        cells: [usize; 3],
        center: [f64; 3],
    ) -> Result<Self, GridError> {
        let mut dx = [0.0; 3];
        for axis in 0..3 {
            if cells[axis] == 0 {
                return Err(GridError::NoCells { axis });
            }
            let (lo, hi) = (prob_lo[axis], prob_hi[axis]);
            if hi <= lo || !(hi - lo).is_finite() {
                return Err(GridError::EmptyExtent { axis, lo, hi });
            }
            dx[axis] = (hi - lo) / cells[axis] as f64;
        }

        Ok(Self {
            prob_lo,
            dx,
            cells,
            center,
        })
    }

    /// Same grid with the profile origin moved to `center`
    pub fn with_center(mut self, center: [f64; 3]) -> Self {
        self.center = center;
        self
    }

    /// Cell spacing per axis
    pub fn dx(&self) -> [f64; 3] {
        self.dx
    }

    /// Cells per axis
    pub fn cells(&self) -> [usize; 3] {
        self.cells
    }

    /// Profile origin
    pub fn center(&self) -> [f64; 3] {
        self.center
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.iter().product()
    }

    /// Cell index of the n-th cell, x fastest
    pub fn unflatten(&self, n: usize) -> [usize; 3] {
        let [nx, ny, _] = self.cells;
        [n % nx, (n / nx) % ny, n / (nx * ny)]
    }

    /// Vector from the profile origin to the center of cell (i, j, k)
    pub fn cell_offset(&self, index: [usize; 3]) -> [f64; 3] {
        let mut offset = [0.0; 3];
        for axis in 0..3 {
            offset[axis] = self.prob_lo[axis] + self.dx[axis] * (index[axis] as f64 + 0.5)
                - self.center[axis];
        }
        offset
    }

    /// Query for cell (i, j, k)
    pub fn cell_query(&self, i: usize, j: usize, k: usize, nsub: NonZeroUsize) -> GridCellQuery {
        GridCellQuery::new(self.cell_offset([i, j, k]), self.dx).with_nsub(nsub)
    }

    /// Initialize every cell of the grid from `mapper`, closing each with `eos`.
    ///
    /// Cells are independent, so with the `parallel` feature they are processed on the
    /// rayon thread pool. Records are returned in flattened (x fastest) order either way.
    pub fn sweep<E: EquationOfState + ?Sized>(
        &self,
        mapper: &SpatialMapper<'_>,
        eos: &E,
        nsub: NonZeroUsize,
    ) -> Vec<CellRecord> {
        info!(
            "initializing {} cells ({}x{}x{}, nsub = {})",
            self.cell_count(),
            self.cells[0],
            self.cells[1],
            self.cells[2],
            nsub
        );

        let init = |n: usize| {
            let index = self.unflatten(n);
            let [i, j, k] = index;
            let query = self.cell_query(i, j, k, nsub);
            CellRecord {
                index,
                offset: query.offset,
                distance: query.distance(),
                state: initialize_cell(mapper, eos, &query),
            }
        };

        #[cfg(feature = "parallel")]
        let records = (0..self.cell_count()).into_par_iter().map(init).collect();

        #[cfg(not(feature = "parallel"))]
        let records = (0..self.cell_count()).map(init).collect();

        records
    }
}
