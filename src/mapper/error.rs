/// Errors that can occur when describing a grid
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// An axis has no cells
    #[error("Grid axis {axis} has no cells")]
    NoCells {
        /// Axis index (0 = x, 1 = y, 2 = z)
        axis: usize,
    },

    /// The upper bound of an axis does not exceed its lower bound
    #[error("Grid axis {axis} has an empty extent [{lo}, {hi}]")]
    EmptyExtent {
        /// Axis index (0 = x, 1 = y, 2 = z)
        axis: usize,
        /// Lower domain bound
        lo: f64,
        /// Upper domain bound
        hi: f64,
    },
}
