/// Errors that can occur while building a profile table
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// The profile has no sample points
    #[error("Profile contains no sample points")]
    Empty,

    /// More sample points than the configured capacity
    #[error("Profile has {count} points, exceeding the capacity of {capacity}")]
    CapacityExceeded {
        /// Number of points requested
        count: usize,
        /// Configured maximum
        capacity: usize,
    },

    /// A row did not carry one value per schema slot
    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        /// Zero-based row index
        row: usize,
        /// Number of schema slots
        expected: usize,
        /// Number of values supplied
        found: usize,
    },

    /// A radius was negative or not finite
    #[error("Invalid radius {value} at point {index}")]
    InvalidRadius {
        /// Zero-based point index
        index: usize,
        /// Offending radius
        value: f64,
    },

    /// Radii were not strictly increasing
    #[error("Radius at point {index} ({value}) does not exceed the previous radius ({previous})")]
    NonMonotoneRadius {
        /// Zero-based point index
        index: usize,
        /// Offending radius
        value: f64,
        /// Radius of the preceding point
        previous: f64,
    },
}
