/// Mass density
pub const DENSITY: &str = "density";
/// Temperature
pub const TEMPERATURE: &str = "temperature";
/// Pressure
pub const PRESSURE: &str = "pressure";

/// Thermodynamic columns in slot order (density, temperature, pressure)
pub const THERMO_COLUMNS: [&str; 3] = [DENSITY, TEMPERATURE, PRESSURE];

/// Number of non-species slots in every schema
pub const NUM_THERMO_SLOTS: usize = THERMO_COLUMNS.len();
