mod measurements;

pub use measurements::MeasurementStore;

/// Default on-disk database file, matching the field app's layout.
pub const DEFAULT_DB_FILE: &str = "mangrove_data.db";
