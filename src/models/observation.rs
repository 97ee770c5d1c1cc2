use serde::{Deserialize, Serialize};

use crate::error::MangroveError;

/// A single stored (light intensity, height) measurement pair.
///
/// The `id` is assigned by the measurement store on insertion and is never
/// reused within a store lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: i64,
    /// Light intensity at the plant, in the field meter's units
    pub light_intensity: f64,
    /// Plant height, in the same units as the measured baseline
    pub height: f64,
}

impl Observation {
    /// Validate that both measured fields are finite real numbers.
    pub fn validate(&self) -> Result<(), MangroveError> {
        validate_fields(self.light_intensity, self.height)
    }
}

/// Validate a (light intensity, height) pair before it reaches the store.
pub(crate) fn validate_fields(light_intensity: f64, height: f64) -> Result<(), MangroveError> {
    if !light_intensity.is_finite() {
        return Err(MangroveError::InvalidInput(format!(
            "light intensity must be a finite number, got {light_intensity}"
        )));
    }
    if !height.is_finite() {
        return Err(MangroveError::InvalidInput(format!(
            "height must be a finite number, got {height}"
        )));
    }
    Ok(())
}

/// Parse a free-text numeric field, naming the field in the error.
///
/// # Examples
///
/// ```
/// use mangrove_measurement_logger::models::parse_field;
///
/// assert_eq!(parse_field("light intensity", "152.5").unwrap(), 152.5);
/// assert!(parse_field("angle", "").is_err());
/// assert!(parse_field("angle", "abc").is_err());
/// ```
pub fn parse_field(name: &str, text: &str) -> Result<f64, MangroveError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MangroveError::InvalidInput(format!(
            "{name} is required, please enter a valid number"
        )));
    }
    trimmed.parse::<f64>().map_err(|_| {
        MangroveError::InvalidInput(format!("{name} is not a valid number: `{trimmed}`"))
    })
}
