use crate::error::MangroveError;
use crate::models::parse_field;

/// Derive plant height from a measured baseline and an elevation angle.
///
/// The surveyor stands at a known distance (`adjacent`) from the plant and
/// sights the top at `angle_degrees` above horizontal; the height is then
/// `adjacent * tan(angle)`. No range restriction is applied to either input.
///
/// # Examples
///
/// ```
/// use mangrove_measurement_logger::analysis::compute_height;
///
/// let h = compute_height(10.0, 45.0);
/// assert!((h - 10.0).abs() < 1e-9);
/// ```
pub fn compute_height(adjacent: f64, angle_degrees: f64) -> f64 {
    adjacent * angle_degrees.to_radians().tan()
}

/// Parse both text fields and compute the height. Fails with `InvalidInput`
/// when either field is empty or non-numeric; nothing is mutated on failure.
pub fn compute_height_from_text(adjacent: &str, angle: &str) -> Result<f64, MangroveError> {
    let adjacent = parse_field("adjacent length", adjacent)?;
    let angle = parse_field("angle", angle)?;
    Ok(compute_height(adjacent, angle))
}

/// Format a height value the way the entry form displays it.
pub fn format_height(height: f64) -> String {
    format!("{height:.2}")
}
