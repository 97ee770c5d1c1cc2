use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::MangroveError;

/// A fitted degree-1 trendline over a set of (x, y) samples.
///
/// In this application x is plant height and y is light intensity. The fit
/// is used only for plotting and annotation; it is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination of the fit, in [0, 1].
    pub r_squared: f64,
    /// Number of samples the line was fitted over.
    pub n: usize,
}

impl TrendLine {
    /// Value of the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Annotation string for the plot, e.g. `y = 20.00x + 0.00`.
    pub fn equation(&self) -> String {
        format!("y = {:.2}x + {:.2}", self.slope, self.intercept)
    }

    /// Confidence interval for the slope at the given confidence level
    /// (e.g. 0.95), computed from the same points the line was fitted over.
    pub fn slope_confidence_interval(
        &self,
        points: &[(f64, f64)],
        confidence: f64,
    ) -> Result<(f64, f64), MangroveError> {
        if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
            return Err(MangroveError::InvalidInput(format!(
                "confidence level must be between 0 and 1 (exclusive), got {confidence}"
            )));
        }

        let n = points.len();
        if n < 3 {
            return Err(MangroveError::InsufficientData(
                "Need at least 3 points for a slope confidence interval".to_string(),
            ));
        }

        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
        let s_xx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        if s_xx <= f64::EPSILON {
            return Err(MangroveError::InsufficientData(
                "All x-values are identical, slope is undefined".to_string(),
            ));
        }

        let sse: f64 = points
            .iter()
            .map(|&(x, y)| (y - self.predict(x)).powi(2))
            .sum();
        let residual_variance = sse / (n - 2) as f64;
        let std_error = (residual_variance / s_xx).sqrt();

        let df = (n - 2) as f64;
        let alpha = 1.0 - confidence;
        let t_dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| MangroveError::InsufficientData(e.to_string()))?;
        let t_value = t_dist.inverse_cdf(1.0 - alpha / 2.0);

        let margin = t_value * std_error;
        Ok((self.slope - margin, self.slope + margin))
    }
}

/// Fit an ordinary least-squares line through `points`.
///
/// `slope = cov(x, y) / var(x)`, `intercept = mean(y) - slope * mean(x)`,
/// over all supplied points with no weighting or outlier rejection.
///
/// Errors: `NoData` for an empty input; `InsufficientData` for fewer than
/// two points or when every x-value is identical, since the slope is
/// undefined in either case.
pub fn fit_line(points: &[(f64, f64)]) -> Result<TrendLine, MangroveError> {
    if points.is_empty() {
        return Err(MangroveError::NoData(
            "No points available to fit a trendline".to_string(),
        ));
    }

    let n = points.len();
    if n < 2 {
        return Err(MangroveError::InsufficientData(
            "Need at least 2 points to fit a trendline".to_string(),
        ));
    }

    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let s_xx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let s_xy: f64 = points
        .iter()
        .map(|&(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    if s_xx <= f64::EPSILON {
        return Err(MangroveError::InsufficientData(
            "All x-values are identical, slope is undefined".to_string(),
        ));
    }

    let slope = s_xy / s_xx;
    let intercept = mean_y - slope * mean_x;

    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|&(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    // All-identical y-values fit a horizontal line exactly
    let r_squared = if ss_tot <= f64::EPSILON {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(TrendLine {
        slope,
        intercept,
        r_squared,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_fit_line_collinear() {
        let points = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        let line = fit_line(&points).unwrap();
        assert_approx_eq!(line.slope, 2.0, 1e-9);
        assert_approx_eq!(line.intercept, 0.0, 1e-9);
        assert_approx_eq!(line.r_squared, 1.0, 1e-9);
        assert_eq!(line.n, 3);
    }

    #[test]
    fn test_fit_line_two_points() {
        // The application's canonical scenario: x = height, y = light
        let points = [(5.0, 100.0), (10.0, 200.0)];
        let line = fit_line(&points).unwrap();
        assert_approx_eq!(line.slope, 20.0, 1e-9);
        assert_approx_eq!(line.intercept, 0.0, 1e-9);
    }

    #[test]
    fn test_fit_line_with_intercept() {
        let points = [(0.0, 3.0), (1.0, 5.0), (2.0, 7.0)];
        let line = fit_line(&points).unwrap();
        assert_approx_eq!(line.slope, 2.0, 1e-9);
        assert_approx_eq!(line.intercept, 3.0, 1e-9);
    }

    #[test]
    fn test_fit_line_noisy_r_squared_below_one() {
        let points = [(1.0, 2.1), (2.0, 3.9), (3.0, 6.2), (4.0, 7.8)];
        let line = fit_line(&points).unwrap();
        assert!(line.r_squared < 1.0);
        assert!(line.r_squared > 0.9);
    }

    #[test]
    fn test_fit_line_empty_is_no_data() {
        let err = fit_line(&[]).unwrap_err();
        assert!(matches!(err, MangroveError::NoData(_)));
    }

    #[test]
    fn test_fit_line_single_point_is_insufficient() {
        let err = fit_line(&[(1.0, 2.0)]).unwrap_err();
        assert!(matches!(err, MangroveError::InsufficientData(_)));
    }

    #[test]
    fn test_fit_line_identical_x_is_insufficient() {
        let err = fit_line(&[(3.0, 1.0), (3.0, 2.0), (3.0, 3.0)]).unwrap_err();
        assert!(matches!(err, MangroveError::InsufficientData(_)));
    }

    #[test]
    fn test_fit_line_identical_y_is_horizontal() {
        let points = [(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)];
        let line = fit_line(&points).unwrap();
        assert_approx_eq!(line.slope, 0.0, 1e-12);
        assert_approx_eq!(line.intercept, 5.0, 1e-9);
        assert_approx_eq!(line.r_squared, 1.0, 1e-9);
    }

    #[test]
    fn test_fit_line_negative_slope() {
        let points = [(1.0, 10.0), (2.0, 8.0), (3.0, 6.0)];
        let line = fit_line(&points).unwrap();
        assert_approx_eq!(line.slope, -2.0, 1e-9);
    }

    #[test]
    fn test_predict() {
        let line = fit_line(&[(1.0, 2.0), (2.0, 4.0)]).unwrap();
        assert_approx_eq!(line.predict(5.0), 10.0, 1e-9);
    }

    #[test]
    fn test_equation_format() {
        let line = fit_line(&[(5.0, 100.0), (10.0, 200.0)]).unwrap();
        assert_eq!(line.equation(), "y = 20.00x + 0.00");
    }

    #[test]
    fn test_slope_confidence_interval_contains_slope() {
        let points = [(1.0, 2.1), (2.0, 3.9), (3.0, 6.2), (4.0, 7.8), (5.0, 10.1)];
        let line = fit_line(&points).unwrap();
        let (lower, upper) = line.slope_confidence_interval(&points, 0.95).unwrap();
        assert!(lower <= line.slope);
        assert!(upper >= line.slope);
        assert!(upper > lower);
    }

    #[test]
    fn test_slope_confidence_interval_exact_fit_is_tight() {
        let points = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0)];
        let line = fit_line(&points).unwrap();
        let (lower, upper) = line.slope_confidence_interval(&points, 0.95).unwrap();
        assert_approx_eq!(lower, 2.0, 1e-6);
        assert_approx_eq!(upper, 2.0, 1e-6);
    }

    #[test]
    fn test_slope_confidence_interval_rejects_out_of_range_level() {
        let points = [(1.0, 2.1), (2.0, 3.9), (3.0, 6.2), (4.0, 7.8)];
        let line = fit_line(&points).unwrap();
        for level in [2.0, 0.0, 1.0, -0.5, f64::NAN] {
            let err = line.slope_confidence_interval(&points, level).unwrap_err();
            assert!(matches!(err, MangroveError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_slope_confidence_interval_needs_three_points() {
        let points = [(5.0, 100.0), (10.0, 200.0)];
        let line = fit_line(&points).unwrap();
        assert!(line
            .slope_confidence_interval(&points, 0.95)
            .is_err());
    }

    #[test]
    fn test_trendline_json_roundtrip() {
        let line = fit_line(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
        let json = serde_json::to_string(&line).unwrap();
        let deserialized: TrendLine = serde_json::from_str(&json).unwrap();
        assert_approx_eq!(deserialized.slope, line.slope, 1e-12);
        assert_eq!(deserialized.n, line.n);
    }
}
