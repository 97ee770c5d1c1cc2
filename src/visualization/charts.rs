use colored::Colorize;

use crate::analysis::TrendLine;
use crate::models::Observation;

const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 20;

#[derive(Clone, Copy)]
enum Glyph {
    Empty,
    Trend,
    Point,
}

/// Format a character-grid scatter plot of (height, light intensity) pairs
/// with the fitted trendline overlaid.
///
/// x is plant height, y is light intensity, matching the field app's plot
/// orientation. Data points render as `o`, the trendline as `*`; points win
/// when both land in the same cell.
pub fn format_scatter_plot(observations: &[Observation], line: &TrendLine) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        "Light Intensity vs. Plant Height".bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(PLOT_WIDTH + 12)));

    if observations.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    output.push_str(&format!("  Gradient: {:.2}\n", line.slope));
    output.push_str(&format!("  Equation: {}\n", line.equation()));
    output.push_str(&format!("  R-squared: {:.4}  (n = {})\n\n", line.r_squared, line.n));

    let xs: Vec<f64> = observations.iter().map(|o| o.height).collect();
    let ys: Vec<f64> = observations.iter().map(|o| o.light_intensity).collect();

    let (x_min, x_max) = padded_range(&xs);
    let (y_min, y_max) = padded_range(&ys);

    let mut grid = vec![[Glyph::Empty; PLOT_WIDTH]; PLOT_HEIGHT];

    // Trendline first so data points overwrite it
    for col in 0..PLOT_WIDTH {
        let x = x_min + (x_max - x_min) * col as f64 / (PLOT_WIDTH - 1) as f64;
        if let Some(row) = to_row(line.predict(x), y_min, y_max) {
            grid[row][col] = Glyph::Trend;
        }
    }

    for obs in observations {
        let col = to_col(obs.height, x_min, x_max);
        if let Some(row) = to_row(obs.light_intensity, y_min, y_max) {
            grid[row][col] = Glyph::Point;
        }
    }

    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{y_max:>9.1}")
        } else if i == PLOT_HEIGHT - 1 {
            format!("{y_min:>9.1}")
        } else {
            " ".repeat(9)
        };
        output.push_str(&format!("{label} |"));
        for glyph in row {
            match glyph {
                Glyph::Empty => output.push(' '),
                Glyph::Trend => output.push_str(&"*".red().to_string()),
                Glyph::Point => output.push_str(&"o".blue().to_string()),
            }
        }
        output.push('\n');
    }

    output.push_str(&format!("{} +{}\n", " ".repeat(9), "-".repeat(PLOT_WIDTH)));
    output.push_str(&format!(
        "{} {x_min:<10.1}{:>width$.1}\n",
        " ".repeat(9),
        x_max,
        width = PLOT_WIDTH - 10
    ));
    output.push_str(&format!(
        "{}\n",
        format!("{:^width$}", "Height", width = PLOT_WIDTH + 11).dimmed()
    ));
    output
}

/// Print the scatter plot with trendline.
pub fn print_scatter_plot(observations: &[Observation], line: &TrendLine) {
    print!("{}", format_scatter_plot(observations, line));
}

/// Value range expanded by 5% on each side, with a fallback span for
/// all-identical values so the grid mapping never divides by zero.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min - span * 0.05, max + span * 0.05)
    }
}

fn to_col(x: f64, x_min: f64, x_max: f64) -> usize {
    let frac = (x - x_min) / (x_max - x_min);
    ((frac * (PLOT_WIDTH - 1) as f64).round() as usize).min(PLOT_WIDTH - 1)
}

fn to_row(y: f64, y_min: f64, y_max: f64) -> Option<usize> {
    let frac = (y - y_min) / (y_max - y_min);
    if !(0.0..=1.0).contains(&frac) {
        return None;
    }
    let row = ((1.0 - frac) * (PLOT_HEIGHT - 1) as f64).round() as usize;
    Some(row.min(PLOT_HEIGHT - 1))
}
