mod height;
mod trend;

pub use height::{compute_height, compute_height_from_text, format_height};
pub use trend::{fit_line, TrendLine};
