pub mod analysis;
pub mod editor;
pub mod error;
pub mod models;
pub mod store;
pub mod visualization;

pub use analysis::{compute_height, fit_line, TrendLine};
pub use editor::RecordEditor;
pub use error::MangroveError;
pub use models::Observation;
pub use store::MeasurementStore;
