mod observation;

pub use observation::{parse_field, Observation};
pub(crate) use observation::validate_fields;
