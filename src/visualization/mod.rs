mod tables;
mod charts;

pub use tables::{
    format_records_table, print_records_table,
    format_summary, print_summary,
};
pub use charts::{format_scatter_plot, print_scatter_plot};
