use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::models::Observation;

/// Format the stored observations as a table string.
pub fn format_records_table(observations: &[Observation]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Stored Measurements".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    if observations.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Light Intensity", "Height"]);

    for obs in observations {
        table.add_row(vec![
            Cell::new(format!("{}", obs.id)),
            Cell::new(format!("{:.2}", obs.light_intensity)),
            Cell::new(format!("{:.2}", obs.height)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output.push('\n');
    output
}

/// Print the stored observations table.
pub fn print_records_table(observations: &[Observation]) {
    print!("{}", format_records_table(observations));
}

/// Format a quick summary of the stored data as a string.
pub fn format_summary(observations: &[Observation]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Quick Summary".bold().cyan()));
    output.push_str(&format!("{}\n", "=".repeat(40)));
    output.push_str(&format!("  Records:           {}\n", observations.len()));

    if observations.is_empty() {
        return output;
    }

    let n = observations.len() as f64;
    let mean_light = observations.iter().map(|o| o.light_intensity).sum::<f64>() / n;
    let mean_height = observations.iter().map(|o| o.height).sum::<f64>() / n;

    output.push_str(&format!("  Mean Light:        {mean_light:.2}\n"));
    output.push_str(&format!("  Mean Height:       {mean_height:.2}\n"));
    output
}

/// Print the quick summary.
pub fn print_summary(observations: &[Observation]) {
    print!("{}", format_summary(observations));
}
