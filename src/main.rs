use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use mangrove_measurement_logger::{
    analysis::{compute_height_from_text, fit_line, format_height},
    editor::RecordEditor,
    error::MangroveError,
    models::parse_field,
    store::{MeasurementStore, DEFAULT_DB_FILE},
    visualization::{print_records_table, print_scatter_plot, print_summary},
};

#[derive(Parser)]
#[command(
    name = "mangrove-logger",
    about = "Mangrove Measurement Logger - field data recording and trend analysis",
    version,
    author
)]
struct Cli {
    /// Path to the measurement database file
    #[arg(short, long, default_value = DEFAULT_DB_FILE, global = true)]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate plant height from a baseline distance and elevation angle
    CalcHeight {
        /// Measured baseline distance from the observer to the plant
        #[arg(short, long)]
        adjacent: String,

        /// Elevation angle to the top of the plant, in degrees
        #[arg(long)]
        angle: String,
    },

    /// Add a (light intensity, height) observation to the database
    Add {
        /// Light intensity reading
        #[arg(short, long)]
        light_intensity: String,

        /// Plant height
        #[arg(long)]
        height: String,
    },

    /// List all stored observations
    List,

    /// Overwrite both fields of an existing observation
    Update {
        /// Id of the observation to update
        #[arg(short, long)]
        id: i64,

        /// New light intensity reading
        #[arg(short, long)]
        light_intensity: String,

        /// New plant height
        #[arg(long)]
        height: String,
    },

    /// Delete a single observation
    Delete {
        /// Id of the observation to delete
        #[arg(short, long)]
        id: i64,
    },

    /// Delete every observation in the database
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Render a scatter plot of the stored data with a fitted trendline
    Plot {
        /// Confidence level for the slope interval annotation (0.0-1.0)
        #[arg(short, long, default_value = "0.95")]
        confidence: f64,
    },

    /// Display a quick summary of the stored data
    Summary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::CalcHeight { adjacent, angle } => {
            let height = compute_height_from_text(&adjacent, &angle)?;
            println!(
                "{} {} units",
                "Calculated Height:".bold().cyan(),
                format_height(height)
            );
        }

        Commands::Add {
            light_intensity,
            height,
        } => {
            let light_intensity = parse_field("light intensity", &light_intensity)?;
            let height = parse_field("height", &height)?;

            let store = MeasurementStore::open(&cli.database)?;
            let id = store.insert(light_intensity, height)?;
            println!(
                "{} Data added to database (id {id}).",
                "Success:".green().bold()
            );
        }

        Commands::List => {
            let store = MeasurementStore::open(&cli.database)?;
            let editor = RecordEditor::load(store)?;
            print_records_table(editor.rows());
        }

        Commands::Update {
            id,
            light_intensity,
            height,
        } => {
            let light_intensity = parse_field("light intensity", &light_intensity)?;
            let height = parse_field("height", &height)?;

            let store = MeasurementStore::open(&cli.database)?;
            let mut editor = RecordEditor::load(store)?;
            editor.update(id, light_intensity, height)?;
            println!("{} Record {id} updated.", "Success:".green().bold());
        }

        Commands::Delete { id } => {
            let store = MeasurementStore::open(&cli.database)?;
            let mut editor = RecordEditor::load(store)?;
            editor.delete(id)?;
            println!("{} Record {id} deleted.", "Success:".green().bold());
        }

        Commands::Reset { yes } => {
            if !yes && !confirm_reset()? {
                println!("Reset cancelled.");
                return Ok(());
            }

            let store = MeasurementStore::open(&cli.database)?;
            let removed = store.delete_all()?;
            println!(
                "{} All data has been deleted ({removed} records).",
                "Success:".green().bold()
            );
        }

        Commands::Plot { confidence } => {
            let store = MeasurementStore::open(&cli.database)?;
            let observations = store.list_all()?;
            if observations.is_empty() {
                return Err(MangroveError::NoData(
                    "no measurements available in the database".to_string(),
                )
                .into());
            }

            let points: Vec<(f64, f64)> = observations
                .iter()
                .map(|o| (o.height, o.light_intensity))
                .collect();
            let line = fit_line(&points)?;

            print_scatter_plot(&observations, &line);

            match line.slope_confidence_interval(&points, confidence) {
                Ok((lower, upper)) => println!(
                    "  Slope {:.0}% CI: [{lower:.2}, {upper:.2}]",
                    confidence * 100.0
                ),
                // Too few points for an interval is fine, the plot stands alone
                Err(MangroveError::InsufficientData(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Summary => {
            let store = MeasurementStore::open(&cli.database)?;
            let observations = store.list_all()?;
            print_summary(&observations);
        }
    }

    Ok(())
}

/// Ask for confirmation before wiping the database. Anything other than an
/// explicit yes cancels.
fn confirm_reset() -> Result<bool> {
    print!("Are you sure you want to delete all data in the database? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
