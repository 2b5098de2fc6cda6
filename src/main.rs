mod ingest;
mod normalize;
mod output;
mod schema;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "odk_dronelog", about = "ODK drone flight-log normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw Aggregate exports into one flat CSV
    Run {
        /// Directory containing the raw ODK export CSVs
        #[arg(short = 'd', long, default_value = "raw_odk")]
        odk_dir: PathBuf,
        /// Path to the ODK form workbook (choices sheet)
        #[arg(short, long)]
        form: PathBuf,
        /// Path to the pilot/ARN reference CSV
        #[arg(short, long)]
        pilots: PathBuf,
        /// Output CSV path
        #[arg(short, long, default_value = "outputs/drone.csv")]
        output: PathBuf,
    },
    /// Show the resolved option lists the engine depends on
    Choices {
        /// Path to the ODK form workbook
        #[arg(short, long)]
        form: PathBuf,
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            odk_dir,
            form,
            pilots,
            output,
        } => run(&odk_dir, &form, &pilots, &output),
        Commands::Choices { form, json } => show_choices(&form, json),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn run(odk_dir: &Path, form: &Path, pilots_path: &Path, output_path: &Path) -> Result<()> {
    let schema = schema::ChoiceSchema::load(form)?;
    let pilots = schema::PilotLookup::load(pilots_path)?;

    let rows = ingest::load_batch(odk_dir)?;
    if rows.is_empty() {
        println!(
            "No export rows found under {}. Nothing to do.",
            odk_dir.display()
        );
        return Ok(());
    }

    println!("Normalizing {} rows...", rows.len());
    let batch = normalize::assemble(&rows, &schema, &pilots)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    output::write_csv(output_path, &batch)?;

    println!(
        "Done: {} records, {} columns, {} skipped.",
        batch.records.len(),
        batch.columns.len(),
        batch.skipped.len()
    );
    for skip in &batch.skipped {
        println!("  row {} ({}): {}", skip.index, skip.instance_id, skip.reason);
    }
    Ok(())
}

fn show_choices(form: &Path, json: bool) -> Result<()> {
    let schema = schema::ChoiceSchema::load(form)?;
    let layout = normalize::CategoryLayout::resolve(&schema)?;

    let categories = [
        (normalize::HAZARDS_CATEGORY, &layout.hazards),
        (normalize::INCIDENTS_CATEGORY, &layout.incidents),
        (normalize::MAINTENANCE_CATEGORY, &layout.maintenance),
        (normalize::DISPOSAL_CATEGORY, &layout.disposal),
    ];

    if json {
        let listing: Vec<_> = categories
            .iter()
            .map(|(name, category)| {
                serde_json::json!({
                    "category": name,
                    "count": category.len(),
                    "options": &category.options,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for (name, category) in categories {
        println!("{} ({} options)", name, category.len());
        for option in &category.options {
            println!("  {}", option);
        }
    }
    Ok(())
}
