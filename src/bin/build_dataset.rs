use clap::Parser;
use crop_stats_service::importers::{sidra_importer, SidraImporter};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "build-dataset")]
#[command(about = "Build the crop dataset JSON from the census harvested-area workbook", long_about = None)]
struct Cli {
    /// Census workbook (xlsx) with one row per municipality and one column per crop
    #[arg(long, env = "EXPORT_PATH")]
    input: PathBuf,

    /// Where to write the dataset JSON
    #[arg(long, env = "DATA_PATH", default_value = "data/crop_data_static.json")]
    output: PathBuf,

    /// Sheet to read (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let start = Instant::now();

    let mut importer = SidraImporter::new(&cli.input);
    if let Some(sheet) = &cli.sheet {
        importer = importer.with_sheet(sheet.clone());
    }

    info!("Reading workbook {}", cli.input.display());
    let range = importer.read_range()?;

    let pb = ProgressBar::new(range.height() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    pb.set_message("rows");

    let dataset = sidra_importer::parse_range(&range, |row| pb.set_position(row as u64 + 1))?;
    pb.finish_with_message("done");

    let json = if cli.compact {
        serde_json::to_string(&dataset)?
    } else {
        serde_json::to_string_pretty(&dataset)?
    };

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&cli.output, json)?;

    info!(
        "Wrote {} crops ({} records, {} municipalities) to {} in {:.1}s",
        dataset.crop_count(),
        dataset.record_count(),
        dataset.unique_municipality_count(),
        cli.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
