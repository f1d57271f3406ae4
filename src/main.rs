//! Proximity Filter CLI
//!
//! Usage:
//!     proximity-filter customers.json
//!     proximity-filter customers.json --config settings.toml --show-distance

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use proximity_filter::config::Settings;
use proximity_filter::core::{DistanceCalculator, Pipeline};

/// Print the records within the threshold distance of the reference point
#[derive(Parser)]
#[command(name = "proximity-filter")]
#[command(version)]
#[command(about = "Print records within a great-circle distance of a reference point", long_about = None)]
struct Cli {
    /// A file with one JSON-formatted record per line
    datafile: PathBuf,

    /// Settings file overriding the reference point, threshold and logging
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g. warn, info, debug)
    #[arg(long)]
    log_level: Option<String>,

    /// Append the computed distance to each line
    #[arg(long)]
    show_distance: bool,
}

fn init_logging(level: &str, format: &str) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_level = cli
        .log_level
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    init_logging(&log_level, &log_format);

    let calculator = DistanceCalculator::new(settings.reference_point());
    let pipeline = Pipeline::new(calculator, settings.filter.threshold_km).with_distance(cli.show_distance);

    info!(
        "Filtering {} within {} km of {:?}",
        cli.datafile.display(),
        pipeline.threshold_km(),
        calculator.reference()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match pipeline.run(&cli.datafile, &mut out) {
        Ok(summary) => {
            info!("Done: {} of {} records reported", summary.emitted, summary.processed);
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
