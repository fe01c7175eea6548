use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber;

use telegen::generator::TelemetryGenerator;
use telegen::models::GeneratorConfig;
use telegen::writer::{write_to_path, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate labeled session-telemetry datasets", long_about = None)]
struct Args {
    /// Number of synthetic users
    #[arg(short = 'u', long, default_value = "10")]
    num_users: usize,

    /// Sessions generated per user
    #[arg(short = 'n', long, default_value = "20")]
    sessions_per_user: usize,

    /// Probability of a malicious session (0.0 to 1.0)
    #[arg(short = 'm', long, default_value = "0.10")]
    malicious_rate: f64,

    /// Seed for the random number generator (reproducibility)
    #[arg(short, long, default_value = "67")]
    seed: u64,

    /// Output file path
    #[arg(short, long, default_value = "telemetry_raw.csv")]
    output: PathBuf,

    /// Output serialization format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting telemetry dataset generator");
    info!(
        "Users: {}, sessions/user: {}, malicious rate: {:.2}, seed: {}",
        args.num_users, args.sessions_per_user, args.malicious_rate, args.seed
    );

    let config = GeneratorConfig {
        num_users: args.num_users,
        sessions_per_user: args.sessions_per_user,
        malicious_rate: args.malicious_rate,
        seed: args.seed,
        ..GeneratorConfig::default()
    };

    let mut generator = TelemetryGenerator::new(config)?;

    let start = std::time::Instant::now();
    let records = generator.generate();
    let malicious = records.iter().filter(|r| r.label_malicious).count();

    write_to_path(&args.output, args.format, &records)?;
    let elapsed = start.elapsed();

    let malicious_pct = if records.is_empty() {
        0.0
    } else {
        malicious as f64 / records.len() as f64 * 100.0
    };
    info!("Total records: {}", records.len());
    info!("Malicious: {} ({:.1}%)", malicious, malicious_pct);
    info!("Generation time: {:.2}s", elapsed.as_secs_f64());
    info!("Output file: {}", args.output.display());

    Ok(())
}
