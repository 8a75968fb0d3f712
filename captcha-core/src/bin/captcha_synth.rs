//! SmartCAPTCHA synthetic dataset generator
//!
//! # Usage
//!
//! ```bash
//! captcha-synth
//! captcha-synth --humans 1000 --bots 600 --seed 42 -o data.csv
//! captcha-synth --format jsonl -o data.jsonl
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use smartcaptcha_core::logic::dataset::{self, DatasetFormat, SyntheticGenerator, DEFAULT_BOTS, DEFAULT_HUMANS};

#[derive(Parser)]
#[command(name = "captcha-synth")]
#[command(version)]
#[command(about = "Generate labeled synthetic samples for offline training", long_about = None)]
struct Cli {
    /// Number of human rows
    #[arg(long, default_value_t = DEFAULT_HUMANS)]
    humans: usize,

    /// Number of bot rows
    #[arg(long, default_value_t = DEFAULT_BOTS)]
    bots: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output file
    #[arg(long, short, default_value = "synthetic_captcha_data.csv")]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Jsonl,
}

impl From<Format> for DatasetFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => DatasetFormat::Csv,
            Format::Jsonl => DatasetFormat::Jsonl,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut generator = match cli.seed {
        Some(seed) => SyntheticGenerator::seeded(seed),
        None => SyntheticGenerator::new(),
    };
    let records = generator.generate(cli.humans, cli.bots);

    if let Err(e) = dataset::write_to_path(&records, cli.format.into(), &cli.output) {
        log::error!("Failed to write {}: {}", cli.output.display(), e);
        return ExitCode::FAILURE;
    }

    log::info!(
        "Synthetic data generated: {} humans, {} bots → {}",
        cli.humans,
        cli.bots,
        cli.output.display()
    );
    ExitCode::SUCCESS
}
