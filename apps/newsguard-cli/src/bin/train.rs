use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use newsguard_core::config::{expand_path, Config};
use newsguard_model::Trainer;

/// Train the TF-IDF + passive-aggressive model and write both artifacts.
#[derive(Parser, Debug)]
#[command(name = "newsguard-train")]
struct Args {
    /// CSV of fake articles (defaults to training.fake_csv)
    #[arg(long)]
    fake: Option<PathBuf>,

    /// CSV of real articles (defaults to training.real_csv)
    #[arg(long)]
    real: Option<PathBuf>,

    /// Output directory for the artifacts (defaults to artifacts.dir)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Seed for the split and epoch shuffles
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    newsguard_cli::init_tracing()?;
    let args = Args::parse();
    let mut config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    if let Some(seed) = args.seed {
        config.training.seed = seed;
    }

    let fake = args.fake.unwrap_or_else(|| expand_path(&config.training.fake_csv));
    let real = args.real.unwrap_or_else(|| expand_path(&config.training.real_csv));
    let out = args.out.unwrap_or_else(|| config.artifact_dir());

    println!("Fake News Model Trainer\n=======================");
    println!("Fake corpus: {}", fake.display());
    println!("Real corpus: {}", real.display());

    let outcome = Trainer::new(config).with_progress(true).run(&fake, &real, &out)?;
    info!(train = outcome.train_size, test = outcome.test_size, "training finished");

    println!("\n{}", outcome.report);
    println!("✅ Model and vectorizer saved to {}", out.display());
    Ok(())
}
