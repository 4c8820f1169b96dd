use clap::Parser;

use newsguard_core::traits::Predictor;
use newsguard_core::Config;
use newsguard_model::FakeNewsModel;

/// Classify one piece of text with the saved artifacts.
#[derive(Parser, Debug)]
#[command(name = "newsguard-classify")]
struct Args {
    text: String,
}

fn main() -> anyhow::Result<()> {
    newsguard_cli::init_tracing()?;
    let args = Args::parse();
    let config = Config::load()?;
    let model = FakeNewsModel::load(&config.vectorizer_path(), &config.model_path())?;
    println!("{}", model.predict(&args.text)?);
    Ok(())
}
