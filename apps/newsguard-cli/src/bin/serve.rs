use clap::Parser;

use newsguard_core::Config;

/// Serve the trained model over HTTP.
#[derive(Parser, Debug)]
#[command(name = "newsguard-serve")]
struct Args {
    /// Port to listen on (overrides server.port and PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    newsguard_cli::init_tracing()?;
    let args = Args::parse();
    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    newsguard_service::serve(&config).await
}
