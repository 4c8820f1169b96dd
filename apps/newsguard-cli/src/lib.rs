//! Shared setup for the newsguard binaries.

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber from `RUST_LOG`, with newsguard crates at info.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("newsguard=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();
    Ok(())
}
