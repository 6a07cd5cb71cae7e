//! cinerate - Main Entry Point

use clap::Parser;
use cinerate::cli::{cmd_train, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinerate=info".into()),
        )
        .init();

    let cli = Cli::parse();
    cmd_train(&cli.train, &cli.out)
}
