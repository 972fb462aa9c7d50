use anyhow::Result;
use clap::Parser;
use restgen_cli::Restgen;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Restgen::parse();

    // RUST_LOG wins; otherwise --verbose picks between info and debug
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli.command.execute()
}
