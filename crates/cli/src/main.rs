//! Binary entry point for the interactive subtitle track tool.

mod menu;

use anyhow::Result;
use clap::Parser;
use std::io;
use subtrack_core::config::Settings;
use tracing_subscriber::EnvFilter;

/// Extract, merge, strip and translate video subtitle tracks.
/// Everything else is asked interactively.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Enable verbose debug and trace logs.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::default()
            .add_directive("subtrack=trace".parse()?)
            .add_directive("subtrack_core=trace".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::default()
            .add_directive("subtrack=info".parse()?)
            .add_directive("subtrack_core=info".parse()?)
            .add_directive("warn".parse()?)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    let settings = Settings::from_env();
    if let Some(action) = menu::read_action(&mut menu::Terminal)? {
        menu::run_action(action, &settings, &mut io::stdout()).await?;
    }
    Ok(())
}
