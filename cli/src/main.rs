//! `playbill` entry point.

use clap::Parser;
use playbill_cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => {
            init_stderr_tracing();
            run_server(args)
        }
        Command::Play(args) => {
            // The terminal belongs to the TUI; route logs to a file
            // when asked, otherwise drop them.
            init_tui_tracing()?;
            playbill_tui::run(args.into_source())
        }
    }
}

#[tokio::main]
async fn run_server(args: playbill_cli::ServeArgs) -> anyhow::Result<()> {
    playbill_server::serve(args.into_config()).await
}

fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn init_tui_tracing() -> anyhow::Result<()> {
    if let Ok(path) = std::env::var("PLAYBILL_TUI_LOG") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(file)
            .with_ansi(false)
            .init();
    }
    Ok(())
}
