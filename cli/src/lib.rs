//! `playbill-cli` — argument parsing and command dispatch for the
//! `playbill` binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use playbill_server::ServerConfig;
use playbill_tui::source::ScenarioSource;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "playbill")]
#[command(about = "Scripted multi-actor walkthrough player")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the content server (scenario API, login gate, static pages).
    Serve(ServeArgs),
    /// Run the terminal walkthrough player.
    Play(PlayArgs),
}

#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// TCP address to bind.
    #[arg(long, env = "PLAYBILL_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory holding `scenarios/` and `public/`.
    #[arg(long, env = "PLAYBILL_CONTENT_DIR", default_value = "content")]
    pub content_dir: PathBuf,

    /// Comma-separated access-code allow-list. Empty disables the
    /// login gate.
    #[arg(long, env = "PLAYBILL_ACCESS_CODES", value_delimiter = ',', num_args = 0..)]
    pub access_codes: Vec<String>,
}

impl ServeArgs {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            content_dir: self.content_dir,
            access_codes: self
                .access_codes
                .into_iter()
                .filter(|code| !code.is_empty())
                .collect(),
            ..ServerConfig::default()
        }
    }
}

#[derive(Debug, Parser)]
pub struct PlayArgs {
    /// Load scenarios from a running content server instead of disk.
    #[arg(long)]
    pub server: Option<Url>,

    /// Access code to present to a gated server.
    #[arg(long, requires = "server")]
    pub access_code: Option<String>,

    /// Local content directory (`scenarios/index.json` and documents).
    #[arg(long, env = "PLAYBILL_CONTENT_DIR", default_value = "content")]
    pub content_dir: PathBuf,
}

impl PlayArgs {
    pub fn into_source(self) -> ScenarioSource {
        match self.server {
            Some(base) => ScenarioSource::Server {
                base,
                access_code: self.access_code,
            },
            None => ScenarioSource::Dir(self.content_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults() {
        let cli = Cli::parse_from(["playbill", "serve"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = args.into_config();
        assert_eq!(config.bind.port(), 3000);
        assert!(!config.gate_enabled());
    }

    #[test]
    fn serve_parses_access_code_list() {
        let cli = Cli::parse_from([
            "playbill",
            "serve",
            "--access-codes",
            "alpha,beta",
            "--bind",
            "0.0.0.0:8080",
        ]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = args.into_config();
        assert_eq!(config.access_codes, vec!["alpha", "beta"]);
        assert!(config.gate_enabled());
        assert_eq!(config.bind.port(), 8080);
    }

    #[test]
    fn play_prefers_server_source_when_given() {
        let cli = Cli::parse_from([
            "playbill",
            "play",
            "--server",
            "http://127.0.0.1:3000/",
            "--access-code",
            "alpha",
        ]);
        let Command::Play(args) = cli.command else {
            panic!("expected play");
        };
        match args.into_source() {
            ScenarioSource::Server { base, access_code } => {
                assert_eq!(base.as_str(), "http://127.0.0.1:3000/");
                assert_eq!(access_code.as_deref(), Some("alpha"));
            }
            ScenarioSource::Dir(_) => panic!("expected server source"),
        }
    }

    #[test]
    fn access_code_requires_server() {
        assert!(Cli::try_parse_from(["playbill", "play", "--access-code", "alpha"]).is_err());
    }
}
