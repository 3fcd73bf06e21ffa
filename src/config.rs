//! Configuration management for the section header language server.
//!
//! Header width and comment styles are fixed; the only runtime knob is
//! how much the server logs.

use anyhow::Result;
use clap::Parser;

/// Command-line arguments for the section header language server
#[derive(Debug, Parser)]
#[command(name = "section-header-ls")]
#[command(about = "Language server that inserts comment-styled section headers")]
#[command(version)]
pub struct Args {
    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Accepted for clients that always pass it; stdio is the only transport
    #[arg(long, hide = true)]
    pub stdio: bool,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level, used when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let log_level = args.log_level.trim().to_lowercase();
        if !matches!(
            log_level.as_str(),
            "off" | "error" | "warn" | "info" | "debug" | "trace"
        ) {
            anyhow::bail!("unknown log level '{}'", args.log_level);
        }
        Ok(Config { log_level })
    }
}
