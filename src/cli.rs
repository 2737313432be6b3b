//! CLI argument parsing and startup helpers.

use std::path::PathBuf;

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use tracing::error;

use crate::Maker;
use crate::config::MakerConfig;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tokenmaker", about = "Issue and verify JWT and PASETO tokens")]
pub struct Args {
    /// Path to the maker config (JSON)
    #[arg(short, long, env = "TOKENMAKER_CONFIG")]
    pub config: PathBuf,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a token and print it with its payload as JSON
    Issue {
        /// Identity the token is issued to
        #[arg(short, long)]
        username: String,

        /// Lifetime in seconds, negative for an already expired token
        #[arg(short, long, default_value = "3600", allow_negative_numbers = true)]
        ttl: i64,
    },
    /// Verify a token and print its payload as JSON
    Verify {
        /// The token string
        token: String,
    },
}

/// Initialize logging based on the specified format. Logs go to stderr.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// Load the config and build its maker.
/// Returns None and logs an error if either step fails.
pub fn load_maker(path: &std::path::Path) -> Option<Box<dyn Maker>> {
    let config = match MakerConfig::from_json_file(path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load maker config");
            return None;
        }
    };

    match config.build() {
        Ok(maker) => Some(maker),
        Err(e) => {
            error!(scheme = %config.scheme(), error = %e, "Failed to create token maker");
            None
        }
    }
}

/// Convert a TTL in seconds, rejecting values chrono cannot represent.
pub fn ttl_duration(ttl: i64) -> Option<TimeDelta> {
    let duration = TimeDelta::try_seconds(ttl);
    if duration.is_none() {
        error!(ttl, "TTL out of range");
    }
    duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_issue() {
        let args = Args::try_parse_from([
            "tokenmaker",
            "--config",
            "maker.json",
            "issue",
            "--username",
            "alice",
            "--ttl",
            "-60",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("maker.json"));
        match args.command {
            Command::Issue { username, ttl } => {
                assert_eq!(username, "alice");
                assert_eq!(ttl, -60);
            }
            Command::Verify { .. } => panic!("expected issue"),
        }
    }

    #[test]
    fn test_parse_verify() {
        let args =
            Args::try_parse_from(["tokenmaker", "-c", "maker.json", "verify", "v2.local.abc"])
                .unwrap();
        assert!(matches!(args.command, Command::Verify { token } if token == "v2.local.abc"));
    }

    #[test]
    fn test_ttl_duration() {
        assert_eq!(ttl_duration(60), Some(TimeDelta::minutes(1)));
        assert_eq!(ttl_duration(-60), Some(TimeDelta::minutes(-1)));
        assert_eq!(ttl_duration(i64::MAX), None);
    }
}
