//! Shared command-line arguments for the `sac-*` tools.

use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::envelope::{DEFAULT_MAX_COMMUNITY_LEN, DEFAULT_MAX_MESSAGE_SIZE, EnvelopeConfig};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// Output and logging options.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(short = 'O', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not show well-known names next to OIDs.
    #[arg(long)]
    pub no_hints: bool,
}

impl OutputArgs {
    /// Log level selected by `-v` flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Install a stderr tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the `-v` flags.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("snmp_agent_core={}", self.log_level())));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Envelope limit options.
#[derive(Debug, Args)]
pub struct EnvelopeArgs {
    /// Maximum accepted message size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    pub max_message_size: usize,

    /// Maximum community length in bytes (0 for no limit).
    #[arg(long, default_value_t = DEFAULT_MAX_COMMUNITY_LEN)]
    pub max_community_len: usize,
}

impl EnvelopeArgs {
    /// Build the envelope limits.
    pub fn config(&self) -> EnvelopeConfig {
        let community = (self.max_community_len > 0).then_some(self.max_community_len);
        EnvelopeConfig::default()
            .max_message_size(self.max_message_size)
            .max_community_len(community)
    }
}
