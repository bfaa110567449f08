//! sac-envelope: Decode a community envelope from hex.
//!
//! Part of the snmp-agent-core CLI utilities.

use std::io::Read;
use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser;
use snmp_agent_core::CommunityEnvelope;
use snmp_agent_core::cli::args::{EnvelopeArgs, OutputArgs};
use snmp_agent_core::cli::output::{OutputContext, parse_hex, write_error};

/// Decode an SNMPv1/v2c message envelope and print version, community and
/// payload.
#[derive(Debug, Parser)]
#[command(name = "sac-envelope", version, about)]
struct Args {
    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    envelope: EnvelopeArgs,

    /// Message bytes as hex (whitespace allowed). Read from stdin when omitted.
    #[arg(value_name = "HEX")]
    hex: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    args.output.init_tracing();

    let input = match &args.hex {
        Some(hex) => hex.clone(),
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: cannot read stdin: {}", e);
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    let data = match parse_hex(&input) {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let env = match CommunityEnvelope::decode_with(data, &args.envelope.config()) {
        Ok(env) => env,
        Err(e) => {
            write_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = OutputContext::new(args.output.format);
    if let Err(e) = ctx.write_envelope(&env) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
