//! sac-walk: Resolve and walk OIDs against a registry description.
//!
//! Part of the snmp-agent-core CLI utilities.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use snmp_agent_core::cli::args::OutputArgs;
use snmp_agent_core::cli::hints::parse_oid;
use snmp_agent_core::cli::output::{OutputContext, ResolveResult, write_error};
use snmp_agent_core::registry::config::parse_registry;
use snmp_agent_core::{Oid, Registry};

/// Resolve get/get-next requests against a registry file, or walk it.
///
/// Registry lines are `scalar <oid> [name]` or `table <oid> <max|*> [name]`.
#[derive(Debug, Parser)]
#[command(name = "sac-walk", version, about)]
struct Args {
    #[command(flatten)]
    output: OutputArgs,

    /// Registry description file.
    #[arg(value_name = "REGISTRY")]
    registry: PathBuf,

    /// OIDs to resolve or walk from (dotted notation or well-known name).
    /// With none, the whole registry is walked.
    #[arg(value_name = "OID")]
    oids: Vec<String>,

    /// Resolve each OID exactly (get).
    #[arg(long, conflicts_with_all = ["next", "list"])]
    get: bool,

    /// Resolve the single next instance after each OID (get-next).
    #[arg(long, conflicts_with = "list")]
    next: bool,

    /// List registry entries and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    args.output.init_tracing();

    let text = match std::fs::read_to_string(&args.registry) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", args.registry.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let registry = match parse_registry(&text) {
        Ok(registry) => registry,
        Err(e) => {
            write_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let mut oids = Vec::with_capacity(args.oids.len());
    for s in &args.oids {
        match parse_oid(s) {
            Ok(oid) => oids.push(oid),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let ctx = OutputContext {
        format: args.output.format,
        show_hints: !args.output.no_hints,
    };

    let written = if args.list {
        ctx.write_entries(&registry)
    } else if args.get || args.next {
        let results = resolve_all(&ctx, &registry, &oids, args.get);
        let failed = results.iter().any(|r| r.response.is_none());
        match ctx.write_resolved(&results) {
            Ok(()) if failed && args.get => return ExitCode::FAILURE,
            other => other,
        }
    } else {
        if oids.is_empty() {
            oids.push(Oid::empty());
        }
        let matches: Vec<_> = oids
            .iter()
            .flat_map(|root| {
                registry
                    .walk(root.clone())
                    .take_while(move |m| m.oid().starts_with(root))
            })
            .map(|m| ctx.match_result(&m))
            .collect();
        ctx.write_walk(&matches)
    };

    if let Err(e) = written {
        eprintln!("Error writing output: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn resolve_all(
    ctx: &OutputContext,
    registry: &Registry,
    oids: &[Oid],
    exact: bool,
) -> Vec<ResolveResult> {
    oids.iter()
        .map(|oid| ResolveResult {
            request: oid.to_string(),
            exact,
            response: registry
                .resolve(oid, exact)
                .as_match()
                .map(|m| ctx.match_result(m)),
        })
        .collect()
}
