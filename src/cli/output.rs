//! Output formatting for CLI tools.

use std::io::{self, Write};

use serde::Serialize;

use super::args::OutputFormat;
use super::hints;
use crate::envelope::CommunityEnvelope;
use crate::matching::Match;
use crate::oid::Oid;
use crate::registry::VariableEntry;

/// Result of resolving one request, ready for output.
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    pub request: String,
    pub exact: bool,
    /// `None` when nothing answered.
    pub response: Option<MatchResult>,
}

/// A single matched instance.
#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub prefix: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub size_hint: usize,
    pub writable: bool,
}

/// A decoded envelope.
#[derive(Debug, Serialize)]
pub struct EnvelopeResult {
    pub version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    /// Community as text when printable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    pub community_hex: String,
    pub payload_len: usize,
    pub payload_hex: String,
}

/// A registry entry listing.
#[derive(Debug, Serialize)]
pub struct EntryResult {
    pub prefix: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_instance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Output context for formatting.
pub struct OutputContext {
    pub format: OutputFormat,
    pub show_hints: bool,
}

impl OutputContext {
    /// Create a new output context with default settings.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            show_hints: true,
        }
    }

    /// Convert a match for output.
    pub fn match_result(&self, m: &Match<'_>) -> MatchResult {
        let entry = m.entry();
        MatchResult {
            oid: m.oid().to_string(),
            hint: self.hint(m.oid()),
            prefix: entry.prefix().to_string(),
            mode: entry.mode().to_string(),
            name: entry.name().map(String::from),
            size_hint: m.size_hint(),
            writable: entry.writable(),
        }
    }

    fn hint(&self, oid: &Oid) -> Option<String> {
        if self.show_hints {
            hints::lookup(oid)
        } else {
            None
        }
    }

    /// Write resolve results to stdout.
    pub fn write_resolved(&self, results: &[ResolveResult]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self.format {
            OutputFormat::Human => write_resolved_human(&mut stdout, results),
            OutputFormat::Json => write_json(&mut stdout, results),
        }
    }

    /// Write a walk to stdout.
    pub fn write_walk(&self, matches: &[MatchResult]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self.format {
            OutputFormat::Human => {
                for m in matches {
                    write_match_human(&mut stdout, m)?;
                }
                Ok(())
            }
            OutputFormat::Json => write_json(&mut stdout, matches),
        }
    }

    /// Write registry entries to stdout.
    pub fn write_entries<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a VariableEntry>,
    ) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self.format {
            OutputFormat::Human => {
                for entry in entries {
                    writeln!(stdout, "{}", entry)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let entries: Vec<EntryResult> = entries.into_iter().map(entry_result).collect();
                write_json(&mut stdout, &entries)
            }
        }
    }

    /// Write a decoded envelope to stdout.
    pub fn write_envelope(&self, env: &CommunityEnvelope) -> io::Result<()> {
        let result = envelope_result(env);
        let mut stdout = io::stdout().lock();
        match self.format {
            OutputFormat::Human => write_envelope_human(&mut stdout, env, &result),
            OutputFormat::Json => write_json(&mut stdout, &result),
        }
    }
}

fn entry_result(entry: &VariableEntry) -> EntryResult {
    EntryResult {
        prefix: entry.prefix().to_string(),
        mode: entry.mode().to_string(),
        max_instance: entry.max_instance(),
        name: entry.name().map(String::from),
    }
}

/// Build the printable form of an envelope.
pub fn envelope_result(env: &CommunityEnvelope) -> EnvelopeResult {
    let community = is_printable(&env.community)
        .then(|| String::from_utf8_lossy(&env.community).into_owned());
    EnvelopeResult {
        version: env.version,
        version_name: env.version().map(|v| v.to_string()),
        community,
        community_hex: hex_string(&env.community),
        payload_len: env.payload.len(),
        payload_hex: hex_string(&env.payload),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(w, "{}", json)
}

fn write_match_human<W: Write>(w: &mut W, m: &MatchResult) -> io::Result<()> {
    // OID with optional hint
    if let Some(ref hint) = m.hint {
        write!(w, "{} ({})", m.oid, hint)?;
    } else {
        write!(w, "{}", m.oid)?;
    }
    write!(w, " <- {} {}", m.mode, m.prefix)?;
    if m.writable {
        write!(w, " [rw]")?;
    }
    writeln!(w)
}

fn write_resolved_human<W: Write>(w: &mut W, results: &[ResolveResult]) -> io::Result<()> {
    for r in results {
        let op = if r.exact { "get" } else { "next" };
        write!(w, "{} {}: ", op, r.request)?;
        match &r.response {
            Some(m) => write_match_human(w, m)?,
            None => writeln!(w, "no match")?,
        }
    }
    Ok(())
}

fn write_envelope_human<W: Write>(
    w: &mut W,
    env: &CommunityEnvelope,
    result: &EnvelopeResult,
) -> io::Result<()> {
    match &result.version_name {
        Some(name) => writeln!(w, "Version:   {} ({})", result.version, name)?,
        None => writeln!(w, "Version:   {} (unknown)", result.version)?,
    }
    match &result.community {
        Some(text) => writeln!(w, "Community: \"{}\"", text)?,
        None => writeln!(w, "Community: {}", format_hex_string(&env.community))?,
    }
    writeln!(w, "Payload:   {} bytes", result.payload_len)?;
    if !env.payload.is_empty() {
        writeln!(w, "           {}", format_hex_string(&env.payload))?;
    }
    Ok(())
}

/// Parse a hex string, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: String = s.split_whitespace().collect();
    let cleaned = cleaned.strip_prefix("0x").unwrap_or(&cleaned);
    if let Some(pos) = cleaned.bytes().position(|b| !b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit at position {}", pos));
    }
    if cleaned.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", cleaned.len()));
    }
    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {}: {}", i, e))
        })
        .collect()
}

/// Check if bytes are printable ASCII/UTF-8.
fn is_printable(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return true;
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        s.chars()
            .all(|c| c.is_ascii_graphic() || c.is_ascii_whitespace())
    } else {
        false
    }
}

/// Format bytes as hex string (lowercase, no separator).
fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Format bytes as spaced hex for display.
fn format_hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write an error message to stderr.
pub fn write_error(err: &crate::Error) {
    eprintln!("Error: {}", err);
}
