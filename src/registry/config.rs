//! Registry text loader.
//!
//! Builds a [`Registry`] from configuration text, one entry per line:
//!
//! ```text
//! # comment
//! scalar <oid> [name]
//! table  <oid> <max-instance|*> [name]
//! ```
//!
//! OIDs are parsed with [`parse_text`], so `.1.3.6.1` and `1.3.6.1` are both
//! accepted. A `*` bound leaves the table unbounded.

use crate::error::{ConfigErrorKind, Error, Result};
use crate::text::{Field, nth_field, parse_text};

use super::{Registry, RegistryBuilder, VariableEntry};

const SCALAR: &str = "scalar";
const TABLE: &str = "table";
const UNBOUNDED: &str = "*";

/// Parse a whole registry description.
///
/// Errors carry the 1-based line number of the offending line.
///
/// ```rust
/// use snmp_agent_core::registry::config::parse_registry;
///
/// let registry = parse_registry(
///     "# system group\n\
///      scalar .1.3.6.1.2.1.1.1 sysDescr\n\
///      table  .1.3.6.1.2.1.2.2.1.2 4 ifDescr\n",
/// )
/// .unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
pub fn parse_registry(text: &str) -> Result<Registry> {
    let mut builder = RegistryBuilder::new();
    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        if let Some(entry) = parse_line(line, lineno)? {
            builder = builder.entry(entry);
        }
    }
    builder.build()
}

/// Parse a single line. Blank and comment lines yield `Ok(None)`.
///
/// Errors are reported against line 1; use [`parse_registry`] for real line
/// numbers.
pub fn parse_entry_line(line: &str) -> Result<Option<VariableEntry>> {
    parse_line(line, 1)
}

fn parse_line(line: &str, lineno: usize) -> Result<Option<VariableEntry>> {
    let line = match line.find('#') {
        Some(hash) => &line[..hash],
        None => line,
    };

    let Some(keyword) = nth_field(line, Field::Nth(1)) else {
        return Ok(None);
    };

    let oid_field = nth_field(line, Field::Nth(2))
        .ok_or_else(|| Error::config(lineno, ConfigErrorKind::MissingOid))?;
    let prefix = parse_text(oid_field).map_err(|e| match e {
        Error::InvalidOid { kind, .. } => Error::config(lineno, ConfigErrorKind::InvalidOid(kind)),
        other => other,
    })?;

    let (entry, name_field) = match keyword {
        SCALAR => (VariableEntry::scalar(prefix), 3),
        TABLE => {
            let bound = nth_field(line, Field::Nth(3))
                .ok_or_else(|| Error::config(lineno, ConfigErrorKind::MissingBound))?;
            let max = match bound {
                UNBOUNDED => None,
                n => Some(
                    n.parse::<u32>()
                        .map_err(|_| Error::config(lineno, ConfigErrorKind::InvalidBound))?,
                ),
            };
            (VariableEntry::table(prefix, max), 4)
        }
        _ => return Err(Error::config(lineno, ConfigErrorKind::UnknownKeyword)),
    };

    // Anything past the name is ignored.
    let entry = match nth_field(line, Field::Nth(name_field)) {
        Some(name) => entry.named(name),
        None => entry,
    };

    tracing::trace!(snmp.line = lineno, entry = %entry, "parsed registry line");
    Ok(Some(entry))
}
