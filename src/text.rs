//! Text helpers for agent configuration lines.
//!
//! These are the lenient parsers used when MIB modules read their settings:
//! dotted OIDs as written in configuration files, and whitespace-separated
//! fields. Nothing here performs I/O.

use smallvec::SmallVec;

use crate::error::{Error, OidErrorKind, Result};
use crate::oid::{MAX_OID_LEN, Oid};

/// Parse a dotted-decimal OID leniently.
///
/// An optional leading `.` is skipped, then digit groups separated by single
/// dots are read until the first character that does not continue the OID.
/// Whatever follows is ignored. At least one arc is required.
///
/// ```rust
/// use snmp_agent_core::text::parse_text;
/// use snmp_agent_core::oid;
///
/// assert_eq!(parse_text(".1.3.6.1.2.1").unwrap(), oid!(1, 3, 6, 1, 2, 1));
/// assert_eq!(parse_text("1.3.6 trailing").unwrap(), oid!(1, 3, 6));
/// assert!(parse_text("").is_err());
/// ```
pub fn parse_text(s: &str) -> Result<Oid> {
    let bytes = s.as_bytes();
    let mut pos = usize::from(bytes.first() == Some(&b'.'));
    let mut arcs: SmallVec<[u32; 16]> = SmallVec::new();

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let arc: u32 = s[start..pos]
            .parse()
            .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;
        if arcs.len() == MAX_OID_LEN {
            return Err(Error::invalid_oid_with_input(
                OidErrorKind::TooManyArcs {
                    count: arcs.len() + 1,
                    max: MAX_OID_LEN,
                },
                s,
            ));
        }
        arcs.push(arc);

        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
        } else {
            break;
        }
    }

    if arcs.is_empty() {
        return Err(Error::invalid_oid_with_input(OidErrorKind::Empty, s));
    }
    Oid::from_arcs(arcs)
}

/// Selects a whitespace-separated field on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The n-th field, counting from 1.
    Nth(usize),
    /// The final field.
    Last,
}

/// Locate a field, returning the line from the start of that field onward.
///
/// Returns `None` when the line is blank, when `Nth(0)` is asked for, or when
/// the line has fewer fields than requested.
///
/// ```rust
/// use snmp_agent_core::text::{find_field, Field};
///
/// assert_eq!(find_field("  alpha beta  gamma", Field::Nth(2)), Some("beta  gamma"));
/// assert_eq!(find_field("alpha beta gamma", Field::Last), Some("gamma"));
/// assert_eq!(find_field("alpha", Field::Nth(2)), None);
/// ```
pub fn find_field(line: &str, field: Field) -> Option<&str> {
    match field {
        Field::Last => {
            // Drop trailing whitespace, then back up over the final token.
            let trimmed = line.trim_end();
            let start = trimmed
                .rfind(char::is_whitespace)
                .map(|i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
                .unwrap_or(0);
            let tail = &line[start..];
            (!trimmed.is_empty()).then_some(tail)
        }
        Field::Nth(0) => None,
        Field::Nth(n) => {
            let mut rest = line.trim_start();
            for _ in 1..n {
                let end = rest.find(char::is_whitespace)?;
                rest = rest[end..].trim_start();
            }
            (!rest.is_empty()).then_some(rest)
        }
    }
}

/// Like [`find_field`], but returns only the selected token.
///
/// ```rust
/// use snmp_agent_core::text::{nth_field, Field};
///
/// assert_eq!(nth_field("  alpha beta  gamma", Field::Nth(2)), Some("beta"));
/// assert_eq!(nth_field("alpha beta gamma  ", Field::Last), Some("gamma"));
/// ```
pub fn nth_field(line: &str, field: Field) -> Option<&str> {
    find_field(line, field).and_then(|rest| rest.split_whitespace().next())
}

/// Split off the first word, returning it and the text after the whitespace
/// that follows it.
///
/// ```rust
/// use snmp_agent_core::text::copy_word;
///
/// assert_eq!(copy_word("table  1.3.6.1 *"), ("table", "1.3.6.1 *"));
/// assert_eq!(copy_word("last"), ("last", ""));
/// ```
pub fn copy_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}
