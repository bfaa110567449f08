//! Well-known OID name hints.
//!
//! A small hardcoded table of common variable names for display and argument
//! parsing. This is NOT MIB support.

use crate::Oid;

/// Well-known variable prefixes (no instance arc).
static WELL_KNOWN_OIDS: &[(&[u32], &str)] = &[
    // SNMPv2-MIB::system
    (&[1, 3, 6, 1, 2, 1, 1], "system"),
    (&[1, 3, 6, 1, 2, 1, 1, 1], "sysDescr"),
    (&[1, 3, 6, 1, 2, 1, 1, 2], "sysObjectID"),
    (&[1, 3, 6, 1, 2, 1, 1, 3], "sysUpTime"),
    (&[1, 3, 6, 1, 2, 1, 1, 4], "sysContact"),
    (&[1, 3, 6, 1, 2, 1, 1, 5], "sysName"),
    (&[1, 3, 6, 1, 2, 1, 1, 6], "sysLocation"),
    (&[1, 3, 6, 1, 2, 1, 1, 7], "sysServices"),
    // IF-MIB::interfaces
    (&[1, 3, 6, 1, 2, 1, 2], "interfaces"),
    (&[1, 3, 6, 1, 2, 1, 2, 1], "ifNumber"),
    (&[1, 3, 6, 1, 2, 1, 2, 2], "ifTable"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1], "ifEntry"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1, 1], "ifIndex"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2], "ifDescr"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1, 3], "ifType"),
];

/// Look up a friendly name for an OID.
///
/// The longest well-known prefix wins and any remaining arcs are appended,
/// so `1.3.6.1.2.1.1.1.0` becomes `sysDescr.0`.
pub fn lookup(oid: &Oid) -> Option<String> {
    let arcs = oid.arcs();
    let (prefix, name) = WELL_KNOWN_OIDS
        .iter()
        .filter(|(prefix, _)| arcs.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())?;

    let mut out = String::from(*name);
    for arc in &arcs[prefix.len()..] {
        out.push('.');
        out.push_str(&arc.to_string());
    }
    Some(out)
}

/// Parse an OID from string, supporting both dotted notation and well-known names.
///
/// Accepts:
/// - Dotted notation: "1.3.6.1.2.1.1.1.0" or ".1.3.6.1.2.1.1.1.0"
/// - Well-known names with optional instance arcs: "sysDescr.0", "ifDescr.3", "system"
pub fn parse_oid(s: &str) -> Result<Oid, String> {
    if s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Oid::parse(s).map_err(|e| format!("invalid OID '{}': {}", s, e));
    }

    let (name, suffix) = match s.split_once('.') {
        Some((name, suffix)) => (name, Some(suffix)),
        None => (s, None),
    };

    let Some((arcs, _)) = WELL_KNOWN_OIDS
        .iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(name))
    else {
        return Err(format!(
            "unknown OID name '{}'; use dotted notation (e.g., 1.3.6.1.2.1.1.1.0)",
            s
        ));
    };

    let mut oid = Oid::from_slice(arcs);
    if let Some(suffix) = suffix {
        let instance = Oid::parse(suffix).map_err(|e| format!("invalid OID '{}': {}", s, e))?;
        for arc in instance.arcs() {
            oid = oid
                .child(*arc)
                .map_err(|e| format!("invalid OID '{}': {}", s, e))?;
        }
    }
    Ok(oid)
}
