//! Common test fixtures and constants.

use snmp_agent_core::registry::config::parse_registry;
use snmp_agent_core::{Oid, Registry, oid};

// =============================================================================
// Standard system MIB prefixes (1.3.6.1.2.1.1.*)
// =============================================================================

pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1)
}
pub fn sys_object_id() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 2)
}
pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3)
}
pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5)
}

// =============================================================================
// IF-MIB columns (1.3.6.1.2.1.2.2.1.*)
// =============================================================================

pub fn if_index() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1)
}
pub fn if_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2)
}

// =============================================================================
// Subtree roots (for walks)
// =============================================================================

/// System subtree root: 1.3.6.1.2.1.1
pub fn system_subtree() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1)
}

/// Interfaces subtree root: 1.3.6.1.2.1.2
pub fn interfaces_subtree() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2)
}

/// OID no fixture registry answers for
pub fn nonexistent_oid() -> Oid {
    oid!(1, 3, 6, 1, 99, 99, 99, 0)
}

// =============================================================================
// Registries
// =============================================================================

/// Number of interfaces in [`agent_registry`].
pub const IF_COUNT: u32 = 3;

/// Registry text as an agent would ship it.
pub const AGENT_REGISTRY: &str = "\
# system group
scalar .1.3.6.1.2.1.1.1 sysDescr
scalar .1.3.6.1.2.1.1.2 sysObjectID
scalar .1.3.6.1.2.1.1.3 sysUpTime
scalar .1.3.6.1.2.1.1.5 sysName

# interfaces
table  .1.3.6.1.2.1.2.2.1.1 3 ifIndex
table  .1.3.6.1.2.1.2.2.1.2 3 ifDescr

# enterprise admin triggers
scalar .1.3.6.1.4.1.2021.100.12 clearCache
";

/// A small agent registry: four system scalars, two interface columns with
/// [`IF_COUNT`] rows and one enterprise scalar.
pub fn agent_registry() -> Registry {
    parse_registry(AGENT_REGISTRY).expect("fixture registry parses")
}

/// V2c read-only community
pub const COMMUNITY_RO: &[u8] = b"public";
/// V2c read-write community
pub const COMMUNITY_RW: &[u8] = b"private";

/// A captured v2c GetRequest for sysDescr.0 with community "public".
pub const V2C_GET_SYSDESCR: &[u8] = &[
    0x30, 0x29, // SEQUENCE, 41 bytes
    0x02, 0x01, 0x01, // INTEGER 1 (v2c)
    0x04, 0x06, b'p', b'u', b'b', b'l', b'i', b'c', // OCTET STRING "public"
    0xA0, 0x1C, // GetRequest-PDU, 28 bytes
    0x02, 0x04, 0x12, 0x34, 0x56, 0x78, // request-id
    0x02, 0x01, 0x00, // error-status
    0x02, 0x01, 0x00, // error-index
    0x30, 0x0E, // varbind list
    0x30, 0x0C, // varbind
    0x06, 0x08, 0x2B, 0x06, 0x01, 0x02, 0x01, 0x01, 0x01, 0x00, // sysDescr.0
    0x05, 0x00, // NULL
];
