//! Request-resolution core for SNMPv1/v2c agents.
//!
//! This crate covers the part of an agent between the socket and the MIB
//! modules:
//!
//! - [`envelope`] - decode and encode the community envelope
//!   (`SEQUENCE { version, community, payload }`)
//! - [`registry`] - the ordered set of variables the agent answers for
//! - [`matching`] - decide which instance answers a get or get-next request
//! - [`handler`] - write capabilities attached to variables, and the SET path
//! - [`text`] - lenient OID and field parsing for configuration lines
//!
//! PDU framing, transports, access control and SNMPv3 are not handled here.
//!
//! # Resolving requests
//!
//! ```rust
//! use snmp_agent_core::prelude::*;
//!
//! let registry = RegistryBuilder::new()
//!     .scalar(oid!(1, 3, 6, 1, 2, 1, 1, 1))
//!     .table(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1), Some(2))
//!     .build()?;
//!
//! // get sysDescr.0
//! let res = registry.resolve(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), true);
//! assert!(res.is_found());
//!
//! // get-next from the end of the table
//! let res = registry.resolve(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 2), false);
//! assert!(matches!(res, Resolution::NoMatch));
//! # Ok::<(), snmp_agent_core::Error>(())
//! ```
//!
//! # Envelopes
//!
//! ```rust
//! use bytes::Bytes;
//! use snmp_agent_core::prelude::*;
//!
//! let header = EnvelopeHeader::for_version(Version::V2c, Bytes::from_static(b"public"));
//! let msg = header.wrap(&[0xA0, 0x00])?;
//!
//! let env = CommunityEnvelope::decode(msg)?;
//! assert_eq!(env.version(), Some(Version::V2c));
//! assert_eq!(&env.community[..], b"public");
//! assert_eq!(&env.payload[..], &[0xA0, 0x00]);
//! # Ok::<(), snmp_agent_core::Error>(())
//! ```
//!
//! # Logging
//!
//! Events are emitted with [`tracing`]; the library never installs a
//! subscriber.

pub mod ber;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod matching;
pub mod oid;
pub mod prelude;
pub mod registry;
pub mod text;
pub mod value;
pub mod version;

#[cfg(feature = "cli")]
pub mod cli;

pub use envelope::{CommunityEnvelope, EnvelopeConfig, EnvelopeHeader};
pub use error::{Error, ErrorStatus, Result};
pub use matching::{Match, Resolution};
pub use oid::{MAX_OID_LEN, Oid};
pub use registry::{MatchMode, Registry, RegistryBuilder, VariableEntry};
pub use value::Value;
pub use version::Version;
