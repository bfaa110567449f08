//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use snmp_agent_core::prelude::*;
//! ```
//!
//! This imports:
//! - Core types: [`Oid`], [`Value`], [`Version`]
//! - Matching: [`Registry`], [`RegistryBuilder`], [`VariableEntry`], [`Resolution`]
//! - Envelope: [`CommunityEnvelope`], [`EnvelopeHeader`]
//! - Writes: [`WriteCapability`], [`SetResult`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for OID literals

pub use crate::envelope::{CommunityEnvelope, EnvelopeHeader};
pub use crate::error::{Error, Result};
pub use crate::handler::{SetResult, WriteCapability};
pub use crate::matching::{Match, Resolution};
pub use crate::oid::Oid;
pub use crate::registry::{Registry, RegistryBuilder, VariableEntry};
pub use crate::value::Value;
pub use crate::version::Version;

#[doc(no_inline)]
pub use crate::oid;
