//! Write capabilities for registry entries.
//!
//! The matching engine only decides *which* instance answers a request. When
//! that instance is writable, the entry carries a [`WriteCapability`], surfaced
//! on the match by [`Match::writer`](crate::matching::Match::writer).
//!
//! - [`WriteCapability`] - two-phase test/commit interface with optional undo
//! - [`SetResult`] - per-phase outcome, mapped to RFC 3416 error status codes
//! - [`AdminTrigger`] - INTEGER variables that run an action when set to 1
//!   (cache flush, restart request)
//! - [`apply_set`] / [`apply_sets`] - resolve and run a SET against a registry
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use snmp_agent_core::handler::{apply_set, AdminTrigger, SetResult};
//! use snmp_agent_core::registry::{RegistryBuilder, VariableEntry};
//! use snmp_agent_core::{Value, oid};
//!
//! let restart = VariableEntry::scalar(oid!(1, 3, 6, 1, 4, 1, 2021, 100, 13))
//!     .with_writer(Arc::new(AdminTrigger::restart(|| { /* schedule restart */ })));
//! let registry = RegistryBuilder::new().entry(restart).build().unwrap();
//!
//! let oid = oid!(1, 3, 6, 1, 4, 1, 2021, 100, 13, 0);
//! assert_eq!(apply_set(&registry, &oid, &Value::Integer(1)), SetResult::Ok);
//! assert_eq!(apply_set(&registry, &oid, &Value::from("now")), SetResult::WrongType);
//! ```

mod results;
mod set;
mod traits;
mod trigger;

pub use results::SetResult;
pub use set::{SetOutcome, apply_set, apply_sets};
pub use traits::WriteCapability;
pub use trigger::{AdminTrigger, TRIGGER_VALUE, TriggerKind};
