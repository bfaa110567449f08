//! WriteCapability trait.

use crate::oid::Oid;
use crate::value::Value;

use super::SetResult;

/// Write ("set value") capability attached to a [`VariableEntry`](crate::registry::VariableEntry).
///
/// The matching engine never creates a capability; it only surfaces the one
/// attached to the entry that matched. A set runs in two phases:
///
/// 1. **Test**: [`test_set`](WriteCapability::test_set) validates the value
///    without changing state.
/// 2. **Commit**: [`commit_set`](WriteCapability::commit_set) applies it. If a
///    commit fails, [`undo_set`](WriteCapability::undo_set) is called for
///    everything already committed in the same request.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use snmp_agent_core::handler::{SetResult, WriteCapability};
/// use snmp_agent_core::{Oid, Value};
///
/// struct Level(AtomicI32);
///
/// impl WriteCapability for Level {
///     fn test_set(&self, _oid: &Oid, value: &Value) -> SetResult {
///         match value.as_integer() {
///             Ok(v) if (0..=10).contains(&v) => SetResult::Ok,
///             Ok(_) => SetResult::WrongValue,
///             Err(_) => SetResult::WrongType,
///         }
///     }
///
///     fn commit_set(&self, _oid: &Oid, value: &Value) -> SetResult {
///         match value.as_integer() {
///             Ok(v) => {
///                 self.0.store(v, Ordering::Relaxed);
///                 SetResult::Ok
///             }
///             Err(_) => SetResult::CommitFailed,
///         }
///     }
/// }
/// ```
pub trait WriteCapability: Send + Sync + 'static {
    /// Validate a SET without modifying state.
    fn test_set(&self, oid: &Oid, value: &Value) -> SetResult;

    /// Apply a SET that passed `test_set`.
    fn commit_set(&self, oid: &Oid, value: &Value) -> SetResult;

    /// Roll back a committed SET (best effort).
    ///
    /// Default implementation does nothing.
    fn undo_set(&self, _oid: &Oid, _value: &Value) {}
}
