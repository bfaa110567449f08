//! Administrative trigger variables.

use std::fmt;

use crate::oid::Oid;
use crate::value::Value;

use super::{SetResult, WriteCapability};

/// The value that fires a trigger.
pub const TRIGGER_VALUE: i32 = 1;

/// What an [`AdminTrigger`] is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// Invalidate cached MIB data so the next read refreshes it.
    ClearCache,
    /// Schedule an agent restart.
    Restart,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::ClearCache => write!(f, "clear-cache"),
            TriggerKind::Restart => write!(f, "restart"),
        }
    }
}

type Action = Box<dyn Fn() + Send + Sync + 'static>;

/// A writable INTEGER variable that runs an action when set to `1`.
///
/// Any other integer is accepted and ignored. A non-integer value is refused
/// with [`SetResult::WrongType`]. The action runs at commit only, never while
/// testing.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use snmp_agent_core::handler::{AdminTrigger, SetResult, WriteCapability};
/// use snmp_agent_core::{Value, oid};
///
/// let flushed = Arc::new(AtomicBool::new(false));
/// let flag = flushed.clone();
/// let trigger = AdminTrigger::clear_cache(move || flag.store(true, Ordering::SeqCst));
///
/// let oid = oid!(1, 3, 6, 1, 4, 1, 2021, 100, 12, 0);
/// assert_eq!(trigger.commit_set(&oid, &Value::Integer(1)), SetResult::Ok);
/// assert!(flushed.load(Ordering::SeqCst));
/// ```
pub struct AdminTrigger {
    kind: TriggerKind,
    action: Action,
}

impl AdminTrigger {
    /// A trigger of the given kind running `action`.
    pub fn new(kind: TriggerKind, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            kind,
            action: Box::new(action),
        }
    }

    /// Cache-flush trigger.
    pub fn clear_cache(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self::new(TriggerKind::ClearCache, action)
    }

    /// Restart trigger. The action is expected to schedule the restart, not
    /// perform it inline.
    pub fn restart(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self::new(TriggerKind::Restart, action)
    }

    pub fn kind(&self) -> TriggerKind {
        self.kind
    }
}

impl fmt::Debug for AdminTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminTrigger")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl WriteCapability for AdminTrigger {
    fn test_set(&self, oid: &Oid, value: &Value) -> SetResult {
        match value.as_integer() {
            Ok(_) => SetResult::Ok,
            Err(e) => {
                tracing::debug!(
                    snmp.trigger = %self.kind,
                    snmp.oid = %oid,
                    error = %e,
                    "trigger value refused"
                );
                SetResult::from(&e)
            }
        }
    }

    fn commit_set(&self, oid: &Oid, value: &Value) -> SetResult {
        let v = match value.as_integer() {
            Ok(v) => v,
            Err(e) => return SetResult::from(&e),
        };
        if v == TRIGGER_VALUE {
            tracing::info!(
                snmp.trigger = %self.kind,
                snmp.oid = %oid,
                "administrative trigger fired"
            );
            (self.action)();
        }
        SetResult::Ok
    }
}
