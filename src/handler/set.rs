//! Two-phase SET against a registry (RFC 3416).

use std::sync::Arc;

use crate::oid::Oid;
use crate::registry::Registry;
use crate::value::Value;

use super::{SetResult, WriteCapability};

/// Result of a multi-variable SET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOutcome {
    /// Overall result.
    pub result: SetResult,
    /// 1-based index of the failing variable, 0 on success.
    pub index: usize,
}

impl SetOutcome {
    fn ok() -> Self {
        Self {
            result: SetResult::Ok,
            index: 0,
        }
    }

    fn failed(result: SetResult, position: usize) -> Self {
        Self {
            result,
            index: position + 1,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Set a single variable.
///
/// `oid` is resolved exactly; the matched entry's write capability is then
/// asked to test and commit `value`. A variable with no entry or no write
/// capability yields [`SetResult::NotWritable`].
pub fn apply_set(registry: &Registry, oid: &Oid, value: &Value) -> SetResult {
    apply_sets(registry, &[(oid.clone(), value.clone())]).result
}

/// Set several variables as one request.
///
/// 1. **Test phase**: every variable is resolved and tested. The first
///    failure aborts the request with nothing changed.
/// 2. **Commit phase**: each variable is committed in order. If a commit
///    fails, the variables already committed are undone in reverse order and
///    the request fails with `CommitFailed`.
pub fn apply_sets(registry: &Registry, vars: &[(Oid, Value)]) -> SetOutcome {
    struct Pending<'a> {
        writer: &'a Arc<dyn WriteCapability>,
        oid: Oid,
        value: &'a Value,
    }

    let mut pending: Vec<Pending<'_>> = Vec::with_capacity(vars.len());

    for (position, (oid, value)) in vars.iter().enumerate() {
        let resolved = registry.resolve(oid, true);
        let Some(m) = resolved.into_match() else {
            tracing::debug!(snmp.oid = %oid, "set on unregistered variable");
            return SetOutcome::failed(SetResult::NotWritable, position);
        };
        let Some(writer) = m.writer() else {
            tracing::debug!(snmp.oid = %oid, snmp.prefix = %m.entry().prefix(), "set on read-only variable");
            return SetOutcome::failed(SetResult::NotWritable, position);
        };

        let result = writer.test_set(m.oid(), value);
        if !result.is_ok() {
            tracing::debug!(snmp.oid = %oid, ?result, "set test phase failed");
            return SetOutcome::failed(result, position);
        }

        pending.push(Pending {
            writer,
            oid: m.into_oid(),
            value,
        });
    }

    for (position, p) in pending.iter().enumerate() {
        let result = p.writer.commit_set(&p.oid, p.value);
        if !result.is_ok() {
            tracing::warn!(snmp.oid = %p.oid, ?result, "set commit failed, undoing");
            for done in pending[..position].iter().rev() {
                done.writer.undo_set(&done.oid, done.value);
            }
            return SetOutcome::failed(SetResult::CommitFailed, position);
        }
    }

    SetOutcome::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::AdminTrigger;
    use crate::oid;
    use crate::registry::{RegistryBuilder, VariableEntry};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Records committed values; optionally refuses to commit.
    struct Recorder {
        log: Mutex<Vec<String>>,
        fail_commit: bool,
    }

    impl Recorder {
        fn new(fail_commit: bool) -> Arc<Self> {
            Arc::new(Self {
                log: Mutex::new(Vec::new()),
                fail_commit,
            })
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    impl WriteCapability for Recorder {
        fn test_set(&self, _oid: &Oid, value: &Value) -> SetResult {
            match value.as_integer() {
                Ok(_) => SetResult::Ok,
                Err(e) => SetResult::from(&e),
            }
        }

        fn commit_set(&self, oid: &Oid, value: &Value) -> SetResult {
            if self.fail_commit {
                return SetResult::CommitFailed;
            }
            self.log.lock().unwrap().push(format!("commit {oid} {value}"));
            SetResult::Ok
        }

        fn undo_set(&self, oid: &Oid, _value: &Value) {
            self.log.lock().unwrap().push(format!("undo {oid}"));
        }
    }

    #[test]
    fn test_apply_set_trigger() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let registry = RegistryBuilder::new()
            .entry(
                VariableEntry::scalar(oid!(1, 3, 6, 1, 4, 1, 2021, 100, 12)).with_writer(
                    Arc::new(AdminTrigger::clear_cache(move || {
                        flag.store(true, Ordering::SeqCst)
                    })),
                ),
            )
            .build()
            .unwrap();

        let oid = oid!(1, 3, 6, 1, 4, 1, 2021, 100, 12, 0);
        assert_eq!(
            apply_set(&registry, &oid, &Value::from("1")),
            SetResult::WrongType
        );
        assert!(!fired.load(Ordering::SeqCst));

        assert_eq!(apply_set(&registry, &oid, &Value::Integer(1)), SetResult::Ok);
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_apply_set_not_writable() {
        let registry = RegistryBuilder::new()
            .scalar(oid!(1, 3, 6, 1, 2, 1, 1, 1))
            .build()
            .unwrap();

        assert_eq!(
            apply_set(&registry, &oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), &Value::Integer(1)),
            SetResult::NotWritable
        );
        assert_eq!(
            apply_set(&registry, &oid!(1, 3, 6, 1, 2, 1, 1, 2, 0), &Value::Integer(1)),
            SetResult::NotWritable
        );
    }

    #[test]
    fn test_commit_failure_undoes_earlier_commits() {
        let good = Recorder::new(false);
        let bad = Recorder::new(true);
        let registry = RegistryBuilder::new()
            .entry(VariableEntry::table(oid!(1, 3, 6, 1, 4, 1, 1), None).with_writer(good.clone()))
            .entry(VariableEntry::scalar(oid!(1, 3, 6, 1, 4, 1, 2)).with_writer(bad.clone()))
            .build()
            .unwrap();

        let vars = [
            (oid!(1, 3, 6, 1, 4, 1, 1, 7), Value::Integer(5)),
            (oid!(1, 3, 6, 1, 4, 1, 2, 0), Value::Integer(6)),
        ];
        let outcome = apply_sets(&registry, &vars);
        assert_eq!(outcome.result, SetResult::CommitFailed);
        assert_eq!(outcome.index, 2);
        assert_eq!(
            good.log(),
            ["commit 1.3.6.1.4.1.1.7 INTEGER: 5", "undo 1.3.6.1.4.1.1.7"]
        );
    }

    #[test]
    fn test_test_failure_commits_nothing() {
        let rec = Recorder::new(false);
        let registry = RegistryBuilder::new()
            .entry(VariableEntry::table(oid!(1, 3, 6, 1, 4, 1, 1), Some(3)).with_writer(rec.clone()))
            .build()
            .unwrap();

        let vars = [
            (oid!(1, 3, 6, 1, 4, 1, 1, 1), Value::Integer(1)),
            (oid!(1, 3, 6, 1, 4, 1, 1, 2), Value::Null),
        ];
        let outcome = apply_sets(&registry, &vars);
        assert_eq!(
            outcome,
            SetOutcome {
                result: SetResult::WrongType,
                index: 2
            }
        );
        assert!(rec.log().is_empty());

        // Instance 4 is past the bound.
        let outcome = apply_sets(&registry, &[(oid!(1, 3, 6, 1, 4, 1, 1, 4), Value::Integer(1))]);
        assert_eq!(outcome.result, SetResult::NotWritable);
        assert_eq!(outcome.index, 1);
    }

    #[test]
    fn test_empty_request() {
        let registry = RegistryBuilder::new().build().unwrap();
        assert!(apply_sets(&registry, &[]).is_ok());
    }
}
