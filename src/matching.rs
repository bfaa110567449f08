//! MIB matching engine.
//!
//! Given a requested OID, an exact/next flag and one registry entry, decide
//! whether the entry answers the request and with which instance OID. All
//! functions here are pure: the request is borrowed, never rewritten, and the
//! outcome is a [`Resolution`].
//!
//! Two modes exist, selected by [`MatchMode`]:
//!
//! - **Scalar**: the only instance is `prefix.0`. An exact request must name
//!   it; a get-next request matches when it sorts before it.
//! - **Table**: instances `prefix.1`, `prefix.2`, ... up to an optional bound.
//!   A get-next request advances to the following instance; a request before
//!   the column starts at instance 1.
//!
//! ```rust
//! use snmp_agent_core::matching::{check, Resolution};
//! use snmp_agent_core::registry::VariableEntry;
//! use snmp_agent_core::oid;
//!
//! let column = VariableEntry::table(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2), Some(5));
//!
//! // Walking off instance 4 lands on 5.
//! let next = check(&column, &oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 4), false);
//! assert_eq!(next.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 5)));
//!
//! // Instance 5 is the last one.
//! let end = check(&column, &oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 5), false);
//! assert!(matches!(end, Resolution::NoMatch));
//! ```

use std::cmp::Ordering;
use std::sync::Arc;

use crate::handler::WriteCapability;
use crate::oid::Oid;
use crate::registry::{MatchMode, VariableEntry};

/// Size hint reported when an entry does not override it (width of a native long).
pub const DEFAULT_SIZE_HINT: usize = 8;

/// A successful match: the response OID and the entry that produced it.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    oid: Oid,
    size_hint: usize,
    entry: &'a VariableEntry,
}

impl<'a> Match<'a> {
    fn new(oid: Oid, entry: &'a VariableEntry) -> Self {
        Self {
            oid,
            size_hint: entry.size_hint().unwrap_or(DEFAULT_SIZE_HINT),
            entry,
        }
    }

    /// The response OID.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Consume the match, returning the response OID.
    pub fn into_oid(self) -> Oid {
        self.oid
    }

    /// Length of the response OID in arcs. Always `prefix.len() + 1`.
    pub fn len(&self) -> usize {
        self.oid.len()
    }

    /// Expected value size for the variable.
    pub fn size_hint(&self) -> usize {
        self.size_hint
    }

    /// The entry that answered.
    pub fn entry(&self) -> &'a VariableEntry {
        self.entry
    }

    /// Write capability of the matched entry, if it has one.
    pub fn writer(&self) -> Option<&'a Arc<dyn WriteCapability>> {
        self.entry.writer()
    }
}

/// Outcome of matching a request.
///
/// `NoMatch` is an ordinary answer, meaning "not this variable" or "past the
/// end of this table". It is not an error.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    /// The request resolved to an instance.
    Found(Match<'a>),
    /// No instance answers the request.
    NoMatch,
}

impl<'a> Resolution<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// The match, if found.
    pub fn as_match(&self) -> Option<&Match<'a>> {
        match self {
            Resolution::Found(m) => Some(m),
            Resolution::NoMatch => None,
        }
    }

    /// Consume into the match, if found.
    pub fn into_match(self) -> Option<Match<'a>> {
        match self {
            Resolution::Found(m) => Some(m),
            Resolution::NoMatch => None,
        }
    }

    /// The response OID, if found.
    pub fn oid(&self) -> Option<&Oid> {
        self.as_match().map(Match::oid)
    }
}

/// Match `requested` against `entry` using the entry's mode.
pub fn check<'a>(entry: &'a VariableEntry, requested: &Oid, exact: bool) -> Resolution<'a> {
    match entry.mode() {
        MatchMode::Scalar => check_scalar(entry, requested, exact),
        MatchMode::Table => check_table(entry, requested, exact),
    }
}

/// Match a scalar variable, whose only instance is `prefix.0`.
pub fn check_scalar<'a>(entry: &'a VariableEntry, requested: &Oid, exact: bool) -> Resolution<'a> {
    let Ok(candidate) = entry.prefix().child(0) else {
        return verdict(entry, requested, exact, None);
    };

    let ord = requested.cmp(&candidate);
    let found = if exact {
        ord == Ordering::Equal
    } else {
        ord == Ordering::Less
    };

    verdict(entry, requested, exact, found.then_some(candidate))
}

/// Match a table column with instances `prefix.1 ..= max_instance`.
pub fn check_table<'a>(entry: &'a VariableEntry, requested: &Oid, exact: bool) -> Resolution<'a> {
    verdict(entry, requested, exact, table_candidate(entry, requested, exact))
}

fn table_candidate(entry: &VariableEntry, requested: &Oid, exact: bool) -> Option<Oid> {
    let prefix = entry.prefix().arcs();
    let req = requested.arcs();

    // Ordering of the overlapping arcs only.
    let rtest = req
        .iter()
        .zip(prefix)
        .map(|(r, p)| r.cmp(p))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal);

    // Already past this variable.
    if rtest == Ordering::Greater
        || (rtest == Ordering::Equal && req.len() > prefix.len() + 1)
        || (exact && rtest != Ordering::Equal)
    {
        return None;
    }

    let candidate = if req.len() <= prefix.len() || rtest == Ordering::Less {
        entry.prefix().child(1).ok()?
    } else {
        let instance = req[prefix.len()];
        let instance = if exact {
            instance
        } else {
            // u32 overflow means the column is exhausted.
            instance.checked_add(1)?
        };
        entry.prefix().child(instance).ok()?
    };

    if let Some(max) = entry.max_instance()
        && candidate.last_arc().is_some_and(|last| last > max)
    {
        return None;
    }

    Some(candidate)
}

fn verdict<'a>(
    entry: &'a VariableEntry,
    requested: &Oid,
    exact: bool,
    candidate: Option<Oid>,
) -> Resolution<'a> {
    match candidate {
        Some(oid) => {
            tracing::trace!(
                snmp.oid = %requested,
                snmp.prefix = %entry.prefix(),
                snmp.mode = %entry.mode(),
                exact,
                snmp.response = %oid,
                "matched"
            );
            Resolution::Found(Match::new(oid, entry))
        }
        None => {
            tracing::trace!(
                snmp.oid = %requested,
                snmp.prefix = %entry.prefix(),
                snmp.mode = %entry.mode(),
                exact,
                "no match"
            );
            Resolution::NoMatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{AdminTrigger, SetResult};
    use crate::oid;

    fn sys_descr() -> VariableEntry {
        VariableEntry::scalar(oid!(1, 3, 6, 1, 2, 1, 1, 1))
    }

    fn column(max: Option<u32>) -> VariableEntry {
        VariableEntry::table(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2), max)
    }

    fn instance(i: u32) -> Oid {
        oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2).child(i).unwrap()
    }

    // Scalar

    #[test]
    fn test_scalar_exact_on_instance() {
        let entry = sys_descr();
        let req = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
        let res = check(&entry, &req, true);
        let m = res.as_match().unwrap();
        assert_eq!(m.oid(), &req);
        assert_eq!(m.len(), 9);
        assert_eq!(m.size_hint(), DEFAULT_SIZE_HINT);
    }

    #[test]
    fn test_scalar_next_from_prefix() {
        let entry = sys_descr();
        let res = check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 1), false);
        assert_eq!(res.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)));
    }

    #[test]
    fn test_scalar_next_from_instance_is_no_match() {
        let entry = sys_descr();
        let res = check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), false);
        assert!(matches!(res, Resolution::NoMatch));
    }

    #[test]
    fn test_scalar_exact_rejects_prefix_and_deeper() {
        let entry = sys_descr();
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 1), true).is_found());
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 1, 0, 0), true).is_found());
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 1, 1), true).is_found());
    }

    #[test]
    fn test_scalar_next_from_before() {
        let entry = sys_descr();
        let res = check(&entry, &oid!(1, 3, 6, 1), false);
        assert_eq!(res.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)));

        // A request after the instance never matches.
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 2), false).is_found());
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 1, 0, 5), false).is_found());
    }

    // Table

    #[test]
    fn test_table_bound_next() {
        let entry = column(Some(5));
        assert!(matches!(
            check(&entry, &instance(5), false),
            Resolution::NoMatch
        ));
        assert_eq!(check(&entry, &instance(4), false).oid(), Some(&instance(5)));
    }

    #[test]
    fn test_table_bound_exact() {
        let entry = column(Some(5));
        for i in 1..=5 {
            let res = check(&entry, &instance(i), true);
            assert_eq!(res.oid(), Some(&instance(i)), "instance {i}");
        }
        assert!(!check(&entry, &instance(6), true).is_found());
    }

    #[test]
    fn test_table_next_from_prefix_and_before() {
        let entry = column(Some(5));
        let prefix = entry.prefix().clone();
        assert_eq!(check(&entry, &prefix, false).oid(), Some(&instance(1)));
        assert_eq!(
            check(&entry, &oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 9), false).oid(),
            Some(&instance(1))
        );
        assert_eq!(check(&entry, &oid!(1, 3), false).oid(), Some(&instance(1)));
    }

    #[test]
    fn test_table_next_from_instance_zero() {
        let entry = column(None);
        assert_eq!(check(&entry, &instance(0), false).oid(), Some(&instance(1)));
    }

    #[test]
    fn test_table_after_column_is_no_match() {
        let entry = column(None);
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 3), false).is_found());
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 3, 1), true).is_found());
    }

    #[test]
    fn test_table_request_deeper_than_instance_is_rejected() {
        let entry = column(None);
        let mut deep = instance(3).arcs().to_vec();
        deep.push(7);
        let deep = Oid::from_slice(&deep);
        assert!(!check(&entry, &deep, false).is_found());
        assert!(!check(&entry, &deep, true).is_found());
    }

    #[test]
    fn test_table_exact_before_column_is_rejected() {
        let entry = column(None);
        assert!(!check(&entry, &oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 1), true).is_found());
    }

    #[test]
    fn test_table_exact_short_request_answers_first_instance() {
        // A request no longer than the prefix resolves to instance 1 even
        // for exact lookups.
        let entry = column(None);
        let prefix = entry.prefix().clone();
        assert_eq!(check(&entry, &prefix, true).oid(), Some(&instance(1)));
        assert_eq!(check(&entry, &instance(0), true).oid(), Some(&instance(0)));
    }

    #[test]
    fn test_table_unbounded() {
        let entry = column(None);
        assert_eq!(
            check(&entry, &instance(1_000_000), false).oid(),
            Some(&instance(1_000_001))
        );
    }

    #[test]
    fn test_table_increment_overflow_is_no_match() {
        let entry = column(None);
        assert!(matches!(
            check(&entry, &instance(u32::MAX), false),
            Resolution::NoMatch
        ));
        // Exact lookups of the top instance are unaffected.
        assert!(check(&entry, &instance(u32::MAX), true).is_found());
    }

    #[test]
    fn test_table_bound_zero() {
        let entry = column(Some(0));
        assert!(!check(&entry, entry.prefix(), false).is_found());
    }

    #[test]
    fn test_response_length() {
        let entry = column(Some(10));
        for req in [oid!(1), instance(2), entry.prefix().clone()] {
            if let Some(m) = check(&entry, &req, false).into_match() {
                assert_eq!(m.len(), entry.prefix().len() + 1);
            }
        }
    }

    #[test]
    fn test_prefix_at_capacity_never_matches() {
        let long = Oid::from_slice(&[1; crate::oid::MAX_OID_LEN]);
        let scalar = VariableEntry::scalar(long.clone());
        let table = VariableEntry::table(long.clone(), None);
        assert!(!check(&scalar, &oid!(1), false).is_found());
        assert!(!check(&table, &oid!(1), false).is_found());
    }

    #[test]
    fn test_size_hint_and_writer_surface_from_entry() {
        let entry = sys_descr()
            .with_size_hint(255)
            .with_writer(Arc::new(AdminTrigger::clear_cache(|| {})));
        let res = check(&entry, &oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), true);
        let m = res.as_match().unwrap();
        assert_eq!(m.size_hint(), 255);
        let writer = m.writer().unwrap();
        assert_eq!(
            writer.test_set(m.oid(), &crate::Value::Integer(1)),
            SetResult::Ok
        );

        let plain = sys_descr();
        let res = check(&plain, &oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), true);
        assert!(res.as_match().unwrap().writer().is_none());
    }
}
