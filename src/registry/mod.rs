//! Variable registry.
//!
//! A [`Registry`] is the ordered, immutable set of [`VariableEntry`]s an agent
//! answers for. It is built once with a [`RegistryBuilder`] (or parsed from
//! text with [`config::parse_registry`]) and then shared read-only, typically
//! as `Arc<Registry>`. Replacing the registry at runtime means building a new
//! one and swapping the `Arc`.
//!
//! # Example
//!
//! ```rust
//! use snmp_agent_core::registry::RegistryBuilder;
//! use snmp_agent_core::oid;
//!
//! let registry = RegistryBuilder::new()
//!     .scalar(oid!(1, 3, 6, 1, 2, 1, 1, 1))
//!     .scalar(oid!(1, 3, 6, 1, 2, 1, 1, 3))
//!     .table(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2), Some(2))
//!     .build()
//!     .unwrap();
//!
//! let walked: Vec<String> = registry
//!     .walk(oid!(1, 3, 6, 1))
//!     .map(|m| m.oid().to_string())
//!     .collect();
//! assert_eq!(
//!     walked,
//!     [
//!         "1.3.6.1.2.1.1.1.0",
//!         "1.3.6.1.2.1.1.3.0",
//!         "1.3.6.1.2.1.2.2.1.2.1",
//!         "1.3.6.1.2.1.2.2.1.2.2",
//!     ]
//! );
//! ```

pub mod config;
mod entry;

pub use entry::{MatchMode, VariableEntry};

use crate::error::{Error, RegistryErrorKind, Result};
use crate::matching::{self, Match, Resolution};
use crate::oid::{MAX_OID_LEN, Oid};

/// Ordered, validated collection of variable entries.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<VariableEntry>,
}

impl Registry {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = &VariableEntry> {
        self.entries.iter()
    }

    /// Entry registered at exactly `prefix`.
    pub fn get(&self, prefix: &Oid) -> Option<&VariableEntry> {
        self.entries
            .binary_search_by(|e| e.prefix().cmp(prefix))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Index of the only entry whose prefix can contain `oid`: the last one
    /// sorting at or before it.
    fn floor(&self, oid: &Oid) -> Option<usize> {
        self.entries
            .partition_point(|e| e.prefix() <= oid)
            .checked_sub(1)
    }

    /// Resolve a request across all entries.
    ///
    /// With `exact`, only the entry whose subtree contains `requested` is
    /// consulted. Otherwise the entries are tried in order and the first match
    /// wins, which is the lexicographically next instance in the registry.
    pub fn resolve(&self, requested: &Oid, exact: bool) -> Resolution<'_> {
        if exact {
            return match self.floor(requested) {
                Some(idx) if requested.starts_with(self.entries[idx].prefix()) => {
                    matching::check(&self.entries[idx], requested, true)
                }
                _ => Resolution::NoMatch,
            };
        }

        // Entries before the floor sort entirely before the request.
        let start = self.floor(requested).unwrap_or(0);
        for entry in &self.entries[start..] {
            if let Resolution::Found(m) = matching::check(entry, requested, false) {
                if m.oid() <= requested {
                    tracing::warn!(
                        snmp.oid = %requested,
                        snmp.response = %m.oid(),
                        snmp.prefix = %entry.prefix(),
                        "get-next answer does not advance, treating as end of view"
                    );
                    return Resolution::NoMatch;
                }
                return Resolution::Found(m);
            }
        }
        Resolution::NoMatch
    }

    /// Iterate successive get-next answers starting after `start`.
    pub fn walk(&self, start: Oid) -> Walk<'_> {
        Walk {
            registry: self,
            current: start,
            done: false,
        }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a VariableEntry;
    type IntoIter = std::slice::Iter<'a, VariableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Iterator over a registry in get-next order.
///
/// Created by [`Registry::walk`]. Ends at the first `NoMatch`; the yielded
/// OIDs are strictly increasing.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    registry: &'a Registry,
    current: Oid,
    done: bool,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.registry.resolve(&self.current, false) {
            Resolution::Found(m) => {
                self.current = m.oid().clone();
                Some(m)
            }
            Resolution::NoMatch => {
                self.done = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Walk<'_> {}

/// Builder for [`Registry`].
///
/// Entries may be added in any order; [`build`](RegistryBuilder::build) sorts
/// them and rejects prefixes that are empty, too long to carry an instance
/// arc, or that overlap another prefix.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<VariableEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar variable.
    pub fn scalar(self, prefix: Oid) -> Self {
        self.entry(VariableEntry::scalar(prefix))
    }

    /// Add a table column, bounded by `max_instance` when given.
    pub fn table(self, prefix: Oid, max_instance: Option<u32>) -> Self {
        self.entry(VariableEntry::table(prefix, max_instance))
    }

    /// Add a fully configured entry.
    pub fn entry(mut self, entry: VariableEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate and build the registry.
    pub fn build(self) -> Result<Registry> {
        let mut entries = self.entries;

        for entry in &entries {
            let prefix = entry.prefix();
            if prefix.is_empty() {
                return Err(Error::registry(RegistryErrorKind::EmptyPrefix));
            }
            if prefix.len() > MAX_OID_LEN - 1 {
                return Err(Error::registry(RegistryErrorKind::PrefixTooLong {
                    count: prefix.len(),
                    max: MAX_OID_LEN - 1,
                }));
            }
        }

        entries.sort_by(|a, b| a.prefix().cmp(b.prefix()));

        // After sorting, any overlap shows up between neighbours.
        for pair in entries.windows(2) {
            if pair[1].prefix().starts_with(pair[0].prefix()) {
                return Err(Error::registry(RegistryErrorKind::Overlap {
                    first: pair[0].prefix().clone(),
                    second: pair[1].prefix().clone(),
                }));
            }
        }

        tracing::debug!(snmp.entries = entries.len(), "built variable registry");

        Ok(Registry { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn system_and_if() -> Registry {
        RegistryBuilder::new()
            .table(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1), Some(3))
            .scalar(oid!(1, 3, 6, 1, 2, 1, 1, 3))
            .scalar(oid!(1, 3, 6, 1, 2, 1, 1, 1))
            .table(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2), Some(3))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_sorts() {
        let reg = system_and_if();
        let prefixes: Vec<_> = reg.iter().map(|e| e.prefix().clone()).collect();
        let mut sorted = prefixes.clone();
        sorted.sort();
        assert_eq!(prefixes, sorted);
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn test_build_rejects_overlap() {
        let err = RegistryBuilder::new()
            .scalar(oid!(1, 3, 6, 1, 2, 1, 1))
            .scalar(oid!(1, 3, 6, 1, 2, 1, 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Registry {
                kind: RegistryErrorKind::Overlap { .. }
            }
        ));

        let dup = RegistryBuilder::new()
            .scalar(oid!(1, 3, 6, 1))
            .table(oid!(1, 3, 6, 1), None)
            .build();
        assert!(dup.is_err());
    }

    #[test]
    fn test_build_rejects_bad_prefixes() {
        let empty = RegistryBuilder::new().scalar(Oid::empty()).build();
        assert!(matches!(
            empty,
            Err(Error::Registry {
                kind: RegistryErrorKind::EmptyPrefix
            })
        ));

        let long = RegistryBuilder::new()
            .scalar(Oid::from_slice(&[1; MAX_OID_LEN]))
            .build();
        assert!(matches!(
            long,
            Err(Error::Registry {
                kind: RegistryErrorKind::PrefixTooLong { count: 128, max: 127 }
            })
        ));
    }

    #[test]
    fn test_get() {
        let reg = system_and_if();
        assert!(reg.get(&oid!(1, 3, 6, 1, 2, 1, 1, 3)).is_some());
        assert!(reg.get(&oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)).is_none());
    }

    #[test]
    fn test_resolve_exact() {
        let reg = system_and_if();
        let res = reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), true);
        assert_eq!(res.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)));

        let res = reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3), true);
        assert_eq!(res.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3)));

        assert!(!reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 1, 2, 0), true).is_found());
        assert!(!reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 4), true).is_found());
        assert!(!reg.resolve(&oid!(1), true).is_found());
        assert!(!reg.resolve(&oid!(2), true).is_found());
    }

    #[test]
    fn test_resolve_next_crosses_entries() {
        let reg = system_and_if();
        let res = reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), false);
        assert_eq!(res.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)));

        let res = reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 3), false);
        assert_eq!(res.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 1)));

        assert!(!reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3), false).is_found());
        assert!(!reg.resolve(&oid!(2), false).is_found());
    }

    #[test]
    fn test_resolve_next_between_entries() {
        let reg = system_and_if();
        let res = reg.resolve(&oid!(1, 3, 6, 1, 2, 1, 1, 2), false);
        assert_eq!(res.oid(), Some(&oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)));
    }

    #[test]
    fn test_walk() {
        let reg = system_and_if();
        let walked: Vec<Oid> = reg.walk(Oid::empty()).map(Match::into_oid).collect();
        assert_eq!(walked.len(), 2 + 3 + 3);
        assert_eq!(walked[0], oid!(1, 3, 6, 1, 2, 1, 1, 1, 0));
        assert_eq!(walked[7], oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3));
        assert!(walked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_walk_is_fused() {
        let reg = system_and_if();
        let mut walk = reg.walk(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 2));
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_empty_registry() {
        let reg = RegistryBuilder::new().build().unwrap();
        assert!(reg.is_empty());
        assert!(!reg.resolve(&oid!(1, 3), false).is_found());
        assert!(!reg.resolve(&oid!(1, 3), true).is_found());
        assert_eq!(reg.walk(Oid::empty()).count(), 0);
    }
}
