//! Object Identifier (OID) type.
//!
//! OIDs are stored inline for the common case of short identifiers and are
//! bounded to [`MAX_OID_LEN`] arcs. Ordering is lexicographic arc-by-arc,
//! with a strict prefix sorting before any of its extensions.

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

use crate::error::{Error, OidErrorKind, Result};

/// Maximum number of arcs in an OID.
///
/// Every OID this crate produces or accepts is bounded by this constant, so
/// matching and encoding never allocate proportionally to untrusted input.
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
///
/// # Example
///
/// ```rust
/// use snmp_agent_core::{Oid, oid};
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// assert!(oid!(1, 3) < oid!(1, 3, 6));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from a slice of arcs.
    ///
    /// Slices longer than [`MAX_OID_LEN`] are truncated; use [`Oid::from_arcs`]
    /// to reject them instead.
    pub fn from_slice(arcs: &[u32]) -> Self {
        let len = arcs.len().min(MAX_OID_LEN);
        Self {
            arcs: SmallVec::from_slice(&arcs[..len]),
        }
    }

    /// Create an OID from arcs, rejecting more than [`MAX_OID_LEN`] of them.
    pub fn from_arcs(arcs: impl IntoIterator<Item = u32>) -> Result<Self> {
        let arcs: SmallVec<[u32; 16]> = arcs.into_iter().collect();
        if arcs.len() > MAX_OID_LEN {
            return Err(Error::invalid_oid(OidErrorKind::TooManyArcs {
                count: arcs.len(),
                max: MAX_OID_LEN,
            }));
        }
        Ok(Self { arcs })
    }

    /// Parse a dotted-decimal OID string strictly.
    ///
    /// A single leading dot is accepted (".1.3.6.1"). Empty components,
    /// non-digit characters and arcs above `u32::MAX` are rejected. See
    /// [`parse_text`](crate::text::parse_text) for the lenient form used by
    /// agent configuration lines.
    pub fn parse(s: &str) -> Result<Self> {
        let body = s.strip_prefix('.').unwrap_or(s);
        if body.is_empty() {
            return Err(Error::invalid_oid_with_input(OidErrorKind::Empty, s));
        }

        let mut arcs = SmallVec::new();
        for part in body.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s));
            }
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;
            if arcs.len() == MAX_OID_LEN {
                return Err(Error::invalid_oid_with_input(
                    OidErrorKind::TooManyArcs {
                        count: body.split('.').count(),
                        max: MAX_OID_LEN,
                    },
                    s,
                ));
            }
            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Get the arcs of this OID.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID has no arcs.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Last arc, if any.
    pub fn last_arc(&self) -> Option<u32> {
        self.arcs.last().copied()
    }

    /// Check if this OID starts with `prefix`.
    pub fn starts_with(&self, prefix: &Oid) -> bool {
        self.arcs.starts_with(&prefix.arcs)
    }

    /// Return a new OID with `arc` appended.
    ///
    /// Fails with `TooManyArcs` when the result would exceed [`MAX_OID_LEN`].
    pub fn child(&self, arc: u32) -> Result<Self> {
        if self.arcs.len() >= MAX_OID_LEN {
            return Err(Error::invalid_oid(OidErrorKind::TooManyArcs {
                count: self.arcs.len() + 1,
                max: MAX_OID_LEN,
            }));
        }
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Ok(Self { arcs })
    }

    /// Return the parent OID (all arcs but the last), or `None` if empty.
    pub fn parent(&self) -> Option<Self> {
        if self.arcs.is_empty() {
            return None;
        }
        Some(Self::from_slice(&self.arcs[..self.arcs.len() - 1]))
    }

    /// Format with a leading dot, as agent configuration files write OIDs.
    pub fn to_absolute_string(&self) -> String {
        let mut out = String::with_capacity(self.arcs.len() * 3);
        for arc in &self.arcs {
            out.push('.');
            out.push_str(&arc.to_string());
        }
        out
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> Ordering {
        // Slice ordering is lexicographic with the shorter prefix sorting first.
        self.arcs.as_slice().cmp(other.arcs.as_slice())
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl std::str::FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::from_slice(&arcs)
    }
}

/// Construct an [`Oid`] from literal arcs.
///
/// ```rust
/// use snmp_agent_core::oid;
///
/// let oid = oid!(1, 3, 6, 1);
/// assert_eq!(oid.arcs(), &[1, 3, 6, 1]);
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
