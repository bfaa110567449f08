//! Variable registry entries.

use std::fmt;
use std::sync::Arc;

use crate::handler::WriteCapability;
use crate::oid::Oid;

/// How requests are matched against an entry's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// A single instance `prefix.0`.
    Scalar,
    /// Instances `prefix.1`, `prefix.2`, ... up to an optional bound.
    Table,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Scalar => write!(f, "scalar"),
            MatchMode::Table => write!(f, "table"),
        }
    }
}

/// Static descriptor of one MIB variable.
///
/// Entries are supplied by MIB modules at startup and never modified by the
/// matching engine. A writer, when attached, is surfaced unchanged on every
/// match against this entry.
///
/// # Example
///
/// ```rust
/// use snmp_agent_core::oid;
/// use snmp_agent_core::registry::{MatchMode, VariableEntry};
///
/// let if_descr = VariableEntry::table(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2), Some(4))
///     .named("ifDescr");
/// assert_eq!(if_descr.mode(), MatchMode::Table);
/// assert_eq!(if_descr.max_instance(), Some(4));
/// assert!(!if_descr.writable());
/// ```
#[derive(Clone)]
pub struct VariableEntry {
    prefix: Oid,
    mode: MatchMode,
    max_instance: Option<u32>,
    writer: Option<Arc<dyn WriteCapability>>,
    size_hint: Option<usize>,
    name: Option<Box<str>>,
}

impl VariableEntry {
    /// A scalar variable answering only at `prefix.0`.
    pub fn scalar(prefix: Oid) -> Self {
        Self {
            prefix,
            mode: MatchMode::Scalar,
            max_instance: None,
            writer: None,
            size_hint: None,
            name: None,
        }
    }

    /// A table column with instances `prefix.1 ..= prefix.max_instance`.
    ///
    /// `None` leaves the column unbounded.
    pub fn table(prefix: Oid, max_instance: Option<u32>) -> Self {
        Self {
            mode: MatchMode::Table,
            max_instance,
            ..Self::scalar(prefix)
        }
    }

    /// Attach a write capability.
    pub fn with_writer(mut self, writer: Arc<dyn WriteCapability>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Override the default value size hint.
    pub fn with_size_hint(mut self, size: usize) -> Self {
        self.size_hint = Some(size);
        self
    }

    /// Give the entry a descriptive name (for logging and display).
    pub fn named(mut self, name: impl Into<Box<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The registered prefix.
    pub fn prefix(&self) -> &Oid {
        &self.prefix
    }

    /// The matching mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Highest valid instance, if bounded.
    pub fn max_instance(&self) -> Option<u32> {
        self.max_instance
    }

    /// The attached write capability, if any.
    pub fn writer(&self) -> Option<&Arc<dyn WriteCapability>> {
        self.writer.as_ref()
    }

    /// Whether a write capability is attached.
    pub fn writable(&self) -> bool {
        self.writer.is_some()
    }

    /// Size hint override, if any.
    pub fn size_hint(&self) -> Option<usize> {
        self.size_hint
    }

    /// Descriptive name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Debug for VariableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableEntry")
            .field("prefix", &self.prefix)
            .field("mode", &self.mode)
            .field("max_instance", &self.max_instance)
            .field("writable", &self.writable())
            .field("size_hint", &self.size_hint)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for VariableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mode, self.prefix)?;
        if self.mode == MatchMode::Table {
            match self.max_instance {
                Some(max) => write!(f, " max={}", max)?,
                None => write!(f, " unbounded")?,
            }
        }
        if let Some(name) = &self.name {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}
