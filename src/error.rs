//! Error types for snmp-agent-core.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.
//!
//! A get-next walk running off the end of the registry is not an error: it is
//! reported as [`Resolution::NoMatch`](crate::matching::Resolution::NoMatch), so
//! callers can tell "end of tree" apart from a malformed message by type alone.

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// BER decode error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Expected different tag.
    UnexpectedTag { expected: u8, actual: u8 },
    /// Data truncated unexpectedly.
    TruncatedData,
    /// Indefinite length not supported.
    IndefiniteLength,
    /// Integer value overflow.
    IntegerOverflow,
    /// Zero-length integer.
    ZeroLengthInteger,
    /// Constructed OCTET STRING not supported.
    ConstructedOctetString,
    /// NULL with non-zero length.
    InvalidNull,
    /// Length field too long.
    LengthTooLong { octets: usize },
    /// TLV extends past end of data.
    TlvOverflow,
    /// Insufficient data for read.
    InsufficientData { needed: usize, available: usize },
    /// Community longer than the configured maximum.
    CommunityTooLong { length: usize, max: usize },
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "expected tag 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            Self::TruncatedData => write!(f, "unexpected end of data"),
            Self::IndefiniteLength => write!(f, "indefinite length encoding not supported"),
            Self::IntegerOverflow => write!(f, "integer overflow"),
            Self::ZeroLengthInteger => write!(f, "zero-length integer"),
            Self::ConstructedOctetString => {
                write!(f, "constructed OCTET STRING (0x24) not supported")
            }
            Self::InvalidNull => write!(f, "NULL with non-zero length"),
            Self::LengthTooLong { octets } => {
                write!(f, "length encoding too long ({} octets)", octets)
            }
            Self::TlvOverflow => write!(f, "TLV extends past end of data"),
            Self::InsufficientData { needed, available } => {
                write!(f, "need {} bytes but only {} remaining", needed, available)
            }
            Self::CommunityTooLong { length, max } => {
                write!(f, "community of {} bytes exceeds maximum {}", length, max)
            }
        }
    }
}

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Empty OID string, or no arcs could be parsed.
    Empty,
    /// Invalid arc value.
    InvalidArc,
    /// OID has too many arcs (exceeds MAX_OID_LEN).
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty OID"),
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::TooManyArcs { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
        }
    }
}

/// Registry construction error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryErrorKind {
    /// Entry registered with a zero-length prefix.
    EmptyPrefix,
    /// Prefix leaves no room for the instance arc.
    PrefixTooLong { count: usize, max: usize },
    /// Two prefixes are equal, or one is a prefix of the other.
    Overlap {
        first: crate::oid::Oid,
        second: crate::oid::Oid,
    },
}

impl std::fmt::Display for RegistryErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPrefix => write!(f, "empty variable prefix"),
            Self::PrefixTooLong { count, max } => {
                write!(f, "prefix has {} arcs, maximum is {}", count, max)
            }
            Self::Overlap { first, second } => {
                write!(f, "prefix {} overlaps {}", first, second)
            }
        }
    }
}

/// Registry text loader error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// Keyword is not `scalar` or `table`.
    UnknownKeyword,
    /// Required OID field is absent.
    MissingOid,
    /// OID field could not be parsed.
    InvalidOid(OidErrorKind),
    /// Table line without a bound field.
    MissingBound,
    /// Bound field is neither `*` nor an unsigned integer.
    InvalidBound,
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKeyword => write!(f, "unknown keyword (expected 'scalar' or 'table')"),
            Self::MissingOid => write!(f, "missing OID field"),
            Self::InvalidOid(kind) => write!(f, "invalid OID: {}", kind),
            Self::MissingBound => write!(f, "table entry requires a bound ('*' for none)"),
            Self::InvalidBound => write!(f, "bound must be '*' or an unsigned integer"),
        }
    }
}

/// SNMP error status codes (RFC 3416).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    NoError,
    TooBig,
    NoSuchName,
    BadValue,
    ReadOnly,
    GenErr,
    NoAccess,
    WrongType,
    WrongLength,
    WrongEncoding,
    WrongValue,
    NoCreation,
    InconsistentValue,
    ResourceUnavailable,
    CommitFailed,
    UndoFailed,
    AuthorizationError,
    NotWritable,
    InconsistentName,
    /// Unknown/future error status code.
    Unknown(i32),
}

impl ErrorStatus {
    /// Create from raw status code.
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            other => Self::Unknown(other),
        }
    }

    /// Convert to raw status code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::TooBig => 1,
            Self::NoSuchName => 2,
            Self::BadValue => 3,
            Self::ReadOnly => 4,
            Self::GenErr => 5,
            Self::NoAccess => 6,
            Self::WrongType => 7,
            Self::WrongLength => 8,
            Self::WrongEncoding => 9,
            Self::WrongValue => 10,
            Self::NoCreation => 11,
            Self::InconsistentValue => 12,
            Self::ResourceUnavailable => 13,
            Self::CommitFailed => 14,
            Self::UndoFailed => 15,
            Self::AuthorizationError => 16,
            Self::NotWritable => 17,
            Self::InconsistentName => 18,
            Self::Unknown(code) => *code,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "noError"),
            Self::TooBig => write!(f, "tooBig"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::BadValue => write!(f, "badValue"),
            Self::ReadOnly => write!(f, "readOnly"),
            Self::GenErr => write!(f, "genErr"),
            Self::NoAccess => write!(f, "noAccess"),
            Self::WrongType => write!(f, "wrongType"),
            Self::WrongLength => write!(f, "wrongLength"),
            Self::WrongEncoding => write!(f, "wrongEncoding"),
            Self::WrongValue => write!(f, "wrongValue"),
            Self::NoCreation => write!(f, "noCreation"),
            Self::InconsistentValue => write!(f, "inconsistentValue"),
            Self::ResourceUnavailable => write!(f, "resourceUnavailable"),
            Self::CommitFailed => write!(f, "commitFailed"),
            Self::UndoFailed => write!(f, "undoFailed"),
            Self::AuthorizationError => write!(f, "authorizationError"),
            Self::NotWritable => write!(f, "notWritable"),
            Self::InconsistentName => write!(f, "inconsistentName"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Truncated or invalid BER framing in the message envelope.
    #[error("malformed envelope at offset {offset}: {kind}")]
    MalformedEnvelope {
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// Encoded output does not fit the destination buffer.
    #[error("buffer exhausted: need {needed} bytes, {available} available")]
    BufferExhausted { needed: usize, available: usize },

    /// Message exceeds maximum size.
    #[error("message too large: {size} bytes exceeds maximum {max}")]
    MessageTooLarge { size: usize, max: usize },

    /// Community exceeds the configured maximum when encoding.
    #[error("community too long: {length} bytes exceeds maximum {max}")]
    CommunityTooLong { length: usize, max: usize },

    /// A BER length does not fit the four-octet long form.
    #[error("encoded length exceeds maximum {max}")]
    LengthOverflow { max: usize },

    /// Value has the wrong ASN.1 type where the protocol mandates another.
    #[error("type mismatch: expected tag 0x{expected:02X}, got 0x{actual:02X}")]
    TypeMismatch { expected: u8, actual: u8 },

    /// Invalid OID format.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // Only allocated when parsing string input
    },

    /// Registry could not be built.
    #[error("invalid registry: {kind}")]
    Registry { kind: RegistryErrorKind },

    /// Registry text could not be parsed.
    #[error("config line {line}: {kind}")]
    Config { line: usize, kind: ConfigErrorKind },
}

impl Error {
    /// Create a malformed envelope error.
    pub fn malformed(offset: usize, kind: DecodeErrorKind) -> Self {
        Self::MalformedEnvelope { offset, kind }
    }

    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Create a registry error.
    pub fn registry(kind: RegistryErrorKind) -> Self {
        Self::Registry { kind }
    }

    /// Create a config error for a 1-based line number.
    pub fn config(line: usize, kind: ConfigErrorKind) -> Self {
        Self::Config { line, kind }
    }

    /// Returns `true` for errors caused by malformed wire input.
    ///
    /// A walk client seeing `false` here alongside a failed request knows the
    /// failure is not a framing problem.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedEnvelope { .. })
    }
}
