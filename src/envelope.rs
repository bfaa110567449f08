//! Community-based message envelope (SNMPv1/v2c).
//!
//! Every v1/v2c message is wrapped as:
//!
//! ```text
//! SEQUENCE {
//!     version    INTEGER,
//!     community  OCTET STRING,
//!     payload    -- PDU, not interpreted here
//! }
//! ```
//!
//! Decoding either yields a complete [`CommunityEnvelope`] or an error; no
//! partially-filled envelope is ever returned. Encoding writes the header with
//! the outer SEQUENCE length already covering a payload that the caller
//! appends afterwards.
//!
//! # Example
//!
//! ```rust
//! use snmp_agent_core::envelope::{CommunityEnvelope, EnvelopeHeader};
//!
//! let pdu = [0xA0, 0x00];
//! let header = EnvelopeHeader::new(1, &b"public"[..]);
//! let message = header.wrap(&pdu).unwrap();
//!
//! let env = CommunityEnvelope::decode(message).unwrap();
//! assert_eq!(env.version, 1);
//! assert_eq!(&env.community[..], b"public");
//! assert_eq!(&env.payload[..], &pdu);
//! ```

use bytes::Bytes;

use crate::ber::{Decoder, EncodeBuf, MAX_ENCODED_LENGTH, tag};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::version::Version;

/// Default maximum message size (largest UDP payload over IPv4).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 65507;

/// Default maximum community length.
pub const DEFAULT_MAX_COMMUNITY_LEN: usize = 255;

/// Limits applied when decoding and encoding envelopes.
///
/// # Example
///
/// ```rust
/// use snmp_agent_core::envelope::EnvelopeConfig;
///
/// let config = EnvelopeConfig::default()
///     .max_message_size(1472)
///     .max_community_len(Some(32));
/// assert_eq!(config.message_limit(), 1472);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeConfig {
    max_message_size: usize,
    max_community_len: Option<usize>,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_community_len: Some(DEFAULT_MAX_COMMUNITY_LEN),
        }
    }
}

impl EnvelopeConfig {
    /// Set the maximum size of a whole message, in bytes.
    pub fn max_message_size(mut self, max: usize) -> Self {
        self.max_message_size = max;
        self
    }

    /// Set the maximum community length (`None` for no limit).
    pub fn max_community_len(mut self, max: Option<usize>) -> Self {
        self.max_community_len = max;
        self
    }

    /// The configured maximum message size.
    pub fn message_limit(&self) -> usize {
        self.max_message_size
    }

    /// The configured maximum community length.
    pub fn community_limit(&self) -> Option<usize> {
        self.max_community_len
    }
}

/// A decoded community envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityEnvelope {
    /// Raw version number (0 = v1, 1 = v2c).
    pub version: i32,
    /// Community string.
    pub community: Bytes,
    /// Remaining SEQUENCE content (the PDU), uninterpreted.
    pub payload: Bytes,
}

impl CommunityEnvelope {
    /// Create an envelope from its parts.
    pub fn new(version: i32, community: impl Into<Bytes>, payload: impl Into<Bytes>) -> Self {
        Self {
            version,
            community: community.into(),
            payload: payload.into(),
        }
    }

    /// Decode an envelope with default limits.
    pub fn decode(data: Bytes) -> Result<Self> {
        Self::decode_with(data, &EnvelopeConfig::default())
    }

    /// Decode an envelope, enforcing the limits in `config`.
    pub fn decode_with(data: Bytes, config: &EnvelopeConfig) -> Result<Self> {
        if data.len() > config.max_message_size {
            return Err(Error::MessageTooLarge {
                size: data.len(),
                max: config.max_message_size,
            });
        }

        let mut decoder = Decoder::new(data);
        let mut seq = decoder.read_sequence()?;

        let version = seq.read_integer()?;

        let community_offset = seq.offset();
        let community = seq.read_octet_string()?;
        if let Some(max) = config.max_community_len
            && community.len() > max
        {
            return Err(Error::malformed(
                community_offset,
                DecodeErrorKind::CommunityTooLong {
                    length: community.len(),
                    max,
                },
            ));
        }

        let payload = seq.rest();

        if !decoder.is_empty() {
            tracing::trace!(
                trailing = decoder.remaining(),
                "ignoring bytes after envelope SEQUENCE"
            );
        }

        tracing::trace!(
            version,
            community_len = community.len(),
            payload_len = payload.len(),
            "decoded community envelope"
        );

        Ok(Self {
            version,
            community,
            payload,
        })
    }

    /// Map the raw version number to a known [`Version`].
    pub fn version(&self) -> Option<Version> {
        Version::from_i32(self.version)
    }

    /// Copy the community into `dst` and zero-terminate it.
    ///
    /// `dst` must hold at least `community.len() + 1` bytes. On success the
    /// community length is returned and `dst[len] == 0`. On failure `dst` is
    /// left untouched.
    pub fn copy_community(&self, dst: &mut [u8]) -> Result<usize> {
        let len = self.community.len();
        if dst.len() <= len {
            return Err(Error::BufferExhausted {
                needed: len + 1,
                available: dst.len(),
            });
        }
        dst[..len].copy_from_slice(&self.community);
        dst[len] = 0;
        Ok(len)
    }

    /// The header (version and community) of this envelope.
    pub fn header(&self) -> EnvelopeHeader {
        EnvelopeHeader::new(self.version, self.community.clone())
    }

    /// Encode the complete message (header followed by payload).
    pub fn encode(&self) -> Result<Bytes> {
        self.header().wrap(&self.payload)
    }
}

/// Encode-side envelope header: version and community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeHeader {
    version: i32,
    community: Bytes,
    config: EnvelopeConfig,
}

impl EnvelopeHeader {
    /// Create a header with default limits.
    pub fn new(version: i32, community: impl Into<Bytes>) -> Self {
        Self {
            version,
            community: community.into(),
            config: EnvelopeConfig::default(),
        }
    }

    /// Create a header for a known protocol version.
    pub fn for_version(version: Version, community: impl Into<Bytes>) -> Self {
        Self::new(version.as_i32(), community)
    }

    /// Replace the limits used when encoding.
    pub fn with_config(mut self, config: EnvelopeConfig) -> Self {
        self.config = config;
        self
    }

    /// Encode the header.
    ///
    /// The outer SEQUENCE length covers the version, the community and
    /// `trailing_len` payload bytes the caller appends after the returned
    /// header. Lengths are checked before anything is written: a message
    /// whose size would pass the configured maximum is `MessageTooLarge`,
    /// and one whose length does not fit a BER length field is
    /// `LengthOverflow`.
    pub fn encode(&self, trailing_len: usize) -> Result<Bytes> {
        if let Some(max) = self.config.max_community_len
            && self.community.len() > max
        {
            return Err(Error::CommunityTooLong {
                length: self.community.len(),
                max,
            });
        }

        // The payload and community alone are a lower bound on the message size.
        let at_least = trailing_len.saturating_add(self.community.len());
        if at_least > self.config.max_message_size {
            tracing::debug!(
                snmp.trailing_len = trailing_len,
                snmp.max_message_size = self.config.max_message_size,
                "envelope payload exceeds message size limit"
            );
            return Err(Error::MessageTooLarge {
                size: at_least,
                max: self.config.max_message_size,
            });
        }

        let mut buf = EncodeBuf::with_capacity(self.community.len() + 16);
        buf.push_constructed_with_trailing(tag::universal::SEQUENCE, trailing_len, |buf| {
            // Reverse buffer: community first so it lands after the version
            buf.push_octet_string(&self.community)?;
            buf.push_integer(self.version);
            Ok(())
        })?;

        let total = buf
            .len()
            .checked_add(trailing_len)
            .ok_or(Error::LengthOverflow {
                max: MAX_ENCODED_LENGTH,
            })?;
        if total > self.config.max_message_size {
            return Err(Error::MessageTooLarge {
                size: total,
                max: self.config.max_message_size,
            });
        }

        tracing::trace!(
            version = self.version,
            header_len = buf.len(),
            trailing_len,
            "encoded community header"
        );
        Ok(buf.finish())
    }

    /// Encode the header into a caller-provided buffer.
    ///
    /// Returns the number of header bytes written. If the header does not fit,
    /// `BufferExhausted` is returned and `dst` is not modified.
    pub fn encode_into(&self, dst: &mut [u8], trailing_len: usize) -> Result<usize> {
        let header = self.encode(trailing_len)?;
        if header.len() > dst.len() {
            return Err(Error::BufferExhausted {
                needed: header.len(),
                available: dst.len(),
            });
        }
        dst[..header.len()].copy_from_slice(&header);
        Ok(header.len())
    }

    /// Encode a complete message: this header followed by `payload`.
    pub fn wrap(&self, payload: &[u8]) -> Result<Bytes> {
        let header = self.encode(payload.len())?;
        let mut out = Vec::with_capacity(header.len() + payload.len());
        out.extend_from_slice(&header);
        out.extend_from_slice(payload);
        Ok(Bytes::from(out))
    }
}
