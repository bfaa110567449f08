//! BER decoding.
//!
//! [`Decoder`] reads TLVs front to back from a [`Bytes`] buffer. Every length
//! is checked against the bytes actually remaining, so a truncated or lying
//! length field fails instead of reading past the end. Sub-decoders returned
//! by [`Decoder::read_sequence`] share the underlying buffer without copying.

use bytes::Bytes;

use super::length::decode_length;
use super::tag;
use crate::error::{DecodeErrorKind, Error, Result};

/// Forward BER decoder.
#[derive(Debug, Clone)]
pub struct Decoder {
    data: Bytes,
    pos: usize,
    /// Offset of `data[0]` within the original message.
    base: usize,
}

impl Decoder {
    /// Create a decoder over a complete buffer.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Create a decoder from a slice (copies the data).
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Current offset within the original message.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread bytes, without consuming them.
    pub fn rest(&self) -> Bytes {
        self.data.slice(self.pos..)
    }

    /// Peek at the next tag without consuming it.
    pub fn peek_tag(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Read a tag and length, returning `(tag, content_len)`.
    ///
    /// The content length is validated against the remaining input.
    pub fn read_header(&mut self) -> Result<(u8, usize)> {
        let tag_offset = self.offset();
        let tag = self
            .peek_tag()
            .ok_or_else(|| Error::malformed(tag_offset, DecodeErrorKind::TruncatedData))?;
        let (len, consumed) = decode_length(&self.data[self.pos + 1..], tag_offset + 1)?;

        let available = self.remaining() - 1 - consumed;
        if len > available {
            return Err(Error::malformed(tag_offset, DecodeErrorKind::TlvOverflow));
        }
        self.pos += 1 + consumed;
        Ok((tag, len))
    }

    /// Read a TLV with the expected tag and return its content bytes.
    pub fn read_tlv(&mut self, expected: u8) -> Result<Bytes> {
        let start = self.offset();
        let actual = self
            .peek_tag()
            .ok_or_else(|| Error::malformed(start, DecodeErrorKind::TruncatedData))?;
        if actual != expected {
            return Err(Error::malformed(
                start,
                DecodeErrorKind::UnexpectedTag { expected, actual },
            ));
        }
        let (_, len) = self.read_header()?;
        let content = self.data.slice(self.pos..self.pos + len);
        self.pos += len;
        Ok(content)
    }

    /// Read a SEQUENCE and return a decoder over its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder> {
        self.read_constructed(tag::universal::SEQUENCE)
    }

    /// Read a constructed TLV with the given tag and return a decoder over its contents.
    pub fn read_constructed(&mut self, expected: u8) -> Result<Decoder> {
        let content = self.read_tlv(expected)?;
        let content_offset = self.base + self.pos - content.len();
        Ok(Decoder {
            data: content,
            pos: 0,
            base: content_offset,
        })
    }

    /// Read an INTEGER that must fit in an `i32`.
    pub fn read_integer(&mut self) -> Result<i32> {
        let start = self.offset();
        let content = self.read_tlv(tag::universal::INTEGER)?;
        decode_integer(&content, start)
    }

    /// Read an OCTET STRING.
    ///
    /// The constructed form is rejected.
    pub fn read_octet_string(&mut self) -> Result<Bytes> {
        let start = self.offset();
        if self.peek_tag() == Some(tag::universal::OCTET_STRING_CONSTRUCTED) {
            return Err(Error::malformed(
                start,
                DecodeErrorKind::ConstructedOctetString,
            ));
        }
        self.read_tlv(tag::universal::OCTET_STRING)
    }

    /// Read a NULL.
    pub fn read_null(&mut self) -> Result<()> {
        let start = self.offset();
        let content = self.read_tlv(tag::universal::NULL)?;
        if !content.is_empty() {
            return Err(Error::malformed(start, DecodeErrorKind::InvalidNull));
        }
        Ok(())
    }
}

/// Decode two's-complement INTEGER content into an `i32`.
///
/// Redundant leading sign octets are tolerated so that values encoded longer
/// than necessary by permissive encoders still decode.
fn decode_integer(content: &[u8], offset: usize) -> Result<i32> {
    if content.is_empty() {
        return Err(Error::malformed(offset, DecodeErrorKind::ZeroLengthInteger));
    }

    let negative = content[0] & 0x80 != 0;
    let significant = if content.len() > 4 {
        let (pad, rest) = content.split_at(content.len() - 4);
        let fill = if negative { 0xFF } else { 0x00 };
        let rest_negative = rest[0] & 0x80 != 0;
        if pad.iter().any(|&b| b != fill) || rest_negative != negative {
            return Err(Error::malformed(offset, DecodeErrorKind::IntegerOverflow));
        }
        rest
    } else {
        content
    };

    let mut value: i32 = if negative { -1 } else { 0 };
    for &b in significant {
        value = (value << 8) | b as i32;
    }
    Ok(value)
}
