//! BER encoding.
//!
//! Uses a reverse buffer approach: writes from end backwards to avoid
//! needing to pre-calculate lengths.

use super::length::{MAX_ENCODED_LENGTH, encode_length};
use super::tag;
use crate::error::{Error, Result};
use bytes::Bytes;

/// Buffer for BER encoding that writes backwards.
///
/// This approach avoids needing to pre-calculate content lengths:
/// we write the content first, then prepend the length and tag.
pub struct EncodeBuf {
    buf: Vec<u8>,
}

impl EncodeBuf {
    /// Create a new encode buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    /// Create a new encode buffer with specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Push multiple bytes (prepends to front, reversed).
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend(bytes.iter().rev());
    }

    /// Push a BER length encoding.
    ///
    /// Fails with `LengthOverflow` if `len` exceeds the four-octet long form.
    pub fn push_length(&mut self, len: usize) -> Result<()> {
        let (bytes, count) = encode_length(len).ok_or(Error::LengthOverflow {
            max: MAX_ENCODED_LENGTH,
        })?;
        // encode_length returns bytes in reverse order for prepending
        self.buf.extend_from_slice(&bytes[..count]);
        Ok(())
    }

    /// Push a short-form length (0..=127).
    fn push_short_length(&mut self, len: u8) {
        debug_assert!(len < 0x80);
        self.buf.push(len);
    }

    /// Push a BER tag.
    pub fn push_tag(&mut self, tag: u8) {
        self.buf.push(tag);
    }

    /// Get the current length of encoded data.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Encode a constructed type (SEQUENCE, PDU, etc).
    ///
    /// Calls the closure to encode contents, then wraps with length and tag.
    pub fn push_constructed<F>(&mut self, tag: u8, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.push_constructed_with_trailing(tag, 0, f)
    }

    /// Encode a constructed type whose content continues past this buffer.
    ///
    /// The declared length covers the closure's content plus `trailing_len`
    /// bytes the caller appends after [`finish`](Self::finish). This is how a
    /// message header is composed before the PDU body exists.
    ///
    /// Fails with `LengthOverflow` if the declared length overflows `usize`
    /// or exceeds the four-octet long form.
    pub fn push_constructed_with_trailing<F>(
        &mut self,
        tag: u8,
        trailing_len: usize,
        f: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let start_len = self.len();
        f(self)?;
        let content_len = self.len() - start_len;
        let declared = content_len
            .checked_add(trailing_len)
            .ok_or(Error::LengthOverflow {
                max: MAX_ENCODED_LENGTH,
            })?;
        self.push_length(declared)?;
        self.push_tag(tag);
        Ok(())
    }

    /// Encode a SEQUENCE.
    pub fn push_sequence<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.push_constructed(tag::universal::SEQUENCE, f)
    }

    /// Encode an INTEGER.
    pub fn push_integer(&mut self, value: i32) {
        let (arr, len) = encode_integer_stack(value);
        // Valid bytes are at the end of the array
        self.push_bytes(&arr[4 - len..]);
        self.push_short_length(len as u8);
        self.push_tag(tag::universal::INTEGER);
    }

    /// Encode an OCTET STRING.
    pub fn push_octet_string(&mut self, data: &[u8]) -> Result<()> {
        self.push_bytes(data);
        self.push_length(data.len())?;
        self.push_tag(tag::universal::OCTET_STRING);
        Ok(())
    }

    /// Encode a NULL.
    pub fn push_null(&mut self) {
        self.push_short_length(0);
        self.push_tag(tag::universal::NULL);
    }

    /// Finalize and return the encoded bytes.
    ///
    /// The buffer is reversed to produce the correct order.
    pub fn finish(mut self) -> Bytes {
        self.buf.reverse();
        Bytes::from(self.buf)
    }

    /// Finalize and return as `Vec<u8>`.
    pub fn finish_vec(mut self) -> Vec<u8> {
        self.buf.reverse();
        self.buf
    }
}

impl Default for EncodeBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a signed 32-bit integer in minimal BER form.
///
/// Returns a stack-allocated array and the number of valid bytes.
/// The valid bytes are at the END of the array (for reverse-buffer compatibility).
#[inline]
fn encode_integer_stack(value: i32) -> ([u8; 4], usize) {
    let bytes = value.to_be_bytes();

    let mut start = 0;
    if value >= 0 {
        // Skip leading 0x00 bytes, keeping one if the next byte has its sign bit set
        while start < 3 && bytes[start] == 0 && bytes[start + 1] & 0x80 == 0 {
            start += 1;
        }
    } else {
        while start < 3 && bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0 {
            start += 1;
        }
    }

    (bytes, 4 - start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_integer(value: i32) -> Vec<u8> {
        let (arr, len) = encode_integer_stack(value);
        arr[4 - len..].to_vec()
    }

    #[test]
    fn test_encode_integer() {
        assert_eq!(encode_integer(0), vec![0]);
        assert_eq!(encode_integer(1), vec![1]);
        assert_eq!(encode_integer(127), vec![127]);
        assert_eq!(encode_integer(128), vec![0, 128]);
        assert_eq!(encode_integer(-1), vec![0xFF]);
        assert_eq!(encode_integer(-128), vec![0x80]);
        assert_eq!(encode_integer(-129), vec![0xFF, 0x7F]);
        assert_eq!(encode_integer(i32::MIN), vec![0x80, 0, 0, 0]);
    }

    #[test]
    fn test_encode_null() {
        let mut buf = EncodeBuf::new();
        buf.push_null();
        let bytes = buf.finish();
        assert_eq!(&bytes[..], &[0x05, 0x00]);
    }

    #[test]
    fn test_encode_octet_string_long_form() {
        let data = vec![b'a'; 200];
        let mut buf = EncodeBuf::new();
        buf.push_octet_string(&data).unwrap();
        let bytes = buf.finish();
        assert_eq!(&bytes[..3], &[0x04, 0x81, 200]);
        assert_eq!(bytes.len(), 203);
    }

    #[test]
    fn test_encode_sequence() {
        let mut buf = EncodeBuf::new();
        buf.push_sequence(|buf| {
            // Reverse buffer: push in reverse order for forward output
            buf.push_integer(2);
            buf.push_integer(1);
            Ok(())
        })
        .unwrap();
        let bytes = buf.finish();
        // SEQUENCE { INTEGER 1, INTEGER 2 }
        assert_eq!(
            &bytes[..],
            &[0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]
        );
    }

    #[test]
    fn test_encode_with_trailing() {
        let mut buf = EncodeBuf::new();
        buf.push_constructed_with_trailing(tag::universal::SEQUENCE, 10, |buf| {
            buf.push_integer(1);
            Ok(())
        })
        .unwrap();
        let bytes = buf.finish();
        // Declared length covers 3 content bytes plus 10 trailing bytes
        assert_eq!(&bytes[..], &[0x30, 0x0D, 0x02, 0x01, 0x01]);
    }

    #[test]
    fn test_trailing_length_overflow() {
        let mut buf = EncodeBuf::new();
        let result = buf.push_constructed_with_trailing(tag::universal::SEQUENCE, usize::MAX, |buf| {
            buf.push_integer(1);
            Ok(())
        });
        assert!(matches!(
            result,
            Err(Error::LengthOverflow {
                max: MAX_ENCODED_LENGTH
            })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_trailing_length_past_long_form() {
        let mut buf = EncodeBuf::new();
        let result = buf.push_constructed_with_trailing(tag::universal::SEQUENCE, 1 << 32, |buf| {
            buf.push_integer(1);
            Ok(())
        });
        assert!(matches!(result, Err(Error::LengthOverflow { .. })));
    }
}
