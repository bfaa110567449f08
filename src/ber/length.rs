//! BER length encoding and decoding (X.690 Section 8.1.3).
//!
//! Only the definite form is supported. Short form covers 0..=127; long form
//! uses up to four subsequent octets.

use crate::error::{DecodeErrorKind, Error, Result};

/// Maximum number of subsequent length octets accepted in long form.
pub const MAX_LENGTH_OCTETS: usize = 4;

/// Largest length that fits in [`MAX_LENGTH_OCTETS`] subsequent octets.
pub const MAX_ENCODED_LENGTH: usize = u32::MAX as usize;

/// Encode a length.
///
/// Returns a stack array and the number of valid bytes. The bytes are in
/// REVERSE order (last octet first) so the reverse encode buffer can push
/// them directly. Returns `None` for lengths above [`MAX_ENCODED_LENGTH`].
pub fn encode_length(len: usize) -> Option<([u8; 5], usize)> {
    if len > MAX_ENCODED_LENGTH {
        return None;
    }

    let mut out = [0u8; 5];
    if len < 0x80 {
        out[0] = len as u8;
        return Some((out, 1));
    }

    let mut remaining = len;
    let mut count = 0;
    while remaining > 0 {
        out[count] = (remaining & 0xFF) as u8;
        remaining >>= 8;
        count += 1;
    }
    out[count] = 0x80 | count as u8;
    Some((out, count + 1))
}

/// Number of octets `encode_length(len)` produces.
pub fn length_size(len: usize) -> Option<usize> {
    encode_length(len).map(|(_, count)| count)
}

/// Decode a length starting at `data[0]`.
///
/// `base_offset` is the position of `data` within the whole message and is
/// only used for error reporting. Returns `(length, octets_consumed)`.
pub fn decode_length(data: &[u8], base_offset: usize) -> Result<(usize, usize)> {
    let first = *data
        .first()
        .ok_or_else(|| Error::malformed(base_offset, DecodeErrorKind::TruncatedData))?;

    if first < 0x80 {
        return Ok((first as usize, 1));
    }
    if first == 0x80 {
        return Err(Error::malformed(
            base_offset,
            DecodeErrorKind::IndefiniteLength,
        ));
    }

    let octets = (first & 0x7F) as usize;
    if octets > MAX_LENGTH_OCTETS {
        return Err(Error::malformed(
            base_offset,
            DecodeErrorKind::LengthTooLong { octets },
        ));
    }
    if data.len() < 1 + octets {
        return Err(Error::malformed(
            base_offset,
            DecodeErrorKind::InsufficientData {
                needed: 1 + octets,
                available: data.len(),
            },
        ));
    }

    let mut len: usize = 0;
    for &b in &data[1..=octets] {
        len = (len << 8) | b as usize;
    }
    Ok((len, 1 + octets))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(len: usize) -> Vec<u8> {
        let (arr, count) = encode_length(len).unwrap();
        let mut v = arr[..count].to_vec();
        v.reverse();
        v
    }

    #[test]
    fn test_encode_short_form() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(127), vec![0x7F]);
    }

    #[test]
    fn test_encode_long_form() {
        assert_eq!(encoded(128), vec![0x81, 0x80]);
        assert_eq!(encoded(255), vec![0x81, 0xFF]);
        assert_eq!(encoded(256), vec![0x82, 0x01, 0x00]);
        assert_eq!(encoded(65535), vec![0x82, 0xFF, 0xFF]);
        assert_eq!(length_size(70000), Some(4));
    }

    #[test]
    fn test_encode_largest_length() {
        assert_eq!(encoded(MAX_ENCODED_LENGTH), vec![0x84, 0xFF, 0xFF, 0xFF, 0xFF]);
        let (len, consumed) = decode_length(&encoded(MAX_ENCODED_LENGTH), 0).unwrap();
        assert_eq!((len, consumed), (MAX_ENCODED_LENGTH, 5));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_encode_rejects_oversized_length() {
        assert_eq!(encode_length(MAX_ENCODED_LENGTH + 1), None);
        assert_eq!(encode_length(1 << 32), None);
        assert_eq!(length_size(usize::MAX), None);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_length(&[0x05], 0).unwrap(), (5, 1));
        assert_eq!(decode_length(&[0x81, 0x80], 0).unwrap(), (128, 2));
        assert_eq!(decode_length(&[0x82, 0x01, 0x00, 0xAA], 0).unwrap(), (256, 3));
    }

    #[test]
    fn test_decode_rejects() {
        assert!(decode_length(&[], 0).is_err());
        assert!(matches!(
            decode_length(&[0x80], 4),
            Err(Error::MalformedEnvelope {
                offset: 4,
                kind: DecodeErrorKind::IndefiniteLength
            })
        ));
        assert!(matches!(
            decode_length(&[0x85, 1, 2, 3, 4, 5], 0),
            Err(Error::MalformedEnvelope {
                kind: DecodeErrorKind::LengthTooLong { octets: 5 },
                ..
            })
        ));
        assert!(decode_length(&[0x82, 0x01], 0).is_err());
    }
}
