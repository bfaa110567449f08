//! Values supplied to write capabilities.

use bytes::Bytes;

use crate::ber::{Decoder, EncodeBuf, tag};
use crate::error::{DecodeErrorKind, Error, Result};

/// A variable value as handed to a [`WriteCapability`](crate::handler::WriteCapability).
///
/// Only the universal types the agent core acts on are decoded; anything else
/// is carried as its raw tag and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// INTEGER
    Integer(i32),
    /// OCTET STRING
    OctetString(Bytes),
    /// NULL
    Null,
    /// Any other type, undecoded.
    Other { tag: u8, data: Bytes },
}

impl Value {
    /// The BER tag of this value.
    pub fn tag(&self) -> u8 {
        match self {
            Value::Integer(_) => tag::universal::INTEGER,
            Value::OctetString(_) => tag::universal::OCTET_STRING,
            Value::Null => tag::universal::NULL,
            Value::Other { tag, .. } => *tag,
        }
    }

    /// Get the value as an INTEGER.
    ///
    /// Returns `TypeMismatch` for every other type.
    pub fn as_integer(&self) -> Result<i32> {
        match self {
            Value::Integer(v) => Ok(*v),
            other => Err(Error::TypeMismatch {
                expected: tag::universal::INTEGER,
                actual: other.tag(),
            }),
        }
    }

    /// Decode one value from BER.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        match decoder.peek_tag() {
            Some(tag::universal::INTEGER) => Ok(Value::Integer(decoder.read_integer()?)),
            Some(tag::universal::OCTET_STRING) | Some(tag::universal::OCTET_STRING_CONSTRUCTED) => {
                Ok(Value::OctetString(decoder.read_octet_string()?))
            }
            Some(tag::universal::NULL) => {
                decoder.read_null()?;
                Ok(Value::Null)
            }
            Some(other) => {
                let data = decoder.read_tlv(other)?;
                Ok(Value::Other { tag: other, data })
            }
            None => Err(Error::malformed(
                decoder.offset(),
                DecodeErrorKind::TruncatedData,
            )),
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) -> Result<()> {
        match self {
            Value::Integer(v) => buf.push_integer(*v),
            Value::OctetString(data) => buf.push_octet_string(data)?,
            Value::Null => buf.push_null(),
            Value::Other { tag, data } => {
                buf.push_bytes(data);
                buf.push_length(data.len())?;
                buf.push_tag(*tag);
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "INTEGER: {}", v),
            Value::OctetString(data) => match std::str::from_utf8(data) {
                Ok(s) => write!(f, "STRING: \"{}\"", s),
                Err(_) => write!(f, "Hex-STRING: {:02X?}", &data[..]),
            },
            Value::Null => write!(f, "NULL"),
            Value::Other { tag, data } => {
                write!(f, "[0x{:02X}] {} bytes", tag, data.len())
            }
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Value::OctetString(Bytes::from_static(s.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: &Value) -> Value {
        let mut buf = EncodeBuf::new();
        value.encode(&mut buf).unwrap();
        let mut dec = Decoder::new(buf.finish());
        Value::decode(&mut dec).unwrap()
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Value::Integer(1).as_integer().unwrap(), 1);
        assert!(matches!(
            Value::from("1").as_integer(),
            Err(Error::TypeMismatch {
                expected: 0x02,
                actual: 0x04
            })
        ));
        assert!(matches!(
            Value::Null.as_integer(),
            Err(Error::TypeMismatch { actual: 0x05, .. })
        ));
    }

    #[test]
    fn test_decode_kinds() {
        assert_eq!(roundtrip(&Value::Integer(-5)), Value::Integer(-5));
        assert_eq!(roundtrip(&Value::Null), Value::Null);
        assert_eq!(roundtrip(&Value::from("abc")), Value::from("abc"));

        let timeticks = Value::Other {
            tag: 0x43,
            data: Bytes::from_static(&[0x01, 0x00]),
        };
        assert_eq!(roundtrip(&timeticks), timeticks);
    }

    #[test]
    fn test_decode_empty_fails() {
        let mut dec = Decoder::new(Bytes::new());
        assert!(Value::decode(&mut dec).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(7).to_string(), "INTEGER: 7");
        assert_eq!(Value::from("up").to_string(), "STRING: \"up\"");
    }
}
