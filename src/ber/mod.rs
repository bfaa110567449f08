//! BER (Basic Encoding Rules) codec for SNMP.
//!
//! This module provides the subset of X.690 the community envelope needs:
//! definite lengths, SEQUENCE, INTEGER, OCTET STRING and NULL. Decoding is
//! strict about lengths and fails closed on anything it does not understand.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::*;
pub use encode::*;
pub use length::*;
pub use tag::*;
