//! Arbitrary-precision integers (tags 2 and 3).

use num_bigint::BigInt;

use crate::reader::CborReader;
use crate::tag::CborTag;
use crate::{CborError, ErrorCode};

impl CborReader<'_> {
    /// Read a tag 2 (unsigned) or tag 3 (negative) bignum.
    ///
    /// The payload is a definite or indefinite-length byte string holding the big-endian
    /// magnitude `n`; an empty string is `n = 0`. The result is `n` for tag 2 and `-1 - n` for
    /// tag 3.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedTag` if the next item is not a tag, `UnexpectedTag` for any tag other
    /// than 2 or 3, and `InvalidBigIntegerEncoding` if the payload is not a byte string. On any
    /// error the cursor is left before the tag.
    pub fn read_big_integer(&mut self) -> Result<BigInt, CborError> {
        self.transaction(|r| {
            let tag_off = r.position();
            let negative = match r.read_tag()? {
                CborTag::UNSIGNED_BIGNUM => false,
                CborTag::NEGATIVE_BIGNUM => true,
                _ => return Err(CborError::new(ErrorCode::UnexpectedTag, tag_off)),
            };
            let off = r.position();
            if !r.peek_state()?.is_bytes() {
                return Err(CborError::new(ErrorCode::InvalidBigIntegerEncoding, off));
            }
            let magnitude = magnitude_from_be(&r.read_byte_string()?);
            Ok(if negative {
                -(magnitude + 1u32)
            } else {
                magnitude
            })
        })
    }
}

/// Interpret an unsigned big-endian magnitude as a (non-negative) `BigInt`.
///
/// The bytes are reversed into little-endian order; if the high-order byte has its top bit set a
/// zero byte is appended so the signed little-endian reading cannot turn negative.
pub(crate) fn magnitude_from_be(bytes: &[u8]) -> BigInt {
    let mut le: Vec<u8> = bytes.iter().rev().copied().collect();
    if bytes.first().is_some_and(|&hi| hi & 0x80 != 0) {
        le.push(0);
    }
    BigInt::from_signed_bytes_le(&le)
}
