//! Decimal fractions (tag 4).
//!
//! The payload is `[exponent, mantissa]` with value `mantissa × 10^exponent`. The target type is
//! [`rust_decimal::Decimal`]: a 96-bit magnitude with a base-10 scale of `0..=28`.

use rust_decimal::Decimal;

use crate::reader::CborReader;
use crate::state::ReaderState;
use crate::tag::CborTag;
use crate::{CborError, ErrorCode};

/// Largest decimal exponent magnitude accepted (the decimal type's maximum scale).
pub const MAX_DECIMAL_EXPONENT: u32 = 28;

impl CborReader<'_> {
    /// Read a tag 4 decimal fraction.
    ///
    /// The mantissa may be a plain integer or a tag 2/3 bignum.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedTag`/`UnexpectedTag` if the next item is not tag 4,
    /// `InvalidDecimalEncoding` if the payload is not a two-element array of integers (or a
    /// bignum mantissa), and `DecimalOverflow` if the value is outside the decimal range. The
    /// payload shape is checked before decode limits, so an array header of any other length is
    /// `InvalidDecimalEncoding` even when it also exceeds `max_array_len`. On any error the cursor
    /// is left before the tag.
    pub fn read_decimal(&mut self) -> Result<Decimal, CborError> {
        self.transaction(|r| {
            r.read_expected_tag(CborTag::DECIMAL_FRACTION)?;
            let off = r.position();
            if r.peek_state()? != ReaderState::StartArray || r.peek_array_len()? != Some(2) {
                return Err(CborError::new(ErrorCode::InvalidDecimalEncoding, off));
            }
            r.read_start_array()?;

            let exp_off = r.position();
            if !r.peek_state()?.is_integer() {
                return Err(CborError::new(ErrorCode::InvalidDecimalEncoding, exp_off));
            }
            let exponent = r.read_int128()?;

            let mantissa_off = r.position();
            let mantissa = match r.peek_state()? {
                ReaderState::UnsignedInteger | ReaderState::NegativeInteger => r.read_int128()?,
                ReaderState::Tag => match r.peek_tag()? {
                    CborTag::UNSIGNED_BIGNUM | CborTag::NEGATIVE_BIGNUM => {
                        let big = r.read_big_integer()?;
                        i128::try_from(&big).map_err(|_| {
                            CborError::new(ErrorCode::DecimalOverflow, mantissa_off)
                        })?
                    }
                    _ => {
                        return Err(CborError::new(
                            ErrorCode::InvalidDecimalEncoding,
                            mantissa_off,
                        ))
                    }
                },
                _ => {
                    return Err(CborError::new(
                        ErrorCode::InvalidDecimalEncoding,
                        mantissa_off,
                    ))
                }
            };

            r.read_end_array()?;
            reconstruct(mantissa, exponent)
                .ok_or_else(|| CborError::new(ErrorCode::DecimalOverflow, off))
        })
    }
}

/// Compute `mantissa × 10^exponent`, or `None` if it is outside the decimal range.
///
/// A zero mantissa is zero for every exponent.
pub(crate) fn reconstruct(mantissa: i128, exponent: i128) -> Option<Decimal> {
    if mantissa == 0 {
        return Some(Decimal::ZERO);
    }
    let magnitude = u32::try_from(exponent.unsigned_abs()).ok()?;
    if magnitude > MAX_DECIMAL_EXPONENT {
        return None;
    }
    if exponent > 0 {
        let scaled = mantissa.checked_mul(10i128.checked_pow(magnitude)?)?;
        Decimal::try_from_i128_with_scale(scaled, 0).ok()
    } else {
        Decimal::try_from_i128_with_scale(mantissa, magnitude).ok()
    }
}
