use num_bigint::BigInt;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::reader::CborReader;
use crate::tag::CborTag;
use crate::{CborError, ErrorCode};

/// A value reconstructed from a tagged CBOR item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticValue {
    /// Tag 0, with the offset written in the string.
    DateTime(OffsetDateTime),
    /// Tag 1, in UTC.
    UnixTime(OffsetDateTime),
    /// Tag 2 or 3.
    BigInteger(BigInt),
    /// Tag 4.
    Decimal(Decimal),
}

impl SemanticValue {
    /// The tag this value is encoded under. Negative bignums report tag 3.
    #[must_use]
    pub fn tag(&self) -> CborTag {
        match self {
            Self::DateTime(_) => CborTag::DATE_TIME_STRING,
            Self::UnixTime(_) => CborTag::UNIX_TIME_SECONDS,
            Self::BigInteger(n) if n.sign() == num_bigint::Sign::Minus => CborTag::NEGATIVE_BIGNUM,
            Self::BigInteger(_) => CborTag::UNSIGNED_BIGNUM,
            Self::Decimal(_) => CborTag::DECIMAL_FRACTION,
        }
    }
}

impl CborReader<'_> {
    /// Peek the next tag and read it with the matching reconstructor.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedTag` if the next item is not a tag, `UnexpectedTag` for a tag without a
    /// reconstructor, or the error of the selected reconstructor. The cursor is left unmoved on
    /// error.
    pub fn read_semantic_value(&mut self) -> Result<SemanticValue, CborError> {
        let off = self.position();
        match self.peek_tag()? {
            CborTag::DATE_TIME_STRING => self.read_date_time().map(SemanticValue::DateTime),
            CborTag::UNIX_TIME_SECONDS => {
                self.read_unix_time_seconds().map(SemanticValue::UnixTime)
            }
            CborTag::UNSIGNED_BIGNUM | CborTag::NEGATIVE_BIGNUM => {
                self.read_big_integer().map(SemanticValue::BigInteger)
            }
            CborTag::DECIMAL_FRACTION => self.read_decimal().map(SemanticValue::Decimal),
            _ => Err(CborError::new(ErrorCode::UnexpectedTag, off)),
        }
    }
}
