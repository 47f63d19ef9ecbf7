//! Semantic tag headers (major type 6).
//!
//! A tag is read on its own, before its payload. After [`CborReader::read_tag`] the reader is in
//! tag context until the payload item is consumed; a container end in that state is
//! `TagNotFollowedByValue`. `Ctap2Canonical` readers refuse every tag at its initial byte.

use core::fmt;

use crate::reader::CborReader;
use crate::wire::MajorType;
use crate::{CborError, ErrorCode};

/// A semantic tag number (major type 6 argument).
///
/// Exactly one tag precedes one payload item, and a payload may itself begin with another tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CborTag(pub u64);

impl CborTag {
    /// Tag 0: RFC 3339 date/time text string.
    pub const DATE_TIME_STRING: Self = Self(0);
    /// Tag 1: seconds relative to 1970-01-01T00:00Z.
    pub const UNIX_TIME_SECONDS: Self = Self(1);
    /// Tag 2: unsigned bignum (big-endian byte string magnitude).
    pub const UNSIGNED_BIGNUM: Self = Self(2);
    /// Tag 3: negative bignum, value `-1 - n`.
    pub const NEGATIVE_BIGNUM: Self = Self(3);
    /// Tag 4: decimal fraction `[exponent, mantissa]`.
    pub const DECIMAL_FRACTION: Self = Self(4);
    /// Tag 5: bigfloat `[exponent, mantissa]` (base 2).
    pub const BIGFLOAT: Self = Self(5);
    /// Tag 24: encoded CBOR data item.
    pub const ENCODED_CBOR: Self = Self(24);
    /// Tag 32: URI text string.
    pub const URI: Self = Self(32);
    /// Tag 55799: self-described CBOR magic.
    pub const SELF_DESCRIBE_CBOR: Self = Self(55799);

    /// Return the raw tag number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for CborTag {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<CborTag> for u64 {
    fn from(tag: CborTag) -> Self {
        tag.0
    }
}

impl fmt::Display for CborTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag({})", self.0)
    }
}

impl CborReader<'_> {
    /// Decode the tag header at the cursor. Returns `(tag, bytes_consumed)`.
    fn peek_tag_header(&self) -> Result<(CborTag, usize), CborError> {
        let off = self.position();
        let header = self.peek_initial_byte(MajorType::Tag, ErrorCode::ExpectedTag)?;
        if !self.mode().allows_tags() {
            return Err(CborError::new(ErrorCode::TagsNotSupported, off));
        }
        let (value, consumed) = self.decode_unsigned_integer(header)?;
        Ok((CborTag(value), consumed))
    }

    /// Decode the next tag without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedTag` if the next item is not a tag, `TagsNotSupported` if the conformance
    /// mode forbids tags, or an argument decoding error. The cursor never moves.
    pub fn peek_tag(&self) -> Result<CborTag, CborError> {
        self.peek_tag_header().map(|(tag, _)| tag)
    }

    /// Consume the next tag header. The next item read is the tag's payload.
    ///
    /// # Errors
    ///
    /// Same as [`peek_tag`](Self::peek_tag); on error the cursor does not move.
    pub fn read_tag(&mut self) -> Result<CborTag, CborError> {
        let (tag, consumed) = self.peek_tag_header()?;
        log::trace!("read {tag} at offset {}", self.position());
        self.advance(consumed);
        self.in_tag = true;
        Ok(tag)
    }

    /// Consume the next tag header, requiring it to be `expected`.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedTag` if a different tag is present, without consuming it, plus the
    /// errors of [`read_tag`](Self::read_tag).
    pub fn read_expected_tag(&mut self, expected: CborTag) -> Result<(), CborError> {
        let off = self.position();
        let (tag, consumed) = self.peek_tag_header()?;
        if tag != expected {
            return Err(CborError::new(ErrorCode::UnexpectedTag, off));
        }
        self.advance(consumed);
        self.in_tag = true;
        Ok(())
    }
}
