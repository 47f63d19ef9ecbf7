use core::fmt;

/// The high-level class of an error.
///
/// Two families exist:
/// - **usage** errors (`TypeMismatch`, `TagMismatch`, `Misuse`): the caller asked for a shape the
///   input does not have, or used the reader out of contract. Retrying with a different read is
///   expected for the first two.
/// - **input** errors (everything else): the bytes are malformed, truncated, adversarial, or
///   disallowed by the active conformance mode.
///
/// No error corrupts reader state; every semantic read restores its checkpoint first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The next item has a different major type than requested.
    TypeMismatch,
    /// A tag was present but its number differs from the expected one.
    TagMismatch,
    /// The payload shape or value violates a semantic rule.
    Content,
    /// The item is well-formed but disallowed by the active conformance mode.
    Conformance,
    /// A decoded numeric value exceeds the range of its target type.
    Overflow,
    /// The input ended before the item was complete.
    Truncation,
    /// The input is not well-formed CBOR.
    Malformed,
    /// The process environment could not supply a required resource.
    Environment,
    /// The caller broke the reader's API contract.
    Misuse,
}

/// A structured error code identifying the reason a read was rejected.
///
/// This enum is intentionally stable and string-free to remain hot-path friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Expected a tag (major type 6).
    ExpectedTag,
    /// Expected an integer (major type 0 or 1).
    ExpectedInteger,
    /// Expected a floating-point value.
    ExpectedFloat,
    /// Expected a text string.
    ExpectedText,
    /// Expected a byte string.
    ExpectedBytes,
    /// Expected an array.
    ExpectedArray,
    /// Expected a map.
    ExpectedMap,
    /// Expected a boolean.
    ExpectedBool,
    /// Expected `null`.
    ExpectedNull,

    /// A tag number differs from the one required.
    UnexpectedTag,

    /// Tag 0 payload is not an RFC 3339 text string.
    InvalidDateTimeEncoding,
    /// Tag 1 payload is not a finite integer or float.
    InvalidUnixTimeEncoding,
    /// Tag 1 payload is outside the representable date-time range.
    UnixTimeOutOfRange,
    /// Tag 2/3 payload is not a byte string.
    InvalidBigIntegerEncoding,
    /// Tag 4 payload is not a two-element `[exponent, mantissa]` array.
    InvalidDecimalEncoding,
    /// Invalid UTF-8 in a text string.
    Utf8Invalid,

    /// Tags are disallowed by the active conformance mode.
    TagsNotSupported,
    /// Non-canonical (non-shortest) integer/length encoding was used.
    NonCanonicalEncoding,
    /// Indefinite-length encoding was used where forbidden.
    IndefiniteLengthForbidden,

    /// Decimal value exceeds the fixed-point range.
    DecimalOverflow,
    /// Integer does not fit the requested integer type.
    IntegerOverflow,

    /// Unexpected end-of-input while decoding.
    UnexpectedEof,

    /// Reserved additional-info value (28..30, or 31 where indefinite length is meaningless).
    ReservedAdditionalInfo,
    /// An indefinite-length string contains a chunk of the wrong type.
    InvalidIndefiniteChunk,
    /// A tag was read and the enclosing container ended before its payload.
    TagNotFollowedByValue,
    /// Attempted to end a container that still has items.
    NotAtEndOfContainer,
    /// Attempted to read an item past the end of its container.
    UnexpectedEndOfContainer,
    /// A break byte appeared outside an indefinite-length item.
    UnexpectedBreak,
    /// Nesting depth limit exceeded.
    DepthLimitExceeded,
    /// Byte string length exceeds limits.
    BytesLenLimitExceeded,
    /// Text string length exceeds limits.
    TextLenLimitExceeded,
    /// Array length exceeds limits.
    ArrayLenLimitExceeded,
    /// Map length exceeds limits.
    MapLenLimitExceeded,
    /// Arithmetic overflow while computing a length/offset.
    LengthOverflow,

    /// The operating system secure random source failed.
    RandomSourceUnavailable,

    /// A checkpoint was restored after a container open at its creation was closed, or on a
    /// reader over different input.
    StaleCheckpoint,
}

impl ErrorCode {
    /// Classify this code.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::ExpectedTag
            | Self::ExpectedInteger
            | Self::ExpectedFloat
            | Self::ExpectedText
            | Self::ExpectedBytes
            | Self::ExpectedArray
            | Self::ExpectedMap
            | Self::ExpectedBool
            | Self::ExpectedNull => ErrorKind::TypeMismatch,

            Self::UnexpectedTag => ErrorKind::TagMismatch,

            Self::InvalidDateTimeEncoding
            | Self::InvalidUnixTimeEncoding
            | Self::UnixTimeOutOfRange
            | Self::InvalidBigIntegerEncoding
            | Self::InvalidDecimalEncoding
            | Self::Utf8Invalid => ErrorKind::Content,

            Self::TagsNotSupported | Self::NonCanonicalEncoding | Self::IndefiniteLengthForbidden => {
                ErrorKind::Conformance
            }

            Self::DecimalOverflow | Self::IntegerOverflow => ErrorKind::Overflow,

            Self::UnexpectedEof => ErrorKind::Truncation,

            Self::ReservedAdditionalInfo
            | Self::InvalidIndefiniteChunk
            | Self::TagNotFollowedByValue
            | Self::NotAtEndOfContainer
            | Self::UnexpectedEndOfContainer
            | Self::UnexpectedBreak
            | Self::DepthLimitExceeded
            | Self::BytesLenLimitExceeded
            | Self::TextLenLimitExceeded
            | Self::ArrayLenLimitExceeded
            | Self::MapLenLimitExceeded
            | Self::LengthOverflow => ErrorKind::Malformed,

            Self::RandomSourceUnavailable => ErrorKind::Environment,

            Self::StaleCheckpoint => ErrorKind::Misuse,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::ExpectedTag => "expected tag",
            Self::ExpectedInteger => "expected integer",
            Self::ExpectedFloat => "expected float",
            Self::ExpectedText => "expected text string",
            Self::ExpectedBytes => "expected byte string",
            Self::ExpectedArray => "expected array",
            Self::ExpectedMap => "expected map",
            Self::ExpectedBool => "expected bool",
            Self::ExpectedNull => "expected null",

            Self::UnexpectedTag => "unexpected tag number",

            Self::InvalidDateTimeEncoding => "invalid RFC 3339 date-time encoding",
            Self::InvalidUnixTimeEncoding => "invalid epoch timestamp encoding",
            Self::UnixTimeOutOfRange => "epoch timestamp out of range",
            Self::InvalidBigIntegerEncoding => "invalid bignum encoding",
            Self::InvalidDecimalEncoding => "invalid decimal fraction encoding",
            Self::Utf8Invalid => "text must be valid UTF-8",

            Self::TagsNotSupported => "tags are not supported by the conformance mode",
            Self::NonCanonicalEncoding => "non-canonical integer/length encoding",
            Self::IndefiniteLengthForbidden => "indefinite length forbidden",

            Self::DecimalOverflow => "decimal value out of range",
            Self::IntegerOverflow => "integer out of range",

            Self::UnexpectedEof => "unexpected end of input",

            Self::ReservedAdditionalInfo => "reserved additional info value",
            Self::InvalidIndefiniteChunk => "invalid chunk in indefinite-length string",
            Self::TagNotFollowedByValue => "tag not followed by a value",
            Self::NotAtEndOfContainer => "container has unread items",
            Self::UnexpectedEndOfContainer => "read past end of container",
            Self::UnexpectedBreak => "unexpected break byte",
            Self::DepthLimitExceeded => "nesting depth limit exceeded",
            Self::BytesLenLimitExceeded => "byte string length exceeds decode limits",
            Self::TextLenLimitExceeded => "text string length exceeds decode limits",
            Self::ArrayLenLimitExceeded => "array length exceeds decode limits",
            Self::MapLenLimitExceeded => "map length exceeds decode limits",
            Self::LengthOverflow => "length overflow",

            Self::RandomSourceUnavailable => "secure random source unavailable",

            Self::StaleCheckpoint => "checkpoint no longer matches the reader",
        }
    }
}

/// A decode error with a stable code and the byte offset where it was detected.
///
/// The offset is the position of the item that failed, not the reader position after rollback.
/// For environment errors, `offset` is `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset into the input where the error was detected.
    pub offset: usize,
}

impl CborError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }

    /// Classify this error.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        self.code.kind()
    }

    /// Returns true iff the caller is at fault, rather than the input being bad.
    #[inline]
    #[must_use]
    pub const fn is_usage(self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TypeMismatch | ErrorKind::TagMismatch | ErrorKind::Misuse
        )
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.code.message();
        match self.kind() {
            ErrorKind::Environment => write!(f, "cbor environment failure: {msg}"),
            _ => write!(f, "cbor decode failed at {}: {msg}", self.offset),
        }
    }
}

impl std::error::Error for CborError {}
