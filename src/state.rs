/// The structural kind of the next item, as reported by
/// [`CborReader::peek_state`](crate::CborReader::peek_state).
///
/// Reconstructors dispatch on this value rather than trial-decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaderState {
    /// Major type 0.
    UnsignedInteger,
    /// Major type 1.
    NegativeInteger,
    /// Definite-length byte string.
    ByteString,
    /// Indefinite-length byte string (a sequence of definite chunks).
    StartIndefiniteLengthByteString,
    /// Definite-length text string.
    TextString,
    /// Indefinite-length text string (a sequence of definite chunks).
    StartIndefiniteLengthTextString,
    /// Array header (definite or indefinite).
    StartArray,
    /// All items of the current array have been read.
    EndArray,
    /// Map header (definite or indefinite).
    StartMap,
    /// All entries of the current map have been read.
    EndMap,
    /// Semantic tag header.
    Tag,
    /// Unassigned simple value.
    SimpleValue,
    /// Simple value `null`.
    Null,
    /// Simple value `undefined`.
    Undefined,
    /// Simple value `false` or `true`.
    Boolean,
    /// binary16 float.
    HalfPrecisionFloat,
    /// binary32 float.
    SinglePrecisionFloat,
    /// binary64 float.
    DoublePrecisionFloat,
    /// No further top-level items.
    Finished,
}

impl ReaderState {
    /// Returns true iff the next item is an integer (major type 0 or 1).
    #[inline]
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::UnsignedInteger | Self::NegativeInteger)
    }

    /// Returns true iff the next item is a float of any precision.
    #[inline]
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            Self::HalfPrecisionFloat | Self::SinglePrecisionFloat | Self::DoublePrecisionFloat
        )
    }

    /// Returns true iff the next item is a text string of either length form.
    #[inline]
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::TextString | Self::StartIndefiniteLengthTextString)
    }

    /// Returns true iff the next item is a byte string of either length form.
    #[inline]
    #[must_use]
    pub const fn is_bytes(self) -> bool {
        matches!(self, Self::ByteString | Self::StartIndefiniteLengthByteString)
    }
}
