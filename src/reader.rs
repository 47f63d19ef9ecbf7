use crate::float::f16_bits_to_f64;
use crate::limits::ReaderOptions;
use crate::profile::ConformanceMode;
use crate::state::ReaderState;
use crate::utf8;
use crate::wire::{self, Header, MajorType, BREAK};
use crate::{CborError, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Root,
    Array,
    Map,
}

/// The container currently being read.
///
/// `len` counts items for definite containers (a map of `n` pairs has `2n` items) and is `None`
/// for indefinite ones. The root frame is an indefinite sequence of top-level items.
///
/// `id` is unique per reader for every container entered and is never reused, so a frame that
/// was closed can be told apart from a sibling opened later at the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) id: u64,
    pub(crate) kind: FrameKind,
    pub(crate) len: Option<u64>,
    pub(crate) items_read: u64,
}

impl Frame {
    const ROOT: Self = Self {
        id: 0,
        kind: FrameKind::Root,
        len: None,
        items_read: 0,
    };

    const fn is_exhausted(self) -> bool {
        match self.len {
            Some(len) => self.items_read >= len,
            None => false,
        }
    }

    const fn is_indefinite_container(self) -> bool {
        self.len.is_none() && !matches!(self.kind, FrameKind::Root)
    }
}

/// Pull reader over a fully resident CBOR byte sequence.
///
/// The input is treated as a CBOR sequence: any number of top-level items may follow each other,
/// and [`ReaderState::Finished`] is reported once the bytes are exhausted at top level.
///
/// A reader is a cursor, not a buffer: it borrows the input and every read either advances past
/// exactly one item or leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct CborReader<'a> {
    data: &'a [u8],
    pub(crate) pos: usize,
    pub(crate) in_tag: bool,
    pub(crate) frame: Frame,
    pub(crate) parents: Vec<Frame>,
    /// Containers at or below this depth may not be closed (set while a transaction runs).
    pub(crate) floor: usize,
    next_frame_id: u64,
    options: ReaderOptions,
}

impl<'a> CborReader<'a> {
    /// Construct a reader with default options (`Strict` mode, default limits).
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, ReaderOptions::default())
    }

    /// Construct a reader with `mode` and default limits.
    #[must_use]
    pub fn with_mode(data: &'a [u8], mode: ConformanceMode) -> Self {
        Self::with_options(data, ReaderOptions::with_mode(mode))
    }

    /// Construct a reader with explicit options.
    #[must_use]
    pub const fn with_options(data: &'a [u8], options: ReaderOptions) -> Self {
        Self {
            data,
            pos: 0,
            in_tag: false,
            frame: Frame::ROOT,
            parents: Vec::new(),
            floor: 0,
            next_frame_id: 1,
            options,
        }
    }

    /// Return the current byte offset in the input.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline]
    #[must_use]
    pub const fn bytes_remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// The unread suffix of the input.
    #[inline]
    #[must_use]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    pub(crate) const fn input_len(&self) -> usize {
        self.data.len()
    }

    /// The conformance mode fixed at construction.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> ConformanceMode {
        self.options.mode
    }

    /// The options fixed at construction.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Current container nesting depth (0 at top level).
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Returns true iff a tag has been read and its payload has not.
    #[inline]
    #[must_use]
    pub const fn is_tag_context(&self) -> bool {
        self.in_tag
    }

    /// Report the structural kind of the next item without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if the input ends inside a container or after a tag,
    /// `TagNotFollowedByValue` if a container ends right after a tag, `UnexpectedBreak` for a stray
    /// break byte, and `ReservedAdditionalInfo` for major type 7 with additional info 28..=30.
    pub fn peek_state(&self) -> Result<ReaderState, CborError> {
        let off = self.pos;

        if self.frame.is_exhausted() {
            if self.in_tag {
                return Err(CborError::new(ErrorCode::TagNotFollowedByValue, off));
            }
            return Ok(match self.frame.kind {
                FrameKind::Root => ReaderState::Finished,
                FrameKind::Array => ReaderState::EndArray,
                FrameKind::Map => ReaderState::EndMap,
            });
        }

        let Some(&ib) = self.data.get(off) else {
            if self.frame.kind == FrameKind::Root && !self.in_tag {
                return Ok(ReaderState::Finished);
            }
            return Err(CborError::new(ErrorCode::UnexpectedEof, off));
        };

        if ib == BREAK {
            if self.in_tag {
                return Err(CborError::new(ErrorCode::TagNotFollowedByValue, off));
            }
            return match (self.frame.kind, self.frame.len) {
                (FrameKind::Array, None) => Ok(ReaderState::EndArray),
                (FrameKind::Map, None) if self.frame.items_read % 2 == 0 => Ok(ReaderState::EndMap),
                _ => Err(CborError::new(ErrorCode::UnexpectedBreak, off)),
            };
        }

        let header = Header::from_byte(ib);
        let state = match header.major {
            MajorType::UnsignedInteger => ReaderState::UnsignedInteger,
            MajorType::NegativeInteger => ReaderState::NegativeInteger,
            MajorType::ByteString if header.is_indefinite() => {
                ReaderState::StartIndefiniteLengthByteString
            }
            MajorType::ByteString => ReaderState::ByteString,
            MajorType::TextString if header.is_indefinite() => {
                ReaderState::StartIndefiniteLengthTextString
            }
            MajorType::TextString => ReaderState::TextString,
            MajorType::Array => ReaderState::StartArray,
            MajorType::Map => ReaderState::StartMap,
            MajorType::Tag => ReaderState::Tag,
            MajorType::Simple => match header.ai {
                20 | 21 => ReaderState::Boolean,
                22 => ReaderState::Null,
                23 => ReaderState::Undefined,
                0..=19 | 24 => ReaderState::SimpleValue,
                25 => ReaderState::HalfPrecisionFloat,
                26 => ReaderState::SinglePrecisionFloat,
                27 => ReaderState::DoublePrecisionFloat,
                _ => return Err(CborError::new(ErrorCode::ReservedAdditionalInfo, off)),
            },
        };
        Ok(state)
    }

    /// Decode the next initial byte, requiring a data item (not a container end) to follow.
    fn peek_item_header(&self) -> Result<Header, CborError> {
        let off = self.pos;
        if self.frame.is_exhausted() {
            let code = if self.in_tag {
                ErrorCode::TagNotFollowedByValue
            } else {
                ErrorCode::UnexpectedEndOfContainer
            };
            return Err(CborError::new(code, off));
        }
        let ib = *self
            .data
            .get(off)
            .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, off))?;
        if ib == BREAK {
            let code = if self.in_tag {
                ErrorCode::TagNotFollowedByValue
            } else if self.frame.is_indefinite_container() {
                ErrorCode::UnexpectedEndOfContainer
            } else {
                ErrorCode::UnexpectedBreak
            };
            return Err(CborError::new(code, off));
        }
        Ok(Header::from_byte(ib))
    }

    /// Decode the next initial byte and require major type `expected`.
    ///
    /// Fails with `mismatch` without moving the cursor otherwise.
    pub(crate) fn peek_initial_byte(
        &self,
        expected: MajorType,
        mismatch: ErrorCode,
    ) -> Result<Header, CborError> {
        let header = self.peek_item_header()?;
        if header.major != expected {
            return Err(CborError::new(mismatch, self.pos));
        }
        Ok(header)
    }

    /// Decode the argument of the item at the cursor. Returns `(value, bytes_consumed)`.
    pub(crate) fn decode_unsigned_integer(&self, header: Header) -> Result<(u64, usize), CborError> {
        wire::decode_argument(
            self.data,
            self.pos,
            header,
            self.options.mode.requires_canonical_integers(),
        )
    }

    #[inline]
    pub(crate) fn advance(&mut self, consumed: usize) {
        self.pos += consumed;
    }

    #[inline]
    fn advance_data_item(&mut self, consumed: usize) {
        self.pos += consumed;
        self.in_tag = false;
        self.frame.items_read += 1;
    }

    /// Read an unsigned integer (major type 0).
    ///
    /// # Errors
    ///
    /// Returns `ExpectedInteger` if the next item is not major type 0.
    pub fn read_uint64(&mut self) -> Result<u64, CborError> {
        let header =
            self.peek_initial_byte(MajorType::UnsignedInteger, ErrorCode::ExpectedInteger)?;
        let (v, consumed) = self.decode_unsigned_integer(header)?;
        self.advance_data_item(consumed);
        Ok(v)
    }

    /// Decode the integer at the cursor without consuming it. Returns `(value, bytes_consumed)`.
    fn peek_integer(&self) -> Result<(i128, usize), CborError> {
        let off = self.pos;
        let header = self.peek_item_header()?;
        match header.major {
            MajorType::UnsignedInteger => {
                let (v, consumed) = self.decode_unsigned_integer(header)?;
                Ok((i128::from(v), consumed))
            }
            MajorType::NegativeInteger => {
                let (n, consumed) = self.decode_unsigned_integer(header)?;
                Ok((-1 - i128::from(n), consumed))
            }
            _ => Err(CborError::new(ErrorCode::ExpectedInteger, off)),
        }
    }

    /// Read a signed integer (major type 0 or 1) that fits `i64`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedInteger` for other major types, `IntegerOverflow` if the value does not fit.
    pub fn read_int64(&mut self) -> Result<i64, CborError> {
        let off = self.pos;
        let (v, consumed) = self.peek_integer()?;
        let v = i64::try_from(v).map_err(|_| CborError::new(ErrorCode::IntegerOverflow, off))?;
        self.advance_data_item(consumed);
        Ok(v)
    }

    /// Read any CBOR integer (major type 0 or 1). Every such value fits `i128`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedInteger` for other major types.
    pub fn read_int128(&mut self) -> Result<i128, CborError> {
        let (v, consumed) = self.peek_integer()?;
        self.advance_data_item(consumed);
        Ok(v)
    }

    /// Read a float of any precision, widened to `f64`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedFloat` if the next item is not a half, single, or double float.
    pub fn read_double(&mut self) -> Result<f64, CborError> {
        let off = self.pos;
        let header = self.peek_initial_byte(MajorType::Simple, ErrorCode::ExpectedFloat)?;
        let mut pos = off + 1;
        let v = match header.ai {
            25 => f16_bits_to_f64(wire::read_be_u16(self.data, &mut pos)?),
            26 => f64::from(f32::from_bits(wire::read_be_u32(self.data, &mut pos)?)),
            27 => f64::from_bits(wire::read_be_u64(self.data, &mut pos)?),
            _ => return Err(CborError::new(ErrorCode::ExpectedFloat, off)),
        };
        self.advance_data_item(pos - off);
        Ok(v)
    }

    /// Read `false` or `true`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedBool` for any other item.
    pub fn read_boolean(&mut self) -> Result<bool, CborError> {
        let off = self.pos;
        let header = self.peek_initial_byte(MajorType::Simple, ErrorCode::ExpectedBool)?;
        let v = match header.ai {
            20 => false,
            21 => true,
            _ => return Err(CborError::new(ErrorCode::ExpectedBool, off)),
        };
        self.advance_data_item(1);
        Ok(v)
    }

    /// Read `null`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedNull` for any other item.
    pub fn read_null(&mut self) -> Result<(), CborError> {
        let off = self.pos;
        let header = self.peek_initial_byte(MajorType::Simple, ErrorCode::ExpectedNull)?;
        if header.ai != 22 {
            return Err(CborError::new(ErrorCode::ExpectedNull, off));
        }
        self.advance_data_item(1);
        Ok(())
    }

    /// Walk a definite or indefinite string item, feeding each chunk to `sink`.
    ///
    /// Returns the number of bytes the whole item occupies. Does not move the cursor.
    fn read_chunked(
        &self,
        header: Header,
        limit: usize,
        limit_code: ErrorCode,
        mut sink: impl FnMut(&'a [u8], usize) -> Result<(), CborError>,
    ) -> Result<usize, CborError> {
        let start = self.pos;
        let canonical = self.options.mode.requires_canonical_integers();

        if !header.is_indefinite() {
            let (len, header_len) = wire::decode_argument(self.data, start, header, canonical)?;
            let len = wire::len_to_usize(len, start)?;
            if len > limit {
                return Err(CborError::new(limit_code, start));
            }
            let mut pos = start + header_len;
            let bytes = wire::read_exact(self.data, &mut pos, len)?;
            sink(bytes, start)?;
            return Ok(pos - start);
        }

        if self.options.mode.requires_definite_lengths() {
            return Err(CborError::new(ErrorCode::IndefiniteLengthForbidden, start));
        }

        let mut pos = start + 1;
        let mut total = 0usize;
        loop {
            let off = pos;
            let ib = wire::read_u8(self.data, &mut pos)?;
            if ib == BREAK {
                return Ok(pos - start);
            }
            let chunk = Header::from_byte(ib);
            if chunk.major != header.major || chunk.is_indefinite() {
                return Err(CborError::new(ErrorCode::InvalidIndefiniteChunk, off));
            }
            let (len, header_len) = wire::decode_argument(self.data, off, chunk, canonical)?;
            let len = wire::len_to_usize(len, off)?;
            total = total
                .checked_add(len)
                .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, off))?;
            if total > limit {
                return Err(CborError::new(limit_code, off));
            }
            pos = off + header_len;
            let bytes = wire::read_exact(self.data, &mut pos, len)?;
            sink(bytes, off)?;
        }
    }

    /// Read a byte string, concatenating indefinite-length chunks.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedBytes` for other items, `InvalidIndefiniteChunk` for a non-byte-string
    /// chunk, `IndefiniteLengthForbidden` in canonical modes, or a length limit error.
    pub fn read_byte_string(&mut self) -> Result<Vec<u8>, CborError> {
        let header = self.peek_initial_byte(MajorType::ByteString, ErrorCode::ExpectedBytes)?;
        let mut out = Vec::new();
        let consumed = self.read_chunked(
            header,
            self.options.limits.max_bytes_len,
            ErrorCode::BytesLenLimitExceeded,
            |chunk, _| {
                out.extend_from_slice(chunk);
                Ok(())
            },
        )?;
        self.advance_data_item(consumed);
        Ok(out)
    }

    /// Read a text string, concatenating indefinite-length chunks.
    ///
    /// Each chunk is validated as UTF-8 on its own. In `Lax` mode invalid sequences are replaced
    /// with `U+FFFD`; all other modes reject them.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedText` for other items, `Utf8Invalid`, `InvalidIndefiniteChunk`,
    /// `IndefiniteLengthForbidden` in canonical modes, or a length limit error.
    pub fn read_text_string(&mut self) -> Result<String, CborError> {
        let header = self.peek_initial_byte(MajorType::TextString, ErrorCode::ExpectedText)?;
        let strict = self.options.mode.requires_utf8_validation();
        let mut out = String::new();
        let consumed = self.read_chunked(
            header,
            self.options.limits.max_text_len,
            ErrorCode::TextLenLimitExceeded,
            |chunk, off| {
                if let Some(s) = utf8::to_str(chunk) {
                    out.push_str(s);
                    return Ok(());
                }
                if strict {
                    return Err(CborError::new(ErrorCode::Utf8Invalid, off));
                }
                log::warn!("replacing invalid UTF-8 in text string at offset {off}");
                out.push_str(&String::from_utf8_lossy(chunk));
                Ok(())
            },
        )?;
        self.advance_data_item(consumed);
        Ok(out)
    }

    fn container_len(
        &self,
        header: Header,
        limit: usize,
        limit_code: ErrorCode,
    ) -> Result<(Option<u64>, usize), CborError> {
        let off = self.pos;
        if header.is_indefinite() {
            if self.options.mode.requires_definite_lengths() {
                return Err(CborError::new(ErrorCode::IndefiniteLengthForbidden, off));
            }
            return Ok((None, 1));
        }
        let (len, consumed) = self.decode_unsigned_integer(header)?;
        if len > u64::try_from(limit).unwrap_or(u64::MAX) {
            return Err(CborError::new(limit_code, off));
        }
        Ok((Some(len), consumed))
    }

    /// Decode the item count of the array header at the cursor without entering it or applying
    /// length limits. `None` means indefinite length.
    pub(crate) fn peek_array_len(&self) -> Result<Option<u64>, CborError> {
        let header = self.peek_initial_byte(MajorType::Array, ErrorCode::ExpectedArray)?;
        if header.is_indefinite() {
            return Ok(None);
        }
        self.decode_unsigned_integer(header).map(|(len, _)| Some(len))
    }

    fn enter_container(
        &mut self,
        kind: FrameKind,
        len: Option<u64>,
        consumed: usize,
    ) -> Result<(), CborError> {
        if self.parents.len() >= self.options.limits.max_depth {
            return Err(CborError::new(ErrorCode::DepthLimitExceeded, self.pos));
        }
        self.advance_data_item(consumed);
        self.parents.push(self.frame);
        let id = self.next_frame_id;
        self.next_frame_id += 1;
        self.frame = Frame {
            id,
            kind,
            len,
            items_read: 0,
        };
        Ok(())
    }

    fn exit_container(&mut self, kind: FrameKind) -> Result<(), CborError> {
        let off = self.pos;
        if self.in_tag {
            return Err(CborError::new(ErrorCode::TagNotFollowedByValue, off));
        }
        if self.frame.kind != kind || self.parents.len() <= self.floor {
            return Err(CborError::new(ErrorCode::NotAtEndOfContainer, off));
        }
        let consumed = match self.frame.len {
            Some(len) if self.frame.items_read < len => {
                return Err(CborError::new(ErrorCode::NotAtEndOfContainer, off));
            }
            Some(_) => 0,
            None => match self.data.get(off) {
                Some(&BREAK) if self.frame.items_read % 2 == 0 || kind != FrameKind::Map => 1,
                Some(_) => return Err(CborError::new(ErrorCode::NotAtEndOfContainer, off)),
                None => return Err(CborError::new(ErrorCode::UnexpectedEof, off)),
            },
        };
        self.advance(consumed);
        self.frame = self.parents.pop().unwrap_or(Frame::ROOT);
        Ok(())
    }

    /// Read an array header and enter the array.
    ///
    /// Returns the element count, or `None` for an indefinite-length array.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedArray` for other items, `DepthLimitExceeded`, `ArrayLenLimitExceeded`, or
    /// `IndefiniteLengthForbidden` in canonical modes.
    pub fn read_start_array(&mut self) -> Result<Option<usize>, CborError> {
        let off = self.pos;
        let header = self.peek_initial_byte(MajorType::Array, ErrorCode::ExpectedArray)?;
        let (len, consumed) = self.container_len(
            header,
            self.options.limits.max_array_len,
            ErrorCode::ArrayLenLimitExceeded,
        )?;
        let len_usize = len.map(|n| wire::len_to_usize(n, off)).transpose()?;
        self.enter_container(FrameKind::Array, len, consumed)?;
        Ok(len_usize)
    }

    /// Leave the current array.
    ///
    /// # Errors
    ///
    /// Returns `NotAtEndOfContainer` if the reader is not inside an array, items remain, or the
    /// array was already open when the running [`transaction`](Self::transaction) began.
    pub fn read_end_array(&mut self) -> Result<(), CborError> {
        self.exit_container(FrameKind::Array)
    }

    /// Read a map header and enter the map.
    ///
    /// Returns the pair count, or `None` for an indefinite-length map. Keys and values are then
    /// read as alternating items.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedMap` for other items, `DepthLimitExceeded`, `MapLenLimitExceeded`, or
    /// `IndefiniteLengthForbidden` in canonical modes.
    pub fn read_start_map(&mut self) -> Result<Option<usize>, CborError> {
        let off = self.pos;
        let header = self.peek_initial_byte(MajorType::Map, ErrorCode::ExpectedMap)?;
        let (pairs, consumed) = self.container_len(
            header,
            self.options.limits.max_map_len,
            ErrorCode::MapLenLimitExceeded,
        )?;
        let items = pairs
            .map(|n| {
                n.checked_mul(2)
                    .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, off))
            })
            .transpose()?;
        let pairs_usize = pairs.map(|n| wire::len_to_usize(n, off)).transpose()?;
        self.enter_container(FrameKind::Map, items, consumed)?;
        Ok(pairs_usize)
    }

    /// Leave the current map.
    ///
    /// # Errors
    ///
    /// Returns `NotAtEndOfContainer` if the reader is not inside a map, entries remain, or the map
    /// was already open when the running [`transaction`](Self::transaction) began.
    pub fn read_end_map(&mut self) -> Result<(), CborError> {
        self.exit_container(FrameKind::Map)
    }

    /// Skip exactly one item, including any tags and nested containers.
    ///
    /// Either the whole item is skipped or the cursor is left unmoved.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEndOfContainer` if there is no item to skip, or any decode error
    /// encountered inside the item.
    pub fn skip_value(&mut self) -> Result<(), CborError> {
        self.transaction(Self::skip_value_inner)
    }

    fn skip_value_inner(&mut self) -> Result<(), CborError> {
        let off = self.pos;
        match self.peek_state()? {
            ReaderState::EndArray | ReaderState::EndMap | ReaderState::Finished => {
                Err(CborError::new(ErrorCode::UnexpectedEndOfContainer, off))
            }
            ReaderState::Tag => {
                while self.peek_state()? == ReaderState::Tag {
                    self.read_tag()?;
                }
                self.skip_value_inner()
            }
            ReaderState::StartArray => {
                self.read_start_array()?;
                while self.peek_state()? != ReaderState::EndArray {
                    self.skip_value_inner()?;
                }
                self.read_end_array()
            }
            ReaderState::StartMap => {
                self.read_start_map()?;
                while self.peek_state()? != ReaderState::EndMap {
                    self.skip_value_inner()?;
                }
                self.read_end_map()
            }
            ReaderState::ByteString | ReaderState::StartIndefiniteLengthByteString => {
                let header = self.peek_item_header()?;
                let consumed = self.read_chunked(
                    header,
                    self.options.limits.max_bytes_len,
                    ErrorCode::BytesLenLimitExceeded,
                    |_, _| Ok(()),
                )?;
                self.advance_data_item(consumed);
                Ok(())
            }
            ReaderState::TextString | ReaderState::StartIndefiniteLengthTextString => {
                let header = self.peek_item_header()?;
                let strict = self.options.mode.requires_utf8_validation();
                let consumed = self.read_chunked(
                    header,
                    self.options.limits.max_text_len,
                    ErrorCode::TextLenLimitExceeded,
                    |chunk, at| {
                        if strict && utf8::to_str(chunk).is_none() {
                            return Err(CborError::new(ErrorCode::Utf8Invalid, at));
                        }
                        Ok(())
                    },
                )?;
                self.advance_data_item(consumed);
                Ok(())
            }
            ReaderState::UnsignedInteger | ReaderState::NegativeInteger => {
                self.read_int128().map(drop)
            }
            ReaderState::SimpleValue
            | ReaderState::Null
            | ReaderState::Undefined
            | ReaderState::Boolean
            | ReaderState::HalfPrecisionFloat
            | ReaderState::SinglePrecisionFloat
            | ReaderState::DoublePrecisionFloat => {
                let header = self.peek_item_header()?;
                let mut pos = off + 1;
                wire::read_exact(self.data, &mut pos, wire::argument_len(header.ai))?;
                self.advance_data_item(pos - off);
                Ok(())
            }
        }
    }
}
