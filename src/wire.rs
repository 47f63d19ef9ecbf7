//! Initial-byte and argument decoding (RFC 8949 §3).
//!
//! Every CBOR item starts with one initial byte: the high 3 bits are the major type and the low 5
//! bits are the additional information (`ai`). `ai` 0..=23 is the argument itself; 24..=27 select a
//! 1/2/4/8-byte big-endian argument that follows; 28..=30 are reserved; 31 marks an
//! indefinite-length item (or the break stop code under major type 7).

use crate::profile::is_shortest_argument;
use crate::{CborError, ErrorCode};

/// The break stop code terminating indefinite-length items.
pub const BREAK: u8 = 0xff;

/// Additional-info value marking indefinite length.
pub const AI_INDEFINITE: u8 = 31;

/// CBOR major type (high 3 bits of the initial byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MajorType {
    /// Major type 0.
    UnsignedInteger = 0,
    /// Major type 1.
    NegativeInteger = 1,
    /// Major type 2.
    ByteString = 2,
    /// Major type 3.
    TextString = 3,
    /// Major type 4.
    Array = 4,
    /// Major type 5.
    Map = 5,
    /// Major type 6.
    Tag = 6,
    /// Major type 7: floats, simple values, break.
    Simple = 7,
}

impl MajorType {
    #[inline]
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::UnsignedInteger,
            1 => Self::NegativeInteger,
            2 => Self::ByteString,
            3 => Self::TextString,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::Simple,
        }
    }
}

/// A decoded initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Major type.
    pub major: MajorType,
    /// Additional information (0..=31).
    pub ai: u8,
}

impl Header {
    /// Split an initial byte into major type and additional info.
    #[inline]
    #[must_use]
    pub const fn from_byte(ib: u8) -> Self {
        Self {
            major: MajorType::from_bits(ib >> 5),
            ai: ib & 0x1f,
        }
    }

    /// Returns true iff the item is indefinite-length.
    #[inline]
    #[must_use]
    pub const fn is_indefinite(self) -> bool {
        self.ai == AI_INDEFINITE
    }
}

pub fn read_u8(data: &[u8], pos: &mut usize) -> Result<u8, CborError> {
    let off = *pos;
    let b = *data
        .get(*pos)
        .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, off))?;
    *pos += 1;
    Ok(b)
}

pub fn read_exact<'a>(data: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8], CborError> {
    let off = *pos;
    let end = pos
        .checked_add(n)
        .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, off))?;
    if end > data.len() {
        return Err(CborError::new(ErrorCode::UnexpectedEof, off));
    }
    let s = &data[*pos..end];
    *pos = end;
    Ok(s)
}

pub fn read_be_u16(data: &[u8], pos: &mut usize) -> Result<u16, CborError> {
    let s = read_exact(data, pos, 2)?;
    Ok(u16::from_be_bytes([s[0], s[1]]))
}

pub fn read_be_u32(data: &[u8], pos: &mut usize) -> Result<u32, CborError> {
    let s = read_exact(data, pos, 4)?;
    Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
}

pub fn read_be_u64(data: &[u8], pos: &mut usize) -> Result<u64, CborError> {
    let s = read_exact(data, pos, 8)?;
    Ok(u64::from_be_bytes([
        s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7],
    ]))
}

/// Decode the argument of the item whose initial byte is at `off`.
///
/// Returns `(argument, header_len)` where `header_len` counts the initial byte. With `canonical`
/// set, non-shortest encodings are rejected.
pub fn decode_argument(
    data: &[u8],
    off: usize,
    header: Header,
    canonical: bool,
) -> Result<(u64, usize), CborError> {
    let mut pos = off + 1;
    let v = match header.ai {
        ai @ 0..=23 => u64::from(ai),
        24 => u64::from(read_u8(data, &mut pos)?),
        25 => u64::from(read_be_u16(data, &mut pos)?),
        26 => u64::from(read_be_u32(data, &mut pos)?),
        27 => read_be_u64(data, &mut pos)?,
        _ => return Err(CborError::new(ErrorCode::ReservedAdditionalInfo, off)),
    };
    if canonical && !is_shortest_argument(header.ai, v) {
        return Err(CborError::new(ErrorCode::NonCanonicalEncoding, off));
    }
    Ok((v, pos - off))
}

/// Number of argument bytes following an initial byte with additional info `ai`.
#[inline]
pub const fn argument_len(ai: u8) -> usize {
    match ai {
        24 => 1,
        25 => 2,
        26 => 4,
        27 => 8,
        _ => 0,
    }
}

pub fn len_to_usize(len: u64, off: usize) -> Result<usize, CborError> {
    usize::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, off))
}
