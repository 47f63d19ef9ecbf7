//! # cbor-semantic
//!
//! Transactional decoding of CBOR (RFC 8949) semantic tags, plus a keyed hash for indexing
//! decoded keys without exposure to hash flooding.
//!
//! ## Design principles
//!
//! - **Reads are all-or-nothing.**
//!   Every semantic read ([`CborReader::read_date_time`], [`CborReader::read_unix_time_seconds`],
//!   [`CborReader::read_big_integer`], [`CborReader::read_decimal`]) checkpoints the cursor first
//!   and restores it on any failure, so a caller can retry the same bytes under another
//!   interpretation.
//! - **Dispatch is structural.**
//!   [`CborReader::peek_state`] reports the next item as a [`ReaderState`]; reconstructors match
//!   on it rather than trial-decoding.
//! - **The input is resident.**
//!   Truncation is a terminal [`ErrorCode::UnexpectedEof`], never a request for more bytes.
//!
//! ## Supported tags
//!
//! | Tag | Payload | Result |
//! |-----|---------|--------|
//! | 0 | RFC 3339 text string | [`time::OffsetDateTime`] keeping the written offset |
//! | 1 | integer or float seconds since the epoch | [`time::OffsetDateTime`] in UTC |
//! | 2, 3 | big-endian byte string magnitude | [`num_bigint::BigInt`] |
//! | 4 | `[exponent, mantissa]` | [`rust_decimal::Decimal`] |
//!
//! ## Conformance modes
//!
//! [`ConformanceMode`] fixes, for a reader's lifetime, which legal constructs are accepted. In
//! particular `Ctap2Canonical` rejects every tag with [`ErrorCode::TagsNotSupported`].
//!
//! ## Keyed hashing
//!
//! [`hash64`] / [`hash32`] hash bytes under a 64-bit key. [`default_seed`] draws a key once per
//! process from the OS secure random source; [`RandomKeyState`] plugs it into `HashMap`.
//!
//! ## Feature flags
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`ReaderOptions`], [`DecodeLimits`], and
//!   [`ConformanceMode`].
//! - `simdutf8`: enables SIMD-accelerated UTF-8 validation where supported.
//!
//! ## Example
//!
//! ```
//! use cbor_semantic::CborReader;
//! use rust_decimal::Decimal;
//!
//! // 4([-2, 12345])
//! let bytes = [0xc4, 0x82, 0x21, 0x19, 0x30, 0x39];
//! let mut reader = CborReader::new(&bytes);
//! assert_eq!(reader.read_decimal()?, Decimal::new(12345, 2));
//! # Ok::<(), cbor_semantic::CborError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod bignum;
mod checkpoint;
mod datetime;
mod decimal;
mod error;
mod float;
mod hash;
mod limits;
mod profile;
mod reader;
mod semantic;
mod state;
mod tag;
pub(crate) mod utf8;
mod wire;

pub use crate::checkpoint::Checkpoint;
pub use crate::decimal::MAX_DECIMAL_EXPONENT;
pub use crate::error::{CborError, ErrorCode, ErrorKind};
pub use crate::hash::{
    default_seed, hash32, hash64, hash64_default, try_default_seed, KeyedHasher, RandomKeyState,
};
pub use crate::limits::{
    DecodeLimits, ReaderOptions, DEFAULT_MAX_CONTAINER_LEN, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_STRING_LEN,
};
pub use crate::profile::{ConformanceMode, UnknownModeError};
pub use crate::reader::CborReader;
pub use crate::semantic::SemanticValue;
pub use crate::state::ReaderState;
pub use crate::tag::CborTag;
