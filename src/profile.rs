//! Conformance modes.
//!
//! A reader is **conformant** for a mode iff every item it accepts satisfies that mode's rules.
//! The modes are strictly nested; each one accepts a subset of the one above it:
//!
//! - `Lax`: any well-formed RFC 8949 item. Invalid UTF-8 in text strings is replaced with
//!   `U+FFFD` rather than rejected.
//! - `Strict`: text strings must be valid UTF-8.
//! - `Canonical`: additionally, integer and length arguments must use the shortest form and
//!   indefinite-length items are forbidden.
//! - `Ctap2Canonical`: additionally, tags (major type 6) are forbidden.
//!
//! The mode is fixed at reader construction and never changes, including across
//! checkpoint restores.

use core::fmt;
use core::str::FromStr;

/// Policy restricting which otherwise-legal constructs a reader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConformanceMode {
    /// Accept any well-formed CBOR.
    Lax,
    /// Require valid UTF-8 text.
    #[default]
    Strict,
    /// Require shortest-form arguments and definite lengths.
    Canonical,
    /// Canonical, and forbid tags.
    Ctap2Canonical,
}

impl ConformanceMode {
    /// Returns true iff tags may appear in the input.
    #[inline]
    #[must_use]
    pub const fn allows_tags(self) -> bool {
        !matches!(self, Self::Ctap2Canonical)
    }

    /// Returns true iff integer and length arguments must be shortest-form.
    #[inline]
    #[must_use]
    pub const fn requires_canonical_integers(self) -> bool {
        matches!(self, Self::Canonical | Self::Ctap2Canonical)
    }

    /// Returns true iff indefinite-length strings and containers are rejected.
    #[inline]
    #[must_use]
    pub const fn requires_definite_lengths(self) -> bool {
        matches!(self, Self::Canonical | Self::Ctap2Canonical)
    }

    /// Returns true iff invalid UTF-8 text is an error instead of being replaced.
    #[inline]
    #[must_use]
    pub const fn requires_utf8_validation(self) -> bool {
        !matches!(self, Self::Lax)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "lax",
            Self::Strict => "strict",
            Self::Canonical => "canonical",
            Self::Ctap2Canonical => "ctap2_canonical",
        }
    }
}

impl fmt::Display for ConformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown conformance mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError(());

impl fmt::Display for UnknownModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown conformance mode (expected lax, strict, canonical, or ctap2_canonical)")
    }
}

impl std::error::Error for UnknownModeError {}

impl FromStr for ConformanceMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lax" => Ok(Self::Lax),
            "strict" => Ok(Self::Strict),
            "canonical" => Ok(Self::Canonical),
            "ctap2_canonical" | "ctap2" => Ok(Self::Ctap2Canonical),
            _ => Err(UnknownModeError(())),
        }
    }
}

/// Returns true iff `v` decoded from additional info `ai` used the shortest possible form.
#[inline]
pub const fn is_shortest_argument(ai: u8, v: u64) -> bool {
    match ai {
        24 => v >= 24,
        25 => v > 0xff,
        26 => v > 0xffff,
        27 => v > 0xffff_ffff,
        _ => true,
    }
}
