use crate::profile::ConformanceMode;

/// Default maximum nesting depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default maximum container length limit for arrays/maps.
///
/// This is a safety limit; adjust explicitly for your deployment.
pub const DEFAULT_MAX_CONTAINER_LEN: usize = 1 << 16;

/// Default maximum string length (bytes), applied to both byte and text strings.
pub const DEFAULT_MAX_STRING_LEN: usize = 1 << 24;

/// Decode-time resource limits.
///
/// Limits are enforced deterministically and must not depend on background timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeLimits {
    /// Maximum container nesting depth.
    pub max_depth: usize,
    /// Maximum array length.
    pub max_array_len: usize,
    /// Maximum map length (pairs).
    pub max_map_len: usize,
    /// Maximum byte-string length, summed over chunks (also applies to bignum magnitudes).
    pub max_bytes_len: usize,
    /// Maximum text-string length in UTF-8 bytes, summed over chunks.
    pub max_text_len: usize,
}

impl DecodeLimits {
    /// Construct conservative limits derived from a maximum message size.
    ///
    /// - `max_bytes_len = max_text_len = max_message_bytes`
    /// - `max_array_len` and `max_map_len` are capped by `DEFAULT_MAX_CONTAINER_LEN`
    #[must_use]
    pub fn for_bytes(max_message_bytes: usize) -> Self {
        let max_container_len = max_message_bytes.min(DEFAULT_MAX_CONTAINER_LEN);
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_array_len: max_container_len,
            max_map_len: max_container_len,
            max_bytes_len: max_message_bytes,
            max_text_len: max_message_bytes,
        }
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_array_len: DEFAULT_MAX_CONTAINER_LEN,
            max_map_len: DEFAULT_MAX_CONTAINER_LEN,
            max_bytes_len: DEFAULT_MAX_STRING_LEN,
            max_text_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}

/// Reader configuration: a conformance mode plus resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    /// Conformance mode for the reader's lifetime.
    pub mode: ConformanceMode,
    /// Resource limits.
    pub limits: DecodeLimits,
}

impl ReaderOptions {
    /// Options with `mode` and default limits.
    #[must_use]
    pub fn with_mode(mode: ConformanceMode) -> Self {
        Self {
            mode,
            limits: DecodeLimits::default(),
        }
    }

    /// Options with `mode` and limits derived from `input_len`.
    #[must_use]
    pub fn for_input(mode: ConformanceMode, input_len: usize) -> Self {
        Self {
            mode,
            limits: DecodeLimits::for_bytes(input_len),
        }
    }
}
