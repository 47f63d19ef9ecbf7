//! Date/time reconstruction (tags 0 and 1).

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::reader::CborReader;
use crate::tag::CborTag;
use crate::{CborError, ErrorCode};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

impl CborReader<'_> {
    /// Read a tag 0 RFC 3339 date/time string.
    ///
    /// The payload may be a definite or indefinite-length text string. The UTC offset written in
    /// the string is preserved in the result.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedTag`/`UnexpectedTag` if the next item is not tag 0, and
    /// `InvalidDateTimeEncoding` if the payload is not a text string or does not parse. On any
    /// error the cursor is left before the tag.
    pub fn read_date_time(&mut self) -> Result<OffsetDateTime, CborError> {
        self.transaction(|r| {
            r.read_expected_tag(CborTag::DATE_TIME_STRING)?;
            let off = r.position();
            if !r.peek_state()?.is_text() {
                return Err(CborError::new(ErrorCode::InvalidDateTimeEncoding, off));
            }
            let text = r.read_text_string()?;
            OffsetDateTime::parse(&text, &Rfc3339)
                .map_err(|_| CborError::new(ErrorCode::InvalidDateTimeEncoding, off))
        })
    }

    /// Read a tag 1 epoch timestamp (seconds since 1970-01-01T00:00Z, offset UTC).
    ///
    /// Integer payloads are whole seconds. Float payloads of any precision may carry a fraction,
    /// which is kept to nanosecond resolution.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedTag`/`UnexpectedTag` if the next item is not tag 1,
    /// `InvalidUnixTimeEncoding` for NaN, infinities, or a non-numeric payload, and
    /// `UnixTimeOutOfRange` if the instant is not representable. On any error the cursor is left
    /// before the tag.
    pub fn read_unix_time_seconds(&mut self) -> Result<OffsetDateTime, CborError> {
        self.transaction(|r| {
            r.read_expected_tag(CborTag::UNIX_TIME_SECONDS)?;
            let off = r.position();
            let state = r.peek_state()?;
            if state.is_integer() {
                let seconds = r.read_int64()?;
                return OffsetDateTime::from_unix_timestamp(seconds)
                    .map_err(|_| CborError::new(ErrorCode::UnixTimeOutOfRange, off));
            }
            if state.is_float() {
                let seconds = r.read_double()?;
                if !seconds.is_finite() {
                    return Err(CborError::new(ErrorCode::InvalidUnixTimeEncoding, off));
                }
                return from_fractional_seconds(seconds)
                    .ok_or_else(|| CborError::new(ErrorCode::UnixTimeOutOfRange, off));
            }
            Err(CborError::new(ErrorCode::InvalidUnixTimeEncoding, off))
        })
    }
}

/// Split `seconds` into whole seconds and a nanosecond fraction so large timestamps keep their
/// sub-second precision.
#[allow(clippy::cast_possible_truncation)]
fn from_fractional_seconds(seconds: f64) -> Option<OffsetDateTime> {
    let whole = seconds.trunc();
    // Anything beyond i64 seconds is far outside the OffsetDateTime range.
    if !(-9.2e18..=9.2e18).contains(&whole) {
        return None;
    }
    let nanos = ((seconds - whole) * NANOS_PER_SECOND).round() as i64;
    OffsetDateTime::from_unix_timestamp(whole as i64)
        .ok()?
        .checked_add(Duration::nanoseconds(nanos))
}
