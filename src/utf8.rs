/// Borrow `chunk` as `&str` if it is well-formed UTF-8.
///
/// Indefinite-length text is validated one chunk at a time, so a code point split across chunk
/// boundaries is rejected here.
#[inline]
pub fn to_str(chunk: &[u8]) -> Option<&str> {
    #[cfg(feature = "simdutf8")]
    let checked = simdutf8::basic::from_utf8(chunk).ok();
    #[cfg(not(feature = "simdutf8"))]
    let checked = core::str::from_utf8(chunk).ok();
    checked
}
