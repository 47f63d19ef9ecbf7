/// Widen an IEEE-754 binary16 bit pattern to `f64` (RFC 8949 Appendix D).
///
/// The conversion is exact: every half-precision value, including subnormals, infinities and
/// NaN, has an `f64` counterpart.
pub fn f16_bits_to_f64(bits: u16) -> f64 {
    let exp = (bits >> 10) & 0x1f;
    let mant = f64::from(bits & 0x03ff);
    let magnitude = match exp {
        0 => mant * 2f64.powi(-24),
        31 => {
            if bits & 0x03ff == 0 {
                f64::INFINITY
            } else {
                f64::NAN
            }
        }
        _ => (1.0 + mant / 1024.0) * 2f64.powi(i32::from(exp) - 15),
    };
    if bits & 0x8000 == 0 {
        magnitude
    } else {
        -magnitude
    }
}
