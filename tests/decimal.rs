use rust_decimal::Decimal;

use cbor_semantic::{
    CborReader, CborTag, ConformanceMode, DecodeLimits, ErrorCode, ErrorKind, ReaderOptions,
    SemanticValue,
};

fn read(bytes: &[u8]) -> Decimal {
    let mut r = CborReader::new(bytes);
    let v = r.read_decimal().unwrap();
    assert_eq!(r.bytes_remaining(), 0);
    assert_eq!(r.depth(), 0);
    v
}

fn read_err(bytes: &[u8]) -> ErrorCode {
    let mut r = CborReader::new(bytes);
    let err = r.read_decimal().unwrap_err();
    assert_eq!(r.position(), 0);
    assert_eq!(r.depth(), 0);
    assert!(!r.is_tag_context());
    err.code
}

#[test]
fn negative_exponent() {
    // 4([-2, 27315]) = 273.15
    assert_eq!(read(&[0xc4, 0x82, 0x21, 0x19, 0x6a, 0xb3]), Decimal::new(27315, 2));
    // 4([-2, 12345]) = 123.45
    assert_eq!(read(&[0xc4, 0x82, 0x21, 0x19, 0x30, 0x39]), Decimal::new(12345, 2));
}

#[test]
fn positive_exponent() {
    // 4([3, -7]) = -7000
    assert_eq!(read(&[0xc4, 0x82, 0x03, 0x26]), Decimal::new(-7000, 0));
}

#[test]
fn bignum_mantissa() {
    // 4([0, 3(h'00')]) = -1
    assert_eq!(read(&[0xc4, 0x82, 0x00, 0xc3, 0x41, 0x00]), Decimal::NEGATIVE_ONE);
    // 4([-1, 2(h'0100')]) = 25.6
    assert_eq!(read(&[0xc4, 0x82, 0x20, 0xc2, 0x42, 0x01, 0x00]), Decimal::new(256, 1));
}

#[test]
fn zero_mantissa_ignores_exponent() {
    // 4([1000, 0])
    assert_eq!(read(&[0xc4, 0x82, 0x19, 0x03, 0xe8, 0x00]), Decimal::ZERO);
    // 4([-1000, 0])
    assert_eq!(read(&[0xc4, 0x82, 0x39, 0x03, 0xe7, 0x00]), Decimal::ZERO);
}

#[test]
fn exponent_limits() {
    // 4([-28, 1]) is the smallest representable step
    assert_eq!(read(&[0xc4, 0x82, 0x38, 0x1b, 0x01]), Decimal::new(1, 28));
    // 4([-29, 1])
    assert_eq!(read_err(&[0xc4, 0x82, 0x38, 0x1c, 0x01]), ErrorCode::DecimalOverflow);
    // 4([29, 1])
    assert_eq!(read_err(&[0xc4, 0x82, 0x18, 0x1d, 0x01]), ErrorCode::DecimalOverflow);
    // 4([-(2^64), 1])
    let bytes = [0xc4, 0x82, 0x3b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
    assert_eq!(read_err(&bytes), ErrorCode::DecimalOverflow);
}

#[test]
fn mantissa_too_large() {
    // 4([0, 2(h'01' followed by 12 zero bytes)]) = 2^96
    let mut bytes = vec![0xc4, 0x82, 0x00, 0xc2, 0x4d, 0x01];
    bytes.extend_from_slice(&[0; 12]);
    assert_eq!(read_err(&bytes), ErrorCode::DecimalOverflow);

    // 2^96 - 1 fits exactly
    let mut bytes = vec![0xc4, 0x82, 0x00, 0xc2, 0x4c];
    bytes.extend_from_slice(&[0xff; 12]);
    assert_eq!(read(&bytes), Decimal::MAX);

    // 4([20, 2^64 - 1]) scales beyond 96 bits
    let bytes = [0xc4, 0x82, 0x14, 0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    let mut r = CborReader::new(&bytes);
    let err = r.read_decimal().unwrap_err();
    assert_eq!(err.code, ErrorCode::DecimalOverflow);
    assert_eq!(err.kind(), ErrorKind::Overflow);
    assert_eq!(err.offset, 1);
}

#[test]
fn bignum_wider_than_i128() {
    let mut bytes = vec![0xc4, 0x82, 0x00, 0xc2, 0x51, 0x01];
    bytes.extend_from_slice(&[0; 16]);
    assert_eq!(read_err(&bytes), ErrorCode::DecimalOverflow);
}

#[test]
fn wrong_array_length() {
    assert_eq!(read_err(&[0xc4, 0x81, 0x00]), ErrorCode::InvalidDecimalEncoding);
    assert_eq!(read_err(&[0xc4, 0x83, 0x00, 0x01, 0x02]), ErrorCode::InvalidDecimalEncoding);
    assert_eq!(read_err(&[0xc4, 0x80]), ErrorCode::InvalidDecimalEncoding);
    // indefinite-length array
    assert_eq!(read_err(&[0xc4, 0x9f, 0x00, 0x01, 0xff]), ErrorCode::InvalidDecimalEncoding);
}

#[test]
fn non_array_payload() {
    assert_eq!(read_err(&[0xc4, 0x01]), ErrorCode::InvalidDecimalEncoding);
    assert_eq!(read_err(&[0xc4, 0xa0]), ErrorCode::InvalidDecimalEncoding);
}

#[test]
fn non_integer_elements() {
    // 4([1.0, 1])
    assert_eq!(read_err(&[0xc4, 0x82, 0xf9, 0x3c, 0x00, 0x01]), ErrorCode::InvalidDecimalEncoding);
    // 4([0, "1"])
    assert_eq!(read_err(&[0xc4, 0x82, 0x00, 0x61, 0x31]), ErrorCode::InvalidDecimalEncoding);
}

#[test]
fn wrong_mantissa_tag() {
    // 4([0, 1(0)])
    let bytes = [0xc4, 0x82, 0x00, 0xc1, 0x00];
    let mut r = CborReader::new(&bytes);
    let err = r.read_decimal().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidDecimalEncoding);
    assert_eq!(err.offset, 3);
    assert_eq!(r.position(), 0);
}

#[test]
fn bad_bignum_mantissa_payload() {
    // 4([0, 2(0)])
    assert_eq!(read_err(&[0xc4, 0x82, 0x00, 0xc2, 0x00]), ErrorCode::InvalidBigIntegerEncoding);
}

#[test]
fn wrong_tag() {
    let bytes = [0xc5, 0x82, 0x00, 0x01];
    let mut r = CborReader::new(&bytes);
    let err = r.read_decimal().unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedTag);
    assert_eq!(r.peek_tag().unwrap(), CborTag::BIGFLOAT);
}

#[test]
fn inside_container() {
    // [4([-1, 5]), true]
    let bytes = [0x82, 0xc4, 0x82, 0x20, 0x05, 0xf5];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_start_array().unwrap(), Some(2));
    assert_eq!(r.read_decimal().unwrap(), Decimal::new(5, 1));
    assert_eq!(r.depth(), 1);
    assert!(r.read_boolean().unwrap());
    r.read_end_array().unwrap();
}

#[test]
fn failure_inside_container_restores_outer_frame() {
    // [4([99, 1]), 2]
    let bytes = [0x82, 0xc4, 0x82, 0x18, 0x63, 0x01, 0x02];
    let mut r = CborReader::new(&bytes);
    r.read_start_array().unwrap();
    assert_eq!(r.read_decimal().unwrap_err().code, ErrorCode::DecimalOverflow);
    assert_eq!(r.position(), 1);
    assert_eq!(r.depth(), 1);
    r.skip_value().unwrap();
    assert_eq!(r.read_uint64().unwrap(), 2);
    r.read_end_array().unwrap();
}

#[test]
fn semantic_dispatch() {
    let bytes = [0xc4, 0x82, 0x21, 0x19, 0x30, 0x39];
    let mut r = CborReader::new(&bytes);
    let v = r.read_semantic_value().unwrap();
    assert_eq!(v, SemanticValue::Decimal(Decimal::new(12345, 2)));
    assert_eq!(v.tag(), CborTag::DECIMAL_FRACTION);
}

#[test]
fn oversized_array_header_is_a_shape_error() {
    // 4([...1048576 items]) with nothing after the header
    let bytes = [0xc4, 0x9a, 0x00, 0x10, 0x00, 0x00];
    let mut r = CborReader::new(&bytes);
    let err = r.read_decimal().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidDecimalEncoding);
    assert_eq!(err.offset, 1);
    assert_eq!(r.position(), 0);
}

#[test]
fn array_limit_applies_to_well_shaped_payload() {
    let options = ReaderOptions {
        mode: ConformanceMode::Strict,
        limits: DecodeLimits {
            max_array_len: 1,
            ..DecodeLimits::default()
        },
    };
    let bytes = [0xc4, 0x82, 0x21, 0x19, 0x30, 0x39];
    let mut r = CborReader::with_options(&bytes, options);
    let err = r.read_decimal().unwrap_err();
    assert_eq!(err.code, ErrorCode::ArrayLenLimitExceeded);
    assert_eq!(r.position(), 0);
}
