use cbor_semantic::{
    CborReader, ConformanceMode, DecodeLimits, ErrorCode, ErrorKind, ReaderOptions, ReaderState,
};

#[test]
fn integers() {
    let bytes = [0x00, 0x17, 0x18, 0x18, 0x19, 0x01, 0x00, 0x20, 0x38, 0x63];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_uint64().unwrap(), 0);
    assert_eq!(r.read_uint64().unwrap(), 23);
    assert_eq!(r.read_uint64().unwrap(), 24);
    assert_eq!(r.read_int64().unwrap(), 256);
    assert_eq!(r.peek_state().unwrap(), ReaderState::NegativeInteger);
    assert_eq!(r.read_int64().unwrap(), -1);
    assert_eq!(r.read_int64().unwrap(), -100);
    assert_eq!(r.peek_state().unwrap(), ReaderState::Finished);
}

#[test]
fn int64_overflow_does_not_advance() {
    // -(2^64)
    let bytes = [0x3b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    let mut r = CborReader::new(&bytes);
    let err = r.read_int64().unwrap_err();
    assert_eq!(err.code, ErrorCode::IntegerOverflow);
    assert_eq!(r.position(), 0);
    assert_eq!(r.read_int128().unwrap(), -(1i128 << 64));
}

#[test]
fn uint64_rejects_negative() {
    let bytes = [0x20];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_uint64().unwrap_err().code, ErrorCode::ExpectedInteger);
}

#[test]
fn floats() {
    let mut bytes = vec![0xf9, 0x3c, 0x00, 0xf9, 0x00, 0x01, 0xf9, 0xc4, 0x00, 0xfa];
    bytes.extend_from_slice(&0.5f32.to_be_bytes());
    bytes.push(0xfb);
    bytes.extend_from_slice(&1.1f64.to_be_bytes());
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.peek_state().unwrap(), ReaderState::HalfPrecisionFloat);
    assert_eq!(r.read_double().unwrap().to_bits(), 1.0f64.to_bits());
    assert_eq!(r.read_double().unwrap().to_bits(), 5.960_464_477_539_063e-8f64.to_bits());
    assert_eq!(r.read_double().unwrap().to_bits(), (-4.0f64).to_bits());
    assert_eq!(r.peek_state().unwrap(), ReaderState::SinglePrecisionFloat);
    assert_eq!(r.read_double().unwrap().to_bits(), 0.5f64.to_bits());
    assert_eq!(r.peek_state().unwrap(), ReaderState::DoublePrecisionFloat);
    assert_eq!(r.read_double().unwrap().to_bits(), 1.1f64.to_bits());
}

#[test]
fn half_float_specials() {
    let bytes = [0xf9, 0x7c, 0x00, 0xf9, 0xfc, 0x00, 0xf9, 0x7e, 0x00, 0xf9, 0x80, 0x00];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_double().unwrap(), f64::INFINITY);
    assert_eq!(r.read_double().unwrap(), f64::NEG_INFINITY);
    assert!(r.read_double().unwrap().is_nan());
    let neg_zero = r.read_double().unwrap();
    assert!(neg_zero == 0.0 && neg_zero.is_sign_negative());
}

#[test]
fn simple_values() {
    let bytes = [0xf4, 0xf5, 0xf6, 0xf7, 0xf0];
    let mut r = CborReader::new(&bytes);
    assert!(!r.read_boolean().unwrap());
    assert!(r.read_boolean().unwrap());
    assert_eq!(r.read_boolean().unwrap_err().code, ErrorCode::ExpectedBool);
    r.read_null().unwrap();
    assert_eq!(r.peek_state().unwrap(), ReaderState::Undefined);
    assert_eq!(r.read_null().unwrap_err().code, ErrorCode::ExpectedNull);
    r.skip_value().unwrap();
    assert_eq!(r.peek_state().unwrap(), ReaderState::SimpleValue);
    assert_eq!(r.read_double().unwrap_err().code, ErrorCode::ExpectedFloat);
}

#[test]
fn reserved_additional_info() {
    let bytes = [0xfc];
    let r = CborReader::new(&bytes);
    let err = r.peek_state().unwrap_err();
    assert_eq!(err.code, ErrorCode::ReservedAdditionalInfo);
    assert_eq!(err.kind(), ErrorKind::Malformed);

    let bytes = [0x1c];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_uint64().unwrap_err().code, ErrorCode::ReservedAdditionalInfo);
}

#[test]
fn strings() {
    let bytes = [0x43, 1, 2, 3, 0x63, b'a', b'b', b'c', 0x40, 0x60];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_byte_string().unwrap(), vec![1, 2, 3]);
    assert_eq!(r.read_text_string().unwrap(), "abc");
    assert_eq!(r.read_byte_string().unwrap(), Vec::<u8>::new());
    assert_eq!(r.read_text_string().unwrap(), "");
}

#[test]
fn indefinite_strings() {
    let bytes = [0x7f, 0x62, b'h', b'e', 0x60, 0x63, b'l', b'l', b'o', 0xff];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.peek_state().unwrap(), ReaderState::StartIndefiniteLengthTextString);
    assert_eq!(r.read_text_string().unwrap(), "hello");
    assert_eq!(r.bytes_remaining(), 0);
}

#[test]
fn indefinite_string_mixed_chunk() {
    let bytes = [0x5f, 0x41, 0x01, 0x61, b'x', 0xff];
    let mut r = CborReader::new(&bytes);
    let err = r.read_byte_string().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidIndefiniteChunk);
    assert_eq!(err.offset, 3);
    assert_eq!(r.position(), 0);

    let nested = [0x5f, 0x5f, 0xff, 0xff];
    let mut r = CborReader::new(&nested);
    assert_eq!(r.read_byte_string().unwrap_err().code, ErrorCode::InvalidIndefiniteChunk);
}

#[test]
fn utf8_policy_by_mode() {
    let bytes = [0x62, 0xc3, 0x28];
    let mut strict = CborReader::new(&bytes);
    let err = strict.read_text_string().unwrap_err();
    assert_eq!(err.code, ErrorCode::Utf8Invalid);
    assert_eq!(strict.position(), 0);

    let mut lax = CborReader::with_mode(&bytes, ConformanceMode::Lax);
    assert_eq!(lax.read_text_string().unwrap(), "\u{fffd}(");
}

#[test]
fn utf8_is_validated_per_chunk() {
    // "é" split across two chunks
    let bytes = [0x7f, 0x61, 0xc3, 0x61, 0xa9, 0xff];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_text_string().unwrap_err().code, ErrorCode::Utf8Invalid);
}

#[test]
fn canonical_mode_rules() {
    let long_int = [0x18, 0x05];
    let mut r = CborReader::with_mode(&long_int, ConformanceMode::Canonical);
    let err = r.read_uint64().unwrap_err();
    assert_eq!(err.code, ErrorCode::NonCanonicalEncoding);
    assert_eq!(err.kind(), ErrorKind::Conformance);
    let mut r = CborReader::with_mode(&long_int, ConformanceMode::Strict);
    assert_eq!(r.read_uint64().unwrap(), 5);

    let indefinite = [0x9f, 0xff];
    let mut r = CborReader::with_mode(&indefinite, ConformanceMode::Canonical);
    assert_eq!(
        r.read_start_array().unwrap_err().code,
        ErrorCode::IndefiniteLengthForbidden
    );
    let mut r = CborReader::with_mode(&indefinite, ConformanceMode::Strict);
    assert_eq!(r.read_start_array().unwrap(), None);
    r.read_end_array().unwrap();
}

#[test]
fn arrays_and_maps() {
    // {"a": [1, 2], "b": {_ }}
    let bytes = [0xa2, 0x61, b'a', 0x82, 0x01, 0x02, 0x61, b'b', 0xbf, 0xff];
    let mut r = CborReader::new(&bytes);
    assert_eq!(r.read_start_map().unwrap(), Some(2));
    assert_eq!(r.read_text_string().unwrap(), "a");
    assert_eq!(r.read_start_array().unwrap(), Some(2));
    assert_eq!(r.depth(), 2);
    assert_eq!(r.read_uint64().unwrap(), 1);
    assert_eq!(r.read_end_array().unwrap_err().code, ErrorCode::NotAtEndOfContainer);
    assert_eq!(r.read_uint64().unwrap(), 2);
    assert_eq!(r.peek_state().unwrap(), ReaderState::EndArray);
    assert_eq!(r.read_uint64().unwrap_err().code, ErrorCode::UnexpectedEndOfContainer);
    r.read_end_array().unwrap();
    assert_eq!(r.read_text_string().unwrap(), "b");
    assert_eq!(r.read_start_map().unwrap(), None);
    assert_eq!(r.peek_state().unwrap(), ReaderState::EndMap);
    assert_eq!(r.read_end_array().unwrap_err().code, ErrorCode::NotAtEndOfContainer);
    r.read_end_map().unwrap();
    assert_eq!(r.peek_state().unwrap(), ReaderState::EndMap);
    r.read_end_map().unwrap();
    assert_eq!(r.depth(), 0);
    assert_eq!(r.peek_state().unwrap(), ReaderState::Finished);
}

#[test]
fn odd_break_in_indefinite_map() {
    let bytes = [0xbf, 0x01, 0xff];
    let mut r = CborReader::new(&bytes);
    r.read_start_map().unwrap();
    r.read_uint64().unwrap();
    assert_eq!(r.peek_state().unwrap_err().code, ErrorCode::UnexpectedBreak);
    assert_eq!(r.read_end_map().unwrap_err().code, ErrorCode::NotAtEndOfContainer);
}

#[test]
fn stray_break() {
    let bytes = [0xff];
    let r = CborReader::new(&bytes);
    assert_eq!(r.peek_state().unwrap_err().code, ErrorCode::UnexpectedBreak);
}

#[test]
fn top_level_sequence() {
    let bytes = [0x01, 0x61, b'x', 0xf6];
    let mut r = CborReader::new(&bytes);
    let mut count = 0;
    while r.peek_state().unwrap() != ReaderState::Finished {
        r.skip_value().unwrap();
        count += 1;
    }
    assert_eq!(count, 3);
    assert_eq!(r.skip_value().unwrap_err().code, ErrorCode::UnexpectedEndOfContainer);
}

#[test]
fn depth_limit() {
    let bytes = [0x81, 0x81, 0x81, 0x00];
    let limits = DecodeLimits {
        max_depth: 2,
        ..DecodeLimits::default()
    };
    let options = ReaderOptions {
        mode: ConformanceMode::Strict,
        limits,
    };
    let mut r = CborReader::with_options(&bytes, options);
    r.read_start_array().unwrap();
    r.read_start_array().unwrap();
    let err = r.read_start_array().unwrap_err();
    assert_eq!(err.code, ErrorCode::DepthLimitExceeded);
    assert_eq!(err.offset, 2);
    assert_eq!(r.depth(), 2);

    let mut r = CborReader::with_options(&bytes, options);
    assert_eq!(r.skip_value().unwrap_err().code, ErrorCode::DepthLimitExceeded);
    assert_eq!(r.position(), 0);
}

#[test]
fn length_limits() {
    let options = ReaderOptions::for_input(ConformanceMode::Strict, 2);
    let bytes = [0x43, 1, 2, 3];
    let mut r = CborReader::with_options(&bytes, options);
    assert_eq!(r.read_byte_string().unwrap_err().code, ErrorCode::BytesLenLimitExceeded);

    let bytes = [0x7f, 0x62, b'a', b'b', 0x61, b'c', 0xff];
    let mut r = CborReader::with_options(&bytes, options);
    let err = r.read_text_string().unwrap_err();
    assert_eq!(err.code, ErrorCode::TextLenLimitExceeded);
    assert_eq!(err.offset, 4);

    let bytes = [0x83, 0, 0, 0];
    let mut r = CborReader::with_options(&bytes, options);
    assert_eq!(r.read_start_array().unwrap_err().code, ErrorCode::ArrayLenLimitExceeded);

    let bytes = [0xa3, 0, 0, 0, 0, 0, 0];
    let mut r = CborReader::with_options(&bytes, options);
    assert_eq!(r.read_start_map().unwrap_err().code, ErrorCode::MapLenLimitExceeded);
}

#[test]
fn skip_nested_value() {
    // [1, {"k": 4([-1, 5])}, h'00'], 9
    let bytes = [
        0x83, 0x01, 0xa1, 0x61, b'k', 0xc4, 0x82, 0x20, 0x05, 0x41, 0x00, 0x09,
    ];
    let mut r = CborReader::new(&bytes);
    r.skip_value().unwrap();
    assert_eq!(r.position(), 11);
    assert_eq!(r.depth(), 0);
    assert_eq!(r.read_uint64().unwrap(), 9);
}

#[test]
fn skip_truncated_value_rolls_back() {
    let bytes = [0x82, 0x01];
    let mut r = CborReader::new(&bytes);
    let err = r.skip_value().unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
    assert_eq!(err.offset, 2);
    assert_eq!(r.position(), 0);
    assert_eq!(r.depth(), 0);
}

#[test]
fn truncation() {
    let cases: &[&[u8]] = &[&[0x19, 0x01], &[0x62, b'a'], &[0xfb, 0, 0], &[0x7f, 0x61]];
    for bytes in cases {
        let mut r = CborReader::with_mode(bytes, ConformanceMode::Lax);
        let err = r.skip_value().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedEof, "{bytes:02x?}");
        assert_eq!(r.position(), 0);
    }
}

#[test]
fn accessors() {
    let bytes = [0x01, 0x02];
    let mut r = CborReader::with_mode(&bytes, ConformanceMode::Canonical);
    assert_eq!(r.mode(), ConformanceMode::Canonical);
    assert_eq!(r.options().limits, DecodeLimits::default());
    r.read_uint64().unwrap();
    assert_eq!(r.remaining_bytes(), &[0x02]);
    assert_eq!(r.bytes_remaining(), 1);
}

#[test]
fn mode_parsing() {
    assert_eq!("ctap2".parse::<ConformanceMode>().unwrap(), ConformanceMode::Ctap2Canonical);
    assert_eq!("lax".parse::<ConformanceMode>().unwrap(), ConformanceMode::Lax);
    assert!("loose".parse::<ConformanceMode>().is_err());
    assert_eq!(ConformanceMode::Canonical.to_string(), "canonical");
    assert_eq!(ConformanceMode::default(), ConformanceMode::Strict);
}
