#![no_main]

use libfuzzer_sys::fuzz_target;

use cbor_semantic::{CborReader, ConformanceMode, ReaderOptions};

fuzz_target!(|data: &[u8]| {
    let Some((&mode, data)) = data.split_first() else {
        return;
    };
    let mode = match mode % 4 {
        0 => ConformanceMode::Lax,
        1 => ConformanceMode::Strict,
        2 => ConformanceMode::Canonical,
        _ => ConformanceMode::Ctap2Canonical,
    };
    let options = ReaderOptions::for_input(mode, data.len());

    let mut r = CborReader::with_options(data, options);
    let before = r.create_checkpoint();
    if r.read_date_time().is_err() {
        assert_eq!(r.create_checkpoint(), before);
    }
    let mut r = CborReader::with_options(data, options);
    if r.read_unix_time_seconds().is_err() {
        assert_eq!(r.create_checkpoint(), before);
    }
    let mut r = CborReader::with_options(data, options);
    if r.read_big_integer().is_err() {
        assert_eq!(r.create_checkpoint(), before);
    }
    let mut r = CborReader::with_options(data, options);
    if r.read_decimal().is_err() {
        assert_eq!(r.create_checkpoint(), before);
    }
    let mut r = CborReader::with_options(data, options);
    if r.read_semantic_value().is_err() {
        assert_eq!(r.create_checkpoint(), before);
    }
});
