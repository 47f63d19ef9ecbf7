#![no_main]

use libfuzzer_sys::fuzz_target;

use cbor_semantic::{CborReader, ConformanceMode, ReaderOptions, ReaderState};

fuzz_target!(|data: &[u8]| {
    let options = ReaderOptions::for_input(ConformanceMode::Lax, data.len());
    let mut r = CborReader::with_options(data, options);
    while let Ok(state) = r.peek_state() {
        if state == ReaderState::Finished {
            break;
        }
        let at = r.position();
        if r.skip_value().is_err() {
            assert_eq!(r.position(), at);
            break;
        }
        assert!(r.position() > at);
    }
});
