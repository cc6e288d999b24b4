#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the specification parsing entry point.
///
/// Feeds arbitrary UTF-8 strings to `parse_spec_str`, covering format
/// detection, both parsers and path/model extraction.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = oas_compare::parsers::parse_spec_str(s);
    }
});
