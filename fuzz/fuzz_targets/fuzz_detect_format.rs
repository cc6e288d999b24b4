#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the format sniffing rules without parsing.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = oas_compare::parsers::detect_format(s);
        let _ = oas_compare::parsers::looks_like_spec(s);
    }
});
