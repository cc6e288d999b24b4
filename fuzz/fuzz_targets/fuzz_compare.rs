#![no_main]
use libfuzzer_sys::fuzz_target;
use oas_compare::{compare, SpecFile};

/// Fuzz a full comparison. The input is split at the first NUL byte into
/// base and target texts.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (base, target) = s.split_once('\0').unwrap_or((s, ""));
    let result = compare(&SpecFile::new("base", base), &SpecFile::new("target", target));
    assert!(result.success || result.changes.is_empty());
});
