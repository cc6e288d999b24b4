//! Source-text hashing for the identical-document short circuit.

use xxhash_rust::xxh3::xxh3_64;

/// Hash the raw text of a specification document.
#[must_use]
pub fn content_hash(text: &str) -> u64 {
    xxh3_64(text.as_bytes())
}

/// Whether two document hashes prove identical content.
///
/// A zero hash means "not computed" and never matches.
#[must_use]
pub const fn hashes_match(base: u64, target: u64) -> bool {
    base != 0 && base == target
}
