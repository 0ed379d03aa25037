//! Sort key extraction from filenames
//!
//! Scanners name their output `Image (1).jpg`, `Image (2).jpg`, ... and a plain
//! lexical sort puts `(10)` before `(2)`. The number in parentheses is pulled out
//! and used as the page order instead.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_PAREN_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([0-9]+)\)").unwrap());

/// Extract the number from the first parenthesized group of digits in a filename
///
/// - `"Image (7).jpg"` → 7
/// - `"scan.png"` → 0 (no match is not an error)
/// - `"page (3) copy (9).png"` → 3 (only the first group counts)
///
/// Numbers too large for a `u64` saturate to `u64::MAX` so they still sort last.
pub fn extract_sort_key(name: &str) -> u64 {
    match RE_PAREN_NUMBER.captures(name).and_then(|caps| caps.get(1)) {
        Some(digits) => digits.as_str().parse().unwrap_or(u64::MAX),
        None => 0,
    }
}
