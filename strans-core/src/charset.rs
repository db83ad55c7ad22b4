//! Character-set helpers used by the transliteration compiler.
//!
//! These operate on plain code point ordinals (`u32`) rather than `char`, since
//! a complemented set is computed numerically and is not restricted to any
//! particular character range.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use crate::errors::ParseError;

const SURROGATE_FIRST: u32 = 0xD800;
const SURROGATE_LAST: u32 = 0xDFFF;

/// Expands a character-set specification into an ordered list of ordinals.
///
/// `X-Y` denotes every code point from `X` to `Y` inclusive. Any other character
/// stands for itself. Duplicates are kept, in order of appearance.
///
/// # Errors
///
/// Returns [`ParseError::InvalidRange`] when a range runs backwards, e.g. `c-a`,
/// or spans the surrogate block `U+D800..=U+DFFF`, which holds no characters.
pub fn expand_ordinals(spec: &str) -> Result<Vec<u32>, ParseError> {
    let chars: Vec<char> = spec.chars().collect();
    let mut ordinals = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == '-' {
            let (start, end) = (chars[i] as u32, chars[i + 2] as u32);
            if start > end || (start <= SURROGATE_LAST && end >= SURROGATE_FIRST) {
                return Err(ParseError::InvalidRange {
                    range: chars[i..i + 3].iter().collect(),
                });
            }
            ordinals.extend(start..=end);
            i += 3;
        } else {
            ordinals.push(chars[i] as u32);
            i += 1;
        }
    }
    Ok(ordinals)
}

/// Returns the `length` smallest non-negative ordinals that are not in `excluded`,
/// in ascending order.
///
/// A `length` of zero always yields an empty list. Low control code points are
/// fair game here; nothing restricts the result to printable characters.
pub fn complement_ordinals(excluded: &[u32], length: usize) -> Vec<u32> {
    let excluded: HashSet<u32> = excluded.iter().copied().collect();
    (0u32..)
        .filter(|ordinal| !excluded.contains(ordinal))
        .take(length)
        .collect()
}

/// Collapses every run of two or more identical consecutive characters into a
/// single occurrence.
pub fn squash_runs(text: &str) -> String {
    let mut squashed = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if previous != Some(c) {
            squashed.push(c);
        }
        previous = Some(c);
    }
    squashed
}
