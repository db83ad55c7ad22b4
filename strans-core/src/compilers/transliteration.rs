//! transliteration.rs - Compiles `y/charset/replset/flags` (alias `tr`).
//!
//! A transliteration becomes one of two operations. Without complement or
//! squash it is a plain [`Operation::DirectTable`]. Otherwise it needs a regex
//! that finds runs of matching characters, and becomes an
//! [`Operation::RegexTransliteration`].
//!
//! The table and the matching regex come from different places when the set is
//! complemented. The table keys are the smallest ordinals missing from the
//! expanded set. The regex is the negation of the literal set text.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::RegexBuilder;

use super::REGEX_SIZE_LIMIT;
use crate::charset::{complement_ordinals, expand_ordinals};
use crate::errors::ParseError;
use crate::escapes::unescape;
use crate::operation::{Operation, RegexTransliteration, Target, TranslationTable};

/// Flags accepted by a transliteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransliterationFlags {
    /// `c`: operate on the complement of the character set.
    pub complement: bool,
    /// `d`: delete characters that have no replacement.
    pub delete: bool,
    /// `s`: squash runs of identical output characters.
    pub squash: bool,
}

impl TransliterationFlags {
    pub fn parse(flags: &str) -> Result<Self, ParseError> {
        if let Some(bad) = flags.chars().find(|c| !matches!(c, 'c' | 'd' | 's')) {
            return Err(ParseError::InvalidTransliterationFlag(bad));
        }
        Ok(Self {
            complement: flags.contains('c'),
            delete: flags.contains('d'),
            squash: flags.contains('s'),
        })
    }
}

fn target_of(ordinal: u32) -> Target {
    // expand_ordinals rejects ranges through the surrogate block, so every
    // replacement ordinal is a scalar value.
    char::from_u32(ordinal).map_or(Target::Delete, Target::Char)
}

/// Builds the translation table from expanded (and possibly complemented)
/// ordinals.
fn build_table(char_a: &[u32], repl_a: &[u32], flags: TransliterationFlags) -> TranslationTable {
    let default = if flags.delete {
        Some(Target::Delete)
    } else {
        repl_a.last().copied().map(target_of)
    };

    // No replacement and no deletion: every character maps to itself.
    let repl_a = match default {
        Some(_) => repl_a,
        None => char_a,
    };

    let mut table = TranslationTable::new();
    if flags.complement {
        if let Some(fallback) = default {
            table = table.with_fallback(fallback);
        }
    }

    for (i, &ordinal) in char_a.iter().enumerate() {
        if table.contains(ordinal) {
            continue;
        }
        let target = repl_a.get(i).copied().map(target_of).or(default);
        if let Some(target) = target {
            table.insert_first(ordinal, target);
        }
    }
    table
}

/// Escapes the set text so it can sit inside a regex character class.
fn class_body(chars: &str) -> String {
    let mut body = String::with_capacity(chars.len());
    for c in chars.chars() {
        if matches!(c, '[' | ']' | '&' | '~') {
            body.push('\\');
        }
        body.push(c);
    }
    body
}

/// Compiles a transliteration. Returns `Ok(None)` when the character set is
/// empty and not complemented.
pub fn compile_transliteration(
    charset: &str,
    replset: &str,
    flags: &str,
) -> Result<Option<Operation>, ParseError> {
    let flags = TransliterationFlags::parse(flags)?;
    let chars = unescape(charset)?;
    let repl = unescape(replset)?;

    let mut char_a = expand_ordinals(&chars)?;
    let repl_a = expand_ordinals(&repl)?;
    if flags.complement {
        char_a = complement_ordinals(&char_a, repl_a.len());
    }

    let table = build_table(&char_a, &repl_a, flags);

    if !flags.complement {
        if chars.is_empty() {
            debug!("Dropping transliteration with an empty character set.");
            return Ok(None);
        }
        if !flags.squash {
            debug!("Compiled transliteration of {:?} as a direct table.", chars);
            return Ok(Some(Operation::DirectTable(table)));
        }
    }

    let pattern = match (flags.complement, chars.is_empty()) {
        (true, true) => "(?s).+".to_string(),
        (true, false) => format!("[^{}]+", class_body(&chars)),
        (false, _) => format!("[{}]+", class_body(&chars)),
    };
    let regex = RegexBuilder::new(&pattern)
        .dot_matches_new_line(flags.complement)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| ParseError::InvalidPattern { pattern, source })?;

    debug!(
        "Compiled transliteration of {:?} as runs of /{}/ (squash: {}).",
        chars,
        regex.as_str(),
        flags.squash
    );
    Ok(Some(Operation::RegexTransliteration(RegexTransliteration {
        regex,
        table,
        squash: flags.squash,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(charset: &str, replset: &str, flags: &str) -> Operation {
        compile_transliteration(charset, replset, flags)
            .unwrap()
            .expect("operation should not be a no-op")
    }

    #[test]
    fn test_flags() {
        let flags = TransliterationFlags::parse("cds").unwrap();
        assert!(flags.complement && flags.delete && flags.squash);
        assert!(matches!(
            TransliterationFlags::parse("cg"),
            Err(ParseError::InvalidTransliterationFlag('g'))
        ));
    }

    #[test]
    fn test_plain_mapping_uses_direct_table() {
        let op = compile("abc", "xyz", "");
        assert!(matches!(op, Operation::DirectTable(_)));
        assert_eq!(op.apply("aabbcc"), "xxyyzz");
    }

    #[test]
    fn test_short_replacement_repeats_last_character() {
        assert_eq!(compile("abc", "x", "").apply("abcd"), "xxxd");
    }

    #[test]
    fn test_delete_unmapped() {
        assert_eq!(compile("abc", "", "d").apply("abcdef"), "def");
        assert_eq!(compile("abc", "x", "d").apply("abcabc"), "xx");
    }

    #[test]
    fn test_empty_replacement_is_identity() {
        assert_eq!(compile("abc", "", "").apply("cab!"), "cab!");
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(compile("aa", "xy", "").apply("a"), "x");
    }

    #[test]
    fn test_ranges_and_escapes() {
        assert_eq!(compile("a-z", "A-Z", "").apply("Hello, World"), "HELLO, WORLD");
        assert_eq!(compile(r"\n", " ", "").apply("a\nb\n"), "a b ");
        assert_eq!(compile(r"\x41-\x43", "x", "").apply("ABCD"), "xxxD");
    }

    #[test]
    fn test_empty_charset_is_noop() {
        assert!(compile_transliteration("", "", "").unwrap().is_none());
        assert!(compile_transliteration("", "abc", "s").unwrap().is_none());
    }

    #[test]
    fn test_squash_forces_regex_path() {
        let op = compile("a-z", "", "s");
        assert!(matches!(op, Operation::RegexTransliteration(_)));
        assert_eq!(op.apply("aabbxx 11"), "abx 11");
    }

    #[test]
    fn test_squash_applies_after_mapping() {
        assert_eq!(compile("ab", "x", "s").apply("abab-b"), "x-x");
    }

    #[test]
    fn test_complement_squash_leaves_set_untouched() {
        let op = compile("a-z", "", "cs");
        assert!(matches!(op, Operation::RegexTransliteration(_)));
        assert_eq!(op.apply("aaa111bbb"), "aaa1bbb");
    }

    #[test]
    fn test_complement_with_replacement_uses_fallback() {
        assert_eq!(compile("a-z", "_", "c").apply("ab12c d"), "ab__c_d");
    }

    #[test]
    fn test_complement_delete() {
        assert_eq!(compile("a-z", "", "cd").apply("a1b2 c\n"), "abc");
    }

    #[test]
    fn test_complement_of_empty_set_matches_everything() {
        assert_eq!(compile("", "x", "c").apply("ab\ncd"), "xxxxx");
        assert_eq!(compile("", "", "cs").apply("aabb\n\n"), "ab\n");
    }

    #[test]
    fn test_complement_table_keys_are_low_ordinals() {
        let Operation::RegexTransliteration(tr) = compile("a-z", "xy", "c") else {
            panic!("expected a regex transliteration");
        };
        assert!(tr.table.contains(0) && tr.table.contains(1));
        assert_eq!(tr.table.lookup('\0'), Some(Target::Char('x')));
        assert_eq!(tr.table.lookup('\u{1}'), Some(Target::Char('y')));
        assert_eq!(tr.table.lookup('!'), Some(Target::Char('y')));
    }

    #[test]
    fn test_brackets_in_charset_are_literal() {
        assert_eq!(compile("[]", "()", "s").apply("[[x]]"), "(x)");
        assert_eq!(compile("&~", "-", "s").apply("a&&~b"), "a-b");
    }

    #[test]
    fn test_reversed_range() {
        assert!(matches!(
            compile_transliteration("c-a", "", ""),
            Err(ParseError::InvalidRange { .. })
        ));
        assert!(matches!(
            compile_transliteration("a", "z-x", ""),
            Err(ParseError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_replacement_range_through_surrogates() {
        match compile_transliteration("a", r"\ud7ff-\ue000", "") {
            Err(ParseError::InvalidRange { range }) => assert_eq!(range, "\u{d7ff}-\u{e000}"),
            other => panic!("expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_escape() {
        assert!(matches!(
            compile_transliteration(r"\x", "", ""),
            Err(ParseError::InvalidEscape { .. })
        ));
    }
}
