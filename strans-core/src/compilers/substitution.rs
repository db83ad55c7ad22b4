//! substitution.rs - Compiles `s/pattern/replacement/flags`.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

use super::REGEX_SIZE_LIMIT;
use crate::errors::ParseError;
use crate::escapes::expand_replacement_template;
use crate::operation::{Operation, Substitution};

lazy_static! {
    static ref COUNT_DIGITS: Regex = Regex::new("[0-9]+").expect("static regex is valid");
}

/// Replacement cap used when neither `g` nor a count is given. Only the first
/// match is replaced.
pub const DEFAULT_LIMIT: usize = 1;

/// Matching options collected from a substitution's flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionFlags {
    pub ascii_only: bool,
    pub case_insensitive: bool,
    pub locale: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub extended: bool,
    /// `0` means unlimited.
    pub limit: usize,
}

impl SubstitutionFlags {
    /// Parses a flags string such as `gi` or `2m`.
    ///
    /// `g` wins over any count. Without either, the limit is [`DEFAULT_LIMIT`].
    pub fn parse(flags: &str) -> Result<Self, ParseError> {
        if let Some(bad) = flags
            .chars()
            .find(|c| !matches!(c, 'a' | 'i' | 'l' | 'm' | 's' | 'x' | 'g' | '0'..='9'))
        {
            return Err(ParseError::InvalidRegexFlag(bad));
        }

        let limit = if flags.contains('g') {
            0
        } else {
            COUNT_DIGITS
                .find(flags)
                // An absurdly long count is as good as unlimited.
                .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX))
                .unwrap_or(DEFAULT_LIMIT)
        };

        Ok(Self {
            ascii_only: flags.contains('a'),
            case_insensitive: flags.contains('i'),
            locale: flags.contains('l'),
            multi_line: flags.contains('m'),
            dot_matches_new_line: flags.contains('s'),
            extended: flags.contains('x'),
            limit,
        })
    }
}

const ASCII_WORD: &str = "[0-9A-Za-z_]";
const ASCII_NOT_WORD: &str = "[^0-9A-Za-z_]";
const ASCII_DIGIT: &str = "[0-9]";
const ASCII_NOT_DIGIT: &str = "[^0-9]";
const ASCII_SPACE: &str = r"[\t\n\x0B\x0C\r\x20]";
const ASCII_NOT_SPACE: &str = r"[^\t\n\x0B\x0C\r\x20]";

/// Rewrites the Perl classes `\w \d \s` (and their negations) plus the word
/// boundaries `\b \B` into ASCII-only forms, leaving every other escape alone.
///
/// Classes become bracket classes, which also nest inside `[...]`. Boundaries
/// are only rewritten outside brackets.
pub fn ascii_classes(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains('\\') {
        return Cow::Borrowed(pattern);
    }

    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                match next {
                    'w' => out.push_str(ASCII_WORD),
                    'W' => out.push_str(ASCII_NOT_WORD),
                    'd' => out.push_str(ASCII_DIGIT),
                    'D' => out.push_str(ASCII_NOT_DIGIT),
                    's' => out.push_str(ASCII_SPACE),
                    'S' => out.push_str(ASCII_NOT_SPACE),
                    'b' if depth == 0 => out.push_str(r"(?-u:\b)"),
                    'B' if depth == 0 => out.push_str(r"(?-u:\B)"),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            '[' => {
                depth += 1;
                out.push(c);
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                // A leading `]` is a literal member.
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if depth > 0 => {
                depth -= 1;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Compiles a substitution. Returns `Ok(None)` when both the pattern and the
/// replacement are empty.
pub fn compile_substitution(
    pattern: &str,
    replacement: &str,
    flags: &str,
) -> Result<Option<Operation>, ParseError> {
    let flags = SubstitutionFlags::parse(flags)?;
    if flags.locale {
        warn!("Flag 'l' has no effect: locale-dependent matching is not supported.");
    }

    let source = if flags.ascii_only {
        ascii_classes(pattern)
    } else {
        Cow::Borrowed(pattern)
    };
    let regex = RegexBuilder::new(&source)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_matches_new_line)
        .ignore_whitespace(flags.extended)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| ParseError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
    let template = expand_replacement_template(replacement, &regex)?;

    if pattern.is_empty() && replacement.is_empty() {
        debug!("Dropping empty substitution.");
        return Ok(None);
    }

    debug!(
        "Compiled substitution /{}/ -> {:?} with limit {}.",
        pattern, template, flags.limit
    );
    Ok(Some(Operation::Substitution(Substitution {
        regex,
        replacement: template,
        limit: flags.limit,
    })))
}
