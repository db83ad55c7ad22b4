//! Backslash-escape handling for operator operands.
//!
//! Transliteration operands go through [`unescape`], the usual string-literal
//! escape decoding. Substitution replacements go through
//! [`expand_replacement_template`], which rewrites `\1` / `\g<name>` style group
//! references into the `${1}` / `${name}` syntax the regex crate expects.
//!
//! License: MIT OR APACHE 2.0

use regex::Regex;

use crate::errors::ParseError;

fn invalid(text: &str, position: usize, reason: &'static str) -> ParseError {
    ParseError::InvalidEscape {
        text: text.to_string(),
        position,
        reason,
    }
}

/// Reads exactly `count` hex digits starting at `start`.
fn read_hex(chars: &[char], start: usize, count: usize) -> Option<u32> {
    let digits = chars.get(start..start + count)?;
    digits
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}

/// Reads up to `max` octal digits starting at `start`. Returns the value and the
/// number of digits consumed.
fn read_octal(chars: &[char], start: usize, max: usize) -> (u32, usize) {
    let mut value = 0;
    let mut used = 0;
    while used < max {
        match chars.get(start + used).and_then(|c| c.to_digit(8)) {
            Some(d) => {
                value = value * 8 + d;
                used += 1;
            }
            None => break,
        }
    }
    (value, used)
}

fn control_escape(c: char) -> Option<char> {
    match c {
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0c'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        _ => None,
    }
}

/// Decodes backslash escapes in `text`.
///
/// Recognised: `\\ \' \"`, the control escapes `\a \b \f \n \r \t \v`, octal
/// `\o` to `\ooo`, `\xhh`, `\uhhhh`, `\Uhhhhhhhh`, and backslash-newline (removed).
/// Unknown escapes are kept as written, backslash included.
///
/// # Errors
///
/// [`ParseError::InvalidEscape`] for a trailing backslash, a truncated hex escape,
/// a value that is not a Unicode scalar, or a named `\N{...}` escape.
pub fn unescape(text: &str) -> Result<String, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        let Some(&next) = chars.get(i + 1) else {
            return Err(invalid(text, start, "\\ at end of string"));
        };
        i += 2;

        match next {
            '\n' => {}
            '\\' | '\'' | '"' => out.push(next),
            '0'..='7' => {
                let (value, used) = read_octal(&chars, i - 1, 3);
                i += used - 1;
                // At most 0o777, always a scalar value.
                out.extend(char::from_u32(value));
            }
            'x' | 'u' | 'U' => {
                let (count, reason) = match next {
                    'x' => (2, "truncated \\xXX escape"),
                    'u' => (4, "truncated \\uXXXX escape"),
                    _ => (8, "truncated \\UXXXXXXXX escape"),
                };
                let value = read_hex(&chars, i, count).ok_or_else(|| invalid(text, start, reason))?;
                let c = char::from_u32(value)
                    .ok_or_else(|| invalid(text, start, "illegal Unicode character"))?;
                out.push(c);
                i += count;
            }
            'N' => return Err(invalid(text, start, "named Unicode escapes are not supported")),
            other => match control_escape(other) {
                Some(c) => out.push(c),
                None => {
                    out.push('\\');
                    out.push(other);
                }
            },
        }
    }
    Ok(out)
}

/// Whether `regex` has a group with this number or name.
fn has_group(regex: &Regex, group: &str) -> bool {
    match group.parse::<usize>() {
        Ok(index) => index < regex.captures_len(),
        Err(_) => regex.capture_names().flatten().any(|name| name == group),
    }
}

/// Rewrites a substitution replacement into regex-crate template syntax.
///
/// `\1`..`\99` and `\g<name>` become `${1}` / `${name}` and must name a group
/// of `regex`. A bare `$` has no special meaning and is emitted as `$$`. Control
/// escapes and `\0oo` octal escapes are decoded, and a backslash before any
/// other non-alphanumeric character yields that character literally.
///
/// # Errors
///
/// [`ParseError::InvalidEscape`] for a trailing backslash, an unterminated or
/// empty `\g<...>`, a reference to a group `regex` does not have, or a
/// backslash before an unknown ASCII letter.
pub fn expand_replacement_template(template: &str, regex: &Regex) -> Result<String, ParseError> {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            match chars[i] {
                '$' => out.push_str("$$"),
                c => out.push(c),
            }
            i += 1;
            continue;
        }
        let start = i;
        let Some(&next) = chars.get(i + 1) else {
            return Err(invalid(template, start, "\\ at end of replacement"));
        };
        i += 2;

        match next {
            '0' => {
                let (value, used) = read_octal(&chars, i, 2);
                i += used;
                out.extend(char::from_u32(value));
            }
            '1'..='9' => {
                let mut group = next.to_string();
                if let Some(&d) = chars.get(i).filter(|c| c.is_ascii_digit()) {
                    group.push(d);
                    i += 1;
                }
                if !has_group(regex, &group) {
                    return Err(invalid(template, start, "invalid group reference"));
                }
                out.push_str(&format!("${{{}}}", group));
            }
            'g' => {
                if chars.get(i) != Some(&'<') {
                    return Err(invalid(template, start, "missing < in group reference"));
                }
                let close = chars[i..]
                    .iter()
                    .position(|&c| c == '>')
                    .map(|offset| i + offset)
                    .ok_or_else(|| invalid(template, start, "missing > in group reference"))?;
                let name: String = chars[i + 1..close].iter().collect();
                if name.is_empty() {
                    return Err(invalid(template, start, "missing group name"));
                }
                if !has_group(regex, &name) {
                    return Err(invalid(template, start, "unknown group name"));
                }
                out.push_str(&format!("${{{}}}", name));
                i = close + 1;
            }
            '$' => out.push_str("$$"),
            other if other.is_ascii_alphabetic() => match control_escape(other) {
                Some(c) => out.push(c),
                None => return Err(invalid(template, start, "bad escape")),
            },
            other => out.push(other),
        }
    }
    Ok(out)
}
