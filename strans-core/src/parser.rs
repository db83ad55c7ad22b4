//! Expression parser: splits `s/../../flags` and `y/../../flags` (or `tr`)
//! into their components and hands them to the matching compiler.
//!
//! The character right after the operator keyword is the delimiter. A
//! component is any run of `\<any char>` escapes and characters other than a
//! backslash or the delimiter; escapes are kept verbatim for the compilers.
//! The flags run from the last delimiter up to the end of that line.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::compilers::substitution::compile_substitution;
use crate::compilers::transliteration::compile_transliteration;
use crate::errors::ParseError;
use crate::operation::Operation;

/// The two operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// `s`
    Substitution,
    /// `y` or `tr`
    Transliteration,
}

/// An expression split into its parts, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpression<'a> {
    pub kind: OperatorKind,
    pub delimiter: char,
    pub first: &'a str,
    pub second: &'a str,
    pub flags: &'a str,
}

lazy_static! {
    /// Splitter regexes, one per delimiter seen so far.
    static ref SPLITTERS: RwLock<HashMap<char, Arc<Regex>>> = RwLock::new(HashMap::new());
}

fn build_splitter(delimiter: char) -> Result<Regex, regex::Error> {
    let d = regex::escape(delimiter.encode_utf8(&mut [0; 4]));
    let component = format!(r"((?:\\.|[^\\{d}])*)");
    Regex::new(&format!(r"\A{component}{d}{component}{d}(.*)"))
}

fn splitter_for(delimiter: char) -> Result<Arc<Regex>, ParseError> {
    {
        let cache = SPLITTERS.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(splitter) = cache.get(&delimiter) {
            return Ok(Arc::clone(splitter));
        }
    }

    let splitter = Arc::new(build_splitter(delimiter).map_err(|source| {
        ParseError::InvalidPattern {
            pattern: delimiter.to_string(),
            source,
        }
    })?);
    SPLITTERS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(delimiter, Arc::clone(&splitter));
    Ok(splitter)
}

/// Splits an expression into operator kind, delimiter and components without
/// compiling anything. `expression` must already be trimmed and non-empty.
pub fn split_expression(expression: &str) -> Result<ParsedExpression<'_>, ParseError> {
    let (kind, body) = if let Some(body) = expression.strip_prefix('s') {
        (OperatorKind::Substitution, body)
    } else if let Some(body) = expression.strip_prefix('y').or_else(|| expression.strip_prefix("tr")) {
        (OperatorKind::Transliteration, body)
    } else {
        return Err(ParseError::UnrecognizedOperator {
            expression: expression.to_string(),
        });
    };

    let mut rest = body.chars();
    let delimiter = rest.next().ok_or_else(|| ParseError::UnterminatedExpression {
        expression: expression.to_string(),
    })?;
    if delimiter.is_ascii_alphanumeric() {
        return Err(ParseError::InvalidDelimiter {
            expression: expression.to_string(),
        });
    }

    let body = rest.as_str();
    let splitter = splitter_for(delimiter)?;
    let caps = splitter
        .captures(body)
        .ok_or_else(|| ParseError::UnterminatedExpression {
            expression: expression.to_string(),
        })?;
    let group = |i: usize| caps.get(i).map_or("", |m| &body[m.range()]);

    Ok(ParsedExpression {
        kind,
        delimiter,
        first: group(1),
        second: group(2),
        flags: group(3),
    })
}

/// Turns `\<delimiter>` back into a bare delimiter.
///
/// For a regex pattern the escape is kept when the delimiter is itself a regex
/// metacharacter, so `s|a\|b|x|` still matches a literal `|`. A backslash
/// delimiter is never unescaped.
fn unescape_delimiter(component: &str, delimiter: char, in_pattern: bool) -> Cow<'_, str> {
    let delimiter_text = delimiter.to_string();
    let keep = delimiter == '\\' || (in_pattern && regex::escape(&delimiter_text) != delimiter_text);
    if keep || !component.contains('\\') {
        return Cow::Borrowed(component);
    }

    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next == delimiter => out.push(next),
            Some(next) => {
                out.push(c);
                out.push(next);
            }
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Parses and compiles one operator expression.
///
/// Surrounding whitespace is ignored. Returns `Ok(None)` for an empty expression
/// or for a compiled no-op, neither of which belongs in a pipeline.
pub fn parse_expression(expression: &str) -> Result<Option<Operation>, ParseError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Ok(None);
    }

    let parsed = split_expression(expression)?;
    debug!(
        "Parsed {:?} with delimiter {:?}: {:?}, {:?}, flags {:?}",
        parsed.kind, parsed.delimiter, parsed.first, parsed.second, parsed.flags
    );

    let d = parsed.delimiter;
    match parsed.kind {
        OperatorKind::Substitution => compile_substitution(
            &unescape_delimiter(parsed.first, d, true),
            parsed.second,
            parsed.flags,
        ),
        OperatorKind::Transliteration => compile_transliteration(
            &unescape_delimiter(parsed.first, d, false),
            &unescape_delimiter(parsed.second, d, false),
            parsed.flags,
        ),
    }
}
