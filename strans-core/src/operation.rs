//! Compiled operations and how each one rewrites a string.
//!
//! An [`Operation`] is the immutable result of compiling one operator expression.
//! It holds no mutable state, so a compiled pipeline can be shared between
//! threads and applied concurrently.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::fmt;

use regex::{Captures, Regex};

use crate::charset::squash_runs;

/// What a transliteration table maps a code point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Replace with this character.
    Char(char),
    /// Drop the character from the output.
    Delete,
}

/// A code-point-to-target mapping with an optional fallback.
///
/// Code points that are not keys map to the fallback when one is installed,
/// and are left unchanged otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    map: HashMap<u32, Target>,
    fallback: Option<Target>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the target used for code points that are not keys.
    pub fn with_fallback(mut self, fallback: Target) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Adds a mapping unless `ordinal` already has one; the first assignment wins.
    pub fn insert_first(&mut self, ordinal: u32, target: Target) {
        self.map.entry(ordinal).or_insert(target);
    }

    pub fn contains(&self, ordinal: u32) -> bool {
        self.map.contains_key(&ordinal)
    }

    pub fn fallback(&self) -> Option<Target> {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Looks up `c`. `None` means the character passes through unchanged.
    pub fn lookup(&self, c: char) -> Option<Target> {
        self.map.get(&(c as u32)).copied().or(self.fallback)
    }

    /// Remaps every character of `text`.
    pub fn translate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.lookup(c) {
                Some(Target::Char(t)) => out.push(t),
                Some(Target::Delete) => {}
                None => out.push(c),
            }
        }
        out
    }
}

/// A compiled `s///` expression.
#[derive(Debug, Clone)]
pub struct Substitution {
    /// The compiled pattern.
    pub regex: Regex,
    /// Replacement in regex-crate template syntax (`${1}`, `${name}`).
    pub replacement: String,
    /// Maximum number of replacements; `0` means unlimited.
    pub limit: usize,
}

impl Substitution {
    pub fn apply(&self, text: &str) -> String {
        self.regex
            .replacen(text, self.limit, self.replacement.as_str())
            .into_owned()
    }
}

/// A compiled `y///` expression that has to go through a regex, because it
/// complements the character set or squashes runs.
#[derive(Debug, Clone)]
pub struct RegexTransliteration {
    /// Matches runs of characters belonging to (or outside) the set.
    pub regex: Regex,
    pub table: TranslationTable,
    pub squash: bool,
}

impl RegexTransliteration {
    pub fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, |caps: &Captures| {
                let translated = self.table.translate(&caps[0]);
                if self.squash {
                    squash_runs(&translated)
                } else {
                    translated
                }
            })
            .into_owned()
    }
}

/// One compiled step of a pipeline.
#[derive(Debug, Clone)]
pub enum Operation {
    Substitution(Substitution),
    /// Plain per-character table lookup, used when no regex is needed.
    DirectTable(TranslationTable),
    RegexTransliteration(RegexTransliteration),
}

impl Operation {
    /// Applies this operation to `text`.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Operation::Substitution(sub) => sub.apply(text),
            Operation::DirectTable(table) => table.translate(text),
            Operation::RegexTransliteration(tr) => tr.apply(text),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Substitution(sub) => write!(
                f,
                "substitute /{}/ -> {:?} (limit {})",
                sub.regex.as_str(),
                sub.replacement,
                sub.limit
            ),
            Operation::DirectTable(table) => write!(
                f,
                "translate via table ({} entries)",
                table.len()
            ),
            Operation::RegexTransliteration(tr) => write!(
                f,
                "translate runs of /{}/ ({} entries, fallback {:?}, squash {})",
                tr.regex.as_str(),
                tr.table.len(),
                tr.table.fallback(),
                tr.squash
            ),
        }
    }
}
