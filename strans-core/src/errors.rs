//! errors.rs - Custom error types for the strans-core library.
//!
//! `ParseError` covers everything that can go wrong while turning a single
//! operator expression into an `Operation`. `StransError` wraps it with the
//! context of a whole expression list, plus script loading failures.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// A failure to parse or compile one operator expression.
///
/// Every variant carries the offending text so callers can report it without
/// re-parsing. Compilation is all-or-nothing: when one of these is returned,
/// nothing was appended to the pipeline.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseError {
    #[error("invalid regular expression flag: {0}")]
    InvalidRegexFlag(char),

    #[error("invalid transliteration flag: {0}")]
    InvalidTransliterationFlag(char),

    #[error("invalid delimiter: {expression}")]
    InvalidDelimiter { expression: String },

    #[error("unterminated expression: {expression}")]
    UnterminatedExpression { expression: String },

    #[error("unrecognized operation: {expression}")]
    UnrecognizedOperator { expression: String },

    #[error("invalid range in transliteration operator: {range}")]
    InvalidRange { range: String },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid escape at position {position} in '{text}': {reason}")]
    InvalidEscape {
        text: String,
        position: usize,
        reason: &'static str,
    },
}

/// Errors raised while building a pipeline from a list of expressions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StransError {
    #[error("{index}: {expression}: {source}")]
    Expression {
        index: usize,
        expression: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to parse transform script: {0}")]
    ScriptFormat(#[from] serde_yml::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}
