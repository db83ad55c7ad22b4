//! Compilers that turn the components of an operator expression into an
//! executable [`Operation`](crate::operation::Operation).
//!
//! Each entry point validates its flags first, then compiles. A return value of
//! `Ok(None)` is a permitted no-op that must not be appended to a pipeline.

pub mod substitution;
pub mod transliteration;

/// Size limit for any regex compiled on behalf of an expression.
pub(crate) const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);
