// strans-core/src/lib.rs
//! # strans Core Library
//!
//! `strans-core` parses and compiles a small operator language for text
//! rewriting and applies the result to strings. Two operators are supported:
//!
//! * `s/pattern/replacement/flags` - regex substitution. Flags: `a i l m s x`
//!   for matching options, `g` for every match, or a number for a cap. With
//!   neither `g` nor a number, only the first match is replaced.
//! * `y/charset/replset/flags` (or `tr/.../.../`) - transliteration. Flags: `c`
//!   complement the set, `d` delete unmapped characters, `s` squash runs.
//!
//! Any non-alphanumeric character right after the keyword may serve as the
//! delimiter.
//!
//! ## Modules
//!
//! * `parser`: Splits an expression and dispatches to a compiler.
//! * `compilers`: Substitution and transliteration compilers.
//! * `charset`: Range expansion, complements and run squashing.
//! * `escapes`: Backslash-escape decoding.
//! * `operation`: Compiled operations and translation tables.
//! * `engine`: The `TransformEngine` trait and the `Pipeline`.
//! * `config`: YAML transform scripts.
//! * `headless`: One-shot helper.
//!
//! ## Usage Example
//!
//! ```rust
//! use strans_core::{Pipeline, TransformEngine};
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.add_expression("s/foo/bar/g").unwrap();
//! pipeline.add_expression("y/a-z//cs").unwrap();
//! assert_eq!(pipeline.apply("foo  foo"), "bar bar");
//! ```
//!
//! ## Error Handling
//!
//! Compilation errors are returned as [`ParseError`]. Building a pipeline from a
//! list of expressions wraps them in [`StransError`] with the failing index.
//! Applying a compiled pipeline cannot fail.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod charset;
pub mod compilers;
pub mod config;
pub mod engine;
pub mod errors;
pub mod escapes;
pub mod headless;
pub mod operation;
pub mod parser;

pub use charset::{complement_ordinals, expand_ordinals, squash_runs};
pub use compilers::substitution::{compile_substitution, SubstitutionFlags};
pub use compilers::transliteration::{compile_transliteration, TransliterationFlags};
pub use config::TransformScript;
pub use engine::{Pipeline, TransformEngine};
pub use errors::{ParseError, StransError};
pub use escapes::unescape;
pub use headless::headless_transform_string;
pub use operation::{Operation, RegexTransliteration, Substitution, Target, TranslationTable};
pub use parser::{parse_expression, split_expression, OperatorKind, ParsedExpression};
