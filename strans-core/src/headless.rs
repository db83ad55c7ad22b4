// File: strans-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot use: compile a list of expressions and apply
//! them to a single string.

use anyhow::{Context, Result};

use crate::config::TransformScript;
use crate::engine::TransformEngine;

/// Compiles `expressions` in order and applies the resulting pipeline to `content`.
///
/// # Arguments
///
/// * `expressions` - Operator expressions such as `s/a/b/g` or `y/a-z/A-Z/`.
/// * `content` - The string to transform.
pub fn headless_transform_string<S: AsRef<str>>(expressions: &[S], content: &str) -> Result<String> {
    let script = TransformScript::new(expressions.iter().map(|e| e.as_ref().to_string()).collect());
    let pipeline = script
        .compile()
        .context("Failed to compile expressions for headless transform")?;
    Ok(pipeline.apply(content))
}
