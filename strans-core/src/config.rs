//! Configuration management for `strans-core`.
//!
//! A transform script is a YAML document listing operator expressions in the
//! order they should run:
//!
//! ```yaml
//! expressions:
//!   - "s/\\s+$//"
//!   - "y/a-z/A-Z/"
//! ```
//!
//! License: MIT OR Apache-2.0

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::Pipeline;
use crate::errors::StransError;

/// An ordered list of operator expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformScript {
    pub expressions: Vec<String>,
}

impl TransformScript {
    pub fn new(expressions: Vec<String>) -> Self {
        Self { expressions }
    }

    /// Parses a script from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, StransError> {
        let script: Self = serde_yml::from_str(text)?;
        debug!("Parsed transform script with {} expression(s).", script.expressions.len());
        Ok(script)
    }

    /// Loads a script from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, StransError> {
        let path = path.as_ref();
        info!("Loading transform script from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Appends `other`'s expressions after this script's.
    pub fn merge(mut self, other: TransformScript) -> Self {
        self.expressions.extend(other.expressions);
        self
    }

    /// Compiles every expression, in order, into a new pipeline.
    ///
    /// Stops at the first failing expression and reports its zero-based index.
    pub fn compile(&self) -> Result<Pipeline, StransError> {
        let mut pipeline = Pipeline::new();
        for (index, expression) in self.expressions.iter().enumerate() {
            pipeline
                .add_expression(expression)
                .map_err(|source| StransError::Expression {
                    index,
                    expression: expression.clone(),
                    source,
                })?;
        }
        debug!(
            "Compiled {} expression(s) into {} operation(s).",
            self.expressions.len(),
            pipeline.len()
        );
        Ok(pipeline)
    }
}

impl From<Vec<String>> for TransformScript {
    fn from(expressions: Vec<String>) -> Self {
        Self::new(expressions)
    }
}
