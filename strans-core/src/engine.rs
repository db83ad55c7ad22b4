// strans-core/src/engine.rs
//! Defines the `TransformEngine` trait and the `Pipeline` that implements it.
//!
//! A `Pipeline` is an ordered, append-only list of compiled operations. Building
//! one takes `&mut self` and is a single-threaded affair. Once built it is
//! read-only, and `apply` can be called from any number of threads at once.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, trace};

use crate::errors::ParseError;
use crate::operation::Operation;
use crate::parser::parse_expression;

/// A trait for anything that can rewrite a string in one pass.
///
/// This decouples the line-driving front end from how the transformation was
/// assembled.
pub trait TransformEngine: Send + Sync {
    /// Applies every operation, in order, to `text`.
    fn apply(&self, text: &str) -> String;

    /// The compiled operations, in application order.
    fn operations(&self) -> &[Operation];
}

/// The ordered list of compiled operations.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    ops: Vec<Operation>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses, compiles and appends one operator expression.
    ///
    /// Returns `Ok(true)` if an operation was appended and `Ok(false)` for a
    /// permitted no-op such as a blank expression or `y///`. On error the
    /// pipeline is left exactly as it was.
    pub fn add_expression(&mut self, expression: &str) -> Result<bool, ParseError> {
        match parse_expression(expression)? {
            Some(op) => {
                debug!("Appending operation #{}: {}", self.ops.len(), op);
                self.ops.push(op);
                Ok(true)
            }
            None => {
                debug!("Expression {:?} compiled to a no-op; nothing appended.", expression);
                Ok(false)
            }
        }
    }

    /// Appends an already compiled operation.
    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    /// Removes every operation.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.ops.iter()
    }
}

impl TransformEngine for Pipeline {
    fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for (i, op) in self.ops.iter().enumerate() {
            current = op.apply(&current);
            trace!("After operation #{}: {:?}", i, current);
        }
        current
    }

    fn operations(&self) -> &[Operation] {
        &self.ops
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
