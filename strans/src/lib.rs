// strans/src/lib.rs
//! # strans CLI Application
//!
//! Line-oriented front end for `strans-core`: reads text from stdin or a file,
//! passes every line through a compiled pipeline and writes the result.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::transform::{run_transform, TransformOptions};
