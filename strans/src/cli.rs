// strans/src/cli.rs
//! Command-line interface definition for `strans`.

use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "strans",
    version = env!("CARGO_PKG_VERSION"),
    about = "Apply s/// substitutions and y/// transliterations to text",
    long_about = "strans reads text line by line from stdin (or a file) and passes each line through an ordered list of operator expressions.\n\n  s/pattern/replacement/flags    regex substitution; flags: a i l m s x, g (all), N (cap)\n  y/charset/replset/flags        transliteration (alias tr); flags: c (complement), d (delete), s (squash)\n\nWithout g or a count, a substitution replaces only the first match on each line.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Operator expressions, applied in the order given.
    #[arg(value_name = "EXPRESSION")]
    pub expressions: Vec<String>,

    /// YAML script with an `expressions` list, applied before EXPRESSION arguments.
    #[arg(long, short = 'f', value_name = "FILE", env = "STRANS_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Read input from a file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable debug logging, including a dump of the compiled pipeline.
    #[arg(long, short = 'd', conflicts_with = "quiet")]
    pub debug: bool,

    /// Suppress all log output.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
