//! The line-driving loop: read, transform, write.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info, warn};
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use strans_core::TransformEngine;

use crate::ui::output_format;

/// Where to read from and write to.
#[derive(Debug, Default)]
pub struct TransformOptions {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Streams `reader` through `engine` into `writer`, one line at a time.
///
/// Each line is handed to the engine together with its terminator, and the
/// result is written as-is. A last line without a terminator is processed too.
/// Returns the number of lines processed.
pub fn transform_stream<R: BufRead, W: Write>(
    engine: &dyn TransformEngine,
    mut reader: R,
    mut writer: W,
) -> Result<usize> {
    let mut buf = Vec::new();
    let mut lines = 0usize;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).context("Failed to read input")?;
        if read == 0 {
            break;
        }
        lines += 1;
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => engine.apply(line),
            Err(_) => {
                warn!("Line {} is not valid UTF-8; invalid bytes were replaced.", lines);
                engine.apply(&String::from_utf8_lossy(&buf))
            }
        };
        writer.write_all(line.as_bytes()).context("Failed to write output")?;
    }

    writer.flush().context("Failed to flush output")?;
    Ok(lines)
}

/// Runs the transform over the input and output selected in `opts`.
pub fn run_transform(engine: &dyn TransformEngine, opts: &TransformOptions) -> Result<()> {
    info!("Starting transform with {} operation(s).", engine.operations().len());

    let reader: Box<dyn BufRead> = match &opts.input_path {
        Some(path) => {
            debug!("Reading input from {}", path.display());
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            debug!("Reading input from stdin...");
            Box::new(io::stdin().lock())
        }
    };

    let lines = match &opts.output_path {
        Some(path) => {
            debug!("Writing output to {}", path.display());
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            transform_stream(engine, reader, BufWriter::new(file))?
        }
        None => transform_stream(engine, reader, BufWriter::new(io::stdout().lock()))?,
    };

    info!("Transform completed: {} line(s) processed.", lines);
    Ok(())
}
