// strans/src/main.rs
//! strans entry point.
//!
//! Compiles every expression up front, then streams the input through the
//! resulting pipeline. A bad expression aborts before any input is read.

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};
use std::process;

use strans::cli::Cli;
use strans::commands::transform::{TransformOptions, error_msg, run_transform, warn_msg};
use strans::logger;
use strans_core::{Pipeline, StransError, TransformEngine, TransformScript};

fn build_pipeline(args: &Cli) -> Result<Pipeline, StransError> {
    let mut script = match &args.script {
        Some(path) => TransformScript::load_from_file(path)?,
        None => TransformScript::default(),
    };
    script = script.merge(TransformScript::new(args.expressions.clone()));
    script.compile()
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("strans started. Version: {}", env!("CARGO_PKG_VERSION"));

    let pipeline = match build_pipeline(&args) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error_msg(format!("strans: {}", e));
            process::exit(1);
        }
    };

    for (i, op) in pipeline.operations().iter().enumerate() {
        debug!("#{}: {}", i, op);
    }
    if pipeline.is_empty() && !args.quiet {
        warn_msg("strans: no operations to apply; input is copied unchanged");
    }

    let opts = TransformOptions {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
    };
    run_transform(&pipeline, &opts).context("Transform failed")?;

    Ok(())
}
