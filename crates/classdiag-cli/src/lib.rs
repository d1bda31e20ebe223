//! CLI logic for the classdiag tool.
//!
//! This module reads a source set document, analyzes it and writes the
//! rendered class diagram to a file or to stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use classdiag::{ClassdiagError, DiagramBuilder};

/// Run the classdiag CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ClassdiagError` for:
/// - File I/O errors
/// - Configuration loading errors and invalid option overrides
/// - Analysis errors
pub fn run(args: &Args) -> Result<(), ClassdiagError> {
    info!(
        input_path = args.input,
        output_path = args.output.as_deref().unwrap_or("-");
        "Processing source set"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config.set_format(format);
    }
    config::apply_overrides(&mut app_config, &args.overrides)?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let model = builder.analyze(&source)?;
    let text = builder.render(&model);

    match &args.output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path; "Diagram written successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
