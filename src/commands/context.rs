use std::path::PathBuf;
use std::process::ExitCode;

use d2c_lib::output::{ContextOutput, NoSelectionOutput, D2C_OUTPUT_VERSION};
use d2c_lib::{D2cError, D2cOutput, Pipeline, PipelineOutcome};

use super::{input_label, progress_logger, read_selection};
use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_selection, render_error, write_output};
use crate::settings::load_config;

/// Run the context command.
///
/// Without `--format` the raw document is printed; with it the document is
/// wrapped in a `context` envelope like the other modes.
pub async fn run_context(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> ExitCode {
    let error_format = format.unwrap_or_default();
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, error_format, None),
    };
    let nodes = match read_selection(&input).await {
        Ok(nodes) => nodes,
        Err(err) => return render_error(err, error_format, None),
    };

    let mut pipeline = Pipeline::new(&config).with_progress(progress_logger(verbose));
    let context = match pipeline.run(nodes) {
        Ok(PipelineOutcome::Generated(code)) => code.context,
        Ok(PipelineOutcome::NoSelection) => {
            let Some(format) = format else {
                eprintln!("No nodes selected in {}", input_label(&input));
                return exit_code_for_selection(false);
            };
            let body = D2cOutput::NoSelection(NoSelectionOutput {
                version: D2C_OUTPUT_VERSION.to_string(),
                input: input_label(&input),
            });
            if let Err(err) = write_output(&body, format, output.clone()) {
                return render_error(D2cError::Config(err.to_string()), format, output);
            }
            return exit_code_for_selection(false);
        }
        Err(err) => return render_error(err, error_format, None),
    };

    let Some(format) = format else {
        match output {
            Some(path) => {
                if let Err(err) = std::fs::write(&path, &context) {
                    return render_error(D2cError::Io(err), error_format, None);
                }
            }
            None => print!("{context}"),
        }
        return exit_code_for_selection(true);
    };

    let body = D2cOutput::Context(ContextOutput {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: input_label(&input),
        context,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(D2cError::Config(err.to_string()), format, output);
    }
    exit_code_for_selection(true)
}
