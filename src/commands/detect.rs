use std::path::PathBuf;
use std::process::ExitCode;

use d2c_lib::output::{DetectOutput, NoSelectionOutput, D2C_OUTPUT_VERSION};
use d2c_lib::{validate_tree, AnimationEngine, ComponentDetector, D2cError, D2cOutput};

use super::{input_label, read_selection};
use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_selection, render_error, write_output};
use crate::settings::{apply_overrides, load_config, log_effective_config, CliOverrides};

/// Run the detect command: classification only, no markup.
#[allow(clippy::too_many_arguments)]
pub async fn run_detect(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    threshold: u8,
    animations: bool,
) -> ExitCode {
    let config = match load_config(config_path.as_deref())
        .and_then(|cfg| apply_overrides(cfg, CliOverrides::from_args(raw_args, Some(threshold), None)))
    {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    if verbose {
        log_effective_config(&config, config_path.as_deref());
    }
    let nodes = match read_selection(&input).await {
        Ok(nodes) => nodes,
        Err(err) => return render_error(err, format, output.clone()),
    };
    if nodes.is_empty() {
        let body = D2cOutput::NoSelection(NoSelectionOutput {
            version: D2C_OUTPUT_VERSION.to_string(),
            input: input_label(&input),
        });
        if let Err(err) = write_output(&body, format, output.clone()) {
            return render_error(D2cError::Config(err.to_string()), format, output);
        }
        return exit_code_for_selection(false);
    }
    if let Err(err) = validate_tree(&nodes) {
        return render_error(err, format, output.clone());
    }

    let detector = ComponentDetector::new(config.detection.acceptance_threshold);
    let components = detector.detect(&nodes);
    if verbose {
        eprintln!("Detected {} component(s)", components.len());
    }
    let suggestions = if animations {
        AnimationEngine::new(
            config.animation.hero_threshold_y,
            config.animation.sibling_window,
        )
        .suggest(&nodes, &components)
    } else {
        Vec::new()
    };

    let body = D2cOutput::Detect(DetectOutput {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: input_label(&input),
        threshold: detector.threshold(),
        components,
        animations: suggestions,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(D2cError::Config(err.to_string()), format, output);
    }
    exit_code_for_selection(true)
}
