use std::path::PathBuf;
use std::process::ExitCode;

use d2c_lib::output::{GenerateOutput, NoSelectionOutput, D2C_OUTPUT_VERSION};
use d2c_lib::types::GeneratedCode;
use d2c_lib::{D2cError, D2cOutput, Pipeline, PipelineOutcome};

use super::{input_label, progress_logger, read_selection};
use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_selection, render_error, write_output};
use crate::settings::{
    apply_overrides, load_config, log_effective_config, parse_disable, CliOverrides,
};

/// Run the generate command.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    no_animations: bool,
    disable: Vec<String>,
    threshold: u8,
) -> ExitCode {
    let config = match load_config(config_path.as_deref())
        .and_then(|cfg| apply_overrides(cfg, CliOverrides::from_args(raw_args, Some(threshold), None)))
    {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    if verbose {
        log_effective_config(&config, config_path.as_deref());
    }
    let disabled = match disable
        .iter()
        .map(|raw| parse_disable(raw))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(list) => list,
        Err(err) => return render_error(err, format, None),
    };

    if verbose {
        eprintln!("Reading selection from {}…", input_label(&input));
    }
    let nodes = match read_selection(&input).await {
        Ok(nodes) => nodes,
        Err(err) => return render_error(err, format, None),
    };

    let mut pipeline = Pipeline::new(&config)
        .with_progress(progress_logger(verbose))
        .with_animations(!no_animations);
    let mut code = match pipeline.run(nodes) {
        Ok(PipelineOutcome::Generated(code)) => code,
        Ok(PipelineOutcome::NoSelection) => {
            let body = D2cOutput::NoSelection(NoSelectionOutput {
                version: D2C_OUTPUT_VERSION.to_string(),
                input: input_label(&input),
            });
            if let Err(err) = write_output(&body, format, None) {
                return render_error(D2cError::Config(err.to_string()), format, None);
            }
            return exit_code_for_selection(false);
        }
        Err(err) => return render_error(err, format, None),
    };

    for (node_id, kind) in disabled {
        code = match pipeline.toggle_animation(&node_id, kind, false) {
            Ok(code) => code,
            Err(err) => {
                return render_error(
                    D2cError::Config(format!("Invalid --disable value '{node_id}:{kind}': {err}")),
                    format,
                    None,
                )
            }
        };
    }

    if let Some(path) = &output {
        if let Err(err) = std::fs::write(path, component_source(&code)) {
            return render_error(D2cError::Io(err), format, None);
        }
        if verbose {
            eprintln!("Wrote markup to {}", path.display());
        }
    }

    let body = D2cOutput::Generate(GenerateOutput {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: input_label(&input),
        output_path: output,
        code,
    });
    if let Err(err) = write_output(&body, format, None) {
        return render_error(D2cError::Config(err.to_string()), format, None);
    }
    exit_code_for_selection(true)
}

/// Imports followed by the markup, as written to `--output`.
fn component_source(code: &GeneratedCode) -> String {
    let mut source = String::new();
    for import in &code.imports {
        source.push_str(import);
        source.push('\n');
    }
    if !code.imports.is_empty() {
        source.push('\n');
    }
    source.push_str(&code.markup);
    source.push('\n');
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_source_puts_imports_first() {
        let code = GeneratedCode {
            markup: "<Badge label=\"New\" />".into(),
            imports: vec!["import { Badge } from \"@/components/Badge\";".into()],
            component_usage: Default::default(),
            animations: Vec::new(),
            warnings: Vec::new(),
            context: String::new(),
        };
        assert_eq!(
            component_source(&code),
            "import { Badge } from \"@/components/Badge\";\n\n<Badge label=\"New\" />\n"
        );
    }
}
