use std::path::PathBuf;
use std::process::ExitCode;

use d2c_lib::output::{GenerateOutput, NoSelectionOutput, D2C_OUTPUT_VERSION};
use d2c_lib::types::{AnimationKind, ExtractedNode, GeneratedCode, Selection};
use d2c_lib::{D2cError, D2cOutput, Debouncer, Pipeline, PipelineOutcome};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::progress_logger;
use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{apply_overrides, load_config, log_effective_config, CliOverrides};

const WATCH_INPUT: &str = "stdin";
const CHANNEL_CAPACITY: usize = 64;

/// One stdin line: a selection snapshot or an animation toggle.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WatchMessage {
    Toggle { toggle: ToggleRequest },
    Selection(Selection),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleRequest {
    node_id: String,
    kind: AnimationKind,
    enabled: bool,
}

/// Run the watch command.
///
/// Selections are debounced. A toggle first flushes any selection still in
/// the debounce window, then applies to the latest generated run. One JSON
/// envelope is printed per result.
pub async fn run_watch(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    debounce_ms: u64,
    no_animations: bool,
) -> ExitCode {
    let format = OutputFormat::Json;
    let config = match load_config(config_path.as_deref()).and_then(|cfg| {
        apply_overrides(cfg, CliOverrides::from_args(raw_args, None, Some(debounce_ms)))
    }) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    if verbose {
        log_effective_config(&config, config_path.as_deref());
    }

    let (debouncer, mut settled) =
        Debouncer::<Vec<ExtractedNode>>::spawn(config.pipeline.debounce, CHANNEL_CAPACITY);
    let (toggle_tx, mut toggles) = mpsc::channel::<ToggleRequest>(CHANNEL_CAPACITY);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    render_error(D2cError::Io(err), format, None);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<WatchMessage>(&line) {
                Ok(WatchMessage::Toggle { toggle }) => {
                    // A toggle targets the selection sent before it.
                    if debouncer.flush().await.is_err() || toggle_tx.send(toggle).await.is_err() {
                        break;
                    }
                }
                Ok(WatchMessage::Selection(selection)) => {
                    if debouncer.push(selection.into_nodes()).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    render_error(D2cError::from(err), format, None);
                }
            }
        }
        debouncer.close().await;
    });

    let mut pipeline = Pipeline::new(&config)
        .with_progress(progress_logger(verbose))
        .with_animations(!no_animations);
    let mut selections_open = true;
    loop {
        // Settled selections drain before toggles sent after them.
        tokio::select! {
            biased;
            next = settled.recv(), if selections_open => match next {
                Some(nodes) => {
                    debug!(roots = nodes.len(), "settled selection");
                    match pipeline.run(nodes) {
                        Ok(PipelineOutcome::Generated(code)) => emit_generated(code, format),
                        Ok(PipelineOutcome::NoSelection) => emit_no_selection(format),
                        Err(err) => {
                            render_error(err, format, None);
                        }
                    }
                }
                None => selections_open = false,
            },
            next = toggles.recv() => match next {
                Some(request) => {
                    match pipeline.toggle_animation(&request.node_id, request.kind, request.enabled) {
                        Ok(code) => emit_generated(code, format),
                        Err(err) => {
                            render_error(err, format, None);
                        }
                    }
                }
                // The reader has exited, so every selection is already drained.
                None => break,
            },
        }
    }

    if let Err(err) = reader.await {
        return render_error(D2cError::pipeline(format!("stdin reader failed: {err}")), format, None);
    }
    ExitCode::SUCCESS
}

fn emit_generated(code: GeneratedCode, format: OutputFormat) {
    let body = D2cOutput::Generate(GenerateOutput {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: WATCH_INPUT.to_string(),
        output_path: None,
        code,
    });
    emit(&body, format);
}

fn emit_no_selection(format: OutputFormat) {
    let body = D2cOutput::NoSelection(NoSelectionOutput {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: WATCH_INPUT.to_string(),
    });
    emit(&body, format);
}

fn emit(body: &D2cOutput, format: OutputFormat) {
    if let Err(err) = write_output(body, format, None) {
        render_error(D2cError::Config(err.to_string()), format, None);
    }
}
