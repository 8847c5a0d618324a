use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use d2c_lib::output::{ErrorOutput, D2C_OUTPUT_VERSION};
use d2c_lib::{D2cError, D2cOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &D2cOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: D2cError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = D2cOutput::Error(ErrorOutput {
        version: D2C_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 for errors; an empty selection uses 1.
    ExitCode::from(2)
}

/// Exit code for a run: success, or 1 when the selection was empty.
pub fn exit_code_for_selection(had_selection: bool) -> ExitCode {
    if had_selection {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &D2cOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &D2cOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &D2cOutput, colorize: bool) -> String {
    match body {
        D2cOutput::Generate(out) => {
            let mut buf = String::new();
            let header = color("[GENERATE]", "36", colorize);
            writeln!(buf, "{} {}", header, out.input).ok();
            if let Some(path) = &out.output_path {
                writeln!(buf, "Markup written to {}", path.display()).ok();
            }
            if !out.code.component_usage.is_empty() {
                writeln!(buf, "Components:").ok();
                for (tag, count) in &out.code.component_usage {
                    writeln!(buf, "- {:14} x{}", tag, count).ok();
                }
            }
            let enabled = out.code.animations.iter().filter(|a| a.enabled).count();
            writeln!(
                buf,
                "Animations: {} enabled of {} suggested",
                enabled,
                out.code.animations.len()
            )
            .ok();
            if !out.code.warnings.is_empty() {
                writeln!(buf, "Warnings:").ok();
                for warning in &out.code.warnings {
                    writeln!(buf, "- {}", color(warning, "33", colorize)).ok();
                }
            }
            writeln!(buf).ok();
            for import in &out.code.imports {
                writeln!(buf, "{import}").ok();
            }
            if !out.code.imports.is_empty() {
                writeln!(buf).ok();
            }
            writeln!(buf, "{}", out.code.markup).ok();
            buf
        }
        D2cOutput::Context(out) => out.context.clone(),
        D2cOutput::Detect(out) => {
            let mut buf = String::new();
            let header = color("[DETECT]", "34", colorize);
            writeln!(
                buf,
                "{} {} component(s) at threshold {}",
                header,
                out.components.len(),
                out.threshold
            )
            .ok();
            for m in &out.components {
                let confidence = color(&m.confidence.to_string(), confidence_color_code(m.confidence), colorize);
                writeln!(buf, "- {:14} {:10} {}", m.component.tag(), m.node_id, confidence).ok();
            }
            if !out.animations.is_empty() {
                writeln!(buf, "Animations:").ok();
                for a in &out.animations {
                    writeln!(buf, "- {:10} {} ({})", a.node_id, a.kind, a.rationale).ok();
                }
            }
            buf
        }
        D2cOutput::NoSelection(out) => {
            let header = color("[EMPTY]", "33", colorize);
            format!("{} No nodes selected in {}", header, out.input)
        }
        D2cOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Map confidence to ANSI color code.
fn confidence_color_code(confidence: u8) -> &'static str {
    if confidence >= 80 {
        "32" // green
    } else if confidence >= 70 {
        "33" // yellow
    } else {
        "31" // red
    }
}
