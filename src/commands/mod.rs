mod context;
mod detect;
mod generate;
mod watch;

pub use context::run_context;
pub use detect::run_detect;
pub use generate::run_generate;
pub use watch::run_watch;

use std::path::Path;
use std::sync::Arc;

use d2c_lib::types::{ExtractedNode, Selection};
use d2c_lib::{D2cError, ProgressCallback};
use tokio::io::AsyncReadExt;

/// Read a selection from a file, or stdin when the path is `-`.
pub(crate) async fn read_selection(input: &Path) -> Result<Vec<ExtractedNode>, D2cError> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(input).await.map_err(|e| {
            D2cError::Config(format!("Failed to read input {}: {}", input.display(), e))
        })?
    };
    parse_selection(&raw)
}

pub(crate) fn parse_selection(raw: &str) -> Result<Vec<ExtractedNode>, D2cError> {
    let selection: Selection = serde_json::from_str(raw)?;
    Ok(selection.into_nodes())
}

pub(crate) fn input_label(input: &Path) -> String {
    input.display().to_string()
}

pub(crate) fn progress_logger(verbose: bool) -> Option<ProgressCallback> {
    if verbose {
        Some(Arc::new(|msg: &str| eprintln!("{msg}")))
    } else {
        None
    }
}
