use std::sync::Arc;

/// Stage progress sink; the CLI prints these in verbose mode.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;
