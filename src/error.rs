use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum D2cError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid node {node_id}: {reason}")]
    InvalidTree { node_id: String, reason: String },

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("No cached run to regenerate from")]
    NoCachedRun,
}

impl D2cError {
    pub fn invalid_tree(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        D2cError::InvalidTree {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    pub fn pipeline(message: impl Into<String>) -> Self {
        D2cError::Pipeline(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            D2cError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            D2cError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Input must be a JSON array of nodes or an object with a \"nodes\" array.",
            ),
            D2cError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("threshold") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Thresholds must be positive and exact_threshold must not exceed approximate_threshold.",
                    )
                } else if lower.contains("debounce") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a humantime duration such as \"150ms\" for pipeline.debounce.",
                    )
                } else if lower.contains("--disable") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass --disable as NODE_ID:KIND, e.g. --disable 12:3:hero-fade.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file (~/.config/d2c/config.toml).",
                    )
                }
            }
            D2cError::InvalidTree { .. } => ErrorPayload::new(
                ErrorCategory::Input,
                self.to_string(),
                "Node ids must be unique, geometry finite and sizes non-negative; re-export the selection.",
            ),
            D2cError::Pipeline(msg) => ErrorPayload::new(
                ErrorCategory::Pipeline,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
            D2cError::NoCachedRun => ErrorPayload::new(
                ErrorCategory::Pipeline,
                self.to_string(),
                "Run generation on a selection before toggling animations.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, D2cError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Input,
    Pipeline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_tree_payload_names_the_node() {
        let err = D2cError::invalid_tree("12:3", "duplicate id");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        assert_eq!(payload.message, "Invalid node 12:3: duplicate id");
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("unique"),
            "expected uniqueness remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_uses_threshold_remediation() {
        let err = D2cError::Config("colors.exact_threshold must be positive".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("exact_threshold"),
            "expected threshold remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = D2cError::Config("Some other config issue".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("Check flags/paths"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn serialization_errors_are_input_errors() {
        let err: D2cError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        assert!(payload.remediation.unwrap_or_default().contains("nodes"));
    }

    #[test]
    fn no_cached_run_points_at_generation() {
        let payload = D2cError::NoCachedRun.to_payload();
        assert_eq!(payload.category, ErrorCategory::Pipeline);
        assert!(payload
            .remediation
            .unwrap_or_default()
            .contains("before toggling"));
    }
}
