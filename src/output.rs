use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ErrorPayload;
use crate::types::{AnimationSuggestion, ComponentMatch, GeneratedCode};

/// Schema version for output payloads.
pub const D2C_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum D2cOutput {
    Generate(GenerateOutput),
    Context(ContextOutput),
    Detect(DetectOutput),
    NoSelection(NoSelectionOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub version: String,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub code: GeneratedCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOutput {
    pub version: String,
    pub input: String,
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectOutput {
    pub version: String,
    pub input: String,
    pub threshold: u8,
    #[serde(default)]
    pub components: Vec<ComponentMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<AnimationSuggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoSelectionOutput {
    pub version: String,
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentKind;
    use std::collections::BTreeMap;

    #[test]
    fn generate_output_serializes() {
        let mut usage = BTreeMap::new();
        usage.insert("Button".to_string(), 2);
        let output = D2cOutput::Generate(GenerateOutput {
            version: D2C_OUTPUT_VERSION.to_string(),
            input: "selection.json".to_string(),
            output_path: None,
            code: GeneratedCode {
                markup: "<Button label=\"Go\" />".to_string(),
                imports: vec!["import { Button } from \"@/components/Button\";".to_string()],
                component_usage: usage,
                animations: Vec::new(),
                warnings: Vec::new(),
                context: String::new(),
            },
        });

        let json = serde_json::to_string(&output).expect("serialize generate output");
        assert!(json.contains("\"mode\":\"generate\""));
        assert!(json.contains("\"componentUsage\":{\"Button\":2}"));
        assert!(!json.contains("outputPath"));
    }

    #[test]
    fn detect_output_serializes() {
        let output = D2cOutput::Detect(DetectOutput {
            version: D2C_OUTPUT_VERSION.to_string(),
            input: "-".to_string(),
            threshold: 60,
            components: vec![ComponentMatch {
                component: ComponentKind::Badge,
                confidence: 73,
                node_id: "7:1".to_string(),
                covers: Vec::new(),
                props: Default::default(),
            }],
            animations: Vec::new(),
        });

        let json = serde_json::to_string(&output).expect("serialize detect output");
        assert!(json.contains("\"mode\":\"detect\""));
        assert!(json.contains("\"component\":\"badge\""));
        assert!(json.contains("\"nodeId\":\"7:1\""));
    }

    #[test]
    fn no_selection_mode_is_kebab_case() {
        let output = D2cOutput::NoSelection(NoSelectionOutput {
            version: D2C_OUTPUT_VERSION.to_string(),
            input: "-".to_string(),
        });
        let json = serde_json::to_string(&output).expect("serialize");
        assert!(json.contains("\"mode\":\"no-selection\""));
    }
}
