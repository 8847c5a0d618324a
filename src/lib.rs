//! Design-to-code (d2c) Library
//!
//! Turns an extracted design selection (a tree of frames, text and shapes)
//! into component-based JSX with utility classes, animation hints and a
//! plain-text context document for downstream generators.
//!
//! # Module Overview
//!
//! - [`tokens`] - Static color, type, spacing and radius token tables
//! - [`matching`] - Color (CIELAB), typography and layout matchers
//! - [`detect`] - Component classifiers and the consuming tree walk
//! - [`animation`] - Animation intent heuristics
//! - [`codegen`] - JSX generation
//! - [`context`] - Lossless plain-text context document
//! - [`pipeline`] - Orchestrator with cached partial regeneration
//! - [`debounce`] - Trailing-edge debouncing for rapid selection changes
//! - [`config`] - Configuration file support
//! - [`types`] - Node tree and derived result types
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use d2c_lib::{Config, Pipeline, PipelineOutcome};
//! use d2c_lib::types::{AnimationKind, Selection};
//!
//! # fn example(raw: &str) -> d2c_lib::Result<()> {
//! let selection: Selection = serde_json::from_str(raw)?;
//! let mut pipeline = Pipeline::new(&Config::default());
//!
//! if let PipelineOutcome::Generated(code) = pipeline.run(selection.into_nodes())? {
//!     println!("{}", code.markup);
//! }
//!
//! // Flip a suggestion without re-running detection.
//! let code = pipeline.toggle_animation("12:3", AnimationKind::HeroFade, false)?;
//! println!("{}", code.markup);
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod codegen;
pub mod config;
pub mod context;
pub mod debounce;
pub mod detect;
pub mod error;
pub mod matching;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod tokens;
pub mod types;

pub use animation::AnimationEngine;
pub use codegen::CodeGenerator;
pub use config::Config;
pub use context::ContextFormatter;
pub use debounce::Debouncer;
pub use detect::{default_classifiers, Classifier, ComponentDetector};
pub use error::{D2cError, ErrorCategory, ErrorPayload, Result};
pub use matching::{ColorMatcher, LayoutMapper, ResolvedTokens, TypographyMatcher};
pub use output::{D2cOutput, D2C_OUTPUT_VERSION};
pub use pipeline::{validate_tree, Pipeline, PipelineOutcome};
pub use progress::ProgressCallback;
pub use types::{
    AnimationKind, AnimationSuggestion, ComponentKind, ComponentMatch, ExtractedNode,
    GeneratedCode, Selection,
};
