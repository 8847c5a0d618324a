//! Core types used throughout the d2c library.
//!
//! - [`node`] - the immutable extracted scene tree (pipeline input)
//! - [`results`] - derived matches, suggestions and generated output

pub mod node;
pub mod results;

pub use node::{
    Alignment, AutoLayout, Effect, ExtractedNode, Font, GradientStop, LayoutDirection, NodeType,
    Padding, Paint, Rgba, ScaleMode, Selection, Sizing, SizingMode, TextCase,
};
pub use results::{
    layout_classes, AnimationKind, AnimationSuggestion, ColorContext, ColorMatch, ColorMatches,
    ComponentKind, ComponentMatch, FamilyCategory, GeneratedCode, LayoutClasses, LayoutToken,
    LayoutTokenKind, NodeColors, Props, TypographyMatch, TypographyMatches,
};
