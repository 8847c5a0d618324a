//! Token matchers.
//!
//! - [`ColorMatcher`] - nearest palette token per usage context (CIELAB)
//! - [`TypographyMatcher`] - weighted type-scale scoring
//! - [`LayoutMapper`] - auto-layout to flex utilities

mod color;
mod layout;
mod typography;

pub use color::{lab_distance, rgba_to_lab, ColorMatcher, ARBITRARY_DISTANCE};
pub use layout::{padding_classes, LayoutMapper, GRID_HINT_MIN_CHILDREN};
pub use typography::{detect_family, TypographyMatcher, LABEL_CONFIDENCE, LABEL_MAX_SIZE};

use crate::types::{ColorMatches, ExtractedNode, LayoutClasses, TypographyMatches};

/// Per-node token maps for one extraction, keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTokens {
    pub colors: ColorMatches,
    pub typography: TypographyMatches,
    pub layout: LayoutClasses,
}

impl ResolvedTokens {
    /// Resolve color, typography and layout tokens for every visible node.
    pub fn resolve(
        nodes: &[ExtractedNode],
        colors: &ColorMatcher,
        typography: &TypographyMatcher,
        layout: &LayoutMapper,
    ) -> Self {
        let mut resolved = Self::default();
        let mut stack: Vec<&ExtractedNode> = nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if !node.visible {
                continue;
            }
            let node_colors = colors.match_node(node);
            if node_colors.iter().next().is_some() {
                resolved.colors.insert(node.id.clone(), node_colors);
            }
            if let Some(font) = &node.font {
                resolved
                    .typography
                    .insert(node.id.clone(), typography.match_font(font));
            }
            let child_count = node.children.iter().filter(|c| c.visible).count();
            let tokens = layout.map(node.layout.as_ref(), child_count);
            if !tokens.is_empty() {
                resolved.layout.insert(node.id.clone(), tokens);
            }
            stack.extend(node.children.iter().rev());
        }
        resolved
    }
}
