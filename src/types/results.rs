//! Derived pipeline result types.
//!
//! These are produced by the matchers, detector and animation engine and
//! consumed by the code generator and context formatter. None of them are
//! mutated after creation except [`AnimationSuggestion::enabled`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Color
// ============================================================================

/// Where a color is used; token classes differ per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorContext {
    Background,
    Text,
    Border,
}

impl ColorContext {
    /// Utility class prefix used for arbitrary-value fallbacks.
    pub fn prefix(&self) -> &'static str {
        match self {
            ColorContext::Background => "bg",
            ColorContext::Text => "text",
            ColorContext::Border => "border",
        }
    }
}

impl fmt::Display for ColorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColorContext::Background => "background",
            ColorContext::Text => "text",
            ColorContext::Border => "border",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMatch {
    /// Resolved utility class (token class or arbitrary `prefix-[#hex]`).
    pub class: String,
    /// Source color as `#RRGGBB`.
    pub hex: String,
    /// Lab distance to the chosen token (sentinel for arbitrary fallbacks).
    pub distance: f32,
    pub is_exact: bool,
    pub context: ColorContext,
}

impl ColorMatch {
    pub fn is_arbitrary(&self) -> bool {
        self.class.contains("[#")
    }
}

/// Per-node color resolution for each usage context that applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ColorMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<ColorMatch>,
}

impl NodeColors {
    pub fn iter(&self) -> impl Iterator<Item = &ColorMatch> {
        self.background
            .iter()
            .chain(self.text.iter())
            .chain(self.border.iter())
    }
}

pub type ColorMatches = HashMap<String, NodeColors>;

// ============================================================================
// Typography
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyCategory {
    Serif,
    Sans,
    Mono,
}

impl fmt::Display for FamilyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FamilyCategory::Serif => "serif",
            FamilyCategory::Sans => "sans",
            FamilyCategory::Mono => "mono",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyMatch {
    pub class: String,
    pub family: FamilyCategory,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_class: Option<String>,
}

pub type TypographyMatches = HashMap<String, TypographyMatch>;

// ============================================================================
// Layout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutTokenKind {
    /// A live utility class.
    Class,
    /// Advisory suggestion; never emitted into markup.
    Hint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutToken {
    pub value: String,
    pub kind: LayoutTokenKind,
}

impl LayoutToken {
    pub fn class(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: LayoutTokenKind::Class,
        }
    }

    pub fn hint(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: LayoutTokenKind::Hint,
        }
    }

    pub fn is_class(&self) -> bool {
        self.kind == LayoutTokenKind::Class
    }
}

/// Live classes only, in emission order.
pub fn layout_classes(tokens: &[LayoutToken]) -> impl Iterator<Item = &str> {
    tokens.iter().filter(|t| t.is_class()).map(|t| t.value.as_str())
}

pub type LayoutClasses = HashMap<String, Vec<LayoutToken>>;

// ============================================================================
// Components
// ============================================================================

/// Closed set of recognized UI component kinds, in classifier battery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Button,
    SectionHeader,
    StatsGrid,
    Timeline,
    Faq,
    CtaBanner,
    Card,
    SplitSection,
    Badge,
}

impl ComponentKind {
    pub const fn all() -> [ComponentKind; 9] {
        [
            ComponentKind::Button,
            ComponentKind::SectionHeader,
            ComponentKind::StatsGrid,
            ComponentKind::Timeline,
            ComponentKind::Faq,
            ComponentKind::CtaBanner,
            ComponentKind::Card,
            ComponentKind::SplitSection,
            ComponentKind::Badge,
        ]
    }

    /// JSX tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Button => "Button",
            ComponentKind::SectionHeader => "SectionHeader",
            ComponentKind::StatsGrid => "StatsGrid",
            ComponentKind::Timeline => "Timeline",
            ComponentKind::Faq => "FAQ",
            ComponentKind::CtaBanner => "CTABanner",
            ComponentKind::Card => "Card",
            ComponentKind::SplitSection => "SplitSection",
            ComponentKind::Badge => "Badge",
        }
    }

    /// Module path the component is imported from.
    pub fn import_path(&self) -> String {
        format!("@/components/{}", self.tag())
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

pub type Props = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMatch {
    pub component: ComponentKind,
    /// Confidence in `[0, 100]`.
    pub confidence: u8,
    pub node_id: String,
    /// Following siblings of `node_id` that the match also owns, for
    /// components recognized from a run of children rather than one node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub covers: Vec<String>,
    #[serde(default)]
    pub props: Props,
}

impl ComponentMatch {
    /// Ids of every node whose subtree this match owns.
    pub fn owned_roots(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.node_id.as_str()).chain(self.covers.iter().map(String::as_str))
    }
}

// ============================================================================
// Animation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    HeroHeading,
    HeroFade,
    CountUp,
    ScrollHeading,
    TextReveal,
    Stagger,
    StaggerFast,
    ScrollFade,
    SlideIn,
    HoverLift,
}

impl AnimationKind {
    pub const fn all() -> [AnimationKind; 10] {
        [
            AnimationKind::HeroHeading,
            AnimationKind::HeroFade,
            AnimationKind::CountUp,
            AnimationKind::ScrollHeading,
            AnimationKind::TextReveal,
            AnimationKind::Stagger,
            AnimationKind::StaggerFast,
            AnimationKind::ScrollFade,
            AnimationKind::SlideIn,
            AnimationKind::HoverLift,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationKind::HeroHeading => "hero-heading",
            AnimationKind::HeroFade => "hero-fade",
            AnimationKind::CountUp => "count-up",
            AnimationKind::ScrollHeading => "scroll-heading",
            AnimationKind::TextReveal => "text-reveal",
            AnimationKind::Stagger => "stagger",
            AnimationKind::StaggerFast => "stagger-fast",
            AnimationKind::ScrollFade => "scroll-fade",
            AnimationKind::SlideIn => "slide-in",
            AnimationKind::HoverLift => "hover-lift",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnimationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AnimationKind::all()
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("unknown animation kind: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSuggestion {
    pub kind: AnimationKind,
    /// Ready-to-emit attribute string, e.g. `data-animate="hero-fade"`.
    pub attribute: String,
    pub rationale: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    pub node_id: String,
    pub enabled: bool,
}

// ============================================================================
// Generated output
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub markup: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub component_usage: BTreeMap<String, usize>,
    #[serde(default)]
    pub animations: Vec<AnimationSuggestion>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_kind_display_and_parse_round_trip() {
        for kind in AnimationKind::all() {
            let parsed = AnimationKind::from_str(&kind.to_string()).expect("parse");
            assert_eq!(parsed, kind);
        }
        assert_eq!(
            AnimationKind::from_str("COUNT-UP").unwrap(),
            AnimationKind::CountUp
        );
        assert!(AnimationKind::from_str("wiggle").is_err());
    }

    #[test]
    fn layout_classes_skip_hints() {
        let tokens = vec![
            LayoutToken::class("flex"),
            LayoutToken::hint("grid grid-cols-3"),
            LayoutToken::class("gap-4"),
        ];
        let classes: Vec<&str> = layout_classes(&tokens).collect();
        assert_eq!(classes, vec!["flex", "gap-4"]);
    }

    #[test]
    fn component_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ComponentKind::CtaBanner).unwrap();
        assert_eq!(json, "\"cta-banner\"");
        assert_eq!(ComponentKind::Faq.tag(), "FAQ");
    }
}
