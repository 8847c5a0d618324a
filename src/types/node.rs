//! Extracted scene-node snapshot types.
//!
//! These types mirror the plain node tree produced by the upstream extraction
//! step. The shape is camelCase JSON with Figma-style upper-case tags. Every
//! optional field means "feature absent" when missing.

use serde::{Deserialize, Serialize};

/// Closed set of scene node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Frame,
    Group,
    Text,
    Rectangle,
    Instance,
    Component,
    Section,
    Ellipse,
    Vector,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Text => "TEXT",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Instance => "INSTANCE",
            NodeType::Component => "COMPONENT",
            NodeType::Section => "SECTION",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Vector => "VECTOR",
        }
    }

    /// Node kinds that can own children and act as layout containers.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeType::Frame
                | NodeType::Group
                | NodeType::Instance
                | NodeType::Component
                | NodeType::Section
        )
    }
}

/// RGBA color with channels in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "one")]
    pub a: f32,
}

impl Rgba {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Upper-case `#RRGGBB` representation; alpha is ignored.
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b)
        )
    }
}

fn one() -> f32 {
    1.0
}

fn visible_default() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgba,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    #[serde(rename_all = "camelCase")]
    Solid {
        color: Rgba,
        #[serde(default = "one")]
        opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    GradientLinear {
        #[serde(default)]
        stops: Vec<GradientStop>,
        #[serde(default = "one")]
        opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    GradientRadial {
        #[serde(default)]
        stops: Vec<GradientStop>,
        #[serde(default = "one")]
        opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default)]
        scale_mode: ScaleMode,
        #[serde(default)]
        image_hash: Option<String>,
        #[serde(default = "one")]
        opacity: f32,
    },
}

impl Paint {
    pub fn solid_color(&self) -> Option<Rgba> {
        match self {
            Paint::Solid { color, opacity } if *opacity > 0.0 && color.a > 0.0 => Some(*color),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Paint::Image { .. })
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Paint::Solid { opacity, .. }
            | Paint::GradientLinear { opacity, .. }
            | Paint::GradientRadial { opacity, .. }
            | Paint::Image { opacity, .. } => *opacity,
        }
    }
}

/// Shadow and blur effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    #[serde(rename_all = "camelCase")]
    DropShadow {
        color: Rgba,
        #[serde(default)]
        offset_x: f32,
        #[serde(default)]
        offset_y: f32,
        #[serde(default)]
        radius: f32,
        #[serde(default)]
        spread: f32,
    },
    #[serde(rename_all = "camelCase")]
    InnerShadow {
        color: Rgba,
        #[serde(default)]
        offset_x: f32,
        #[serde(default)]
        offset_y: f32,
        #[serde(default)]
        radius: f32,
        #[serde(default)]
        spread: f32,
    },
    LayerBlur {
        #[serde(default)]
        radius: f32,
    },
    BackgroundBlur {
        #[serde(default)]
        radius: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
}

/// Font attributes of a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub family: String,
    #[serde(default)]
    pub style: String,
    pub size: f32,
    /// Line height in pixels; `None` means "auto".
    #[serde(default)]
    pub line_height: Option<f32>,
    #[serde(default)]
    pub letter_spacing: f32,
    #[serde(default)]
    pub text_case: TextCase,
}

impl Font {
    pub fn line_height_ratio(&self) -> Option<f32> {
        match self.line_height {
            Some(lh) if self.size > 0.0 && lh > 0.0 => Some(lh / self.size),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Padding {
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub bottom: f32,
    #[serde(default)]
    pub left: f32,
}

impl Padding {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Auto-layout settings of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLayout {
    pub direction: LayoutDirection,
    #[serde(default)]
    pub gap: f32,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub primary_align: Alignment,
    #[serde(default)]
    pub counter_align: Alignment,
    #[serde(default)]
    pub wrap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    #[default]
    Fixed,
    Hug,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sizing {
    #[serde(default)]
    pub horizontal: SizingMode,
    #[serde(default)]
    pub vertical: SizingMode,
}

/// One node of the extracted scene tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub stroke_weight: f32,
    #[serde(default)]
    pub corner_radius: f32,
    #[serde(default = "one")]
    pub opacity: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub clips_content: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<Sizing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<AutoLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExtractedNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
}

impl ExtractedNode {
    /// A bare node with defaults for every optional attribute.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            node_type,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            visible: true,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            corner_radius: 0.0,
            opacity: 1.0,
            effects: Vec::new(),
            clips_content: false,
            sizing: None,
            font: None,
            layout: None,
            characters: None,
            children: Vec::new(),
            component_name: None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// First visible solid fill color.
    pub fn solid_fill(&self) -> Option<Rgba> {
        self.fills.iter().find_map(Paint::solid_color)
    }

    /// First visible solid stroke color, only when the stroke has weight.
    pub fn solid_stroke(&self) -> Option<Rgba> {
        if self.stroke_weight <= 0.0 {
            return None;
        }
        self.strokes.iter().find_map(Paint::solid_color)
    }

    pub fn has_image_fill(&self) -> bool {
        self.fills.iter().any(Paint::is_image)
    }

    pub fn has_drop_shadow(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, Effect::DropShadow { .. }))
    }

    pub fn text(&self) -> Option<&str> {
        self.characters.as_deref().map(str::trim)
    }

    pub fn is_auto_layout(&self) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|l| l.direction != LayoutDirection::None)
    }

    pub fn direction(&self) -> Option<LayoutDirection> {
        self.layout
            .as_ref()
            .map(|l| l.direction)
            .filter(|d| *d != LayoutDirection::None)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Depth-first pre-order iterator over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Text descendants (including self) in document order.
    pub fn text_nodes(&self) -> Vec<&ExtractedNode> {
        self.descendants().filter(|n| n.is_text()).collect()
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a ExtractedNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ExtractedNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Input envelope: either a bare node array or `{ "nodes": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Nodes(Vec<ExtractedNode>),
    Wrapped { nodes: Vec<ExtractedNode> },
}

impl Selection {
    pub fn into_nodes(self) -> Vec<ExtractedNode> {
        match self {
            Selection::Nodes(nodes) | Selection::Wrapped { nodes } => nodes,
        }
    }
}
