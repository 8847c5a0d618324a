//! JSX markup generation.
//!
//! Matched component roots render as component tags with non-default props.
//! Everything else falls through to semantic markup with resolved utility
//! classes. Enabled animation suggestions attach their attribute to the
//! element for their node.

mod jsx;

pub use jsx::{escape_attr, escape_text, import_line, non_default_props, render_prop};

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::detect::signals::{font_size, is_heading_like};
use crate::tokens::{heading_level, radius_class};
use crate::types::{
    layout_classes, AnimationSuggestion, ColorMatches, ComponentKind, ComponentMatch, Effect,
    ExtractedNode, GeneratedCode, LayoutClasses, NodeType, Paint, ScaleMode, SizingMode,
    TypographyMatches,
};

const INDENT: &str = "  ";

/// Component kinds wrapped in a reveal group when animated.
const REVEAL_GROUP_KINDS: [ComponentKind; 3] = [
    ComponentKind::StatsGrid,
    ComponentKind::Timeline,
    ComponentKind::Faq,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator;

/// Borrowed inputs for one generation run.
struct Render<'a> {
    matches: HashMap<&'a str, &'a ComponentMatch>,
    /// Siblings rendered by the component anchored before them.
    covered: HashSet<&'a str>,
    animations: HashMap<&'a str, &'a AnimationSuggestion>,
    colors: &'a ColorMatches,
    typography: &'a TypographyMatches,
    layout: &'a LayoutClasses,
    lines: Vec<String>,
    usage: BTreeMap<String, usize>,
    imports: BTreeSet<String>,
    arbitrary: BTreeSet<String>,
    raw_nodes: usize,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        nodes: &[ExtractedNode],
        matches: &[ComponentMatch],
        animations: &[AnimationSuggestion],
        colors: &ColorMatches,
        typography: &TypographyMatches,
        layout: &LayoutClasses,
    ) -> GeneratedCode {
        let mut render = Render {
            matches: matches.iter().map(|m| (m.node_id.as_str(), m)).collect(),
            covered: matches
                .iter()
                .flat_map(|m| m.covers.iter().map(String::as_str))
                .collect(),
            animations: HashMap::new(),
            colors,
            typography,
            layout,
            lines: Vec::new(),
            usage: BTreeMap::new(),
            imports: BTreeSet::new(),
            arbitrary: BTreeSet::new(),
            raw_nodes: 0,
        };
        for suggestion in animations.iter().filter(|s| s.enabled) {
            render
                .animations
                .entry(suggestion.node_id.as_str())
                .or_insert(suggestion);
        }

        let visible: Vec<&ExtractedNode> = nodes.iter().filter(|n| n.visible).collect();
        if visible.len() > 1 {
            render.lines.push("<>".to_string());
            for node in &visible {
                render.node(node, 1, true);
            }
            render.lines.push("</>".to_string());
        } else if let Some(node) = visible.first() {
            render.node(node, 0, true);
        }

        let mut warnings = Vec::new();
        let matched = render.usage.values().sum::<usize>();
        if render.raw_nodes > 0 && matched > 0 {
            warnings.push(format!(
                "{} nodes rendered as raw markup",
                render.raw_nodes
            ));
        }
        if !render.arbitrary.is_empty() {
            let hexes: Vec<&str> = render.arbitrary.iter().map(String::as_str).collect();
            warnings.push(format!(
                "{} colors have no palette token: {}",
                hexes.len(),
                hexes.join(", ")
            ));
        }

        debug!(
            components = matched,
            raw = render.raw_nodes,
            "markup generated"
        );

        GeneratedCode {
            markup: render.lines.join("\n"),
            imports: render.imports.into_iter().collect(),
            component_usage: render.usage,
            animations: animations.to_vec(),
            warnings,
            context: String::new(),
        }
    }
}

impl<'a> Render<'a> {
    fn push(&mut self, depth: usize, line: String) {
        self.lines.push(format!("{}{line}", INDENT.repeat(depth)));
    }

    fn animation_attr(&self, node: &ExtractedNode) -> Option<String> {
        self.animations
            .get(node.id.as_str())
            .map(|s| s.attribute.clone())
    }

    fn node(&mut self, node: &'a ExtractedNode, depth: usize, top_level: bool) {
        if !node.visible || self.covered.contains(node.id.as_str()) {
            return;
        }
        if let Some(found) = self.matches.get(node.id.as_str()).copied() {
            self.component(node, found, depth);
            return;
        }
        self.raw_nodes += 1;
        if node.is_text() {
            self.text(node, depth);
        } else if is_image(node) {
            self.image(node, depth);
        } else if node.node_type == NodeType::Vector {
            self.vector(node, depth);
        } else {
            self.container(node, depth, top_level);
        }
    }

    fn component(&mut self, node: &ExtractedNode, found: &ComponentMatch, depth: usize) {
        let kind = found.component;
        let tag = kind.tag();
        *self.usage.entry(tag.to_string()).or_insert(0) += 1;
        self.imports.insert(import_line(kind));

        let mut attrs: Vec<String> = non_default_props(kind, &found.props)
            .into_iter()
            .map(|(key, value)| render_prop(key, value))
            .collect();
        let animation = self.animation_attr(node);
        if let Some(attr) = &animation {
            attrs.push(attr.clone());
        }

        let element = self_closing(tag, &attrs);
        if animation.is_some() && REVEAL_GROUP_KINDS.contains(&kind) {
            self.push(depth, "<div data-reveal-group>".to_string());
            self.push(depth + 1, element);
            self.push(depth, "</div>".to_string());
        } else {
            self.push(depth, element);
        }
    }

    fn text(&mut self, node: &ExtractedNode, depth: usize) {
        let tag = text_tag(node);
        let mut classes: Vec<String> = Vec::new();
        if let Some(t) = self.typography.get(&node.id) {
            classes.push(t.class.clone());
            classes.extend(t.weight_class.clone());
        }
        let colors = self.colors;
        if let Some(text) = colors.get(&node.id).and_then(|c| c.text.as_ref()) {
            if text.is_arbitrary() {
                self.arbitrary.insert(text.hex.clone());
            }
            classes.push(text.class.clone());
        }
        classes.extend(effect_classes(node));

        let attrs = self.attributes(node, classes);
        let content = escape_text(node.text().unwrap_or_default());
        self.push(depth, format!("{}{content}</{tag}>", open_tag(&tag, &attrs)));
    }

    fn image(&mut self, node: &ExtractedNode, depth: usize) {
        let fit = match image_scale_mode(node) {
            Some(ScaleMode::Fit) => "object-contain",
            _ => "object-cover",
        };
        let mut classes = vec![fit.to_string()];
        classes.extend(self.box_classes(node));
        let mut attrs = vec![
            "src=\"\"".to_string(),
            format!("alt=\"{}\"", escape_attr(&node.name)),
        ];
        attrs.extend(self.attributes(node, classes));
        self.push(depth, self_closing("img", &attrs));
    }

    fn vector(&mut self, node: &ExtractedNode, depth: usize) {
        let mut attrs = vec![
            "aria-hidden=\"true\"".to_string(),
            format!("width=\"{}\"", node.width.round()),
            format!("height=\"{}\"", node.height.round()),
        ];
        attrs.extend(self.attributes(node, Vec::new()));
        self.push(depth, self_closing("svg", &attrs));
    }

    fn container(&mut self, node: &'a ExtractedNode, depth: usize, top_level: bool) {
        let tag = if node.node_type == NodeType::Section
            || (top_level && node.node_type == NodeType::Frame)
        {
            "section"
        } else {
            "div"
        };

        let mut classes: Vec<String> = self
            .layout
            .get(&node.id)
            .map(|tokens| layout_classes(tokens).map(str::to_string).collect())
            .unwrap_or_default();
        classes.extend(self.box_classes(node));
        if node.clips_content {
            classes.push("overflow-hidden".to_string());
        }
        let attrs = self.attributes(node, classes);

        let children: Vec<&ExtractedNode> = node.children.iter().filter(|c| c.visible).collect();
        if children.is_empty() {
            self.push(depth, self_closing(tag, &attrs));
            return;
        }
        self.push(depth, open_tag(tag, &attrs));
        for child in children {
            self.node(child, depth + 1, false);
        }
        self.push(depth, format!("</{tag}>"));
    }

    /// Sizing, fill, border, radius and effect classes for a box.
    fn box_classes(&mut self, node: &ExtractedNode) -> Vec<String> {
        let mut classes = Vec::new();
        if let Some(sizing) = node.sizing {
            if sizing.horizontal == SizingMode::Fill {
                classes.push("w-full".to_string());
            }
            if sizing.vertical == SizingMode::Fill {
                classes.push("h-full".to_string());
            }
        }
        let resolved = self.colors;
        if let Some(colors) = resolved.get(&node.id) {
            if let Some(bg) = &colors.background {
                classes.push(bg.class.clone());
            }
            if let Some(border) = &colors.border {
                classes.push(border_width_class(node.stroke_weight));
                classes.push(border.class.clone());
            }
            for m in colors.iter().filter(|m| m.is_arbitrary()) {
                self.arbitrary.insert(m.hex.clone());
            }
        }
        if node.has_image_fill() && !node.children.is_empty() {
            classes.push("bg-cover bg-center".to_string());
        }
        classes.extend(radius_class(node.corner_radius, node.width, node.height));
        classes.extend(effect_classes(node));
        classes
    }

    fn attributes(&self, node: &ExtractedNode, classes: Vec<String>) -> Vec<String> {
        let mut attrs = Vec::new();
        if !classes.is_empty() {
            attrs.push(format!("className=\"{}\"", classes.join(" ")));
        }
        attrs.extend(self.animation_attr(node));
        attrs
    }
}

fn open_tag(tag: &str, attrs: &[String]) -> String {
    if attrs.is_empty() {
        format!("<{tag}>")
    } else {
        format!("<{tag} {}>", attrs.join(" "))
    }
}

fn self_closing(tag: &str, attrs: &[String]) -> String {
    if attrs.is_empty() {
        format!("<{tag} />")
    } else {
        format!("<{tag} {} />", attrs.join(" "))
    }
}

fn text_tag(node: &ExtractedNode) -> String {
    if !is_heading_like(node) {
        return "p".to_string();
    }
    let level = heading_level(font_size(node)).unwrap_or(4);
    format!("h{level}")
}

fn is_image(node: &ExtractedNode) -> bool {
    node.has_image_fill() && node.children.is_empty()
}

fn image_scale_mode(node: &ExtractedNode) -> Option<ScaleMode> {
    node.fills.iter().find_map(|p| match p {
        Paint::Image { scale_mode, .. } => Some(*scale_mode),
        _ => None,
    })
}

fn border_width_class(weight: f32) -> String {
    match weight.round() as i64 {
        w if w <= 1 => "border".to_string(),
        2 => "border-2".to_string(),
        4 => "border-4".to_string(),
        8 => "border-8".to_string(),
        _ => format!("border-[{}px]", weight),
    }
}

/// Shadow, blur and opacity utilities.
fn effect_classes(node: &ExtractedNode) -> Vec<String> {
    let mut classes = Vec::new();
    for effect in &node.effects {
        match effect {
            Effect::DropShadow { radius, .. } => classes.push(shadow_class(*radius).to_string()),
            Effect::InnerShadow { .. } => classes.push("shadow-inner".to_string()),
            Effect::LayerBlur { radius } => classes.push(blur_class("blur", *radius)),
            Effect::BackgroundBlur { radius } => {
                classes.push(blur_class("backdrop-blur", *radius))
            }
        }
    }
    if node.opacity < 1.0 {
        let step = ((node.opacity.clamp(0.0, 1.0) * 100.0) / 5.0).round() as u32 * 5;
        classes.push(format!("opacity-{step}"));
    }
    classes
}

fn shadow_class(radius: f32) -> &'static str {
    if radius <= 2.0 {
        "shadow-sm"
    } else if radius <= 8.0 {
        "shadow-md"
    } else if radius <= 16.0 {
        "shadow-lg"
    } else {
        "shadow-xl"
    }
}

fn blur_class(prefix: &str, radius: f32) -> String {
    let size = if radius <= 4.0 {
        "-sm"
    } else if radius <= 8.0 {
        ""
    } else if radius <= 12.0 {
        "-md"
    } else if radius <= 16.0 {
        "-lg"
    } else {
        "-xl"
    };
    format!("{prefix}{size}")
}
