//! Plain-text design context document.
//!
//! One numbered block per node in depth-first order, followed by the
//! detected components, animation suggestions and a legend of the color
//! tokens in use. Every node field with a visible effect is written out.

use std::collections::BTreeMap;

use crate::tokens::{radius_class, COLOR_TOKENS};
use crate::types::{
    AnimationSuggestion, AutoLayout, ColorMatch, ColorMatches, ComponentMatch, Effect,
    ExtractedNode, LayoutClasses, LayoutTokenKind, Paint, Rgba, TypographyMatches,
};

/// Text content longer than this is truncated.
pub const MAX_TEXT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextFormatter;

struct Inputs<'a> {
    colors: &'a ColorMatches,
    typography: &'a TypographyMatches,
    layout: &'a LayoutClasses,
}

impl ContextFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        nodes: &[ExtractedNode],
        colors: &ColorMatches,
        typography: &TypographyMatches,
        layout: &LayoutClasses,
        matches: &[ComponentMatch],
        animations: &[AnimationSuggestion],
    ) -> String {
        let inputs = Inputs {
            colors,
            typography,
            layout,
        };
        let mut lines = vec![
            "# Design context".to_string(),
            String::new(),
            "## Nodes".to_string(),
        ];

        let mut stack: Vec<(String, &ExtractedNode)> = nodes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, n)| ((i + 1).to_string(), n))
            .collect();
        while let Some((path, node)) = stack.pop() {
            lines.push(String::new());
            node_block(&mut lines, &path, node, &inputs);
            if !node.visible {
                continue;
            }
            stack.extend(
                node.children
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, child)| (format!("{path}.{}", i + 1), child)),
            );
        }

        lines.push(String::new());
        lines.push("## Detected components".to_string());
        if matches.is_empty() {
            lines.push("(none)".to_string());
        }
        for m in matches {
            let props = serde_json::to_string(&m.props).unwrap_or_else(|_| "{}".to_string());
            let anchor = if m.covers.is_empty() {
                m.node_id.clone()
            } else {
                format!("{} + {}", m.node_id, m.covers.join(", "))
            };
            lines.push(format!(
                "- {} on {anchor} (confidence {}): {props}",
                m.component.tag(),
                m.confidence
            ));
        }

        lines.push(String::new());
        lines.push("## Animation suggestions".to_string());
        if animations.is_empty() {
            lines.push("(none)".to_string());
        }
        for s in animations {
            let state = if s.enabled { "enabled" } else { "disabled" };
            lines.push(format!(
                "- {}: {} [{}] ({:.2}, {state}) {}",
                s.node_id, s.kind, s.attribute, s.confidence, s.rationale
            ));
        }

        lines.push(String::new());
        lines.push("## Color tokens".to_string());
        let legend = color_legend(colors);
        if legend.is_empty() {
            lines.push("(none)".to_string());
        }
        for (class, hex) in legend {
            lines.push(format!("- {class}: {hex}"));
        }

        lines.join("\n")
    }
}

fn node_block(lines: &mut Vec<String>, path: &str, node: &ExtractedNode, inputs: &Inputs<'_>) {
    let name = if node.name.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", escape(&node.name))
    };
    lines.push(format!(
        "[{path}] {}{name} #{} {}x{} @ ({}, {})",
        node.node_type.as_str(),
        node.id,
        num(node.width),
        num(node.height),
        num(node.x),
        num(node.y)
    ));
    let mut field = |text: String| lines.push(format!("  {text}"));

    if !node.visible {
        field("hidden: true (subtree omitted)".to_string());
        return;
    }
    if let Some(component) = &node.component_name {
        field(format!("instance of: {component}"));
    }
    if let Some(sizing) = node.sizing {
        field(format!(
            "sizing: {:?} x {:?}",
            sizing.horizontal, sizing.vertical
        ));
    }

    let resolved = inputs.colors.get(&node.id);
    let mut first_solid = true;
    for paint in &node.fills {
        let token = if first_solid && paint.solid_color().is_some() {
            first_solid = false;
            resolved.and_then(|c| c.background.as_ref().or(c.text.as_ref()))
        } else {
            None
        };
        field(format!("fill: {}", describe_paint(paint, token)));
    }
    if node.stroke_weight > 0.0 {
        let border = resolved.and_then(|c| c.border.as_ref());
        for (i, paint) in node.strokes.iter().enumerate() {
            let token = if i == 0 { border } else { None };
            field(format!(
                "stroke: {}px {}",
                num(node.stroke_weight),
                describe_paint(paint, token)
            ));
        }
    }
    if let Some(class) = radius_class(node.corner_radius, node.width, node.height) {
        field(format!("radius: {}px -> {class}", num(node.corner_radius)));
    }
    if node.opacity < 1.0 {
        field(format!("opacity: {}", num(node.opacity)));
    }
    if node.rotation != 0.0 {
        field(format!("rotation: {}deg", num(node.rotation)));
    }
    if node.clips_content {
        field("clip: overflow hidden".to_string());
    }
    for effect in &node.effects {
        field(format!("effect: {}", describe_effect(effect)));
    }
    if let Some(layout) = &node.layout {
        field(format!(
            "layout: {}",
            describe_layout(layout, inputs.layout.get(&node.id).map(Vec::as_slice))
        ));
    }
    if let Some(text) = node.text() {
        field(format!("text: \"{}\"", escape(&truncate(text, MAX_TEXT_CHARS))));
    }
    if let Some(font) = &node.font {
        let mut line = format!("font: {} {} {}px", font.family, font.style, num(font.size));
        if let Some(lh) = font.line_height {
            line.push_str(&format!(" / {}px", num(lh)));
        }
        if font.letter_spacing != 0.0 {
            line.push_str(&format!(" tracking {}", num(font.letter_spacing)));
        }
        line.push_str(&format!(" case {:?}", font.text_case));
        if let Some(t) = inputs.typography.get(&node.id) {
            line.push_str(&format!(
                " -> {} ({}, {:.2})",
                t.class, t.family, t.confidence
            ));
            if let Some(weight) = &t.weight_class {
                line.push_str(&format!(" {weight}"));
            }
        }
        field(line);
    }
}

fn describe_paint(paint: &Paint, token: Option<&ColorMatch>) -> String {
    match paint {
        Paint::Solid { color, opacity } => {
            let mut out = color_label(*color, *opacity);
            if let Some(m) = token {
                out.push_str(&format!(" -> {}", m.class));
                if m.is_arbitrary() {
                    out.push_str(" (arbitrary)");
                } else if !m.is_exact {
                    out.push_str(&format!(" (approx, delta {:.2})", m.distance));
                }
            }
            out
        }
        Paint::GradientLinear { stops, opacity } | Paint::GradientRadial { stops, opacity } => {
            let kind = if matches!(paint, Paint::GradientLinear { .. }) {
                "linear-gradient"
            } else {
                "radial-gradient"
            };
            let stops: Vec<String> = stops
                .iter()
                .map(|s| format!("{} {}", s.color.to_hex(), num(s.position)))
                .collect();
            let mut out = format!("{kind}({})", stops.join(", "));
            if *opacity < 1.0 {
                out.push_str(&format!(" opacity {}", num(*opacity)));
            }
            out
        }
        Paint::Image {
            scale_mode,
            image_hash,
            opacity,
        } => {
            let mut out = format!("image scale {:?}", scale_mode);
            if let Some(hash) = image_hash {
                out.push_str(&format!(" ({hash})"));
            }
            if *opacity < 1.0 {
                out.push_str(&format!(" opacity {}", num(*opacity)));
            }
            out
        }
    }
}

fn color_label(color: Rgba, opacity: f32) -> String {
    let alpha = color.a * opacity;
    if alpha < 1.0 {
        format!("{} alpha {}", color.to_hex(), num(alpha))
    } else {
        color.to_hex()
    }
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::DropShadow {
            color,
            offset_x,
            offset_y,
            radius,
            spread,
        }
        | Effect::InnerShadow {
            color,
            offset_x,
            offset_y,
            radius,
            spread,
        } => {
            let kind = if matches!(effect, Effect::DropShadow { .. }) {
                "drop-shadow"
            } else {
                "inner-shadow"
            };
            format!(
                "{kind} {} offset ({}, {}) blur {} spread {}",
                color_label(*color, 1.0),
                num(*offset_x),
                num(*offset_y),
                num(*radius),
                num(*spread)
            )
        }
        Effect::LayerBlur { radius } => format!("layer-blur {}", num(*radius)),
        Effect::BackgroundBlur { radius } => format!("background-blur {}", num(*radius)),
    }
}

fn describe_layout(layout: &AutoLayout, tokens: Option<&[crate::types::LayoutToken]>) -> String {
    let p = &layout.padding;
    let mut out = format!(
        "{:?} gap {} padding {}/{}/{}/{} align {:?}/{:?}",
        layout.direction,
        num(layout.gap),
        num(p.top),
        num(p.right),
        num(p.bottom),
        num(p.left),
        layout.primary_align,
        layout.counter_align
    );
    if layout.wrap {
        out.push_str(" wrap");
    }
    if let Some(tokens) = tokens {
        let classes: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == LayoutTokenKind::Class)
            .map(|t| t.value.as_str())
            .collect();
        if !classes.is_empty() {
            out.push_str(&format!(" -> {}", classes.join(" ")));
        }
        for hint in tokens.iter().filter(|t| t.kind == LayoutTokenKind::Hint) {
            out.push_str(&format!(" (hint: {})", hint.value));
        }
    }
    out
}

/// Used color classes with their palette hex, sorted by class.
fn color_legend(colors: &ColorMatches) -> BTreeMap<String, String> {
    let mut legend = BTreeMap::new();
    for m in colors.values().flat_map(|c| c.iter()) {
        let hex = COLOR_TOKENS
            .iter()
            .find(|t| t.classes.iter().any(|(class, _)| *class == m.class))
            .map(|t| t.hex.to_string())
            .unwrap_or_else(|| m.hex.clone());
        legend.entry(m.class.clone()).or_insert(hex);
    }
    legend
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
}

/// Compact number: integers without a fractional part, else two decimals.
fn num(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
