#![allow(dead_code)]

use d2c_lib::types::{
    Alignment, AutoLayout, ExtractedNode, Font, LayoutDirection, NodeType, Padding, Paint, Rgba,
    TextCase,
};

pub fn text(id: &str, content: &str, family: &str, size: f32) -> ExtractedNode {
    let mut node = ExtractedNode::new(id, NodeType::Text);
    node.name = content.to_string();
    node.characters = Some(content.to_string());
    node.height = size * 1.2;
    node.width = (content.chars().count() as f32 * size * 0.55).max(8.0);
    node.font = Some(Font {
        family: family.to_string(),
        style: "Regular".to_string(),
        size,
        line_height: None,
        letter_spacing: 0.0,
        text_case: TextCase::Original,
    });
    node
}

pub fn frame(id: &str, x: f32, y: f32, w: f32, h: f32, children: Vec<ExtractedNode>) -> ExtractedNode {
    let mut node = ExtractedNode::new(id, NodeType::Frame);
    node.name = id.to_string();
    node.x = x;
    node.y = y;
    node.width = w;
    node.height = h;
    node.children = children;
    node
}

pub fn auto(direction: LayoutDirection, gap: f32) -> AutoLayout {
    AutoLayout {
        direction,
        gap,
        padding: Padding::default(),
        primary_align: Alignment::Min,
        counter_align: Alignment::Min,
        wrap: false,
    }
}

pub fn button(id: &str, label: &str, hex: &str, x: f32, y: f32) -> ExtractedNode {
    let mut label = text(&format!("{id}-label"), label, "Inter", 16.0);
    label.x = x + 20.0;
    label.y = y + 12.0;
    let mut node = frame(id, x, y, 140.0, 44.0, vec![label]);
    node.fills = vec![Paint::Solid {
        color: Rgba::from_hex(hex).expect("hex"),
        opacity: 1.0,
    }];
    node.corner_radius = 8.0;
    let mut layout = auto(LayoutDirection::Horizontal, 8.0);
    layout.padding = Padding {
        top: 12.0,
        right: 20.0,
        bottom: 12.0,
        left: 20.0,
    };
    node.layout = Some(layout);
    node
}

/// Eyebrow label and serif title stacked above a primary and a secondary button.
pub fn hero_selection() -> Vec<ExtractedNode> {
    let mut eyebrow = text("eyebrow", "OUR SERVICES", "Inter", 12.0);
    if let Some(font) = eyebrow.font.as_mut() {
        font.text_case = TextCase::Upper;
    }
    let mut title = text("title", "What we build", "Playfair Display", 36.0);
    title.y = 24.0;

    let mut header = frame("header", 0.0, 0.0, 600.0, 80.0, vec![eyebrow, title]);
    header.layout = Some(auto(LayoutDirection::Vertical, 8.0));

    let mut actions = frame(
        "actions",
        0.0,
        112.0,
        296.0,
        44.0,
        vec![
            button("primary", "Get started", "#E8572A", 0.0, 112.0),
            button("secondary", "Contact us", "#1A1A1A", 156.0, 112.0),
        ],
    );
    actions.layout = Some(auto(LayoutDirection::Horizontal, 16.0));

    let mut hero = frame("hero", 0.0, 0.0, 600.0, 156.0, vec![header, actions]);
    hero.layout = Some(auto(LayoutDirection::Vertical, 32.0));
    vec![hero]
}

/// Eyebrow, serif title and two buttons directly inside one vertical frame.
pub fn flat_hero_selection() -> Vec<ExtractedNode> {
    let mut eyebrow = text("eyebrow", "OUR SERVICES", "Inter", 12.0);
    if let Some(font) = eyebrow.font.as_mut() {
        font.text_case = TextCase::Upper;
    }
    let mut title = text("title", "What we build", "Playfair Display", 36.0);
    title.y = 24.0;

    let mut hero = frame(
        "hero",
        0.0,
        0.0,
        600.0,
        156.0,
        vec![
            eyebrow,
            title,
            button("primary", "Get started", "#E8572A", 0.0, 112.0),
            button("secondary", "Contact us", "#1A1A1A", 156.0, 112.0),
        ],
    );
    hero.layout = Some(auto(LayoutDirection::Vertical, 16.0));
    vec![hero]
}

pub fn selection_json(nodes: &[ExtractedNode]) -> String {
    serde_json::to_string(&serde_json::json!({ "nodes": nodes })).expect("serialize selection")
}
