//! Animation intent heuristics.
//!
//! Suggestions come from two passes. The first maps detected components to a
//! fixed animation kind. The second walks every remaining visible node and
//! applies [`PASS_TWO_RULES`] in order; the first rule that fires claims the
//! node. Each node id receives at most one suggestion.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::detect::signals::{
    font_size, is_heading_like, is_sans, is_serif, is_stacked, parse_numeric, similar_shape,
    text_of, visible_children, NumericText,
};
use crate::types::{
    AnimationKind, AnimationSuggestion, ComponentKind, ComponentMatch, ExtractedNode,
};

pub const DEFAULT_HERO_THRESHOLD_Y: f32 = 800.0;
pub const DEFAULT_SIBLING_WINDOW: f32 = 200.0;

const LARGE_SERIF_SIZE: f32 = 40.0;
const BODY_MAX_SIZE: f32 = 20.0;
const STAGGER_MIN_CHILDREN: usize = 3;
const STAGGER_FAST_MIN_CHILDREN: usize = 4;
const BLOCK_MIN_WIDTH: f32 = 300.0;
const BLOCK_MIN_HEIGHT: f32 = 200.0;
const OVERLAP_SLACK: f32 = 4.0;

const STAGGER_DELAY: &str = "0.1";
const STAGGER_FAST_DELAY: &str = "0.06";

/// A visible node together with its parent, as seen by the second pass.
struct Flat<'a> {
    node: &'a ExtractedNode,
    parent: Option<&'a ExtractedNode>,
}

struct Draft {
    kind: AnimationKind,
    attribute: String,
    rationale: String,
    confidence: f32,
}

impl Draft {
    fn new(kind: AnimationKind, rationale: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind,
            attribute: animate_attribute(kind),
            rationale: rationale.into(),
            confidence,
        }
    }

    fn count_up(numeric: &NumericText, rationale: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind: AnimationKind::CountUp,
            attribute: count_up_attribute(numeric),
            rationale: rationale.into(),
            confidence,
        }
    }

    fn into_suggestion(self, node_id: &str) -> AnimationSuggestion {
        AnimationSuggestion {
            kind: self.kind,
            attribute: self.attribute,
            rationale: self.rationale,
            confidence: self.confidence,
            node_id: node_id.to_string(),
            enabled: true,
        }
    }
}

/// Suggestions deduplicated by node id; the first one recorded wins.
#[derive(Default)]
struct Suggestions {
    seen: HashSet<String>,
    list: Vec<AnimationSuggestion>,
}

impl Suggestions {
    fn push(&mut self, node_id: &str, draft: Draft) {
        if self.seen.insert(node_id.to_string()) {
            self.list.push(draft.into_suggestion(node_id));
        }
    }

    fn contains(&self, node_id: &str) -> bool {
        self.seen.contains(node_id)
    }
}

type Rule = fn(&AnimationEngine, &Flat<'_>) -> Option<Draft>;

/// Second-pass heuristics in priority order.
const PASS_TWO_RULES: [Rule; 7] = [
    hero_heading,
    hero_fade,
    count_up,
    scroll_heading,
    text_reveal,
    stagger,
    scroll_fade,
];

#[derive(Debug, Clone, Copy)]
pub struct AnimationEngine {
    pub hero_threshold_y: f32,
    pub sibling_window: f32,
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HERO_THRESHOLD_Y, DEFAULT_SIBLING_WINDOW)
    }
}

impl AnimationEngine {
    pub fn new(hero_threshold_y: f32, sibling_window: f32) -> Self {
        Self {
            hero_threshold_y,
            sibling_window,
        }
    }

    pub fn suggest(
        &self,
        nodes: &[ExtractedNode],
        matches: &[ComponentMatch],
    ) -> Vec<AnimationSuggestion> {
        let flat = flatten(nodes);
        let index: HashMap<&str, &ExtractedNode> =
            flat.iter().map(|f| (f.node.id.as_str(), f.node)).collect();

        let mut out = Suggestions::default();

        // Pass 1: detected components.
        let mut owned: HashSet<&str> = HashSet::new();
        for m in matches {
            let Some(root) = index.get(m.node_id.as_str()).copied() else {
                continue;
            };
            for id in m.owned_roots() {
                if let Some(owned_root) = index.get(id).copied() {
                    owned.extend(owned_root.descendants().map(|d| d.id.as_str()));
                }
            }

            if let Some(kind) = component_animation(m.component) {
                let rationale = format!("Detected {} component", m.component.tag());
                out.push(&m.node_id, Draft::new(kind, rationale, 0.9));
            }
            if m.component == ComponentKind::StatsGrid {
                for text in root.text_nodes().into_iter().filter(|t| t.visible) {
                    if let Some(numeric) = parse_numeric(&text_of(text)) {
                        let draft = Draft::count_up(&numeric, "Numeric stat in grid", 0.9);
                        out.push(&text.id, draft);
                    }
                }
            }
        }

        // Pass 2: positional and typographic heuristics on unowned nodes.
        for entry in &flat {
            let id = entry.node.id.as_str();
            if owned.contains(id) || out.contains(id) {
                continue;
            }
            if let Some(draft) = PASS_TWO_RULES.iter().find_map(|rule| rule(self, entry)) {
                out.push(id, draft);
            }
        }

        let out = out.list;
        debug!(count = out.len(), "animation suggestions");
        out
    }

    fn above_fold(&self, node: &ExtractedNode) -> bool {
        node.y < self.hero_threshold_y
    }
}

/// Visible nodes in pre-order with their parents; hidden subtrees are skipped.
fn flatten(nodes: &[ExtractedNode]) -> Vec<Flat<'_>> {
    let mut out = Vec::new();
    let mut stack: Vec<Flat<'_>> = nodes
        .iter()
        .rev()
        .map(|node| Flat { node, parent: None })
        .collect();
    while let Some(entry) = stack.pop() {
        if !entry.node.visible {
            continue;
        }
        let node = entry.node;
        stack.extend(node.children.iter().rev().map(|child| Flat {
            node: child,
            parent: Some(node),
        }));
        out.push(entry);
    }
    out
}

fn component_animation(kind: ComponentKind) -> Option<AnimationKind> {
    match kind {
        ComponentKind::StatsGrid | ComponentKind::Timeline | ComponentKind::Faq => {
            Some(AnimationKind::Stagger)
        }
        ComponentKind::SectionHeader => Some(AnimationKind::ScrollHeading),
        ComponentKind::CtaBanner => Some(AnimationKind::ScrollFade),
        ComponentKind::Card | ComponentKind::Button => Some(AnimationKind::HoverLift),
        ComponentKind::SplitSection => Some(AnimationKind::SlideIn),
        ComponentKind::Badge => None,
    }
}

/// `data-animate="…"` plus any kind-specific parameters.
pub fn animate_attribute(kind: AnimationKind) -> String {
    match kind {
        AnimationKind::Stagger => {
            format!(r#"data-animate="{kind}" data-stagger="{STAGGER_DELAY}""#)
        }
        AnimationKind::StaggerFast => {
            format!(r#"data-animate="{kind}" data-stagger="{STAGGER_FAST_DELAY}""#)
        }
        _ => format!(r#"data-animate="{kind}""#),
    }
}

fn count_up_attribute(numeric: &NumericText) -> String {
    let mut attr = format!(
        r#"data-animate="{}" data-count-to="{}""#,
        AnimationKind::CountUp,
        format_count(numeric.value)
    );
    if !numeric.prefix.is_empty() {
        attr.push_str(&format!(r#" data-count-prefix="{}""#, numeric.prefix));
    }
    if !numeric.suffix.is_empty() {
        attr.push_str(&format!(r#" data-count-suffix="{}""#, numeric.suffix));
    }
    attr
}

fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn is_large_serif(node: &ExtractedNode) -> bool {
    node.is_text() && is_serif(node) && font_size(node) >= LARGE_SERIF_SIZE
}

fn hero_heading(engine: &AnimationEngine, entry: &Flat<'_>) -> Option<Draft> {
    let node = entry.node;
    (engine.above_fold(node) && is_large_serif(node))
        .then(|| Draft::new(AnimationKind::HeroHeading, "Large serif heading above the fold", 0.9))
}

fn hero_fade(engine: &AnimationEngine, entry: &Flat<'_>) -> Option<Draft> {
    let node = entry.node;
    (engine.above_fold(node) && node.is_text())
        .then(|| Draft::new(AnimationKind::HeroFade, "Text above the fold", 0.7))
}

fn count_up(_engine: &AnimationEngine, entry: &Flat<'_>) -> Option<Draft> {
    let node = entry.node;
    if !node.is_text() {
        return None;
    }
    let numeric = parse_numeric(&text_of(node))?;
    Some(Draft::count_up(&numeric, "Numeric text", 0.85))
}

fn scroll_heading(engine: &AnimationEngine, entry: &Flat<'_>) -> Option<Draft> {
    let node = entry.node;
    (!engine.above_fold(node) && is_large_serif(node)).then(|| {
        Draft::new(
            AnimationKind::ScrollHeading,
            "Large serif heading below the fold",
            0.8,
        )
    })
}

fn text_reveal(engine: &AnimationEngine, entry: &Flat<'_>) -> Option<Draft> {
    let node = entry.node;
    if engine.above_fold(node) || !node.is_text() || !is_sans(node) {
        return None;
    }
    if font_size(node) > BODY_MAX_SIZE {
        return None;
    }
    let parent = entry.parent?;
    let paired = parent.children.iter().any(|sibling| {
        if sibling.id == node.id || !sibling.visible || !is_heading_like(sibling) {
            return false;
        }
        let gap = node.y - sibling.bottom();
        sibling.y < node.y && gap >= -OVERLAP_SLACK && gap <= engine.sibling_window
    });
    paired.then(|| {
        Draft::new(
            AnimationKind::TextReveal,
            "Body text paired with a heading above",
            0.65,
        )
    })
}

fn stagger(_engine: &AnimationEngine, entry: &Flat<'_>) -> Option<Draft> {
    let node = entry.node;
    if !node.node_type.is_container() {
        return None;
    }
    let children = visible_children(node);
    let (first, rest) = children.split_first()?;
    if children.len() < STAGGER_MIN_CHILDREN || !rest.iter().all(|c| similar_shape(first, c)) {
        return None;
    }
    if children.len() >= STAGGER_FAST_MIN_CHILDREN && is_stacked(node, &children) {
        return Some(Draft::new(
            AnimationKind::StaggerFast,
            format!("{} similar items stacked vertically", children.len()),
            0.7,
        ));
    }
    Some(Draft::new(
        AnimationKind::Stagger,
        format!("{} similar items", children.len()),
        0.75,
    ))
}

fn scroll_fade(engine: &AnimationEngine, entry: &Flat<'_>) -> Option<Draft> {
    let node = entry.node;
    let block = node.node_type.is_container()
        && node.width >= BLOCK_MIN_WIDTH
        && node.height >= BLOCK_MIN_HEIGHT;
    (block && !engine.above_fold(node))
        .then(|| Draft::new(AnimationKind::ScrollFade, "Content block below the fold", 0.6))
}
