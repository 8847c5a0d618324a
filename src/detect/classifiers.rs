//! The classifier battery.
//!
//! Each classifier inspects one candidate node and either declines or
//! returns a raw confidence (base score plus corroborating bonuses) with the
//! props needed to reproduce the component. Classifiers never fail; a missing
//! signal just means "not this component".

use serde_json::{json, Value};

use crate::types::{ComponentKind, ExtractedNode, NodeType, Props};

use super::signals::{
    font_size, has_icon, is_date_marker, is_decoration, is_framelike, is_heading_like, is_icon,
    is_row, is_rule, is_serif, is_stacked, is_uppercase, is_year, largest_text, name_hints,
    parse_numeric, text_of, visible_children, visible_texts, word_count, Signals, Tone,
};

/// A classifier's verdict before threshold filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub confidence: u32,
    pub props: Props,
}

impl Candidate {
    fn new(confidence: u32) -> Self {
        Self {
            confidence,
            props: Props::new(),
        }
    }

    fn prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    fn prop_opt(self, key: &str, value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.prop(key, v),
            _ => self,
        }
    }
}

pub trait Classifier {
    fn kind(&self) -> ComponentKind;
    fn classify(&self, node: &ExtractedNode, signals: &Signals<'_>) -> Option<Candidate>;

    /// Classify a leading run of `parent`'s visible children that is followed
    /// by unrelated siblings. Most components only exist as a whole node.
    fn classify_run(
        &self,
        _parent: &ExtractedNode,
        _run: &[&ExtractedNode],
        _signals: &Signals<'_>,
    ) -> Option<Candidate> {
        None
    }
}

/// Battery in evaluation order, most structurally specific first.
pub fn default_classifiers() -> Vec<Box<dyn Classifier>> {
    vec![
        Box::new(ButtonClassifier),
        Box::new(SectionHeaderClassifier),
        Box::new(StatsGridClassifier),
        Box::new(TimelineClassifier),
        Box::new(FaqClassifier),
        Box::new(CtaBannerClassifier),
        Box::new(CardClassifier),
        Box::new(SplitSectionClassifier),
        Box::new(BadgeClassifier),
    ]
}

// ============================================================================
// Button
// ============================================================================

pub struct ButtonClassifier;

impl Classifier for ButtonClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Button
    }

    fn classify(&self, node: &ExtractedNode, signals: &Signals<'_>) -> Option<Candidate> {
        if !is_framelike(node) {
            return None;
        }
        if !(32.0..=64.0).contains(&node.height) || !(48.0..=420.0).contains(&node.width) {
            return None;
        }
        let texts = visible_texts(node);
        let [label] = texts.as_slice() else {
            return None;
        };
        let text = text_of(label);
        if text.chars().count() > 32 || word_count(&text) > 4 {
            return None;
        }
        if !(12.0..=20.0).contains(&font_size(label)) {
            return None;
        }

        let named = name_hints(node, &["button", "btn"]);
        let fill = node.solid_fill();
        let stroke = node.solid_stroke();
        if fill.is_none() && stroke.is_none() && !named {
            return None;
        }

        let mut confidence = 60;
        let radius = node.corner_radius;
        if (4.0..=24.0).contains(&radius) || radius >= node.height / 2.0 - 0.5 {
            confidence += 8;
        }
        let padded = match &node.layout {
            Some(layout) => layout.padding.left >= 12.0 && layout.padding.right >= 12.0,
            None => label.x - node.x >= 12.0,
        };
        if padded {
            confidence += 5;
        }
        if named {
            confidence += 10;
        }

        let variant = match (fill.map(|c| signals.tone(c)), stroke) {
            (Some(Tone::Accent), _) => "primary",
            (Some(Tone::Dark) | Some(Tone::Brand), _) => "dark",
            (Some(Tone::Danger), _) => "destructive",
            (Some(Tone::Light), _) => "secondary",
            (Some(_), _) => "primary",
            (None, Some(_)) => "outline",
            (None, None) => "ghost",
        };
        let size = if node.height <= 36.0 {
            "sm"
        } else if node.height <= 48.0 {
            "md"
        } else {
            "lg"
        };

        Some(
            Candidate::new(confidence)
                .prop("label", text)
                .prop("variant", variant)
                .prop("size", size)
                .prop("hasIcon", has_icon(node)),
        )
    }
}

// ============================================================================
// Section header
// ============================================================================

pub struct SectionHeaderClassifier;

impl Classifier for SectionHeaderClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::SectionHeader
    }

    fn classify(&self, node: &ExtractedNode, _signals: &Signals<'_>) -> Option<Candidate> {
        if !node.node_type.is_container() {
            return None;
        }
        let children = visible_children(node);
        if !children.iter().all(|c| c.is_text()) {
            return None;
        }
        header_from_texts(node, &children)
    }

    /// Eyebrow and title at the top of a mixed container, e.g. above a row
    /// of buttons.
    fn classify_run(
        &self,
        parent: &ExtractedNode,
        run: &[&ExtractedNode],
        _signals: &Signals<'_>,
    ) -> Option<Candidate> {
        if !parent.node_type.is_container() || !run.iter().all(|c| c.is_text()) {
            return None;
        }
        header_from_texts(parent, run)
    }
}

/// Shared scoring for a stacked eyebrow / title / subtitle text group inside
/// `node`.
fn header_from_texts(node: &ExtractedNode, children: &[&ExtractedNode]) -> Option<Candidate> {
    if !(2..=3).contains(&children.len()) {
        return None;
    }
    if !is_stacked(node, children) {
        return None;
    }

    let heading = largest_text(children)?;
    if font_size(heading) < 28.0 {
        return None;
    }
    let heading_idx = children.iter().position(|c| c.id == heading.id)?;
    let before = &children[..heading_idx];
    let after = &children[heading_idx + 1..];
    if before.len() > 1 || after.len() > 1 {
        return None;
    }

    let eyebrow = before.first().copied();
    if let Some(e) = eyebrow {
        let small = font_size(e) <= 14.0 || (is_uppercase(e) && font_size(e) <= 16.0);
        if !small {
            return None;
        }
    }
    let subtitle = after.first().copied();
    if subtitle.is_some_and(|s| font_size(s) > 20.0) {
        return None;
    }

    let mut confidence = 60;
    if eyebrow.is_some() || subtitle.is_some() {
        confidence += 5;
    }
    if eyebrow.is_some_and(is_uppercase) {
        confidence += 8;
    }
    if is_serif(heading) {
        confidence += 5;
    }

    let centered = node
        .layout
        .as_ref()
        .is_some_and(|l| l.counter_align == crate::types::Alignment::Center)
        || children.iter().all(|c| {
            let offset = (c.x + c.width / 2.0) - (node.x + node.width / 2.0);
            offset.abs() <= 2.0 && c.width < node.width
        });

    Some(
        Candidate::new(confidence)
            .prop("title", text_of(heading))
            .prop_opt("eyebrow", eyebrow.map(text_of))
            .prop_opt("subtitle", subtitle.map(text_of))
            .prop("align", if centered { "center" } else { "left" }),
    )
}

// ============================================================================
// Stats grid
// ============================================================================

pub struct StatsGridClassifier;

impl Classifier for StatsGridClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::StatsGrid
    }

    fn classify(&self, node: &ExtractedNode, _signals: &Signals<'_>) -> Option<Candidate> {
        if !node.node_type.is_container() {
            return None;
        }
        let children = visible_children(node);
        if children.iter().any(|c| c.is_text()) {
            return None;
        }
        let items: Vec<&ExtractedNode> = children
            .iter()
            .copied()
            .filter(|c| c.node_type.is_container())
            .collect();
        if !(2..=6).contains(&items.len()) {
            return None;
        }

        let wraps = node.layout.as_ref().is_some_and(|l| l.wrap);
        if !(is_row(node, &items) || wraps || shares_row(&items)) {
            return None;
        }

        let mut stats = Vec::with_capacity(items.len());
        let mut value_sizes = Vec::with_capacity(items.len());
        for item in &items {
            let texts = visible_texts(item);
            if !(1..=3).contains(&texts.len()) {
                return None;
            }
            let value = texts.iter().copied().find(|t| parse_numeric(&text_of(t)).is_some())?;
            let largest = largest_text(&texts)?;
            if font_size(value) < font_size(largest) {
                return None;
            }
            let label = texts.iter().find(|t| t.id != value.id).map(|t| text_of(t));
            value_sizes.push(font_size(value));
            stats.push(match label {
                Some(label) => json!({ "value": text_of(value), "label": label }),
                None => json!({ "value": text_of(value) }),
            });
        }

        let mut confidence = 62;
        if items.len() >= 3 {
            confidence += 8;
        }
        if value_sizes.windows(2).all(|w| (w[0] - w[1]).abs() < 0.5) {
            confidence += 5;
        }

        let first_y = items[0].y;
        let columns = items
            .iter()
            .filter(|i| (i.y - first_y).abs() <= 8.0)
            .count();

        Some(
            Candidate::new(confidence)
                .prop("stats", Value::Array(stats))
                .prop("columns", columns),
        )
    }
}

fn shares_row(items: &[&ExtractedNode]) -> bool {
    items.len() >= 2 && (items[0].y - items[1].y).abs() <= 8.0
}

// ============================================================================
// Timeline
// ============================================================================

pub struct TimelineClassifier;

impl Classifier for TimelineClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Timeline
    }

    fn classify(&self, node: &ExtractedNode, _signals: &Signals<'_>) -> Option<Candidate> {
        if !node.node_type.is_container() {
            return None;
        }
        let children = visible_children(node);
        if children.iter().any(|c| c.is_text()) {
            return None;
        }
        let items: Vec<&ExtractedNode> = children
            .iter()
            .copied()
            .filter(|c| c.node_type.is_container())
            .collect();
        if items.len() < 3 || !is_stacked(node, &items) {
            return None;
        }

        let mut entries = Vec::with_capacity(items.len());
        let mut all_years = true;
        for item in &items {
            let texts = visible_texts(item);
            if texts.len() < 2 {
                return None;
            }
            let marker = text_of(texts[0]);
            if !is_date_marker(&marker) {
                return None;
            }
            all_years &= is_year(&marker);
            let mut entry = json!({ "date": marker, "title": text_of(texts[1]) });
            if let Some(desc) = texts.get(2) {
                entry["description"] = Value::String(text_of(desc));
            }
            entries.push(entry);
        }

        let mut confidence = 60;
        if all_years {
            confidence += 8;
        }
        let has_track = children.iter().any(|c| is_rule(c))
            || items.iter().any(|i| {
                i.descendants()
                    .any(|d| d.node_type == NodeType::Ellipse || is_rule(d))
            });
        if has_track {
            confidence += 5;
        }

        Some(Candidate::new(confidence).prop("items", Value::Array(entries)))
    }
}

// ============================================================================
// FAQ
// ============================================================================

pub struct FaqClassifier;

impl Classifier for FaqClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Faq
    }

    fn classify(&self, node: &ExtractedNode, _signals: &Signals<'_>) -> Option<Candidate> {
        if !node.node_type.is_container() {
            return None;
        }
        let children = visible_children(node);
        let lead_count = children.iter().take_while(|c| c.is_text()).count();
        let (lead, rest) = children.split_at(lead_count);
        if lead.len() > 2 {
            return None;
        }
        let items: Vec<&ExtractedNode> = rest
            .iter()
            .copied()
            .filter(|c| !is_decoration(c))
            .collect();
        if items.len() < 2 || items.iter().any(|i| i.is_text()) {
            return None;
        }
        if !is_stacked(node, &items) {
            return None;
        }

        let mut entries = Vec::with_capacity(items.len());
        let mut all_questions = true;
        for item in &items {
            let texts = visible_texts(item);
            let question = text_of(texts.first()?);
            if question.chars().count() < 8 {
                return None;
            }
            let asks = question.ends_with('?');
            if !asks && !has_icon(item) {
                return None;
            }
            all_questions &= asks;
            let mut entry = json!({ "question": question });
            if let Some(answer) = texts.get(1) {
                entry["answer"] = Value::String(text_of(answer));
            }
            entries.push(entry);
        }

        let mut confidence = 60;
        if all_questions {
            confidence += 8;
        }
        let separated = items.iter().any(|i| i.solid_stroke().is_some())
            || rest.iter().any(|c| is_rule(c));
        if separated {
            confidence += 5;
        }

        Some(
            Candidate::new(confidence)
                .prop_opt(
                    "title",
                    lead.iter().copied().find(|t| is_heading_like(t)).map(text_of),
                )
                .prop("items", Value::Array(entries))
                .prop("variant", if separated { "bordered" } else { "plain" }),
        )
    }
}

// ============================================================================
// CTA banner
// ============================================================================

pub struct CtaBannerClassifier;

impl Classifier for CtaBannerClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::CtaBanner
    }

    fn classify(&self, node: &ExtractedNode, signals: &Signals<'_>) -> Option<Candidate> {
        if !node.node_type.is_container() || node.width < 480.0 {
            return None;
        }
        let fill = node.solid_fill();
        if fill.is_none() && !node.has_image_fill() {
            return None;
        }

        let button = ButtonClassifier;
        let actions: Vec<String> = node
            .descendants()
            .skip(1)
            .filter(|d| d.visible)
            .filter_map(|d| button.classify(d, signals))
            .filter(|c| c.confidence >= u32::from(signals.threshold))
            .filter_map(|c| c.props.get("label").and_then(Value::as_str).map(String::from))
            .collect();
        if actions.is_empty() || actions.len() > 3 {
            return None;
        }

        let texts = visible_texts(node);
        if texts.len() > 8 {
            return None;
        }
        let heading = largest_text(&texts)?;
        if font_size(heading) < 24.0 {
            return None;
        }
        let description = texts
            .iter()
            .copied()
            .filter(|t| t.id != heading.id && !actions.contains(&text_of(t)))
            .find(|t| font_size(t) < font_size(heading))
            .map(text_of);

        let tone = match fill.map(|c| signals.tone(c)) {
            Some(Tone::Accent) => "accent",
            Some(Tone::Brand) => "brand",
            Some(Tone::Dark) => "dark",
            Some(Tone::Light) => "light",
            Some(_) => "custom",
            None => "image",
        };

        let mut confidence = 62;
        if matches!(tone, "accent" | "brand" | "dark" | "image") {
            confidence += 8;
        }
        if description.is_some() {
            confidence += 5;
        }

        let mut candidate = Candidate::new(confidence)
            .prop("title", text_of(heading))
            .prop_opt("description", description)
            .prop("primaryAction", actions[0].clone())
            .prop("tone", tone);
        if let Some(secondary) = actions.get(1) {
            candidate = candidate.prop("secondaryAction", secondary.clone());
        }
        Some(candidate)
    }
}

// ============================================================================
// Card
// ============================================================================

pub struct CardClassifier;

impl Classifier for CardClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Card
    }

    fn classify(&self, node: &ExtractedNode, _signals: &Signals<'_>) -> Option<Candidate> {
        if !node.node_type.is_container() {
            return None;
        }
        if !(160.0..=640.0).contains(&node.width) || node.height < 80.0 {
            return None;
        }
        let shadow = node.has_drop_shadow();
        let stroke = node.solid_stroke().is_some();
        if node.solid_fill().is_none() && !stroke && !shadow {
            return None;
        }

        let texts = visible_texts(node);
        if !(2..=6).contains(&texts.len()) {
            return None;
        }
        let title = largest_text(&texts)?;
        if font_size(title) < 16.0 {
            return None;
        }
        let title_idx = texts.iter().position(|t| t.id == title.id)?;
        let eyebrow = texts[..title_idx]
            .last()
            .copied()
            .filter(|t| font_size(t) <= 14.0)
            .map(text_of);
        let description = texts[title_idx + 1..]
            .iter()
            .copied()
            .find(|t| font_size(t) < font_size(title))
            .map(text_of);

        let media = node.descendants().skip(1).any(|d| {
            d.visible && d.has_image_fill() && d.width >= node.width * 0.4
        });

        let mut confidence = 58;
        if (8.0..=24.0).contains(&node.corner_radius) {
            confidence += 8;
        }
        if shadow || stroke {
            confidence += 5;
        }
        if media {
            confidence += 5;
        }

        let variant = if shadow {
            "elevated"
        } else if stroke {
            "outlined"
        } else {
            "filled"
        };

        Some(
            Candidate::new(confidence)
                .prop("title", text_of(title))
                .prop_opt("eyebrow", eyebrow)
                .prop_opt("description", description)
                .prop("hasImage", media)
                .prop("variant", variant),
        )
    }
}

// ============================================================================
// Split section
// ============================================================================

pub struct SplitSectionClassifier;

impl Classifier for SplitSectionClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::SplitSection
    }

    fn classify(&self, node: &ExtractedNode, _signals: &Signals<'_>) -> Option<Candidate> {
        if !node.node_type.is_container() || node.width <= 0.0 {
            return None;
        }
        let children = visible_children(node);
        let [first, second] = children.as_slice() else {
            return None;
        };
        if !is_row(node, &children) {
            return None;
        }
        let share = |n: &ExtractedNode| n.width / node.width;
        if share(*first) < 0.35 || share(*second) < 0.35 {
            return None;
        }

        let (copy, media_first) = if is_media(second) && has_heading(first) {
            (*first, false)
        } else if is_media(first) && has_heading(second) {
            (*second, true)
        } else {
            return None;
        };

        let texts = visible_texts(copy);
        let title = largest_text(&texts)?;
        let body = texts
            .iter()
            .copied()
            .find(|t| t.id != title.id && font_size(t) < font_size(title))
            .map(text_of);

        let mut confidence = 60;
        if (0.4..=0.6).contains(&share(*first)) && (0.4..=0.6).contains(&share(*second)) {
            confidence += 8;
        }
        if node.is_auto_layout() {
            confidence += 5;
        }

        Some(
            Candidate::new(confidence)
                .prop("title", text_of(title))
                .prop_opt("body", body)
                .prop("mediaPosition", if media_first { "left" } else { "right" }),
        )
    }
}

fn is_media(node: &ExtractedNode) -> bool {
    let image = node.descendants().any(|d| d.has_image_fill());
    let textless = visible_texts(node).is_empty();
    image || (textless && node.width > 0.0 && node.height > 0.0)
}

fn has_heading(node: &ExtractedNode) -> bool {
    visible_texts(node)
        .iter()
        .any(|t| font_size(t) >= 24.0)
}

// ============================================================================
// Badge
// ============================================================================

pub struct BadgeClassifier;

impl Classifier for BadgeClassifier {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Badge
    }

    fn classify(&self, node: &ExtractedNode, signals: &Signals<'_>) -> Option<Candidate> {
        if !is_framelike(node) {
            return None;
        }
        if !(16.0..=28.0).contains(&node.height) || node.width > 200.0 {
            return None;
        }
        let texts = visible_texts(node);
        let [label] = texts.as_slice() else {
            return None;
        };
        let text = text_of(label);
        if text.chars().count() > 20 || font_size(label) > 14.0 {
            return None;
        }
        let fill = node.solid_fill();
        if fill.is_none() && node.solid_stroke().is_none() {
            return None;
        }
        if node.children.iter().any(|c| !c.is_text() && !is_icon(c)) {
            return None;
        }

        let mut confidence = 60;
        if node.corner_radius >= node.height / 2.0 - 0.5 {
            confidence += 8;
        }
        if is_uppercase(label) {
            confidence += 5;
        }

        let tone = match fill.map(|c| signals.tone(c)) {
            Some(Tone::Accent) => "accent",
            Some(Tone::Success) => "success",
            Some(Tone::Danger) => "danger",
            _ => "neutral",
        };

        Some(
            Candidate::new(confidence)
                .prop("label", text)
                .prop("tone", tone),
        )
    }
}
