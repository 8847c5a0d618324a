//! Component detection.
//!
//! The detector walks the extracted tree top-down and runs every classifier
//! in [`default_classifiers`] against each visible node. The highest-confidence
//! verdict at or above the acceptance threshold wins; ties keep the earlier
//! classifier. A matched node consumes its subtree, so a banner's buttons are
//! never reported separately.
//!
//! An unmatched container whose leading children form a text group (eyebrow
//! and title above a row of buttons) can still match on that group alone.
//! The match then owns only those children and the walk continues into the
//! siblings after them.

mod classifiers;
pub mod signals;

pub use classifiers::{
    default_classifiers, BadgeClassifier, ButtonClassifier, Candidate, CardClassifier,
    Classifier, CtaBannerClassifier, FaqClassifier, SectionHeaderClassifier,
    SplitSectionClassifier, StatsGridClassifier, TimelineClassifier,
};
pub use signals::{parse_numeric, NumericText, Signals, Tone};

use std::collections::HashSet;

use tracing::debug;

use crate::matching::ColorMatcher;
use signals::visible_children;
use crate::types::{ComponentMatch, ExtractedNode};

/// Default acceptance threshold on the 0-100 confidence scale.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: u8 = 60;
const MAX_CONFIDENCE: u32 = 100;

pub struct ComponentDetector {
    classifiers: Vec<Box<dyn Classifier>>,
    colors: ColorMatcher,
    threshold: u8,
}

impl Default for ComponentDetector {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTANCE_THRESHOLD)
    }
}

impl ComponentDetector {
    pub fn new(threshold: u8) -> Self {
        Self::with_classifiers(threshold, default_classifiers())
    }

    pub fn with_classifiers(threshold: u8, classifiers: Vec<Box<dyn Classifier>>) -> Self {
        Self {
            classifiers,
            colors: ColorMatcher::default(),
            threshold: threshold.min(MAX_CONFIDENCE as u8),
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn clear_cache(&self) {
        self.colors.clear_cache();
    }

    /// Detect components across the selection in pre-order.
    pub fn detect(&self, roots: &[ExtractedNode]) -> Vec<ComponentMatch> {
        let mut matches = Vec::new();
        let mut stack: Vec<&ExtractedNode> = roots.iter().rev().collect();

        while let Some(node) = stack.pop() {
            if !node.visible {
                continue;
            }
            if let Some(found) = self.detect_single(node) {
                debug!(
                    node_id = %found.node_id,
                    component = %found.component.tag(),
                    confidence = found.confidence,
                    "component matched"
                );
                matches.push(found);
                continue;
            }
            if let Some(found) = self.detect_leading_run(node) {
                debug!(
                    node_id = %found.node_id,
                    component = %found.component.tag(),
                    covers = found.covers.len(),
                    "component matched on leading children"
                );
                let owned: HashSet<&str> = found.owned_roots().collect();
                let rest: Vec<&ExtractedNode> = node
                    .children
                    .iter()
                    .filter(|c| !owned.contains(c.id.as_str()))
                    .collect();
                matches.push(found);
                stack.extend(rest.into_iter().rev());
                continue;
            }
            stack.extend(node.children.iter().rev());
        }

        matches
    }

    /// Match the leading run of visible text children of a container whose
    /// remaining children are something else. The match is anchored on the
    /// first text and covers the rest of the run.
    pub fn detect_leading_run(&self, node: &ExtractedNode) -> Option<ComponentMatch> {
        let children = visible_children(node);
        let run_len = children.iter().take_while(|c| c.is_text()).count();
        if run_len < 2 || run_len == children.len() {
            return None;
        }
        let run = &children[..run_len];
        let signals = Signals {
            colors: &self.colors,
            threshold: self.threshold,
        };

        let mut best: Option<(&dyn Classifier, Candidate)> = None;
        for classifier in &self.classifiers {
            let Some(candidate) = classifier.classify_run(node, run, &signals) else {
                continue;
            };
            if best
                .as_ref()
                .map_or(true, |(_, b)| candidate.confidence > b.confidence)
            {
                best = Some((classifier.as_ref(), candidate));
            }
        }

        let (classifier, candidate) = best?;
        let confidence = candidate.confidence.min(MAX_CONFIDENCE);
        if confidence < u32::from(self.threshold) {
            return None;
        }
        Some(ComponentMatch {
            component: classifier.kind(),
            confidence: confidence as u8,
            node_id: run[0].id.clone(),
            covers: run[1..].iter().map(|c| c.id.clone()).collect(),
            props: candidate.props,
        })
    }

    /// Best classifier verdict for one node, ignoring its descendants' matches.
    pub fn detect_single(&self, node: &ExtractedNode) -> Option<ComponentMatch> {
        let signals = Signals {
            colors: &self.colors,
            threshold: self.threshold,
        };

        let mut best: Option<(&dyn Classifier, Candidate)> = None;
        for classifier in &self.classifiers {
            let Some(candidate) = classifier.classify(node, &signals) else {
                continue;
            };
            if best
                .as_ref()
                .map_or(true, |(_, b)| candidate.confidence > b.confidence)
            {
                best = Some((classifier.as_ref(), candidate));
            }
        }

        let (classifier, candidate) = best?;
        let confidence = candidate.confidence.min(MAX_CONFIDENCE);
        if confidence < u32::from(self.threshold) {
            return None;
        }
        Some(ComponentMatch {
            component: classifier.kind(),
            confidence: confidence as u8,
            node_id: node.id.clone(),
            covers: Vec::new(),
            props: candidate.props,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::types::{ComponentKind, Effect, LayoutDirection, NodeType, Rgba};
    use serde_json::json;

    #[test]
    fn header_and_buttons_match_separately() {
        let detector = ComponentDetector::default();
        let matches = detector.detect(&[hero_header()]);
        let kinds: Vec<ComponentKind> = matches.iter().map(|m| m.component).collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::SectionHeader,
                ComponentKind::Button,
                ComponentKind::Button
            ]
        );

        assert_eq!(matches[0].node_id, "header");
        assert_eq!(matches[0].props["eyebrow"], json!("OUR SERVICES"));
        assert_eq!(matches[0].props["title"], json!("What we build"));
        assert_eq!(matches[1].props["variant"], json!("primary"));
        assert_eq!(matches[2].props["variant"], json!("dark"));
        assert_eq!(matches[1].props["label"], json!("Get started"));
        assert!(matches.iter().all(|m| m.confidence >= 60));
    }

    #[test]
    fn flat_frame_header_texts_and_buttons_match_separately() {
        let detector = ComponentDetector::default();
        let matches = detector.detect(&[flat_hero_header()]);
        let kinds: Vec<ComponentKind> = matches.iter().map(|m| m.component).collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::SectionHeader,
                ComponentKind::Button,
                ComponentKind::Button
            ]
        );

        let header = &matches[0];
        assert_eq!(header.node_id, "eyebrow");
        assert_eq!(header.covers, vec!["title".to_string()]);
        assert_eq!(header.props["eyebrow"], json!("OUR SERVICES"));
        assert_eq!(header.props["title"], json!("What we build"));
        assert_eq!(header.confidence, 78);

        assert_eq!(matches[1].node_id, "primary");
        assert_eq!(matches[1].props["variant"], json!("primary"));
        assert_eq!(matches[2].node_id, "secondary");
        assert_eq!(matches[2].props["variant"], json!("dark"));
    }

    #[test]
    fn leading_run_needs_trailing_siblings_and_two_texts() {
        let detector = ComponentDetector::default();

        let lone_title = frame(
            "solo",
            600.0,
            120.0,
            vec![
                at(text("t", "What we build", "Playfair Display", 36.0), 0.0, 0.0),
                button("b", "Go", "#E8572A", 0.0, 60.0),
            ],
        );
        assert!(detector.detect_leading_run(&lone_title).is_none());

        let texts_only = frame(
            "texts",
            600.0,
            80.0,
            vec![
                at(upper(text("e", "OUR SERVICES", "Inter", 12.0)), 0.0, 0.0),
                at(text("t", "What we build", "Playfair Display", 36.0), 0.0, 24.0),
            ],
        );
        assert!(detector.detect_leading_run(&texts_only).is_none());
    }

    #[test]
    fn detection_is_deterministic() {
        let detector = ComponentDetector::default();
        let tree = [hero_header(), stats_grid()];
        let first = detector.detect(&tree);
        detector.clear_cache();
        let second = detector.detect(&tree);
        assert_eq!(first, second);
    }

    #[test]
    fn banner_consumes_its_buttons() {
        let banner = with_layout(
            filled(
                frame(
                    "banner",
                    960.0,
                    280.0,
                    vec![
                        at(text("cta-title", "Ready to start?", "Playfair Display", 40.0), 64.0, 64.0),
                        at(text("cta-copy", "Book a call with our team.", "Inter", 18.0), 64.0, 124.0),
                        button("cta-primary", "Book a call", "#E8572A", 64.0, 172.0),
                    ],
                ),
                "#1A1A1A",
            ),
            auto(LayoutDirection::Vertical, 16.0, 64.0),
        );

        let matches = ComponentDetector::default().detect(&[banner]);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.component, ComponentKind::CtaBanner);
        assert_eq!(m.props["primaryAction"], json!("Book a call"));
        assert_eq!(m.props["tone"], json!("dark"));
        assert_eq!(m.props["description"], json!("Book a call with our team."));
    }

    #[test]
    fn stats_grid_collects_values_and_labels() {
        let matches = ComponentDetector::default().detect(&[stats_grid()]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].component, ComponentKind::StatsGrid);
        assert_eq!(matches[0].props["columns"], json!(3));
        assert_eq!(
            matches[0].props["stats"][0],
            json!({ "value": "500+", "label": "Clients" })
        );
    }

    #[test]
    fn invisible_subtrees_are_skipped() {
        let mut hidden = hero_header();
        hidden.visible = false;
        assert!(ComponentDetector::default().detect(&[hidden]).is_empty());
    }

    #[test]
    fn threshold_filters_weak_verdicts() {
        let detector = ComponentDetector::new(100);
        assert!(detector.detect(&[hero_header()]).is_empty());
    }

    #[test]
    fn unstyled_text_frame_is_not_a_button() {
        let plain = frame(
            "plain",
            140.0,
            44.0,
            vec![text("t", "Just text", "Inter", 16.0)],
        );
        assert!(ComponentDetector::default().detect_single(&plain).is_none());
    }

    #[test]
    fn elevated_card_reports_variant() {
        let mut card = filled(
            frame(
                "card",
                320.0,
                240.0,
                vec![
                    at(text("card-title", "Brand strategy", "Inter", 22.0), 24.0, 24.0),
                    at(
                        text("card-body", "Positioning and messaging for launch.", "Inter", 15.0),
                        24.0,
                        64.0,
                    ),
                ],
            ),
            "#FFFFFF",
        );
        card.corner_radius = 12.0;
        card.effects = vec![Effect::DropShadow {
            color: Rgba {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.1,
            },
            offset_x: 0.0,
            offset_y: 4.0,
            radius: 16.0,
            spread: 0.0,
        }];

        let m = ComponentDetector::default()
            .detect_single(&card)
            .expect("card");
        assert_eq!(m.component, ComponentKind::Card);
        assert_eq!(m.props["variant"], json!("elevated"));
        assert_eq!(m.props["title"], json!("Brand strategy"));
        assert_eq!(m.confidence, 71);
    }

    #[test]
    fn pill_badge_reads_tone() {
        let mut badge = filled(
            frame("badge", 64.0, 22.0, vec![upper(text("b", "NEW", "Inter", 11.0))]),
            "#16A34A",
        );
        badge.corner_radius = 11.0;
        let m = ComponentDetector::default()
            .detect_single(&badge)
            .expect("badge");
        assert_eq!(m.component, ComponentKind::Badge);
        assert_eq!(m.props["tone"], json!("success"));
        assert_eq!(m.confidence, 73);
    }

    #[test]
    fn timeline_of_years() {
        let entry = |id: &str, year: &str, y: f32| {
            let mut dot = frame(&format!("{id}-dot"), 12.0, 12.0, vec![]);
            dot.node_type = NodeType::Ellipse;
            at(
                frame(
                    id,
                    600.0,
                    80.0,
                    vec![
                        at(text(&format!("{id}-year"), year, "Inter", 14.0), 0.0, y),
                        at(text(&format!("{id}-title"), "Studio founded", "Inter", 20.0), 0.0, y + 24.0),
                        dot,
                    ],
                ),
                0.0,
                y,
            )
        };
        let timeline = frame(
            "timeline",
            600.0,
            300.0,
            vec![entry("e1", "2018", 0.0), entry("e2", "2020", 100.0), entry("e3", "2023", 200.0)],
        );
        let m = ComponentDetector::default()
            .detect_single(&timeline)
            .expect("timeline");
        assert_eq!(m.component, ComponentKind::Timeline);
        assert_eq!(m.confidence, 73);
        assert_eq!(m.props["items"][2]["date"], json!("2023"));
    }
}
