//! Structural, geometric and typographic signals shared by classifiers and
//! the animation heuristics.

use crate::matching::{detect_family, ColorMatcher};
use crate::tokens::{
    ACCENT_HEX, ACCENT_STRONG_HEX, BRAND_HEX, DANGER_HEX, INK_HEX, SUCCESS_HEX, WHITE_HEX,
};
use crate::types::{ExtractedNode, FamilyCategory, LayoutDirection, NodeType, Rgba, TextCase};

/// Lab distance under which a fill counts as one of the known palette hues.
const TONE_DISTANCE: f32 = 12.0;
/// Vertical slack when deciding whether siblings share a row.
const ROW_TOLERANCE: f32 = 8.0;
/// Overlap slack when deciding whether siblings stack.
const STACK_TOLERANCE: f32 = 4.0;

/// Coarse color role of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Brand,
    Dark,
    Light,
    Danger,
    Success,
    Other,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Accent => "accent",
            Tone::Brand => "brand",
            Tone::Dark => "dark",
            Tone::Light => "light",
            Tone::Danger => "danger",
            Tone::Success => "success",
            Tone::Other => "other",
        }
    }
}

/// Read-only helpers handed to every classifier.
pub struct Signals<'a> {
    pub colors: &'a ColorMatcher,
    pub threshold: u8,
}

impl Signals<'_> {
    pub fn tone(&self, color: Rgba) -> Tone {
        let near = |hex: &str| self.colors.distance_to_hex(color, hex) <= TONE_DISTANCE;
        if near(ACCENT_HEX) || near(ACCENT_STRONG_HEX) {
            Tone::Accent
        } else if near(BRAND_HEX) {
            Tone::Brand
        } else if near(DANGER_HEX) {
            Tone::Danger
        } else if near(SUCCESS_HEX) {
            Tone::Success
        } else if near(INK_HEX) {
            Tone::Dark
        } else if near(WHITE_HEX) {
            Tone::Light
        } else {
            let lightness = self.colors.lab(color).l;
            if lightness < 35.0 {
                Tone::Dark
            } else if lightness > 85.0 {
                Tone::Light
            } else {
                Tone::Other
            }
        }
    }
}

pub fn is_framelike(node: &ExtractedNode) -> bool {
    matches!(
        node.node_type,
        NodeType::Frame | NodeType::Instance | NodeType::Component
    )
}

pub fn font_size(node: &ExtractedNode) -> f32 {
    node.font.as_ref().map_or(0.0, |f| f.size)
}

pub fn family(node: &ExtractedNode) -> Option<FamilyCategory> {
    node.font.as_ref().map(|f| detect_family(&f.family))
}

pub fn is_serif(node: &ExtractedNode) -> bool {
    family(node) == Some(FamilyCategory::Serif)
}

pub fn is_sans(node: &ExtractedNode) -> bool {
    family(node) == Some(FamilyCategory::Sans)
}

pub fn is_uppercase(node: &ExtractedNode) -> bool {
    if node
        .font
        .as_ref()
        .is_some_and(|f| f.text_case == TextCase::Upper)
    {
        return true;
    }
    node.text().is_some_and(|t| {
        t.chars().any(char::is_alphabetic) && !t.chars().any(char::is_lowercase)
    })
}

/// Heading-like styling: large text, or slightly smaller serif text.
pub fn is_heading_like(node: &ExtractedNode) -> bool {
    let size = font_size(node);
    node.is_text() && (size >= 22.0 || (is_serif(node) && size >= 20.0))
}

pub fn text_of(node: &ExtractedNode) -> String {
    node.text().unwrap_or_default().to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn visible_children(node: &ExtractedNode) -> Vec<&ExtractedNode> {
    node.children.iter().filter(|c| c.visible).collect()
}

/// Visible text descendants (including the node itself) in document order.
pub fn visible_texts(node: &ExtractedNode) -> Vec<&ExtractedNode> {
    node.text_nodes()
        .into_iter()
        .filter(|n| n.visible && n.text().is_some_and(|t| !t.is_empty()))
        .collect()
}

/// Largest text by font size; the earliest wins on ties.
pub fn largest_text<'a>(texts: &[&'a ExtractedNode]) -> Option<&'a ExtractedNode> {
    let mut best: Option<&'a ExtractedNode> = None;
    for text in texts.iter().copied() {
        if best.map_or(true, |b| font_size(text) > font_size(b)) {
            best = Some(text);
        }
    }
    best
}

/// Small non-text shapes used as icons, dots or chevrons.
pub fn is_icon(node: &ExtractedNode) -> bool {
    matches!(
        node.node_type,
        NodeType::Vector | NodeType::Ellipse | NodeType::Instance
    ) && node.width <= 32.0
        && node.height <= 32.0
        && node.text_nodes().is_empty()
}

pub fn has_icon(node: &ExtractedNode) -> bool {
    node.descendants().skip(1).any(is_icon)
}

/// Thin rules used as dividers or timeline tracks.
pub fn is_rule(node: &ExtractedNode) -> bool {
    matches!(node.node_type, NodeType::Rectangle | NodeType::Vector)
        && (node.width <= 4.0 || node.height <= 4.0)
}

pub fn is_decoration(node: &ExtractedNode) -> bool {
    !node.is_text() && !node.node_type.is_container()
}

/// Children laid out left to right on one row.
pub fn is_row(node: &ExtractedNode, children: &[&ExtractedNode]) -> bool {
    match node.direction() {
        Some(LayoutDirection::Horizontal) => true,
        Some(_) => false,
        None => {
            children.len() >= 2
                && children.windows(2).all(|pair| {
                    (pair[0].y - pair[1].y).abs() <= ROW_TOLERANCE
                        && pair[0].x + pair[0].width <= pair[1].x + STACK_TOLERANCE
                })
        }
    }
}

/// Children stacked top to bottom.
pub fn is_stacked(node: &ExtractedNode, children: &[&ExtractedNode]) -> bool {
    match node.direction() {
        Some(LayoutDirection::Vertical) => true,
        Some(_) => false,
        None => {
            children.len() >= 2
                && children
                    .windows(2)
                    .all(|pair| pair[0].bottom() <= pair[1].y + STACK_TOLERANCE)
        }
    }
}

/// Same node kind and both dimensions within 15% of each other.
pub fn similar_shape(a: &ExtractedNode, b: &ExtractedNode) -> bool {
    let close = |x: f32, y: f32| {
        let largest = x.abs().max(y.abs());
        largest == 0.0 || (x - y).abs() / largest <= 0.15
    };
    a.node_type == b.node_type && close(a.width, b.width) && close(a.height, b.height)
}

/// Name or master component mentions one of the given words.
pub fn name_hints(node: &ExtractedNode, words: &[&str]) -> bool {
    let name = node.name.to_ascii_lowercase();
    let component = node
        .component_name
        .as_deref()
        .unwrap_or_default()
        .to_ascii_lowercase();
    words
        .iter()
        .any(|w| name.contains(w) || component.contains(w))
}

/// A parsed stat-like number such as `"$1,200+"` or `"98%"`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericText {
    pub value: f64,
    pub prefix: String,
    pub suffix: String,
}

const NUMERIC_PREFIXES: &[char] = &['$', '€', '£', '¥', '~', '<', '>'];
const MAX_SUFFIX_CHARS: usize = 3;

/// Parse bare or suffixed numbers. Separators are stripped from the value.
pub fn parse_numeric(text: &str) -> Option<NumericText> {
    let trimmed = text.trim();
    let body_start = trimmed.find(|c: char| c.is_ascii_digit())?;
    let prefix = &trimmed[..body_start];
    if prefix.chars().count() > 2 || !prefix.chars().all(|c| NUMERIC_PREFIXES.contains(&c)) {
        return None;
    }

    let rest = &trimmed[body_start..];
    let body_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .unwrap_or(rest.len());
    let body = rest[..body_len].trim_end_matches(['.', ',']);
    let suffix = rest[body.len()..].trim();
    if suffix.chars().count() > MAX_SUFFIX_CHARS
        || suffix.chars().any(|c| c.is_whitespace() || c.is_ascii_digit())
    {
        return None;
    }

    let digits: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value = digits.parse::<f64>().ok()?;
    Some(NumericText {
        value,
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
    })
}

pub fn is_year(text: &str) -> bool {
    let t = text.trim();
    t.len() == 4
        && t.chars().all(|c| c.is_ascii_digit())
        && (t.starts_with("19") || t.starts_with("20"))
}

const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Short markers used on timeline entries: years, dates, steps, quarters.
pub fn is_date_marker(text: &str) -> bool {
    let lower = text.trim().to_ascii_lowercase();
    if lower.is_empty() || lower.chars().count() > 24 {
        return false;
    }
    if is_year(&lower) || lower.split_whitespace().any(is_year) {
        return true;
    }
    if MONTHS.iter().any(|m| lower.starts_with(m)) {
        return true;
    }
    if ["step", "phase", "stage", "week", "day"]
        .iter()
        .any(|w| lower.starts_with(w))
    {
        return true;
    }
    let quarter = lower.strip_prefix('q').unwrap_or_default();
    if matches!(quarter.chars().next(), Some('1'..='4')) {
        return true;
    }
    lower.len() <= 3 && lower.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Font, Padding};

    #[test]
    fn parses_suffixed_numbers() {
        let n = parse_numeric("500+").expect("numeric");
        assert_eq!(n.value, 500.0);
        assert_eq!(n.suffix, "+");
        assert_eq!(n.prefix, "");

        let money = parse_numeric("$1,200k").expect("numeric");
        assert_eq!(money.value, 1200.0);
        assert_eq!(money.prefix, "$");
        assert_eq!(money.suffix, "k");

        let pct = parse_numeric("98%").expect("numeric");
        assert_eq!(pct.value, 98.0);
        assert_eq!(pct.suffix, "%");

        assert_eq!(parse_numeric("4.9").map(|n| n.value), Some(4.9));
    }

    #[test]
    fn rejects_prose_and_ranges() {
        assert!(parse_numeric("Founded in 2019").is_none());
        assert!(parse_numeric("24/7").is_none());
        assert!(parse_numeric("500 clients").is_none());
        assert!(parse_numeric("no digits").is_none());
    }

    #[test]
    fn date_markers() {
        assert!(is_date_marker("2019"));
        assert!(is_date_marker("March 2020"));
        assert!(is_date_marker("Step 2"));
        assert!(is_date_marker("Q3"));
        assert!(is_date_marker("01"));
        assert!(!is_date_marker("How does billing work?"));
    }

    #[test]
    fn tone_classifies_palette_neighbours() {
        let colors = ColorMatcher::default();
        let signals = Signals {
            colors: &colors,
            threshold: 60,
        };
        let tone = |hex: &str| signals.tone(Rgba::from_hex(hex).expect("hex"));
        assert_eq!(tone("#E8572A"), Tone::Accent);
        assert_eq!(tone("#1A1A1A"), Tone::Dark);
        assert_eq!(tone("#FFFFFF"), Tone::Light);
        assert_eq!(tone("#1F3D2B"), Tone::Brand);
        assert_eq!(tone("#3B82F6"), Tone::Other);
    }

    #[test]
    fn row_and_stack_fall_back_to_geometry() {
        let mut parent = ExtractedNode::new("p", NodeType::Frame);
        let mut a = ExtractedNode::new("a", NodeType::Frame);
        a.width = 100.0;
        a.height = 50.0;
        let mut b = a.clone();
        b.id = "b".into();
        b.x = 120.0;
        parent.children = vec![a, b];
        let kids: Vec<&ExtractedNode> = parent.children.iter().collect();
        assert!(is_row(&parent, &kids));
        assert!(!is_stacked(&parent, &kids));

        parent.layout = Some(crate::types::AutoLayout {
            direction: LayoutDirection::Vertical,
            gap: 0.0,
            padding: Padding::default(),
            primary_align: Default::default(),
            counter_align: Default::default(),
            wrap: false,
        });
        assert!(!is_row(&parent, &kids));
        assert!(is_stacked(&parent, &kids));
    }

    #[test]
    fn uppercase_detected_from_case_or_content() {
        let mut text = ExtractedNode::new("t", NodeType::Text);
        text.characters = Some("OUR STORY".into());
        assert!(is_uppercase(&text));
        text.characters = Some("Our story".into());
        text.font = Some(Font {
            family: "Inter".into(),
            style: String::new(),
            size: 12.0,
            line_height: None,
            letter_spacing: 0.0,
            text_case: TextCase::Upper,
        });
        assert!(is_uppercase(&text));
    }
}
