use crate::tokens::{
    weight_class, TypographyToken, LABEL_TOKEN, MONO_MARKERS, SERIF_MARKERS, TYPOGRAPHY_TOKENS,
};
use crate::types::{FamilyCategory, Font, TextCase, TypographyMatch};

const FAMILY_PENALTY: f32 = 8.0;
const SPECIFICITY_WEIGHT: f32 = 0.05;
const LINE_HEIGHT_WEIGHT: f32 = 4.0;
const LINE_HEIGHT_WINDOW: f32 = 2.0;
const CONFIDENCE_SCALE: f32 = 30.0;

pub const LABEL_MAX_SIZE: f32 = 14.0;
pub const LABEL_CONFIDENCE: f32 = 0.95;

/// Weighted nearest-token matcher for font attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypographyMatcher;

impl TypographyMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn match_font(&self, font: &Font) -> TypographyMatch {
        let family = detect_family(&font.family);
        let weight = weight_class(&font.style).map(str::to_string);

        // Upper-case micro text always reads as a label, whatever the family.
        if font.text_case == TextCase::Upper && font.size <= LABEL_MAX_SIZE {
            return TypographyMatch {
                class: LABEL_TOKEN.class.to_string(),
                family,
                confidence: LABEL_CONFIDENCE,
                weight_class: weight,
            };
        }

        let ratio = font.line_height_ratio();
        let mut best: Option<(&TypographyToken, f32)> = None;
        for token in TYPOGRAPHY_TOKENS.iter().filter(|t| !t.uppercase_only) {
            let score = score_token(token, font.size, family, ratio);
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((token, score));
            }
        }

        let (token, score) = best.unwrap_or((&TYPOGRAPHY_TOKENS[0], CONFIDENCE_SCALE));
        TypographyMatch {
            class: token.class.to_string(),
            family,
            confidence: (1.0 - score / CONFIDENCE_SCALE).clamp(0.0, 1.0),
            weight_class: weight,
        }
    }
}

fn score_token(
    token: &TypographyToken,
    size: f32,
    family: FamilyCategory,
    ratio: Option<f32>,
) -> f32 {
    let size_distance = if token.contains(size) {
        0.0
    } else if size < token.min_size {
        token.min_size - size
    } else {
        size - token.max_size
    };

    let mut score = size_distance;
    if token.family != family {
        score += FAMILY_PENALTY;
    }
    if size_distance == 0.0 {
        score += token.range_width() * SPECIFICITY_WEIGHT;
    }
    if size_distance < LINE_HEIGHT_WINDOW {
        if let Some(ratio) = ratio {
            score += (ratio - token.line_height).abs() * LINE_HEIGHT_WEIGHT;
        }
    }
    score
}

/// Family category from a font family name; defaults to sans.
pub fn detect_family(family: &str) -> FamilyCategory {
    let lower = family.to_ascii_lowercase();
    if MONO_MARKERS.iter().any(|m| lower.contains(m)) {
        FamilyCategory::Mono
    } else if lower.contains("sans") {
        FamilyCategory::Sans
    } else if SERIF_MARKERS.iter().any(|m| lower.contains(m)) {
        FamilyCategory::Serif
    } else {
        FamilyCategory::Sans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(family: &str, size: f32) -> Font {
        Font {
            family: family.to_string(),
            style: "Regular".to_string(),
            size,
            line_height: None,
            letter_spacing: 0.0,
            text_case: TextCase::Original,
        }
    }

    #[test]
    fn serif_44_resolves_to_h2() {
        let m = TypographyMatcher::new().match_font(&font("Playfair Display", 44.0));
        assert_eq!(m.class, "text-h2");
        assert_eq!(m.family, FamilyCategory::Serif);
        assert!(m.confidence > 0.9);
    }

    #[test]
    fn uppercase_12px_sans_is_label_at_fixed_confidence() {
        let mut f = font("Inter", 12.0);
        f.text_case = TextCase::Upper;
        let m = TypographyMatcher::new().match_font(&f);
        assert_eq!(m.class, "text-label");
        assert_eq!(m.confidence, LABEL_CONFIDENCE);
    }

    #[test]
    fn uppercase_shortcut_overrides_serif_family() {
        // Pinned behaviour: the label shortcut ignores an explicit serif family.
        let mut f = font("Georgia", 13.0);
        f.text_case = TextCase::Upper;
        let m = TypographyMatcher::new().match_font(&f);
        assert_eq!(m.class, "text-label");
        assert_eq!(m.family, FamilyCategory::Serif);
    }

    #[test]
    fn lowercase_small_text_never_gets_label() {
        let m = TypographyMatcher::new().match_font(&font("Inter", 12.0));
        assert_eq!(m.class, "text-caption");
    }

    #[test]
    fn body_sans_resolves_to_body() {
        let mut f = font("Inter", 16.0);
        f.line_height = Some(25.6);
        let m = TypographyMatcher::new().match_font(&f);
        assert_eq!(m.class, "text-body");
        assert_eq!(m.family, FamilyCategory::Sans);
    }

    #[test]
    fn mono_family_prefers_code_token() {
        let m = TypographyMatcher::new().match_font(&font("JetBrains Mono", 14.0));
        assert_eq!(m.class, "text-code");
        assert_eq!(m.family, FamilyCategory::Mono);
    }

    #[test]
    fn out_of_range_size_lowers_confidence() {
        let m = TypographyMatcher::new().match_font(&font("Inter", 140.0));
        assert_eq!(m.class, "text-display");
        assert_eq!(m.confidence, 0.0);
    }

    #[test]
    fn family_detection_markers() {
        assert_eq!(detect_family("Source Serif Pro"), FamilyCategory::Serif);
        assert_eq!(detect_family("PT Sans Serif"), FamilyCategory::Sans);
        assert_eq!(detect_family("Noto Sans Mono"), FamilyCategory::Mono);
        assert_eq!(detect_family("Inter"), FamilyCategory::Sans);
    }

    #[test]
    fn weight_class_carries_through() {
        let mut f = font("Inter", 16.0);
        f.style = "SemiBold".to_string();
        let m = TypographyMatcher::new().match_font(&f);
        assert_eq!(m.weight_class.as_deref(), Some("font-semibold"));
    }
}
