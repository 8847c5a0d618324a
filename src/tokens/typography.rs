use crate::types::FamilyCategory;

/// A type-scale entry.
#[derive(Debug, Clone, Copy)]
pub struct TypographyToken {
    pub name: &'static str,
    pub class: &'static str,
    pub min_size: f32,
    pub max_size: f32,
    /// Target line-height as a ratio of font size.
    pub line_height: f32,
    pub family: FamilyCategory,
    /// Only applies to upper-case micro text.
    pub uppercase_only: bool,
}

impl TypographyToken {
    pub fn contains(&self, size: f32) -> bool {
        size >= self.min_size && size <= self.max_size
    }

    pub fn range_width(&self) -> f32 {
        self.max_size - self.min_size
    }
}

pub const LABEL_TOKEN: TypographyToken = TypographyToken {
    name: "label",
    class: "text-label",
    min_size: 10.0,
    max_size: 14.0,
    line_height: 1.2,
    family: FamilyCategory::Sans,
    uppercase_only: true,
};

pub const TYPOGRAPHY_TOKENS: &[TypographyToken] = &[
    TypographyToken {
        name: "display",
        class: "text-display",
        min_size: 64.0,
        max_size: 96.0,
        line_height: 1.0,
        family: FamilyCategory::Serif,
        uppercase_only: false,
    },
    TypographyToken {
        name: "h1",
        class: "text-h1",
        min_size: 48.0,
        max_size: 63.0,
        line_height: 1.1,
        family: FamilyCategory::Serif,
        uppercase_only: false,
    },
    TypographyToken {
        name: "h2",
        class: "text-h2",
        min_size: 36.0,
        max_size: 47.0,
        line_height: 1.15,
        family: FamilyCategory::Serif,
        uppercase_only: false,
    },
    TypographyToken {
        name: "h3",
        class: "text-h3",
        min_size: 28.0,
        max_size: 35.0,
        line_height: 1.2,
        family: FamilyCategory::Serif,
        uppercase_only: false,
    },
    TypographyToken {
        name: "h4",
        class: "text-h4",
        min_size: 22.0,
        max_size: 27.0,
        line_height: 1.25,
        family: FamilyCategory::Sans,
        uppercase_only: false,
    },
    TypographyToken {
        name: "lead",
        class: "text-lead",
        min_size: 19.0,
        max_size: 21.0,
        line_height: 1.5,
        family: FamilyCategory::Sans,
        uppercase_only: false,
    },
    TypographyToken {
        name: "body",
        class: "text-body",
        min_size: 16.0,
        max_size: 18.0,
        line_height: 1.6,
        family: FamilyCategory::Sans,
        uppercase_only: false,
    },
    TypographyToken {
        name: "small",
        class: "text-small",
        min_size: 13.0,
        max_size: 15.0,
        line_height: 1.5,
        family: FamilyCategory::Sans,
        uppercase_only: false,
    },
    TypographyToken {
        name: "caption",
        class: "text-caption",
        min_size: 10.0,
        max_size: 12.0,
        line_height: 1.4,
        family: FamilyCategory::Sans,
        uppercase_only: false,
    },
    TypographyToken {
        name: "code",
        class: "text-code",
        min_size: 12.0,
        max_size: 16.0,
        line_height: 1.5,
        family: FamilyCategory::Mono,
        uppercase_only: false,
    },
    LABEL_TOKEN,
];

/// Lower-cased family-name fragments per category.
pub const MONO_MARKERS: &[&str] = &[
    "mono", "code", "courier", "consolas", "menlo", "monaco",
];
pub const SERIF_MARKERS: &[&str] = &[
    "serif",
    "playfair",
    "georgia",
    "times",
    "garamond",
    "merriweather",
    "lora",
    "fraunces",
    "baskerville",
    "didot",
    "canela",
    "tiempos",
    "freight",
    "recoleta",
];

/// Heading level by minimum font size, largest first.
pub const HEADING_LEVELS: &[(f32, u8)] = &[(48.0, 1), (36.0, 2), (28.0, 3), (22.0, 4)];

pub fn heading_level(size: f32) -> Option<u8> {
    HEADING_LEVELS
        .iter()
        .find(|(min, _)| size >= *min)
        .map(|(_, level)| *level)
}

/// Map a font style name ("SemiBold Italic") to a weight utility.
pub fn weight_class(style: &str) -> Option<&'static str> {
    let lower = style.to_ascii_lowercase().replace([' ', '-', '_'], "");
    if lower.contains("extrabold") || lower.contains("black") || lower.contains("heavy") {
        Some("font-extrabold")
    } else if lower.contains("semibold") || lower.contains("demibold") {
        Some("font-semibold")
    } else if lower.contains("bold") {
        Some("font-bold")
    } else if lower.contains("medium") {
        Some("font-medium")
    } else if lower.contains("light") || lower.contains("thin") {
        Some("font-light")
    } else {
        None
    }
}
