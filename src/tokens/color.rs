use crate::types::ColorContext;
use crate::types::ColorContext::{Background as Bg, Border, Text};

/// A palette entry with its Lab coordinates (D65) and per-context classes.
#[derive(Debug, Clone, Copy)]
pub struct ColorToken {
    pub name: &'static str,
    pub hex: &'static str,
    pub lab: [f32; 3],
    pub classes: &'static [(&'static str, ColorContext)],
}

impl ColorToken {
    pub fn class_for(&self, context: ColorContext) -> Option<&'static str> {
        self.classes
            .iter()
            .find(|(_, ctx)| *ctx == context)
            .map(|(class, _)| *class)
    }
}

pub const INK_HEX: &str = "#1A1A1A";
pub const WHITE_HEX: &str = "#FFFFFF";
pub const ACCENT_HEX: &str = "#E8572A";
pub const ACCENT_STRONG_HEX: &str = "#C4441C";
pub const BRAND_HEX: &str = "#1F3D2B";
pub const DANGER_HEX: &str = "#DC2626";
pub const SUCCESS_HEX: &str = "#16A34A";

/// Ordered palette. Ties during matching resolve to the earlier entry.
pub const COLOR_TOKENS: &[ColorToken] = &[
    ColorToken {
        name: "ink",
        hex: INK_HEX,
        lab: [9.26, 0.0, 0.0],
        classes: &[
            ("bg-inverse", Bg),
            ("text-primary", Text),
            ("border-strong", Border),
        ],
    },
    ColorToken {
        name: "white",
        hex: WHITE_HEX,
        lab: [100.0, 0.0, 0.0],
        classes: &[
            ("bg-surface", Bg),
            ("text-inverse", Text),
            ("border-inverse", Border),
        ],
    },
    ColorToken {
        name: "canvas",
        hex: "#FAF7F2",
        lab: [97.33, 0.13, 2.75],
        classes: &[("bg-canvas", Bg)],
    },
    ColorToken {
        name: "subtle",
        hex: "#F2EDE4",
        lab: [93.90, 0.13, 4.95],
        classes: &[("bg-subtle", Bg)],
    },
    ColorToken {
        name: "line",
        hex: "#E5E0D8",
        lab: [89.36, 0.31, 4.51],
        classes: &[("bg-muted", Bg), ("border-default", Border)],
    },
    ColorToken {
        name: "graphite",
        hex: "#6B6B6B",
        lab: [45.22, 0.0, 0.0],
        classes: &[("text-secondary", Text)],
    },
    ColorToken {
        name: "ash",
        hex: "#9A9A9A",
        lab: [63.60, 0.0, 0.0],
        classes: &[("text-tertiary", Text), ("border-muted", Border)],
    },
    ColorToken {
        name: "accent",
        hex: ACCENT_HEX,
        lab: [56.23, 54.09, 53.42],
        classes: &[
            ("bg-accent", Bg),
            ("text-accent", Text),
            ("border-accent", Border),
        ],
    },
    ColorToken {
        name: "accent-strong",
        hex: ACCENT_STRONG_HEX,
        lab: [46.92, 49.35, 49.03],
        classes: &[("bg-accent-strong", Bg), ("text-accent-strong", Text)],
    },
    ColorToken {
        name: "accent-soft",
        hex: "#FDE7DF",
        lab: [93.17, 6.19, 6.60],
        classes: &[("bg-accent-soft", Bg)],
    },
    ColorToken {
        name: "brand",
        hex: BRAND_HEX,
        lab: [23.01, -16.16, 7.68],
        classes: &[
            ("bg-brand", Bg),
            ("text-brand", Text),
            ("border-brand", Border),
        ],
    },
    ColorToken {
        name: "danger",
        hex: DANGER_HEX,
        lab: [47.94, 66.94, 46.91],
        classes: &[
            ("bg-danger", Bg),
            ("text-danger", Text),
            ("border-danger", Border),
        ],
    },
    ColorToken {
        name: "success",
        hex: SUCCESS_HEX,
        lab: [58.84, -54.43, 36.21],
        classes: &[("bg-success", Bg), ("text-success", Text)],
    },
    // Shadow color only; no utility class.
    ColorToken {
        name: "black",
        hex: "#000000",
        lab: [0.0, 0.0, 0.0],
        classes: &[],
    },
];

pub fn color_token(name: &str) -> Option<&'static ColorToken> {
    COLOR_TOKENS.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_names_are_unique() {
        let mut names: Vec<&str> = COLOR_TOKENS.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COLOR_TOKENS.len());
    }

    #[test]
    fn ink_has_distinct_classes_per_context() {
        let ink = color_token("ink").expect("ink token");
        assert_eq!(ink.class_for(ColorContext::Background), Some("bg-inverse"));
        assert_eq!(ink.class_for(ColorContext::Text), Some("text-primary"));
        assert_eq!(ink.class_for(ColorContext::Border), Some("border-strong"));
    }

    #[test]
    fn shadow_only_token_has_no_classes() {
        let black = color_token("black").expect("black token");
        assert!(black.class_for(ColorContext::Background).is_none());
    }
}
