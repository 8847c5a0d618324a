use std::cell::RefCell;
use std::collections::HashMap;

use palette::{convert::FromColorUnclamped, Lab, Srgb};

use crate::tokens::COLOR_TOKENS;
use crate::types::{ColorContext, ColorMatch, ExtractedNode, NodeColors, Paint, Rgba};

/// Distance reported for arbitrary-value fallbacks.
pub const ARBITRARY_DISTANCE: f32 = 999.0;

/// Nearest-token color matcher working in CIELAB (D65).
///
/// Lab conversions are memoized per hex string. The cache belongs to this
/// instance; call [`ColorMatcher::clear_cache`] between independent
/// extractions.
#[derive(Debug)]
pub struct ColorMatcher {
    pub exact_threshold: f32,
    pub approximate_threshold: f32,
    cache: RefCell<HashMap<String, Lab>>,
}

impl Default for ColorMatcher {
    fn default() -> Self {
        Self::new(3.0, 10.0)
    }
}

impl ColorMatcher {
    pub fn new(exact_threshold: f32, approximate_threshold: f32) -> Self {
        Self {
            exact_threshold,
            approximate_threshold,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Lab coordinates for a color, memoized by its hex key.
    pub fn lab(&self, color: Rgba) -> Lab {
        let key = color.to_hex();
        if let Some(lab) = self.cache.borrow().get(&key) {
            return *lab;
        }
        let lab = rgba_to_lab(color);
        self.cache.borrow_mut().insert(key, lab);
        lab
    }

    /// Lab distance between a color and a `#RRGGBB` reference.
    pub fn distance_to_hex(&self, color: Rgba, hex: &str) -> f32 {
        match Rgba::from_hex(hex) {
            Some(reference) => lab_distance(self.lab(color), self.lab(reference)),
            None => ARBITRARY_DISTANCE,
        }
    }

    pub fn match_color(&self, color: Rgba, context: ColorContext) -> ColorMatch {
        let hex = color.to_hex();
        let lab = self.lab(color);

        let mut best: Option<(&'static str, f32)> = None;
        for token in COLOR_TOKENS {
            let Some(class) = token.class_for(context) else {
                continue;
            };
            let [l, a, b] = token.lab;
            let distance = lab_distance(lab, Lab::new(l, a, b));
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((class, distance));
            }
        }

        match best {
            Some((class, distance)) if distance <= self.approximate_threshold => ColorMatch {
                class: class.to_string(),
                hex,
                distance,
                is_exact: distance < self.exact_threshold,
                context,
            },
            _ => ColorMatch {
                class: format!("{}-[{}]", context.prefix(), hex),
                hex,
                distance: ARBITRARY_DISTANCE,
                is_exact: false,
                context,
            },
        }
    }

    /// Match a paint; only visible solid paints resolve.
    pub fn match_paint(&self, paint: &Paint, context: ColorContext) -> Option<ColorMatch> {
        paint
            .solid_color()
            .map(|color| self.match_color(color, context))
    }

    /// Resolve every color context that applies to a node.
    ///
    /// Text fills map to the text context, other fills to background, and
    /// weighted strokes to border.
    pub fn match_node(&self, node: &ExtractedNode) -> NodeColors {
        let fill = node.solid_fill();
        let mut colors = NodeColors::default();
        if node.is_text() {
            colors.text = fill.map(|c| self.match_color(c, ColorContext::Text));
        } else {
            colors.background = fill.map(|c| self.match_color(c, ColorContext::Background));
        }
        colors.border = node
            .solid_stroke()
            .map(|c| self.match_color(c, ColorContext::Border));
        colors
    }
}

pub fn rgba_to_lab(color: Rgba) -> Lab {
    let srgb = Srgb::new(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
    );
    Lab::from_color_unclamped(srgb)
}

pub fn lab_distance(a: Lab, b: Lab) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}
