//! Static design-token registry.
//!
//! The tables in this module are the single source of truth for every
//! matcher:
//! - Color palette with precomputed Lab coordinates and per-context classes
//! - Type scale (size ranges, line-height, family category, case)
//! - Spacing and radius scales

mod color;
mod spacing;
mod typography;

pub use color::{
    color_token, ColorToken, ACCENT_HEX, ACCENT_STRONG_HEX, BRAND_HEX, COLOR_TOKENS, DANGER_HEX,
    INK_HEX, SUCCESS_HEX, WHITE_HEX,
};
pub use spacing::{
    radius_class, spacing_class, spacing_step, RADIUS_SCALE, SPACING_SCALE, SPACING_TOLERANCE,
};
pub use typography::{
    heading_level, weight_class, TypographyToken, HEADING_LEVELS, LABEL_TOKEN, MONO_MARKERS,
    SERIF_MARKERS, TYPOGRAPHY_TOKENS,
};
