use crate::tokens::spacing_class;
use crate::types::{Alignment, AutoLayout, LayoutDirection, LayoutToken, Padding};

/// Minimum child count for the grid advisory hint.
pub const GRID_HINT_MIN_CHILDREN: usize = 3;

/// Maps auto-layout geometry to flex utilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutMapper;

impl LayoutMapper {
    pub fn new() -> Self {
        Self
    }

    /// Ordered layout tokens for an auto-layout container.
    ///
    /// Returns an empty list when `layout` is absent or has no direction.
    pub fn map(&self, layout: Option<&AutoLayout>, child_count: usize) -> Vec<LayoutToken> {
        let Some(layout) = layout else {
            return Vec::new();
        };
        let mut tokens = Vec::new();
        match layout.direction {
            LayoutDirection::None => return tokens,
            LayoutDirection::Horizontal => {
                tokens.push(LayoutToken::class("flex"));
                tokens.push(LayoutToken::class("flex-row"));
            }
            LayoutDirection::Vertical => {
                tokens.push(LayoutToken::class("flex"));
                tokens.push(LayoutToken::class("flex-col"));
            }
        }

        if layout.wrap {
            tokens.push(LayoutToken::class("flex-wrap"));
        }

        if layout.gap > 0.0 {
            tokens.push(LayoutToken::class(spacing_class("gap", layout.gap)));
        }

        if let Some(class) = justify_class(layout.primary_align) {
            tokens.push(LayoutToken::class(class));
        }
        if let Some(class) = items_class(layout.counter_align) {
            tokens.push(LayoutToken::class(class));
        }

        tokens.extend(padding_classes(&layout.padding).into_iter().map(LayoutToken::class));

        if layout.direction == LayoutDirection::Horizontal
            && !layout.wrap
            && child_count >= GRID_HINT_MIN_CHILDREN
        {
            tokens.push(LayoutToken::hint(format!("grid grid-cols-{child_count}")));
        }

        tokens
    }
}

fn justify_class(align: Alignment) -> Option<&'static str> {
    match align {
        Alignment::Min | Alignment::Baseline => None,
        Alignment::Center => Some("justify-center"),
        Alignment::Max => Some("justify-end"),
        Alignment::SpaceBetween => Some("justify-between"),
    }
}

fn items_class(align: Alignment) -> Option<&'static str> {
    match align {
        Alignment::Min | Alignment::SpaceBetween => None,
        Alignment::Center => Some("items-center"),
        Alignment::Max => Some("items-end"),
        Alignment::Baseline => Some("items-baseline"),
    }
}

/// Collapse four-sided padding into the most compact class set.
pub fn padding_classes(padding: &Padding) -> Vec<String> {
    let Padding {
        top,
        right,
        bottom,
        left,
    } = *padding;

    if top == right && right == bottom && bottom == left {
        return if top > 0.0 {
            vec![spacing_class("p", top)]
        } else {
            Vec::new()
        };
    }

    let mut classes = Vec::new();
    if top == bottom {
        if top > 0.0 {
            classes.push(spacing_class("py", top));
        }
    } else {
        if top > 0.0 {
            classes.push(spacing_class("pt", top));
        }
        if bottom > 0.0 {
            classes.push(spacing_class("pb", bottom));
        }
    }
    if left == right {
        if left > 0.0 {
            classes.push(spacing_class("px", left));
        }
    } else {
        if right > 0.0 {
            classes.push(spacing_class("pr", right));
        }
        if left > 0.0 {
            classes.push(spacing_class("pl", left));
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{layout_classes, LayoutTokenKind};

    fn layout(direction: LayoutDirection, gap: f32) -> AutoLayout {
        AutoLayout {
            direction,
            gap,
            padding: Padding::default(),
            primary_align: Alignment::Min,
            counter_align: Alignment::Min,
            wrap: false,
        }
    }

    fn values(tokens: &[LayoutToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn absent_layout_is_a_no_op() {
        assert!(LayoutMapper::new().map(None, 4).is_empty());
        let none = layout(LayoutDirection::None, 16.0);
        assert!(LayoutMapper::new().map(Some(&none), 4).is_empty());
    }

    #[test]
    fn horizontal_gap_16_emits_direction_and_gap() {
        let tokens = LayoutMapper::new().map(Some(&layout(LayoutDirection::Horizontal, 16.0)), 2);
        assert_eq!(values(&tokens), vec!["flex", "flex-row", "gap-4"]);
    }

    #[test]
    fn gap_37_is_arbitrary() {
        let tokens = LayoutMapper::new().map(Some(&layout(LayoutDirection::Vertical, 37.0)), 2);
        assert_eq!(values(&tokens), vec!["flex", "flex-col", "gap-[37px]"]);
    }

    #[test]
    fn default_alignment_is_omitted_and_others_emitted() {
        let mut l = layout(LayoutDirection::Vertical, 0.0);
        l.primary_align = Alignment::SpaceBetween;
        l.counter_align = Alignment::Center;
        let tokens = LayoutMapper::new().map(Some(&l), 1);
        assert_eq!(
            values(&tokens),
            vec!["flex", "flex-col", "justify-between", "items-center"]
        );
    }

    #[test]
    fn padding_collapses_to_compact_form() {
        assert_eq!(padding_classes(&Padding::uniform(24.0)), vec!["p-6"]);
        let symmetric = Padding {
            top: 12.0,
            right: 24.0,
            bottom: 12.0,
            left: 24.0,
        };
        assert_eq!(padding_classes(&symmetric), vec!["py-3", "px-6"]);
        let uneven = Padding {
            top: 8.0,
            right: 16.0,
            bottom: 0.0,
            left: 4.0,
        };
        assert_eq!(padding_classes(&uneven), vec!["pt-2", "pr-4", "pl-1"]);
        assert!(padding_classes(&Padding::default()).is_empty());
    }

    #[test]
    fn three_horizontal_children_get_filterable_grid_hint() {
        let tokens = LayoutMapper::new().map(Some(&layout(LayoutDirection::Horizontal, 24.0)), 3);
        let last = tokens.last().expect("hint");
        assert_eq!(last.kind, LayoutTokenKind::Hint);
        assert_eq!(last.value, "grid grid-cols-3");
        let classes: Vec<&str> = layout_classes(&tokens).collect();
        assert_eq!(classes, vec!["flex", "flex-row", "gap-6"]);
    }

    #[test]
    fn wrapping_rows_skip_grid_hint() {
        let mut l = layout(LayoutDirection::Horizontal, 24.0);
        l.wrap = true;
        let tokens = LayoutMapper::new().map(Some(&l), 5);
        assert!(tokens.iter().all(|t| t.is_class()));
        assert!(values(&tokens).contains(&"flex-wrap"));
    }
}
