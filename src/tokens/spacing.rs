/// Spacing steps as `(suffix, px)`, ascending.
pub const SPACING_SCALE: &[(&str, f32)] = &[
    ("0", 0.0),
    ("0.5", 2.0),
    ("1", 4.0),
    ("1.5", 6.0),
    ("2", 8.0),
    ("2.5", 10.0),
    ("3", 12.0),
    ("4", 16.0),
    ("5", 20.0),
    ("6", 24.0),
    ("8", 32.0),
    ("10", 40.0),
    ("12", 48.0),
    ("16", 64.0),
    ("20", 80.0),
    ("24", 96.0),
    ("32", 128.0),
];

/// Maximum px difference for snapping to a spacing step.
pub const SPACING_TOLERANCE: f32 = 2.0;

/// Radius steps as `(class, px)`, ascending.
pub const RADIUS_SCALE: &[(&str, f32)] = &[
    ("rounded-sm", 2.0),
    ("rounded", 4.0),
    ("rounded-md", 6.0),
    ("rounded-lg", 8.0),
    ("rounded-xl", 12.0),
    ("rounded-2xl", 16.0),
    ("rounded-3xl", 24.0),
];

fn format_px(px: f32) -> String {
    if (px - px.round()).abs() < f32::EPSILON {
        format!("{}", px.round() as i64)
    } else {
        format!("{:.1}", px)
    }
}

/// Nearest spacing suffix within tolerance. Ties go to the larger step, and a
/// non-zero value never snaps to the zero step.
pub fn spacing_step(px: f32) -> Option<&'static str> {
    let mut best: Option<(&'static str, f32)> = None;
    for (suffix, value) in SPACING_SCALE {
        if *value == 0.0 && px != 0.0 {
            continue;
        }
        let delta = (px - value).abs();
        if delta > SPACING_TOLERANCE {
            continue;
        }
        if best.map_or(true, |(_, d)| delta <= d) {
            best = Some((*suffix, delta));
        }
    }
    best.map(|(suffix, _)| suffix)
}

/// `prefix-N` for a snapped value, otherwise `prefix-[Npx]`.
pub fn spacing_class(prefix: &str, px: f32) -> String {
    match spacing_step(px) {
        Some(suffix) => format!("{prefix}-{suffix}"),
        None => format!("{prefix}-[{}px]", format_px(px)),
    }
}

/// Radius utility for a node of the given size; `None` for square corners.
pub fn radius_class(radius: f32, width: f32, height: f32) -> Option<String> {
    if radius <= 0.0 {
        return None;
    }
    let short_side = width.min(height);
    if radius >= 9999.0 || (short_side > 0.0 && radius >= short_side / 2.0) {
        return Some("rounded-full".to_string());
    }
    RADIUS_SCALE
        .iter()
        .min_by(|a, b| {
            (a.1 - radius)
                .abs()
                .partial_cmp(&(b.1 - radius).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .filter(|(_, px)| (px - radius).abs() <= 1.0)
        .map(|(class, _)| class.to_string())
        .or_else(|| Some(format!("rounded-[{}px]", format_px(radius))))
}
