use std::path::Path;
use std::time::Duration;

use d2c_lib::types::AnimationKind;
use d2c_lib::{Config, D2cError};

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// CLI values that override config only when their flag was explicitly given.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub threshold: Option<u8>,
    pub debounce: Option<Duration>,
}

impl CliOverrides {
    pub fn from_args(args: &[String], threshold: Option<u8>, debounce_ms: Option<u64>) -> Self {
        Self {
            threshold: threshold.filter(|_| flag_present(args, "--threshold")),
            debounce: debounce_ms
                .filter(|_| flag_present(args, "--debounce-ms"))
                .map(Duration::from_millis),
        }
    }
}

/// Merge CLI overrides into the loaded config and re-validate.
pub fn apply_overrides(mut config: Config, overrides: CliOverrides) -> Result<Config, D2cError> {
    if let Some(threshold) = overrides.threshold {
        config.detection.acceptance_threshold = threshold;
    }
    if let Some(debounce) = overrides.debounce {
        config.pipeline.debounce = debounce;
    }
    config
        .validate()
        .map_err(|e| D2cError::Config(format!("Invalid flags: {}", e)))?;
    Ok(config)
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/d2c/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, D2cError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        D2cError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        D2cError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Parse a `--disable NODE_ID:KIND` value. Node ids may themselves contain
/// colons, so the split happens on the last one.
pub fn parse_disable(raw: &str) -> Result<(String, AnimationKind), D2cError> {
    let invalid = |reason: &str| {
        D2cError::Config(format!("Invalid --disable value '{}': {}", raw, reason))
    };
    let (node_id, kind) = raw
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected NODE_ID:KIND"))?;
    if node_id.is_empty() {
        return Err(invalid("node id is empty"));
    }
    let kind = kind.parse::<AnimationKind>().map_err(|e| invalid(e.as_str()))?;
    Ok((node_id.to_string(), kind))
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: colors exact<{:.1} approx<={:.1}, detection threshold={}, animation hero_y<{:.0} sibling_window={:.0}, debounce={}ms, clear_color_cache_per_run={}",
        config.colors.exact_threshold,
        config.colors.approximate_threshold,
        config.detection.acceptance_threshold,
        config.animation.hero_threshold_y,
        config.animation.sibling_window,
        config.pipeline.debounce.as_millis(),
        config.pipeline.clear_color_cache_per_run,
    )
}

/// Log effective config to stderr (verbose mode).
pub fn log_effective_config(config: &Config, config_source: Option<&Path>) {
    eprintln!("{}", format_effective_config(config, config_source));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_present_matches_bare_and_equals_forms() {
        let raw = args(&["d2c", "generate", "--threshold=70"]);
        assert!(flag_present(&raw, "--threshold"));
        assert!(!flag_present(&raw, "--debounce-ms"));
        assert!(flag_present(&args(&["d2c", "--threshold", "70"]), "--threshold"));
    }

    #[test]
    fn overrides_prefer_config_when_flags_absent() {
        let mut cfg = Config::default();
        cfg.detection.acceptance_threshold = 72;
        let overrides = CliOverrides::from_args(&args(&["d2c", "generate"]), Some(60), None);
        let merged = apply_overrides(cfg, overrides).expect("merge");
        assert_eq!(merged.detection.acceptance_threshold, 72);
    }

    #[test]
    fn overrides_prefer_cli_when_flags_present() {
        let raw = args(&["d2c", "watch", "--debounce-ms", "40", "--threshold", "80"]);
        let overrides = CliOverrides::from_args(&raw, Some(80), Some(40));
        let merged = apply_overrides(Config::default(), overrides).expect("merge");
        assert_eq!(merged.detection.acceptance_threshold, 80);
        assert_eq!(merged.pipeline.debounce, Duration::from_millis(40));
    }

    #[test]
    fn out_of_range_threshold_flag_is_rejected() {
        let raw = args(&["d2c", "generate", "--threshold", "0"]);
        let overrides = CliOverrides::from_args(&raw, Some(0), None);
        let err = apply_overrides(Config::default(), overrides).unwrap_err();
        assert!(err.to_string().contains("Invalid flags"));
    }

    #[test]
    fn disable_splits_on_last_colon() {
        let (node, kind) = parse_disable("12:3:hero-fade").expect("parse");
        assert_eq!(node, "12:3");
        assert_eq!(kind, AnimationKind::HeroFade);

        let err = parse_disable("hero-fade").unwrap_err();
        assert!(err.to_string().contains("--disable"));
        assert!(parse_disable(":stagger").is_err());
        assert!(parse_disable("1:2:wiggle").is_err());
    }

    #[test]
    fn effective_config_lists_every_section() {
        let summary = format_effective_config(&Config::default(), Some(Path::new("d2c.toml")));
        assert!(summary.contains("[d2c.toml]"));
        assert!(summary.contains("exact<3.0"));
        assert!(summary.contains("approx<=10.0"));
        assert!(summary.contains("threshold=60"));
        assert!(summary.contains("hero_y<800"));
        assert!(summary.contains("debounce=150ms"));
    }

    #[test]
    fn missing_config_path_is_reported_with_location() {
        let err = load_config(Some(Path::new("/nonexistent/d2c.toml"))).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Failed to read config /nonexistent/d2c.toml"));
    }
}
