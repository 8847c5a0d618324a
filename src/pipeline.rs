//! Pipeline orchestrator.
//!
//! Sequences token resolution, component detection, animation suggestion,
//! code generation and context formatting for one selection. The last
//! successful run is cached so animation toggles regenerate markup without
//! re-running detection.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::animation::AnimationEngine;
use crate::codegen::CodeGenerator;
use crate::config::Config;
use crate::context::ContextFormatter;
use crate::detect::ComponentDetector;
use crate::error::{D2cError, Result};
use crate::matching::{ColorMatcher, LayoutMapper, ResolvedTokens, TypographyMatcher};
use crate::progress::ProgressCallback;
use crate::types::{
    AnimationKind, AnimationSuggestion, ComponentMatch, ExtractedNode, GeneratedCode,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The selection was empty; nothing was generated or cached.
    NoSelection,
    Generated(GeneratedCode),
}

impl PipelineOutcome {
    pub fn generated(&self) -> Option<&GeneratedCode> {
        match self {
            PipelineOutcome::Generated(code) => Some(code),
            PipelineOutcome::NoSelection => None,
        }
    }
}

/// Everything derived from one selection that regeneration needs.
#[derive(Debug, Clone)]
struct PipelineCache {
    nodes: Vec<ExtractedNode>,
    tokens: ResolvedTokens,
    matches: Vec<ComponentMatch>,
    animations: Vec<AnimationSuggestion>,
}

pub struct Pipeline {
    colors: ColorMatcher,
    typography: TypographyMatcher,
    layout: LayoutMapper,
    detector: ComponentDetector,
    animator: AnimationEngine,
    generator: CodeGenerator,
    formatter: ContextFormatter,
    clear_cache_per_run: bool,
    animations_enabled: bool,
    progress: Option<ProgressCallback>,
    cache: Option<PipelineCache>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            colors: ColorMatcher::new(
                config.colors.exact_threshold,
                config.colors.approximate_threshold,
            ),
            typography: TypographyMatcher::new(),
            layout: LayoutMapper::new(),
            detector: ComponentDetector::new(config.detection.acceptance_threshold),
            animator: AnimationEngine::new(
                config.animation.hero_threshold_y,
                config.animation.sibling_window,
            ),
            generator: CodeGenerator::new(),
            formatter: ContextFormatter::new(),
            clear_cache_per_run: config.pipeline.clear_color_cache_per_run,
            animations_enabled: true,
            progress: None,
            cache: None,
        }
    }

    pub fn with_progress(mut self, progress: Option<ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// When disabled, suggestions are still computed but start switched off.
    pub fn with_animations(mut self, enabled: bool) -> Self {
        self.animations_enabled = enabled;
        self
    }

    pub fn has_cached_run(&self) -> bool {
        self.cache.is_some()
    }

    /// Component matches from the last successful run.
    pub fn matches(&self) -> Option<&[ComponentMatch]> {
        self.cache.as_ref().map(|c| c.matches.as_slice())
    }

    /// Forget the cached run and memoized Lab conversions.
    pub fn clear_cache(&mut self) {
        self.cache = None;
        self.colors.clear_cache();
        self.detector.clear_cache();
    }

    /// Run every stage over a selection.
    ///
    /// A failed run leaves no cached state behind.
    pub fn run(&mut self, nodes: Vec<ExtractedNode>) -> Result<PipelineOutcome> {
        if nodes.is_empty() {
            debug!("empty selection");
            return Ok(PipelineOutcome::NoSelection);
        }
        if let Err(err) = validate_tree(&nodes) {
            warn!(error = %err, "rejecting selection");
            self.cache = None;
            return Err(err);
        }
        if self.clear_cache_per_run {
            self.colors.clear_cache();
            self.detector.clear_cache();
        }

        self.report("Resolving tokens...");
        let tokens = ResolvedTokens::resolve(&nodes, &self.colors, &self.typography, &self.layout);
        debug!(
            colors = tokens.colors.len(),
            typography = tokens.typography.len(),
            layout = tokens.layout.len(),
            "tokens resolved"
        );

        self.report("Detecting components...");
        let matches = self.detector.detect(&nodes);

        self.report("Suggesting animations...");
        let mut animations = self.animator.suggest(&nodes, &matches);
        if !self.animations_enabled {
            for suggestion in &mut animations {
                suggestion.enabled = false;
            }
        }

        let cache = PipelineCache {
            nodes,
            tokens,
            matches,
            animations,
        };
        self.report("Generating code...");
        let code = self.render(&cache);
        info!(
            roots = cache.nodes.len(),
            components = cache.matches.len(),
            animations = cache.animations.len(),
            warnings = code.warnings.len(),
            "generation complete"
        );
        self.cache = Some(cache);
        Ok(PipelineOutcome::Generated(code))
    }

    /// Flip one cached suggestion and regenerate.
    pub fn toggle_animation(
        &mut self,
        node_id: &str,
        kind: AnimationKind,
        enabled: bool,
    ) -> Result<GeneratedCode> {
        let cache = self.cache.as_mut().ok_or(D2cError::NoCachedRun)?;
        let suggestion = cache
            .animations
            .iter_mut()
            .find(|s| s.node_id == node_id && s.kind == kind)
            .ok_or_else(|| {
                D2cError::pipeline(format!("no {kind} suggestion for node {node_id}"))
            })?;
        suggestion.enabled = enabled;
        debug!(node_id, %kind, enabled, "animation toggled");
        self.regenerate()
    }

    /// Replace the cached suggestion set and regenerate.
    ///
    /// Suggestions for nodes outside the cached selection are dropped.
    pub fn apply_animations(
        &mut self,
        animations: Vec<AnimationSuggestion>,
    ) -> Result<GeneratedCode> {
        let cache = self.cache.as_mut().ok_or(D2cError::NoCachedRun)?;
        let known: HashSet<&str> = cache
            .nodes
            .iter()
            .flat_map(ExtractedNode::descendants)
            .map(|n| n.id.as_str())
            .collect();
        let before = animations.len();
        let kept: Vec<AnimationSuggestion> = animations
            .into_iter()
            .filter(|s| known.contains(s.node_id.as_str()))
            .collect();
        if kept.len() < before {
            warn!(dropped = before - kept.len(), "suggestions for unknown nodes");
        }
        cache.animations = kept;
        self.regenerate()
    }

    fn regenerate(&self) -> Result<GeneratedCode> {
        let cache = self.cache.as_ref().ok_or(D2cError::NoCachedRun)?;
        Ok(self.render(cache))
    }

    fn render(&self, cache: &PipelineCache) -> GeneratedCode {
        let tokens = &cache.tokens;
        let mut code = self.generator.generate(
            &cache.nodes,
            &cache.matches,
            &cache.animations,
            &tokens.colors,
            &tokens.typography,
            &tokens.layout,
        );
        code.context = self.formatter.format(
            &cache.nodes,
            &tokens.colors,
            &tokens.typography,
            &tokens.layout,
            &cache.matches,
            &cache.animations,
        );
        code
    }

    fn report(&self, msg: &str) {
        if let Some(cb) = &self.progress {
            cb(msg);
        }
    }
}

/// Reject trees no stage can reason about: duplicate ids, non-finite
/// geometry and negative sizes.
pub fn validate_tree(nodes: &[ExtractedNode]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for node in nodes.iter().flat_map(ExtractedNode::descendants) {
        if node.id.is_empty() {
            return Err(D2cError::invalid_tree("<empty>", "node id is empty"));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(D2cError::invalid_tree(&node.id, "duplicate id"));
        }
        let geometry = [
            ("x", node.x),
            ("y", node.y),
            ("width", node.width),
            ("height", node.height),
            ("rotation", node.rotation),
            ("opacity", node.opacity),
        ];
        if let Some((field, _)) = geometry.iter().find(|(_, v)| !v.is_finite()) {
            return Err(D2cError::invalid_tree(
                &node.id,
                format!("{field} is not finite"),
            ));
        }
        if node.width < 0.0 || node.height < 0.0 {
            return Err(D2cError::invalid_tree(
                &node.id,
                format!("negative size {}x{}", node.width, node.height),
            ));
        }
    }
    Ok(())
}
