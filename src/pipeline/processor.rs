//! Pipeline orchestrator
//!
//! Owns the font, identifies target glyphs, extracts operator-local
//! snapshots, fans them out over a fixed worker pool (or the calling
//! thread), and writes results back keyed by glyph name. Workers never
//! touch the shared font; the orchestrating thread is the sole writer,
//! and each glyph's extract → transform → write-back is all-or-nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::core::errors::ProcessError;
use crate::effects::{EffectChain, EffectOptions};
use crate::font_source::GlyphSnapshot;
use crate::pipeline::selector;

/// Default number of glyphs per dispatch chunk; amortizes dispatch
/// overhead without starving parallelism on small jobs.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// What to do when one glyph's transformation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop before anything is written back
    Abort,
    /// Skip the failed glyph, report it, keep going
    Continue,
}

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub parallel: bool,
    /// Worker thread count; defaults to half the available cores
    pub workers: Option<usize>,
    pub chunk_size: usize,
    /// Round all coordinates to integers after the operator chain
    pub round_coordinates: bool,
    pub failure_policy: FailurePolicy,
    /// Explicit glyph-name subset; bypasses the code-point scan
    pub subset: Option<BTreeSet<String>>,
    pub effects: EffectOptions,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            workers: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            round_coordinates: true,
            failure_policy: FailurePolicy::Abort,
            subset: None,
            effects: EffectOptions::default(),
        }
    }
}

/// Outcome of one `process` run.
#[derive(Debug, Default)]
pub struct ProcessReport {
    /// Number of glyphs selected for processing
    pub targets: usize,
    /// Number of glyphs transformed and written back
    pub processed: usize,
    /// Per-glyph failures (only populated under `Continue`)
    pub failures: Vec<ProcessError>,
}

/// Orchestrates the full restyling run over one font.
pub struct FontProcessor {
    font: norad::Font,
}

impl FontProcessor {
    /// Load a UFO font source from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let font = norad::Font::load(path)
            .with_context(|| format!("failed to load UFO from {}", path.display()))?;
        info!(
            glyphs = font.default_layer().iter().count(),
            path = %path.display(),
            "loaded UFO"
        );
        Ok(Self { font })
    }

    /// Wrap an already-loaded font.
    pub fn from_font(font: norad::Font) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &norad::Font {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut norad::Font {
        &mut self.font
    }

    /// Map each registered code point to the glyph names carrying it.
    pub fn codepoint_index(&self) -> BTreeMap<u32, Vec<String>> {
        let mut index: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for glyph in self.font.default_layer().iter() {
            for codepoint in glyph.codepoints.iter() {
                index
                    .entry(codepoint as u32)
                    .or_default()
                    .push(glyph.name().to_string());
            }
        }
        index
    }

    /// Glyph names mapped from the characters of `text`.
    pub fn names_for_text(&self, text: &str) -> BTreeSet<String> {
        let index = self.codepoint_index();
        let mut names = BTreeSet::new();
        for ch in text.chars() {
            if let Some(glyph_names) = index.get(&(ch as u32)) {
                names.extend(glyph_names.iter().cloned());
            }
        }
        names
    }

    /// The sorted, deduplicated set of glyphs to process.
    ///
    /// With an explicit subset the code-point scan is bypassed; names
    /// missing from the font are logged and skipped.
    pub fn target_names(&self, subset: Option<&BTreeSet<String>>) -> Vec<String> {
        let layer = self.font.default_layer();
        if let Some(subset) = subset {
            return subset
                .iter()
                .filter(|name| {
                    let known = layer.get_glyph(name.as_str()).is_some();
                    if !known {
                        warn!(glyph = %name, "subset names a glyph missing from the font");
                    }
                    known
                })
                .cloned()
                .collect();
        }

        let mut names = BTreeSet::new();
        for (codepoint, glyph_names) in self.codepoint_index() {
            if selector::is_target(Some(codepoint)) {
                names.extend(glyph_names);
            }
        }
        names.into_iter().collect()
    }

    /// Run the operator chain over every target glyph and write the
    /// results back in place.
    pub fn process(&mut self, options: &ProcessOptions) -> anyhow::Result<ProcessReport> {
        let targets = self.target_names(options.subset.as_ref());
        info!(
            targets = targets.len(),
            parallel = options.parallel,
            "identified target glyphs"
        );

        let layer = self.font.default_layer();
        let snapshots: Vec<GlyphSnapshot> = targets
            .iter()
            .filter_map(|name| {
                layer
                    .get_glyph(name.as_str())
                    .map(|glyph| GlyphSnapshot::from_norad_glyph(name, glyph))
            })
            .collect();

        let results: Vec<Result<GlyphSnapshot, ProcessError>> = if options.parallel {
            let workers = options.workers.unwrap_or_else(default_worker_count);
            debug!(workers, chunk_size = options.chunk_size, "starting worker pool");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .context("failed to build worker pool")?;
            pool.install(|| {
                snapshots
                    .into_par_iter()
                    .with_min_len(options.chunk_size.max(1))
                    // Each worker builds the operator chain once and
                    // reuses it for every glyph it processes
                    .map_init(
                        || EffectChain::from_options(&options.effects),
                        |chain, snapshot| run_unit(chain, snapshot, options.round_coordinates),
                    )
                    .collect()
            })
        } else {
            let chain = EffectChain::from_options(&options.effects);
            snapshots
                .into_iter()
                .map(|snapshot| run_unit(&chain, snapshot, options.round_coordinates))
                .collect()
        };

        let mut transformed = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(snapshot) => transformed.push(snapshot),
                Err(error) => match options.failure_policy {
                    FailurePolicy::Abort => {
                        // Nothing has been written back yet
                        return Err(error.into());
                    }
                    FailurePolicy::Continue => {
                        warn!(glyph = error.glyph(), %error, "skipping failed glyph");
                        failures.push(error);
                    }
                },
            }
        }

        // Sole writer: write-back runs on the orchestrating thread,
        // keyed by glyph name, so completion order never matters.
        let layer = self.font.default_layer_mut();
        let mut processed = 0usize;
        for snapshot in &transformed {
            if let Some(glyph) = layer.get_glyph_mut(snapshot.name.as_str()) {
                snapshot.write_back(glyph);
                processed += 1;
            }
        }
        info!(processed, failed = failures.len(), "write-back complete");

        Ok(ProcessReport {
            targets: targets.len(),
            processed,
            failures,
        })
    }

    /// Save the transformed UFO; binary compilation is the external
    /// compiler's job.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        self.font
            .save(path)
            .with_context(|| format!("failed to save UFO to {}", path.display()))?;
        info!(path = %path.display(), "saved UFO");
        Ok(())
    }
}

/// One unit of work: validate, transform, optionally round. The glyph
/// name travels with any failure.
fn run_unit(
    chain: &EffectChain,
    snapshot: GlyphSnapshot,
    round_coordinates: bool,
) -> Result<GlyphSnapshot, ProcessError> {
    let name = snapshot.name.clone();
    match chain.apply(snapshot) {
        Ok(mut glyph) => {
            if round_coordinates {
                glyph.round_coordinates();
            }
            Ok(glyph)
        }
        Err(source) => Err(ProcessError::Worker {
            glyph: name,
            source,
        }),
    }
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| (n.get() / 2).max(1))
        .unwrap_or(1)
}
