//! End-to-end pipeline run: load, restyle, save.

use std::collections::BTreeSet;
use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::cli::CliArgs;
use crate::core::settings::Settings;
use crate::font_source::apply_naming;
use crate::pipeline::FontProcessor;

/// Run the whole pipeline for one invocation.
pub fn run(args: CliArgs) -> Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut processor = FontProcessor::load(&args.input)?;
    let subset = resolve_subset(&args, &processor)?;
    let naming = args.naming(&settings);
    apply_naming(processor.font_mut(), &naming);

    let options = args.process_options(&settings, subset);
    let started = Instant::now();
    let report = processor.process(&options)?;
    info!(
        targets = report.targets,
        processed = report.processed,
        failed = report.failures.len(),
        elapsed = ?started.elapsed(),
        "processing finished"
    );

    let output = args.output_path(&naming);
    processor.save(&output)?;
    Ok(())
}

/// Union of every subset source: explicit glyph names plus the glyphs
/// mapped from subset characters. Empty means no subset.
fn resolve_subset(args: &CliArgs, processor: &FontProcessor) -> Result<Option<BTreeSet<String>>> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    if let Some(list) = &args.subset_glyphs {
        names.extend(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from),
        );
    }

    let mut text = args.subset.clone().unwrap_or_default();
    if let Some(path) = &args.subset_file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read subset file {}", path.display()))?;
        text.push_str(&contents);
    }
    if !text.is_empty() {
        names.extend(processor.names_for_text(&text));
    }

    Ok(if names.is_empty() { None } else { Some(names) })
}
