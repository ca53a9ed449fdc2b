//! Command line interface for the glyph restyling pipeline
//!
//! Handles parsing command line arguments and validating user inputs
//! before any work starts.

use std::path::PathBuf;

use clap::Parser;

use crate::core::settings::Settings;
use crate::font_source::FontNaming;
use crate::pipeline::processor::{FailurePolicy, ProcessOptions, DEFAULT_CHUNK_SIZE};

/// Kadomaru CLI arguments
///
/// Examples:
///   kadomaru --input source.ufo                  # Restyle every CJK glyph
///   kadomaru -i source.ufo -o out/styled.ufo     # Explicit output path
///   kadomaru -i source.ufo --round-size 28       # Heavier corner rounding
///   kadomaru -i source.ufo --subset 永遠         # Only the glyphs for these characters
///   kadomaru -i source.ufo --no-parallel         # Single-threaded run
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "kadomaru",
    version,
    about = "Restyle the CJK ideograph outlines of a UFO font source",
    long_about = "Kadomaru rewrites the outlines of CJK ideograph glyphs in a UFO font \
source: horizontal strokes are thickened, subtle steps become emphasized corners, and \
sharp corners are rounded. The transformed UFO is saved for an external compiler to \
turn into a binary font."
)]
pub struct CliArgs {
    /// Path to the UFO font source to process
    #[clap(
        long = "input",
        short = 'i',
        help = "UFO font source to process",
        long_help = "Path to the UFO version 3 directory to process. The font is loaded, \
its CJK ideograph glyphs are restyled, and the result is saved as a new UFO."
    )]
    pub input: PathBuf,

    /// Where to save the transformed UFO
    #[clap(
        long = "output",
        short = 'o',
        help = "Output UFO path (default: dist/<family>-<style>-<timestamp>.ufo)"
    )]
    pub output: Option<PathBuf>,

    /// Optional JSON settings file; CLI flags override it
    #[clap(long = "config", help = "JSON settings file; CLI flags override it")]
    pub config: Option<PathBuf>,

    /// Family name written to the output font info
    #[clap(long = "family-name", help = "Family name for the output font")]
    pub family_name: Option<String>,

    /// Style name written to the output font info
    #[clap(long = "style-name", help = "Style name for the output font")]
    pub style_name: Option<String>,

    /// Corner rounding size in font units
    #[clap(long = "round-size", help = "Corner rounding size in font units")]
    pub round_size: Option<f64>,

    /// Horizontal stroke thickening in font units
    #[clap(long = "bold-adjust", help = "Horizontal stroke thickening in font units")]
    pub bold_adjust: Option<f64>,

    /// Process glyphs sequentially in the calling thread
    #[clap(long = "no-parallel", help = "Disable parallel processing")]
    pub no_parallel: bool,

    /// Worker thread count
    #[clap(
        long = "workers",
        help = "Number of worker threads (default: half of cores)"
    )]
    pub workers: Option<usize>,

    /// Glyphs per dispatch chunk
    #[clap(long = "chunk-size", help = "Glyphs per dispatch chunk")]
    pub chunk_size: Option<usize>,

    /// Keep fractional coordinates instead of rounding to integers
    #[clap(long = "no-round", help = "Keep fractional coordinates in the output")]
    pub no_round: bool,

    /// Report failed glyphs and keep going instead of aborting
    #[clap(
        long = "keep-going",
        help = "Skip glyphs that fail to process instead of aborting"
    )]
    pub keep_going: bool,

    /// Characters whose glyphs should be processed (subset mode)
    #[clap(long = "subset", help = "Only process the glyphs for these characters")]
    pub subset: Option<String>,

    /// File of characters whose glyphs should be processed
    #[clap(
        long = "subset-file",
        help = "Path to a text file of characters to process"
    )]
    pub subset_file: Option<PathBuf>,

    /// Comma-separated glyph names to process
    #[clap(long = "subset-glyphs", help = "Comma-separated glyph names to process")]
    pub subset_glyphs: Option<String>,

    /// Enable the experimental left stroke cutter
    #[clap(long = "left-cut", help = "Enable the experimental left stroke cutter")]
    pub left_cut: bool,

    /// Enable the experimental ink trap
    #[clap(long = "ink-trap", help = "Enable the experimental ink trap")]
    pub ink_trap: bool,

    /// Enable the experimental serif trapezoid conversion
    #[clap(
        long = "serif-trapezoid",
        help = "Enable the experimental serif trapezoid conversion"
    )]
    pub serif_trapezoid: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// Checks that all paths exist and are plausible before the run
    /// starts, with clear messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!(
                "Font source does not exist: {}\nMake sure the path is correct.",
                self.input.display()
            ));
        }
        if !self.input.is_dir() {
            return Err(format!(
                "Not a UFO directory: {}\nExpected a UFO version 3 directory.",
                self.input.display()
            ));
        }
        let meta_info = self.input.join("metainfo.plist");
        if !meta_info.exists() {
            return Err(format!(
                "Not a valid UFO directory: missing metainfo.plist in {}",
                self.input.display()
            ));
        }
        if let Some(path) = &self.subset_file {
            if !path.exists() {
                return Err(format!("Subset file not found: {}", path.display()));
            }
        }
        Ok(())
    }

    /// Merge CLI flags over the settings file into process options.
    pub fn process_options(
        &self,
        settings: &Settings,
        subset: Option<std::collections::BTreeSet<String>>,
    ) -> ProcessOptions {
        let mut effects = settings.effects.clone();
        if let Some(size) = self.round_size {
            effects.round_size = size;
        }
        if let Some(adjust) = self.bold_adjust {
            effects.bold_adjust = adjust;
        }
        effects.left_cut |= self.left_cut;
        effects.ink_trap |= self.ink_trap;
        effects.serif_trapezoid |= self.serif_trapezoid;

        ProcessOptions {
            parallel: !self.no_parallel && settings.parallel.unwrap_or(true),
            workers: self.workers.or(settings.workers),
            chunk_size: self
                .chunk_size
                .or(settings.chunk_size)
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            round_coordinates: !self.no_round && settings.round_coordinates.unwrap_or(true),
            failure_policy: if self.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
            subset,
            effects,
        }
    }

    /// Naming for the output font: CLI over settings file.
    pub fn naming(&self, settings: &Settings) -> FontNaming {
        let mut naming = settings.naming.clone();
        if let Some(family) = &self.family_name {
            naming.family = family.clone();
        }
        if let Some(style) = &self.style_name {
            naming.style = style.clone();
        }
        naming
    }

    /// Output path; the default is timestamped under dist/.
    pub fn output_path(&self, naming: &FontNaming) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!(
            "dist/{}-{}-{}.ufo",
            naming.family.replace(' ', ""),
            naming.style.replace(' ', ""),
            timestamp
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["kadomaru", "--input", "font.ufo"];
        argv.extend(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_cli_overrides_settings() {
        let cli = args(&["--round-size", "28", "--no-parallel", "--workers", "3"]);
        let settings = Settings {
            workers: Some(8),
            ..Settings::default()
        };
        let options = cli.process_options(&settings, None);
        assert_eq!(options.effects.round_size, 28.0);
        assert_eq!(options.effects.bold_adjust, 9.0);
        assert!(!options.parallel);
        assert_eq!(options.workers, Some(3));
        assert_eq!(options.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_experimental_toggles() {
        let cli = args(&["--left-cut", "--ink-trap"]);
        let options = cli.process_options(&Settings::default(), None);
        assert!(options.effects.left_cut);
        assert!(options.effects.ink_trap);
        assert!(!options.effects.serif_trapezoid);
    }

    #[test]
    fn test_failure_policy_flag() {
        let cli = args(&["--keep-going"]);
        let options = cli.process_options(&Settings::default(), None);
        assert_eq!(options.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn test_default_output_is_timestamped() {
        let cli = args(&["--style-name", "Semi Bold"]);
        let naming = cli.naming(&Settings::default());
        let path = cli.output_path(&naming);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("KadomaruJP-SemiBold-"));
        assert!(name.ends_with(".ufo"));
    }
}
