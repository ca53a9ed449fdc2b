//! Glyph geometry operators ("effects")
//!
//! Independent, composable transforms over glyph snapshots. Each
//! operator is configuration-only and stateless across invocations, so
//! a worker can build the chain once and reuse it for every glyph it
//! processes. Operators read neighbor context from the pre-pass point
//! list and emit into a fresh buffer; none of them drops a point, and
//! none of them reorders points, so winding direction is stable across
//! the whole chain.

pub mod corner_enhancer;
pub mod corner_rounder;
pub mod horizontal_bolder;
pub mod ink_trap;
pub mod left_stroke_cutter;
pub mod normalizer;
pub mod serif_trapezoid;

pub use corner_enhancer::CornerEnhancer;
pub use corner_rounder::CornerRounder;
pub use horizontal_bolder::HorizontalBolder;
pub use ink_trap::InkTrap;
pub use left_stroke_cutter::LeftStrokeCutter;
pub use normalizer::Normalizer;
pub use serif_trapezoid::SerifTrapezoid;

use serde::{Deserialize, Serialize};

use crate::core::errors::EffectError;
use crate::font_source::GlyphSnapshot;

/// A single outline transform.
pub trait GlyphEffect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Consume a snapshot and produce the transformed snapshot.
    fn apply(&self, glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError>;
}

/// Parameters for every operator, including the experimental ones.
///
/// Defaults are the production values; the experimental operators are
/// disabled until their flag is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectOptions {
    /// Vertical nudge for near-horizontal strokes, in font units
    pub bold_adjust: f64,
    /// Y-difference below which a neighbor relation counts as horizontal
    pub bold_limit: f64,
    /// Largest vertical gap treated as a step between horizontal runs
    pub step_v_limit: f64,
    /// Shortest horizontal run that can anchor a step
    pub step_h_limit: f64,
    /// Diagonal bump applied to a step's inner corners
    pub step_adjust: f64,
    /// Corner rounding inset along each arm
    pub round_size: f64,
    /// Shortest arm length for size-based rounding
    pub round_limit: f64,
    /// Enable the left stroke cutter
    pub left_cut: bool,
    pub cut_size: f64,
    pub cut_min_length: f64,
    /// Enable the ink trap
    pub ink_trap: bool,
    pub trap_size: f64,
    /// Smallest corner angle trapped, in degrees
    pub trap_min_angle: f64,
    /// Largest corner angle trapped, in degrees
    pub trap_max_angle: f64,
    pub trap_min_segment: f64,
    /// Enable the serif trapezoid conversion
    pub serif_trapezoid: bool,
    pub serif_flat_ratio: f64,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            bold_adjust: 9.0,
            bold_limit: 4.0,
            step_v_limit: 50.0,
            step_h_limit: 30.0,
            step_adjust: 3.0,
            round_size: 20.0,
            round_limit: 40.0,
            left_cut: false,
            cut_size: 12.0,
            cut_min_length: 100.0,
            ink_trap: false,
            trap_size: 8.0,
            trap_min_angle: 30.0,
            trap_max_angle: 150.0,
            trap_min_segment: 50.0,
            serif_trapezoid: false,
            serif_flat_ratio: 0.15,
        }
    }
}

/// The ordered operator chain for one worker.
///
/// Order is part of the contract: the bolder sees raw coordinates, the
/// enhancer sees bolded line runs, the rounder consumes the emphasized
/// corners, and the normalizer repairs segment typing last. The
/// experimental operators slot in at fixed positions when enabled.
pub struct EffectChain {
    effects: Vec<Box<dyn GlyphEffect>>,
}

impl EffectChain {
    pub fn from_options(options: &EffectOptions) -> Self {
        let mut effects: Vec<Box<dyn GlyphEffect>> = Vec::new();
        effects.push(Box::new(HorizontalBolder::new(
            options.bold_adjust,
            options.bold_limit,
        )));
        if options.left_cut {
            effects.push(Box::new(LeftStrokeCutter::new(
                options.cut_size,
                options.cut_min_length,
            )));
        }
        if options.serif_trapezoid {
            effects.push(Box::new(SerifTrapezoid::new(options.serif_flat_ratio)));
        }
        effects.push(Box::new(CornerEnhancer::new(
            options.step_v_limit,
            options.step_h_limit,
            options.step_adjust,
        )));
        if options.ink_trap {
            effects.push(Box::new(InkTrap::new(
                options.trap_size,
                options.trap_min_angle,
                options.trap_max_angle,
                options.trap_min_segment,
            )));
        }
        effects.push(Box::new(CornerRounder::new(
            options.round_size,
            options.round_limit,
        )));
        effects.push(Box::new(Normalizer));
        Self { effects }
    }

    /// Validate contour grammar, then run every operator in order.
    pub fn apply(&self, glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        for contour in &glyph.contours {
            contour.validate()?;
        }
        let mut glyph = glyph;
        for effect in &self.effects {
            glyph = effect.apply(glyph)?;
        }
        Ok(glyph)
    }

    /// Operator names in application order.
    pub fn effect_names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chain_order() {
        let chain = EffectChain::from_options(&EffectOptions::default());
        assert_eq!(
            chain.effect_names(),
            vec![
                "horizontal-bolder",
                "corner-enhancer",
                "corner-rounder",
                "normalizer"
            ]
        );
    }

    #[test]
    fn test_experimental_chain_order() {
        let options = EffectOptions {
            left_cut: true,
            ink_trap: true,
            serif_trapezoid: true,
            ..EffectOptions::default()
        };
        let chain = EffectChain::from_options(&options);
        assert_eq!(
            chain.effect_names(),
            vec![
                "horizontal-bolder",
                "left-stroke-cutter",
                "serif-trapezoid",
                "corner-enhancer",
                "ink-trap",
                "corner-rounder",
                "normalizer"
            ]
        );
    }

    #[test]
    fn test_chain_rejects_malformed_contour() {
        use crate::font_source::{ContourSnapshot, PointData};

        let glyph = GlyphSnapshot::new(
            "broken",
            vec![ContourSnapshot::new(vec![
                PointData::off_curve(0.0, 0.0),
                PointData::off_curve(10.0, 10.0),
            ])],
        );
        let chain = EffectChain::from_options(&EffectOptions::default());
        assert!(chain.apply(glyph).is_err());
    }
}
