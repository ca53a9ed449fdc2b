//! Segment-type normalization
//!
//! Earlier operators can leave an off-curve control point immediately
//! followed by a line-type anchor, which is illegal in a
//! curve-consistent outline. This pass retypes such anchors to
//! curve-type. Idempotent; must run last in the chain.

use tracing::debug;

use crate::core::errors::EffectError;
use crate::effects::GlyphEffect;
use crate::font_source::{GlyphSnapshot, PointType};

pub struct Normalizer;

impl GlyphEffect for Normalizer {
    fn name(&self) -> &'static str {
        "normalizer"
    }

    fn apply(&self, mut glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        let mut retyped = 0usize;
        for contour in &mut glyph.contours {
            let n = contour.points.len();
            for i in 0..n {
                let next = (i + 1) % n;
                if contour.points[i].typ == PointType::OffCurve
                    && contour.points[next].typ == PointType::Line
                {
                    contour.points[next].typ = PointType::Curve;
                    retyped += 1;
                }
            }
        }
        if retyped > 0 {
            debug!(glyph = %glyph.name, retyped, "retyped line anchors after control points");
        }
        Ok(glyph)
    }
}
