//! Left stroke cutting (experimental)
//!
//! Cuts the left end of long horizontal strokes at a backslash angle,
//! the diagonal entry characteristic of serif-style horizontals. Both
//! the upper and lower corner of the stroke end are displaced so the
//! stroke keeps its width. Outer (counter-clockwise) contours only.

use kurbo::Vec2;

use crate::core::errors::EffectError;
use crate::effects::GlyphEffect;
use crate::font_source::{GlyphSnapshot, PointType};

/// Shortest incoming edge that counts as a stroke side.
const MIN_SIDE: f64 = 30.0;
/// A side is vertical when its x-extent is below this fraction of its
/// y-extent.
const VERTICAL_RATIO: f64 = 0.3;
/// Y-tolerance for the horizontal stroke edge itself.
const FLAT_TOLERANCE: f64 = 5.0;

pub struct LeftStrokeCutter {
    /// Size of the cut in font units
    cut_size: f64,
    /// Shortest horizontal edge that gets cut
    min_length: f64,
}

impl LeftStrokeCutter {
    pub fn new(cut_size: f64, min_length: f64) -> Self {
        Self {
            cut_size,
            min_length,
        }
    }
}

impl Default for LeftStrokeCutter {
    fn default() -> Self {
        Self::new(12.0, 100.0)
    }
}

impl GlyphEffect for LeftStrokeCutter {
    fn name(&self) -> &'static str {
        "left-stroke-cutter"
    }

    fn apply(&self, mut glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        for contour in &mut glyph.contours {
            let n = contour.points.len();
            if n < 4 || contour.clockwise {
                continue;
            }

            // Displacements are decided against the pre-pass
            // coordinates and applied after the scan.
            let mut displacements = vec![Vec2::ZERO; n];
            for i in 0..n {
                let p = &contour.points[i];
                let p_next = &contour.points[(i + 1) % n];
                let p_prev = &contour.points[(i + n - 1) % n];
                if p.typ != PointType::Line {
                    continue;
                }

                let to_next = Vec2::new(p_next.x - p.x, p_next.y - p.y);
                let from_prev = Vec2::new(p.x - p_prev.x, p.y - p_prev.y);
                let len_next = to_next.hypot();
                let len_prev = from_prev.hypot();

                // Start of a long rightward edge with a steep descending
                // entry: the top corner of the stroke's left end
                if len_next >= self.min_length
                    && to_next.x > 0.0
                    && to_next.y.abs() < FLAT_TOLERANCE
                {
                    let vertical_prev = len_prev > MIN_SIDE
                        && from_prev.x.abs() < from_prev.y.abs() * VERTICAL_RATIO;
                    if from_prev.y < -MIN_SIDE && vertical_prev {
                        displacements[i] = Vec2::new(self.cut_size * 0.8, -self.cut_size * 0.6);
                    }
                }

                // End of a long leftward edge with a steep ascending
                // exit: the bottom corner of the stroke's left end
                if len_prev >= self.min_length
                    && from_prev.x < 0.0
                    && from_prev.y.abs() < FLAT_TOLERANCE
                {
                    let vertical_next =
                        len_next > MIN_SIDE && to_next.x.abs() < to_next.y.abs() * VERTICAL_RATIO;
                    if to_next.y > MIN_SIDE && vertical_next {
                        displacements[i] = Vec2::new(self.cut_size * 0.8, self.cut_size * 0.6);
                    }
                }
            }

            for (point, d) in contour.points.iter_mut().zip(displacements) {
                point.x += d.x;
                point.y += d.y;
            }
        }
        Ok(glyph)
    }
}
