//! Serif trapezoid conversion (experimental)
//!
//! Serif tips drawn as curve apexes become trapezoids: the apex is
//! split into two line points forming a flat top. Outer
//! (counter-clockwise) contours only. The split leaves the preceding
//! off-curve control pointing at a line anchor, which the normalizer
//! repairs downstream.

use kurbo::Vec2;

use crate::core::errors::EffectError;
use crate::effects::GlyphEffect;
use crate::font_source::{GlyphSnapshot, PointData, PointType};

/// Apex-to-line distances in this range read as a serif tip.
const MIN_TIP_SPAN: f64 = 30.0;
const MAX_TIP_SPAN: f64 = 200.0;
/// Base width the flat-top ratio scales against.
const BASE_WIDTH: f64 = 50.0;

pub struct SerifTrapezoid {
    /// Flat-top width as a ratio of the base width
    flat_ratio: f64,
}

impl SerifTrapezoid {
    pub fn new(flat_ratio: f64) -> Self {
        Self { flat_ratio }
    }

    /// A serif apex is a curve anchor fed by a control point whose
    /// following line segment heads down-left over a tip-sized span.
    fn is_serif_apex(p_prev: &PointData, p: &PointData, p_next: &PointData) -> bool {
        if p.typ != PointType::Curve
            || p_next.typ != PointType::Line
            || p_prev.typ != PointType::OffCurve
        {
            return false;
        }
        let span = Vec2::new(p_next.x - p.x, p_next.y - p.y);
        let dist = span.hypot();
        dist > MIN_TIP_SPAN && dist < MAX_TIP_SPAN && span.x < 0.0 && span.y < 0.0
    }
}

impl Default for SerifTrapezoid {
    fn default() -> Self {
        Self::new(0.15)
    }
}

impl GlyphEffect for SerifTrapezoid {
    fn name(&self) -> &'static str {
        "serif-trapezoid"
    }

    fn apply(&self, mut glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        for contour in &mut glyph.contours {
            let n = contour.points.len();
            if n < 5 || contour.clockwise {
                continue;
            }

            let old = std::mem::take(&mut contour.points);
            let mut out = Vec::with_capacity(n + 4);
            for i in 0..n {
                let p_prev = &old[(i + n - 1) % n];
                let p = &old[i];
                let p_next = &old[(i + 1) % n];

                if Self::is_serif_apex(p_prev, p, p_next) {
                    let width = self.flat_ratio * BASE_WIDTH;
                    out.push(PointData::line(p.x - width * 0.3, p.y - width * 0.5));
                    out.push(PointData::line(p.x + width * 0.3, p.y - width * 0.5));
                } else {
                    out.push(*p);
                }
            }
            contour.points = out;
        }
        Ok(glyph)
    }
}
