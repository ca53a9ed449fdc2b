//! Corner rounding
//!
//! Replaces sharp line corners with a three-point curve approximation:
//! two on-curve points inset along the arms plus one off-curve control
//! point weighted toward the original corner. Corners whose arms are
//! too short for the size-based inset still get a gentle forced
//! rounding so no stray sharp corner survives.

use kurbo::Vec2;
use tracing::warn;

use crate::core::errors::EffectError;
use crate::effects::GlyphEffect;
use crate::font_source::{GlyphSnapshot, PointData, PointType};

/// Control-point weight on the original corner; keeps the curve close
/// to the corner rather than over-rounding.
const CORNER_WEIGHT: f64 = 3.0;
const WEIGHT_TOTAL: f64 = 5.0;
/// Interpolation factor for the forced rounding of short corners.
const TIGHT_CURVE_FACTOR: f64 = 4.0;

pub struct CornerRounder {
    /// Inset along each arm, radius-like
    size: f64,
    /// Shortest arm length for the size-based inset
    limit: f64,
}

impl CornerRounder {
    pub fn new(size: f64, limit: f64) -> Self {
        Self { size, limit }
    }

    /// Emit the rounded replacement for `p`, or `p` itself when it is
    /// not a roundable corner.
    fn roundify_corner(&self, out: &mut Vec<PointData>, p_p: PointData, p: PointData, p_n: PointData) {
        let v1 = Vec2::new(p_p.x - p.x, p_p.y - p.y);
        let v2 = Vec2::new(p_n.x - p.x, p_n.y - p.y);
        let d1 = v1.hypot();
        let d2 = v2.hypot();

        if d1 >= self.limit && d2 >= self.limit && p.typ == PointType::Line {
            if d1 <= f64::EPSILON || d2 <= f64::EPSILON {
                warn!(
                    x = p.x,
                    y = p.y,
                    "zero-length neighbor vector, leaving corner untouched"
                );
                out.push(p);
                return;
            }
            let bx = (p.x * (d1 - self.size) + p_p.x * self.size) / d1;
            let by = (p.y * (d1 - self.size) + p_p.y * self.size) / d1;
            let ax = (p.x * (d2 - self.size) + p_n.x * self.size) / d2;
            let ay = (p.y * (d2 - self.size) + p_n.y * self.size) / d2;
            self.emit_rounded(out, p, bx, by, ax, ay);
        } else if p.typ != PointType::OffCurve && p.typ != PointType::Curve {
            // Short arms: force a touch of rounding anyway
            let f = TIGHT_CURVE_FACTOR;
            let bx = (p.x * f + p_p.x) / (f + 1.0);
            let by = (p.y * f + p_p.y) / (f + 1.0);
            let ax = (p.x * f + p_n.x) / (f + 1.0);
            let ay = (p.y * f + p_n.y) / (f + 1.0);
            self.emit_rounded(out, p, bx, by, ax, ay);
        } else {
            // Already curved, or a control point
            out.push(p);
        }
    }

    fn emit_rounded(&self, out: &mut Vec<PointData>, p: PointData, bx: f64, by: f64, ax: f64, ay: f64) {
        let vx = (bx + p.x * CORNER_WEIGHT + ax) / WEIGHT_TOTAL;
        let vy = (by + p.y * CORNER_WEIGHT + ay) / WEIGHT_TOTAL;
        out.push(PointData::curve(bx, by).with_smooth(true));
        out.push(PointData::off_curve(vx, vy));
        out.push(PointData::curve(ax, ay).with_smooth(true));
    }
}

impl Default for CornerRounder {
    fn default() -> Self {
        Self::new(20.0, 40.0)
    }
}

impl GlyphEffect for CornerRounder {
    fn name(&self) -> &'static str {
        "corner-rounder"
    }

    fn apply(&self, mut glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        for contour in &mut glyph.contours {
            // All neighbor reads use the pre-pass point list
            let old = std::mem::take(&mut contour.points);
            let n = old.len();
            let mut out = Vec::with_capacity(n * 3);
            for i in 0..n {
                let p_p = old[(i + n - 1) % n];
                let p = old[i];
                let p_n = old[(i + 1) % n];
                self.roundify_corner(&mut out, p_p, p, p_n);
            }
            contour.points = out;
        }
        Ok(glyph)
    }
}
