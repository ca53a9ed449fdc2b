//! Horizontal stroke thickening
//!
//! Detects near-horizontal neighbor relations and nudges point
//! Y-coordinates outward, thickening the horizontal strokes of the
//! whole glyph. The nudge direction depends on the contour's winding
//! and the point's X-position relative to its neighbor, so outer
//! contours grow while counters shrink.

use std::f64::consts::FRAC_PI_4;

use kurbo::Vec2;

use crate::core::errors::EffectError;
use crate::effects::GlyphEffect;
use crate::font_source::GlyphSnapshot;

/// A stroke this long counts as horizontal even with a slight slope.
const LONG_STROKE: f64 = 300.0;
/// Segments at or below this length get the stronger nudge.
const SHORT_SEGMENT: f64 = 20.0;

pub struct HorizontalBolder {
    /// Nudge magnitude in font units
    adjust: f64,
    /// Y-difference threshold for the horizontal test
    limit: f64,
}

impl HorizontalBolder {
    pub fn new(adjust: f64, limit: f64) -> Self {
        Self { adjust, limit }
    }
}

impl Default for HorizontalBolder {
    fn default() -> Self {
        Self::new(9.0, 4.0)
    }
}

impl GlyphEffect for HorizontalBolder {
    fn name(&self) -> &'static str {
        "horizontal-bolder"
    }

    fn apply(&self, mut glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        for contour in &mut glyph.contours {
            let clockwise = contour.clockwise;
            let points = &mut contour.points;
            let n = points.len();
            if n <= 1 {
                continue;
            }

            // One nudge per point, computed against the unmodified
            // coordinates and applied after the full scan.
            let mut shifts = vec![0.0_f64; n];
            for i in 0..n {
                let p_c = &points[i];
                let p_p = &points[(i + n - 1) % n];
                let p_n = &points[(i + 1) % n];

                let v1 = Vec2::new(p_p.x - p_c.x, p_p.y - p_c.y);
                let v2 = Vec2::new(p_n.x - p_c.x, p_n.y - p_c.y);
                let d1 = v1.hypot();
                let d2 = v2.hypot();

                let prev_horizontal = (p_c.y - p_p.y).abs() <= self.limit
                    || (v1.atan2().abs() <= FRAC_PI_4 && d1 >= LONG_STROKE);
                let next_horizontal = (p_c.y - p_n.y).abs() <= self.limit
                    || (v2.atan2().abs() <= FRAC_PI_4 && d2 >= LONG_STROKE);

                if prev_horizontal {
                    let amount = if d1 > SHORT_SEGMENT {
                        self.adjust
                    } else {
                        self.adjust * 1.5
                    };
                    shifts[i] = if clockwise {
                        if p_c.x >= p_p.x {
                            -amount
                        } else {
                            amount
                        }
                    } else if p_c.x <= p_p.x {
                        amount
                    } else {
                        -amount
                    };
                }

                // First match wins: the next-neighbor relation only
                // applies when the prev-neighbor check assigned nothing.
                if shifts[i] == 0.0 && next_horizontal {
                    let amount = if d2 > SHORT_SEGMENT {
                        self.adjust
                    } else {
                        self.adjust * 1.5
                    };
                    shifts[i] = if clockwise {
                        if p_c.x <= p_n.x {
                            -amount
                        } else {
                            amount
                        }
                    } else if p_c.x >= p_n.x {
                        amount
                    } else {
                        -amount
                    };
                }
            }

            for (point, shift) in points.iter_mut().zip(shifts) {
                point.y += shift;
            }
        }
        Ok(glyph)
    }
}
