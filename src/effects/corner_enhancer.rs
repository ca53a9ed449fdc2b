//! Step-corner emphasis
//!
//! Converts a subtle vertical offset between two parallel horizontal
//! line runs into an explicit visible step, inserting collinear points
//! and bumping the inner corners diagonally so the edge reads as
//! inked. Works on a four-point sliding window with wraparound; a
//! consumed window advances the scan by three, so the scan can skip
//! overlapping candidates near the wrap seam. That seam behavior is
//! part of the contract.

use crate::core::errors::EffectError;
use crate::effects::GlyphEffect;
use crate::font_source::{GlyphSnapshot, PointData, PointType};

enum StepDirection {
    Down,
    Up,
}

pub struct CornerEnhancer {
    /// Largest vertical gap treated as a step
    v_limit: f64,
    /// Shortest horizontal run that can anchor a step
    h_limit: f64,
    /// Diagonal bump for the inner corners
    adjust: f64,
}

impl CornerEnhancer {
    pub fn new(v_limit: f64, h_limit: f64, adjust: f64) -> Self {
        Self {
            v_limit,
            h_limit,
            adjust,
        }
    }

    /// A window qualifies when all four points are line-type, each pair
    /// shares a Y-coordinate, the first run travels -x and the second
    /// +x, and both runs are long enough. The differences are signed on
    /// purpose; the expansion geometry assumes this orientation.
    fn is_step_window(&self, p_m3: &PointData, p_m2: &PointData, p_m1: &PointData, p_0: &PointData) -> bool {
        p_m3.y == p_m2.y
            && p_m1.y == p_0.y
            && p_m3.typ == PointType::Line
            && p_m2.typ == PointType::Line
            && p_m1.typ == PointType::Line
            && p_0.typ == PointType::Line
            && p_m3.x - p_m2.x >= self.h_limit
            && p_0.x - p_m1.x >= self.h_limit
    }

    fn emit_step(
        &self,
        out: &mut Vec<PointData>,
        p_m3: &PointData,
        p_m2: &PointData,
        p_m1: &PointData,
        p_0: &PointData,
        direction: StepDirection,
    ) {
        let a = self.adjust;
        let smooth_line = |x: f64, y: f64| PointData::line(x, y).with_smooth(true);

        out.push(smooth_line(p_m3.x, p_m3.y));
        match direction {
            StepDirection::Down => {
                out.push(smooth_line((p_m3.x * 3.0 + p_m2.x) / 4.0, p_m3.y));
                out.push(smooth_line(p_m2.x - a * 3.0, p_m2.y + a));
                out.push(smooth_line(p_m1.x + a, p_m1.y - a * 3.0));
                out.push(smooth_line((p_m1.x * 3.0 + p_0.x) / 4.0, p_m1.y));
            }
            StepDirection::Up => {
                out.push(smooth_line((p_m3.x * 2.0 + p_m2.x) / 3.0, p_m3.y));
                out.push(smooth_line(p_m2.x + a, p_m2.y - a * 3.0));
                out.push(smooth_line(p_m1.x - a * 3.0, p_m1.y + a));
                out.push(smooth_line((p_m1.x * 2.0 + p_0.x) / 3.0, p_m1.y));
            }
        }
        out.push(smooth_line(p_0.x, p_0.y));
    }
}

impl Default for CornerEnhancer {
    fn default() -> Self {
        Self::new(50.0, 30.0, 3.0)
    }
}

impl GlyphEffect for CornerEnhancer {
    fn name(&self) -> &'static str {
        "corner-enhancer"
    }

    fn apply(&self, mut glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        for contour in &mut glyph.contours {
            let n = contour.points.len();
            if n < 5 {
                continue;
            }

            let old = &contour.points;
            let mut out = Vec::with_capacity(n + 8);
            let mut i = 0usize;
            while i < n {
                let p_m3 = &old[(i + n - 3) % n];
                let p_m2 = &old[(i + n - 2) % n];
                let p_m1 = &old[(i + n - 1) % n];
                let p_0 = &old[i];

                if self.is_step_window(p_m3, p_m2, p_m1, p_0) {
                    let gap = p_m2.y - p_m1.y;
                    if gap > 0.0 && gap <= self.v_limit {
                        self.emit_step(&mut out, p_m3, p_m2, p_m1, p_0, StepDirection::Down);
                        i += 3;
                        continue;
                    }
                    if -gap > 0.0 && -gap <= self.v_limit {
                        self.emit_step(&mut out, p_m3, p_m2, p_m1, p_0, StepDirection::Up);
                        i += 3;
                        continue;
                    }
                }

                out.push(*p_m3);
                i += 1;
            }
            contour.points = out;
        }
        Ok(glyph)
    }
}
