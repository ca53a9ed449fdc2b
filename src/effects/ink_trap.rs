//! Ink traps (experimental)
//!
//! Carves a small notch into the inner angle where strokes meet, so
//! ink spread at print sizes does not clog the junction. A trapped
//! corner is replaced by three line points: one inset along each arm
//! and one recessed along the angle bisector into the wedge.

use kurbo::Vec2;
use tracing::warn;

use crate::core::errors::EffectError;
use crate::effects::GlyphEffect;
use crate::font_source::{GlyphSnapshot, PointData, PointType};

/// Arm lengths below this are treated as degenerate.
const EPSILON: f64 = 1e-6;

pub struct InkTrap {
    /// Depth of the notch in font units
    trap_size: f64,
    /// Smallest trapped corner angle, radians
    min_angle: f64,
    /// Largest trapped corner angle, radians
    max_angle: f64,
    /// Shortest arm that can carry a trap
    min_segment_length: f64,
}

impl InkTrap {
    pub fn new(trap_size: f64, min_angle_deg: f64, max_angle_deg: f64, min_segment_length: f64) -> Self {
        Self {
            trap_size,
            min_angle: min_angle_deg.to_radians(),
            max_angle: max_angle_deg.to_radians(),
            min_segment_length,
        }
    }

    /// Angle between two arm vectors; degenerate arms read as flat.
    fn corner_angle(v1: Vec2, v2: Vec2) -> f64 {
        let d1 = v1.hypot();
        let d2 = v2.hypot();
        if d1 < EPSILON || d2 < EPSILON {
            return std::f64::consts::PI;
        }
        let cos = (v1.dot(v2) / (d1 * d2)).clamp(-1.0, 1.0);
        cos.acos()
    }

    /// Concave corners turn against the contour's winding. With both
    /// arm vectors emanating from the corner, their cross product is
    /// positive at concave corners of counter-clockwise contours and
    /// negative at concave corners of clockwise ones.
    fn is_inner_corner(v1: Vec2, v2: Vec2, clockwise: bool) -> bool {
        let cross = v1.cross(v2);
        if clockwise {
            cross < 0.0
        } else {
            cross > 0.0
        }
    }
}

impl Default for InkTrap {
    fn default() -> Self {
        Self::new(8.0, 30.0, 150.0, 50.0)
    }
}

impl GlyphEffect for InkTrap {
    fn name(&self) -> &'static str {
        "ink-trap"
    }

    fn apply(&self, mut glyph: GlyphSnapshot) -> Result<GlyphSnapshot, EffectError> {
        for contour in &mut glyph.contours {
            let old = std::mem::take(&mut contour.points);
            let n = old.len();
            let mut out = Vec::with_capacity(n + 8);
            for i in 0..n {
                let p_p = old[(i + n - 1) % n];
                let p = old[i];
                let p_n = old[(i + 1) % n];

                if p.typ != PointType::Line {
                    out.push(p);
                    continue;
                }
                let v1 = Vec2::new(p_p.x - p.x, p_p.y - p.y);
                let v2 = Vec2::new(p_n.x - p.x, p_n.y - p.y);
                let d1 = v1.hypot();
                let d2 = v2.hypot();
                if d1 < self.min_segment_length || d2 < self.min_segment_length {
                    out.push(p);
                    continue;
                }
                let angle = Self::corner_angle(v1, v2);
                if angle < self.min_angle
                    || angle > self.max_angle
                    || !Self::is_inner_corner(v1, v2, contour.clockwise)
                {
                    out.push(p);
                    continue;
                }

                let u1 = v1 / d1;
                let u2 = v2 / d2;
                let bisector = u1 + u2;
                let bisector_len = bisector.hypot();
                if bisector_len < EPSILON {
                    warn!(
                        glyph = %glyph.name,
                        x = p.x,
                        y = p.y,
                        "degenerate bisector, leaving corner untouched"
                    );
                    out.push(p);
                    continue;
                }
                let notch = bisector / bisector_len * self.trap_size;
                out.push(PointData::line(
                    p.x + u1.x * self.trap_size,
                    p.y + u1.y * self.trap_size,
                ));
                out.push(PointData::line(p.x + notch.x, p.y + notch.y));
                out.push(PointData::line(
                    p.x + u2.x * self.trap_size,
                    p.y + u2.y * self.trap_size,
                ));
            }
            contour.points = out;
        }
        Ok(glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::ContourSnapshot;

    #[test]
    fn test_inner_right_angle_is_trapped() {
        // Counter-clockwise L: the concave corner at (100, 60)
        let points = vec![
            PointData::line(0.0, 0.0),
            PointData::line(700.0, 0.0),
            PointData::line(700.0, 60.0),
            PointData::line(100.0, 60.0),
            PointData::line(100.0, 300.0),
            PointData::line(0.0, 300.0),
        ];
        let glyph = GlyphSnapshot::new("test", vec![ContourSnapshot::new(points)]);
        let out = InkTrap::default().apply(glyph).unwrap();
        let points = &out.contours[0].points;

        // One corner trapped: 6 + 2 points
        assert_eq!(points.len(), 8);
        // Arms point +x and +y from the corner; the notch recesses
        // along the diagonal between them
        assert_eq!((points[3].x, points[3].y), (108.0, 60.0));
        let m = &points[4];
        let d = 8.0 / 2.0_f64.sqrt();
        assert!((m.x - (100.0 + d)).abs() < 1e-9);
        assert!((m.y - (60.0 + d)).abs() < 1e-9);
        assert_eq!((points[5].x, points[5].y), (100.0, 68.0));
    }

    #[test]
    fn test_convex_corners_pass_through() {
        let points = vec![
            PointData::line(0.0, 0.0),
            PointData::line(200.0, 0.0),
            PointData::line(200.0, 200.0),
            PointData::line(0.0, 200.0),
        ];
        let glyph = GlyphSnapshot::new("test", vec![ContourSnapshot::new(points.clone())]);
        let out = InkTrap::default().apply(glyph).unwrap();
        assert_eq!(out.contours[0].points, points);
    }

    #[test]
    fn test_short_arms_pass_through() {
        // Same L-shape scaled down below the minimum segment length
        let points = vec![
            PointData::line(0.0, 0.0),
            PointData::line(70.0, 0.0),
            PointData::line(70.0, 30.0),
            PointData::line(40.0, 30.0),
            PointData::line(40.0, 90.0),
            PointData::line(0.0, 90.0),
        ];
        let glyph = GlyphSnapshot::new("test", vec![ContourSnapshot::new(points.clone())]);
        let out = InkTrap::default().apply(glyph).unwrap();
        assert_eq!(out.contours[0].points, points);
    }
}
