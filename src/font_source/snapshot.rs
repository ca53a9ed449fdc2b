//! Operator-local glyph snapshots
//!
//! A snapshot is a fully owned copy of one glyph's contour/point data,
//! decoupled from the shared font so it can be handed to a parallel
//! worker, mutated through the operator chain, and written back
//! wholesale. Winding direction is derived once at extraction and is
//! stable under every operator.

use serde::{Deserialize, Serialize};

use crate::core::errors::EffectError;
use crate::font_source::point::{PointData, PointType};

/// One closed (or open) outline path plus its winding direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourSnapshot {
    /// True when the signed area of the point polygon is negative
    /// (y-up coordinates)
    pub clockwise: bool,
    pub points: Vec<PointData>,
}

impl ContourSnapshot {
    /// Build a snapshot, deriving the winding flag from the points.
    pub fn new(points: Vec<PointData>) -> Self {
        let clockwise = Self::signed_area(&points) < 0.0;
        Self { clockwise, points }
    }

    /// Twice the signed (shoelace) area of the point polygon.
    pub fn signed_area(points: &[PointData]) -> f64 {
        let n = points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let p = &points[i];
            let q = &points[(i + 1) % n];
            area += p.x * q.y - q.x * p.y;
        }
        area
    }

    /// Recompute the winding direction from the current points.
    ///
    /// The stored `clockwise` flag is the extraction-time value that
    /// operators key their direction decisions on; this recomputation
    /// exists so callers can check that a transform preserved winding.
    pub fn is_clockwise(&self) -> bool {
        Self::signed_area(&self.points) < 0.0
    }

    /// Check the on-curve/off-curve grammar before running operators.
    ///
    /// Rejected shapes cannot be classified into segments: a non-empty
    /// contour with no on-curve point at all, a run of more than two
    /// control points terminated by a cubic curve anchor, or a control
    /// point leading into a move. An off-curve point followed by a
    /// line point is legal here; the normalizer retypes it.
    pub fn validate(&self) -> Result<(), EffectError> {
        let n = self.points.len();
        if n == 0 {
            return Ok(());
        }
        let Some(start) = self.points.iter().position(|p| p.is_on_curve()) else {
            return Err(EffectError::MalformedContour(
                "no on-curve point terminates the off-curve run".into(),
            ));
        };
        let mut run = 0usize;
        for step in 1..=n {
            let point = &self.points[(start + step) % n];
            match point.typ {
                PointType::OffCurve => run += 1,
                PointType::Curve => {
                    if run > 2 {
                        return Err(EffectError::MalformedContour(format!(
                            "{run} control points before a cubic curve anchor"
                        )));
                    }
                    run = 0;
                }
                PointType::QCurve | PointType::Line => run = 0,
                PointType::Move => {
                    if run > 0 {
                        return Err(EffectError::MalformedContour(
                            "off-curve run leads into a move".into(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A fully owned copy of one glyph's outline data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphSnapshot {
    pub name: String,
    pub contours: Vec<ContourSnapshot>,
}

impl GlyphSnapshot {
    pub fn new(name: impl Into<String>, contours: Vec<ContourSnapshot>) -> Self {
        Self {
            name: name.into(),
            contours,
        }
    }

    /// Round every coordinate to the nearest integer.
    ///
    /// Runs after the whole operator chain, never between operators.
    pub fn round_coordinates(&mut self) {
        for contour in &mut self.contours {
            for point in &mut contour.points {
                point.x = point.x.round();
                point.y = point.y.round();
            }
        }
    }

    /// Total number of points across all contours.
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }
}
