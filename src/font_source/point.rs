//! Outline point data structures
//!
//! A fixed-shape record per point with an enum-typed segment type, so
//! the corner and rounding branch logic gets compile-time
//! exhaustiveness checking instead of string comparisons.

use serde::{Deserialize, Serialize};

/// UFO point type enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointType {
    /// First point in an open contour
    #[serde(rename = "move")]
    Move,
    /// Draws a straight line from the previous point
    #[serde(rename = "line")]
    Line,
    /// Bézier control point (no on-curve anchor)
    #[serde(rename = "offcurve")]
    OffCurve,
    /// Draws a cubic Bézier curve
    #[serde(rename = "curve")]
    Curve,
    /// Draws a quadratic curve
    #[serde(rename = "qcurve")]
    QCurve,
}

impl PointType {
    /// Check if this point type is on-curve (not a control point)
    pub fn is_on_curve(&self) -> bool {
        !matches!(self, PointType::OffCurve)
    }

    /// Check if this point type can carry the smooth attribute
    pub fn can_be_smooth(&self) -> bool {
        self.is_on_curve()
    }
}

/// A single outline point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    pub x: f64,
    pub y: f64,
    pub typ: PointType,
    /// Tangent-continuity hint; only meaningful on on-curve points
    pub smooth: bool,
}

impl PointData {
    pub fn new(x: f64, y: f64, typ: PointType) -> Self {
        Self {
            x,
            y,
            typ,
            smooth: false,
        }
    }

    /// Create a line point
    pub fn line(x: f64, y: f64) -> Self {
        Self::new(x, y, PointType::Line)
    }

    /// Create an off-curve control point
    pub fn off_curve(x: f64, y: f64) -> Self {
        Self::new(x, y, PointType::OffCurve)
    }

    /// Create a cubic curve point
    pub fn curve(x: f64, y: f64) -> Self {
        Self::new(x, y, PointType::Curve)
    }

    /// Set the smooth flag (kept false on off-curve points)
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        if self.typ.can_be_smooth() {
            self.smooth = smooth;
        }
        self
    }

    pub fn is_on_curve(&self) -> bool {
        self.typ.is_on_curve()
    }
}
