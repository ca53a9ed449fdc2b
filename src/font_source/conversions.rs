//! UFO format conversion utilities
//!
//! Conversion logic between the operator-local snapshot structures and
//! the norad UFO types. This is pure data transformation between
//! equivalent representations; nothing else in the crate touches norad
//! point types directly.

use crate::font_source::point::{PointData, PointType};
use crate::font_source::snapshot::{ContourSnapshot, GlyphSnapshot};

impl PointType {
    pub fn from_norad_point_type(norad_type: &norad::PointType) -> Self {
        match norad_type {
            norad::PointType::Move => PointType::Move,
            norad::PointType::Line => PointType::Line,
            norad::PointType::OffCurve => PointType::OffCurve,
            norad::PointType::Curve => PointType::Curve,
            norad::PointType::QCurve => PointType::QCurve,
        }
    }

    pub fn to_norad_point_type(&self) -> norad::PointType {
        match self {
            PointType::Move => norad::PointType::Move,
            PointType::Line => norad::PointType::Line,
            PointType::OffCurve => norad::PointType::OffCurve,
            PointType::Curve => norad::PointType::Curve,
            PointType::QCurve => norad::PointType::QCurve,
        }
    }
}

impl PointData {
    pub fn from_norad_point(norad_point: &norad::ContourPoint) -> Self {
        Self {
            x: norad_point.x,
            y: norad_point.y,
            typ: PointType::from_norad_point_type(&norad_point.typ),
            smooth: norad_point.smooth,
        }
    }

    pub fn to_norad_point(&self) -> norad::ContourPoint {
        norad::ContourPoint::new(
            self.x,
            self.y,
            self.typ.to_norad_point_type(),
            self.smooth,
            None, // name
            None, // identifier
        )
    }
}

impl ContourSnapshot {
    pub fn from_norad_contour(norad_contour: &norad::Contour) -> Self {
        let points = norad_contour
            .points
            .iter()
            .map(PointData::from_norad_point)
            .collect();
        Self::new(points)
    }

    pub fn to_norad_contour(&self) -> norad::Contour {
        let points = self.points.iter().map(PointData::to_norad_point).collect();
        norad::Contour::new(points, None)
    }
}

impl GlyphSnapshot {
    /// Extract an independent snapshot of a glyph's outline.
    pub fn from_norad_glyph(name: &str, norad_glyph: &norad::Glyph) -> Self {
        let contours = norad_glyph
            .contours
            .iter()
            .map(ContourSnapshot::from_norad_contour)
            .collect();
        Self::new(name, contours)
    }

    /// Replace the glyph's contour list wholesale.
    ///
    /// Components, anchors, and advance widths are left untouched; the
    /// pipeline only ever rewrites outline geometry.
    pub fn write_back(&self, norad_glyph: &mut norad::Glyph) {
        norad_glyph.contours = self
            .contours
            .iter()
            .map(ContourSnapshot::to_norad_contour)
            .collect();
    }
}
