//! Font source data structures and UFO conversion
//!
//! This module contains everything related to the font file being
//! processed: the decoupled point/contour model the geometry operators
//! work on, conversion to and from the norad UFO types, and the
//! naming-table metadata written before saving.

pub mod conversions;
pub mod metadata;
pub mod point;
pub mod snapshot;

// Explicit re-exports for public API
pub use metadata::{apply_naming, FontNaming};
pub use point::{PointData, PointType};
pub use snapshot::{ContourSnapshot, GlyphSnapshot};
