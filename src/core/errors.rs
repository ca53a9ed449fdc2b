//! Pipeline error taxonomy
//!
//! Structural violations fail a glyph loudly with enough context to
//! decide whether to abort the batch; geometry edge cases are recovered
//! inside the operators and logged, never surfaced here.

use thiserror::Error;

/// Failure while transforming a single glyph's outline data.
#[derive(Debug, Error)]
pub enum EffectError {
    /// The contour's on-curve/off-curve sequence cannot be classified
    /// into segments. A corrupted outline must not reach the compiled
    /// output, so this aborts the glyph instead of guessing.
    #[error("malformed contour: {0}")]
    MalformedContour(String),
}

/// Failure of one unit of pipeline work, keyed by glyph name.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// A worker's transformation of one glyph failed. The glyph is
    /// never partially written back.
    #[error("glyph '{glyph}': {source}")]
    Worker {
        glyph: String,
        #[source]
        source: EffectError,
    },
}

impl ProcessError {
    /// The glyph the failing unit was processing.
    pub fn glyph(&self) -> &str {
        match self {
            ProcessError::Worker { glyph, .. } => glyph,
        }
    }
}
