//! Pipeline orchestration: target selection, fan-out over workers, and
//! deterministic write-back.

pub mod processor;
pub mod selector;

pub use processor::{FailurePolicy, FontProcessor, ProcessOptions, ProcessReport};
pub use selector::is_target;
