// pipeline selection: which passes a diff goes through

use tracing::debug;

use crate::git::DiffStats;

/// shape of the generation pipeline for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineShape {
    /// one primary call, failures propagate as-is
    SinglePass,
    /// primary with backup hand-off, then a refinement pass
    DraftAndRefine,
}

/// select pipeline based on diff size
pub fn select_pipeline(stats: &DiffStats) -> PipelineShape {
    let shape = if stats.is_long() {
        PipelineShape::DraftAndRefine
    } else {
        PipelineShape::SinglePass
    };

    debug!(
        lines = stats.lines,
        chars = stats.chars,
        ?shape,
        "selected generation pipeline"
    );
    shape
}
