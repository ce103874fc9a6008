use crate::{
    foundation::core::Progress,
    foundation::error::ScrollstageResult,
    stage::definition::{StageDefinition, validate_layout},
};

/// Active stage and the progress within it. Derived every tick, never stored across configs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StageLocalState {
    /// Index of the stage containing the progress.
    pub stage_index: usize,
    /// Progress inside that stage, in `[0, 1]`.
    pub local_progress: f64,
}

/// Maps global progress onto `(stage, local progress)`.
///
/// Holds only the stage boundaries, validated once at construction.
#[derive(Clone, Debug)]
pub struct StageSegmenter {
    bounds: Vec<(f64, f64)>,
}

impl StageSegmenter {
    /// Validate the stage layout and capture its boundaries.
    pub fn new(stages: &[StageDefinition]) -> ScrollstageResult<Self> {
        validate_layout(stages)?;
        Ok(Self {
            bounds: stages.iter().map(|s| (s.start, s.end)).collect(),
        })
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Always `false`: construction rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// `[start, end]` of stage `index`.
    pub fn bounds(&self, index: usize) -> Option<(f64, f64)> {
        self.bounds.get(index).copied()
    }

    /// Find the stage whose `[start, end)` contains `progress`.
    ///
    /// The last stage is closed on the right so `progress == 1` lands in it.
    pub fn segment(&self, progress: Progress) -> StageLocalState {
        let p = progress.get();
        let last = self.bounds.len().saturating_sub(1);
        let stage_index = self.bounds.partition_point(|&(_, end)| end <= p).min(last);
        let (start, end) = self.bounds.get(stage_index).copied().unwrap_or((0.0, 1.0));
        let local_progress = ((p - start) / (end - start)).clamp(0.0, 1.0);
        StageLocalState {
            stage_index,
            local_progress,
        }
    }

    /// Global progress of a stage-local state, the inverse of [`StageSegmenter::segment`].
    pub fn global_progress(&self, local: &StageLocalState) -> Progress {
        let (start, end) = self
            .bounds
            .get(local.stage_index)
            .copied()
            .unwrap_or((0.0, 1.0));
        Progress::new_or(start + local.local_progress * (end - start), Progress::ZERO)
    }
}

/// One-shot segmentation that validates `stages` first.
pub fn segment(progress: Progress, stages: &[StageDefinition]) -> ScrollstageResult<StageLocalState> {
    Ok(StageSegmenter::new(stages)?.segment(progress))
}

#[cfg(test)]
#[path = "../../tests/unit/stage/segmenter.rs"]
mod tests;
