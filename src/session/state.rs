use crate::{
    foundation::core::Progress,
    interp::engine::ParamSet,
    lifecycle::manager::ActiveResources,
    stage::segmenter::StageLocalState,
    transition::scheduler::TransitionPhase,
};

/// Immutable snapshot handed to the renderer once per tick.
///
/// Built only by the orchestrator. Emitted states are shared behind an `Arc` and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderState {
    progress: Progress,
    stage_index: usize,
    local_progress: f64,
    params: ParamSet,
    resources: ActiveResources,
    phase: TransitionPhase,
}

impl RenderState {
    pub(crate) fn new(
        progress: Progress,
        local: StageLocalState,
        params: ParamSet,
        resources: ActiveResources,
        phase: TransitionPhase,
    ) -> Self {
        Self {
            progress,
            stage_index: local.stage_index,
            local_progress: local.local_progress,
            params,
            resources,
            phase,
        }
    }

    /// Global progress, also the progress-bar fill fraction.
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Index of the active stage.
    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    /// Progress within the active stage, in `[0, 1]`.
    pub fn local_progress(&self) -> f64 {
        self.local_progress
    }

    /// Active stage and local progress as one value.
    pub fn local(&self) -> StageLocalState {
        StageLocalState {
            stage_index: self.stage_index,
            local_progress: self.local_progress,
        }
    }

    /// Interpolated parameters of the active stage.
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Resource handles resident for this state.
    pub fn resources(&self) -> &ActiveResources {
        &self.resources
    }

    /// Cross-fade status.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }
}
