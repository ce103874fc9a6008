use smallvec::SmallVec;

use crate::{
    foundation::core::Progress, foundation::math::inverse_lerp_clamped,
    session::state::RenderState, stage::definition::StageConfig,
};

/// Stage boundary signal for the DOM layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", content = "stage", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// Progress entered the stage.
    Enter(usize),
    /// Progress left the stage.
    Exit(usize),
}

impl TransitionEvent {
    /// Stage the event refers to.
    pub fn stage(self) -> usize {
        match self {
            Self::Enter(i) | Self::Exit(i) => i,
        }
    }
}

/// Events derived from one tick. Never more than one exit and one enter.
pub type TransitionEvents = SmallVec<[TransitionEvent; 2]>;

/// Visual blend reported with every [`RenderState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionPhase {
    /// Only the current stage is visible.
    #[default]
    Steady,
    /// Two adjacent stages are blended near their shared boundary.
    CrossFade {
        /// Resident neighbour fading out.
        from: usize,
        /// Current stage fading in.
        to: usize,
        /// Weight of `to`, in `[0, 1]`.
        mix: f64,
    },
}

/// Pure event deriver. Holds no timers and no history.
#[derive(Clone, Copy, Debug)]
pub struct TransitionScheduler {
    crossfade: bool,
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self { crossfade: true }
    }
}

impl TransitionScheduler {
    /// Scheduler with cross-fade phases on or off.
    pub fn new(crossfade: bool) -> Self {
        Self { crossfade }
    }

    /// Compare consecutive states and emit boundary events.
    ///
    /// Nothing is emitted while the stage index is unchanged. A jump over several stages
    /// emits only `exit(old)` then `enter(new)`.
    pub fn schedule(&self, previous: Option<&RenderState>, next: &RenderState) -> TransitionEvents {
        let mut events = TransitionEvents::new();
        match previous.map(RenderState::stage_index) {
            Some(prev) if prev == next.stage_index() => {}
            Some(prev) => {
                events.push(TransitionEvent::Exit(prev));
                events.push(TransitionEvent::Enter(next.stage_index()));
            }
            None => events.push(TransitionEvent::Enter(next.stage_index())),
        }
        events
    }

    /// Blend between the current stage and the other resident stage.
    ///
    /// Cross-fades only happen between adjacent stages while progress is within the
    /// hysteresis margin of their shared boundary. `mix` rises from `0` to `1` across
    /// `[boundary - h, boundary + h]` in the direction of `current`.
    pub fn phase(
        &self,
        config: &StageConfig,
        progress: Progress,
        current: usize,
        resident: Option<usize>,
    ) -> TransitionPhase {
        let h = config.hysteresis;
        let Some(other) = resident else {
            return TransitionPhase::Steady;
        };
        if !self.crossfade || h <= 0.0 || current.abs_diff(other) != 1 {
            return TransitionPhase::Steady;
        }
        let boundary = match config.stages.get(current.max(other)) {
            Some(stage) => stage.start,
            None => return TransitionPhase::Steady,
        };
        let p = progress.get();
        if (p - boundary).abs() > h {
            return TransitionPhase::Steady;
        }
        let mix = if current > other {
            inverse_lerp_clamped(boundary - h, boundary + h, p)
        } else {
            inverse_lerp_clamped(boundary + h, boundary - h, p)
        };
        TransitionPhase::CrossFade {
            from: other,
            to: current,
            mix,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/scheduler.rs"]
mod tests;
