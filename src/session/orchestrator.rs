use std::sync::Arc;

use crate::{
    animation::curve::SampleCtx,
    foundation::core::Progress,
    foundation::error::ScrollstageResult,
    interp::engine::InterpolationEngine,
    lifecycle::manager::{ReconcileReport, ResourceFactory, SpecFactory, StageLifecycleManager},
    progress::source::{ProgressInput, ProgressSource},
    session::state::RenderState,
    stage::definition::StageConfig,
    stage::segmenter::StageSegmenter,
    transition::scheduler::{TransitionEvent, TransitionEvents, TransitionScheduler},
};

/// Options controlling [`Orchestrator`] behavior.
#[derive(Clone, Debug)]
pub struct OrchestratorOpts {
    /// Report [`crate::TransitionPhase::CrossFade`] near boundaries. When off, every state is
    /// `Steady`.
    pub crossfade: bool,
    /// Clock value used until the first [`Orchestrator::tick_at`].
    pub initial_time_secs: f64,
}

impl Default for OrchestratorOpts {
    fn default() -> Self {
        Self {
            crossfade: true,
            initial_time_secs: 0.0,
        }
    }
}

/// Public entry point: raw progress in, one [`RenderState`] out.
///
/// Each tick runs segment, interpolate, reconcile and schedule in that order. Given the same
/// config, the same sequence of `(progress, time)` inputs always yields the same sequence of
/// states. Stage boundaries are fixed for the lifetime of the orchestrator.
pub struct Orchestrator<F: ResourceFactory = SpecFactory> {
    config: Arc<StageConfig>,
    source: ProgressSource,
    segmenter: StageSegmenter,
    engine: InterpolationEngine,
    lifecycle: StageLifecycleManager<F>,
    scheduler: TransitionScheduler,
    time_secs: f64,
    last: Option<Arc<RenderState>>,
    events: TransitionEvents,
    report: ReconcileReport,
}

impl Orchestrator<SpecFactory> {
    /// Orchestrator with default options and the [`SpecFactory`].
    pub fn new(config: StageConfig) -> ScrollstageResult<Self> {
        Self::with_factory(config, OrchestratorOpts::default(), SpecFactory)
    }

    /// Orchestrator with explicit options and the [`SpecFactory`].
    pub fn with_opts(config: StageConfig, opts: OrchestratorOpts) -> ScrollstageResult<Self> {
        Self::with_factory(config, opts, SpecFactory)
    }

    /// Parse a JSON stage config and build an orchestrator from it.
    pub fn from_json_str(s: &str) -> ScrollstageResult<Self> {
        Self::new(StageConfig::from_json_str(s)?)
    }
}

impl<F: ResourceFactory> Orchestrator<F> {
    /// Validate `config` and build an orchestrator around a custom resource factory.
    ///
    /// Any configuration error fails construction; there is no partially valid engine.
    #[tracing::instrument(skip(config, factory), fields(stages = config.len()))]
    pub fn with_factory(
        config: StageConfig,
        opts: OrchestratorOpts,
        factory: F,
    ) -> ScrollstageResult<Self> {
        config.validate()?;
        let segmenter = StageSegmenter::new(&config.stages)?;
        let config = Arc::new(config);
        let lifecycle = StageLifecycleManager::new(Arc::clone(&config), factory)?;
        let time_secs = if opts.initial_time_secs.is_finite() {
            opts.initial_time_secs
        } else {
            0.0
        };
        Ok(Self {
            config,
            source: ProgressSource::default(),
            segmenter,
            engine: InterpolationEngine,
            lifecycle,
            scheduler: TransitionScheduler::new(opts.crossfade),
            time_secs,
            last: None,
            events: TransitionEvents::new(),
            report: ReconcileReport::default(),
        })
    }

    /// Advance with a raw progress reading, keeping the clock where it was.
    ///
    /// Never fails: out-of-range input is clamped and non-finite input re-emits the previous
    /// state with no events.
    pub fn tick(&mut self, raw: f64) -> Arc<RenderState> {
        self.tick_at(raw, self.time_secs)
    }

    /// Advance with a physical input (scroll offset, drag, autoplay clock).
    pub fn tick_input(&mut self, input: ProgressInput) -> Arc<RenderState> {
        let raw = self.source.resolve(input);
        self.tick(raw)
    }

    /// Advance with a raw progress reading and a wall-clock time for periodic curves.
    #[tracing::instrument(skip(self))]
    pub fn tick_at(&mut self, raw: f64, time_secs: f64) -> Arc<RenderState> {
        if time_secs.is_finite() {
            self.time_secs = time_secs;
        }
        let progress = self.source.update(raw);
        if !raw.is_finite()
            && let Some(last) = &self.last
        {
            self.events.clear();
            self.report = ReconcileReport::default();
            return Arc::clone(last);
        }

        let local = self.segmenter.segment(progress);
        let stage = &self.config.stages[local.stage_index];
        let params = self.engine.sample(
            &stage.curves,
            SampleCtx {
                local_progress: local.local_progress,
                time_secs: self.time_secs,
            },
        );

        self.report = self.lifecycle.reconcile(&local);
        let resources = self.lifecycle.active().unwrap_or_default();

        let phase = self.scheduler.phase(
            &self.config,
            progress,
            local.stage_index,
            resources.previous.map(|r| r.stage),
        );
        let state = Arc::new(RenderState::new(progress, local, params, resources, phase));

        self.events = self.scheduler.schedule(self.last.as_deref(), &state);
        log_events(&self.events);
        self.last = Some(Arc::clone(&state));
        state
    }

    /// Tear down every resident resource regardless of hysteresis.
    ///
    /// Emits `exit` for the active stage; the next tick starts over with `enter`.
    pub fn dispose_all(&mut self) -> ReconcileReport {
        self.events.clear();
        if let Some(last) = self.last.take() {
            self.events.push(TransitionEvent::Exit(last.stage_index()));
        }
        log_events(&self.events);
        self.report = self.lifecycle.dispose_all();
        self.report.clone()
    }

    /// Boundary events produced by the last tick or [`Orchestrator::dispose_all`].
    pub fn events(&self) -> &[TransitionEvent] {
        &self.events
    }

    /// Mounts and disposals performed by the last tick.
    pub fn last_report(&self) -> &ReconcileReport {
        &self.report
    }

    /// Most recently emitted state.
    pub fn last_state(&self) -> Option<&Arc<RenderState>> {
        self.last.as_ref()
    }

    /// Last valid progress.
    pub fn progress(&self) -> Progress {
        self.source.current()
    }

    /// Clock value fed to periodic curves.
    pub fn time_secs(&self) -> f64 {
        self.time_secs
    }

    /// Resource lifecycle, for resolving handles in a [`RenderState`].
    pub fn lifecycle(&self) -> &StageLifecycleManager<F> {
        &self.lifecycle
    }

    /// Stage layout this orchestrator was built with.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }
}

fn log_events(events: &[TransitionEvent]) {
    for event in events {
        match *event {
            TransitionEvent::Enter(stage) => tracing::debug!(stage, "enter stage"),
            TransitionEvent::Exit(stage) => tracing::debug!(stage, "exit stage"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/orchestrator.rs"]
mod tests;
