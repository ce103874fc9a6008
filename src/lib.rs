//! Scrollstage turns a scroll (or drag, or autoplay) progress signal into render state.
//!
//! A page is split into contiguous stages covering `[0, 1]`. Every tick the engine:
//!
//! - Segments global progress into `(stage, local progress)`
//! - Samples the active stage's parameter curves
//! - Mounts and disposes heavy per-stage resources, at most two at a time
//! - Derives `enter`/`exit` boundary events for the DOM layer
//!
//! The entry point is [`Orchestrator`]; each [`Orchestrator::tick`] returns one immutable
//! [`RenderState`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod graph;
pub(crate) mod interp;
pub(crate) mod lifecycle;
pub(crate) mod progress;
pub(crate) mod session;
pub(crate) mod stage;
pub(crate) mod transition;

pub use crate::foundation::core::{Progress, Vec2, Vec3};
pub use crate::foundation::error::{ScrollstageError, ScrollstageResult};

pub use crate::animation::color::{ColorDef, ColorRamp, ColorStop};
pub use crate::animation::curve::{Curve, CurveKey, SampleCtx};
pub use crate::animation::ease::Ease;
pub use crate::graph::activation::{
    DEFAULT_EDGE_DELAY_SECS, GraphActivationScheduler, GraphDef, NodeDef,
};
pub use crate::interp::engine::{CurveSet, InterpolationEngine, ParamCurve, ParamSet, ParamValue};
pub use crate::lifecycle::manager::{
    ActiveResources, ReconcileReport, ResourceFactory, ResourceHandle, ResourceRef, SpecFactory,
    StageLifecycleManager, StagePhase,
};
pub use crate::progress::source::{ProgressInput, ProgressSource, section_progress};
pub use crate::session::fingerprint::{RenderFingerprint, fingerprint_state, fingerprint_states};
pub use crate::session::orchestrator::{Orchestrator, OrchestratorOpts};
pub use crate::session::state::RenderState;
pub use crate::stage::builder::{StageBuilder, StageConfigBuilder};
pub use crate::stage::definition::{DEFAULT_HYSTERESIS, ResourceSpec, StageConfig, StageDefinition};
pub use crate::stage::segmenter::{StageLocalState, StageSegmenter, segment};
pub use crate::transition::scheduler::{
    TransitionEvent, TransitionEvents, TransitionPhase, TransitionScheduler,
};
