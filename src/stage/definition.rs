use std::io::Read;

use crate::{
    foundation::error::{ScrollstageError, ScrollstageResult},
    interp::engine::CurveSet,
};

/// Default hysteresis margin, as a fraction of the whole progress range.
pub const DEFAULT_HYSTERESIS: f64 = 0.02;

/// Serializable descriptor of the heavy resource a stage mounts.
///
/// The engine never interprets it; a [`crate::ResourceFactory`] turns it into something real
/// (a mesh, a particle system, a video element).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResourceSpec {
    /// Resource kind, e.g. `"mesh"` or `"particles"`.
    pub kind: String,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ResourceSpec {
    /// Descriptor with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: serde_json::Value::Null,
        }
    }

    /// Descriptor with JSON parameters.
    pub fn with_params(kind: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}

/// One contiguous slice of the progress range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageDefinition {
    /// Position of this stage in the stage list.
    pub index: usize,
    /// Inclusive start of the stage.
    pub start: f64,
    /// Exclusive end of the stage (inclusive for the last stage).
    pub end: f64,
    /// Resource mounted while the stage is reachable.
    #[serde(default)]
    pub resource: ResourceSpec,
    /// Parameter curves sampled by stage-local progress.
    #[serde(default)]
    pub curves: CurveSet,
}

impl StageDefinition {
    /// Stage spanning `[start, end)` with no resource and no curves.
    pub fn new(index: usize, start: f64, end: f64) -> Self {
        Self {
            index,
            start,
            end,
            resource: ResourceSpec::default(),
            curves: CurveSet::new(),
        }
    }

    /// Width of the stage in progress units.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Progress window in which this stage's resource stays mounted.
    pub fn reachable_window(&self, hysteresis: f64) -> (f64, f64) {
        (self.start - hysteresis, self.end + hysteresis)
    }
}

/// Static stage layout for one orchestrator instance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageConfig {
    /// Hysteresis margin around stage boundaries, in `[0, 0.5)`.
    #[serde(default = "default_hysteresis")]
    pub hysteresis: f64,
    /// Contiguous stages covering `[0, 1]`.
    pub stages: Vec<StageDefinition>,
}

fn default_hysteresis() -> f64 {
    DEFAULT_HYSTERESIS
}

impl StageConfig {
    /// Config from stages with the default hysteresis.
    pub fn new(stages: Vec<StageDefinition>) -> Self {
        Self {
            hysteresis: DEFAULT_HYSTERESIS,
            stages,
        }
    }

    /// `n` evenly spaced stages with no resources and no curves.
    pub fn even(n: usize) -> Self {
        let stages = (0..n)
            .map(|i| StageDefinition::new(i, i as f64 / n as f64, (i + 1) as f64 / n as f64))
            .collect();
        Self::new(stages)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> ScrollstageResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config from a reader.
    pub fn from_json_reader(r: impl Read) -> ScrollstageResult<Self> {
        let cfg: Self = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Return `true` when there are no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Validate layout and curve invariants.
    ///
    /// Stages must be non-empty, indexed by position, finite, of positive width, and
    /// contiguous from exactly `0` to exactly `1`.
    pub fn validate(&self) -> ScrollstageResult<()> {
        if !self.hysteresis.is_finite() || !(0.0..0.5).contains(&self.hysteresis) {
            return Err(ScrollstageError::configuration(
                "hysteresis must be finite and in [0, 0.5)",
            ));
        }
        validate_layout(&self.stages)?;

        for stage in &self.stages {
            for (name, curve) in &stage.curves {
                curve.validate().map_err(|e| {
                    let detail = match e {
                        ScrollstageError::Configuration(msg) => msg,
                        other => other.to_string(),
                    };
                    ScrollstageError::configuration(format!(
                        "stage {} curve '{name}': {detail}",
                        stage.index
                    ))
                })?;
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_layout(stages: &[StageDefinition]) -> ScrollstageResult<()> {
    let (Some(first), Some(last)) = (stages.first(), stages.last()) else {
        return Err(ScrollstageError::configuration(
            "stage list must not be empty",
        ));
    };

    for (i, stage) in stages.iter().enumerate() {
        if stage.index != i {
            return Err(ScrollstageError::configuration(format!(
                "stage at position {i} has index {}",
                stage.index
            )));
        }
        if !stage.start.is_finite() || !stage.end.is_finite() {
            return Err(ScrollstageError::configuration(format!(
                "stage {i} boundaries must be finite"
            )));
        }
        if stage.end <= stage.start {
            return Err(ScrollstageError::configuration(format!(
                "stage {i} is zero-width or inverted ([{}, {}])",
                stage.start, stage.end
            )));
        }
    }

    for pair in stages.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.start < prev.end {
            return Err(ScrollstageError::configuration(format!(
                "stage {} overlaps stage {}",
                next.index, prev.index
            )));
        }
        if next.start > prev.end {
            return Err(ScrollstageError::configuration(format!(
                "gap between stage {} and stage {}",
                prev.index, next.index
            )));
        }
    }

    if first.start != 0.0 || last.end != 1.0 {
        return Err(ScrollstageError::configuration(
            "stages must cover exactly [0, 1]",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/stage/definition.rs"]
mod tests;
