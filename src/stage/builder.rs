use crate::{
    foundation::error::{ScrollstageError, ScrollstageResult},
    interp::engine::{CurveSet, ParamCurve},
    stage::definition::{DEFAULT_HYSTERESIS, ResourceSpec, StageConfig, StageDefinition},
};

/// Fluent builder for [`StageConfig`].
///
/// Stages are appended left to right; each call names only its end boundary, so the
/// result is contiguous by construction. The final stage must end at `1.0`.
pub struct StageConfigBuilder {
    hysteresis: f64,
    cursor: f64,
    stages: Vec<StageDefinition>,
    error: Option<ScrollstageError>,
}

impl StageConfigBuilder {
    /// Empty builder starting at progress `0`.
    pub fn new() -> Self {
        Self {
            hysteresis: DEFAULT_HYSTERESIS,
            cursor: 0.0,
            stages: Vec::new(),
            error: None,
        }
    }

    /// Override the hysteresis margin.
    pub fn hysteresis(mut self, hysteresis: f64) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    /// Append a stage ending at `end`, configured by `f`.
    pub fn stage(mut self, end: f64, f: impl FnOnce(StageBuilder) -> StageBuilder) -> Self {
        let built = f(StageBuilder::default());
        if self.error.is_none()
            && let Some(name) = &built.duplicate
        {
            self.error = Some(ScrollstageError::configuration(format!(
                "stage {} defines curve '{name}' twice",
                self.stages.len()
            )));
        }
        self.stages.push(StageDefinition {
            index: self.stages.len(),
            start: self.cursor,
            end,
            resource: built.resource,
            curves: built.curves,
        });
        self.cursor = end;
        self
    }

    /// Validate and produce the config.
    pub fn build(self) -> ScrollstageResult<StageConfig> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let cfg = StageConfig {
            hysteresis: self.hysteresis,
            stages: self.stages,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl Default for StageConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StageConfig {
    /// Start a [`StageConfigBuilder`].
    pub fn builder() -> StageConfigBuilder {
        StageConfigBuilder::new()
    }
}

/// Per-stage part of [`StageConfigBuilder`].
#[derive(Default)]
pub struct StageBuilder {
    resource: ResourceSpec,
    curves: CurveSet,
    duplicate: Option<String>,
}

impl StageBuilder {
    /// Resource mounted for this stage.
    pub fn resource(mut self, resource: ResourceSpec) -> Self {
        self.resource = resource;
        self
    }

    /// Add a named parameter curve. Repeating a name fails the final `build`.
    pub fn curve(mut self, name: impl Into<String>, curve: ParamCurve) -> Self {
        let name = name.into();
        if self.curves.contains_key(&name) {
            self.duplicate.get_or_insert(name);
        } else {
            self.curves.insert(name, curve);
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/builder.rs"]
mod tests;
