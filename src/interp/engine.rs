use std::collections::BTreeMap;

use crate::{
    animation::color::{ColorDef, ColorRamp},
    animation::curve::{Curve, SampleCtx},
    foundation::core::{Vec2, Vec3},
    foundation::error::{ScrollstageError, ScrollstageResult},
    stage::definition::StageDefinition,
    stage::segmenter::StageLocalState,
};

/// Named parameter curves of one stage, ordered by name for deterministic output.
pub type CurveSet = BTreeMap<String, ParamCurve>;

/// How one named parameter is animated across a stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamCurve {
    /// Single scalar (distortion amount, opacity, scale).
    Scalar {
        /// Curve for the value.
        curve: Curve,
    },
    /// 2D offset (overlay text slide).
    Vec2 {
        /// Curve for `x`.
        x: Curve,
        /// Curve for `y`.
        y: Curve,
    },
    /// 3D vector (camera position or rotation).
    Vec3 {
        /// Curve for `x`.
        x: Curve,
        /// Curve for `y`.
        y: Curve,
        /// Curve for `z`.
        z: Curve,
    },
    /// Colour blended through a multi-stop ramp.
    Color {
        /// Gradient sampled by local progress.
        ramp: ColorRamp,
    },
}

impl ParamCurve {
    /// Scalar parameter from a curve.
    pub fn scalar(curve: Curve) -> Self {
        Self::Scalar { curve }
    }

    /// Vector parameter linearly moving from `from` to `to`.
    pub fn vec3_linear(from: Vec3, to: Vec3) -> Self {
        Self::Vec3 {
            x: Curve::linear(from.x, to.x),
            y: Curve::linear(from.y, to.y),
            z: Curve::linear(from.z, to.z),
        }
    }

    /// Colour parameter from a ramp.
    pub fn color(ramp: ColorRamp) -> Self {
        Self::Color { ramp }
    }

    /// Validate every nested curve.
    pub fn validate(&self) -> ScrollstageResult<()> {
        match self {
            Self::Scalar { curve } => curve.validate(),
            Self::Vec2 { x, y } => {
                x.validate()?;
                y.validate()
            }
            Self::Vec3 { x, y, z } => {
                x.validate()?;
                y.validate()?;
                z.validate()
            }
            Self::Color { ramp } => ramp.validate(),
        }
    }

    fn sample(&self, ctx: SampleCtx) -> ParamValue {
        match self {
            Self::Scalar { curve } => ParamValue::Scalar(curve.sample(ctx)),
            Self::Vec2 { x, y } => ParamValue::Vec2(Vec2::new(x.sample(ctx), y.sample(ctx))),
            Self::Vec3 { x, y, z } => {
                ParamValue::Vec3(Vec3::new(x.sample(ctx), y.sample(ctx), z.sample(ctx)))
            }
            Self::Color { ramp } => ParamValue::Color(ramp.sample(ctx.local_progress)),
        }
    }
}

/// One interpolated parameter value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    /// Scalar value.
    Scalar(f64),
    /// 2D vector.
    Vec2(Vec2),
    /// 3D vector.
    Vec3(Vec3),
    /// Colour.
    Color(ColorDef),
}

/// Interpolated parameters of one tick, keyed by parameter name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ParamSet(BTreeMap<String, ParamValue>);

impl ParamSet {
    /// Conventional name of the camera position parameter.
    pub const CAMERA_POSE: &'static str = "camera_pose";
    /// Conventional name of the blended colour parameter.
    pub const COLOR_BLEND: &'static str = "color_blend";
    /// Conventional name of the distortion parameter.
    pub const DISTORTION: &'static str = "distortion";

    /// Look up a parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Scalar parameter, if present with that type.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        match self.0.get(name)? {
            ParamValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// 2D parameter, if present with that type.
    pub fn vec2(&self, name: &str) -> Option<Vec2> {
        match self.0.get(name)? {
            ParamValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// 3D parameter, if present with that type.
    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.0.get(name)? {
            ParamValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// Colour parameter, if present with that type.
    pub fn color(&self, name: &str) -> Option<ColorDef> {
        match self.0.get(name)? {
            ParamValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    /// Camera position under [`ParamSet::CAMERA_POSE`].
    pub fn camera_pose(&self) -> Option<Vec3> {
        self.vec3(Self::CAMERA_POSE)
    }

    /// Blended colour under [`ParamSet::COLOR_BLEND`].
    pub fn color_blend(&self) -> Option<ColorDef> {
        self.color(Self::COLOR_BLEND)
    }

    /// Distortion amount under [`ParamSet::DISTORTION`].
    pub fn distortion(&self) -> Option<f64> {
        self.scalar(Self::DISTORTION)
    }

    /// Iterate parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when no parameters were produced.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stateless evaluator from stage-local progress to parameter values.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterpolationEngine;

impl InterpolationEngine {
    /// Evaluate every curve of `stage` at the local progress in `local`.
    ///
    /// `time_secs` feeds periodic curves only.
    pub fn interpolate(
        &self,
        local: &StageLocalState,
        stage: &StageDefinition,
        time_secs: f64,
    ) -> ScrollstageResult<ParamSet> {
        if local.stage_index != stage.index {
            return Err(ScrollstageError::configuration(format!(
                "stage-local state targets stage {} but stage {} was supplied",
                local.stage_index, stage.index
            )));
        }
        Ok(self.sample(
            &stage.curves,
            SampleCtx {
                local_progress: local.local_progress,
                time_secs,
            },
        ))
    }

    /// Evaluate a curve set directly, without the stage consistency check.
    pub fn sample(&self, curves: &CurveSet, ctx: SampleCtx) -> ParamSet {
        ParamSet(
            curves
                .iter()
                .map(|(name, curve)| (name.clone(), curve.sample(ctx)))
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interp/engine.rs"]
mod tests;
