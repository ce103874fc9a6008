use crate::{
    animation::ease::Ease,
    foundation::error::{ScrollstageError, ScrollstageResult},
    foundation::math::lerp,
};

/// Sampling context handed to curves.
///
/// Scroll-driven and time-driven motion are kept apart: `local_progress` comes from the
/// segmenter, `time_secs` from the host clock. Freezing one leaves the other untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleCtx {
    /// Stage-local progress in `[0, 1]`.
    pub local_progress: f64,
    /// Monotonic wall-clock time in seconds. Only periodic curves read it.
    pub time_secs: f64,
}

impl SampleCtx {
    /// Context with a frozen clock.
    pub fn at(local_progress: f64) -> Self {
        Self {
            local_progress,
            time_secs: 0.0,
        }
    }
}

/// A pure function from stage-local progress to one scalar parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    /// Same value everywhere.
    Constant {
        /// Constant output.
        value: f64,
    },
    /// Straight line from `from` at `0` to `to` at `1`.
    Linear {
        /// Value at local progress `0`.
        from: f64,
        /// Value at local progress `1`.
        to: f64,
    },
    /// `from -> to` reshaped by an easing function.
    Eased {
        /// Value at local progress `0`.
        from: f64,
        /// Value at local progress `1`.
        to: f64,
        /// Easing applied to local progress.
        ease: Ease,
    },
    /// Piecewise curve through explicit stops.
    Keyframes {
        /// Stops sorted by `at`, each `at` in `[0, 1]`.
        keys: Vec<CurveKey>,
    },
    /// Scroll-driven `base` plus a sine "breathing" term driven by wall-clock time.
    Periodic {
        /// Scroll-driven component.
        base: Box<Curve>,
        /// Sine amplitude.
        amplitude: f64,
        /// Sine period in seconds (`> 0`).
        period_secs: f64,
        /// Phase offset in radians.
        #[serde(default)]
        phase: f64,
    },
}

/// One stop of a [`Curve::Keyframes`] curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveKey {
    /// Local progress of this stop.
    pub at: f64,
    /// Value at this stop.
    pub value: f64,
    /// Easing applied toward the next stop.
    #[serde(default)]
    pub ease: Ease,
}

impl Curve {
    /// Constant curve.
    pub fn constant(value: f64) -> Self {
        Self::Constant { value }
    }

    /// Linear curve from `from` to `to`.
    pub fn linear(from: f64, to: f64) -> Self {
        Self::Linear { from, to }
    }

    /// Eased curve from `from` to `to`.
    pub fn eased(from: f64, to: f64, ease: Ease) -> Self {
        Self::Eased { from, to, ease }
    }

    /// Cubic ease-in/out from `from` to `to`.
    pub fn ease_in_out(from: f64, to: f64) -> Self {
        Self::eased(from, to, Ease::InOutCubic)
    }

    /// Layer a time-driven sine on top of `base`.
    pub fn periodic(base: Curve, amplitude: f64, period_secs: f64) -> Self {
        Self::Periodic {
            base: Box::new(base),
            amplitude,
            period_secs,
            phase: 0.0,
        }
    }

    /// Return `true` when the output depends on wall-clock time.
    pub fn is_time_driven(&self) -> bool {
        matches!(self, Self::Periodic { .. })
    }

    /// Check that the curve is finite and continuous over `[0, 1]`.
    pub fn validate(&self) -> ScrollstageResult<()> {
        fn finite(v: f64, what: &str) -> ScrollstageResult<()> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ScrollstageError::configuration(format!(
                    "curve {what} must be finite"
                )))
            }
        }

        match self {
            Self::Constant { value } => finite(*value, "value"),
            Self::Linear { from, to } | Self::Eased { from, to, .. } => {
                finite(*from, "from")?;
                finite(*to, "to")
            }
            Self::Keyframes { keys } => {
                if keys.is_empty() {
                    return Err(ScrollstageError::configuration(
                        "keyframes curve must have at least one key",
                    ));
                }
                for k in keys {
                    finite(k.value, "key value")?;
                    if !(0.0..=1.0).contains(&k.at) {
                        return Err(ScrollstageError::configuration(
                            "keyframes curve key positions must be in [0, 1]",
                        ));
                    }
                }
                for w in keys.windows(2) {
                    if w[1].at < w[0].at {
                        return Err(ScrollstageError::configuration(
                            "keyframes curve keys must be sorted by position",
                        ));
                    }
                    if w[1].at == w[0].at && w[1].value != w[0].value {
                        return Err(ScrollstageError::configuration(format!(
                            "keyframes curve jumps at {} (keys at the same position must share a value)",
                            w[0].at
                        )));
                    }
                }
                Ok(())
            }
            Self::Periodic {
                base,
                amplitude,
                period_secs,
                phase,
            } => {
                finite(*amplitude, "amplitude")?;
                finite(*phase, "phase")?;
                if !period_secs.is_finite() || *period_secs <= 0.0 {
                    return Err(ScrollstageError::configuration(
                        "periodic curve period_secs must be > 0",
                    ));
                }
                base.validate()
            }
        }
    }

    /// Evaluate the curve. Only call on validated curves.
    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        let t = ctx.local_progress.clamp(0.0, 1.0);
        match self {
            Self::Constant { value } => *value,
            Self::Linear { from, to } => lerp(*from, *to, t),
            Self::Eased { from, to, ease } => lerp(*from, *to, ease.apply(t)),
            Self::Keyframes { keys } => sample_keys(keys, t),
            Self::Periodic {
                base,
                amplitude,
                period_secs,
                phase,
            } => {
                let angle = std::f64::consts::TAU * ctx.time_secs / period_secs + phase;
                base.sample(ctx) + amplitude * angle.sin()
            }
        }
    }
}

fn sample_keys(keys: &[CurveKey], t: f64) -> f64 {
    let idx = keys.partition_point(|k| k.at <= t);
    if idx == 0 {
        return keys.first().map_or(0.0, |k| k.value);
    }
    if idx >= keys.len() {
        return keys[keys.len() - 1].value;
    }

    let a = &keys[idx - 1];
    let b = &keys[idx];
    let span = b.at - a.at;
    if span <= 0.0 {
        return b.value;
    }
    lerp(a.value, b.value, a.ease.apply((t - a.at) / span))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
