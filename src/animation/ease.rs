/// Easing functions used to reshape stage-local progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-out, the usual "power3.out" entrance curve for overlay text.
    OutQuart,
    /// Sinusoidal ease-in/out.
    InOutSine,
}

impl Ease {
    /// Every easing variant, in declaration order.
    pub const ALL: [Ease; 9] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::OutQuart,
        Ease::InOutSine,
    ];

    /// Apply this easing function to `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t.powi(2),
            Self::OutQuad => out(t, 2),
            Self::InOutQuad => in_out(t, 2),
            Self::InCubic => t.powi(3),
            Self::OutCubic => out(t, 3),
            Self::InOutCubic => in_out(t, 3),
            Self::OutQuart => out(t, 4),
            Self::InOutSine => 0.5 - 0.5 * (std::f64::consts::PI * t).cos(),
        }
    }
}

fn out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

// Mirrored power curve: accelerate to the midpoint, decelerate after it.
fn in_out(t: f64, power: i32) -> f64 {
    let k = f64::from(1 << (power - 1));
    if t < 0.5 {
        k * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
