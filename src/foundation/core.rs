use crate::foundation::error::{ScrollstageError, ScrollstageResult};

pub use kurbo::Vec2;

/// Normalized progress through the whole experience, always in `[0, 1]`.
///
/// The only way to build one is through clamping constructors, so a `Progress` in hand is
/// always finite and in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Start of the experience.
    pub const ZERO: Self = Self(0.0);
    /// End of the experience.
    pub const ONE: Self = Self(1.0);

    /// Clamp `raw` into `[0, 1]`. Returns `None` for NaN and infinities.
    pub fn new(raw: f64) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        Some(Self(raw.clamp(0.0, 1.0)))
    }

    /// Clamp `raw` into `[0, 1]`, mapping non-finite input to `fallback`.
    pub fn new_or(raw: f64, fallback: Self) -> Self {
        Self::new(raw).unwrap_or(fallback)
    }

    /// Underlying scalar.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

impl TryFrom<f64> for Progress {
    type Error = ScrollstageError;

    fn try_from(raw: f64) -> ScrollstageResult<Self> {
        Self::new(raw).ok_or_else(|| ScrollstageError::configuration("progress must be finite"))
    }
}

/// Three-component vector used for camera positions and rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// All-zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise linear interpolation.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Return `true` when every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
