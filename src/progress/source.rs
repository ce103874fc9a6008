use crate::foundation::core::Progress;

/// Physical input readings that can drive progress.
///
/// Each variant is turned into a raw fraction; degenerate readings (zero-height page,
/// zero-length autoplay) produce NaN, which [`ProgressSource::update`] ignores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressInput {
    /// Already-normalized fraction.
    Raw(f64),
    /// Scroll offset within the scrollable extent.
    Scroll {
        /// Current scroll offset in pixels.
        offset: f64,
        /// Maximum scroll offset in pixels.
        max_offset: f64,
    },
    /// Relative drag movement, applied on top of the current progress.
    Drag {
        /// Pointer movement in pixels since the last reading.
        delta: f64,
        /// Pixels of drag that correspond to the whole progress range.
        extent: f64,
    },
    /// Time-based autoplay.
    Autoplay {
        /// Seconds since autoplay started.
        elapsed_secs: f64,
        /// Seconds for one pass over the whole range.
        duration_secs: f64,
        /// Wrap back to the start instead of holding at the end.
        looping: bool,
    },
}

/// Clamps raw input into [`Progress`], holding the last valid value through bad readings.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressSource {
    current: Progress,
}

impl ProgressSource {
    /// Source starting at `initial`.
    pub fn new(initial: Progress) -> Self {
        Self { current: initial }
    }

    /// Last valid progress.
    pub fn current(&self) -> Progress {
        self.current
    }

    /// Clamp `raw` into `[0, 1]`; non-finite input keeps the previous value.
    pub fn update(&mut self, raw: f64) -> Progress {
        match Progress::new(raw) {
            Some(p) => self.current = p,
            None => tracing::trace!(raw, "ignoring non-finite progress"),
        }
        self.current
    }

    /// Like [`ProgressSource::update`], but returns `Some` only when the value changed.
    pub fn update_changed(&mut self, raw: f64) -> Option<Progress> {
        let before = self.current;
        let after = self.update(raw);
        (after != before).then_some(after)
    }

    /// Convert a physical reading into a raw fraction relative to the current progress.
    pub fn resolve(&self, input: ProgressInput) -> f64 {
        match input {
            ProgressInput::Raw(v) => v,
            ProgressInput::Scroll { offset, max_offset } => {
                if max_offset > 0.0 {
                    offset / max_offset
                } else {
                    f64::NAN
                }
            }
            ProgressInput::Drag { delta, extent } => {
                if extent > 0.0 {
                    self.current.get() + delta / extent
                } else {
                    f64::NAN
                }
            }
            ProgressInput::Autoplay {
                elapsed_secs,
                duration_secs,
                looping,
            } => {
                if duration_secs <= 0.0 || !duration_secs.is_finite() {
                    return f64::NAN;
                }
                let t = elapsed_secs / duration_secs;
                if looping { t.rem_euclid(1.0) } else { t }
            }
        }
    }

    /// Resolve and apply a physical reading.
    pub fn apply(&mut self, input: ProgressInput) -> Progress {
        let raw = self.resolve(input);
        self.update(raw)
    }
}

/// Progress at which section `index` of `count` evenly spaced sections begins.
///
/// Used for "jump to section" navigation. The last section maps to `1`.
pub fn section_progress(index: usize, count: usize) -> Progress {
    if count <= 1 {
        return Progress::ZERO;
    }
    Progress::new_or(index as f64 / (count - 1) as f64, Progress::ONE)
}

#[cfg(test)]
#[path = "../../tests/unit/progress/source.rs"]
mod tests;
