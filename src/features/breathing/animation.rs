//! Animation timing and indicator sizing.

use serde::{Deserialize, Serialize};

/// Default animation resolution.
pub const DEFAULT_STEPS_PER_SECOND: u32 = 10;

/// Finest animation resolution a driver will run at.
pub const MAX_STEPS_PER_SECOND: u32 = 1000;

/// How far through a phase the animation is, as `elapsed_steps / total_steps`.
///
/// `whole_seconds` have passed in a phase of `phase_seconds`, plus
/// `sub_second` (in `[0, 1)`) since the last second tick. Positions are
/// quantised to `steps_per_second` steps. A zero-length phase is reported as
/// already finished.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn phase_fraction(
    phase_seconds: u32,
    whole_seconds: u32,
    sub_second: f64,
    steps_per_second: u32,
) -> f64 {
    let steps_per_second = steps_per_second.max(1);
    let total_steps = u64::from(phase_seconds) * u64::from(steps_per_second);
    if total_steps == 0 {
        return 1.0;
    }

    let sub_second = if sub_second.is_nan() {
        0.0
    } else {
        sub_second.clamp(0.0, 1.0)
    };
    let sub_steps = (sub_second * f64::from(steps_per_second)).floor() as u64;
    let elapsed_steps = u64::from(whole_seconds) * u64::from(steps_per_second) + sub_steps;

    (elapsed_steps as f64 / total_steps as f64).min(1.0)
}

/// Pixel-like bounds the indicator is drawn between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScale {
    /// Size at rest and at the end of an exhale.
    pub min: f64,
    /// Size at the end of an inhale.
    pub max: f64,
}

impl Default for IndicatorScale {
    fn default() -> Self {
        Self {
            min: 100.0,
            max: 200.0,
        }
    }
}

impl IndicatorScale {
    /// Create a scale, swapping the bounds if given in the wrong order.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Size for a progress fraction.
    #[must_use]
    pub fn size_for(&self, progress: f64) -> f64 {
        self.min + progress.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Size as a share of `max`, for drawing relative to available space.
    #[must_use]
    pub fn relative(&self, progress: f64) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.size_for(progress) / self.max
    }
}
