//! Phase labels.

use serde::{Deserialize, Serialize};

/// Label shown for a phase of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseLabel {
    /// Breathe in; the indicator grows.
    Inhale,
    /// Hold; the indicator keeps its size.
    Hold,
    /// Breathe out; the indicator shrinks.
    Exhale,
}

/// The fixed label cycle. Labels are looked up by phase index modulo this
/// length, independently of the technique's pattern length.
pub const LABEL_CYCLE: [PhaseLabel; 4] = [
    PhaseLabel::Inhale,
    PhaseLabel::Hold,
    PhaseLabel::Exhale,
    PhaseLabel::Hold,
];

impl PhaseLabel {
    /// Label for the phase at `index`.
    #[must_use]
    pub const fn for_index(index: usize) -> Self {
        LABEL_CYCLE[index % LABEL_CYCLE.len()]
    }

    /// Display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::Hold => "Hold",
            Self::Exhale => "Exhale",
        }
    }

    /// Indicator progress when a phase with this label begins, or `None` if
    /// the indicator keeps whatever size it had.
    #[must_use]
    pub const fn entry_progress(&self) -> Option<f64> {
        match self {
            Self::Inhale => Some(0.0),
            Self::Exhale => Some(1.0),
            Self::Hold => None,
        }
    }

    /// Indicator progress after `elapsed` of the phase has passed.
    #[must_use]
    pub fn progress_at(&self, elapsed: f64, current: f64) -> f64 {
        match self {
            Self::Inhale => elapsed,
            Self::Exhale => 1.0 - elapsed,
            Self::Hold => current,
        }
    }
}

impl std::fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_cycle() {
        assert_eq!(PhaseLabel::for_index(0), PhaseLabel::Inhale);
        assert_eq!(PhaseLabel::for_index(1), PhaseLabel::Hold);
        assert_eq!(PhaseLabel::for_index(2), PhaseLabel::Exhale);
        assert_eq!(PhaseLabel::for_index(3), PhaseLabel::Hold);
        assert_eq!(PhaseLabel::for_index(4), PhaseLabel::Inhale);
        assert_eq!(PhaseLabel::for_index(6), PhaseLabel::Exhale);
    }

    #[test]
    fn test_progress_at() {
        assert!((PhaseLabel::Inhale.progress_at(0.25, 0.9) - 0.25).abs() < f64::EPSILON);
        assert!((PhaseLabel::Exhale.progress_at(0.25, 0.9) - 0.75).abs() < f64::EPSILON);
        assert!((PhaseLabel::Hold.progress_at(0.25, 0.9) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(PhaseLabel::Exhale.to_string(), "Exhale");
    }
}
