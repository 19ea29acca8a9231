//! Breathing technique records and their validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::phase::PhaseLabel;
use crate::error::BreatheError;

/// A named breathing pattern: per-phase durations plus a repeat count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Technique {
    name: String,
    description: String,
    pattern: Vec<u32>,
    cycles: u32,
}

impl Technique {
    /// Build a validated technique.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the pattern is empty or
    /// `cycles` is zero.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        pattern: Vec<u32>,
        cycles: u32,
    ) -> Result<Self, BreatheError> {
        let name = name.into();
        if pattern.is_empty() {
            return Err(invalid(&name, "pattern must have at least one phase"));
        }
        if cycles == 0 {
            return Err(invalid(&name, "cycles must be at least 1"));
        }
        Ok(Self {
            name,
            description: description.into(),
            pattern,
            cycles,
        })
    }

    /// Display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Phase durations in seconds.
    #[must_use]
    pub fn pattern(&self) -> &[u32] {
        &self.pattern
    }

    /// Number of pattern repetitions per session.
    #[must_use]
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Duration of the phase at `index`, wrapping around the pattern.
    #[must_use]
    pub fn phase_seconds(&self, index: usize) -> u32 {
        self.pattern[index % self.pattern.len()]
    }

    /// Seconds in one full cycle.
    #[must_use]
    pub fn cycle_seconds(&self) -> u32 {
        self.pattern.iter().sum()
    }

    /// Seconds in a complete session.
    #[must_use]
    pub fn session_seconds(&self) -> u64 {
        u64::from(self.cycle_seconds()) * u64::from(self.cycles)
    }

    /// Breathing rate for this pattern, if a cycle takes any time at all.
    #[must_use]
    pub fn breaths_per_minute(&self) -> Option<f64> {
        let cycle = self.cycle_seconds();
        if cycle == 0 {
            None
        } else {
            Some(60.0 / f64::from(cycle))
        }
    }

    /// True when every phase is zero seconds long.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.pattern.iter().all(|&s| s == 0)
    }

    /// Pattern rendered as `4-7-8`.
    #[must_use]
    pub fn pattern_text(&self) -> String {
        self.pattern
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Each phase with the label it is shown under.
    ///
    /// Labels follow the fixed four-step cycle, so for patterns that are not
    /// four phases long the label of a given pattern slot is only right for
    /// the first pass.
    #[must_use]
    pub fn labelled_phases(&self) -> Vec<(PhaseLabel, u32)> {
        self.pattern
            .iter()
            .enumerate()
            .map(|(i, &secs)| (PhaseLabel::for_index(i), secs))
            .collect()
    }
}

fn invalid(name: &str, reason: &str) -> BreatheError {
    BreatheError::InvalidPattern {
        technique: name.to_string(),
        reason: reason.to_string(),
    }
}

/// A pattern as written in configuration: a list or text such as `4-7-8`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    /// `[4, 7, 8]`
    List(Vec<i64>),
    /// `"4-7-8"`
    Text(String),
}

/// An unvalidated technique as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueSpec {
    /// Display label.
    pub name: String,
    /// Description shown in listings.
    #[serde(default)]
    pub description: String,
    /// Phase durations.
    pub pattern: PatternSpec,
    /// Repeat count.
    #[serde(default = "default_cycles")]
    pub cycles: i64,
}

const fn default_cycles() -> i64 {
    4
}

impl TryFrom<&TechniqueSpec> for Technique {
    type Error = BreatheError;

    fn try_from(spec: &TechniqueSpec) -> Result<Self, Self::Error> {
        let pattern = match &spec.pattern {
            PatternSpec::List(values) => values
                .iter()
                .map(|&v| {
                    u32::try_from(v).map_err(|_| {
                        invalid(
                            &spec.name,
                            &format!("phase duration {v} is not a valid number of seconds"),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            PatternSpec::Text(text) => {
                parse_pattern(text).map_err(|reason| invalid(&spec.name, &reason))?
            }
        };

        let cycles = u32::try_from(spec.cycles)
            .map_err(|_| invalid(&spec.name, &format!("cycles {} is out of range", spec.cycles)))?;

        Self::new(spec.name.clone(), spec.description.clone(), pattern, cycles)
    }
}

static PATTERN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d+(?:\s*[-,/ ]\s*\d+)*\s*$")
        .unwrap_or_else(|e| panic!("Invalid pattern regex: {e}"))
});

static PATTERN_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*[-,/ ]\s*").unwrap_or_else(|e| panic!("Invalid separator regex: {e}"))
});

/// Parse pattern text like `4-7-8`, `4,7,8`, `4/7/8` or `4 7 8`.
///
/// # Errors
///
/// Returns a description of the problem if the text is not a list of
/// non-negative integers.
pub fn parse_pattern(text: &str) -> Result<Vec<u32>, String> {
    if !PATTERN_TEXT.is_match(text) {
        return Err(format!(
            "'{}' is not a pattern of whole seconds like 4-7-8",
            text.trim()
        ));
    }

    PATTERN_SEPARATOR
        .split(text.trim())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|e| format!("'{part}' is not a valid duration: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_pattern() {
        let err = Technique::new("Empty", "", vec![], 3).unwrap_err();
        assert!(matches!(err, BreatheError::InvalidPattern { .. }));
    }

    #[test]
    fn test_new_rejects_zero_cycles() {
        let err = Technique::new("None", "", vec![4], 0).unwrap_err();
        assert!(matches!(err, BreatheError::InvalidPattern { .. }));
    }

    #[test]
    fn test_derived_durations() {
        let t = Technique::new("4-7-8", "", vec![4, 7, 8], 4).unwrap();
        assert_eq!(t.cycle_seconds(), 19);
        assert_eq!(t.session_seconds(), 76);
        assert_eq!(t.phase_seconds(4), 7);
        assert_eq!(t.pattern_text(), "4-7-8");
    }

    #[test]
    fn test_breaths_per_minute() {
        let t = Technique::new("Box", "", vec![4, 4, 4, 4], 5).unwrap();
        let bpm = t.breaths_per_minute().unwrap();
        assert!((bpm - 3.75).abs() < 0.01);

        let zero = Technique::new("Zero", "", vec![0, 0], 1).unwrap();
        assert!(zero.breaths_per_minute().is_none());
        assert!(zero.is_degenerate());
    }

    #[test]
    fn test_labelled_phases_drift() {
        let t = Technique::new("Deep", "", vec![5, 0, 5], 6).unwrap();
        let labels: Vec<_> = t.labelled_phases().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec![PhaseLabel::Inhale, PhaseLabel::Hold, PhaseLabel::Exhale]
        );
    }

    #[test]
    fn test_parse_pattern_separators() {
        assert_eq!(parse_pattern("4-7-8"), Ok(vec![4, 7, 8]));
        assert_eq!(parse_pattern("4,4,4,4"), Ok(vec![4, 4, 4, 4]));
        assert_eq!(parse_pattern("5 / 0 / 5"), Ok(vec![5, 0, 5]));
        assert_eq!(parse_pattern(" 6 "), Ok(vec![6]));
    }

    #[test]
    fn test_parse_pattern_invalid() {
        assert!(parse_pattern("").is_err());
        assert!(parse_pattern("4--7").is_err());
        assert!(parse_pattern("4-x-8").is_err());
        assert!(parse_pattern("-4-7").is_err());
    }

    #[test]
    fn test_spec_negative_duration_rejected() {
        let spec = TechniqueSpec {
            name: "Backwards".to_string(),
            description: String::new(),
            pattern: PatternSpec::List(vec![4, -1, 4]),
            cycles: 2,
        };
        let err = Technique::try_from(&spec).unwrap_err();
        assert!(err.to_string().contains("Backwards"));
    }

    #[test]
    fn test_spec_text_pattern() {
        let spec = TechniqueSpec {
            name: "Calm".to_string(),
            description: "Even breaths".to_string(),
            pattern: PatternSpec::Text("4-0-6".to_string()),
            cycles: 8,
        };
        let t = Technique::try_from(&spec).unwrap();
        assert_eq!(t.pattern(), &[4, 0, 6]);
        assert_eq!(t.cycles(), 8);
    }

    #[test]
    fn test_spec_from_yaml() {
        let yaml = "name: Triangle\npattern: [4, 4, 4]\ncycles: 8\n";
        let spec: TechniqueSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.pattern, PatternSpec::List(vec![4, 4, 4]));

        let yaml = "name: Relax\npattern: \"4-8\"\n";
        let spec: TechniqueSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.pattern, PatternSpec::Text("4-8".to_string()));
        assert_eq!(spec.cycles, 4);
    }
}
