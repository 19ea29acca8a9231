//! Headless session runs on a virtual clock.

use std::time::Duration;

use serde::Serialize;

use super::catalog::Catalog;
use super::driver::{Clock, ManualClock, SessionDriver};
use super::engine::{BreathingSessionEngine, SessionEvent, Snapshot};
use crate::error::BreatheError;

/// Limits for a simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Animation resolution.
    pub steps_per_second: u32,
    /// Give up after this many simulated seconds.
    pub max_seconds: Option<u64>,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            steps_per_second: super::animation::DEFAULT_STEPS_PER_SECOND,
            max_seconds: None,
        }
    }
}

/// An event and when it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedEvent {
    /// Simulated seconds since start.
    pub at_seconds: u64,
    /// What happened.
    #[serde(flatten)]
    pub event: SessionEvent,
}

/// Outcome of a simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    /// Technique name.
    pub technique: String,
    /// Pattern as text.
    pub pattern: String,
    /// Simulated seconds elapsed.
    pub elapsed_seconds: u64,
    /// Whether the session ran to completion.
    pub completed: bool,
    /// Events in order.
    pub events: Vec<TimedEvent>,
    /// State at the end of the run.
    pub final_snapshot: Snapshot,
}

/// Run technique `index` of `catalog` from start until it completes or the
/// time limit is reached.
///
/// # Errors
///
/// Propagates engine failures such as an invalid or degenerate technique.
pub fn simulate(
    catalog: Catalog,
    index: usize,
    options: SimulationOptions,
) -> Result<Simulation, BreatheError> {
    let clock = ManualClock::new();
    let engine = BreathingSessionEngine::new(catalog);
    let mut driver = SessionDriver::new(engine, &clock, options.steps_per_second);

    driver.select(index)?;
    let technique = driver
        .engine()
        .technique()
        .ok_or(BreatheError::NoTechniqueSelected)?;
    let name = technique.name().to_string();
    let pattern = technique.pattern_text();
    let limit = options
        .max_seconds
        .unwrap_or_else(|| technique.session_seconds());

    driver.start()?;

    let step = Duration::from_secs(1) / driver.steps_per_second();
    if step.is_zero() {
        return Err(BreatheError::Config(format!(
            "steps_per_second {} is too fine to simulate",
            driver.steps_per_second()
        )));
    }
    let mut events: Vec<TimedEvent> = driver
        .drain_events()
        .into_iter()
        .map(|event| TimedEvent { at_seconds: 0, event })
        .collect();
    let mut completed = false;

    while driver.snapshot().is_running && whole_seconds(&clock) < limit {
        clock.advance(step);
        driver.pump()?;

        let at_seconds = whole_seconds(&clock);
        for event in driver.drain_events() {
            completed |= matches!(event, SessionEvent::SessionCompleted { .. });
            events.push(TimedEvent { at_seconds, event });
        }
    }

    Ok(Simulation {
        technique: name,
        pattern,
        elapsed_seconds: whole_seconds(&clock),
        completed,
        events,
        final_snapshot: driver.snapshot(),
    })
}

fn whole_seconds(clock: &ManualClock) -> u64 {
    clock.elapsed().as_secs()
}
