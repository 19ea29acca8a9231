//! Host tick driver.
//!
//! Turns a monotonic clock into the engine's second ticks and animation
//! ticks. Ticks are only issued under the ticket taken when the session was
//! last started, so a stop, reset or technique switch drops everything that
//! was scheduled before it.

use std::cell::Cell;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::animation::{phase_fraction, MAX_STEPS_PER_SECOND};
use super::engine::{BreathingSessionEngine, SessionEvent, Snapshot, TickTicket};
use crate::error::BreatheError;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Source of monotonic time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Time elapsed since some fixed origin.
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to. Used for headless simulation.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    ticket: TickTicket,
    last_second: Duration,
}

/// Owns an engine and feeds it ticks from a clock.
#[derive(Debug)]
pub struct SessionDriver<C: Clock> {
    engine: BreathingSessionEngine,
    clock: C,
    steps_per_second: u32,
    armed: Option<Armed>,
}

impl<C: Clock> SessionDriver<C> {
    /// Create a driver with nothing scheduled.
    ///
    /// `steps_per_second` is clamped to `1..=MAX_STEPS_PER_SECOND`.
    pub fn new(engine: BreathingSessionEngine, clock: C, steps_per_second: u32) -> Self {
        let clamped = steps_per_second.clamp(1, MAX_STEPS_PER_SECOND);
        if clamped != steps_per_second {
            warn!(requested = steps_per_second, using = clamped, "clamping steps per second");
        }
        Self {
            engine,
            clock,
            steps_per_second: clamped,
            armed: None,
        }
    }

    /// The driven engine.
    pub const fn engine(&self) -> &BreathingSessionEngine {
        &self.engine
    }

    /// The clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Animation resolution.
    pub const fn steps_per_second(&self) -> u32 {
        self.steps_per_second
    }

    /// Whether ticks are scheduled.
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Take queued session events.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.engine.drain_events()
    }

    /// Select a technique, cancelling scheduled ticks.
    ///
    /// # Errors
    ///
    /// See [`BreathingSessionEngine::select_technique`].
    pub fn select(&mut self, index: usize) -> Result<Snapshot, BreatheError> {
        let snapshot = self.engine.select_technique(index)?;
        self.disarm();
        Ok(snapshot)
    }

    /// Start or resume, scheduling ticks from now.
    ///
    /// # Errors
    ///
    /// See [`BreathingSessionEngine::start`].
    pub fn start(&mut self) -> Result<Snapshot, BreatheError> {
        let snapshot = self.engine.start()?;
        if snapshot.is_running {
            if self.armed.is_none() {
                self.armed = Some(Armed {
                    ticket: self.engine.ticket(),
                    last_second: self.clock.elapsed(),
                });
            }
        } else {
            self.disarm();
        }
        Ok(snapshot)
    }

    /// Pause, cancelling scheduled ticks.
    ///
    /// # Errors
    ///
    /// See [`BreathingSessionEngine::stop`].
    pub fn stop(&mut self) -> Result<Snapshot, BreatheError> {
        let snapshot = self.engine.stop()?;
        self.disarm();
        Ok(snapshot)
    }

    /// Start when idle, pause when running.
    ///
    /// # Errors
    ///
    /// See [`start`](Self::start) and [`stop`](Self::stop).
    pub fn toggle(&mut self) -> Result<Snapshot, BreatheError> {
        if self.engine.snapshot().is_running {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Reset the selected technique, cancelling scheduled ticks.
    ///
    /// # Errors
    ///
    /// See [`BreathingSessionEngine::reset`].
    pub fn reset(&mut self) -> Result<Snapshot, BreatheError> {
        let snapshot = self.engine.reset()?;
        self.disarm();
        Ok(snapshot)
    }

    /// Deliver every tick that has come due.
    ///
    /// Issues one second tick per whole second since the last one, then a
    /// single animation tick for the current position in the phase. Stops
    /// issuing as soon as the session is no longer running.
    ///
    /// # Errors
    ///
    /// Propagates engine failures; scheduled ticks are cancelled first.
    pub fn pump(&mut self) -> Result<Snapshot, BreatheError> {
        let Some(mut armed) = self.armed else {
            return Ok(self.engine.snapshot());
        };

        let now = self.clock.elapsed();
        let mut snapshot = self.engine.snapshot();

        while now.saturating_sub(armed.last_second) >= ONE_SECOND {
            armed.last_second += ONE_SECOND;
            snapshot = match self.engine.on_second_tick_with(&armed.ticket) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    self.disarm();
                    return Err(err);
                }
            };

            if !snapshot.is_running || !self.engine.is_current(&armed.ticket) {
                debug!("session no longer running, cancelling ticks");
                self.disarm();
                return Ok(snapshot);
            }
        }

        let sub_second = now.saturating_sub(armed.last_second).as_secs_f64();
        let whole_seconds = snapshot
            .phase_seconds
            .saturating_sub(snapshot.seconds_remaining);
        let fraction = phase_fraction(
            snapshot.phase_seconds,
            whole_seconds,
            sub_second,
            self.steps_per_second,
        );
        snapshot = self.engine.on_animation_tick_with(&armed.ticket, fraction);

        self.armed = Some(armed);
        Ok(snapshot)
    }

    fn disarm(&mut self) {
        self.armed = None;
    }
}
