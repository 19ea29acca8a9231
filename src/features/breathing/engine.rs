//! The breathing session engine.
//!
//! A deterministic phase/cycle state machine for one technique at a time.
//! The engine owns no timers: the host injects second ticks and animation
//! ticks, issues user commands, and re-reads a [`Snapshot`] after each call.
//!
//! Every mutating operation returns `Result<Snapshot, BreatheError>`. On
//! `Err` the session state is left exactly as it was.

use serde::Serialize;
use tracing::{debug, info, trace};

use super::catalog::Catalog;
use super::phase::PhaseLabel;
use super::technique::Technique;
use crate::error::BreatheError;

/// Indicator progress at rest.
pub const BASELINE_PROGRESS: f64 = 0.0;

/// Session state. Only the engine mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    /// Index into the catalog, once a technique has been selected.
    pub selected_technique_index: Option<usize>,
    /// Whether ticks are being accepted.
    pub is_running: bool,
    /// Current position in the technique's pattern.
    pub current_phase_index: usize,
    /// Countdown within the current phase.
    pub seconds_remaining: u32,
    /// Full pattern repetitions finished in the current run.
    pub completed_cycles: u32,
    /// Indicator progress in `[0, 1]`.
    pub progress_fraction: f64,
    /// Furthest animation position seen in the current phase.
    pub phase_elapsed_fraction: f64,
    /// Session ticket counter. Bumped whenever outstanding ticks must be
    /// invalidated.
    pub epoch: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_technique_index: None,
            is_running: false,
            current_phase_index: 0,
            seconds_remaining: 0,
            completed_cycles: 0,
            progress_fraction: BASELINE_PROGRESS,
            phase_elapsed_fraction: 0.0,
            epoch: 0,
        }
    }
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Name of the selected technique.
    pub technique: Option<String>,
    /// Position in the pattern.
    pub phase_index: usize,
    /// Label for the current phase.
    pub phase_label: PhaseLabel,
    /// Full length of the current phase.
    pub phase_seconds: u32,
    /// Countdown within the current phase.
    pub seconds_remaining: u32,
    /// Cycles finished so far.
    pub completed_cycles: u32,
    /// Cycles in a complete session.
    pub total_cycles: u32,
    /// Indicator progress in `[0, 1]`.
    pub progress_fraction: f64,
    /// Whether the session is running.
    pub is_running: bool,
}

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session started or resumed.
    Started {
        /// Phase the session is in.
        phase_index: usize,
        /// Its label.
        label: PhaseLabel,
        /// Countdown at the moment of starting.
        seconds_remaining: u32,
    },
    /// A new phase began after a transition.
    PhaseStarted {
        /// Phase index.
        phase_index: usize,
        /// Its label.
        label: PhaseLabel,
        /// Its length.
        seconds: u32,
    },
    /// A full pattern repetition finished.
    CycleCompleted {
        /// Cycles finished so far.
        completed: u32,
    },
    /// The target cycle count was reached and the session went idle.
    SessionCompleted {
        /// Technique name.
        technique: String,
        /// Cycles performed.
        cycles: u32,
    },
    /// A running session was stopped by a command.
    Stopped,
}

/// Proof that a tick belongs to the session it was scheduled for.
///
/// Hosts take a ticket when they arm their timers. Ticks presented with a
/// ticket from before the latest stop, reset, selection or completion are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTicket {
    epoch: u64,
}

/// Drives one breathing technique at a time through its phases and cycles.
#[derive(Debug, Clone)]
pub struct BreathingSessionEngine {
    catalog: Catalog,
    state: SessionState,
    events: Vec<SessionEvent>,
}

impl BreathingSessionEngine {
    /// Create an idle engine over `catalog` with nothing selected.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: SessionState::default(),
            events: Vec::new(),
        }
    }

    /// The technique catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The selected technique.
    #[must_use]
    pub fn technique(&self) -> Option<&Technique> {
        self.state
            .selected_technique_index
            .and_then(|i| self.catalog.get(i))
    }

    /// Ticket for ticks scheduled from now on.
    #[must_use]
    pub const fn ticket(&self) -> TickTicket {
        TickTicket {
            epoch: self.state.epoch,
        }
    }

    /// Whether ticks carrying `ticket` would still be applied.
    #[must_use]
    pub const fn is_current(&self, ticket: &TickTicket) -> bool {
        ticket.epoch == self.state.epoch
    }

    /// Take the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Select a technique and reset the session to its first phase.
    ///
    /// Stops any running session and invalidates outstanding tickets.
    ///
    /// # Errors
    ///
    /// `InvalidTechnique` for an index outside the catalog and
    /// `DegenerateTechnique` if every phase of the technique is zero seconds.
    pub fn select_technique(&mut self, index: usize) -> Result<Snapshot, BreatheError> {
        let technique = self
            .catalog
            .get(index)
            .ok_or(BreatheError::InvalidTechnique {
                index,
                available: self.catalog.len(),
            })?;

        if technique.is_degenerate() {
            return Err(BreatheError::DegenerateTechnique(
                technique.name().to_string(),
            ));
        }

        let first_phase = technique.phase_seconds(0);
        debug!(technique = technique.name(), index, "technique selected");

        if self.state.is_running {
            self.events.push(SessionEvent::Stopped);
        }

        self.state = SessionState {
            selected_technique_index: Some(index),
            seconds_remaining: first_phase,
            epoch: self.state.epoch + 1,
            ..SessionState::default()
        };

        Ok(self.snapshot())
    }

    /// Start or resume the session.
    ///
    /// Does nothing if already running. A session resumes from the phase and
    /// countdown it was paused at. If the current phase is zero seconds long
    /// it is skipped straight away.
    ///
    /// # Errors
    ///
    /// `NoTechniqueSelected` if no technique was ever selected.
    pub fn start(&mut self) -> Result<Snapshot, BreatheError> {
        if self.state.selected_technique_index.is_none() {
            return Err(BreatheError::NoTechniqueSelected);
        }
        if self.state.is_running {
            return Ok(self.snapshot());
        }

        self.state.is_running = true;
        self.state.epoch += 1;

        if self.state.seconds_remaining == 0 {
            self.advance()?;
        }

        if self.state.is_running {
            self.events.push(SessionEvent::Started {
                phase_index: self.state.current_phase_index,
                label: PhaseLabel::for_index(self.state.current_phase_index),
                seconds_remaining: self.state.seconds_remaining,
            });
            debug!(
                phase = self.state.current_phase_index,
                seconds_remaining = self.state.seconds_remaining,
                "session started"
            );
        }

        Ok(self.snapshot())
    }

    /// Pause the session, keeping phase, countdown and cycle count.
    ///
    /// Outstanding tickets are invalidated.
    ///
    /// # Errors
    ///
    /// Never fails today; returns `Result` like the other commands.
    pub fn stop(&mut self) -> Result<Snapshot, BreatheError> {
        if self.state.is_running {
            self.state.is_running = false;
            self.state.epoch += 1;
            self.events.push(SessionEvent::Stopped);
            debug!(
                phase = self.state.current_phase_index,
                seconds_remaining = self.state.seconds_remaining,
                "session stopped"
            );
        }
        Ok(self.snapshot())
    }

    /// Alias for [`stop`](Self::stop).
    ///
    /// # Errors
    ///
    /// See [`stop`](Self::stop).
    pub fn pause(&mut self) -> Result<Snapshot, BreatheError> {
        self.stop()
    }

    /// Stop and return to the first phase of the selected technique.
    ///
    /// # Errors
    ///
    /// `NoTechniqueSelected` if no technique was ever selected.
    pub fn reset(&mut self) -> Result<Snapshot, BreatheError> {
        let index = self
            .state
            .selected_technique_index
            .ok_or(BreatheError::NoTechniqueSelected)?;
        self.select_technique(index)
    }

    /// Advance the countdown by one second.
    ///
    /// Ignored while idle. When the countdown runs out the session moves to
    /// the next phase with a non-zero duration, counting a cycle when the
    /// pattern wraps and completing the session once the target is reached.
    ///
    /// # Errors
    ///
    /// `DegenerateTechnique` if no phase with a non-zero duration exists; the
    /// session is stopped in that case.
    pub fn on_second_tick(&mut self) -> Result<Snapshot, BreatheError> {
        if !self.state.is_running {
            trace!("second tick while idle");
            return Ok(self.snapshot());
        }

        if self.state.seconds_remaining > 1 {
            self.state.seconds_remaining -= 1;
        } else {
            self.state.seconds_remaining = 0;
            self.advance()?;
        }

        Ok(self.snapshot())
    }

    /// [`on_second_tick`](Self::on_second_tick), discarded if `ticket` is stale.
    ///
    /// # Errors
    ///
    /// See [`on_second_tick`](Self::on_second_tick).
    pub fn on_second_tick_with(&mut self, ticket: &TickTicket) -> Result<Snapshot, BreatheError> {
        if !self.is_current(ticket) {
            trace!(
                ticket = ticket.epoch,
                current = self.state.epoch,
                "discarding stale second tick"
            );
            return Ok(self.snapshot());
        }
        self.on_second_tick()
    }

    /// Update the indicator from the host's animation position.
    ///
    /// `elapsed_fraction` is how far through the current phase the host's
    /// animation has got. The indicator grows during Inhale, shrinks during
    /// Exhale and holds otherwise; it never moves backwards within a phase.
    /// The countdown and phase are never touched.
    #[must_use = "the snapshot reflects the updated indicator"]
    pub fn on_animation_tick(&mut self, elapsed_fraction: f64) -> Snapshot {
        if !self.state.is_running {
            return self.snapshot();
        }

        let fraction = if elapsed_fraction.is_nan() {
            0.0
        } else {
            elapsed_fraction.clamp(0.0, 1.0)
        };

        let elapsed = self.state.phase_elapsed_fraction.max(fraction);
        self.state.phase_elapsed_fraction = elapsed;

        let label = PhaseLabel::for_index(self.state.current_phase_index);
        self.state.progress_fraction = label
            .progress_at(elapsed, self.state.progress_fraction)
            .clamp(0.0, 1.0);

        self.snapshot()
    }

    /// [`on_animation_tick`](Self::on_animation_tick), discarded if `ticket`
    /// is stale.
    #[must_use = "the snapshot reflects the updated indicator"]
    pub fn on_animation_tick_with(
        &mut self,
        ticket: &TickTicket,
        elapsed_fraction: f64,
    ) -> Snapshot {
        if !self.is_current(ticket) {
            trace!("discarding stale animation tick");
            return self.snapshot();
        }
        self.on_animation_tick(elapsed_fraction)
    }

    /// Current view of the session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let technique = self.technique();
        let phase_index = self.state.current_phase_index;

        Snapshot {
            technique: technique.map(|t| t.name().to_string()),
            phase_index,
            phase_label: PhaseLabel::for_index(phase_index),
            phase_seconds: technique.map_or(0, |t| t.phase_seconds(phase_index)),
            seconds_remaining: self.state.seconds_remaining,
            completed_cycles: self.state.completed_cycles,
            total_cycles: technique.map_or(0, Technique::cycles),
            progress_fraction: self.state.progress_fraction,
            is_running: self.state.is_running,
        }
    }

    /// Move to the next phase with a non-zero duration.
    ///
    /// Bounded by the pattern length so an all-zero pattern cannot spin.
    fn advance(&mut self) -> Result<(), BreatheError> {
        let technique = self
            .state
            .selected_technique_index
            .and_then(|i| self.catalog.get(i))
            .ok_or(BreatheError::NoTechniqueSelected)?;
        let len = technique.pattern().len();

        for _ in 0..len {
            let next = (self.state.current_phase_index + 1) % len;
            let label = PhaseLabel::for_index(next);

            self.state.current_phase_index = next;
            self.state.seconds_remaining = technique.phase_seconds(next);
            self.state.phase_elapsed_fraction = 0.0;
            if let Some(progress) = label.entry_progress() {
                self.state.progress_fraction = progress;
            }

            if next == 0 {
                self.state.completed_cycles += 1;
                self.events.push(SessionEvent::CycleCompleted {
                    completed: self.state.completed_cycles,
                });

                if self.state.completed_cycles >= technique.cycles() {
                    info!(
                        technique = technique.name(),
                        cycles = technique.cycles(),
                        "session complete"
                    );
                    self.state.is_running = false;
                    self.state.completed_cycles = 0;
                    self.state.progress_fraction = BASELINE_PROGRESS;
                    self.state.epoch += 1;
                    self.events.push(SessionEvent::SessionCompleted {
                        technique: technique.name().to_string(),
                        cycles: technique.cycles(),
                    });
                    return Ok(());
                }
            }

            if self.state.seconds_remaining > 0 {
                debug!(
                    phase = next,
                    %label,
                    seconds = self.state.seconds_remaining,
                    "phase started"
                );
                self.events.push(SessionEvent::PhaseStarted {
                    phase_index: next,
                    label,
                    seconds: self.state.seconds_remaining,
                });
                return Ok(());
            }

            trace!(phase = next, "skipping zero-length phase");
        }

        self.state.is_running = false;
        self.state.epoch += 1;
        Err(BreatheError::DegenerateTechnique(technique.name().to_string()))
    }
}
