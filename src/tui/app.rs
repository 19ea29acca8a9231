//! Application state for the TUI.

use tracing::{info, warn};

use crate::error::BreatheError;
use crate::features::breathing::{
    BreathingSessionEngine, Catalog, Clock, IndicatorScale, SessionDriver, SessionEvent, Snapshot,
    Technique,
};
use crate::features::history::{PracticeEntry, PracticeLog};

/// Application state.
pub struct App<C: Clock> {
    /// Drives the session from the clock.
    driver: SessionDriver<C>,
    /// Indicator bounds.
    pub scale: IndicatorScale,
    /// Where completed sessions are recorded, if anywhere.
    log: Option<PracticeLog>,
    /// Currently selected technique.
    pub selected: usize,
    /// Latest session snapshot.
    pub snapshot: Snapshot,
    /// Status message to display.
    pub status: Option<String>,
    /// Sessions completed while the app was open.
    pub completed: Vec<PracticeEntry>,
}

impl<C: Clock> App<C> {
    /// Create the app with technique `initial` selected.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial` cannot be selected.
    pub fn new(
        catalog: Catalog,
        clock: C,
        steps_per_second: u32,
        scale: IndicatorScale,
        log: Option<PracticeLog>,
        initial: usize,
    ) -> Result<Self, BreatheError> {
        let engine = BreathingSessionEngine::new(catalog);
        let mut driver = SessionDriver::new(engine, clock, steps_per_second);
        let snapshot = driver.select(initial)?;

        Ok(Self {
            driver,
            scale,
            log,
            selected: initial,
            snapshot,
            status: Some("space:start | ?:help".to_string()),
            completed: Vec::new(),
        })
    }

    /// The techniques on offer.
    pub const fn catalog(&self) -> &Catalog {
        self.driver.engine().catalog()
    }

    /// The selected technique.
    pub fn technique(&self) -> Option<&Technique> {
        self.driver.engine().technique()
    }

    /// Indicator size for the current progress.
    pub fn indicator_size(&self) -> f64 {
        self.scale.size_for(self.snapshot.progress_fraction)
    }

    /// Deliver due ticks and react to what happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails or a session cannot be recorded.
    pub fn tick(&mut self) -> Result<(), BreatheError> {
        self.snapshot = self.driver.pump()?;
        self.handle_events()
    }

    /// Start or pause.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than validation.
    pub fn toggle(&mut self) -> Result<(), BreatheError> {
        let result = self.driver.toggle();
        if self.apply(result)? {
            let state = if self.snapshot.is_running { "Running" } else { "Paused" };
            self.status = Some(state.to_string());
        }
        Ok(())
    }

    /// Reset the selected technique.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than validation.
    pub fn reset(&mut self) -> Result<(), BreatheError> {
        let result = self.driver.reset();
        if self.apply(result)? {
            self.status = Some("Reset".to_string());
        }
        Ok(())
    }

    /// Select technique `index`, stopping any running session.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than validation.
    pub fn select(&mut self, index: usize) -> Result<(), BreatheError> {
        let result = self.driver.select(index);
        if self.apply(result)? {
            self.selected = index;
            if let Some(technique) = self.technique() {
                self.status = Some(format!("Selected: {}", technique.name()));
            }
        }
        Ok(())
    }

    /// Select the next technique, wrapping around.
    ///
    /// # Errors
    ///
    /// See [`select`](Self::select).
    pub fn select_next(&mut self) -> Result<(), BreatheError> {
        let len = self.catalog().len();
        if len == 0 {
            return Ok(());
        }
        self.select((self.selected + 1) % len)
    }

    /// Select the previous technique, wrapping around.
    ///
    /// # Errors
    ///
    /// See [`select`](Self::select).
    pub fn select_previous(&mut self) -> Result<(), BreatheError> {
        let len = self.catalog().len();
        if len == 0 {
            return Ok(());
        }
        self.select((self.selected + len - 1) % len)
    }

    /// Keep the snapshot, or show a validation failure as status.
    ///
    /// Returns whether the command succeeded.
    fn apply(&mut self, result: Result<Snapshot, BreatheError>) -> Result<bool, BreatheError> {
        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.handle_events()?;
                Ok(true)
            }
            Err(err) if err.is_validation() => {
                warn!(%err, "command rejected");
                self.status = Some(err.to_string());
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn handle_events(&mut self) -> Result<(), BreatheError> {
        for event in self.driver.drain_events() {
            if let SessionEvent::SessionCompleted { technique, cycles } = event {
                let seconds = self
                    .technique()
                    .map_or(0, Technique::session_seconds);
                info!(%technique, cycles, seconds, "session completed");

                let mut entry = PracticeEntry::now(technique, cycles, seconds);
                if let Some(log) = &self.log {
                    log.record(&mut entry)?;
                }
                self.status = Some(format!("Well done! {} complete", entry.technique));
                self.completed.push(entry);
            }
        }
        Ok(())
    }
}
