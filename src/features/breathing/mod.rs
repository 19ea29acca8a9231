//! Guided breathing sessions.
//!
//! - Technique catalog with load-time validation
//! - Phase/cycle session engine driven by injected ticks
//! - Tick driver that keeps stale ticks away from newer sessions
//! - Headless simulation

pub mod animation;
pub mod catalog;
pub mod driver;
pub mod engine;
pub mod format;
pub mod phase;
pub mod simulation;
pub mod technique;

pub use animation::{
    phase_fraction, IndicatorScale, DEFAULT_STEPS_PER_SECOND, MAX_STEPS_PER_SECOND,
};
pub use catalog::{Catalog, CatalogLoad};
pub use driver::{Clock, ManualClock, SessionDriver, SystemClock};
pub use engine::{
    BreathingSessionEngine, SessionEvent, SessionState, Snapshot, TickTicket, BASELINE_PROGRESS,
};
pub use format::{format_duration, format_mmss, render_progress_bar};
pub use phase::{PhaseLabel, LABEL_CYCLE};
pub use simulation::{simulate, Simulation, SimulationOptions, TimedEvent};
pub use technique::{parse_pattern, PatternSpec, Technique, TechniqueSpec};
