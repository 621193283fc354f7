// Session Module - guided workout sequencer
//
// Countdown, per-exercise timer and auto-advance, driven one tick at a time.
// Pure state: no I/O and no clock. The player module supplies the ticks.

pub mod state_machine;
pub mod types;
pub mod workout_session;


pub use state_machine::SessionMachine;
pub use types::{
    Phase, SessionError, SessionEvent, SessionNotice, SessionSnapshot, SessionSummary,
    TickReport, DEFAULT_STARTUP_COUNTDOWN,
};
pub use workout_session::WorkoutSession;
