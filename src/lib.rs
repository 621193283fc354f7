// Gymflow Library - Guided Workout Sessions
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod display;
pub mod observability;
pub mod player;
pub mod scheduler;
pub mod session;
pub mod shutdown;
pub mod state;
pub mod telemetry;
pub mod workout;

// Re-export key types for easy access
pub use config::{config, init_config, GymflowConfig};
pub use observability::{api_metrics, ApiMetrics, OperationTimer};
pub use player::{PlayerEvent, PlayerOutcome, SessionPlayer};
pub use scheduler::{IntervalTicker, ManualTicker, TickSource, TickTrigger};
pub use session::{Phase, SessionError, SessionSnapshot, SessionSummary, WorkoutSession};
pub use shutdown::ShutdownCoordinator;
pub use state::{AppState, Role, UserSession};
pub use telemetry::{create_session_span, init_telemetry, shutdown_telemetry};
pub use workout::{
    load_workout, Exercise, ExerciseType, FileWorkoutSource, Workout, WorkoutClient, WorkoutError,
    WorkoutSource,
};
