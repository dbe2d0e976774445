// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod session;

pub use catalog::{list_exercises, ExerciseProfile, Phase};
pub use engine::SessionEngine;
pub use error::SessionError;
pub use session::{SessionConfig, SessionState, SessionView};
