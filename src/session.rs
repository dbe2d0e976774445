#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub exercise_id: String,
    pub duration_minutes: u32,
}

impl SessionConfig {
    pub fn new(exercise_id: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            duration_minutes,
        }
    }
}

/// Label shown while no session is running
pub const IDLE_LABEL: &str = "Start";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Index into the active (filtered) phase sequence
    pub phase_index: usize,
    pub seconds_remaining_in_phase: u32,
    pub cycles_remaining: u32,
    pub running: bool,
}

impl SessionState {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Read-only projection handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub phase_label: &'static str,
    pub seconds_remaining: u32,
    pub cycles_remaining: u32,
    pub running: bool,
}

impl SessionView {
    pub fn idle() -> Self {
        Self {
            phase_label: IDLE_LABEL,
            seconds_remaining: 0,
            cycles_remaining: 0,
            running: false,
        }
    }
}
