use tracing::{debug, info, warn};

use crate::{
    catalog::{find_exercise, ExerciseProfile, Phase, CATALOG},
    error::SessionError,
    session::{SessionConfig, SessionState, SessionView},
};

/// Owns the breathing-cycle state machine for one front end.
///
/// The engine never schedules anything itself: the caller issues one
/// [`SessionEngine::tick`] per elapsed second while [`SessionEngine::is_running`]
/// holds, and stops ticking as soon as it turns false.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    catalog: &'static [ExerciseProfile],
    config: Option<SessionConfig>,
    state: SessionState,
    active: Vec<(Phase, u32)>,
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEngine {
    pub fn new() -> Self {
        Self::with_catalog(CATALOG)
    }

    pub fn with_catalog(catalog: &'static [ExerciseProfile]) -> Self {
        Self {
            catalog,
            config: None,
            state: SessionState::idle(),
            active: Vec::new(),
        }
    }

    pub fn list_exercises(&self) -> &'static [ExerciseProfile] {
        self.catalog
    }

    /// Validates `config` and (re)starts a session from the first active phase.
    ///
    /// Nothing is touched unless every check passes, so a rejected call leaves
    /// a running session running.
    pub fn start(&mut self, config: SessionConfig) -> Result<SessionState, SessionError> {
        let profile = find_exercise(self.catalog, &config.exercise_id).ok_or_else(|| {
            warn!(exercise = %config.exercise_id, "rejecting unknown exercise");
            SessionError::InvalidExercise(config.exercise_id.clone())
        })?;

        if config.duration_minutes == 0 {
            warn!(duration = config.duration_minutes, "rejecting empty session");
            return Err(SessionError::InvalidDuration(config.duration_minutes));
        }

        let active = profile.active_phases();
        let Some(&(first_phase, first_secs)) = active.first() else {
            warn!(exercise = profile.id, "rejecting profile without timings");
            return Err(SessionError::DegenerateProfile(profile.id.to_string()));
        };

        let cycle_secs = profile.cycle_duration_secs();
        let total_cycles = u64::from(config.duration_minutes) * 60 / cycle_secs;
        // a cycle longer than the whole session gives zero cycles; the first
        // phase transition then ends the session
        let total_cycles = u32::try_from(total_cycles).unwrap_or(u32::MAX);

        info!(
            exercise = profile.id,
            minutes = config.duration_minutes,
            cycle_secs,
            total_cycles,
            first = %first_phase,
            "session started"
        );

        self.active = active;
        self.config = Some(config);
        self.state = SessionState {
            phase_index: 0,
            seconds_remaining_in_phase: first_secs,
            cycles_remaining: total_cycles,
            running: true,
        };

        Ok(self.state)
    }

    /// Advances the session by one second.
    ///
    /// The tick that drains the countdown also performs the phase transition,
    /// so a 4 second phase is left after exactly 4 ticks. A transition is a
    /// two step sequence:
    ///
    /// 1. leaving the last active phase of a cycle decrements
    ///    `cycles_remaining`, floored at zero;
    /// 2. the counter is then checked, and if it is zero the session stops
    ///    instead of moving on.
    ///
    /// The check runs after the decrement and on every transition. A session
    /// started with N cycles therefore halts as soon as the Nth decrement
    /// lands and never re-enters the first phase, and a zero-cycle session
    /// stops on its very first transition. This ordering is kept on purpose.
    pub fn tick(&mut self) -> Result<SessionState, SessionError> {
        if !self.state.running {
            return Err(SessionError::NotRunning);
        }

        if self.state.seconds_remaining_in_phase > 0 {
            self.state.seconds_remaining_in_phase -= 1;
        }

        if self.state.seconds_remaining_in_phase == 0 {
            self.transition();
        }

        Ok(self.state)
    }

    fn transition(&mut self) {
        let is_last_phase_of_cycle = self.state.phase_index + 1 == self.active.len();

        // step 1: decrement
        if is_last_phase_of_cycle {
            self.state.cycles_remaining = self.state.cycles_remaining.saturating_sub(1);
        }

        // step 2: check
        if self.state.cycles_remaining == 0 {
            info!("all cycles completed");
            self.stop();
            return;
        }

        self.state.phase_index = (self.state.phase_index + 1) % self.active.len();
        let (phase, secs) = self.active[self.state.phase_index];
        self.state.seconds_remaining_in_phase = secs;

        debug!(
            phase = %phase,
            secs,
            cycles_remaining = self.state.cycles_remaining,
            "phase transition"
        );
    }

    /// Returns to idle. Safe to call at any time, any number of times.
    pub fn stop(&mut self) -> SessionState {
        if self.state.running {
            info!(
                cycles_remaining = self.state.cycles_remaining,
                "session stopped"
            );
        }
        self.state = SessionState::idle();
        self.active.clear();
        self.state
    }

    pub fn current_view(&self) -> SessionView {
        match self.phase() {
            Some(phase) => SessionView {
                phase_label: phase.label(),
                seconds_remaining: self.state.seconds_remaining_in_phase,
                cycles_remaining: self.state.cycles_remaining,
                running: true,
            },
            None => SessionView::idle(),
        }
    }

    /// Active phase, or `None` while idle
    pub fn phase(&self) -> Option<Phase> {
        if !self.state.running {
            return None;
        }
        self.active
            .get(self.state.phase_index)
            .map(|&(phase, _)| phase)
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Settings of the most recent successful `start`
    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    /// Phase rotation of the running session; empty while idle
    pub fn active_phases(&self) -> &[(Phase, u32)] {
        &self.active
    }
}
