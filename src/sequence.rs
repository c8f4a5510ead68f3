use crate::session::{SessionConfig, SessionError, COOL_DOWN_LABEL};

/// what a phase is for, independent of its label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    WarmUp,
    Work,
    Rest,
    CoolDown,
}

impl PhaseKind {
    /// short display name used by block headers and the plan table
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::WarmUp => "Warm-Up",
            PhaseKind::Work => "Work",
            PhaseKind::Rest => "Rest",
            PhaseKind::CoolDown => "Cool-Down",
        }
    }
}

/// one timed step of a session, fixed at build time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phase {
    pub kind: PhaseKind,
    pub label: String,
    pub duration_secs: u32,
    /// 1-based round the phase belongs to; None outside the circuit
    pub round: Option<u32>,
}

impl Phase {
    fn warm_up(label: String, duration_secs: u32) -> Self {
        Self {
            kind: PhaseKind::WarmUp,
            label,
            duration_secs,
            round: None,
        }
    }

    fn work(label: String, duration_secs: u32, round: u32) -> Self {
        Self {
            kind: PhaseKind::Work,
            label,
            duration_secs,
            round: Some(round),
        }
    }

    fn rest(duration_secs: u32, round: u32) -> Self {
        Self {
            kind: PhaseKind::Rest,
            label: "Rest".to_string(),
            duration_secs,
            round: Some(round),
        }
    }

    fn cool_down(duration_secs: u32) -> Self {
        Self {
            kind: PhaseKind::CoolDown,
            label: COOL_DOWN_LABEL.to_string(),
            duration_secs,
            round: None,
        }
    }
}

/// total wall-clock seconds a sequence spans
pub fn total_secs(phases: &[Phase]) -> u32 {
    phases.iter().map(|p| p.duration_secs).sum()
}

/// expands a session config into the ordered list of timed phases.
///
/// the order is always: warm-up steps, then `rounds` passes over the
/// exercises alternating work and rest, then one cool-down. no rest is
/// emitted after the last work phase, so the session ends on the
/// cool-down instead of an idle wait.
pub struct SequenceBuilder {
    config: SessionConfig,
}

impl SequenceBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Result<Vec<Phase>, SessionError> {
        self.validate()?;

        let config = &self.config;
        let mut phases = Vec::new();

        for step in &config.warm_up {
            phases.push(Phase::warm_up(step.label.clone(), step.duration_secs));
        }

        for round in 1..=config.rounds {
            for (slot, name) in config.exercises.iter().enumerate() {
                phases.push(Phase::work(name.clone(), config.work_secs, round));

                let last_work =
                    round == config.rounds && slot == config.exercises.len() - 1;
                if !last_work {
                    phases.push(Phase::rest(config.rest_secs, round));
                }
            }
        }

        phases.push(Phase::cool_down(config.cool_down_secs));

        Ok(phases)
    }

    fn validate(&self) -> Result<(), SessionError> {
        let config = &self.config;

        if config.rounds == 0 {
            return Err(SessionError::InvalidConfig(
                "rounds must be at least 1".to_string(),
            ));
        }
        if config.work_secs == 0 {
            return Err(SessionError::InvalidConfig(
                "work_secs must be positive".to_string(),
            ));
        }
        if config.rest_secs == 0 {
            return Err(SessionError::InvalidConfig(
                "rest_secs must be positive".to_string(),
            ));
        }
        if config.cool_down_secs == 0 {
            return Err(SessionError::InvalidConfig(
                "cool_down_secs must be positive".to_string(),
            ));
        }
        if let Some(step) = config.warm_up.iter().find(|s| s.duration_secs == 0) {
            return Err(SessionError::InvalidConfig(format!(
                "warm-up step '{}' must have a positive duration",
                step.label
            )));
        }
        if config.exercises.iter().any(|n| n.trim().is_empty()) {
            return Err(SessionError::InvalidConfig(
                "exercise names must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}
