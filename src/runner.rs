use crate::sequence::Phase;
use crate::session::SessionError;

/// lifecycle of a running session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    Running,
    Finished,
}

/// drives one built phase sequence from the first warm-up second to the
/// last cool-down second.
///
/// each `tick` consumes exactly one second of the current phase; the host
/// decides how often real time produces a tick. the runner never skips,
/// reorders, or re-times phases after construction.
#[derive(Debug, Clone)]
pub struct SessionRunner {
    sequence: Vec<Phase>,
    current: usize,
    remaining_in_phase: u32,
    status: SessionStatus,
}

impl SessionRunner {
    /// wraps a built sequence, parked on the first phase until `start`
    pub fn new(sequence: Vec<Phase>) -> Result<Self, SessionError> {
        let first = sequence.first().ok_or_else(|| {
            SessionError::InvalidConfig("phase sequence is empty".to_string())
        })?;
        let remaining_in_phase = first.duration_secs;

        Ok(Self {
            sequence,
            current: 0,
            remaining_in_phase,
            status: SessionStatus::NotStarted,
        })
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::NotStarted {
            return Err(SessionError::InvalidState("session already started"));
        }
        self.status = SessionStatus::Running;
        Ok(())
    }

    /// consume one second. crossing a phase boundary lands on the next
    /// phase with its full duration; consuming the final second of the
    /// last phase finishes the session.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::NotStarted => {
                return Err(SessionError::InvalidState("session not started"))
            }
            SessionStatus::Finished => {
                return Err(SessionError::InvalidState("session already finished"))
            }
            SessionStatus::Running => {}
        }

        self.remaining_in_phase -= 1;
        if self.remaining_in_phase == 0 {
            if self.current + 1 == self.sequence.len() {
                self.status = SessionStatus::Finished;
            } else {
                self.current += 1;
                self.remaining_in_phase = self.sequence[self.current].duration_secs;
            }
        }
        Ok(())
    }

    /// the phase being counted down; gone once the session finishes
    pub fn current_phase(&self) -> Result<&Phase, SessionError> {
        if self.status == SessionStatus::Finished {
            return Err(SessionError::InvalidState("session already finished"));
        }
        Ok(&self.sequence[self.current])
    }

    /// the phase after the current one, if any remains
    pub fn next_phase(&self) -> Option<&Phase> {
        if self.status == SessionStatus::Finished {
            return None;
        }
        self.sequence.get(self.current + 1)
    }

    /// fraction of the current phase consumed, in [0, 1). exactly 1.0
    /// once the session is finished.
    pub fn progress_in_phase(&self) -> f64 {
        if self.status == SessionStatus::Finished {
            return 1.0;
        }
        let duration = self.sequence[self.current].duration_secs;
        f64::from(duration - self.remaining_in_phase) / f64::from(duration)
    }

    /// fraction of the whole session consumed, in [0, 1]
    pub fn session_progress(&self) -> f64 {
        f64::from(self.elapsed_secs()) / f64::from(self.total_secs())
    }

    pub fn elapsed_secs(&self) -> u32 {
        if self.status == SessionStatus::Finished {
            return self.total_secs();
        }
        let before: u32 = self.sequence[..self.current]
            .iter()
            .map(|p| p.duration_secs)
            .sum();
        before + (self.sequence[self.current].duration_secs - self.remaining_in_phase)
    }

    pub fn total_secs(&self) -> u32 {
        crate::sequence::total_secs(&self.sequence)
    }

    pub fn remaining_in_phase(&self) -> u32 {
        self.remaining_in_phase
    }

    /// index of the current phase within the sequence. once finished it
    /// stays on the last phase.
    pub fn phase_index(&self) -> usize {
        self.current
    }

    pub fn sequence(&self) -> &[Phase] {
        &self.sequence
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    pub fn has_started(&self) -> bool {
        self.status != SessionStatus::NotStarted
    }
}
