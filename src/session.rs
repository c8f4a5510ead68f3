use thiserror::Error;

pub const DEFAULT_WORK_SECS: u32 = 45;
pub const DEFAULT_REST_SECS: u32 = 90;
pub const DEFAULT_ROUNDS: u32 = 3;
pub const DEFAULT_COOL_DOWN_SECS: u32 = 300;

/// label used for the closing stretch phase
pub const COOL_DOWN_LABEL: &str = "Stretching";

/// errors surfaced by the session core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// the config could not produce a usable phase sequence
    #[error("invalid session config: {0}")]
    InvalidConfig(String),
    /// a lifecycle operation was called out of order
    #[error("invalid session state: {0}")]
    InvalidState(&'static str),
}

/// one warm-up movement with its own fixed duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmUpStep {
    pub label: String,
    pub duration_secs: u32,
}

impl WarmUpStep {
    pub fn new(label: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            label: label.into(),
            duration_secs,
        }
    }
}

/// everything needed to build one session's phase sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// circuit exercises in the order they are performed each round
    pub exercises: Vec<String>,
    pub work_secs: u32,
    pub rest_secs: u32,
    pub rounds: u32,
    /// warm-up steps performed once before the first round; may be empty
    pub warm_up: Vec<WarmUpStep>,
    pub cool_down_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exercises: Vec::new(),
            work_secs: DEFAULT_WORK_SECS,
            rest_secs: DEFAULT_REST_SECS,
            rounds: DEFAULT_ROUNDS,
            warm_up: default_warm_up(),
            cool_down_secs: DEFAULT_COOL_DOWN_SECS,
        }
    }
}

/// the standard warm-up routine a session opens with unless skipped
pub fn default_warm_up() -> Vec<WarmUpStep> {
    vec![
        WarmUpStep::new("Joint Mobility", 120),
        WarmUpStep::new("Cat-Cow", 60),
        WarmUpStep::new("Jumping Jacks", 60),
        WarmUpStep::new("Hip & Wrist Rotations", 60),
    ]
}
