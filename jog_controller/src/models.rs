use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a jog or of a relative move button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogDirection {
    Negative,
    Positive,
}

impl JogDirection {
    pub fn sign(self) -> i64 {
        match self {
            JogDirection::Negative => -1,
            JogDirection::Positive => 1,
        }
    }
}

impl fmt::Display for JogDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JogState {
    #[default]
    Idle,
    Jogging,
}

/// Motion parameters in counts, as entered on the jog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParameters {
    pub acceleration: i64,
    pub deceleration: i64,
    pub stop_deceleration: i64,
    pub smoothing: i64,
    pub speed: i64,
    pub dwell_time: i64,
}

impl Default for MotionParameters {
    fn default() -> Self {
        Self {
            acceleration: 1000,
            deceleration: 1000,
            stop_deceleration: 2000,
            smoothing: 50,
            speed: 500,
            dwell_time: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Absolute(i64),
    Relative(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Absolute,
    Relative,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Absolute => write!(f, "absolute"),
            MoveKind::Relative => write!(f, "relative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub target: MoveTarget,
    pub repeat: bool,
}

impl MoveRequest {
    pub fn kind(&self) -> MoveKind {
        match self.target {
            MoveTarget::Absolute(_) => MoveKind::Absolute,
            MoveTarget::Relative(_) => MoveKind::Relative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    Move(MoveRequest),
    Jog {
        direction: JogDirection,
        speed: i64,
    },
    Stop,
    ApplyParameters(MotionParameters),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusReadout {
    pub position: i64,
    pub velocity: i64,
    pub current: f64,
}

/// Message shown to the operator when an action could not be carried out
/// as requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    InvalidInput { field: String },
    RepeatUnsupported { kind: MoveKind },
    DispatchFailed { reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidInput { field } => {
                write!(f, "Enter a valid value for {}", field)
            }
            Notice::RepeatUnsupported { kind } => {
                write!(f, "Repeat {} moves are not supported yet", kind)
            }
            Notice::DispatchFailed { reason } => {
                write!(f, "Robot controller did not accept the command: {}", reason)
            }
        }
    }
}
