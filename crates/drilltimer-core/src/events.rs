use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{CueId, NextEvent, TimerState};

/// Every state change of the engine produces an Event.
/// The driver forwards cue events to the cue player; the display reads snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        variant: String,
        at: DateTime<Utc>,
    },
    /// Manual stop. The counter is reset to 0.
    TimerStopped {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    CueFired {
        cue: CueId,
        elapsed_secs: u64,
        phase_secs: u64,
        at: DateTime<Utc>,
    },
    /// Absolute variant reached its ceiling and stopped itself.
    TimerFinished {
        variant: String,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        variant: String,
        state: TimerState,
        elapsed_secs: u64,
        display_time: String,
        phase_secs: u64,
        next_event: NextEvent,
        deduction: String,
        terminate: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Cue carried by this event, if any.
    pub fn cue(&self) -> Option<CueId> {
        match self {
            Event::CueFired { cue, .. } => Some(*cue),
            _ => None,
        }
    }
}
