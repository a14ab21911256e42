//! Platform adapter traits.
//!
//! Audio output and keeping the display awake are collaborators of the
//! engine, not part of it. Implementations swallow and log their own
//! failures: a rejected playback or a denied wake lock must never stop the
//! next tick.

use crate::events::Event;
use crate::timer::{CueId, TimerState};

/// Plays audible cues.
pub trait CuePlayer {
    fn play_cue(&mut self, cue: CueId);

    /// Re-arm the output device. Called on every start/stop interaction.
    fn prepare(&mut self) {}

    /// Forward cue events; everything else is ignored.
    fn handle_event(&mut self, event: &Event) {
        if let Some(cue) = event.cue() {
            self.play_cue(cue);
        }
    }
}

/// Keeps the screen from sleeping while a timer runs.
pub trait WakeLock {
    /// Whether this platform can hold a wake lock at all.
    fn is_supported(&self) -> bool;

    fn is_held(&self) -> bool;

    fn acquire(&mut self);

    fn release(&mut self);

    /// Hold the lock exactly while the timer is running.
    fn follow(&mut self, state: TimerState) {
        match state {
            TimerState::Running if !self.is_held() => {
                if self.is_supported() {
                    self.acquire();
                } else {
                    tracing::debug!("wake lock not supported on this platform");
                }
            }
            TimerState::Idle if self.is_held() => self.release(),
            _ => {}
        }
    }
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCuePlayer;

impl CuePlayer for NullCuePlayer {
    fn play_cue(&mut self, cue: CueId) {
        tracing::trace!(%cue, "cue discarded");
    }
}

/// Remembers cues in order. Used by tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingCuePlayer {
    played: Vec<CueId>,
    prepared: usize,
}

impl RecordingCuePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &[CueId] {
        &self.played
    }

    pub fn prepare_count(&self) -> usize {
        self.prepared
    }
}

impl CuePlayer for RecordingCuePlayer {
    fn play_cue(&mut self, cue: CueId) {
        self.played.push(cue);
    }

    fn prepare(&mut self) {
        self.prepared += 1;
    }
}

/// Wake lock that is never supported.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWakeLock;

impl WakeLock for NullWakeLock {
    fn is_supported(&self) -> bool {
        false
    }

    fn is_held(&self) -> bool {
        false
    }

    fn acquire(&mut self) {}

    fn release(&mut self) {}
}
