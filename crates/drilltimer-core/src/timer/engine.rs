//! Timer engine implementation.
//!
//! The engine is the tick driver around a [`ThresholdScheduler`]. It does not
//! use internal threads - the caller is responsible for calling `tick()` once
//! per second while the timer runs.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle   (stop, or ceiling reached in absolute variants)
//! ```
//!
//! Leaving `Running` always resets elapsed seconds to 0.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(variant);
//! engine.start();
//! // Once per second:
//! if let Some(event) = engine.tick() { player.handle_event(&event); }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::scheduler::ThresholdScheduler;
use super::table::{ElapsedSeconds, TimerVariant};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    scheduler: ThresholdScheduler,
    state: TimerState,
    elapsed: ElapsedSeconds,
}

impl TimerEngine {
    /// Create an idle engine at 0 seconds.
    pub fn new(variant: TimerVariant) -> Self {
        Self {
            scheduler: ThresholdScheduler::new(variant),
            state: TimerState::Idle,
            elapsed: ElapsedSeconds::ZERO,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn elapsed(&self) -> ElapsedSeconds {
        self.elapsed
    }

    pub fn scheduler(&self) -> &ThresholdScheduler {
        &self.scheduler
    }

    pub fn variant(&self) -> &TimerVariant {
        self.scheduler.variant()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        self.scheduler.snapshot(self.state, self.elapsed.get())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                tracing::info!(variant = %self.variant().id, "timer started");
                Some(Event::TimerStarted {
                    variant: self.variant().id.clone(),
                    at: Utc::now(),
                })
            }
            TimerState::Running => None, // Already running.
        }
    }

    /// Stop and reset to 0.
    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                let elapsed_secs = self.elapsed.get();
                self.state = TimerState::Idle;
                self.elapsed = ElapsedSeconds::ZERO;
                tracing::info!(variant = %self.variant().id, elapsed_secs, "timer stopped");
                Some(Event::TimerStopped {
                    elapsed_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Idle => None,
        }
    }

    /// Single start/stop control.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => self.start(),
            TimerState::Running => self.stop(),
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.elapsed = ElapsedSeconds::ZERO;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Call once per second. Returns the cue or auto-stop produced by this tick.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }

        self.elapsed = self.elapsed.next();
        let elapsed_secs = self.elapsed.get();
        let advance = self.scheduler.advance(elapsed_secs);

        if advance.terminal {
            self.state = TimerState::Idle;
            self.elapsed = ElapsedSeconds::ZERO;
            tracing::info!(variant = %self.variant().id, elapsed_secs, "ceiling reached, timer reset");
            return Some(Event::TimerFinished {
                variant: self.variant().id.clone(),
                elapsed_secs,
                at: Utc::now(),
            });
        }

        let cue = advance.cue?;
        tracing::debug!(%cue, elapsed_secs, "cue");
        Some(Event::CueFired {
            cue,
            elapsed_secs,
            phase_secs: self.scheduler.phase(elapsed_secs),
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::table::CueId;
    use crate::timer::variants::{fall, luft_orgs};

    fn run_ticks(engine: &mut TimerEngine, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| engine.tick()).collect()
    }

    #[test]
    fn start_stop_toggle() {
        let mut engine = TimerEngine::new(fall().unwrap());
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        assert_eq!(engine.state(), TimerState::Running);

        assert!(engine.toggle().is_some());
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.stop().is_none());

        engine.toggle();
        assert!(engine.is_running());
    }

    #[test]
    fn tick_is_ignored_while_idle() {
        let mut engine = TimerEngine::new(fall().unwrap());
        assert!(engine.tick().is_none());
        assert_eq!(engine.elapsed().get(), 0);
    }

    #[test]
    fn stop_resets_elapsed() {
        let mut engine = TimerEngine::new(fall().unwrap());
        engine.start();
        run_ticks(&mut engine, 42);
        match engine.stop() {
            Some(Event::TimerStopped { elapsed_secs, .. }) => assert_eq!(elapsed_secs, 42),
            other => panic!("Expected TimerStopped, got {other:?}"),
        }
        assert_eq!(engine.elapsed().get(), 0);
    }

    #[test]
    fn fall_timer_full_run() {
        let mut engine = TimerEngine::new(fall().unwrap());
        engine.start();
        let events = run_ticks(&mut engine, 120);

        let cues: Vec<(CueId, u64)> = events
            .iter()
            .filter_map(|e| match e {
                Event::CueFired {
                    cue, elapsed_secs, ..
                } => Some((*cue, *elapsed_secs)),
                _ => None,
            })
            .collect();
        assert_eq!(
            cues,
            vec![
                (CueId::Tone, 10),
                (CueId::Tone, 20),
                (CueId::Bell, 30),
                (CueId::Bell, 60),
            ]
        );
        assert!(matches!(
            events.last(),
            Some(Event::TimerFinished {
                elapsed_secs: 120,
                ..
            })
        ));
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed().get(), 0);
    }

    #[test]
    fn luft_orgs_keeps_cycling() {
        let mut engine = TimerEngine::new(luft_orgs().unwrap());
        engine.start();
        let events = run_ticks(&mut engine, 150);
        let at: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                Event::CueFired { elapsed_secs, .. } => Some(*elapsed_secs),
                _ => None,
            })
            .collect();
        assert_eq!(at, vec![60, 70, 75, 135, 145, 150]);
        assert!(engine.is_running());
        assert_eq!(engine.elapsed().get(), 150);
    }

    #[test]
    fn snapshot_reports_deduction() {
        let mut engine = TimerEngine::new(fall().unwrap());
        engine.start();
        run_ticks(&mut engine, 30);
        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                elapsed_secs,
                display_time,
                deduction,
                terminate,
                next_event,
                ..
            } => {
                assert_eq!(state, TimerState::Running);
                assert_eq!(elapsed_secs, 30);
                assert_eq!(display_time, "30s");
                assert_eq!(deduction, "-0.3");
                assert!(!terminate);
                assert_eq!(next_event.in_secs, 30);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn reset_goes_to_zero() {
        let mut engine = TimerEngine::new(luft_orgs().unwrap());
        engine.start();
        run_ticks(&mut engine, 10);
        engine.reset();
        assert_eq!(engine.elapsed().get(), 0);
        assert_eq!(engine.state(), TimerState::Idle);
    }
}
