//! Threshold scheduler.
//!
//! Maps a whole number of elapsed seconds to at most one cue plus a
//! terminal flag. The scheduler holds only its [`TimerVariant`]; every
//! method is a pure function of `(variant, elapsed)`.
//!
//! ```text
//! Absolute: cue if elapsed == threshold, terminal once elapsed >= ceiling
//! Modulo:   phase = elapsed % ceiling, cue if phase == threshold
//!           (or phase == 0 with a wrap cue), never terminal
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::engine::TimerState;
use super::table::{CueId, CycleMode, DeductionRule, TimerVariant};
use crate::events::Event;

/// Result of advancing to a new elapsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Advance {
    pub cue: Option<CueId>,
    /// The caller must reset elapsed to 0 and stop ticking.
    pub terminal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "cue", rename_all = "lowercase")]
pub enum NextEventKind {
    Cue(CueId),
    /// Absolute variant reaches its ceiling and stops.
    Stop,
    /// Modulo variant wraps without playing anything.
    Wrap,
}

/// Countdown to the next thing that will happen, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextEvent {
    /// Always strictly positive.
    pub in_secs: u64,
    pub kind: NextEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdScheduler {
    variant: TimerVariant,
}

impl ThresholdScheduler {
    pub fn new(variant: TimerVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> &TimerVariant {
        &self.variant
    }

    /// Position within the current cycle. Identity for absolute variants.
    pub fn phase(&self, elapsed: u64) -> u64 {
        match self.variant.mode() {
            CycleMode::Absolute => elapsed,
            CycleMode::Modulo => elapsed % self.variant.ceiling(),
        }
    }

    /// Evaluate the new elapsed value (previous + 1).
    pub fn advance(&self, elapsed: u64) -> Advance {
        let table = self.variant.table();
        match self.variant.mode() {
            CycleMode::Absolute => Advance {
                cue: table.cue_at(elapsed),
                terminal: elapsed >= self.variant.ceiling(),
            },
            CycleMode::Modulo => {
                let phase = self.phase(elapsed);
                // elapsed == 0 is the start of the run, not a wrap.
                let cue = if phase == 0 {
                    if elapsed > 0 {
                        self.variant.wrap_cue()
                    } else {
                        None
                    }
                } else {
                    table.cue_at(phase)
                };
                Advance {
                    cue,
                    terminal: false,
                }
            }
        }
    }

    pub fn next_event_in(&self, elapsed: u64) -> NextEvent {
        let ceiling = self.variant.ceiling();
        let table = self.variant.table();
        match self.variant.mode() {
            CycleMode::Absolute => {
                // At or past the ceiling the counter has already been reset.
                let pos = if elapsed >= ceiling { 0 } else { elapsed };
                match table.next_after(pos) {
                    Some(t) => NextEvent {
                        in_secs: t.second - pos,
                        kind: NextEventKind::Cue(t.cue),
                    },
                    None => NextEvent {
                        in_secs: ceiling - pos,
                        kind: NextEventKind::Stop,
                    },
                }
            }
            CycleMode::Modulo => {
                let phase = self.phase(elapsed);
                if let Some(t) = table.next_after(phase) {
                    return NextEvent {
                        in_secs: t.second - phase,
                        kind: NextEventKind::Cue(t.cue),
                    };
                }
                let to_wrap = ceiling - phase;
                match (self.variant.wrap_cue(), table.first()) {
                    (Some(cue), _) => NextEvent {
                        in_secs: to_wrap,
                        kind: NextEventKind::Cue(cue),
                    },
                    (None, Some(first)) => NextEvent {
                        in_secs: to_wrap + first.second,
                        kind: NextEventKind::Cue(first.cue),
                    },
                    (None, None) => NextEvent {
                        in_secs: to_wrap,
                        kind: NextEventKind::Wrap,
                    },
                }
            }
        }
    }

    /// Active deduction band: the rule with the greatest second <= position.
    pub fn deduction(&self, elapsed: u64) -> Option<&DeductionRule> {
        let phase = self.phase(elapsed);
        let rules = self.variant.deductions();
        let idx = rules.partition_point(|r| r.second <= phase);
        idx.checked_sub(1).map(|i| &rules[i])
    }

    /// Empty below the first rule and for variants without deductions.
    pub fn deduction_label(&self, elapsed: u64) -> &str {
        self.deduction(elapsed).map(|r| r.label.as_str()).unwrap_or("")
    }

    pub fn is_terminated(&self, elapsed: u64) -> bool {
        self.deduction(elapsed).is_some_and(|r| r.terminates)
    }

    /// Everything the display reads for one elapsed value.
    pub fn snapshot(&self, state: TimerState, elapsed: u64) -> Event {
        Event::StateSnapshot {
            variant: self.variant.id.clone(),
            state,
            elapsed_secs: elapsed,
            display_time: self.variant.time_format().format(elapsed),
            phase_secs: self.phase(elapsed),
            next_event: self.next_event_in(elapsed),
            deduction: self.deduction_label(elapsed).to_string(),
            terminate: self.is_terminated(elapsed),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::table::{Threshold, ThresholdTable};

    fn absolute() -> ThresholdScheduler {
        let table = ThresholdTable::new(vec![
            Threshold::new(10, CueId::Tone),
            Threshold::new(20, CueId::Tone),
            Threshold::new(30, CueId::Bell),
            Threshold::new(60, CueId::Bell),
        ])
        .unwrap();
        let variant = TimerVariant::new("abs", "Absolute", CycleMode::Absolute, 120, table)
            .unwrap()
            .with_deductions(vec![
                DeductionRule::new(30, "-0.3"),
                DeductionRule::terminating(60, "Terminate"),
            ])
            .unwrap();
        ThresholdScheduler::new(variant)
    }

    fn modulo(wrap: bool) -> ThresholdScheduler {
        let table = ThresholdTable::new(vec![
            Threshold::new(60, CueId::Bell),
            Threshold::new(70, CueId::Bell),
        ])
        .unwrap();
        let mut variant =
            TimerVariant::new("mod", "Modulo", CycleMode::Modulo, 75, table).unwrap();
        if wrap {
            variant = variant.with_wrap_cue(CueId::Bell).unwrap();
        }
        ThresholdScheduler::new(variant)
    }

    #[test]
    fn absolute_fires_at_exact_thresholds() {
        let s = absolute();
        let a = |cue| Advance { cue, terminal: false };
        assert_eq!(s.advance(10), a(Some(CueId::Tone)));
        assert_eq!(s.advance(20), a(Some(CueId::Tone)));
        assert_eq!(s.advance(30), a(Some(CueId::Bell)));
        assert_eq!(s.advance(60), a(Some(CueId::Bell)));
        assert_eq!(s.advance(11), a(None));
        assert_eq!(
            s.advance(120),
            Advance {
                cue: None,
                terminal: true
            }
        );
        assert!(s.advance(121).terminal);
    }

    #[test]
    fn modulo_fires_on_phase_and_wrap() {
        let s = modulo(true);
        assert_eq!(s.advance(60).cue, Some(CueId::Bell));
        assert_eq!(s.advance(70).cue, Some(CueId::Bell));
        assert_eq!(s.advance(75).cue, Some(CueId::Bell));
        assert_eq!(s.advance(76).cue, None);
        assert_eq!(s.advance(135).cue, Some(CueId::Bell));
        assert!(!s.advance(75).terminal);
    }

    #[test]
    fn modulo_start_is_not_a_wrap() {
        assert_eq!(modulo(true).advance(0).cue, None);
    }

    #[test]
    fn modulo_without_wrap_cue_is_silent_at_boundary() {
        assert_eq!(modulo(false).advance(75).cue, None);
    }

    #[test]
    fn next_event_absolute() {
        let s = absolute();
        assert_eq!(
            s.next_event_in(0),
            NextEvent {
                in_secs: 10,
                kind: NextEventKind::Cue(CueId::Tone)
            }
        );
        assert_eq!(s.next_event_in(10).in_secs, 10);
        assert_eq!(s.next_event_in(59).in_secs, 1);
        assert_eq!(
            s.next_event_in(60),
            NextEvent {
                in_secs: 60,
                kind: NextEventKind::Stop
            }
        );
        assert_eq!(s.next_event_in(119).in_secs, 1);
        assert_eq!(s.next_event_in(120).in_secs, 10);
    }

    #[test]
    fn next_event_modulo() {
        let s = modulo(true);
        assert_eq!(s.next_event_in(0).in_secs, 60);
        assert_eq!(s.next_event_in(65).in_secs, 5);
        assert_eq!(
            s.next_event_in(72),
            NextEvent {
                in_secs: 3,
                kind: NextEventKind::Cue(CueId::Bell)
            }
        );
        assert_eq!(s.next_event_in(75).in_secs, 60);

        let silent = modulo(false);
        assert_eq!(silent.next_event_in(72).in_secs, 3 + 60);
    }

    #[test]
    fn deduction_labels() {
        let s = absolute();
        assert_eq!(s.deduction_label(29), "");
        assert_eq!(s.deduction_label(30), "-0.3");
        assert_eq!(s.deduction_label(59), "-0.3");
        assert_eq!(s.deduction_label(60), "Terminate");
        assert!(!s.is_terminated(59));
        assert!(s.is_terminated(60));
    }

    #[test]
    fn deduction_empty_without_rules() {
        assert_eq!(modulo(true).deduction_label(70), "");
    }
}
