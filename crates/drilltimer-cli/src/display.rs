//! Terminal status line.

use drilltimer_core::storage::DisplayConfig;
use drilltimer_core::{CueId, NextEvent, NextEventKind, ThresholdScheduler, TimerState};

/// One line describing where the timer stands, e.g.
/// `Fall Timer  42s  -0.3  Next bell in 18s`.
pub fn status_line(
    scheduler: &ThresholdScheduler,
    state: TimerState,
    elapsed: u64,
    cfg: &DisplayConfig,
) -> String {
    let variant = scheduler.variant();
    let mut parts = vec![
        variant.name.clone(),
        variant.time_format().format(elapsed),
    ];

    if cfg.show_deduction {
        let label = scheduler.deduction_label(elapsed);
        if !label.is_empty() {
            parts.push(label.to_string());
        }
    }

    match state {
        TimerState::Running if cfg.show_next_event => {
            parts.push(next_event_text(scheduler.next_event_in(elapsed)));
        }
        TimerState::Running => {}
        TimerState::Idle => parts.push("stopped".into()),
    }

    parts.join("  ")
}

pub fn next_event_text(next: NextEvent) -> String {
    let what = match next.kind {
        NextEventKind::Cue(CueId::Bell) => "Next bell in",
        NextEventKind::Cue(CueId::Tone) => "Next ding in",
        NextEventKind::Stop => "Resets in",
        NextEventKind::Wrap => "Cycle restarts in",
    };
    format!("{what} {}s", next.in_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drilltimer_core::timer::variants::{fall, luft_orgs};

    #[test]
    fn fall_line_shows_deduction_and_reset() {
        let s = ThresholdScheduler::new(fall().unwrap());
        let line = status_line(&s, TimerState::Running, 75, &DisplayConfig::default());
        assert_eq!(line, "Fall Timer  75s  Terminate  Resets in 45s");
    }

    #[test]
    fn fall_line_before_first_band() {
        let s = ThresholdScheduler::new(fall().unwrap());
        let line = status_line(&s, TimerState::Running, 5, &DisplayConfig::default());
        assert_eq!(line, "Fall Timer  5s  Next ding in 5s");
    }

    #[test]
    fn luft_orgs_uses_clock_format() {
        let s = ThresholdScheduler::new(luft_orgs().unwrap());
        let line = status_line(&s, TimerState::Running, 140, &DisplayConfig::default());
        assert_eq!(line, "Luft Orgs Timer  00:02:20  Next bell in 5s");
    }

    #[test]
    fn hidden_sections() {
        let s = ThresholdScheduler::new(fall().unwrap());
        let cfg = DisplayConfig {
            show_next_event: false,
            show_deduction: false,
        };
        assert_eq!(
            status_line(&s, TimerState::Running, 45, &cfg),
            "Fall Timer  45s"
        );
        assert_eq!(
            status_line(&s, TimerState::Idle, 0, &cfg),
            "Fall Timer  0s  stopped"
        );
    }
}
