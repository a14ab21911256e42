mod engine;
mod scheduler;
mod table;
pub mod variants;

pub use engine::{TimerEngine, TimerState};
pub use scheduler::{Advance, NextEvent, NextEventKind, ThresholdScheduler};
pub use table::{
    CueId, CycleMode, DeductionRule, ElapsedSeconds, Threshold, ThresholdTable, TimeFormat,
    TimerVariant,
};
pub use variants::{builtin_variants, variant_by_id};
