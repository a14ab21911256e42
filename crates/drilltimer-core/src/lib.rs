//! # drilltimer Core Library
//!
//! Core logic for a family of interval timers that play audible cues at fixed
//! elapsed-time thresholds. The CLI binary is a thin shell over this crate:
//! it owns the real-time tick source and the native audio/wake-lock adapters.
//!
//! ## Architecture
//!
//! - **Threshold Scheduler**: a pure mapping from elapsed whole seconds to
//!   `{cue, terminal}` for one timer variant
//! - **Timer Engine**: the tick driver owning the elapsed counter; the caller
//!   invokes `tick()` once per second
//! - **Variants**: built-in threshold tables (Fall, FX, Luft Orgs)
//! - **Platform**: cue player and wake-lock traits implemented per target
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ThresholdScheduler`]: elapsed seconds → cue events
//! - [`TimerEngine`]: start/stop/reset/tick state machine
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod platform;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use platform::{CuePlayer, NullCuePlayer, NullWakeLock, RecordingCuePlayer, WakeLock};
pub use storage::Config;
pub use timer::{
    builtin_variants, variant_by_id, Advance, CueId, CycleMode, DeductionRule, ElapsedSeconds,
    NextEvent, NextEventKind, Threshold, ThresholdScheduler, ThresholdTable, TimeFormat,
    TimerEngine, TimerState, TimerVariant,
};
