//! Threshold tables and the per-variant value object.
//!
//! A [`TimerVariant`] bundles everything the scheduler needs:
//! thresholds, ceiling, cycle mode, an optional wrap cue and optional
//! deduction rules. All invariants are checked on construction, so the
//! scheduler never has to re-validate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Audible cue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueId {
    /// Sampled bell / gong sound.
    Bell,
    /// Short synthesized sine ding.
    Tone,
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueId::Bell => f.write_str("bell"),
            CueId::Tone => f.write_str("tone"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub second: u64,
    pub cue: CueId,
}

impl Threshold {
    pub const fn new(second: u64, cue: CueId) -> Self {
        Self { second, cue }
    }
}

/// Ordered thresholds with distinct, strictly ascending seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    thresholds: Vec<Threshold>,
}

impl ThresholdTable {
    /// Build a table, rejecting duplicate or out-of-order seconds.
    pub fn new(thresholds: Vec<Threshold>) -> Result<Self, ValidationError> {
        ensure_ascending("threshold", thresholds.iter().map(|t| t.second))?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn first(&self) -> Option<&Threshold> {
        self.thresholds.first()
    }

    /// Cue configured at exactly `second`.
    pub fn cue_at(&self, second: u64) -> Option<CueId> {
        self.thresholds
            .binary_search_by_key(&second, |t| t.second)
            .ok()
            .map(|i| self.thresholds[i].cue)
    }

    /// First threshold strictly after `second`.
    pub fn next_after(&self, second: u64) -> Option<&Threshold> {
        let idx = self.thresholds.partition_point(|t| t.second <= second);
        self.thresholds.get(idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleMode {
    /// Thresholds fire once; the timer stops at the ceiling.
    Absolute,
    /// Thresholds repeat every `ceiling` seconds.
    Modulo,
}

impl fmt::Display for CycleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleMode::Absolute => f.write_str("absolute"),
            CycleMode::Modulo => f.write_str("modulo"),
        }
    }
}

/// Scoring band: active from `second` until the next rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    pub second: u64,
    pub label: String,
    /// Marks the band in which the attempt is terminated.
    #[serde(default)]
    pub terminates: bool,
}

impl DeductionRule {
    pub fn new(second: u64, label: impl Into<String>) -> Self {
        Self {
            second,
            label: label.into(),
            terminates: false,
        }
    }

    pub fn terminating(second: u64, label: impl Into<String>) -> Self {
        Self {
            terminates: true,
            ..Self::new(second, label)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// `42s`
    #[default]
    Seconds,
    /// `HH:MM:SS`
    Clock,
}

impl TimeFormat {
    pub fn format(self, total_secs: u64) -> String {
        match self {
            TimeFormat::Seconds => format!("{total_secs}s"),
            TimeFormat::Clock => {
                let hours = total_secs / 3600;
                let minutes = (total_secs % 3600) / 60;
                let secs = total_secs % 60;
                format!("{hours:02}:{minutes:02}:{secs:02}")
            }
        }
    }
}

/// One timer variant: a threshold table plus how it is cycled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerVariant {
    pub id: String,
    pub name: String,
    mode: CycleMode,
    ceiling: u64,
    table: ThresholdTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    wrap_cue: Option<CueId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    deductions: Vec<DeductionRule>,
    time_format: TimeFormat,
}

impl TimerVariant {
    /// Create a variant.
    ///
    /// Absolute thresholds must lie in `1..ceiling`. Modulo thresholds may
    /// also sit at `0` or `ceiling`: both name the wrap point and become the
    /// variant's wrap cue.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mode: CycleMode,
        ceiling: u64,
        table: ThresholdTable,
    ) -> Result<Self, ValidationError> {
        if ceiling == 0 {
            return Err(ValidationError::InvalidValue {
                field: "ceiling".into(),
                message: "must be greater than zero".into(),
            });
        }

        let out_of_range = |t: &Threshold| ValidationError::ThresholdOutOfRange {
            second: t.second,
            ceiling,
            mode: mode.to_string(),
        };
        let mut wrap_cue = None;
        let mut inner = Vec::with_capacity(table.len());
        for t in table.thresholds() {
            match mode {
                CycleMode::Absolute if t.second == 0 || t.second >= ceiling => {
                    return Err(out_of_range(t));
                }
                CycleMode::Modulo if t.second > ceiling => return Err(out_of_range(t)),
                CycleMode::Modulo if t.second == 0 || t.second == ceiling => {
                    wrap_cue = Some(merge_wrap_cue(wrap_cue, t.cue)?);
                }
                _ => inner.push(*t),
            }
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            mode,
            ceiling,
            table: ThresholdTable { thresholds: inner },
            wrap_cue,
            deductions: Vec::new(),
            time_format: TimeFormat::default(),
        })
    }

    /// Cue played when a modulo cycle wraps back to phase 0.
    ///
    /// Fails if the table already put a different cue at the wrap point.
    pub fn with_wrap_cue(mut self, cue: CueId) -> Result<Self, ValidationError> {
        if self.mode != CycleMode::Modulo {
            return Err(ValidationError::InvalidValue {
                field: "wrap_cue".into(),
                message: "only modulo variants wrap".into(),
            });
        }
        self.wrap_cue = Some(merge_wrap_cue(self.wrap_cue, cue)?);
        Ok(self)
    }

    pub fn with_deductions(mut self, rules: Vec<DeductionRule>) -> Result<Self, ValidationError> {
        ensure_ascending("deduction", rules.iter().map(|r| r.second))?;
        self.deductions = rules;
        Ok(self)
    }

    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    pub fn mode(&self) -> CycleMode {
        self.mode
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    pub fn wrap_cue(&self) -> Option<CueId> {
        self.wrap_cue
    }

    pub fn deductions(&self) -> &[DeductionRule] {
        &self.deductions
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// Human-readable cue summary, e.g. `10s tone, 20s tone, 30s bell`.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self
            .table
            .thresholds()
            .iter()
            .map(|t| format!("{}s {}", t.second, t.cue))
            .collect();
        match (self.mode, self.wrap_cue) {
            (CycleMode::Modulo, Some(cue)) => {
                parts.push(format!("{}s {cue}", self.ceiling));
                parts.push(format!("repeats every {}s", self.ceiling));
            }
            (CycleMode::Modulo, None) => parts.push(format!("repeats every {}s", self.ceiling)),
            (CycleMode::Absolute, _) => parts.push(format!("auto-reset at {}s", self.ceiling)),
        }
        parts.join(", ")
    }
}

fn merge_wrap_cue(current: Option<CueId>, cue: CueId) -> Result<CueId, ValidationError> {
    match current {
        Some(existing) if existing != cue => Err(ValidationError::InvalidValue {
            field: "wrap_cue".into(),
            message: format!("wrap point already plays {existing}, not {cue}"),
        }),
        _ => Ok(cue),
    }
}

/// Non-negative elapsed-seconds counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElapsedSeconds(u64);

impl ElapsedSeconds {
    pub const ZERO: Self = Self(0);

    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Value after one more tick.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u64> for ElapsedSeconds {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl From<ElapsedSeconds> for u64 {
    fn from(elapsed: ElapsedSeconds) -> Self {
        elapsed.0
    }
}

/// Signed input is where a negative count can sneak in; reject it here.
impl TryFrom<i64> for ElapsedSeconds {
    type Error = ValidationError;

    fn try_from(secs: i64) -> Result<Self, Self::Error> {
        u64::try_from(secs)
            .map(Self)
            .map_err(|_| ValidationError::InvalidValue {
                field: "elapsed_seconds".into(),
                message: format!("must not be negative (got {secs})"),
            })
    }
}

impl fmt::Display for ElapsedSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

fn ensure_ascending(
    collection: &str,
    seconds: impl Iterator<Item = u64>,
) -> Result<(), ValidationError> {
    let mut previous: Option<u64> = None;
    for second in seconds {
        if let Some(prev) = previous {
            if second <= prev {
                return Err(ValidationError::NotAscending {
                    collection: collection.into(),
                    previous: prev,
                    second,
                });
            }
        }
        previous = Some(second);
    }
    Ok(())
}
