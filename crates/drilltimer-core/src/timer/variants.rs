//! Built-in timer variants.
//!
//! Each variant hard-codes its own threshold table; nothing here is
//! configurable at runtime.

use super::table::{
    CueId, CycleMode, DeductionRule, Threshold, ThresholdTable, TimeFormat, TimerVariant,
};
use crate::error::{CoreError, ValidationError};

pub const FALL: &str = "fall";
pub const FX: &str = "fx";
pub const LUFT_ORGS: &str = "luft-orgs";

/// Fall Timer: dings at 10s and 20s, bells at 30s (-0.3) and 60s (terminate),
/// auto-reset at 120s.
pub fn fall() -> Result<TimerVariant, ValidationError> {
    let table = ThresholdTable::new(vec![
        Threshold::new(10, CueId::Tone),
        Threshold::new(20, CueId::Tone),
        Threshold::new(30, CueId::Bell),
        Threshold::new(60, CueId::Bell),
    ])?;
    TimerVariant::new(FALL, "Fall Timer", CycleMode::Absolute, 120, table)?
        .with_deductions(vec![
            DeductionRule::new(30, "-0.3"),
            DeductionRule::terminating(60, "Terminate"),
        ])
}

/// FX Timer: warning ding at 60s, time-limit bell at 70s, overtime afterwards.
pub fn fx() -> Result<TimerVariant, ValidationError> {
    let table = ThresholdTable::new(vec![
        Threshold::new(60, CueId::Tone),
        Threshold::new(70, CueId::Bell),
    ])?;
    TimerVariant::new(FX, "FX Timer", CycleMode::Absolute, 90, table)?
        .with_deductions(vec![DeductionRule::new(71, "-0.1 overtime")])
}

/// Luft Orgs Timer: bells at 60s, 70s and 75s of every 75-second cycle.
pub fn luft_orgs() -> Result<TimerVariant, ValidationError> {
    let table = ThresholdTable::new(vec![
        Threshold::new(60, CueId::Bell),
        Threshold::new(70, CueId::Bell),
        Threshold::new(75, CueId::Bell),
    ])?;
    Ok(
        TimerVariant::new(LUFT_ORGS, "Luft Orgs Timer", CycleMode::Modulo, 75, table)?
            .with_time_format(TimeFormat::Clock),
    )
}

pub fn builtin_variants() -> Result<Vec<TimerVariant>, ValidationError> {
    Ok(vec![fall()?, fx()?, luft_orgs()?])
}

pub fn variant_by_id(id: &str) -> Result<TimerVariant, CoreError> {
    let variant = match id {
        FALL => fall()?,
        FX => fx()?,
        LUFT_ORGS => luft_orgs()?,
        _ => {
            return Err(CoreError::UnknownVariant {
                id: id.to_string(),
                available: [FALL, FX, LUFT_ORGS].join(", "),
            })
        }
    };
    Ok(variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_valid() {
        let all = builtin_variants().unwrap();
        assert_eq!(all.len(), 3);
        for v in &all {
            assert_eq!(variant_by_id(&v.id).unwrap(), *v);
        }
    }

    #[test]
    fn unknown_variant_lists_available() {
        let err = variant_by_id("pommel").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pommel"));
        assert!(msg.contains("luft-orgs"));
    }

    #[test]
    fn describe_fall() {
        assert_eq!(
            fall().unwrap().describe(),
            "10s tone, 20s tone, 30s bell, 60s bell, auto-reset at 120s"
        );
    }

    #[test]
    fn describe_luft_orgs() {
        assert_eq!(
            luft_orgs().unwrap().describe(),
            "60s bell, 70s bell, 75s bell, repeats every 75s"
        );
    }
}
