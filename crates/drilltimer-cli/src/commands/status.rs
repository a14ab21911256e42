use clap::Args;
use drilltimer_core::{variant_by_id, CoreError, ElapsedSeconds, ThresholdScheduler, TimerState};

#[derive(Args)]
pub struct StatusArgs {
    /// Variant id
    variant: String,
    /// Elapsed seconds to evaluate
    #[arg(long, allow_negative_numbers = true)]
    elapsed: i64,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let elapsed = ElapsedSeconds::try_from(args.elapsed).map_err(CoreError::from)?;
    let scheduler = ThresholdScheduler::new(variant_by_id(&args.variant)?);
    let secs = elapsed.get();

    let output = serde_json::json!({
        "advance": scheduler.advance(secs),
        "snapshot": scheduler.snapshot(TimerState::Running, secs),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
