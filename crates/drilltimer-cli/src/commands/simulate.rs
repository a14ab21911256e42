use clap::Args;
use drilltimer_core::{variant_by_id, Event, TimerEngine};

#[derive(Args)]
pub struct SimulateArgs {
    /// Variant id
    variant: String,
    /// Number of ticks to simulate (defaults to one ceiling)
    #[arg(long)]
    until: Option<u64>,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::new(variant_by_id(&args.variant)?);
    let ticks = args.until.unwrap_or_else(|| engine.variant().ceiling());

    if let Some(event) = engine.start() {
        println!("{}", serde_json::to_string(&event)?);
    }

    let mut cues = 0usize;
    for _ in 0..ticks {
        let Some(event) = engine.tick() else {
            continue;
        };
        if event.cue().is_some() {
            cues += 1;
        }
        println!("{}", serde_json::to_string(&event)?);
        if matches!(event, Event::TimerFinished { .. }) {
            break;
        }
    }

    tracing::debug!(cues, "simulation done");
    Ok(())
}
