use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::Args;
use drilltimer_core::{variant_by_id, Config, Event, TimerEngine};
use tokio::time::MissedTickBehavior;

use crate::display;
use crate::platform;

#[derive(Args)]
pub struct RunArgs {
    /// Variant id (defaults to `default_variant` from the config)
    variant: Option<String>,
    /// Start again after an auto-stop instead of exiting
    #[arg(long)]
    repeat: bool,
    /// Do not play cues
    #[arg(long)]
    mute: bool,
    /// Do not keep the display awake
    #[arg(long)]
    no_wake_lock: bool,
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let variant_id = args.variant.unwrap_or_else(|| config.default_variant.clone());
    let variant = variant_by_id(&variant_id)?;

    let mut player = platform::cue_player(&config.audio, args.mute);
    let mut wake = platform::wake_lock(&config.wake_lock, args.no_wake_lock);
    let mut engine = TimerEngine::new(variant);
    let interactive = std::io::stdout().is_terminal();

    eprintln!("{}: {} (Ctrl-C to stop)", engine.variant().name, engine.variant().describe());

    player.prepare();
    engine.start();
    wake.follow(engine.state());
    draw(&engine, &config, interactive)?;

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let event = engine.tick();
                if let Some(event) = &event {
                    player.handle_event(event);
                }
                if let Some(Event::TimerFinished { elapsed_secs, .. }) = event {
                    draw_at(&engine, &config, interactive, elapsed_secs)?;
                    if !args.repeat {
                        break;
                    }
                    player.prepare();
                    engine.start();
                    interval.reset();
                }
                wake.follow(engine.state());
                draw(&engine, &config, interactive)?;
            }
            signal = &mut ctrl_c => {
                if let Err(e) = signal {
                    tracing::warn!(error = %e, "ctrl-c handler failed");
                }
                engine.stop();
                break;
            }
        }
    }

    wake.follow(engine.state());
    if interactive {
        println!();
    }
    Ok(())
}

fn draw(
    engine: &TimerEngine,
    config: &Config,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    draw_at(engine, config, interactive, engine.elapsed().get())
}

/// `elapsed` is passed separately so the final second of an auto-stopped run
/// can be shown before the counter reads 0 again.
fn draw_at(
    engine: &TimerEngine,
    config: &Config,
    interactive: bool,
    elapsed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let line = display::status_line(engine.scheduler(), engine.state(), elapsed, &config.display);
    let mut out = std::io::stdout().lock();
    if interactive {
        write!(out, "\r{line}\x1b[K")?;
    } else {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
