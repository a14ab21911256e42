//! Native implementations of the core's platform adapters.

#[cfg(feature = "audio")]
mod audio;
mod terminal;
mod wake;

use drilltimer_core::storage::{AudioConfig, WakeLockConfig};
use drilltimer_core::{CuePlayer, NullCuePlayer, NullWakeLock, WakeLock};

pub use terminal::TerminalBellPlayer;
pub use wake::InhibitorWakeLock;

/// Pick the best cue player for this build and configuration.
pub fn cue_player(cfg: &AudioConfig, muted: bool) -> Box<dyn CuePlayer> {
    if muted || !cfg.enabled {
        return Box::new(NullCuePlayer);
    }

    #[cfg(feature = "audio")]
    {
        match audio::RodioCuePlayer::new(cfg) {
            Ok(player) => return Box::new(player),
            Err(e) => tracing::warn!(error = %e, "no audio output, falling back to terminal bell"),
        }
    }

    Box::new(TerminalBellPlayer::new(std::io::stderr()))
}

pub fn wake_lock(cfg: &WakeLockConfig, disabled: bool) -> Box<dyn WakeLock> {
    if disabled || !cfg.enabled {
        return Box::new(NullWakeLock);
    }
    Box::new(InhibitorWakeLock::new())
}
