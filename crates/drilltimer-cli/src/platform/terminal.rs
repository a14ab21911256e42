use std::io::Write;

use drilltimer_core::{CueId, CuePlayer};

/// Rings the terminal bell. Bells ring twice so the two cues stay distinguishable.
pub struct TerminalBellPlayer<W: Write> {
    out: W,
}

impl<W: Write> TerminalBellPlayer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CuePlayer for TerminalBellPlayer<W> {
    fn play_cue(&mut self, cue: CueId) {
        let bell: &[u8] = match cue {
            CueId::Bell => b"\x07\x07",
            CueId::Tone => b"\x07",
        };
        if let Err(e) = self.out.write_all(bell).and_then(|_| self.out.flush()) {
            tracing::warn!(%cue, error = %e, "terminal bell failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_twice_tone_once() {
        let mut player = TerminalBellPlayer::new(Vec::new());
        player.play_cue(CueId::Bell);
        player.play_cue(CueId::Tone);
        assert_eq!(player.into_inner(), b"\x07\x07\x07".to_vec());
    }
}
