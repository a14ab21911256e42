//! Native audio output using rodio.

use std::io::Cursor;
use std::time::Duration;

use drilltimer_core::storage::AudioConfig;
use drilltimer_core::{CueId, CuePlayer};
use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};

const TONE_GAIN: f32 = 0.3;
/// Gain the decay envelope ends at, relative to the start.
const DECAY_FLOOR: f32 = 0.01 / 0.3;
const ENVELOPE_STEP: Duration = Duration::from_millis(10);
const GONG_PARTIALS: [f32; 3] = [196.0, 392.0, 588.0];
const GONG_DURATION: Duration = Duration::from_millis(1800);

pub struct RodioCuePlayer {
    // Dropping the stream silences every sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
    bell_sample: Option<Vec<u8>>,
    tone_hz: f32,
    tone_duration: Duration,
}

impl RodioCuePlayer {
    pub fn new(cfg: &AudioConfig) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        let bell_sample = cfg.bell_sound.as_ref().and_then(|path| {
            std::fs::read(path)
                .map_err(|e| tracing::warn!(%path, error = %e, "bell sample unreadable, using synthesized gong"))
                .ok()
        });
        Ok(Self {
            _stream: stream,
            handle,
            volume: cfg.volume as f32 / 100.0,
            bell_sample,
            tone_hz: cfg.tone_frequency_hz as f32,
            tone_duration: Duration::from_millis(cfg.tone_duration_ms),
        })
    }

    fn play_tone(&self) -> Result<(), Box<dyn std::error::Error>> {
        let source = decaying(SineWave::new(self.tone_hz), self.tone_duration, TONE_GAIN * self.volume);
        self.handle.play_raw(source.convert_samples())?;
        Ok(())
    }

    fn play_bell(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.bell_sample {
            Some(bytes) => {
                // Restart from the beginning on every cue.
                let source = Decoder::new(Cursor::new(bytes.clone()))?.amplify(self.volume);
                self.handle.play_raw(source.convert_samples())?;
            }
            None => {
                let per_partial = TONE_GAIN * self.volume / GONG_PARTIALS.len() as f32;
                for hz in GONG_PARTIALS {
                    let source = decaying(SineWave::new(hz), GONG_DURATION, per_partial);
                    self.handle.play_raw(source.convert_samples())?;
                }
            }
        }
        Ok(())
    }
}

/// `source` limited to `duration`, gain ramping exponentially from `gain`
/// down to `gain * DECAY_FLOOR`.
fn decaying<S>(source: S, duration: Duration, gain: f32) -> impl Source<Item = f32> + Send
where
    S: Source<Item = f32> + Send + 'static,
{
    let total = duration.as_secs_f32().max(f32::EPSILON);
    let mut t = 0.0_f32;
    source
        .take_duration(duration)
        .amplify(gain)
        .periodic_access(ENVELOPE_STEP, move |src| {
            t += ENVELOPE_STEP.as_secs_f32();
            src.set_factor(gain * DECAY_FLOOR.powf((t / total).min(1.0)));
        })
}

impl CuePlayer for RodioCuePlayer {
    fn play_cue(&mut self, cue: CueId) {
        let result = match cue {
            CueId::Bell => self.play_bell(),
            CueId::Tone => self.play_tone(),
        };
        if let Err(e) = result {
            tracing::warn!(%cue, error = %e, "audio play error");
        }
    }

    fn prepare(&mut self) {
        // The sample is decoded per cue; validating it up front surfaces a bad
        // file on start instead of at the first bell.
        if let Some(bytes) = &self.bell_sample {
            if let Err(e) = Decoder::new(Cursor::new(bytes.clone())) {
                tracing::warn!(error = %e, "bell sample cannot be decoded, using synthesized gong");
                self.bell_sample = None;
            }
        }
    }
}
