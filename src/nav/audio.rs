use std::time::Duration;

use crate::config::NavConfig;
use crate::foundation::core::secs;
use crate::media::host::{MediaHost, MediaSlot};

/// Play/pause switch for the ambient audio loop and its equalizer indicator.
///
/// Playback and the indicator always flip together.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioToggle {
    source: String,
    playing: bool,
    indicator_active: bool,
    bars: u32,
    bar_delay: Duration,
}

impl AudioToggle {
    /// Paused, indicator off.
    pub fn new(config: &NavConfig) -> Self {
        Self {
            source: config.audio_source.clone(),
            playing: false,
            indicator_active: false,
            bars: config.indicator_bars,
            bar_delay: secs(config.bar_delay_secs),
        }
    }

    /// Point the audio element at the loop source.
    pub fn attach(&self, media: &mut impl MediaHost) {
        media.set_source(MediaSlot::AudioLoop, &self.source);
    }

    /// Flip playback and the indicator.
    pub fn toggle(&mut self, media: &mut impl MediaHost) -> bool {
        self.playing = !self.playing;
        self.indicator_active = !self.indicator_active;
        if self.playing {
            media.play(MediaSlot::AudioLoop);
        } else {
            media.pause(MediaSlot::AudioLoop);
        }
        tracing::debug!(playing = self.playing, "audio toggled");
        self.playing
    }

    /// Whether the loop is playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the equalizer bars animate.
    pub fn indicator_active(&self) -> bool {
        self.indicator_active
    }

    /// Animation delay of each indicator bar; bar `k` (1-based) waits `k` delay steps.
    pub fn bar_delays(&self) -> Vec<Duration> {
        (1..=self.bars).map(|k| self.bar_delay * k).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/audio.rs"]
mod tests;
