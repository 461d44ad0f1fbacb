use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::animation::ease::Ease;
use crate::float::FloatConfig;
use crate::foundation::core::{Size, checked_secs, secs};
use crate::foundation::error::{ReelError, ReelResult};
use crate::media::catalog::MediaCatalog;
use crate::reveal::RevealConfig;

const DEFAULT_VIEWPORT: Size = Size::new(1440.0, 900.0);

/// Whole-page configuration.
///
/// Every field is optional in JSON; omitted fields reproduce the reference landing page. When
/// `reveals` is omitted the preset reveals are laid out for the parsed viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "PageConfigJson")]
pub struct PageConfig {
    /// Viewport used to resolve percentage lengths and reveal geometry.
    pub viewport: Size,
    /// Hero clip sequencer.
    pub hero: HeroConfig,
    /// Navigation bar.
    pub nav: NavConfig,
    /// Scroll-scrubbed reveals, in page order.
    pub reveals: Vec<RevealConfig>,
    /// Idle floats started at mount.
    pub floats: Vec<FloatConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfigJson::default().into()
    }
}

#[derive(serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PageConfigJson {
    viewport: Size,
    hero: HeroConfig,
    nav: NavConfig,
    reveals: Option<Vec<RevealConfig>>,
    floats: Vec<FloatConfig>,
}

impl Default for PageConfigJson {
    fn default() -> Self {
        Self {
            viewport: DEFAULT_VIEWPORT,
            hero: HeroConfig::default(),
            nav: NavConfig::default(),
            reveals: None,
            floats: FloatConfig::presets(),
        }
    }
}

impl From<PageConfigJson> for PageConfig {
    fn from(json: PageConfigJson) -> Self {
        let viewport = json.viewport;
        Self {
            viewport,
            hero: json.hero,
            nav: json.nav,
            reveals: json
                .reveals
                .unwrap_or_else(|| PageConfig::preset_reveals(viewport)),
            floats: json.floats,
        }
    }
}

impl PageConfig {
    /// The landing page's reveals laid out for `viewport`: the hero frame fold, then the about
    /// image two screens down.
    pub fn preset_reveals(viewport: Size) -> Vec<RevealConfig> {
        vec![
            RevealConfig::hero_frame(viewport),
            RevealConfig::about_clip(viewport, 2.0 * viewport.height),
        ]
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse page config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::config(format!("open page config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(ReelError::config("viewport width/height must be > 0"));
        }
        self.hero.validate()?;
        self.nav.validate()?;
        for (i, reveal) in self.reveals.iter().enumerate() {
            reveal
                .validate()
                .map_err(|e| ReelError::config(format!("reveals[{i}]: {e}")))?;
        }
        let mut layers = BTreeSet::new();
        for (i, float) in self.floats.iter().enumerate() {
            float
                .validate()
                .map_err(|e| ReelError::config(format!("floats[{i}]: {e}")))?;
            if !layers.insert(float.layer) {
                return Err(ReelError::config(format!(
                    "floats[{i}]: {:?} already floats",
                    float.layer
                )));
            }
        }
        Ok(())
    }
}

/// Hero clip sequencer settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Number of clips in the cycle.
    pub clip_count: u32,
    /// Source identifier template; `{index}` is replaced with the 1-based clip index.
    pub source_template: String,
    /// Incoming layer growth (seconds).
    pub phase_a_secs: f64,
    /// Thumbnail regrowth (seconds).
    pub phase_b_secs: f64,
    /// Hold after the thumbnail regrowth before another trigger is accepted (seconds).
    pub settle_secs: f64,
    /// Upper bound on one transition, measured from the trigger (seconds).
    pub stuck_timeout_secs: f64,
    /// Ease shared by both phases.
    pub ease: Ease,
    /// Authored thumbnail box.
    pub thumbnail: Size,
    /// Authored scale of the thumbnail clip inside its box.
    pub preview_scale: f64,
    /// Ready signals needed before triggers count; defaults to `clip_count - 1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preload_threshold: Option<u32>,
    /// Drop triggers until the preload gate opens.
    pub gate_on_ready: bool,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            clip_count: 4,
            source_template: "./videos/hero-{index}.mp4".to_owned(),
            phase_a_secs: 1.0,
            phase_b_secs: 1.5,
            settle_secs: 1.5,
            stuck_timeout_secs: 6.0,
            ease: Ease::InOutQuad,
            thumbnail: Size::new(256.0, 256.0),
            preview_scale: 1.5,
            preload_threshold: None,
            gate_on_ready: true,
        }
    }
}

impl HeroConfig {
    /// Check durations, geometry and the catalog shape.
    pub fn validate(&self) -> ReelResult<()> {
        self.catalog()
            .map_err(|e| ReelError::config(format!("hero: {e}")))?;
        let a = checked_secs("hero.phase_a_secs", self.phase_a_secs)?;
        let b = checked_secs("hero.phase_b_secs", self.phase_b_secs)?;
        let settle = checked_secs("hero.settle_secs", self.settle_secs)?;
        let timeout = checked_secs("hero.stuck_timeout_secs", self.stuck_timeout_secs)?;
        if timeout <= a.max(b + settle) {
            return Err(ReelError::config(format!(
                "hero.stuck_timeout_secs ({}) must exceed the longest phase plus settle ({})",
                self.stuck_timeout_secs,
                a.max(b + settle).as_secs_f64()
            )));
        }
        if !(self.thumbnail.width > 0.0 && self.thumbnail.height > 0.0) {
            return Err(ReelError::config("hero.thumbnail width/height must be > 0"));
        }
        if !(self.preview_scale.is_finite() && self.preview_scale > 0.0) {
            return Err(ReelError::config("hero.preview_scale must be finite and > 0"));
        }
        if self.preload_threshold == Some(0) {
            return Err(ReelError::config("hero.preload_threshold must be >= 1"));
        }
        Ok(())
    }

    /// Build the clip catalog.
    pub fn catalog(&self) -> ReelResult<MediaCatalog> {
        MediaCatalog::new(self.clip_count, self.source_template.clone())
    }

    /// Ready signals needed to open the preload gate; never less than 1.
    pub fn preload_threshold(&self) -> u32 {
        self.preload_threshold
            .unwrap_or_else(|| self.clip_count.saturating_sub(1))
            .max(1)
    }

    /// Phase A duration.
    pub fn phase_a(&self) -> Duration {
        secs(self.phase_a_secs)
    }

    /// Phase B duration.
    pub fn phase_b(&self) -> Duration {
        secs(self.phase_b_secs)
    }

    /// Settle delay.
    pub fn settle(&self) -> Duration {
        secs(self.settle_secs)
    }

    /// Stuck-transition timeout.
    pub fn stuck_timeout(&self) -> Duration {
        secs(self.stuck_timeout_secs)
    }
}

/// Navigation bar settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Show/hide tween duration (seconds).
    pub tween_secs: f64,
    /// Show/hide ease.
    pub ease: Ease,
    /// Vertical offset of the hidden bar (pixels).
    pub hidden_offset: f64,
    /// Bar height (pixels).
    pub height: f64,
    /// Audio loop source.
    pub audio_source: String,
    /// Number of equalizer bars in the audio indicator.
    pub indicator_bars: u32,
    /// Animation delay step between consecutive indicator bars (seconds).
    pub bar_delay_secs: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            tween_secs: 0.2,
            ease: Ease::OutQuad,
            hidden_offset: -100.0,
            height: 64.0,
            audio_source: "/audio/loop.mp3".to_owned(),
            indicator_bars: 4,
            bar_delay_secs: 0.1,
        }
    }
}

impl NavConfig {
    /// Check durations and geometry.
    pub fn validate(&self) -> ReelResult<()> {
        checked_secs("nav.tween_secs", self.tween_secs)?;
        checked_secs("nav.bar_delay_secs", self.bar_delay_secs)?;
        if !self.hidden_offset.is_finite() {
            return Err(ReelError::config("nav.hidden_offset must be finite"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ReelError::config("nav.height must be finite and > 0"));
        }
        if self.indicator_bars == 0 {
            return Err(ReelError::config("nav.indicator_bars must be >= 1"));
        }
        Ok(())
    }

    /// Show/hide tween duration.
    pub fn tween(&self) -> Duration {
        secs(self.tween_secs)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
