use std::cell::{Ref, RefCell};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::engine::{SharedEngine, TweenEngine};
use crate::config::PageConfig;
use crate::float::IdleFloats;
use crate::foundation::error::{ReelError, ReelResult};
use crate::hero::sequencer::{TransitionSequencer, TriggerOutcome};
use crate::media::host::{MediaSlot, RecordingMediaHost};
use crate::media::preload::ReadyKey;
use crate::nav::audio::AudioToggle;
use crate::nav::scroll::NavBar;
use crate::reveal::ClipReveal;

/// Engine step used by [`PageSession::advance`] unless overridden.
pub const DEFAULT_STEP: Duration = Duration::from_millis(10);

/// Shared in-process media host.
pub type SessionMedia = Rc<RefCell<RecordingMediaHost>>;

/// One user or platform input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum PageInput {
    /// The hero thumbnail was clicked.
    Click,
    /// A media element reported its data as buffered.
    MediaReady {
        /// Element that signalled.
        slot: MediaSlot,
        /// Clip it had loaded; normalized onto the cycle.
        index: i64,
    },
    /// The page scrolled to offset `y`.
    Scroll {
        /// Vertical scroll offset (pixels).
        y: f64,
    },
    /// The nav bar's audio button was pressed.
    ToggleAudio,
    /// The page unmounted.
    Teardown,
}

/// An input scheduled at an absolute session time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    /// Session time of the input (milliseconds).
    pub at_ms: u64,
    /// The input.
    pub input: PageInput,
}

impl ScriptStep {
    /// Session time of the input.
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// A JSON list of timestamped inputs.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Script {
    /// Steps in time order.
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let script: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse script JSON: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| ReelError::config(format!("open script '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Steps must not go back in time.
    pub fn validate(&self) -> ReelResult<()> {
        for (i, pair) in self.steps.windows(2).enumerate() {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(ReelError::validation(format!(
                    "script step {} at {} ms comes before step {} at {} ms",
                    i + 1,
                    pair[1].at_ms,
                    i,
                    pair[0].at_ms
                )));
            }
        }
        Ok(())
    }
}

/// The whole interactive page driven by a deterministic clock.
///
/// Every component animates through one [`SharedEngine`] and talks to one recording media host,
/// so a session can be replayed from a [`Script`] and inspected with
/// [`PageView::capture`](crate::view::PageView::capture).
pub struct PageSession {
    config: PageConfig,
    engine: SharedEngine,
    media: SessionMedia,
    hero: TransitionSequencer<SharedEngine, SessionMedia>,
    nav: NavBar<SharedEngine>,
    audio: AudioToggle,
    reveals: Vec<ClipReveal>,
    floats: IdleFloats<SharedEngine>,
    step: Duration,
    torn_down: bool,
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("now", &self.now())
            .field("hero", &self.hero)
            .field("nav", &self.nav)
            .field("audio", &self.audio)
            .field("floats", &self.floats)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl PageSession {
    /// Mount the page on a fresh engine.
    pub fn new(config: PageConfig) -> ReelResult<Self> {
        let engine = TweenEngine::new(config.viewport);
        Self::with_engine(config, engine)
    }

    /// Mount the page on a caller-provided engine.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn with_engine(config: PageConfig, engine: TweenEngine) -> ReelResult<Self> {
        config.validate()?;
        let viewport = config.viewport;
        let engine = SharedEngine::new(engine);
        let media = SessionMedia::default();

        let hero = TransitionSequencer::new(
            config.hero.clone(),
            viewport,
            engine.clone(),
            media.clone(),
        )?;
        let nav = NavBar::new(config.nav.clone(), viewport, engine.clone());
        let audio = AudioToggle::new(&config.nav);
        audio.attach(&mut *media.borrow_mut());
        let reveals = config
            .reveals
            .iter()
            .cloned()
            .map(ClipReveal::new)
            .collect::<ReelResult<Vec<_>>>()?;
        let mut floats = IdleFloats::new(config.floats.clone(), viewport, engine.clone());
        let floating = floats.start();

        tracing::debug!(
            clips = config.hero.clip_count,
            reveals = reveals.len(),
            floating,
            "page mounted"
        );
        Ok(Self {
            config,
            engine,
            media,
            hero,
            nav,
            audio,
            reveals,
            floats,
            step: DEFAULT_STEP,
            torn_down: false,
        })
    }

    /// Use a different engine step for [`PageSession::advance`].
    pub fn with_step(mut self, step: Duration) -> ReelResult<Self> {
        if step.is_zero() {
            return Err(ReelError::config("session step must be > 0"));
        }
        self.step = step;
        Ok(self)
    }

    /// Page configuration.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Session clock.
    pub fn now(&self) -> Duration {
        self.engine.now()
    }

    /// The shared engine.
    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    /// The media host's recorded state.
    pub fn media(&self) -> Ref<'_, RecordingMediaHost> {
        self.media.borrow()
    }

    /// The hero sequencer.
    pub fn hero(&self) -> &TransitionSequencer<SharedEngine, SessionMedia> {
        &self.hero
    }

    /// Mutable access to the hero sequencer, e.g. to subscribe.
    pub fn hero_mut(&mut self) -> &mut TransitionSequencer<SharedEngine, SessionMedia> {
        &mut self.hero
    }

    /// The navigation bar.
    pub fn nav(&self) -> &NavBar<SharedEngine> {
        &self.nav
    }

    /// The audio toggle.
    pub fn audio(&self) -> &AudioToggle {
        &self.audio
    }

    /// Scroll reveals in page order.
    pub fn reveals(&self) -> &[ClipReveal] {
        &self.reveals
    }

    /// The about section's idle floats.
    pub fn floats(&self) -> &IdleFloats<SharedEngine> {
        &self.floats
    }

    /// Whether [`PageInput::Teardown`] was applied.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Run the clock forward by `dt` in engine steps.
    pub fn advance(&mut self, dt: Duration) {
        let mut remaining = dt;
        while !remaining.is_zero() {
            let step = remaining.min(self.step);
            self.tick(step);
            remaining -= step;
        }
    }

    /// Run the clock forward to absolute time `at`; earlier times are a no-op.
    pub fn advance_to(&mut self, at: Duration) {
        let now = self.now();
        if at > now {
            self.advance(at - now);
        }
    }

    fn tick(&mut self, dt: Duration) {
        let events = self.engine.tick(dt);
        let now = self.engine.now();
        for event in events {
            self.hero.on_tween_event(event, now);
        }
        self.hero.poll(now);
        for reveal in &mut self.reveals {
            reveal.advance(dt);
        }
    }

    /// Apply one input at the current time. Clicks report what happened to the trigger.
    #[tracing::instrument(level = "debug", skip(self), fields(now = ?self.now()))]
    pub fn apply(&mut self, input: &PageInput) -> Option<TriggerOutcome> {
        if self.torn_down {
            tracing::debug!("page unmounted; input ignored");
            return None;
        }
        match *input {
            PageInput::Click => return Some(self.hero.on_preview_activated(self.now())),
            PageInput::MediaReady { slot, index } => {
                let index = self.hero.catalog().normalize(index);
                self.hero.on_media_ready(ReadyKey { slot, index });
            }
            PageInput::Scroll { y } => {
                self.nav.on_scroll(y);
                for reveal in &mut self.reveals {
                    reveal.on_scroll(y);
                }
            }
            PageInput::ToggleAudio => {
                self.audio.toggle(&mut *self.media.borrow_mut());
            }
            PageInput::Teardown => self.teardown(),
        }
        None
    }

    fn teardown(&mut self) {
        self.hero.teardown();
        self.nav.teardown();
        self.floats.teardown();
        if self.audio.is_playing() {
            self.audio.toggle(&mut *self.media.borrow_mut());
        }
        self.torn_down = true;
        tracing::debug!("page unmounted");
    }

    /// Replay `script`, calling `each` after every applied step.
    pub fn replay(
        &mut self,
        script: &Script,
        mut each: impl FnMut(&ScriptStep, Option<TriggerOutcome>, &Self),
    ) {
        for step in &script.steps {
            self.advance_to(step.at());
            let outcome = self.apply(&step.input);
            each(step, outcome, self);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
