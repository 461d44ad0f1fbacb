use std::time::Duration;

use crate::animation::timeline::{Timeline, Tween, TweenEvent, TweenId, TweenPhase};
use crate::config::HeroConfig;
use crate::foundation::core::Size;
use crate::foundation::error::ReelResult;
use crate::foundation::observe::{Observers, Subscription};
use crate::hero::layers::{self, HERO_SCOPE, INCOMING_LAYER, PREVIEW_LAYER};
use crate::media::catalog::{MediaCatalog, MediaIndex};
use crate::media::host::{MediaHost, MediaSlot};
use crate::media::preload::{PreloadGate, ReadyKey};

/// Which clip is live, which is queued, and whether a transition is running.
///
/// Whenever `in_progress` is `false`, `upcoming` is the successor of `current`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TransitionState {
    /// Clip playing full screen.
    pub current: MediaIndex,
    /// Clip shown in the thumbnail, next in line.
    pub upcoming: MediaIndex,
    /// `true` from an accepted trigger until the transition settles or times out.
    pub in_progress: bool,
}

/// What happened to a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerOutcome {
    /// A transition started.
    Accepted,
    /// A transition was already running; the input was discarded.
    DroppedInProgress,
    /// Media has not finished preloading; the input was discarded.
    DroppedNotReady,
}

/// Notification published by [`TransitionSequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeroEvent {
    /// A trigger was accepted and the indices advanced.
    TransitionStarted {
        /// State after the advance.
        state: TransitionState,
    },
    /// The transition finished its settle delay.
    TransitionSettled {
        /// State after clearing `in_progress`.
        state: TransitionState,
    },
    /// The transition exceeded its timeout and was force-cleared.
    TransitionTimedOut {
        /// State after clearing `in_progress`.
        state: TransitionState,
    },
    /// The preload gate opened.
    PreloadReady {
        /// Signals counted when it opened.
        loaded: u32,
    },
}

// Bookkeeping for the transition currently running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Pending {
    phase_a: Option<TweenId>,
    phase_b: Option<TweenId>,
    settle_at: Option<Duration>,
    deadline: Option<Duration>,
}

/// Cycles the hero through its clips with a two-phase crossfade.
///
/// One transition runs at a time. An accepted trigger advances the indices immediately, points
/// the media slots at their new clips and starts two concurrent tweens:
///
/// - Phase A grows the incoming layer from thumbnail size to cover the viewport; the incoming
///   clip starts playing when this tween reports [`TweenPhase::Started`].
/// - Phase B regrows the outgoing thumbnail from scale 0 over a longer duration. On completion
///   the thumbnail's transient props are cleared, the incoming layer goes back on top, and after
///   the settle delay `in_progress` clears.
///
/// Every transition is bounded by a timeout measured from its trigger, so a dropped completion
/// (or an engine that never starts the phases) cannot lock the sequencer. Nothing here returns
/// runtime errors: failures are logged and the page stays displayable.
pub struct TransitionSequencer<T: Timeline, M: MediaHost> {
    config: HeroConfig,
    catalog: MediaCatalog,
    state: TransitionState,
    preload: PreloadGate,
    pending: Pending,
    timeline: T,
    media: M,
    observers: Observers<HeroEvent>,
}

impl<T: Timeline, M: MediaHost> std::fmt::Debug for TransitionSequencer<T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionSequencer")
            .field("state", &self.state)
            .field("preload", &self.preload)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<T: Timeline, M: MediaHost> TransitionSequencer<T, M> {
    /// Start at clip 1 with clip 2 queued, register the hero layers and load the initial media.
    pub fn new(
        config: HeroConfig,
        viewport: Size,
        mut timeline: T,
        mut media: M,
    ) -> ReelResult<Self> {
        config.validate()?;
        let catalog = config.catalog()?;
        let preload = PreloadGate::new(config.preload_threshold());

        for (layer, style) in layers::authored_styles(&config, viewport) {
            timeline.register(layer, style);
        }

        let current = MediaIndex::FIRST;
        let state = TransitionState {
            current,
            upcoming: catalog.successor(current),
            in_progress: false,
        };

        media.set_source(MediaSlot::Preview, &catalog.source_of(state.upcoming));
        media.set_source(MediaSlot::Incoming, &catalog.source_of(state.current));
        media.set_source(MediaSlot::Backdrop, &catalog.source_of(state.current));
        media.play(MediaSlot::Backdrop);

        Ok(Self {
            config,
            catalog,
            state,
            preload,
            pending: Pending::default(),
            timeline,
            media,
            observers: Observers::new(),
        })
    }

    /// Current indices and flag.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// The preload gate.
    pub fn preload(&self) -> &PreloadGate {
        &self.preload
    }

    /// The loading indicator shows until the gate opens, indefinitely if it never does.
    pub fn is_loading(&self) -> bool {
        !self.preload.is_ready()
    }

    /// The clip catalog.
    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    /// The sequencer's settings.
    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    /// Borrow the timeline.
    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    /// Borrow the media host.
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Resource identifier of any integer index, normalized onto the cycle.
    pub fn resolve_media_source(&self, raw: i64) -> String {
        self.catalog.resolve_source(raw)
    }

    /// Subscribe to sequencer events.
    pub fn subscribe(&mut self, callback: impl Fn(&HeroEvent) + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    /// A media element finished buffering.
    pub fn on_media_ready(&mut self, key: ReadyKey) {
        if self.preload.on_media_ready(key) {
            let loaded = self.preload.loaded_count();
            tracing::info!(loaded, "hero media preloaded");
            self.observers.notify(&HeroEvent::PreloadReady { loaded });
        }
    }

    /// The thumbnail was activated at engine time `now`.
    #[tracing::instrument(level = "debug", skip(self), fields(current = %self.state.current))]
    pub fn on_preview_activated(&mut self, now: Duration) -> TriggerOutcome {
        if self.state.in_progress {
            tracing::debug!("transition running; trigger dropped");
            return TriggerOutcome::DroppedInProgress;
        }
        if self.config.gate_on_ready && !self.preload.is_ready() {
            tracing::debug!(
                loaded = self.preload.loaded_count(),
                "media still preloading; trigger dropped"
            );
            return TriggerOutcome::DroppedNotReady;
        }

        // Undo the previous transition's leftovers before animating again.
        self.timeline.revert_scope(HERO_SCOPE);

        self.state.current = self.state.upcoming;
        self.state.upcoming = self.catalog.successor(self.state.current);
        self.state.in_progress = true;
        self.pending = Pending {
            deadline: Some(now + self.config.stuck_timeout()),
            ..Pending::default()
        };

        let current_src = self.catalog.source_of(self.state.current);
        self.media.set_source(MediaSlot::Incoming, &current_src);
        self.media.set_source(MediaSlot::Backdrop, &current_src);
        self.media.play(MediaSlot::Backdrop);
        self.media.set_source(
            MediaSlot::Preview,
            &self.catalog.source_of(self.state.upcoming),
        );

        if let Err(err) = self.start_phases() {
            tracing::warn!(%err, "transition failed to start; waiting for timeout");
        }

        tracing::debug!(
            current = %self.state.current,
            upcoming = %self.state.upcoming,
            "transition started"
        );
        self.observers.notify(&HeroEvent::TransitionStarted { state: self.state });
        TriggerOutcome::Accepted
    }

    fn start_phases(&mut self) -> ReelResult<()> {
        self.timeline
            .set(HERO_SCOPE, PREVIEW_LAYER, &layers::lift_outgoing())?;
        self.timeline
            .set(HERO_SCOPE, INCOMING_LAYER, &layers::reveal_incoming())?;

        let ease = self.config.ease;
        self.pending.phase_a = Some(self.timeline.to(
            HERO_SCOPE,
            INCOMING_LAYER,
            &layers::incoming_cover(),
            Tween::new(self.config.phase_a(), ease),
        )?);
        self.pending.phase_b = Some(self.timeline.from_to(
            HERO_SCOPE,
            PREVIEW_LAYER,
            &layers::outgoing_collapsed(),
            &layers::outgoing_grown(),
            Tween::new(self.config.phase_b(), ease),
        )?);
        Ok(())
    }

    /// Route a timeline event. Returns `true` if the tween belonged to this sequencer.
    pub fn on_tween_event(&mut self, event: TweenEvent, now: Duration) -> bool {
        if Some(event.tween) == self.pending.phase_a {
            match event.phase {
                TweenPhase::Started => self.media.play(MediaSlot::Incoming),
                TweenPhase::Completed => self.pending.phase_a = None,
            }
            return true;
        }
        if Some(event.tween) == self.pending.phase_b {
            if event.phase == TweenPhase::Completed {
                self.pending.phase_b = None;
                self.finish_phase_b(now);
            }
            return true;
        }
        false
    }

    fn finish_phase_b(&mut self, now: Duration) {
        let reset = self
            .timeline
            .clear_props(HERO_SCOPE, PREVIEW_LAYER)
            .and_then(|()| {
                self.timeline
                    .set(HERO_SCOPE, INCOMING_LAYER, &layers::incoming_on_top())
            });
        if let Err(err) = reset {
            tracing::warn!(%err, "could not restore hero layers after phase B");
        }
        self.pending.settle_at = Some(now + self.config.settle());
    }

    /// Expire the settle delay or the stuck timeout at engine time `now`.
    pub fn poll(&mut self, now: Duration) {
        if !self.state.in_progress {
            return;
        }
        if self.pending.settle_at.is_some_and(|t| now >= t) {
            self.finish();
            self.observers.notify(&HeroEvent::TransitionSettled { state: self.state });
        } else if self.pending.deadline.is_some_and(|t| now >= t) {
            tracing::warn!(
                current = %self.state.current,
                timeout = ?self.config.stuck_timeout(),
                "transition never completed; forcing it clear"
            );
            self.timeline.revert_scope(HERO_SCOPE);
            self.finish();
            self.observers.notify(&HeroEvent::TransitionTimedOut { state: self.state });
        }
    }

    fn finish(&mut self) {
        self.state.in_progress = false;
        self.pending = Pending::default();
    }

    /// Revert every hero animation and stop the clips, as on unmount.
    pub fn teardown(&mut self) {
        self.timeline.revert_scope(HERO_SCOPE);
        self.finish();
        for slot in [MediaSlot::Preview, MediaSlot::Incoming, MediaSlot::Backdrop] {
            self.media.pause(slot);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hero/sequencer.rs"]
mod tests;
