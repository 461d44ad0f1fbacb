//! Hero-reel is the interactive state behind a media-heavy landing page.
//!
//! The crate owns the parts of such a page that carry real state:
//!
//! - the hero [`TransitionSequencer`], cycling through looping clips with a two-phase crossfade
//!   gated on a [`PreloadGate`],
//! - the scroll-driven [`NavBar`] visibility machine and its [`AudioToggle`],
//! - scroll-scrubbed [`ClipReveal`] animations and the about section's [`IdleFloats`].
//!
//! Rendering, layout and real media decoding stay outside. They are reached through the
//! [`Timeline`] and [`MediaHost`] traits, and [`TweenEngine`] / [`RecordingMediaHost`] provide
//! deterministic in-process implementations used by [`PageSession`], the CLI and the tests.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Easing, property patches, the timeline boundary and the in-process tween engine.
pub mod animation;
/// Page configuration loaded from JSON.
pub mod config;
/// Endless idle bobbing of decorative about-section layers.
pub mod float;
/// The hero clip sequencer.
pub mod hero;
/// Media catalog, preload gate and media element boundary.
pub mod media;
/// Navigation bar visibility and audio toggle.
pub mod nav;
/// Scroll-scrubbed clip-path reveals.
pub mod reveal;
/// Session driver and scripted input replay.
pub mod session;
/// Read-only presentation snapshots.
pub mod view;

pub use crate::foundation::core::{Point, Rect, Size, secs};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::foundation::observe::{Observers, Subscription};

pub use crate::animation::ease::Ease;
pub use crate::animation::engine::{SharedEngine, TweenEngine};
pub use crate::animation::props::{LayerStyle, Length, Props};
pub use crate::animation::timeline::{
    LayerId, ScopeId, Timeline, Tween, TweenEvent, TweenId, TweenPhase,
};
pub use crate::config::{HeroConfig, NavConfig, PageConfig};
pub use crate::float::{FloatConfig, FloatLayer, IdleFloats};
pub use crate::hero::sequencer::{HeroEvent, TransitionSequencer, TransitionState, TriggerOutcome};
pub use crate::media::catalog::{MediaCatalog, MediaIndex};
pub use crate::media::host::{MediaCall, MediaHost, MediaSlot, RecordingMediaHost};
pub use crate::media::preload::{PreloadGate, ReadyKey};
pub use crate::nav::audio::AudioToggle;
pub use crate::nav::scroll::{
    NavBar, NavChange, NavEvent, NavMode, NavState, ScrollVisibility, Visibility,
};
pub use crate::reveal::{ClipPolygon, ClipReveal, CornerRadii, RevealConfig};
pub use crate::session::{PageInput, PageSession, Script, ScriptStep};
pub use crate::view::{FloatView, PageView};
