use std::collections::BTreeMap;

use crate::animation::timeline::{LayerId, Timeline};
use crate::float::FloatLayer;
use crate::foundation::core::{Rect, Size};
use crate::hero::layers::HERO_LAYER_PREFIX;
use crate::hero::sequencer::TransitionState;
use crate::media::host::{MediaSlot, SlotState};
use crate::nav::scroll::{NAV_LAYER, NavMode};
use crate::session::PageSession;

/// One resolved layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerView {
    /// Layer name.
    pub layer: LayerId,
    /// Box on screen after scale and offset.
    pub rect: Rect,
    /// Stacking order.
    pub z_index: i32,
    /// Visibility.
    pub visible: bool,
    /// Opacity.
    pub opacity: f64,
}

/// The navigation bar as drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NavView {
    /// Visibility treatment.
    pub mode: NavMode,
    /// Current vertical offset.
    pub y: f64,
    /// Current opacity.
    pub opacity: f64,
    /// Whether the audio loop plays.
    pub audio_playing: bool,
    /// Whether the equalizer bars animate.
    pub indicator_active: bool,
}

/// One scroll reveal as drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealView {
    /// Element name.
    pub name: String,
    /// Displayed progress.
    pub progress: f64,
    /// CSS `clip-path`.
    pub clip_path: String,
    /// CSS `border-radius`.
    pub border_radius: String,
    /// Element box, when the reveal resizes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Pin translation.
    pub pin_offset: f64,
}

/// An idle float's current drift.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FloatView {
    /// Element.
    pub layer: FloatLayer,
    /// Vertical offset from rest.
    pub y: f64,
}

/// Read-only snapshot of everything a renderer needs.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageView {
    /// Session time (milliseconds).
    pub at_ms: u128,
    /// Whether the loading indicator shows.
    pub loading: bool,
    /// Distinct ready signals counted.
    pub loaded: u32,
    /// Hero indices.
    pub hero: TransitionState,
    /// Media slot sources and playback.
    pub media: BTreeMap<MediaSlot, SlotState>,
    /// Hero layers, bottom to top.
    pub layers: Vec<LayerView>,
    /// Navigation bar.
    pub nav: NavView,
    /// Scroll reveals in page order.
    pub reveals: Vec<RevealView>,
    /// Idle floats.
    pub floats: Vec<FloatView>,
}

impl PageView {
    /// Snapshot `session` at its current time.
    pub fn capture(session: &PageSession) -> Self {
        let viewport = session.config().viewport;
        let (mut layers, nav_style, floats) = session.engine().with(|engine| {
            let nav = engine
                .layers()
                .find(|(id, _)| *id == NAV_LAYER)
                .map(|(_, style)| style);
            let floats: Vec<FloatView> = FloatLayer::ALL
                .into_iter()
                .filter_map(|layer| {
                    let y = engine.style(layer.id())?.y;
                    Some(FloatView { layer, y })
                })
                .collect();
            let layers: Vec<LayerView> = engine
                .layers()
                .filter(|(id, _)| id.0.starts_with(HERO_LAYER_PREFIX))
                .map(|(layer, style)| LayerView {
                    layer,
                    rect: style.rect(viewport),
                    z_index: style.z_index,
                    visible: style.visible,
                    opacity: style.opacity,
                })
                .collect();
            (layers, nav, floats)
        });
        layers.sort_by_key(|l| l.z_index);

        let host = session.media();
        let media: BTreeMap<MediaSlot, SlotState> = [
            MediaSlot::Preview,
            MediaSlot::Incoming,
            MediaSlot::Backdrop,
            MediaSlot::AudioLoop,
        ]
        .into_iter()
        .map(|slot| (slot, host.slot(slot)))
        .collect();
        drop(host);

        let hero = session.hero();
        let audio = session.audio();
        let nav = NavView {
            mode: session.nav().state().mode(),
            y: nav_style.map_or(0.0, |s| s.y),
            opacity: nav_style.map_or(1.0, |s| s.opacity),
            audio_playing: audio.is_playing(),
            indicator_active: audio.indicator_active(),
        };

        let reveals = session
            .reveals()
            .iter()
            .map(|r| RevealView {
                name: r.config().name.clone(),
                progress: r.progress(),
                clip_path: r.clip().to_css(),
                border_radius: r.radius().to_css(),
                size: r.size(),
                pin_offset: r.pin_offset(),
            })
            .collect();

        Self {
            at_ms: session.now().as_millis(),
            loading: hero.is_loading(),
            loaded: hero.preload().loaded_count(),
            hero: hero.state(),
            media,
            layers,
            nav,
            reveals,
            floats,
        }
    }

    /// The topmost visible layer, i.e. what fills the hero.
    pub fn top_layer(&self) -> Option<&LayerView> {
        self.layers.iter().rev().find(|l| l.visible)
    }
}

#[cfg(test)]
#[path = "../tests/unit/view.rs"]
mod tests;
