use crate::animation::props::{LayerStyle, Length, Props};
use crate::animation::timeline::{LayerId, ScopeId};
use crate::config::HeroConfig;
use crate::foundation::core::Size;

/// Name prefix shared by every hero layer.
pub const HERO_LAYER_PREFIX: &str = "hero.";

/// Clickable thumbnail showing the upcoming clip; the outgoing layer of a transition.
pub const PREVIEW_LAYER: LayerId = LayerId("hero.preview");
/// Layer growing from thumbnail size to full screen; the incoming layer of a transition.
pub const INCOMING_LAYER: LayerId = LayerId("hero.incoming");
/// Full-screen clip behind the transition.
pub const BACKDROP_LAYER: LayerId = LayerId("hero.backdrop");
/// Cleanup scope of every hero animation.
pub const HERO_SCOPE: ScopeId = ScopeId(1);

/// Stacking order of the incoming layer once it owns the screen.
pub const INCOMING_Z: i32 = 20;
/// Stacking order of the thumbnail floating over the hero.
pub const PREVIEW_Z: i32 = 50;
/// Stacking order of the outgoing layer while a transition runs.
pub const RAISED_PREVIEW_Z: i32 = PREVIEW_Z + 10;

/// Authored (pre-animation) style of every hero layer.
pub fn authored_styles(config: &HeroConfig, viewport: Size) -> [(LayerId, LayerStyle); 3] {
    [
        (
            PREVIEW_LAYER,
            LayerStyle {
                z_index: PREVIEW_Z,
                scale: config.preview_scale,
                ..LayerStyle::sized(config.thumbnail)
            },
        ),
        (
            INCOMING_LAYER,
            LayerStyle {
                z_index: INCOMING_Z,
                visible: false,
                ..LayerStyle::sized(config.thumbnail)
            },
        ),
        (BACKDROP_LAYER, LayerStyle::full(viewport)),
    ]
}

/// Immediate props applied when a transition begins: lift the outgoing layer, reveal the
/// incoming one.
pub(crate) fn lift_outgoing() -> Props {
    Props::new().z_index(RAISED_PREVIEW_Z)
}

pub(crate) fn reveal_incoming() -> Props {
    Props::new().visible(true)
}

/// Phase A target: the incoming layer covers the viewport at full scale.
pub(crate) fn incoming_cover() -> Props {
    Props::new()
        .scale(1.0)
        .width(Length::Percent(100.0))
        .height(Length::Percent(100.0))
}

/// Phase B endpoints: the outgoing thumbnail regrows from nothing.
pub(crate) fn outgoing_collapsed() -> Props {
    Props::new().scale(0.0)
}

pub(crate) fn outgoing_grown() -> Props {
    Props::new().scale(1.0)
}

/// Stacking order restored after Phase B.
pub(crate) fn incoming_on_top() -> Props {
    Props::new().z_index(INCOMING_Z)
}
