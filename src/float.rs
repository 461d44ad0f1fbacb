use std::time::Duration;

use crate::animation::ease::Ease;
use crate::animation::props::{LayerStyle, Props};
use crate::animation::timeline::{LayerId, ScopeId, Timeline, Tween};
use crate::foundation::core::{Size, checked_secs, secs};
use crate::foundation::error::{ReelError, ReelResult};

/// Stone artwork drifting over the about image.
pub const STONE_LAYER: LayerId = LayerId("about.stone");
/// The about image behind its clip reveal.
pub const ABOUT_IMAGE_LAYER: LayerId = LayerId("about.image");
/// Cleanup scope of the idle floats.
pub const FLOAT_SCOPE: ScopeId = ScopeId(3);

/// Stacking order of the stone, above the about image.
pub const STONE_Z: i32 = 50;

/// A decorative about-section element that bobs while the page is idle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FloatLayer {
    /// [`STONE_LAYER`].
    Stone,
    /// [`ABOUT_IMAGE_LAYER`].
    AboutImage,
}

impl FloatLayer {
    /// Every floatable element.
    pub const ALL: [Self; 2] = [Self::Stone, Self::AboutImage];

    /// Engine layer of this element.
    pub fn id(self) -> LayerId {
        match self {
            Self::Stone => STONE_LAYER,
            Self::AboutImage => ABOUT_IMAGE_LAYER,
        }
    }

    fn authored(self, viewport: Size) -> LayerStyle {
        match self {
            Self::Stone => LayerStyle {
                z_index: STONE_Z,
                ..LayerStyle::full(viewport)
            },
            Self::AboutImage => LayerStyle::full(viewport),
        }
    }
}

/// One endless vertical bob.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatConfig {
    /// Element that floats.
    pub layer: FloatLayer,
    /// Vertical travel of one pass (pixels, positive is down).
    pub offset: f64,
    /// Duration of one pass (seconds).
    pub period_secs: f64,
    /// Ease of every pass.
    #[serde(default)]
    pub ease: Ease,
}

impl FloatConfig {
    /// The stone: 40 px each second.
    pub fn stone() -> Self {
        Self {
            layer: FloatLayer::Stone,
            offset: 40.0,
            period_secs: 1.0,
            ease: Ease::InOutQuad,
        }
    }

    /// The about image: 20 px every two seconds.
    pub fn about_image() -> Self {
        Self {
            layer: FloatLayer::AboutImage,
            offset: 20.0,
            period_secs: 2.0,
            ease: Ease::InOutQuad,
        }
    }

    /// Both about-section floats.
    pub fn presets() -> Vec<Self> {
        vec![Self::stone(), Self::about_image()]
    }

    /// Check travel and period.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.offset.is_finite() {
            return Err(ReelError::validation(format!(
                "float {:?} offset must be finite",
                self.layer
            )));
        }
        if checked_secs("period_secs", self.period_secs)?.is_zero() {
            return Err(ReelError::validation(format!(
                "float {:?} period_secs must be > 0",
                self.layer
            )));
        }
        Ok(())
    }

    /// Duration of one pass.
    pub fn period(&self) -> Duration {
        secs(self.period_secs)
    }
}

/// The about section's idle motion: every configured element bobs forever until teardown.
pub struct IdleFloats<T: Timeline> {
    floats: Vec<FloatConfig>,
    timeline: T,
    running: bool,
}

impl<T: Timeline> std::fmt::Debug for IdleFloats<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdleFloats")
            .field("floats", &self.floats)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<T: Timeline> IdleFloats<T> {
    /// Register every float layer at rest.
    pub fn new(floats: Vec<FloatConfig>, viewport: Size, mut timeline: T) -> Self {
        for layer in FloatLayer::ALL {
            timeline.register(layer.id(), layer.authored(viewport));
        }
        Self {
            floats,
            timeline,
            running: false,
        }
    }

    /// Start every float. Returns how many started; a refused tween is logged and skipped.
    pub fn start(&mut self) -> usize {
        let mut started = 0;
        for float in &self.floats {
            let target = Props::new().y(float.offset);
            let tween = Tween::new(float.period(), float.ease).yoyo();
            match self.timeline.to(FLOAT_SCOPE, float.layer.id(), &target, tween) {
                Ok(_) => started += 1,
                Err(err) => {
                    tracing::warn!(%err, layer = ?float.layer, "idle float failed to start");
                }
            }
        }
        self.running = started > 0;
        started
    }

    /// Whether any float is animating.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop floating and put every element back at rest.
    pub fn teardown(&mut self) {
        self.timeline.revert_scope(FLOAT_SCOPE);
        self.running = false;
    }
}

#[cfg(test)]
#[path = "../tests/unit/float.rs"]
mod tests;
