use std::time::Duration;

use crate::animation::ease::Ease;
use crate::animation::props::{LayerStyle, Props};
use crate::foundation::core::progress;
use crate::foundation::error::ReelResult;

/// Stable name of an animated layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct LayerId(pub &'static str);

/// Cleanup scope; every tween and `set` belongs to exactly one scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ScopeId(pub u32);

/// Handle of a scheduled tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TweenId(pub u64);

/// Timing of a tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Duration of one pass.
    pub duration: Duration,
    /// Easing curve, applied to every pass.
    pub ease: Ease,
    /// Repeat forever, running every other pass backwards. A yoyo tween never completes; it
    /// stops only when killed or reverted.
    pub yoyo: bool,
}

impl Tween {
    /// A single forward pass of `duration` with `ease`.
    pub fn new(duration: Duration, ease: Ease) -> Self {
        Self {
            duration,
            ease,
            yoyo: false,
        }
    }

    /// Loop this tween back and forth forever.
    pub fn yoyo(self) -> Self {
        Self { yoyo: true, ..self }
    }

    /// Raw progress through the current pass after `elapsed`, and whether the tween is done.
    pub(crate) fn sample(&self, elapsed: Duration) -> (f64, bool) {
        if !self.yoyo {
            let t = progress(elapsed, self.duration);
            return (t, t >= 1.0);
        }
        if self.duration.is_zero() {
            return (1.0, false);
        }
        let passes = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let frac = passes.fract();
        // Odd passes run backwards.
        let t = if passes.trunc() as u64 % 2 == 0 {
            frac
        } else {
            1.0 - frac
        };
        (t, false)
    }
}

/// Lifecycle point reported for a tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenPhase {
    /// The tween rendered its first frame.
    Started,
    /// The tween reached its end value.
    Completed,
}

/// Notification replacing start/complete callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TweenEvent {
    /// Which tween.
    pub tween: TweenId,
    /// What happened.
    pub phase: TweenPhase,
}

/// Boundary to the animation-timeline engine.
///
/// Every mutation is tagged with a [`ScopeId`] so a component can undo everything it animated
/// with [`Timeline::revert_scope`] on teardown. Start and completion are not callbacks: the
/// engine reports them as [`TweenEvent`]s, which the driver routes back to the tween's owner.
///
/// Starting a tween on a layer kills any unfinished tween on the same layer within the same
/// scope; killed tweens never report completion.
pub trait Timeline {
    /// Register a layer and its authored (stylesheet) style.
    fn register(&mut self, layer: LayerId, authored: LayerStyle);

    /// Apply `props` immediately.
    fn set(&mut self, scope: ScopeId, target: LayerId, props: &Props) -> ReelResult<()>;

    /// Tween from the layer's current values to `to`.
    fn to(
        &mut self,
        scope: ScopeId,
        target: LayerId,
        to: &Props,
        tween: Tween,
    ) -> ReelResult<TweenId>;

    /// Apply `from` immediately, then tween to `to`.
    fn from_to(
        &mut self,
        scope: ScopeId,
        target: LayerId,
        from: &Props,
        to: &Props,
        tween: Tween,
    ) -> ReelResult<TweenId>;

    /// Reset a layer to its authored style.
    fn clear_props(&mut self, scope: ScopeId, target: LayerId) -> ReelResult<()>;

    /// Kill the scope's tweens and restore every layer it touched to its pre-scope style.
    fn revert_scope(&mut self, scope: ScopeId);

    /// Current style of a layer, if registered.
    fn style(&self, layer: LayerId) -> Option<LayerStyle>;
}
