use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::props::{ChannelTrack, LayerStyle, Props, numeric_targets};
use crate::animation::timeline::{
    LayerId, ScopeId, Timeline, Tween, TweenEvent, TweenId, TweenPhase,
};
use crate::foundation::core::Size;
use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Copy, Debug)]
struct Layer {
    authored: LayerStyle,
    current: LayerStyle,
}

#[derive(Clone, Debug)]
struct ActiveTween {
    id: TweenId,
    scope: ScopeId,
    target: LayerId,
    to: Props,
    tween: Tween,
    created_at: Duration,
    // Filled on the first tick; `None` until the tween has started.
    tracks: Option<Vec<ChannelTrack>>,
}

/// Deterministic, manually clocked tween engine.
///
/// Time only moves through [`TweenEngine::tick`]. A tween renders its first frame (and reports
/// [`TweenPhase::Started`]) on the first tick after it was created, capturing its start values at
/// that moment; discrete properties (stacking order, visibility) snap to their target then.
/// Yoyo tweens swing between their start and end values until killed.
#[derive(Debug)]
pub struct TweenEngine {
    viewport: Size,
    now: Duration,
    online: bool,
    next_id: u64,
    layers: BTreeMap<LayerId, Layer>,
    tweens: Vec<ActiveTween>,
    snapshots: BTreeMap<(ScopeId, LayerId), LayerStyle>,
}

impl TweenEngine {
    /// A running engine laying out against `viewport`.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            now: Duration::ZERO,
            online: true,
            next_id: 1,
            layers: BTreeMap::new(),
            tweens: Vec::new(),
            snapshots: BTreeMap::new(),
        }
    }

    /// An engine whose every mutation fails, standing in for an unavailable timeline.
    pub fn offline(viewport: Size) -> Self {
        Self {
            online: false,
            ..Self::new(viewport)
        }
    }

    /// Engine clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Viewport used to resolve percentage lengths.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Number of tweens that have neither completed nor been killed.
    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    /// Every registered layer with its current style, in name order.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, LayerStyle)> + '_ {
        self.layers.iter().map(|(id, l)| (*id, l.current))
    }

    /// Advance the clock by `dt` and render every live tween.
    ///
    /// Returns start and completion events in tween creation order.
    pub fn tick(&mut self, dt: Duration) -> Vec<TweenEvent> {
        self.now += dt;
        let now = self.now;
        let viewport = self.viewport;
        let mut events = Vec::new();

        for tw in &mut self.tweens {
            let Some(layer) = self.layers.get_mut(&tw.target) else {
                continue;
            };

            if tw.tracks.is_none() {
                if let Some(z) = tw.to.z_index {
                    layer.current.z_index = z;
                }
                if let Some(v) = tw.to.visible {
                    layer.current.visible = v;
                }
                let tracks = numeric_targets(&tw.to, viewport)
                    .into_iter()
                    .map(|(channel, to)| ChannelTrack {
                        channel,
                        from: layer.current.channel(channel),
                        to,
                    })
                    .collect();
                tw.tracks = Some(tracks);
                events.push(TweenEvent {
                    tween: tw.id,
                    phase: TweenPhase::Started,
                });
            }

            let (t, done) = tw.tween.sample(now.saturating_sub(tw.created_at));
            let eased = tw.tween.ease.apply(t);
            for track in tw.tracks.iter().flatten() {
                layer.current.set_channel(track.channel, track.sample(eased));
            }
            if done {
                events.push(TweenEvent {
                    tween: tw.id,
                    phase: TweenPhase::Completed,
                });
            }
        }

        let done: Vec<TweenId> = events
            .iter()
            .filter(|e| e.phase == TweenPhase::Completed)
            .map(|e| e.tween)
            .collect();
        self.tweens.retain(|tw| !done.contains(&tw.id));

        if !events.is_empty() {
            tracing::trace!(now = ?self.now, count = events.len(), "tween events");
        }
        events
    }

    fn ensure_online(&self) -> ReelResult<()> {
        if self.online {
            Ok(())
        } else {
            Err(ReelError::animation("timeline engine is offline"))
        }
    }

    // Record the pre-scope style the first time a scope touches a layer.
    fn touch(&mut self, scope: ScopeId, target: LayerId) -> ReelResult<&mut Layer> {
        self.ensure_online()?;
        let layer = self
            .layers
            .get_mut(&target)
            .ok_or_else(|| ReelError::animation(format!("unknown layer '{}'", target.0)))?;
        self.snapshots
            .entry((scope, target))
            .or_insert(layer.current);
        Ok(layer)
    }

    fn schedule(&mut self, scope: ScopeId, target: LayerId, to: &Props, tween: Tween) -> TweenId {
        self.tweens
            .retain(|tw| !(tw.scope == scope && tw.target == target));
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push(ActiveTween {
            id,
            scope,
            target,
            to: *to,
            tween,
            created_at: self.now,
            tracks: None,
        });
        id
    }
}

impl Timeline for TweenEngine {
    fn register(&mut self, layer: LayerId, authored: LayerStyle) {
        self.layers.insert(
            layer,
            Layer {
                authored,
                current: authored,
            },
        );
    }

    fn set(&mut self, scope: ScopeId, target: LayerId, props: &Props) -> ReelResult<()> {
        let viewport = self.viewport;
        let layer = self.touch(scope, target)?;
        layer.current.apply(props, viewport);
        Ok(())
    }

    fn to(
        &mut self,
        scope: ScopeId,
        target: LayerId,
        to: &Props,
        tween: Tween,
    ) -> ReelResult<TweenId> {
        self.touch(scope, target)?;
        Ok(self.schedule(scope, target, to, tween))
    }

    fn from_to(
        &mut self,
        scope: ScopeId,
        target: LayerId,
        from: &Props,
        to: &Props,
        tween: Tween,
    ) -> ReelResult<TweenId> {
        let viewport = self.viewport;
        let layer = self.touch(scope, target)?;
        layer.current.apply(from, viewport);
        Ok(self.schedule(scope, target, to, tween))
    }

    fn clear_props(&mut self, scope: ScopeId, target: LayerId) -> ReelResult<()> {
        let layer = self.touch(scope, target)?;
        layer.current = layer.authored;
        Ok(())
    }

    fn revert_scope(&mut self, scope: ScopeId) {
        self.tweens.retain(|tw| tw.scope != scope);
        let touched: Vec<(ScopeId, LayerId)> = self
            .snapshots
            .keys()
            .filter(|(s, _)| *s == scope)
            .copied()
            .collect();
        for key in touched {
            if let (Some(style), Some(layer)) =
                (self.snapshots.remove(&key), self.layers.get_mut(&key.1))
            {
                layer.current = style;
            }
        }
    }

    fn style(&self, layer: LayerId) -> Option<LayerStyle> {
        self.layers.get(&layer).map(|l| l.current)
    }
}

/// Single-threaded shared handle to a [`TweenEngine`].
///
/// Every page component holds a clone and animates through the [`Timeline`] impl; the session
/// keeps one to drive [`SharedEngine::tick`].
#[derive(Clone, Debug)]
pub struct SharedEngine(Rc<RefCell<TweenEngine>>);

impl SharedEngine {
    /// Wrap an engine.
    pub fn new(engine: TweenEngine) -> Self {
        Self(Rc::new(RefCell::new(engine)))
    }

    /// Advance the shared engine.
    pub fn tick(&self, dt: Duration) -> Vec<TweenEvent> {
        self.0.borrow_mut().tick(dt)
    }

    /// Engine clock.
    pub fn now(&self) -> Duration {
        self.0.borrow().now()
    }

    /// Borrow the engine for inspection.
    pub fn with<R>(&self, f: impl FnOnce(&TweenEngine) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl Timeline for SharedEngine {
    fn register(&mut self, layer: LayerId, authored: LayerStyle) {
        self.0.borrow_mut().register(layer, authored);
    }

    fn set(&mut self, scope: ScopeId, target: LayerId, props: &Props) -> ReelResult<()> {
        self.0.borrow_mut().set(scope, target, props)
    }

    fn to(
        &mut self,
        scope: ScopeId,
        target: LayerId,
        to: &Props,
        tween: Tween,
    ) -> ReelResult<TweenId> {
        self.0.borrow_mut().to(scope, target, to, tween)
    }

    fn from_to(
        &mut self,
        scope: ScopeId,
        target: LayerId,
        from: &Props,
        to: &Props,
        tween: Tween,
    ) -> ReelResult<TweenId> {
        self.0.borrow_mut().from_to(scope, target, from, to, tween)
    }

    fn clear_props(&mut self, scope: ScopeId, target: LayerId) -> ReelResult<()> {
        self.0.borrow_mut().clear_props(scope, target)
    }

    fn revert_scope(&mut self, scope: ScopeId) {
        self.0.borrow_mut().revert_scope(scope);
    }

    fn style(&self, layer: LayerId) -> Option<LayerStyle> {
        self.0.borrow().style(layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
