use crate::animation::props::{Anchor, LayerStyle, Props};
use crate::animation::timeline::{LayerId, ScopeId, Timeline, Tween};
use crate::config::NavConfig;
use crate::foundation::core::Size;
use crate::foundation::observe::{Observers, Subscription};

/// The navigation bar layer.
pub const NAV_LAYER: LayerId = LayerId("nav");
/// Cleanup scope of every nav tween.
pub const NAV_SCOPE: ScopeId = ScopeId(2);

/// Whether the bar is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Shown.
    Visible,
    /// Slid out of view.
    Hidden,
}

/// Visibility plus the elevated "floating" treatment, which applies whenever the page is not at
/// the very top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavState {
    /// On or off screen.
    pub visibility: Visibility,
    /// Elevated/shadowed treatment.
    pub floating: bool,
}

/// Three-valued view of a [`NavState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavMode {
    /// Shown at the top of the page.
    Visible,
    /// Slid out of view.
    Hidden,
    /// Shown with the floating treatment.
    Floating,
}

impl NavState {
    /// Initial state at offset 0.
    pub const TOP: Self = Self {
        visibility: Visibility::Visible,
        floating: false,
    };

    /// Fold visibility and floating into one mode.
    pub fn mode(self) -> NavMode {
        match (self.visibility, self.floating) {
            (Visibility::Hidden, _) => NavMode::Hidden,
            (Visibility::Visible, true) => NavMode::Floating,
            (Visibility::Visible, false) => NavMode::Visible,
        }
    }
}

/// A state change produced by one scroll sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavChange {
    /// State before the sample.
    pub from: NavState,
    /// State after the sample.
    pub to: NavState,
}

/// Derives [`NavState`] from consecutive scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollVisibility {
    state: NavState,
    last_y: f64,
}

impl Default for ScrollVisibility {
    fn default() -> Self {
        Self {
            state: NavState::TOP,
            last_y: 0.0,
        }
    }
}

impl ScrollVisibility {
    /// Start visible at offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Offset of the previous sample.
    pub fn last_y(&self) -> f64 {
        self.last_y
    }

    /// Feed one sample, in arrival order. Returns the change, if any.
    pub fn on_scroll(&mut self, y: f64) -> Option<NavChange> {
        let from = self.state;
        if y == 0.0 {
            self.state = NavState::TOP;
        } else if y > self.last_y {
            self.state = NavState {
                visibility: Visibility::Hidden,
                floating: true,
            };
        } else if y < self.last_y {
            self.state = NavState {
                visibility: Visibility::Visible,
                floating: true,
            };
        }
        self.last_y = y;

        (self.state != from).then_some(NavChange {
            from,
            to: self.state,
        })
    }

    /// Reinitialize to the top of the page.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Notification published by [`NavBar`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    /// Visibility or floating treatment changed.
    Changed {
        /// The change.
        change: NavChange,
        /// Scroll offset that caused it.
        y: f64,
    },
}

/// The animated navigation bar.
pub struct NavBar<T: Timeline> {
    config: NavConfig,
    machine: ScrollVisibility,
    timeline: T,
    observers: Observers<NavEvent>,
}

impl<T: Timeline> std::fmt::Debug for NavBar<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavBar")
            .field("machine", &self.machine)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl<T: Timeline> NavBar<T> {
    /// Register the bar layer and start at the top of the page.
    pub fn new(config: NavConfig, viewport: Size, mut timeline: T) -> Self {
        timeline.register(
            NAV_LAYER,
            LayerStyle {
                anchor: Anchor::Top,
                ..LayerStyle::sized(Size::new(viewport.width, config.height))
            },
        );
        Self {
            config,
            machine: ScrollVisibility::new(),
            timeline,
            observers: Observers::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> NavState {
        self.machine.state()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&mut self, callback: impl Fn(&NavEvent) + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    /// Feed one scroll sample and tween the bar toward the new state.
    pub fn on_scroll(&mut self, y: f64) -> Option<NavChange> {
        let change = self.machine.on_scroll(y)?;
        let target = self.target_props(change.to);
        let tween = Tween::new(self.config.tween(), self.config.ease);
        if let Err(err) = self.timeline.to(NAV_SCOPE, NAV_LAYER, &target, tween) {
            tracing::warn!(%err, "nav tween failed to start; bar state still updated");
        }
        tracing::debug!(y, mode = ?change.to.mode(), "nav state changed");
        self.observers.notify(&NavEvent::Changed { change, y });
        Some(change)
    }

    /// Offset and opacity the bar animates to for `state`.
    pub fn target_props(&self, state: NavState) -> Props {
        match state.visibility {
            Visibility::Visible => Props::new().y(0.0).opacity(1.0),
            Visibility::Hidden => Props::new().y(self.config.hidden_offset).opacity(0.0),
        }
    }

    /// Undo every nav animation and return to the top-of-page state.
    pub fn teardown(&mut self) {
        self.timeline.revert_scope(NAV_SCOPE);
        self.machine.reset();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/scroll.rs"]
mod tests;
