use std::time::Duration;

use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Size, checked_secs, lerp};
use crate::foundation::error::{ReelError, ReelResult};

/// Four-point clip polygon in percent coordinates of the element box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipPolygon(pub [Point; 4]);

impl ClipPolygon {
    /// The unclipped rectangle.
    pub const FULL: Self = Self([
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]);

    /// Vertex-wise interpolation.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let mut out = self.0;
        for (p, q) in out.iter_mut().zip(to.0) {
            *p = p.lerp(q, t);
        }
        Self(out)
    }

    /// CSS `clip-path` value.
    pub fn to_css(&self) -> String {
        let pts: Vec<String> = self
            .0
            .iter()
            .map(|p| format!("{}% {}%", fmt_num(p.x), fmt_num(p.y)))
            .collect();
        format!("polygon({})", pts.join(", "))
    }
}

/// Per-corner border radius in percent, clockwise from top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CornerRadii(pub [f64; 4]);

impl CornerRadii {
    /// Corner-wise interpolation.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(to.0) {
            *a = lerp(*a, b, t);
        }
        Self(out)
    }

    /// CSS `border-radius` value.
    pub fn to_css(&self) -> String {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|r| {
                if *r == 0.0 {
                    "0".to_owned()
                } else {
                    format!("{}%", fmt_num(*r))
                }
            })
            .collect();
        parts.join(" ")
    }
}

fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// A clip-path reveal scrubbed by the page scroll offset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealConfig {
    /// Element name, used in views and logs.
    pub name: String,
    /// Scroll offset where progress is 0.
    pub start_y: f64,
    /// Scroll offset where progress is 1.
    pub end_y: f64,
    /// Clip at progress 0.
    pub from_clip: ClipPolygon,
    /// Clip at progress 1.
    pub to_clip: ClipPolygon,
    /// Corner radii at progress 0.
    #[serde(default)]
    pub from_radius: CornerRadii,
    /// Corner radii at progress 1.
    #[serde(default)]
    pub to_radius: CornerRadii,
    /// Element box at progress 0 and 1; `None` keeps the authored box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[Size; 2]>,
    /// Progress ease.
    #[serde(default)]
    pub ease: Ease,
    /// Seconds the displayed progress takes to catch up with the scroll; `0` locks it.
    #[serde(default)]
    pub scrub_lag_secs: f64,
    /// Hold the element in place while the window is scrolled through.
    #[serde(default)]
    pub pinned: bool,
}

impl RevealConfig {
    /// The hero video frame folding into a skewed polygon as the hero scrolls away.
    pub fn hero_frame(viewport: Size) -> Self {
        Self {
            name: "hero-frame".to_owned(),
            start_y: 0.0,
            end_y: viewport.height / 2.0,
            from_clip: ClipPolygon::FULL,
            to_clip: ClipPolygon([
                Point::new(14.0, 0.0),
                Point::new(72.0, 0.0),
                Point::new(90.0, 90.0),
                Point::new(0.0, 100.0),
            ]),
            from_radius: CornerRadii::default(),
            to_radius: CornerRadii([0.0, 0.0, 40.0, 10.0]),
            size: None,
            ease: Ease::InOutQuad,
            scrub_lag_secs: 0.0,
            pinned: false,
        }
    }

    /// The pinned about image unfolding to fill the viewport over 800 px of scroll.
    pub fn about_clip(viewport: Size, start_y: f64) -> Self {
        Self {
            name: "about-clip".to_owned(),
            start_y,
            end_y: start_y + 800.0,
            from_clip: ClipPolygon([
                Point::new(0.0, 0.0),
                Point::new(75.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(25.0, 100.0),
            ]),
            to_clip: ClipPolygon::FULL,
            from_radius: CornerRadii::default(),
            to_radius: CornerRadii::default(),
            size: Some([Size::new(384.0, viewport.height * 0.6), viewport]),
            ease: Ease::OutQuad,
            scrub_lag_secs: 0.5,
            pinned: true,
        }
    }

    /// Check the scroll window and smoothing.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.start_y.is_finite() && self.end_y.is_finite()) {
            return Err(ReelError::validation(format!(
                "reveal '{}' window must be finite",
                self.name
            )));
        }
        if self.end_y <= self.start_y {
            return Err(ReelError::validation(format!(
                "reveal '{}' end_y ({}) must be after start_y ({})",
                self.name, self.end_y, self.start_y
            )));
        }
        checked_secs("scrub_lag_secs", self.scrub_lag_secs)?;
        Ok(())
    }
}

/// Live state of one scroll-scrubbed reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipReveal {
    config: RevealConfig,
    scroll_y: f64,
    target: f64,
    shown: f64,
}

impl ClipReveal {
    /// Start at scroll offset 0.
    pub fn new(config: RevealConfig) -> ReelResult<Self> {
        config.validate()?;
        let mut reveal = Self {
            config,
            scroll_y: 0.0,
            target: 0.0,
            shown: 0.0,
        };
        reveal.on_scroll(0.0);
        reveal.shown = reveal.target;
        Ok(reveal)
    }

    /// The reveal's configuration.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Take a new scroll sample.
    pub fn on_scroll(&mut self, y: f64) {
        self.scroll_y = y;
        let span = self.config.end_y - self.config.start_y;
        self.target = ((y - self.config.start_y) / span).clamp(0.0, 1.0);
        if self.config.scrub_lag_secs == 0.0 {
            self.shown = self.target;
        }
    }

    /// Let lagged progress catch up with the scroll for `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let lag = self.config.scrub_lag_secs;
        if lag == 0.0 || self.shown == self.target {
            return;
        }
        // Exponential approach; ~95% of the gap closes within `lag` seconds.
        let alpha = 1.0 - (-3.0 * dt.as_secs_f64() / lag).exp();
        self.shown = lerp(self.shown, self.target, alpha);
        if (self.shown - self.target).abs() < 1e-4 {
            self.shown = self.target;
        }
    }

    /// Scroll-derived progress before smoothing.
    pub fn target_progress(&self) -> f64 {
        self.target
    }

    /// Displayed (smoothed, uneased) progress.
    pub fn progress(&self) -> f64 {
        self.shown
    }

    fn eased(&self) -> f64 {
        self.config.ease.apply(self.shown)
    }

    /// Current clip polygon.
    pub fn clip(&self) -> ClipPolygon {
        self.config.from_clip.lerp(&self.config.to_clip, self.eased())
    }

    /// Current corner radii.
    pub fn radius(&self) -> CornerRadii {
        self.config
            .from_radius
            .lerp(&self.config.to_radius, self.eased())
    }

    /// Current element box, if the reveal resizes it.
    pub fn size(&self) -> Option<Size> {
        self.config
            .size
            .map(|[from, to]| {
                let t = self.eased();
                Size::new(lerp(from.width, to.width, t), lerp(from.height, to.height, t))
            })
    }

    /// Downward translation keeping a pinned element fixed on screen.
    pub fn pin_offset(&self) -> f64 {
        if !self.config.pinned {
            return 0.0;
        }
        (self.scroll_y - self.config.start_y).clamp(0.0, self.config.end_y - self.config.start_y)
    }
}

#[cfg(test)]
#[path = "../tests/unit/reveal.rs"]
mod tests;
