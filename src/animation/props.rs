use crate::foundation::core::{Point, Rect, Size, lerp};

/// A length that is either absolute or relative to the viewport axis it applies to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Percentage of the viewport axis (`100.0` is the full axis).
    Percent(f64),
}

impl Length {
    /// Resolve to pixels against an axis of `axis` pixels.
    pub fn resolve(self, axis: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => axis * pct / 100.0,
        }
    }
}

/// Where a layer sits before its scale and offset are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Centered in the viewport; scale grows from the center.
    #[default]
    Center,
    /// Pinned to the top edge, horizontally centered.
    Top,
}

/// A partial property patch; `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Props {
    /// Stacking order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Visibility (collapsed layers still occupy their box).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Uniform scale about the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Box width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    /// Box height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    /// Opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Vertical offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Props {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stacking order.
    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = Some(z);
        self
    }

    /// Set visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Set the uniform scale.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the box width.
    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the box height.
    pub fn height(mut self, height: Length) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the vertical offset.
    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Return `true` when the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Interpolatable numeric channels of a [`LayerStyle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Channel {
    Scale,
    Width,
    Height,
    Opacity,
    Y,
}

/// Fully resolved style of one animated layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerStyle {
    /// Stacking order.
    pub z_index: i32,
    /// Visibility.
    pub visible: bool,
    /// Uniform scale about the anchor.
    pub scale: f64,
    /// Box width in pixels.
    pub width: f64,
    /// Box height in pixels.
    pub height: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels.
    pub y: f64,
    /// Placement of the box in the viewport.
    pub anchor: Anchor,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            z_index: 0,
            visible: true,
            scale: 1.0,
            width: 0.0,
            height: 0.0,
            opacity: 1.0,
            y: 0.0,
            anchor: Anchor::Center,
        }
    }
}

impl LayerStyle {
    /// A visible, unscaled layer covering `viewport`.
    pub fn full(viewport: Size) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            ..Self::default()
        }
    }

    /// A centered box of `size` pixels.
    pub fn sized(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ..Self::default()
        }
    }

    /// Apply every field of `props` immediately.
    pub fn apply(&mut self, props: &Props, viewport: Size) {
        if let Some(z) = props.z_index {
            self.z_index = z;
        }
        if let Some(v) = props.visible {
            self.visible = v;
        }
        for (channel, value) in numeric_targets(props, viewport) {
            self.set_channel(channel, value);
        }
    }

    /// On-screen box after anchor, scale and offset.
    pub fn rect(&self, viewport: Size) -> Rect {
        let size = Size::new(self.width * self.scale, self.height * self.scale);
        let center = match self.anchor {
            Anchor::Center => Point::new(viewport.width / 2.0, viewport.height / 2.0),
            Anchor::Top => Point::new(viewport.width / 2.0, self.height / 2.0),
        };
        Rect::from_center_size(center, size) + kurbo::Vec2::new(0.0, self.y)
    }

    pub(crate) fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Scale => self.scale,
            Channel::Width => self.width,
            Channel::Height => self.height,
            Channel::Opacity => self.opacity,
            Channel::Y => self.y,
        }
    }

    pub(crate) fn set_channel(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Scale => self.scale = value,
            Channel::Width => self.width = value,
            Channel::Height => self.height = value,
            Channel::Opacity => self.opacity = value.clamp(0.0, 1.0),
            Channel::Y => self.y = value,
        }
    }
}

/// Numeric channels named by `props`, resolved to pixels against `viewport`.
pub(crate) fn numeric_targets(props: &Props, viewport: Size) -> Vec<(Channel, f64)> {
    let mut out = Vec::with_capacity(5);
    if let Some(s) = props.scale {
        out.push((Channel::Scale, s));
    }
    if let Some(w) = props.width {
        out.push((Channel::Width, w.resolve(viewport.width)));
    }
    if let Some(h) = props.height {
        out.push((Channel::Height, h.resolve(viewport.height)));
    }
    if let Some(o) = props.opacity {
        out.push((Channel::Opacity, o));
    }
    if let Some(y) = props.y {
        out.push((Channel::Y, y));
    }
    out
}

/// One channel moving from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ChannelTrack {
    pub(crate) channel: Channel,
    pub(crate) from: f64,
    pub(crate) to: f64,
}

impl ChannelTrack {
    pub(crate) fn sample(&self, eased: f64) -> f64 {
        lerp(self.from, self.to, eased)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
