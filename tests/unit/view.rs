use super::*;
use crate::config::PageConfig;
use crate::hero::layers::{BACKDROP_LAYER, INCOMING_LAYER, PREVIEW_LAYER};
use crate::session::PageInput;
use std::time::Duration;

fn session() -> PageSession {
    PageSession::new(PageConfig::default()).unwrap()
}

#[test]
fn fresh_page_shows_loader_and_first_clip() {
    let view = PageView::capture(&session());
    assert!(view.loading);
    assert_eq!(view.loaded, 0);
    assert_eq!(view.hero.current.get(), 1);
    assert_eq!(
        view.media[&MediaSlot::Backdrop].source.as_deref(),
        Some("./videos/hero-1.mp4")
    );

    let order: Vec<LayerId> = view.layers.iter().map(|l| l.layer).collect();
    assert_eq!(order, vec![BACKDROP_LAYER, INCOMING_LAYER, PREVIEW_LAYER]);
    assert_eq!(view.top_layer().map(|l| l.layer), Some(PREVIEW_LAYER));

    let backdrop = &view.layers[0];
    assert_eq!(backdrop.rect, Rect::new(0.0, 0.0, 1440.0, 900.0));
}

#[test]
fn thumbnail_rect_is_centered_and_scaled() {
    let view = PageView::capture(&session());
    let preview = view
        .layers
        .iter()
        .find(|l| l.layer == PREVIEW_LAYER)
        .unwrap();
    // 256 px box at 1.5x around the viewport center.
    assert_eq!(preview.rect, Rect::new(528.0, 258.0, 912.0, 642.0));
}

#[test]
fn nav_and_reveals_follow_scroll() {
    let mut s = session();
    s.apply(&PageInput::Scroll { y: 450.0 });
    s.advance(Duration::from_millis(200));
    let view = PageView::capture(&s);

    assert_eq!(view.nav.mode, NavMode::Hidden);
    assert_eq!((view.nav.y, view.nav.opacity), (-100.0, 0.0));
    assert_eq!(view.reveals[0].name, "hero-frame");
    assert_eq!(
        view.reveals[0].clip_path,
        "polygon(14% 0%, 72% 0%, 90% 90%, 0% 100%)"
    );
    assert_eq!(view.reveals[0].border_radius, "0 0 40% 10%");
    assert_eq!(view.reveals[1].pin_offset, 0.0);
}

#[test]
fn view_serializes_to_json() {
    let view = PageView::capture(&session());
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["loading"], true);
    assert_eq!(json["hero"]["current"], 1);
    assert_eq!(json["media"]["audio_loop"]["source"], "/audio/loop.mp3");
    assert_eq!(json["nav"]["mode"], "visible");
}

#[test]
fn floats_are_reported_apart_from_hero_layers() {
    let mut s = session();
    s.advance(Duration::from_secs(1));
    let view = PageView::capture(&s);

    assert_eq!(view.layers.len(), 3);
    assert_eq!(view.top_layer().map(|l| l.layer), Some(PREVIEW_LAYER));
    let drift: Vec<(FloatLayer, f64)> = view.floats.iter().map(|f| (f.layer, f.y)).collect();
    assert_eq!(drift.len(), 2);
    assert_eq!(drift[0].0, FloatLayer::Stone);
    assert!((drift[0].1 - 40.0).abs() < 1e-9);
    assert_eq!(drift[1].0, FloatLayer::AboutImage);
    assert!((drift[1].1 - 10.0).abs() < 1e-9);
}
