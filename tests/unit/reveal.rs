use super::*;

const VIEWPORT: Size = Size::new(1440.0, 900.0);

#[test]
fn hero_frame_folds_as_the_hero_scrolls_away() {
    let mut r = ClipReveal::new(RevealConfig::hero_frame(VIEWPORT)).unwrap();
    assert_eq!(r.clip(), ClipPolygon::FULL);
    assert_eq!(r.radius().to_css(), "0 0 0 0");

    r.on_scroll(450.0);
    assert_eq!(r.progress(), 1.0);
    assert_eq!(
        r.clip().to_css(),
        "polygon(14% 0%, 72% 0%, 90% 90%, 0% 100%)"
    );
    assert_eq!(r.radius().to_css(), "0 0 40% 10%");

    r.on_scroll(225.0);
    assert_eq!(r.progress(), 0.5);
    assert!((r.clip().0[0].x - 7.0).abs() < 1e-9, "in/out quad is 0.5 at midpoint");
}

#[test]
fn progress_clamps_outside_the_window() {
    let mut r = ClipReveal::new(RevealConfig::hero_frame(VIEWPORT)).unwrap();
    r.on_scroll(-50.0);
    assert_eq!(r.progress(), 0.0);
    r.on_scroll(10_000.0);
    assert_eq!(r.progress(), 1.0);
}

#[test]
fn lagged_scrub_catches_up_over_time() {
    let mut r = ClipReveal::new(RevealConfig::about_clip(VIEWPORT, 1800.0)).unwrap();
    r.on_scroll(2200.0);
    assert_eq!(r.target_progress(), 0.5);
    assert_eq!(r.progress(), 0.0);

    r.advance(Duration::from_millis(100));
    let early = r.progress();
    assert!(early > 0.0 && early < 0.5);

    for _ in 0..60 {
        r.advance(Duration::from_millis(100));
    }
    assert_eq!(r.progress(), 0.5);
}

#[test]
fn about_clip_grows_to_viewport_and_pins() {
    let mut r = ClipReveal::new(RevealConfig::about_clip(VIEWPORT, 1800.0)).unwrap();
    assert_eq!(r.size(), Some(Size::new(384.0, 540.0)));
    assert_eq!(r.pin_offset(), 0.0);

    r.on_scroll(2600.0);
    for _ in 0..100 {
        r.advance(Duration::from_millis(50));
    }
    assert_eq!(r.size(), Some(VIEWPORT));
    assert_eq!(r.clip(), ClipPolygon::FULL);
    assert_eq!(r.pin_offset(), 800.0);

    r.on_scroll(2000.0);
    assert_eq!(r.pin_offset(), 200.0);
}

#[test]
fn inverted_window_is_rejected() {
    let mut cfg = RevealConfig::hero_frame(VIEWPORT);
    cfg.end_y = -1.0;
    let err = ClipReveal::new(cfg).unwrap_err();
    assert!(err.to_string().contains("hero-frame"));
}
