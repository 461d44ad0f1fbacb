use super::*;
use crate::animation::ease::Ease;
use crate::animation::props::Length;

const VIEWPORT: Size = Size::new(1000.0, 500.0);
const SCOPE: ScopeId = ScopeId(1);
const BOX: LayerId = LayerId("box");

fn engine() -> TweenEngine {
    let mut e = TweenEngine::new(VIEWPORT);
    e.register(BOX, LayerStyle::sized(Size::new(100.0, 100.0)));
    e
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn to_reports_start_then_completion() {
    let mut e = engine();
    let id = e
        .to(
            SCOPE,
            BOX,
            &Props::new().opacity(0.0),
            Tween::new(ms(200), Ease::Linear),
        )
        .unwrap();

    let first = e.tick(ms(100));
    assert_eq!(
        first,
        vec![TweenEvent {
            tween: id,
            phase: TweenPhase::Started
        }]
    );
    assert!((e.style(BOX).unwrap().opacity - 0.5).abs() < 1e-9);

    let second = e.tick(ms(100));
    assert_eq!(
        second,
        vec![TweenEvent {
            tween: id,
            phase: TweenPhase::Completed
        }]
    );
    assert_eq!(e.style(BOX).unwrap().opacity, 0.0);
    assert_eq!(e.active_tweens(), 0);
}

#[test]
fn from_to_applies_start_values_immediately() {
    let mut e = engine();
    e.from_to(
        SCOPE,
        BOX,
        &Props::new().scale(0.0),
        &Props::new().scale(1.0),
        Tween::new(ms(1500), Ease::InOutQuad),
    )
    .unwrap();
    assert_eq!(e.style(BOX).unwrap().scale, 0.0);
}

#[test]
fn percent_targets_resolve_against_viewport() {
    let mut e = engine();
    e.to(
        SCOPE,
        BOX,
        &Props::new()
            .width(Length::Percent(100.0))
            .height(Length::Percent(100.0)),
        Tween::new(ms(10), Ease::Linear),
    )
    .unwrap();
    e.tick(ms(10));
    let s = e.style(BOX).unwrap();
    assert_eq!((s.width, s.height), (1000.0, 500.0));
}

#[test]
fn discrete_props_snap_on_start() {
    let mut e = engine();
    e.to(
        SCOPE,
        BOX,
        &Props::new().z_index(20).visible(false),
        Tween::new(ms(1000), Ease::Linear),
    )
    .unwrap();
    assert_eq!(e.style(BOX).unwrap().z_index, 0);
    e.tick(ms(1));
    let s = e.style(BOX).unwrap();
    assert_eq!(s.z_index, 20);
    assert!(!s.visible);
}

#[test]
fn new_tween_overwrites_unfinished_one_on_same_layer() {
    let mut e = engine();
    let first = e
        .to(SCOPE, BOX, &Props::new().y(-100.0), Tween::new(ms(200), Ease::Linear))
        .unwrap();
    e.tick(ms(50));
    let second = e
        .to(SCOPE, BOX, &Props::new().y(0.0), Tween::new(ms(200), Ease::Linear))
        .unwrap();
    assert_eq!(e.active_tweens(), 1);

    let mut completed = Vec::new();
    for _ in 0..10 {
        completed.extend(
            e.tick(ms(50))
                .into_iter()
                .filter(|ev| ev.phase == TweenPhase::Completed)
                .map(|ev| ev.tween),
        );
    }
    assert_eq!(completed, vec![second]);
    assert!(!completed.contains(&first));
    assert_eq!(e.style(BOX).unwrap().y, 0.0);
}

#[test]
fn revert_scope_restores_pre_scope_style_and_kills_tweens() {
    let mut e = engine();
    let before = e.style(BOX).unwrap();
    e.set(SCOPE, BOX, &Props::new().z_index(10)).unwrap();
    e.to(SCOPE, BOX, &Props::new().scale(3.0), Tween::new(ms(100), Ease::Linear))
        .unwrap();
    e.tick(ms(50));

    e.revert_scope(SCOPE);
    assert_eq!(e.style(BOX).unwrap(), before);
    assert_eq!(e.active_tweens(), 0);
    assert!(e.tick(ms(100)).is_empty());
}

#[test]
fn revert_leaves_other_scopes_alone() {
    let mut e = engine();
    e.set(ScopeId(2), BOX, &Props::new().opacity(0.25)).unwrap();
    e.set(SCOPE, BOX, &Props::new().z_index(5)).unwrap();
    e.revert_scope(SCOPE);
    let s = e.style(BOX).unwrap();
    assert_eq!(s.z_index, 0);
    assert_eq!(s.opacity, 0.25);
}

#[test]
fn clear_props_returns_to_authored_style() {
    let mut e = engine();
    e.set(SCOPE, BOX, &Props::new().scale(0.0).z_index(9)).unwrap();
    e.clear_props(SCOPE, BOX).unwrap();
    assert_eq!(
        e.style(BOX).unwrap(),
        LayerStyle::sized(Size::new(100.0, 100.0))
    );
}

#[test]
fn offline_engine_rejects_every_mutation() {
    let mut e = TweenEngine::offline(VIEWPORT);
    e.register(BOX, LayerStyle::default());
    assert!(e.set(SCOPE, BOX, &Props::new().z_index(1)).is_err());
    let err = e
        .to(SCOPE, BOX, &Props::new().y(1.0), Tween::new(ms(1), Ease::Linear))
        .unwrap_err();
    assert!(err.to_string().contains("offline"));
}

#[test]
fn unknown_layer_is_an_animation_error() {
    let mut e = engine();
    let err = e
        .set(SCOPE, LayerId("ghost"), &Props::new().z_index(1))
        .unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn shared_handle_drives_the_same_engine() {
    let shared = SharedEngine::new(engine());
    let mut handle = shared.clone();
    handle
        .to(SCOPE, BOX, &Props::new().opacity(0.0), Tween::new(ms(100), Ease::Linear))
        .unwrap();
    let events = shared.tick(ms(100));
    assert_eq!(events.len(), 2);
    assert_eq!(shared.now(), ms(100));
    assert_eq!(handle.style(BOX).unwrap().opacity, 0.0);
}

#[test]
fn yoyo_tween_swings_back_and_never_completes() {
    let mut e = engine();
    let id = e
        .to(
            SCOPE,
            BOX,
            &Props::new().y(40.0),
            Tween::new(ms(1000), Ease::Linear).yoyo(),
        )
        .unwrap();

    assert_eq!(
        e.tick(ms(500)),
        vec![TweenEvent {
            tween: id,
            phase: TweenPhase::Started
        }]
    );
    let mut ys = vec![e.style(BOX).unwrap().y];
    for _ in 0..4 {
        assert!(e.tick(ms(500)).is_empty());
        ys.push(e.style(BOX).unwrap().y);
    }
    assert_eq!(ys, vec![20.0, 40.0, 20.0, 0.0, 20.0]);
    assert_eq!(e.active_tweens(), 1);

    e.revert_scope(SCOPE);
    assert_eq!(e.active_tweens(), 0);
    assert_eq!(e.style(BOX).unwrap().y, 0.0);
}
