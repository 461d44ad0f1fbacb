use super::*;
use crate::animation::engine::{SharedEngine, TweenEngine};
use crate::animation::props::LayerStyle;
use crate::hero::layers::{BACKDROP_LAYER, INCOMING_Z, RAISED_PREVIEW_Z};
use crate::media::host::RecordingMediaHost;
use std::cell::RefCell;
use std::rc::Rc;

const VIEWPORT: Size = Size::new(1440.0, 900.0);
const STEP: Duration = Duration::from_millis(100);

type Host = Rc<RefCell<RecordingMediaHost>>;
type Seq = TransitionSequencer<SharedEngine, Host>;

fn rig_with(config: HeroConfig, engine: TweenEngine) -> (SharedEngine, Host, Seq) {
    let engine = SharedEngine::new(engine);
    let host = Host::default();
    let seq = TransitionSequencer::new(config, VIEWPORT, engine.clone(), host.clone()).unwrap();
    (engine, host, seq)
}

fn rig() -> (SharedEngine, Host, Seq) {
    rig_with(HeroConfig::default(), TweenEngine::new(VIEWPORT))
}

fn idx(seq: &Seq, raw: i64) -> MediaIndex {
    seq.catalog().normalize(raw)
}

fn make_ready(seq: &mut Seq) {
    for (slot, raw) in [
        (MediaSlot::Backdrop, 1),
        (MediaSlot::Incoming, 1),
        (MediaSlot::Preview, 2),
    ] {
        let index = idx(seq, raw);
        seq.on_media_ready(ReadyKey { slot, index });
    }
    assert!(seq.preload().is_ready());
}

fn run(engine: &SharedEngine, seq: &mut Seq, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        for ev in engine.tick(STEP) {
            seq.on_tween_event(ev, engine.now());
        }
        seq.poll(engine.now());
        elapsed += STEP;
    }
}

fn indices(seq: &Seq) -> (u32, u32, bool) {
    let s = seq.state();
    (s.current.get(), s.upcoming.get(), s.in_progress)
}

#[test]
fn starts_on_first_clip_with_second_queued() {
    let (_, host, seq) = rig();
    assert_eq!(indices(&seq), (1, 2, false));
    assert!(seq.is_loading());

    let host = host.borrow();
    assert_eq!(
        host.slot(MediaSlot::Preview).source.as_deref(),
        Some("./videos/hero-2.mp4")
    );
    assert_eq!(
        host.slot(MediaSlot::Backdrop).source.as_deref(),
        Some("./videos/hero-1.mp4")
    );
    assert!(host.slot(MediaSlot::Backdrop).playing);
    assert!(!host.slot(MediaSlot::Incoming).playing);
}

#[test]
fn trigger_before_preload_is_dropped() {
    let (_, host, mut seq) = rig();
    let before = host.borrow().calls().len();
    assert_eq!(
        seq.on_preview_activated(Duration::ZERO),
        TriggerOutcome::DroppedNotReady
    );
    assert_eq!(indices(&seq), (1, 2, false));
    assert_eq!(host.borrow().calls().len(), before);
}

#[test]
fn zero_preload_threshold_is_rejected() {
    let config = HeroConfig {
        preload_threshold: Some(0),
        ..HeroConfig::default()
    };
    let engine = SharedEngine::new(TweenEngine::new(VIEWPORT));
    let err = TransitionSequencer::new(config, VIEWPORT, engine, Host::default()).unwrap_err();
    assert!(err.to_string().contains("preload_threshold"));
}

#[test]
fn single_signal_threshold_publishes_ready() {
    let config = HeroConfig {
        preload_threshold: Some(1),
        ..HeroConfig::default()
    };
    let (_, _, mut seq) = rig_with(config, TweenEngine::new(VIEWPORT));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let _sub = seq.subscribe(move |e| sink.borrow_mut().push(*e));

    assert!(seq.is_loading());
    let index = idx(&seq, 1);
    seq.on_media_ready(ReadyKey {
        slot: MediaSlot::Backdrop,
        index,
    });
    assert!(!seq.is_loading());
    assert_eq!(*events.borrow(), [HeroEvent::PreloadReady { loaded: 1 }]);
}

#[test]
fn ungated_sequencer_accepts_before_preload() {
    let config = HeroConfig {
        gate_on_ready: false,
        ..HeroConfig::default()
    };
    let (_, _, mut seq) = rig_with(config, TweenEngine::new(VIEWPORT));
    assert_eq!(
        seq.on_preview_activated(Duration::ZERO),
        TriggerOutcome::Accepted
    );
    assert_eq!(indices(&seq), (2, 3, true));
}

#[test]
fn accepted_trigger_advances_and_swaps_sources() {
    let (engine, host, mut seq) = rig();
    make_ready(&mut seq);

    assert_eq!(
        seq.on_preview_activated(engine.now()),
        TriggerOutcome::Accepted
    );
    assert_eq!(indices(&seq), (2, 3, true));
    {
        let host = host.borrow();
        assert_eq!(
            host.slot(MediaSlot::Incoming).source.as_deref(),
            Some("./videos/hero-2.mp4")
        );
        assert_eq!(
            host.slot(MediaSlot::Backdrop).source.as_deref(),
            Some("./videos/hero-2.mp4")
        );
        assert_eq!(
            host.slot(MediaSlot::Preview).source.as_deref(),
            Some("./videos/hero-3.mp4")
        );
        // Incoming playback waits for phase A to start.
        assert!(!host.slot(MediaSlot::Incoming).playing);
    }

    run(&engine, &mut seq, STEP);
    assert!(host.borrow().slot(MediaSlot::Incoming).playing);
}

#[test]
fn reentrant_trigger_is_dropped_until_settled() {
    let (engine, _, mut seq) = rig();
    make_ready(&mut seq);
    seq.on_preview_activated(engine.now());

    run(&engine, &mut seq, Duration::from_millis(500));
    assert_eq!(
        seq.on_preview_activated(engine.now()),
        TriggerOutcome::DroppedInProgress
    );
    assert_eq!(indices(&seq), (2, 3, true));

    // Phase B (1.5 s) plus settle (1.5 s).
    run(&engine, &mut seq, Duration::from_millis(2400));
    assert!(seq.state().in_progress);
    assert_eq!(
        seq.on_preview_activated(engine.now()),
        TriggerOutcome::DroppedInProgress
    );

    run(&engine, &mut seq, STEP);
    assert!(!seq.state().in_progress);
    assert_eq!(
        seq.on_preview_activated(engine.now()),
        TriggerOutcome::Accepted
    );
    assert_eq!(indices(&seq), (3, 4, true));
}

#[test]
fn four_clips_wrap_around() {
    let (engine, host, mut seq) = rig();
    make_ready(&mut seq);

    let mut seen = Vec::new();
    for _ in 0..4 {
        assert_eq!(
            seq.on_preview_activated(engine.now()),
            TriggerOutcome::Accepted
        );
        run(&engine, &mut seq, Duration::from_secs(3));
        let (current, upcoming, in_progress) = indices(&seq);
        assert!(!in_progress);
        seen.push((current, upcoming));
    }
    assert_eq!(seen, vec![(2, 3), (3, 4), (4, 1), (1, 2)]);
    assert_eq!(
        host.borrow().slot(MediaSlot::Preview).source.as_deref(),
        Some("./videos/hero-2.mp4")
    );
}

#[test]
fn layers_follow_both_phases() {
    let (engine, _, mut seq) = rig();
    make_ready(&mut seq);
    let authored_preview = engine.style(PREVIEW_LAYER).unwrap();

    seq.on_preview_activated(engine.now());
    let preview = engine.style(PREVIEW_LAYER).unwrap();
    assert_eq!(preview.z_index, RAISED_PREVIEW_Z);
    assert_eq!(preview.scale, 0.0);
    assert!(engine.style(INCOMING_LAYER).unwrap().visible);

    run(&engine, &mut seq, Duration::from_secs(1));
    let incoming = engine.style(INCOMING_LAYER).unwrap();
    assert_eq!((incoming.width, incoming.height), (1440.0, 900.0));
    assert_eq!(incoming.scale, 1.0);

    run(&engine, &mut seq, Duration::from_millis(500));
    assert_eq!(engine.style(PREVIEW_LAYER).unwrap(), authored_preview);
    assert_eq!(engine.style(INCOMING_LAYER).unwrap().z_index, INCOMING_Z);
    // The backdrop never animates.
    assert_eq!(
        engine.style(BACKDROP_LAYER).unwrap(),
        LayerStyle::full(VIEWPORT)
    );
}

#[test]
fn offline_timeline_clears_through_timeout() {
    let (engine, host, mut seq) =
        rig_with(HeroConfig::default(), TweenEngine::offline(VIEWPORT));
    make_ready(&mut seq);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let _sub = seq.subscribe(move |e| sink.borrow_mut().push(*e));

    assert_eq!(
        seq.on_preview_activated(engine.now()),
        TriggerOutcome::Accepted
    );
    assert_eq!(indices(&seq), (2, 3, true));
    assert_eq!(
        host.borrow().slot(MediaSlot::Backdrop).source.as_deref(),
        Some("./videos/hero-2.mp4")
    );

    run(&engine, &mut seq, Duration::from_millis(5900));
    assert!(seq.state().in_progress);
    run(&engine, &mut seq, STEP);
    assert!(!seq.state().in_progress);

    assert!(matches!(
        events.borrow().last(),
        Some(HeroEvent::TransitionTimedOut { .. })
    ));
    assert_eq!(
        seq.on_preview_activated(engine.now()),
        TriggerOutcome::Accepted
    );
}

#[test]
fn observers_see_start_settle_and_single_ready() {
    let (engine, _, mut seq) = rig();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let _sub = seq.subscribe(move |e| sink.borrow_mut().push(*e));

    make_ready(&mut seq);
    // A fourth, distinct signal after the gate opened changes nothing.
    let index = idx(&seq, 3);
    seq.on_media_ready(ReadyKey {
        slot: MediaSlot::Preview,
        index,
    });
    seq.on_preview_activated(engine.now());
    run(&engine, &mut seq, Duration::from_secs(3));

    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], HeroEvent::PreloadReady { loaded: 3 });
    assert!(matches!(events[1], HeroEvent::TransitionStarted { state } if state.in_progress));
    assert!(matches!(events[2], HeroEvent::TransitionSettled { state } if !state.in_progress));
}

#[test]
fn teardown_reverts_layers_and_pauses_media() {
    let (engine, host, mut seq) = rig();
    make_ready(&mut seq);
    let authored_incoming = engine.style(INCOMING_LAYER).unwrap();

    seq.on_preview_activated(engine.now());
    run(&engine, &mut seq, Duration::from_millis(400));
    seq.teardown();

    assert!(!seq.state().in_progress);
    assert_eq!(engine.style(INCOMING_LAYER).unwrap(), authored_incoming);
    assert_eq!(engine.with(|e| e.active_tweens()), 0);
    let host = host.borrow();
    for slot in [MediaSlot::Preview, MediaSlot::Incoming, MediaSlot::Backdrop] {
        assert!(!host.slot(slot).playing, "{slot:?} still playing");
    }
}

#[test]
fn upcoming_is_successor_whenever_idle() {
    let config = HeroConfig {
        clip_count: 3,
        ..HeroConfig::default()
    };
    let (engine, _, mut seq) = rig_with(config, TweenEngine::new(VIEWPORT));
    seq.on_media_ready(ReadyKey {
        slot: MediaSlot::Backdrop,
        index: MediaIndex::FIRST,
    });
    seq.on_media_ready(ReadyKey {
        slot: MediaSlot::Preview,
        index: MediaIndex::FIRST,
    });
    for _ in 0..7 {
        seq.on_preview_activated(engine.now());
        run(&engine, &mut seq, Duration::from_secs(3));
        let s = seq.state();
        assert!(!s.in_progress);
        assert_eq!(s.upcoming, seq.catalog().successor(s.current));
    }
    assert_eq!(seq.state().current.get(), 8 % 3);
}
