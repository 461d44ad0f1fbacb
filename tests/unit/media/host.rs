use super::*;

#[test]
fn records_calls_and_tracks_slot_state() {
    let mut host = RecordingMediaHost::new();
    host.set_source(MediaSlot::Incoming, "./videos/hero-2.mp4");
    host.play(MediaSlot::Incoming);

    let slot = host.slot(MediaSlot::Incoming);
    assert_eq!(slot.source.as_deref(), Some("./videos/hero-2.mp4"));
    assert!(slot.playing);
    assert_eq!(host.calls().len(), 2);

    host.pause(MediaSlot::Incoming);
    assert!(!host.slot(MediaSlot::Incoming).playing);
    assert_eq!(host.take_calls().len(), 3);
    assert!(host.calls().is_empty());
}

#[test]
fn shared_handle_writes_through() {
    let shared = Rc::new(RefCell::new(RecordingMediaHost::new()));
    let mut handle = Rc::clone(&shared);
    handle.play(MediaSlot::AudioLoop);
    assert!(shared.borrow().slot(MediaSlot::AudioLoop).playing);
}

#[test]
fn calls_serialize_with_a_tag() {
    let json = serde_json::to_value(MediaCall::Play {
        slot: MediaSlot::Preview,
    })
    .unwrap();
    assert_eq!(json, serde_json::json!({"call": "play", "slot": "preview"}));
}
