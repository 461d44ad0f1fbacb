use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Media elements the page drives.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    /// The clickable thumbnail previewing the upcoming clip.
    Preview,
    /// The layer that grows from the thumbnail to full screen during a transition.
    Incoming,
    /// The full-screen clip behind everything else.
    Backdrop,
    /// The navigation bar's ambient audio loop.
    AudioLoop,
}

/// Boundary to real media elements.
pub trait MediaHost {
    /// Point `slot` at a new resource.
    fn set_source(&mut self, slot: MediaSlot, source: &str);
    /// Start playback.
    fn play(&mut self, slot: MediaSlot);
    /// Pause playback.
    fn pause(&mut self, slot: MediaSlot);
}

/// One recorded [`MediaHost`] call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum MediaCall {
    /// `set_source`.
    SetSource {
        /// Target slot.
        slot: MediaSlot,
        /// New resource identifier.
        source: String,
    },
    /// `play`.
    Play {
        /// Target slot.
        slot: MediaSlot,
    },
    /// `pause`.
    Pause {
        /// Target slot.
        slot: MediaSlot,
    },
}

/// Observed state of one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SlotState {
    /// Last source assigned.
    pub source: Option<String>,
    /// Whether the last play/pause call was `play`.
    pub playing: bool,
}

/// In-memory media host for tests, the CLI and debugging.
#[derive(Debug, Default)]
pub struct RecordingMediaHost {
    calls: Vec<MediaCall>,
    slots: BTreeMap<MediaSlot, SlotState>,
}

impl RecordingMediaHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in arrival order.
    pub fn calls(&self) -> &[MediaCall] {
        &self.calls
    }

    /// Drain recorded calls, keeping slot state.
    pub fn take_calls(&mut self) -> Vec<MediaCall> {
        std::mem::take(&mut self.calls)
    }

    /// Current state of `slot`.
    pub fn slot(&self, slot: MediaSlot) -> SlotState {
        self.slots.get(&slot).cloned().unwrap_or_default()
    }
}

impl MediaHost for RecordingMediaHost {
    fn set_source(&mut self, slot: MediaSlot, source: &str) {
        self.slots.entry(slot).or_default().source = Some(source.to_owned());
        self.calls.push(MediaCall::SetSource {
            slot,
            source: source.to_owned(),
        });
    }

    fn play(&mut self, slot: MediaSlot) {
        self.slots.entry(slot).or_default().playing = true;
        self.calls.push(MediaCall::Play { slot });
    }

    fn pause(&mut self, slot: MediaSlot) {
        self.slots.entry(slot).or_default().playing = false;
        self.calls.push(MediaCall::Pause { slot });
    }
}

impl<M: MediaHost> MediaHost for Rc<RefCell<M>> {
    fn set_source(&mut self, slot: MediaSlot, source: &str) {
        self.borrow_mut().set_source(slot, source);
    }

    fn play(&mut self, slot: MediaSlot) {
        self.borrow_mut().play(slot);
    }

    fn pause(&mut self, slot: MediaSlot) {
        self.borrow_mut().pause(slot);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/host.rs"]
mod tests;
