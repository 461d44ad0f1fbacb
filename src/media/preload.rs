use std::collections::BTreeSet;

use crate::media::catalog::MediaIndex;
use crate::media::host::MediaSlot;

/// Identity of one media element's "data ready" signal.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ReadyKey {
    /// Element that signalled.
    pub slot: MediaSlot,
    /// Clip it had loaded.
    pub index: MediaIndex,
}

/// Readiness barrier counting distinct media load signals.
///
/// `loaded_count` never decreases and saturates at the threshold; `ready` flips to `true` at most
/// once. A repeated signal from the same element and clip is counted once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadGate {
    threshold: u32,
    loaded: u32,
    seen: BTreeSet<ReadyKey>,
}

impl PreloadGate {
    /// A gate that opens after `threshold` distinct signals. A threshold of 0 counts as 1, so the
    /// gate always starts closed and its opening is always observed.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            loaded: 0,
            seen: BTreeSet::new(),
        }
    }

    /// Record a ready signal. Returns `true` only for the call that opened the gate.
    pub fn on_media_ready(&mut self, key: ReadyKey) -> bool {
        if self.is_ready() || !self.seen.insert(key) {
            return false;
        }
        self.loaded += 1;
        self.is_ready()
    }

    /// Distinct signals counted so far.
    pub fn loaded_count(&self) -> u32 {
        self.loaded
    }

    /// Signals required to open.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Whether enough media has buffered.
    pub fn is_ready(&self) -> bool {
        self.loaded >= self.threshold
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/preload.rs"]
mod tests;
