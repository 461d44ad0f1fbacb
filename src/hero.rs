/// Hero layers, their authored styles and the crossfade keyframes.
pub mod layers;
/// The clip transition sequencer.
pub mod sequencer;
