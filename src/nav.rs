/// Ambient audio loop toggle.
pub mod audio;
/// Scroll-driven visibility state machine and the animated bar built on it.
pub mod scroll;
