/// Easing curves.
pub mod ease;
/// Deterministic in-process tween engine.
pub mod engine;
/// Property patches and resolved layer styles.
pub mod props;
/// Timeline boundary shared by every animated component.
pub mod timeline;
