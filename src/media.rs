/// Cyclic media catalog.
pub mod catalog;
/// Media element boundary.
pub mod host;
/// Readiness barrier over media load signals.
pub mod preload;
