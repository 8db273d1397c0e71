pub mod constants;
/// Timed two-phase lifecycle with ordered observer fan-out.
///
/// The broadcaster never reads a clock. Every entry point takes `now`, the
/// elapsed time since a monotonic origin owned by the caller, so the web
/// layer can drive it from `setInterval` callbacks and host tests can drive it
/// with plain `Duration`s.
///
/// Two independent cadences feed it:
/// - `tick` recomputes the phase/progress pair and notifies every observer
/// - `trigger_transient` is the periodic (or manual) entry into `Transient`
pub mod lifecycle;
/// Ambient particle drift driven by the lifecycle feed.
pub mod particles;
/// Polling hit-test between the scan beam and the tracked regions.
///
/// Every poll samples live geometry through a [`RegionSource`], classifies
/// each region against the beam's vertical center and reports what changed.
/// Two kinds of output come back:
/// - `Classified` events whenever a region's classification changes, so the
///   caller can keep its level-triggered markers in sync
/// - `Contact` / `Approach` one-shots, edge-triggered and rate limited per
///   region by the cooldown window, meant for audio style triggers
///
/// A poll never fails. Regions whose geometry cannot be read are skipped for
/// that poll; if the beam itself cannot be read the whole poll is skipped.
pub mod proximity;
/// Read-only catalog of the specimens shown in the tank.
pub mod specimens;

pub use lifecycle::*;
pub use particles::*;
pub use proximity::*;
pub use specimens::*;
