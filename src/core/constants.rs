use std::time::Duration;

// Timing and geometry defaults shared by the lifecycle, proximity and particle cores.

// Lifecycle broadcaster
pub const LIFECYCLE_TICK: Duration = Duration::from_millis(100); // observer notification cadence
pub const STEADY_CYCLE: Duration = Duration::from_millis(300_000); // one full steady progress sweep
pub const TRANSIENT_INTERVAL: Duration = Duration::from_millis(10_000); // scheduler period
pub const TRANSIENT_DURATION: Duration = Duration::from_millis(1_000);

// Proximity detector
pub const POLL_INTERVAL: Duration = Duration::from_millis(25);
pub const CONTACT_THRESHOLD_PX: f32 = 20.0;
pub const APPROACH_THRESHOLD_PX: f32 = 80.0;
pub const APPROACH_PADDING_PX: f32 = 60.0; // region bounds widened by this for approach
pub const MIN_HALF_HEIGHT_PX: f32 = 15.0; // thin regions still register at a usable range
pub const VIEWPORT_BUFFER_PX: f32 = 100.0;
pub const TRIGGER_COOLDOWN: Duration = Duration::from_millis(1_000);

// Particle drift
pub const PARTICLE_COUNT: usize = 48;
pub const PARTICLE_SEED: u64 = 0x5EC1_7A4E;
pub const PARTICLE_SPEED_MIN: f32 = 4.0; // px per second
pub const PARTICLE_SPEED_MAX: f32 = 18.0;
pub const PARTICLE_RADIUS_MIN: f32 = 0.6;
pub const PARTICLE_RADIUS_MAX: f32 = 2.2;
pub const PARTICLE_OPACITY_BASE: f32 = 0.25;
pub const PARTICLE_OPACITY_SPAN: f32 = 0.35;
pub const PARTICLE_TRANSIENT_BOOST: f32 = 0.4;
