// Web-side tuning constants: DOM hooks, audio atmosphere and visual mapping.
//
// Timing and hit-test defaults live in `core::constants`; this table only
// covers what the browser layer needs to find elements and shape effects.

// DOM hooks expected in the host page
pub const TANK_ID: &str = "specimen-tank";
pub const BEAM_ID: &str = "scan-beam";
pub const CATALOG_ID: &str = "specimen-catalog";
pub const PARTICLE_CANVAS_ID: &str = "particle-canvas";
pub const POPUP_ID: &str = "specimen-popup";
pub const POPUP_BODY_ID: &str = "specimen-popup-body";
pub const POPUP_CLOSE_ID: &str = "specimen-popup-close";

// Region tagging
pub const REGION_ID_ATTR: &str = "data-region-id";
pub const REGION_SELECTOR: &str = "[data-region-id]";
pub const UNTAGGED_REGION_SELECTOR: &str = "[data-region]:not([data-region-id])";
pub const SPECIMEN_ATTR: &str = "data-specimen";
pub const SPECIMEN_SELECTOR: &str = "[data-specimen]";
// Ids handed to host-tagged regions start here so they never clash with specimen ids.
pub const FIRST_DYNAMIC_REGION_ID: u32 = 10_000;

// Marker classes
pub const CONTACT_CLASS: &str = "in-contact";
pub const APPROACH_CLASS: &str = "approaching";
pub const IDLE_GLOW_CLASS: &str = "idle-glow";
pub const TRANSIENT_CLASS: &str = "glitching";
pub const POPUP_HIDDEN_CLASS: &str = "hidden";

// Audio atmosphere
pub const MASTER_GAIN: f32 = 0.5;
pub const HUM_FREQ_HZ: f32 = 55.0; // mains-like drone
pub const HUM_DETUNE_HZ: f32 = 0.8; // beating between the two hum oscillators
pub const HUM_GAIN_STEADY: f32 = 0.05;
pub const HUM_GAIN_SWELL: f32 = 0.03; // added across the steady cycle
pub const HUM_GAIN_TRANSIENT: f32 = 0.12;
pub const HUM_FILTER_BASE_HZ: f32 = 320.0;
pub const HUM_FILTER_SPAN_HZ: f32 = 480.0;
pub const HUM_FILTER_TRANSIENT_HZ: f32 = 2400.0;
pub const HUM_WOBBLE_HZ: f32 = 6.0; // pitch wobble depth during a transient
pub const PARAM_SMOOTHING_SEC: f64 = 0.08;

pub const BLIP_FREQ_LOW_HZ: f32 = 330.0;
pub const BLIP_FREQ_HIGH_HZ: f32 = 990.0;
pub const BLIP_GAIN: f32 = 0.14;
pub const BLIP_DURATION_SEC: f64 = 0.22;

pub const TICK_FREQ_HZ: f32 = 1800.0;
pub const TICK_GAIN: f32 = 0.035;
pub const TICK_DURATION_SEC: f64 = 0.05;

// Tank filter mapping
pub const BRIGHTNESS_BASE: f32 = 0.92;
pub const BRIGHTNESS_SPAN: f32 = 0.12;
pub const FLICKER_DEPTH: f32 = 0.35;
pub const HUE_JITTER_DEG: f32 = 28.0;

// Particle drawing
pub const PARTICLE_COLOR: &str = "rgb(140, 255, 200)";
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches
