// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn lifecycle_timings_nest() {
    // Several ticks fit inside a transient, which fits inside its period.
    assert!(LIFECYCLE_TICK * 5 <= TRANSIENT_DURATION);
    assert!(TRANSIENT_DURATION < TRANSIENT_INTERVAL);
    assert!(TRANSIENT_INTERVAL < STEADY_CYCLE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn proximity_thresholds_are_consistent() {
    assert!(CONTACT_THRESHOLD_PX > 0.0);
    assert!(APPROACH_THRESHOLD_PX > CONTACT_THRESHOLD_PX);
    // The minimum half-height never widens contact beyond the threshold.
    assert!(MIN_HALF_HEIGHT_PX <= CONTACT_THRESHOLD_PX);
    assert!(VIEWPORT_BUFFER_PX >= APPROACH_THRESHOLD_PX);
    assert!(POLL_INTERVAL < TRIGGER_COOLDOWN);
    assert!(POLL_INTERVAL.as_millis() >= 25 && POLL_INTERVAL.as_millis() <= 50);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn particle_ranges_are_ordered() {
    assert!(PARTICLE_COUNT > 0);
    assert!(PARTICLE_SPEED_MIN < PARTICLE_SPEED_MAX);
    assert!(PARTICLE_RADIUS_MIN < PARTICLE_RADIUS_MAX);
    assert!(PARTICLE_OPACITY_BASE + PARTICLE_OPACITY_SPAN <= 1.0);
    assert!(PARTICLE_OPACITY_BASE + PARTICLE_TRANSIENT_BOOST <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn audio_levels_stay_sane() {
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
    assert!(HUM_GAIN_TRANSIENT > HUM_GAIN_STEADY + HUM_GAIN_SWELL);
    assert!(HUM_FILTER_TRANSIENT_HZ > HUM_FILTER_BASE_HZ + HUM_FILTER_SPAN_HZ);
    assert!(BLIP_FREQ_HIGH_HZ > BLIP_FREQ_LOW_HZ);
    assert!(TICK_GAIN < BLIP_GAIN);
    assert!(HUM_DETUNE_HZ > 0.0 && HUM_DETUNE_HZ < 2.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn visual_mapping_stays_in_range() {
    assert!(BRIGHTNESS_BASE + BRIGHTNESS_SPAN <= 1.2);
    assert!(FLICKER_DEPTH > 0.0 && FLICKER_DEPTH < 1.0);
    assert!(FIRST_DYNAMIC_REGION_ID > 1_000);
}
