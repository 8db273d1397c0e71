// Host-side tests for the proximity detector.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod proximity {
    include!("../src/core/proximity.rs");
}

use proximity::*;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

struct FakeSource {
    scan: Result<Span, GeometryError>,
    viewport: Span,
    probes: Vec<RegionProbe>,
}

impl FakeSource {
    fn new(scan_y: f32) -> Self {
        Self {
            scan: Ok(beam_at(scan_y)),
            viewport: Span::new(0.0, 800.0),
            probes: Vec::new(),
        }
    }

    fn with_region(mut self, id: u32, top: f32, bottom: f32) -> Self {
        self.probes.push(RegionProbe {
            id: RegionId(id),
            bounds: Ok(Span::new(top, bottom)),
        });
        self
    }

    fn move_beam(&mut self, scan_y: f32) {
        self.scan = Ok(beam_at(scan_y));
    }
}

impl RegionSource for FakeSource {
    fn scan_span(&self) -> Result<Span, GeometryError> {
        self.scan.clone()
    }

    fn viewport(&self) -> Span {
        self.viewport
    }

    fn probes(&self) -> Vec<RegionProbe> {
        self.probes.clone()
    }
}

// A 2px beam centred on `y`.
fn beam_at(y: f32) -> Span {
    Span::new(y - 1.0, y + 1.0)
}

fn contact_triggers(report: &PollReport) -> usize {
    report
        .events
        .iter()
        .filter(|e| matches!(e, ProximityEvent::Contact { .. }))
        .count()
}

#[test]
fn span_normalizes_reversed_edges() {
    let s = Span::new(140.0, 100.0);
    assert_eq!(s.top, 100.0);
    assert_eq!(s.bottom, 140.0);
    assert_eq!(s.center(), 120.0);
    assert_eq!(s.half_height(), 20.0);
}

#[test]
fn classify_contact_example() {
    let config = ProximityConfig::default();
    let region = Span::new(100.0, 140.0);
    assert_eq!(classify(125.0, region, &config), Proximity::Contact);
}

#[test]
fn distance_equal_to_threshold_is_not_contact() {
    let config = ProximityConfig::default();
    // Thin region: contact radius falls back to the 20px threshold.
    let region = Span::new(100.0, 110.0);
    let result = classify(125.0, region, &config);
    assert_ne!(result, Proximity::Contact);
    assert_eq!(result, Proximity::Approaching);
    assert_eq!(classify(124.9, region, &config), Proximity::Contact);
}

#[test]
fn tall_region_uses_its_half_height() {
    let config = ProximityConfig::default();
    let region = Span::new(0.0, 200.0);
    assert_eq!(classify(190.0, region, &config), Proximity::Contact);
    // Exactly on the edge, and beyond the approach radius from the centre.
    assert_eq!(classify(200.0, region, &config), Proximity::Idle);
}

#[test]
fn thin_region_gets_minimum_half_height() {
    let config = ProximityConfig {
        contact_threshold: 5.0,
        min_half_height: 15.0,
        ..ProximityConfig::default()
    };
    let region = Span::new(100.0, 102.0);
    assert_eq!(classify(112.0, region, &config), Proximity::Contact);
    assert_ne!(classify(117.0, region, &config), Proximity::Contact);
}

#[test]
fn approach_needs_padded_bounds_as_well_as_distance() {
    let config = ProximityConfig {
        approach_padding: 10.0,
        ..ProximityConfig::default()
    };
    let region = Span::new(100.0, 140.0);
    // 45px away is within the approach radius but outside the padded box.
    assert_eq!(classify(75.0, region, &config), Proximity::Idle);
    assert_eq!(classify(95.0, region, &config), Proximity::Approaching);
    assert_eq!(classify(400.0, region, &config), Proximity::Idle);
}

#[test]
fn sustained_contact_fires_once() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let source = FakeSource::new(125.0).with_region(1, 100.0, 140.0);
    let mut triggers = 0;
    let mut classified = 0;
    for step in 0..120 {
        let report = detector.poll(&source, ms(step * 25));
        assert!(report.any_contact);
        triggers += contact_triggers(&report);
        classified += report
            .events
            .iter()
            .filter(|e| matches!(e, ProximityEvent::Classified { .. }))
            .count();
    }
    assert_eq!(triggers, 1);
    assert_eq!(classified, 1);
}

#[test]
fn flickering_contact_is_rate_limited_by_cooldown() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(125.0).with_region(1, 100.0, 140.0);
    let mut triggers = 0;
    // Beam alternates between the region and far away on every 25ms poll for 3s.
    for step in 0..120u64 {
        source.move_beam(if step % 2 == 0 { 120.0 } else { 600.0 });
        triggers += contact_triggers(&detector.poll(&source, ms(step * 25)));
    }
    assert!(triggers <= 3, "expected at most 3 triggers, got {triggers}");
    assert!(triggers >= 2, "cooldown should re-arm, got {triggers}");
}

#[test]
fn leaving_contact_reports_idle_for_marker_cleanup() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(120.0).with_region(7, 100.0, 140.0);
    detector.poll(&source, ms(0));
    assert_eq!(detector.proximity_of(RegionId(7)), Proximity::Contact);

    source.move_beam(500.0);
    let report = detector.poll(&source, ms(25));
    assert_eq!(
        report.events.as_slice(),
        &[ProximityEvent::Classified {
            id: RegionId(7),
            proximity: Proximity::Idle
        }]
    );
    assert!(!report.any_contact);
    assert!(!detector.any_contact());
    assert_eq!(detector.proximity_of(RegionId(7)), Proximity::Idle);
}

#[test]
fn approach_trigger_only_fires_from_idle() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(60.0).with_region(3, 100.0, 140.0);

    // idle -> approaching
    source.move_beam(70.0);
    let report = detector.poll(&source, ms(0));
    assert_eq!(report.triggers().count(), 1);
    assert!(matches!(
        report.triggers().next(),
        Some(ProximityEvent::Approach { id: RegionId(3), .. })
    ));

    // approaching -> contact
    source.move_beam(120.0);
    let report = detector.poll(&source, ms(25));
    assert!(matches!(
        report.triggers().next(),
        Some(ProximityEvent::Contact { id: RegionId(3), .. })
    ));

    // contact -> approaching: marker update only
    source.move_beam(90.0);
    let report = detector.poll(&source, ms(50));
    assert_eq!(report.triggers().count(), 0);
    assert_eq!(report.events.len(), 1);
    assert_eq!(detector.proximity_of(RegionId(3)), Proximity::Approaching);
}

#[test]
fn regions_outside_the_viewport_are_pruned() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    // Region sits far below the buffered viewport, beam right on it.
    let source = FakeSource::new(2_020.0).with_region(4, 2_000.0, 2_040.0);
    let report = detector.poll(&source, ms(0));
    assert!(report.events.is_empty());
    assert_eq!(report.regions, vec![(RegionId(4), Proximity::Idle)]);
    assert!(!report.any_contact);
}

#[test]
fn region_scrolled_out_of_view_is_released() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(120.0).with_region(4, 100.0, 140.0);
    detector.poll(&source, ms(0));
    source.viewport = Span::new(1_000.0, 1_800.0);
    let report = detector.poll(&source, ms(25));
    assert_eq!(detector.proximity_of(RegionId(4)), Proximity::Idle);
    assert_eq!(report.events.len(), 1);
}

#[test]
fn unreadable_region_is_skipped_for_one_poll() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(120.0).with_region(5, 100.0, 140.0);
    detector.poll(&source, ms(0));

    source.probes[0].bounds = Err(GeometryError::Detached("region#5".into()));
    let report = detector.poll(&source, ms(25));
    assert!(report.events.is_empty());
    assert!(report.regions.is_empty());
    assert_eq!(detector.proximity_of(RegionId(5)), Proximity::Contact);
    assert!(report.any_contact, "held contact keeps the tank out of idle");
    assert!(detector.any_contact());

    source.probes[0].bounds = Ok(Span::new(100.0, 140.0));
    let report = detector.poll(&source, ms(50));
    assert!(report.events.is_empty(), "still in contact, nothing new");
}

#[test]
fn unreadable_beam_skips_the_whole_poll() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(120.0).with_region(5, 100.0, 140.0);
    detector.poll(&source, ms(0));

    source.scan = Err(GeometryError::NoLayout("scan-beam".into()));
    let report = detector.poll(&source, ms(25));
    assert!(report.skipped);
    assert!(report.scan_y.is_none());
    assert!(report.events.is_empty());
    assert_eq!(detector.proximity_of(RegionId(5)), Proximity::Contact);
}

#[test]
fn vanished_region_is_forgotten_but_cooldown_holds() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(120.0).with_region(9, 100.0, 140.0);
    assert_eq!(contact_triggers(&detector.poll(&source, ms(0))), 1);

    let saved = source.probes.clone();
    source.probes.clear();
    let report = detector.poll(&source, ms(25));
    assert!(report.events.is_empty());
    assert_eq!(detector.proximity_of(RegionId(9)), Proximity::Idle);

    // Back within the cooldown: markers update, the one-shot does not repeat.
    source.probes = saved;
    let report = detector.poll(&source, ms(50));
    assert_eq!(report.events.len(), 1);
    assert_eq!(contact_triggers(&report), 0);

    // After the cooldown a fresh entry triggers again.
    source.probes.clear();
    detector.poll(&source, ms(1_100));
    source.probes.push(RegionProbe {
        id: RegionId(9),
        bounds: Ok(Span::new(100.0, 140.0)),
    });
    assert_eq!(contact_triggers(&detector.poll(&source, ms(1_125))), 1);
}

#[test]
fn regions_with_identical_geometry_trigger_independently() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let source = FakeSource::new(120.0)
        .with_region(1, 100.0, 140.0)
        .with_region(2, 100.0, 140.0);
    let report = detector.poll(&source, ms(0));
    assert_eq!(contact_triggers(&report), 2);
}

#[test]
fn any_contact_tracks_the_whole_region_set() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(120.0)
        .with_region(1, 100.0, 140.0)
        .with_region(2, 400.0, 440.0);
    assert!(detector.poll(&source, ms(0)).any_contact);
    source.move_beam(420.0);
    assert!(detector.poll(&source, ms(25)).any_contact);
    source.move_beam(700.0);
    assert!(!detector.poll(&source, ms(50)).any_contact);
}

#[test]
fn reset_forgets_classifications_and_cooldowns() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let source = FakeSource::new(120.0).with_region(1, 100.0, 140.0);
    detector.poll(&source, ms(0));
    detector.reset();
    assert_eq!(detector.proximity_of(RegionId(1)), Proximity::Idle);
    assert_eq!(contact_triggers(&detector.poll(&source, ms(25))), 1);
}

#[test]
fn geometry_errors_name_the_element() {
    let e = GeometryError::Detached("scan-beam".into());
    assert_eq!(e.to_string(), "element `scan-beam` is no longer in the document");
}

#[test]
fn region_added_after_startup_is_tracked() {
    let mut detector = ProximityDetector::new(ProximityConfig::default());
    let mut source = FakeSource::new(120.0).with_region(1, 400.0, 440.0);
    detector.poll(&source, ms(0));

    let mut ids = RegionIdAllocator::new(10_000);
    let late = ids.allocate();
    source.probes.push(RegionProbe {
        id: late,
        bounds: Ok(Span::new(100.0, 140.0)),
    });
    let report = detector.poll(&source, ms(25));
    assert_eq!(detector.proximity_of(late), Proximity::Contact);
    assert_eq!(report.triggers().count(), 1);
    assert!(report.any_contact);
}

#[test]
fn allocator_skips_ids_already_in_use() {
    let mut ids = RegionIdAllocator::new(10_000);
    assert_eq!(ids.allocate(), RegionId(10_000));
    // Specimen ids sit below the dynamic range and change nothing.
    ids.observe(RegionId(3));
    assert_eq!(ids.allocate(), RegionId(10_001));
    // A hand-tagged host region inside the range pushes allocation past it.
    ids.observe(RegionId(10_050));
    assert_eq!(ids.allocate(), RegionId(10_051));
    assert_eq!(ids.allocate(), RegionId(10_052));
}
