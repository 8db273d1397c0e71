use super::constants::{
    APPROACH_PADDING_PX, APPROACH_THRESHOLD_PX, CONTACT_THRESHOLD_PX, MIN_HALF_HEIGHT_PX,
    POLL_INTERVAL, TRIGGER_COOLDOWN, VIEWPORT_BUFFER_PX,
};
use fnv::{FnvHashMap, FnvHashSet};
use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;

/// Vertical extent of an element in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub top: f32,
    pub bottom: f32,
}

impl Span {
    /// Build a span, swapping the edges if they arrive reversed.
    pub fn new(top: f32, bottom: f32) -> Self {
        if bottom < top {
            Self {
                top: bottom,
                bottom: top,
            }
        } else {
            Self { top, bottom }
        }
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height() * 0.5
    }

    #[inline]
    pub fn padded(&self, amount: f32) -> Self {
        Self {
            top: self.top - amount,
            bottom: self.bottom + amount,
        }
    }

    #[inline]
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom
    }

    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.top <= other.bottom && other.top <= self.bottom
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("element `{0}` is no longer in the document")]
    Detached(String),
    #[error("element `{0}` has no layout box")]
    NoLayout(String),
    #[error("element `{0}` reported non-finite geometry")]
    NonFinite(String),
}

/// Stable opaque identity for a tracked region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// Hands out ids for regions that arrive without one.
///
/// Ids already present in the document are reported through `observe` so a
/// fresh id never collides with one the host assigned by hand.
#[derive(Clone, Debug)]
pub struct RegionIdAllocator {
    next: u32,
}

impl RegionIdAllocator {
    pub fn new(first: u32) -> Self {
        Self { next: first }
    }

    pub fn observe(&mut self, id: RegionId) {
        if id.0 >= self.next {
            self.next = id.0.saturating_add(1);
        }
    }

    pub fn allocate(&mut self) -> RegionId {
        let id = RegionId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// One region as sampled during a poll.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionProbe {
    pub id: RegionId,
    pub bounds: Result<Span, GeometryError>,
}

/// Live geometry provider queried once per poll.
///
/// The region set may differ between calls as elements come and go.
pub trait RegionSource {
    /// Current extent of the scan indicator.
    fn scan_span(&self) -> Result<Span, GeometryError>;
    /// Visible area in the same coordinate space as the spans.
    fn viewport(&self) -> Span;
    fn probes(&self) -> Vec<RegionProbe>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Proximity {
    #[default]
    Idle,
    Approaching,
    Contact,
}

impl Proximity {
    pub fn as_str(self) -> &'static str {
        match self {
            Proximity::Idle => "idle",
            Proximity::Approaching => "approaching",
            Proximity::Contact => "contact",
        }
    }
}

/// Thresholds and timings for the detector.
///
/// - `contact_threshold`: minimum contact radius around a region's center
/// - `approach_threshold`: outer radius for `Approaching`
/// - `approach_padding`: region bounds are widened by this for `Approaching`
/// - `min_half_height`: floor applied to a region's half-height
/// - `viewport_buffer`: regions outside the viewport widened by this are pruned
/// - `cooldown`: minimum gap between one-shots of the same kind for one region
#[derive(Clone, Debug, PartialEq)]
pub struct ProximityConfig {
    pub poll_interval: Duration,
    pub contact_threshold: f32,
    pub approach_threshold: f32,
    pub approach_padding: f32,
    pub min_half_height: f32,
    pub viewport_buffer: f32,
    pub cooldown: Duration,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            contact_threshold: CONTACT_THRESHOLD_PX,
            approach_threshold: APPROACH_THRESHOLD_PX,
            approach_padding: APPROACH_PADDING_PX,
            min_half_height: MIN_HALF_HEIGHT_PX,
            viewport_buffer: VIEWPORT_BUFFER_PX,
            cooldown: TRIGGER_COOLDOWN,
        }
    }
}

/// Classify one region against the scan coordinate.
///
/// Both comparisons are strict: a distance equal to a threshold is outside it.
pub fn classify(scan_y: f32, span: Span, config: &ProximityConfig) -> Proximity {
    let half = span.half_height().max(config.min_half_height);
    let distance = (scan_y - span.center()).abs();
    if distance < config.contact_threshold.max(half) {
        Proximity::Contact
    } else if distance < config.approach_threshold
        && span.padded(config.approach_padding).contains(scan_y)
    {
        Proximity::Approaching
    } else {
        Proximity::Idle
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Trigger {
    Contact,
    Approach,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProximityEvent {
    /// The region's classification changed; markers should follow.
    Classified { id: RegionId, proximity: Proximity },
    /// The region entered contact.
    Contact { id: RegionId, scan_y: f32 },
    /// The region started approaching from idle.
    Approach { id: RegionId, scan_y: f32 },
}

#[derive(Clone, Debug, Default)]
pub struct PollReport {
    /// Beam center used for this poll; `None` when the poll was skipped.
    pub scan_y: Option<f32>,
    /// Classification of every region evaluated this poll.
    pub regions: Vec<(RegionId, Proximity)>,
    pub events: SmallVec<[ProximityEvent; 4]>,
    pub any_contact: bool,
    pub skipped: bool,
}

impl PollReport {
    pub fn triggers(&self) -> impl Iterator<Item = &ProximityEvent> {
        self.events
            .iter()
            .filter(|e| !matches!(e, ProximityEvent::Classified { .. }))
    }
}

pub struct ProximityDetector {
    config: ProximityConfig,
    // Only non-idle regions are kept.
    states: FnvHashMap<RegionId, Proximity>,
    last_fired: FnvHashMap<(RegionId, Trigger), Duration>,
    any_contact: bool,
}

impl ProximityDetector {
    pub fn new(config: ProximityConfig) -> Self {
        Self {
            config,
            states: FnvHashMap::default(),
            last_fired: FnvHashMap::default(),
            any_contact: false,
        }
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    pub fn proximity_of(&self, id: RegionId) -> Proximity {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn any_contact(&self) -> bool {
        self.any_contact
    }

    /// Forget every classification and cooldown.
    pub fn reset(&mut self) {
        self.states.clear();
        self.last_fired.clear();
        self.any_contact = false;
    }

    pub fn poll<S: RegionSource + ?Sized>(&mut self, source: &S, now: Duration) -> PollReport {
        let mut report = PollReport::default();
        let scan_y = match source.scan_span() {
            Ok(span) => span.center(),
            Err(e) => {
                log::debug!("[proximity] poll skipped: {}", e);
                report.skipped = true;
                return report;
            }
        };
        report.scan_y = Some(scan_y);
        let viewport = source.viewport().padded(self.config.viewport_buffer);

        let mut seen = FnvHashSet::default();
        for probe in source.probes() {
            let id = probe.id;
            seen.insert(id);
            let span = match probe.bounds {
                Ok(span) => span,
                Err(e) => {
                    log::trace!("[proximity] {} skipped: {}", id, e);
                    // Held state still counts until the region reads again.
                    report.any_contact |= self.proximity_of(id) == Proximity::Contact;
                    continue;
                }
            };
            let next = if span.overlaps(&viewport) {
                classify(scan_y, span, &self.config)
            } else {
                Proximity::Idle
            };
            let prev = self.proximity_of(id);
            if next != prev {
                report.events.push(ProximityEvent::Classified {
                    id,
                    proximity: next,
                });
                match (prev, next) {
                    (_, Proximity::Contact) => {
                        self.fire(Trigger::Contact, id, scan_y, now, &mut report.events)
                    }
                    (Proximity::Idle, Proximity::Approaching) => {
                        self.fire(Trigger::Approach, id, scan_y, now, &mut report.events)
                    }
                    _ => {}
                }
                if next == Proximity::Idle {
                    self.states.remove(&id);
                } else {
                    self.states.insert(id, next);
                }
            }
            report.any_contact |= next == Proximity::Contact;
            report.regions.push((id, next));
        }

        self.states.retain(|id, _| seen.contains(id));
        let cooldown = self.config.cooldown;
        self.last_fired
            .retain(|_, at| now.saturating_sub(*at) < cooldown);

        if self.any_contact && !report.any_contact {
            log::debug!("[proximity] nothing in contact");
        }
        self.any_contact = report.any_contact;
        report
    }

    fn fire(
        &mut self,
        trigger: Trigger,
        id: RegionId,
        scan_y: f32,
        now: Duration,
        events: &mut SmallVec<[ProximityEvent; 4]>,
    ) {
        if let Some(at) = self.last_fired.get(&(id, trigger)) {
            if now.saturating_sub(*at) < self.config.cooldown {
                log::trace!("[proximity] {} {:?} suppressed by cooldown", id, trigger);
                return;
            }
        }
        self.last_fired.insert((id, trigger), now);
        events.push(match trigger {
            Trigger::Contact => ProximityEvent::Contact { id, scan_y },
            Trigger::Approach => ProximityEvent::Approach { id, scan_y },
        });
    }
}
