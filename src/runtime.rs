use crate::audio::TankAudio;
use crate::config::TankConfig;
use crate::constants::FIRST_DYNAMIC_REGION_ID;
use crate::core::{
    LifecycleBroadcaster, LifecycleState, PollReport, ProximityDetector, ProximityEvent,
    SpecimenRegistry,
};
use crate::dom;
use crate::regions::{self, DomRegionSource};
use crate::timers::{self, Interval};
use crate::visuals::{self, ParticleView};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use web_sys as web;

#[derive(Default)]
struct Timers {
    tick: Option<Interval>,
    transient: Option<Interval>,
    poll: Option<Interval>,
}

/// Optional collaborators; each one that failed to initialize is `None`.
pub struct Collaborators {
    pub audio: Option<Rc<TankAudio>>,
    pub tank_el: Option<web::HtmlElement>,
    pub particles: Option<Rc<RefCell<ParticleView>>>,
}

/// Owns the lifecycle broadcaster, the proximity detector and the intervals
/// that drive them.
pub struct Tank {
    config: TankConfig,
    origin: Instant,
    document: web::Document,
    registry: SpecimenRegistry,
    lifecycle: Rc<RefCell<LifecycleBroadcaster>>,
    detector: Rc<RefCell<ProximityDetector>>,
    audio: Option<Rc<TankAudio>>,
    particles: Option<Rc<RefCell<ParticleView>>>,
    timers: RefCell<Timers>,
    alive: Rc<Cell<bool>>,
}

impl Tank {
    pub fn new(
        document: web::Document,
        config: TankConfig,
        registry: SpecimenRegistry,
        parts: Collaborators,
    ) -> Self {
        let origin = Instant::now();
        let mut lifecycle = LifecycleBroadcaster::new(config.lifecycle.clone(), Duration::ZERO);

        if let Some(audio) = parts.audio.clone() {
            lifecycle.subscribe(move |state: LifecycleState| -> anyhow::Result<()> {
                audio.apply_lifecycle(state);
                Ok(())
            });
        }
        if let Some(tank_el) = parts.tank_el {
            lifecycle.subscribe(move |state: LifecycleState| -> anyhow::Result<()> {
                visuals::apply_tank_state(&tank_el, state)
            });
        }
        if let Some(view) = parts.particles.clone() {
            lifecycle.subscribe(move |state: LifecycleState| -> anyhow::Result<()> {
                view.try_borrow_mut()
                    .map_err(|_| anyhow::anyhow!("particle view busy"))?
                    .apply_lifecycle(state);
                Ok(())
            });
        }
        log::info!("[tank] {} lifecycle observers", lifecycle.observer_count());

        Self {
            detector: Rc::new(RefCell::new(ProximityDetector::new(config.proximity.clone()))),
            lifecycle: Rc::new(RefCell::new(lifecycle)),
            config,
            origin,
            document,
            registry,
            audio: parts.audio,
            particles: parts.particles,
            timers: RefCell::new(Timers::default()),
            alive: Rc::new(Cell::new(true)),
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    pub fn registry(&self) -> &SpecimenRegistry {
        &self.registry
    }

    pub fn is_paused(&self) -> bool {
        self.lifecycle.borrow().is_paused()
    }

    #[inline]
    fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn start(&self) -> anyhow::Result<()> {
        if !self.is_alive() {
            anyhow::bail!("tank was torn down");
        }
        self.start_timers()?;
        if let Some(view) = self.particles.clone() {
            let alive = self.alive.clone();
            timers::start_frame_loop(move || {
                if alive.get() {
                    view.borrow_mut().frame();
                }
                alive.get()
            });
        }
        log::info!("[tank] started");
        Ok(())
    }

    fn start_timers(&self) -> anyhow::Result<()> {
        let origin = self.origin;
        let mut timers = self.timers.borrow_mut();

        let lifecycle = self.lifecycle.clone();
        timers.tick = Some(Interval::start(self.config.lifecycle.tick_interval, move || {
            lifecycle.borrow_mut().tick(origin.elapsed());
        })?);

        let lifecycle = self.lifecycle.clone();
        timers.transient = Some(Interval::start(
            self.config.lifecycle.transient_interval,
            move || {
                if lifecycle.borrow_mut().trigger_transient(origin.elapsed()) {
                    log::debug!("[tank] scheduled transient");
                }
            },
        )?);

        let detector = self.detector.clone();
        let document = self.document.clone();
        let source = DomRegionSource::new(self.document.clone(), FIRST_DYNAMIC_REGION_ID);
        let audio = self.audio.clone();
        timers.poll = Some(Interval::start(self.config.proximity.poll_interval, move || {
            let report = detector.borrow_mut().poll(&source, origin.elapsed());
            regions::apply_markers(&document, &report);
            if let Some(audio) = &audio {
                dispatch_triggers(audio, &report);
            }
        })?);
        Ok(())
    }

    fn stop_timers(&self) {
        *self.timers.borrow_mut() = Timers::default();
    }

    pub fn pause(&self) -> bool {
        if !self.is_alive() || !self.lifecycle.borrow_mut().pause(self.now()) {
            return false;
        }
        self.stop_timers();
        if let Some(view) = &self.particles {
            view.borrow_mut().set_running(false);
        }
        true
    }

    pub fn resume(&self) -> anyhow::Result<bool> {
        if !self.is_alive() || !self.lifecycle.borrow_mut().resume(self.now()) {
            return Ok(false);
        }
        self.start_timers()?;
        if let Some(view) = &self.particles {
            view.borrow_mut().set_running(true);
        }
        Ok(true)
    }

    pub fn toggle_pause(&self) {
        if self.is_paused() {
            if let Err(e) = self.resume() {
                log::error!("[tank] resume failed: {:#}", e);
            }
        } else {
            self.pause();
        }
    }

    /// User engagement: suppress the transient and wake the audio context.
    pub fn interaction(&self) {
        if !self.is_alive() {
            return;
        }
        if let Some(audio) = &self.audio {
            audio.resume();
        }
        self.lifecycle.borrow_mut().interaction(self.now());
    }

    pub fn trigger_transient(&self) -> bool {
        self.is_alive() && self.lifecycle.borrow_mut().trigger_transient(self.now())
    }

    pub fn resize(&self) {
        if !self.is_alive() {
            return;
        }
        if let Some(view) = &self.particles {
            view.borrow_mut().resize();
        }
    }

    pub fn teardown(&self) {
        if !self.is_alive() {
            return;
        }
        self.stop_timers();
        self.alive.set(false);
        let mut lifecycle = self.lifecycle.borrow_mut();
        let failures = lifecycle.failure_count();
        lifecycle.teardown(self.now());
        self.detector.borrow_mut().reset();
        log::info!("[tank] torn down ({} observer failures)", failures);
    }
}

fn dispatch_triggers(audio: &TankAudio, report: &PollReport) {
    let height = dom::viewport_height().max(1.0);
    for ev in report.triggers() {
        match *ev {
            ProximityEvent::Contact { id, scan_y } => {
                log::debug!("[tank] contact {} at y={:.0}", id, scan_y);
                audio.contact_blip(1.0 - scan_y / height);
            }
            ProximityEvent::Approach { .. } => audio.approach_tick(),
            ProximityEvent::Classified { .. } => {}
        }
    }
}
