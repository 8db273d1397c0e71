#![cfg(target_arch = "wasm32")]
use crate::core::SpecimenRegistry;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod catalog;
mod config;
mod constants;
pub mod core;
mod dom;
mod events;
mod keys;
mod popup;
mod regions;
mod runtime;
mod timers;
mod visuals;

use config::TankConfig;
use runtime::{Collaborators, Tank};

thread_local! {
    static TANK: RefCell<Option<Rc<Tank>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("specimen-tank starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    // The tank itself is the one hard requirement.
    let tank_el = dom::require_element(&document, constants::TANK_ID)?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if document.get_element_by_id(constants::BEAM_ID).is_none() {
        log::warn!("[tank] missing #{}; proximity polls will be skipped", constants::BEAM_ID);
    }

    let config = TankConfig::default();
    let registry = SpecimenRegistry::builtin();

    if let Err(e) = catalog::build(&document, &registry) {
        log::warn!("[catalog] not built: {:#}", e);
    }
    popup::hide(&document);

    let audio = match audio::TankAudio::build() {
        Ok(a) => Some(Rc::new(a)),
        Err(e) => {
            log::warn!("[audio] disabled: {:#}", e);
            None
        }
    };
    let particles = match build_particles(&document, &config) {
        Ok(v) => Some(Rc::new(RefCell::new(v))),
        Err(e) => {
            log::warn!("[particles] disabled: {:#}", e);
            None
        }
    };

    let tank = Rc::new(Tank::new(
        document.clone(),
        config,
        registry,
        Collaborators {
            audio,
            tank_el: Some(tank_el),
            particles,
        },
    ));
    tank.start()?;
    events::wire_all(&document, &tank);
    TANK.with(|t| *t.borrow_mut() = Some(tank));
    Ok(())
}

fn build_particles(
    document: &web::Document,
    config: &TankConfig,
) -> anyhow::Result<visuals::ParticleView> {
    let canvas = dom::require_element(document, constants::PARTICLE_CANVAS_ID)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    visuals::ParticleView::new(canvas, config.particle_count, config.particle_seed)
}

fn with_tank<R>(f: impl FnOnce(&Tank) -> R) -> Option<R> {
    TANK.with(|t| t.borrow().as_deref().map(f))
}

/// Stop every timer without losing state or observers.
#[wasm_bindgen]
pub fn pause() -> bool {
    with_tank(|t| t.pause()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn resume() -> bool {
    with_tank(|t| match t.resume() {
        Ok(resumed) => resumed,
        Err(e) => {
            log::error!("[tank] resume failed: {:#}", e);
            false
        }
    })
    .unwrap_or(false)
}

/// Force a transient event now; ignored while one is already running.
#[wasm_bindgen(js_name = triggerTransient)]
pub fn trigger_transient() -> bool {
    with_tank(|t| t.trigger_transient()).unwrap_or(false)
}

/// Report user engagement from the host page.
#[wasm_bindgen]
pub fn interaction() {
    with_tank(|t| t.interaction());
}

#[wasm_bindgen]
pub fn teardown() {
    if let Some(tank) = TANK.with(|t| t.borrow_mut().take()) {
        tank.teardown();
    }
}
