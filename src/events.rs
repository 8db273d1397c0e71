use crate::constants::{CATALOG_ID, POPUP_CLOSE_ID, SPECIMEN_ATTR, SPECIMEN_SELECTOR};
use crate::keys::{self, KeyAction};
use crate::popup;
use crate::runtime::Tank;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_all(document: &web::Document, tank: &Rc<Tank>) {
    wire_catalog_clicks(document, tank);
    wire_popup_close(document);
    wire_global_keydown(document, tank);
    wire_pointer_interaction(tank);
    wire_resize(tank);
}

// Open the popup for whichever specimen was clicked.
fn wire_catalog_clicks(document: &web::Document, tank: &Rc<Tank>) {
    let tank = tank.clone();
    let doc = document.clone();
    let attached = crate::dom::add_click_listener(document, CATALOG_ID, move |ev| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        if let Ok(Some(el)) = target.closest(SPECIMEN_SELECTOR) {
            open_specimen(&doc, &tank, &el);
        }
    });
    if !attached {
        log::warn!("[events] catalog clicks disabled");
    }
}

fn wire_popup_close(document: &web::Document) {
    let doc = document.clone();
    crate::dom::add_click_listener(document, POPUP_CLOSE_ID, move |_| popup::hide(&doc));
}

fn open_specimen(document: &web::Document, tank: &Tank, el: &web::Element) {
    let Some(code) = el.get_attribute(SPECIMEN_ATTR) else {
        return;
    };
    match tank.registry().by_code(&code) {
        Some(specimen) => {
            log::info!("[events] opening {}", specimen.code);
            popup::show(document, specimen);
        }
        None => log::warn!("[events] unknown specimen code {:?}", code),
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, document: &web::Document, tank: &Tank) {
    let key = ev.key();
    if keys::counts_as_interaction(&key) {
        tank.interaction();
    }
    match keys::action_for_key(&key) {
        Some(KeyAction::ClosePopup) => {
            if popup::is_visible(document) {
                popup::hide(document);
            }
        }
        Some(KeyAction::TogglePause) => tank.toggle_pause(),
        Some(KeyAction::TriggerTransient) => {
            if !tank.trigger_transient() {
                log::debug!("[keys] transient already running or paused");
            }
        }
        Some(KeyAction::OpenFocused) => {
            let focused = document
                .active_element()
                .filter(|el| el.has_attribute(SPECIMEN_ATTR));
            if let Some(el) = focused {
                open_specimen(document, tank, &el);
                ev.prevent_default();
            }
        }
        None => {}
    }
}

fn wire_global_keydown(document: &web::Document, tank: &Rc<Tank>) {
    let Some(window) = web::window() else {
        return;
    };
    let tank = tank.clone();
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &doc, &tank);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Any pointer press counts as engagement and unlocks audio.
fn wire_pointer_interaction(tank: &Rc<Tank>) {
    let Some(window) = web::window() else {
        return;
    };
    let tank = tank.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        tank.interaction();
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(tank: &Rc<Tank>) {
    let Some(window) = web::window() else {
        return;
    };
    let tank = tank.clone();
    let closure = Closure::wrap(Box::new(move || tank.resize()) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
