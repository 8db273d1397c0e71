use crate::constants::*;
use crate::core::{
    GeometryError, PollReport, Proximity, ProximityEvent, RegionId, RegionIdAllocator,
    RegionProbe, RegionSource, Span,
};
use crate::dom;
use std::cell::RefCell;
use web_sys as web;

/// Reads beam and region geometry straight from the document on every poll.
///
/// Host `[data-region]` elements are stamped with an id the first poll they
/// are seen, so regions added after startup are tracked too.
pub struct DomRegionSource {
    document: web::Document,
    ids: RefCell<RegionIdAllocator>,
}

impl DomRegionSource {
    pub fn new(document: web::Document, first_dynamic_id: u32) -> Self {
        Self {
            document,
            ids: RefCell::new(RegionIdAllocator::new(first_dynamic_id)),
        }
    }

    /// Give untagged host regions a stable id of their own.
    ///
    /// Returns the number of elements stamped.
    pub fn stamp_untagged(&self) -> usize {
        let untagged = dom::query_all(&self.document, UNTAGGED_REGION_SELECTOR);
        if untagged.is_empty() {
            return 0;
        }
        let mut ids = self.ids.borrow_mut();
        for el in dom::query_all(&self.document, REGION_SELECTOR) {
            if let Some(id) = region_id_of(&el) {
                ids.observe(id);
            }
        }
        for el in &untagged {
            let id = ids.allocate();
            _ = el.set_attribute(REGION_ID_ATTR, &id.0.to_string());
        }
        log::info!("[regions] stamped {} host regions", untagged.len());
        untagged.len()
    }
}

impl RegionSource for DomRegionSource {
    fn scan_span(&self) -> Result<Span, GeometryError> {
        let el = self
            .document
            .get_element_by_id(BEAM_ID)
            .ok_or_else(|| GeometryError::Detached(BEAM_ID.to_string()))?;
        element_span(&el, BEAM_ID)
    }

    fn viewport(&self) -> Span {
        Span::new(0.0, dom::viewport_height())
    }

    fn probes(&self) -> Vec<RegionProbe> {
        self.stamp_untagged();
        dom::query_all(&self.document, REGION_SELECTOR)
            .into_iter()
            .filter_map(|el| {
                let id = region_id_of(&el)?;
                let bounds = element_span(&el, &id.to_string());
                Some(RegionProbe { id, bounds })
            })
            .collect()
    }
}

fn element_span(el: &web::Element, name: &str) -> Result<Span, GeometryError> {
    if !el.is_connected() {
        return Err(GeometryError::Detached(name.to_string()));
    }
    let rect = el.get_bounding_client_rect();
    let (top, bottom) = (rect.top() as f32, rect.bottom() as f32);
    if !(top.is_finite() && bottom.is_finite()) {
        return Err(GeometryError::NonFinite(name.to_string()));
    }
    if rect.width() <= 0.0 && rect.height() <= 0.0 {
        // display:none and friends report an empty box at the origin
        return Err(GeometryError::NoLayout(name.to_string()));
    }
    Ok(Span::new(top, bottom))
}

fn region_id_of(el: &web::Element) -> Option<RegionId> {
    el.get_attribute(REGION_ID_ATTR)?
        .parse::<u32>()
        .ok()
        .map(RegionId)
}

fn region_element(document: &web::Document, id: RegionId) -> Option<web::Element> {
    let selector = format!("[{}=\"{}\"]", REGION_ID_ATTR, id.0);
    document.query_selector(&selector).ok().flatten()
}

/// Sync contact/approach classes and the tank's idle glow with a poll report.
pub fn apply_markers(document: &web::Document, report: &PollReport) {
    if report.skipped {
        return;
    }
    for ev in &report.events {
        if let ProximityEvent::Classified { id, proximity } = ev {
            // The element may have left the document since the poll.
            let Some(el) = region_element(document, *id) else {
                continue;
            };
            dom::set_class(&el, CONTACT_CLASS, *proximity == Proximity::Contact);
            dom::set_class(&el, APPROACH_CLASS, *proximity == Proximity::Approaching);
        }
    }
    if let Some(tank) = document.get_element_by_id(TANK_ID) {
        dom::set_class(&tank, IDLE_GLOW_CLASS, !report.any_contact);
    }
}
