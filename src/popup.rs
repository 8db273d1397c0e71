use crate::constants::{POPUP_BODY_ID, POPUP_HIDDEN_CLASS, POPUP_ID};
use crate::core::Specimen;
use web_sys as web;

pub fn show(document: &web::Document, specimen: &Specimen) {
    let Some(el) = document.get_element_by_id(POPUP_ID) else {
        log::warn!("[popup] missing #{}", POPUP_ID);
        return;
    };
    if let Some(body) = document.get_element_by_id(POPUP_BODY_ID) {
        body.set_inner_html(&render(specimen));
    }
    _ = el.class_list().remove_1(POPUP_HIDDEN_CLASS);
    // fallback for host pages without the stylesheet
    _ = el.set_attribute("style", "");
}

pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(POPUP_ID) {
        _ = el.class_list().add_1(POPUP_HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn is_visible(document: &web::Document) -> bool {
    document
        .get_element_by_id(POPUP_ID)
        .map(|el| !el.class_list().contains(POPUP_HIDDEN_CLASS))
        .unwrap_or(false)
}

fn render(s: &Specimen) -> String {
    format!(
        "<h2 class='specimen-code'>{code}</h2>\
         <h3 class='specimen-name'>{name}</h3>\
         <dl>\
         <dt>Classification</dt><dd>{class}</dd>\
         <dt>Habitat</dt><dd>{habitat}</dd>\
         <dt>Hazard</dt><dd class='hazard-{hazard}'>{hazard}</dd>\
         </dl>\
         <p>{desc}</p>",
        code = s.code,
        name = s.name,
        class = s.classification,
        habitat = s.habitat,
        hazard = s.hazard.as_str(),
        desc = s.description,
    )
}
