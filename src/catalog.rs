use crate::constants::{CATALOG_ID, REGION_ID_ATTR, SPECIMEN_ATTR};
use crate::core::SpecimenRegistry;
use crate::dom;
use web_sys as web;

/// Populate the catalog container with one tagged element per specimen.
///
/// Specimen ids double as region ids, so each entry is tracked by the
/// proximity detector as soon as it is laid out.
pub fn build(document: &web::Document, registry: &SpecimenRegistry) -> anyhow::Result<usize> {
    let container = dom::require_element(document, CATALOG_ID)?;
    let mut added = 0;
    for specimen in registry.iter() {
        let el = document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!("create_element failed: {:?}", e))?;
        el.set_class_name(&format!("specimen hazard-{}", specimen.hazard.as_str()));
        _ = el.set_attribute(REGION_ID_ATTR, &specimen.id.to_string());
        _ = el.set_attribute(SPECIMEN_ATTR, specimen.code);
        _ = el.set_attribute("role", "button");
        _ = el.set_attribute("tabindex", "0");
        el.set_inner_html(&format!(
            "<span class='specimen-tag'>{}</span><span class='specimen-label'>{}</span>",
            specimen.code, specimen.name
        ));
        container
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!("append_child failed: {:?}", e))?;
        added += 1;
    }
    log::info!("[catalog] {} specimens on display", added);
    Ok(added)
}
