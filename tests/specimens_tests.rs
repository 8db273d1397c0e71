// Host-side tests for the specimen registry.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod specimens {
    include!("../src/core/specimens.rs");
}

use specimens::*;
use std::collections::HashSet;

#[test]
fn builtin_table_has_unique_ids_and_codes() {
    let registry = SpecimenRegistry::builtin();
    assert!(!registry.is_empty());
    assert_eq!(registry.len(), SPECIMENS.len());

    let ids: HashSet<u32> = registry.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), registry.len(), "duplicate specimen id");
    let codes: HashSet<String> = registry.iter().map(|s| s.code.to_ascii_uppercase()).collect();
    assert_eq!(codes.len(), registry.len(), "duplicate specimen code");
}

#[test]
fn every_entry_is_fully_described() {
    for s in SpecimenRegistry::builtin().iter() {
        assert!(!s.name.is_empty(), "{} has no name", s.code);
        assert!(!s.classification.is_empty(), "{} has no classification", s.code);
        assert!(!s.description.is_empty(), "{} has no description", s.code);
        assert!(!s.habitat.is_empty(), "{} has no habitat", s.code);
    }
}

#[test]
fn lookup_by_id() {
    let registry = SpecimenRegistry::builtin();
    let first = &SPECIMENS[0];
    assert_eq!(registry.get(first.id), Some(first));
    assert_eq!(registry.get(u32::MAX), None);
}

#[test]
fn lookup_by_code_ignores_case_and_whitespace() {
    let registry = SpecimenRegistry::builtin();
    let crab = registry.by_code("CR-07").expect("static crab present");
    assert_eq!(crab.name, "Static Crab");
    assert_eq!(registry.by_code("  cr-07 "), Some(crab));
    assert!(registry.by_code("ZZ-00").is_none());
    assert!(registry.by_code("").is_none());
}

#[test]
fn custom_tables_are_supported() {
    static ONE: &[Specimen] = &[Specimen {
        id: 42,
        code: "T-1",
        name: "Test",
        classification: "Test",
        habitat: "Test",
        description: "Test",
        hazard: Hazard::Severe,
    }];
    let registry = SpecimenRegistry::from_static(ONE);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(42).map(|s| s.hazard), Some(Hazard::Severe));
}

#[test]
fn hazards_order_by_severity() {
    assert!(Hazard::Inert < Hazard::Low);
    assert!(Hazard::Low < Hazard::Moderate);
    assert!(Hazard::Moderate < Hazard::Severe);
    assert_eq!(Hazard::Moderate.as_str(), "moderate");
}
