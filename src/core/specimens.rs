#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hazard {
    Inert,
    Low,
    Moderate,
    Severe,
}

impl Hazard {
    pub fn as_str(self) -> &'static str {
        match self {
            Hazard::Inert => "inert",
            Hazard::Low => "low",
            Hazard::Moderate => "moderate",
            Hazard::Severe => "severe",
        }
    }
}

/// A single catalog entry.
///
/// `code` is the short tag printed on the tank glass; lookups by code ignore
/// ASCII case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Specimen {
    pub id: u32,
    pub code: &'static str,
    pub name: &'static str,
    pub classification: &'static str,
    pub habitat: &'static str,
    pub description: &'static str,
    pub hazard: Hazard,
}

pub static SPECIMENS: &[Specimen] = &[
    Specimen {
        id: 1,
        code: "AX-01",
        name: "Lantern Polyp",
        classification: "Cnidaria / bioluminescent",
        habitat: "Abyssal vent fringe",
        description: "Colonial polyp that pulses a faint cyan light when the scan beam passes.",
        hazard: Hazard::Inert,
    },
    Specimen {
        id: 2,
        code: "BX-14",
        name: "Glass Eel Larva",
        classification: "Anguilliformes / leptocephalus",
        habitat: "Open midwater",
        description: "Nearly transparent larva; only the eyes and gut register on the phosphor.",
        hazard: Hazard::Inert,
    },
    Specimen {
        id: 3,
        code: "CR-07",
        name: "Static Crab",
        classification: "Decapoda / unknown genus",
        habitat: "Tank substrate",
        description: "Carapace carries a residual charge that crackles through the speaker on contact.",
        hazard: Hazard::Low,
    },
    Specimen {
        id: 4,
        code: "DS-22",
        name: "Drift Siphonophore",
        classification: "Siphonophorae / chain colony",
        habitat: "Upper water column",
        description: "Chain colony that slowly reorders its segments between observation cycles.",
        hazard: Hazard::Moderate,
    },
    Specimen {
        id: 5,
        code: "EV-03",
        name: "Echo Nautilus",
        classification: "Cephalopoda / Nautilidae",
        habitat: "Reef slope",
        description: "Shell chambers resonate at the tank hum frequency and return a delayed echo.",
        hazard: Hazard::Low,
    },
    Specimen {
        id: 6,
        code: "FX-99",
        name: "Unlabelled Mass",
        classification: "Unclassified",
        habitat: "Tank floor, sealed compartment",
        description: "Recovered without field notes. Signal degrades whenever it is scanned directly.",
        hazard: Hazard::Severe,
    },
];

/// Lookup facade over a static specimen table.
#[derive(Clone, Copy, Debug)]
pub struct SpecimenRegistry {
    entries: &'static [Specimen],
}

impl SpecimenRegistry {
    pub fn builtin() -> Self {
        Self::from_static(SPECIMENS)
    }

    pub fn from_static(entries: &'static [Specimen]) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: u32) -> Option<&'static Specimen> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn by_code(&self, code: &str) -> Option<&'static Specimen> {
        let code = code.trim();
        self.entries
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Specimen> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpecimenRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
