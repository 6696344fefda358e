//! Germanium materials.
//!
//! Crystals are made either of natural germanium or of germanium enriched in
//! Ge-76, with the remainder taken to be Ge-74. Enriched material keeps the
//! atom density of natural germanium, so its mass density scales with the
//! mean molar mass of the isotope mixture.

use serde::Serialize;

use crate::config::NATURAL_GE_DENSITY;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Isotope {
    pub name: &'static str,
    pub z: u32,
    pub n: u32,
    /// g/mol
    pub molar_mass: f64,
}

pub const GE70: Isotope = Isotope {
    name: "Ge70",
    z: 32,
    n: 70,
    molar_mass: 69.924,
};
pub const GE72: Isotope = Isotope {
    name: "Ge72",
    z: 32,
    n: 72,
    molar_mass: 71.922,
};
pub const GE73: Isotope = Isotope {
    name: "Ge73",
    z: 32,
    n: 73,
    molar_mass: 72.923,
};
pub const GE74: Isotope = Isotope {
    name: "Ge74",
    z: 32,
    n: 74,
    molar_mass: 73.921,
};
pub const GE76: Isotope = Isotope {
    name: "Ge76",
    z: 32,
    n: 76,
    molar_mass: 75.921,
};

/// An element defined by its isotope abundances (atom fractions).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    pub symbol: String,
    pub isotopes: Vec<(Isotope, f64)>,
}

impl Element {
    /// Mean molar mass in g/mol.
    pub fn molar_mass(&self) -> f64 {
        let total: f64 = self.isotopes.iter().map(|(_, a)| a).sum();
        self.isotopes
            .iter()
            .map(|(iso, a)| iso.molar_mass * a)
            .sum::<f64>()
            / total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub name: String,
    pub density_g_cm3: f64,
    pub element: Element,
}

fn natural_element() -> Element {
    Element {
        name: "NaturalGermanium".to_string(),
        symbol: "NatGe".to_string(),
        isotopes: vec![
            (GE70, 0.2052),
            (GE72, 0.2745),
            (GE73, 0.0776),
            (GE74, 0.3652),
            (GE76, 0.0775),
        ],
    }
}

pub fn natural_germanium() -> Material {
    Material {
        name: "NaturalGermanium".to_string(),
        density_g_cm3: NATURAL_GE_DENSITY,
        element: natural_element(),
    }
}

/// Germanium with a Ge-76 fraction of `enrichment`, the rest Ge-74. The
/// name carries the exact fraction, so distinct enrichments never share a name.
pub fn make_enriched_germanium(enrichment: f64) -> Material {
    let element = Element {
        name: format!("ElementEnrichedGermanium{}", enrichment),
        symbol: "EnrGe".to_string(),
        isotopes: vec![(GE74, 1.0 - enrichment), (GE76, enrichment)],
    };
    let density = NATURAL_GE_DENSITY * element.molar_mass() / natural_element().molar_mass();

    Material {
        name: format!("EnrichedGermanium{}", enrichment),
        density_g_cm3: density,
        element,
    }
}
