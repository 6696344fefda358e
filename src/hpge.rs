//! HPGe detector construction.
//!
//! A detector is built in three steps: the metadata is loaded, a [`Variant`]
//! is chosen from its `type` and `name`, and the variant's profile is turned
//! into a solid and a logical volume registered in a caller-supplied
//! [`Registry`].
//!
//! # Example
//!
//! ```no_run
//! use hpges::{make_hpge, HpgeOptions, Registry};
//!
//! let mut registry = Registry::new();
//! let detector = make_hpge("V99000A.json", &mut registry, HpgeOptions::default())?;
//! println!("{} weighs {:.1} g", detector.name(), detector.mass());
//! # Ok::<(), hpges::HpgeError>(())
//! ```

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::config::{MASS_DEVIATION_WARNING, MM3_PER_CM3};
use crate::error::{HpgeError, Result};
use crate::materials::{make_enriched_germanium, Material};
use crate::metadata::{Crack, Metadata, MetadataSource};
use crate::profile::Profile;
use crate::registry::Registry;
use crate::shapes::{self, crack::CrackCut};
use crate::solid::{LogicalVolume, Solid};

/// Crystal shape categories found in the metadata `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorType {
    /// `ppc`
    PointContact,
    /// `bege`
    Bege,
    /// `icpc`
    InvertedCoax,
    /// `coax`
    SemiCoax,
}

impl FromStr for DetectorType {
    type Err = HpgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ppc" => Ok(DetectorType::PointContact),
            "bege" => Ok(DetectorType::Bege),
            "icpc" => Ok(DetectorType::InvertedCoax),
            "coax" => Ok(DetectorType::SemiCoax),
            other => Err(HpgeError::UnknownDetectorType(Some(other.to_string()))),
        }
    }
}

/// Profile calculator selected for a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Ppc,
    Bege,
    InvertedCoax,
    SemiCoax,
    V07646A,
    V02160A,
    V02162B,
    P00664B,
}

/// Measured crystals whose dimensions need their own calculator.
const NAMED_VARIANTS: [(DetectorType, &str, Variant); 4] = [
    (DetectorType::PointContact, "P00664B", Variant::P00664B),
    (DetectorType::InvertedCoax, "V07646A", Variant::V07646A),
    (DetectorType::InvertedCoax, "V02160A", Variant::V02160A),
    (DetectorType::InvertedCoax, "V02162B", Variant::V02162B),
];

impl Variant {
    /// Picks the calculator for a `(type, name)` pair. Named crystals take
    /// precedence over the generic calculator of their type.
    pub fn resolve(detector_type: DetectorType, name: Option<&str>) -> Variant {
        let named = name.and_then(|name| {
            NAMED_VARIANTS
                .iter()
                .find(|(t, n, _)| *t == detector_type && *n == name)
                .map(|(_, _, variant)| *variant)
        });

        named.unwrap_or(match detector_type {
            DetectorType::PointContact => Variant::Ppc,
            DetectorType::Bege => Variant::Bege,
            DetectorType::InvertedCoax => Variant::InvertedCoax,
            DetectorType::SemiCoax => Variant::SemiCoax,
        })
    }

    /// Resolves the variant for a metadata record.
    pub fn for_metadata(metadata: &Metadata) -> Result<Variant> {
        let detector_type: DetectorType = metadata
            .detector_type
            .as_deref()
            .ok_or(HpgeError::UnknownDetectorType(None))?
            .parse()?;
        Ok(Variant::resolve(detector_type, metadata.name.as_deref()))
    }

    pub fn detector_type(&self) -> DetectorType {
        match self {
            Variant::Ppc | Variant::P00664B => DetectorType::PointContact,
            Variant::Bege => DetectorType::Bege,
            Variant::InvertedCoax | Variant::V07646A | Variant::V02160A | Variant::V02162B => {
                DetectorType::InvertedCoax
            }
            Variant::SemiCoax => DetectorType::SemiCoax,
        }
    }

    /// Computes the `(r, z)` outline of the crystal.
    pub fn profile(&self, metadata: &Metadata) -> Profile {
        let c = &metadata.geometry;
        match self {
            Variant::Ppc => shapes::ppc::profile(c),
            Variant::Bege => shapes::bege::profile(c),
            Variant::InvertedCoax => shapes::invcoax::profile(c),
            Variant::SemiCoax => shapes::semicoax::profile(c),
            Variant::V07646A => shapes::v07646a::profile(c),
            Variant::V02160A => shapes::v02160a::profile(c),
            Variant::V02162B => shapes::v02162b::profile(c),
            Variant::P00664B => shapes::p00664b::profile(c),
        }
    }

    /// The crack carved out of the solid, for cracked crystals.
    pub fn crack(&self, metadata: &Metadata) -> Option<Crack> {
        match self {
            Variant::V02160A => shapes::v02160a::crack(&metadata.geometry),
            Variant::P00664B => shapes::p00664b::crack(&metadata.geometry),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Ppc => "PPC",
            Variant::Bege => "BEGe",
            Variant::InvertedCoax => "InvertedCoax",
            Variant::SemiCoax => "SemiCoax",
            Variant::V07646A => "V07646A",
            Variant::V02160A => "V02160A",
            Variant::V02162B => "V02162B",
            Variant::P00664B => "P00664B",
        };
        write!(f, "{}", name)
    }
}

/// Overrides and construction switches for [`make_hpge`].
#[derive(Debug, Clone)]
pub struct HpgeOptions {
    /// Name of the solid and logical volume. Defaults to the metadata name.
    pub name: Option<String>,
    /// Crystal material. Defaults to germanium with the metadata enrichment.
    pub material: Option<Material>,
    /// radians
    pub start_phi: f64,
    /// radians
    pub delta_phi: f64,
    /// Reject self-intersecting profiles instead of logging a warning.
    pub validate_profile: bool,
}

impl Default for HpgeOptions {
    fn default() -> Self {
        Self {
            name: None,
            material: None,
            start_phi: 0.0,
            delta_phi: TAU,
            validate_profile: false,
        }
    }
}

impl HpgeOptions {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
}

/// A constructed detector crystal.
#[derive(Debug, Clone)]
pub struct Hpge {
    variant: Variant,
    name: String,
    metadata: Metadata,
    profile: Profile,
    material: Material,
    solid: String,
    logical_volume: String,
    volume: f64,
    full_volume: f64,
}

impl Hpge {
    /// Builds a detector with a given calculator, bypassing the `type`/`name`
    /// dispatch of [`make_hpge`].
    pub fn new(
        variant: Variant,
        metadata: impl Into<MetadataSource>,
        registry: &mut Registry,
        options: HpgeOptions,
    ) -> Result<Self> {
        let metadata = metadata.into().load()?;

        let material = match options.material {
            Some(material) => material,
            None => {
                let enrichment = metadata.enrichment().ok_or(HpgeError::MissingEnrichment)?;
                make_enriched_germanium(enrichment)
            }
        };
        let name = match options.name {
            Some(name) => name,
            None => metadata.name.clone().ok_or(HpgeError::MissingName)?,
        };

        let profile = variant.profile(&metadata);
        debug!(%name, %variant, points = profile.len(), "computed profile");

        if let Err(defect) = profile.validate() {
            if options.validate_profile {
                return Err(HpgeError::InvalidProfile {
                    name,
                    reason: defect.to_string(),
                });
            }
            warn!(%name, %defect, "profile does not describe a simple outline");
        }

        let mut volume = profile.volume();

        let solids = match variant.crack(&metadata) {
            Some(crack) => {
                let CrackCut {
                    half_size,
                    rotation,
                    position,
                } = shapes::crack::cut(&metadata.geometry, &crack);
                volume -= shapes::crack::removed_volume(&profile, &metadata.geometry, &crack);

                let uncracked = format!("{}_uncracked", name);
                let cut = format!("{}_crack", name);
                vec![
                    Solid::polycone(&uncracked, &profile, options.start_phi, options.delta_phi),
                    Solid::Box {
                        name: cut.clone(),
                        half_x: half_size,
                        half_y: half_size,
                        half_z: half_size,
                    },
                    Solid::Subtraction {
                        name: name.clone(),
                        minuend: uncracked,
                        subtrahend: cut,
                        rotation,
                        position,
                    },
                ]
            }
            None => vec![Solid::polycone(&name, &profile, options.start_phi, options.delta_phi)],
        };

        let names: Vec<&str> = solids.iter().map(Solid::name).collect();
        registry.check_free(&names, &name, &material)?;

        for solid in solids {
            registry.add_solid(solid)?;
        }
        let material_name = registry.add_material(material.clone())?;
        registry.add_logical_volume(LogicalVolume {
            name: name.clone(),
            solid: name.clone(),
            material: material_name,
        })?;

        let detector = Hpge {
            variant,
            name: name.clone(),
            metadata,
            profile,
            material,
            solid: name.clone(),
            logical_volume: name,
            // the full solid of revolution is scaled down for partial sweeps
            volume: volume * options.delta_phi / TAU,
            full_volume: volume,
        };
        if detector.deviates_from_production_mass() {
            warn!(
                name = %detector.name,
                computed = format!("{:.1}", detector.full_mass()),
                expected = ?detector.metadata.production.mass_in_g,
                "computed mass differs from production mass"
            );
        }
        info!(
            name = %detector.name,
            variant = %detector.variant,
            mass_in_g = format!("{:.1}", detector.mass()),
            "constructed detector"
        );

        Ok(detector)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Registry name of the detector solid.
    pub fn solid(&self) -> &str {
        &self.solid
    }

    /// Registry name of the detector logical volume.
    pub fn logical_volume(&self) -> &str {
        &self.logical_volume
    }

    /// Crystal volume in mm^3.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Crystal mass in g.
    pub fn mass(&self) -> f64 {
        self.volume / MM3_PER_CM3 * self.material.density_g_cm3
    }

    /// Mass in g of the whole crystal, as if swept over the full circle.
    pub fn full_mass(&self) -> f64 {
        self.full_volume / MM3_PER_CM3 * self.material.density_g_cm3
    }

    /// Whether the whole crystal mass is off from the production mass in the
    /// metadata. The production mass always refers to the whole crystal.
    pub fn deviates_from_production_mass(&self) -> bool {
        self.metadata
            .production
            .mass_in_g
            .is_some_and(|expected| mass_deviates(self.full_mass(), expected))
    }
}

/// Whether a computed crystal mass is off from the production mass by more
/// than [`MASS_DEVIATION_WARNING`]. A non-positive production mass is unset.
fn mass_deviates(computed: f64, expected: f64) -> bool {
    expected > 0.0 && (computed - expected).abs() / expected > MASS_DEVIATION_WARNING
}

/// Constructs an HPGe detector from its metadata.
///
/// The calculator is chosen from the metadata `type` and, for point contact
/// and inverted coax detectors, from the exact metadata `name` of a few
/// measured crystals. Name and material may be overridden through
/// `options`; without overrides they come from the metadata, and their
/// absence there is an error.
///
/// Nothing is registered unless construction succeeds.
pub fn make_hpge(
    metadata: impl Into<MetadataSource>,
    registry: &mut Registry,
    options: HpgeOptions,
) -> Result<Hpge> {
    let metadata = metadata.into().load()?;

    if options.material.is_none() && metadata.enrichment().is_none() {
        return Err(HpgeError::MissingEnrichment);
    }
    if options.name.is_none() && metadata.name.is_none() {
        return Err(HpgeError::MissingName);
    }

    let variant = Variant::for_metadata(&metadata)?;
    debug!(
        detector_type = metadata.detector_type.as_deref().unwrap_or_default(),
        name = metadata.name.as_deref().unwrap_or_default(),
        %variant,
        "resolved detector variant"
    );

    Hpge::new(variant, metadata, registry, options)
}
