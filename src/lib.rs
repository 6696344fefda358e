//! Solid geometry models of HPGe detector crystals.
//!
//! Detector metadata (dimensions, groove, tapers, borehole and the bespoke
//! features of a few measured crystals) is turned into a polycone `(r, z)`
//! profile, a solid and a logical volume in a [`Registry`], with enriched or
//! natural germanium as material.

pub mod config;
pub mod error;
pub mod hpge;
pub mod materials;
pub mod metadata;
pub mod profile;
pub mod registry;
pub mod settings;
pub mod shapes;
pub mod solid;

pub use error::{HpgeError, RegistryError};
pub use hpge::{make_hpge, DetectorType, Hpge, HpgeOptions, Variant};
pub use materials::{make_enriched_germanium, natural_germanium, Material};
pub use metadata::{Metadata, MetadataSource};
pub use profile::{Profile, ProfileBuilder};
pub use registry::Registry;
pub use solid::{LogicalVolume, Solid};
