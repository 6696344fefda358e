//! Detector metadata records.
//!
//! Metadata arrives as JSON documents describing the static properties of a
//! germanium diode: its name, crystal type, production details and geometry.
//! All lengths are in millimetres and all angles in degrees. Sub-records for
//! optional features default to zero, which marks the feature as absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HpgeError, Result};

/// Static description of one HPGe detector.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Metadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub detector_type: Option<String>,
    #[serde(default)]
    pub production: Production,
    #[serde(default)]
    pub geometry: Geometry,
}

impl Metadata {
    /// Parses metadata from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| HpgeError::MetadataRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|source| HpgeError::MetadataParse { source })
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|source| HpgeError::MetadataParse { source })
    }

    /// The enrichment fraction, if the metadata sets one.
    pub fn enrichment(&self) -> Option<f64> {
        self.production.enrichment.as_ref().map(Enrichment::value)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Production {
    #[serde(default)]
    pub enrichment: Option<Enrichment>,
    #[serde(default)]
    pub mass_in_g: Option<f64>,
}

/// Ge-76 enrichment, either as a bare fraction or as a measurement with
/// uncertainty.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Enrichment {
    Value(f64),
    Measured {
        val: f64,
        #[serde(default)]
        unc: Option<f64>,
    },
}

impl Enrichment {
    pub fn value(&self) -> f64 {
        match self {
            Enrichment::Value(v) => *v,
            Enrichment::Measured { val, .. } => *val,
        }
    }
}

/// Crystal dimensions.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Geometry {
    pub height_in_mm: f64,
    pub radius_in_mm: f64,
    pub groove: Groove,
    pub pp_contact: PointContact,
    pub borehole: Borehole,
    pub taper: Tapers,
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Groove {
    pub depth_in_mm: f64,
    pub radius_in_mm: GrooveRadius,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GrooveRadius {
    pub inner: f64,
    pub outer: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PointContact {
    pub radius_in_mm: f64,
    pub depth_in_mm: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Borehole {
    pub radius_in_mm: f64,
    pub depth_in_mm: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Tapers {
    pub top: Taper,
    pub bottom: Taper,
    pub borehole: Taper,
}

/// A conical chamfer. A zero height means no taper.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Taper {
    pub height_in_mm: f64,
    pub angle_in_deg: f64,
}

impl Taper {
    pub fn is_present(&self) -> bool {
        self.height_in_mm > 0.0
    }

    /// Radial extent of the chamfer.
    pub fn offset(&self) -> f64 {
        self.height_in_mm * self.angle_in_deg.to_radians().tan()
    }
}

/// Bespoke features of individually measured crystals.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Extra {
    pub bottom_cylinder: Option<BottomCylinder>,
    pub topgroove: Option<TopGroove>,
    pub crack: Option<Crack>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BottomCylinder {
    pub radius_in_mm: f64,
    pub height_in_mm: f64,
    pub transition_in_mm: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TopGroove {
    pub radius_in_mm: f64,
    pub depth_in_mm: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Crack {
    pub radius_in_mm: f64,
    pub angle_in_deg: f64,
}

/// Where detector metadata comes from.
#[derive(Debug, Clone)]
pub enum MetadataSource {
    Parsed(Metadata),
    Value(Value),
    Path(PathBuf),
}

impl MetadataSource {
    pub fn load(self) -> Result<Metadata> {
        match self {
            MetadataSource::Parsed(metadata) => Ok(metadata),
            MetadataSource::Value(value) => Metadata::from_value(value),
            MetadataSource::Path(path) => Metadata::from_file(path),
        }
    }
}

impl From<Metadata> for MetadataSource {
    fn from(metadata: Metadata) -> Self {
        MetadataSource::Parsed(metadata)
    }
}

impl From<&Metadata> for MetadataSource {
    fn from(metadata: &Metadata) -> Self {
        MetadataSource::Parsed(metadata.clone())
    }
}

impl From<Value> for MetadataSource {
    fn from(value: Value) -> Self {
        MetadataSource::Value(value)
    }
}

impl From<PathBuf> for MetadataSource {
    fn from(path: PathBuf) -> Self {
        MetadataSource::Path(path)
    }
}

impl From<&Path> for MetadataSource {
    fn from(path: &Path) -> Self {
        MetadataSource::Path(path.to_path_buf())
    }
}

impl From<&str> for MetadataSource {
    fn from(path: &str) -> Self {
        MetadataSource::Path(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn missing_features_default_to_absent() {
        let metadata = Metadata::from_value(json!({
            "name": "B00000A",
            "type": "bege",
            "geometry": { "height_in_mm": 30.0, "radius_in_mm": 35.0 }
        }))
        .unwrap();

        assert_eq!(metadata.geometry.groove.depth_in_mm, 0.0);
        assert!(!metadata.geometry.taper.top.is_present());
        assert!(metadata.geometry.extra.crack.is_none());
        assert_eq!(metadata.enrichment(), None);
    }

    #[test]
    fn enrichment_accepts_value_and_measurement() {
        let plain: Production = serde_json::from_value(json!({ "enrichment": 0.88 })).unwrap();
        assert_eq!(plain.enrichment.unwrap().value(), 0.88);

        let measured: Production =
            serde_json::from_value(json!({ "enrichment": { "val": 0.91, "unc": 0.003 } }))
                .unwrap();
        assert_eq!(measured.enrichment.unwrap().value(), 0.91);

        let null: Production = serde_json::from_value(json!({ "enrichment": null })).unwrap();
        assert!(null.enrichment.is_none());
    }

    #[test]
    fn taper_offset() {
        let taper = Taper {
            height_in_mm: 10.0,
            angle_in_deg: 45.0,
        };
        assert_relative_eq!(taper.offset(), 10.0, epsilon = 1e-12);
        assert_eq!(Taper::default().offset(), 0.0);
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = Metadata::from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, HpgeError::MetadataRead { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Metadata::from_json_str("{ \"name\": ").unwrap_err();
        assert!(matches!(err, HpgeError::MetadataParse { .. }));
    }
}
