//! Solids and logical volumes, referenced by name within a [`Registry`].
//!
//! [`Registry`]: crate::registry::Registry

use nalgebra::Vector3;
use serde::Serialize;

use crate::profile::Profile;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Solid {
    /// Solid of revolution of an `(r, z)` outline. Angles in radians.
    GenericPolycone {
        name: String,
        start_phi: f64,
        delta_phi: f64,
        r: Vec<f64>,
        z: Vec<f64>,
    },
    /// Axis-aligned box given by its half lengths in mm.
    Box {
        name: String,
        half_x: f64,
        half_y: f64,
        half_z: f64,
    },
    /// `minuend` with `subtrahend` removed. The subtrahend is rotated by the
    /// `xyz` Euler angles in `rotation` and then moved to `position`.
    Subtraction {
        name: String,
        minuend: String,
        subtrahend: String,
        rotation: Vector3<f64>,
        position: Vector3<f64>,
    },
}

impl Solid {
    pub fn polycone(name: &str, profile: &Profile, start_phi: f64, delta_phi: f64) -> Self {
        Solid::GenericPolycone {
            name: name.to_string(),
            start_phi,
            delta_phi,
            r: profile.r(),
            z: profile.z(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Solid::GenericPolycone { name, .. }
            | Solid::Box { name, .. }
            | Solid::Subtraction { name, .. } => name,
        }
    }

    /// Names of the solids this one is built from.
    pub fn operands(&self) -> Vec<&str> {
        match self {
            Solid::Subtraction {
                minuend,
                subtrahend,
                ..
            } => vec![minuend.as_str(), subtrahend.as_str()],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: String,
    pub material: String,
}
