//! Planar cracks through the bottom outer edge of a crystal.
//!
//! A crack is modelled as the half space beyond a plane. At the bottom face
//! the plane sits `radius_in_mm` inside the outer radius; it leans outward
//! going up, making `angle_in_deg` with the bottom face. The cracked solid is
//! the polycone minus a large box whose face lies on that plane.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;

use crate::config::CRACK_INTEGRATION_STEPS;
use crate::metadata::{Crack, Geometry};
use crate::profile::Profile;

/// Placement of the box that carves the crack out of the polycone.
#[derive(Debug, Clone, PartialEq)]
pub struct CrackCut {
    pub half_size: f64,
    pub rotation: Vector3<f64>,
    pub position: Vector3<f64>,
}

/// Distance of the crack plane from the axis at `z = 0`.
fn base_distance(c: &Geometry, crack: &Crack) -> f64 {
    c.radius_in_mm - crack.radius_in_mm
}

/// Distance of the crack plane from the axis at height `z`.
fn distance_at(c: &Geometry, crack: &Crack, z: f64) -> f64 {
    let tan = crack.angle_in_deg.to_radians().tan();
    if tan == 0.0 {
        return if z == 0.0 {
            base_distance(c, crack)
        } else {
            f64::INFINITY
        };
    }
    base_distance(c, crack) + z / tan
}

pub fn cut(c: &Geometry, crack: &Crack) -> CrackCut {
    let half_size = 2.0 * (c.radius_in_mm + c.height_in_mm);
    let angle = crack.angle_in_deg.to_radians();
    // outward normal of the plane in the xz plane
    let normal = Vector3::new(angle.sin(), 0.0, -angle.cos());
    let anchor = Vector3::new(base_distance(c, crack), 0.0, 0.0);

    CrackCut {
        half_size,
        rotation: Vector3::new(0.0, FRAC_PI_2 - angle, 0.0),
        position: anchor + normal * half_size,
    }
}

/// Area of the part of a disk of radius `rho` lying beyond a chord at
/// distance `d` from its centre.
fn circular_segment(rho: f64, d: f64) -> f64 {
    if d >= rho {
        0.0
    } else if d <= -rho {
        std::f64::consts::PI * rho * rho
    } else {
        rho * rho * (d / rho).acos() - d * (rho * rho - d * d).sqrt()
    }
}

/// Volume removed from the crystal by the crack, in mm^3.
///
/// Integrates the area cut from each horizontal slice over the height of the
/// profile with composite Simpson's rule. Slices are treated as full disks of
/// the local outer radius, so the crack is assumed not to reach any inner
/// cavity.
pub fn removed_volume(profile: &Profile, c: &Geometry, crack: &Crack) -> f64 {
    let Some((z_min, z_max)) = profile.z_range() else {
        return 0.0;
    };
    if z_max <= z_min {
        return 0.0;
    }

    let n = CRACK_INTEGRATION_STEPS;
    let h = (z_max - z_min) / n as f64;
    let slice = |z: f64| {
        let rho = profile.outer_radius_at(z).unwrap_or(0.0);
        circular_segment(rho, distance_at(c, crack, z))
    };

    let interior: f64 = (1..n)
        .map(|i| {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            weight * slice(z_min + i as f64 * h)
        })
        .sum();

    (slice(z_min) + interior + slice(z_max)) * h / 3.0
}
