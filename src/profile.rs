//! Rotationally-symmetric crystal profiles.
//!
//! A [`Profile`] is the ordered list of `(r, z)` points tracing one half of
//! the axial cross-section of a crystal. Revolving it about the `z` axis
//! gives the solid. Profiles are assembled piecewise by a [`ProfileBuilder`],
//! one geometric feature at a time, in the order the outline is walked.
//!
//! Coordinates are stored as [`Coord`] with `x = r` and `y = z`, so the
//! profile can be handed directly to `geo` for area and centroid queries.

use std::f64::consts::PI;

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, Centroid};
use geo_types::{Coord, Line, LineString, Polygon};
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::config::PROFILE_TOLERANCE;

/// Accumulates profile points in construction order.
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    coords: Vec<Coord<f64>>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single `(r, z)` point.
    pub fn point(&mut self, r: f64, z: f64) -> &mut Self {
        self.coords.push(Coord { x: r, y: z });
        self
    }

    /// Appends several `(r, z)` points in order.
    pub fn points(&mut self, points: &[(f64, f64)]) -> &mut Self {
        self.coords
            .extend(points.iter().map(|&(r, z)| Coord { x: r, y: z }));
        self
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn build(self) -> Profile {
        Profile {
            coords: self.coords,
        }
    }
}

/// Reasons a profile cannot describe a valid solid of revolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileDefect {
    #[error("profile has only {0} distinct points")]
    TooFewPoints(usize),

    #[error("point {index} has negative radius {r}")]
    NegativeRadius { index: usize, r: f64 },

    #[error("segments starting at points {first} and {second} intersect")]
    SelfIntersection { first: usize, second: usize },
}

/// Closed `(r, z)` outline of a crystal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    coords: Vec<Coord<f64>>,
}

impl Profile {
    pub fn coords(&self) -> &[Coord<f64>] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Radial coordinates in order.
    pub fn r(&self) -> Vec<f64> {
        self.coords.iter().map(|c| c.x).collect()
    }

    /// Axial coordinates in order.
    pub fn z(&self) -> Vec<f64> {
        self.coords.iter().map(|c| c.y).collect()
    }

    /// The profile as a closed polygon in the `(r, z)` plane.
    pub fn polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.coords.clone()), vec![])
    }

    /// Area enclosed by the profile, in mm^2.
    pub fn area(&self) -> f64 {
        self.polygon().unsigned_area()
    }

    /// Volume of the solid of revolution, in mm^3.
    ///
    /// Uses Pappus' centroid theorem: the swept volume is the profile area
    /// times the distance travelled by its centroid.
    pub fn volume(&self) -> f64 {
        let polygon = self.polygon();
        match polygon.centroid() {
            Some(centroid) => 2.0 * PI * centroid.x() * polygon.unsigned_area(),
            None => 0.0,
        }
    }

    /// Lowest and highest `z` of the profile.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.coords.iter().map(|c| c.y).minmax().into_option()
    }

    /// Largest radius at which the outline crosses height `z`.
    pub fn outer_radius_at(&self, z: f64) -> Option<f64> {
        self.closed_segments()
            .filter_map(|(a, b)| {
                if (a.y - z) * (b.y - z) > 0.0 {
                    None
                } else if a.y == b.y {
                    Some(a.x.max(b.x))
                } else {
                    Some(a.x + (z - a.y) * (b.x - a.x) / (b.y - a.y))
                }
            })
            .reduce(f64::max)
    }

    /// Checks that the outline is a simple closed curve in the half plane
    /// `r >= 0`. Zero-length segments are skipped.
    pub fn validate(&self) -> Result<(), ProfileDefect> {
        if let Some((index, c)) = self.coords.iter().enumerate().find(|(_, c)| c.x < 0.0) {
            return Err(ProfileDefect::NegativeRadius { index, r: c.x });
        }

        let n = self.coords.len();
        let segments: Vec<(usize, Line<f64>)> = (0..n)
            .map(|i| (i, Line::new(self.coords[i], self.coords[(i + 1) % n])))
            .filter(|(_, line)| {
                let d = line.delta();
                d.x.hypot(d.y) > PROFILE_TOLERANCE
            })
            .collect();

        let m = segments.len();
        if m < 3 {
            return Err(ProfileDefect::TooFewPoints(m));
        }

        for ((i, (first, a)), (j, (second, b))) in
            segments.iter().enumerate().tuple_combinations()
        {
            let adjacent = j == i + 1 || (i == 0 && j == m - 1);
            match line_intersection(*a, *b) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(_) => {
                    return Err(ProfileDefect::SelfIntersection {
                        first: *first,
                        second: *second,
                    })
                }
            }
        }

        Ok(())
    }

    fn closed_segments(&self) -> impl Iterator<Item = (Coord<f64>, Coord<f64>)> + '_ {
        let n = self.coords.len();
        (0..n).map(move |i| (self.coords[i], self.coords[(i + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cylinder(radius: f64, height: f64) -> Profile {
        let mut builder = ProfileBuilder::new();
        builder.points(&[(0.0, 0.0), (radius, 0.0), (radius, height), (0.0, height)]);
        builder.build()
    }

    #[test]
    fn builder_keeps_order() {
        let mut builder = ProfileBuilder::new();
        builder.point(0.0, 0.0).point(1.0, 0.0).points(&[(1.0, 2.0), (0.0, 2.0)]);
        let profile = builder.build();

        assert_eq!(profile.r(), vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(profile.z(), vec![0.0, 0.0, 2.0, 2.0]);
    }

    #[test]
    fn cylinder_volume() {
        let profile = cylinder(40.0, 100.0);
        assert_relative_eq!(profile.area(), 4000.0, max_relative = 1e-12);
        assert_relative_eq!(profile.volume(), PI * 40.0 * 40.0 * 100.0, max_relative = 1e-12);
    }

    #[test]
    fn hollow_cylinder_volume() {
        let mut builder = ProfileBuilder::new();
        builder.points(&[(5.0, 0.0), (40.0, 0.0), (40.0, 100.0), (5.0, 100.0)]);
        let profile = builder.build();
        let expected = PI * (40.0_f64.powi(2) - 5.0_f64.powi(2)) * 100.0;
        assert_relative_eq!(profile.volume(), expected, max_relative = 1e-12);
    }

    #[test]
    fn cone_volume() {
        let mut builder = ProfileBuilder::new();
        builder.points(&[(0.0, 0.0), (30.0, 0.0), (0.0, 60.0)]);
        let profile = builder.build();
        assert_relative_eq!(
            profile.volume(),
            PI * 30.0 * 30.0 * 60.0 / 3.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn outer_radius_follows_taper() {
        let mut builder = ProfileBuilder::new();
        builder.points(&[(0.0, 0.0), (30.0, 0.0), (40.0, 10.0), (40.0, 50.0), (0.0, 50.0)]);
        let profile = builder.build();

        assert_relative_eq!(profile.outer_radius_at(0.0).unwrap(), 30.0);
        assert_relative_eq!(profile.outer_radius_at(5.0).unwrap(), 35.0);
        assert_relative_eq!(profile.outer_radius_at(25.0).unwrap(), 40.0);
        assert!(profile.outer_radius_at(60.0).is_none());
        assert_eq!(profile.z_range(), Some((0.0, 50.0)));
    }

    #[test]
    fn valid_profile_passes() {
        assert_eq!(cylinder(10.0, 10.0).validate(), Ok(()));
    }

    #[test]
    fn repeated_points_are_tolerated() {
        let mut builder = ProfileBuilder::new();
        builder.points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        assert_eq!(builder.build().validate(), Ok(()));
    }

    #[test]
    fn crossing_profile_is_rejected() {
        // bottom taper wider than the crystal height
        let mut builder = ProfileBuilder::new();
        builder.points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 20.0), (12.0, -5.0), (0.0, 10.0)]);
        assert!(matches!(
            builder.build().validate(),
            Err(ProfileDefect::SelfIntersection { .. })
        ));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let mut builder = ProfileBuilder::new();
        builder.points(&[(0.0, 0.0), (-1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(
            builder.build().validate(),
            Err(ProfileDefect::NegativeRadius { index: 1, r: -1.0 })
        );
    }

    #[test]
    fn degenerate_profile_is_rejected() {
        let mut builder = ProfileBuilder::new();
        builder.points(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(builder.build().validate(), Err(ProfileDefect::TooFewPoints(2)));
    }
}
