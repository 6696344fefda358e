//! Broad energy germanium detectors: a plain cylinder with an optional
//! groove and tapers.

use super::{bottom_taper, groove, top_taper};
use crate::metadata::Geometry;
use crate::profile::{Profile, ProfileBuilder};

pub fn profile(c: &Geometry) -> Profile {
    let mut builder = ProfileBuilder::new();
    builder.point(0.0, 0.0);
    groove(&mut builder, c);
    bottom_taper(&mut builder, c);
    top_taper(&mut builder, c);
    builder.point(0.0, c.height_in_mm);
    builder.build()
}
