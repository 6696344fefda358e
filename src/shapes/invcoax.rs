//! Inverted-coaxial point contact detectors.

use super::{bottom_taper, groove, top_borehole, top_taper};
use crate::metadata::Geometry;
use crate::profile::{Profile, ProfileBuilder};

pub fn profile(c: &Geometry) -> Profile {
    let mut builder = ProfileBuilder::new();
    builder.point(0.0, 0.0);
    groove(&mut builder, c);
    bottom_taper(&mut builder, c);
    top_taper(&mut builder, c);
    top_borehole(&mut builder, c);
    builder.build()
}
