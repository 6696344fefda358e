//! P-type point contact detectors.

use super::{bottom_taper, groove, top_taper};
use crate::metadata::Geometry;
use crate::profile::{Profile, ProfileBuilder};

pub fn profile(c: &Geometry) -> Profile {
    let mut builder = ProfileBuilder::new();
    let pp = &c.pp_contact;
    if pp.depth_in_mm > 0.0 {
        builder.points(&[
            (0.0, pp.depth_in_mm),
            (pp.radius_in_mm, pp.depth_in_mm),
            (pp.radius_in_mm, 0.0),
        ]);
    } else {
        builder.point(0.0, 0.0);
    }
    groove(&mut builder, c);
    bottom_taper(&mut builder, c);
    top_taper(&mut builder, c);
    builder.point(0.0, c.height_in_mm);
    builder.build()
}
