//! Semi-coaxial detectors, with the borehole opening at the bottom face.

use super::{bottom_taper, groove, top_taper};
use crate::metadata::Geometry;
use crate::profile::{Profile, ProfileBuilder};

pub fn profile(c: &Geometry) -> Profile {
    let mut builder = ProfileBuilder::new();
    let b = &c.borehole;
    if b.depth_in_mm > 0.0 {
        builder.points(&[(0.0, b.depth_in_mm), (b.radius_in_mm, b.depth_in_mm)]);

        let t = &c.taper.borehole;
        if t.is_present() {
            builder.points(&[
                (b.radius_in_mm, t.height_in_mm),
                (b.radius_in_mm + t.offset(), 0.0),
            ]);
        } else {
            builder.point(b.radius_in_mm, 0.0);
        }
    } else {
        builder.point(0.0, 0.0);
    }
    groove(&mut builder, c);
    bottom_taper(&mut builder, c);
    top_taper(&mut builder, c);
    builder.point(0.0, c.height_in_mm);
    builder.build()
}
