//! V02162B: an inverted coax with a narrow bottom cylinder and a counterbore
//! around the borehole mouth.

use super::v07646a::bottom_cylinder;
use super::{bottom_taper, groove, invcoax, top_borehole, top_taper};
use crate::metadata::Geometry;
use crate::profile::{Profile, ProfileBuilder};

pub fn profile(c: &Geometry) -> Profile {
    let extra = &c.extra;
    if extra.bottom_cylinder.is_none() && extra.topgroove.is_none() {
        return invcoax::profile(c);
    }

    let mut builder = ProfileBuilder::new();
    builder.point(0.0, 0.0);
    groove(&mut builder, c);
    match &extra.bottom_cylinder {
        Some(cylinder) => bottom_cylinder(&mut builder, c, cylinder),
        None => bottom_taper(&mut builder, c),
    }
    top_taper(&mut builder, c);

    match &extra.topgroove {
        Some(topgroove) if topgroove.depth_in_mm > 0.0 => {
            let top = c.height_in_mm;
            let floor = top - topgroove.depth_in_mm;
            let bottom = top - c.borehole.depth_in_mm;
            builder.points(&[
                (topgroove.radius_in_mm, top),
                (topgroove.radius_in_mm, floor),
                (c.borehole.radius_in_mm, floor),
                (c.borehole.radius_in_mm, bottom),
                (0.0, bottom),
            ]);
        }
        _ => top_borehole(&mut builder, c),
    }
    builder.build()
}
