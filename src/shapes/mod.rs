//! Profile calculators, one per detector shape.
//!
//! Each calculator walks the outline of its crystal from the bottom face,
//! up the outer wall, across the top face and back to the axis. Optional
//! features are switched on by a positive height or depth; a zero value
//! emits the straight fallback segment instead.
//!
//! The helpers in this module cover the features several shapes share.

pub mod bege;
pub mod crack;
pub mod invcoax;
pub mod p00664b;
pub mod ppc;
pub mod semicoax;
pub mod v02160a;
pub mod v02162b;
pub mod v07646a;

use crate::metadata::Geometry;
use crate::profile::ProfileBuilder;

/// Annular notch in the bottom face, entered and left at `z = 0`.
pub(crate) fn groove(builder: &mut ProfileBuilder, c: &Geometry) {
    let g = &c.groove;
    if g.depth_in_mm > 0.0 {
        builder.points(&[
            (g.radius_in_mm.inner, 0.0),
            (g.radius_in_mm.inner, g.depth_in_mm),
            (g.radius_in_mm.outer, g.depth_in_mm),
            (g.radius_in_mm.outer, 0.0),
        ]);
    }
}

/// Outer edge of the bottom face, chamfered if tapered.
pub(crate) fn bottom_taper(builder: &mut ProfileBuilder, c: &Geometry) {
    let t = &c.taper.bottom;
    if t.is_present() {
        builder.points(&[
            (c.radius_in_mm - t.offset(), 0.0),
            (c.radius_in_mm, t.height_in_mm),
        ]);
    } else {
        builder.point(c.radius_in_mm, 0.0);
    }
}

/// Outer edge of the top face, chamfered if tapered.
pub(crate) fn top_taper(builder: &mut ProfileBuilder, c: &Geometry) {
    let t = &c.taper.top;
    if t.is_present() {
        builder.points(&[
            (c.radius_in_mm, c.height_in_mm - t.height_in_mm),
            (c.radius_in_mm - t.offset(), c.height_in_mm),
        ]);
    } else {
        builder.point(c.radius_in_mm, c.height_in_mm);
    }
}

/// Borehole drilled down from the top face, closing the outline on the axis
/// at the bottom of the hole. Without a borehole the outline closes at the
/// top face.
pub(crate) fn top_borehole(builder: &mut ProfileBuilder, c: &Geometry) {
    let b = &c.borehole;
    if b.depth_in_mm <= 0.0 {
        builder.point(0.0, c.height_in_mm);
        return;
    }

    let t = &c.taper.borehole;
    if t.is_present() {
        builder.points(&[
            (b.radius_in_mm + t.offset(), c.height_in_mm),
            (b.radius_in_mm, c.height_in_mm - t.height_in_mm),
        ]);
    } else {
        builder.point(b.radius_in_mm, c.height_in_mm);
    }

    let bottom = c.height_in_mm - b.depth_in_mm;
    builder.points(&[(b.radius_in_mm, bottom), (0.0, bottom)]);
}
