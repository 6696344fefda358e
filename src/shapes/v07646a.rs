//! V07646A: an inverted coax whose lower section is a narrower cylinder.

use super::{groove, invcoax, top_borehole, top_taper};
use crate::metadata::{BottomCylinder, Geometry};
use crate::profile::{Profile, ProfileBuilder};

pub fn profile(c: &Geometry) -> Profile {
    let Some(cylinder) = c.extra.bottom_cylinder else {
        return invcoax::profile(c);
    };

    let mut builder = ProfileBuilder::new();
    builder.point(0.0, 0.0);
    groove(&mut builder, c);
    bottom_cylinder(&mut builder, c, &cylinder);
    top_taper(&mut builder, c);
    top_borehole(&mut builder, c);
    builder.build()
}

/// Narrow lower section, widening to the full radius either in a conical
/// transition or in a flat step.
pub(crate) fn bottom_cylinder(builder: &mut ProfileBuilder, c: &Geometry, cyl: &BottomCylinder) {
    builder.points(&[
        (cyl.radius_in_mm, 0.0),
        (cyl.radius_in_mm, cyl.height_in_mm),
    ]);
    if cyl.transition_in_mm > 0.0 {
        builder.point(c.radius_in_mm, cyl.height_in_mm + cyl.transition_in_mm);
    } else {
        builder.point(c.radius_in_mm, cyl.height_in_mm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::fixtures::icpc;

    fn geometry(transition: f64) -> Geometry {
        let mut c = icpc();
        c.extra.bottom_cylinder = Some(BottomCylinder {
            radius_in_mm: 36.0,
            height_in_mm: 15.0,
            transition_in_mm: transition,
        });
        c
    }

    #[test]
    fn conical_transition() {
        let profile = profile(&geometry(2.0));
        assert_eq!(
            profile.r(),
            vec![0.0, 7.0, 7.0, 10.0, 10.0, 36.0, 36.0, 40.0, 40.0, 5.0, 5.0, 0.0]
        );
        assert_eq!(
            profile.z(),
            vec![0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 15.0, 17.0, 100.0, 100.0, 40.0, 40.0]
        );
        assert_eq!(profile.validate(), Ok(()));
    }

    #[test]
    fn flat_step_without_transition() {
        let profile = profile(&geometry(0.0));
        assert_eq!(profile.z()[7], 15.0);
        assert_eq!(profile.len(), 12);
    }

    #[test]
    fn falls_back_without_cylinder() {
        assert_eq!(profile(&icpc()), invcoax::profile(&icpc()));
    }
}
