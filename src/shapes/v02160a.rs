//! V02160A: an inverted coax with a crack through its bottom edge. The
//! outline is the nominal one; the crack is carved out of the solid.

use super::invcoax;
use crate::metadata::{Crack, Geometry};
use crate::profile::Profile;

pub fn profile(c: &Geometry) -> Profile {
    invcoax::profile(c)
}

pub fn crack(c: &Geometry) -> Option<Crack> {
    c.extra.crack.filter(|crack| crack.radius_in_mm > 0.0)
}
