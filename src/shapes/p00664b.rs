//! P00664B: a point contact detector with a crack through its bottom edge.

use super::{ppc, v02160a};
use crate::metadata::{Crack, Geometry};
use crate::profile::Profile;

pub fn profile(c: &Geometry) -> Profile {
    ppc::profile(c)
}

pub fn crack(c: &Geometry) -> Option<Crack> {
    v02160a::crack(c)
}
