//! Point → (couch, gantry) transform.
//!
//! Couch: the polar angle `rho` of the point in the X-Z plane, mapped to the
//! couch scale (half-turn shift below 270°).
//! Gantry: rotate about Y by `rho` into the plane of the gantry arc, take the
//! polar angle there and convert spherical-polar to IEC 61217 (+90°). The
//! gantry sense flips for couch angles at or below 90°.

use serde::{Deserialize, Serialize};

use crate::Vec3;

/// A point on the (couch, gantry) map, degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnglePair {
    pub couch: f64,
    pub gantry: f64,
}

impl AnglePair {
    #[inline]
    pub fn new(couch: f64, gantry: f64) -> Self {
        Self { couch, gantry }
    }
}

/// Shift near-360 values down by a full turn so they plot next to 0.
/// Display only; not part of the wraparound.
#[inline]
fn display_trim(deg: f64, trim_deg: f64) -> f64 {
    if deg >= trim_deg {
        deg - 360.0
    } else {
        deg
    }
}

/// Couch and gantry angle at which the treatment head reaches `p`.
///
/// Angles come from the raw patient coordinates of `p`; the isocenter only
/// decides which points are kept (`is_collision_candidate`) and does not shift
/// the transform.
/// Post: both angles in `[trim_deg - 360, trim_deg)` for any finite `p`.
pub fn couch_gantry(p: Vec3<f64>, _iso: Vec3<f64>, trim_deg: f64) -> AnglePair {
    let rho = p.z.atan2(p.x);
    let mut couch = 360.0 - rho.to_degrees();
    if couch <= 270.0 {
        couch -= 180.0;
    }
    let couch = display_trim(couch, trim_deg);

    let (sin_rho, cos_rho) = rho.sin_cos();
    let x_arc = p.x * cos_rho + p.z * sin_rho;
    let y_arc = p.y;
    let phi = y_arc.atan2(x_arc).to_degrees();

    let mut gantry = phi + 90.0;
    if gantry <= 0.0 {
        gantry += 360.0;
    }
    if couch <= 90.0 {
        gantry = 360.0 - gantry;
    }
    let gantry = display_trim(gantry, trim_deg);

    AnglePair { couch, gantry }
}
