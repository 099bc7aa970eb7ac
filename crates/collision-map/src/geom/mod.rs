//! Patient-space geometry: collision point filter and couch/gantry transform.
//!
//! Conventions
//! - Patient coordinates follow DICOM head-first-supine: +X patient left,
//!   +Y posterior, +Z superior; millimetres.
//! - Machine angles follow IEC 61217, degrees. After the display trims every
//!   emitted angle lies in [-1, 360).
//! - The isocenter is passed explicitly to every call; nothing is cached.

mod angles;
mod filter;

pub use angles::{couch_gantry, AnglePair};
pub use filter::{collision_points, is_collision_candidate};

use crate::cfg::MapCfg;
use crate::Vec3;

/// A mesh point that passed the filter, with its machine angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionPoint {
    pub position: Vec3<f64>,
    pub angles: AnglePair,
}

/// Filter `mesh` and transform every kept point, preserving mesh order.
pub fn collision_angles(mesh: &[Vec3<f64>], iso: Vec3<f64>, cfg: &MapCfg) -> Vec<CollisionPoint> {
    collision_points(mesh, iso, cfg.clearance_mm)
        .map(|p| CollisionPoint {
            position: p,
            angles: couch_gantry(p, iso, cfg.display_trim_deg),
        })
        .collect()
}
