//! Planned arc trajectories on the (couch, gantry) map.
//!
//! Each treatment arc is drawn as one point per integer gantry degree between
//! its first and last control point, at the arc's fixed couch angle.

use tracing::debug;

use crate::cfg::MapCfg;
use crate::geom::AnglePair;
use crate::plan::{ArcDirection, Beam};

/// Treatment (non-setup) beam delivered with the configured arc technique.
pub fn is_planned_arc(beam: &Beam, cfg: &MapCfg) -> bool {
    !beam.is_setup_field && beam.technique_id == cfg.arc_technique
}

/// Integer gantry angles swept by a beam rotating `direction` from `start` to `stop`.
///
/// The sweep starts at `start` rounded half-to-even and steps by one degree while
/// it has not passed `stop`; both ends are inclusive. A sweep that would have to
/// cross 0/360 to reach `stop` is empty. Unknown directions yield nothing, and
/// so do angles outside [0, 360] (at most 361 points per sweep).
pub fn gantry_sweep(direction: ArcDirection, start: f64, stop: f64) -> Vec<f64> {
    let gantry_range = 0.0..=360.0;
    if !gantry_range.contains(&start) || !gantry_range.contains(&stop) {
        debug!(start, stop, "gantry angles off the dial, skipped");
        return Vec::new();
    }
    let mut g = start.round_ties_even();
    let mut out = Vec::new();
    match direction {
        ArcDirection::Clockwise => {
            while g <= stop {
                out.push(g);
                g += 1.0;
            }
        }
        ArcDirection::CounterClockwise => {
            while g >= stop {
                out.push(g);
                g -= 1.0;
            }
        }
        ArcDirection::Unknown => {}
    }
    out
}

/// (couch, gantry) pairs traversed by `beam`, or nothing if it is not a planned arc.
pub fn arc_trajectory(beam: &Beam, cfg: &MapCfg) -> Vec<AnglePair> {
    if !is_planned_arc(beam, cfg) {
        debug!(beam = %beam.id, technique = %beam.technique_id, setup = beam.is_setup_field, "not a planned arc, skipped");
        return Vec::new();
    }
    let (Some(couch), Some((start, stop))) = (beam.couch_angle(), beam.gantry_span()) else {
        debug!(beam = %beam.id, "arc without control points, skipped");
        return Vec::new();
    };
    if beam.gantry_direction == ArcDirection::Unknown {
        debug!(beam = %beam.id, "unrecognized gantry direction, skipped");
    }
    gantry_sweep(beam.gantry_direction, start, stop)
        .into_iter()
        .map(|gantry| AnglePair::new(couch, gantry))
        .collect()
}

/// Trajectories of all planned arcs, concatenated in beam order.
pub fn planned_arcs(beams: &[Beam], cfg: &MapCfg) -> Vec<AnglePair> {
    beams.iter().flat_map(|b| arc_trajectory(b, cfg)).collect()
}
