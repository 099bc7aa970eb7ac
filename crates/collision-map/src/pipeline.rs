//! End-to-end collision map for one plan.

use std::fmt;

use tracing::{debug, warn};

use crate::arcs::planned_arcs;
use crate::cfg::MapCfg;
use crate::geom::collision_angles;
use crate::plan::{select_structures, Plan};
use crate::series::{AngleSeries, CollisionMap};

/// Conditions that stop the map before any series is produced.
#[derive(Clone, Debug, PartialEq)]
pub enum MapError {
    /// No plan is loaded.
    MissingPlan,
    /// The plan has no structure set attached.
    MissingStructureSet,
    /// `MapCfg::validate` failed.
    InvalidConfig { reason: String },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::MissingPlan => write!(f, "This script requires a plan"),
            MapError::MissingStructureSet => write!(f, "This script requires a structure set"),
            MapError::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for MapError {}

/// Build the collision map of `plan`.
///
/// Structure series come first in role-table order, followed by "Planned Arcs"
/// (always present, possibly empty). The isocenter of the first beam is the
/// origin for every structure; a plan without beams has no isocenter, so only
/// the (empty) arc series is produced.
pub fn build_collision_map(plan: Option<&Plan>, cfg: &MapCfg) -> Result<CollisionMap, MapError> {
    let plan = plan.ok_or(MapError::MissingPlan)?;
    let set = plan
        .structure_set
        .as_ref()
        .ok_or(MapError::MissingStructureSet)?;
    cfg.validate()?;

    let mut series = Vec::with_capacity(cfg.roles.len() + 1);
    match plan.isocenter() {
        Some(iso) => {
            for selected in select_structures(set, cfg) {
                let s = selected.structure;
                let points = collision_angles(&s.mesh_positions, iso, cfg);
                debug!(
                    id = %s.id,
                    role = ?selected.role,
                    mesh = s.mesh_positions.len(),
                    kept = points.len(),
                    "structure tested"
                );
                series.push(AngleSeries::for_structure(&s.id, &points, cfg));
            }
        }
        None => warn!(plan = %plan.id, "plan has no beams; no isocenter for structure tests"),
    }
    series.push(AngleSeries::planned_arcs(planned_arcs(&plan.beams, cfg), cfg));
    Ok(CollisionMap::new(series))
}
