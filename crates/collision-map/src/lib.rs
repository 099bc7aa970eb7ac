//! Couch/gantry collision maps for radiotherapy arc plans.
//!
//! Pipeline (leaves first):
//! - `plan::select_structures`: pick the configured structures that are present and non-empty.
//! - `geom::collision_points`: keep mesh points superior to the isocenter and beyond the
//!   head-clearance radius.
//! - `geom::couch_gantry`: map each kept point to a (couch, gantry) pair.
//! - `arcs::arc_trajectory`: one-degree gantry sweep of each planned arc.
//! - `series`: named point series plus the chart layout for the renderer.
//!
//! `pipeline::build_collision_map` runs everything for one plan.

pub mod arcs;
pub mod cfg;
pub mod geom;
pub mod phantom;
pub mod pipeline;
pub mod plan;
pub mod series;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Points in patient (DICOM) coordinates, millimetres.
pub use nalgebra::Vector3 as Vec3;

pub use cfg::MapCfg;
pub use pipeline::{build_collision_map, MapError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::arcs::{arc_trajectory, planned_arcs};
    pub use crate::cfg::{MapCfg, RoleEntry};
    pub use crate::geom::{collision_points, couch_gantry, AnglePair, CollisionPoint};
    pub use crate::pipeline::{build_collision_map, MapError};
    pub use crate::plan::{
        select_structures, ArcDirection, Beam, ControlPoint, Plan, Structure, StructureRole,
        StructureSet,
    };
    pub use crate::series::{AngleSeries, ChartLayout, CollisionMap, MapSummary};
    pub use nalgebra::Vector3 as Vec3;
}
