//! Plan, structure set, structure and beam types (serde-encoded as plain JSON).

use serde::{Deserialize, Serialize};

use crate::Vec3;

/// What a structure stands for in the collision test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureRole {
    Body,
    HeadImmobilizer,
    CouchSurface,
}

/// Surface mesh of one contoured structure.
///
/// Invariants:
/// - `mesh_positions` are in patient coordinates (mm): +X left, +Y posterior, +Z superior.
/// - `is_empty` is the data source's flag; it is not derived from the mesh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: String,
    #[serde(default)]
    pub mesh_positions: Vec<Vec3<f64>>,
    #[serde(default)]
    pub is_empty: bool,
}

impl Structure {
    pub fn new(id: impl Into<String>, mesh_positions: Vec<Vec3<f64>>) -> Self {
        Self {
            id: id.into(),
            mesh_positions,
            is_empty: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureSet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub structures: Vec<Structure>,
}

impl StructureSet {
    /// First structure whose id matches exactly.
    pub fn find(&self, id: &str) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id == id)
    }
}

/// Gantry rotation sense of a beam. Anything other than the two known
/// spellings decodes as `Unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Machine state at one control point (degrees, IEC 61217).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub patient_support_angle: f64,
    pub gantry_angle: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub is_setup_field: bool,
    #[serde(default)]
    pub technique_id: String,
    pub isocenter: Vec3<f64>,
    #[serde(default)]
    pub gantry_direction: ArcDirection,
    #[serde(default)]
    pub control_points: Vec<ControlPoint>,
}

impl Beam {
    /// Couch angle of the arc (taken from the first control point).
    pub fn couch_angle(&self) -> Option<f64> {
        self.control_points.first().map(|cp| cp.patient_support_angle)
    }

    /// (start, stop) gantry angles from the first and last control points.
    pub fn gantry_span(&self) -> Option<(f64, f64)> {
        let first = self.control_points.first()?;
        let last = self.control_points.last()?;
        Some((first.gantry_angle, last.gantry_angle))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub structure_set: Option<StructureSet>,
    #[serde(default)]
    pub beams: Vec<Beam>,
}

impl Plan {
    /// Isocenter of the first beam; shared by every structure pass.
    pub fn isocenter(&self) -> Option<Vec3<f64>> {
        self.beams.first().map(|b| b.isocenter)
    }
}
