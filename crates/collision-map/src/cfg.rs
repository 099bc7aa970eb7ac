//! Defaults and tunables for the collision map.
//!
//! Policy
//! - The clearance radius and the superior-hemisphere restriction carry clinical
//!   meaning: 230 mm leaves a margin to the bottom of an SRS cone at 250 mm from
//!   the isocenter and ignores the cone diameter (7 cm). The radius can be overridden
//!   through `MapCfg`; the hemisphere cut is fixed.

use serde::{Deserialize, Serialize};

use crate::pipeline::MapError;
use crate::plan::StructureRole;

/// Minimum isocenter distance (mm) for a mesh point to count as a collision point.
pub const CLEARANCE_MM: f64 = 230.0;
/// Angles at or above this value are shifted down by 360 so they plot next to 0.
pub const DISPLAY_TRIM_DEG: f64 = 359.9;
/// Technique id of the arcs drawn on the map.
pub const ARC_TECHNIQUE: &str = "SRS ARC";
/// Series name of the planned arc trajectories.
pub const PLANNED_ARCS: &str = "Planned Arcs";
pub const STRUCTURE_MARKER_SIZE: u32 = 4;
pub const ARC_MARKER_SIZE: u32 = 2;

/// Structure id used by the data source for one role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub role: StructureRole,
    pub id: String,
}

impl RoleEntry {
    pub fn new(role: StructureRole, id: impl Into<String>) -> Self {
        Self {
            role,
            id: id.into(),
        }
    }
}

/// Collision map configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapCfg {
    /// Structures to test, in series order.
    pub roles: Vec<RoleEntry>,
    pub arc_technique: String,
    pub clearance_mm: f64,
    pub display_trim_deg: f64,
    pub structure_marker_size: u32,
    pub arc_marker_size: u32,
}

impl Default for MapCfg {
    fn default() -> Self {
        Self {
            roles: vec![
                RoleEntry::new(StructureRole::Body, "BODY"),
                RoleEntry::new(StructureRole::HeadImmobilizer, "VRT"),
                RoleEntry::new(StructureRole::CouchSurface, "CouchSurface"),
            ],
            arc_technique: ARC_TECHNIQUE.to_string(),
            clearance_mm: CLEARANCE_MM,
            display_trim_deg: DISPLAY_TRIM_DEG,
            structure_marker_size: STRUCTURE_MARKER_SIZE,
            arc_marker_size: ARC_MARKER_SIZE,
        }
    }
}

impl MapCfg {
    /// Reject configurations that would silently produce nonsense.
    pub fn validate(&self) -> Result<(), MapError> {
        let invalid = |reason: String| Err(MapError::InvalidConfig { reason });
        if !self.clearance_mm.is_finite() || self.clearance_mm < 0.0 {
            return invalid(format!(
                "clearance must be a finite, non-negative distance (got {})",
                self.clearance_mm
            ));
        }
        // Trims below 359 would push angles under -1.
        if !(359.0..=360.0).contains(&self.display_trim_deg) {
            return invalid(format!(
                "display trim must lie in [359, 360] (got {})",
                self.display_trim_deg
            ));
        }
        if self.arc_technique.is_empty() {
            return invalid("arc technique id is empty".to_string());
        }
        if let Some(entry) = self.roles.iter().find(|e| e.id.is_empty()) {
            return invalid(format!("structure id for {:?} is empty", entry.role));
        }
        Ok(())
    }

    /// Structure id configured for `role`, if any.
    pub fn id_for(&self, role: StructureRole) -> Option<&str> {
        self.roles
            .iter()
            .find(|e| e.role == role)
            .map(|e| e.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_ordered() {
        let cfg = MapCfg::default();
        assert!(cfg.validate().is_ok());
        let ids: Vec<_> = cfg.roles.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["BODY", "VRT", "CouchSurface"]);
        assert_eq!(cfg.id_for(StructureRole::HeadImmobilizer), Some("VRT"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = MapCfg {
            clearance_mm: f64::NAN,
            ..MapCfg::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(MapError::InvalidConfig { .. })
        ));

        let cfg = MapCfg {
            display_trim_deg: 400.0,
            ..MapCfg::default()
        };
        assert!(cfg.validate().is_err());

        let mut cfg = MapCfg::default();
        cfg.roles[1].id.clear();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("HeadImmobilizer"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: MapCfg = serde_json::from_str(r#"{ "clearance_mm": 250.0 }"#).unwrap();
        assert_eq!(cfg.clearance_mm, 250.0);
        assert_eq!(cfg.arc_technique, ARC_TECHNIQUE);
        assert_eq!(cfg.roles.len(), 3);
    }
}
