use tracing::debug;

use super::types::{Structure, StructureRole, StructureSet};
use crate::cfg::MapCfg;

/// A structure picked for the collision test, tagged with its role.
#[derive(Clone, Copy, Debug)]
pub struct SelectedStructure<'a> {
    pub role: StructureRole,
    pub structure: &'a Structure,
}

/// Structures named in `cfg.roles` that exist and are not flagged empty, in role-table order.
///
/// Missing or empty structures are optional for a given setup and are skipped.
pub fn select_structures<'a>(set: &'a StructureSet, cfg: &MapCfg) -> Vec<SelectedStructure<'a>> {
    let mut out = Vec::with_capacity(cfg.roles.len());
    for entry in &cfg.roles {
        match set.find(&entry.id) {
            None => debug!(id = %entry.id, role = ?entry.role, "structure not in set, skipped"),
            Some(s) if s.is_empty => {
                debug!(id = %entry.id, role = ?entry.role, "structure is empty, skipped")
            }
            Some(structure) => out.push(SelectedStructure {
                role: entry.role,
                structure,
            }),
        }
    }
    out
}
