//! Plan input model and structure selection.
//!
//! The types mirror what a planning-system export provides: a plan with an
//! optional structure set and a list of beams. Everything is read-only to the
//! rest of the crate.

mod select;
mod types;

pub use select::{select_structures, SelectedStructure};
pub use types::{ArcDirection, Beam, ControlPoint, Plan, Structure, StructureRole, StructureSet};
