//! Panel mapping and sheet description
//!
//! The fold-level transformation that assigns each logical page to a panel
//! on a sheet side, and the record builder that serializes the assignment
//! for a renderer.

mod matrix;
mod records;
mod types;

pub use records::{PanelAddress, build_records, panel_to_sheet_side, rotation_for};
pub use types::{JobDescriptor, PlacementRecord, SignatureLayout};
