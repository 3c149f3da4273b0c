//! Layout data types
//!
//! These types carry the result of panel mapping: one placement record per
//! panel, grouped per signature, plus the job-level descriptor a renderer
//! consumes.

use crate::plan::Plan;
use crate::types::{Binding, FoldLevel, Orientation, SheetSide};

/// Final placement of one logical page on a sheet side.
///
/// Everything a renderer needs: which source page (or a blank), where it
/// sits in the panel grid, and how far to rotate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRecord {
    /// Source-document page number (1-based), or `None` for a blank panel
    pub global_page: Option<u32>,
    /// Panel index within the signature (1-based)
    pub local_panel: u32,
    /// Panel index across the whole job (1-based)
    pub global_panel: u32,
    /// Sheet index within the signature (1-based)
    pub sheet: u32,
    /// Which physical side of the sheet
    pub side: SheetSide,
    /// Reading direction across this side's panels
    pub orientation: Orientation,
    /// Grid row on the sheet side (0 = top)
    pub row: u32,
    /// Grid column on the sheet side (0 = leftmost)
    pub col: u32,
    /// Rotation applied to the page content, degrees counter-clockwise
    pub rotation_degrees: u16,
}

impl PlacementRecord {
    /// Whether this panel stays empty
    pub fn is_blank(&self) -> bool {
        self.global_page.is_none()
    }
}

/// One signature's worth of placement records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureLayout {
    /// Pages the plan assigned to this signature
    pub pages: u32,
    /// Pages after padding to whole sheets
    pub padded: u32,
    /// Physical sheets this signature occupies
    pub sheets: u32,
    /// Records sorted by `global_page`, blanks last
    pub records: Vec<PlacementRecord>,
}

/// The complete description of an imposition job.
///
/// Owns the plan and the per-signature record lists; references the source
/// document by page numbers only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub plan: Plan,
    pub level: FoldLevel,
    pub binding: Binding,
    pub signatures: Vec<SignatureLayout>,
}

impl JobDescriptor {
    /// Total physical sheets across all signatures
    pub fn total_sheets(&self) -> u32 {
        self.signatures.iter().map(|s| s.sheets).sum()
    }

    /// Total output pages (two per sheet)
    pub fn output_pages(&self) -> u32 {
        self.total_sheets() * 2
    }
}
