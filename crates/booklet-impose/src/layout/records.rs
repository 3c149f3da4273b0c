//! Sheet description
//!
//! Turns a plan's signature sequence into placement records: one record per
//! panel, carrying the source page (or blank), the panel's sheet, side,
//! grid position and rotation. Records are the core's only output; a
//! renderer consumes them together with the geometry engine's boxes.

use tracing::{debug, warn};

use super::matrix::{arrange_panels, back_pairs, front_pairs, panel_matrix, split_front_back};
use super::types::{PlacementRecord, SignatureLayout};
use crate::types::{Binding, FoldLevel, Orientation, SheetSide};

// =============================================================================
// Panel Addressing
// =============================================================================

/// Locate a panel number on its sheet.
///
/// Panels number fronts before backs within each sheet, so the side falls
/// out of the panel's offset within the sheet. Signatures reserve whole
/// sheets, so job-global and signature-local numbering agree on side and
/// orientation.
pub fn panel_to_sheet_side(panel: u32, level: FoldLevel, binding: Binding) -> PanelAddress {
    let per_side = level.panels_per_side() as u32;
    let per_sheet = level.panels_per_sheet() as u32;

    let sheet = (panel - 1) / per_sheet + 1;
    let side = if (panel - 1) % per_sheet < per_side {
        SheetSide::Front
    } else {
        SheetSide::Back
    };

    PanelAddress {
        sheet,
        side,
        orientation: binding.orientation(side),
    }
}

/// Sheet-level address of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelAddress {
    pub sheet: u32,
    pub side: SheetSide,
    pub orientation: Orientation,
}

// =============================================================================
// Rotation Policy
// =============================================================================

/// Content rotation for a sheet side, degrees.
///
/// Tuned to the fold-and-cut schedule: sides at one fold carry their
/// panels sideways, two folds upside down, three folds sideways the other
/// way, and only the four-fold layout keeps fronts upright. Fronts and
/// backs differ by a half turn except at two folds, where both sides share
/// it. Three folds is the one depth where the binding direction swaps the
/// two sides' angles.
pub fn rotation_for(level: FoldLevel, binding: Binding, side: SheetSide) -> u16 {
    use Binding::*;
    use FoldLevel::*;
    use SheetSide::*;

    match (level, binding, side) {
        (Folio, _, Front) => 90,
        (Folio, _, Back) => 270,
        (Quarto, _, _) => 180,
        (Octavo, Ltr, Front) | (Octavo, Rtl, Back) => 270,
        (Octavo, Ltr, Back) | (Octavo, Rtl, Front) => 90,
        (Sextodecimo, _, Front) => 0,
        (Sextodecimo, _, Back) => 180,
    }
}

// =============================================================================
// Slot Order
// =============================================================================

/// Grid slots of one sheet side in the order consecutive panels fill them.
///
/// Fronts fill row-major with the binding direction and backs against it,
/// so the two sides line up through the paper. On single-column grids the
/// horizontal reversal has nothing to act on, so right-to-left binding
/// flips the column vertically instead.
fn slot_order(level: FoldLevel, binding: Binding, side: SheetSide) -> Vec<(u32, u32)> {
    let (rows, cols) = level.grid_dimensions();
    let reversed = match (binding, side) {
        (Binding::Ltr, SheetSide::Front) | (Binding::Rtl, SheetSide::Back) => false,
        (Binding::Ltr, SheetSide::Back) | (Binding::Rtl, SheetSide::Front) => true,
    };

    let mut slots = Vec::with_capacity(rows * cols);
    for r in 0..rows as u32 {
        if reversed {
            for c in (0..cols as u32).rev() {
                slots.push((r, c));
            }
        } else {
            for c in 0..cols as u32 {
                slots.push((r, c));
            }
        }
    }

    if binding == Binding::Rtl && cols == 1 {
        slots.reverse();
    }

    slots
}

// =============================================================================
// Record Construction
// =============================================================================

/// Build placement records for every signature of a plan sequence.
///
/// `input_pages` is the real source length: signature pages beyond it (the
/// plan's trailing blanks) and panels beyond each signature's page count
/// (sheet padding) both become blank records. Within each signature the
/// records come back sorted by source page with blanks last.
pub fn build_records(
    sequence: &[u32],
    level: FoldLevel,
    binding: Binding,
    input_pages: u32,
) -> Vec<SignatureLayout> {
    let per_sheet = level.panels_per_sheet() as u32;

    let mut page_offset = 0u32;
    let mut panel_offset = 0u32;
    let mut signatures = Vec::with_capacity(sequence.len());

    for (index, &sig_pages) in sequence.iter().enumerate() {
        let padded = sig_pages + (per_sheet - sig_pages % per_sheet) % per_sheet;
        if padded != sig_pages {
            warn!(
                signature = index + 1,
                blanks = padded - sig_pages,
                total = padded,
                "signature padded with blank pages to fill its last sheet"
            );
        }

        let matrix = panel_matrix(padded, level, panel_offset + 1);
        let arranged = arrange_panels(&matrix, level);
        let (fronts, backs) = split_front_back(&arranged);
        debug!(signature = index + 1, spreads = arranged.len(), "panels arranged");

        let mut records = Vec::with_capacity(padded as usize);
        let spreads = fronts
            .iter()
            .zip(front_pairs(fronts.len(), padded))
            .chain(backs.iter().zip(back_pairs(backs.len(), padded)));

        for (group, (page_left, page_right)) in spreads {
            for (slot, local_page) in [page_left, page_right].into_iter().enumerate() {
                let Some(Some(global_panel)) = group.get(slot).copied() else {
                    continue;
                };
                records.push(make_record(
                    global_panel,
                    local_page,
                    sig_pages,
                    page_offset,
                    panel_offset,
                    input_pages,
                    level,
                    binding,
                ));
            }
        }

        // Renderer contract: source order first, blanks trail.
        records.sort_by_key(|r| r.global_page.map_or(u32::MAX, |p| p));

        signatures.push(SignatureLayout {
            pages: sig_pages,
            padded,
            sheets: padded / per_sheet,
            records,
        });

        page_offset += sig_pages;
        panel_offset += padded;
    }

    signatures
}

#[allow(clippy::too_many_arguments)]
fn make_record(
    global_panel: u32,
    local_page: u32,
    sig_pages: u32,
    page_offset: u32,
    panel_offset: u32,
    input_pages: u32,
    level: FoldLevel,
    binding: Binding,
) -> PlacementRecord {
    let per_side = level.panels_per_side() as u32;
    let local_panel = global_panel - panel_offset;
    let address = panel_to_sheet_side(local_panel, level, binding);

    let side_slot = ((local_panel - 1) % per_side) as usize;
    let (row, col) = slot_order(level, binding, address.side)[side_slot];

    let global_page = (local_page <= sig_pages)
        .then(|| page_offset + local_page)
        .filter(|&p| p <= input_pages);

    PlacementRecord {
        global_page,
        local_panel,
        global_panel,
        sheet: address.sheet,
        side: address.side,
        orientation: address.orientation,
        row,
        col,
        rotation_degrees: rotation_for(level, binding, address.side),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_addressing() {
        // Folio: 4 panels per sheet, fronts first
        let addr = panel_to_sheet_side(1, FoldLevel::Folio, Binding::Ltr);
        assert_eq!((addr.sheet, addr.side), (1, SheetSide::Front));
        let addr = panel_to_sheet_side(3, FoldLevel::Folio, Binding::Ltr);
        assert_eq!((addr.sheet, addr.side), (1, SheetSide::Back));
        let addr = panel_to_sheet_side(5, FoldLevel::Folio, Binding::Ltr);
        assert_eq!((addr.sheet, addr.side), (2, SheetSide::Front));

        // Octavo: 16 per sheet
        let addr = panel_to_sheet_side(16, FoldLevel::Octavo, Binding::Ltr);
        assert_eq!((addr.sheet, addr.side), (1, SheetSide::Back));
        let addr = panel_to_sheet_side(17, FoldLevel::Octavo, Binding::Ltr);
        assert_eq!((addr.sheet, addr.side), (2, SheetSide::Front));
    }

    #[test]
    fn test_rotation_table() {
        use Binding::*;
        use SheetSide::*;

        for binding in [Ltr, Rtl] {
            assert_eq!(rotation_for(FoldLevel::Folio, binding, Front), 90);
            assert_eq!(rotation_for(FoldLevel::Folio, binding, Back), 270);
            assert_eq!(rotation_for(FoldLevel::Quarto, binding, Front), 180);
            assert_eq!(rotation_for(FoldLevel::Quarto, binding, Back), 180);
            assert_eq!(rotation_for(FoldLevel::Sextodecimo, binding, Front), 0);
            assert_eq!(rotation_for(FoldLevel::Sextodecimo, binding, Back), 180);
        }
        assert_eq!(rotation_for(FoldLevel::Octavo, Ltr, Front), 270);
        assert_eq!(rotation_for(FoldLevel::Octavo, Ltr, Back), 90);
        assert_eq!(rotation_for(FoldLevel::Octavo, Rtl, Front), 90);
        assert_eq!(rotation_for(FoldLevel::Octavo, Rtl, Back), 270);
    }

    #[test]
    fn test_slot_order_quarto() {
        assert_eq!(
            slot_order(FoldLevel::Quarto, Binding::Ltr, SheetSide::Front),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
        assert_eq!(
            slot_order(FoldLevel::Quarto, Binding::Ltr, SheetSide::Back),
            vec![(0, 1), (0, 0), (1, 1), (1, 0)]
        );
        // RTL mirrors the two sides
        assert_eq!(
            slot_order(FoldLevel::Quarto, Binding::Rtl, SheetSide::Front),
            vec![(0, 1), (0, 0), (1, 1), (1, 0)]
        );
    }

    #[test]
    fn test_slot_order_single_column_rtl_flips_vertically() {
        assert_eq!(
            slot_order(FoldLevel::Folio, Binding::Ltr, SheetSide::Front),
            vec![(0, 0), (1, 0)]
        );
        assert_eq!(
            slot_order(FoldLevel::Folio, Binding::Rtl, SheetSide::Front),
            vec![(1, 0), (0, 0)]
        );
        assert_eq!(
            slot_order(FoldLevel::Folio, Binding::Rtl, SheetSide::Back),
            vec![(1, 0), (0, 0)]
        );
    }

    #[test]
    fn test_folio_eight_page_signature() {
        let sigs = build_records(&[8], FoldLevel::Folio, Binding::Ltr, 8);
        assert_eq!(sigs.len(), 1);
        let sig = &sigs[0];
        assert_eq!(sig.padded, 8);
        assert_eq!(sig.sheets, 2);
        assert_eq!(sig.records.len(), 8);

        // Saddle stitch: page 1 shares the outer front with page 8
        let page = |n: u32| {
            sig.records
                .iter()
                .find(|r| r.global_page == Some(n))
                .unwrap()
        };
        assert_eq!(page(1).global_panel, 1);
        assert_eq!(page(8).global_panel, 2);
        assert_eq!(page(1).sheet, page(8).sheet);
        assert_eq!(page(1).side, SheetSide::Front);
        assert_eq!(page(2).global_panel, 3);
        assert_eq!(page(7).global_panel, 4);
        assert_eq!(page(2).side, SheetSide::Back);
        assert_eq!(page(3).sheet, 2);
        assert_eq!(page(6).sheet, 2);
    }

    #[test]
    fn test_local_panels_are_a_permutation() {
        for level in [
            FoldLevel::Folio,
            FoldLevel::Quarto,
            FoldLevel::Octavo,
            FoldLevel::Sextodecimo,
        ] {
            for binding in [Binding::Ltr, Binding::Rtl] {
                let sigs = build_records(&[32, 28], level, binding, 60);
                for sig in &sigs {
                    let mut panels: Vec<u32> =
                        sig.records.iter().map(|r| r.local_panel).collect();
                    panels.sort_unstable();
                    assert_eq!(panels, (1..=sig.padded).collect::<Vec<_>>());
                }
            }
        }
    }

    #[test]
    fn test_records_sorted_with_blanks_last() {
        let sigs = build_records(&[28], FoldLevel::Octavo, Binding::Ltr, 20);
        let sig = &sigs[0];
        assert_eq!(sig.padded, 32);

        let first_blank = sig
            .records
            .iter()
            .position(|r| r.is_blank())
            .expect("blanks expected");
        assert!(sig.records[..first_blank]
            .windows(2)
            .all(|w| w[0].global_page < w[1].global_page));
        assert!(sig.records[first_blank..].iter().all(|r| r.is_blank()));
    }
}
