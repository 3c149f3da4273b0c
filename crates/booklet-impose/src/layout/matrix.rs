//! Panel-number matrices and the fold transformation
//!
//! A signature's panels are numbered consecutively and laid out row-major
//! in a matrix whose row width is `2^level`. Folding is simulated by
//! repeatedly halving the rows: each pass splits every row at its midpoint
//! and stacks all left halves above all right halves, optionally giving the
//! halves a quarter turn. After the passes, each surviving group is one
//! printed spread and its cells name the panels that meet there.

use crate::types::FoldLevel;

/// A matrix cell: a panel number, or a hole in a short final row.
pub(crate) type Cell = Option<u32>;

// =============================================================================
// Matrix Construction
// =============================================================================

/// Fill a matrix with `num_panels` consecutive panel numbers starting at
/// `first`, row-major, rows of width `2^level`. A final partial row is
/// padded with `None`.
pub(crate) fn panel_matrix(num_panels: u32, level: FoldLevel, first: u32) -> Vec<Vec<Cell>> {
    let width = level.matrix_width() as u32;
    let last = first + num_panels.saturating_sub(1);
    let mut matrix = Vec::new();
    let mut panel = first;
    while num_panels > 0 && panel <= last {
        let row = (0..width)
            .map(|i| {
                let p = panel + i;
                if p <= last { Some(p) } else { None }
            })
            .collect();
        matrix.push(row);
        panel += width;
    }
    matrix
}

// =============================================================================
// Fold Transformation
// =============================================================================

/// Quarter-turn of a flat group read as a 2 × (n/2) grid.
///
/// `[t0 t1 … | b0 b1 …]` becomes `[b0 t0 b1 t1 …]`, the clockwise reading
/// of the two stacked halves. Groups shorter than 2 cells come back
/// unchanged.
pub(crate) fn rotate_cw(seq: &[Cell]) -> Vec<Cell> {
    if seq.len() < 2 {
        return seq.to_vec();
    }
    let (top, bottom) = seq.split_at(seq.len() / 2);
    let mut out = Vec::with_capacity(seq.len());
    for (t, b) in top.iter().zip(bottom.iter()) {
        out.push(*b);
        out.push(*t);
    }
    out
}

/// Run up to `level` halving passes over the matrix rows.
///
/// Each pass splits every row at its midpoint and emits all left halves
/// followed by all right halves, preserving row order within each half.
/// The deeper folds turn the paper a quarter turn as well: one rotated
/// pass at three folds, two at four, counted down once per pass rather
/// than per row. Passes stop early once every row is down to a two-cell
/// spread.
pub(crate) fn arrange_panels(matrix: &[Vec<Cell>], level: FoldLevel) -> Vec<Vec<Cell>> {
    let mut current: Vec<Vec<Cell>> = matrix.to_vec();
    let mut rotations_left = match level {
        FoldLevel::Octavo => 1,
        FoldLevel::Sextodecimo => 2,
        _ => 0,
    };

    for _ in 0..level.level() {
        if current.iter().all(|row| row.len() <= 2) {
            break;
        }
        let rotate = rotations_left > 0;
        let mut lefts = Vec::with_capacity(current.len());
        let mut rights = Vec::with_capacity(current.len());
        for row in &current {
            let (l, r) = row.split_at(row.len() / 2);
            if rotate {
                lefts.push(rotate_cw(l));
                rights.push(rotate_cw(r));
            } else {
                lefts.push(l.to_vec());
                rights.push(r.to_vec());
            }
        }
        if rotate {
            rotations_left -= 1;
        }
        lefts.append(&mut rights);
        current = lefts;
    }

    current
}

// =============================================================================
// Spread Grouping
// =============================================================================

/// Partition arranged groups by position parity: the 1st, 3rd, 5th, …
/// groups land on sheet fronts, the rest on backs, mirroring how front and
/// back alternate through the fold.
pub(crate) fn split_front_back(arranged: &[Vec<Cell>]) -> (Vec<Vec<Cell>>, Vec<Vec<Cell>>) {
    let mut fronts = Vec::with_capacity(arranged.len() / 2 + 1);
    let mut backs = Vec::with_capacity(arranged.len() / 2);
    for (i, group) in arranged.iter().enumerate() {
        if i % 2 == 0 {
            fronts.push(group.clone());
        } else {
            backs.push(group.clone());
        }
    }
    (fronts, backs)
}

/// Booklet-order page mates on the front spreads of a padded signature:
/// `(1, S), (3, S-2), …`
pub(crate) fn front_pairs(n_groups: usize, padded: u32) -> Vec<(u32, u32)> {
    (0..n_groups as u32)
        .map(|k| (1 + 2 * k, padded - 2 * k))
        .collect()
}

/// Booklet-order page mates on the back spreads: `(2, S-1), (4, S-3), …`
pub(crate) fn back_pairs(n_groups: usize, padded: u32) -> Vec<(u32, u32)> {
    (0..n_groups as u32)
        .map(|k| (2 + 2 * k, padded - (2 * k + 1)))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[u32]) -> Vec<Cell> {
        values.iter().map(|&v| Some(v)).collect()
    }

    #[test]
    fn test_panel_matrix_shape() {
        let matrix = panel_matrix(8, FoldLevel::Quarto, 1);
        assert_eq!(matrix, vec![cells(&[1, 2, 3, 4]), cells(&[5, 6, 7, 8])]);

        // Counter offsets carry through
        let matrix = panel_matrix(4, FoldLevel::Folio, 9);
        assert_eq!(matrix, vec![cells(&[9, 10]), cells(&[11, 12])]);
    }

    #[test]
    fn test_panel_matrix_pads_short_row() {
        let matrix = panel_matrix(6, FoldLevel::Quarto, 1);
        assert_eq!(matrix[1], vec![Some(5), Some(6), None, None]);
    }

    #[test]
    fn test_rotate_cw_basic() {
        assert_eq!(rotate_cw(&cells(&[1, 2])), cells(&[2, 1]));
        assert_eq!(rotate_cw(&cells(&[1, 2, 3, 4])), cells(&[3, 1, 4, 2]));
        assert_eq!(
            rotate_cw(&cells(&[1, 2, 3, 4, 5, 6, 7, 8])),
            cells(&[5, 1, 6, 2, 7, 3, 8, 4])
        );
    }

    #[test]
    fn test_rotate_cw_single_cell_unchanged() {
        assert_eq!(rotate_cw(&cells(&[7])), cells(&[7]));
        assert_eq!(rotate_cw(&[]), Vec::<Cell>::new());
    }

    #[test]
    fn test_rotate_cw_four_times_is_identity() {
        for width in [2usize, 4, 8, 16] {
            let seq: Vec<Cell> = (1..=width as u32).map(Some).collect();
            let mut turned = seq.clone();
            for _ in 0..4 {
                turned = rotate_cw(&turned);
            }
            assert_eq!(turned, seq, "width {}", width);
        }
    }

    #[test]
    fn test_arrange_folio_is_identity() {
        // Two-cell rows are already spreads, so no pass runs.
        let matrix = panel_matrix(8, FoldLevel::Folio, 1);
        let arranged = arrange_panels(&matrix, FoldLevel::Folio);
        assert_eq!(arranged, matrix);
    }

    #[test]
    fn test_arrange_quarto() {
        let matrix = panel_matrix(8, FoldLevel::Quarto, 1);
        let arranged = arrange_panels(&matrix, FoldLevel::Quarto);
        assert_eq!(
            arranged,
            vec![cells(&[1, 2]), cells(&[5, 6]), cells(&[3, 4]), cells(&[7, 8])]
        );
    }

    #[test]
    fn test_arrange_octavo_rotates_one_pass() {
        let matrix = panel_matrix(32, FoldLevel::Octavo, 1);
        let arranged = arrange_panels(&matrix, FoldLevel::Octavo);

        // The first pass turns the halves; later passes only split. With a
        // single rotated pass the first spread reads [3, 1].
        assert_eq!(arranged.len(), 16);
        assert_eq!(arranged[0], cells(&[3, 1]));
        assert_eq!(arranged[1], cells(&[11, 9]));
        assert_eq!(arranged[8], cells(&[4, 2]));
        assert_eq!(arranged[15], cells(&[32, 30]));
    }

    #[test]
    fn test_arrange_sextodecimo_rotates_two_passes() {
        let matrix = panel_matrix(32, FoldLevel::Sextodecimo, 1);
        let arranged = arrange_panels(&matrix, FoldLevel::Sextodecimo);

        assert_eq!(arranged.len(), 16);
        assert_eq!(arranged[0], cells(&[6, 5]));
        assert_eq!(arranged[1], cells(&[22, 21]));
        assert_eq!(arranged[8], cells(&[2, 1]));
        assert_eq!(arranged[15], cells(&[28, 27]));
    }

    #[test]
    fn test_arrange_always_ends_in_spreads() {
        for level in [
            FoldLevel::Folio,
            FoldLevel::Quarto,
            FoldLevel::Octavo,
            FoldLevel::Sextodecimo,
        ] {
            let per_sheet = level.panels_per_sheet() as u32;
            for sheets in 1..=3u32 {
                let padded = per_sheet * sheets;
                let matrix = panel_matrix(padded, level, 1);
                let arranged = arrange_panels(&matrix, level);
                assert_eq!(arranged.len() as u32, padded / 2);
                assert!(arranged.iter().all(|g| g.len() == 2));

                // Every panel survives the shuffle exactly once
                let mut seen: Vec<u32> = arranged.iter().flatten().map(|c| c.unwrap()).collect();
                seen.sort_unstable();
                assert_eq!(seen, (1..=padded).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_split_front_back_parity() {
        let groups = vec![cells(&[1, 2]), cells(&[3, 4]), cells(&[5, 6]), cells(&[7, 8])];
        let (fronts, backs) = split_front_back(&groups);
        assert_eq!(fronts, vec![cells(&[1, 2]), cells(&[5, 6])]);
        assert_eq!(backs, vec![cells(&[3, 4]), cells(&[7, 8])]);
    }

    #[test]
    fn test_saddle_stitch_pairs() {
        assert_eq!(front_pairs(2, 8), vec![(1, 8), (3, 6)]);
        assert_eq!(back_pairs(2, 8), vec![(2, 7), (4, 5)]);

        // Fronts and backs together cover every page exactly once
        let mut pages: Vec<u32> = front_pairs(8, 32)
            .into_iter()
            .chain(back_pairs(8, 32))
            .flat_map(|(a, b)| [a, b])
            .collect();
        pages.sort_unstable();
        assert_eq!(pages, (1..=32).collect::<Vec<_>>());
    }
}
