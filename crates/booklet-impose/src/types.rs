//! Core types for booklet imposition
//!
//! This module defines the fundamental types used throughout the imposition
//! process:
//! - Error types and Result alias
//! - Fold levels and their panel grids
//! - Trim sizes for the finished booklet
//! - Binding direction and sheet sides

use thiserror::Error;

// =============================================================================
// Error Handling
// =============================================================================

/// Errors that can occur during imposition
#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No pages to impose")]
    EmptyInput,

    #[error("Fold level {0} is outside the supported range 1..=4")]
    InvalidLevel(u8),

    #[error(
        "Invalid signature pair ({large}, {small}): both sizes must be positive multiples of 4 with large > small"
    )]
    InvalidPair { large: u32, small: u32 },

    #[error("Signature pair set is empty")]
    NoPairs,

    #[error("Source page {page} out of range ({available} pages available)")]
    PageOutOfRange { page: u32, available: usize },
}

/// Result type alias for imposition operations
pub type Result<T> = std::result::Result<T, ImposeError>;

// =============================================================================
// Fold Levels
// =============================================================================

/// Fold depth of a signature, named after the traditional formats.
///
/// Each fold halves the panel dimensions and doubles the panel count per
/// sheet. The panel grid is always at least as tall as it is wide, so a
/// portrait output sheet stays portrait at every depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldLevel {
    /// 1 fold: 2 panels per side (2 rows × 1 column)
    Folio,
    /// 2 folds: 4 panels per side (2 × 2)
    Quarto,
    /// 3 folds: 8 panels per side (4 rows × 2 columns)
    Octavo,
    /// 4 folds: 16 panels per side (4 × 4)
    Sextodecimo,
}

impl FoldLevel {
    /// Construct from a raw fold count.
    pub fn from_level(level: u8) -> Result<Self> {
        match level {
            1 => Ok(FoldLevel::Folio),
            2 => Ok(FoldLevel::Quarto),
            3 => Ok(FoldLevel::Octavo),
            4 => Ok(FoldLevel::Sextodecimo),
            other => Err(ImposeError::InvalidLevel(other)),
        }
    }

    /// Number of folds
    pub fn level(self) -> u8 {
        match self {
            FoldLevel::Folio => 1,
            FoldLevel::Quarto => 2,
            FoldLevel::Octavo => 3,
            FoldLevel::Sextodecimo => 4,
        }
    }

    /// Panel grid dimensions (rows, columns) on one sheet side
    pub fn grid_dimensions(self) -> (usize, usize) {
        match self {
            FoldLevel::Folio => (2, 1),
            FoldLevel::Quarto => (2, 2),
            FoldLevel::Octavo => (4, 2),
            FoldLevel::Sextodecimo => (4, 4),
        }
    }

    /// Panels on one side of a sheet
    pub fn panels_per_side(self) -> usize {
        let (rows, cols) = self.grid_dimensions();
        rows * cols
    }

    /// Panels on both sides of a sheet
    pub fn panels_per_sheet(self) -> usize {
        self.panels_per_side() * 2
    }

    /// Width of a panel-number matrix row: one row per fold spread
    pub fn matrix_width(self) -> usize {
        1 << self.level()
    }
}

// =============================================================================
// Trim Sizes
// =============================================================================

/// Trim size of the finished booklet, cut and folded from A4 sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimSize {
    /// Half of A4: one fold
    A5,
    /// Quarter of A4: two folds
    A6,
    /// Eighth of A4: three folds
    A7,
    /// Sixteenth of A4: four folds
    A8,
}

impl TrimSize {
    /// The fold depth that produces this trim size from A4
    pub fn fold_level(self) -> FoldLevel {
        match self {
            TrimSize::A5 => FoldLevel::Folio,
            TrimSize::A6 => FoldLevel::Quarto,
            TrimSize::A7 => FoldLevel::Octavo,
            TrimSize::A8 => FoldLevel::Sextodecimo,
        }
    }

    /// Output file suffix for this trim size
    pub fn file_suffix(self) -> &'static str {
        match self {
            TrimSize::A5 => "_A5_booklet.pdf",
            TrimSize::A6 => "_A6_booklet.pdf",
            TrimSize::A7 => "_A7_booklet.pdf",
            TrimSize::A8 => "_A8_booklet.pdf",
        }
    }
}

// =============================================================================
// Binding and Sheet Sides
// =============================================================================

/// Reading direction of the finished booklet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Binding {
    /// Left-to-right scripts (Latin)
    #[default]
    Ltr,
    /// Right-to-left scripts (Arabic, Hebrew)
    Rtl,
}

impl Binding {
    /// Reading orientation of one sheet side under this binding.
    ///
    /// Fronts read with the binding direction; backs read against it,
    /// because the sheet flips over between the two passes of a duplex
    /// print.
    pub fn orientation(self, side: SheetSide) -> Orientation {
        match (self, side) {
            (Binding::Ltr, SheetSide::Front) | (Binding::Rtl, SheetSide::Back) => {
                Orientation::LeftToRight
            }
            (Binding::Ltr, SheetSide::Back) | (Binding::Rtl, SheetSide::Front) => {
                Orientation::RightToLeft
            }
        }
    }
}

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// Reading direction across the panels of one sheet side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    LeftToRight,
    RightToLeft,
}

impl Orientation {
    /// Arrow label used in logs and plan listings
    pub fn label(self) -> &'static str {
        match self {
            Orientation::LeftToRight => "L→R",
            Orientation::RightToLeft => "R→L",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
