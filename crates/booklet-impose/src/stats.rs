//! Statistics calculation for imposition
//!
//! Summarizes a job descriptor without rendering anything.

use crate::layout::JobDescriptor;

/// Statistics about an imposition job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatistics {
    /// Pages in the source document
    pub source_pages: u32,
    /// Number of signatures
    pub signatures: usize,
    /// Padded page count of each signature, in layout order
    pub pages_per_signature: Vec<u32>,
    /// Total physical sheets
    pub total_sheets: u32,
    /// Total output pages (two per sheet)
    pub output_pages: u32,
    /// Panels left blank across the whole job
    pub blank_panels: u32,
}

impl JobStatistics {
    /// Returns true if any panels stay blank
    pub fn has_blanks(&self) -> bool {
        self.blank_panels > 0
    }
}

/// Calculate statistics for a job descriptor
pub fn job_statistics(job: &JobDescriptor) -> JobStatistics {
    let blank_panels = job
        .signatures
        .iter()
        .flat_map(|s| &s.records)
        .filter(|r| r.is_blank())
        .count() as u32;

    JobStatistics {
        source_pages: job.plan.input_pages(),
        signatures: job.signatures.len(),
        pages_per_signature: job.signatures.iter().map(|s| s.padded).collect(),
        total_sheets: job.total_sheets(),
        output_pages: job.output_pages(),
        blank_panels,
    }
}
