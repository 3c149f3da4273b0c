//! Booklet imposition entry points
//!
//! The pure core maps a page count to a job descriptor; the async wrappers
//! carry a source document from disk through planning and rendering, with
//! lopdf's CPU-bound work on blocking workers.

use lopdf::Document;
use std::path::Path;
use tracing::info;

use crate::layout::{JobDescriptor, build_records};
use crate::options::ImposeOptions;
use crate::plan::choose_best_plan;
use crate::render::render_job;
use crate::types::{Binding, FoldLevel, ImposeError, Result, TrimSize};

// =============================================================================
// Core Entry Point
// =============================================================================

/// Describe the imposition of `page_count` sequential pages.
///
/// Chooses the best signature plan for the configured pair set, then maps
/// every signature's pages to panels. Fails eagerly on an empty input or
/// invalid configuration; no partial work is done.
pub fn impose(
    page_count: u32,
    level: FoldLevel,
    binding: Binding,
    options: &ImposeOptions,
) -> Result<JobDescriptor> {
    if page_count == 0 {
        return Err(ImposeError::EmptyInput);
    }
    options.validate()?;

    let (plan, ranked) = choose_best_plan(page_count, &options.pairs)?;
    info!(
        plan = %plan.expression,
        blanks = plan.blanks,
        candidates = ranked.len(),
        "signature plan selected"
    );

    let signatures = build_records(&plan.sequence, level, binding, page_count);

    Ok(JobDescriptor {
        plan,
        level,
        binding,
        signatures,
    })
}

// =============================================================================
// Document Pipeline
// =============================================================================

/// Impose a source document into a duplex booklet at the given trim size.
///
/// Planning is cheap and runs inline; the lopdf rendering is CPU-bound and
/// moves to a blocking task.
pub async fn impose_booklet(
    source: &Document,
    target: TrimSize,
    binding: Binding,
    options: &ImposeOptions,
) -> Result<Document> {
    let page_count = source.get_pages().len() as u32;
    let job = impose(page_count, target.fold_level(), binding, options)?;

    info!(
        pages = page_count,
        sheets = job.total_sheets(),
        ?target,
        "imposing booklet"
    );

    let source = source.clone();
    let margin_mm = options.page_margin_mm;
    tokio::task::spawn_blocking(move || render_job(&source, &job, margin_mm)).await?
}

// =============================================================================
// Document I/O
// =============================================================================

/// Read a source PDF, parsing it off the async runtime.
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let bytes = tokio::fs::read(path).await?;
    tokio::task::spawn_blocking(move || Document::load_mem(&bytes).map_err(ImposeError::from))
        .await?
}

/// Serialize the imposed document and write it out.
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let bytes = tokio::task::spawn_blocking(move || {
        let mut doc = doc;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok::<_, ImposeError>(buffer)
    })
    .await??;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
