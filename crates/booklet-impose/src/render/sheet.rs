//! Output sheet rendering
//!
//! The one lopdf-aware consumer of placement records: allocates two A4
//! output pages per sheet and stamps every non-blank record's source page
//! into its panel box with the record's rotation.

use super::xobject::{ResourceCache, page_dimensions, page_xobject};
use crate::constants::mm_to_pt;
use crate::geometry::{Rect, a4_portrait, grid_boxes};
use crate::layout::{JobDescriptor, PlacementRecord};
use crate::types::{ImposeError, Result, SheetSide};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

// =============================================================================
// Job Rendering
// =============================================================================

/// Render a job descriptor against its source document.
///
/// Output pages appear per signature as sheet 1 front, sheet 1 back,
/// sheet 2 front, … ready for duplex printing. Blank panels are left
/// unpainted.
pub fn render_job(source: &Document, job: &JobDescriptor, margin_mm: f32) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();

    let sheet_rect = a4_portrait();
    let (rows, cols) = job.level.grid_dimensions();
    let boxes: Vec<Rect> = grid_boxes(&sheet_rect, rows, cols)
        .iter()
        .map(|b| b.inset(mm_to_pt(margin_mm)))
        .collect();

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut resources = ResourceCache::default();
    let mut page_refs = Vec::new();

    for signature in &job.signatures {
        // One paint list per output side of this signature
        let mut sides: Vec<Vec<(u32, &PlacementRecord)>> =
            vec![Vec::new(); signature.sheets as usize * 2];
        for record in &signature.records {
            let Some(page) = record.global_page else {
                continue;
            };
            let side_index = (record.sheet as usize - 1) * 2
                + if record.side == SheetSide::Back { 1 } else { 0 };
            sides[side_index].push((page, record));
        }

        for records in &sides {
            let page_id = render_side(
                &mut output,
                source,
                &page_ids,
                records,
                &boxes,
                cols,
                &sheet_rect,
                pages_tree_id,
                &mut resources,
            )?;
            page_refs.push(Object::Reference(page_id));
        }
    }

    // Pages tree and catalog
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    Ok(output)
}

// =============================================================================
// Side Rendering
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn render_side(
    output: &mut Document,
    source: &Document,
    page_ids: &[ObjectId],
    records: &[(u32, &PlacementRecord)],
    boxes: &[Rect],
    cols: usize,
    sheet_rect: &Rect,
    parent_pages_id: ObjectId,
    cache: &mut ResourceCache,
) -> Result<ObjectId> {
    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for &(page, record) in records {
        let source_id = *page_ids.get(page as usize - 1).ok_or_else(|| {
            ImposeError::PageOutOfRange {
                page,
                available: page_ids.len(),
            }
        })?;

        let xobject_name = format!("P{}", page);
        let xobject_id = page_xobject(output, source, source_id, cache)?;
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        let panel = &boxes[record.row as usize * cols + record.col as usize];
        let (src_w, src_h) = page_dimensions(source, source_id)?;
        content_ops.push(placement_command(
            &xobject_name,
            panel,
            src_w,
            src_h,
            record.rotation_degrees,
        ));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(sheet_rect.width),
            Object::Real(sheet_rect.height),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Placement Commands
// =============================================================================

/// Content-stream command stamping an XObject into a panel box.
///
/// The source page is scaled to fit its rotated footprint inside the box
/// and centered. Angles are counter-clockwise multiples of 90°.
fn placement_command(name: &str, panel: &Rect, src_w: f32, src_h: f32, rotation: u16) -> String {
    let quarter_turn = rotation == 90 || rotation == 270;
    let (fit_w, fit_h) = if quarter_turn {
        (src_h, src_w)
    } else {
        (src_w, src_h)
    };
    let scale = (panel.width / fit_w).min(panel.height / fit_h);

    // Bottom-left of the scaled footprint, centered in the panel
    let x = panel.x + (panel.width - fit_w * scale) / 2.0;
    let y = panel.y + (panel.height - fit_h * scale) / 2.0;

    match rotation {
        90 => format!(
            "q 0 {s} {ns} 0 {} {} cm /{} Do Q\n",
            x + src_h * scale,
            y,
            name,
            s = scale,
            ns = -scale,
        ),
        180 => format!(
            "q {ns} 0 0 {ns} {} {} cm /{} Do Q\n",
            x + src_w * scale,
            y + src_h * scale,
            name,
            ns = -scale,
        ),
        270 => format!(
            "q 0 {ns} {s} 0 {} {} cm /{} Do Q\n",
            x,
            y + src_w * scale,
            name,
            s = scale,
            ns = -scale,
        ),
        _ => format!("q {s} 0 0 {s} {} {} cm /{} Do Q\n", x, y, name, s = scale),
    }
}

// =============================================================================
// Tests
// =============================================================================
