//! Form XObject extraction
//!
//! Source pages are wrapped as Form XObjects so one page region can be
//! stamped onto several output sheets with different transforms. Pages of
//! the same job usually share fonts and images, so their resource trees
//! are migrated into the output through a per-job cache.

use crate::constants::{A4_HEIGHT_MM, A4_WIDTH_MM, mm_to_pt};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// Resource Cache
// =============================================================================

/// Source-to-output object map for one rendering job.
///
/// Every source object migrates into the output at most once; later panels
/// that reference the same font or image reuse the first copy.
#[derive(Debug, Default)]
pub(crate) struct ResourceCache {
    migrated: HashMap<ObjectId, ObjectId>,
}

/// Walks a source object graph, landing every reachable object in the
/// output document and rewriting references as it goes.
struct ResourceMigrator<'a> {
    source: &'a Document,
    output: &'a mut Document,
    cache: &'a mut ResourceCache,
}

impl ResourceMigrator<'_> {
    fn reference(&mut self, id: ObjectId) -> Result<ObjectId> {
        if let Some(&copied) = self.cache.migrated.get(&id) {
            return Ok(copied);
        }
        let source = self.source;
        let copied = self.object(source.get_object(id)?)?;
        let new_id = self.output.add_object(copied);
        self.cache.migrated.insert(id, new_id);
        Ok(new_id)
    }

    fn object(&mut self, obj: &Object) -> Result<Object> {
        Ok(match obj {
            Object::Reference(id) => Object::Reference(self.reference(*id)?),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.object(item))
                    .collect::<Result<_>>()?,
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.dictionary(dict)?),
            Object::Stream(stream) => Object::Stream(Stream {
                dict: self.dictionary(&stream.dict)?,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }),
            scalar => scalar.clone(),
        })
    }

    fn dictionary(&mut self, dict: &Dictionary) -> Result<Dictionary> {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            copied.set(key.clone(), self.object(value)?);
        }
        Ok(copied)
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Wrap a source page as a Form XObject in the output document.
///
/// The page's content streams are concatenated into the form body and its
/// resource tree is migrated through `cache`.
pub(crate) fn page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut ResourceCache,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let media_box = page_dict
        .get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .ok()
        .cloned()
        .unwrap_or_else(a4_media_box);

    let content = page_content(source, page_dict)?;

    let mut form = Dictionary::new();
    form.set("Type", Object::Name(b"XObject".to_vec()));
    form.set("Subtype", Object::Name(b"Form".to_vec()));
    form.set("BBox", Object::Array(media_box));
    form.set("FormType", Object::Integer(1));

    if let Ok(resources) = page_dict.get(b"Resources") {
        let migrated = ResourceMigrator {
            source,
            output,
            cache,
        }
        .object(resources)?;
        form.set("Resources", migrated);
    }

    Ok(output.add_object(Stream::new(form, content)))
}

fn a4_media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(mm_to_pt(A4_WIDTH_MM)),
        Object::Real(mm_to_pt(A4_HEIGHT_MM)),
    ]
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Concatenated, decompressed content of a page. No content means a blank
/// page and comes back empty.
fn page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(id) => stream_content(doc, *id),
        Object::Array(refs) => {
            let mut result = Vec::new();
            for obj in refs {
                if let Object::Reference(id) = obj {
                    result.extend_from_slice(&stream_content(doc, *id)?);
                    result.push(b'\n');
                }
            }
            Ok(result)
        }
        _ => Ok(Vec::new()),
    }
}

fn stream_content(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    if let Ok(stream) = doc.get_object(id)?.as_stream() {
        Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()))
    } else {
        Ok(Vec::new())
    }
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Source page dimensions (width, height) in points, falling back to A4.
pub(crate) fn page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page_dict = doc.get_dictionary(page_id)?;

    if let Ok(mb) = page_dict.get(b"MediaBox").and_then(|obj| obj.as_array())
        && mb.len() >= 4
    {
        let width = number(&mb[2]).unwrap_or_else(|| mm_to_pt(A4_WIDTH_MM));
        let height = number(&mb[3]).unwrap_or_else(|| mm_to_pt(A4_HEIGHT_MM));
        Ok((width, height))
    } else {
        Ok((mm_to_pt(A4_WIDTH_MM), mm_to_pt(A4_HEIGHT_MM)))
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
