//! Appends an uploaded company profile to a generated proposal PDF.
//!
//! [`merge`] is strict and reports why a merge failed. [`merge_or_main`] is what the
//! download path calls: a failed merge still yields the proposal on its own.

use std::collections::{HashMap, HashSet};

use lopdf::{Document, Object, ObjectId};
use thiserror::Error;
use tracing::{info, warn};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against malformed, cyclic `Parent` chains
const MAX_TREE_DEPTH: usize = 64;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MergeError {
    #[error("Failed to load {which} document: {reason}")]
    Load { which: &'static str, reason: String },
    #[error("The {0} document has no page tree")]
    MissingPageTree(&'static str),
    #[error("The {0} document has no pages")]
    NoPages(&'static str),
    #[error("Failed to write merged document: {0}")]
    Save(String),
}

/// What the download path ends up emitting.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    Merged(Vec<u8>),
    /// The main document alone, with the reason the attachment was dropped
    MainOnly { bytes: Vec<u8>, reason: Option<MergeError> },
}

impl MergeOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            MergeOutcome::Merged(bytes) | MergeOutcome::MainOnly { bytes, .. } => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            MergeOutcome::Merged(bytes) | MergeOutcome::MainOnly { bytes, .. } => bytes,
        }
    }
}

fn load(which: &'static str, bytes: &[u8]) -> Result<Document, MergeError> {
    Document::load_mem(bytes).map_err(|e| MergeError::Load { which, reason: e.to_string() })
}

fn catalog_id(doc: &Document, which: &'static str) -> Result<ObjectId, MergeError> {
    doc.trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| MergeError::MissingPageTree(which))
}

fn page_tree_root(doc: &Document, which: &'static str) -> Result<ObjectId, MergeError> {
    let catalog = catalog_id(doc, which)?;
    doc.get_dictionary(catalog)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| MergeError::MissingPageTree(which))
}

fn is_page_tree_node(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .map(|name| name == b"Pages")
        .unwrap_or(false)
}

/// Attributes `page_id` would inherit from its ancestors but does not define itself.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(&'static [u8], Object)> {
    let mut found = Vec::new();
    let Ok(page) = doc.get_dictionary(page_id) else {
        return found;
    };

    for key in INHERITABLE {
        if page.has(key) {
            continue;
        }
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut depth = 0;
        while let (Some(node_id), true) = (parent, depth < MAX_TREE_DEPTH) {
            let Ok(node) = doc.get_dictionary(node_id) else { break };
            if let Ok(value) = node.get(key) {
                found.push((key, value.clone()));
                break;
            }
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }
    }
    found
}

/// Appends every page of `attachment` after the pages of `main`.
pub fn merge(main: &[u8], attachment: &[u8]) -> Result<Vec<u8>, MergeError> {
    let mut document = load("main", main)?;
    let mut appendix = load("attachment", attachment)?;

    // Move the attachment's object ids past the main document's before copying
    appendix.renumber_objects_with(document.max_id + 1);
    document.max_id = appendix.max_id;

    let pages_root = page_tree_root(&document, "main")?;
    let appendix_catalog = catalog_id(&appendix, "attachment")?;
    let appendix_root = page_tree_root(&appendix, "attachment")?;

    let appended: Vec<ObjectId> = appendix.get_pages().into_values().collect();
    if appended.is_empty() {
        return Err(MergeError::NoPages("attachment"));
    }
    let mut inherited: HashMap<ObjectId, Vec<(&'static [u8], Object)>> = appended
        .iter()
        .map(|&page_id| (page_id, inherited_attributes(&appendix, page_id)))
        .collect();

    // The attachment's page tree is replaced by the main one; only its pages move over
    let mut skipped: HashSet<ObjectId> = appendix
        .objects
        .iter()
        .filter(|(_, object)| is_page_tree_node(object))
        .map(|(&id, _)| id)
        .collect();
    skipped.insert(appendix_catalog);
    skipped.insert(appendix_root);

    for (id, object) in appendix.objects {
        if skipped.contains(&id) {
            continue;
        }
        document.objects.insert(id, object);
    }

    for &page_id in &appended {
        if let Ok(page) = document.get_object_mut(page_id).and_then(Object::as_dict_mut) {
            for (key, value) in inherited.remove(&page_id).unwrap_or_default() {
                page.set(key, value);
            }
            page.set("Parent", pages_root);
        }
    }

    let root = document
        .get_object_mut(pages_root)
        .and_then(Object::as_dict_mut)
        .map_err(|_| MergeError::MissingPageTree("main"))?;
    root.get_mut(b"Kids")
        .and_then(Object::as_array_mut)
        .map_err(|_| MergeError::MissingPageTree("main"))?
        .extend(appended.iter().map(|&id| Object::Reference(id)));
    let count = root.get(b"Count").and_then(Object::as_i64).unwrap_or(0) + appended.len() as i64;
    root.set("Count", count);

    let mut merged = Vec::new();
    document
        .save_to(&mut merged)
        .map_err(|e| MergeError::Save(e.to_string()))?;
    Ok(merged)
}

/// Merges when an attachment is present; otherwise, or on any failure, returns `main` alone.
pub fn merge_or_main(main: &[u8], attachment: Option<&[u8]>) -> MergeOutcome {
    let Some(attachment) = attachment else {
        return MergeOutcome::MainOnly { bytes: main.to_vec(), reason: None };
    };
    match merge(main, attachment) {
        Ok(bytes) => {
            info!(size = bytes.len(), "Attachment merged into proposal");
            MergeOutcome::Merged(bytes)
        }
        Err(e) => {
            warn!(error = %e, "Attachment merge failed, emitting proposal alone");
            MergeOutcome::MainOnly { bytes: main.to_vec(), reason: Some(e) }
        }
    }
}
