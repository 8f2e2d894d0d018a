//! Author rewriting for a single document
//!
//! Parses the PDF, sets `/Author` in the document information dictionary
//! and serializes the result. The document is always re-serialized, even
//! when the author is left untouched.

use crate::document::{load_document, output_file_name, EditedDocument, UploadedDocument};
use crate::error::PdfMetaError;
use crate::is_blank_author;
use crate::metadata::{encode_text_string, MetadataField};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

/// Set the author of a PDF and return the re-serialized bytes.
///
/// A blank (empty or whitespace-only) author leaves the existing value as
/// it is. Non-blank authors are stored verbatim. Owner-password-only files
/// are decrypted first and saved without encryption.
pub fn rewrite_author(bytes: &[u8], new_author: &str) -> Result<Vec<u8>, PdfMetaError> {
    let mut doc = load_document(bytes)?;

    if is_blank_author(new_author) {
        debug!("Blank author, leaving /Author unchanged");
    } else {
        set_author(&mut doc, new_author)?;
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfMetaError::SaveError(e.to_string()))?;

    Ok(buffer)
}

/// Rewrite an uploaded document, naming the output after the input
pub fn rewrite_document(
    document: &UploadedDocument,
    new_author: &str,
) -> Result<EditedDocument, PdfMetaError> {
    let bytes = rewrite_author(&document.bytes, new_author)?;
    let name = output_file_name(&document.name);
    debug!(
        "Rewrote {} -> {} ({} bytes)",
        document.name,
        name,
        bytes.len()
    );
    Ok(EditedDocument { name, bytes })
}

/// Write `/Author` into the info dictionary, creating the dictionary if needed
fn set_author(doc: &mut Document, author: &str) -> Result<(), PdfMetaError> {
    info_dictionary_mut(doc)?.set(MetadataField::Author.key(), encode_text_string(author));
    Ok(())
}

enum InfoSlot {
    Indirect(ObjectId),
    Inline,
    Missing,
}

fn info_dictionary_mut(doc: &mut Document) -> Result<&mut Dictionary, PdfMetaError> {
    let slot = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => InfoSlot::Indirect(*id),
        Ok(Object::Dictionary(_)) => InfoSlot::Inline,
        _ => InfoSlot::Missing,
    };

    let info_id = match slot {
        InfoSlot::Indirect(id) => Some(id),
        InfoSlot::Inline => None,
        // Missing or unusable: replace with a fresh indirect dictionary
        InfoSlot::Missing => {
            let id = doc.add_object(Dictionary::new());
            doc.trailer.set("Info", Object::Reference(id));
            Some(id)
        }
    };

    let info = match info_id {
        Some(id) => {
            if doc.get_object(id).map_or(true, |obj| obj.as_dict().is_err()) {
                // Dangling or non-dictionary target
                doc.objects.insert(id, Object::Dictionary(Dictionary::new()));
            }
            doc.get_object_mut(id)
        }
        None => doc.trailer.get_mut(b"Info"),
    };

    info.and_then(Object::as_dict_mut)
        .map_err(|e| PdfMetaError::ParseError(format!("Unusable /Info dictionary: {}", e)))
}
