//! Bulk author rewriting
//!
//! A batch of one produces the edited PDF directly and fails on a bad
//! input. Larger batches isolate failures per document and package every
//! success into a zip archive, in input order.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::archive::ArchiveBuilder;
use crate::document::{
    EditedDocument, SkippedDocument, UploadedDocument, ARCHIVE_NAME, PDF_MIME_TYPE,
    ZIP_MIME_TYPE,
};
use crate::error::PdfMetaError;
use crate::metadata::{read_metadata, MetadataRecord};
use crate::rewrite::rewrite_document;

/// Author pre-filled in a fresh form
pub const DEFAULT_AUTHOR: &str = "Citigroup";

/// Per-request settings for a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Replacement author; blank leaves every document's author unchanged
    pub author: String,
    /// Fail instead of returning an empty archive when every document is skipped
    pub fail_when_all_skipped: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            fail_when_all_skipped: false,
        }
    }
}

impl BatchOptions {
    pub fn with_author(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            ..Self::default()
        }
    }
}

/// Zip of the documents that were edited successfully
#[derive(Debug, Clone)]
pub struct ArchiveOutput {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Entry names in input order
    pub entries: Vec<String>,
    /// Inputs left out of the archive, in input order
    pub skipped: Vec<SkippedDocument>,
}

/// Result of a batch call
#[derive(Debug, Clone)]
pub enum BatchOutput {
    Single(EditedDocument),
    Archive(ArchiveOutput),
}

impl BatchOutput {
    pub fn file_name(&self) -> &str {
        match self {
            BatchOutput::Single(doc) => &doc.name,
            BatchOutput::Archive(archive) => &archive.name,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            BatchOutput::Single(_) => PDF_MIME_TYPE,
            BatchOutput::Archive(_) => ZIP_MIME_TYPE,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            BatchOutput::Single(doc) => &doc.bytes,
            BatchOutput::Archive(archive) => &archive.bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            BatchOutput::Single(doc) => doc.bytes,
            BatchOutput::Archive(archive) => archive.bytes,
        }
    }

    /// Documents that were skipped; always empty for a single-document batch
    pub fn skipped(&self) -> &[SkippedDocument] {
        match self {
            BatchOutput::Single(_) => &[],
            BatchOutput::Archive(archive) => &archive.skipped,
        }
    }
}

/// One row of the metadata preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentPreview {
    pub name: String,
    pub size_bytes: usize,
    pub metadata: MetadataRecord,
}

/// Read the metadata of every document; never fails
pub fn preview_documents(documents: &[UploadedDocument]) -> Vec<DocumentPreview> {
    documents
        .iter()
        .map(|doc| DocumentPreview {
            name: doc.name.clone(),
            size_bytes: doc.bytes.len(),
            metadata: read_metadata(&doc.bytes),
        })
        .collect()
}

/// Rewrite the author of every document with default options
pub fn process_batch(
    documents: &[UploadedDocument],
    new_author: &str,
) -> Result<BatchOutput, PdfMetaError> {
    process_batch_with(documents, &BatchOptions::with_author(new_author), |_, _, _| {})
}

/// Rewrite the author of every document.
///
/// `on_progress(done, total, name)` is called after each document, whether
/// it succeeded or was skipped.
pub fn process_batch_with<F>(
    documents: &[UploadedDocument],
    options: &BatchOptions,
    mut on_progress: F,
) -> Result<BatchOutput, PdfMetaError>
where
    F: FnMut(usize, usize, &str),
{
    match documents {
        [] => Err(PdfMetaError::NoDocuments),
        [document] => {
            let edited = rewrite_document(document, &options.author)?;
            on_progress(1, 1, &document.name);
            info!("Processed {} -> {}", document.name, edited.name);
            Ok(BatchOutput::Single(edited))
        }
        _ => {
            let archive = build_archive(documents, options, &mut on_progress)?;
            if archive.entries.is_empty() && options.fail_when_all_skipped {
                return Err(PdfMetaError::AllDocumentsSkipped(documents.len()));
            }
            Ok(BatchOutput::Archive(archive))
        }
    }
}

fn build_archive<F>(
    documents: &[UploadedDocument],
    options: &BatchOptions,
    on_progress: &mut F,
) -> Result<ArchiveOutput, PdfMetaError>
where
    F: FnMut(usize, usize, &str),
{
    let total = documents.len();
    let mut builder = ArchiveBuilder::new();
    let mut skipped = Vec::new();

    for (i, document) in documents.iter().enumerate() {
        let outcome =
            rewrite_document(document, &options.author).and_then(|edited| builder.add(&edited));

        if let Err(e) = outcome {
            warn!("Skipping {}: {}", document.name, e);
            skipped.push(SkippedDocument {
                name: document.name.clone(),
                reason: e.to_string(),
            });
        }

        on_progress(i + 1, total, &document.name);
    }

    let (bytes, entries) = builder.finish()?;

    info!(
        "Packaged {} of {} documents into {} ({} skipped)",
        entries.len(),
        total,
        ARCHIVE_NAME,
        skipped.len()
    );

    Ok(ArchiveOutput {
        name: ARCHIVE_NAME.to_string(),
        bytes,
        entries,
        skipped,
    })
}
