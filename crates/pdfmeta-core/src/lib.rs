//! PDF author metadata bulk editing
//!
//! This crate provides in-memory PDF metadata editing using lopdf:
//! - `read_metadata`: preview author, title, subject and keywords (never fails)
//! - `rewrite_author`: set the author of one document and re-serialize it
//! - `process_batch`: rewrite many documents, packaging the results as a zip
//!
//! Nothing touches the filesystem; every buffer lives for one call.

pub mod archive;
pub mod batch;
pub mod command;
pub mod document;
pub mod error;
pub mod metadata;
pub mod rewrite;

#[cfg(test)]
pub(crate) mod fixtures;

pub use archive::ArchiveBuilder;
pub use batch::{
    preview_documents, process_batch, process_batch_with, ArchiveOutput, BatchOptions,
    BatchOutput, DocumentPreview, DEFAULT_AUTHOR,
};
pub use command::{execute_command, execute_json, MetaCommand, ProcessResult};
pub use document::{
    load_document, output_file_name, unlock_document, EditedDocument, SkippedDocument, UploadedDocument, ARCHIVE_NAME,
    OUTPUT_SUFFIX, PDF_MIME_TYPE, ZIP_MIME_TYPE,
};
pub use error::PdfMetaError;
pub use metadata::{read_metadata, MetadataField, MetadataRecord};
pub use rewrite::{rewrite_author, rewrite_document};

/// True when `author` would leave the author field untouched
pub fn is_blank_author(author: &str) -> bool {
    author.trim().is_empty()
}
