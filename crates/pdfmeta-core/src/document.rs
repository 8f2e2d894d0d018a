//! Named byte buffers flowing through the editor and output naming rules

use crate::error::PdfMetaError;
use lopdf::Document;
use serde::Serialize;
use tracing::debug;

/// Suffix appended to the stem of every edited file
pub const OUTPUT_SUFFIX: &str = "-CG";

/// File name of the archive produced for multi-document batches
pub const ARCHIVE_NAME: &str = "modified_pdfs.zip";

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const ZIP_MIME_TYPE: &str = "application/zip";

/// Parse a PDF, opening encrypted files with the empty user password.
///
/// Files protected only by an owner password decrypt and come back with
/// `/Encrypt` removed; anything that needs a user password fails with
/// `PdfMetaError::Encrypted`.
pub fn load_document(bytes: &[u8]) -> Result<Document, PdfMetaError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| PdfMetaError::ParseError(e.to_string()))?;
    unlock_document(&mut doc)?;
    Ok(doc)
}

/// Decrypt `doc` in place when it is encrypted with an empty user password
pub fn unlock_document(doc: &mut Document) -> Result<(), PdfMetaError> {
    if !doc.is_encrypted() {
        return Ok(());
    }
    doc.decrypt("").map_err(|e| {
        debug!("Empty user password rejected: {}", e);
        PdfMetaError::Encrypted
    })
}

/// A PDF supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A re-serialized PDF ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A batch member that could not be edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub name: String,
    pub reason: String,
}

/// Derive the download name for an edited document.
///
/// The extension of the final path component is dropped (a leading dot does
/// not start an extension), then `-CG.pdf` is appended:
/// `report.pdf` -> `report-CG.pdf`, `report` -> `report-CG.pdf`.
pub fn output_file_name(input_name: &str) -> String {
    format!("{}{}.pdf", file_stem(input_name), OUTPUT_SUFFIX)
}

/// Everything before the extension of the final path component
fn file_stem(name: &str) -> &str {
    let base_start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let base = &name[base_start..];

    let leading_dots = base.len() - base.trim_start_matches('.').len();
    match base[leading_dots..].rfind('.') {
        Some(dot) => &name[..base_start + leading_dots + dot],
        None => name,
    }
}
