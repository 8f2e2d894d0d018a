//! PDF inspection for the upload list
//!
//! Reports whether an upload will survive the rewrite step, together with
//! its previewed metadata, without ever rejecting the upload itself.

use lopdf::Document;
use pdfmeta_core::metadata::read_document_metadata;
use pdfmeta_core::{unlock_document, MetadataRecord};
use serde::Serialize;

/// Upload information shown next to each file
#[derive(Debug, Clone, Serialize, Default)]
pub struct PdfInfo {
    /// Number of pages, zero when the document did not parse
    pub page_count: u32,
    /// PDF version string from the header (e.g., "1.7")
    pub version: String,
    /// Whether the document carries an `/Encrypt` dictionary
    pub encrypted: bool,
    /// File size in bytes
    pub size_bytes: usize,
    /// Whether the document can be rewritten
    pub valid: bool,
    /// Why the document cannot be rewritten
    pub problem: Option<String>,
    /// Author, title, subject and keywords
    pub metadata: MetadataRecord,
}

/// Inspect an upload; problems are recorded, not returned as errors
pub fn inspect_pdf(bytes: &[u8]) -> PdfInfo {
    let mut info = PdfInfo {
        size_bytes: bytes.len(),
        ..PdfInfo::default()
    };

    if let Err(problem) = quick_validate(bytes) {
        info.problem = Some(problem);
        return info;
    }
    info.version = extract_version(bytes);

    let mut document = match Document::load_mem(bytes) {
        Ok(document) => document,
        Err(e) => {
            info.problem = Some(format!("Failed to parse PDF: {}", e));
            return info;
        }
    };

    info.page_count = document.get_pages().len() as u32;
    info.encrypted = document.is_encrypted();
    // Owner-password-only files open with the empty user password
    if let Err(e) = unlock_document(&mut document) {
        info.problem = Some(e.to_string());
        return info;
    }

    info.metadata = read_document_metadata(&document);
    info.valid = true;
    info
}

/// Extract PDF version from header
fn extract_version(bytes: &[u8]) -> String {
    // Header format: %PDF-1.7
    if bytes.len() >= 8 && bytes.starts_with(b"%PDF-") {
        if let Ok(version) = std::str::from_utf8(&bytes[5..8]) {
            return version.trim().to_string();
        }
    }
    "1.4".to_string()
}

/// Cheap header and trailer check, without parsing
pub fn quick_validate(bytes: &[u8]) -> Result<(), String> {
    if bytes.len() < 8 {
        return Err("File too small to be a valid PDF".to_string());
    }

    if !bytes.starts_with(b"%PDF-") {
        return Err("Not a valid PDF file (missing %PDF- header)".to_string());
    }

    // %%EOF should sit near the end
    let tail = if bytes.len() > 1024 {
        &bytes[bytes.len() - 1024..]
    } else {
        bytes
    };

    if !tail.windows(5).any(|w| w == b"%%EOF") {
        return Err("PDF appears truncated (missing %%EOF marker)".to_string());
    }

    Ok(())
}
