//! Zip packaging for multi-document batches

use std::io::{Cursor, Write};

use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::document::EditedDocument;
use crate::error::PdfMetaError;

/// Incrementally builds an in-memory deflate archive.
///
/// Entries keep insertion order.
pub struct ArchiveBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    entries: Vec<String>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            entries: Vec::new(),
        }
    }

    /// Append one edited document as an archive entry.
    ///
    /// Names must be unique within the archive.
    pub fn add(&mut self, document: &EditedDocument) -> Result<(), PdfMetaError> {
        if self.entries.contains(&document.name) {
            return Err(PdfMetaError::DuplicateEntry(document.name.clone()));
        }

        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        self.zip.start_file(document.name.as_str(), options)?;
        self.zip.write_all(&document.bytes).map_err(|e| {
            PdfMetaError::ArchiveError(format!("Failed to write {}: {}", document.name, e))
        })?;
        self.entries.push(document.name.clone());
        Ok(())
    }

    /// Write the central directory and return the archive bytes with its entry names
    pub fn finish(self) -> Result<(Vec<u8>, Vec<String>), PdfMetaError> {
        let cursor = self.zip.finish()?;
        Ok((cursor.into_inner(), self.entries))
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
