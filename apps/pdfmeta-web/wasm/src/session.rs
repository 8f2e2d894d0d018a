//! Stateful editing session
//!
//! Holds the uploaded documents and the form settings in Rust so the page
//! only forwards DOM events and file bytes.

use crate::validation::{inspect_pdf, PdfInfo};
use pdfmeta_core::{
    process_batch_with, BatchOptions, BatchOutput, PdfMetaError, SkippedDocument,
    UploadedDocument,
};
use wasm_bindgen::prelude::*;

/// Stateful session that holds uploads and form settings in Rust memory
#[wasm_bindgen]
pub struct MetaEditSession {
    documents: Vec<UploadedDocument>,
    /// Inspection result per upload, parallel to `documents`
    infos: Vec<PdfInfo>,
    options: BatchOptions,
    progress_callback: Option<js_sys::Function>,
}

impl Default for MetaEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MetaEditSession {
    /// Create an empty session with the default author filled in
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            infos: Vec::new(),
            options: BatchOptions::default(),
            progress_callback: None,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn author(&self) -> String {
        self.options.author.clone()
    }

    #[wasm_bindgen(js_name = setAuthor)]
    pub fn set_author(&mut self, author: &str) {
        self.options.author = author.to_string();
    }

    /// Whether an all-skipped batch should fail instead of downloading an empty zip
    #[wasm_bindgen(js_name = setFailWhenAllSkipped)]
    pub fn set_fail_when_all_skipped(&mut self, fail: bool) {
        self.options.fail_when_all_skipped = fail;
    }

    /// Set a progress callback function
    /// Callback signature: (current: number, total: number, message: string) => void
    #[wasm_bindgen(js_name = setProgressCallback)]
    pub fn set_progress_callback(&mut self, callback: js_sys::Function) {
        self.progress_callback = Some(callback);
    }

    /// Internal method to add a document (testable without JsValue)
    fn add_document_internal(&mut self, name: &str, bytes: &[u8]) -> PdfInfo {
        let info = inspect_pdf(bytes);
        self.documents.push(UploadedDocument::new(name, bytes));
        self.infos.push(info.clone());
        info
    }

    /// Add an upload to the session.
    /// Unreadable files are accepted; their info carries the problem and they
    /// are skipped (or rejected, when alone) at execution time.
    #[wasm_bindgen(js_name = addDocument)]
    pub fn add_document(&mut self, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let info = self.add_document_internal(name, bytes);

        serde_wasm_bindgen::to_value(&info)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Remove a document by index
    #[wasm_bindgen(js_name = removeDocument)]
    pub fn remove_document(&mut self, index: usize) -> Result<(), JsValue> {
        if index >= self.documents.len() {
            return Err(JsValue::from_str("Document index out of bounds"));
        }
        self.documents.remove(index);
        self.infos.remove(index);
        Ok(())
    }

    /// Drop every upload and restore the default author
    #[wasm_bindgen(js_name = clearForm)]
    pub fn clear_form(&mut self) {
        self.documents.clear();
        self.infos.clear();
        self.options = BatchOptions::default();
    }

    fn previews(&self) -> Vec<DocumentPreviewJs> {
        self.documents
            .iter()
            .zip(&self.infos)
            .map(|(document, info)| DocumentPreviewJs {
                name: document.name.clone(),
                size_bytes: info.size_bytes,
                valid: info.valid,
                problem: info.problem.clone(),
                metadata: info.metadata.clone(),
            })
            .collect()
    }

    /// Metadata preview for every upload, in upload order
    #[wasm_bindgen(js_name = getPreviews)]
    pub fn get_previews(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.previews())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Get document count
    #[wasm_bindgen(js_name = getDocumentCount)]
    pub fn get_document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of uploads that are expected to be skipped
    #[wasm_bindgen(js_name = getInvalidCount)]
    pub fn get_invalid_count(&self) -> usize {
        self.infos.iter().filter(|info| !info.valid).count()
    }

    /// Check if session is ready for execution
    #[wasm_bindgen(js_name = canExecute)]
    pub fn can_execute(&self) -> bool {
        !self.documents.is_empty()
    }

    /// Apply the author and build the download
    pub fn execute(&self) -> Result<DownloadResult, JsValue> {
        self.report_progress(0, 100, "Starting...")?;

        let output = self
            .execute_internal()
            .map_err(|e| JsValue::from_str(&format!("Error processing PDF: {}", e)))?;

        for skipped in output.skipped() {
            web_sys::console::warn_1(
                &format!("Skipping {}: {}", skipped.name, skipped.reason).into(),
            );
        }

        self.report_progress(100, 100, "Complete")?;

        Ok(DownloadResult::from(output))
    }

    fn execute_internal(&self) -> Result<BatchOutput, PdfMetaError> {
        process_batch_with(&self.documents, &self.options, |done, total, name| {
            let _ = self.report_progress(
                (done * 95 / total) as u32,
                100,
                &format!("Processed {} ({}/{})", name, done, total),
            );
        })
    }

    /// Report progress to JavaScript callback
    fn report_progress(&self, current: u32, total: u32, message: &str) -> Result<(), JsValue> {
        if let Some(ref callback) = self.progress_callback {
            let this = JsValue::null();
            let _ = callback.call3(
                &this,
                &JsValue::from(current),
                &JsValue::from(total),
                &JsValue::from_str(message),
            );
        }
        Ok(())
    }
}

/// Finished download handed to JavaScript
#[wasm_bindgen]
pub struct DownloadResult {
    file_name: String,
    mime_type: String,
    data: Vec<u8>,
    skipped: Vec<SkippedDocument>,
}

#[wasm_bindgen]
impl DownloadResult {
    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Output bytes as Uint8Array
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> js_sys::Uint8Array {
        let array = js_sys::Uint8Array::new_with_length(self.data.len() as u32);
        array.copy_from(&self.data);
        array
    }

    /// Skipped uploads as `[{name, reason}]`
    #[wasm_bindgen(js_name = getSkipped)]
    pub fn get_skipped(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.skipped)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(getter, js_name = skippedCount)]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl From<BatchOutput> for DownloadResult {
    fn from(output: BatchOutput) -> Self {
        let file_name = output.file_name().to_string();
        let mime_type = output.mime_type().to_string();
        let skipped = output.skipped().to_vec();
        Self {
            file_name,
            mime_type,
            data: output.into_bytes(),
            skipped,
        }
    }
}

/// Preview row for JS serialization
#[derive(serde::Serialize)]
struct DocumentPreviewJs {
    name: String,
    size_bytes: usize,
    valid: bool,
    problem: Option<String>,
    metadata: pdfmeta_core::MetadataRecord,
}
