//! WASM bindings for PDF author metadata editing
//!
//! This module provides a stateful, session-based API for the bulk editor.
//! All state is held in Rust, minimizing JavaScript complexity.
//!
//! ## Architecture
//!
//! - Upload list and form settings in Rust via `MetaEditSession`
//! - Metadata preview and validation in Rust
//! - Author rewriting and zip packaging via `pdfmeta-core`
//! - JavaScript only handles DOM events, file I/O and the download link
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { MetaEditSession } from './pkg/pdfmeta_wasm.js';
//!
//! await init();
//!
//! const session = new MetaEditSession();
//! session.setProgressCallback((current, total, msg) => updateUI(current, total, msg));
//! const preview = session.addDocument("report.pdf", bytes);
//! session.setAuthor("Citigroup");
//! const result = session.execute();
//! downloadBlob(result.data, result.fileName, result.mimeType);
//! result.getSkipped().forEach(s => showWarning(`Skipping ${s.name}: ${s.reason}`));
//!
//! session.clearForm(); // drop uploads, restore the default author
//! ```

pub mod session;
pub mod validation;


use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use session::{DownloadResult, MetaEditSession};
pub use validation::PdfInfo;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"PDF metadata editor WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Quick validation check for a PDF file
/// Returns Ok(()) if valid, Err with message if not
#[wasm_bindgen(js_name = quickValidate)]
pub fn quick_validate(bytes: &[u8]) -> Result<(), JsValue> {
    validation::quick_validate(bytes).map_err(|e| JsValue::from_str(&e))
}

/// Inspect a PDF without creating a session
#[wasm_bindgen(js_name = getPdfInfo)]
pub fn get_pdf_info(bytes: &[u8]) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&validation::inspect_pdf(bytes))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Read `{author, title, subject, keywords}`; unreadable files give empty strings
#[wasm_bindgen(js_name = readMetadata)]
pub fn read_metadata(bytes: &[u8]) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&pdfmeta_core::read_metadata(bytes))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Run a JSON command (`Preview` or `Apply`) and return its result object
#[wasm_bindgen(js_name = runCommand)]
pub fn run_command(json: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&pdfmeta_core::execute_json(json))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Format bytes as human-readable string
#[wasm_bindgen(js_name = formatBytes)]
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
