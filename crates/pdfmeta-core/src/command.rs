//! JSON command interface
//!
//! Binary payloads travel as base64 strings so a whole request fits in one
//! JSON document.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::batch::{preview_documents, process_batch_with, BatchOptions, DocumentPreview};
use crate::document::{SkippedDocument, UploadedDocument};
use crate::error::PdfMetaError;

#[derive(Debug, Clone, Deserialize)]
pub struct CommandFile {
    pub name: String,
    /// Base64-encoded PDF data
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum MetaCommand {
    Preview {
        files: Vec<CommandFile>,
    },
    Apply {
        files: Vec<CommandFile>,
        #[serde(flatten)]
        options: BatchOptions,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessResult {
    pub success: bool,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    /// Base64-encoded output data
    pub data: Option<String>,
    pub previews: Vec<DocumentPreview>,
    pub skipped: Vec<SkippedDocument>,
    pub error: Option<String>,
}

impl ProcessResult {
    fn failure(error: &PdfMetaError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

fn decode_files(files: Vec<CommandFile>) -> Result<Vec<UploadedDocument>, PdfMetaError> {
    files
        .into_iter()
        .map(|file| {
            let bytes = BASE64.decode(file.data.as_bytes()).map_err(|e| {
                PdfMetaError::InvalidCommand(format!("Invalid base64 for {}: {}", file.name, e))
            })?;
            Ok(UploadedDocument::new(file.name, bytes))
        })
        .collect()
}

/// Run a command; failures are reported inside the result
pub fn execute_command(command: MetaCommand) -> ProcessResult {
    run(command).unwrap_or_else(|e| ProcessResult::failure(&e))
}

/// Parse a JSON command and run it
pub fn execute_json(json: &str) -> ProcessResult {
    match serde_json::from_str::<MetaCommand>(json) {
        Ok(command) => execute_command(command),
        Err(e) => ProcessResult::failure(&PdfMetaError::InvalidCommand(e.to_string())),
    }
}

fn run(command: MetaCommand) -> Result<ProcessResult, PdfMetaError> {
    match command {
        MetaCommand::Preview { files } => {
            let documents = decode_files(files)?;
            Ok(ProcessResult {
                success: true,
                previews: preview_documents(&documents),
                ..ProcessResult::default()
            })
        }
        MetaCommand::Apply { files, options } => {
            let documents = decode_files(files)?;
            let output = process_batch_with(&documents, &options, |_, _, _| {})?;
            Ok(ProcessResult {
                success: true,
                file_name: Some(output.file_name().to_string()),
                mime_type: Some(output.mime_type().to_string()),
                skipped: output.skipped().to_vec(),
                data: Some(BASE64.encode(output.bytes())),
                ..ProcessResult::default()
            })
        }
    }
}
