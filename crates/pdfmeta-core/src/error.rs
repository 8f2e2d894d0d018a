use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfMetaError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("PDF is encrypted and requires a password")]
    Encrypted,

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Failed to write archive: {0}")]
    ArchiveError(String),

    #[error("Output name {0} collides with an earlier document")]
    DuplicateEntry(String),

    #[error("Please upload at least one PDF file.")]
    NoDocuments,

    #[error("All {0} documents were skipped")]
    AllDocumentsSkipped(usize),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl PdfMetaError {
    /// True for failures caused by the input not being a usable PDF container.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, PdfMetaError::ParseError(_) | PdfMetaError::Encrypted)
    }
}

impl From<zip::result::ZipError> for PdfMetaError {
    fn from(err: zip::result::ZipError) -> Self {
        PdfMetaError::ArchiveError(err.to_string())
    }
}
