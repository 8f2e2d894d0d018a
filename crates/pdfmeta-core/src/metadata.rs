//! Document information dictionary access
//!
//! Reads the four previewed fields out of the trailer's `/Info` dictionary
//! and converts between PDF text strings and Rust strings.

use crate::document::load_document;
use lopdf::{Dictionary, Document, Object, StringFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The four metadata fields shown in the preview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub author: String,
    pub title: String,
    pub subject: String,
    pub keywords: String,
}

impl MetadataRecord {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.author.is_empty()
            && self.title.is_empty()
            && self.subject.is_empty()
            && self.keywords.is_empty()
    }

    fn slot_mut(&mut self, field: MetadataField) -> &mut String {
        match field {
            MetadataField::Author => &mut self.author,
            MetadataField::Title => &mut self.title,
            MetadataField::Subject => &mut self.subject,
            MetadataField::Keywords => &mut self.keywords,
        }
    }
}

/// Recognized `/Info` keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Author,
    Title,
    Subject,
    Keywords,
}

impl MetadataField {
    pub const ALL: [MetadataField; 4] = [
        MetadataField::Author,
        MetadataField::Title,
        MetadataField::Subject,
        MetadataField::Keywords,
    ];

    /// Dictionary key without the leading `/`
    pub fn key(self) -> &'static [u8] {
        match self {
            MetadataField::Author => b"Author",
            MetadataField::Title => b"Title",
            MetadataField::Subject => b"Subject",
            MetadataField::Keywords => b"Keywords",
        }
    }

    /// Match a raw dictionary key, ignoring one leading namespace marker
    pub fn from_key(key: &[u8]) -> Option<Self> {
        let key = key.strip_prefix(b"/").unwrap_or(key);
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// Read author, title, subject and keywords from raw PDF bytes.
///
/// Never fails: unparseable or metadata-less documents, and encrypted ones
/// that need a user password, all produce an empty record.
pub fn read_metadata(bytes: &[u8]) -> MetadataRecord {
    match load_document(bytes) {
        Ok(doc) => read_document_metadata(&doc),
        Err(e) => {
            debug!("Metadata unavailable: {}", e);
            MetadataRecord::default()
        }
    }
}

/// Read the record from an already parsed document.
///
/// A document that is still encrypted gives an empty record; see
/// `unlock_document`.
pub fn read_document_metadata(doc: &Document) -> MetadataRecord {
    let mut record = MetadataRecord::default();

    if doc.is_encrypted() {
        debug!("Metadata unavailable, PDF is encrypted");
        return record;
    }

    let Some(info) = info_dictionary(doc) else {
        return record;
    };

    for (key, value) in info.iter() {
        let Some(field) = MetadataField::from_key(key) else {
            continue;
        };
        if let Some(text) = value_text(doc, value) {
            *record.slot_mut(field) = text;
        }
    }

    record
}

/// Resolve the trailer's `/Info` entry, whether inline or indirect
pub(crate) fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    let info = match info {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    info.as_dict().ok()
}

/// Render an `/Info` value as text; `None` means "absent"
fn value_text(doc: &Document, value: &Object) -> Option<String> {
    match value {
        Object::Null => None,
        Object::Reference(id) => match doc.get_object(*id).ok()? {
            // A single hop only; reference chains are not valid info values
            Object::Reference(_) => None,
            target => value_text(doc, target),
        },
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(format!("/{}", String::from_utf8_lossy(name))),
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decode a PDF text string.
///
/// Handles UTF-16BE and UTF-8 byte order marks; anything else is read as
/// UTF-8 when valid and as PDFDocEncoding otherwise.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| pdf_doc_char(b)).collect(),
    }
}

/// PDFDocEncoding agrees with Latin-1 except for these two ranges
const PDF_DOC_0X18: [char; 8] = [
    '\u{02D8}', '\u{02C7}', '\u{02C6}', '\u{02D9}', '\u{02DD}', '\u{02DB}', '\u{02DA}', '\u{02DC}',
];

// 0x9F is undefined and passes through
const PDF_DOC_0X80: [char; 33] = [
    '\u{2022}', '\u{2020}', '\u{2021}', '\u{2026}', '\u{2014}', '\u{2013}', '\u{0192}', '\u{2044}',
    '\u{2039}', '\u{203A}', '\u{2212}', '\u{2030}', '\u{201E}', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '\u{201A}', '\u{2122}', '\u{FB01}', '\u{FB02}', '\u{0141}', '\u{0152}', '\u{0160}',
    '\u{0178}', '\u{017D}', '\u{0131}', '\u{0142}', '\u{0153}', '\u{0161}', '\u{017E}', '\u{009F}',
    '\u{20AC}',
];

fn pdf_doc_char(byte: u8) -> char {
    match byte {
        0x18..=0x1F => PDF_DOC_0X18[usize::from(byte - 0x18)],
        0x80..=0xA0 => PDF_DOC_0X80[usize::from(byte - 0x80)],
        _ => char::from(byte),
    }
}

/// Encode a Rust string as a PDF text string object.
///
/// ASCII stays a literal string; everything else becomes UTF-16BE with BOM.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
