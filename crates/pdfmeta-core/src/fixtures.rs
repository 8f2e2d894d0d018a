//! In-memory PDF builders shared by the unit tests

use lopdf::encryption::{decrypt_object, get_encryption_key};
use lopdf::{
    content::Content, content::Operation, Dictionary, Document, Object, Stream, StringFormat,
};
use md5::{Digest, Md5};

/// How the `/Info` dictionary is attached to the trailer
#[derive(Clone, Copy)]
pub(crate) enum InfoPlacement {
    Indirect,
    Inline,
}

fn build_document(num_pages: u32) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();

    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id =
            doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// A valid PDF with `num_pages` pages and no `/Info` dictionary
pub(crate) fn create_test_pdf(num_pages: u32) -> Vec<u8> {
    save(build_document(num_pages))
}

/// A one-page PDF whose `/Info` dictionary holds the given entries
pub(crate) fn create_pdf_with_info(entries: Vec<(&str, Object)>) -> Vec<u8> {
    create_pdf_with_info_at(entries, InfoPlacement::Indirect)
}

pub(crate) fn create_pdf_with_info_at(
    entries: Vec<(&str, Object)>,
    placement: InfoPlacement,
) -> Vec<u8> {
    let mut doc = build_document(1);
    let info = Dictionary::from_iter(entries);
    match placement {
        InfoPlacement::Indirect => {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", Object::Reference(info_id));
        }
        InfoPlacement::Inline => doc.trailer.set("Info", Object::Dictionary(info)),
    }
    save(doc)
}

/// A PDF carrying author, title, subject and keywords
pub(crate) fn create_pdf_with_author(author: &str) -> Vec<u8> {
    create_pdf_with_info(vec![
        ("Author", Object::string_literal(author)),
        ("Title", Object::string_literal("Quarterly Report")),
        ("Subject", Object::string_literal("Finance")),
        ("Keywords", Object::string_literal("q3, revenue")),
    ])
}

/// Password padding string of the standard security handler
const PASSWORD_PADDING: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08,
    0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

fn padded_password(password: &str) -> Vec<u8> {
    let bytes = password.as_bytes();
    let len = bytes.len().min(32);
    let mut padded = bytes[..len].to_vec();
    padded.extend_from_slice(&PASSWORD_PADDING[..32 - len]);
    padded
}

/// RC4 keystream applied to `data`; the same call encrypts and decrypts
fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut state: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut j = 0u8;
    for i in 0..256 {
        j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
        state.swap(i, j as usize);
    }

    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|byte| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(state[i as usize]);
            state.swap(i as usize, j as usize);
            byte ^ state[state[i as usize].wrapping_add(state[j as usize]) as usize]
        })
        .collect()
}

/// A one-page PDF under RC4 40-bit standard security (revision 2).
///
/// The owner password is `"owner"`. `/Info` carries author `"Jane Doe"` and
/// title `"Quarterly Report"`, encrypted like every other string and stream.
/// An empty `user_password` gives an owner-password-only file.
pub(crate) fn create_encrypted_pdf(user_password: &str) -> Vec<u8> {
    let mut doc = build_document(1);
    let info_id = doc.add_object(Dictionary::from_iter(vec![
        ("Author", Object::string_literal("Jane Doe")),
        ("Title", Object::string_literal("Quarterly Report")),
    ]));
    doc.trailer.set("Info", Object::Reference(info_id));

    let file_id = Object::String(b"pdfmeta-fixture-".to_vec(), StringFormat::Hexadecimal);
    doc.trailer
        .set("ID", Object::Array(vec![file_id.clone(), file_id]));

    // Algorithm 3: /O is the padded user password under the owner key
    let owner_key = Md5::digest(padded_password("owner"));
    let owner_entry = rc4(&owner_key[..5], &padded_password(user_password));

    let encrypt_id = doc.add_object(Dictionary::from_iter(vec![
        ("Filter", Object::Name(b"Standard".to_vec())),
        ("V", Object::Integer(1)),
        ("R", Object::Integer(2)),
        ("Length", Object::Integer(40)),
        ("P", Object::Integer(-44)),
        ("O", Object::String(owner_entry, StringFormat::Hexadecimal)),
    ]));
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));

    let key = get_encryption_key(&doc, user_password, false).unwrap();

    // Algorithm 4: /U is the padding string under the file key
    doc.get_object_mut(encrypt_id)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set(
            "U",
            Object::String(rc4(&key, &PASSWORD_PADDING), StringFormat::Hexadecimal),
        );

    for (&id, object) in doc.objects.iter_mut() {
        if id == encrypt_id {
            continue;
        }
        if let Object::Dictionary(dict) = object {
            for (_, value) in dict.iter_mut() {
                seal(&key, id, value);
            }
        } else {
            seal(&key, id, object);
        }
    }

    save(doc)
}

fn seal(key: &[u8], id: lopdf::ObjectId, object: &mut Object) {
    // RC4 is symmetric, so lopdf's per-object decryption also encrypts
    let Ok(sealed) = decrypt_object(key, id, &*object) else {
        return;
    };
    match object {
        Object::Stream(stream) => stream.set_content(sealed),
        Object::String(content, format) => {
            *content = sealed;
            *format = StringFormat::Hexadecimal;
        }
        _ => {}
    }
}
