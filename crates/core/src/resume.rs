//! Resume Text Extraction
//!
//! Given an uploaded document and its declared media type, produces the plain
//! text content or a typed failure. Supported: PDF, OOXML/legacy word
//! processor documents, and plain text. Layout, tables, and images are not
//! preserved; pages and paragraphs are concatenated with newlines.
//!
//! Callers treat every failure here as "no resume text" — extraction is
//! best-effort and must never block interview creation.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::fmt;
use std::io::Read;

/// Media types the extractor recognizes, keyed by the client-declared
/// content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    WordDocument,
    PlainText,
}

impl MediaType {
    /// Maps a declared content type to a recognized media type, ignoring any
    /// `; charset=...` parameters.
    pub fn from_declared(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        match essence {
            "application/pdf" => Some(MediaType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/msword" => Some(MediaType::WordDocument),
            "text/plain" => Some(MediaType::PlainText),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Pdf => write!(f, "PDF"),
            MediaType::WordDocument => write!(f, "word-processor"),
            MediaType::PlainText => write!(f, "plain-text"),
        }
    }
}

/// Why a resume could not be turned into text.
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("unsupported media type `{0}`")]
    UnsupportedMedia(String),
    #[error("malformed {media} document: {message}")]
    Malformed { media: MediaType, message: String },
}

/// Extracts visible text content from `bytes` according to the declared
/// media type.
pub fn extract(bytes: &[u8], declared_media_type: &str) -> Result<String, ResumeError> {
    let media = MediaType::from_declared(declared_media_type)
        .ok_or_else(|| ResumeError::UnsupportedMedia(declared_media_type.to_string()))?;

    let result = match media {
        MediaType::Pdf => extract_pdf(bytes),
        MediaType::WordDocument => extract_word_document(bytes),
        MediaType::PlainText => String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string()),
    };
    result.map_err(|message| ResumeError::Malformed { media, message })
}

fn extract_pdf(bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

/// Pulls paragraph text out of the OOXML package's main document part.
fn extract_word_document(bytes: &[u8]) -> Result<String, String> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor).map_err(|e| e.to_string())?;
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| e.to_string())?
        .read_to_string(&mut document)
        .map_err(|e| e.to_string())?;
    paragraph_text(&document)
}

/// Collects the text runs (`w:t`) of each paragraph (`w:p`), joining
/// paragraphs with newlines.
fn paragraph_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                current.push_str(&t.xml_content().map_err(|e| e.to_string())?);
            }
            Ok(Event::GeneralRef(r)) if in_text_run => {
                let raw = r.decode().map_err(|e| e.to_string())?;
                let entity = format!("&{raw};");
                let unescaped =
                    quick_xml::escape::unescape(&entity).map_err(|e| e.to_string())?;
                current.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n"))
}
