//! Format detection and text extraction

use std::path::Path;

use lopdf::Document;
use thiserror::Error;
use tracing::debug;

/// Extraction errors, reported per document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Text file is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("PDF could not be parsed: {0}")]
    PdfParse(String),

    #[error("PDF has no extractable text")]
    NoText,
}

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    Pdf,
}

impl SourceFormat {
    /// Detect format from the declared content type, then the file
    /// extension, then the `%PDF` magic bytes.
    pub fn detect(filename: &str, content_type: Option<&str>, data: &[u8]) -> Option<Self> {
        if let Some(format) = content_type.and_then(Self::from_content_type) {
            return Some(format);
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("pdf") => return Some(SourceFormat::Pdf),
            Some("txt") => return Some(SourceFormat::Text),
            _ => {}
        }

        if data.starts_with(b"%PDF") {
            Some(SourceFormat::Pdf)
        } else {
            None
        }
    }

    fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "application/pdf" => Some(SourceFormat::Pdf),
            "text/plain" => Some(SourceFormat::Text),
            _ => None,
        }
    }
}

/// Extract plain text from an uploaded document
pub fn extract_text(
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, ExtractionError> {
    match SourceFormat::detect(filename, content_type, data) {
        Some(SourceFormat::Pdf) => extract_pdf_text(data),
        Some(SourceFormat::Text) => decode_plain_text(data),
        None => Err(ExtractionError::UnsupportedFormat(
            content_type.unwrap_or(filename).to_string(),
        )),
    }
}

fn decode_plain_text(data: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(data.to_vec()).map_err(|e| ExtractionError::InvalidUtf8(e.to_string()))
}

/// Extract text page by page, skipping pages without text.
///
/// Falls back to pdf-extract (better CID font handling) when lopdf yields
/// no text on any page.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    extract_pdf_text_with(data, |bytes| {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
    })
}

fn extract_pdf_text_with<F>(data: &[u8], fallback: F) -> Result<String, ExtractionError>
where
    F: FnOnce(&[u8]) -> Result<String, String>,
{
    let doc = Document::load_mem(data).map_err(|e| ExtractionError::PdfParse(e.to_string()))?;

    let mut pages = Vec::new();
    let mut failed_pages = 0usize;
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) if !text.trim().is_empty() => pages.push(text.trim_end().to_string()),
            Ok(_) => debug!(page_number, "Page has no text"),
            Err(e) => {
                failed_pages += 1;
                debug!(page_number, error = %e, "lopdf page extraction failed");
            }
        }
    }

    if !pages.is_empty() {
        return Ok(pages.join("\n"));
    }

    debug!(failed_pages, "Falling back to pdf-extract");
    match fallback(data) {
        Ok(text) if !text.trim().is_empty() => Ok(text),
        Ok(_) => Err(ExtractionError::NoText),
        Err(e) => {
            debug!(error = %e, "pdf-extract fallback failed");
            Err(ExtractionError::NoText)
        }
    }
}
