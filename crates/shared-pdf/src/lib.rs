//! Shared document text extraction
//!
//! Turns uploaded bytes (PDF or UTF-8 text) into the plain text the
//! checklist engine scores. Multi-page PDFs are joined with newlines.

pub mod extract;

pub use extract::{extract_pdf_text, extract_text, ExtractionError, SourceFormat};
