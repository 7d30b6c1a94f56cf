//! Document type classification
//!
//! Rules are evaluated in priority order and the first match wins, so a
//! text mentioning both a protocol and an SOP is a Protocol.

use shared_types::DocumentType;

use crate::patterns::{contains_any, PROTOCOL_CUES, SOP_CUES};

struct ClassificationRule {
    document_type: DocumentType,
    cues: &'static [&'static str],
}

const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        document_type: DocumentType::Protocol,
        cues: PROTOCOL_CUES,
    },
    ClassificationRule {
        document_type: DocumentType::Sop,
        cues: SOP_CUES,
    },
];

/// Assign a coarse document type from lexical cues. Never fails.
pub fn classify(text: &str) -> DocumentType {
    let text_lower = text.to_lowercase();
    classify_lowered(&text_lower)
}

pub(crate) fn classify_lowered(text_lower: &str) -> DocumentType {
    RULES
        .iter()
        .find(|rule| contains_any(text_lower, rule.cues))
        .map(|rule| rule.document_type)
        .unwrap_or(DocumentType::Unknown)
}
