//! Keyword derivation and lexical cue matching

/// Cues that mark a document as a clinical investigation protocol
pub const PROTOCOL_CUES: &[&str] = &["protocol"];

/// Cues that mark a document as a standard operating procedure
pub const SOP_CUES: &[&str] = &["standard operating procedure", "sop"];

/// Derive the keyword list for a requirement sentence.
///
/// Case-folded and split on whitespace only. Punctuation stays attached
/// ("Committee?" -> "committee?") and repeated words are kept, so each
/// occurrence counts toward the total.
pub fn keywords(requirement: &str) -> Vec<String> {
    requirement
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Count keywords occurring anywhere in the lower-cased text.
///
/// Plain substring containment: "is" matches inside "this".
pub fn count_matches(keywords: &[String], text_lower: &str) -> usize {
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(keyword.as_str()))
        .count()
}

/// Check if the lower-cased text contains any of the cues
pub fn contains_any(text_lower: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text_lower.contains(cue))
}
