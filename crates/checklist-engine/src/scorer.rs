//! Keyword-overlap checklist scoring

use shared_types::{ChecklistResult, Verdict, VerdictItem};
use tracing::debug;

use crate::error::EngineError;
use crate::patterns::{count_matches, keywords};
use crate::registry::Checklist;

/// A requirement is addressed only when its match score is strictly above this
pub const ADDRESSED_THRESHOLD: f64 = 0.5;

/// Score every requirement of `checklist` against the document text.
///
/// Empty text is valid input and yields an all-missing result.
pub fn evaluate(text: &str, checklist: &Checklist) -> Result<ChecklistResult, EngineError> {
    let text_lower = text.to_lowercase();
    evaluate_lowered(&text_lower, checklist)
}

pub(crate) fn evaluate_lowered(
    text_lower: &str,
    checklist: &Checklist,
) -> Result<ChecklistResult, EngineError> {
    if checklist.is_empty() {
        return Err(EngineError::EmptyChecklist(checklist.key().to_string()));
    }

    let items: Vec<VerdictItem> = checklist
        .requirements()
        .iter()
        .map(|requirement| score_requirement(requirement, text_lower))
        .collect();

    let addressed = items.iter().filter(|i| i.verdict.is_addressed()).count();
    let confidence = addressed as f64 / items.len() as f64 * 100.0;

    debug!(
        checklist = checklist.key(),
        addressed,
        total = items.len(),
        confidence,
        "Evaluated checklist"
    );

    Ok(ChecklistResult {
        checklist_key: checklist.key().to_string(),
        checklist_name: checklist.name().to_string(),
        items,
        confidence,
    })
}

fn score_requirement(requirement: &str, text_lower: &str) -> VerdictItem {
    let keywords = keywords(requirement);
    let total_keywords = keywords.len();
    let matched_keywords = count_matches(&keywords, text_lower);

    let match_score = if total_keywords == 0 {
        0.0
    } else {
        matched_keywords as f64 / total_keywords as f64
    };

    let verdict = if match_score > ADDRESSED_THRESHOLD {
        Verdict::LikelyAddressed
    } else {
        Verdict::PossiblyMissing
    };

    VerdictItem {
        requirement: requirement.to_string(),
        verdict,
        match_score,
        matched_keywords,
        total_keywords,
    }
}
