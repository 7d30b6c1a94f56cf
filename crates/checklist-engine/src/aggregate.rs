//! Aggregation of per-checklist confidences into an audit summary

use shared_types::{AuditSummary, ChecklistConfidence, ChecklistResult, ReadinessTier};

/// Overall confidence strictly above this is high readiness
pub const HIGH_READINESS_ABOVE: f64 = 80.0;

/// Overall confidence strictly above this (and not high) is moderate readiness
pub const MODERATE_READINESS_ABOVE: f64 = 50.0;

pub fn tier_for(overall_confidence: f64) -> ReadinessTier {
    if overall_confidence > HIGH_READINESS_ABOVE {
        ReadinessTier::High
    } else if overall_confidence > MODERATE_READINESS_ABOVE {
        ReadinessTier::Moderate
    } else {
        ReadinessTier::Low
    }
}

/// Combine named checklist results into a summary.
///
/// The overall confidence is the unweighted mean across checklists, so a
/// 5-item checklist counts as much as a 20-item one. Returns `None` when
/// nothing was selected.
pub fn summarize<S: AsRef<str>>(results: &[(S, ChecklistResult)]) -> Option<AuditSummary> {
    if results.is_empty() {
        return None;
    }

    let confidences: Vec<ChecklistConfidence> = results
        .iter()
        .map(|(name, result)| ChecklistConfidence {
            name: name.as_ref().to_string(),
            confidence: result.confidence,
        })
        .collect();

    let overall_confidence =
        confidences.iter().map(|c| c.confidence).sum::<f64>() / confidences.len() as f64;

    Some(AuditSummary {
        confidences,
        overall_confidence,
        tier: tier_for(overall_confidence),
    })
}
